//! Audio I/O layer for sfera.
//!
//! This crate provides:
//!
//! - **WAV file I/O**: [`read_wav`] loads (and mixes down) a source file,
//!   [`write_wav_interleaved`] writes multichannel B-format output
//! - **Offline encoding**: [`EncodingEngine`] drives an
//!   [`EncoderSession`](sfera_core::EncoderSession) over whole buffers,
//!   block by block, with optional direction automation
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sfera_core::{CHANNEL_COUNT, Direction, EncoderSession};
//! use sfera_io::{EncodingEngine, WavSpec, read_wav, write_wav_interleaved};
//!
//! # fn main() -> sfera_io::Result<()> {
//! let (samples, spec) = read_wav("voice.wav")?;
//!
//! let mut session = EncoderSession::new();
//! session.set_direction(Direction::new(-30.0, 15.0))?;
//! session.reset()?;
//!
//! let mut engine = EncodingEngine::new(session, 512);
//! let bformat = engine.process_buffer(&samples)?;
//!
//! let out_spec = WavSpec { channels: CHANNEL_COUNT as u16, ..spec };
//! write_wav_interleaved("voice_ambi.wav", &bformat, out_spec)?;
//! # Ok(())
//! # }
//! ```

mod engine;
mod wav;

pub use engine::EncodingEngine;
pub use wav::{
    WavFormat, WavInfo, WavSpec, read_wav, read_wav_info, read_wav_interleaved, write_wav,
    write_wav_interleaved,
};

use sfera_core::EncodeError;

/// Error types for audio I/O and offline encoding.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// The encoder rejected its input.
    #[error("Encoding error: {0}")]
    Encode(#[from] EncodeError),

    /// A buffer did not have the length the operation requires.
    #[error("Buffer size mismatch: expected {expected} samples, got {actual}")]
    BufferMismatch {
        /// Required length.
        expected: usize,
        /// Supplied length.
        actual: usize,
    },

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type for audio I/O operations.
pub type Result<T> = std::result::Result<T, Error>;
