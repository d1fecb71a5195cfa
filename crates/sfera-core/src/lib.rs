//! Sfera Core - third-order ambisonic encoding primitives
//!
//! Encodes a mono signal into 16-channel B-format (FuMa channel order,
//! MaxN normalization) for a single, smoothly steerable direction. Built
//! for real-time use: all buffers are allocated at construction and the
//! per-sample path never allocates.
//!
//! # Building Blocks
//!
//! - [`WaveTable`] - One-cycle sine table with a guard point; cosine via a
//!   quarter-cycle offset
//! - [`DirectionState`] - Cached `sin`/`cos` of 1×, 2× and 3× each angle,
//!   recomputed per axis only when that axis moves
//! - [`HarmonicEncoder`] - The 16 closed-form channel weights
//! - [`ParameterRamp`] - Linear smoothing of direction changes
//!
//! # Host Layer
//!
//! - [`EncoderSession`] - Encoder + ramps + bypass, processing frames and blocks
//! - [`ParameterInfo`] / [`ParamDescriptor`] - Bypass, azimuth and elevation
//!   as host parameters
//! - [`EncoderState`] - 12-byte persisted state record
//!
//! # Angles
//!
//! Direction math works in *turns*: `theta = azimuth / 360` and
//! `phi = elevation / 360`. Hosts supplying normalized `[0, 1]` values map
//! them with `theta = n − 0.5` and `phi = n·0.5 − 0.25`.
//!
//! # no_std Support
//!
//! Disable the default `std` feature for embedded targets:
//!
//! ```toml
//! [dependencies]
//! sfera-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Example
//!
//! ```rust
//! use sfera_core::{Channel, Direction, EncoderSession};
//!
//! let mut session = EncoderSession::new();
//! session.set_direction(Direction::new(0.0, 90.0)).unwrap();
//! session.reset().unwrap();
//!
//! let frame = session.process_frame(1.0).unwrap();
//! assert!((frame[Channel::Z.index()] - 1.0).abs() < 1e-5);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod channel;
pub mod direction;
pub mod encoder;
pub mod error;
pub mod param_info;
pub mod ramp;
pub mod session;
pub mod state;
pub mod wavetable;

pub use channel::{CHANNEL_COUNT, Channel};
pub use direction::{Axis, Branch, DirectionState, Harmonic};
pub use encoder::{HarmonicEncoder, NormalizationConstants};
pub use error::EncodeError;
pub use param_info::{ParamDescriptor, ParamFlags, ParamId, ParamUnit, ParameterInfo};
pub use ramp::{ParameterRamp, RampState};
pub use session::{DEFAULT_RAMP_LENGTH, Direction, EncoderSession, ParamKind, SessionConfig};
pub use state::{EncoderState, STATE_LEN, StateError};
pub use wavetable::WaveTable;
