//! Offline block-based encoding engine.

use sfera_core::{CHANNEL_COUNT, Direction, EncoderSession};

use crate::{Error, Result};

/// Runs an [`EncoderSession`] over whole buffers, one block at a time.
///
/// Blocks mimic a host's audio callback: direction automation is applied
/// only at block boundaries, and the session's ramps smooth each change
/// across the following samples.
pub struct EncodingEngine {
    session: EncoderSession,
    block_size: usize,
}

impl EncodingEngine {
    /// Create an engine. A `block_size` of zero is treated as one.
    pub fn new(session: EncoderSession, block_size: usize) -> Self {
        Self {
            session,
            block_size: block_size.max(1),
        }
    }

    /// Samples per processing block.
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// The wrapped session.
    pub fn session(&self) -> &EncoderSession {
        &self.session
    }

    /// Mutable access to the wrapped session, e.g. to change direction.
    pub fn session_mut(&mut self) -> &mut EncoderSession {
        &mut self.session
    }

    /// Consume the engine and return the session.
    pub fn into_session(self) -> EncoderSession {
        self.session
    }

    /// Encode one block into interleaved 16-channel output.
    ///
    /// `output.len()` must be `input.len() * 16`.
    pub fn process_block(&mut self, input: &[f32], output: &mut [f32]) -> Result<()> {
        let expected = input.len() * CHANNEL_COUNT;
        if output.len() != expected {
            return Err(Error::BufferMismatch {
                expected,
                actual: output.len(),
            });
        }
        self.session.process_block(input, output)?;
        Ok(())
    }

    /// Encode an entire mono buffer at the session's current direction.
    ///
    /// Returns interleaved 16-channel samples.
    pub fn process_buffer(&mut self, input: &[f32]) -> Result<Vec<f32>> {
        self.process_with_automation(input, |_| None)
    }

    /// Encode an entire mono buffer, asking `automation` for a new direction
    /// before each block.
    ///
    /// `automation` receives the frame offset of the block about to be
    /// processed; returning `Some` retargets the session.
    pub fn process_with_automation<F>(&mut self, input: &[f32], mut automation: F) -> Result<Vec<f32>>
    where
        F: FnMut(usize) -> Option<Direction>,
    {
        tracing::info!(
            frames = input.len(),
            block_size = self.block_size,
            "encoding buffer"
        );

        let mut output = vec![0.0; input.len() * CHANNEL_COUNT];
        let out_block = self.block_size * CHANNEL_COUNT;

        for (index, (in_chunk, out_chunk)) in input
            .chunks(self.block_size)
            .zip(output.chunks_mut(out_block))
            .enumerate()
        {
            let offset = index * self.block_size;
            if let Some(direction) = automation(offset) {
                tracing::trace!(
                    offset,
                    azimuth = direction.azimuth,
                    elevation = direction.elevation,
                    "direction change"
                );
                self.session.set_direction(direction)?;
            }
            self.process_block(in_chunk, out_chunk)?;
        }

        tracing::debug!(samples = output.len(), "encoding finished");
        Ok(output)
    }

    /// Snap the session to its current targets.
    pub fn reset(&mut self) -> Result<()> {
        self.session.reset()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sfera_core::{Channel, SessionConfig};

    fn engine(block: usize, ramp: u32) -> EncodingEngine {
        let session = EncoderSession::with_config(SessionConfig::new(2048, ramp).unwrap());
        EncodingEngine::new(session, block)
    }

    #[test]
    fn output_is_sixteen_times_input() {
        let mut engine = engine(64, 16);
        let out = engine.process_buffer(&[0.25; 100]).unwrap();
        assert_eq!(out.len(), 1600);
    }

    #[test]
    fn zero_block_size_becomes_one() {
        let engine = engine(0, 16);
        assert_eq!(engine.block_size(), 1);
    }

    #[test]
    fn block_size_does_not_change_static_output() {
        let input: Vec<f32> = (0..500).map(|i| (i as f32 * 0.05).sin()).collect();
        let mut a = engine(7, 32);
        let mut b = engine(512, 32);
        for e in [&mut a, &mut b] {
            e.session_mut()
                .set_direction(Direction::new(75.0, -10.0))
                .unwrap();
        }
        assert_eq!(
            a.process_buffer(&input).unwrap(),
            b.process_buffer(&input).unwrap()
        );
    }

    #[test]
    fn automation_is_queried_at_block_boundaries() {
        let mut engine = engine(32, 8);
        let mut offsets = Vec::new();
        engine
            .process_with_automation(&[0.0; 100], |offset| {
                offsets.push(offset);
                None
            })
            .unwrap();
        assert_eq!(offsets, vec![0, 32, 64, 96]);
    }

    #[test]
    fn automation_retargets_session() {
        let mut engine = engine(32, 8);
        let out = engine
            .process_with_automation(&[1.0; 64], |offset| {
                (offset == 32).then_some(Direction::new(90.0, 0.0))
            })
            .unwrap();

        let y = |frame: usize| out[frame * CHANNEL_COUNT + Channel::Y.index()];
        assert_eq!(y(31), 0.0);
        assert!(y(32) > 0.0 && y(32) < 0.5, "ramp starts at the boundary");
        assert!((y(63) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn mismatched_block_is_rejected() {
        let mut engine = engine(16, 8);
        let mut out = vec![0.0; 10];
        let err = engine.process_block(&[0.0; 4], &mut out).unwrap_err();
        assert!(matches!(
            err,
            Error::BufferMismatch {
                expected: 64,
                actual: 10
            }
        ));
    }
}
