//! Error type shared by the encoder primitives.
//!
//! The core stays free of `thiserror` so it builds without `std`; `Display`
//! and [`std::error::Error`] are provided when the `std` feature is enabled.

use crate::direction::Axis;

/// Errors reported by the encoder primitives.
///
/// Construction errors (`EmptyWaveTable`, `ZeroRampLength`) are fatal
/// configuration mistakes. The remaining variants are contract violations
/// detected at the call boundary; none of them is ever replaced by a
/// sentinel sample value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EncodeError {
    /// A wave table was requested with zero samples per cycle.
    EmptyWaveTable,
    /// A parameter ramp was requested with a block size of zero.
    ZeroRampLength,
    /// A channel index outside `0..16` was requested.
    ChannelOutOfRange(usize),
    /// A direction value was NaN, infinite, or large enough that its wave
    /// table position overflows.
    NonFiniteDirection {
        /// Axis that received the value.
        axis: Axis,
        /// The rejected value.
        value: f64,
    },
    /// A wave table lookup was attempted at a NaN or infinite position.
    NonFiniteLookup(f64),
    /// An interleaved output buffer did not hold 16 samples per input sample.
    BufferLength {
        /// `input.len() * 16`
        expected: usize,
        /// Length of the buffer passed in.
        actual: usize,
    },
}

#[cfg(feature = "std")]
impl std::fmt::Display for EncodeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::EmptyWaveTable => write!(f, "wave table length must be greater than zero"),
            Self::ZeroRampLength => write!(f, "ramp block size must be greater than zero"),
            Self::ChannelOutOfRange(index) => {
                write!(f, "channel index {index} out of range (expected 0..16)")
            }
            Self::NonFiniteDirection { axis, value } => {
                write!(f, "{} value {value} has no finite table position", axis.name())
            }
            Self::NonFiniteLookup(x) => write!(f, "non-finite wave table position: {x}"),
            Self::BufferLength { expected, actual } => {
                write!(f, "output buffer holds {actual} samples, expected {expected}")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for EncodeError {}
