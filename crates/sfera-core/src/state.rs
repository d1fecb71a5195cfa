//! Persisted encoder state.
//!
//! Hosts save and restore a fixed 12-byte record:
//!
//! | offset | type | field |
//! |--------|------|-------|
//! | 0 | `i32` | bypass (0 or 1) |
//! | 4 | `f32` | theta, turns |
//! | 8 | `f32` | phi, turns |
//!
//! All fields are little-endian regardless of platform.

/// Size of a serialized [`EncoderState`] in bytes.
pub const STATE_LEN: usize = 12;

/// Errors decoding a persisted state record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StateError {
    /// Fewer than [`STATE_LEN`] bytes were supplied.
    Truncated {
        /// Number of bytes received.
        len: usize,
    },
    /// A stored angle was NaN or infinite.
    NonFinite,
}

#[cfg(feature = "std")]
impl std::fmt::Display for StateError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Truncated { len } => {
                write!(f, "state record truncated: {len} bytes, expected {STATE_LEN}")
            }
            Self::NonFinite => write!(f, "state record contains a non-finite angle"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for StateError {}

/// Host-facing snapshot of the encoder's parameters.
///
/// Angles are stored in turns (`azimuth / 360`, `elevation / 360`).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EncoderState {
    /// Bypass switch.
    pub bypass: bool,
    /// Azimuth in turns.
    pub theta: f32,
    /// Elevation in turns.
    pub phi: f32,
}

impl EncoderState {
    /// Serialize to the fixed little-endian layout.
    pub fn to_bytes(&self) -> [u8; STATE_LEN] {
        let mut out = [0u8; STATE_LEN];
        out[0..4].copy_from_slice(&i32::from(self.bypass).to_le_bytes());
        out[4..8].copy_from_slice(&self.theta.to_le_bytes());
        out[8..12].copy_from_slice(&self.phi.to_le_bytes());
        out
    }

    /// Decode a record. Bytes past [`STATE_LEN`] are ignored.
    ///
    /// Any positive bypass word counts as enabled.
    ///
    /// # Errors
    ///
    /// [`StateError::Truncated`] for short input, [`StateError::NonFinite`]
    /// if either angle is NaN or infinite.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, StateError> {
        let Some(record) = bytes.get(..STATE_LEN) else {
            return Err(StateError::Truncated { len: bytes.len() });
        };
        let word = |i: usize| [record[i], record[i + 1], record[i + 2], record[i + 3]];

        let bypass = i32::from_le_bytes(word(0)) > 0;
        let theta = f32::from_le_bytes(word(4));
        let phi = f32::from_le_bytes(word(8));
        if !theta.is_finite() || !phi.is_finite() {
            return Err(StateError::NonFinite);
        }
        Ok(Self { bypass, theta, phi })
    }
}
