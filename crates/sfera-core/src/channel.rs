//! FuMa channel labels for third-order B-format.

use crate::EncodeError;

/// Number of output channels in a third-order B-format frame.
pub const CHANNEL_COUNT: usize = 16;

/// One B-format channel, in FuMa order.
///
/// The discriminant is the channel's position in an interleaved frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Channel {
    /// Omnidirectional.
    W = 0,
    /// Front-back figure of eight.
    X,
    /// Left-right figure of eight.
    Y,
    /// Up-down figure of eight.
    Z,
    /// Second order, vertical.
    R,
    /// Second order, tesseral.
    S,
    /// Second order, tesseral.
    T,
    /// Second order, sectoral.
    U,
    /// Second order, sectoral.
    V,
    /// Third order, vertical.
    K,
    /// Third order, tesseral.
    L,
    /// Third order, tesseral.
    M,
    /// Third order, tesseral.
    N,
    /// Third order, tesseral.
    O,
    /// Third order, sectoral.
    P,
    /// Third order, sectoral.
    Q,
}

impl Channel {
    /// All channels in interleaved order.
    pub const ALL: [Channel; CHANNEL_COUNT] = [
        Channel::W,
        Channel::X,
        Channel::Y,
        Channel::Z,
        Channel::R,
        Channel::S,
        Channel::T,
        Channel::U,
        Channel::V,
        Channel::K,
        Channel::L,
        Channel::M,
        Channel::N,
        Channel::O,
        Channel::P,
        Channel::Q,
    ];

    /// Position in an interleaved frame.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Single-letter FuMa label.
    pub const fn label(self) -> &'static str {
        match self {
            Channel::W => "W",
            Channel::X => "X",
            Channel::Y => "Y",
            Channel::Z => "Z",
            Channel::R => "R",
            Channel::S => "S",
            Channel::T => "T",
            Channel::U => "U",
            Channel::V => "V",
            Channel::K => "K",
            Channel::L => "L",
            Channel::M => "M",
            Channel::N => "N",
            Channel::O => "O",
            Channel::P => "P",
            Channel::Q => "Q",
        }
    }

    /// Ambisonic order (0..=3).
    pub const fn order(self) -> u8 {
        match self {
            Channel::W => 0,
            Channel::X | Channel::Y | Channel::Z => 1,
            Channel::R | Channel::S | Channel::T | Channel::U | Channel::V => 2,
            _ => 3,
        }
    }
}

impl TryFrom<usize> for Channel {
    type Error = EncodeError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Channel::ALL
            .get(index)
            .copied()
            .ok_or(EncodeError::ChannelOutOfRange(index))
    }
}

impl core::fmt::Display for Channel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}
