//! Linear parameter ramps for zipper-free direction changes.
//!
//! A [`ParameterRamp`] is fed the *target* value once per sample and returns
//! the value to use for that sample. When the target changes, the output
//! walks toward it in `block_size` equal steps; while the target holds and no
//! ramp is running, the target passes straight through.
//!
//! ## States
//!
//! - **Idle**: output equals input.
//! - **Ramping**: output advances by a fixed increment each call, for
//!   exactly `block_size` calls.
//!
//! The increment is the distance between the new target and the *previous
//! target*, divided by `block_size`. A target change during a ramp discards
//! the remaining steps and adds the new increment to the current output, so
//! the last ramped value can differ from the target. The next idle call
//! returns the target itself.
//!
//! ```rust
//! use sfera_core::ParameterRamp;
//!
//! let mut ramp = ParameterRamp::new(4).unwrap();
//! let out: Vec<f64> = (0..5).map(|_| ramp.process(4.0)).collect();
//! assert_eq!(out, [1.0, 2.0, 3.0, 4.0, 4.0]);
//! ```

use core::num::NonZeroU32;

use crate::EncodeError;

/// Ramp phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RampState {
    /// No transition pending; input passes through.
    Idle,
    /// Stepping toward the last input.
    Ramping,
}

/// Linear smoother with a fixed transition length in samples.
#[derive(Debug, Clone)]
pub struct ParameterRamp {
    /// Samples per transition
    block_size: u32,
    /// Last input seen
    previous_input: f64,
    /// Last value returned
    previous_output: f64,
    /// Per-sample step of the running ramp
    increment: f64,
    /// Steps left before returning to idle
    remaining_steps: u32,
    state: RampState,
}

impl ParameterRamp {
    /// Create an idle ramp at `0.0`.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::ZeroRampLength`] when `block_size == 0`.
    pub fn new(block_size: u32) -> Result<Self, EncodeError> {
        NonZeroU32::new(block_size)
            .map(Self::with_block_size)
            .ok_or(EncodeError::ZeroRampLength)
    }

    /// Infallible form of [`new`](Self::new).
    pub fn with_block_size(block_size: NonZeroU32) -> Self {
        Self {
            block_size: block_size.get(),
            previous_input: 0.0,
            previous_output: 0.0,
            increment: 0.0,
            remaining_steps: 0,
            state: RampState::Idle,
        }
    }

    /// Create an idle ramp already settled at `value`.
    pub fn with_value(block_size: u32, value: f64) -> Result<Self, EncodeError> {
        let mut ramp = Self::new(block_size)?;
        ramp.reset(value);
        Ok(ramp)
    }

    /// Advance one sample toward `input` and return the smoothed value.
    ///
    /// Call exactly once per audio sample.
    #[inline]
    pub fn process(&mut self, input: f64) -> f64 {
        if input != self.previous_input {
            self.increment = (input - self.previous_input) / f64::from(self.block_size);
            self.remaining_steps = self.block_size;
            self.state = RampState::Ramping;
        }
        self.previous_input = input;

        let output = match self.state {
            RampState::Ramping => {
                self.remaining_steps -= 1;
                if self.remaining_steps == 0 {
                    self.state = RampState::Idle;
                }
                self.previous_output + self.increment
            }
            RampState::Idle => input,
        };
        self.previous_output = output;
        output
    }

    /// Drop any running ramp and settle at `value`.
    pub fn reset(&mut self, value: f64) {
        self.previous_input = value;
        self.previous_output = value;
        self.increment = 0.0;
        self.remaining_steps = 0;
        self.state = RampState::Idle;
    }

    /// Last value returned by [`process`](Self::process).
    #[inline]
    pub fn value(&self) -> f64 {
        self.previous_output
    }

    /// Last input passed to [`process`](Self::process).
    #[inline]
    pub fn target(&self) -> f64 {
        self.previous_input
    }

    /// Current phase.
    #[inline]
    pub fn state(&self) -> RampState {
        self.state
    }

    /// Whether a transition is in progress.
    #[inline]
    pub fn is_ramping(&self) -> bool {
        self.state == RampState::Ramping
    }

    /// Steps left in the running transition (0 when idle).
    #[inline]
    pub fn remaining_steps(&self) -> u32 {
        self.remaining_steps
    }

    /// Transition length in samples.
    #[inline]
    pub fn block_size(&self) -> u32 {
        self.block_size
    }
}
