//! One-cycle sine table with linear interpolation.
//!
//! [`WaveTable`] stores `L + 1` samples of a single sine cycle. The extra
//! sample is a closing guard point (always `0.0`) so the interpolator can
//! read `samples[i + 1]` at the last index without a bounds special case.
//! Cosine values come from the same table, queried a quarter cycle ahead.
//!
//! Positions are expressed in table units: `x = L` is one full cycle, so
//! `lookup(x) ≈ sin(2π·x/L)` and `lookup(x + L/4) ≈ cos(2π·x/L)`.
//!
//! # Example
//!
//! ```rust
//! use sfera_core::WaveTable;
//!
//! let table = WaveTable::new(2048).unwrap();
//! let quarter = table.quarter();
//!
//! // sin(π/2) and cos(0) both sit exactly on a table sample
//! assert!((table.lookup(quarter).unwrap() - 1.0).abs() < 1e-12);
//! assert!((table.lookup_cos(0.0).unwrap() - 1.0).abs() < 1e-12);
//! ```

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std as alloc;

use alloc::vec::Vec;
use core::f64::consts::TAU;
use core::num::NonZeroUsize;

use crate::EncodeError;

/// Precomputed sine cycle with a guard sample, shared by sine and cosine lookups.
///
/// Immutable after construction. The buffer is allocated once in
/// [`new`](Self::new) and never resized, so every lookup is a fixed-cost,
/// allocation-free operation.
#[derive(Debug, Clone, PartialEq)]
pub struct WaveTable {
    /// `len + 1` samples; the last one is the closing guard point.
    samples: Vec<f64>,
    /// Table length as a float, cached for the wrap arithmetic.
    len_f: f64,
}

impl WaveTable {
    /// Table length used by [`EncoderSession`](crate::EncoderSession) unless configured otherwise.
    pub const DEFAULT_LENGTH: usize = 2048;

    /// Build a sine table with `length` samples per cycle.
    ///
    /// `sample[i] = sin(2π·i/length)` for `i` in `0..length`, and
    /// `sample[length] = 0.0`.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::EmptyWaveTable`] when `length == 0`.
    pub fn new(length: usize) -> Result<Self, EncodeError> {
        NonZeroUsize::new(length)
            .map(Self::with_length)
            .ok_or(EncodeError::EmptyWaveTable)
    }

    /// Infallible form of [`new`](Self::new).
    pub fn with_length(length: NonZeroUsize) -> Self {
        let length = length.get();
        let len_f = length as f64;
        let mut samples = Vec::with_capacity(length + 1);
        samples.extend((0..length).map(|i| libm::sin(TAU * i as f64 / len_f)));
        samples.push(0.0);

        #[cfg(feature = "tracing")]
        tracing::debug!("wavetable: built {length} samples + guard point");

        Self { samples, len_f }
    }

    /// Number of samples per cycle (excluding the guard point).
    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len() - 1
    }

    /// Always `false`: an empty table cannot be constructed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Offset in table units that turns a sine lookup into a cosine lookup.
    #[inline]
    pub fn quarter(&self) -> f64 {
        self.len_f * 0.25
    }

    /// Raw samples, including the trailing guard point.
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Reduce `x` into `[0, L)`.
    ///
    /// Closed-form reduction (`fmod` plus one correction), so arbitrarily
    /// large or negative positions cost the same as in-range ones. For
    /// inputs in `[-L, 2L)` the result is bit-identical to adding or
    /// subtracting `L` once. A tiny negative input whose sum with `L`
    /// rounds up to exactly `L` folds to `0.0`, as do exact multiples of `L`.
    ///
    /// `x` must be finite; non-finite input yields NaN.
    #[inline]
    pub fn wrap(&self, x: f64) -> f64 {
        let len = self.len_f;
        let mut wrapped = libm::fmod(x, len);
        // -0.0 takes this branch too, so the result is never negative zero
        if wrapped.is_sign_negative() {
            wrapped += len;
        }
        if wrapped >= len {
            wrapped -= len;
        }
        wrapped
    }

    /// Interpolated sine at position `x` (table units, any finite value).
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::NonFiniteLookup`] for NaN or infinite `x`.
    #[inline]
    pub fn lookup(&self, x: f64) -> Result<f64, EncodeError> {
        if !x.is_finite() {
            return Err(EncodeError::NonFiniteLookup(x));
        }
        Ok(self.interpolate(self.wrap(x)))
    }

    /// Interpolated cosine at position `x`, via the quarter-cycle offset.
    #[inline]
    pub fn lookup_cos(&self, x: f64) -> Result<f64, EncodeError> {
        if !x.is_finite() {
            return Err(EncodeError::NonFiniteLookup(x));
        }
        Ok(self.interpolate(self.wrap(x + self.quarter())))
    }

    /// Linear interpolation at an already wrapped position in `[0, L)`.
    #[inline]
    pub(crate) fn interpolate(&self, wrapped: f64) -> f64 {
        debug_assert!((0.0..self.len_f).contains(&wrapped));
        let index = wrapped as usize;
        let frac = wrapped - index as f64;
        self.samples[index] * (1.0 - frac) + self.samples[index + 1] * frac
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEN: usize = 2048;

    #[test]
    fn zero_length_is_rejected() {
        assert_eq!(WaveTable::new(0), Err(EncodeError::EmptyWaveTable));
    }

    #[test]
    fn layout_has_guard_point() {
        let table = WaveTable::new(LEN).unwrap();
        assert_eq!(table.len(), LEN);
        assert_eq!(table.samples().len(), LEN + 1);
        assert_eq!(table.samples()[LEN], 0.0);
        assert_eq!(table.samples()[0], 0.0);
    }

    #[test]
    fn integer_positions_hit_samples_exactly() {
        let table = WaveTable::new(LEN).unwrap();
        for i in 0..LEN {
            let expected = libm::sin(TAU * i as f64 / LEN as f64);
            assert_eq!(table.lookup(i as f64).unwrap(), expected, "index {i}");
        }
    }

    #[test]
    fn wrap_boundary_is_continuous() {
        let table = WaveTable::new(LEN).unwrap();
        let len = LEN as f64;
        assert_eq!(table.lookup(len).unwrap(), table.lookup(0.0).unwrap());
        assert_eq!(table.lookup(-len).unwrap(), table.lookup(0.0).unwrap());
        assert_eq!(table.wrap(len), 0.0);
    }

    #[test]
    fn tiny_negative_position_folds_to_zero() {
        let table = WaveTable::new(LEN).unwrap();
        let wrapped = table.wrap(-1e-20);
        assert!((0.0..LEN as f64).contains(&wrapped), "got {wrapped}");
        assert_eq!(wrapped, 0.0);
    }

    #[test]
    fn wrap_matches_single_step_reduction() {
        let table = WaveTable::new(LEN).unwrap();
        let len = LEN as f64;
        for &x in &[-len, -1000.25, -0.5, 0.0, 3.75, len - 0.125, len, len + 7.5, 2.0 * len - 1.0] {
            let stepped = if x < 0.0 {
                x + len
            } else if x >= len {
                x - len
            } else {
                x
            };
            let stepped = if stepped >= len { stepped - len } else { stepped };
            assert_eq!(table.wrap(x).to_bits(), stepped.to_bits(), "x = {x}");
        }
    }

    #[test]
    fn far_out_of_range_positions_are_periodic() {
        let table = WaveTable::new(LEN).unwrap();
        let len = LEN as f64;
        for k in [-1000.0, -3.0, 5.0, 1.0e6] {
            let a = table.lookup(100.0).unwrap();
            let b = table.lookup(100.0 + k * len).unwrap();
            assert!((a - b).abs() < 1e-9, "k = {k}: {a} vs {b}");
        }
    }

    #[test]
    fn quarter_offset_gives_cosine() {
        let table = WaveTable::new(LEN).unwrap();
        for &x in &[0.0, 13.3, 256.0, 700.7, 1500.0, 2047.9] {
            let expected = libm::cos(TAU * x / LEN as f64);
            let got = table.lookup_cos(x).unwrap();
            assert!((got - expected).abs() < 1e-5, "x = {x}: {got} vs {expected}");
        }
    }

    #[test]
    fn interpolation_is_linear_between_samples() {
        let table = WaveTable::new(8).unwrap();
        let a = table.samples()[1];
        let b = table.samples()[2];
        let mid = table.lookup(1.5).unwrap();
        assert!((mid - (a + b) * 0.5).abs() < 1e-15);
    }

    #[test]
    fn non_finite_positions_are_rejected() {
        let table = WaveTable::new(LEN).unwrap();
        assert!(matches!(table.lookup(f64::NAN), Err(EncodeError::NonFiniteLookup(_))));
        assert!(matches!(
            table.lookup_cos(f64::INFINITY),
            Err(EncodeError::NonFiniteLookup(_))
        ));
    }
}
