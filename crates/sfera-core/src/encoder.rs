//! Third-order spherical-harmonic encoder (FuMa ordering, MaxN normalization).
//!
//! [`HarmonicEncoder`] owns the sine [`WaveTable`] and the [`DirectionState`]
//! cache derived from it. Each channel weight is a closed-form product of
//! cached sines and cosines, looked up through a 16-entry function table
//! indexed by [`Channel`].
//!
//! With `a = azimuth`, `e = elevation`:
//!
//! | ch | weight |
//! |----|--------|
//! | W | `1/√2` |
//! | X | `cos a · cos e` |
//! | Y | `sin a · cos e` |
//! | Z | `sin e` |
//! | R | `(3 sin²e − 1) / 2` |
//! | S | `cos a · sin 2e` |
//! | T | `sin a · sin 2e` |
//! | U | `cos 2a · cos²e` |
//! | V | `sin 2a · cos²e` |
//! | K | `sin e · (5 sin²e − 3) / 2` |
//! | L | `cos a · (5 sin²e − 1) · cos e · c_L` |
//! | M | `sin a · (5 sin²e − 1) · cos e · c_M` |
//! | N | `cos 2a · sin e · cos²e · c_N` |
//! | O | `sin 2a · sin e · cos²e · c_O` |
//! | P | `cos 3a · cos³e` |
//! | Q | `sin 3a · cos³e` |
//!
//! # Example
//!
//! ```rust
//! use sfera_core::{Channel, HarmonicEncoder};
//!
//! let mut encoder = HarmonicEncoder::new(2048).unwrap();
//! // 90° to the left, on the horizon
//! encoder.init_coordinates(0.25, 0.0).unwrap();
//!
//! assert!((encoder.weight(Channel::Y) - 1.0).abs() < 1e-9);
//! assert!(encoder.weight(Channel::X).abs() < 1e-9);
//! ```

use core::f64::consts::FRAC_1_SQRT_2;

use crate::channel::{CHANNEL_COUNT, Channel};
use crate::direction::Axis::{Azimuth as A, Elevation as E};
use crate::direction::DirectionState;
use crate::direction::Harmonic::{First as H1, Second as H2, Third as H3};
use crate::{EncodeError, WaveTable};

/// MaxN scaling factors for the channels that need one.
///
/// `l == m` and `n == o` hold by construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizationConstants {
    /// Channel W.
    pub w: f64,
    /// Channel L.
    pub l: f64,
    /// Channel M.
    pub m: f64,
    /// Channel N.
    pub n: f64,
    /// Channel O.
    pub o: f64,
}

impl NormalizationConstants {
    /// FuMa/MaxN values.
    pub fn maxn() -> Self {
        let lm = libm::sqrt(945.0 / 1792.0);
        let no = libm::sqrt(105.0 / 35.0) * 1.5;
        Self {
            w: FRAC_1_SQRT_2,
            l: lm,
            m: lm,
            n: no,
            o: no,
        }
    }
}

impl Default for NormalizationConstants {
    fn default() -> Self {
        Self::maxn()
    }
}

type WeightFn = fn(&DirectionState, &NormalizationConstants) -> f64;

#[inline]
fn sin_e(d: &DirectionState) -> f64 {
    d.sin(E, H1)
}

#[inline]
fn cos_e(d: &DirectionState) -> f64 {
    d.cos(E, H1)
}

/// Closed-form weights in [`Channel::ALL`] order.
const WEIGHTS: [WeightFn; CHANNEL_COUNT] = [
    // W
    |_, k| k.w,
    // X
    |d, _| d.cos(A, H1) * cos_e(d),
    // Y
    |d, _| d.sin(A, H1) * cos_e(d),
    // Z
    |d, _| sin_e(d),
    // R
    |d, _| (3.0 * sin_e(d) * sin_e(d) - 1.0) * 0.5,
    // S
    |d, _| d.cos(A, H1) * d.sin(E, H2),
    // T
    |d, _| d.sin(A, H1) * d.sin(E, H2),
    // U
    |d, _| d.cos(A, H2) * cos_e(d) * cos_e(d),
    // V
    |d, _| d.sin(A, H2) * cos_e(d) * cos_e(d),
    // K
    |d, _| sin_e(d) * (5.0 * sin_e(d) * sin_e(d) - 3.0) * 0.5,
    // L
    |d, k| d.cos(A, H1) * (5.0 * sin_e(d) * sin_e(d) - 1.0) * cos_e(d) * k.l,
    // M
    |d, k| d.sin(A, H1) * (5.0 * sin_e(d) * sin_e(d) - 1.0) * cos_e(d) * k.m,
    // N
    |d, k| d.cos(A, H2) * sin_e(d) * cos_e(d) * cos_e(d) * k.n,
    // O
    |d, k| d.sin(A, H2) * sin_e(d) * cos_e(d) * cos_e(d) * k.o,
    // P
    |d, _| d.cos(A, H3) * cos_e(d) * cos_e(d) * cos_e(d),
    // Q
    |d, _| d.sin(A, H3) * cos_e(d) * cos_e(d) * cos_e(d),
];

/// Mono-to-B-format encoder for a single steering direction.
///
/// Call [`change_coordinates`](Self::change_coordinates) once per sample,
/// then query as many channel weights as needed. Lookups never allocate.
#[derive(Debug, Clone)]
pub struct HarmonicEncoder {
    table: WaveTable,
    direction: DirectionState,
    constants: NormalizationConstants,
}

impl HarmonicEncoder {
    /// Build an encoder with a `table_length`-sample sine table, pointing at `(0, 0)`.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::EmptyWaveTable`] when `table_length == 0`.
    pub fn new(table_length: usize) -> Result<Self, EncodeError> {
        WaveTable::new(table_length).map(Self::with_table)
    }

    /// Build an encoder around an existing table, pointing at `(0, 0)`.
    pub fn with_table(table: WaveTable) -> Self {
        let direction = DirectionState::new(&table);
        Self {
            table,
            direction,
            constants: NormalizationConstants::maxn(),
        }
    }

    /// Recompute the whole direction cache for `(theta, phi)` in turns.
    pub fn init_coordinates(&mut self, theta: f64, phi: f64) -> Result<(), EncodeError> {
        self.direction.init_coordinates(&self.table, theta, phi)
    }

    /// Recompute only the axes that changed since the previous call.
    #[inline]
    pub fn change_coordinates(&mut self, theta: f64, phi: f64) -> Result<(), EncodeError> {
        self.direction.change_coordinates(&self.table, theta, phi)
    }

    /// Weight of one channel at the current direction.
    #[inline]
    pub fn weight(&self, channel: Channel) -> f64 {
        WEIGHTS[channel.index()](&self.direction, &self.constants)
    }

    /// `sample` scaled by the weight of the channel at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::ChannelOutOfRange`] when `index >= 16`.
    #[inline]
    pub fn compute_channel(&self, sample: f64, index: usize) -> Result<f64, EncodeError> {
        let channel = Channel::try_from(index)?;
        Ok(sample * self.weight(channel))
    }

    /// All 16 weights in FuMa order.
    pub fn weights(&self) -> [f64; CHANNEL_COUNT] {
        let mut out = [0.0; CHANNEL_COUNT];
        for (slot, f) in out.iter_mut().zip(WEIGHTS.iter()) {
            *slot = f(&self.direction, &self.constants);
        }
        out
    }

    /// Write `sample` encoded into all 16 channels.
    #[inline]
    pub fn encode_frame(&self, sample: f64, frame: &mut [f64; CHANNEL_COUNT]) {
        for (slot, f) in frame.iter_mut().zip(WEIGHTS.iter()) {
            *slot = sample * f(&self.direction, &self.constants);
        }
    }

    /// Cached direction values.
    pub fn direction(&self) -> &DirectionState {
        &self.direction
    }

    /// The sine table the cache is read from.
    pub fn table(&self) -> &WaveTable {
        &self.table
    }

    /// Normalization constants in use.
    pub fn constants(&self) -> &NormalizationConstants {
        &self.constants
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-5;

    fn encoder_at(theta: f64, phi: f64) -> HarmonicEncoder {
        let mut enc = HarmonicEncoder::new(WaveTable::DEFAULT_LENGTH).unwrap();
        enc.init_coordinates(theta, phi).unwrap();
        enc
    }

    /// Reference weights from libm trig, angles in turns.
    fn reference(theta: f64, phi: f64) -> [f64; CHANNEL_COUNT] {
        let k = NormalizationConstants::maxn();
        let a = core::f64::consts::TAU * theta;
        let e = core::f64::consts::TAU * phi;
        let (sa, ca) = (libm::sin(a), libm::cos(a));
        let (se, ce) = (libm::sin(e), libm::cos(e));
        [
            k.w,
            ca * ce,
            sa * ce,
            se,
            (3.0 * se * se - 1.0) * 0.5,
            ca * libm::sin(2.0 * e),
            sa * libm::sin(2.0 * e),
            libm::cos(2.0 * a) * ce * ce,
            libm::sin(2.0 * a) * ce * ce,
            se * (5.0 * se * se - 3.0) * 0.5,
            ca * (5.0 * se * se - 1.0) * ce * k.l,
            sa * (5.0 * se * se - 1.0) * ce * k.m,
            libm::cos(2.0 * a) * se * ce * ce * k.n,
            libm::sin(2.0 * a) * se * ce * ce * k.o,
            libm::cos(3.0 * a) * ce * ce * ce,
            libm::sin(3.0 * a) * ce * ce * ce,
        ]
    }

    #[test]
    fn constants_are_symmetric() {
        let k = NormalizationConstants::maxn();
        assert_eq!(k.l, k.m);
        assert_eq!(k.n, k.o);
        assert!((k.n - 1.5 * libm::sqrt(3.0)).abs() < 1e-12);
        assert!((k.w * k.w - 0.5).abs() < 1e-15);
    }

    #[test]
    fn w_is_direction_independent() {
        for &(theta, phi) in &[(0.0, 0.0), (0.3, -0.2), (-0.5, 0.25), (0.99, 0.7)] {
            let enc = encoder_at(theta, phi);
            for &s in &[1.0, -0.37, 1e-9, 123.5] {
                let w = enc.compute_channel(s, 0).unwrap();
                assert_eq!(w, s * FRAC_1_SQRT_2);
                assert!((w - s / core::f64::consts::SQRT_2).abs() <= f64::EPSILON * s.abs());
            }
        }
    }

    #[test]
    fn front_reference_direction() {
        let enc = encoder_at(0.0, 0.0);
        let w = enc.weights();
        assert_eq!(w[Channel::X.index()], 1.0);
        assert_eq!(w[Channel::Y.index()], 0.0);
        // Z reads P[0][0], the table's zero-offset sample
        assert_eq!(w[Channel::Z.index()], enc.table().samples()[0]);
        assert_eq!(w[Channel::R.index()], -0.5);
        assert_eq!(w[Channel::U.index()], 1.0);
        assert_eq!(w[Channel::P.index()], 1.0);
        assert_eq!(w[Channel::K.index()], 0.0);
    }

    #[test]
    fn zenith_direction() {
        let enc = encoder_at(0.0, 0.25);
        assert!((enc.weight(Channel::Z) - 1.0).abs() < TOL);
        assert!((enc.weight(Channel::R) - 1.0).abs() < TOL);
        assert!((enc.weight(Channel::K) - 1.0).abs() < TOL);
        assert!(enc.weight(Channel::X).abs() < TOL);
        assert!(enc.weight(Channel::P).abs() < TOL);
    }

    #[test]
    fn weights_match_reference_trig() {
        for &(theta, phi) in &[(0.1, 0.05), (-0.3, -0.2), (0.45, 0.12), (-0.07, 0.249)] {
            let enc = encoder_at(theta, phi);
            let got = enc.weights();
            let want = reference(theta, phi);
            for ch in Channel::ALL {
                let i = ch.index();
                assert!(
                    (got[i] - want[i]).abs() < 1e-4,
                    "{ch} at ({theta}, {phi}): {} vs {}",
                    got[i],
                    want[i]
                );
            }
        }
    }

    #[test]
    fn encode_frame_matches_compute_channel() {
        let enc = encoder_at(0.17, -0.08);
        let mut frame = [0.0; CHANNEL_COUNT];
        enc.encode_frame(0.6, &mut frame);
        for i in 0..CHANNEL_COUNT {
            assert_eq!(frame[i], enc.compute_channel(0.6, i).unwrap());
        }
    }

    #[test]
    fn out_of_range_channel_is_an_error() {
        let enc = encoder_at(0.0, 0.0);
        assert_eq!(
            enc.compute_channel(1.0, 16),
            Err(EncodeError::ChannelOutOfRange(16))
        );
    }

    #[test]
    fn change_coordinates_tracks_init() {
        let mut moving = encoder_at(0.0, 0.0);
        moving.change_coordinates(0.2, 0.0).unwrap();
        moving.change_coordinates(0.2, 0.1).unwrap();
        let fresh = encoder_at(0.2, 0.1);
        assert_eq!(moving.weights(), fresh.weights());
    }
}
