//! One encoding session: encoder, smoothing ramps, bypass and host parameters.
//!
//! [`EncoderSession`] is what a host instantiates per track. It owns a
//! [`HarmonicEncoder`] and one [`ParameterRamp`] per axis; each input sample
//! advances both ramps once, updates the direction cache once, and produces
//! a 16-channel B-format frame.
//!
//! ```rust
//! use sfera_core::{Direction, EncoderSession};
//!
//! let mut session = EncoderSession::new();
//! session.set_direction(Direction::new(90.0, 0.0)).unwrap();
//!
//! let input = [0.5f32; 256];
//! let mut output = vec![0.0f32; input.len() * 16];
//! session.process_block(&input, &mut output).unwrap();
//!
//! // after the ramp, Y (index 2) carries the full signal
//! let last = &output[output.len() - 16..];
//! assert!((last[2] - 0.5).abs() < 1e-4);
//! ```

use core::num::{NonZeroU32, NonZeroUsize};

use crate::channel::CHANNEL_COUNT;
use crate::direction::Axis;
use crate::param_info::{ParamDescriptor, ParameterInfo};
use crate::state::EncoderState;
use crate::{EncodeError, HarmonicEncoder, ParameterRamp, WaveTable};

/// Ramp length used unless configured otherwise, in samples.
pub const DEFAULT_RAMP_LENGTH: u32 = 128;

const DEFAULT_TABLE: NonZeroUsize = NonZeroUsize::new(WaveTable::DEFAULT_LENGTH).unwrap();
const DEFAULT_RAMP: NonZeroU32 = NonZeroU32::new(DEFAULT_RAMP_LENGTH).unwrap();

/// A steering direction in degrees.
///
/// Azimuth is measured counter-clockwise from the front (positive = left),
/// elevation upward from the horizon.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Direction {
    /// Degrees, `-180..=180`.
    pub azimuth: f64,
    /// Degrees, `-90..=90`.
    pub elevation: f64,
}

impl Direction {
    /// Straight ahead on the horizon.
    pub const FRONT: Self = Self::new(0.0, 0.0);

    /// Direction from azimuth and elevation in degrees.
    pub const fn new(azimuth: f64, elevation: f64) -> Self {
        Self { azimuth, elevation }
    }

    /// Direction from angles in turns.
    pub fn from_turns(theta: f64, phi: f64) -> Self {
        Self::new(theta * 360.0, phi * 360.0)
    }

    /// `(theta, phi)` in turns.
    pub fn to_turns(self) -> (f64, f64) {
        (self.azimuth / 360.0, self.elevation / 360.0)
    }

    /// Same direction with both angles clamped to their host ranges.
    pub fn clamped(self) -> Self {
        Self::new(
            self.azimuth.clamp(-180.0, 180.0),
            self.elevation.clamp(-90.0, 90.0),
        )
    }

    fn check_finite(self) -> Result<Self, EncodeError> {
        if !self.azimuth.is_finite() {
            return Err(EncodeError::NonFiniteDirection {
                axis: Axis::Azimuth,
                value: self.azimuth,
            });
        }
        if !self.elevation.is_finite() {
            return Err(EncodeError::NonFiniteDirection {
                axis: Axis::Elevation,
                value: self.elevation,
            });
        }
        Ok(self)
    }
}

/// Host parameter addressed by [`EncoderSession::set_normalized`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKind {
    /// Bypass switch.
    Bypass,
    /// Azimuth.
    Azimuth,
    /// Elevation.
    Elevation,
}

impl ParamKind {
    /// All parameters in index order.
    pub const ALL: [ParamKind; 3] = [
        ParamKind::Bypass,
        ParamKind::Azimuth,
        ParamKind::Elevation,
    ];

    /// Parameter index used by [`ParameterInfo`].
    pub const fn index(self) -> usize {
        match self {
            ParamKind::Bypass => 0,
            ParamKind::Azimuth => 1,
            ParamKind::Elevation => 2,
        }
    }

    /// Descriptor for this parameter.
    pub const fn descriptor(self) -> ParamDescriptor {
        match self {
            ParamKind::Bypass => ParamDescriptor::bypass(),
            ParamKind::Azimuth => ParamDescriptor::azimuth(),
            ParamKind::Elevation => ParamDescriptor::elevation(),
        }
    }

    fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// Sizing for an [`EncoderSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Samples per sine cycle in the wave table.
    pub table_length: NonZeroUsize,
    /// Samples per direction ramp.
    pub ramp_length: NonZeroU32,
}

impl SessionConfig {
    /// Validate raw sizes.
    ///
    /// # Errors
    ///
    /// [`EncodeError::EmptyWaveTable`] or [`EncodeError::ZeroRampLength`]
    /// for a zero size.
    pub fn new(table_length: usize, ramp_length: u32) -> Result<Self, EncodeError> {
        Ok(Self {
            table_length: NonZeroUsize::new(table_length).ok_or(EncodeError::EmptyWaveTable)?,
            ramp_length: NonZeroU32::new(ramp_length).ok_or(EncodeError::ZeroRampLength)?,
        })
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            table_length: DEFAULT_TABLE,
            ramp_length: DEFAULT_RAMP,
        }
    }
}

/// Mono in, third-order B-format out, with smoothed direction changes.
///
/// Targets set between samples take effect through the ramps: each axis
/// reaches a new target after `ramp_length` samples. Not shareable across
/// threads while processing; the host serializes access.
#[derive(Debug, Clone)]
pub struct EncoderSession {
    encoder: HarmonicEncoder,
    theta_ramp: ParameterRamp,
    phi_ramp: ParameterRamp,
    /// Target azimuth, turns
    theta: f64,
    /// Target elevation, turns
    phi: f64,
    bypass: bool,
    config: SessionConfig,
}

impl EncoderSession {
    /// Session with the default table and ramp sizes, facing front.
    pub fn new() -> Self {
        Self::with_config(SessionConfig::default())
    }

    /// Session with explicit sizing, facing front.
    pub fn with_config(config: SessionConfig) -> Self {
        let encoder = HarmonicEncoder::with_table(WaveTable::with_length(config.table_length));

        #[cfg(feature = "tracing")]
        tracing::debug!(
            table_length = config.table_length.get(),
            ramp_length = config.ramp_length.get(),
            "encoder session created"
        );

        Self {
            encoder,
            theta_ramp: ParameterRamp::with_block_size(config.ramp_length),
            phi_ramp: ParameterRamp::with_block_size(config.ramp_length),
            theta: 0.0,
            phi: 0.0,
            bypass: false,
            config,
        }
    }

    /// Sizing this session was built with.
    pub fn config(&self) -> SessionConfig {
        self.config
    }

    /// Set the azimuth target in degrees, clamped to `-180..=180`.
    pub fn set_azimuth_degrees(&mut self, degrees: f64) -> Result<(), EncodeError> {
        let dir = Direction::new(degrees, 0.0).check_finite()?.clamped();
        self.theta = dir.azimuth / 360.0;
        Ok(())
    }

    /// Set the elevation target in degrees, clamped to `-90..=90`.
    pub fn set_elevation_degrees(&mut self, degrees: f64) -> Result<(), EncodeError> {
        let dir = Direction::new(0.0, degrees).check_finite()?.clamped();
        self.phi = dir.elevation / 360.0;
        Ok(())
    }

    /// Set both targets. Angles are clamped to their host ranges.
    pub fn set_direction(&mut self, direction: Direction) -> Result<(), EncodeError> {
        let (theta, phi) = direction.check_finite()?.clamped().to_turns();
        self.theta = theta;
        self.phi = phi;
        Ok(())
    }

    /// Set both targets in turns, unclamped.
    pub fn set_turns(&mut self, theta: f64, phi: f64) -> Result<(), EncodeError> {
        Direction::from_turns(theta, phi).check_finite()?;
        self.theta = theta;
        self.phi = phi;
        Ok(())
    }

    /// Apply a host value in `[0.0, 1.0]`.
    ///
    /// Azimuth maps to `theta = value − 0.5`, elevation to
    /// `phi = value·0.5 − 0.25`, bypass to `value > 0.5`.
    pub fn set_normalized(&mut self, kind: ParamKind, value: f32) -> Result<(), EncodeError> {
        let value = f64::from(value);
        match kind {
            ParamKind::Bypass => self.bypass = value > 0.5,
            ParamKind::Azimuth => {
                let theta = value.clamp(0.0, 1.0) - 0.5;
                self.set_turns(theta, self.phi)?;
            }
            ParamKind::Elevation => {
                let phi = value.clamp(0.0, 1.0) * 0.5 - 0.25;
                self.set_turns(self.theta, phi)?;
            }
        }
        Ok(())
    }

    /// Host value in `[0.0, 1.0]` for a parameter.
    pub fn normalized(&self, kind: ParamKind) -> f32 {
        match kind {
            ParamKind::Bypass => f32::from(u8::from(self.bypass)),
            ParamKind::Azimuth => (self.theta + 0.5) as f32,
            ParamKind::Elevation => ((self.phi + 0.25) * 2.0) as f32,
        }
    }

    /// Enable or disable bypass.
    pub fn set_bypass(&mut self, bypass: bool) {
        self.bypass = bypass;
    }

    /// Whether bypass is on.
    pub fn is_bypassed(&self) -> bool {
        self.bypass
    }

    /// Target direction in degrees.
    pub fn direction(&self) -> Direction {
        Direction::from_turns(self.theta, self.phi)
    }

    /// Smoothed direction of the last processed sample, in degrees.
    pub fn current_direction(&self) -> Direction {
        Direction::from_turns(self.theta_ramp.value(), self.phi_ramp.value())
    }

    /// Whether either axis is still moving toward its target.
    pub fn is_ramping(&self) -> bool {
        self.theta_ramp.is_ramping() || self.phi_ramp.is_ramping()
    }

    /// The underlying encoder.
    pub fn encoder(&self) -> &HarmonicEncoder {
        &self.encoder
    }

    /// Encode one input sample into a B-format frame.
    ///
    /// In bypass, W carries the raw input and the other channels are silent;
    /// the ramps keep tracking so leaving bypass does not jump. Bypassed W is
    /// not scaled by the W weight (1/√2), unlike a plugin processor that
    /// keeps feeding channel 0 through the encoder while bypassed.
    #[inline]
    pub fn process_frame(&mut self, input: f32) -> Result<[f32; CHANNEL_COUNT], EncodeError> {
        let theta = self.theta_ramp.process(self.theta);
        let phi = self.phi_ramp.process(self.phi);
        self.encoder.change_coordinates(theta, phi)?;

        let mut out = [0.0f32; CHANNEL_COUNT];
        if self.bypass {
            out[0] = input;
            return Ok(out);
        }

        let mut frame = [0.0f64; CHANNEL_COUNT];
        self.encoder.encode_frame(f64::from(input), &mut frame);
        for (o, &v) in out.iter_mut().zip(frame.iter()) {
            *o = v as f32;
        }
        Ok(out)
    }

    /// Encode a block of mono samples into interleaved 16-channel frames.
    ///
    /// # Errors
    ///
    /// [`EncodeError::BufferLength`] unless `output.len()` equals
    /// `input.len() * 16`; nothing is processed in that case.
    pub fn process_block(&mut self, input: &[f32], output: &mut [f32]) -> Result<(), EncodeError> {
        let expected = input.len() * CHANNEL_COUNT;
        if output.len() != expected {
            return Err(EncodeError::BufferLength {
                expected,
                actual: output.len(),
            });
        }
        for (&x, frame) in input.iter().zip(output.chunks_exact_mut(CHANNEL_COUNT)) {
            frame.copy_from_slice(&self.process_frame(x)?);
        }
        Ok(())
    }

    /// Snap ramps and direction cache to the current targets.
    pub fn reset(&mut self) -> Result<(), EncodeError> {
        self.encoder.init_coordinates(self.theta, self.phi)?;
        self.theta_ramp.reset(self.theta);
        self.phi_ramp.reset(self.phi);
        Ok(())
    }

    /// Snapshot for host persistence.
    pub fn state(&self) -> EncoderState {
        EncoderState {
            bypass: self.bypass,
            theta: self.theta as f32,
            phi: self.phi as f32,
        }
    }

    /// Restore a snapshot. The direction is applied immediately, without a ramp.
    pub fn apply_state(&mut self, state: &EncoderState) -> Result<(), EncodeError> {
        self.set_turns(f64::from(state.theta), f64::from(state.phi))?;
        self.bypass = state.bypass;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            bypass = state.bypass,
            theta = state.theta,
            phi = state.phi,
            "encoder state applied"
        );

        self.reset()
    }
}

impl Default for EncoderSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ParameterInfo for EncoderSession {
    fn param_count(&self) -> usize {
        ParamKind::ALL.len()
    }

    fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
        ParamKind::from_index(index).map(ParamKind::descriptor)
    }

    fn get_param(&self, index: usize) -> f32 {
        match ParamKind::from_index(index) {
            Some(ParamKind::Bypass) => f32::from(u8::from(self.bypass)),
            Some(ParamKind::Azimuth) => (self.theta * 360.0) as f32,
            Some(ParamKind::Elevation) => (self.phi * 360.0) as f32,
            None => 0.0,
        }
    }

    fn set_param(&mut self, index: usize, value: f32) {
        let Some(kind) = ParamKind::from_index(index) else {
            return;
        };
        let value = kind.descriptor().clamp(value);
        // non-finite values leave the target unchanged
        let _ = match kind {
            ParamKind::Bypass => {
                self.bypass = value > 0.5;
                Ok(())
            }
            ParamKind::Azimuth => self.set_azimuth_degrees(f64::from(value)),
            ParamKind::Elevation => self.set_elevation_degrees(f64::from(value)),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Channel;

    const RAMP: u32 = 8;

    fn session() -> EncoderSession {
        EncoderSession::with_config(SessionConfig::new(2048, RAMP).unwrap())
    }

    fn run(session: &mut EncoderSession, n: usize, input: f32) -> [f32; CHANNEL_COUNT] {
        let mut last = [0.0; CHANNEL_COUNT];
        for _ in 0..n {
            last = session.process_frame(input).unwrap();
        }
        last
    }

    #[test]
    fn defaults() {
        let s = EncoderSession::new();
        assert_eq!(s.config().table_length.get(), 2048);
        assert_eq!(s.config().ramp_length.get(), 128);
        assert!(!s.is_bypassed());
        assert_eq!(s.direction(), Direction::FRONT);
    }

    #[test]
    fn zero_sizes_are_rejected() {
        assert_eq!(SessionConfig::new(0, 4), Err(EncodeError::EmptyWaveTable));
        assert_eq!(SessionConfig::new(64, 0), Err(EncodeError::ZeroRampLength));
    }

    #[test]
    fn front_frame_at_rest() {
        let mut s = session();
        let frame = s.process_frame(1.0).unwrap();
        assert_eq!(frame[Channel::W.index()], core::f64::consts::FRAC_1_SQRT_2 as f32);
        assert_eq!(frame[Channel::X.index()], 1.0);
        assert_eq!(frame[Channel::Y.index()], 0.0);
    }

    #[test]
    fn direction_change_takes_ramp_length_samples() {
        let mut s = session();
        s.set_azimuth_degrees(90.0).unwrap();

        run(&mut s, RAMP as usize - 1, 1.0);
        assert!(s.is_ramping());
        let halfway = s.current_direction().azimuth;
        assert!(halfway > 0.0 && halfway < 90.0, "got {halfway}");

        let frame = run(&mut s, 1, 1.0);
        assert!(!s.is_ramping());
        assert_eq!(s.current_direction().azimuth, 90.0);
        assert!((frame[Channel::Y.index()] - 1.0).abs() < 1e-5);
        assert!(frame[Channel::X.index()].abs() < 1e-5);
    }

    #[test]
    fn bypass_routes_input_to_w_only() {
        let mut s = session();
        s.set_direction(Direction::new(30.0, 20.0)).unwrap();
        s.set_bypass(true);
        let frame = s.process_frame(0.75).unwrap();
        assert_eq!(frame[0], 0.75);
        assert!(frame[1..].iter().all(|&v| v == 0.0));
    }

    #[test]
    fn bypass_w_is_not_scaled_by_w_weight() {
        let mut s = session();
        let encoded = s.process_frame(0.5).unwrap();
        assert!((encoded[0] - 0.5 * core::f32::consts::FRAC_1_SQRT_2).abs() < 1e-6);

        s.set_bypass(true);
        let bypassed = s.process_frame(0.5).unwrap();
        assert_eq!(bypassed[0], 0.5);
        assert_ne!(bypassed[0], encoded[0]);
    }

    #[test]
    fn ramps_advance_during_bypass() {
        let mut s = session();
        s.set_bypass(true);
        s.set_elevation_degrees(45.0).unwrap();
        run(&mut s, RAMP as usize, 0.0);
        assert!(!s.is_ramping());

        s.set_bypass(false);
        let frame = s.process_frame(1.0).unwrap();
        let el = 45f64.to_radians();
        assert!((f64::from(frame[Channel::Z.index()]) - el.sin()).abs() < 1e-5);
    }

    #[test]
    fn setters_clamp_and_reject_non_finite() {
        let mut s = session();
        s.set_azimuth_degrees(400.0).unwrap();
        s.set_elevation_degrees(-100.0).unwrap();
        assert_eq!(s.direction(), Direction::new(180.0, -90.0));

        assert!(matches!(
            s.set_azimuth_degrees(f64::NAN),
            Err(EncodeError::NonFiniteDirection {
                axis: Axis::Azimuth,
                ..
            })
        ));
        assert_eq!(s.direction().azimuth, 180.0);
    }

    #[test]
    fn normalized_mapping() {
        let mut s = session();
        s.set_normalized(ParamKind::Azimuth, 0.75).unwrap();
        s.set_normalized(ParamKind::Elevation, 1.0).unwrap();
        assert_eq!(s.direction(), Direction::new(90.0, 90.0));
        assert_eq!(s.normalized(ParamKind::Azimuth), 0.75);
        assert_eq!(s.normalized(ParamKind::Elevation), 1.0);

        s.set_normalized(ParamKind::Bypass, 1.0).unwrap();
        assert!(s.is_bypassed());
        s.set_normalized(ParamKind::Bypass, 0.2).unwrap();
        assert!(!s.is_bypassed());
    }

    #[test]
    fn process_block_interleaves() {
        let mut a = session();
        let mut b = session();
        a.set_direction(Direction::new(-60.0, 10.0)).unwrap();
        b.set_direction(Direction::new(-60.0, 10.0)).unwrap();

        let input: Vec<f32> = (0..32).map(|i| (i as f32 * 0.1).sin()).collect();
        let mut output = vec![0.0; input.len() * CHANNEL_COUNT];
        a.process_block(&input, &mut output).unwrap();

        for (i, &x) in input.iter().enumerate() {
            let frame = b.process_frame(x).unwrap();
            assert_eq!(&output[i * CHANNEL_COUNT..(i + 1) * CHANNEL_COUNT], &frame);
        }
    }

    #[test]
    fn process_block_rejects_mismatched_output() {
        let mut s = session();
        s.set_azimuth_degrees(90.0).unwrap();
        let input = [1.0f32; 4];

        let mut short = vec![0.0; input.len() * CHANNEL_COUNT - 1];
        assert_eq!(
            s.process_block(&input, &mut short),
            Err(EncodeError::BufferLength {
                expected: 64,
                actual: 63
            })
        );
        let mut long = vec![0.0; input.len() * CHANNEL_COUNT + CHANNEL_COUNT];
        assert!(matches!(
            s.process_block(&input, &mut long),
            Err(EncodeError::BufferLength { actual: 80, .. })
        ));

        // rejected blocks leave the ramps untouched
        assert!(!s.is_ramping());
        assert_eq!(s.current_direction(), Direction::FRONT);
        assert!(short.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn state_round_trip_applies_immediately() {
        let mut s = session();
        s.set_direction(Direction::new(45.0, -30.0)).unwrap();
        s.set_bypass(true);
        let bytes = s.state().to_bytes();

        let mut restored = session();
        let state = EncoderState::from_bytes(&bytes).unwrap();
        restored.apply_state(&state).unwrap();
        assert!(restored.is_bypassed());
        assert!(!restored.is_ramping());
        assert!((restored.current_direction().azimuth - 45.0).abs() < 1e-4);
        assert!((restored.current_direction().elevation + 30.0).abs() < 1e-4);
    }

    #[test]
    fn parameter_info_surface() {
        let mut s = session();
        assert_eq!(s.param_count(), 3);
        assert_eq!(s.find_param_by_name("azimuth"), Some(1));

        s.set_param(1, -45.0);
        s.set_param(2, 200.0);
        assert_eq!(s.get_param(1), -45.0);
        assert_eq!(s.get_param(2), 90.0);

        s.set_param(1, f32::NAN);
        assert_eq!(s.get_param(1), -45.0);
        assert!(s.param_info(3).is_none());
    }
}
