//! Cached trigonometry for the steering direction.
//!
//! [`DirectionState`] turns a pair of normalized angles into the sine and
//! cosine values the third-order harmonics need: `sin(hθ)`, `cos(hθ)`,
//! `sin(hφ)`, `cos(hφ)` for harmonic multiples `h = 1, 2, 3`. Angles are
//! given in *turns* (`1.0` = 360°), so azimuth `−180°..180°` maps to
//! `θ ∈ [−0.5, 0.5)` and elevation `−90°..90°` maps to `φ ∈ [−0.25, 0.25]`.
//!
//! All twelve values live in one flat array indexed by
//! ([`Axis`], [`Branch`], [`Harmonic`]). The [`Branch::Direct`] branch reads
//! the sine table at `h·x·L`; the [`Branch::QuarterOffset`] branch reads it
//! a quarter cycle later, which yields the cosine.
//!
//! # Update rules
//!
//! - [`init_coordinates`](DirectionState::init_coordinates) recomputes both axes.
//! - [`change_coordinates`](DirectionState::change_coordinates) recomputes an
//!   axis only if its value differs from the stored one. The comparison is
//!   exact: any representable difference, even one produced by rounding in
//!   an upstream ramp, triggers a full recompute of that axis.
//!
//! The table is passed to each update rather than stored, so the state never
//! owns or aliases it.

use crate::{EncodeError, WaveTable};

/// Angular axis of the steering direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Horizontal angle θ.
    Azimuth,
    /// Vertical angle φ.
    Elevation,
}

impl Axis {
    /// Both axes, in storage order.
    pub const ALL: [Axis; 2] = [Axis::Azimuth, Axis::Elevation];

    /// Lowercase name for diagnostics.
    pub const fn name(self) -> &'static str {
        match self {
            Axis::Azimuth => "azimuth",
            Axis::Elevation => "elevation",
        }
    }

    const fn slot(self) -> usize {
        match self {
            Axis::Azimuth => 0,
            Axis::Elevation => 1,
        }
    }
}

/// Which phase of the sine table a cached value was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Branch {
    /// Table read directly: the sine.
    Direct,
    /// Table read a quarter cycle ahead: the cosine.
    QuarterOffset,
}

impl Branch {
    /// Both branches, in storage order.
    pub const ALL: [Branch; 2] = [Branch::Direct, Branch::QuarterOffset];

    const fn slot(self) -> usize {
        match self {
            Branch::Direct => 0,
            Branch::QuarterOffset => 1,
        }
    }
}

/// Harmonic multiple applied to an angle before lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Harmonic {
    /// `1·angle`
    First,
    /// `2·angle`
    Second,
    /// `3·angle`
    Third,
}

impl Harmonic {
    /// All multiples, in storage order.
    pub const ALL: [Harmonic; 3] = [Harmonic::First, Harmonic::Second, Harmonic::Third];

    /// The integer multiple as a float.
    pub const fn multiple(self) -> f64 {
        match self {
            Harmonic::First => 1.0,
            Harmonic::Second => 2.0,
            Harmonic::Third => 3.0,
        }
    }

    const fn slot(self) -> usize {
        match self {
            Harmonic::First => 0,
            Harmonic::Second => 1,
            Harmonic::Third => 2,
        }
    }
}

/// Values cached per axis (2 branches × 3 harmonics).
pub const VALUES_PER_AXIS: usize = 6;

const fn offset(axis: Axis, branch: Branch, harmonic: Harmonic) -> usize {
    axis.slot() * VALUES_PER_AXIS + branch.slot() * 3 + harmonic.slot()
}

/// Interpolated sine/cosine values for the current direction.
///
/// Not safe for concurrent mutation; one instance belongs to one encoder.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionState {
    values: [f64; 2 * VALUES_PER_AXIS],
    theta: f64,
    phi: f64,
}

impl DirectionState {
    /// Create a state pointing at `θ = 0, φ = 0`.
    pub fn new(table: &WaveTable) -> Self {
        let mut state = Self {
            values: [0.0; 2 * VALUES_PER_AXIS],
            theta: 0.0,
            phi: 0.0,
        };
        state.fill(table, Axis::Azimuth, 0.0);
        state.fill(table, Axis::Elevation, 0.0);
        state
    }

    /// Recompute both axes unconditionally and record `theta`, `phi` as the baseline.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::NonFiniteDirection`] if either value is NaN or
    /// infinite, or so large that its table position overflows. The state is
    /// left unchanged in that case.
    pub fn init_coordinates(
        &mut self,
        table: &WaveTable,
        theta: f64,
        phi: f64,
    ) -> Result<(), EncodeError> {
        check_positions(table, theta, phi)?;
        self.fill(table, Axis::Azimuth, theta);
        self.fill(table, Axis::Elevation, phi);
        self.theta = theta;
        self.phi = phi;
        Ok(())
    }

    /// Recompute only the axes whose value changed since the last update.
    ///
    /// Call once per sample before querying channel weights.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::NonFiniteDirection`] if either value is NaN or
    /// infinite, or so large that its table position overflows. The state is
    /// left unchanged in that case.
    #[inline]
    pub fn change_coordinates(
        &mut self,
        table: &WaveTable,
        theta: f64,
        phi: f64,
    ) -> Result<(), EncodeError> {
        check_positions(table, theta, phi)?;
        if theta != self.theta {
            self.fill(table, Axis::Azimuth, theta);
        }
        if phi != self.phi {
            self.fill(table, Axis::Elevation, phi);
        }
        self.theta = theta;
        self.phi = phi;
        Ok(())
    }

    /// Last committed azimuth, in turns.
    #[inline]
    pub fn theta(&self) -> f64 {
        self.theta
    }

    /// Last committed elevation, in turns.
    #[inline]
    pub fn phi(&self) -> f64 {
        self.phi
    }

    /// One cached value.
    #[inline]
    pub fn value(&self, axis: Axis, branch: Branch, harmonic: Harmonic) -> f64 {
        self.values[offset(axis, branch, harmonic)]
    }

    /// `sin(h·angle)` for the given axis.
    #[inline]
    pub fn sin(&self, axis: Axis, harmonic: Harmonic) -> f64 {
        self.value(axis, Branch::Direct, harmonic)
    }

    /// `cos(h·angle)` for the given axis.
    #[inline]
    pub fn cos(&self, axis: Axis, harmonic: Harmonic) -> f64 {
        self.value(axis, Branch::QuarterOffset, harmonic)
    }

    /// Copy of one axis's 2×3 block, direct branch first.
    pub fn matrix(&self, axis: Axis) -> [f64; VALUES_PER_AXIS] {
        let start = axis.slot() * VALUES_PER_AXIS;
        let mut out = [0.0; VALUES_PER_AXIS];
        out.copy_from_slice(&self.values[start..start + VALUES_PER_AXIS]);
        out
    }

    fn fill(&mut self, table: &WaveTable, axis: Axis, turns: f64) {
        let plain = turns * table.len() as f64;
        let quarter = table.quarter();
        for branch in Branch::ALL {
            for harmonic in Harmonic::ALL {
                let position = match branch {
                    Branch::Direct => harmonic.multiple() * plain,
                    Branch::QuarterOffset => harmonic.multiple() * plain + quarter,
                };
                self.values[offset(axis, branch, harmonic)] =
                    table.interpolate(table.wrap(position));
            }
        }
    }
}

/// Reject angles whose table positions are not finite.
///
/// The third harmonic's cosine read is the position furthest from zero, so
/// if it is finite every position `fill` computes is finite. This catches
/// finite angles large enough to overflow once scaled by `3·L`.
fn check_positions(table: &WaveTable, theta: f64, phi: f64) -> Result<(), EncodeError> {
    for (axis, value) in [(Axis::Azimuth, theta), (Axis::Elevation, phi)] {
        let plain = value * table.len() as f64;
        let furthest = Harmonic::Third.multiple() * plain + table.quarter();
        if !furthest.is_finite() {
            return Err(EncodeError::NonFiniteDirection { axis, value });
        }
    }
    Ok(())
}
