//! Preset file format and operations.

use serde::{Deserialize, Serialize};
use sfera_core::{DEFAULT_RAMP_LENGTH, Direction, SessionConfig, WaveTable};
use std::path::Path;

use crate::error::ConfigError;

/// A point on a source trajectory.
///
/// Angles are in degrees with the same ranges as the encoder's host
/// parameters: azimuth in `[-180, 180]`, elevation in `[-90, 90]`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Keyframe {
    /// Time in seconds from the start of the file.
    pub time: f64,
    /// Azimuth in degrees, counter-clockwise from the front.
    #[serde(default)]
    pub azimuth: f64,
    /// Elevation in degrees, positive upward.
    #[serde(default)]
    pub elevation: f64,
}

impl Keyframe {
    /// Create a keyframe.
    pub fn new(time: f64, azimuth: f64, elevation: f64) -> Self {
        Self {
            time,
            azimuth,
            elevation,
        }
    }

    /// The keyframe's direction.
    pub fn direction(&self) -> Direction {
        Direction::new(self.azimuth, self.elevation)
    }
}

/// Encoder preset: where the source sits, how the encoder is sized,
/// and optionally how the source moves over time.
///
/// # TOML Format
///
/// ```toml
/// name = "Orbit"
/// description = "One horizontal revolution every eight seconds"
/// sample_rate = 48000
/// azimuth = 0.0
/// elevation = 0.0
/// ramp_length = 256
///
/// [[trajectory]]
/// time = 0.0
/// azimuth = 0.0
///
/// [[trajectory]]
/// time = 4.0
/// azimuth = 180.0
/// ```
///
/// Every field except `name` is optional.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Preset {
    /// Name of the preset.
    pub name: String,

    /// Optional description of the preset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Sample rate hint (defaults to 48000).
    /// Used to convert trajectory times into frame offsets.
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,

    /// Start in bypass.
    #[serde(default)]
    pub bypass: bool,

    /// Static azimuth in degrees, used when there is no trajectory.
    #[serde(default)]
    pub azimuth: f64,

    /// Static elevation in degrees, used when there is no trajectory.
    #[serde(default)]
    pub elevation: f64,

    /// Wave table samples per cycle.
    #[serde(default = "default_table_length")]
    pub table_length: usize,

    /// Samples per direction ramp.
    #[serde(default = "default_ramp_length")]
    pub ramp_length: u32,

    /// Keyframes ordered by time. Empty for a static source.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub trajectory: Vec<Keyframe>,
}

fn default_sample_rate() -> u32 {
    48000
}

fn default_table_length() -> usize {
    WaveTable::DEFAULT_LENGTH
}

fn default_ramp_length() -> u32 {
    DEFAULT_RAMP_LENGTH
}

impl Preset {
    /// Create a preset for a static source straight ahead.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            sample_rate: default_sample_rate(),
            bypass: false,
            azimuth: 0.0,
            elevation: 0.0,
            table_length: default_table_length(),
            ramp_length: default_ramp_length(),
            trajectory: Vec::new(),
        }
    }

    /// Create a preset with a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the sample rate hint.
    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Set the static direction in degrees.
    pub fn with_direction(mut self, azimuth: f64, elevation: f64) -> Self {
        self.azimuth = azimuth;
        self.elevation = elevation;
        self
    }

    /// Set the initial bypass state.
    pub fn with_bypass(mut self, bypass: bool) -> Self {
        self.bypass = bypass;
        self
    }

    /// Set the encoder sizing.
    pub fn with_lengths(mut self, table_length: usize, ramp_length: u32) -> Self {
        self.table_length = table_length;
        self.ramp_length = ramp_length;
        self
    }

    /// Append a trajectory keyframe.
    pub fn with_keyframe(mut self, keyframe: Keyframe) -> Self {
        self.trajectory.push(keyframe);
        self
    }

    /// Load a preset from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Self::from_toml(&content)
    }

    /// Load a preset from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the preset to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Convert the preset to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Encoder sizing for a session built from this preset.
    pub fn session_config(&self) -> Result<SessionConfig, ConfigError> {
        Ok(SessionConfig::new(self.table_length, self.ramp_length)?)
    }

    /// Whether the source moves.
    pub fn has_trajectory(&self) -> bool {
        !self.trajectory.is_empty()
    }

    /// Time of the last keyframe, or zero for a static source.
    pub fn duration(&self) -> f64 {
        self.trajectory.last().map_or(0.0, |k| k.time)
    }

    /// Starting direction: the first keyframe, or the static direction.
    pub fn direction(&self) -> Direction {
        self.trajectory
            .first()
            .map_or(Direction::new(self.azimuth, self.elevation), Keyframe::direction)
    }

    /// Direction at `time` seconds.
    ///
    /// Holds the first keyframe before the trajectory starts and the last
    /// one after it ends. Between keyframes elevation is interpolated
    /// linearly and azimuth along the shorter arc, so a move from 170° to
    /// -170° passes through 180° rather than the front.
    pub fn direction_at(&self, time: f64) -> Direction {
        let frames = self.trajectory.as_slice();
        let (Some(first), Some(last)) = (frames.first(), frames.last()) else {
            return self.direction();
        };
        if time <= first.time {
            return first.direction();
        }
        if time >= last.time {
            return last.direction();
        }

        // First keyframe strictly after `time`; index >= 1 because time > first.time.
        let next = frames.partition_point(|k| k.time <= time);
        let (a, b) = (frames[next - 1], frames[next]);
        let span = b.time - a.time;
        let t = if span > 0.0 { (time - a.time) / span } else { 1.0 };

        let delta = shortest_arc(a.azimuth, b.azimuth);
        Direction::new(
            wrap_degrees(a.azimuth + delta * t),
            a.elevation + (b.elevation - a.elevation) * t,
        )
    }

    /// Direction at a frame offset, using [`Preset::sample_rate`].
    pub fn direction_at_frame(&self, frame: usize) -> Direction {
        self.direction_at(frame as f64 / f64::from(self.sample_rate.max(1)))
    }
}

/// Signed azimuth change from `from` to `to` in `[-180, 180)`.
fn shortest_arc(from: f64, to: f64) -> f64 {
    (to - from + 180.0).rem_euclid(360.0) - 180.0
}

/// Map degrees into `[-180, 180]`.
fn wrap_degrees(degrees: f64) -> f64 {
    if degrees > 180.0 {
        degrees - 360.0
    } else if degrees < -180.0 {
        degrees + 360.0
    } else {
        degrees
    }
}

impl Default for Preset {
    fn default() -> Self {
        Self::new("Untitled")
    }
}
