//! Parameter introspection for host integration.
//!
//! The encoder exposes three host parameters: bypass, azimuth and
//! elevation. [`ParameterInfo`] lets a host, GUI or CLI enumerate them,
//! read and write plain values, and convert to and from the normalized
//! `[0.0, 1.0]` range hosts automate in.
//!
//! # Example
//!
//! ```rust
//! use sfera_core::{EncoderSession, ParameterInfo, ParamUnit};
//!
//! let session = EncoderSession::new();
//! for i in 0..session.param_count() {
//!     let desc = session.param_info(i).unwrap();
//!     println!("{}: {}{}", desc.name, session.get_param(i), desc.unit.suffix());
//! }
//! assert_eq!(session.param_info(1).unwrap().unit, ParamUnit::Degrees);
//! ```

/// Stable parameter identifier that survives reordering.
///
/// Once assigned, a `ParamId` must never change for a given parameter;
/// persisted automation refers to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParamId(pub u32);

/// Parameter capability flags for host communication.
///
/// ```rust
/// use sfera_core::ParamFlags;
///
/// let flags = ParamFlags::AUTOMATABLE.union(ParamFlags::STEPPED);
/// assert!(flags.contains(ParamFlags::STEPPED));
/// assert!(!flags.contains(ParamFlags::READ_ONLY));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamFlags(u8);

impl ParamFlags {
    /// No flags set.
    pub const NONE: Self = Self(0);
    /// Host can automate this parameter.
    pub const AUTOMATABLE: Self = Self(1 << 0);
    /// Parameter has discrete steps.
    pub const STEPPED: Self = Self(1 << 1);
    /// Parameter is the plugin's bypass switch.
    pub const BYPASS: Self = Self(1 << 2);
    /// Parameter is read-only.
    pub const READ_ONLY: Self = Self(1 << 3);

    /// Returns `true` if all bits in `other` are set in `self`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns the union of two flag sets.
    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl Default for ParamFlags {
    fn default() -> Self {
        Self::AUTOMATABLE
    }
}

/// Trait for processors that expose introspectable parameters.
///
/// Parameters are addressed by a zero-based index that stays stable for the
/// lifetime of the instance.
pub trait ParameterInfo {
    /// Number of parameters; valid indices are `0..param_count()`.
    fn param_count(&self) -> usize;

    /// Descriptor for the parameter at `index`, or `None` if out of range.
    fn param_info(&self, index: usize) -> Option<ParamDescriptor>;

    /// Current plain value of the parameter at `index`.
    ///
    /// Returns `0.0` for out-of-range indices.
    fn get_param(&self, index: usize) -> f32;

    /// Set the plain value of the parameter at `index`.
    ///
    /// Implementations clamp to the descriptor range and ignore
    /// out-of-range indices.
    fn set_param(&mut self, index: usize, value: f32);

    /// Find a parameter index by name or short name (case-insensitive).
    fn find_param_by_name(&self, name: &str) -> Option<usize> {
        for i in 0..self.param_count() {
            if let Some(desc) = self.param_info(i)
                && (desc.name.eq_ignore_ascii_case(name)
                    || desc.short_name.eq_ignore_ascii_case(name)
                    || desc.string_id.eq_ignore_ascii_case(name))
            {
                return Some(i);
            }
        }
        None
    }

    /// Stable [`ParamId`] of the parameter at `index`.
    fn param_id(&self, index: usize) -> Option<ParamId> {
        self.param_info(index).map(|d| d.id)
    }

    /// Index of the parameter with the given [`ParamId`].
    ///
    /// Linear scan; for setup paths, not audio.
    fn param_index_by_id(&self, id: ParamId) -> Option<usize> {
        (0..self.param_count()).find(|&i| self.param_info(i).is_some_and(|d| d.id == id))
    }
}

/// Metadata for one parameter: display names, unit, range and host identity.
///
/// Normalization is linear: `normalized = (value - min) / (max - min)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    /// Full name for display.
    pub name: &'static str,
    /// Short name for narrow displays, 8 characters or less.
    pub short_name: &'static str,
    /// Display unit.
    pub unit: ParamUnit,
    /// Minimum plain value.
    pub min: f32,
    /// Maximum plain value.
    pub max: f32,
    /// Value after construction or reset.
    pub default: f32,
    /// Recommended increment for encoder-style controls.
    pub step: f32,
    /// Stable numeric ID.
    pub id: ParamId,
    /// Stable string ID for presets and debugging.
    pub string_id: &'static str,
    /// Host capability flags.
    pub flags: ParamFlags,
}

impl ParamDescriptor {
    /// Bypass switch: `0` processes, `1` passes the input to W only.
    pub const fn bypass() -> Self {
        Self {
            name: "Bypass",
            short_name: "Bypass",
            unit: ParamUnit::None,
            min: 0.0,
            max: 1.0,
            default: 0.0,
            step: 1.0,
            id: ParamId(0),
            string_id: "bypass",
            flags: ParamFlags::AUTOMATABLE
                .union(ParamFlags::STEPPED)
                .union(ParamFlags::BYPASS),
        }
    }

    /// Azimuth in degrees, `-180..180`, positive to the left.
    pub const fn azimuth() -> Self {
        Self {
            name: "Azimuth",
            short_name: "Azim",
            unit: ParamUnit::Degrees,
            min: -180.0,
            max: 180.0,
            default: 0.0,
            step: 1.0,
            id: ParamId(1),
            string_id: "azimuth",
            flags: ParamFlags::AUTOMATABLE,
        }
    }

    /// Elevation in degrees, `-90..90`, positive upward.
    pub const fn elevation() -> Self {
        Self {
            name: "Elevation",
            short_name: "Elev",
            unit: ParamUnit::Degrees,
            min: -90.0,
            max: 90.0,
            default: 0.0,
            step: 1.0,
            id: ParamId(2),
            string_id: "elevation",
            flags: ParamFlags::AUTOMATABLE,
        }
    }

    /// Sets the stable parameter ID and string ID.
    pub const fn with_id(mut self, id: ParamId, string_id: &'static str) -> Self {
        self.id = id;
        self.string_id = string_id;
        self
    }

    /// Sets the parameter flags.
    pub const fn with_flags(mut self, flags: ParamFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Clamps a value to this parameter's range.
    ///
    /// ```rust
    /// use sfera_core::ParamDescriptor;
    ///
    /// let az = ParamDescriptor::azimuth();
    /// assert_eq!(az.clamp(200.0), 180.0);
    /// assert_eq!(az.clamp(-45.0), -45.0);
    /// ```
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }

    /// Plain value to `[0.0, 1.0]`.
    ///
    /// ```rust
    /// use sfera_core::ParamDescriptor;
    ///
    /// let el = ParamDescriptor::elevation();
    /// assert_eq!(el.normalize(-90.0), 0.0);
    /// assert_eq!(el.normalize(0.0), 0.5);
    /// assert_eq!(el.normalize(90.0), 1.0);
    /// ```
    #[inline]
    pub fn normalize(&self, value: f32) -> f32 {
        let range = self.max - self.min;
        if range == 0.0 {
            return 0.0;
        }
        (value - self.min) / range
    }

    /// `[0.0, 1.0]` to plain value. Inverse of [`normalize`](Self::normalize).
    #[inline]
    pub fn denormalize(&self, normalized: f32) -> f32 {
        self.min + normalized * (self.max - self.min)
    }
}

/// Unit type for parameter display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamUnit {
    /// Angle in degrees.
    Degrees,
    /// Dimensionless.
    None,
}

impl ParamUnit {
    /// Suffix appended to a formatted value.
    ///
    /// ```rust
    /// use sfera_core::ParamUnit;
    ///
    /// assert_eq!(ParamUnit::Degrees.suffix(), "°");
    /// assert_eq!(ParamUnit::None.suffix(), "");
    /// ```
    pub const fn suffix(&self) -> &'static str {
        match self {
            ParamUnit::Degrees => "°",
            ParamUnit::None => "",
        }
    }
}
