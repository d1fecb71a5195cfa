//! Presets and configuration for the sfera ambisonic encoder.
//!
//! # Features
//!
//! - **Preset System**: load and save source placements as TOML files
//! - **Trajectories**: keyframed movement with shortest-arc azimuth
//!   interpolation ([`Preset::direction_at`])
//! - **Validation**: check angles, sizes, and keyframe order against the
//!   encoder's host parameter ranges
//! - **Paths**: platform-specific preset directories
//! - **Factory Presets**: the principal directions and an orbit
//!
//! # Example
//!
//! ```rust,no_run
//! use sfera_config::{Keyframe, Preset, user_presets_dir, validate_preset};
//!
//! let preset = Preset::new("Fly-by")
//!     .with_description("Left to right over two seconds")
//!     .with_keyframe(Keyframe::new(0.0, 90.0, 0.0))
//!     .with_keyframe(Keyframe::new(2.0, -90.0, 0.0));
//! validate_preset(&preset).unwrap();
//!
//! let path = user_presets_dir().join("fly_by.toml");
//! preset.save(&path).unwrap();
//! ```

mod error;
mod preset;

/// Platform-specific preset directories.
#[cfg(feature = "std")]
pub mod paths;

/// Preset validation.
pub mod validation;

/// Factory presets bundled with the library.
pub mod factory_presets;

pub use error::ConfigError;
pub use factory_presets::{
    factory_preset_names, factory_presets, get_factory_preset, is_factory_preset,
};
#[cfg(feature = "std")]
pub use paths::{
    ensure_user_presets_dir, find_preset, list_system_presets, list_user_presets,
    preset_name_from_path, system_presets_dir, user_presets_dir,
};
pub use preset::{Keyframe, Preset};
pub use validation::{ValidationError, ValidationResult, validate_angle, validate_preset};
