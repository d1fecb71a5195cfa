//! Preset validation.
//!
//! Checks a [`Preset`](crate::Preset) against the encoder's host parameter
//! ranges before anything is built from it. Angle limits come from the
//! same [`ParamDescriptor`]s the encoder exposes to hosts.
//!
//! # Example
//!
//! ```rust
//! use sfera_config::{Preset, validate_preset};
//!
//! let preset = Preset::new("Up").with_direction(0.0, 95.0);
//! let err = validate_preset(&preset).unwrap_err();
//! assert!(err.to_string().contains("elevation"));
//! ```

use sfera_core::ParamDescriptor;
use thiserror::Error;

use crate::Preset;

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// Value outside its parameter range.
    #[error("parameter '{param}' value {value} out of range [{min}, {max}]")]
    OutOfRange {
        /// Name of the parameter.
        param: String,
        /// The value that was out of range.
        value: f64,
        /// Minimum allowed value.
        min: f64,
        /// Maximum allowed value.
        max: f64,
    },

    /// NaN or infinite value.
    #[error("parameter '{param}' is not a finite number")]
    NonFinite {
        /// Name of the parameter.
        param: String,
    },

    /// A size that must be at least one was zero.
    #[error("parameter '{param}' must be greater than zero")]
    Zero {
        /// Name of the parameter.
        param: String,
    },

    /// A trajectory keyframe is out of order or starts before zero.
    #[error("keyframe {index}: {reason}")]
    Keyframe {
        /// Position in the trajectory.
        index: usize,
        /// What is wrong with it.
        reason: String,
    },

    /// Multiple validation errors.
    #[error("multiple validation errors: {}", .0.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; "))]
    Multiple(Vec<ValidationError>),
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Check one angle against a host parameter's range.
///
/// `param` names the value in error messages, e.g. `"trajectory[2].azimuth"`.
pub fn validate_angle(
    param: &str,
    value: f64,
    descriptor: &ParamDescriptor,
) -> ValidationResult<()> {
    if !value.is_finite() {
        return Err(ValidationError::NonFinite {
            param: param.to_string(),
        });
    }
    let (min, max) = (f64::from(descriptor.min), f64::from(descriptor.max));
    if !(min..=max).contains(&value) {
        return Err(ValidationError::OutOfRange {
            param: param.to_string(),
            value,
            min,
            max,
        });
    }
    Ok(())
}

fn check_direction(prefix: &str, azimuth: f64, elevation: f64, errors: &mut Vec<ValidationError>) {
    let checks = [
        ("azimuth", azimuth, ParamDescriptor::azimuth()),
        ("elevation", elevation, ParamDescriptor::elevation()),
    ];
    for (name, value, descriptor) in checks {
        if let Err(e) = validate_angle(&format!("{prefix}{name}"), value, &descriptor) {
            errors.push(e);
        }
    }
}

/// Validate a complete preset.
///
/// Collects every problem rather than stopping at the first; a single
/// problem is returned as-is, several as [`ValidationError::Multiple`].
pub fn validate_preset(preset: &Preset) -> ValidationResult<()> {
    let mut errors = Vec::new();

    check_direction("", preset.azimuth, preset.elevation, &mut errors);

    let sizes = [
        ("sample_rate", preset.sample_rate as usize),
        ("table_length", preset.table_length),
        ("ramp_length", preset.ramp_length as usize),
    ];
    for (param, value) in sizes {
        if value == 0 {
            errors.push(ValidationError::Zero {
                param: param.to_string(),
            });
        }
    }

    let mut previous: Option<f64> = None;
    for (index, keyframe) in preset.trajectory.iter().enumerate() {
        check_direction(
            &format!("trajectory[{index}]."),
            keyframe.azimuth,
            keyframe.elevation,
            &mut errors,
        );

        let time = keyframe.time;
        let reason = if !time.is_finite() {
            Some(format!("time {time} is not finite"))
        } else if time < 0.0 {
            Some(format!("time {time} is negative"))
        } else if let Some(prev) = previous
            && time < prev
        {
            Some(format!("time {time} is before the previous keyframe at {prev}"))
        } else {
            None
        };
        if let Some(reason) = reason {
            errors.push(ValidationError::Keyframe { index, reason });
        }
        if time.is_finite() {
            previous = Some(time);
        }
    }

    match errors.len() {
        0 => Ok(()),
        1 => Err(errors.remove(0)),
        _ => Err(ValidationError::Multiple(errors)),
    }
}
