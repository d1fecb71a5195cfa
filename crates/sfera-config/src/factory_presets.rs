//! Factory presets bundled with the sfera library.
//!
//! Six static placements along the principal axes plus a moving source.
//! They are embedded as TOML so they read exactly like user preset files.

use crate::Preset;

/// Identifier and TOML source of each factory preset.
static FACTORY_PRESETS_TOML: &[(&str, &str)] = &[
    ("front", FRONT_PRESET),
    ("left", LEFT_PRESET),
    ("right", RIGHT_PRESET),
    ("rear", REAR_PRESET),
    ("above", ABOVE_PRESET),
    ("below", BELOW_PRESET),
    ("orbit", ORBIT_PRESET),
];

const FRONT_PRESET: &str = r#"
name = "Front"
description = "Straight ahead on the horizon"
azimuth = 0.0
elevation = 0.0
"#;

const LEFT_PRESET: &str = r#"
name = "Left"
description = "Hard left, 90 degrees counter-clockwise"
azimuth = 90.0
elevation = 0.0
"#;

const RIGHT_PRESET: &str = r#"
name = "Right"
description = "Hard right, 90 degrees clockwise"
azimuth = -90.0
elevation = 0.0
"#;

const REAR_PRESET: &str = r#"
name = "Rear"
description = "Directly behind the listener"
azimuth = 180.0
elevation = 0.0
"#;

const ABOVE_PRESET: &str = r#"
name = "Above"
description = "Zenith, straight overhead"
azimuth = 0.0
elevation = 90.0
"#;

const BELOW_PRESET: &str = r#"
name = "Below"
description = "Nadir, straight underneath"
azimuth = 0.0
elevation = -90.0
"#;

/// Counter-clockwise revolution with a slow rise and fall.
const ORBIT_PRESET: &str = r#"
name = "Orbit"
description = "One counter-clockwise revolution every eight seconds"
ramp_length = 256

[[trajectory]]
time = 0.0
azimuth = 0.0
elevation = 0.0

[[trajectory]]
time = 2.0
azimuth = 90.0
elevation = 15.0

[[trajectory]]
time = 4.0
azimuth = 180.0
elevation = 0.0

[[trajectory]]
time = 6.0
azimuth = -90.0
elevation = -15.0

[[trajectory]]
time = 8.0
azimuth = 0.0
elevation = 0.0
"#;

/// All factory presets, in a stable order.
///
/// ```rust
/// use sfera_config::factory_presets;
///
/// for preset in factory_presets() {
///     println!("{}: {}", preset.name, preset.description.as_deref().unwrap_or(""));
/// }
/// ```
pub fn factory_presets() -> Vec<Preset> {
    FACTORY_PRESETS_TOML
        .iter()
        .filter_map(|(_, toml)| Preset::from_toml(toml).ok())
        .collect()
}

/// Look up a factory preset by identifier or display name, ignoring case.
///
/// ```rust
/// use sfera_config::get_factory_preset;
///
/// let rear = get_factory_preset("Rear").unwrap();
/// assert_eq!(rear.azimuth, 180.0);
/// ```
pub fn get_factory_preset(name: &str) -> Option<Preset> {
    FACTORY_PRESETS_TOML.iter().find_map(|(id, toml)| {
        let preset = Preset::from_toml(toml).ok()?;
        (id.eq_ignore_ascii_case(name) || preset.name.eq_ignore_ascii_case(name)).then_some(preset)
    })
}

/// Identifiers of all factory presets.
pub fn factory_preset_names() -> Vec<&'static str> {
    FACTORY_PRESETS_TOML.iter().map(|(name, _)| *name).collect()
}

/// Whether `name` refers to a factory preset.
pub fn is_factory_preset(name: &str) -> bool {
    get_factory_preset(name).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate_preset;

    #[test]
    fn test_all_factory_presets_parse() {
        for (id, toml) in FACTORY_PRESETS_TOML {
            assert!(Preset::from_toml(toml).is_ok(), "factory preset '{id}' failed to parse");
        }
        assert_eq!(factory_presets().len(), FACTORY_PRESETS_TOML.len());
    }

    #[test]
    fn test_all_factory_presets_validate() {
        for preset in factory_presets() {
            assert!(validate_preset(&preset).is_ok(), "{} invalid", preset.name);
        }
    }

    #[test]
    fn test_names() {
        assert_eq!(
            factory_preset_names(),
            vec!["front", "left", "right", "rear", "above", "below", "orbit"]
        );
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert!(is_factory_preset("ORBIT"));
        assert!(is_factory_preset("Above"));
        assert!(!is_factory_preset("sideways"));
        assert_eq!(get_factory_preset("LEFT").unwrap().azimuth, 90.0);
    }

    #[test]
    fn test_static_presets_have_no_trajectory() {
        for preset in factory_presets().iter().filter(|p| p.name != "Orbit") {
            assert!(!preset.has_trajectory(), "{}", preset.name);
        }
    }

    #[test]
    fn test_orbit_completes_a_revolution() {
        let orbit = get_factory_preset("orbit").unwrap();
        assert_eq!(orbit.duration(), 8.0);
        assert_eq!(orbit.ramp_length, 256);
        assert_eq!(orbit.direction_at(0.0), orbit.direction_at(8.0));
        let back = orbit.direction_at(4.0);
        assert_eq!(back.azimuth, 180.0);
        // 180 -> -90 is a 90 degree turn through -135
        let d = orbit.direction_at(5.0);
        assert!((d.azimuth + 135.0).abs() < 1e-9, "got {}", d.azimuth);
    }
}
