//! Preset demo: factory presets, trajectories, and validation.
//!
//! Run with: cargo run -p sfera-config --example preset_demo

use sfera_config::{
    Keyframe, Preset, factory_preset_names, get_factory_preset, validate_preset,
};

fn main() {
    println!("=== Factory Presets ===\n");
    println!("{:<8} {:>9} {:>10}  {}", "Id", "Azimuth", "Elevation", "Description");
    println!("{:-<8} {:->9} {:->10}  {:-<30}", "", "", "", "");
    for id in factory_preset_names() {
        let Some(preset) = get_factory_preset(id) else {
            continue;
        };
        let d = preset.direction();
        println!(
            "{:<8} {:>9.1} {:>10.1}  {}",
            id,
            d.azimuth,
            d.elevation,
            preset.description.as_deref().unwrap_or("")
        );
    }

    println!("\n=== Orbit Trajectory ===\n");
    if let Some(orbit) = get_factory_preset("orbit") {
        println!("{:>6} {:>9} {:>10}", "Time", "Azimuth", "Elevation");
        let mut t = 0.0;
        while t <= orbit.duration() {
            let d = orbit.direction_at(t);
            println!("{:>6.1} {:>9.2} {:>10.2}", t, d.azimuth, d.elevation);
            t += 0.5;
        }
    }

    println!("\n=== Custom Preset ===\n");
    let preset = Preset::new("Fly-over")
        .with_description("Front to back, passing overhead")
        .with_lengths(2048, 512)
        .with_keyframe(Keyframe::new(0.0, 0.0, 0.0))
        .with_keyframe(Keyframe::new(1.5, 0.0, 90.0))
        .with_keyframe(Keyframe::new(3.0, 180.0, 0.0));

    match preset.to_toml() {
        Ok(text) => println!("{text}"),
        Err(e) => println!("serialization failed: {e}"),
    }

    println!("=== Validation ===\n");
    let broken = preset
        .clone()
        .with_direction(200.0, 0.0)
        .with_keyframe(Keyframe::new(1.0, 0.0, 0.0));
    for p in [&preset, &broken] {
        match validate_preset(p) {
            Ok(()) => println!("{}: ok", p.name),
            Err(e) => println!("{}: {e}", p.name),
        }
    }
}
