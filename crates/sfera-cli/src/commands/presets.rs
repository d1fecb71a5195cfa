//! Preset management commands.

use crate::commands::common::load_preset;
use clap::{Args, Subcommand};
use sfera_config::{
    Preset, ensure_user_presets_dir, factory_presets, list_user_presets, preset_name_from_path,
    system_presets_dir, user_presets_dir, validate_preset,
};

#[derive(Args)]
pub struct PresetsArgs {
    #[command(subcommand)]
    command: PresetsCommand,
}

#[derive(Subcommand)]
enum PresetsCommand {
    /// List available presets (factory and user)
    List {
        /// Show only factory presets
        #[arg(long)]
        factory: bool,

        /// Show only user presets
        #[arg(long)]
        user: bool,
    },

    /// Show details of a preset
    Show {
        /// Preset name or path
        name: String,

        /// Print the preset as TOML
        #[arg(long)]
        toml: bool,
    },

    /// Save a static direction as a user preset
    Save {
        /// Name for the new preset
        name: String,

        /// Azimuth in degrees
        #[arg(short, long, default_value = "0.0", allow_hyphen_values = true)]
        azimuth: f64,

        /// Elevation in degrees
        #[arg(short, long, default_value = "0.0", allow_hyphen_values = true)]
        elevation: f64,

        /// Description of the preset
        #[arg(short, long)]
        description: Option<String>,

        /// Direction ramp length in samples
        #[arg(long)]
        ramp_length: Option<u32>,

        /// Overwrite if preset already exists
        #[arg(long)]
        force: bool,
    },

    /// Show preset directories
    Paths,
}

pub fn run(args: PresetsArgs) -> anyhow::Result<()> {
    match args.command {
        PresetsCommand::List { factory, user } => list_presets(factory, user),
        PresetsCommand::Show { name, toml } => show_preset(&name, toml),
        PresetsCommand::Save {
            name,
            azimuth,
            elevation,
            description,
            ramp_length,
            force,
        } => {
            let mut preset = Preset::new(&name).with_direction(azimuth, elevation);
            if let Some(desc) = description {
                preset = preset.with_description(desc);
            }
            if let Some(len) = ramp_length {
                preset.ramp_length = len;
            }
            save_preset(&name, &preset, force)
        }
        PresetsCommand::Paths => show_paths(),
    }
}

fn list_presets(factory_only: bool, user_only: bool) -> anyhow::Result<()> {
    if !user_only {
        println!("Factory Presets:");
        println!("================");
        for preset in factory_presets() {
            let desc = preset.description.as_deref().unwrap_or("");
            println!("  {:12} - {}", preset.name.to_lowercase(), desc);
        }
        println!();
    }

    if !factory_only {
        println!("User Presets:");
        println!("=============");
        let user_presets = list_user_presets();
        if user_presets.is_empty() {
            println!("  (none)");
            println!();
            println!("  Create a preset with: sfera presets save <name> --azimuth <deg>\n");
        }
        for path in user_presets {
            let name = preset_name_from_path(&path).unwrap_or_else(|| "unknown".to_string());
            match Preset::load(&path) {
                Ok(preset) => {
                    let desc = preset.description.as_deref().unwrap_or("");
                    println!("  {name:12} - {desc}");
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "unreadable preset");
                    println!("  {name:12} - (error loading)");
                }
            }
        }
        println!();
    }

    Ok(())
}

fn show_preset(name: &str, as_toml: bool) -> anyhow::Result<()> {
    let preset = load_preset(name)?;

    if as_toml {
        print!("{}", preset.to_toml()?);
        return Ok(());
    }

    println!("Preset: {}", preset.name);
    println!("{}", "=".repeat(8 + preset.name.len()));
    println!();

    if let Some(desc) = &preset.description {
        println!("Description:  {desc}");
    }
    println!("Sample Rate:  {} Hz", preset.sample_rate);
    println!("Table Length: {}", preset.table_length);
    println!("Ramp Length:  {} samples", preset.ramp_length);
    if preset.bypass {
        println!("Bypass:       on");
    }
    println!();

    if preset.has_trajectory() {
        println!("Trajectory ({} keyframes):", preset.trajectory.len());
        for k in &preset.trajectory {
            println!(
                "  {:>7.2}s  azimuth {:>7.1}°  elevation {:>6.1}°",
                k.time, k.azimuth, k.elevation
            );
        }
    } else {
        println!(
            "Direction: azimuth {:.1}°, elevation {:.1}°",
            preset.azimuth, preset.elevation
        );
    }

    if let Err(e) = validate_preset(&preset) {
        println!();
        println!("Warning: {e}");
    }

    Ok(())
}

fn save_preset(name: &str, preset: &Preset, force: bool) -> anyhow::Result<()> {
    validate_preset(preset)?;

    let dir = ensure_user_presets_dir()?;
    let path = dir.join(format!("{name}.toml"));

    if path.exists() && !force {
        anyhow::bail!("Preset '{name}' already exists. Use --force to overwrite.");
    }

    preset.save(&path)?;
    println!("Saved preset '{}' to {}", name, path.display());

    Ok(())
}

fn show_paths() -> anyhow::Result<()> {
    println!("Preset Directories:");
    println!("===================");
    println!();
    println!("User presets:   {}", user_presets_dir().display());
    println!("System presets: {}", system_presets_dir().display());

    Ok(())
}
