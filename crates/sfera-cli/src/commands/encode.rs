//! Mono WAV to third-order B-format encoding command.

use crate::commands::common::{load_preset, parse_bit_depth};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use sfera_config::{Preset, validate_preset};
use sfera_core::{CHANNEL_COUNT, Channel, EncoderSession};
use sfera_io::{EncodingEngine, WavSpec, read_wav, write_wav_interleaved};
use std::path::PathBuf;

#[derive(Args)]
pub struct EncodeArgs {
    /// Input WAV file (multichannel input is mixed to mono)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file (16 channels, FuMa order)
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Azimuth in degrees, -180 to 180, positive to the left
    #[arg(short, long, allow_hyphen_values = true)]
    azimuth: Option<f64>,

    /// Elevation in degrees, -90 to 90, positive upward
    #[arg(short, long, allow_hyphen_values = true)]
    elevation: Option<f64>,

    /// Preset name or file (TOML); direction flags override it
    #[arg(short, long)]
    preset: Option<String>,

    /// Processing block size; trajectories update once per block
    #[arg(long, default_value = "512")]
    block_size: usize,

    /// Output bit depth (16, 24, or 32)
    #[arg(long, default_value = "32", value_parser = parse_bit_depth)]
    bit_depth: u16,

    /// Wave table samples per cycle
    #[arg(long)]
    table_length: Option<usize>,

    /// Direction ramp length in samples
    #[arg(long)]
    ramp_length: Option<u32>,

    /// Pass the input to W only
    #[arg(long)]
    bypass: bool,

    /// Hide the progress bar
    #[arg(short, long)]
    quiet: bool,
}

impl EncodeArgs {
    /// Resolve the preset and apply command-line overrides.
    fn preset(&self) -> anyhow::Result<Preset> {
        let mut preset = match &self.preset {
            Some(name) => load_preset(name)?,
            None => Preset::new("command line"),
        };

        if self.azimuth.is_some() || self.elevation.is_some() {
            // a fixed direction replaces any trajectory
            let start = preset.direction();
            preset.azimuth = self.azimuth.unwrap_or(start.azimuth);
            preset.elevation = self.elevation.unwrap_or(start.elevation);
            preset.trajectory.clear();
        }
        if let Some(len) = self.table_length {
            preset.table_length = len;
        }
        if let Some(len) = self.ramp_length {
            preset.ramp_length = len;
        }
        preset.bypass |= self.bypass;

        validate_preset(&preset)?;
        Ok(preset)
    }
}

pub fn run(args: EncodeArgs) -> anyhow::Result<()> {
    let mut preset = args.preset()?;

    println!("Reading {}...", args.input.display());
    let (samples, spec) = read_wav(&args.input)?;
    println!(
        "  {} samples, {} Hz, {:.2}s",
        samples.len(),
        spec.sample_rate,
        samples.len() as f64 / f64::from(spec.sample_rate)
    );
    preset.sample_rate = spec.sample_rate;

    let mut session = EncoderSession::with_config(preset.session_config()?);
    session.set_direction(preset.direction())?;
    session.set_bypass(preset.bypass);
    session.reset()?;

    let start = preset.direction();
    if preset.has_trajectory() {
        println!(
            "Trajectory '{}': {} keyframes over {:.2}s",
            preset.name,
            preset.trajectory.len(),
            preset.duration()
        );
    } else {
        println!(
            "Direction: azimuth {:.1}°, elevation {:.1}°{}",
            start.azimuth,
            start.elevation,
            if preset.bypass { " [BYPASSED]" } else { "" }
        );
    }
    tracing::info!(
        preset = %preset.name,
        table_length = preset.table_length,
        ramp_length = preset.ramp_length,
        "encoder configured"
    );

    let pb = if args.quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(samples.len() as u64)
    };
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("##-"),
    );

    let mut engine = EncodingEngine::new(session, args.block_size);
    let moving = preset.has_trajectory();
    let output = engine.process_with_automation(&samples, |offset| {
        pb.set_position(offset as u64);
        moving.then(|| preset.direction_at_frame(offset))
    })?;
    pb.set_position(samples.len() as u64);
    pb.finish_with_message("done");

    println!("\nPeak levels:");
    for channel in [Channel::W, Channel::X, Channel::Y, Channel::Z] {
        let peak = output
            .iter()
            .skip(channel.index())
            .step_by(CHANNEL_COUNT)
            .fold(0.0f32, |m, s| m.max(s.abs()));
        println!("  {channel}: {:.1} dB", linear_to_db(peak));
    }

    let out_spec = WavSpec {
        channels: CHANNEL_COUNT as u16,
        sample_rate: spec.sample_rate,
        bits_per_sample: args.bit_depth,
    };

    println!("\nWriting {}...", args.output.display());
    write_wav_interleaved(&args.output, &output, out_spec)?;
    println!("Done! {} frames x {} channels", samples.len(), CHANNEL_COUNT);

    Ok(())
}

fn linear_to_db(linear: f32) -> f32 {
    if linear > 0.0 {
        20.0 * linear.log10()
    } else {
        f32::NEG_INFINITY
    }
}
