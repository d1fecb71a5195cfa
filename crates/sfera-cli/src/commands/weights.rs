//! Print the encoding gains for a single direction.

use clap::Args;
use sfera_config::validate_angle;
use sfera_core::{Channel, Direction, HarmonicEncoder, ParamDescriptor, WaveTable};

#[derive(Args)]
pub struct WeightsArgs {
    /// Azimuth in degrees, -180 to 180, positive to the left
    #[arg(short, long, default_value = "0.0", allow_hyphen_values = true)]
    azimuth: f64,

    /// Elevation in degrees, -90 to 90, positive upward
    #[arg(short, long, default_value = "0.0", allow_hyphen_values = true)]
    elevation: f64,

    /// Wave table samples per cycle
    #[arg(long, default_value_t = WaveTable::DEFAULT_LENGTH)]
    table_length: usize,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: WeightsArgs) -> anyhow::Result<()> {
    validate_angle("azimuth", args.azimuth, &ParamDescriptor::azimuth())?;
    validate_angle("elevation", args.elevation, &ParamDescriptor::elevation())?;

    let direction = Direction::new(args.azimuth, args.elevation);
    let (theta, phi) = direction.to_turns();
    let mut encoder = HarmonicEncoder::new(args.table_length)?;
    encoder.init_coordinates(theta, phi)?;
    let weights = encoder.weights();

    if args.json {
        let channels: Vec<_> = Channel::ALL
            .iter()
            .map(|&ch| {
                serde_json::json!({
                    "index": ch.index(),
                    "channel": ch.label(),
                    "order": ch.order(),
                    "weight": weights[ch.index()],
                })
            })
            .collect();
        let report = serde_json::json!({
            "azimuth": args.azimuth,
            "elevation": args.elevation,
            "table_length": args.table_length,
            "channels": channels,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "Weights for azimuth {:.2}°, elevation {:.2}°:",
        args.azimuth, args.elevation
    );
    println!();
    println!("  {:>3}  {:<7}  {:>5}  {:>12}", "#", "Channel", "Order", "Weight");
    println!("  {:->3}  {:-<7}  {:->5}  {:->12}", "", "", "", "");
    for ch in Channel::ALL {
        println!(
            "  {:>3}  {:<7}  {:>5}  {:>12.6}",
            ch.index(),
            ch.label(),
            ch.order(),
            weights[ch.index()]
        );
    }

    Ok(())
}
