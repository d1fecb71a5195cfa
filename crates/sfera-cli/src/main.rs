//! Sfera CLI - place mono sources in a third-order ambisonic sound field.

mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sfera")]
#[command(author, version, about = "Third-order ambisonic encoder", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a mono WAV file into 16-channel B-format
    Encode(commands::encode::EncodeArgs),

    /// Print the 16 channel gains for a direction
    Weights(commands::weights::WeightsArgs),

    /// Display WAV file information
    Info(commands::info::InfoArgs),

    /// List and manage direction presets
    Presets(commands::presets::PresetsArgs),

    /// Generate mono test signals
    Generate(commands::generate::GenerateArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Encode(args) => commands::encode::run(args),
        Commands::Weights(args) => commands::weights::run(args),
        Commands::Info(args) => commands::info::run(args),
        Commands::Presets(args) => commands::presets::run(args),
        Commands::Generate(args) => commands::generate::run(args),
    }
}
