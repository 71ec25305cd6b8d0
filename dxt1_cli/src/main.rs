//! Command line tool for inspecting DXT1 DDS textures.
//!
//! # Commands
//!
//! - `dxt1_cli inspect texture.dds` - Print block statistics and save debug TGA images
//! - `dxt1_cli synth` - Generate DXT1 DDS files covering every endpoint value of a channel
//!
//! Set `RUST_LOG=debug` to log the DDS layout and analysis progress.
mod inspect;
mod synth;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Inspect DXT1 compressed DDS textures
#[derive(Parser)]
#[command(name = "dxt1_cli")]
#[command(about = "Inspect DXT1 compressed DDS textures")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print endpoint, index, and similarity statistics and save debug images
    Inspect(inspect::InspectArgs),

    /// Generate DXT1 DDS files for checking endpoint expansion
    Synth(synth::SynthArgs),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Inspect(args) => inspect::execute(args),
        Commands::Synth(args) => synth::execute(args),
    }
}
