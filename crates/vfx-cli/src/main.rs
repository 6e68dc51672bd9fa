//! vfx - color transform CLI
//!
//! Applies YAML transform chains to pixel values, inspects CDL files and
//! prints derived matrices.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(name = "vfx")]
#[command(author, version, about = "Color transform toolkit")]
#[command(long_about = "
Evaluate OCIO-style color transforms from the command line.

Examples:
  vfx apply -t grade.yaml 0.18 0.18 0.18 1       # Transform one RGBA pixel
  vfx apply -t grade.yaml --inverse -c 3 0.5 0.4 0.3
  vfx cdl shots.ccc --id sh010                  # Print a correction record
  vfx cdl shot.cc --yaml                        # ... as a CDLTransform
  vfx matrix sat 0.5                            # Saturation matrix
  vfx matrix fit --old-min 0.1 --old-max 0.9 --new-min 0 --new-max 1.1
  vfx formats                                   # List file formats
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose logging (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Disable logging
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply a YAML transform to pixel values
    #[command(visible_alias = "a")]
    Apply(ApplyArgs),

    /// Print a correction from a .cc/.ccc/.cdl file
    Cdl(CdlArgs),

    /// Print a derived matrix and offset
    #[command(visible_alias = "m")]
    Matrix(MatrixArgs),

    /// List registered file formats
    Formats,
}

#[derive(Args)]
struct ApplyArgs {
    /// YAML transform document
    #[arg(short, long)]
    transform: PathBuf,

    /// Apply the inverse direction
    #[arg(long)]
    inverse: bool,

    /// Values per pixel (3 = RGB with opaque alpha, 4 = RGBA)
    #[arg(short, long, default_value_t = 4, value_parser = clap::value_parser!(u8).range(3..=4))]
    channels: u8,

    /// Pixel values, channel-interleaved
    #[arg(required = true, allow_negative_numbers = true)]
    values: Vec<f32>,
}

#[derive(Args)]
struct CdlArgs {
    /// CDL file (.cc, .ccc, .cdl)
    file: PathBuf,

    /// Correction id (default: first in file)
    #[arg(long, default_value = "")]
    id: String,

    /// Print as a YAML CDLTransform instead of XML
    #[arg(long)]
    yaml: bool,
}

#[derive(Args)]
struct MatrixArgs {
    #[command(subcommand)]
    kind: MatrixKind,

    /// Print as a YAML MatrixTransform
    #[arg(long, global = true)]
    yaml: bool,
}

#[derive(Subcommand)]
enum MatrixKind {
    /// Identity
    Identity,

    /// Saturation around luma
    Sat {
        /// Saturation (0 = gray, 1 = unchanged)
        #[arg(allow_negative_numbers = true)]
        sat: f64,

        /// Luma weights R,G,B
        #[arg(long, default_value = "0.2126,0.7152,0.0722")]
        luma: String,
    },

    /// Per-channel scale
    Scale {
        /// Scale R,G,B,A
        #[arg(allow_negative_numbers = true)]
        scale: String,
    },

    /// Channel view
    View {
        /// Hot channels as 0/1 flags R,G,B,A
        channels: String,

        /// Luma weights R,G,B
        #[arg(long, default_value = "0.2126,0.7152,0.0722")]
        luma: String,
    },

    /// Remap one range onto another
    Fit {
        /// Source minimum (one value or R,G,B,A)
        #[arg(long, allow_negative_numbers = true)]
        old_min: String,
        /// Source maximum
        #[arg(long, allow_negative_numbers = true)]
        old_max: String,
        /// Target minimum
        #[arg(long, allow_negative_numbers = true)]
        new_min: String,
        /// Target maximum
        #[arg(long, allow_negative_numbers = true)]
        new_max: String,
    },
}

fn init_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }
    let filter = match verbose {
        0 => tracing::level_filters::LevelFilter::INFO,
        1 => tracing::level_filters::LevelFilter::DEBUG,
        2.. => tracing::level_filters::LevelFilter::TRACE,
    };
    let env_filter = tracing_subscriber::EnvFilter::builder()
        .with_default_directive(filter.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Apply(args) => commands::apply::run(args),
        Commands::Cdl(args) => commands::cdl::run(args),
        Commands::Matrix(args) => commands::matrix::run(args),
        Commands::Formats => commands::formats::run(),
    }
}
