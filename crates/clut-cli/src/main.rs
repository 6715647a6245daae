//! clut - apply Hald CLUT color lookup tables to images

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "clut")]
#[command(author, version, about = "Apply Hald CLUT color lookup tables to images")]
#[command(long_about = "
Validates, generates and applies Hald CLUT images (3D color lookup tables
stored as square N^3 x N^3 images) using trilinear interpolation.

Examples:
  clut info film.png                       # Check a Hald CLUT, show its level
  clut identity --level 8 -o hald8.png     # Write a 512x512 identity CLUT
  clut apply photo.png -c film.png -o out.png
  clut -j 4 -vv apply photo.png -c film.png -o out.png
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (repeat for more detail; RUST_LOG overrides)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,

    /// Process on the calling thread only
    #[arg(long, global = true)]
    serial: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate Hald CLUT images and show their level
    #[command(visible_alias = "i")]
    Info(InfoArgs),

    /// Write an identity Hald CLUT
    Identity(IdentityArgs),

    /// Apply a Hald CLUT to an image
    #[command(visible_alias = "a")]
    Apply(ApplyArgs),
}

#[derive(Args)]
struct InfoArgs {
    /// Hald CLUT image(s)
    #[arg(required = true)]
    input: Vec<PathBuf>,
}

#[derive(Args)]
struct IdentityArgs {
    /// Hald level N (image side N^3, N^2 samples per axis)
    #[arg(short, long, default_value = "8")]
    level: u32,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    /// Bits per sample: 8 or 16
    #[arg(short, long, default_value = "16")]
    bits: u8,
}

#[derive(Args)]
struct ApplyArgs {
    /// Input image
    input: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    /// Hald CLUT image (omit for the identity transform)
    #[arg(short, long)]
    clut: Option<PathBuf>,

    /// Bits per sample: 8 or 16
    #[arg(short, long, default_value = "8")]
    bits: u8,

    /// Rows per worker task
    #[arg(long, default_value_t = clut_ops::config::DEFAULT_ROWS_PER_TASK)]
    rows_per_task: usize,
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    match cli.command {
        Commands::Info(args) => commands::info::run(args),
        Commands::Identity(args) => commands::identity::run(args),
        Commands::Apply(args) => commands::apply::run(args, cli.serial),
    }
}
