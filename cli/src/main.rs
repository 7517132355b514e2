//! qrtag — batch-generate logo-overlaid QR images from a delimited row file.
//!
//! Reads a semicolon-delimited file with TAG/PREFIX/LINK columns and
//! writes one QR image per row, named after the row's TAG, into the
//! output directory.

mod args;
mod batch;
mod rows;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use args::Cli;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    anyhow::ensure!(
        cli.logo_ratio > 0.0 && cli.logo_ratio < 1.0,
        "--logo-ratio must be in (0, 1), got {}",
        cli.logo_ratio
    );

    let summary = batch::run(
        &cli.input,
        &cli.logo,
        &cli.out_dir,
        cli.compose_options(),
        cli.keep_going,
    )?;

    // Keep-going mode reports failures as it goes; the exit code must
    // still be non-zero when any row was skipped.
    if summary.failed > 0 {
        anyhow::bail!("{} of {} rows failed", summary.failed, summary.processed);
    }

    Ok(())
}
