use anyhow::{Context, Result};
use clap::Parser;
use flag_splice::batch::{self, BatchConfig};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Data directory holding real_imgs/ and flag_imgs/
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// Number of cutouts spliced into each background
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u8).range(1..))]
    cutouts_per_image: u8,

    /// Only write a mask for every cutout, without splicing
    #[arg(long)]
    masks_only: bool,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .init();

    let config = BatchConfig {
        data_dir: args.data_dir,
        cutouts_per_image: args.cutouts_per_image as usize,
    };
    tracing::info!("Data directory: {}", config.data_dir.display());

    if args.masks_only {
        let masks = batch::create_all_masks(&config).context("Failed to create masks")?;
        tracing::info!("Wrote {} masks", masks.len());
        return Ok(());
    }

    let mut rng = rand::thread_rng();
    batch::run_batch(&config, &mut rng).context("Splicing failed")?;

    Ok(())
}
