use clap::Parser;
use log::info;
use std::path::PathBuf;

use picsort_core::{Config, MediaSorter};

#[derive(Parser)]
#[command(name = "picsort")]
#[command(about = "Sort media files into date-bucketed folders, skipping duplicates")]
#[command(version)]
struct Cli {
    /// Flat directory holding the files to sort
    source_dir: PathBuf,

    /// Root of the destination tree (must already exist)
    dest_dir: PathBuf,

    /// Prefix applied to every newly placed file name
    prefix: String,
}

fn main() -> Result<(), anyhow::Error> {
    // Initialize logger
    env_logger::init();

    // Parse command line arguments
    let cli = Cli::parse();

    let config = Config::new(cli.source_dir, cli.dest_dir, cli.prefix);

    // Validate configuration before touching any file
    config.validate()?;

    let sorter = MediaSorter::new(config);

    info!("Starting media sort...");
    let summary = sorter.run()?;
    println!(
        "Done: {} moved, {} skipped as duplicates",
        summary.moved, summary.skipped
    );

    Ok(())
}
