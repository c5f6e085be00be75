//! Main entry point for the dlc-repacker CLI

use anyhow::{Context, Result};
use clap::Parser;

use dlc_repacker::cli::Cli;
use dlc_repacker::config::RepackConfig;
use dlc_repacker::driver::{self, ErrorPolicy};
use dlc_repacker::interactive;
use dlc_repacker::manifest::ManifestScanner;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logger
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(cli.log_filter()),
    )
    .init();

    let folder = match cli.folder {
        Some(folder) => folder,
        None => std::env::current_dir()
            .context("unable to determine the current working directory")?,
    };

    let config = RepackConfig::default();
    let scanner = ManifestScanner::default();
    driver::repack_folder(&folder, &config, &scanner, ErrorPolicy::Abort)?;

    interactive::wait_for_ack();
    Ok(())
}
