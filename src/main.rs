//! Gantry - plugin manifest loader for static-site build pipelines.

#![allow(dead_code)]

mod cli;
mod config;
mod logger;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::SiteConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    logger::set_verbose(cli.verbose);

    match &cli.command {
        Commands::Init { name } => cli::init::new_manifest(name.as_deref()),
        Commands::Validate { warn_only } => cli::validate::run(&cli, *warn_only),
        Commands::Query { args } => {
            let config = SiteConfig::load(&cli)?;
            cli::query::run(args, &config)
        }
    }
}
