//! Edgemap - edge path router and SEO sitemap toolkit for split static deployments.

#![allow(dead_code)]

mod cli;
mod config;
mod core;
mod generator;
mod logger;
mod router;
mod scan;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::SiteConfig;

fn main() -> Result<()> {
    // Setup global Ctrl+C handler (before any blocking operations)
    core::setup_shutdown_handler()?;

    let cli: &'static Cli = Box::leak(Box::new(Cli::parse()));

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let config = SiteConfig::load(cli)?;

    match &cli.command {
        Commands::Build { build_args } => cli::build::run_build(build_args, &config),
        Commands::Route { args } => cli::route::run_route(args, &config),
        Commands::Check { args } => cli::check::run_check(args, &config),
        Commands::Serve { .. } => cli::serve::serve(&config),
    }
}
