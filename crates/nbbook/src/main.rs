//! Notebook book authoring CLI

use anyhow::Result;
use clap::Parser;
use nbbook::config::Config;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::*;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            nbbook::errors::print_error_with_suggestion(
                "Failed to load configuration",
                &e,
                "Check the keys in nbb.toml or pass a valid --config path",
            );
            std::process::exit(1);
        }
    };

    // Execute the command
    let result = match cli.command {
        Commands::Scaffold { folder, dry_run } => scaffold(&folder, &config, dry_run),
        Commands::NavLinks { root, dry_run } => {
            let root = root.unwrap_or_else(|| config.notebooks_dir.clone());
            nav_links(&root, &config, dry_run)
        }
        Commands::TocLinks { folder, dry_run } => match folder {
            Some(folder) => toc_links(&folder, &config, dry_run),
            None => toc_links_all(std::path::Path::new("."), &config, dry_run),
        },
    };

    if let Err(e) = result {
        nbbook::errors::print_error("Command failed", &e);
        std::process::exit(1);
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
