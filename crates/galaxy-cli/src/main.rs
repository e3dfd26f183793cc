mod cli;
mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command};

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("galaxy=info".parse()?))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Extract {
            save_dir,
            landmark,
            config,
        } => commands::extract::run(save_dir, landmark, config.as_deref()),
        Command::Selftest { stars, landmark } => commands::selftest::run(stars, &landmark),
        Command::Inspect { file, json } => commands::inspect::run(&file, json),
    }
}
