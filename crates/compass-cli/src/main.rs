//! Compass CLI - Behavioral finance status scoring
//!
//! Usage:
//!   compass evaluate --metrics m.yaml --profile p.json   Evaluate a user
//!   compass levels --dimension savings                   Show band tables
//!   compass config show                                  Show effective config

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let config = cli.config.as_deref();

    match cli.command {
        Commands::Evaluate {
            metrics,
            savings,
            income,
            goals,
            literacy,
            behavior,
            profile,
            signal,
            json,
        } => {
            let input = commands::EvaluateInput {
                metrics_file: metrics,
                scores: commands::ScoreFlags {
                    savings,
                    income,
                    goals,
                    literacy,
                    behavior,
                },
                profile_file: profile,
                signals: signal,
            };
            commands::cmd_evaluate(config, &input, json)
        }
        Commands::Levels { dimension } => commands::cmd_levels(config, dimension.as_deref()),
        Commands::Config { action } => match action {
            ConfigAction::Path => commands::cmd_config_path(),
            ConfigAction::Show => commands::cmd_config_show(config),
            ConfigAction::Check { file } => commands::cmd_config_check(&file),
        },
    }
}
