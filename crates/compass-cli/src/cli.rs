//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Compass - Turn financial activity into status and next steps
#[derive(Parser)]
#[command(name = "compass")]
#[command(about = "Behavioral status scoring for personal finance", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Status table override (defaults to the data dir override, then built-in tables)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Evaluate metrics and profile signals into a status bundle
    Evaluate {
        /// Metrics file (JSON, or YAML by extension) keyed by dimension
        #[arg(short, long)]
        metrics: Option<PathBuf>,

        /// Savings discipline score (0-100), overrides the metrics file
        #[arg(long)]
        savings: Option<f64>,

        /// Income growth score (0-100)
        #[arg(long)]
        income: Option<f64>,

        /// Goal orientation score (0-100)
        #[arg(long)]
        goals: Option<f64>,

        /// Financial literacy score (0-100)
        #[arg(long)]
        literacy: Option<f64>,

        /// Behavior change score (0-100)
        #[arg(long)]
        behavior: Option<f64>,

        /// Profile signals file (JSON or YAML)
        #[arg(short, long)]
        profile: Option<PathBuf>,

        /// Profile signal as key=value (repeatable), overrides the profile file
        #[arg(short, long)]
        signal: Vec<String>,

        /// Print the bundle as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show level thresholds and titles
    Levels {
        /// Only show one dimension (savings, income, goals, literacy, behavior)
        #[arg(short, long)]
        dimension: Option<String>,
    },

    /// Inspect status table configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show where the override file is looked up
    Path,
    /// Print the effective configuration as TOML
    Show,
    /// Validate a candidate override file
    Check {
        /// Override file to validate
        file: PathBuf,
    },
}
