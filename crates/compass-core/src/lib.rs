//! Compass Core Library
//!
//! Behavioral status scoring for a personal finance assistant:
//! - Per-dimension status levels (savings, income, goals, literacy, behavior)
//! - Overall status from a weighted aggregate score
//! - Improvement areas and next milestones
//! - Contextual alerts from profile signals
//! - TOML status tables with user overrides
//! - JSON/YAML input documents for metrics and profiles

pub mod config;
pub mod error;
pub mod input;
pub mod status;

pub use config::{default_config_path, StatusConfig};
pub use error::{Error, Result};
pub use status::{
    AlertSeverity, ContextualAlert, Dimension, DimensionStatus, Metrics, OverallStatus, Profile,
    StatusBundle, StatusEngine, StatusLevel,
};
