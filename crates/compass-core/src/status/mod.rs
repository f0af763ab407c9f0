//! Behavioral Status Engine
//!
//! Converts a user's financial activity scores into per-dimension maturity
//! levels, an overall status, improvement suggestions, next milestones and
//! contextual alerts.
//!
//! ## Components
//!
//! - **Dimension scorers** - classify each 0-100 score against its own band table
//! - **Contextual rules** - turn profile signals into advisory alerts
//! - **Aggregator** - overall status, improvement areas, milestones
//! - **Engine** - the entry point tying the above together
//!
//! ## Usage
//!
//! ```rust,ignore
//! use compass_core::status::{Metrics, Profile, StatusEngine};
//!
//! let engine = StatusEngine::load(None)?;
//! let profile = Profile::new().with_signal("flagged_spending_amount", 400);
//! let bundle = engine.evaluate(&Metrics::new(85.0, 60.0, 35.0, 15.0, 0.0), &profile)?;
//! ```

mod aggregate;
pub mod engine;
mod rules;
mod scorer;
pub mod types;

pub use engine::StatusEngine;
pub use types::{
    AlertSeverity, ContextualAlert, Dimension, DimensionStatus, Metrics, OverallStatus, Profile,
    StatusBundle, StatusLevel,
};
