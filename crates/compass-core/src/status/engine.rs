//! Status Engine - the single entry point for status evaluation

use std::path::Path;

use crate::config::StatusConfig;
use crate::error::{Error, Result};

use super::aggregate::{improvement_areas, milestones, OverallScorer};
use super::rules::RuleEngine;
use super::scorer::DimensionScorer;
use super::types::{Dimension, Metrics, Profile, StatusBundle, StatusLevel};

/// Turns a user's metrics and profile into a complete status bundle
///
/// The engine holds only immutable lookup tables, so one instance can be
/// shared across threads and called concurrently.
#[derive(Debug, Clone)]
pub struct StatusEngine {
    /// Indexed by `Dimension::index()`
    scorers: Vec<DimensionScorer>,
    overall: OverallScorer,
    rules: RuleEngine,
    improvement_below: StatusLevel,
}

impl StatusEngine {
    /// Create an engine from an explicit configuration
    pub fn new(config: StatusConfig) -> Result<Self> {
        config.validate()?;

        let mut scorers = Vec::with_capacity(Dimension::all().len());
        for &dimension in Dimension::all() {
            let table = config
                .dimension(dimension)
                .ok_or_else(|| Error::Config(format!("Missing dimension: {}", dimension)))?;
            scorers.push(DimensionScorer::new(table)?);
        }

        Ok(Self {
            scorers,
            overall: OverallScorer::new(&config.overall),
            rules: RuleEngine::new(config.alerts),
            improvement_below: config.improvement_below,
        })
    }

    /// Create an engine with the embedded default tables
    pub fn with_defaults() -> Result<Self> {
        Self::new(StatusConfig::embedded()?)
    }

    /// Create an engine from the resolved configuration (override or defaults)
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        Self::new(StatusConfig::load(config_path)?)
    }

    /// Evaluate metrics and profile into a status bundle
    ///
    /// All scores are validated before any dimension is classified; an
    /// invalid score fails the whole call. Profile problems only drop the
    /// affected alerts.
    pub fn evaluate(&self, metrics: &Metrics, profile: &Profile) -> Result<StatusBundle> {
        metrics.validate()?;

        let dimensions = self
            .scorers
            .iter()
            .map(|scorer| scorer.classify(metrics.get(scorer.dimension())))
            .collect::<Result<Vec<_>>>()?;

        let overall = self.overall.overall(metrics);
        let improvement_areas = improvement_areas(&dimensions, &self.scorers, self.improvement_below);
        let milestones = milestones(&dimensions, &self.scorers);
        let alerts: Vec<String> = self
            .rules
            .alerts(profile)
            .into_iter()
            .map(|alert| alert.message)
            .collect();

        tracing::debug!(
            overall = overall.level.value(),
            aggregate = overall.score,
            improvements = improvement_areas.len(),
            alerts = alerts.len(),
            "Status evaluation complete"
        );

        Ok(StatusBundle {
            dimensions,
            overall,
            improvement_areas,
            milestones,
            alerts,
        })
    }

    /// Level threshold under which dimensions get improvement suggestions
    pub fn improvement_below(&self) -> StatusLevel {
        self.improvement_below
    }
}
