//! Status Aggregator
//!
//! Combines the five dimension statuses into an overall status and derives
//! improvement areas and next milestones. Everything here is a pure function
//! of its inputs.

use crate::config::{BandConfig, OverallConfig, Weights};

use super::scorer::{level_for, DimensionScorer};
use super::types::{Dimension, DimensionStatus, Metrics, OverallStatus, StatusLevel};

/// Overall band table plus aggregate weights
#[derive(Debug, Clone)]
pub(crate) struct OverallScorer {
    weights: Weights,
    bounds: Vec<f64>,
    bands: Vec<BandConfig>,
}

impl OverallScorer {
    pub fn new(config: &OverallConfig) -> Self {
        Self {
            weights: config.weights,
            bounds: config.levels.iter().map(|b| b.min_score).collect(),
            bands: config.levels.clone(),
        }
    }

    /// Weighted mean of the raw scores, unrounded
    fn weighted_mean(&self, metrics: &Metrics) -> f64 {
        let total = self.weights.total();
        let weighted: f64 = Dimension::all()
            .iter()
            .map(|&d| self.weights.get(d) * metrics.get(d))
            .sum();
        weighted / total
    }

    /// Classify an aggregate score in [0, 100]
    ///
    /// The band is picked from the score with only floating point noise
    /// removed, so 24.999999999999996 counts as 25 but 24.95 stays below it.
    pub fn classify(&self, score: f64) -> OverallStatus {
        let level = level_for(&self.bounds, strip_noise(score));
        OverallStatus {
            level,
            title: self.bands[level.band()].title.clone(),
            score: round_tenth(score),
        }
    }

    pub fn overall(&self, metrics: &Metrics) -> OverallStatus {
        self.classify(self.weighted_mean(metrics))
    }
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn strip_noise(value: f64) -> f64 {
    (value * 1e9).round() / 1e9
}

/// Dimensions ordered worst level first; ties keep dimension order
fn worst_first(statuses: &[DimensionStatus]) -> Vec<&DimensionStatus> {
    let mut ordered: Vec<&DimensionStatus> = statuses.iter().collect();
    ordered.sort_by_key(|s| (s.level, s.dimension));
    ordered
}

/// One suggestion per dimension below `below`, worst first
///
/// Empty when every dimension has reached `below`.
pub(crate) fn improvement_areas(
    statuses: &[DimensionStatus],
    scorers: &[DimensionScorer],
    below: StatusLevel,
) -> Vec<String> {
    worst_first(statuses)
        .into_iter()
        .filter(|s| s.level < below)
        .filter_map(|s| {
            let advice = scorers[s.dimension.index()].advice(s.level)?;
            Some(format!("{}: {}", s.dimension.label(), advice))
        })
        .collect()
}

/// Next-level description for each dimension below the top level, worst first
pub(crate) fn milestones(statuses: &[DimensionStatus], scorers: &[DimensionScorer]) -> Vec<String> {
    worst_first(statuses)
        .into_iter()
        .filter_map(|s| {
            let (next, band) = scorers[s.dimension.index()].next_milestone(s.level)?;
            Some(format!(
                "{} level {} ({}): {}",
                s.dimension.label(),
                next,
                band.title,
                band.milestone
            ))
        })
        .collect()
}
