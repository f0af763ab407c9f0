//! Dimension Scorers
//!
//! Each dimension classifies a 0-100 score against its own five-band table.
//! The tables share one lookup routine; what differs per dimension is data.

use crate::config::{DimensionConfig, LevelConfig};
use crate::error::{Error, Result};

use super::types::{validate_score, Dimension, DimensionStatus, StatusLevel};

/// Level for `score` given ascending band lower bounds
///
/// Lower bounds are inclusive: a score sitting exactly on a boundary gets the
/// higher level. Bounds are validated to start at 0, so every score in
/// [0, 100] finds a band.
pub(crate) fn level_for(bounds: &[f64], score: f64) -> StatusLevel {
    let band = bounds.iter().rposition(|min| score >= *min).unwrap_or(0);
    StatusLevel::from_band(band).unwrap_or(StatusLevel::MIN)
}

/// Lookup table for one dimension
#[derive(Debug, Clone)]
pub(crate) struct DimensionScorer {
    dimension: Dimension,
    bounds: Vec<f64>,
    levels: Vec<LevelConfig>,
}

impl DimensionScorer {
    /// Build from a validated band table
    pub fn new(config: &DimensionConfig) -> Result<Self> {
        if config.levels.len() != StatusLevel::COUNT {
            return Err(Error::Config(format!(
                "{}: expected {} levels, found {}",
                config.dimension,
                StatusLevel::COUNT,
                config.levels.len()
            )));
        }
        Ok(Self {
            dimension: config.dimension,
            bounds: config.levels.iter().map(|l| l.min_score).collect(),
            levels: config.levels.clone(),
        })
    }

    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    /// Classify a score into this dimension's status
    pub fn classify(&self, score: f64) -> Result<DimensionStatus> {
        let score = validate_score(self.dimension.as_str(), score)?;
        let level = level_for(&self.bounds, score);

        Ok(DimensionStatus {
            dimension: self.dimension,
            level,
            title: self.band(level).title.clone(),
            score,
        })
    }

    /// Advice for a dimension sitting at `level`
    ///
    /// Levels without advice text point at the next level's milestone.
    pub fn advice(&self, level: StatusLevel) -> Option<&str> {
        match self.band(level).advice.as_deref() {
            Some(advice) if !advice.is_empty() => Some(advice),
            _ => self
                .next_milestone(level)
                .map(|(_, band)| band.milestone.as_str()),
        }
    }

    /// Title and milestone of the level above `level`
    pub fn next_milestone(&self, level: StatusLevel) -> Option<(StatusLevel, &LevelConfig)> {
        let next = level.next()?;
        Some((next, self.band(next)))
    }

    fn band(&self, level: StatusLevel) -> &LevelConfig {
        &self.levels[level.band()]
    }
}
