//! Status table configuration
//!
//! Thresholds, titles, milestone text and contextual alert rules are
//! hand-authored tables rather than formulas. They live in TOML so they can be
//! tuned without touching the engine.
//!
//! ## Configuration Resolution
//!
//! Config is loaded with a two-layer resolution:
//! 1. Check for an override (explicit path, else
//!    ~/.local/share/compass/config/status.toml)
//! 2. Fall back to embedded defaults (compiled into binary)
//!
//! Override files may be partial. Each top-level section that is present
//! replaces the default section; dimensions are replaced one at a time.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::status::{AlertSeverity, Dimension, StatusLevel};

/// Embedded default config (compiled into binary)
pub const DEFAULT_CONFIG: &str = include_str!("../../../config/status.toml");

/// One score band of a dimension
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    /// Lowest score (inclusive) that reaches this band
    pub min_score: f64,
    pub title: String,
    /// What reaching this band means; shown as the next milestone from below
    pub milestone: String,
    /// Suggestion shown while a dimension sits in this band and is weak
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advice: Option<String>,
}

/// Band table for one dimension
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionConfig {
    pub dimension: Dimension,
    pub levels: Vec<LevelConfig>,
}

/// One band of the overall status table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandConfig {
    pub min_score: f64,
    pub title: String,
}

/// Contribution of each dimension to the aggregate score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weights {
    pub savings: f64,
    pub income: f64,
    pub goals: f64,
    pub literacy: f64,
    pub behavior: f64,
}

impl Weights {
    pub fn get(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::Savings => self.savings,
            Dimension::Income => self.income,
            Dimension::Goals => self.goals,
            Dimension::Literacy => self.literacy,
            Dimension::Behavior => self.behavior,
        }
    }

    pub fn total(&self) -> f64 {
        Dimension::all().iter().map(|&d| self.get(d)).sum()
    }
}

/// Overall status table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallConfig {
    pub weights: Weights,
    pub levels: Vec<BandConfig>,
}

/// One threshold within an alert family
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertRuleConfig {
    /// Signal value (inclusive) at which this rule fires
    pub at_least: f64,
    pub severity: AlertSeverity,
    pub message: String,
}

/// A family of alert rules reading one profile signal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertFamilyConfig {
    pub name: String,
    /// Profile key this family reads
    pub signal: String,
    /// Rules ordered from highest threshold to lowest
    pub rules: Vec<AlertRuleConfig>,
}

/// Complete, validated status configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusConfig {
    /// Dimensions below this level get an improvement suggestion
    pub improvement_below: StatusLevel,
    pub dimensions: Vec<DimensionConfig>,
    pub overall: OverallConfig,
    pub alerts: Vec<AlertFamilyConfig>,
}

impl StatusConfig {
    /// Parse the embedded default tables
    pub fn embedded() -> Result<Self> {
        let raw = parse_raw(DEFAULT_CONFIG)?;
        let config = StatusConfig {
            improvement_below: raw
                .improvement_below
                .ok_or_else(|| missing_section("improvement_below"))?,
            dimensions: sorted_dimensions(raw.dimensions.ok_or_else(|| missing_section("dimensions"))?),
            overall: raw.overall.ok_or_else(|| missing_section("overall"))?,
            alerts: raw.alerts.ok_or_else(|| missing_section("alerts"))?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Resolve config: override path first, then the default override
    /// location, then the embedded tables
    pub fn load(override_path: Option<&Path>) -> Result<Self> {
        let path = match override_path {
            Some(path) => Some(path.to_path_buf()),
            None => default_config_path(),
        };

        match path {
            Some(path) if path.exists() => {
                let config = Self::from_file(&path)?;
                tracing::info!(path = %path.display(), "Loaded status config override");
                Ok(config)
            }
            _ => Self::embedded(),
        }
    }

    /// Load an override file on top of the embedded tables
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read config {}: {}", path.display(), e))
        })?;
        Self::from_override_str(&content)
    }

    /// Apply override TOML on top of the embedded tables
    pub fn from_override_str(content: &str) -> Result<Self> {
        let raw = parse_raw(content)?;
        let mut config = Self::embedded()?;

        if let Some(level) = raw.improvement_below {
            config.improvement_below = level;
        }

        if let Some(dimensions) = raw.dimensions {
            let mut seen = HashSet::new();
            for dimension in dimensions {
                if !seen.insert(dimension.dimension) {
                    return Err(Error::Config(format!(
                        "Dimension {} listed more than once",
                        dimension.dimension
                    )));
                }
                config.dimensions.retain(|d| d.dimension != dimension.dimension);
                config.dimensions.push(dimension);
            }
            config.dimensions = sorted_dimensions(config.dimensions);
        }

        if let Some(overall) = raw.overall {
            config.overall = overall;
        }

        if let Some(alerts) = raw.alerts {
            config.alerts = alerts;
        }

        config.validate()?;
        Ok(config)
    }

    /// Band table for a dimension
    pub fn dimension(&self, dimension: Dimension) -> Option<&DimensionConfig> {
        self.dimensions.iter().find(|d| d.dimension == dimension)
    }

    /// Render the effective configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to render config: {}", e)))
    }

    /// Check every table invariant the engine relies on
    pub fn validate(&self) -> Result<()> {
        for &dimension in Dimension::all() {
            let count = self
                .dimensions
                .iter()
                .filter(|d| d.dimension == dimension)
                .count();
            if count != 1 {
                return Err(Error::Config(format!(
                    "Dimension {} must be configured exactly once (found {})",
                    dimension, count
                )));
            }
        }

        for dim in &self.dimensions {
            let bounds: Vec<f64> = dim.levels.iter().map(|l| l.min_score).collect();
            validate_bands(dim.dimension.as_str(), &bounds)?;
        }

        let bounds: Vec<f64> = self.overall.levels.iter().map(|l| l.min_score).collect();
        validate_bands("overall", &bounds)?;

        for &dimension in Dimension::all() {
            let weight = self.overall.weights.get(dimension);
            if !weight.is_finite() || weight < 0.0 {
                return Err(Error::Config(format!(
                    "Weight for {} must be a non-negative number",
                    dimension
                )));
            }
        }
        if self.overall.weights.total() <= 0.0 {
            return Err(Error::Config("Overall weights must not all be zero".into()));
        }

        let mut names = HashSet::new();
        for family in &self.alerts {
            if !names.insert(family.name.as_str()) {
                return Err(Error::Config(format!(
                    "Alert family {} defined more than once",
                    family.name
                )));
            }
            if family.rules.is_empty() {
                return Err(Error::Config(format!(
                    "Alert family {} has no rules",
                    family.name
                )));
            }
            let descending = family
                .rules
                .windows(2)
                .all(|pair| pair[0].at_least > pair[1].at_least);
            if !descending {
                return Err(Error::Config(format!(
                    "Alert family {} must list rules from highest threshold to lowest",
                    family.name
                )));
            }
            if family.rules.iter().any(|r| !r.at_least.is_finite()) {
                return Err(Error::Config(format!(
                    "Alert family {} has a non-numeric threshold",
                    family.name
                )));
            }
        }

        Ok(())
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("compass").join("config").join("status.toml"))
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    improvement_below: Option<StatusLevel>,
    dimensions: Option<Vec<DimensionConfig>>,
    overall: Option<OverallConfig>,
    alerts: Option<Vec<AlertFamilyConfig>>,
}

fn parse_raw(content: &str) -> Result<RawConfig> {
    toml::from_str(content).map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))
}

fn missing_section(name: &str) -> Error {
    Error::Config(format!("Missing section: {}", name))
}

fn sorted_dimensions(mut dimensions: Vec<DimensionConfig>) -> Vec<DimensionConfig> {
    dimensions.sort_by_key(|d| d.dimension);
    dimensions
}

/// Bands must start at 0, rise strictly and stay within [0, 100], so every
/// valid score lands in exactly one band.
fn validate_bands(table: &str, bounds: &[f64]) -> Result<()> {
    if bounds.len() != StatusLevel::COUNT {
        return Err(Error::Config(format!(
            "{}: expected {} levels, found {}",
            table,
            StatusLevel::COUNT,
            bounds.len()
        )));
    }
    if bounds[0] != 0.0 {
        return Err(Error::Config(format!(
            "{}: first level must start at 0 (starts at {})",
            table, bounds[0]
        )));
    }
    if bounds.iter().any(|b| !b.is_finite() || *b > 100.0) {
        return Err(Error::Config(format!(
            "{}: level boundaries must lie within [0, 100]",
            table
        )));
    }
    if !bounds.windows(2).all(|pair| pair[0] < pair[1]) {
        return Err(Error::Config(format!(
            "{}: level boundaries must be strictly increasing",
            table
        )));
    }
    Ok(())
}
