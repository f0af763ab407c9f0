//! Core types for the status engine

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Behavioral axes tracked for every user, in their fixed output order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    /// Savings discipline
    Savings,
    /// Income growth
    Income,
    /// Goal orientation
    Goals,
    /// Financial literacy
    Literacy,
    /// Behavior change
    Behavior,
}

impl Dimension {
    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::Savings => "savings",
            Dimension::Income => "income",
            Dimension::Goals => "goals",
            Dimension::Literacy => "literacy",
            Dimension::Behavior => "behavior",
        }
    }

    /// Human-readable name used in improvement and milestone text
    pub fn label(&self) -> &'static str {
        match self {
            Dimension::Savings => "Savings discipline",
            Dimension::Income => "Income growth",
            Dimension::Goals => "Goal orientation",
            Dimension::Literacy => "Financial literacy",
            Dimension::Behavior => "Behavior change",
        }
    }

    /// All dimensions in output order
    pub fn all() -> &'static [Dimension] {
        &[
            Dimension::Savings,
            Dimension::Income,
            Dimension::Goals,
            Dimension::Literacy,
            Dimension::Behavior,
        ]
    }

    /// Position in the output order
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Dimension {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "savings" => Ok(Dimension::Savings),
            "income" => Ok(Dimension::Income),
            "goals" => Ok(Dimension::Goals),
            "literacy" => Ok(Dimension::Literacy),
            "behavior" => Ok(Dimension::Behavior),
            _ => Err(format!("Unknown dimension: {}", s)),
        }
    }
}

/// Ordinal maturity level, 1 (weakest) to 5 (strongest)
///
/// Serialized as its number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum StatusLevel {
    One = 1,
    Two = 2,
    Three = 3,
    Four = 4,
    Five = 5,
}

impl StatusLevel {
    pub const MIN: StatusLevel = StatusLevel::One;
    pub const MAX: StatusLevel = StatusLevel::Five;

    /// Number of levels every band table must define
    pub const COUNT: usize = 5;

    pub fn value(&self) -> u8 {
        *self as u8
    }

    /// Level for a zero-based band position
    pub(crate) fn from_band(index: usize) -> Option<Self> {
        u8::try_from(index + 1)
            .ok()
            .and_then(|n| StatusLevel::try_from(n).ok())
    }

    /// Zero-based band position of this level
    pub(crate) fn band(&self) -> usize {
        (self.value() - 1) as usize
    }

    /// The level above this one, if any
    pub fn next(&self) -> Option<Self> {
        StatusLevel::try_from(self.value() + 1).ok()
    }

    pub fn is_max(&self) -> bool {
        *self == StatusLevel::MAX
    }
}

impl From<StatusLevel> for u8 {
    fn from(level: StatusLevel) -> Self {
        level.value()
    }
}

impl TryFrom<u8> for StatusLevel {
    type Error = String;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        match value {
            1 => Ok(StatusLevel::One),
            2 => Ok(StatusLevel::Two),
            3 => Ok(StatusLevel::Three),
            4 => Ok(StatusLevel::Four),
            5 => Ok(StatusLevel::Five),
            _ => Err(format!("Status level out of range: {}", value)),
        }
    }
}

impl fmt::Display for StatusLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

impl FromStr for StatusLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let n: u8 = s
            .trim()
            .parse()
            .map_err(|_| format!("Invalid status level: {}", s))?;
        StatusLevel::try_from(n)
    }
}

/// Severity of a contextual alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertSeverity {
    Low,
    Medium,
    High,
}

impl AlertSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertSeverity::Low => "low",
            AlertSeverity::Medium => "medium",
            AlertSeverity::High => "high",
        }
    }
}

impl fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classified status for one dimension
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionStatus {
    pub dimension: Dimension,
    pub level: StatusLevel,
    pub title: String,
    /// The score this status was classified from
    pub score: f64,
}

/// Status computed over the weighted aggregate of all dimension scores
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallStatus {
    pub level: StatusLevel,
    pub title: String,
    /// Aggregate score in [0, 100], rounded to one decimal
    pub score: f64,
}

/// Alert produced by a rule family whose signal crossed a threshold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextualAlert {
    /// Rule family that fired (e.g. "spending")
    pub family: String,
    pub severity: AlertSeverity,
    pub message: String,
}

/// Complete output of one evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusBundle {
    /// One status per dimension, in `Dimension::all()` order
    pub dimensions: Vec<DimensionStatus>,
    pub overall: OverallStatus,
    /// Suggestions for weak dimensions, worst first
    pub improvement_areas: Vec<String>,
    /// Next-level descriptions for dimensions below the top level, worst first
    pub milestones: Vec<String>,
    /// Alert messages in rule family order
    pub alerts: Vec<String>,
}

impl StatusBundle {
    /// Status for a single dimension
    pub fn dimension(&self, dimension: Dimension) -> Option<&DimensionStatus> {
        self.dimensions.iter().find(|s| s.dimension == dimension)
    }

    /// Levels in dimension order
    pub fn levels(&self) -> Vec<StatusLevel> {
        self.dimensions.iter().map(|s| s.level).collect()
    }
}

/// The five raw dimension scores supplied by the metrics provider
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub savings: f64,
    pub income: f64,
    pub goals: f64,
    pub literacy: f64,
    pub behavior: f64,
}

impl Metrics {
    pub fn new(savings: f64, income: f64, goals: f64, literacy: f64, behavior: f64) -> Self {
        Self {
            savings,
            income,
            goals,
            literacy,
            behavior,
        }
    }

    pub fn get(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::Savings => self.savings,
            Dimension::Income => self.income,
            Dimension::Goals => self.goals,
            Dimension::Literacy => self.literacy,
            Dimension::Behavior => self.behavior,
        }
    }

    pub fn set(&mut self, dimension: Dimension, score: f64) {
        match dimension {
            Dimension::Savings => self.savings = score,
            Dimension::Income => self.income = score,
            Dimension::Goals => self.goals = score,
            Dimension::Literacy => self.literacy = score,
            Dimension::Behavior => self.behavior = score,
        }
    }

    /// Reject the first score that is not a finite number in [0, 100]
    pub fn validate(&self) -> Result<()> {
        for &dimension in Dimension::all() {
            validate_score(dimension.as_str(), self.get(dimension))?;
        }
        Ok(())
    }

    /// Decode metrics from a JSON object keyed by dimension name
    ///
    /// Every dimension must be present and numeric; other keys are ignored.
    pub fn from_json(value: &serde_json::Value) -> Result<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| Error::invalid_score("metrics", "expected an object of scores"))?;

        let mut metrics = Metrics::new(0.0, 0.0, 0.0, 0.0, 0.0);
        for &dimension in Dimension::all() {
            let score = match object.get(dimension.as_str()) {
                Some(v) => v
                    .as_f64()
                    .ok_or_else(|| Error::invalid_score(dimension.as_str(), "not a number"))?,
                None => return Err(Error::invalid_score(dimension.as_str(), "missing")),
            };
            metrics.set(dimension, score);
        }

        metrics.validate()?;
        Ok(metrics)
    }
}

/// Check a single score against [0, 100]
pub(crate) fn validate_score(dimension: &str, score: f64) -> Result<f64> {
    if !score.is_finite() {
        return Err(Error::invalid_score(dimension, "not a finite number"));
    }
    if !(0.0..=100.0).contains(&score) {
        return Err(Error::invalid_score(
            dimension,
            format!("{} is outside [0, 100]", score),
        ));
    }
    Ok(score)
}

/// Flat map of behavioral signals (flagged spending, self-reported stress, ...)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Profile {
    signals: BTreeMap<String, serde_json::Value>,
}

impl Profile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a profile from a JSON object
    ///
    /// Anything other than an object yields an empty profile, since alerts
    /// are advisory and must not block an evaluation.
    pub fn from_json(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Object(map) => Self {
                signals: map.into_iter().collect(),
            },
            serde_json::Value::Null => Self::default(),
            other => {
                tracing::warn!(kind = json_kind(&other), "Ignoring profile that is not an object");
                Self::default()
            }
        }
    }

    /// Add or replace a signal
    pub fn with_signal(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) {
        self.signals.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.signals.get(key)
    }

    pub fn len(&self) -> usize {
        self.signals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
