//! Contextual Rule Engine
//!
//! Reads profile signals (flagged spending, self-reported stress, ...) and
//! produces at most one advisory alert per rule family. Rules inside a family
//! are checked from the highest threshold down and the first match wins, so a
//! flagged spend of 400 is reported as high severity and never also as low.

use serde_json::Value;

use crate::config::AlertFamilyConfig;

use super::types::{ContextualAlert, Profile};

/// Why a family produced no alert even though it was evaluated
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum SkipReason {
    /// The profile does not carry the family's signal
    MissingSignal,
    /// The signal is present but not readable as a number
    NotNumeric(String),
}

/// Result of evaluating one rule family
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum FamilyOutcome {
    Fired(ContextualAlert),
    /// Signal read fine but stayed below every threshold
    Quiet,
    /// The family could not evaluate its signal
    Skipped(SkipReason),
}

/// Ordered set of rule families
#[derive(Debug, Clone)]
pub(crate) struct RuleEngine {
    families: Vec<AlertFamilyConfig>,
}

impl RuleEngine {
    pub fn new(families: Vec<AlertFamilyConfig>) -> Self {
        Self { families }
    }

    /// Evaluate every family in declaration order
    pub fn evaluate(&self, profile: &Profile) -> Vec<(&str, FamilyOutcome)> {
        self.families
            .iter()
            .map(|family| (family.name.as_str(), evaluate_family(family, profile)))
            .collect()
    }

    /// Alerts that fired, in family order
    pub fn alerts(&self, profile: &Profile) -> Vec<ContextualAlert> {
        let mut alerts = Vec::new();

        for (family, outcome) in self.evaluate(profile) {
            match outcome {
                FamilyOutcome::Fired(alert) => alerts.push(alert),
                FamilyOutcome::Quiet => {}
                FamilyOutcome::Skipped(SkipReason::MissingSignal) => {
                    tracing::trace!(family, "Alert family has no signal");
                }
                FamilyOutcome::Skipped(SkipReason::NotNumeric(kind)) => {
                    tracing::debug!(family, value = %kind, "Alert evaluation skipped");
                }
            }
        }

        alerts
    }
}

fn evaluate_family(family: &AlertFamilyConfig, profile: &Profile) -> FamilyOutcome {
    let raw = match profile.get(&family.signal) {
        Some(raw) => raw,
        None => return FamilyOutcome::Skipped(SkipReason::MissingSignal),
    };

    let value = match signal_value(raw) {
        Some(value) => value,
        None => return FamilyOutcome::Skipped(SkipReason::NotNumeric(raw.to_string())),
    };

    family
        .rules
        .iter()
        .find(|rule| value >= rule.at_least)
        .map(|rule| {
            FamilyOutcome::Fired(ContextualAlert {
                family: family.name.clone(),
                severity: rule.severity,
                message: rule.message.clone(),
            })
        })
        .unwrap_or(FamilyOutcome::Quiet)
}

/// Numbers and numeric strings count as signal values
fn signal_value(raw: &Value) -> Option<f64> {
    let value = match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    value.is_finite().then_some(value)
}
