//! Status evaluation command

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use compass_core::input::{read_document, read_profile};
use compass_core::{Dimension, Metrics, Profile, StatusBundle, StatusEngine};

/// Per-dimension score flags; set values override the metrics file
#[derive(Debug, Default, Clone)]
pub struct ScoreFlags {
    pub savings: Option<f64>,
    pub income: Option<f64>,
    pub goals: Option<f64>,
    pub literacy: Option<f64>,
    pub behavior: Option<f64>,
}

impl ScoreFlags {
    fn get(&self, dimension: Dimension) -> Option<f64> {
        match dimension {
            Dimension::Savings => self.savings,
            Dimension::Income => self.income,
            Dimension::Goals => self.goals,
            Dimension::Literacy => self.literacy,
            Dimension::Behavior => self.behavior,
        }
    }
}

/// Everything `compass evaluate` reads
#[derive(Debug, Default, Clone)]
pub struct EvaluateInput {
    pub metrics_file: Option<PathBuf>,
    pub scores: ScoreFlags,
    pub profile_file: Option<PathBuf>,
    pub signals: Vec<String>,
}

pub fn cmd_evaluate(config: Option<&Path>, input: &EvaluateInput, json: bool) -> Result<()> {
    let engine = StatusEngine::load(config).context("Failed to load status config")?;
    let bundle = evaluate(&engine, input)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&bundle)?);
    } else {
        print!("{}", render_bundle(&bundle));
    }
    Ok(())
}

/// Resolve input and run the engine
pub fn evaluate(engine: &StatusEngine, input: &EvaluateInput) -> Result<StatusBundle> {
    let metrics = resolve_metrics(input)?;
    let profile = resolve_profile(input)?;

    tracing::debug!(signals = profile.len(), "Evaluating status");
    engine
        .evaluate(&metrics, &profile)
        .context("Status evaluation failed")
}

/// Merge the metrics file with per-dimension flags
pub fn resolve_metrics(input: &EvaluateInput) -> Result<Metrics> {
    let mut document = match &input.metrics_file {
        Some(path) => match read_document(path)
            .with_context(|| format!("Failed to read metrics from {}", path.display()))?
        {
            serde_json::Value::Object(map) => map,
            _ => bail!("Metrics file {} must contain an object", path.display()),
        },
        None => serde_json::Map::new(),
    };

    for &dimension in Dimension::all() {
        if let Some(score) = input.scores.get(dimension) {
            document.insert(dimension.as_str().to_string(), serde_json::json!(score));
        }
    }

    Ok(Metrics::from_json(&serde_json::Value::Object(document))?)
}

/// Merge the profile file with `key=value` signal flags
pub fn resolve_profile(input: &EvaluateInput) -> Result<Profile> {
    let mut profile = match &input.profile_file {
        Some(path) => read_profile(path)
            .with_context(|| format!("Failed to read profile from {}", path.display()))?,
        None => Profile::new(),
    };

    for raw in &input.signals {
        let (key, value) = parse_signal(raw)?;
        profile.insert(key, value);
    }

    Ok(profile)
}

/// Parse `key=value`; values that read as JSON (numbers, booleans) keep
/// their type, anything else is a string
pub fn parse_signal(raw: &str) -> Result<(String, serde_json::Value)> {
    let (key, value) = raw
        .split_once('=')
        .with_context(|| format!("Signal must be key=value: {}", raw))?;
    let key = key.trim();
    if key.is_empty() {
        bail!("Signal name is empty: {}", raw);
    }

    let value = value.trim();
    let parsed = serde_json::from_str(value)
        .unwrap_or_else(|_| serde_json::Value::String(value.to_string()));
    Ok((key.to_string(), parsed))
}

/// Human-readable summary of a bundle
pub fn render_bundle(bundle: &StatusBundle) -> String {
    let mut out = String::new();

    out.push('\n');
    out.push_str("🧭 Compass Status\n");
    out.push_str("   ─────────────────────────────────────────────────────────────\n");
    for status in &bundle.dimensions {
        out.push_str(&format!(
            "   {:<20} L{}  {:<24} ({:.1})\n",
            status.dimension.label(),
            status.level,
            status.title,
            status.score
        ));
    }
    out.push('\n');
    out.push_str(&format!(
        "   Overall: L{} {} (score {:.1})\n",
        bundle.overall.level, bundle.overall.title, bundle.overall.score
    ));

    if !bundle.improvement_areas.is_empty() {
        out.push('\n');
        out.push_str("   🔧 Improve\n");
        for area in &bundle.improvement_areas {
            out.push_str(&format!("      • {}\n", area));
        }
    }

    if !bundle.milestones.is_empty() {
        out.push('\n');
        out.push_str("   🎯 Next milestones\n");
        for milestone in &bundle.milestones {
            out.push_str(&format!("      • {}\n", milestone));
        }
    }

    if !bundle.alerts.is_empty() {
        out.push('\n');
        out.push_str("   ⚠️  Alerts\n");
        for alert in &bundle.alerts {
            out.push_str(&format!("      • {}\n", alert));
        }
    }

    out.push('\n');
    out
}
