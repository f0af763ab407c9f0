//! Loading metrics and profile documents from disk
//!
//! Documents are JSON unless the file extension says YAML (`.yaml`/`.yml`).
//! Both decode into a `serde_json::Value` so the rest of the crate only deals
//! with one representation.

use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::status::{Metrics, Profile};

/// Input document format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Pick the format from a file extension
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("yaml") | Some("yml") => DocumentFormat::Yaml,
            _ => DocumentFormat::Json,
        }
    }
}

/// Parse a document string in the given format
pub fn parse_document(content: &str, format: DocumentFormat) -> Result<serde_json::Value> {
    match format {
        DocumentFormat::Json => Ok(serde_json::from_str(content)?),
        DocumentFormat::Yaml => {
            let value: serde_yaml::Value = serde_yaml::from_str(content)?;
            Ok(serde_json::to_value(value)?)
        }
    }
}

/// Read and parse a JSON or YAML document
pub fn read_document(path: &Path) -> Result<serde_json::Value> {
    let content = fs::read_to_string(path)?;
    parse_document(&content, DocumentFormat::from_path(path))
}

/// Read metrics from a document keyed by dimension name
pub fn read_metrics(path: &Path) -> Result<Metrics> {
    Metrics::from_json(&read_document(path)?)
}

/// Read a profile signal map
pub fn read_profile(path: &Path) -> Result<Profile> {
    Ok(Profile::from_json(read_document(path)?))
}
