//! Band table display

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use compass_core::{Dimension, StatusConfig};

pub fn cmd_levels(config: Option<&Path>, dimension: Option<&str>) -> Result<()> {
    let config = StatusConfig::load(config).context("Failed to load status config")?;
    print!("{}", render_levels(&config, dimension)?);
    Ok(())
}

/// Band tables for one or all dimensions, plus the overall table when
/// showing everything
pub fn render_levels(config: &StatusConfig, dimension: Option<&str>) -> Result<String> {
    let dimensions: Vec<Dimension> = match dimension {
        Some(name) => vec![name.parse::<Dimension>().map_err(|e| anyhow!(e))?],
        None => Dimension::all().to_vec(),
    };

    let mut out = String::new();
    for dimension in dimensions {
        let table = config
            .dimension(dimension)
            .with_context(|| format!("No table for {}", dimension))?;

        out.push('\n');
        out.push_str(&format!("📏 {}\n", dimension.label()));
        for (band, level) in table.levels.iter().enumerate() {
            out.push_str(&format!(
                "   L{}  ≥{:>5.1}  {}\n",
                band + 1,
                level.min_score,
                level.title
            ));
        }
    }

    if dimension.is_none() {
        out.push('\n');
        out.push_str("📏 Overall\n");
        for (band, level) in config.overall.levels.iter().enumerate() {
            out.push_str(&format!(
                "   L{}  ≥{:>5.1}  {}\n",
                band + 1,
                level.min_score,
                level.title
            ));
        }
    }

    Ok(out)
}
