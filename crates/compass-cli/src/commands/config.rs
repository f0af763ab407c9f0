//! Configuration commands (path, show, check)

use std::path::Path;

use anyhow::{Context, Result};
use compass_core::{default_config_path, StatusConfig};

pub fn cmd_config_path() -> Result<()> {
    match default_config_path() {
        Some(path) => {
            let state = if path.exists() { "exists" } else { "not present" };
            println!("{} ({})", path.display(), state);
        }
        None => println!("No data directory available; using built-in tables"),
    }
    Ok(())
}

pub fn cmd_config_show(config: Option<&Path>) -> Result<()> {
    let config = StatusConfig::load(config).context("Failed to load status config")?;
    print!("{}", config.to_toml()?);
    Ok(())
}

pub fn cmd_config_check(file: &Path) -> Result<()> {
    let config = StatusConfig::from_file(file)
        .with_context(|| format!("Invalid status config {}", file.display()))?;
    println!(
        "✓ {} is valid ({} dimensions, {} alert families)",
        file.display(),
        config.dimensions.len(),
        config.alerts.len()
    );
    Ok(())
}
