//! Settings for the `fahmatrix` binary.
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use fahmatrix::config::EngineConfig;
use fahmatrix::helpers::FormatOptions;
use fahmatrix::math::DEFAULT_TOLERANCE;

/// Parameters shared by every subcommand. Command line flags override the
/// values loaded from `--config`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Relative pivot tolerance; must be positive and finite.
    pub tolerance: f64,
    pub precision: usize,
    /// Leading and trailing rows/columns printed before eliding; `null` prints
    /// everything.
    pub edge_items: Option<usize>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            precision: 4,
            edge_items: Some(5),
        }
    }
}

impl CliConfig {
    pub fn engine(&self) -> EngineConfig {
        EngineConfig {
            tolerance: self.tolerance,
            ..EngineConfig::default()
        }
    }

    pub fn format_options(&self) -> FormatOptions {
        FormatOptions {
            precision: self.precision,
            edge_items: self.edge_items,
        }
    }
}

/// Load a CLI configuration from a JSON file.
pub fn load_cli_config<P: AsRef<Path>>(path: P) -> Result<CliConfig> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config: {}", path.as_ref().display()))?;
    let config: CliConfig = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config: {}", path.as_ref().display()))?;
    Ok(config)
}
