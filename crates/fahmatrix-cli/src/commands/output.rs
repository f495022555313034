use std::path::Path;

use anyhow::{Context, Result};

use fahmatrix::helpers::format_matrix;
use fahmatrix::io::{write_matrix, MatrixFormat};
use fahmatrix::stats::format_summary;

use super::CommandOutput;
use crate::config::CliConfig;

/// Text shown on stdout for `output`.
pub fn render(output: &CommandOutput, config: &CliConfig) -> String {
    match output {
        CommandOutput::Matrix(m) => format_matrix(m, &config.format_options()),
        CommandOutput::Scalar(v) => format!("{:.*}", config.precision, v),
        CommandOutput::Count(n) => n.to_string(),
        CommandOutput::Summary(s) => format_summary(s, config.precision).trim_end().to_string(),
    }
}

/// Write `output` to `path`. Matrices go through the format adapters
/// (`format`, or the extension of `path`); everything else is written as the
/// rendered text.
pub fn write_output<P: AsRef<Path>>(
    output: &CommandOutput,
    path: P,
    format: Option<&MatrixFormat>,
    config: &CliConfig,
) -> Result<()> {
    let path = path.as_ref();
    match output {
        CommandOutput::Matrix(m) => {
            let format = match format {
                Some(format) => format.clone(),
                None => MatrixFormat::from_path(path)?,
            };
            write_matrix(path, m, &format)?;
        }
        other => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
            }
            std::fs::write(path, format!("{}\n", render(other, config)))
                .with_context(|| format!("Failed to write output: {}", path.display()))?;
        }
    }
    log::info!("[fahmatrix] Wrote result to {}", path.display());
    Ok(())
}
