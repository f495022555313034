//! Import/export adapters between `Matrix` and external text formats.
//!
//! Every supported format is one variant of [`MatrixFormat`]; all of them go
//! through the same two entry points, [`MatrixFormat::to_matrix`] and
//! [`MatrixFormat::from_matrix`]. Importers only build matrices through the
//! checked constructors, exporters only read through row slices.
pub mod delimited;
pub mod json;

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};

use crate::math::Matrix;

pub use delimited::CsvOptions;
pub use json::JsonLayout;

/// Supported external representations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatrixFormat {
    Csv(CsvOptions),
    Json(JsonLayout),
}

impl Default for MatrixFormat {
    fn default() -> Self {
        MatrixFormat::Csv(CsvOptions::default())
    }
}

impl MatrixFormat {
    /// Tab-separated values without a header row.
    pub fn tsv() -> Self {
        MatrixFormat::Csv(CsvOptions {
            delimiter: Some(b'\t'),
            ..CsvOptions::default()
        })
    }

    /// Pick a format from the file extension (`csv`, `tsv`, `txt`, `json`).
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .ok_or_else(|| anyhow!("Cannot infer format of {}: no extension", path.display()))?;
        ext.parse::<MatrixFormat>()
            .with_context(|| format!("Cannot infer format of {}", path.display()))
    }

    pub fn to_matrix<R: Read>(&self, reader: R) -> Result<Matrix> {
        match self {
            MatrixFormat::Csv(options) => delimited::read(reader, options),
            MatrixFormat::Json(layout) => json::read(reader, *layout),
        }
    }

    pub fn from_matrix<W: Write>(&self, matrix: &Matrix, writer: W) -> Result<()> {
        match self {
            MatrixFormat::Csv(options) => delimited::write(matrix, writer, options),
            MatrixFormat::Json(layout) => json::write(matrix, writer, *layout),
        }
    }
}

impl FromStr for MatrixFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "csv" | "txt" => Ok(MatrixFormat::Csv(CsvOptions::default())),
            "tsv" => Ok(MatrixFormat::tsv()),
            "json" => Ok(MatrixFormat::Json(JsonLayout::Rows)),
            "json-records" => Ok(MatrixFormat::Json(JsonLayout::Records)),
            _ => Err(anyhow!(
                "Unknown matrix format: {}. Expected one of csv, tsv, json, json-records",
                s
            )),
        }
    }
}

/// Read a matrix from `path` in the given format.
pub fn read_matrix<P: AsRef<Path>>(path: P, format: &MatrixFormat) -> Result<Matrix> {
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open matrix file: {}", path.display()))?;
    let matrix = format
        .to_matrix(BufReader::new(file))
        .with_context(|| format!("Failed to read matrix from {}", path.display()))?;
    log::debug!("read {} matrix from {}", matrix.shape(), path.display());
    Ok(matrix)
}

/// Write `matrix` to `path`, creating parent directories as needed.
pub fn write_matrix<P: AsRef<Path>>(path: P, matrix: &Matrix, format: &MatrixFormat) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    let file = File::create(path)
        .with_context(|| format!("Failed to create matrix file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    format
        .from_matrix(matrix, &mut writer)
        .with_context(|| format!("Failed to write matrix to {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("Failed to flush {}", path.display()))?;
    log::debug!("wrote {} matrix to {}", matrix.shape(), path.display());
    Ok(())
}

/// Column names used by exporters that need them: `"0"`, `"1"`, ...
pub(crate) fn column_names(cols: usize) -> Vec<String> {
    (0..cols).map(|c| c.to_string()).collect()
}

pub(crate) fn warn_non_finite(matrix: &Matrix) {
    if !matrix.is_finite() {
        log::warn!(
            "imported {} matrix contains NaN or infinite values",
            matrix.shape()
        );
    }
}
