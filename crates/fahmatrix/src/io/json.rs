//! JSON reader and writer.
use std::io::{Read, Write};

use anyhow::{anyhow, bail, Context, Result};
use serde_json::{Map, Value};

use crate::math::Matrix;

/// Shape of the JSON document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonLayout {
    /// Array of row arrays: `[[1, 2], [3, 4]]`.
    #[default]
    Rows,
    /// Array of objects, one per row: `[{"a": 1, "b": 2}, ...]`. Column order
    /// follows the keys of the first object.
    Records,
}

pub(crate) fn read<R: Read>(reader: R, layout: JsonLayout) -> Result<Matrix> {
    let matrix = match layout {
        JsonLayout::Rows => {
            let rows: Vec<Vec<f64>> =
                serde_json::from_reader(reader).context("Failed to parse JSON rows")?;
            Matrix::from_rows(&rows)
                .map_err(|e| anyhow!("JSON rows do not form a matrix: {}", e))?
        }
        JsonLayout::Records => {
            let records: Vec<Map<String, Value>> =
                serde_json::from_reader(reader).context("Failed to parse JSON records")?;
            records_to_matrix(&records)?
        }
    };
    super::warn_non_finite(&matrix);
    Ok(matrix)
}

fn records_to_matrix(records: &[Map<String, Value>]) -> Result<Matrix> {
    let keys: Vec<&String> = match records.first() {
        Some(first) => first.keys().collect(),
        None => bail!("No records found"),
    };

    let mut rows = Vec::with_capacity(records.len());
    for (row_idx, record) in records.iter().enumerate() {
        if record.len() != keys.len() {
            bail!(
                "Record {} has {} fields, expected {}",
                row_idx + 1,
                record.len(),
                keys.len()
            );
        }
        let mut row = Vec::with_capacity(keys.len());
        for key in &keys {
            let value = record
                .get(key.as_str())
                .ok_or_else(|| anyhow!("Record {} is missing field '{}'", row_idx + 1, key))?;
            let number = value.as_f64().ok_or_else(|| {
                anyhow!(
                    "Field '{}' of record {} is not a number: {}",
                    key,
                    row_idx + 1,
                    value
                )
            })?;
            row.push(number);
        }
        rows.push(row);
    }
    Matrix::from_rows(&rows).map_err(|e| anyhow!("JSON records do not form a matrix: {}", e))
}

pub(crate) fn write<W: Write>(matrix: &Matrix, writer: W, layout: JsonLayout) -> Result<()> {
    match layout {
        JsonLayout::Rows => {
            let rows: Vec<&[f64]> = matrix.iter_rows().collect();
            serde_json::to_writer_pretty(writer, &rows).context("Failed to write JSON rows")?;
        }
        JsonLayout::Records => {
            let names = super::column_names(matrix.ncols());
            let records: Vec<Map<String, Value>> = matrix
                .iter_rows()
                .map(|row| {
                    names
                        .iter()
                        .zip(row)
                        .map(|(name, &v)| (name.clone(), Value::from(v)))
                        .collect()
                })
                .collect();
            serde_json::to_writer_pretty(writer, &records)
                .context("Failed to write JSON records")?;
        }
    }
    Ok(())
}
