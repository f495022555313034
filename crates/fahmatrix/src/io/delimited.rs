//! CSV/TSV reader and writer.
use std::io::{Read, Write};

use anyhow::{anyhow, bail, Context, Result};
use csv::{QuoteStyle, Trim};

use crate::math::Matrix;

/// Candidate delimiters for auto-detection, in tie-breaking order.
const CANDIDATE_DELIMITERS: [u8; 6] = [b',', b'\t', b';', b'|', b'#', b':'];

/// Options for delimited text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvOptions {
    /// Field separator. `None` detects it from the first line when reading and
    /// uses `,` when writing.
    pub delimiter: Option<u8>,
    /// First line holds column names (skipped on read, `0..cols` on write).
    pub has_headers: bool,
    /// Quote every field on write instead of only when necessary.
    pub quote_all: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: None,
            has_headers: false,
            quote_all: false,
        }
    }
}

/// Most frequent candidate delimiter in `line`; `,` when none occurs.
pub fn detect_delimiter(line: &str) -> u8 {
    let mut best = (b',', 0usize);
    for &candidate in CANDIDATE_DELIMITERS.iter() {
        let count = line.bytes().filter(|&b| b == candidate).count();
        if count > best.1 {
            best = (candidate, count);
        }
    }
    best.0
}

pub(crate) fn read<R: Read>(mut reader: R, options: &CsvOptions) -> Result<Matrix> {
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .context("Failed to read delimited text")?;

    let delimiter = match options.delimiter {
        Some(d) => d,
        None => {
            let first = text.lines().find(|l| !l.trim().is_empty()).unwrap_or("");
            detect_delimiter(first)
        }
    };

    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(options.has_headers)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let mut data = Vec::new();
    let mut rows = 0usize;
    let mut cols = 0usize;
    for (row_idx, result) in csv_reader.records().enumerate() {
        let record = result.with_context(|| format!("Failed to read row {}", row_idx + 1))?;
        if rows == 0 {
            cols = record.len();
        }
        for (col_idx, field) in record.iter().enumerate() {
            let value = field.parse::<f64>().with_context(|| {
                format!(
                    "Invalid number '{}' at row {}, column {}",
                    field,
                    row_idx + 1,
                    col_idx + 1
                )
            })?;
            data.push(value);
        }
        rows += 1;
    }

    if rows == 0 {
        bail!("No data rows found");
    }
    let matrix = Matrix::from_shape_vec((rows, cols), data)
        .map_err(|e| anyhow!("Delimited data does not form a matrix: {}", e))?;
    super::warn_non_finite(&matrix);
    Ok(matrix)
}

pub(crate) fn write<W: Write>(matrix: &Matrix, writer: W, options: &CsvOptions) -> Result<()> {
    let quote_style = if options.quote_all {
        QuoteStyle::Always
    } else {
        QuoteStyle::Necessary
    };
    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(options.delimiter.unwrap_or(b','))
        .quote_style(quote_style)
        .from_writer(writer);

    if options.has_headers {
        csv_writer
            .write_record(super::column_names(matrix.ncols()))
            .context("Failed to write header row")?;
    }
    for (row_idx, row) in matrix.iter_rows().enumerate() {
        csv_writer
            .write_record(row.iter().map(|v| v.to_string()))
            .with_context(|| format!("Failed to write row {}", row_idx + 1))?;
    }
    csv_writer.flush().context("Failed to flush delimited output")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_delimiter_picks_most_frequent() {
        assert_eq!(detect_delimiter("1;2;3"), b';');
        assert_eq!(detect_delimiter("1\t2,3\t4"), b'\t');
        assert_eq!(detect_delimiter("1|2"), b'|');
        assert_eq!(detect_delimiter("42"), b',');
    }

    #[test]
    fn ties_resolve_to_earlier_candidate() {
        assert_eq!(detect_delimiter("1,2;3"), b',');
    }
}
