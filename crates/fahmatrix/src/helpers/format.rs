//! Text rendering of matrices.
use std::iter;

use serde::{Deserialize, Serialize};

use crate::math::Matrix;

/// Rendering knobs for [`format_matrix`].
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct FormatOptions {
    /// Digits after the decimal point.
    pub precision: usize,
    /// When set, a dimension longer than `2 * edge_items` shows only its first
    /// and last `edge_items` entries around a `...` marker.
    pub edge_items: Option<usize>,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            precision: 4,
            edge_items: Some(5),
        }
    }
}

impl FormatOptions {
    pub fn full(precision: usize) -> Self {
        Self {
            precision,
            edge_items: None,
        }
    }
}

/// Indices to render along one axis; `None` marks the elided middle.
fn visible(len: usize, edge_items: Option<usize>) -> Vec<Option<usize>> {
    match edge_items {
        Some(edge) if len > 2 * edge => (0..edge)
            .map(Some)
            .chain(iter::once(None))
            .chain((len - edge..len).map(Some))
            .collect(),
        _ => (0..len).map(Some).collect(),
    }
}

/// Renders `m` as nested brackets with right-aligned columns:
///
/// ```text
/// [[1.00, 2.00],
///  [3.00, 4.00]]
/// ```
pub fn format_matrix(m: &Matrix, options: &FormatOptions) -> String {
    let rows = visible(m.nrows(), options.edge_items);
    let cols = visible(m.ncols(), options.edge_items);

    let cells: Vec<Option<Vec<String>>> = rows
        .iter()
        .map(|row| {
            row.map(|r| {
                cols.iter()
                    .map(|col| match col {
                        Some(c) => format!("{:.*}", options.precision, m[(r, *c)]),
                        None => "...".to_string(),
                    })
                    .collect()
            })
        })
        .collect();

    let width = cells
        .iter()
        .flatten()
        .flatten()
        .map(|cell| cell.len())
        .max()
        .unwrap_or(0);

    let mut out = String::from("[");
    for (idx, row) in cells.iter().enumerate() {
        if idx > 0 {
            out.push_str(",\n ");
        }
        match row {
            Some(row) => {
                let padded: Vec<String> = row
                    .iter()
                    .map(|cell| format!("{:>width$}", cell, width = width))
                    .collect();
                out.push('[');
                out.push_str(&padded.join(", "));
                out.push(']');
            }
            None => out.push_str("..."),
        }
    }
    out.push(']');
    out
}
