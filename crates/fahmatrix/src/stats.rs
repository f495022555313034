use statrs::statistics::Statistics;

use crate::math::Matrix;

/// Descriptive statistics of one matrix column. NaN entries are ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSummary {
    pub column: usize,
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub sum: f64,
    pub mean: f64,
    /// Population standard deviation.
    pub std: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
}

/// Summarize every column of `m`.
///
/// Columns containing only NaN report `count == 0` and NaN statistics.
pub fn describe(m: &Matrix) -> Vec<ColumnSummary> {
    (0..m.ncols())
        .map(|col| {
            let mut values: Vec<f64> = (0..m.nrows())
                .map(|row| m[(row, col)])
                .filter(|v| !v.is_nan())
                .collect();
            values.sort_unstable_by(|a, b| a.total_cmp(b));
            summarize(col, &values)
        })
        .collect()
}

fn summarize(column: usize, sorted: &[f64]) -> ColumnSummary {
    let quantile = |p: f64| sorted_percentile(sorted, p).unwrap_or(f64::NAN);
    ColumnSummary {
        column,
        count: sorted.len(),
        min: Statistics::min(sorted.iter()),
        max: Statistics::max(sorted.iter()),
        sum: sorted.iter().sum(),
        mean: sorted.iter().mean(),
        std: sorted.iter().population_std_dev(),
        p25: quantile(25.0),
        p50: quantile(50.0),
        p75: quantile(75.0),
    }
}

/// Percentile `p` in `[0, 100]` of `values` using linear interpolation between
/// closest ranks (`pos = p * (n - 1) / 100`).
///
/// Returns `None` for an empty slice or `p` outside `[0, 100]`.
pub fn percentile(values: &[f64], p: f64) -> Option<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_unstable_by(|a, b| a.total_cmp(b));
    sorted_percentile(&sorted, p)
}

fn sorted_percentile(sorted: &[f64], p: f64) -> Option<f64> {
    if sorted.is_empty() || !(0.0..=100.0).contains(&p) {
        return None;
    }
    let pos = p * (sorted.len() - 1) as f64 / 100.0;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    if lower == upper {
        return Some(sorted[lower]);
    }
    Some(sorted[lower] + (pos - lower as f64) * (sorted[upper] - sorted[lower]))
}

/// Render summaries as a text table, one column per matrix column.
pub fn format_summary(summaries: &[ColumnSummary], precision: usize) -> String {
    let rows: [(&str, fn(&ColumnSummary) -> f64); 9] = [
        ("count", |s| s.count as f64),
        ("min", |s| s.min),
        ("max", |s| s.max),
        ("sum", |s| s.sum),
        ("mean", |s| s.mean),
        ("std", |s| s.std),
        ("25%", |s| s.p25),
        ("50%", |s| s.p50),
        ("75%", |s| s.p75),
    ];

    let mut out = format!("{:<6}", "");
    for s in summaries {
        out.push_str(&format!(" | {:>12}", s.column));
    }
    out.push('\n');
    for (label, value) in rows.iter() {
        out.push_str(&format!("{:<6}", label));
        for s in summaries {
            if *label == "count" {
                out.push_str(&format!(" | {:>12}", s.count));
            } else {
                out.push_str(&format!(" | {:>12.*}", precision, value(s)));
            }
        }
        out.push('\n');
    }
    out
}
