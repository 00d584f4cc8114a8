use crate::series::Series;
use crate::style::arg_max;
use serde::{Deserialize, Serialize};

/// Summary statistics for one chart series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeriesSummary {
    pub count: usize,
    pub total: f64,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    /// Label of the first entry achieving the maximum.
    pub peak_label: String,
}

/// Compute summary statistics for a normalized series. Returns `None` for
/// an empty series.
pub fn summarize(series: &Series) -> Option<SeriesSummary> {
    if series.is_empty() {
        return None;
    }

    let mut vals: Vec<f64> = series.values().to_vec();
    vals.sort_by(|a, b| a.total_cmp(b));
    let count = vals.len();
    let min = vals[0];
    let max = vals[count - 1];
    let total: f64 = vals.iter().sum();
    let mean = total / count as f64;
    let median = if count % 2 == 1 {
        vals[count / 2]
    } else {
        (vals[count / 2 - 1] + vals[count / 2]) / 2.0
    };

    let peak_label = arg_max(series.values())
        .map(|i| series.labels()[i].clone())
        .unwrap_or_default();

    Some(SeriesSummary {
        count,
        total,
        min,
        max,
        mean,
        median,
        peak_label,
    })
}
