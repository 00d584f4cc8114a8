//! Chart series and the validation/normalization pass applied to raw
//! label/value pairs before anything is rendered.
//!
//! Upstream aggregation is tolerated, not trusted: blank labels, the literal
//! string `"NaN"`, non-finite values, and (where a chart demands it)
//! non-positive values are all silently dropped. Dropping is a data-quality
//! policy, not an error; the panel layer shows a distinct "no valid data"
//! state when nothing survives.

use anyhow::{Result, bail};

/// Parallel label/value pairs representing one renderable dataset.
///
/// `labels.len() == values.len()` holds by construction; insertion order is
/// display order unless a sort was requested during normalization.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Series {
    labels: Vec<String>,
    values: Vec<f64>,
}

impl Series {
    /// Build a series from parallel slices of equal length.
    pub fn from_parallel(labels: Vec<String>, values: Vec<f64>) -> Result<Self> {
        if labels.len() != values.len() {
            bail!(
                "label/value length mismatch: {} labels vs {} values",
                labels.len(),
                values.len()
            );
        }
        Ok(Self { labels, values })
    }

    /// Build a series from `(label, value)` pairs.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, f64)>) -> Self {
        let (labels, values) = pairs.into_iter().unzip();
        Self { labels, values }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }

    /// Re-run a policy over this series. Normalization is idempotent: a
    /// series that already passed a policy comes back unchanged.
    pub fn normalized(&self, policy: &NormalizePolicy) -> Series {
        normalize(&self.labels, &self.values, policy)
    }

    pub fn into_parts(self) -> (Vec<String>, Vec<f64>) {
        (self.labels, self.values)
    }
}

/// Per-entry validation applied by [`normalize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NormalizePolicy {
    /// Drop entries with a value of zero or below (counts, durations).
    pub require_positive: bool,
    /// After filtering, reorder by value descending. Ties keep their prior
    /// relative order (stable sort).
    pub sort_descending: bool,
}

impl NormalizePolicy {
    pub fn positive() -> Self {
        Self {
            require_positive: true,
            sort_descending: false,
        }
    }

    pub fn ranked() -> Self {
        Self {
            require_positive: true,
            sort_descending: true,
        }
    }
}

fn entry_is_valid(label: &str, value: f64, policy: &NormalizePolicy) -> bool {
    if label.trim().is_empty() || label == "NaN" {
        return false;
    }
    if !value.is_finite() {
        return false;
    }
    if policy.require_positive && value <= 0.0 {
        return false;
    }
    true
}

/// Filter raw label/value pairs down to chartable entries.
///
/// Entries are visited in input order and kept only when the label is
/// non-blank and not the literal `"NaN"`, and the value is finite (and
/// positive under `require_positive`). Kept entries preserve their relative
/// order; `sort_descending` then applies a stable value-descending sort.
///
/// Slices of unequal length are zipped: tail entries without a counterpart
/// are ignored. Malformed entries never raise an error.
pub fn normalize(labels: &[String], values: &[f64], policy: &NormalizePolicy) -> Series {
    let mut kept: Vec<(String, f64)> = Vec::with_capacity(values.len());
    for (label, &value) in labels.iter().zip(values.iter()) {
        if entry_is_valid(label, value, policy) {
            kept.push((label.clone(), value));
        } else {
            log::debug!("dropping invalid entry: label={:?} value={}", label, value);
        }
    }

    if policy.sort_descending {
        // sort_by is stable, so equal values keep their input order.
        kept.sort_by(|a, b| b.1.total_cmp(&a.1));
    }

    Series::from_pairs(kept)
}
