//! Small pure helpers for axis scaling and label display.

/// Compute the shared value-axis ceiling for series displayed under toggled
/// views of one chart.
///
/// Takes the maximum within each candidate series (an empty series counts as
/// 0), the maximum across candidates, adds a 10% margin, and rounds up to a
/// whole number. The returned bound is ≥ every value that will ever be
/// plotted under any toggle state, so switching views never causes an axis
/// jump. Recompute whenever the underlying dataset changes.
pub fn shared_axis_bound(candidates: &[&[f64]]) -> f64 {
    let max = candidates
        .iter()
        .map(|series| series.iter().copied().fold(0.0_f64, f64::max))
        .fold(0.0_f64, f64::max);
    (max * 1.1).ceil()
}

/// Ellipsize a label for axis display. Character-based, keeping
/// `max_chars - 3` characters plus `"..."` when over the limit.
pub fn truncate_label(label: &str, max_chars: usize) -> String {
    let count = label.chars().count();
    if count <= max_chars {
        return label.to_string();
    }
    let keep = max_chars.saturating_sub(3);
    let mut out: String = label.chars().take(keep).collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bound_covers_all_candidates() {
        let bound = shared_axis_bound(&[&[10.0, 20.0, 5.0], &[0.0, 0.0, 0.0], &[30.0]]);
        assert_eq!(bound, 33.0);
    }

    #[test]
    fn empty_candidates_give_zero() {
        assert_eq!(shared_axis_bound(&[]), 0.0);
        assert_eq!(shared_axis_bound(&[&[]]), 0.0);
    }

    #[test]
    fn negative_only_series_clamp_to_zero() {
        assert_eq!(shared_axis_bound(&[&[-5.0, -1.0]]), 0.0);
    }

    #[test]
    fn long_labels_are_ellipsized() {
        let name = "a".repeat(60);
        let shown = truncate_label(&name, 50);
        assert_eq!(shown.chars().count(), 50);
        assert!(shown.ends_with("..."));
        assert_eq!(truncate_label("short", 50), "short");
    }
}
