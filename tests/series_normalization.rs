use causa_rs::{NormalizePolicy, Series, normalize};

fn labels(xs: &[&str]) -> Vec<String> {
    xs.iter().map(|s| s.to_string()).collect()
}

#[test]
fn invalid_entries_are_dropped() {
    let series = normalize(
        &labels(&["Juan", "", "NaN", "Ana"]),
        &[5.0, 3.0, 2.0, -1.0],
        &NormalizePolicy::positive(),
    );
    assert_eq!(series.labels(), &["Juan".to_string()]);
    assert_eq!(series.values(), &[5.0]);
}

#[test]
fn kept_entries_preserve_input_order() {
    let series = normalize(
        &labels(&["c", "a", "b"]),
        &[1.0, 3.0, 2.0],
        &NormalizePolicy::default(),
    );
    assert_eq!(series.labels(), &labels(&["c", "a", "b"])[..]);
    assert_eq!(series.values(), &[1.0, 3.0, 2.0]);
}

#[test]
fn normalization_is_idempotent() {
    let policies = [
        NormalizePolicy::default(),
        NormalizePolicy::positive(),
        NormalizePolicy::ranked(),
        NormalizePolicy {
            require_positive: false,
            sort_descending: true,
        },
    ];
    for policy in policies {
        let once = normalize(
            &labels(&["x", "NaN", "y", " ", "z"]),
            &[2.0, 9.0, f64::NAN, 4.0, 2.0],
            &policy,
        );
        let twice = once.normalized(&policy);
        assert_eq!(once, twice, "policy {:?} is not idempotent", policy);
    }
}

#[test]
fn descending_sort_is_stable_on_ties() {
    let series = normalize(
        &labels(&["first", "peak", "second"]),
        &[5.0, 9.0, 5.0],
        &NormalizePolicy {
            require_positive: false,
            sort_descending: true,
        },
    );
    assert_eq!(series.labels(), &labels(&["peak", "first", "second"])[..]);
    assert_eq!(series.values(), &[9.0, 5.0, 5.0]);
}

#[test]
fn non_finite_values_are_dropped() {
    let series = normalize(
        &labels(&["a", "b", "c", "d"]),
        &[f64::NAN, f64::INFINITY, f64::NEG_INFINITY, 1.5],
        &NormalizePolicy::default(),
    );
    assert_eq!(series.labels(), &["d".to_string()]);
    assert_eq!(series.values(), &[1.5]);
}

#[test]
fn blank_and_literal_nan_labels_are_dropped() {
    let series = normalize(
        &labels(&["", "  ", "NaN", "ok"]),
        &[1.0, 2.0, 3.0, 4.0],
        &NormalizePolicy::default(),
    );
    assert_eq!(series.labels(), &["ok".to_string()]);
}

#[test]
fn zero_is_dropped_only_under_require_positive() {
    let lenient = normalize(&labels(&["z"]), &[0.0], &NormalizePolicy::default());
    assert_eq!(lenient.len(), 1);

    let strict = normalize(&labels(&["z"]), &[0.0], &NormalizePolicy::positive());
    assert!(strict.is_empty());
}

#[test]
fn unequal_lengths_zip_to_the_shorter() {
    let series = normalize(
        &labels(&["a", "b", "c"]),
        &[1.0, 2.0],
        &NormalizePolicy::default(),
    );
    assert_eq!(series.len(), 2);
}

#[test]
fn from_parallel_rejects_mismatched_lengths() {
    assert!(Series::from_parallel(labels(&["a"]), vec![1.0, 2.0]).is_err());
    assert!(Series::from_parallel(labels(&["a"]), vec![1.0]).is_ok());
}
