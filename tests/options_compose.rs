use causa_rs::viz::ChartConfig;
use causa_rs::viz::options::{PINNED_TICK_FONT_SIZE, PINNED_TICK_FONT_WEIGHT};
use serde_json::json;

#[test]
fn composing_an_empty_override_is_identity() {
    for base in [
        ChartConfig::bar_default(),
        ChartConfig::horizontal_bar_default(),
        ChartConfig::pie_default(),
        ChartConfig::line_default(),
    ] {
        assert_eq!(base.compose(&json!({})), base);
    }
}

#[test]
fn compose_does_not_mutate_inputs() {
    let base = ChartConfig::bar_default();
    let base_before = base.clone();
    let overrides = json!({ "scales": { "y": { "max": 40 } } });
    let overrides_before = overrides.clone();

    let composed = base.compose(&overrides);

    assert_eq!(base, base_before);
    assert_eq!(overrides, overrides_before);
    assert_eq!(composed.get("/scales/y/max"), Some(&json!(40)));
}

#[test]
fn nested_objects_merge_instead_of_replacing() {
    let composed = ChartConfig::bar_default().compose(&json!({
        "plugins": { "legend": { "display": true } },
    }));
    // Customized leaf applied...
    assert_eq!(composed.get("/plugins/legend/display"), Some(&json!(true)));
    // ...while the sibling subtree from the defaults survives.
    assert_eq!(composed.get("/plugins/tooltip/enabled"), Some(&json!(true)));
    assert_eq!(composed.get("/scales/y/beginAtZero"), Some(&json!(true)));
}

#[test]
fn scalar_and_array_leaves_are_replaced_whole() {
    let base = ChartConfig::bar_default().compose(&json!({
        "events": ["click", "mousemove"],
    }));
    let composed = base.compose(&json!({ "events": ["click"] }));
    assert_eq!(composed.get("/events"), Some(&json!(["click"])));
}

#[test]
fn pinned_typography_beats_conflicting_overrides() {
    let composed = ChartConfig::horizontal_bar_default().compose(&json!({
        "scales": {
            "x": { "ticks": { "font": { "size": 22, "weight": "normal" } } },
            "y": { "ticks": { "font": { "size": 8 }, "color": "#333333" } },
        },
    }));

    for axis in ["x", "y"] {
        assert_eq!(
            composed.get(&format!("/scales/{}/ticks/font/size", axis)),
            Some(&json!(PINNED_TICK_FONT_SIZE)),
        );
        assert_eq!(
            composed.get(&format!("/scales/{}/ticks/font/weight", axis)),
            Some(&json!(PINNED_TICK_FONT_WEIGHT)),
        );
    }
    // Sibling fields in the same subtree keep the override's values.
    assert_eq!(composed.get("/scales/y/ticks/color"), Some(&json!("#333333")));
    assert_eq!(composed.get("/scales/y/ticks/autoSkip"), Some(&json!(false)));
}

#[test]
fn pinning_applies_to_axes_the_override_introduces() {
    let composed = ChartConfig::pie_default().compose(&json!({
        "scales": { "r": { "beginAtZero": true } },
    }));
    assert_eq!(
        composed.get("/scales/r/ticks/font/size"),
        Some(&json!(PINNED_TICK_FONT_SIZE)),
    );
}

#[test]
fn pie_defaults_have_no_axes_to_pin() {
    let pie = ChartConfig::pie_default();
    assert!(pie.get("/scales").is_none());
    assert_eq!(
        pie.get("/plugins/legend/position"),
        Some(&json!("right")),
    );
}

#[test]
fn axis_max_helper_caps_the_requested_axis() {
    let capped = ChartConfig::bar_default().with_axis_max("y", 33.0);
    assert_eq!(capped.get("/scales/y/max"), Some(&json!(33.0)));
    assert_eq!(capped.get("/scales/y/beginAtZero"), Some(&json!(true)));

    let horizontal = ChartConfig::horizontal_bar_default().with_axis_max("x", 120.0);
    assert_eq!(horizontal.get("/scales/x/max"), Some(&json!(120.0)));
}
