//! Presentation-option trees and the merge that composes them.
//!
//! Options are JSON object trees in the shape the rendering sink expects.
//! Each chart kind has a fixed default instance; callers customize by
//! composing a partial override tree on top. Composition is a structural
//! deep merge (nested objects merge field by field, array and scalar leaves
//! are replaced), followed by a pinned-fields pass: tick typography is
//! re-asserted after the merge so an override can reshape axis behavior but
//! never the tick font. Neither input is ever mutated.

use serde::Serialize;
use serde_json::{Map, Value, json};

/// Tick font settings enforced on every axis after composition.
pub const PINNED_TICK_FONT_SIZE: u32 = 13;
pub const PINNED_TICK_FONT_WEIGHT: &str = "bold";

/// Tooltip background shared by the default option trees.
const TOOLTIP_BACKGROUND: &str = "rgba(27, 64, 121, 0.90)";

/// The pinned tick font, as carried by the default trees. Keeping the
/// defaults pre-pinned makes composing an empty override the identity.
fn pinned_font() -> Value {
    json!({ "size": PINNED_TICK_FONT_SIZE, "weight": PINNED_TICK_FONT_WEIGHT })
}

/// A composed presentation-option tree. Always a JSON object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ChartConfig(Value);

impl ChartConfig {
    /// Vertical bar chart: hidden legend, zero-based value axis.
    pub fn bar_default() -> Self {
        ChartConfig(json!({
            "responsive": true,
            "maintainAspectRatio": false,
            "plugins": {
                "legend": { "display": false },
                "tooltip": { "enabled": true },
            },
            "scales": {
                "y": {
                    "beginAtZero": true,
                    "ticks": { "font": pinned_font() },
                },
            },
        }))
    }

    /// Horizontal bar chart: value axis on x, dense category labels kept.
    pub fn horizontal_bar_default() -> Self {
        ChartConfig(json!({
            "indexAxis": "y",
            "responsive": true,
            "maintainAspectRatio": false,
            "plugins": {
                "legend": { "display": false },
                "tooltip": {
                    "enabled": true,
                    "backgroundColor": TOOLTIP_BACKGROUND,
                    "padding": 12,
                    "cornerRadius": 8,
                },
            },
            "scales": {
                "x": {
                    "beginAtZero": true,
                    "ticks": { "font": pinned_font() },
                },
                "y": {
                    "ticks": { "autoSkip": false, "padding": 10, "font": pinned_font() },
                },
            },
        }))
    }

    /// Pie chart: right-hand legend, styled tooltip, no axes.
    pub fn pie_default() -> Self {
        ChartConfig(json!({
            "responsive": true,
            "maintainAspectRatio": false,
            "plugins": {
                "legend": {
                    "position": "right",
                    "labels": {
                        "font": { "size": 14, "weight": "bold" },
                        "padding": 15,
                    },
                },
                "tooltip": {
                    "enabled": true,
                    "backgroundColor": TOOLTIP_BACKGROUND,
                    "titleColor": "#FFFFFF",
                    "bodyColor": "#FFFFFF",
                    "titleFont": { "size": 14, "weight": "bold" },
                    "bodyFont": { "size": 13, "weight": "normal" },
                    "padding": 12,
                    "cornerRadius": 8,
                },
            },
        }))
    }

    /// Line chart: hidden legend, zero-based value axis, soft curve.
    pub fn line_default() -> Self {
        ChartConfig(json!({
            "responsive": true,
            "maintainAspectRatio": false,
            "plugins": {
                "legend": { "display": false },
                "tooltip": { "enabled": true },
            },
            "elements": {
                "line": { "tension": 0.3 },
            },
            "scales": {
                "y": {
                    "beginAtZero": true,
                    "ticks": { "font": pinned_font() },
                },
            },
        }))
    }

    /// Merge a partial override tree onto this config.
    ///
    /// Returns a new tree; `self` and `overrides` are left untouched. Tick
    /// typography is re-asserted on every axis of the result regardless of
    /// what the override specified.
    pub fn compose(&self, overrides: &Value) -> ChartConfig {
        let mut merged = deep_merge(&self.0, overrides);
        pin_tick_typography(&mut merged);
        ChartConfig(merged)
    }

    /// Compose a `max` onto one axis, typically with a bound from
    /// [`crate::viz::util::shared_axis_bound`].
    pub fn with_axis_max(&self, axis: &str, bound: f64) -> ChartConfig {
        self.compose(&json!({ "scales": { (axis): { "max": bound } } }))
    }

    /// Look up a nested field by JSON pointer (`"/scales/y/max"`).
    pub fn get(&self, pointer: &str) -> Option<&Value> {
        self.0.pointer(pointer)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

/// Structural deep merge: objects merge recursively, everything else is
/// replaced by the overlay.
fn deep_merge(base: &Value, overlay: &Value) -> Value {
    match (base, overlay) {
        (Value::Object(base), Value::Object(overlay)) => {
            let mut merged = base.clone();
            for (key, overlay_field) in overlay {
                let field = match base.get(key) {
                    Some(base_field) => deep_merge(base_field, overlay_field),
                    None => overlay_field.clone(),
                };
                merged.insert(key.clone(), field);
            }
            Value::Object(merged)
        }
        _ => overlay.clone(),
    }
}

/// Force the pinned tick font onto every axis present in `scales`. Configs
/// without axes (pie) are left alone.
fn pin_tick_typography(config: &mut Value) {
    let Some(scales) = config.get_mut("scales").and_then(Value::as_object_mut) else {
        return;
    };
    for axis in scales.values_mut() {
        let Some(axis) = axis.as_object_mut() else {
            continue;
        };
        let ticks = axis
            .entry("ticks")
            .or_insert_with(|| Value::Object(Map::new()));
        if !ticks.is_object() {
            *ticks = Value::Object(Map::new());
        }
        let Some(ticks) = ticks.as_object_mut() else {
            continue;
        };
        let font = ticks
            .entry("font")
            .or_insert_with(|| Value::Object(Map::new()));
        if !font.is_object() {
            *font = Value::Object(Map::new());
        }
        if let Some(font) = font.as_object_mut() {
            font.insert("size".into(), json!(PINNED_TICK_FONT_SIZE));
            font.insert("weight".into(), json!(PINNED_TICK_FONT_WEIGHT));
        }
    }
}
