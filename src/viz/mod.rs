//! Visualization panel: composes fetch state, normalization, scaling,
//! emphasis, and option merging into one renderable chart description.
//!
//! One parameterized [`PanelSpec`] drives every chart on the dashboard
//! instead of a near-duplicate component per visualization. The panel owns
//! no state; it maps the current [`FetchState`] plus a payload to a
//! [`PanelView`], and the `(series, config)` pair inside
//! [`PanelView::Chart`] is handed to the external rendering sink as-is.

pub mod options;
pub mod types;
pub mod util;

pub use options::ChartConfig;
pub use types::{CaseloadToggle, ChartKind, FULL_TOOLTIP, MAX_AXIS_LABEL_CHARS, TooltipField};

use serde::Serialize;
use serde_json::Value;

use crate::fetch::FetchState;
use crate::models::{
    CaseDuration, CaseStageBreakdown, CasesPerYear, JudgeDelays, LabeledSeries,
    ProsecutorCaseloads,
};
use crate::series::{NormalizePolicy, Series, normalize};
use crate::style::{EmphasisMode, assign_emphasis, palette_color};
use util::{shared_axis_bound, truncate_label};

/// Seam between payload models and the panel: anything exposing one
/// label/value series can be charted.
pub trait ChartSource {
    fn labels(&self) -> &[String];
    fn values(&self) -> &[f64];
}

impl ChartSource for LabeledSeries {
    fn labels(&self) -> &[String] {
        &self.labels
    }
    fn values(&self) -> &[f64] {
        &self.values
    }
}

impl ChartSource for CaseStageBreakdown {
    fn labels(&self) -> &[String] {
        &self.labels
    }
    fn values(&self) -> &[f64] {
        &self.values
    }
}

impl ChartSource for JudgeDelays {
    fn labels(&self) -> &[String] {
        &self.labels
    }
    fn values(&self) -> &[f64] {
        &self.values
    }
}

impl ChartSource for CasesPerYear {
    fn labels(&self) -> &[String] {
        &self.labels
    }
    fn values(&self) -> &[f64] {
        &self.values
    }
}

/// Payloads carrying an open/closed pair of series under one axis.
pub trait SplitSource {
    fn labels(&self) -> &[String];
    fn open_values(&self) -> &[f64];
    fn closed_values(&self) -> &[f64];
}

impl SplitSource for ProsecutorCaseloads {
    fn labels(&self) -> &[String] {
        &self.labels
    }
    fn open_values(&self) -> &[f64] {
        &self.open
    }
    fn closed_values(&self) -> &[f64] {
        &self.closed
    }
}

impl SplitSource for CasesPerYear {
    fn labels(&self) -> &[String] {
        &self.labels
    }
    fn open_values(&self) -> &[f64] {
        &self.opened
    }
    fn closed_values(&self) -> &[f64] {
        &self.closed
    }
}

/// How segment colors are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coloring {
    /// Max-value emphasis with parity alternation (bars, lines).
    Emphasis(EmphasisMode),
    /// Cycle through the dashboard palette (pie segments).
    Cycle,
}

/// Everything the renderer needs for one chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderSpec {
    pub title: String,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub fill_colors: Vec<String>,
    pub border_colors: Vec<String>,
    pub config: ChartConfig,
}

/// What the panel shows for the current fetch state.
///
/// `Empty` means the request succeeded but no entry survived validation; it
/// is deliberately distinct from `Failed("no data available")`, where the
/// backend itself had nothing.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelView {
    Loading,
    Failed(String),
    Empty,
    Chart(RenderSpec),
}

impl PanelView {
    pub fn chart(&self) -> Option<&RenderSpec> {
        match self {
            PanelView::Chart(spec) => Some(spec),
            _ => None,
        }
    }
}

/// Small configuration record describing one chart panel.
#[derive(Debug, Clone)]
pub struct PanelSpec {
    pub kind: ChartKind,
    pub title: String,
    pub coloring: Coloring,
    pub policy: NormalizePolicy,
    /// Partial option tree composed on top of the kind's defaults.
    pub overrides: Option<Value>,
}

impl PanelSpec {
    pub fn new(kind: ChartKind, title: impl Into<String>) -> Self {
        let coloring = match kind {
            ChartKind::Pie => Coloring::Cycle,
            _ => Coloring::Emphasis(EmphasisMode::default()),
        };
        Self {
            kind,
            title: title.into(),
            coloring,
            policy: NormalizePolicy::default(),
            overrides: None,
        }
    }

    pub fn with_policy(mut self, policy: NormalizePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_coloring(mut self, coloring: Coloring) -> Self {
        self.coloring = coloring;
        self
    }

    pub fn with_overrides(mut self, overrides: Value) -> Self {
        self.overrides = Some(overrides);
        self
    }

    /// The axis carrying values for this kind.
    pub fn value_axis(&self) -> &'static str {
        match self.kind {
            ChartKind::HorizontalBar => "x",
            _ => "y",
        }
    }

    fn base_config(&self) -> ChartConfig {
        match self.kind {
            ChartKind::Bar => ChartConfig::bar_default(),
            ChartKind::HorizontalBar => ChartConfig::horizontal_bar_default(),
            ChartKind::Pie => ChartConfig::pie_default(),
            ChartKind::Line => ChartConfig::line_default(),
        }
    }

    /// Map a fetch state to a view using the payload's single series.
    pub fn view<S: ChartSource>(&self, state: &FetchState<S>) -> PanelView {
        match state {
            FetchState::Loading => PanelView::Loading,
            FetchState::Failed(err) => PanelView::Failed(err.to_string()),
            FetchState::Ready(payload) => self.compose(payload.labels(), payload.values()),
        }
    }

    /// Map a fetch state to a view for a split payload. The value axis is
    /// capped by one ceiling computed across both series, so flipping the
    /// toggle never rescales the chart.
    pub fn view_split<S: SplitSource>(
        &self,
        state: &FetchState<S>,
        toggle: CaseloadToggle,
    ) -> PanelView {
        match state {
            FetchState::Loading => PanelView::Loading,
            FetchState::Failed(err) => PanelView::Failed(err.to_string()),
            FetchState::Ready(payload) => {
                let ceiling =
                    shared_axis_bound(&[payload.open_values(), payload.closed_values()]);
                let active = match toggle {
                    CaseloadToggle::Open => payload.open_values(),
                    CaseloadToggle::Closed => payload.closed_values(),
                };
                self.compose_bounded(payload.labels(), active, Some(ceiling))
            }
        }
    }

    /// Normalize one raw series and build the renderable chart.
    pub fn compose(&self, labels: &[String], values: &[f64]) -> PanelView {
        self.compose_bounded(labels, values, None)
    }

    fn compose_bounded(
        &self,
        labels: &[String],
        values: &[f64],
        axis_ceiling: Option<f64>,
    ) -> PanelView {
        let series = normalize(labels, values, &self.policy);
        if series.is_empty() {
            return PanelView::Empty;
        }
        PanelView::Chart(self.render(series, axis_ceiling))
    }

    fn render(&self, series: Series, axis_ceiling: Option<f64>) -> RenderSpec {
        let (fill_colors, border_colors) = self.segment_colors(series.values());

        let mut config = self.base_config();
        if let Some(bound) = axis_ceiling {
            config = config.with_axis_max(self.value_axis(), bound);
        }
        if let Some(overrides) = &self.overrides {
            config = config.compose(overrides);
        }

        let (labels, values) = series.into_parts();
        let labels = labels
            .iter()
            .map(|l| truncate_label(l, MAX_AXIS_LABEL_CHARS))
            .collect();

        RenderSpec {
            title: self.title.clone(),
            labels,
            values,
            fill_colors,
            border_colors,
            config,
        }
    }

    fn segment_colors(&self, values: &[f64]) -> (Vec<String>, Vec<String>) {
        match self.coloring {
            Coloring::Emphasis(mode) => {
                let classes = assign_emphasis(values, mode);
                let fills = classes.iter().map(|c| mode.fill(*c).css()).collect();
                let borders = classes.iter().map(|c| mode.border(*c).css()).collect();
                (fills, borders)
            }
            Coloring::Cycle => {
                let fills = (0..values.len())
                    .map(|i| {
                        let c = palette_color(i);
                        crate::style::Rgba::new(c.r, c.g, c.b, 178).css()
                    })
                    .collect();
                let borders = (0..values.len()).map(|i| palette_color(i).css()).collect();
                (fills, borders)
            }
        }
    }
}

/// Labels and values for an outlier chart: case display names (ellipsized)
/// against investigation duration in days.
pub fn outlier_series(cases: &[CaseDuration]) -> (Vec<String>, Vec<f64>) {
    let labels = cases
        .iter()
        .map(|c| truncate_label(c.display_name(), MAX_AXIS_LABEL_CHARS))
        .collect();
    let values = cases.iter().map(|c| c.duration_days).collect();
    (labels, values)
}

/// Render per-case tooltip detail lines for the requested fields, skipping
/// fields the case has no data for.
pub fn tooltip_lines(case: &CaseDuration, fields: &[TooltipField]) -> Vec<String> {
    let mut lines = Vec::with_capacity(fields.len());
    for field in fields {
        let line = match field {
            TooltipField::Duration => Some(format!("Duration: {} days", fmt_days(case.duration_days))),
            TooltipField::Title => case.title.as_deref().map(|t| format!("Title: {}", t)),
            TooltipField::Docket => Some(format!("Docket: {}", case.docket)),
            TooltipField::Court => case.court.as_deref().map(|c| format!("Court: {}", c)),
            TooltipField::Stage => case.stage.as_deref().map(|s| format!("Stage: {}", s)),
            TooltipField::OpenedOn => case
                .opened_on
                .map(|d| format!("Opened: {}", d.format("%d %b %Y"))),
            TooltipField::LastActivityOn => case
                .last_activity_on
                .map(|d| format!("Last activity: {}", d.format("%d %b %Y"))),
        };
        if let Some(line) = line {
            lines.push(line);
        }
    }
    lines
}

fn fmt_days(days: f64) -> String {
    if days.fract() == 0.0 {
        format!("{}", days as i64)
    } else {
        format!("{:.1}", days)
    }
}
