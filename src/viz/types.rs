//! Public types and constants for the visualization module.

/// Chart kinds produced by the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    /// Vertical bars (default).
    Bar,
    /// Horizontal bars, for long category labels.
    HorizontalBar,
    /// Pie with a right-hand legend.
    Pie,
    /// Line with filled area, for time series.
    Line,
}

/// Which series of a split payload is currently displayed.
///
/// Toggling between the two must never rescale the value axis; the panel
/// computes one shared ceiling across both series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaseloadToggle {
    #[default]
    Open,
    Closed,
}

/// Per-case detail fields a tooltip may include, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TooltipField {
    Duration,
    Title,
    Docket,
    Court,
    Stage,
    OpenedOn,
    LastActivityOn,
}

/// Field list used by the outlier charts: everything, duration first.
pub const FULL_TOOLTIP: [TooltipField; 7] = [
    TooltipField::Duration,
    TooltipField::Title,
    TooltipField::Docket,
    TooltipField::Court,
    TooltipField::Stage,
    TooltipField::OpenedOn,
    TooltipField::LastActivityOn,
];

/// Longest label shown on an axis before ellipsizing.
pub const MAX_AXIS_LABEL_CHARS: usize = 50;
