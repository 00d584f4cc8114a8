//! Deterministic color assignment for chart segments.
//!
//! Every segment of a series gets one of three visual categories: two
//! alternating base categories that keep adjacent bars distinguishable, and
//! an emphasized category for the maximum value. The assignment is a pure
//! function of the values; identical inputs always produce identical output.

/// RGBA color handed to the rendering sink.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// CSS `rgba(r, g, b, a)` string with alpha in 0..1.
    pub fn css(&self) -> String {
        format!(
            "rgba({}, {}, {}, {:.2})",
            self.r,
            self.g,
            self.b,
            self.a as f64 / 255.0
        )
    }

    pub fn hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Dashboard palette, darkest to lightest.
/// Yale Blue, Air Force Blue, Cambridge Blue, Cambridge Green, Mindaro.
pub const DASHBOARD_PALETTE: [Rgba; 5] = [
    Rgba { r: 27, g: 64, b: 121, a: 255 },   // #1B4079
    Rgba { r: 77, g: 124, b: 138, a: 255 },  // #4D7C8A
    Rgba { r: 127, g: 156, b: 150, a: 255 }, // #7F9C96
    Rgba { r: 143, g: 173, b: 136, a: 255 }, // #8FAD88
    Rgba { r: 203, g: 223, b: 144, a: 255 }, // #CBDF90
];

/// Pick a palette color, cycling past the end.
#[inline]
pub fn palette_color(idx: usize) -> Rgba {
    DASHBOARD_PALETTE[idx % DASHBOARD_PALETTE.len()]
}

/// Visual category of one segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentClass {
    /// Even-index base category.
    Primary,
    /// Odd-index base category.
    Secondary,
    /// The maximum value of the series.
    Emphasized,
}

/// Whether max-value highlighting is active, and which color theme applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmphasisMode {
    /// No segment is emphasized; segments only alternate base categories.
    Off,
    /// Blue-leaning theme (default).
    #[default]
    Slate,
    /// Green-leaning theme.
    Moss,
}

impl EmphasisMode {
    /// Fill color for a segment class under this theme. `Off` falls back to
    /// the Slate base colors; its `Emphasized` arm is unreachable in
    /// practice since [`assign_emphasis`] never emits it when disabled.
    pub fn fill(&self, class: SegmentClass) -> Rgba {
        let alpha = 178; // ~0.7, matching the dashboard's translucent fills
        let base = match (self, class) {
            (EmphasisMode::Moss, SegmentClass::Primary) => DASHBOARD_PALETTE[3],
            (EmphasisMode::Moss, SegmentClass::Secondary) => DASHBOARD_PALETTE[4],
            (_, SegmentClass::Primary) => DASHBOARD_PALETTE[1],
            (_, SegmentClass::Secondary) => DASHBOARD_PALETTE[2],
            (_, SegmentClass::Emphasized) => DASHBOARD_PALETTE[0],
        };
        Rgba::new(base.r, base.g, base.b, alpha)
    }

    /// Border color: the opaque variant of the fill.
    pub fn border(&self, class: SegmentClass) -> Rgba {
        let fill = self.fill(class);
        Rgba::rgb(fill.r, fill.g, fill.b)
    }
}

/// Index of the first maximum value, skipping non-finite entries.
pub fn arg_max(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in values.iter().enumerate() {
        if !v.is_finite() {
            continue;
        }
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

/// Assign a visual category to every index of `values`.
///
/// The first index achieving the maximum is `Emphasized` (unless the mode is
/// `Off` or the input is empty); all other indices alternate
/// `Primary`/`Secondary` by parity so adjacent segments stay visually
/// separated.
pub fn assign_emphasis(values: &[f64], mode: EmphasisMode) -> Vec<SegmentClass> {
    let peak = match mode {
        EmphasisMode::Off => None,
        _ => arg_max(values),
    };
    values
        .iter()
        .enumerate()
        .map(|(i, _)| match peak {
            Some(p) if p == i => SegmentClass::Emphasized,
            _ if i % 2 == 0 => SegmentClass::Primary,
            _ => SegmentClass::Secondary,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_max_wins_ties() {
        let classes = assign_emphasis(&[4.0, 9.0, 2.0, 9.0], EmphasisMode::Slate);
        assert_eq!(
            classes,
            vec![
                SegmentClass::Primary,
                SegmentClass::Emphasized,
                SegmentClass::Primary,
                SegmentClass::Secondary,
            ]
        );
    }

    #[test]
    fn off_mode_never_emphasizes() {
        let classes = assign_emphasis(&[1.0, 5.0, 3.0], EmphasisMode::Off);
        assert!(!classes.contains(&SegmentClass::Emphasized));
        assert_eq!(classes[0], SegmentClass::Primary);
        assert_eq!(classes[1], SegmentClass::Secondary);
    }

    #[test]
    fn empty_input_yields_empty_assignment() {
        assert!(assign_emphasis(&[], EmphasisMode::Slate).is_empty());
    }

    #[test]
    fn assignment_is_deterministic() {
        let values = [3.0, 7.0, 7.0, 1.0];
        let a = assign_emphasis(&values, EmphasisMode::Moss);
        let b = assign_emphasis(&values, EmphasisMode::Moss);
        assert_eq!(a, b);
    }

    #[test]
    fn color_strings_are_css_compatible() {
        let c = DASHBOARD_PALETTE[0];
        assert_eq!(c.hex(), "#1B4079");
        assert_eq!(Rgba::new(27, 64, 121, 255).css(), "rgba(27, 64, 121, 1.00)");
    }
}
