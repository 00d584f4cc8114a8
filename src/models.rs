use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Response envelope shared by every analytics endpoint.
///
/// The backend signals "nothing to chart" with `"chart_data": null` (or by
/// omitting the field) instead of an HTTP error; callers receive `None` and
/// decide how to surface it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<P> {
    pub chart_data: Option<P>,
}

/// Serde helper: accept `null` entries inside a numeric array.
///
/// Upstream aggregation occasionally emits `null` where a value could not be
/// computed. Those slots are normalized to `NaN` here so the series
/// normalizer drops them instead of failing the whole payload.
fn de_values_lossy<'de, D>(deserializer: D) -> Result<Vec<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Vec<Option<f64>> = Vec::deserialize(deserializer)?;
    Ok(raw.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect())
}

/// Serde helper: accept labels as strings, numbers (years), or `null`.
///
/// `null` becomes an empty string, which the normalizer treats as invalid.
fn de_labels_lossy<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(f64),
        Null,
    }
    let raw: Vec<Raw> = Vec::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|l| match l {
            Raw::Text(s) => s,
            Raw::Number(n) if n.fract() == 0.0 => format!("{}", n as i64),
            Raw::Number(n) => n.to_string(),
            Raw::Null => String::new(),
        })
        .collect())
}

/// The plain `{labels, values}` pair used by single-series endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LabeledSeries {
    #[serde(deserialize_with = "de_labels_lossy")]
    pub labels: Vec<String>,
    #[serde(deserialize_with = "de_values_lossy")]
    pub values: Vec<f64>,
}

/// Case counts per procedural stage (pie chart payload).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseStageBreakdown {
    #[serde(deserialize_with = "de_labels_lossy")]
    pub labels: Vec<String>,
    #[serde(deserialize_with = "de_values_lossy")]
    pub values: Vec<f64>,
    #[serde(default)]
    pub percentages: Vec<f64>,
    #[serde(default)]
    pub total: u64,
}

/// Per-judge metadata accompanying the delay ranking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JudgeDelay {
    pub judge: String,
    pub court: String,
    pub avg_delay_days: f64,
    pub case_count: u64,
}

/// Judges ranked by average resolution delay (bar chart payload).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JudgeDelays {
    #[serde(deserialize_with = "de_labels_lossy")]
    pub labels: Vec<String>,
    #[serde(deserialize_with = "de_values_lossy")]
    pub values: Vec<f64>,
    #[serde(default)]
    pub judges: Vec<JudgeDelay>,
}

/// One calendar year of case intake.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YearCount {
    pub year: i32,
    pub opened: u64,
    pub closed: u64,
    pub total: u64,
}

/// Cases started per year, split into still-open and closed (line chart
/// payload; the split series share one value axis when toggled).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CasesPerYear {
    #[serde(deserialize_with = "de_labels_lossy")]
    pub labels: Vec<String>,
    #[serde(deserialize_with = "de_values_lossy")]
    pub opened: Vec<f64>,
    #[serde(deserialize_with = "de_values_lossy")]
    pub closed: Vec<f64>,
    #[serde(deserialize_with = "de_values_lossy")]
    pub values: Vec<f64>,
    #[serde(default)]
    pub years: Vec<YearCount>,
    #[serde(default)]
    pub total_open: u64,
    #[serde(default)]
    pub total_closed: u64,
    #[serde(default)]
    pub total: u64,
}

/// Per-prosecutor metadata accompanying the caseload chart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProsecutorCaseload {
    pub prosecutor: String,
    pub open: u64,
    pub closed: u64,
    pub total: u64,
}

/// Caseload per prosecutor with an open/closed toggle (bar chart payload).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProsecutorCaseloads {
    #[serde(deserialize_with = "de_labels_lossy")]
    pub labels: Vec<String>,
    #[serde(deserialize_with = "de_values_lossy")]
    pub open: Vec<f64>,
    #[serde(deserialize_with = "de_values_lossy")]
    pub closed: Vec<f64>,
    #[serde(default)]
    pub prosecutors: Vec<ProsecutorCaseload>,
    #[serde(default)]
    pub total_open: u64,
    #[serde(default)]
    pub total_closed: u64,
    #[serde(default)]
    pub total: u64,
}

/// One case with its investigation duration and tooltip metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseDuration {
    pub docket: String,
    pub title: Option<String>,
    pub court: Option<String>,
    pub stage: Option<String>,
    pub opened_on: Option<NaiveDate>,
    pub last_activity_on: Option<NaiveDate>,
    pub duration_days: f64,
}

impl CaseDuration {
    /// Display name for axis labels: case title when present, docket number
    /// otherwise.
    pub fn display_name(&self) -> &str {
        match self.title.as_deref() {
            Some(t) if !t.trim().is_empty() => t,
            _ => &self.docket,
        }
    }
}

/// The longest- and shortest-running investigations (two horizontal bar
/// charts sharing a panel).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DurationOutliers {
    #[serde(default)]
    pub longest: Vec<CaseDuration>,
    #[serde(default)]
    pub shortest: Vec<CaseDuration>,
}

/// A downloaded database export, ready to be written to disk.
#[derive(Debug, Clone)]
pub struct ArchiveDownload {
    pub filename: String,
    pub bytes: Vec<u8>,
}
