//! Synchronous client for the judicial-analytics backend API.
//!
//! Every chart endpoint returns a JSON envelope `{ "chart_data": ... }`
//! where `chart_data` is `null` (or absent) when the backend has nothing to
//! chart. That case is surfaced as `Ok(None)`, not as an error: "no data"
//! is a normal upstream answer, and the fetch layer turns it into its own
//! failure kind. Transport and server problems are real errors.
//!
//! Transient failures (5xx, network) are retried with a short backoff
//! before giving up.
//!
//! Typical usage:
//! ```no_run
//! # use causa_rs::Client;
//! let client = Client::default();
//! if let Some(breakdown) = client.cases_by_stage()? {
//!     println!("{} stages", breakdown.labels.len());
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

use std::sync::OnceLock;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use regex::Regex;
use reqwest::blocking::Client as HttpClient;
use reqwest::header::CONTENT_DISPOSITION;
use reqwest::redirect::Policy;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::models::{
    ArchiveDownload, CaseStageBreakdown, CasesPerYear, DurationOutliers, Envelope, JudgeDelays,
    LabeledSeries, ProsecutorCaseloads,
};

/// Fallback name when the server sends no usable `Content-Disposition`.
const DEFAULT_ARCHIVE_NAME: &str = "case_database.zip";

#[derive(Debug, Clone)]
pub struct Client {
    pub base_url: String,
    http: HttpClient,
}

impl Default for Client {
    fn default() -> Self {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30)) // total request timeout
            .connect_timeout(Duration::from_secs(10)) // connect timeout
            .redirect(Policy::limited(5)) // cap redirects
            .user_agent(concat!("causa_rs/", env!("CARGO_PKG_VERSION"))) // set user agent
            .build()
            .expect("reqwest client build");
        Self {
            base_url: "http://localhost:8000".into(),
            http,
        }
    }
}

impl Client {
    /// Client pointed at a non-default backend.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    // Small retry for transient failures (5xx / network errors).
    fn get_json(&self, url: &str) -> Result<Value> {
        let mut last_err: Option<anyhow::Error> = None;
        for backoff_ms in [100u64, 300, 700] {
            match self.http.get(url).send() {
                Ok(r) if r.status().is_success() => {
                    return r.json().context("decode json");
                }
                Ok(r) if r.status().is_server_error() => {
                    log::warn!("HTTP {} from {}, retrying", r.status(), url);
                }
                Ok(r) => bail!("request failed with HTTP {}", r.status()),
                Err(e) => last_err = Some(e.into()),
            }
            std::thread::sleep(Duration::from_millis(backoff_ms));
        }
        bail!("network error: {:?}", last_err);
    }

    fn get_chart<P: DeserializeOwned>(&self, path: &str, limit: Option<u32>) -> Result<Option<P>> {
        let mut url = format!("{}/analytics/{}", self.base_url, path);
        if let Some(limit) = limit {
            url.push_str(&format!("?limit={}", limit));
        }
        let v = self.get_json(&url).with_context(|| format!("GET {}", url))?;
        let envelope: Envelope<P> =
            serde_json::from_value(v).with_context(|| format!("parse response from {}", path))?;
        Ok(envelope.chart_data)
    }

    /// Case counts per procedural stage.
    pub fn cases_by_stage(&self) -> Result<Option<CaseStageBreakdown>> {
        self.get_chart("cases-by-stage", None)
    }

    /// Judges ranked by average resolution delay, largest first.
    pub fn judges_with_longest_delay(&self, limit: Option<u32>) -> Result<Option<JudgeDelays>> {
        self.get_chart("judges-longest-delay", limit)
    }

    /// Cases started per calendar year, split open/closed.
    pub fn cases_started_per_year(&self) -> Result<Option<CasesPerYear>> {
        self.get_chart("cases-per-year", None)
    }

    /// Open and closed caseload per prosecutor.
    pub fn prosecutor_caseloads(&self, limit: Option<u32>) -> Result<Option<ProsecutorCaseloads>> {
        self.get_chart("prosecutor-caseloads", limit)
    }

    /// People named in the most complaints.
    pub fn most_reported_people(&self, limit: Option<u32>) -> Result<Option<LabeledSeries>> {
        self.get_chart("most-reported-people", limit)
    }

    /// The longest- and shortest-running investigations.
    pub fn duration_outliers(&self, limit: Option<u32>) -> Result<Option<DurationOutliers>> {
        self.get_chart("duration-outliers", limit)
    }

    /// Download the full case database as a ZIP archive.
    ///
    /// Fire-and-forget export collaborator: independent of the chart fetch
    /// lifecycle, no retry, success/failure reported directly to the
    /// caller.
    pub fn download_database_archive(&self) -> Result<ArchiveDownload> {
        let url = format!("{}/export/database-archive", self.base_url);
        let resp = self
            .http
            .get(&url)
            .send()
            .with_context(|| format!("GET {}", url))?;
        if !resp.status().is_success() {
            bail!("request failed with HTTP {}", resp.status());
        }
        let filename = resp
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .and_then(attachment_filename)
            .unwrap_or_else(|| DEFAULT_ARCHIVE_NAME.to_string());
        let bytes = resp.bytes().context("read archive body")?.to_vec();
        Ok(ArchiveDownload { filename, bytes })
    }
}

/// Extract the filename from a `Content-Disposition` header value.
pub fn attachment_filename(header: &str) -> Option<String> {
    static FILENAME_RE: OnceLock<Regex> = OnceLock::new();
    let re = FILENAME_RE.get_or_init(|| {
        Regex::new(r#"filename="?([^";]+)"?"#).expect("filename regex")
    });
    re.captures(header)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|name| !name.is_empty())
}
