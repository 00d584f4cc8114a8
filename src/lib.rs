//! causa-rs
//!
//! A lightweight Rust library for turning judicial case analytics served by
//! a backend HTTP API into chart-ready series and presentation configs.
//! Pairs with the `causa` CLI.
//!
//! ### Features
//! - Fetch per-chart analytics payloads (case stages, judge delays, yearly
//!   intake, prosecutor caseloads, duration outliers)
//! - A fetch-state unit modeling the loading/data/error lifecycle, with
//!   stale-response discarding and dependency-keyed refetch
//! - Series normalization (drop invalid entries, optional ranking sort)
//! - Shared axis bounds across toggled views, max-value emphasis coloring
//! - Deep-merged chart option trees with pinned tick typography
//! - Save series as CSV or JSON; download the full database export
//!
//! ### Example
//! ```no_run
//! use causa_rs::{Client, FetchUnit};
//! use causa_rs::viz::{ChartKind, PanelSpec};
//!
//! let client = Client::default();
//! let mut unit = FetchUnit::new(move || client.judges_with_longest_delay(Some(10)));
//! let panel = PanelSpec::new(ChartKind::Bar, "Judges with the longest delay");
//! let view = panel.view(unit.wait());
//! # let _ = view;
//! ```

pub mod api;
pub mod fetch;
pub mod models;
pub mod series;
pub mod stats;
pub mod storage;
pub mod style;
pub mod viz;

pub use api::Client;
pub use fetch::{DepKey, FetchError, FetchState, FetchUnit};
pub use series::{NormalizePolicy, Series, normalize};
