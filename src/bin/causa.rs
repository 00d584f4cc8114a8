use anyhow::{Result, bail};
use causa_rs::viz::{
    CaseloadToggle, ChartKind, FULL_TOOLTIP, PanelSpec, PanelView, RenderSpec, outlier_series,
    tooltip_lines,
};
use causa_rs::{Client, FetchState, FetchUnit, NormalizePolicy, Series, stats, storage};
use clap::{Args, Parser, Subcommand, ValueEnum};
use num_format::{Locale, ToFormattedString};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "causa",
    version,
    about = "Fetch, normalize & compose judicial case analytics charts"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch one chart's data (and optionally save it or emit a render spec).
    Get(GetArgs),
    /// Download the full case database archive.
    Export(ExportArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ChartName {
    /// Case counts per procedural stage (pie).
    CasesByStage,
    /// Judges ranked by average resolution delay (bar).
    JudgesDelay,
    /// Cases started per calendar year (line).
    CasesPerYear,
    /// Open/closed caseload per prosecutor (bar with toggle).
    ProsecutorCaseloads,
    /// People named in the most complaints (horizontal bar).
    MostReported,
    /// Longest-running investigations (horizontal bar with case details).
    DurationOutliers,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum OutFormat {
    Csv,
    Json,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ToggleArg {
    Open,
    Closed,
}

#[derive(Args, Debug)]
struct GetArgs {
    /// Which chart to fetch.
    #[arg(long, value_enum)]
    chart: ChartName,
    /// Limit for ranked charts (top N).
    #[arg(long)]
    limit: Option<u32>,
    /// Backend base URL.
    #[arg(long, default_value = "http://localhost:8000")]
    base_url: String,
    /// Save the normalized series to file (format inferred by --format or extension).
    #[arg(long)]
    out: Option<PathBuf>,
    /// Output format (csv or json). If omitted, inferred from --out extension.
    #[arg(long, value_enum)]
    format: Option<OutFormat>,
    /// Sort the series by value, descending.
    #[arg(long, default_value_t = false)]
    sort: bool,
    /// Drop entries with non-positive values.
    #[arg(long, default_value_t = false)]
    positive_only: bool,
    /// Print summary statistics.
    #[arg(long, default_value_t = false)]
    stats: bool,
    /// Which series of a split chart to display.
    #[arg(long, value_enum, default_value = "open")]
    toggle: ToggleArg,
    /// Write the composed render spec (series + options) as JSON.
    #[arg(long)]
    render_spec: Option<PathBuf>,
    /// Locale for grouped number output (en, es, de, fr, pt, it).
    #[arg(long, default_value = "en")]
    locale: String,
}

#[derive(Args, Debug)]
struct ExportArgs {
    /// Directory to write the archive into.
    #[arg(long, default_value = ".")]
    out: PathBuf,
    /// Backend base URL.
    #[arg(long, default_value = "http://localhost:8000")]
    base_url: String,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Get(args) => cmd_get(args),
        Command::Export(args) => cmd_export(args),
    }
}

/// Map a user-provided locale tag to a `num_format::Locale`. Defaults to
/// English.
fn map_locale(tag: &str) -> &'static Locale {
    match tag.to_lowercase().as_str() {
        "es" | "es_es" | "es_ar" => &Locale::es,
        "de" | "de_de" => &Locale::de,
        "fr" | "fr_fr" => &Locale::fr,
        "pt" | "pt_pt" | "pt_br" => &Locale::pt,
        "it" | "it_it" => &Locale::it,
        _ => &Locale::en,
    }
}

fn fmt_value(v: f64, locale: &Locale) -> String {
    if v.fract() == 0.0 && v.abs() < i64::MAX as f64 {
        (v as i64).to_formatted_string(locale)
    } else {
        format!("{:.2}", v)
    }
}

fn cmd_get(args: GetArgs) -> Result<()> {
    let policy = NormalizePolicy {
        require_positive: args.positive_only,
        sort_descending: args.sort,
    };
    let toggle = match args.toggle {
        ToggleArg::Open => CaseloadToggle::Open,
        ToggleArg::Closed => CaseloadToggle::Closed,
    };

    let (view, details) = fetch_view(&args, policy, toggle);
    let spec = match view {
        PanelView::Loading => bail!("request did not resolve"),
        PanelView::Failed(message) => bail!("{}", message),
        PanelView::Empty => {
            println!("No valid data to display.");
            return Ok(());
        }
        PanelView::Chart(spec) => spec,
    };

    let locale = map_locale(&args.locale);
    println!("{}", spec.title);
    for (label, value) in spec.labels.iter().zip(spec.values.iter()) {
        println!("  {:<52} {:>14}", label, fmt_value(*value, locale));
    }
    for line in &details {
        println!("  {}", line);
    }

    let series = Series::from_parallel(spec.labels.clone(), spec.values.clone())?;

    if args.stats
        && let Some(s) = stats::summarize(&series)
    {
        println!();
        println!("count:  {}", s.count);
        println!("total:  {}", fmt_value(s.total, locale));
        println!("min:    {}", fmt_value(s.min, locale));
        println!("max:    {} ({})", fmt_value(s.max, locale), s.peak_label);
        println!("mean:   {:.2}", s.mean);
        println!("median: {:.2}", s.median);
    }

    if let Some(out) = &args.out {
        save_series(&series, out, args.format)?;
        println!("Saved {}", out.display());
    }

    if let Some(path) = &args.render_spec {
        write_render_spec(&spec, path)?;
        println!("Render spec written to {}", path.display());
    }

    Ok(())
}

/// Fetch the requested chart and compose it into a panel view, plus any
/// per-case detail lines (outlier charts). Each arm drives a `FetchUnit`
/// end to end: Loading, then Ready or Failed.
fn fetch_view(
    args: &GetArgs,
    policy: NormalizePolicy,
    toggle: CaseloadToggle,
) -> (PanelView, Vec<String>) {
    let limit = args.limit;
    let client = Client::with_base_url(&args.base_url);
    match args.chart {
        ChartName::CasesByStage => {
            let mut unit = FetchUnit::new(move || client.cases_by_stage());
            let view = PanelSpec::new(ChartKind::Pie, "Cases by procedural stage")
                .with_policy(policy)
                .view(unit.wait());
            (view, Vec::new())
        }
        ChartName::JudgesDelay => {
            let mut unit = FetchUnit::new(move || client.judges_with_longest_delay(limit));
            let view = PanelSpec::new(ChartKind::Bar, "Judges with the longest delay")
                .with_policy(policy)
                .view(unit.wait());
            (view, Vec::new())
        }
        ChartName::CasesPerYear => {
            let mut unit = FetchUnit::new(move || client.cases_started_per_year());
            let view = PanelSpec::new(ChartKind::Line, "Cases started per year")
                .with_policy(policy)
                .view(unit.wait());
            (view, Vec::new())
        }
        ChartName::ProsecutorCaseloads => {
            let mut unit = FetchUnit::new(move || client.prosecutor_caseloads(limit));
            let title = match toggle {
                CaseloadToggle::Open => "Open cases per prosecutor",
                CaseloadToggle::Closed => "Closed cases per prosecutor",
            };
            let view = PanelSpec::new(ChartKind::Bar, title)
                .with_policy(policy)
                .view_split(unit.wait(), toggle);
            (view, Vec::new())
        }
        ChartName::MostReported => {
            let mut unit = FetchUnit::new(move || client.most_reported_people(limit));
            // Complaint counts below one are aggregation noise; always drop.
            let policy = NormalizePolicy {
                require_positive: true,
                ..policy
            };
            let view = PanelSpec::new(ChartKind::HorizontalBar, "Most reported people")
                .with_policy(policy)
                .view(unit.wait());
            (view, Vec::new())
        }
        ChartName::DurationOutliers => {
            let mut unit = FetchUnit::new(move || client.duration_outliers(limit));
            let panel = PanelSpec::new(ChartKind::HorizontalBar, "Longest-running investigations")
                .with_policy(policy);
            match unit.wait() {
                FetchState::Loading => (PanelView::Loading, Vec::new()),
                FetchState::Failed(err) => (PanelView::Failed(err.to_string()), Vec::new()),
                FetchState::Ready(payload) => {
                    let details = payload
                        .longest
                        .iter()
                        .map(|case| tooltip_lines(case, &FULL_TOOLTIP).join(" | "))
                        .collect();
                    let (labels, values) = outlier_series(&payload.longest);
                    (panel.compose(&labels, &values), details)
                }
            }
        }
    }
}

fn save_series(series: &Series, out: &Path, format: Option<OutFormat>) -> Result<()> {
    let format = match format {
        Some(f) => f,
        None => match out.extension().and_then(|s| s.to_str()) {
            Some("csv") => OutFormat::Csv,
            Some("json") => OutFormat::Json,
            other => bail!(
                "cannot infer output format from extension {:?}; pass --format",
                other
            ),
        },
    };
    match format {
        OutFormat::Csv => storage::save_csv(series, out),
        OutFormat::Json => storage::save_json(series, out),
    }
}

fn write_render_spec(spec: &RenderSpec, path: &Path) -> Result<()> {
    let text = serde_json::to_string_pretty(spec)?;
    std::fs::write(path, text)?;
    Ok(())
}

fn cmd_export(args: ExportArgs) -> Result<()> {
    let client = Client::with_base_url(&args.base_url);
    let archive = client.download_database_archive()?;
    let path = storage::save_archive(&archive, &args.out)?;
    println!("Saved {} ({} bytes)", path.display(), archive.bytes.len());
    Ok(())
}
