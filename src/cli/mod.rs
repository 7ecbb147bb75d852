//! Command-line parsing for the `fred` binary.
//!
//! Argument parsing and command dispatch stay separate from the series and
//! filter code; `app` turns these structs into library calls.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "fred", version, about = "FRED time series: fetch, transform, and filter")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch a series, optionally transform it, then print, plot, or export it.
    Show(ShowArgs),
    /// Split a series into cycle and trend components.
    Filter(FilterArgs),
    /// List the ALFRED vintage dates of a series.
    Vintages(VintagesArgs),
}

/// Where the series comes from.
#[derive(Debug, Args, Clone)]
pub struct SourceArgs {
    /// FRED series id, e.g. GDP or UNRATE.
    pub series_id: String,

    /// Vintage date (YYYY-MM-DD or MM-DD-YYYY). Defaults to today.
    #[arg(long)]
    pub as_of: Option<String>,

    /// Use the seeded synthetic source instead of the FRED API.
    #[arg(long)]
    pub offline: bool,

    /// Random seed for the synthetic source.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Bypass the session cache.
    #[arg(long)]
    pub no_cache: bool,

    /// Restrict to the closed date interval START..END.
    #[arg(long, num_args = 2, value_names = ["START", "END"])]
    pub window: Option<Vec<String>>,

    /// Keep only the last N observations.
    #[arg(long)]
    pub recent: Option<usize>,

    /// Resample to this frequency (D, W, M, Q, A).
    #[arg(long)]
    pub freq: Option<String>,

    /// Aggregation used with --freq.
    #[arg(long, default_value = "mean")]
    pub method: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TransformKind {
    /// Natural log.
    Log,
    /// Percentage change over one period.
    Pc,
    /// Percentage change over one year.
    Apc,
    /// Annualized one-period percentage change.
    Pca,
}

#[derive(Debug, Args, Clone)]
pub struct PlotArgs {
    /// Render an ASCII chart in the terminal.
    #[arg(long)]
    pub plot: bool,

    /// Do not shade recessions on the chart.
    #[arg(long)]
    pub no_recessions: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 72)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 18)]
    pub height: usize,
}

#[derive(Debug, Args, Clone)]
pub struct ShowArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Transformation applied after windowing and resampling.
    #[arg(long, value_enum)]
    pub transform: Option<TransformKind>,

    /// Divide by population (civilian 16+ unless --total-population).
    #[arg(long)]
    pub per_capita: bool,

    /// Use total population for --per-capita.
    #[arg(long)]
    pub total_population: bool,

    /// Moving average over N observations.
    #[arg(long)]
    pub ma: Option<usize>,

    /// Center the moving average.
    #[arg(long)]
    pub center: bool,

    #[command(flatten)]
    pub plot: PlotArgs,

    /// Write `date,value` CSV.
    #[arg(long)]
    pub export_csv: Option<PathBuf>,

    /// Write the series with metadata as JSON.
    #[arg(long)]
    pub export_json: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FilterKind {
    /// Two-sided Hodrick-Prescott.
    Hp,
    /// One-sided (recursive) Hodrick-Prescott.
    Hp1,
    /// Baxter-King band-pass.
    Bp,
    /// Christiano-Fitzgerald band-pass.
    Cf,
    /// OLS linear trend.
    Linear,
    /// First difference.
    Diff,
}

#[derive(Debug, Args, Clone)]
pub struct FilterArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[arg(long, value_enum, default_value_t = FilterKind::Hp)]
    pub kind: FilterKind,

    /// HP smoothing parameter.
    #[arg(long)]
    pub lambda: Option<f64>,

    /// Shortest period kept (band-pass filters).
    #[arg(long)]
    pub low: Option<f64>,

    /// Longest period kept (band-pass filters).
    #[arg(long)]
    pub high: Option<f64>,

    /// Lead/lag length K (Baxter-King).
    #[arg(long)]
    pub k: Option<usize>,

    /// Drop missing observations before filtering.
    #[arg(long)]
    pub drop_missing: bool,

    #[command(flatten)]
    pub plot: PlotArgs,

    /// Write the cycle component as `date,value` CSV.
    #[arg(long)]
    pub export_cycle: Option<PathBuf>,

    /// Write the trend component as `date,value` CSV.
    #[arg(long)]
    pub export_trend: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct VintagesArgs {
    pub series_id: String,

    /// Show only the last N vintages.
    #[arg(long)]
    pub recent: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_show_with_window_and_transform() {
        let cli = Cli::parse_from([
            "fred", "show", "GDP", "--offline", "--window", "2000-01-01", "2010-12-31", "--transform", "apc",
        ]);
        let Command::Show(args) = cli.command else {
            panic!("expected show");
        };
        assert_eq!(args.source.series_id, "GDP");
        assert!(args.source.offline);
        assert_eq!(args.source.window, Some(vec!["2000-01-01".to_string(), "2010-12-31".to_string()]));
        assert_eq!(args.transform, Some(TransformKind::Apc));
        assert_eq!(args.source.method, "mean");
    }

    #[test]
    fn parses_filter_kind() {
        let cli = Cli::parse_from(["fred", "filter", "GDPC1", "--kind", "hp1", "--lambda", "1600"]);
        let Command::Filter(args) = cli.command else {
            panic!("expected filter");
        };
        assert_eq!(args.kind, FilterKind::Hp1);
        assert_eq!(args.lambda, Some(1600.0));
        assert!(!args.plot.plot);
    }
}
