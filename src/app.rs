//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - fetches the series (FRED or synthetic)
//! - runs the transform or filter pipeline
//! - prints summaries and plots
//! - writes optional exports

use clap::Parser;

use crate::cli::{Command, FilterArgs, PlotArgs, ShowArgs, VintagesArgs};
use crate::data::{FredClient, NberCycleDates, SeriesRepository};
use crate::domain::LabeledSeries;
use crate::error::AppError;
use crate::plot::{AsciiRenderer, PlotOptions, Renderer};
use crate::transform::PopulationBasis;

pub mod pipeline;

/// Observations listed under each summary.
const SUMMARY_TAIL: usize = 8;

/// Entry point for the `fred` binary.
pub fn run() -> Result<(), AppError> {
    let cli = crate::cli::Cli::parse();

    match cli.command {
        Command::Show(args) => handle_show(args),
        Command::Filter(args) => handle_filter(args),
        Command::Vintages(args) => handle_vintages(args),
    }
}

fn handle_show(args: ShowArgs) -> Result<(), AppError> {
    let repo = SeriesRepository::new(pipeline::open_source(&args.source)?);
    let mut series = pipeline::load_series(&repo, &args.source)?;

    if args.per_capita {
        let basis = if args.total_population {
            PopulationBasis::Total
        } else {
            PopulationBasis::Civilian16Plus
        };
        series = repo.per_capita(&series, basis)?;
    }
    if let Some(length) = args.ma {
        series = series.ma(length, args.center)?;
    }
    if let Some(kind) = args.transform {
        series = pipeline::apply_transform(&series, kind)?;
    }

    println!("{}", crate::report::format_series_summary(&series, SUMMARY_TAIL));
    print_plot(&series, &args.plot)?;

    if let Some(path) = &args.export_csv {
        crate::io::write_series_csv(path, &series)?;
    }
    if let Some(path) = &args.export_json {
        crate::io::write_series_json(path, &series)?;
    }
    Ok(())
}

fn handle_filter(args: FilterArgs) -> Result<(), AppError> {
    let repo = SeriesRepository::new(pipeline::open_source(&args.source)?);
    let series = pipeline::load_series(&repo, &args.source)?;
    let out = pipeline::run_filter(&series, &args)?;

    println!("{}", crate::report::format_decomposition(&out, SUMMARY_TAIL));
    print_plot(&out.cycle, &args.plot)?;
    print_plot(&out.trend, &args.plot)?;

    if let Some(path) = &args.export_cycle {
        crate::io::write_series_csv(path, &out.cycle)?;
    }
    if let Some(path) = &args.export_trend {
        crate::io::write_series_csv(path, &out.trend)?;
    }
    Ok(())
}

fn handle_vintages(args: VintagesArgs) -> Result<(), AppError> {
    let client = FredClient::from_env()?;
    let dates = client.vintage_dates(&args.series_id)?;
    let skip = args.recent.map_or(0, |n| dates.len().saturating_sub(n));

    println!("{} vintages of {}", dates.len(), args.series_id);
    for date in &dates[skip..] {
        println!("{}", date.format("%Y-%m-%d"));
    }
    Ok(())
}

fn print_plot(series: &LabeledSeries, args: &PlotArgs) -> Result<(), AppError> {
    if !args.plot {
        return Ok(());
    }
    let options = PlotOptions {
        width: args.width,
        height: args.height,
        recessions: !args.no_recessions,
    };
    let plot = AsciiRenderer::new(&NberCycleDates).draw_series(series, &options)?;
    println!("{plot}");
    Ok(())
}
