//! Shared series pipeline used by the `show` and `filter` commands.
//!
//! fetch -> window -> recent -> resample, then a transform or a filter.
//! Presentation (printing, plotting, exports) stays in `app`.

use std::str::FromStr;

use crate::cli::{FilterArgs, FilterKind, SourceArgs, TransformKind};
use crate::data::{DataSource, FredClient, SeriesRepository, SyntheticSource};
use crate::domain::{Frequency, LabeledSeries, parse_date};
use crate::error::AppError;
use crate::filters::Decomposition;
use crate::transform::ResampleMethod;

/// The FRED API, or the synthetic generator with `--offline`.
pub fn open_source(args: &SourceArgs) -> Result<Box<dyn DataSource>, AppError> {
    if args.offline {
        Ok(Box::new(SyntheticSource::default().with_seed(args.seed)))
    } else {
        Ok(Box::new(FredClient::from_env()?))
    }
}

/// Fetch the series and apply the window, truncation, and resampling options.
pub fn load_series<S: DataSource>(repo: &SeriesRepository<S>, args: &SourceArgs) -> Result<LabeledSeries, AppError> {
    let as_of = args.as_of.as_deref().map(parse_date).transpose()?;
    let mut series = repo.fetch(&args.series_id, as_of, !args.no_cache)?;

    if let Some(bounds) = &args.window {
        let [start, end] = bounds.as_slice() else {
            return Err(AppError::invalid("--window takes exactly two dates"));
        };
        series = series.window(parse_date(start)?, parse_date(end)?);
    }
    if let Some(n) = args.recent {
        series = series.recent(n);
    }
    if let Some(freq) = &args.freq {
        let freq = Frequency::from_str(freq)?;
        let method = ResampleMethod::from_str(&args.method)?;
        series = series.as_frequency(freq, method)?;
    }
    Ok(series)
}

pub fn apply_transform(series: &LabeledSeries, kind: TransformKind) -> Result<LabeledSeries, AppError> {
    match kind {
        TransformKind::Log => Ok(series.log()),
        TransformKind::Pc => series.pc(false, true, false),
        TransformKind::Apc => series.apc(false, true),
        TransformKind::Pca => series.pc(false, true, true),
    }
}

pub fn run_filter(series: &LabeledSeries, args: &FilterArgs) -> Result<Decomposition, AppError> {
    let series = if args.drop_missing { series.drop_missing() } else { series.clone() };
    match args.kind {
        FilterKind::Hp => series.hp_filter(args.lambda, true),
        FilterKind::Hp1 => series.hp_filter(args.lambda, false),
        FilterKind::Bp => series.bp_filter(args.low, args.high, args.k),
        FilterKind::Cf => series.cf_filter(args.low, args.high),
        FilterKind::Linear => series.linear_filter(),
        FilterKind::Diff => series.diff_filter(),
    }
}
