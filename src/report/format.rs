//! Terminal formatting for series and decompositions.
//!
//! Formatting lives here so the transform code stays free of presentation
//! and output changes are localized.

use crate::domain::LabeledSeries;
use crate::filters::Decomposition;

/// Metadata block followed by the last `tail` observations.
pub fn format_series_summary(series: &LabeledSeries, tail: usize) -> String {
    let mut out = String::new();
    out.push_str(&format!("=== {} ({}) ===\n", series.title, series.series_id));
    push_field(&mut out, "Units", &series.units);
    push_field(&mut out, "Frequency", &series.frequency);
    push_field(&mut out, "Seasonal adj.", &series.seasonal_adjustment);
    push_field(&mut out, "Source", &series.source);
    push_field(&mut out, "Release", &series.release);
    push_field(&mut out, "Last updated", &series.last_updated);
    push_field(&mut out, "Vintage", &series.observation_date);
    out.push_str(&format!("{}\n", series.date_range));
    out.push_str(&format!("Observations: {}", series.len()));
    let missing = series.data.iter().filter(|(_, v)| v.is_none()).count();
    if missing > 0 {
        out.push_str(&format!(" ({missing} missing)"));
    }
    out.push('\n');

    if let Some(stats) = value_stats(series) {
        out.push_str(&format!(
            "Min / Mean / Max: {:.4} / {:.4} / {:.4}\n",
            stats.min, stats.mean, stats.max
        ));
    }

    let skip = series.len().saturating_sub(tail);
    if tail > 0 && !series.is_empty() {
        out.push('\n');
        for (date, value) in &series.data[skip..] {
            match value {
                Some(v) => out.push_str(&format!("{}  {v:>14.4}\n", date.format("%Y-%m-%d"))),
                None => out.push_str(&format!("{}  {:>14}\n", date.format("%Y-%m-%d"), ".")),
            }
        }
    }
    out
}

/// Cycle and trend summaries, one after the other.
pub fn format_decomposition(decomposition: &Decomposition, tail: usize) -> String {
    format!(
        "{}\n{}",
        format_series_summary(&decomposition.cycle, tail),
        format_series_summary(&decomposition.trend, tail)
    )
}

fn push_field(out: &mut String, label: &str, value: &str) {
    if !value.is_empty() {
        out.push_str(&format!("{label}: {value}\n"));
    }
}

struct ValueStats {
    min: f64,
    mean: f64,
    max: f64,
}

fn value_stats(series: &LabeledSeries) -> Option<ValueStats> {
    let values: Vec<f64> = series.data.iter().filter_map(|(_, v)| *v).collect();
    if values.is_empty() {
        return None;
    }
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    Some(ValueStats { min, mean, max })
}
