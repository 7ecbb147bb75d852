//! Metadata merging for series combined by arithmetic.
//!
//! Descriptive fields collapse to one copy when both operands agree and are
//! joined with `" and "` otherwise. Frequency, `t` and the date-range label
//! come from the left operand unconditionally.

use crate::domain::LabeledSeries;
use crate::ops::BinaryOp;

/// `a` when both sides agree, `"<a> and <b>"` otherwise.
pub fn join_distinct(a: &str, b: &str) -> String {
    if a == b { a.to_string() } else { join(a, b) }
}

pub fn join(a: &str, b: &str) -> String {
    format!("{a} and {b}")
}

/// Metadata of `lhs <op> rhs`, with empty data.
///
/// Notes and the vintage date start out empty, as for a freshly constructed series.
pub fn merge_metadata(lhs: &LabeledSeries, rhs: &LabeledSeries, op: BinaryOp) -> LabeledSeries {
    LabeledSeries {
        data: Vec::new(),
        series_id: join(&lhs.series_id, &rhs.series_id),
        title: format!("{}{}{}", lhs.title, op.word(), rhs.title),
        units: format!("{}{}{}", lhs.units, op.symbol(), rhs.units),
        units_short: format!("{}{}{}", lhs.units_short, op.symbol(), rhs.units_short),
        source: join_distinct(&lhs.source, &rhs.source),
        release: join_distinct(&lhs.release, &rhs.release),
        last_updated: join_distinct(&lhs.last_updated, &rhs.last_updated),
        notes: String::new(),
        seasonal_adjustment: join_distinct(&lhs.seasonal_adjustment, &rhs.seasonal_adjustment),
        seasonal_adjustment_short: join_distinct(
            &lhs.seasonal_adjustment_short,
            &rhs.seasonal_adjustment_short,
        ),
        observation_date: String::new(),
        // Left operand wins even when the two frequencies differ.
        frequency: lhs.frequency.clone(),
        frequency_short: lhs.frequency_short.clone(),
        t: lhs.t,
        date_range: lhs.date_range.clone(),
    }
}
