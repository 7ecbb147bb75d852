//! Export a series to CSV or JSON.
//!
//! CSV is `date,value` with an empty value for missing observations, easy to
//! load in spreadsheets. JSON carries the full metadata as well.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::domain::LabeledSeries;
use crate::error::AppError;

/// Write `date,value` rows to any writer.
pub fn write_csv<W: Write>(mut out: W, series: &LabeledSeries) -> Result<(), AppError> {
    writeln!(out, "date,value").map_err(|e| AppError::Io(format!("Failed to write CSV header: {e}")))?;
    for (date, value) in &series.data {
        let value = value.map(|v| v.to_string()).unwrap_or_default();
        writeln!(out, "{},{value}", date.format("%Y-%m-%d"))
            .map_err(|e| AppError::Io(format!("Failed to write CSV row: {e}")))?;
    }
    Ok(())
}

pub fn write_series_csv(path: &Path, series: &LabeledSeries) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::Io(format!("Failed to create export CSV '{}': {e}", path.display())))?;
    let mut out = BufWriter::new(file);
    write_csv(&mut out, series)?;
    out.flush()
        .map_err(|e| AppError::Io(format!("Failed to flush export CSV '{}': {e}", path.display())))
}

/// Pretty JSON of the whole series, metadata included.
pub fn series_to_json(series: &LabeledSeries) -> Result<String, AppError> {
    serde_json::to_string_pretty(series).map_err(|e| AppError::Io(format!("Failed to serialize series: {e}")))
}

pub fn write_series_json(path: &Path, series: &LabeledSeries) -> Result<(), AppError> {
    let json = series_to_json(series)?;
    std::fs::write(path, json)
        .map_err(|e| AppError::Io(format!("Failed to write export JSON '{}': {e}", path.display())))
}
