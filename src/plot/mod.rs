//! Chart rendering for finished series.

pub mod ascii;

pub use ascii::AsciiRenderer;

use crate::domain::LabeledSeries;
use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlotOptions {
    pub width: usize,
    pub height: usize,
    /// Shade recessions between business-cycle peaks and troughs.
    pub recessions: bool,
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            width: 72,
            height: 18,
            recessions: true,
        }
    }
}

pub trait Renderer {
    fn draw_series(&self, series: &LabeledSeries, options: &PlotOptions) -> Result<String, AppError>;
}
