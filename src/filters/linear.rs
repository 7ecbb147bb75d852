//! Linear detrending via OLS on a time index.

use crate::domain::LabeledSeries;
use crate::error::AppError;
use crate::filters::{Decomposition, observations};
use crate::math::fit_linear_trend;

impl LabeledSeries {
    /// Trend = fitted line `a + b·i`, cycle = residual.
    pub fn linear_filter(&self) -> Result<Decomposition, AppError> {
        let y = self.complete_values("linear_filter")?;
        let dates = self.dates();
        let (cycle, trend) = match fit_linear_trend(&y) {
            Some(fit) => {
                let cycle: Vec<f64> = y.iter().zip(&fit.fitted).map(|(a, b)| a - b).collect();
                (observations(&dates, &cycle), observations(&dates, &fit.fitted))
            }
            None if y.is_empty() => (Vec::new(), Vec::new()),
            None => return Err(AppError::invalid("linear_filter: regression could not be solved")),
        };
        Ok(Decomposition::labeled(self, "linearly filtered via OLS", cycle, trend))
    }
}
