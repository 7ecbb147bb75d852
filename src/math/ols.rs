//! Least squares regression.
//!
//! The linear detrending filter regresses a series on a constant and a time
//! index. We solve it through SVD so a short or constant series does not
//! blow up the solve.

use nalgebra::{DMatrix, DVector};

/// Solve a least squares problem using SVD.
///
/// Returns `None` if the system is too ill-conditioned to solve robustly.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.clone().svd(true, true);

    // Try progressively looser tolerances if strict solve fails.
    for &tol in &[1e-10, 1e-8, 1e-6] {
        if let Ok(beta) = svd.solve(y, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(beta);
            }
        }
    }

    None
}

/// Intercept, slope and fitted values of `y` regressed on `[1, 0..n)`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearTrend {
    pub intercept: f64,
    pub slope: f64,
    pub fitted: Vec<f64>,
}

pub fn fit_linear_trend(y: &[f64]) -> Option<LinearTrend> {
    let n = y.len();
    if n == 0 {
        return None;
    }
    let x = DMatrix::from_fn(n, 2, |i, j| if j == 0 { 1.0 } else { i as f64 });
    let y = DVector::from_column_slice(y);
    let beta = solve_least_squares(&x, &y)?;
    let fitted = (&x * &beta).iter().copied().collect();
    Some(LinearTrend {
        intercept: beta[0],
        slope: beta[1],
        fitted,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn least_squares_solves_simple_system() {
        // Fit y = 2 + 3x on x = [0,1,2]
        let x = DMatrix::from_row_slice(3, 2, &[1.0, 0.0, 1.0, 1.0, 1.0, 2.0]);
        let y = DVector::from_row_slice(&[2.0, 5.0, 8.0]);

        let beta = solve_least_squares(&x, &y).unwrap();
        assert!((beta[0] - 2.0).abs() < 1e-10);
        assert!((beta[1] - 3.0).abs() < 1e-10);
    }

    #[test]
    fn linear_trend_residuals_sum_to_zero() {
        let y = [1.0, 3.0, 2.0, 5.0, 4.0];
        let trend = fit_linear_trend(&y).unwrap();
        let resid: f64 = y.iter().zip(&trend.fitted).map(|(a, b)| a - b).sum();
        assert!(resid.abs() < 1e-9);
        assert!((trend.slope - 0.8).abs() < 1e-9);
        assert!(fit_linear_trend(&[]).is_none());
    }
}
