//! Elementwise arithmetic over scalars, raw arrays and labeled series.
//!
//! Dispatch table:
//!
//! - scalar/array with scalar/array: plain numeric result
//! - scalar/array with a series: the series' metadata is kept, data combined
//! - series with series: the date indices must be identical, metadata merged
//!
//! No implicit alignment happens here; use `window_equalize` first.

use crate::domain::{LabeledSeries, Observation, missing_if_nan};
use crate::error::AppError;
use crate::ops::merge_metadata;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Plus,
    Minus,
    Times,
    Divide,
}

impl BinaryOp {
    /// Joiner used for titles.
    pub fn word(self) -> &'static str {
        match self {
            BinaryOp::Plus => " plus ",
            BinaryOp::Minus => " minus ",
            BinaryOp::Times => " times ",
            BinaryOp::Divide => " divided by ",
        }
    }

    /// Joiner used for units.
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Plus => " + ",
            BinaryOp::Minus => " - ",
            BinaryOp::Times => " * ",
            BinaryOp::Divide => " / ",
        }
    }

    pub fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            BinaryOp::Plus => a + b,
            BinaryOp::Minus => a - b,
            BinaryOp::Times => a * b,
            BinaryOp::Divide => a / b,
        }
    }

    fn apply_opt(self, a: Option<f64>, b: Option<f64>) -> Option<f64> {
        match (a, b) {
            (Some(a), Some(b)) => missing_if_nan(self.apply(a, b)),
            _ => None,
        }
    }
}

/// One side of a binary operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Scalar(f64),
    Array(Vec<f64>),
    Series(LabeledSeries),
}

impl Operand {
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Operand::Scalar(v) => Some(*v),
            _ => None,
        }
    }

    pub fn into_series(self) -> Option<LabeledSeries> {
        match self {
            Operand::Series(s) => Some(s),
            _ => None,
        }
    }
}

impl From<f64> for Operand {
    fn from(value: f64) -> Self {
        Operand::Scalar(value)
    }
}

impl From<Vec<f64>> for Operand {
    fn from(value: Vec<f64>) -> Self {
        Operand::Array(value)
    }
}

impl From<&[f64]> for Operand {
    fn from(value: &[f64]) -> Self {
        Operand::Array(value.to_vec())
    }
}

impl From<LabeledSeries> for Operand {
    fn from(value: LabeledSeries) -> Self {
        Operand::Series(value)
    }
}

impl From<&LabeledSeries> for Operand {
    fn from(value: &LabeledSeries) -> Self {
        Operand::Series(value.clone())
    }
}

pub fn plus(lhs: impl Into<Operand>, rhs: impl Into<Operand>) -> Result<Operand, AppError> {
    combine(BinaryOp::Plus, lhs.into(), rhs.into())
}

pub fn minus(lhs: impl Into<Operand>, rhs: impl Into<Operand>) -> Result<Operand, AppError> {
    combine(BinaryOp::Minus, lhs.into(), rhs.into())
}

pub fn times(lhs: impl Into<Operand>, rhs: impl Into<Operand>) -> Result<Operand, AppError> {
    combine(BinaryOp::Times, lhs.into(), rhs.into())
}

pub fn divide(lhs: impl Into<Operand>, rhs: impl Into<Operand>) -> Result<Operand, AppError> {
    combine(BinaryOp::Divide, lhs.into(), rhs.into())
}

/// Apply `op` to two operands following the dispatch table above.
pub fn combine(op: BinaryOp, lhs: Operand, rhs: Operand) -> Result<Operand, AppError> {
    match (lhs, rhs) {
        (Operand::Scalar(a), Operand::Scalar(b)) => Ok(Operand::Scalar(op.apply(a, b))),
        (Operand::Scalar(a), Operand::Array(b)) => {
            Ok(Operand::Array(b.iter().map(|&y| op.apply(a, y)).collect()))
        }
        (Operand::Array(a), Operand::Scalar(b)) => {
            Ok(Operand::Array(a.iter().map(|&x| op.apply(x, b)).collect()))
        }
        (Operand::Array(a), Operand::Array(b)) => {
            if a.len() != b.len() {
                return Err(AppError::IndexMismatch(format!(
                    "arrays of length {} and {}",
                    a.len(),
                    b.len()
                )));
            }
            Ok(Operand::Array(a.iter().zip(&b).map(|(&x, &y)| op.apply(x, y)).collect()))
        }
        (Operand::Series(s), other) => Ok(Operand::Series(series_lhs(op, &s, other)?)),
        (other, Operand::Series(s)) => {
            let values = broadcast(&other, &s)?;
            let data = s
                .data
                .iter()
                .zip(values)
                .map(|(&(d, y), x)| (d, op.apply_opt(x, y)))
                .collect();
            Ok(Operand::Series(s.derive(data)))
        }
    }
}

/// `s <op> rhs` for a series on the left.
fn series_lhs(op: BinaryOp, s: &LabeledSeries, rhs: Operand) -> Result<LabeledSeries, AppError> {
    let values = broadcast(&rhs, s)?;
    let data = s
        .data
        .iter()
        .zip(values)
        .map(|(&(d, x), y)| (d, op.apply_opt(x, y)))
        .collect();
    match rhs {
        Operand::Series(other) => Ok(combine_series(op, s, &other, data)),
        _ => Ok(s.derive(data)),
    }
}

/// Values of `operand` laid out against the index of `series`.
fn broadcast(operand: &Operand, series: &LabeledSeries) -> Result<Vec<Option<f64>>, AppError> {
    let n = series.len();
    match operand {
        Operand::Scalar(v) => Ok(vec![Some(*v); n]),
        Operand::Array(values) => {
            if values.len() != n {
                return Err(AppError::IndexMismatch(format!(
                    "array of length {} combined with series '{}' of length {n}",
                    values.len(),
                    series.series_id
                )));
            }
            Ok(values.iter().map(|&v| missing_if_nan(v)).collect())
        }
        Operand::Series(other) => {
            if !same_index(series, other) {
                return Err(AppError::IndexMismatch(format!(
                    "'{}' and '{}' do not have the same observation dates",
                    series.series_id, other.series_id
                )));
            }
            Ok(other.values())
        }
    }
}

fn same_index(a: &LabeledSeries, b: &LabeledSeries) -> bool {
    a.len() == b.len() && a.data.iter().zip(&b.data).all(|((da, _), (db, _))| da == db)
}

fn combine_series(
    op: BinaryOp,
    lhs: &LabeledSeries,
    rhs: &LabeledSeries,
    data: Vec<Observation>,
) -> LabeledSeries {
    let mut out = merge_metadata(lhs, rhs, op);
    out.data = data;
    out
}

impl LabeledSeries {
    pub fn plus(&self, rhs: impl Into<Operand>) -> Result<LabeledSeries, AppError> {
        self.combine_with(BinaryOp::Plus, rhs.into())
    }

    pub fn minus(&self, rhs: impl Into<Operand>) -> Result<LabeledSeries, AppError> {
        self.combine_with(BinaryOp::Minus, rhs.into())
    }

    pub fn times(&self, rhs: impl Into<Operand>) -> Result<LabeledSeries, AppError> {
        self.combine_with(BinaryOp::Times, rhs.into())
    }

    pub fn divide(&self, rhs: impl Into<Operand>) -> Result<LabeledSeries, AppError> {
        self.combine_with(BinaryOp::Divide, rhs.into())
    }

    fn combine_with(&self, op: BinaryOp, rhs: Operand) -> Result<LabeledSeries, AppError> {
        series_lhs(op, self, rhs)
    }
}
