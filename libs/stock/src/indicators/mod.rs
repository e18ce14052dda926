pub mod rolling;
pub mod rsi;
pub mod sma;

use std::{fmt, str::FromStr};

use chrono::NaiveDate;

use crate::error::{Error, Result};
use crate::series::{Column, PriceSeries};

pub use rsi::{RSI_OVERBOUGHT, RSI_OVERSOLD, relative_strength_index};
pub use sma::simple_moving_average;

pub const DEFAULT_SMA_WINDOW: usize = 20;
pub const DEFAULT_RSI_WINDOW: usize = 14;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// Derived `(date, value)` pairs. Dates are ascending and every value is defined.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IndicatorSeries {
    points: Vec<IndicatorPoint>,
}

impl IndicatorSeries {
    /// Keeps only the indices where `values` is defined.
    fn from_aligned(dates: &[NaiveDate], values: &[Option<f64>]) -> Self {
        let points = dates
            .iter()
            .zip(values)
            .filter_map(|(&date, value)| match value {
                Some(v) if !v.is_nan() => Some(IndicatorPoint { date, value: *v }),
                _ => None,
            })
            .collect();

        Self { points }
    }

    pub fn points(&self) -> &[IndicatorPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    /// Lays the points over `dates`, leaving `NaN` where no point exists.
    pub fn aligned_to(&self, dates: &[NaiveDate]) -> Vec<f64> {
        let mut points = self.points.iter().peekable();
        dates
            .iter()
            .map(|date| {
                while points.next_if(|p| p.date < *date).is_some() {}
                match points.next_if(|p| p.date == *date) {
                    Some(p) => p.value,
                    None => f64::NAN,
                }
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorKind {
    Sma,
    Rsi,
}

impl IndicatorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IndicatorKind::Sma => "SMA",
            IndicatorKind::Rsi => "RSI",
        }
    }

    pub fn default_window(&self) -> usize {
        match self {
            IndicatorKind::Sma => DEFAULT_SMA_WINDOW,
            IndicatorKind::Rsi => DEFAULT_RSI_WINDOW,
        }
    }

    /// Bars needed before the first point appears. RSI spends one on the first delta.
    pub fn bars_needed(&self, window: usize) -> usize {
        match self {
            IndicatorKind::Sma => window,
            IndicatorKind::Rsi => window.saturating_add(1),
        }
    }
}

impl fmt::Display for IndicatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IndicatorKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sma" => Ok(IndicatorKind::Sma),
            "rsi" => Ok(IndicatorKind::Rsi),
            other => Err(Error::InvalidParameter(format!(
                "unknown indicator {other:?}"
            ))),
        }
    }
}

/// Runs the chosen indicator over one column of `series`.
pub fn compute(
    series: &PriceSeries,
    kind: IndicatorKind,
    window: usize,
    column: Column,
) -> Result<IndicatorSeries> {
    match kind {
        IndicatorKind::Sma => simple_moving_average(series, window, column),
        IndicatorKind::Rsi => relative_strength_index(series, window, column),
    }
}

/// Checks the shared preconditions and returns a working copy of the column.
fn working_column(series: &PriceSeries, window: usize, column: Column) -> Result<Vec<f64>> {
    if window == 0 {
        return Err(Error::InvalidParameter(
            "window must be a positive integer".to_string(),
        ));
    }
    if series.is_empty() {
        return Err(Error::EmptySeries);
    }
    Ok(series.column(column))
}
