use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// One trading day.
///
/// Prices that could not be parsed are `NaN`; an unparsable volume is `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: Option<u64>,
}

impl PriceBar {
    /// The free data tier has no real adjusted close, so this is always the raw close.
    pub fn adjusted_close(&self) -> f64 {
        self.close
    }

    pub fn value(&self, column: Column) -> f64 {
        match column {
            Column::Open => self.open,
            Column::High => self.high,
            Column::Low => self.low,
            Column::Close => self.close,
            Column::AdjustedClose => self.adjusted_close(),
            Column::Volume => self.volume.map_or(f64::NAN, |v| v as f64),
        }
    }
}

/// Numeric columns an indicator can be computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Column {
    Open,
    High,
    Low,
    #[default]
    Close,
    AdjustedClose,
    Volume,
}

impl Column {
    pub fn as_str(&self) -> &'static str {
        match self {
            Column::Open => "open",
            Column::High => "high",
            Column::Low => "low",
            Column::Close => "close",
            Column::AdjustedClose => "adjusted_close",
            Column::Volume => "volume",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Column {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace(' ', "_").as_str() {
            "open" => Ok(Column::Open),
            "high" => Ok(Column::High),
            "low" => Ok(Column::Low),
            "close" => Ok(Column::Close),
            "adjusted_close" | "adj_close" => Ok(Column::AdjustedClose),
            "volume" => Ok(Column::Volume),
            _ => Err(Error::MissingColumn(s.to_string())),
        }
    }
}

/// Daily bars in strictly ascending date order. Missing trading days stay missing.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PriceSeries {
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    /// Builds a series, ordering the bars by date.
    pub fn new(mut bars: Vec<PriceBar>) -> Self {
        bars.sort_by_key(|b| b.date);
        Self { bars }
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.bars.iter().map(|b| b.date).collect()
    }

    /// Copies one column out of the series.
    pub fn column(&self, column: Column) -> Vec<f64> {
        self.bars.iter().map(|b| b.value(column)).collect()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.bars.first().map(|b| b.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.bars.last().map(|b| b.date)
    }
}

/// Parses a `date -> {open, high, low, close, volume}` map into a series.
///
/// Any unparsable date key fails the whole parse. Unparsable cells only
/// degrade that one field.
pub fn parse_daily_series(raw: &Map<String, Value>) -> Result<PriceSeries> {
    let mut bars = Vec::with_capacity(raw.len());

    for (key, record) in raw {
        let date = NaiveDate::parse_from_str(key.trim(), "%Y-%m-%d")
            .map_err(|e| Error::MalformedPayload(format!("invalid date key {key:?}: {e}")))?;

        let Value::Object(fields) = record else {
            return Err(Error::MalformedPayload(format!(
                "record for {key} is not an object"
            )));
        };

        let mut bar = PriceBar {
            date,
            open: f64::NAN,
            high: f64::NAN,
            low: f64::NAN,
            close: f64::NAN,
            volume: None,
        };

        for (name, cell) in fields {
            match field_name(name) {
                "open" => bar.open = parse_price(cell),
                "high" => bar.high = parse_price(cell),
                "low" => bar.low = parse_price(cell),
                "close" => bar.close = parse_price(cell),
                "volume" => bar.volume = parse_volume(cell),
                _ => {}
            }
        }

        bars.push(bar);
    }

    Ok(PriceSeries::new(bars))
}

/// `"4. close"` and `"close"` both name the close field.
fn field_name(raw: &str) -> &str {
    let raw = raw.trim();
    match raw.split_once(". ") {
        Some((ordinal, name)) if ordinal.chars().all(|c| c.is_ascii_digit()) => name.trim(),
        _ => raw,
    }
}

fn parse_price(cell: &Value) -> f64 {
    let parsed = match cell {
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Number(n) => n.as_f64(),
        _ => None,
    };

    match parsed {
        Some(v) if v.is_finite() && v >= 0.0 => v,
        _ => f64::NAN,
    }
}

fn parse_volume(cell: &Value) -> Option<u64> {
    match cell {
        Value::String(s) => s.trim().parse::<u64>().ok(),
        Value::Number(n) => n.as_u64(),
        _ => None,
    }
}
