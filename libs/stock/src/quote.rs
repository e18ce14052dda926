use serde_json::{Map, Value};

/// Shown in place of any field the provider left out.
pub const NOT_AVAILABLE: &str = "N/A";

/// A point-in-time quote. Every field is the provider's own display string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    pub symbol: String,
    pub open: String,
    pub high: String,
    pub low: String,
    pub price: String,
    pub volume: String,
    pub latest_trading_day: String,
    pub previous_close: String,
    pub change: String,
    pub change_percent: String,
}

impl Quote {
    /// Maps a `"01. symbol"`-style record onto a quote; absent fields become [`NOT_AVAILABLE`].
    pub fn from_record(record: &Map<String, Value>) -> Self {
        let field = |label: &str| -> String {
            match record.get(label) {
                Some(Value::String(s)) => s.clone(),
                Some(Value::Number(n)) => n.to_string(),
                _ => NOT_AVAILABLE.to_string(),
            }
        };

        Self {
            symbol: field("01. symbol"),
            open: field("02. open"),
            high: field("03. high"),
            low: field("04. low"),
            price: field("05. price"),
            volume: field("06. volume"),
            latest_trading_day: field("07. latest trading day"),
            previous_close: field("08. previous close"),
            change: field("09. change"),
            change_percent: field("10. change percent"),
        }
    }
}

pub fn is_available(value: &str) -> bool {
    value != NOT_AVAILABLE
}
