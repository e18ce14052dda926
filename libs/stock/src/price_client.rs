use reqwest::Client;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::config::ApiConfig;
use crate::error::{Error, Result};
use crate::quote::Quote;
use crate::series::{PriceSeries, parse_daily_series};

#[derive(Clone)]
pub struct PriceClient {
    client: Client,
    base_api: String,
    api_key: Option<String>,
}

impl PriceClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            base_api: config.base_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    pub async fn fetch_quote(&self, symbol: &str) -> Result<Quote> {
        let body = self.query("GLOBAL_QUOTE", symbol, &[]).await?;
        interpret_quote(symbol, &body)
    }

    pub async fn fetch_daily(&self, symbol: &str, size: OutputSize) -> Result<PriceSeries> {
        let body = self
            .query("TIME_SERIES_DAILY", symbol, &[("outputsize", size.as_str())])
            .await?;
        interpret_daily(symbol, &body)
    }

    async fn query(&self, function: &str, symbol: &str, extra: &[(&str, &str)]) -> Result<String> {
        let api_key = self.api_key.as_deref().ok_or(Error::NotConfigured)?;

        let mut params = vec![("function", function), ("symbol", symbol), ("apikey", api_key)];
        params.extend_from_slice(extra);

        debug!(function, symbol, "sending request");
        let body = self
            .client
            .get(&self.base_api)
            .query(&params)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        Ok(body)
    }
}

//
// Match Alpha Vantage `outputsize`
// https://www.alphavantage.co/documentation/#daily
//
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputSize {
    /// Latest 100 bars.
    #[default]
    Compact,
    /// Full available history.
    Full,
}

impl OutputSize {
    /// Bars returned by a compact request.
    pub const COMPACT_BARS: usize = 100;

    /// Smallest request that can hold `bars` bars.
    pub fn for_bars(bars: usize) -> Self {
        if bars > Self::COMPACT_BARS {
            OutputSize::Full
        } else {
            OutputSize::Compact
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputSize::Compact => "compact",
            OutputSize::Full => "full",
        }
    }
}

/// Top-level shape shared by every response: one data key, or a failure notice.
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "Error Message")]
    error_message: Option<String>,

    #[serde(rename = "Note")]
    note: Option<String>,

    #[serde(rename = "Information")]
    information: Option<String>,

    #[serde(rename = "Time Series (Daily)")]
    daily: Option<Map<String, Value>>,

    #[serde(rename = "Global Quote")]
    quote: Option<Map<String, Value>>,
}

impl Envelope {
    fn parse(body: &str) -> Result<Self> {
        let mut envelope: Self = serde_json::from_str(body)?;

        if let Some(message) = envelope.error_message.take() {
            return Err(Error::ApiError(message));
        }
        if let Some(message) = envelope.note.take().or_else(|| envelope.information.take()) {
            return Err(Error::RateLimited(message));
        }
        Ok(envelope)
    }
}

pub(crate) fn interpret_daily(symbol: &str, body: &str) -> Result<PriceSeries> {
    match Envelope::parse(body)?.daily {
        Some(raw) => parse_daily_series(&raw),
        None => Err(Error::MissingSeriesKey {
            symbol: symbol.to_string(),
        }),
    }
}

pub(crate) fn interpret_quote(symbol: &str, body: &str) -> Result<Quote> {
    match Envelope::parse(body)?.quote {
        Some(record) if !record.is_empty() => Ok(Quote::from_record(&record)),
        _ => Err(Error::MissingSeriesKey {
            symbol: symbol.to_string(),
        }),
    }
}
