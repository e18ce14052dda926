use std::time::Duration;

use tracing::{info, instrument};

use crate::config::ApiConfig;
use crate::error::{Error, Result};
use crate::indicators::{self, IndicatorKind, IndicatorSeries};
use crate::price_client::{OutputSize, PriceClient};
use crate::quote::Quote;
use crate::series::{Column, PriceSeries};

/// Entry point for the CLI: fetch, parse and derive, one call at a time.
#[derive(Clone)]
pub struct QueryFacade {
    client: PriceClient,
    throttle: Duration,
}

impl QueryFacade {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        Ok(Self {
            client: PriceClient::new(config)?,
            throttle: config.throttle,
        })
    }

    pub fn is_configured(&self) -> bool {
        self.client.is_configured()
    }

    #[instrument(name = "fetch_quote", skip(self))]
    pub async fn fetch_quote(&self, symbol: &str) -> Result<Quote> {
        let symbol = normalize_symbol(symbol)?;
        self.ensure_configured()?;

        let quote = self.client.fetch_quote(&symbol).await?;
        info!(symbol = %symbol, price = %quote.price, "fetched quote");
        Ok(quote)
    }

    /// Fetches the daily series, then sleeps for the configured throttle so the
    /// next command stays inside the provider's request budget.
    #[instrument(name = "fetch_history", skip(self))]
    pub async fn fetch_history(&self, symbol: &str, size: OutputSize) -> Result<PriceSeries> {
        let symbol = normalize_symbol(symbol)?;
        self.ensure_configured()?;

        let result = self.client.fetch_daily(&symbol, size).await;

        if !self.throttle.is_zero() {
            info!(seconds = self.throttle.as_secs(), "pausing for API rate limit");
            tokio::time::sleep(self.throttle).await;
        }

        let series = result?;
        info!(symbol = %symbol, bars = series.len(), "fetched daily series");
        Ok(series)
    }

    pub fn compute_indicator(
        &self,
        series: &PriceSeries,
        kind: IndicatorKind,
        window: usize,
    ) -> Result<IndicatorSeries> {
        let out = indicators::compute(series, kind, window, Column::Close)?;
        info!(indicator = %kind, window, points = out.len(), "computed indicator");
        Ok(out)
    }

    fn ensure_configured(&self) -> Result<()> {
        if self.client.is_configured() {
            Ok(())
        } else {
            Err(Error::NotConfigured)
        }
    }
}

/// Trims and upper-cases a ticker, rejecting blanks.
pub fn normalize_symbol(symbol: &str) -> Result<String> {
    let symbol = symbol.trim();
    if symbol.is_empty() {
        return Err(Error::InvalidParameter("symbol must not be blank".to_string()));
    }
    Ok(symbol.to_uppercase())
}
