mod config;
mod error;
mod facade;
mod price_client;
mod quote;
mod series;

pub mod chart;
pub mod indicators;

pub use config::ApiConfig;
pub use error::{Error, Result};
pub use facade::{QueryFacade, normalize_symbol};
pub use indicators::{IndicatorKind, IndicatorPoint, IndicatorSeries};
pub use price_client::{OutputSize, PriceClient};
pub use quote::{NOT_AVAILABLE, Quote, is_available};
pub use series::{Column, PriceBar, PriceSeries, parse_daily_series};
