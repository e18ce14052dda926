use thiserror::Error;

/// Every way a fetch, parse or indicator computation can fail.
///
/// The variants carry data only; presenting them is up to the caller.
#[derive(Debug, Error)]
pub enum Error {
    /// No API key was configured, so nothing was sent upstream.
    #[error("API key is not configured")]
    NotConfigured,

    /// A request parameter was rejected before any network call.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The payload had the series key but its contents could not be read.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    /// The payload carried neither data nor an error message for the symbol.
    #[error("no data found for symbol {symbol}")]
    MissingSeriesKey { symbol: String },

    /// The provider answered with an explicit error message.
    #[error("API error: {0}")]
    ApiError(String),

    /// The provider sent a notice instead of data, usually its request-rate ceiling.
    #[error("provider notice: {0}")]
    RateLimited(String),

    /// An indicator or chart was requested over a series with no bars.
    #[error("series is empty")]
    EmptySeries,

    /// The requested column does not exist in the series.
    #[error("missing column: {0}")]
    MissingColumn(String),

    /// Transport failure: connection, timeout or non-success status.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body was not JSON.
    #[error("could not decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The chart renderer rejected the chart.
    #[error("chart rendering failed: {0}")]
    Chart(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
