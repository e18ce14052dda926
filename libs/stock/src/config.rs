use std::{env, time::Duration};

pub const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co/query";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Pause after each history fetch. The free tier allows 5 requests a minute.
pub const DEFAULT_THROTTLE: Duration = Duration::from_secs(15);

/// Connection settings for the quote and history API.
#[derive(Clone)]
pub struct ApiConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout: Duration,
    pub throttle: Duration,
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("throttle", &self.throttle)
            .finish()
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            throttle: DEFAULT_THROTTLE,
        }
    }
}

impl ApiConfig {
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: normalize_key(Some(api_key.into())),
            ..Self::default()
        }
    }

    /// Reads `ALPHA_VANTAGE_*` variables. A missing key is not an error here;
    /// fetches fail with `NotConfigured` instead.
    pub fn from_env() -> Self {
        let secs = |name: &str, default: Duration| {
            env::var(name)
                .ok()
                .and_then(|v| v.trim().parse::<u64>().ok())
                .map_or(default, Duration::from_secs)
        };

        Self {
            api_key: normalize_key(env::var("ALPHA_VANTAGE_API_KEY").ok()),
            base_url: env::var("ALPHA_VANTAGE_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            timeout: secs("ALPHA_VANTAGE_TIMEOUT_SECS", DEFAULT_TIMEOUT),
            throttle: secs("ALPHA_VANTAGE_THROTTLE_SECS", DEFAULT_THROTTLE),
        }
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn throttle(mut self, throttle: Duration) -> Self {
        self.throttle = throttle;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

fn normalize_key(key: Option<String>) -> Option<String> {
    key.map(|k| k.trim().to_string()).filter(|k| !k.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_key_is_not_configured() {
        assert!(!ApiConfig::with_api_key("   ").is_configured());
        assert!(!ApiConfig::default().is_configured());
    }

    #[test]
    fn key_is_trimmed() {
        let config = ApiConfig::with_api_key(" demo \n");
        assert_eq!(config.api_key.as_deref(), Some("demo"));
    }

    #[test]
    fn debug_hides_key() {
        let rendered = format!("{:?}", ApiConfig::with_api_key("secret-key"));
        assert!(!rendered.contains("secret-key"));
    }

    #[test]
    fn builders_override_defaults() {
        let config = ApiConfig::default()
            .base_url("http://127.0.0.1:9/query")
            .throttle(Duration::ZERO)
            .timeout(Duration::from_secs(2));
        assert_eq!(config.base_url, "http://127.0.0.1:9/query");
        assert_eq!(config.throttle, Duration::ZERO);
        assert_eq!(config.timeout, Duration::from_secs(2));
    }
}
