use std::time::Duration;

/// Loopback endpoint the Paper desktop app serves MCP on.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:29979/mcp";

/// Default timeout for a single tool call (30 seconds).
const DEFAULT_CALL_TIMEOUT_SECS: u64 = 30;

/// Default timeout for the liveness probe (3 seconds).
const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 3;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("PAPER_MCP_URL is not a valid URL: {0}")]
    InvalidEndpoint(String),
    #[error("PAPER_MCP_TIMEOUT_SECS must be a positive integer")]
    InvalidTimeout,
}

/// Where and how patiently to reach the Paper MCP endpoint.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub endpoint: String,
    pub call_timeout: Duration,
    pub probe_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            call_timeout: Duration::from_secs(DEFAULT_CALL_TIMEOUT_SECS),
            probe_timeout: Duration::from_secs(DEFAULT_PROBE_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    /// Config pointing at an arbitrary endpoint with the default timeouts.
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }

    /// Load configuration from environment.
    ///
    /// - `PAPER_MCP_URL` (optional): overrides the loopback endpoint
    /// - `PAPER_MCP_TIMEOUT_SECS` (optional, default 30): max seconds per tool call
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("PAPER_MCP_URL") {
            reqwest::Url::parse(&url).map_err(|e| ConfigError::InvalidEndpoint(e.to_string()))?;
            config.endpoint = url;
        }

        if let Ok(val) = std::env::var("PAPER_MCP_TIMEOUT_SECS") {
            let secs = val
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidTimeout)?;
            if secs == 0 {
                return Err(ConfigError::InvalidTimeout);
            }
            config.call_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}
