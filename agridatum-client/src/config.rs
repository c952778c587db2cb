//! Client configuration
//!
//! # Environment variables
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | AGRIDATUM_API_URL | http://localhost:3000 | Backend base URL |
//! | AGRIDATUM_SIGNING | remote | Signing strategies, tried in order (`remote`, `local`) |
//! | AGRIDATUM_HTTP_TIMEOUT_SECS | unset | Request timeout; no timeout when unset |
//! | AGRIDATUM_RECORD_LIMIT | 100 | Records fetched on login |

use crate::error::{ClientError, ClientResult};
use crate::signer::{SigningChain, SigningStrategy};

/// Default backend base URL
pub const DEFAULT_API_URL: &str = "http://localhost:3000";

/// Default number of records loaded on login
pub const DEFAULT_RECORD_LIMIT: u32 = 100;

/// Client configuration for connecting to the harvest backend
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:3000")
    pub base_url: String,

    /// Signing strategies in the order they are tried
    pub signing: SigningChain,

    /// Request timeout in seconds, if any
    pub timeout: Option<u64>,

    /// Records fetched per farmer on login
    pub record_limit: u32,
}

impl ClientConfig {
    /// Create a new client configuration with remote signing
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            signing: SigningChain::default(),
            timeout: None,
            record_limit: DEFAULT_RECORD_LIMIT,
        }
    }

    /// Load configuration from environment variables
    ///
    /// Unset variables fall back to defaults; a variable that is set but
    /// invalid is a [`ClientError::Config`].
    pub fn from_env() -> ClientResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from any `AGRIDATUM_*` variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ClientResult<Self> {
        let mut config =
            Self::new(lookup("AGRIDATUM_API_URL").unwrap_or_else(|| DEFAULT_API_URL.into()));

        if let Some(spec) = lookup("AGRIDATUM_SIGNING") {
            config.signing = SigningChain::parse(&spec)?;
        }
        if let Some(value) = lookup("AGRIDATUM_HTTP_TIMEOUT_SECS") {
            config.timeout = Some(parse_var("AGRIDATUM_HTTP_TIMEOUT_SECS", &value)?);
        }
        if let Some(value) = lookup("AGRIDATUM_RECORD_LIMIT") {
            config.record_limit = parse_var("AGRIDATUM_RECORD_LIMIT", &value)?;
        }

        Ok(config)
    }

    /// Set the signing chain
    pub fn with_signing(mut self, signing: SigningChain) -> Self {
        self.signing = signing;
        self
    }

    /// Use a single signing strategy
    pub fn with_strategy(self, strategy: SigningStrategy) -> Self {
        self.with_signing(SigningChain::new(vec![strategy]))
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = Some(seconds);
        self
    }

    /// Set the number of records loaded on login
    pub fn with_record_limit(mut self, limit: u32) -> Self {
        self.record_limit = limit;
        self
    }

    /// Create an HTTP client from this configuration
    pub fn build_http_client(&self) -> Result<crate::NetworkHttpClient, ClientError> {
        crate::NetworkHttpClient::from_config(self)
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, value: &str) -> ClientResult<T> {
    value
        .trim()
        .parse()
        .map_err(|_| ClientError::Config(format!("invalid {}: '{}'", key, value)))
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}
