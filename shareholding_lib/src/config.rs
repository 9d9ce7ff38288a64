//! API endpoint configuration.

use shareholding_api::{Client, DEFAULT_BASE_URL};

use crate::error::ShareholdingError;

/// Environment variable overriding the API base URL.
pub const API_URL_ENV: &str = "SHAREHOLDING_API_URL";

/// Where the disclosure API lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl ApiConfig {
    /// Reads [`API_URL_ENV`], falling back to `http://localhost:8000`.
    pub fn from_env() -> Self {
        Self::from_value(std::env::var(API_URL_ENV).ok())
    }

    /// Builds a config from an optional override. Blank values use the default.
    pub fn from_value(value: Option<String>) -> Self {
        match value.map(|v| v.trim().trim_end_matches('/').to_string()) {
            Some(url) if !url.is_empty() => Self { base_url: url },
            _ => Self::default(),
        }
    }

    /// Checks that the base URL is an absolute http(s) URL.
    pub fn validate(&self) -> Result<(), ShareholdingError> {
        let url = reqwest::Url::parse(&self.base_url)
            .map_err(|e| ShareholdingError::Config(format!("{}: {}", self.base_url, e)))?;
        match url.scheme() {
            "http" | "https" => Ok(()),
            other => Err(ShareholdingError::Config(format!(
                "unsupported scheme '{}' in {}",
                other, self.base_url
            ))),
        }
    }

    pub fn client(&self) -> Client {
        Client::with_base_url(&self.base_url)
    }
}
