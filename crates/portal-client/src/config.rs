//! Portal configuration
//!
//! The only setting is the base URL the service paths hang off. An empty
//! base means "same origin": production deployments sit behind a reverse
//! proxy that routes `/api/v1/{domain}` to the right service.

use reqwest::Url;

use crate::error::ConfigError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PortalConfig {
    base_url: String,
}

impl PortalConfig {
    /// Build a config, trimming trailing slashes off the base.
    ///
    /// A non-empty base must be an absolute http(s) URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ConfigError> {
        let raw = base_url.into();
        let base_url = raw.trim().trim_end_matches('/').to_string();

        if !base_url.is_empty() {
            let parsed = Url::parse(&base_url).map_err(|e| ConfigError::InvalidBaseUrl {
                url: raw.clone(),
                reason: e.to_string(),
            })?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(ConfigError::InvalidBaseUrl {
                    url: raw,
                    reason: format!("unsupported scheme '{}'", parsed.scheme()),
                });
            }
        }

        Ok(Self { base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn is_same_origin(&self) -> bool {
        self.base_url.is_empty()
    }

    /// Resolve a same-origin config against the page origin.
    ///
    /// The HTTP client only accepts absolute URLs, so the browser build
    /// substitutes `window.location.origin` for the empty base.
    pub fn resolve_origin(self, origin: &str) -> Result<Self, ConfigError> {
        if self.is_same_origin() {
            Self::new(origin)
        } else {
            Ok(self)
        }
    }
}
