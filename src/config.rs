//! Frontend Configuration
//!
//! The API base URL is baked in at build time through `PORTAL_API_URL`.
//! Left empty, requests go to the page's own origin (reverse proxy setup).

use portal_client::PortalConfig;
use tracing::{error, info};

/// Build-time base URL, empty for same-origin deployments
const CONFIGURED_BASE_URL: Option<&str> = option_env!("PORTAL_API_URL");

/// Resolve the config for the running page
pub fn portal_config() -> PortalConfig {
    let origin = web_sys::window().and_then(|w| w.location().origin().ok());
    let config = resolve(CONFIGURED_BASE_URL.unwrap_or(""), origin.as_deref());
    info!(base_url = %config.base_url(), "Portal configured");
    config
}

fn resolve(configured: &str, origin: Option<&str>) -> PortalConfig {
    let config = PortalConfig::new(configured).unwrap_or_else(|err| {
        error!(error = %err, "Ignoring PORTAL_API_URL, falling back to same origin");
        PortalConfig::default()
    });

    match origin {
        Some(origin) => config.clone().resolve_origin(origin).unwrap_or_else(|err| {
            error!(error = %err, "Page origin is not a usable base URL");
            config
        }),
        None => config,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_origin_uses_page_origin() {
        let config = resolve("", Some("http://localhost:4200"));
        assert_eq!(config.base_url(), "http://localhost:4200");
    }

    #[test]
    fn test_configured_base_wins() {
        let config = resolve("https://gateway.example.net/", Some("http://localhost:4200"));
        assert_eq!(config.base_url(), "https://gateway.example.net");
    }

    #[test]
    fn test_bad_configured_base_falls_back() {
        let config = resolve("not a url", Some("http://localhost"));
        assert_eq!(config.base_url(), "http://localhost");

        // file:// pages have an opaque origin
        let config = resolve("", Some("null"));
        assert!(config.is_same_origin());
    }
}
