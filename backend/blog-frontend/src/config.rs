//! Configuration for the blog frontend
//!
//! Loads settings from:
//! 1. Environment variables
//! 2. .env file (local development)
//!
//! Every setting has a development default; malformed values are startup errors.

use anyhow::{bail, Context, Result};
use std::env;
use std::time::Duration;
use tracing::info;

pub const DEFAULT_API_URL: &str = "http://0.0.0.0:8006";
pub const DEFAULT_SITE_URL: &str = "https://blog.circuitnotion.com";

#[derive(Debug, Clone)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,

    /// Backend API configuration
    pub api: ApiConfig,

    /// Public site configuration
    pub site: SiteConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: usize,
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL without trailing slash
    pub base_url: String,
    /// Applied to every outbound request
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Public URL without trailing slash
    pub url: String,
    /// Mark the session cookie `Secure`
    pub secure_cookies: bool,
    /// Posts per feed page
    pub page_size: u32,
    /// Posts enumerated in sitemap.xml
    pub sitemap_limit: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
                workers: num_cpus::get(),
            },
            api: ApiConfig {
                base_url: DEFAULT_API_URL.to_string(),
                timeout: Duration::from_secs(10),
            },
            site: SiteConfig {
                url: DEFAULT_SITE_URL.to_string(),
                secure_cookies: false,
                page_size: 20,
                sitemap_limit: 100,
            },
        }
    }
}

impl Config {
    /// Load configuration from environment variables (and `.env` if present)
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        let production = env::var("APP_ENV")
            .map(|v| v.eq_ignore_ascii_case("production"))
            .unwrap_or(false);

        let secure_cookies = match env::var("COOKIE_SECURE") {
            Ok(v) => v
                .parse()
                .with_context(|| format!("COOKIE_SECURE must be true or false, got {v:?}"))?,
            Err(_) => production,
        };

        let timeout_secs: u64 = parse_var("API_TIMEOUT_SECS", 10)?;
        if timeout_secs == 0 {
            bail!("API_TIMEOUT_SECS must be greater than zero");
        }

        let page_size: u32 = parse_var("BLOG_PAGE_SIZE", defaults.site.page_size)?;
        if !(1..=100).contains(&page_size) {
            bail!("BLOG_PAGE_SIZE must be between 1 and 100, got {page_size}");
        }

        let workers: usize = parse_var("SERVER_WORKERS", defaults.server.workers)?;
        if workers == 0 {
            bail!("SERVER_WORKERS must be greater than zero");
        }

        let config = Self {
            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or(defaults.server.host),
                port: parse_var("SERVER_PORT", defaults.server.port)?,
                workers,
            },
            api: ApiConfig {
                base_url: normalize_url(
                    "API_URL",
                    &env::var("API_URL").unwrap_or(defaults.api.base_url),
                )?,
                timeout: Duration::from_secs(timeout_secs),
            },
            site: SiteConfig {
                url: normalize_url(
                    "SITE_URL",
                    &env::var("SITE_URL").unwrap_or(defaults.site.url),
                )?,
                secure_cookies,
                page_size,
                sitemap_limit: parse_var("SITEMAP_LIMIT", defaults.site.sitemap_limit)?,
            },
        };

        info!(
            api_url = %config.api.base_url,
            site_url = %config.site.url,
            timeout_secs,
            secure_cookies,
            "Configuration loaded"
        );

        Ok(config)
    }
}

fn parse_var<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid {key} value {raw:?}: {e}")),
        Err(_) => Ok(default),
    }
}

/// Validate an absolute http(s) URL and strip the trailing slash.
fn normalize_url(key: &str, raw: &str) -> Result<String> {
    let url = reqwest::Url::parse(raw.trim()).with_context(|| format!("{key} is not a valid URL"))?;
    if !matches!(url.scheme(), "http" | "https") {
        bail!("{key} must use http or https, got {}", url.scheme());
    }
    Ok(url.as_str().trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: &[&str] = &[
        "APP_ENV",
        "COOKIE_SECURE",
        "API_URL",
        "SITE_URL",
        "API_TIMEOUT_SECS",
        "BLOG_PAGE_SIZE",
        "SERVER_PORT",
    ];

    fn clear() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear();
        let config = Config::from_env().unwrap();
        assert_eq!(config.api.base_url, DEFAULT_API_URL);
        assert_eq!(config.api.timeout, Duration::from_secs(10));
        assert!(!config.site.secure_cookies);
        assert_eq!(config.site.page_size, 20);
    }

    #[test]
    #[serial]
    fn test_production_enables_secure_cookies_and_strips_slash() {
        clear();
        env::set_var("APP_ENV", "production");
        env::set_var("SITE_URL", "https://example.org/");
        let config = Config::from_env().unwrap();
        assert!(config.site.secure_cookies);
        assert_eq!(config.site.url, "https://example.org");
        clear();
    }

    #[test]
    #[serial]
    fn test_invalid_values_are_rejected() {
        clear();
        env::set_var("API_TIMEOUT_SECS", "0");
        assert!(Config::from_env().is_err());
        clear();

        env::set_var("API_URL", "ftp://files.example.org");
        assert!(Config::from_env().is_err());
        clear();

        env::set_var("BLOG_PAGE_SIZE", "500");
        assert!(Config::from_env().is_err());
        clear();
    }
}
