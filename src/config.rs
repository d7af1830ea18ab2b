//! Configuration loading and management.
//!
//! Loads configuration from embedded config.toml with environment variable overrides.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;
use url::Url;

use crate::locale::Locale;

/// Embedded configuration file content.
const CONFIG_TOML: &str = include_str!("../config.toml");

/// Root configuration structure.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    pub portal: PortalConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the upstream REST API, without a trailing slash.
    pub base_url: String,
    pub timeout_seconds: u64,
    pub connect_timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PortalConfig {
    pub default_locale: Locale,
    pub supported_locales: Vec<Locale>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Config {
    /// Load configuration from embedded config.toml with environment variable overrides.
    pub fn load() -> Result<Self> {
        // Parse embedded config
        let mut config: Config =
            toml::from_str(CONFIG_TOML).context("Failed to parse embedded config.toml")?;

        // Apply environment variable overrides
        if let Ok(base_url) = env::var("PORTAL_API_BASE_URL") {
            config.api.base_url = base_url;
        }

        if let Ok(locale) = env::var("PORTAL_DEFAULT_LOCALE") {
            config.portal.default_locale = locale
                .parse()
                .map_err(anyhow::Error::msg)
                .with_context(|| format!("Unsupported PORTAL_DEFAULT_LOCALE: {}", locale))?;
        }

        if let Ok(log_level) = env::var("RUST_LOG") {
            config.logging.level = log_level;
        }

        // Validate required fields
        config.validate()?;

        Ok(config)
    }

    /// Validate that required configuration is present.
    fn validate(&self) -> Result<()> {
        if self.api.base_url.is_empty() {
            anyhow::bail!(
                "API base URL not configured. Set PORTAL_API_BASE_URL environment variable \
                 or update config.toml"
            );
        }

        Url::parse(&self.api.base_url)
            .with_context(|| format!("Invalid API base URL: {}", self.api.base_url))?;

        if !self
            .portal
            .supported_locales
            .contains(&self.portal.default_locale)
        {
            anyhow::bail!(
                "Default locale {} is not in the supported locale list",
                self.portal.default_locale
            );
        }

        Ok(())
    }

    /// API base URL with any trailing slash removed.
    pub fn api_base(&self) -> &str {
        self.api.base_url.trim_end_matches('/')
    }
}
