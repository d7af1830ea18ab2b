//! UI locales for locale-prefixed routes.
//!
//! Every route the portal serves is prefixed with a language segment
//! (`/en/...`, `/tr/...`). The locale decides UI language and where
//! redirects land.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Supported UI languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Tr,
}

impl Locale {
    /// The path segment for this locale.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Tr => "tr",
        }
    }

    /// Extract the locale from a locale-prefixed path like `/tr/policies`.
    ///
    /// Returns `None` when the leading segment is missing or not a known
    /// locale; callers fall back to the configured default.
    pub fn from_path(path: &str) -> Option<Self> {
        let segment = path.trim_start_matches('/').split('/').next()?;
        segment.parse().ok()
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en" => Ok(Self::En),
            "tr" => Ok(Self::Tr),
            other => Err(format!("unknown locale: {}", other)),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
