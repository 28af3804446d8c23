//! Build configuration.
//!
//! Handles locating the verse data directory and the default translation
//! from environment variables and .env files.

use dotenv::dotenv;
use std::env;
use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::table::DEFAULT_TRANSLATION;

/// Configuration for a build-time resolution run.
#[derive(Debug, Clone)]
pub struct Config {
    /// The application name
    app_name: String,
    /// The application version
    app_version: String,
    /// Directory holding `{translation}/{chapter}.json` documents
    pub data_dir: Option<PathBuf>,
    /// Translation used when a shortcode supplies none
    pub default_translation: String,
}

impl Config {
    /// Get the application name.
    #[must_use]
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Get the application version.
    #[must_use]
    pub fn app_version(&self) -> &str {
        &self.app_version
    }

    /// The data directory, or a config error pointing at the fix.
    pub fn require_data_dir(&self) -> Result<&PathBuf> {
        self.data_dir.as_ref().ok_or_else(|| {
            Error::config(
                "no verse data directory configured",
                "Set AYAT_DATA_DIR or pass --data <dir>",
            )
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: env!("CARGO_PKG_NAME").to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            data_dir: None,
            default_translation: DEFAULT_TRANSLATION.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    #[allow(clippy::unnecessary_wraps)] // Returns Result for forward-compatible API
    pub fn load() -> Result<Self> {
        // Try to load .env file if present
        dotenv().ok();

        let mut config = Self::default();

        // Data dir: env var override, or ./data if it exists
        config.data_dir = env::var("AYAT_DATA_DIR").ok().map_or_else(
            || {
                let local = PathBuf::from("data");
                if local.is_dir() {
                    return Some(local);
                }
                dirs::data_dir()
                    .map(|d| d.join("ayat"))
                    .filter(|p| p.is_dir())
            },
            |path| Some(PathBuf::from(shellexpand::tilde(&path).to_string())),
        );

        if let Ok(translation) = env::var("AYAT_TRANSLATION") {
            if !translation.is_empty() {
                config.default_translation = translation;
            }
        }

        Ok(config)
    }
}
