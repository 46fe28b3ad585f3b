//! Runtime configuration

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::ConfigError;
use crate::localize::Locale;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Settings shared by every command.
///
/// Values come from, in increasing priority: defaults, the JSON config
/// file, command line flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Language of rendered descriptions
    pub locale: Locale,
    pub format: OutputFormat,
    /// `tracing-subscriber` filter directive used when `RUST_LOG` is unset
    pub log_filter: String,
    /// Include hex dumps of file contents in text output
    pub show_data: bool,
}

/// Settings given on the command line. `None` and `false` leave the value
/// from the file or the defaults in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    pub locale: Option<String>,
    pub log_filter: Option<String>,
    pub format: Option<OutputFormat>,
    pub show_data: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: Locale::English,
            format: OutputFormat::Text,
            log_filter: "warn".to_string(),
            show_data: false,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&source)?)
    }

    /// Builds the effective configuration: defaults, then `file` if given,
    /// then `overrides`.
    pub fn resolve(file: Option<&Path>, overrides: &CliOverrides) -> Result<Self, ConfigError> {
        let mut config = match file {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        if let Some(tag) = &overrides.locale {
            config = config.with_locale_tag(tag)?;
        }
        if let Some(filter) = &overrides.log_filter {
            config = config.with_log_filter(filter.as_str());
        }
        if let Some(format) = overrides.format {
            config = config.with_format(format);
        }
        if overrides.show_data {
            config = config.with_data(true);
        }
        tracing::debug!(?config, "resolved configuration");
        Ok(config)
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Sets the locale from a language tag such as `fr` or `de-AT`
    pub fn with_locale_tag(self, tag: &str) -> Result<Self, ConfigError> {
        Ok(self.with_locale(tag.parse()?))
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    pub fn with_data(mut self, show_data: bool) -> Self {
        self.show_data = show_data;
        self
    }
}
