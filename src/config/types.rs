use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use tracing::warn;

use crate::error::ConfigError;

use super::parse::{parse_bool, parse_properties};

/// Recognised configuration keys.
pub mod keys {
    pub const BASE_URL: &str = "api.base.url";
    pub const ENVIRONMENT: &str = "environment";
    pub const REQUEST_TIMEOUT_MS: &str = "request.timeout.ms";
    pub const MAX_RETRIES: &str = "max.retries";
    pub const LOGGING_ENABLED: &str = "logging.enabled";
}

/// Values used when a key is absent, unreadable, or malformed.
pub mod defaults {
    pub const BASE_URL: &str = "https://restcountries.com/v3.1";
    pub const ENVIRONMENT: &str = "production";
    pub const REQUEST_TIMEOUT_MS: u64 = 5000;
    pub const MAX_RETRIES: u32 = 3;
    pub const LOGGING_ENABLED: bool = true;
}

/// Where a [`Settings`] value was populated from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsSource {
    Defaults,
    File(PathBuf),
    Inline,
}

impl fmt::Display for SettingsSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsSource::Defaults => write!(f, "built-in defaults"),
            SettingsSource::File(path) => write!(f, "{}", path.display()),
            SettingsSource::Inline => write!(f, "inline properties"),
        }
    }
}

/// Immutable key/value settings with typed, defaulted accessors.
///
/// Built once and shared by reference. Accessors never fail: a missing or
/// malformed value yields the documented default.
#[derive(Debug, Clone)]
pub struct Settings {
    properties: BTreeMap<String, String>,
    source: SettingsSource,
    load_failure: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Settings {
    #[must_use]
    pub const fn defaults() -> Self {
        Self {
            properties: BTreeMap::new(),
            source: SettingsSource::Defaults,
            load_failure: None,
        }
    }

    #[must_use]
    pub fn from_properties(content: &str) -> Self {
        Self {
            properties: parse_properties(content),
            source: SettingsSource::Inline,
            load_failure: None,
        }
    }

    pub(super) const fn with_source(
        properties: BTreeMap<String, String>,
        source: SettingsSource,
    ) -> Self {
        Self {
            properties,
            source,
            load_failure: None,
        }
    }

    pub(super) fn unreadable(reason: String) -> Self {
        Self {
            load_failure: Some(reason),
            ..Self::defaults()
        }
    }

    #[must_use]
    pub const fn source(&self) -> &SettingsSource {
        &self.source
    }

    /// Why a configuration file was skipped, when it existed but could not
    /// be read.
    #[must_use]
    pub fn load_failure(&self) -> Option<&str> {
        self.load_failure.as_deref()
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        self.property_or(keys::BASE_URL, defaults::BASE_URL)
    }

    #[must_use]
    pub fn environment(&self) -> &str {
        self.property_or(keys::ENVIRONMENT, defaults::ENVIRONMENT)
    }

    #[must_use]
    pub fn request_timeout_ms(&self) -> u64 {
        self.parsed_or(keys::REQUEST_TIMEOUT_MS, defaults::REQUEST_TIMEOUT_MS)
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms())
    }

    /// Exposed for callers; the HTTP client never retries.
    #[must_use]
    pub fn max_retries(&self) -> u32 {
        self.parsed_or(keys::MAX_RETRIES, defaults::MAX_RETRIES)
    }

    #[must_use]
    pub fn logging_enabled(&self) -> bool {
        match self.property(keys::LOGGING_ENABLED) {
            None => defaults::LOGGING_ENABLED,
            Some(raw) => parse_bool(raw).unwrap_or_else(|| {
                warn!(
                    key = keys::LOGGING_ENABLED,
                    value = raw,
                    "Malformed boolean, using default"
                );
                defaults::LOGGING_ENABLED
            }),
        }
    }

    #[must_use]
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn property_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.property(key).unwrap_or(default)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.properties
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Strictly checks every typed key that is present.
    ///
    /// # Errors
    ///
    /// Returns the first key whose value does not parse as its expected type.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.check_url(keys::BASE_URL)?;
        self.strict_parse::<u64>(keys::REQUEST_TIMEOUT_MS)?;
        self.strict_parse::<u32>(keys::MAX_RETRIES)?;
        self.check_bool(keys::LOGGING_ENABLED)
    }

    /// Every problem found while resolving: an unreadable file and each
    /// malformed typed value. The lenient accessors already fell back to
    /// defaults for all of them.
    #[must_use]
    pub fn diagnostics(&self) -> Vec<String> {
        let checks = [
            self.check_url(keys::BASE_URL),
            self.strict_parse::<u64>(keys::REQUEST_TIMEOUT_MS),
            self.strict_parse::<u32>(keys::MAX_RETRIES),
            self.check_bool(keys::LOGGING_ENABLED),
        ];
        self.load_failure
            .iter()
            .cloned()
            .chain(checks.into_iter().filter_map(Result::err).map(|err| err.to_string()))
            .collect()
    }

    fn check_url(&self, key: &'static str) -> Result<(), ConfigError> {
        if let Some(raw) = self.property(key) {
            url::Url::parse(raw).map_err(|err| ConfigError::InvalidUrl {
                key,
                value: raw.to_owned(),
                source: err,
            })?;
        }
        Ok(())
    }

    fn check_bool(&self, key: &'static str) -> Result<(), ConfigError> {
        match self.property(key) {
            Some(raw) if parse_bool(raw).is_none() => Err(ConfigError::InvalidBoolean {
                key,
                value: raw.to_owned(),
            }),
            Some(_) | None => Ok(()),
        }
    }

    fn strict_parse<T>(&self, key: &'static str) -> Result<(), ConfigError>
    where
        T: std::str::FromStr<Err = std::num::ParseIntError>,
    {
        if let Some(raw) = self.property(key) {
            raw.trim()
                .parse::<T>()
                .map_err(|err| ConfigError::InvalidInteger {
                    key,
                    value: raw.to_owned(),
                    source: err,
                })?;
        }
        Ok(())
    }

    fn parsed_or<T>(&self, key: &str, default: T) -> T
    where
        T: std::str::FromStr + Copy,
    {
        let Some(raw) = self.property(key) else {
            return default;
        };
        raw.trim().parse::<T>().unwrap_or_else(|_| {
            warn!(key, value = raw, "Malformed number, using default");
            default
        })
    }
}
