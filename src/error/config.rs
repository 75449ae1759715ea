use thiserror::Error;

/// Raised only by strict validation; lenient accessors fall back to defaults.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config key '{key}' has invalid integer '{value}': {source}")]
    InvalidInteger {
        key: &'static str,
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("Config key '{key}' has invalid boolean '{value}'. Expected true or false.")]
    InvalidBoolean { key: &'static str, value: String },
    #[error("Config key '{key}' has invalid URL '{value}': {source}")]
    InvalidUrl {
        key: &'static str,
        value: String,
        #[source]
        source: url::ParseError,
    },
}
