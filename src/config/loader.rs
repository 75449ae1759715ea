use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::parse::parse_properties;
use super::types::{Settings, SettingsSource};

/// Environment variable naming a properties file to load.
pub const CONFIG_ENV_VAR: &str = "COUNTRIES_PROBE_CONFIG";
/// Properties file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "config.properties";

impl Settings {
    /// Resolves settings from, in order: `explicit`, the path named by
    /// [`CONFIG_ENV_VAR`], [`DEFAULT_CONFIG_FILE`] in the working directory,
    /// and finally the built-in defaults.
    #[must_use]
    pub fn load(explicit: Option<&Path>) -> Self {
        if let Some(path) = explicit {
            return Self::from_path(path);
        }

        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR) {
            return Self::from_path(&PathBuf::from(path));
        }

        let default_path = Path::new(DEFAULT_CONFIG_FILE);
        if default_path.exists() {
            return Self::from_path(default_path);
        }

        debug!("No configuration file found, using defaults");
        Self::defaults()
    }

    /// Reads a properties file. A missing or unreadable file degrades to
    /// defaults and is never reported as an error.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                debug!(path = %path.display(), "Loaded configuration");
                Self::with_source(
                    parse_properties(&content),
                    SettingsSource::File(path.to_path_buf()),
                )
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "Configuration file not found, using defaults");
                Self::defaults()
            }
            Err(err) => {
                warn!(path = %path.display(), "Failed to load configuration file: {}", err);
                Self::unreadable(format!(
                    "Failed to load configuration file {}: {}",
                    path.display(),
                    err
                ))
            }
        }
    }
}
