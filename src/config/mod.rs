//! Configuration loading and typed access.
mod loader;
mod parse;
mod types;


pub use loader::{CONFIG_ENV_VAR, DEFAULT_CONFIG_FILE};
pub use types::{Settings, SettingsSource, defaults, keys};
