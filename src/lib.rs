//! Test client for the REST Countries API.
//!
//! [`config::Settings`] resolves the environment once from a properties file
//! (or built-in defaults) and is handed to [`http::ApiClient`], a blocking
//! façade that sends GET/POST/PUT/DELETE/HEAD requests and returns the
//! buffered response untouched. Responses decode into [`model::Country`]
//! records. [`checks`] holds the smoke suite run by the `countries-probe`
//! binary, and [`sequence`] paces request loops with cooperative
//! cancellation.
pub mod args;
pub mod checks;
pub mod config;
pub mod entry;
pub mod error;
pub mod http;
pub mod logger;
pub mod model;
pub mod sequence;
pub mod shutdown;
pub mod shutdown_handlers;
