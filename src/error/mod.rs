mod app;
mod check;
mod config;
mod http;
mod validation;

pub use app::{AppError, AppResult};
pub use check::CheckError;
pub use config::ConfigError;
pub use http::HttpError;
pub use validation::ValidationError;
