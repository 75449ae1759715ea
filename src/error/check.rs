use thiserror::Error;

use super::{AppError, HttpError};

#[derive(Debug, Error)]
pub enum CheckError {
    #[error("{0}")]
    Assertion(String),
    #[error(transparent)]
    Http(#[from] HttpError),
    #[error("Request failed: {source}")]
    Request {
        #[source]
        source: Box<AppError>,
    },
    #[error("cancelled after {completed}/{total} requests")]
    Cancelled { completed: usize, total: usize },
    #[error("Unknown check '{name}'.")]
    UnknownCheck { name: String },
}

impl From<AppError> for CheckError {
    fn from(value: AppError) -> Self {
        CheckError::Request {
            source: Box::new(value),
        }
    }
}
