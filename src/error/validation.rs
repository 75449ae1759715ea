use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid query parameter '{value}'. Expected 'key=value'.")]
    InvalidQueryParam { value: String },
    #[error("Query parameter key must not be empty in '{value}'.")]
    EmptyQueryKey { value: String },
    #[error("Invalid JSON body: {source}")]
    InvalidJsonBody {
        #[source]
        source: serde_json::Error,
    },
    #[error("Path '{value}' must start with '/'.")]
    PathMissingSlash { value: String },
}
