//! Request building and execution against the country-data API.
mod client;
mod request;
mod response;

#[cfg(test)]
pub(crate) mod test_support;

pub use client::{ApiClient, JSON_CONTENT_TYPE, USER_AGENT};
pub use request::{HttpMethod, QueryParams, RequestSpec};
pub use response::ApiResponse;
