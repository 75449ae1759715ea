use std::borrow::Cow;
use std::time::{Duration, Instant};

use reqwest::header::{CONTENT_TYPE, HeaderMap};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::error::HttpError;
use crate::model::Country;

/// A fully buffered response.
///
/// Status, headers and body are passed through as the transport returned
/// them. Non-2xx statuses are ordinary responses.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: StatusCode,
    headers: HeaderMap,
    url: Url,
    body: Vec<u8>,
    elapsed: Duration,
}

impl ApiResponse {
    pub(crate) fn read(
        response: reqwest::blocking::Response,
        started: Instant,
    ) -> Result<Self, HttpError> {
        let status = response.status();
        let headers = response.headers().clone();
        let url = response.url().clone();
        let body = response
            .bytes()
            .map_err(|err| HttpError::ReadBodyFailed {
                url: url.to_string(),
                source: err,
            })?
            .to_vec();
        let elapsed = started.elapsed();
        Ok(Self {
            status,
            headers,
            url,
            body,
            elapsed,
        })
    }

    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    #[must_use]
    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    #[must_use]
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
    }

    /// Final URL of the request, including any query string.
    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }

    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    #[must_use]
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// Time from dispatch until the body was fully read.
    #[must_use]
    pub const fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Decodes the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error when the body is not valid JSON for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, HttpError> {
        serde_json::from_slice(&self.body).map_err(|err| HttpError::DecodeBody { source: err })
    }

    /// Decodes the body as an array of country records.
    ///
    /// # Errors
    ///
    /// Returns an error when the body is not a JSON array of objects.
    pub fn countries(&self) -> Result<Vec<Country>, HttpError> {
        self.json()
    }
}
