use std::time::{Duration, Instant};

use reqwest::blocking::{Client, Request};
use reqwest::header::{CONTENT_TYPE, HeaderValue, USER_AGENT as USER_AGENT_HEADER};
use reqwest::{Method, Url};
use serde::Serialize;
use tracing::info;

use crate::config::Settings;
use crate::error::{AppError, AppResult, HttpError};

use super::request::{HttpMethod, QueryParams, RequestSpec};
use super::response::ApiResponse;

pub const USER_AGENT: &str = "RestCountriesTestSuite/1.0";
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Blocking client for the country-data API.
///
/// Every call resolves `base_url + path`, attaches the JSON content type and
/// the fixed User-Agent, sends the request and returns the buffered response.
/// The client adds no retries and keeps no per-request state, so one instance
/// can be shared across threads.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl ApiClient {
    /// Builds a client targeting the configured base URL.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying HTTP client cannot be built.
    pub fn new(settings: &Settings) -> AppResult<Self> {
        Self::with_base_url(settings, settings.base_url())
    }

    /// Builds a client targeting `base_url` instead of the configured one. The
    /// timeout still comes from `settings`.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying HTTP client cannot be built.
    pub fn with_base_url(settings: &Settings, base_url: impl Into<String>) -> AppResult<Self> {
        let timeout = settings.request_timeout();
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| AppError::http(HttpError::BuildClientFailed { source: err }))?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            timeout,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// # Errors
    ///
    /// Returns an error on URL resolution or transport failure.
    pub fn get(&self, path: &str) -> AppResult<ApiResponse> {
        self.execute(&RequestSpec::new(HttpMethod::Get, path))
    }

    /// Sends a GET with `query` appended. An empty map appends nothing.
    ///
    /// # Errors
    ///
    /// Returns an error on URL resolution or transport failure.
    pub fn get_with_query(&self, path: &str, query: &QueryParams) -> AppResult<ApiResponse> {
        self.execute(&RequestSpec::new(HttpMethod::Get, path).with_query(query))
    }

    /// # Errors
    ///
    /// Returns an error on URL resolution, body serialization, or transport
    /// failure.
    pub fn post<B>(&self, path: &str, body: &B) -> AppResult<ApiResponse>
    where
        B: Serialize + ?Sized,
    {
        self.execute(&RequestSpec::new(HttpMethod::Post, path).with_body(body))
    }

    /// # Errors
    ///
    /// Returns an error on URL resolution, body serialization, or transport
    /// failure.
    pub fn put<B>(&self, path: &str, body: &B) -> AppResult<ApiResponse>
    where
        B: Serialize + ?Sized,
    {
        self.execute(&RequestSpec::new(HttpMethod::Put, path).with_body(body))
    }

    /// # Errors
    ///
    /// Returns an error on URL resolution or transport failure.
    pub fn delete(&self, path: &str) -> AppResult<ApiResponse> {
        self.execute(&RequestSpec::new(HttpMethod::Delete, path))
    }

    /// # Errors
    ///
    /// Returns an error on URL resolution or transport failure.
    pub fn head(&self, path: &str) -> AppResult<ApiResponse> {
        self.execute(&RequestSpec::new(HttpMethod::Head, path))
    }

    /// Resolves the target URL: the base URL with `path` appended verbatim.
    ///
    /// # Errors
    ///
    /// Returns an error when the concatenation is not a valid URL.
    pub fn resolve_url(&self, path: &str) -> AppResult<Url> {
        let raw = format!("{}{}", self.base_url, path);
        Url::parse(&raw)
            .map_err(|err| AppError::http(HttpError::InvalidUrl { url: raw, source: err }))
    }

    /// Builds the request for `spec` without sending it.
    ///
    /// # Errors
    ///
    /// Returns an error when the URL is invalid or the body cannot be
    /// serialized.
    pub fn build_request<B>(&self, spec: &RequestSpec<'_, B>) -> AppResult<Request>
    where
        B: Serialize + ?Sized,
    {
        let url = self.resolve_url(spec.path)?;
        let mut builder = self
            .client
            .request(to_reqwest_method(spec.method), url)
            .header(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE))
            .header(USER_AGENT_HEADER, HeaderValue::from_static(USER_AGENT));

        if let Some(query) = spec.effective_query() {
            builder = builder.query(query);
        }
        if let Some(body) = spec.body {
            builder = builder.json(body);
        }

        builder
            .build()
            .map_err(|err| AppError::http(HttpError::BuildRequestFailed { source: err }))
    }

    /// Builds, logs and sends one request, then buffers the whole response.
    ///
    /// # Errors
    ///
    /// Returns an error on URL resolution, body serialization, transport
    /// failure (including timeouts), or when the body cannot be read. Non-2xx
    /// statuses are returned as ordinary responses.
    pub fn execute<B>(&self, spec: &RequestSpec<'_, B>) -> AppResult<ApiResponse>
    where
        B: Serialize + ?Sized,
    {
        let request = self.build_request(spec)?;
        let url = request.url().to_string();
        info!("{} request to: {}", spec.method, url);

        let started = Instant::now();
        let response = self.client.execute(request).map_err(|err| {
            AppError::http(HttpError::RequestFailed {
                method: spec.method.as_str(),
                url,
                source: err,
            })
        })?;
        ApiResponse::read(response, started).map_err(AppError::http)
    }
}

const fn to_reqwest_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Delete => Method::DELETE,
        HttpMethod::Head => Method::HEAD,
    }
}
