use std::collections::BTreeMap;
use std::fmt;

use clap::ValueEnum;

/// Query parameters keyed by name. Keys are unique; values are sent as-is.
pub type QueryParams = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Head,
}

impl HttpMethod {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-call request description. Built fresh for every call and dropped once
/// the response has been read; nothing here outlives the call.
#[derive(Debug)]
pub struct RequestSpec<'req, B: ?Sized = serde_json::Value> {
    pub method: HttpMethod,
    pub path: &'req str,
    pub query: Option<&'req QueryParams>,
    pub body: Option<&'req B>,
}

impl<'req> RequestSpec<'req> {
    #[must_use]
    pub const fn new(method: HttpMethod, path: &'req str) -> Self {
        Self {
            method,
            path,
            query: None,
            body: None,
        }
    }
}

impl<'req, B: ?Sized> RequestSpec<'req, B> {
    #[must_use]
    pub fn with_query(mut self, query: &'req QueryParams) -> Self {
        self.query = Some(query);
        self
    }

    #[must_use]
    pub fn with_body<T: ?Sized>(self, body: &'req T) -> RequestSpec<'req, T> {
        RequestSpec {
            method: self.method,
            path: self.path,
            query: self.query,
            body: Some(body),
        }
    }

    /// Query pairs to append, or `None` when absent or empty.
    #[must_use]
    pub fn effective_query(&self) -> Option<&'req QueryParams> {
        self.query.filter(|query| !query.is_empty())
    }
}
