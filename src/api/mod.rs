//! HTTP access to the back office REST API.
//!
//! # Security Note - Logging
//!
//! The bearer token is written through the `RedactedHeader` wrapper, which
//! implements `Display` and `Debug` as `[REDACTED]`, so the token never shows
//! up in tracing output even with `RUST_LOG=reqwest=debug`.

pub mod envelope;
pub mod error;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header;
use serde_json::Value;

use crate::error::{BackofficeError, Result};
use crate::session::Session;

pub use envelope::{EnvelopeSource, PageMeta, parse_page};
pub use error::{error_from_response, extract_message};

/// Default total request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Wrapper for sensitive header values that redacts the value when formatted.
struct RedactedHeader {
    value: String,
}

impl RedactedHeader {
    fn new(value: String) -> Self {
        Self { value }
    }

    fn as_header_value(&self) -> Result<header::HeaderValue> {
        let mut value = header::HeaderValue::from_str(&self.value).map_err(|_| {
            BackofficeError::Config("API token contains invalid header characters".to_string())
        })?;
        value.set_sensitive(true);
        Ok(value)
    }
}

impl fmt::Display for RedactedHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED]")
    }
}

impl fmt::Debug for RedactedHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedactedHeader")
            .field("value", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }

    fn to_reqwest(self) -> reqwest::Method {
        match self {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One request against the API, relative to the session base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Sends requests and returns the decoded JSON body of successful responses.
///
/// Non-2xx responses come back as errors built by [`error_from_response`].
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<Value>;
}

/// reqwest-backed transport that authenticates with the session token.
pub struct ApiClient {
    client: Client,
    session: Arc<Session>,
}

impl ApiClient {
    /// Configures the HTTP client with a 30s connect timeout and the given total timeout.
    pub fn new(session: Arc<Session>, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs.max(1)))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()?;

        Ok(Self { client, session })
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }
}

#[async_trait]
impl Transport for ApiClient {
    async fn send(&self, request: ApiRequest) -> Result<Value> {
        let url = self.session.resolve(&request.path)?;
        tracing::debug!(method = %request.method, %url, query = ?request.query, "sending request");

        let mut builder = self
            .client
            .request(request.method.to_reqwest(), url)
            .header(
                header::ACCEPT,
                header::HeaderValue::from_static("application/json"),
            );

        if let Some(bearer) = self.session.bearer() {
            let auth_header = RedactedHeader::new(bearer);
            builder = builder.header(header::AUTHORIZATION, auth_header.as_header_value()?);
        }
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;
        let body = if text.trim().is_empty() {
            None
        } else {
            serde_json::from_str::<Value>(&text).ok()
        };

        tracing::debug!(status = status.as_u16(), path = %request.path, "received response");

        if !status.is_success() {
            if status == reqwest::StatusCode::UNAUTHORIZED {
                self.session.invalidate();
            }
            return Err(error_from_response(status.as_u16(), body));
        }

        Ok(body.unwrap_or(Value::Null))
    }
}
