//! Response envelope parsing.
//!
//! Lists come back as `{"data": [...], "meta": {...}}` when paginated and as
//! `{"data": [...]}` otherwise. Anything else is rejected rather than guessed
//! at.

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::binding::{PageSource, ResultPage};
use crate::error::{BackofficeError, Result};
use crate::query::QuerySpec;

use super::{ApiRequest, Transport};

/// Pagination block of a paginated envelope.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PageMeta {
    #[serde(default)]
    pub current_page: Option<u32>,
    pub last_page: u32,
    pub total: u64,
    #[serde(default)]
    pub per_page: Option<u32>,
}

const TOP_LEVEL_PAGINATION_KEYS: [&str; 3] = ["current_page", "last_page", "total"];

fn violation(endpoint: &str, detail: impl Into<String>) -> BackofficeError {
    let detail = detail.into();
    tracing::warn!(%endpoint, %detail, "response envelope violation");
    BackofficeError::Envelope(format!("{endpoint}: {detail}"))
}

/// Parse a list response body into a [`ResultPage`].
///
/// `requested_page` fills in the page number when `meta.current_page` is absent.
pub fn parse_page<T: DeserializeOwned>(
    endpoint: &str,
    body: Value,
    requested_page: u32,
) -> Result<ResultPage<T>> {
    let Value::Object(mut map) = body else {
        return Err(violation(endpoint, "expected a JSON object"));
    };

    if let Some(key) = TOP_LEVEL_PAGINATION_KEYS
        .iter()
        .find(|k| map.contains_key(**k))
    {
        return Err(violation(
            endpoint,
            format!("pagination field '{key}' at top level, expected it under 'meta'"),
        ));
    }

    let data = match map.remove("data") {
        Some(Value::Array(items)) => items,
        Some(Value::Object(_)) => {
            return Err(violation(endpoint, "nested 'data' object, expected an array"));
        }
        Some(_) => return Err(violation(endpoint, "'data' is not an array")),
        None => return Err(violation(endpoint, "missing 'data'")),
    };

    let items: Vec<T> = data
        .into_iter()
        .map(serde_json::from_value)
        .collect::<std::result::Result<_, _>>()
        .map_err(|e| violation(endpoint, format!("invalid item: {e}")))?;

    match map.remove("meta") {
        Some(meta) => {
            let meta: PageMeta = serde_json::from_value(meta)
                .map_err(|e| violation(endpoint, format!("invalid 'meta': {e}")))?;
            Ok(ResultPage {
                items,
                page: meta.current_page.unwrap_or(requested_page).max(1),
                total_pages: meta.last_page.max(1),
                total_count: meta.total,
            })
        }
        None => Ok(ResultPage {
            total_count: items.len() as u64,
            items,
            page: 1,
            total_pages: 1,
        }),
    }
}

/// [`PageSource`] that GETs the endpoint through a [`Transport`] and parses
/// the envelope.
pub struct EnvelopeSource<T> {
    transport: Arc<dyn Transport>,
    _items: PhantomData<fn() -> T>,
}

impl<T> EnvelopeSource<T> {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            _items: PhantomData,
        }
    }
}

#[async_trait]
impl<T: DeserializeOwned + Send + 'static> PageSource<T> for EnvelopeSource<T> {
    async fn fetch_page(&self, endpoint: &str, query: &QuerySpec) -> Result<ResultPage<T>> {
        let request = ApiRequest::get(endpoint).with_query(query.to_query_pairs());
        let body = self.transport.send(request).await?;
        parse_page(endpoint, body, query.page())
    }
}
