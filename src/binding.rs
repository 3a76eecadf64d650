//! Remote list binding: keeps a fetched page in sync with a query.
//!
//! A [`RemoteListBinding`] is bound to an `(endpoint, query)` pair. Each
//! distinct pair issues exactly one request, stamped with a generation
//! number; a response is applied only while its generation is still the
//! latest, so the last request issued always wins no matter in which order
//! responses arrive.
//!
//! Issuing and performing a request are split: [`RemoteListBinding::bind`]
//! and [`RemoteListBinding::refetch`] hand out a [`FetchTicket`], and
//! [`RemoteListBinding::run`] performs it. Callers that do not care about the
//! split use [`RemoteListBinding::fetch`].

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::error::Result;
use crate::query::QuerySpec;

/// One page of a remote collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultPage<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub total_pages: u32,
    pub total_count: u64,
}

impl<T> ResultPage<T> {
    /// Page 1 of 1 with no items.
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            page: 1,
            total_pages: 1,
            total_count: 0,
        }
    }
}

impl<T> Default for ResultPage<T> {
    fn default() -> Self {
        Self::empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FetchStatus<T> {
    #[default]
    Idle,
    Loading,
    Success(ResultPage<T>),
    Failure(String),
}

impl<T> FetchStatus<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchStatus::Loading)
    }

    pub fn page(&self) -> Option<&ResultPage<T>> {
        match self {
            FetchStatus::Success(page) => Some(page),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FetchStatus::Failure(message) => Some(message),
            _ => None,
        }
    }
}

/// Fetches one page of `T` for an endpoint and query.
#[async_trait]
pub trait PageSource<T>: Send + Sync {
    async fn fetch_page(&self, endpoint: &str, query: &QuerySpec) -> Result<ResultPage<T>>;
}

/// Record of one issued request. Running a ticket whose generation has been
/// superseded still performs the request, but its result is dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    endpoint: String,
    query: QuerySpec,
}

impl FetchTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn query(&self) -> &QuerySpec {
        &self.query
    }
}

struct BindingState<T> {
    generation: u64,
    bound: Option<(Option<String>, QuerySpec)>,
    status: FetchStatus<T>,
}

pub struct RemoteListBinding<T> {
    source: Arc<dyn PageSource<T>>,
    state: Arc<Mutex<BindingState<T>>>,
}

impl<T> Clone for RemoteListBinding<T> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            state: Arc::clone(&self.state),
        }
    }
}

impl<T: Send + 'static> RemoteListBinding<T> {
    pub fn new(source: Arc<dyn PageSource<T>>) -> Self {
        Self {
            source,
            state: Arc::new(Mutex::new(BindingState {
                generation: 0,
                bound: None,
                status: FetchStatus::Idle,
            })),
        }
    }

    /// Bind to an endpoint and query.
    ///
    /// Returns a ticket when a request must be issued. A pair equal to the
    /// current one issues nothing. A `None` endpoint succeeds immediately with
    /// an empty page and supersedes any request in flight.
    pub fn bind(&self, endpoint: Option<&str>, query: &QuerySpec) -> Option<FetchTicket> {
        let mut state = self.state.lock();
        let key = (endpoint.map(str::to_string), query.clone());
        if state.bound.as_ref() == Some(&key) {
            return None;
        }

        state.generation += 1;
        state.bound = Some(key);

        match endpoint {
            None => {
                state.status = FetchStatus::Success(ResultPage::empty());
                None
            }
            Some(endpoint) => {
                state.status = FetchStatus::Loading;
                Some(FetchTicket {
                    generation: state.generation,
                    endpoint: endpoint.to_string(),
                    query: query.clone(),
                })
            }
        }
    }

    /// Re-issue the current query unchanged. Nothing happens while unbound or
    /// bound to a `None` endpoint.
    pub fn refetch(&self) -> Option<FetchTicket> {
        let mut state = self.state.lock();
        let (endpoint, query) = match &state.bound {
            Some((Some(endpoint), query)) => (endpoint.clone(), query.clone()),
            _ => return None,
        };

        state.generation += 1;
        state.status = FetchStatus::Loading;
        Some(FetchTicket {
            generation: state.generation,
            endpoint,
            query,
        })
    }

    /// Perform the request for a ticket. Returns whether its result was applied.
    pub async fn run(&self, ticket: FetchTicket) -> bool {
        let result = self
            .source
            .fetch_page(&ticket.endpoint, &ticket.query)
            .await;

        let mut state = self.state.lock();
        if state.generation != ticket.generation {
            tracing::debug!(
                endpoint = %ticket.endpoint,
                stale = ticket.generation,
                current = state.generation,
                "discarding stale response"
            );
            return false;
        }

        state.status = match result {
            Ok(page) => FetchStatus::Success(page),
            Err(e) => {
                tracing::warn!(endpoint = %ticket.endpoint, error = %e, "list fetch failed");
                FetchStatus::Failure(e.to_string())
            }
        };
        true
    }

    /// Bind and, if a request was issued, run it.
    pub async fn fetch(&self, endpoint: Option<&str>, query: &QuerySpec) -> bool {
        match self.bind(endpoint, query) {
            Some(ticket) => self.run(ticket).await,
            None => false,
        }
    }

    /// Inspect the current status without cloning it.
    pub fn with_status<R>(&self, f: impl FnOnce(&FetchStatus<T>) -> R) -> R {
        f(&self.state.lock().status)
    }

    pub fn is_loading(&self) -> bool {
        self.with_status(FetchStatus::is_loading)
    }

    pub fn generation(&self) -> u64 {
        self.state.lock().generation
    }

    pub fn endpoint(&self) -> Option<String> {
        self.state
            .lock()
            .bound
            .as_ref()
            .and_then(|(endpoint, _)| endpoint.clone())
    }

    pub fn query(&self) -> Option<QuerySpec> {
        self.state.lock().bound.as_ref().map(|(_, q)| q.clone())
    }
}

impl<T: Clone + Send + 'static> RemoteListBinding<T> {
    pub fn status(&self) -> FetchStatus<T> {
        self.state.lock().status.clone()
    }
}
