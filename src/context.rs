//! Per-invocation application context.

use std::sync::Arc;

use serde_json::Value;

use crate::api::{ApiClient, EnvelopeSource, Transport};
use crate::binding::{FetchStatus, RemoteListBinding, ResultPage};
use crate::config::Config;
use crate::error::{BackofficeError, Result};
use crate::mutation::Mutator;
use crate::query::QuerySpec;
use crate::resources::Resource;
use crate::session::Session;

/// Configuration, session and transport for one run of the program.
#[derive(Clone)]
pub struct AppContext {
    pub config: Config,
    pub session: Arc<Session>,
    transport: Arc<dyn Transport>,
}

impl AppContext {
    /// Build an HTTP-backed context. Fails if no base URL is configured.
    pub fn from_config(config: Config) -> Result<Self> {
        let base_url = config.require_base_url()?;
        let session = Arc::new(Session::new(&base_url, config.token())?);
        if !session.has_token() {
            tracing::warn!("no API token configured, requests will be unauthenticated");
        }
        let client = ApiClient::new(Arc::clone(&session), config.api.timeout_secs)?;
        Ok(Self::with_transport(config, session, Arc::new(client)))
    }

    pub fn load() -> Result<Self> {
        Self::from_config(Config::load()?)
    }

    pub fn with_transport(
        config: Config,
        session: Arc<Session>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            config,
            session,
            transport,
        }
    }

    pub fn transport(&self) -> Arc<dyn Transport> {
        Arc::clone(&self.transport)
    }

    pub fn list_binding(&self) -> RemoteListBinding<Value> {
        RemoteListBinding::new(Arc::new(EnvelopeSource::new(self.transport())))
    }

    pub fn mutator(&self) -> Mutator {
        Mutator::new(self.transport())
    }

    /// Turn a binding failure message into an error, flagging an expired token.
    pub fn failure(&self, message: String) -> BackofficeError {
        if self.session.is_invalidated() {
            BackofficeError::Unauthorized(format!(
                "{message}. Update the token with: backoffice config set api.token <token>"
            ))
        } else {
            BackofficeError::Other(message)
        }
    }

    /// Fetch one page of a resource through a fresh binding.
    pub async fn fetch_list(
        &self,
        resource: &Resource,
        query: &QuerySpec,
    ) -> Result<ResultPage<Value>> {
        let binding = self.list_binding();
        binding.fetch(Some(resource.endpoint), query).await;
        match binding.status() {
            FetchStatus::Success(page) => Ok(page),
            FetchStatus::Failure(message) => Err(self.failure(message)),
            FetchStatus::Idle | FetchStatus::Loading => Err(BackofficeError::Other(
                "list request did not complete".to_string(),
            )),
        }
    }
}
