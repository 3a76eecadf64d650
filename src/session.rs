//! Authentication context shared by everything that talks to the API.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use secrecy::{ExposeSecret, SecretBox};
use url::Url;

use crate::error::{BackofficeError, Result};

/// Base URL and bearer token for one API session.
///
/// A 401 response marks the session invalid; later requests still go out,
/// but commands report that the token needs refreshing.
pub struct Session {
    base_url: Url,
    token: Option<SecretBox<String>>,
    invalidated: AtomicBool,
}

impl Session {
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self> {
        let mut base_url = Url::parse(base_url).map_err(|e| {
            BackofficeError::Config(format!("invalid API base URL '{base_url}': {e}"))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(BackofficeError::Config(format!(
                "API base URL '{base_url}' cannot be used as a base"
            )));
        }
        // Url::join drops the last segment unless the path ends with '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            base_url,
            token: token
                .filter(|t| !t.is_empty())
                .map(|t| SecretBox::new(Box::new(t))),
            invalidated: AtomicBool::new(false),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve an API path such as `/admin/users` against the base URL.
    pub fn resolve(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| BackofficeError::InvalidInput(format!("invalid API path '{path}': {e}")))
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    pub(crate) fn bearer(&self) -> Option<String> {
        self.token
            .as_ref()
            .map(|t| format!("Bearer {}", t.expose_secret()))
    }

    pub fn invalidate(&self) {
        if !self.invalidated.swap(true, Ordering::SeqCst) {
            tracing::warn!("session invalidated by 401 response");
        }
    }

    pub fn is_invalidated(&self) -> bool {
        self.invalidated.load(Ordering::SeqCst)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("base_url", &self.base_url.as_str())
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("invalidated", &self.is_invalidated())
            .finish()
    }
}
