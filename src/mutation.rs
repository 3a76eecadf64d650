//! Create/update/delete/toggle/action requests against a resource.
//!
//! A mutation never touches a list binding directly. On success the caller
//! gets a refetch ticket for the binding, so the list is resynchronised with
//! the same page, filter and search; on failure the binding keeps its data.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::api::{ApiRequest, Method, Transport, extract_message};
use crate::binding::{FetchTicket, RemoteListBinding};
use crate::error::{BackofficeError, Result};
use crate::resources::Resource;

#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    Create {
        fields: Map<String, Value>,
    },
    Update {
        id: String,
        fields: Map<String, Value>,
    },
    Delete {
        id: String,
    },
    Toggle {
        id: String,
    },
    Action {
        name: String,
        id: String,
        value: Option<String>,
    },
}

impl Mutation {
    fn verb(&self) -> &str {
        match self {
            Mutation::Create { .. } => "create",
            Mutation::Update { .. } => "update",
            Mutation::Delete { .. } => "delete",
            Mutation::Toggle { .. } => "update",
            Mutation::Action { name, .. } => name,
        }
    }

    /// Resolve into a request for `resource`.
    pub fn request(&self, resource: &Resource) -> Result<ApiRequest> {
        match self {
            Mutation::Create { fields } => {
                if !resource.crud {
                    return Err(resource.unsupported("create"));
                }
                Ok(ApiRequest::new(Method::Post, resource.endpoint)
                    .with_body(Value::Object(fields.clone())))
            }
            Mutation::Update { id, fields } => {
                if !resource.crud {
                    return Err(resource.unsupported("update"));
                }
                if fields.is_empty() {
                    return Err(BackofficeError::InvalidInput(
                        "update needs at least one field".to_string(),
                    ));
                }
                Ok(ApiRequest::new(Method::Put, resource.item_path(id)?)
                    .with_body(Value::Object(fields.clone())))
            }
            Mutation::Delete { id } => {
                if !resource.crud {
                    return Err(resource.unsupported("delete"));
                }
                Ok(ApiRequest::new(Method::Delete, resource.item_path(id)?))
            }
            Mutation::Toggle { id } => {
                let suffix = resource.toggle.ok_or_else(|| resource.unsupported("toggle"))?;
                Ok(ApiRequest::new(
                    Method::Patch,
                    format!("{}/{suffix}", resource.item_path(id)?),
                ))
            }
            Mutation::Action { name, id, value } => {
                let action = resource.action(name)?;
                let path = format!("{}/{}", resource.item_path(id)?, action.suffix);
                let request = ApiRequest::new(action.method, path);
                match (action.value_key, value) {
                    (Some(key), Some(value)) => {
                        if key == "status" {
                            resource.check_status(value)?;
                        }
                        let mut body = Map::new();
                        body.insert(key.to_string(), Value::String(value.clone()));
                        Ok(request.with_body(Value::Object(body)))
                    }
                    (Some(key), None) => Err(BackofficeError::InvalidInput(format!(
                        "action '{}' needs a value for '{key}'",
                        action.name
                    ))),
                    (None, Some(_)) => Err(BackofficeError::InvalidInput(format!(
                        "action '{}' does not take a value",
                        action.name
                    ))),
                    (None, None) => Ok(request),
                }
            }
        }
    }

    /// Message shown when the server does not send one.
    pub fn success_message(&self, resource: &Resource) -> String {
        let noun = capitalize(resource.noun);
        match self {
            Mutation::Create { .. } => format!("{noun} created"),
            Mutation::Update { .. } => format!("{noun} updated"),
            Mutation::Delete { .. } => format!("{noun} deleted"),
            Mutation::Toggle { .. } => format!("{noun} updated"),
            Mutation::Action { name, .. } => resource
                .action(name)
                .map(|a| a.success.to_string())
                .unwrap_or_else(|_| "Done".to_string()),
        }
    }

    /// Message shown when a failure carries nothing more specific.
    pub fn failure_message(&self, resource: &Resource) -> String {
        format!("Failed to {} {}", self.verb(), resource.noun)
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MutationOutcome {
    pub message: String,
    pub body: Value,
}

/// Applies mutations through a transport.
#[derive(Clone)]
pub struct Mutator {
    transport: Arc<dyn Transport>,
}

impl Mutator {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub async fn apply(&self, resource: &Resource, mutation: &Mutation) -> Result<MutationOutcome> {
        let request = mutation.request(resource)?;
        tracing::info!(
            resource = resource.name,
            method = %request.method,
            path = %request.path,
            "applying mutation"
        );
        let body = self.transport.send(request).await?;
        let message = extract_message(Some(&body))
            .unwrap_or_else(|| mutation.success_message(resource));
        Ok(MutationOutcome { message, body })
    }
}

/// What the user is told after a mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    Success(String),
    Error(String),
}

impl Feedback {
    pub fn from_result(result: &Result<MutationOutcome>, fallback: &str) -> Self {
        match result {
            Ok(outcome) => Feedback::Success(outcome.message.clone()),
            Err(e) => Feedback::Error(error_message(e, fallback)),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Feedback::Success(m) | Feedback::Error(m) => m,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Feedback::Error(_))
    }
}

/// User-facing text for a failed request.
pub fn error_message(error: &BackofficeError, fallback: &str) -> String {
    match error {
        BackofficeError::Validation { .. } => error
            .first_field_message()
            .map(str::to_string)
            .unwrap_or_else(|| error.to_string()),
        BackofficeError::Http { body, .. } => {
            extract_message(body.as_ref()).unwrap_or_else(|| fallback.to_string())
        }
        BackofficeError::Unauthorized(_) => {
            "Session expired. Update the API token and try again".to_string()
        }
        BackofficeError::Transport(_) => fallback.to_string(),
        other => other.to_string(),
    }
}

/// Apply a mutation and, only if it succeeded, return the binding's refetch
/// ticket alongside the feedback.
pub async fn mutate_and_refetch<T: Send + 'static>(
    mutator: &Mutator,
    resource: &Resource,
    mutation: &Mutation,
    binding: &RemoteListBinding<T>,
) -> (Feedback, Option<FetchTicket>) {
    let result = mutator.apply(resource, mutation).await;
    let feedback = Feedback::from_result(&result, &mutation.failure_message(resource));
    match result {
        Ok(_) => (feedback, binding.refetch()),
        Err(e) => {
            tracing::warn!(resource = resource.name, error = %e, "mutation failed");
            (feedback, None)
        }
    }
}
