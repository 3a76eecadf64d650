//! Row mutations: create, update, delete, toggle and resource actions.

use serde_json::{Map, Value, json};

use super::CommandOutput;
use super::interactive::{self, is_stdin_tty};
use crate::cli::OutputOptions;
use crate::context::AppContext;
use crate::display::format_feedback;
use crate::error::{BackofficeError, Result};
use crate::mutation::{Feedback, Mutation};
use crate::resources;

fn field_map(fields: Vec<(String, Value)>) -> Map<String, Value> {
    fields.into_iter().collect()
}

async fn apply(
    ctx: &AppContext,
    resource_name: &str,
    mutation: Mutation,
    output: OutputOptions,
) -> Result<()> {
    let resource = resources::find(resource_name)?;
    // Resolve first so unsupported operations fail before any prompt or request
    mutation.request(resource)?;

    let outcome = ctx.mutator().apply(resource, &mutation).await?;
    let feedback = Feedback::Success(outcome.message.clone());

    CommandOutput::new(json!({
        "resource": resource.name,
        "success": true,
        "message": outcome.message,
        "data": outcome.body,
    }))
    .with_text(format_feedback(&feedback))
    .print(output)
}

/// Create a record from `key=value` fields
pub async fn cmd_create(
    ctx: &AppContext,
    resource_name: &str,
    fields: Vec<(String, Value)>,
    output: OutputOptions,
) -> Result<()> {
    let mutation = Mutation::Create {
        fields: field_map(fields),
    };
    apply(ctx, resource_name, mutation, output).await
}

/// Update a record with `key=value` fields
pub async fn cmd_update(
    ctx: &AppContext,
    resource_name: &str,
    id: &str,
    fields: Vec<(String, Value)>,
    output: OutputOptions,
) -> Result<()> {
    let mutation = Mutation::Update {
        id: id.to_string(),
        fields: field_map(fields),
    };
    apply(ctx, resource_name, mutation, output).await
}

/// Delete a record
///
/// # Arguments
/// * `force` - Skip confirmation prompt
pub async fn cmd_delete(
    ctx: &AppContext,
    resource_name: &str,
    id: &str,
    force: bool,
    output: OutputOptions,
) -> Result<()> {
    let resource = resources::find(resource_name)?;
    let mutation = Mutation::Delete { id: id.to_string() };
    mutation.request(resource)?;

    if !force {
        if output.json || !is_stdin_tty() {
            return Err(BackofficeError::ConfirmationRequired(format!(
                "Deleting a {} requires --force flag in non-interactive contexts. Use --force to confirm deletion.",
                resource.noun
            )));
        }
        if !interactive::confirm(&format!("Delete {} {id}", resource.noun))? {
            println!("Cancelled");
            return Ok(());
        }
    }

    apply(ctx, resource.name, mutation, output).await
}

/// Flip a record's toggle
pub async fn cmd_toggle(
    ctx: &AppContext,
    resource_name: &str,
    id: &str,
    output: OutputOptions,
) -> Result<()> {
    let mutation = Mutation::Toggle { id: id.to_string() };
    apply(ctx, resource_name, mutation, output).await
}

/// Run a named resource action on a record
pub async fn cmd_action(
    ctx: &AppContext,
    resource_name: &str,
    action: &str,
    id: &str,
    value: Option<String>,
    output: OutputOptions,
) -> Result<()> {
    let mutation = Mutation::Action {
        name: action.to_string(),
        id: id.to_string(),
        value,
    };
    apply(ctx, resource_name, mutation, output).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use async_trait::async_trait;
    use parking_lot::Mutex;

    use crate::api::{ApiRequest, Transport};
    use crate::config::Config;
    use crate::session::Session;

    #[derive(Default)]
    struct RecordingTransport {
        requests: Mutex<Vec<ApiRequest>>,
    }

    #[async_trait]
    impl Transport for RecordingTransport {
        async fn send(&self, request: ApiRequest) -> Result<Value> {
            self.requests.lock().push(request);
            Ok(json!({"message": "ok"}))
        }
    }

    fn context(transport: Arc<RecordingTransport>) -> AppContext {
        let session = Arc::new(Session::new("https://api.example.com", None).unwrap());
        AppContext::with_transport(Config::default(), session, transport)
    }

    #[tokio::test]
    async fn test_delete_without_force_is_refused_for_json() {
        let transport = Arc::new(RecordingTransport::default());
        let ctx = context(Arc::clone(&transport));
        let err = cmd_delete(&ctx, "blog", "3", false, OutputOptions { json: true })
            .await
            .unwrap_err();
        assert!(matches!(err, BackofficeError::ConfirmationRequired(_)));
        assert!(transport.requests.lock().is_empty());
    }

    #[tokio::test]
    async fn test_unsupported_fails_before_request() {
        let transport = Arc::new(RecordingTransport::default());
        let ctx = context(Arc::clone(&transport));
        let err = cmd_delete(&ctx, "users", "3", true, OutputOptions { json: true })
            .await
            .unwrap_err();
        assert!(matches!(err, BackofficeError::Unsupported { .. }));
        assert!(transport.requests.lock().is_empty());
    }

    #[tokio::test]
    async fn test_toggle_sends_request() {
        let transport = Arc::new(RecordingTransport::default());
        let ctx = context(Arc::clone(&transport));
        cmd_toggle(&ctx, "users", "7", OutputOptions { json: true })
            .await
            .unwrap();
        let requests = transport.requests.lock();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].path, "/admin/users/7/toggle-archive");
    }
}
