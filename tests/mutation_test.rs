#[path = "common/mod.rs"]
mod common;

use std::sync::Arc;

use serde_json::{Map, Value, json};

use backoffice::api::{EnvelopeSource, Method};
use backoffice::mutation::{Feedback, Mutation, Mutator, mutate_and_refetch};
use backoffice::resources::find;
use backoffice::{QuerySpec, RemoteListBinding};
use common::fake_api::FakeApi;

fn setup(count: u64) -> (Arc<FakeApi>, RemoteListBinding<Value>, Mutator) {
    let api = Arc::new(FakeApi::with_users(count));
    let binding = RemoteListBinding::new(Arc::new(EnvelopeSource::new(api.clone())));
    let mutator = Mutator::new(api.clone());
    (api, binding, mutator)
}

#[tokio::test]
async fn test_validation_error_surfaces_first_field_message() {
    let (api, binding, mutator) = setup(3);
    let users = find("users").unwrap();
    binding
        .fetch(Some(users.endpoint), &QuerySpec::new(15))
        .await;
    let before = binding.status();
    let generation = binding.generation();

    api.fail_next(
        422,
        Some(json!({
            "message": "The given data was invalid.",
            "errors": {"email": ["Email is required"], "name": ["Name is required"]}
        })),
    );
    let admins = find("admin-users").unwrap();
    let mutation = Mutation::Create { fields: Map::new() };

    let (feedback, ticket) = mutate_and_refetch(&mutator, admins, &mutation, &binding).await;

    assert_eq!(feedback, Feedback::Error("Email is required".to_string()));
    assert!(ticket.is_none());
    assert_eq!(binding.status(), before);
    assert_eq!(binding.generation(), generation);
}

#[tokio::test]
async fn test_server_error_without_message_uses_fallback() {
    let (api, binding, mutator) = setup(3);
    let users = find("users").unwrap();
    binding
        .fetch(Some(users.endpoint), &QuerySpec::new(15))
        .await;

    api.fail_next(500, None);
    let mutation = Mutation::Toggle { id: "2".to_string() };
    let (feedback, ticket) = mutate_and_refetch(&mutator, users, &mutation, &binding).await;

    assert_eq!(feedback, Feedback::Error("Failed to update user".to_string()));
    assert!(ticket.is_none());
}

#[tokio::test]
async fn test_toggle_then_refetch_shows_updated_row() {
    let (api, binding, mutator) = setup(20);
    let users = find("users").unwrap();
    let query = QuerySpec::new(5).with_search("user-1").with_page(2);
    binding.fetch(Some(users.endpoint), &query).await;

    let row = |binding: &RemoteListBinding<Value>, id: u64| {
        binding
            .status()
            .page()
            .and_then(|p| p.items.iter().find(|u| u["id"] == id).cloned())
    };
    // user-1, user-10..user-19; page 2 of 3 holds user-14..user-18
    assert_eq!(row(&binding, 15).unwrap()["archived"], false);

    let mutation = Mutation::Toggle { id: "15".to_string() };
    let (feedback, ticket) = mutate_and_refetch(&mutator, users, &mutation, &binding).await;
    assert!(!feedback.is_error());
    assert_eq!(feedback.message(), "User updated");

    let ticket = ticket.expect("successful mutation refetches");
    assert_eq!(ticket.query(), &query);
    assert!(binding.is_loading());
    assert!(binding.run(ticket).await);

    assert_eq!(row(&binding, 15).unwrap()["archived"], true);
    assert_eq!(binding.query(), Some(query));
    assert_eq!(binding.status().page().map(|p| p.page), Some(2));

    let toggles: Vec<_> = api
        .requests()
        .into_iter()
        .filter(|r| r.method == Method::Patch)
        .collect();
    assert_eq!(toggles.len(), 1);
    assert_eq!(toggles[0].path, "/admin/users/15/toggle-archive");
    assert_eq!(api.user(15).unwrap()["archived"], true);
}

#[tokio::test]
async fn test_response_message_overrides_default() {
    let (_api, binding, mutator) = setup(0);
    let admins = find("admin-users").unwrap();
    let mut fields = Map::new();
    fields.insert("email".to_string(), json!("new@example.com"));

    let (feedback, ticket) =
        mutate_and_refetch(&mutator, admins, &Mutation::Create { fields }, &binding).await;

    assert_eq!(feedback, Feedback::Success("Admin created".to_string()));
    // Never bound, so there is nothing to refetch
    assert!(ticket.is_none());
}

#[tokio::test]
async fn test_unsupported_mutation_sends_nothing() {
    let (api, binding, mutator) = setup(3);
    let users = find("users").unwrap();

    let mutation = Mutation::Delete { id: "1".to_string() };
    let (feedback, ticket) = mutate_and_refetch(&mutator, users, &mutation, &binding).await;

    assert!(feedback.is_error());
    assert!(feedback.message().contains("does not support delete"));
    assert!(ticket.is_none());
    assert_eq!(api.request_count(), 0);
}
