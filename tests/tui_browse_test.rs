//! Headless runs of the browser: the reducer driven by keys, with its effects
//! carried out against a real list binding over the fake API.

#[path = "common/mod.rs"]
mod common;

use std::sync::Arc;

use iocraft::prelude::{KeyCode, KeyModifiers};
use serde_json::Value;

use backoffice::RemoteListBinding;
use backoffice::api::EnvelopeSource;
use backoffice::mutation::{Mutator, mutate_and_refetch};
use backoffice::resources::find;
use backoffice::table::{PageControl, TableBody};
use backoffice::tui::browse::model::{
    BrowseAction, BrowseState, Effect, Focus, key_to_action, reduce,
};
use backoffice::tui::components::ToastLevel;
use common::fake_api::FakeApi;

const VISIBLE_ROWS: usize = 10;

struct Harness {
    api: Arc<FakeApi>,
    binding: RemoteListBinding<Value>,
    mutator: Mutator,
    state: BrowseState,
    search_input: String,
}

impl Harness {
    async fn start(users: u64) -> Self {
        let api = Arc::new(FakeApi::with_users(users));
        let binding = RemoteListBinding::new(Arc::new(EnvelopeSource::new(api.clone())));
        let mutator = Mutator::new(api.clone());
        let resource = find("users").unwrap();
        let mut query = resource.initial_query(15);
        query.set_page_size(15);
        let state = BrowseState::new(resource, query);

        let mut harness = Self {
            api,
            binding,
            mutator,
            state,
            search_input: String::new(),
        };
        harness.perform(Effect::Fetch).await;
        harness
    }

    async fn perform(&mut self, effect: Effect) {
        let ticket = match effect {
            Effect::None => return,
            Effect::Fetch => self
                .binding
                .bind(Some(self.state.resource.endpoint), &self.state.query),
            Effect::Refetch => self.binding.refetch(),
            Effect::Mutate(mutation) => {
                let (feedback, ticket) = mutate_and_refetch(
                    &self.mutator,
                    self.state.resource,
                    &mutation,
                    &self.binding,
                )
                .await;
                reduce(
                    &mut self.state,
                    BrowseAction::MutationDone(feedback),
                    VISIBLE_ROWS,
                );
                ticket
            }
        };
        if let Some(ticket) = ticket
            && self.binding.run(ticket).await
        {
            reduce(
                &mut self.state,
                BrowseAction::Fetched(self.binding.status()),
                VISIBLE_ROWS,
            );
        }
    }

    async fn press(&mut self, code: KeyCode) {
        let Some(action) =
            key_to_action(code, KeyModifiers::NONE, self.state.focus, &self.search_input)
        else {
            return;
        };
        let effect = reduce(&mut self.state, action, VISIBLE_ROWS);
        self.perform(effect).await;
    }

    async fn search(&mut self, text: &str) {
        self.press(KeyCode::Char('/')).await;
        assert_eq!(self.state.focus, Focus::Search);
        self.search_input = text.to_string();
        self.press(KeyCode::Enter).await;
    }

    fn page_number(&self) -> u32 {
        self.state.page.as_ref().map(|p| p.page).unwrap_or(0)
    }
}

#[tokio::test]
async fn test_initial_fetch_shows_first_page() {
    let h = Harness::start(37).await;

    assert!(!h.state.loading);
    assert_eq!(h.page_number(), 1);
    assert_eq!(h.state.rows().len(), 15);
    let bar = h.state.pagination().expect("three pages");
    assert_eq!(bar.summary(), "Page 1 of 3 \u{b7} 37 total");
    assert_eq!(h.api.request_count(), 1);
    assert_eq!(h.state.position().as_deref(), Some("1/15"));
}

#[tokio::test]
async fn test_next_and_last_are_noops_on_last_page() {
    let mut h = Harness::start(37).await;

    h.press(KeyCode::Char('G')).await;
    assert_eq!(h.page_number(), 3);
    assert_eq!(h.state.rows().len(), 7);
    let requests = h.api.request_count();

    h.press(KeyCode::Char('n')).await;
    h.press(KeyCode::Char('G')).await;
    assert_eq!(h.page_number(), 3);
    assert_eq!(h.api.request_count(), requests);

    h.press(KeyCode::Char('p')).await;
    assert_eq!(h.page_number(), 2);

    // Page keys are dimmed once everything fits on one page
    h.search("user-37").await;
    let shortcuts = h.state.shortcuts();
    let next = shortcuts.iter().find(|s| s.key == "n/p").unwrap();
    assert!(!next.enabled);
}

#[tokio::test]
async fn test_page_beyond_total_is_never_requested() {
    let mut h = Harness::start(37).await;

    let effect = reduce(
        &mut h.state,
        BrowseAction::Page(PageControl::Page(9)),
        VISIBLE_ROWS,
    );
    assert_eq!(effect, Effect::None);
    assert_eq!(h.state.query.page(), 1);
}

#[tokio::test]
async fn test_search_from_later_page_starts_at_page_one() {
    let mut h = Harness::start(37).await;
    h.press(KeyCode::Char('n')).await;
    assert_eq!(h.page_number(), 2);

    h.search("user-2").await;

    assert_eq!(h.state.focus, Focus::Table);
    assert_eq!(h.state.query.search(), "user-2");
    assert_eq!(h.page_number(), 1);
    // user-2 and user-20..user-29
    assert_eq!(h.state.rows().len(), 11);
    assert!(h.state.pagination().is_none());
}

#[tokio::test]
async fn test_search_with_no_matches_shows_empty_message() {
    let mut h = Harness::start(5).await;

    h.search("nobody").await;

    assert_eq!(
        h.state.table_model().body,
        TableBody::Empty("No data found".to_string())
    );
}

#[tokio::test]
async fn test_toggle_refetches_current_page() {
    let mut h = Harness::start(37).await;
    h.press(KeyCode::Char('n')).await;
    h.press(KeyCode::Char('j')).await;

    let selected_id = h.state.selected_row().unwrap()["id"].as_u64().unwrap();
    assert_eq!(selected_id, 17);

    h.press(KeyCode::Char('t')).await;

    let toast = h.state.toast.clone().expect("feedback toast");
    assert_eq!(toast.level, ToastLevel::Success);
    assert_eq!(toast.message, "User updated");
    assert_eq!(h.page_number(), 2);
    assert_eq!(h.state.selected_row().unwrap()["archived"], true);
}

#[tokio::test]
async fn test_fetch_failure_then_refresh_recovers() {
    let mut h = Harness::start(37).await;

    h.api.fail_next(500, Some(serde_json::json!({"message": "Database unavailable"})));
    h.press(KeyCode::Char('n')).await;

    assert!(h.state.rows().is_empty());
    assert_eq!(
        h.state.table_model().body,
        TableBody::Empty("Database unavailable".to_string())
    );
    assert_eq!(
        h.state.toast.as_ref().map(|t| t.level),
        Some(ToastLevel::Error)
    );

    h.press(KeyCode::Char('r')).await;
    assert_eq!(h.page_number(), 2);
    assert!(h.state.error.is_none());
}

#[tokio::test]
async fn test_detail_follows_cursor() {
    let mut h = Harness::start(3).await;

    h.press(KeyCode::Enter).await;
    assert_eq!(h.state.focus, Focus::Detail);
    assert_eq!(h.state.detail.as_ref().unwrap()["id"], 1);

    h.press(KeyCode::Char('j')).await;
    assert_eq!(h.state.detail.as_ref().unwrap()["id"], 2);

    h.press(KeyCode::Esc).await;
    assert_eq!(h.state.focus, Focus::Table);
    assert!(h.state.detail.is_none());
}

#[tokio::test]
async fn test_quit() {
    let mut h = Harness::start(3).await;

    h.press(KeyCode::Char('q')).await;
    assert!(h.state.should_exit);
}
