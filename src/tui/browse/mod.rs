//! Resource browser (`backoffice browse`)
//!
//! Full-screen table over one resource. All state lives in a
//! [`model::BrowseState`]; fetches and mutations go through the list binding
//! and run in async handlers.

pub mod model;

use iocraft::prelude::*;
use serde_json::Value;

use crate::binding::{FetchTicket, RemoteListBinding};
use crate::mutation::{Mutation, Mutator, mutate_and_refetch};
use crate::query::{DEFAULT_PAGE_SIZE, QuerySpec};
use crate::resources::Resource;
use crate::tui::components::{
    DetailPane, Footer, Header, Pager, SearchBox, TablePane, render_toast,
};
use crate::tui::theme::theme;

use model::{BrowseAction, BrowseState, Effect, Focus, key_to_action, reduce};

/// Rows taken by everything except table rows: header, search line, table
/// border and header row, pager and footer.
const CHROME_ROWS: u16 = 7;

/// Props for the ResourceBrowser component
#[derive(Default, Props)]
pub struct ResourceBrowserProps {
    pub resource: Option<&'static Resource>,
    /// Initial query, defaults to the resource's own
    pub query: Option<QuerySpec>,
    pub binding: Option<RemoteListBinding<Value>>,
    pub mutator: Option<Mutator>,
}

/// Run a fetch ticket and feed the resulting status into the state, unless a
/// newer request superseded it.
async fn run_ticket(
    binding: &RemoteListBinding<Value>,
    ticket: FetchTicket,
    mut state: State<BrowseState>,
    visible_rows: usize,
) {
    if binding.run(ticket).await {
        let mut next = state.read().clone();
        reduce(&mut next, BrowseAction::Fetched(binding.status()), visible_rows);
        state.set(next);
    }
}

/// Main browser component
///
/// Layout:
/// ```text
/// +------------------------------------------+
/// | Header (title, filter, total)            |
/// | / search                                 |
/// +-------------------------+----------------+
/// | TablePane               | DetailPane     |
/// +-------------------------+----------------+
/// | Pager                                    |
/// | Toast                                    |
/// | Footer                                   |
/// +------------------------------------------+
/// ```
#[component]
pub fn ResourceBrowser<'a>(
    props: &ResourceBrowserProps,
    mut hooks: Hooks,
) -> impl Into<AnyElement<'a>> {
    let (width, height) = hooks.use_terminal_size();
    let mut system = hooks.use_context_mut::<SystemContext>();
    let theme = theme();

    let (Some(resource), Some(binding), Some(mutator)) =
        (props.resource, props.binding.clone(), props.mutator.clone())
    else {
        return element! {
            View(width, height) {
                Text(content: "Nothing to browse", color: theme.text_dimmed)
            }
        };
    };

    let visible_rows = height.saturating_sub(CHROME_ROWS) as usize;

    let initial_query = props
        .query
        .clone()
        .unwrap_or_else(|| resource.initial_query(DEFAULT_PAGE_SIZE));
    let initial_search = initial_query.search().to_string();
    let mut state: State<BrowseState> =
        hooks.use_state(move || BrowseState::new(resource, initial_query));
    let mut search_input = hooks.use_state(move || initial_search);

    let fetch_handler: Handler<FetchTicket> = hooks.use_async_handler({
        let binding = binding.clone();
        move |ticket: FetchTicket| {
            let binding = binding.clone();
            async move {
                run_ticket(&binding, ticket, state, visible_rows).await;
            }
        }
    });

    let mutate_handler: Handler<Mutation> = hooks.use_async_handler({
        let binding = binding.clone();
        let mutator = mutator.clone();
        move |mutation: Mutation| {
            let binding = binding.clone();
            let mutator = mutator.clone();
            let mut state = state;
            async move {
                let (feedback, ticket) =
                    mutate_and_refetch(&mutator, resource, &mutation, &binding).await;
                let mut next = state.read().clone();
                reduce(&mut next, BrowseAction::MutationDone(feedback), visible_rows);
                next.loading = ticket.is_some() || next.loading;
                state.set(next);
                if let Some(ticket) = ticket {
                    run_ticket(&binding, ticket, state, visible_rows).await;
                }
            }
        }
    });

    // Initial fetch
    let mut started = hooks.use_state(|| false);
    if !started.get() {
        started.set(true);
        let query = state.read().query.clone();
        if let Some(ticket) = binding.bind(Some(resource.endpoint), &query) {
            fetch_handler(ticket);
        }
    }

    hooks.use_terminal_events({
        let binding = binding.clone();
        let fetch_handler = fetch_handler.clone();
        let mutate_handler = mutate_handler.clone();
        move |event| match event {
            TerminalEvent::Key(KeyEvent {
                code,
                kind,
                modifiers,
                ..
            }) if kind != KeyEventKind::Release => {
                let mut next = state.read().clone();
                let input = search_input.to_string();
                let Some(action) = key_to_action(code, modifiers, next.focus, &input) else {
                    return;
                };
                if action == BrowseAction::CancelSearch {
                    search_input.set(String::new());
                }

                match reduce(&mut next, action, visible_rows) {
                    Effect::Fetch => {
                        match binding.bind(Some(resource.endpoint), &next.query) {
                            Some(ticket) => fetch_handler(ticket),
                            None => next.loading = binding.is_loading(),
                        }
                    }
                    Effect::Refetch => match binding.refetch() {
                        Some(ticket) => fetch_handler(ticket),
                        None => next.loading = false,
                    },
                    Effect::Mutate(mutation) => mutate_handler(mutation),
                    Effect::None => {}
                }
                state.set(next);
            }
            _ => {}
        }
    });

    let current = state.read().clone();

    if current.should_exit {
        system.exit();
    }

    let model = current.table_model();
    let pagination = current.pagination();
    let total = current.page.as_ref().map(|p| p.total_count);
    let detail_title = current
        .detail
        .as_ref()
        .and_then(|row| resource.row_id(row))
        .map(|id| format!("{} {id}", resource.noun))
        .unwrap_or_else(|| resource.noun.to_string());

    element! {
        View(
            width,
            height,
            flex_direction: FlexDirection::Column,
            background_color: theme.background,
        ) {
            Header(
                title: resource.title.to_string(),
                filter: current.query.filter().map(|f| f.label()),
                total: total,
                loading: current.loading,
            )

            SearchBox(
                value: Some(search_input),
                applied: current.query.search().to_string(),
                has_focus: current.focus == Focus::Search,
                disabled: !resource.searchable,
            )

            View(
                flex_grow: 1.0,
                width: 100pct,
                flex_direction: FlexDirection::Row,
            ) {
                View(flex_grow: 1.0, height: 100pct) {
                    TablePane(
                        model: Some(model),
                        selected: current.cursor.selected,
                        offset: current.cursor.offset,
                        visible_rows: visible_rows,
                        has_focus: current.focus != Focus::Search,
                    )
                }
                DetailPane(
                    title: detail_title,
                    record: current.detail.clone(),
                )
            }

            Pager(bar: pagination)

            #(render_toast(&current.toast))

            Footer(shortcuts: current.shortcuts(), position: current.position())
        }
    }
}
