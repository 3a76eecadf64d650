//! Browser state and reducer
//!
//! `BrowseState` holds everything the browser shows. Keys map to
//! `BrowseAction`s and `reduce` applies them, returning the side effect the
//! component has to run (a fetch through the list binding or a mutation).
//! Nothing here touches iocraft state, so the whole flow is unit tested.

use iocraft::prelude::{KeyCode, KeyModifiers};
use serde_json::Value;

use crate::binding::{FetchStatus, ResultPage};
use crate::mutation::{Feedback, Mutation};
use crate::query::{DateFilter, QuerySpec};
use crate::resources::{FilterSupport, Resource};
use crate::table::{PageControl, PaginationBar, PaginationMeta, TableModel};
use crate::tui::components::{
    Shortcut, Toast, detail_shortcuts, search_shortcuts, table_shortcuts,
};
use crate::tui::navigation::Cursor;

/// Where keys go
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    Table,
    Search,
    Detail,
}

#[derive(Debug, Clone)]
pub struct BrowseState {
    pub resource: &'static Resource,
    pub query: QuerySpec,
    /// Last page the binding delivered. Cleared on a failed fetch.
    pub page: Option<ResultPage<Value>>,
    pub loading: bool,
    pub error: Option<String>,
    pub cursor: Cursor,
    pub focus: Focus,
    /// Row shown in the detail pane
    pub detail: Option<Value>,
    pub toast: Option<Toast>,
    pub should_exit: bool,
}

impl BrowseState {
    /// State before the first fetch; the caller binds `query` right away.
    pub fn new(resource: &'static Resource, query: QuerySpec) -> Self {
        Self {
            resource,
            query,
            page: None,
            loading: true,
            error: None,
            cursor: Cursor::default(),
            focus: Focus::Table,
            detail: None,
            toast: None,
            should_exit: false,
        }
    }

    pub fn rows(&self) -> &[Value] {
        self.page.as_ref().map(|p| p.items.as_slice()).unwrap_or(&[])
    }

    pub fn selected_row(&self) -> Option<&Value> {
        self.rows().get(self.cursor.selected)
    }

    pub fn meta(&self) -> Option<PaginationMeta> {
        self.page.as_ref().map(PaginationMeta::from)
    }

    /// Pagination controls as currently shown; none while loading.
    pub fn pagination(&self) -> Option<PaginationBar> {
        if self.loading {
            return None;
        }
        self.meta().and_then(PaginationBar::from_meta)
    }

    pub fn table_model(&self) -> TableModel {
        let view = match &self.error {
            Some(error) => self.resource.view().with_empty_message(error.clone()),
            None => self.resource.view(),
        };
        view.render(self.rows(), self.meta(), self.loading)
    }

    pub fn shortcuts(&self) -> Vec<Shortcut> {
        match self.focus {
            Focus::Table => table_shortcuts(self.resource, self.pagination().is_some()),
            Focus::Search => search_shortcuts(),
            Focus::Detail => detail_shortcuts(self.resource.toggle.is_some()),
        }
    }

    /// `selected/count` for the footer, none without rows.
    pub fn position(&self) -> Option<String> {
        let count = self.rows().len();
        (count > 0 && !self.loading).then(|| format!("{}/{count}", self.cursor.selected + 1))
    }

    fn query_changed(&mut self) -> Effect {
        self.loading = true;
        self.cursor.reset();
        Effect::Fetch
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BrowseAction {
    MoveDown,
    MoveUp,
    Page(PageControl),
    CycleFilter,
    FocusSearch,
    /// Apply the typed search text and leave the search box
    SubmitSearch(String),
    /// Clear the search and leave the search box
    CancelSearch,
    OpenSelected,
    CloseDetail,
    ToggleSelected,
    Refresh,
    Quit,
    /// New binding status after a fetch completed
    Fetched(FetchStatus<Value>),
    MutationDone(Feedback),
}

/// Work the component performs after a reduction.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// Bind the resource endpoint with the updated query
    Fetch,
    /// Re-issue the bound query unchanged
    Refetch,
    Mutate(Mutation),
}

/// Next date filter in cycling order for a resource.
///
/// Presets cycle through to "no filter"; a custom range can only be cleared.
pub fn cycle_filter(support: FilterSupport, current: Option<DateFilter>) -> Option<DateFilter> {
    match (support, current) {
        (FilterSupport::None, _) => None,
        (FilterSupport::CustomRange, _) => None,
        (FilterSupport::Full, None) => Some(DateFilter::PRESETS[0]),
        (FilterSupport::Full, Some(DateFilter::Custom(_))) => None,
        (FilterSupport::Full, Some(filter)) => {
            let last = DateFilter::PRESETS[DateFilter::PRESETS.len() - 1];
            if filter == last {
                None
            } else {
                Some(filter.next_preset())
            }
        }
    }
}

/// Apply an action to the state (reducer pattern).
pub fn reduce(state: &mut BrowseState, action: BrowseAction, visible_rows: usize) -> Effect {
    if !matches!(
        action,
        BrowseAction::Fetched(_) | BrowseAction::MutationDone(_)
    ) {
        state.toast = None;
    }

    let row_count = state.rows().len();

    match action {
        BrowseAction::MoveDown => {
            state.cursor.down(row_count, visible_rows);
            if state.detail.is_some() {
                state.detail = state.selected_row().cloned();
            }
        }
        BrowseAction::MoveUp => {
            state.cursor.up(visible_rows);
            if state.detail.is_some() {
                state.detail = state.selected_row().cloned();
            }
        }
        BrowseAction::Page(control) => {
            if state.loading {
                return Effect::None;
            }
            let Some(target) = state.pagination().and_then(|bar| bar.target(control)) else {
                return Effect::None;
            };
            if state.query.set_page(target) {
                return state.query_changed();
            }
        }
        BrowseAction::CycleFilter => match state.resource.filter {
            FilterSupport::None => {
                state.toast = Some(Toast::warning(format!(
                    "{} has no date filter",
                    state.resource.title
                )));
            }
            FilterSupport::CustomRange if state.query.filter().is_none() => {
                state.toast = Some(Toast::info(
                    "Start with --filter YYYY-MM-DD..YYYY-MM-DD to set a date range",
                ));
            }
            support => {
                let next = cycle_filter(support, state.query.filter().copied());
                if state.query.set_filter(next) {
                    return state.query_changed();
                }
            }
        },
        BrowseAction::FocusSearch => {
            if state.resource.searchable {
                state.focus = Focus::Search;
            } else {
                state.toast = Some(Toast::warning(format!(
                    "{} cannot be searched",
                    state.resource.title
                )));
            }
        }
        BrowseAction::SubmitSearch(text) => {
            state.focus = Focus::Table;
            if state.query.set_search(text) {
                return state.query_changed();
            }
        }
        BrowseAction::CancelSearch => {
            state.focus = Focus::Table;
            if state.query.set_search("") {
                return state.query_changed();
            }
        }
        BrowseAction::OpenSelected => {
            if let Some(row) = state.selected_row().cloned() {
                state.detail = Some(row);
                state.focus = Focus::Detail;
            }
        }
        BrowseAction::CloseDetail => {
            state.detail = None;
            state.focus = Focus::Table;
        }
        BrowseAction::ToggleSelected => {
            if state.resource.toggle.is_none() {
                state.toast = Some(Toast::warning(format!(
                    "{} cannot be toggled",
                    state.resource.title
                )));
                return Effect::None;
            }
            if state.loading {
                return Effect::None;
            }
            let id = state
                .selected_row()
                .and_then(|row| state.resource.row_id(row));
            match id {
                Some(id) => return Effect::Mutate(Mutation::Toggle { id }),
                None => state.toast = Some(Toast::error("Selected row has no id")),
            }
        }
        BrowseAction::Refresh => {
            state.loading = true;
            return Effect::Refetch;
        }
        BrowseAction::Quit => {
            state.should_exit = true;
        }
        BrowseAction::Fetched(status) => match status {
            FetchStatus::Success(page) => {
                state.loading = false;
                state.error = None;
                state.cursor.clamp(page.items.len(), visible_rows);
                state.page = Some(page);
                if state.detail.is_some() {
                    state.detail = state.selected_row().cloned();
                }
            }
            FetchStatus::Failure(message) => {
                state.loading = false;
                state.page = None;
                state.detail = None;
                if state.focus == Focus::Detail {
                    state.focus = Focus::Table;
                }
                state.cursor.reset();
                state.toast = Some(Toast::error(message.clone()));
                state.error = Some(message);
            }
            FetchStatus::Loading => state.loading = true,
            FetchStatus::Idle => {}
        },
        BrowseAction::MutationDone(feedback) => {
            state.toast = Some(Toast::from(&feedback));
        }
    }

    Effect::None
}

/// Convert a key event to a BrowseAction.
///
/// `search_input` is the text in the search box, submitted on Enter.
pub fn key_to_action(
    code: KeyCode,
    modifiers: KeyModifiers,
    focus: Focus,
    search_input: &str,
) -> Option<BrowseAction> {
    if modifiers.contains(KeyModifiers::CONTROL) {
        return match code {
            KeyCode::Char('q') | KeyCode::Char('c') => Some(BrowseAction::Quit),
            _ => None,
        };
    }

    match focus {
        Focus::Search => match code {
            KeyCode::Enter => Some(BrowseAction::SubmitSearch(search_input.to_string())),
            KeyCode::Esc => Some(BrowseAction::CancelSearch),
            // Characters are handled by the search box
            _ => None,
        },
        Focus::Detail => match code {
            KeyCode::Esc | KeyCode::Enter => Some(BrowseAction::CloseDetail),
            KeyCode::Char('j') | KeyCode::Down => Some(BrowseAction::MoveDown),
            KeyCode::Char('k') | KeyCode::Up => Some(BrowseAction::MoveUp),
            KeyCode::Char('t') => Some(BrowseAction::ToggleSelected),
            KeyCode::Char('q') => Some(BrowseAction::Quit),
            _ => None,
        },
        Focus::Table => match code {
            KeyCode::Char('j') | KeyCode::Down => Some(BrowseAction::MoveDown),
            KeyCode::Char('k') | KeyCode::Up => Some(BrowseAction::MoveUp),
            KeyCode::Char('n') | KeyCode::Right | KeyCode::PageDown => {
                Some(BrowseAction::Page(PageControl::Next))
            }
            KeyCode::Char('p') | KeyCode::Left | KeyCode::PageUp => {
                Some(BrowseAction::Page(PageControl::Previous))
            }
            KeyCode::Char('g') | KeyCode::Home => Some(BrowseAction::Page(PageControl::First)),
            KeyCode::Char('G') | KeyCode::End => Some(BrowseAction::Page(PageControl::Last)),
            KeyCode::Char(c @ '1'..='9') => c
                .to_digit(10)
                .map(|n| BrowseAction::Page(PageControl::Page(n))),
            KeyCode::Char('f') => Some(BrowseAction::CycleFilter),
            KeyCode::Char('/') => Some(BrowseAction::FocusSearch),
            KeyCode::Enter => Some(BrowseAction::OpenSelected),
            KeyCode::Char('t') => Some(BrowseAction::ToggleSelected),
            KeyCode::Char('r') => Some(BrowseAction::Refresh),
            KeyCode::Char('q') | KeyCode::Esc => Some(BrowseAction::Quit),
            _ => None,
        },
    }
}
