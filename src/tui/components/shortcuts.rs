//! Footer shortcut sets for the browser

use super::footer::Shortcut;
use crate::resources::{FilterSupport, Resource};

/// Builder for creating shortcut lists with common patterns
#[derive(Default)]
pub struct ShortcutsBuilder {
    shortcuts: Vec<Shortcut>,
}

impl ShortcutsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// j/k rows, then n/p and g/G for pages, dimmed when there is one page
    pub fn with_navigation(mut self, paged: bool) -> Self {
        self.shortcuts.push(Shortcut::new("j/k", "Up/Down"));
        self.shortcuts
            .push(Shortcut::new("n/p", "Next/Prev Page").enabled_if(paged));
        self.shortcuts
            .push(Shortcut::new("g/G", "First/Last Page").enabled_if(paged));
        self
    }

    pub fn with_quit(mut self) -> Self {
        self.shortcuts.push(Shortcut::new("q", "Quit"));
        self
    }

    pub fn add(mut self, key: &'static str, action: &'static str) -> Self {
        self.shortcuts.push(Shortcut::new(key, action));
        self
    }

    /// Add a shortcut only when `condition` holds
    pub fn add_if(self, condition: bool, key: &'static str, action: &'static str) -> Self {
        if condition { self.add(key, action) } else { self }
    }

    pub fn build(self) -> Vec<Shortcut> {
        self.shortcuts
    }
}

/// Shortcuts for the table pane, limited to what the resource supports.
/// `paged` is whether the current result spans more than one page.
pub fn table_shortcuts(resource: &Resource, paged: bool) -> Vec<Shortcut> {
    ShortcutsBuilder::new()
        .with_navigation(paged)
        .add_if(resource.searchable, "/", "Search")
        .add_if(resource.filter == FilterSupport::Full, "f", "Filter")
        .add_if(resource.filter == FilterSupport::CustomRange, "f", "Clear Range")
        .add("Enter", "Open")
        .add_if(resource.toggle.is_some(), "t", "Toggle")
        .add("r", "Refresh")
        .with_quit()
        .build()
}

/// Shortcuts while typing a search
pub fn search_shortcuts() -> Vec<Shortcut> {
    ShortcutsBuilder::new()
        .add("Enter", "Apply Search")
        .add("Esc", "Clear & Exit")
        .add("C-q", "Quit")
        .build()
}

/// Shortcuts while the detail pane is open
pub fn detail_shortcuts(togglable: bool) -> Vec<Shortcut> {
    ShortcutsBuilder::new()
        .add("j/k", "Next/Prev Row")
        .add_if(togglable, "t", "Toggle")
        .add("Esc", "Close")
        .with_quit()
        .build()
}
