//! Catalogue of the back office list views.
//!
//! Each [`Resource`] names a remote list, how to query it, which columns to
//! show and which mutations the API offers for its rows.

mod catalog;
pub mod format;

use serde_json::Value;

use crate::api::Method;
use crate::error::{BackofficeError, Result};
use crate::query::{DateFilter, QuerySpec};
use crate::table::{Column, TabularView};

pub use catalog::RESOURCES;

/// Which date filters a list accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterSupport {
    None,
    /// Presets and custom ranges.
    Full,
    /// Only explicit date ranges.
    CustomRange,
}

/// Row action beyond create/update/delete/toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub method: Method,
    /// Appended to the row path, e.g. `remind-draft`.
    pub suffix: &'static str,
    /// JSON key that carries the action value, if the action takes one.
    pub value_key: Option<&'static str>,
    pub success: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct Resource {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub title: &'static str,
    /// Singular noun used in feedback messages.
    pub noun: &'static str,
    pub endpoint: &'static str,
    /// Base path for row-level requests, defaults to `endpoint`.
    pub item_base: Option<&'static str>,
    pub paginated: bool,
    pub page_size: Option<u32>,
    pub filter: FilterSupport,
    pub default_filter: Option<DateFilter>,
    pub searchable: bool,
    pub statuses: &'static [&'static str],
    pub id_field: &'static str,
    pub has_detail: bool,
    pub crud: bool,
    /// Toggle endpoint suffix, e.g. `toggle-archive`.
    pub toggle: Option<&'static str>,
    pub actions: &'static [ActionSpec],
    pub columns: fn() -> Vec<Column<Value>>,
}

impl Resource {
    pub fn matches(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
            || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(name))
    }

    pub fn columns(&self) -> Vec<Column<Value>> {
        (self.columns)()
    }

    pub fn view(&self) -> TabularView<Value> {
        TabularView::new(self.columns())
    }

    /// Starting query: default filter and the resource's page size, or
    /// `default_page_size` when it has none.
    pub fn initial_query(&self, default_page_size: u32) -> QuerySpec {
        QuerySpec::new(self.page_size.unwrap_or(default_page_size))
            .with_filter(self.default_filter)
    }

    pub fn check_filter(&self, filter: &DateFilter) -> Result<()> {
        match (self.filter, filter) {
            (FilterSupport::Full, _) | (FilterSupport::CustomRange, DateFilter::Custom(_)) => {
                Ok(())
            }
            (FilterSupport::CustomRange, _) => Err(BackofficeError::InvalidInput(format!(
                "{} only accepts a custom date range (YYYY-MM-DD..YYYY-MM-DD)",
                self.name
            ))),
            (FilterSupport::None, _) => Err(self.unsupported("date filters")),
        }
    }

    pub fn check_search(&self) -> Result<()> {
        if self.searchable {
            Ok(())
        } else {
            Err(self.unsupported("search"))
        }
    }

    pub fn check_status(&self, status: &str) -> Result<()> {
        if self.statuses.is_empty() {
            return Err(self.unsupported("status filters"));
        }
        if self.statuses.contains(&status) {
            Ok(())
        } else {
            Err(BackofficeError::InvalidInput(format!(
                "invalid status '{status}' for {}. Must be one of: {}",
                self.name,
                self.statuses.join(", ")
            )))
        }
    }

    pub fn action(&self, name: &str) -> Result<&'static ActionSpec> {
        self.actions
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| self.unsupported(&format!("action '{name}'")))
    }

    pub fn unsupported(&self, operation: &str) -> BackofficeError {
        BackofficeError::Unsupported {
            resource: self.name.to_string(),
            operation: operation.to_string(),
        }
    }

    /// Path of one row, e.g. `/admin/users/42`.
    pub fn item_path(&self, id: &str) -> Result<String> {
        let id = id.trim();
        if id.is_empty() || id.contains(['/', '?', '#']) || id.chars().any(char::is_whitespace) {
            return Err(BackofficeError::InvalidInput(format!("invalid id '{id}'")));
        }
        Ok(format!("{}/{}", self.item_base.unwrap_or(self.endpoint), id))
    }

    pub fn detail_path(&self, id: &str) -> Result<String> {
        if !self.has_detail {
            return Err(self.unsupported("show"));
        }
        self.item_path(id)
    }

    /// Id of a row as used in item paths.
    pub fn row_id(&self, row: &Value) -> Option<String> {
        match row.get(self.id_field)? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

/// Look up a resource by name or alias.
pub fn find(name: &str) -> Result<&'static Resource> {
    RESOURCES
        .iter()
        .find(|r| r.matches(name))
        .ok_or_else(|| BackofficeError::UnknownResource(name.to_string()))
}
