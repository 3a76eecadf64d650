//! Tabular rendering of result pages.
//!
//! [`TabularView`] turns column descriptors plus a page of rows into a
//! [`TableModel`]: headers, a body (loading skeleton, empty message, or
//! formatted cells) and optional pagination controls. The model is plain
//! data; [`text`] prints it for the CLI and the browser draws it with
//! iocraft components.

pub mod pagination;
pub mod text;

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

pub use pagination::{PageControl, PageItem, PaginationBar, PaginationMeta};

/// Shown in place of a null or missing cell value.
pub const PLACEHOLDER: &str = "\u{2014}";

/// Number of placeholder rows shown while loading.
pub const SKELETON_ROWS: usize = 5;

pub const DEFAULT_EMPTY_MESSAGE: &str = "No data found";

/// Row types that can be displayed in a table.
pub trait TableRow {
    /// Value for a column key, `None` if the row has no such field.
    fn cell(&self, key: &str) -> Option<Value>;
}

impl TableRow for Value {
    /// Keys may be dotted paths into nested objects (`client.name`) or
    /// arrays (`tags.0`).
    fn cell(&self, key: &str) -> Option<Value> {
        lookup(self, key).cloned()
    }
}

/// Resolve a dotted path inside a JSON value.
pub fn lookup<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    if let Some(direct) = value.get(key) {
        return Some(direct);
    }
    key.split('.').try_fold(value, |current, segment| match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

/// Plain text of a raw value, or the placeholder for null.
pub fn raw_text(value: &Value) -> String {
    match value {
        Value::Null => PLACEHOLDER.to_string(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

pub type CellFormatter<T> = Arc<dyn Fn(&Value, &T) -> String + Send + Sync>;

/// Describes one table column.
pub struct Column<T> {
    key: String,
    label: String,
    format: Option<CellFormatter<T>>,
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            label: self.label.clone(),
            format: self.format.clone(),
        }
    }
}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("format", &self.format.is_some())
            .finish()
    }
}

impl<T> Column<T> {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            format: None,
        }
    }

    /// Format cells with `f(value, row)`. Missing values arrive as `Value::Null`.
    pub fn with_format(
        mut self,
        f: impl Fn(&Value, &T) -> String + Send + Sync + 'static,
    ) -> Self {
        self.format = Some(Arc::new(f));
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl<T: TableRow> Column<T> {
    pub fn render_cell(&self, row: &T) -> String {
        let value = row.cell(&self.key);
        match &self.format {
            Some(format) => format(value.as_ref().unwrap_or(&Value::Null), row),
            None => value.as_ref().map(raw_text).unwrap_or_else(|| PLACEHOLDER.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableBody {
    /// Placeholder rows while a fetch is in flight.
    Skeleton { rows: usize, columns: usize },
    /// Single full-width message row.
    Empty(String),
    Rows(Vec<Vec<String>>),
}

impl TableBody {
    pub fn row_count(&self) -> usize {
        match self {
            TableBody::Skeleton { rows, .. } => *rows,
            TableBody::Empty(_) => 1,
            TableBody::Rows(rows) => rows.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableModel {
    pub headers: Vec<String>,
    pub body: TableBody,
    pub pagination: Option<PaginationBar>,
}

/// Render rows into a table model.
///
/// Pagination is omitted while loading.
pub fn render<T: TableRow>(
    columns: &[Column<T>],
    rows: &[T],
    meta: Option<PaginationMeta>,
    loading: bool,
    empty_message: &str,
) -> TableModel {
    let headers = columns.iter().map(|c| c.label.clone()).collect();

    if loading {
        return TableModel {
            headers,
            body: TableBody::Skeleton {
                rows: SKELETON_ROWS,
                columns: columns.len(),
            },
            pagination: None,
        };
    }

    let body = if rows.is_empty() {
        TableBody::Empty(empty_message.to_string())
    } else {
        TableBody::Rows(
            rows.iter()
                .map(|row| columns.iter().map(|c| c.render_cell(row)).collect())
                .collect(),
        )
    };

    TableModel {
        headers,
        body,
        pagination: meta.and_then(PaginationBar::from_meta),
    }
}

pub type RowClickHandler<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Column set plus presentation options for one list.
pub struct TabularView<T> {
    columns: Vec<Column<T>>,
    empty_message: String,
    on_row_click: Option<RowClickHandler<T>>,
}

impl<T> Clone for TabularView<T> {
    fn clone(&self) -> Self {
        Self {
            columns: self.columns.clone(),
            empty_message: self.empty_message.clone(),
            on_row_click: self.on_row_click.clone(),
        }
    }
}

impl<T: TableRow> TabularView<T> {
    pub fn new(columns: Vec<Column<T>>) -> Self {
        Self {
            columns,
            empty_message: DEFAULT_EMPTY_MESSAGE.to_string(),
            on_row_click: None,
        }
    }

    pub fn with_empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = message.into();
        self
    }

    pub fn on_row_click(mut self, handler: impl Fn(&T) + Send + Sync + 'static) -> Self {
        self.on_row_click = Some(Arc::new(handler));
        self
    }

    pub fn columns(&self) -> &[Column<T>] {
        &self.columns
    }

    pub fn clickable(&self) -> bool {
        self.on_row_click.is_some()
    }

    pub fn render(&self, rows: &[T], meta: Option<PaginationMeta>, loading: bool) -> TableModel {
        render(&self.columns, rows, meta, loading, &self.empty_message)
    }

    /// Invoke the row click handler for `rows[index]`. Returns whether a
    /// handler ran.
    pub fn click(&self, rows: &[T], index: usize) -> bool {
        match (&self.on_row_click, rows.get(index)) {
            (Some(handler), Some(row)) => {
                handler(row);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lookup_dotted_paths() {
        let row = json!({"client": {"name": "Acme"}, "tags": ["a", "b"], "plain.key": 1});
        assert_eq!(lookup(&row, "client.name"), Some(&json!("Acme")));
        assert_eq!(lookup(&row, "tags.1"), Some(&json!("b")));
        assert_eq!(lookup(&row, "plain.key"), Some(&json!(1)));
        assert_eq!(lookup(&row, "client.missing"), None);
    }

    #[test]
    fn test_cell_uses_formatter_then_raw_then_placeholder() {
        let columns = vec![
            Column::new("name", "Name"),
            Column::new("email", "Email"),
            Column::new("active", "Status").with_format(|v: &Value, _row: &Value| {
                let label = if v.as_bool() == Some(true) { "Active" } else { "Inactive" };
                label.to_string()
            }),
        ];
        let rows = vec![json!({"name": "Ann", "email": null, "active": true})];
        let model = render(&columns, &rows, None, false, DEFAULT_EMPTY_MESSAGE);
        assert_eq!(
            model.body,
            TableBody::Rows(vec![vec![
                "Ann".to_string(),
                PLACEHOLDER.to_string(),
                "Active".to_string()
            ]])
        );
    }

    #[test]
    fn test_formatter_sees_null_for_missing_value() {
        let column = Column::new("missing", "M")
            .with_format(|v: &Value, row: &Value| format!("{}:{}", v.is_null(), row["id"]));
        assert_eq!(column.render_cell(&json!({"id": 4})), "true:4");
    }

    #[test]
    fn test_row_click() {
        use std::sync::Mutex;
        let clicked = Arc::new(Mutex::new(None));
        let sink = clicked.clone();
        let view = TabularView::new(vec![Column::<Value>::new("id", "ID")])
            .on_row_click(move |row| *sink.lock().unwrap() = Some(row.clone()));
        let rows = vec![json!({"id": 1}), json!({"id": 2})];

        assert!(view.click(&rows, 1));
        assert_eq!(*clicked.lock().unwrap(), Some(json!({"id": 2})));
        assert!(!view.click(&rows, 9));

        let plain = TabularView::new(vec![Column::<Value>::new("id", "ID")]);
        assert!(!plain.clickable());
        assert!(!plain.click(&rows, 0));
    }
}
