//! Plain-text rendering of a [`TableModel`] with tabled.

use tabled::builder::Builder;
use tabled::settings::{Panel, Style};

use super::{TableBody, TableModel};

const SKELETON_CELL: &str = "\u{2591}\u{2591}\u{2591}\u{2591}\u{2591}\u{2591}";

/// Table followed by the pagination line, if any.
pub fn render_text(model: &TableModel) -> String {
    let mut builder = Builder::default();
    builder.push_record(model.headers.clone());

    match &model.body {
        TableBody::Skeleton { rows, columns } => {
            for _ in 0..*rows {
                builder.push_record(vec![SKELETON_CELL.to_string(); *columns]);
            }
        }
        TableBody::Rows(rows) => {
            for row in rows {
                builder.push_record(row.clone());
            }
        }
        TableBody::Empty(_) => {}
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    if let TableBody::Empty(message) = &model.body {
        table.with(Panel::footer(message.clone()));
    }

    let mut out = table.to_string();
    if let Some(bar) = &model.pagination {
        out.push('\n');
        out.push_str(&format!("{}   {}", bar.summary(), bar));
    }
    out
}
