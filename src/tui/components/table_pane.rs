//! Table pane drawing a [`TableModel`] with a selected row

use iocraft::prelude::*;

use crate::table::{TableBody, TableModel};
use crate::tui::theme::theme;

const MAX_COLUMN_WIDTH: usize = 36;
const SKELETON_CELL: &str = "\u{2591}\u{2591}\u{2591}\u{2591}\u{2591}\u{2591}";

/// Width of each column: the widest of its header and visible cells, capped.
pub fn column_widths(model: &TableModel) -> Vec<usize> {
    let mut widths: Vec<usize> = model.headers.iter().map(|h| h.chars().count()).collect();
    match &model.body {
        TableBody::Rows(rows) => {
            for row in rows {
                for (width, cell) in widths.iter_mut().zip(row) {
                    *width = (*width).max(cell.chars().count());
                }
            }
        }
        TableBody::Skeleton { .. } => {
            for width in widths.iter_mut() {
                *width = (*width).max(SKELETON_CELL.chars().count());
            }
        }
        TableBody::Empty(_) => {}
    }
    widths.into_iter().map(|w| w.min(MAX_COLUMN_WIDTH)).collect()
}

/// Pad or cut `text` to exactly `width` characters.
pub fn fit(text: &str, width: usize) -> String {
    let count = text.chars().count();
    if count <= width {
        format!("{text:width$}")
    } else if width == 0 {
        String::new()
    } else {
        let cut: String = text.chars().take(width - 1).collect();
        format!("{cut}\u{2026}")
    }
}

fn is_status_column(label: &str) -> bool {
    label.eq_ignore_ascii_case("status")
}

/// Props for the TablePane component
#[derive(Default, Props)]
pub struct TablePaneProps {
    pub model: Option<TableModel>,
    pub selected: usize,
    /// First visible row
    pub offset: usize,
    pub visible_rows: usize,
    pub has_focus: bool,
}

/// Table with a header row, a highlighted selection and scroll indicators
#[component]
pub fn TablePane(props: &TablePaneProps) -> impl Into<AnyElement<'static>> {
    let theme = theme();
    let border_color = if props.has_focus {
        theme.border_focused
    } else {
        theme.border
    };

    let Some(model) = props.model.clone() else {
        return element! {
            View(
                width: 100pct,
                height: 100pct,
                border_style: BorderStyle::Round,
                border_color: border_color,
            ) {}
        };
    };

    let widths = column_widths(&model);
    let status_columns: Vec<bool> = model.headers.iter().map(|h| is_status_column(h)).collect();
    let header_line = model
        .headers
        .iter()
        .zip(&widths)
        .map(|(h, w)| fit(h, *w))
        .collect::<Vec<_>>()
        .join("  ");

    let body: Vec<AnyElement<'static>> = match &model.body {
        TableBody::Skeleton { rows, columns } => (0..*rows)
            .map(|_| {
                let line = widths
                    .iter()
                    .take(*columns)
                    .map(|w| fit(SKELETON_CELL, *w))
                    .collect::<Vec<_>>()
                    .join("  ");
                element! {
                    View(height: 1, padding_left: 1) {
                        Text(content: line, color: theme.skeleton)
                    }
                }
                .into_any()
            })
            .collect(),
        TableBody::Empty(message) => vec![
            element! {
                View(
                    width: 100pct,
                    flex_grow: 1.0,
                    justify_content: JustifyContent::Center,
                    align_items: AlignItems::Center,
                ) {
                    Text(content: message.clone(), color: theme.text_dimmed)
                }
            }
            .into_any(),
        ],
        TableBody::Rows(rows) => {
            let start = props.offset.min(rows.len());
            let end = (start + props.visible_rows).min(rows.len());
            let mut lines = Vec::new();
            if start > 0 {
                lines.push(
                    element! {
                        View(height: 1, padding_left: 1) {
                            Text(content: format!("  {start} more above"), color: theme.text_dimmed)
                        }
                    }
                    .into_any(),
                );
            }
            for (index, row) in rows[start..end].iter().enumerate() {
                let is_selected = start + index == props.selected;
                let background = if is_selected && props.has_focus {
                    Some(theme.selected_background)
                } else {
                    None
                };
                lines.push(
                    element! {
                        View(
                            height: 1,
                            padding_left: 1,
                            flex_direction: FlexDirection::Row,
                            column_gap: 2,
                            background_color: background,
                        ) {
                            #(row.iter().zip(&widths).zip(&status_columns).map(|((cell, width), is_status)| {
                                let color = if *is_status { theme.status_color(cell.trim()) } else { theme.text };
                                element! {
                                    Text(
                                        content: fit(cell, *width),
                                        color: color,
                                        weight: if is_selected { Weight::Bold } else { Weight::Normal },
                                    )
                                }
                            }))
                        }
                    }
                    .into_any(),
                );
            }
            if end < rows.len() {
                lines.push(
                    element! {
                        View(height: 1, padding_left: 1) {
                            Text(content: format!("  {} more below", rows.len() - end), color: theme.text_dimmed)
                        }
                    }
                    .into_any(),
                );
            }
            lines
        }
    };

    element! {
        View(
            width: 100pct,
            height: 100pct,
            flex_direction: FlexDirection::Column,
            border_style: BorderStyle::Round,
            border_color: border_color,
        ) {
            View(height: 1, padding_left: 1, flex_shrink: 0.0) {
                Text(content: header_line, color: theme.text_dimmed, weight: Weight::Bold)
            }
            #(body)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(body: TableBody) -> TableModel {
        TableModel {
            headers: vec!["Name".into(), "Status".into()],
            body,
            pagination: None,
        }
    }

    #[test]
    fn test_fit() {
        assert_eq!(fit("abc", 5), "abc  ");
        assert_eq!(fit("abcdef", 4), "abc\u{2026}");
        assert_eq!(fit("abc", 0), "");
    }

    #[test]
    fn test_column_widths_from_cells() {
        let m = model(TableBody::Rows(vec![vec!["Ann Lee".into(), "active".into()]]));
        assert_eq!(column_widths(&m), vec![7, 6]);

        let long = "x".repeat(80);
        let m = model(TableBody::Rows(vec![vec![long, "a".into()]]));
        assert_eq!(column_widths(&m)[0], MAX_COLUMN_WIDTH);
    }

    #[test]
    fn test_column_widths_skeleton() {
        let m = model(TableBody::Skeleton { rows: 5, columns: 2 });
        assert_eq!(column_widths(&m), vec![6, 6]);
    }
}
