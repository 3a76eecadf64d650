//! Pagination line under the table

use iocraft::prelude::*;

use crate::table::{PageItem, PaginationBar};
use crate::tui::theme::theme;

/// Props for the Pager component
#[derive(Default, Props)]
pub struct PagerProps {
    /// `None` hides the pager (single page, or loading)
    pub bar: Option<PaginationBar>,
}

/// `« ‹ 1 … 4 [5] 6 … 10 › »  Page 5 of 10 · 148 total`
#[component]
pub fn Pager(props: &PagerProps) -> impl Into<AnyElement<'static>> {
    let theme = theme();

    let Some(bar) = props.bar.clone() else {
        return element! { View(height: 0) {} };
    };

    let control = |label: &str, enabled: bool| {
        element! {
            Text(
                content: label.to_string(),
                color: if enabled { theme.text } else { theme.text_dimmed },
            )
        }
    };

    element! {
        View(
            width: 100pct,
            height: 1,
            flex_shrink: 0.0,
            flex_direction: FlexDirection::Row,
            column_gap: 1,
            padding_left: 1,
        ) {
            #(control("\u{ab}", bar.first_enabled()))
            #(control("\u{2039}", bar.previous_enabled()))
            #(bar.items.iter().map(|item| match item {
                PageItem::Page(n) if *n == bar.page => element! {
                    Text(content: format!("[{n}]"), color: theme.highlight, weight: Weight::Bold)
                },
                PageItem::Page(n) => element! {
                    Text(content: n.to_string(), color: theme.text)
                },
                PageItem::Ellipsis => element! {
                    Text(content: "\u{2026}", color: theme.text_dimmed)
                },
            }))
            #(control("\u{203a}", bar.next_enabled()))
            #(control("\u{bb}", bar.last_enabled()))
            View(margin_left: 2) {
                Text(content: bar.summary(), color: theme.text_dimmed)
            }
        }
    }
}
