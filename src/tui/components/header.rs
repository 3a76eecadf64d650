//! App header bar component
//!
//! Resource title on the left, active filter and total on the right.

use iocraft::prelude::*;

use crate::tui::theme::theme;

/// Props for the Header component
#[derive(Default, Props)]
pub struct HeaderProps {
    pub title: String,
    /// Label of the active date filter
    pub filter: Option<String>,
    /// Total rows reported by the server
    pub total: Option<u64>,
    pub loading: bool,
}

/// App header bar
#[component]
pub fn Header(props: &HeaderProps) -> impl Into<AnyElement<'static>> {
    let theme = theme();

    let right = match (props.loading, props.total) {
        (true, _) => "Loading...".to_string(),
        (false, Some(total)) => format!("{total} total"),
        (false, None) => String::new(),
    };

    element! {
        View(
            width: 100pct,
            height: 1,
            flex_direction: FlexDirection::Row,
            flex_shrink: 0.0,
            justify_content: JustifyContent::SpaceBetween,
            padding_left: 1,
            padding_right: 1,
            background_color: theme.highlight,
        ) {
            View(flex_direction: FlexDirection::Row, gap: 1) {
                Text(
                    content: format!("backoffice - {}", props.title),
                    color: theme.text,
                    weight: Weight::Bold,
                )
                #(props.filter.clone().map(|label| element! {
                    Text(content: format!("[{label}]"), color: theme.filter)
                }))
            }
            Text(content: right, color: theme.text)
        }
    }
}
