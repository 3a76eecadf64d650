//! Search line under the header
//!
//! Editable only while focused. Otherwise it shows the applied search, or a
//! hint when there is none.

use iocraft::prelude::*;

use crate::tui::theme::theme;

#[derive(Default, Props)]
pub struct SearchBoxProps {
    /// Text being typed
    pub value: Option<State<String>>,
    /// Search the current results were fetched with
    pub applied: String,
    pub has_focus: bool,
    /// The resource has no server-side search
    pub disabled: bool,
}

#[component]
pub fn SearchBox(props: &SearchBoxProps) -> impl Into<AnyElement<'static>> {
    let theme = theme();

    let body: AnyElement<'static> = match props.value {
        _ if props.disabled => element! {
            Text(content: "no search for this list", color: theme.text_dimmed)
        }
        .into_any(),
        Some(mut value) if props.has_focus => element! {
            View(flex_grow: 1.0) {
                TextInput(
                    value: value.to_string(),
                    has_focus: true,
                    on_change: move |text| value.set(text),
                    color: theme.text,
                )
            }
        }
        .into_any(),
        _ if props.applied.is_empty() => element! {
            Text(content: "press / to search", color: theme.text_dimmed)
        }
        .into_any(),
        _ => element! {
            Text(content: props.applied.clone(), color: theme.filter)
        }
        .into_any(),
    };

    let prompt_color = if props.has_focus {
        theme.border_focused
    } else {
        theme.text_dimmed
    };

    element! {
        View(
            flex_direction: FlexDirection::Row,
            width: 100pct,
            height: 1,
            flex_shrink: 0.0,
            padding_left: 1,
            padding_right: 1,
            column_gap: 1,
        ) {
            Text(content: "/", color: prompt_color, weight: Weight::Bold)
            #(Some(body))
        }
    }
}
