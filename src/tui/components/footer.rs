//! Shortcut line at the bottom of the browser

use iocraft::prelude::*;

use crate::tui::theme::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shortcut {
    pub key: &'static str,
    pub action: &'static str,
    /// Drawn dimmed when the key currently does nothing
    pub enabled: bool,
}

impl Shortcut {
    pub const fn new(key: &'static str, action: &'static str) -> Self {
        Self {
            key,
            action,
            enabled: true,
        }
    }

    pub const fn enabled_if(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

#[derive(Default, Props)]
pub struct FooterProps {
    pub shortcuts: Vec<Shortcut>,
    /// Right-aligned cursor position, e.g. `3/15`
    pub position: Option<String>,
}

#[component]
pub fn Footer(props: &FooterProps) -> impl Into<AnyElement<'static>> {
    let theme = theme();

    let entries = props.shortcuts.iter().map(|shortcut| {
        let (key_color, action_color) = if shortcut.enabled {
            (theme.highlight, theme.text)
        } else {
            (theme.text_dimmed, theme.text_dimmed)
        };
        element! {
            View(flex_direction: FlexDirection::Row) {
                Text(content: shortcut.key, color: key_color, weight: Weight::Bold)
                Text(content: format!(" {}", shortcut.action), color: action_color)
            }
        }
    });

    element! {
        View(
            width: 100pct,
            height: 1,
            flex_shrink: 0.0,
            flex_direction: FlexDirection::Row,
            justify_content: JustifyContent::SpaceBetween,
            padding_left: 1,
            padding_right: 1,
            background_color: theme.border,
        ) {
            View(flex_direction: FlexDirection::Row, column_gap: 2) {
                #(entries)
            }
            #(props.position.clone().map(|position| element! {
                Text(content: position, color: theme.text_dimmed)
            }))
        }
    }
}
