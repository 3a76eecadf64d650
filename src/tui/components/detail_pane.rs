//! Detail pane showing every field of the open row

use iocraft::prelude::*;
use serde_json::Value;

use crate::table::raw_text;
use crate::tui::theme::theme;

/// Flatten a record into `(key, text)` lines. Nested objects use dotted keys.
pub fn record_lines(record: &Value) -> Vec<(String, String)> {
    let mut lines = Vec::new();
    flatten("", record, &mut lines);
    lines
}

fn flatten(prefix: &str, value: &Value, out: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) if !map.is_empty() => {
            for (key, child) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten(&path, child, out);
            }
        }
        other => out.push((prefix.to_string(), raw_text(other))),
    }
}

/// Props for the DetailPane component
#[derive(Default, Props)]
pub struct DetailPaneProps {
    pub title: String,
    pub record: Option<Value>,
}

#[component]
pub fn DetailPane(props: &DetailPaneProps) -> impl Into<AnyElement<'static>> {
    let theme = theme();

    let Some(record) = props.record.as_ref() else {
        return element! { View(width: 0) {} };
    };

    let lines = record_lines(record);
    let key_width = lines.iter().map(|(k, _)| k.chars().count()).max().unwrap_or(0);

    element! {
        View(
            width: 45pct,
            height: 100pct,
            flex_direction: FlexDirection::Column,
            border_style: BorderStyle::Round,
            border_color: theme.border_focused,
            padding_left: 1,
            padding_right: 1,
        ) {
            View(height: 1, margin_bottom: 1) {
                Text(content: props.title.clone(), color: theme.text, weight: Weight::Bold)
            }
            #(lines.into_iter().map(|(key, text)| {
                let color = if key == "status" || key.ends_with(".status") {
                    theme.status_color(&text)
                } else {
                    theme.text
                };
                element! {
                    View(flex_direction: FlexDirection::Row) {
                        Text(content: format!("{key:key_width$}  "), color: theme.tone_info)
                        Text(content: text, color: color, wrap: TextWrap::Wrap)
                    }
                }
            }))
        }
    }
}
