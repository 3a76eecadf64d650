use owo_colors::OwoColorize;
use serde_json::Value;

use crate::mutation::Feedback;
use crate::resources::format::{Tone, tone_for_status};
use crate::table::raw_text;

pub fn format_tone<F>(text: &str, tone: Tone, format_fn: F) -> String
where
    F: Fn(&str) -> String,
{
    let badge = format_fn(text);
    match tone {
        Tone::Success => badge.green().to_string(),
        Tone::Danger => badge.red().to_string(),
        Tone::Warning => badge.yellow().to_string(),
        Tone::Info => badge.cyan().to_string(),
        Tone::Purple => badge.magenta().to_string(),
        Tone::Neutral => badge.dimmed().to_string(),
    }
}

pub fn format_status_colored(status: &str) -> String {
    format_tone(status, tone_for_status(status), |s| format!("[{s}]"))
}

pub fn format_feedback(feedback: &Feedback) -> String {
    match feedback {
        Feedback::Success(message) => format!("{} {}", "\u{2713}".green(), message),
        Feedback::Error(message) => format!("{} {}", "\u{2717}".red(), message.red()),
    }
}

fn is_status_key(key: &str) -> bool {
    key == "status" || key.ends_with("_status") || key == "status_label" || key == "status_text"
}

/// `key: value` lines for one record. Nested values print as compact JSON.
pub fn format_record(record: &Value) -> String {
    let Some(map) = record.as_object() else {
        return raw_text(record);
    };
    let width = map.keys().map(|k| k.chars().count()).max().unwrap_or(0);

    map.iter()
        .map(|(key, value)| {
            let text = raw_text(value);
            let text = match value {
                Value::String(s) if is_status_key(key) => format_status_colored(s),
                Value::Null => text.dimmed().to_string(),
                _ => text,
            };
            format!("{:width$}  {}", key.cyan(), text, width = width)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_record_lists_every_field() {
        let text = format_record(&json!({"id": 1, "status": "open", "client": {"name": "A"}}));
        assert_eq!(text.lines().count(), 3);
        assert!(text.contains("open"));
        assert!(text.contains(r#"{"name":"A"}"#));
    }

    #[test]
    fn test_format_record_scalar() {
        assert_eq!(format_record(&json!("plain")), "plain");
    }

    #[test]
    fn test_feedback_contains_message() {
        let text = format_feedback(&Feedback::Error("Email is required".into()));
        assert!(text.contains("Email is required"));
    }
}
