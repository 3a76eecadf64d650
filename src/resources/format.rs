//! Cell formatters shared by the resource column sets.

use serde_json::Value;

use crate::table::{PLACEHOLDER, lookup, raw_text};

/// Display tone of a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Danger,
    Warning,
    Info,
    Purple,
    Neutral,
}

/// Tone for the status words the back office uses.
pub fn tone_for_status(status: &str) -> Tone {
    match status {
        "Active" | "active" | "verified" | "completed" | "Completed" | "published"
        | "resolved" => Tone::Success,
        "Inactive" | "inactive" | "Pending" | "pending" | "upcoming" | "draft" | "open"
        | "past_due" | "incomplete" => Tone::Warning,
        "Deactivated" | "deactivated" | "failed" | "canceled" | "overdue" | "Overdue"
        | "dismissed" => Tone::Danger,
        "processing" | "ongoing" | "Sent for Review" | "trialing" => Tone::Info,
        "Signed" => Tone::Purple,
        _ => Tone::Neutral,
    }
}

fn non_empty_str(value: &Value) -> Option<&str> {
    value.as_str().map(str::trim).filter(|s| !s.is_empty())
}

/// Raw text, treating an empty string like a missing value.
pub fn or_placeholder(value: &Value) -> String {
    match value {
        Value::String(s) if s.trim().is_empty() => PLACEHOLDER.to_string(),
        other => raw_text(other),
    }
}

/// First ten characters of a timestamp (`2024-05-01T10:00:00Z` -> `2024-05-01`).
pub fn date_only(value: &Value) -> String {
    match non_empty_str(value) {
        Some(s) => s.chars().take(10).collect(),
        None => PLACEHOLDER.to_string(),
    }
}

/// `name <email>` for a nested user-like object.
pub fn person(value: &Value) -> String {
    let name = ["fullname", "name"]
        .iter()
        .find_map(|k| value.get(*k).and_then(non_empty_str));
    let email = value.get("email").and_then(non_empty_str);
    match (name, email) {
        (Some(name), Some(email)) => format!("{name} <{email}>"),
        (Some(name), None) => name.to_string(),
        (None, Some(email)) => email.to_string(),
        (None, None) => PLACEHOLDER.to_string(),
    }
}

/// A field inside a nested object, e.g. the `name` of a `plan`.
pub fn nested(value: &Value, path: &str) -> String {
    lookup(value, path)
        .map(or_placeholder)
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

/// `snake_case` words to `Snake case`.
pub fn humanize(value: &Value) -> String {
    let Some(s) = non_empty_str(value) else {
        return PLACEHOLDER.to_string();
    };
    let spaced = s.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => PLACEHOLDER.to_string(),
    }
}

/// `Active` / `Inactive` for a boolean flag.
pub fn active_flag(value: &Value) -> String {
    let active = match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_i64().is_some_and(|n| n != 0),
        _ => false,
    };
    let label = if active { "Active" } else { "Inactive" };
    label.to_string()
}

/// Comma-joined list of strings, or of the `name` of each object.
pub fn join_list(value: &Value) -> String {
    let Some(items) = value.as_array() else {
        return PLACEHOLDER.to_string();
    };
    let names: Vec<String> = items
        .iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(s.clone()),
            Value::Object(_) => item.get("name").and_then(Value::as_str).map(str::to_string),
            _ => None,
        })
        .collect();
    if names.is_empty() {
        PLACEHOLDER.to_string()
    } else {
        names.join(", ")
    }
}

/// First `limit` names followed by `+N` for the rest.
pub fn join_truncated(value: &Value, limit: usize) -> String {
    let Some(items) = value.as_array() else {
        return PLACEHOLDER.to_string();
    };
    if items.len() <= limit {
        return join_list(value);
    }
    let head = Value::Array(items[..limit].to_vec());
    format!("{}, +{}", join_list(&head), items.len() - limit)
}

/// Cut long text to `max` characters with an ellipsis.
pub fn truncate(value: &Value, max: usize) -> String {
    let Some(s) = non_empty_str(value) else {
        return PLACEHOLDER.to_string();
    };
    if s.chars().count() <= max {
        return s.to_string();
    }
    let cut: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{cut}\u{2026}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_date_only() {
        assert_eq!(date_only(&json!("2024-05-01T10:00:00.000000Z")), "2024-05-01");
        assert_eq!(date_only(&Value::Null), PLACEHOLDER);
        assert_eq!(date_only(&json!("")), PLACEHOLDER);
    }

    #[test]
    fn test_person() {
        assert_eq!(
            person(&json!({"fullname": "Ann Lee", "email": "ann@example.com"})),
            "Ann Lee <ann@example.com>"
        );
        assert_eq!(person(&json!({"name": "Bo"})), "Bo");
        assert_eq!(person(&Value::Null), PLACEHOLDER);
    }

    #[test]
    fn test_humanize() {
        assert_eq!(humanize(&json!("google_drive")), "Google drive");
        assert_eq!(humanize(&Value::Null), PLACEHOLDER);
    }

    #[test]
    fn test_lists() {
        assert_eq!(join_list(&json!(["a", "b"])), "a, b");
        assert_eq!(join_list(&json!([])), PLACEHOLDER);
        let perms = json!([{"name": "a"}, {"name": "b"}, {"name": "c"}, {"name": "d"}, {"name": "e"}]);
        assert_eq!(join_truncated(&perms, 3), "a, b, c, +2");
    }

    #[test]
    fn test_truncate_multibyte() {
        assert_eq!(truncate(&json!("héllo wörld"), 6), "héllo…");
        assert_eq!(truncate(&json!("short"), 10), "short");
    }

    #[test]
    fn test_tones() {
        assert_eq!(tone_for_status("Active"), Tone::Success);
        assert_eq!(tone_for_status("overdue"), Tone::Danger);
        assert_eq!(tone_for_status("Signed"), Tone::Purple);
        assert_eq!(tone_for_status("whatever"), Tone::Neutral);
    }

    #[test]
    fn test_active_flag() {
        assert_eq!(active_flag(&json!(true)), "Active");
        assert_eq!(active_flag(&json!(1)), "Active");
        assert_eq!(active_flag(&Value::Null), "Inactive");
    }
}
