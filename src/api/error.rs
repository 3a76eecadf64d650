//! Mapping of non-2xx responses into [`BackofficeError`].

use serde_json::Value;

use crate::error::{BackofficeError, FieldError};

/// Pull a human-readable message out of an error body: `message`, then `error`.
pub fn extract_message(body: Option<&Value>) -> Option<String> {
    let body = body?;
    ["message", "error"].iter().find_map(|key| {
        body.get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    })
}

/// Ordered `{field: [messages]}` from a 422 body. A bare string is one message.
fn field_errors(body: Option<&Value>) -> Vec<FieldError> {
    let Some(errors) = body.and_then(|b| b.get("errors")).and_then(Value::as_object) else {
        return Vec::new();
    };

    errors
        .iter()
        .map(|(field, messages)| {
            let messages = match messages {
                Value::Array(items) => items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect(),
                Value::String(s) => vec![s.clone()],
                _ => Vec::new(),
            };
            FieldError {
                field: field.clone(),
                messages,
            }
        })
        .collect()
}

/// Build the error for a response with the given status and decoded body.
pub fn error_from_response(status: u16, body: Option<Value>) -> BackofficeError {
    let message = extract_message(body.as_ref());

    match status {
        401 => BackofficeError::Unauthorized(
            message.unwrap_or_else(|| "Unauthenticated".to_string()),
        ),
        422 => {
            let fields = field_errors(body.as_ref());
            let message = fields
                .iter()
                .find_map(|f| f.messages.first().cloned())
                .or(message)
                .unwrap_or_else(|| "Validation failed".to_string());
            BackofficeError::Validation { message, fields }
        }
        _ => BackofficeError::Http {
            status,
            message: message.unwrap_or_else(|| format!("Request failed with status code {status}")),
            body,
        },
    }
}
