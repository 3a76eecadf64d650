use thiserror::Error;

/// A single field's validation messages from a 422 response, in server order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub messages: Vec<String>,
}

#[derive(Error, Debug)]
pub enum BackofficeError {
    // Remote API errors
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{message}")]
    Http {
        status: u16,
        message: String,
        body: Option<serde_json::Value>,
    },

    #[error("{message}")]
    Validation {
        message: String,
        fields: Vec<FieldError>,
    },

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("unexpected response envelope: {0}")]
    Envelope(String),

    // Local errors
    #[error("configuration error: {0}")]
    Config(String),

    #[error("unknown resource '{0}'")]
    UnknownResource(String),

    #[error("{resource} does not support {operation}")]
    Unsupported {
        resource: String,
        operation: String,
    },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("{0}")]
    ConfirmationRequired(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl BackofficeError {
    /// HTTP status carried by the error, if it came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            BackofficeError::Http { status, .. } => Some(*status),
            BackofficeError::Validation { .. } => Some(422),
            BackofficeError::Unauthorized(_) => Some(401),
            BackofficeError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// First validation message of the first field, if this is a validation error.
    pub fn first_field_message(&self) -> Option<&str> {
        match self {
            BackofficeError::Validation { fields, .. } => fields
                .iter()
                .find_map(|f| f.messages.first())
                .map(String::as_str),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, BackofficeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_field_message_skips_empty_fields() {
        let err = BackofficeError::Validation {
            message: "The given data was invalid.".to_string(),
            fields: vec![
                FieldError {
                    field: "name".to_string(),
                    messages: vec![],
                },
                FieldError {
                    field: "email".to_string(),
                    messages: vec!["Email is required".to_string()],
                },
            ],
        };
        assert_eq!(err.first_field_message(), Some("Email is required"));
        assert_eq!(err.status(), Some(422));
    }

    #[test]
    fn test_http_error_displays_message() {
        let err = BackofficeError::Http {
            status: 500,
            message: "Server exploded".to_string(),
            body: None,
        };
        assert_eq!(err.to_string(), "Server exploded");
        assert_eq!(err.status(), Some(500));
        assert!(err.first_field_message().is_none());
    }
}
