//! Toast notification line

use iocraft::prelude::*;

use crate::mutation::Feedback;
use crate::tui::theme::theme;

/// A toast notification message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub level: ToastLevel,
}

/// Severity level for toast notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
    Success,
}

impl ToastLevel {
    pub fn icon(&self) -> &'static str {
        match self {
            ToastLevel::Info => "i",
            ToastLevel::Warning => "!",
            ToastLevel::Error => "\u{2717}",
            ToastLevel::Success => "\u{2713}",
        }
    }
}

impl Toast {
    pub fn new(message: impl Into<String>, level: ToastLevel) -> Self {
        Self {
            message: message.into(),
            level,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, ToastLevel::Info)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, ToastLevel::Warning)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, ToastLevel::Error)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, ToastLevel::Success)
    }

    pub fn color(&self) -> Color {
        let theme = theme();
        match self.level {
            ToastLevel::Info => theme.tone_info,
            ToastLevel::Warning => theme.tone_warning,
            ToastLevel::Error => theme.tone_danger,
            ToastLevel::Success => theme.tone_success,
        }
    }
}

impl From<&Feedback> for Toast {
    fn from(feedback: &Feedback) -> Self {
        match feedback {
            Feedback::Success(message) => Toast::success(message.clone()),
            Feedback::Error(message) => Toast::error(message.clone()),
        }
    }
}

/// One-line toast above the footer, if any
pub fn render_toast(toast: &Option<Toast>) -> Option<AnyElement<'static>> {
    let toast = toast.as_ref()?;
    let color = toast.color();
    Some(
        element! {
            View(
                width: 100pct,
                height: 1,
                flex_shrink: 0.0,
                flex_direction: FlexDirection::Row,
                column_gap: 1,
                padding_left: 1,
            ) {
                Text(content: toast.level.icon(), color: color, weight: Weight::Bold)
                Text(content: toast.message.clone(), color: color)
            }
        }
        .into_any(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toast_from_feedback() {
        let ok = Toast::from(&Feedback::Success("Blog post deleted".into()));
        assert_eq!(ok.level, ToastLevel::Success);
        assert_eq!(ok.message, "Blog post deleted");

        let err = Toast::from(&Feedback::Error("Email is required".into()));
        assert_eq!(err.level, ToastLevel::Error);
    }
}
