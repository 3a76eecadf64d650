//! Fixed color palette of the browser
//!
//! Tone colors match the CLI output in `display`.

use iocraft::prelude::Color;

use crate::resources::format::{Tone, tone_for_status};

const GRAY: Color = Color::Rgb {
    r: 120,
    g: 120,
    b: 120,
};

/// Colors for browser components
#[derive(Debug, Clone)]
pub struct Theme {
    // Tone colors
    pub tone_success: Color,
    pub tone_danger: Color,
    pub tone_warning: Color,
    pub tone_info: Color,
    pub tone_purple: Color,
    pub tone_neutral: Color,

    // UI colors
    pub border: Color,
    pub border_focused: Color,
    pub background: Color,
    pub text: Color,
    pub text_dimmed: Color,
    pub highlight: Color,
    pub selected_background: Color,
    pub skeleton: Color,
    pub filter: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            tone_success: Color::Green,
            tone_danger: Color::Red,
            tone_warning: Color::Yellow,
            tone_info: Color::Cyan,
            tone_purple: Color::Magenta,
            tone_neutral: GRAY,

            border: GRAY,
            border_focused: Color::Blue,
            background: Color::Reset,
            text: Color::White,
            text_dimmed: GRAY,
            highlight: Color::Blue,
            selected_background: Color::DarkBlue,
            skeleton: Color::Rgb {
                r: 70,
                g: 70,
                b: 70,
            },
            filter: Color::Cyan,
        }
    }
}

impl Theme {
    pub fn tone_color(&self, tone: Tone) -> Color {
        match tone {
            Tone::Success => self.tone_success,
            Tone::Danger => self.tone_danger,
            Tone::Warning => self.tone_warning,
            Tone::Info => self.tone_info,
            Tone::Purple => self.tone_purple,
            Tone::Neutral => self.tone_neutral,
        }
    }

    /// Color for a status badge such as `overdue` or `published`
    pub fn status_color(&self, status: &str) -> Color {
        self.tone_color(tone_for_status(status))
    }
}

/// Global theme instance
pub static THEME: std::sync::LazyLock<Theme> = std::sync::LazyLock::new(Theme::default);

/// Get a reference to the global theme
pub fn theme() -> &'static Theme {
    &THEME
}
