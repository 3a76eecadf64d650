//! Interactive resource browser built on iocraft

pub mod browse;
pub mod components;
pub mod navigation;
pub mod theme;

pub use browse::{ResourceBrowser, ResourceBrowserProps};
pub use theme::Theme;
