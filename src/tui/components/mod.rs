//! Components of the resource browser

pub mod detail_pane;
pub mod footer;
pub mod header;
pub mod pager;
pub mod search_box;
pub mod shortcuts;
pub mod table_pane;
pub mod toast;

pub use detail_pane::{DetailPane, DetailPaneProps};
pub use footer::{Footer, FooterProps, Shortcut};
pub use header::{Header, HeaderProps};
pub use pager::{Pager, PagerProps};
pub use search_box::{SearchBox, SearchBoxProps};
pub use shortcuts::{ShortcutsBuilder, detail_shortcuts, search_shortcuts, table_shortcuts};
pub use table_pane::{TablePane, TablePaneProps};
pub use toast::{Toast, ToastLevel, render_toast};
