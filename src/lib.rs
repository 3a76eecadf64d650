pub mod api;
pub mod binding;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod display;
pub mod error;
pub mod logging;
pub mod mutation;
pub mod query;
pub mod resources;
pub mod session;
pub mod table;
pub mod tui;

pub use binding::{FetchStatus, FetchTicket, PageSource, RemoteListBinding, ResultPage};
pub use error::{BackofficeError, Result};
pub use query::{DateFilter, DateRange, QuerySpec};
pub use table::{Column, TableModel, TableRow, TabularView};
