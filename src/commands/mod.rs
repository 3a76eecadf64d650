mod browse;
mod config;
pub mod interactive;
mod list;
mod mutate;
mod resources;
mod show;

pub use browse::cmd_browse;
pub use config::{cmd_config_get, cmd_config_set, cmd_config_show};
pub use list::{ListOptions, build_query, cmd_list};
pub use mutate::{cmd_action, cmd_create, cmd_delete, cmd_toggle, cmd_update};
pub use resources::cmd_resources;
pub use show::cmd_show;

use serde_json::Value;

use crate::cli::OutputOptions;
use crate::error::Result;

/// Print a value as pretty JSON
pub fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Command result with a JSON form and an optional human-readable form.
pub struct CommandOutput {
    json: Value,
    text: Option<String>,
}

impl CommandOutput {
    pub fn new(json: Value) -> Self {
        Self { json, text: None }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Print JSON when requested (or when there is no text form), text otherwise.
    pub fn print(self, output: OutputOptions) -> Result<()> {
        match self.text {
            Some(text) if !output.json => {
                println!("{text}");
                Ok(())
            }
            _ => print_json(&self.json),
        }
    }
}
