use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use serde_json::Value;
use std::io;

use crate::query::DateFilter;

#[derive(Parser)]
#[command(name = "backoffice")]
#[command(about = "Browse and manage the back office from the terminal")]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format shared by commands that support `--json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputOptions {
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the resources this client knows about
    Resources {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one page of a resource
    #[command(visible_alias = "ls")]
    List {
        /// Resource name (see `backoffice resources`)
        resource: String,

        /// Date filter: today, this_week, this_month, this_year, last_year
        #[arg(short, long, value_parser = parse_filter, conflicts_with_all = ["from", "to"])]
        filter: Option<DateFilter>,

        /// Start of a custom date range (YYYY-MM-DD)
        #[arg(long, requires = "to")]
        from: Option<String>,

        /// End of a custom date range (YYYY-MM-DD)
        #[arg(long, requires = "from")]
        to: Option<String>,

        /// Search text
        #[arg(short, long)]
        search: Option<String>,

        /// Page number (1-based)
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
        page: Option<u32>,

        /// Rows per page
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        per_page: Option<u32>,

        /// Status filter (resource specific)
        #[arg(long)]
        status: Option<String>,

        /// Extra query parameter as key=value, can be repeated
        #[arg(long = "param", value_parser = parse_key_value, action = clap::ArgAction::Append)]
        params: Vec<(String, String)>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a single record
    #[command(visible_alias = "s")]
    Show {
        resource: String,
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a record
    Create {
        resource: String,

        /// Field as key=value (JSON scalars are typed), can be repeated
        #[arg(long = "field", required = true, value_parser = parse_field, action = clap::ArgAction::Append)]
        fields: Vec<(String, Value)>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Update a record
    Update {
        resource: String,
        id: String,

        /// Field as key=value (JSON scalars are typed), can be repeated
        #[arg(long = "field", required = true, value_parser = parse_field, action = clap::ArgAction::Append)]
        fields: Vec<(String, Value)>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete a record
    Delete {
        resource: String,
        id: String,

        /// Skip confirmation prompt
        #[arg(long)]
        force: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Flip a record's toggle (archive, activate, publish)
    Toggle {
        resource: String,
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run a resource action (e.g. remind, set-status)
    Action {
        resource: String,
        action: String,
        id: String,

        /// Value for actions that take one
        #[arg(long)]
        value: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Browse a resource interactively
    #[command(visible_alias = "b")]
    Browse {
        resource: String,

        /// Initial search text
        #[arg(short, long)]
        search: Option<String>,

        /// Initial date filter
        #[arg(short, long, value_parser = parse_filter)]
        filter: Option<DateFilter>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for [possible values: bash, zsh, fish, powershell, elvish]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Set a configuration value
    Set {
        /// Configuration key (api.base_url, api.token, api.timeout_secs, defaults.page_size)
        key: String,
        /// Value to set
        value: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Get a configuration value
    Get {
        /// Configuration key (api.base_url, api.token, api.timeout_secs, defaults.page_size)
        key: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Commands {
    /// Whether the command takes over the terminal.
    pub fn is_interactive(&self) -> bool {
        matches!(self, Commands::Browse { .. })
    }

    /// Execute the command, dispatching to the appropriate handler.
    pub async fn run(self) -> crate::error::Result<()> {
        use crate::commands::{
            ListOptions, cmd_action, cmd_browse, cmd_config_get, cmd_config_set, cmd_config_show,
            cmd_create, cmd_delete, cmd_list, cmd_resources, cmd_show, cmd_toggle, cmd_update,
        };
        use crate::context::AppContext;

        match self {
            Commands::Resources { json } => cmd_resources(OutputOptions { json }),

            Commands::List {
                resource,
                filter,
                from,
                to,
                search,
                page,
                per_page,
                status,
                params,
                json,
            } => {
                let ctx = AppContext::load()?;
                let options = ListOptions {
                    filter,
                    range: from.zip(to),
                    search,
                    page,
                    per_page,
                    status,
                    params,
                };
                cmd_list(&ctx, &resource, options, OutputOptions { json }).await
            }

            Commands::Show { resource, id, json } => {
                let ctx = AppContext::load()?;
                cmd_show(&ctx, &resource, &id, OutputOptions { json }).await
            }

            Commands::Create {
                resource,
                fields,
                json,
            } => {
                let ctx = AppContext::load()?;
                cmd_create(&ctx, &resource, fields, OutputOptions { json }).await
            }

            Commands::Update {
                resource,
                id,
                fields,
                json,
            } => {
                let ctx = AppContext::load()?;
                cmd_update(&ctx, &resource, &id, fields, OutputOptions { json }).await
            }

            Commands::Delete {
                resource,
                id,
                force,
                json,
            } => {
                let ctx = AppContext::load()?;
                cmd_delete(&ctx, &resource, &id, force, OutputOptions { json }).await
            }

            Commands::Toggle { resource, id, json } => {
                let ctx = AppContext::load()?;
                cmd_toggle(&ctx, &resource, &id, OutputOptions { json }).await
            }

            Commands::Action {
                resource,
                action,
                id,
                value,
                json,
            } => {
                let ctx = AppContext::load()?;
                cmd_action(&ctx, &resource, &action, &id, value, OutputOptions { json }).await
            }

            Commands::Browse {
                resource,
                search,
                filter,
            } => {
                let ctx = AppContext::load()?;
                cmd_browse(ctx, &resource, search, filter).await
            }

            Commands::Config { action } => match action {
                ConfigAction::Show { json } => cmd_config_show(OutputOptions { json }),
                ConfigAction::Set { key, value, json } => {
                    cmd_config_set(&key, &value, OutputOptions { json })
                }
                ConfigAction::Get { key, json } => cmd_config_get(&key, OutputOptions { json }),
            },

            Commands::Completions { shell } => {
                generate_completions(shell);
                Ok(())
            }
        }
    }
}

fn parse_filter(s: &str) -> Result<DateFilter, String> {
    s.parse().map_err(|e: crate::error::BackofficeError| e.to_string())
}

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid '{s}', expected key=value"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("invalid '{s}', key cannot be empty"));
    }
    Ok((key.to_string(), value.to_string()))
}

/// `key=value` where the value is typed if it is a JSON number, boolean or
/// null, and a string otherwise.
fn parse_field(s: &str) -> Result<(String, Value), String> {
    let (key, raw) = parse_key_value(s)?;
    let value = match serde_json::from_str::<Value>(&raw) {
        Ok(v @ (Value::Number(_) | Value::Bool(_) | Value::Null)) => v,
        _ => Value::String(raw),
    };
    Ok((key, value))
}

pub fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "backoffice", &mut io::stdout());
}
