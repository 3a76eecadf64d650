//! Configuration commands.
//!
//! - `config show`: Display the current configuration
//! - `config set`: Set a configuration value
//! - `config get`: Print one configuration value

use owo_colors::OwoColorize;
use serde_json::json;

use super::CommandOutput;
use crate::cli::OutputOptions;
use crate::config::{API_URL_ENV, Config, TOKEN_ENV};
use crate::error::{BackofficeError, Result};

const TOKEN_KEY: &str = "api.token";

/// Mask a sensitive value by showing only the first 2 and last 2 characters
fn mask_sensitive_value(value: &str) -> String {
    let char_count = value.chars().count();
    if char_count > 4 {
        let first: String = value.chars().take(2).collect();
        let last: String = value.chars().skip(char_count - 2).collect();
        format!("{first}...{last}")
    } else {
        "****".to_string()
    }
}

fn source_note(from_env: bool, env: &str) -> String {
    if from_env {
        format!(" (from {env})").dimmed().to_string()
    } else {
        String::new()
    }
}

/// Show current configuration
pub fn cmd_config_show(output: OutputOptions) -> Result<()> {
    let config = Config::load()?;
    let path = Config::config_path()?;

    let base_url = config.base_url();
    let token = config.token();
    let url_from_env = base_url.is_some() && base_url != config.api.base_url;
    let token_from_env = token.is_some() && token != config.api.token;

    let json_output = json!({
        "api": {
            "base_url": base_url,
            "token": token.as_deref().map(mask_sensitive_value),
            "token_configured": token.is_some(),
            "timeout_secs": config.api.timeout_secs,
        },
        "defaults": {
            "page_size": config.page_size(),
        },
        "config_file": path.to_string_lossy(),
    });

    let not_configured = || "not configured".dimmed().to_string();

    let mut text = String::new();
    text.push_str(&format!("{}\n\n", "Configuration:".cyan().bold()));

    text.push_str(&format!("{}:\n", "api".cyan()));
    text.push_str(&format!(
        "  base_url: {}{}\n",
        base_url.clone().unwrap_or_else(not_configured),
        source_note(url_from_env, API_URL_ENV)
    ));
    text.push_str(&format!(
        "  token: {}{}\n",
        token
            .as_deref()
            .map(mask_sensitive_value)
            .unwrap_or_else(not_configured),
        source_note(token_from_env, TOKEN_ENV)
    ));
    text.push_str(&format!("  timeout_secs: {}\n", config.api.timeout_secs));
    text.push('\n');

    text.push_str(&format!("{}:\n", "defaults".cyan()));
    text.push_str(&format!("  page_size: {}\n", config.page_size()));
    text.push('\n');

    text.push_str(&format!(
        "{}",
        format!("Config file: {}", path.display()).dimmed()
    ));

    CommandOutput::new(json_output).with_text(text).print(output)
}

/// Set a configuration value
pub fn cmd_config_set(key: &str, value: &str, output: OutputOptions) -> Result<()> {
    let mut config = Config::load()?;
    config.set(key, value)?;
    config.save()?;

    let (json_output, text) = if key == TOKEN_KEY {
        (
            json!({
                "action": "config_set",
                "key": key,
                "success": true,
            }),
            format!("Set {}", key.cyan()),
        )
    } else {
        let stored = config.get(key)?.unwrap_or_default();
        (
            json!({
                "action": "config_set",
                "key": key,
                "value": stored,
                "success": true,
            }),
            format!("Set {} to {}", key.cyan(), stored),
        )
    };

    CommandOutput::new(json_output).with_text(text).print(output)
}

/// Get a specific configuration value
pub fn cmd_config_get(key: &str, output: OutputOptions) -> Result<()> {
    let config = Config::load()?;
    let value = config
        .get(key)?
        .ok_or_else(|| BackofficeError::Config(format!("{key} not set")))?;

    let (json_output, text) = if key == TOKEN_KEY {
        let masked = mask_sensitive_value(&value);
        (
            json!({
                "key": key,
                "value": masked,
                "configured": true,
                "masked": true,
            }),
            format!("{masked} (masked - showing first 2 and last 2 characters)"),
        )
    } else {
        (
            json!({
                "key": key,
                "value": value,
                "configured": true,
            }),
            value,
        )
    };

    CommandOutput::new(json_output).with_text(text).print(output)
}
