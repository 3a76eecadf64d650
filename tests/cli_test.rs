#[path = "common/mod.rs"]
mod common;

use common::BackofficeTest;
use std::process::Command;

/// Nothing listens on the discard port, so requests that get this far fail fast.
const UNREACHABLE_API: &str = "api:\n  base_url: http://127.0.0.1:9\n";

// ============================================================================
// Resource catalogue
// ============================================================================

#[test]
fn test_resources_lists_catalogue() {
    let bo = BackofficeTest::new();

    let output = bo.run_success(&["resources"]);
    assert!(output.contains("users"));
    assert!(output.contains("/admin/contracts/list"));
    assert!(output.contains("contract-issues"));
    assert!(output.contains("toggle"));
}

#[test]
fn test_resources_json() {
    let bo = BackofficeTest::new();

    let output = bo.run_success(&["resources", "--json"]);
    let json: serde_json::Value = serde_json::from_str(&output).expect("valid JSON");
    let list = json.as_array().expect("array of resources");
    assert_eq!(list.len(), 14);

    let users = list
        .iter()
        .find(|r| r["name"] == "users")
        .expect("users resource");
    assert_eq!(users["endpoint"], "/admin/users");
    assert_eq!(users["paginated"], true);
}

// ============================================================================
// Config commands
// ============================================================================

#[test]
fn test_config_show_empty() {
    let bo = BackofficeTest::new();

    let output = bo.run_success(&["config", "show"]);
    assert!(output.contains("Configuration"));
    assert!(output.contains("not configured"));
    assert!(!bo.config_exists());
}

#[test]
fn test_config_set_and_get_base_url() {
    let bo = BackofficeTest::new();

    bo.run_success(&["config", "set", "api.base_url", "https://api.example.com"]);
    assert!(bo.read_config().contains("https://api.example.com"));

    let output = bo.run_success(&["config", "get", "api.base_url"]);
    assert_eq!(output.trim(), "https://api.example.com");
}

#[test]
fn test_config_set_rejects_invalid_url() {
    let bo = BackofficeTest::new();

    let stderr = bo.run_failure(&["config", "set", "api.base_url", "not a url"]);
    assert!(stderr.contains("invalid value"));
    assert!(!bo.config_exists());
}

#[test]
fn test_config_set_rejects_zero_page_size() {
    let bo = BackofficeTest::new();

    let stderr = bo.run_failure(&["config", "set", "defaults.page_size", "0"]);
    assert!(stderr.contains("positive integer"));
}

#[test]
fn test_config_unknown_key() {
    let bo = BackofficeTest::new();

    let stderr = bo.run_failure(&["config", "set", "api.colour", "blue"]);
    assert!(stderr.contains("unknown config key"));

    let stderr = bo.run_failure(&["config", "get", "api.colour"]);
    assert!(stderr.contains("unknown config key"));
}

#[test]
fn test_config_get_unset_key_fails() {
    let bo = BackofficeTest::new();

    let stderr = bo.run_failure(&["config", "get", "api.token"]);
    assert!(stderr.contains("api.token not set"));
}

#[test]
fn test_config_token_is_masked() {
    let bo = BackofficeTest::new();

    let output = bo.run_success(&["config", "set", "api.token", "secret-token-1234"]);
    assert!(!output.contains("secret-token-1234"));

    let output = bo.run_success(&["config", "get", "api.token"]);
    assert!(output.contains("se...34"));
    assert!(output.contains("masked"));
    assert!(!output.contains("secret-token-1234"));

    let output = bo.run_success(&["config", "show"]);
    assert!(output.contains("se...34"));
    assert!(!output.contains("secret-token-1234"));

    // Stored in full
    assert!(bo.read_config().contains("secret-token-1234"));
}

#[test]
fn test_config_get_json() {
    let bo = BackofficeTest::new();
    bo.write_config("defaults:\n  page_size: 25\n");

    let output = bo.run_success(&["config", "get", "defaults.page_size", "--json"]);
    let json: serde_json::Value = serde_json::from_str(&output).expect("valid JSON");
    assert_eq!(json["key"], "defaults.page_size");
    assert_eq!(json["value"], "25");
}

#[test]
fn test_config_show_notes_env_override() {
    let bo = BackofficeTest::new();
    bo.write_config("api:\n  base_url: https://file.example.com\n");

    let output = bo.run_with_env(
        &["config", "show"],
        &[("BACKOFFICE_API_URL", "https://env.example.com")],
    );
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("https://env.example.com"));
    assert!(stdout.contains("BACKOFFICE_API_URL"));
}

#[test]
fn test_config_malformed_file_fails() {
    let bo = BackofficeTest::new();
    bo.write_config("api: [not, a, map\n");

    bo.run_failure(&["config", "show"]);
}

// ============================================================================
// List and mutations without a reachable API
// ============================================================================

#[test]
fn test_list_without_base_url() {
    let bo = BackofficeTest::new();

    let stderr = bo.run_failure(&["list", "users"]);
    assert!(stderr.contains("API base URL not configured"));
}

#[test]
fn test_list_unknown_resource() {
    let bo = BackofficeTest::new();
    bo.write_config(UNREACHABLE_API);

    let stderr = bo.run_failure(&["list", "widgets"]);
    assert!(stderr.contains("unknown resource 'widgets'"));
}

#[test]
fn test_list_rejects_unsupported_search() {
    let bo = BackofficeTest::new();
    bo.write_config(UNREACHABLE_API);

    let stderr = bo.run_failure(&["list", "exports", "--search", "acme"]);
    assert!(stderr.contains("exports does not support search"));
}

#[test]
fn test_list_rejects_reversed_range() {
    let bo = BackofficeTest::new();
    bo.write_config(UNREACHABLE_API);

    let stderr = bo.run_failure(&[
        "list",
        "contracts",
        "--from",
        "2024-03-01",
        "--to",
        "2024-01-01",
    ]);
    assert!(stderr.contains("is after end"));
}

#[test]
fn test_list_rejects_page_zero() {
    let bo = BackofficeTest::new();
    bo.write_config(UNREACHABLE_API);

    bo.run_failure(&["list", "users", "--page", "0"]);
}

#[test]
fn test_list_unreachable_api_fails() {
    let bo = BackofficeTest::new();
    bo.write_config(UNREACHABLE_API);

    bo.run_failure(&["list", "users"]);
}

#[test]
fn test_delete_requires_force_when_not_interactive() {
    let bo = BackofficeTest::new();
    bo.write_config(UNREACHABLE_API);

    let stderr = bo.run_failure(&["delete", "admin-users", "4"]);
    assert!(stderr.contains("requires --force"));
}

#[test]
fn test_delete_unsupported_resource() {
    let bo = BackofficeTest::new();
    bo.write_config(UNREACHABLE_API);

    let stderr = bo.run_failure(&["delete", "users", "4", "--force"]);
    assert!(stderr.contains("users does not support delete"));
}

#[test]
fn test_browse_requires_terminal() {
    let bo = BackofficeTest::new();
    bo.write_config(UNREACHABLE_API);

    let stderr = bo.run_failure(&["browse", "users"]);
    assert!(stderr.contains("interactive terminal"));
}

// ============================================================================
// Completions
// ============================================================================

#[test]
fn test_completions_bash() {
    let output = Command::new(common::backoffice_binary())
        .args(["completions", "bash"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("_backoffice"));
}

#[test]
fn test_completions_zsh() {
    let output = Command::new(common::backoffice_binary())
        .args(["completions", "zsh"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("#compdef backoffice"));
}

#[test]
fn test_completions_invalid_shell() {
    let output = Command::new(common::backoffice_binary())
        .args(["completions", "tcsh"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
}
