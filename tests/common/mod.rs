#![allow(dead_code)]

pub mod fake_api;

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Helper struct to run backoffice commands against an isolated config file
pub struct BackofficeTest {
    pub temp_dir: TempDir,
    binary_path: String,
}

impl BackofficeTest {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");

        BackofficeTest {
            temp_dir,
            binary_path: backoffice_binary().to_string(),
        }
    }

    pub fn config_path(&self) -> PathBuf {
        self.temp_dir.path().join("config.yaml")
    }

    pub fn run(&self, args: &[&str]) -> Output {
        self.command(args)
            .output()
            .expect("Failed to execute backoffice command")
    }

    /// Run with extra environment variables set
    pub fn run_with_env(&self, args: &[&str], env: &[(&str, &str)]) -> Output {
        let mut command = self.command(args);
        for (key, value) in env {
            command.env(key, value);
        }
        command.output().expect("Failed to execute backoffice command")
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut command = Command::new(&self.binary_path);
        command
            .args(args)
            .current_dir(self.temp_dir.path())
            .env("BACKOFFICE_CONFIG", self.config_path())
            .env_remove("BACKOFFICE_API_URL")
            .env_remove("BACKOFFICE_TOKEN")
            .env_remove("RUST_LOG");
        command
    }

    pub fn run_success(&self, args: &[&str]) -> String {
        let output = self.run(args);
        if !output.status.success() {
            panic!(
                "Command {:?} failed with status {:?}\nstdout: {}\nstderr: {}",
                args,
                output.status,
                String::from_utf8_lossy(&output.stdout),
                String::from_utf8_lossy(&output.stderr)
            );
        }
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    pub fn run_failure(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert!(
            !output.status.success(),
            "Expected command {:?} to fail, but it succeeded",
            args
        );
        String::from_utf8_lossy(&output.stderr).to_string()
    }

    pub fn write_config(&self, content: &str) {
        fs::write(self.config_path(), content).expect("Failed to write config file");
    }

    pub fn read_config(&self) -> String {
        fs::read_to_string(self.config_path()).expect("Failed to read config file")
    }

    pub fn config_exists(&self) -> bool {
        self.config_path().exists()
    }
}

impl Default for BackofficeTest {
    fn default() -> Self {
        Self::new()
    }
}

/// Path to the compiled binary under test
pub fn backoffice_binary() -> &'static str {
    env!("CARGO_BIN_EXE_backoffice")
}
