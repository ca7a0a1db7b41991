//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - Test environment setup with temporary directories
//! - Command builder helpers for common patterns

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test environment with an isolated directory of configuration files.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();
        Self {
            temp_dir,
            temp_path,
        }
    }

    /// Get a bare command builder for the expconf binary.
    ///
    /// `EXPCONF_LOG_MODE` and `EXPCONF_MAX_MERGE_DEPTH` are cleared so the
    /// caller's environment cannot leak into assertions.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("expconf").expect("Failed to find expconf binary");
        cmd.env_remove("EXPCONF_LOG_MODE")
            .env_remove("EXPCONF_MAX_MERGE_DEPTH");
        cmd
    }

    /// Get a command builder with `-c` set for each of `files`.
    pub fn command_with(&self, files: &[&Path]) -> Command {
        let mut cmd = self.command();
        for file in files {
            cmd.arg("-c").arg(file);
        }
        cmd
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Write a configuration file under the test directory.
    ///
    /// Parent directories are created as needed.
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.temp_path.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create config directory");
        }
        std::fs::write(&path, content).expect("Failed to write config file");
        path
    }

    /// Run `dump --format json` and parse its output.
    ///
    /// # Panics
    /// Panics if the command fails or prints invalid JSON.
    pub fn dump_json(&self, files: &[&Path]) -> serde_json::Value {
        let output = self
            .command_with(files)
            .args(["dump", "--format", "json"])
            .output()
            .expect("Failed to run dump command");

        assert!(
            output.status.success(),
            "Dump failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        serde_json::from_slice(&output.stdout).expect("Dump output is not valid JSON")
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
