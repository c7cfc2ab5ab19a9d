//! Shared testing utilities for automate CLI tests.

use assert_cmd::Command;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Testing harness providing an isolated working directory and a CLI wired
/// to a mock backend.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
    api_url: String,
}

#[allow(dead_code)]
impl TestContext {
    /// Create a new isolated environment pointing at `api_url`.
    pub fn new(api_url: &str) -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        Self { root, api_url: format!("{}/", api_url) }
    }

    /// Path of the isolated working directory.
    pub fn work_dir(&self) -> &Path {
        self.root.path()
    }

    /// Write an `automate.toml` into the working directory.
    pub fn write_config(&self, contents: &str) {
        fs::write(self.root.path().join("automate.toml"), contents)
            .expect("Failed to write test config");
    }

    /// Build a command for invoking the compiled `automate` binary against
    /// the mock backend.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("automate").expect("binary under test");
        cmd.current_dir(self.root.path());
        cmd.env("AUTOMATE_API_URL", &self.api_url);
        cmd.env("AUTOMATE_API_TIMEOUT_SECS", "5");
        cmd
    }
}
