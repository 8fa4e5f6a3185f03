//! Shared helpers for integration tests.

#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

use std::path::PathBuf;

use serde_json::Value;
use tempfile::TempDir;

/// A scratch directory holding manifest files for one test.
pub struct TestSite {
    dir: TempDir,
}

impl TestSite {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("failed to create temp dir"),
        }
    }

    /// Write raw text to a file under the site root.
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, content).expect("failed to write manifest");
        path
    }

    /// Write a declaration as pretty JSON.
    pub fn write_json(&self, name: &str, declaration: &Value) -> PathBuf {
        let content = serde_json::to_string_pretty(declaration).expect("failed to encode JSON");
        self.write(name, &content)
    }

    /// Path of a file that does not exist.
    pub fn missing(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}

/// Run a CLI command into a buffer and return the output.
pub fn capture(run: impl FnOnce(&mut Vec<u8>) -> anyhow::Result<()>) -> anyhow::Result<String> {
    let mut out = Vec::new();
    run(&mut out)?;
    Ok(String::from_utf8(out).expect("CLI output is UTF-8"))
}
