//! Configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::source::DEFAULT_MAX_MANIFEST_BYTES;

/// Process configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Sidebar manifest used when a command names none (default: ./sidebars.json).
    pub sidebars_path: PathBuf,

    /// Test-runner manifest used when a command names none (default: ./runner.json).
    pub runner_config_path: PathBuf,

    /// Largest manifest accepted, in bytes (default: 1 MiB).
    pub max_manifest_bytes: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sidebars_path: PathBuf::from("./sidebars.json"),
            runner_config_path: PathBuf::from("./runner.json"),
            max_manifest_bytes: DEFAULT_MAX_MANIFEST_BYTES,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let sidebars_path = lookup("SIGNPOST_SIDEBARS")
            .map(PathBuf::from)
            .unwrap_or(defaults.sidebars_path);

        let runner_config_path = lookup("SIGNPOST_RUNNER_CONFIG")
            .map(PathBuf::from)
            .unwrap_or(defaults.runner_config_path);

        let max_manifest_bytes = match lookup("SIGNPOST_MAX_MANIFEST_BYTES") {
            Some(v) => v
                .trim()
                .parse()
                .context("SIGNPOST_MAX_MANIFEST_BYTES must be a valid u64")?,
            None => defaults.max_manifest_bytes,
        };

        Ok(Self {
            sidebars_path,
            runner_config_path,
            max_manifest_bytes,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn reads_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("SIGNPOST_SIDEBARS", "docs/sidebars.yml"),
            ("SIGNPOST_RUNNER_CONFIG", "runner.toml"),
            ("SIGNPOST_MAX_MANIFEST_BYTES", "2048"),
        ]))
        .unwrap();

        assert_eq!(config.sidebars_path, PathBuf::from("docs/sidebars.yml"));
        assert_eq!(config.runner_config_path, PathBuf::from("runner.toml"));
        assert_eq!(config.max_manifest_bytes, 2048);
    }

    #[test]
    fn rejects_bad_size() {
        let err = Config::from_lookup(lookup(&[("SIGNPOST_MAX_MANIFEST_BYTES", "lots")]))
            .unwrap_err();
        assert!(err.to_string().contains("SIGNPOST_MAX_MANIFEST_BYTES"));
    }
}
