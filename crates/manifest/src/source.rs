//! Reading manifests from disk.
//!
//! Manifests are decoded into the declarative [`serde_json::Value`] model
//! before validation, so every format goes through the same loaders.
//! The format is chosen by file extension: `.json`, `.yml`/`.yaml`, `.toml`.

use std::path::Path;

use anyhow::{Context, Result, bail};
use serde_json::Value;
use tracing::debug;

use crate::runner::TestMatchConfig;
use crate::sidebar::{self, SidebarSet};

/// Default maximum manifest size (1 MiB).
pub const DEFAULT_MAX_MANIFEST_BYTES: u64 = 1024 * 1024;

/// Supported manifest encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
    Toml,
}

impl Format {
    /// Pick the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "json" => Some(Self::Json),
            "yml" | "yaml" => Some(Self::Yaml),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }

    /// Decode manifest text into a declarative value.
    pub fn decode(self, content: &str) -> Result<Value> {
        let value: Value = match self {
            Self::Json => serde_json::from_str(content)?,
            Self::Yaml => serde_yml::from_str(content)?,
            Self::Toml => toml::from_str(content)?,
        };
        Ok(value)
    }
}

/// Read and decode a manifest file, rejecting files over `max_bytes`.
pub fn read_declaration(path: &Path, max_bytes: u64) -> Result<Value> {
    let Some(format) = Format::from_path(path) else {
        bail!(
            "unsupported manifest format for {} (expected .json, .yml, .yaml or .toml)",
            path.display()
        );
    };

    let size = std::fs::metadata(path)
        .with_context(|| format!("failed to stat manifest: {}", path.display()))?
        .len();
    if size > max_bytes {
        bail!(
            "manifest {} is {size} bytes, larger than the {max_bytes} byte limit",
            path.display()
        );
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read manifest: {}", path.display()))?;

    debug!(path = %path.display(), ?format, size, "read manifest");

    format
        .decode(&content)
        .with_context(|| format!("failed to parse manifest at {}", path.display()))
}

/// Read and validate a sidebar manifest file.
pub fn load_sidebars_file(path: &Path, max_bytes: u64) -> Result<SidebarSet> {
    let declaration = read_declaration(path, max_bytes)?;
    sidebar::load_sidebars(&declaration)
        .with_context(|| format!("invalid sidebar manifest at {}", path.display()))
}

/// Read and validate a test-runner manifest file.
pub fn load_runner_file(path: &Path, max_bytes: u64) -> Result<TestMatchConfig> {
    let declaration = read_declaration(path, max_bytes)?;
    TestMatchConfig::from_value(&declaration)
        .with_context(|| format!("invalid test-runner manifest at {}", path.display()))
}
