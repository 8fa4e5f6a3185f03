//! CLI command implementations.
//!
//! Each command loads one manifest, validates it, and writes a report to
//! `out`. Validation failures are returned as errors so the binary exits
//! non-zero with the message on stderr.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::source::{load_runner_file, load_sidebars_file};

/// Validate a sidebar manifest and summarize each sidebar.
pub fn cmd_sidebar_check(path: &Path, max_bytes: u64, out: &mut impl Write) -> Result<()> {
    let sidebars = load_sidebars_file(path, max_bytes)?;

    writeln!(out, "{:<24} {:<10} {:<10}", "SIDEBAR", "ENTRIES", "DOCUMENTS")?;
    writeln!(out, "{}", "-".repeat(46))?;
    for (name, tree) in sidebars.iter() {
        writeln!(out, "{:<24} {:<10} {}", name, tree.len(), tree.leaf_count())?;
    }
    writeln!(
        out,
        "{} is valid ({} sidebar(s)).",
        path.display(),
        sidebars.len()
    )?;
    Ok(())
}

/// Print the validated tree (or all trees) as JSON.
pub fn cmd_sidebar_show(
    path: &Path,
    max_bytes: u64,
    sidebar: Option<&str>,
    out: &mut impl Write,
) -> Result<()> {
    let sidebars = load_sidebars_file(path, max_bytes)?;

    let json = match sidebar {
        Some(name) => {
            let tree = sidebars
                .get(name)
                .with_context(|| format!("sidebar '{name}' not found in {}", path.display()))?;
            serde_json::to_string_pretty(tree)?
        }
        None => serde_json::to_string_pretty(&sidebars)?,
    };

    writeln!(out, "{json}")?;
    Ok(())
}

/// Print previous/next documents and the breadcrumb trail for a document.
pub fn cmd_sidebar_neighbors(
    path: &Path,
    max_bytes: u64,
    doc_id: &str,
    sidebar: Option<&str>,
    out: &mut impl Write,
) -> Result<()> {
    let sidebars = load_sidebars_file(path, max_bytes)?;

    let name = match sidebar {
        Some(name) => name,
        None => sidebars.sidebar_of(doc_id).with_context(|| {
            format!("document '{doc_id}' is not in any sidebar of {}", path.display())
        })?,
    };
    let tree = sidebars
        .get(name)
        .with_context(|| format!("sidebar '{name}' not found in {}", path.display()))?;

    let (Some(neighbors), Some(trail)) = (tree.neighbors(doc_id), tree.breadcrumbs(doc_id)) else {
        bail!("document '{doc_id}' is not in sidebar '{name}'");
    };

    writeln!(out, "sidebar:     {name}")?;
    writeln!(out, "previous:    {}", neighbors.previous.unwrap_or("-"))?;
    writeln!(out, "next:        {}", neighbors.next.unwrap_or("-"))?;
    writeln!(out, "breadcrumbs: {}", trail.join(" > "))?;
    Ok(())
}

/// Validate a test-runner manifest and summarize it.
pub fn cmd_runner_check(path: &Path, max_bytes: u64, out: &mut impl Write) -> Result<()> {
    let config = load_runner_file(path, max_bytes)?;

    writeln!(out, "environment: {}", config.test_environment())?;
    writeln!(
        out,
        "extensions:  {}",
        config.module_file_extensions().join(", ")
    )?;
    for pattern in config.test_match() {
        writeln!(out, "test:        {}", pattern.as_str())?;
    }
    for transform in config.transforms() {
        writeln!(
            out,
            "transform:   {} -> {}",
            transform.pattern(),
            transform.transformer()
        )?;
    }
    for pattern in config.coverage_include() {
        writeln!(out, "cover:       {}", pattern.as_str())?;
    }
    for pattern in config.coverage_exclude() {
        writeln!(out, "skip:        {}", pattern.as_str())?;
    }
    writeln!(out, "{} is valid.", path.display())?;
    Ok(())
}

/// Report, for each path, whether it is a test, its transform and coverage.
pub fn cmd_runner_classify(
    path: &Path,
    max_bytes: u64,
    files: &[String],
    out: &mut impl Write,
) -> Result<()> {
    let config = load_runner_file(path, max_bytes)?;

    writeln!(
        out,
        "{:<40} {:<6} {:<16} {:<8}",
        "PATH", "TEST", "TRANSFORM", "COVERED"
    )?;
    writeln!(out, "{}", "-".repeat(73))?;
    for file in files {
        let test = if config.is_test_file(file) { "yes" } else { "no" };
        let transform = config.transform_for(file).unwrap_or("-");
        let covered = if config.is_covered(file) { "yes" } else { "no" };
        writeln!(out, "{file:<40} {test:<6} {transform:<16} {covered}")?;
    }
    Ok(())
}
