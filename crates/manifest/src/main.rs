//! Signpost CLI
//!
//! Validates and inspects documentation-site manifests.
//!
//! Usage:
//!   signpost sidebar check --file sidebars.json
//!   signpost sidebar neighbors intro
//!   signpost runner classify tests/unit/a.test.js src/index.js

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use signpost_manifest::cli;
use signpost_manifest::config::Config;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sidebar navigation manifests.
    #[command(subcommand)]
    Sidebar(SidebarCommand),

    /// Test-runner manifests.
    #[command(subcommand)]
    Runner(RunnerCommand),
}

#[derive(Args, Debug)]
struct ManifestArg {
    /// Manifest file (.json, .yml, .yaml or .toml). Defaults to the path
    /// configured in the environment.
    #[arg(long, short)]
    file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum SidebarCommand {
    /// Validate the manifest and summarize each sidebar.
    Check(ManifestArg),

    /// Print the validated navigation tree as JSON.
    Show {
        #[command(flatten)]
        manifest: ManifestArg,

        /// Only print this sidebar.
        #[arg(long)]
        sidebar: Option<String>,
    },

    /// Print previous/next documents and breadcrumbs for a document.
    Neighbors {
        #[command(flatten)]
        manifest: ManifestArg,

        /// Document id, e.g. "getting-started/index".
        doc_id: String,

        /// Sidebar to look in (default: the first sidebar containing the document).
        #[arg(long)]
        sidebar: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum RunnerCommand {
    /// Validate the manifest and summarize it.
    Check(ManifestArg),

    /// Classify paths as tests, by transform and by coverage.
    Classify {
        #[command(flatten)]
        manifest: ManifestArg,

        /// Paths relative to the project root.
        #[arg(required = true)]
        paths: Vec<String>,
    },
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_tracing();

    let args = Cli::parse();
    let config = Config::from_env().context("failed to load configuration")?;
    debug!(?config, "configuration loaded");

    let max = config.max_manifest_bytes;
    let mut out = io::stdout().lock();

    match args.command {
        Command::Sidebar(cmd) => match cmd {
            SidebarCommand::Check(manifest) => {
                let path = manifest.file.unwrap_or(config.sidebars_path);
                cli::cmd_sidebar_check(&path, max, &mut out)
            }
            SidebarCommand::Show { manifest, sidebar } => {
                let path = manifest.file.unwrap_or(config.sidebars_path);
                cli::cmd_sidebar_show(&path, max, sidebar.as_deref(), &mut out)
            }
            SidebarCommand::Neighbors {
                manifest,
                doc_id,
                sidebar,
            } => {
                let path = manifest.file.unwrap_or(config.sidebars_path);
                cli::cmd_sidebar_neighbors(&path, max, &doc_id, sidebar.as_deref(), &mut out)
            }
        },
        Command::Runner(cmd) => match cmd {
            RunnerCommand::Check(manifest) => {
                let path = manifest.file.unwrap_or(config.runner_config_path);
                cli::cmd_runner_check(&path, max, &mut out)
            }
            RunnerCommand::Classify { manifest, paths } => {
                let path = manifest.file.unwrap_or(config.runner_config_path);
                cli::cmd_runner_classify(&path, max, &paths, &mut out)
            }
        },
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}
