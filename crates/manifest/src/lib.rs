//! Signpost manifest library
//!
//! Loads and validates the static manifests of a documentation site: the
//! sidebar navigation trees handed to the renderer and the test-runner
//! configuration handed to the test runner.
//! The `signpost` binary wraps these loaders in a small CLI.

pub mod cli;
pub mod config;
pub mod error;
pub mod runner;
pub mod sidebar;
pub mod source;

pub use error::{RunnerConfigError, ValidationError, ValidationErrorKind};
