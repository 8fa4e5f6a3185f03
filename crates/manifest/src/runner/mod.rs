//! Test-runner manifests.
//!
//! Validates the declaration handed to an external test runner and answers
//! the questions the runner asks of it: is this a test file, which transform
//! applies, does this file count toward coverage.

mod config;
mod pattern;

pub use config::{
    DEFAULT_MODULE_FILE_EXTENSIONS, DEFAULT_TEST_ENVIRONMENT, TestMatchConfig, Transform,
};
pub use pattern::GlobPattern;
