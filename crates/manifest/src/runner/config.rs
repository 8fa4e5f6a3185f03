//! Test-runner manifest: which files are tests, how they are transformed,
//! and which files count toward coverage.
//!
//! The declaration uses the familiar camelCase shape:
//!
//! ```json
//! {
//!   "testEnvironment": "node",
//!   "testMatch": ["**/tests/**/*.test.js"],
//!   "moduleFileExtensions": ["js", "jsx"],
//!   "transform": { "^.+\\.jsx?$": "babel-jest" },
//!   "collectCoverageFrom": ["examples/**/*.js", "!**/node_modules/**"]
//! }
//! ```

use indexmap::IndexMap;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::pattern::{GlobPattern, normalize};
use crate::error::RunnerConfigError;

/// Extensions assumed when `moduleFileExtensions` is omitted.
pub const DEFAULT_MODULE_FILE_EXTENSIONS: &[&str] =
    &["js", "mjs", "cjs", "jsx", "ts", "tsx", "json", "node"];

/// Environment assumed when `testEnvironment` is omitted.
pub const DEFAULT_TEST_ENVIRONMENT: &str = "node";

/// Raw declaration as written in the manifest.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RunnerDeclaration {
    #[serde(default = "default_environment")]
    test_environment: String,

    #[serde(default)]
    test_match: Vec<String>,

    #[serde(default = "default_extensions")]
    module_file_extensions: Vec<String>,

    /// Path regex -> transformer, in declared order.
    #[serde(default)]
    transform: IndexMap<String, String>,

    /// Include globs; entries prefixed with `!` exclude.
    #[serde(default)]
    collect_coverage_from: Vec<String>,
}

fn default_environment() -> String {
    DEFAULT_TEST_ENVIRONMENT.to_string()
}

fn default_extensions() -> Vec<String> {
    DEFAULT_MODULE_FILE_EXTENSIONS
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// A source transform: files whose path matches `pattern` go through
/// `transformer`.
#[derive(Debug, Clone)]
pub struct Transform {
    pattern: Regex,
    transformer: String,
}

impl Transform {
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn transformer(&self) -> &str {
        &self.transformer
    }
}

/// Validated test-runner configuration.
#[derive(Debug, Clone)]
pub struct TestMatchConfig {
    test_environment: String,
    test_match: Vec<GlobPattern>,
    module_file_extensions: Vec<String>,
    transforms: Vec<Transform>,
    coverage_include: Vec<GlobPattern>,
    coverage_exclude: Vec<GlobPattern>,
}

impl TestMatchConfig {
    /// Build a config from a declarative value.
    pub fn from_value(declaration: &Value) -> Result<Self, RunnerConfigError> {
        if !declaration.is_object() {
            return Err(RunnerConfigError::Malformed {
                details: "expected an object of runner settings".to_string(),
            });
        }

        let decl =
            RunnerDeclaration::deserialize(declaration).map_err(|e| RunnerConfigError::Malformed {
                details: e.to_string(),
            })?;

        decl.validate()
    }

    pub fn test_environment(&self) -> &str {
        &self.test_environment
    }

    pub fn test_match(&self) -> &[GlobPattern] {
        &self.test_match
    }

    pub fn module_file_extensions(&self) -> &[String] {
        &self.module_file_extensions
    }

    /// Transforms in declared order.
    pub fn transforms(&self) -> &[Transform] {
        &self.transforms
    }

    pub fn coverage_include(&self) -> &[GlobPattern] {
        &self.coverage_include
    }

    pub fn coverage_exclude(&self) -> &[GlobPattern] {
        &self.coverage_exclude
    }

    /// Whether the path is a test file: it matches a `testMatch` glob and
    /// carries one of the module file extensions.
    pub fn is_test_file(&self, path: &str) -> bool {
        let path = normalize(path);
        self.has_module_extension(&path) && self.test_match.iter().any(|p| p.matches(&path))
    }

    /// Transformer for the path: the first declared pattern that matches.
    pub fn transform_for(&self, path: &str) -> Option<&str> {
        let path = normalize(path);
        self.transforms
            .iter()
            .find(|t| t.pattern.is_match(&path))
            .map(|t| t.transformer.as_str())
    }

    /// Whether the path counts toward coverage.
    ///
    /// Includes are applied first, then excludes: a path matching any
    /// exclude is never covered.
    pub fn is_covered(&self, path: &str) -> bool {
        let path = normalize(path);
        self.coverage_include.iter().any(|p| p.matches(&path))
            && !self.coverage_exclude.iter().any(|p| p.matches(&path))
    }

    fn has_module_extension(&self, path: &str) -> bool {
        let file_name = path.rsplit('/').next().unwrap_or(path);
        file_name
            .rsplit_once('.')
            .is_some_and(|(_, ext)| self.module_file_extensions.iter().any(|e| e == ext))
    }
}

impl RunnerDeclaration {
    fn validate(self) -> Result<TestMatchConfig, RunnerConfigError> {
        if self.test_environment.trim().is_empty() {
            return Err(RunnerConfigError::Malformed {
                details: "'testEnvironment' is empty".to_string(),
            });
        }

        if self.test_match.is_empty() {
            return Err(RunnerConfigError::EmptyTestMatch);
        }

        let test_match = self
            .test_match
            .iter()
            .map(|p| GlobPattern::compile("testMatch", p))
            .collect::<Result<Vec<_>, _>>()?;

        if let Some(ext) = self
            .module_file_extensions
            .iter()
            .find(|e| e.trim().is_empty() || e.starts_with('.'))
        {
            return Err(RunnerConfigError::InvalidExtension {
                extension: ext.clone(),
            });
        }

        let mut transforms = Vec::with_capacity(self.transform.len());
        for (pattern, transformer) in self.transform {
            let regex = Regex::new(&pattern).map_err(|e| {
                RunnerConfigError::InvalidTransformPattern {
                    pattern: pattern.clone(),
                    details: e.to_string(),
                }
            })?;
            if transformer.trim().is_empty() {
                return Err(RunnerConfigError::EmptyTransformId { pattern });
            }
            transforms.push(Transform {
                pattern: regex,
                transformer,
            });
        }

        let mut coverage_include = Vec::new();
        let mut coverage_exclude = Vec::new();
        for entry in &self.collect_coverage_from {
            match entry.strip_prefix('!') {
                Some(negated) => coverage_exclude
                    .push(GlobPattern::compile("collectCoverageFrom", negated)?),
                None => coverage_include.push(GlobPattern::compile("collectCoverageFrom", entry)?),
            }
        }

        debug!(
            environment = %self.test_environment,
            test_patterns = test_match.len(),
            transforms = transforms.len(),
            coverage_include = coverage_include.len(),
            coverage_exclude = coverage_exclude.len(),
            "loaded test-runner config"
        );

        Ok(TestMatchConfig {
            test_environment: self.test_environment,
            test_match,
            module_file_extensions: self.module_file_extensions,
            transforms,
            coverage_include,
            coverage_exclude,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn site_config() -> TestMatchConfig {
        TestMatchConfig::from_value(&json!({
            "testEnvironment": "node",
            "testMatch": ["**/tests/**/*.test.js"],
            "moduleFileExtensions": ["js", "jsx"],
            "transform": { "^.+\\.jsx?$": "babel-jest" },
            "collectCoverageFrom": [
                "examples/**/*.js",
                "!**/node_modules/**",
                "!**/dist/**"
            ]
        }))
        .unwrap()
    }

    #[test]
    fn parse_full_config() {
        let config = site_config();
        assert_eq!(config.test_environment(), "node");
        assert_eq!(config.test_match().len(), 1);
        assert_eq!(config.module_file_extensions(), &["js", "jsx"]);
        assert_eq!(config.transforms().len(), 1);
        assert_eq!(config.transforms()[0].transformer(), "babel-jest");
        assert_eq!(config.coverage_include().len(), 1);
        assert_eq!(config.coverage_exclude().len(), 2);
        assert_eq!(config.coverage_exclude()[0].as_str(), "**/node_modules/**");
    }

    #[test]
    fn parse_minimal_config() {
        let config = TestMatchConfig::from_value(&json!({"testMatch": ["**/*.test.ts"]})).unwrap();
        assert_eq!(config.test_environment(), DEFAULT_TEST_ENVIRONMENT);
        assert_eq!(
            config.module_file_extensions().len(),
            DEFAULT_MODULE_FILE_EXTENSIONS.len()
        );
        assert!(config.transforms().is_empty());
        assert!(!config.is_covered("src/a.ts"));
    }

    #[test]
    fn classifies_test_files() {
        let config = site_config();
        assert!(config.is_test_file("tests/unit/sidebar.test.js"));
        assert!(config.is_test_file("./tests/sidebar.test.js"));
        assert!(!config.is_test_file("src/sidebar.test.js"));
        assert!(!config.is_test_file("tests/readme.md"));
    }

    #[test]
    fn extension_must_be_declared() {
        let config = TestMatchConfig::from_value(&json!({
            "testMatch": ["tests/**"],
            "moduleFileExtensions": ["js"]
        }))
        .unwrap();
        assert!(config.is_test_file("tests/a.js"));
        assert!(!config.is_test_file("tests/a.ts"));
        assert!(!config.is_test_file("tests/Makefile"));
    }

    #[test]
    fn transform_uses_first_declared_match() {
        let config = TestMatchConfig::from_value(&json!({
            "testMatch": ["**/*.test.js"],
            "transform": {
                "^.+\\.tsx?$": "ts-jest",
                "^.+\\.jsx?$": "babel-jest",
                "\\.js$": "never-reached"
            }
        }))
        .unwrap();

        assert_eq!(config.transform_for("src/a.js"), Some("babel-jest"));
        assert_eq!(config.transform_for("src/a.tsx"), Some("ts-jest"));
        assert_eq!(config.transform_for("src/a.css"), None);
        assert_eq!(config.transforms()[2].pattern(), "\\.js$");
    }

    #[test]
    fn excludes_apply_after_includes() {
        let config = site_config();
        assert!(config.is_covered("examples/basic/index.js"));
        assert!(config.is_covered("examples/index.js"));
        assert!(!config.is_covered("examples/node_modules/pkg/index.js"));
        assert!(!config.is_covered("examples/dist/bundle.js"));
        assert!(!config.is_covered("src/index.js"));
    }

    #[test]
    fn brace_patterns_classify_and_cover() {
        let config = TestMatchConfig::from_value(&json!({
            "testMatch": ["**/*.{test,spec}.js"],
            "moduleFileExtensions": ["js", "jsx"],
            "collectCoverageFrom": ["src/**/*.{js,jsx}", "!**/*.{test,spec}.js"]
        }))
        .unwrap();

        assert!(config.is_test_file("src/a.test.js"));
        assert!(config.is_test_file("src/a.spec.js"));
        assert!(!config.is_test_file("src/a.js"));
        assert!(config.is_covered("src/a.js"));
        assert!(config.is_covered("src/ui/b.jsx"));
        assert!(!config.is_covered("src/a.test.js"));
        assert_eq!(config.test_match()[0].as_str(), "**/*.{test,spec}.js");
    }

    #[test]
    fn reject_empty_test_match() {
        let err = TestMatchConfig::from_value(&json!({"testMatch": []})).unwrap_err();
        assert_eq!(err, RunnerConfigError::EmptyTestMatch);

        let err = TestMatchConfig::from_value(&json!({})).unwrap_err();
        assert_eq!(err, RunnerConfigError::EmptyTestMatch);
    }

    #[test]
    fn reject_invalid_transform_pattern() {
        let err = TestMatchConfig::from_value(&json!({
            "testMatch": ["**/*.test.js"],
            "transform": { "^(.+\\.js$": "babel-jest" }
        }))
        .unwrap_err();
        assert!(matches!(err, RunnerConfigError::InvalidTransformPattern { .. }));
    }

    #[test]
    fn reject_empty_transformer() {
        let err = TestMatchConfig::from_value(&json!({
            "testMatch": ["**/*.test.js"],
            "transform": { "\\.js$": "" }
        }))
        .unwrap_err();
        assert_eq!(
            err,
            RunnerConfigError::EmptyTransformId {
                pattern: "\\.js$".to_string()
            }
        );
    }

    #[test]
    fn reject_dotted_extension() {
        let err = TestMatchConfig::from_value(&json!({
            "testMatch": ["**/*.test.js"],
            "moduleFileExtensions": ["js", ".jsx"]
        }))
        .unwrap_err();
        assert_eq!(
            err,
            RunnerConfigError::InvalidExtension {
                extension: ".jsx".to_string()
            }
        );
    }

    #[test]
    fn reject_invalid_coverage_glob() {
        let err = TestMatchConfig::from_value(&json!({
            "testMatch": ["**/*.test.js"],
            "collectCoverageFrom": ["!src/***/x.js"]
        }))
        .unwrap_err();
        assert!(matches!(
            err,
            RunnerConfigError::InvalidGlob {
                field: "collectCoverageFrom",
                ..
            }
        ));
    }

    #[test]
    fn reject_unknown_keys_and_wrong_types() {
        let err = TestMatchConfig::from_value(&json!({
            "testMatch": ["**/*.test.js"],
            "testTimeout": 5000
        }))
        .unwrap_err();
        assert!(matches!(err, RunnerConfigError::Malformed { .. }));

        let err = TestMatchConfig::from_value(&json!({"testMatch": "**/*.test.js"})).unwrap_err();
        assert!(matches!(err, RunnerConfigError::Malformed { .. }));

        let err = TestMatchConfig::from_value(&json!(["**/*.test.js"])).unwrap_err();
        assert!(matches!(err, RunnerConfigError::Malformed { .. }));
    }
}
