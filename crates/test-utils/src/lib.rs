//! Signpost test utilities.
//!
//! Builders for sidebar and test-runner declarations, the reference
//! documentation-site fixtures, and assertion helpers for loader output.

use serde_json::{Map, Value, json};

/// Start an empty sidebar declaration.
pub fn test_sidebar() -> TestSidebar {
    TestSidebar { entries: vec![] }
}

/// Start a group declaration with the given label.
pub fn test_group(label: &str) -> TestGroup {
    TestGroup {
        label: label.to_string(),
        items: vec![],
        collapsed: None,
    }
}

/// A sidebar declaration builder (the list of top-level entries).
#[derive(Debug, Clone, Default)]
pub struct TestSidebar {
    pub entries: Vec<Value>,
}

impl TestSidebar {
    /// Append a document reference.
    pub fn doc(mut self, doc_id: &str) -> Self {
        self.entries.push(Value::String(doc_id.to_string()));
        self
    }

    /// Append a group.
    pub fn group(mut self, group: TestGroup) -> Self {
        self.entries.push(group.build());
        self
    }

    /// Append an arbitrary raw entry, valid or not.
    pub fn raw(mut self, entry: Value) -> Self {
        self.entries.push(entry);
        self
    }

    pub fn build(self) -> Value {
        Value::Array(self.entries)
    }
}

/// A group declaration builder.
#[derive(Debug, Clone)]
pub struct TestGroup {
    pub label: String,
    pub items: Vec<Value>,
    pub collapsed: Option<bool>,
}

impl TestGroup {
    /// Append a document reference.
    pub fn doc(mut self, doc_id: &str) -> Self {
        self.items.push(Value::String(doc_id.to_string()));
        self
    }

    /// Append several document references.
    pub fn docs(mut self, doc_ids: &[&str]) -> Self {
        self.items
            .extend(doc_ids.iter().map(|id| Value::String(id.to_string())));
        self
    }

    /// Append a nested group.
    pub fn group(mut self, group: TestGroup) -> Self {
        self.items.push(group.build());
        self
    }

    /// Set the collapse hint.
    pub fn collapsed(mut self, collapsed: bool) -> Self {
        self.collapsed = Some(collapsed);
        self
    }

    pub fn build(self) -> Value {
        let mut obj = Map::new();
        obj.insert("label".to_string(), Value::String(self.label));
        obj.insert("items".to_string(), Value::Array(self.items));
        if let Some(collapsed) = self.collapsed {
            obj.insert("collapsed".to_string(), Value::Bool(collapsed));
        }
        Value::Object(obj)
    }
}

/// Combine named sidebar declarations into one manifest, in order.
pub fn sidebar_set(sidebars: Vec<(&str, TestSidebar)>) -> Value {
    let mut obj = Map::new();
    for (name, sidebar) in sidebars {
        obj.insert(name.to_string(), sidebar.build());
    }
    Value::Object(obj)
}

/// Start a test-runner declaration matching the given test glob.
pub fn test_runner(test_match: &str) -> TestRunner {
    TestRunner {
        settings: json!({ "testMatch": [test_match] }),
    }
}

/// A test-runner declaration builder.
#[derive(Debug, Clone)]
pub struct TestRunner {
    pub settings: Value,
}

impl TestRunner {
    /// Set the test environment.
    pub fn environment(self, environment: &str) -> Self {
        self.with_setting("testEnvironment", json!(environment))
    }

    /// Set module file extensions.
    pub fn extensions(self, extensions: &[&str]) -> Self {
        self.with_setting("moduleFileExtensions", json!(extensions))
    }

    /// Add a transform, keeping declaration order.
    pub fn transform(mut self, pattern: &str, transformer: &str) -> Self {
        if let Some(obj) = self.settings.as_object_mut() {
            let transforms = obj
                .entry("transform")
                .or_insert_with(|| Value::Object(Map::new()));
            if let Some(map) = transforms.as_object_mut() {
                map.insert(pattern.to_string(), json!(transformer));
            }
        }
        self
    }

    /// Set coverage globs (`!`-prefixed entries exclude).
    pub fn coverage(self, globs: &[&str]) -> Self {
        self.with_setting("collectCoverageFrom", json!(globs))
    }

    /// Set any setting, valid or not.
    pub fn with_setting(mut self, key: &str, value: Value) -> Self {
        if let Some(obj) = self.settings.as_object_mut() {
            obj.insert(key.to_string(), value);
        }
        self
    }

    pub fn build(self) -> Value {
        self.settings
    }
}

/// Declarations of the reference documentation site.
pub mod fixtures {
    use serde_json::{Value, json};

    /// The site's sidebar manifest: one tutorial sidebar.
    pub fn site_sidebars() -> Value {
        json!({
            "tutorialSidebar": [
                "intro",
                {
                    "label": "Getting Started",
                    "items": [
                        "getting-started/index",
                        "getting-started/installation",
                        "getting-started/environment-setup",
                        "getting-started/troubleshooting"
                    ]
                },
                {
                    "label": "Chapter 1: Physical AI Fundamentals",
                    "items": [
                        "chapter-1-physical-ai-fundamentals/index",
                        "chapter-1-physical-ai-fundamentals/lesson-1-fundamentals",
                        "chapter-1-physical-ai-fundamentals/lesson-2-core-concepts",
                        "chapter-1-physical-ai-fundamentals/lesson-3-building-intuition"
                    ]
                },
                {
                    "label": "Reference",
                    "items": [
                        "reference/glossary",
                        "reference/resources"
                    ]
                }
            ]
        })
    }

    /// The site's test-runner manifest.
    pub fn site_runner() -> Value {
        json!({
            "testEnvironment": "node",
            "testMatch": ["**/tests/**/*.test.js"],
            "moduleFileExtensions": ["js", "jsx"],
            "transform": {
                "^.+\\.jsx?$": "babel-jest"
            },
            "collectCoverageFrom": [
                "examples/**/*.js",
                "!**/node_modules/**",
                "!**/dist/**"
            ]
        })
    }
}

/// Assertion helpers for loader output.
pub mod assert {
    use std::fmt::Display;

    /// Assert that an error message mentions a substring.
    pub fn error_mentions(err: &impl Display, needle: &str) {
        let msg = err.to_string();
        assert!(
            msg.contains(needle),
            "Expected error to mention '{needle}'\nActual: {msg}"
        );
    }

    /// Assert that a string contains a substring.
    pub fn contains(haystack: &str, needle: &str) {
        assert!(
            haystack.contains(needle),
            "Expected string to contain '{needle}'\nActual: {haystack}"
        );
    }

    /// Assert that a string does not contain a substring.
    pub fn not_contains(haystack: &str, needle: &str) {
        assert!(
            !haystack.contains(needle),
            "Expected string to NOT contain '{needle}'\nActual: {haystack}"
        );
    }
}
