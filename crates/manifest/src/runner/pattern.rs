//! Compiled glob patterns for test and coverage matching.

use glob::{MatchOptions, Pattern};

use crate::error::RunnerConfigError;

/// `*` and `?` stay inside one path segment; `**/` spans directories.
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// A glob pattern together with its declared source text.
///
/// `{a,b}` alternation is expanded before compiling, so one declared
/// pattern may compile to several; a path matches if any of them does.
#[derive(Debug, Clone)]
pub struct GlobPattern {
    source: String,
    patterns: Vec<Pattern>,
}

impl GlobPattern {
    /// Compile a pattern declared under `field`.
    pub(crate) fn compile(field: &'static str, source: &str) -> Result<Self, RunnerConfigError> {
        let invalid = |details: String| RunnerConfigError::InvalidGlob {
            field,
            pattern: source.to_string(),
            details,
        };

        if source.trim().is_empty() {
            return Err(invalid("pattern is empty".to_string()));
        }

        let patterns = expand_braces(source)
            .map_err(|details| invalid(details.to_string()))?
            .iter()
            .map(|expanded| Pattern::new(expanded).map_err(|e| invalid(e.msg.to_string())))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            source: source.to_string(),
            patterns,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Match a `/`-separated relative path.
    pub fn matches(&self, path: &str) -> bool {
        self.patterns
            .iter()
            .any(|pattern| pattern.matches_with(path, MATCH_OPTIONS))
    }
}

/// Expand `{a,b}` alternation into plain glob patterns, left to right.
/// Groups may nest; `{a}` expands to `a`.
fn expand_braces(source: &str) -> Result<Vec<String>, &'static str> {
    let Some(open) = source.find('{') else {
        if source.contains('}') {
            return Err("unbalanced braces: '}' without a matching '{'");
        }
        return Ok(vec![source.to_string()]);
    };

    let prefix = &source[..open];
    if prefix.contains('}') {
        return Err("unbalanced braces: '}' without a matching '{'");
    }

    // Byte offsets of top-level commas and the closing brace.
    let mut depth = 0usize;
    let mut commas = Vec::new();
    let mut close = None;
    for (i, c) in source[open..].char_indices().map(|(i, c)| (open + i, c)) {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    close = Some(i);
                    break;
                }
            }
            ',' if depth == 1 => commas.push(i),
            _ => {}
        }
    }
    let Some(close) = close else {
        return Err("unbalanced braces: '{' without a matching '}'");
    };

    let suffix = &source[close + 1..];
    let mut bounds = vec![open];
    bounds.extend(commas);
    bounds.push(close);

    let mut expanded = Vec::new();
    for window in bounds.windows(2) {
        let alternative = &source[window[0] + 1..window[1]];
        expanded.extend(expand_braces(&format!("{prefix}{alternative}{suffix}"))?);
    }
    Ok(expanded)
}

/// Normalize a path to forward slashes without a leading `./`.
pub(crate) fn normalize(path: &str) -> String {
    let path = path.replace('\\', "/");
    path.strip_prefix("./").unwrap_or(&path).to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn recursive_prefix_matches_zero_directories() {
        let pat = GlobPattern::compile("testMatch", "**/tests/**/*.test.js").unwrap();
        assert!(pat.matches("tests/a.test.js"));
        assert!(pat.matches("tests/unit/a.test.js"));
        assert!(pat.matches("pkg/tests/unit/deep/a.test.js"));
        assert!(!pat.matches("src/a.test.js"));
        assert!(!pat.matches("tests/a.spec.js"));
    }

    #[test]
    fn star_does_not_cross_directories() {
        let pat = GlobPattern::compile("collectCoverageFrom", "src/*.js").unwrap();
        assert!(pat.matches("src/index.js"));
        assert!(!pat.matches("src/lib/index.js"));
    }

    #[test]
    fn invalid_pattern_reports_field() {
        let err = GlobPattern::compile("testMatch", "src/***/x.js").unwrap_err();
        assert!(matches!(
            err,
            RunnerConfigError::InvalidGlob { field: "testMatch", .. }
        ));

        let err = GlobPattern::compile("testMatch", " ").unwrap_err();
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn brace_alternation_matches_each_alternative() {
        let pat = GlobPattern::compile("testMatch", "**/*.{test,spec}.js").unwrap();
        assert!(pat.matches("src/a.test.js"));
        assert!(pat.matches("a.spec.js"));
        assert!(!pat.matches("src/a.js"));
        assert_eq!(pat.as_str(), "**/*.{test,spec}.js");

        let pat = GlobPattern::compile("collectCoverageFrom", "src/**/*.{js,jsx}").unwrap();
        assert!(pat.matches("src/a.js"));
        assert!(pat.matches("src/lib/b.jsx"));
        assert!(!pat.matches("src/lib/b.ts"));
        assert!(!pat.matches("lib/a.js"));
    }

    #[test]
    fn nested_braces_expand_in_order() {
        assert_eq!(
            expand_braces("{src,lib/{a,b}}/*.js").unwrap(),
            vec!["src/*.js", "lib/a/*.js", "lib/b/*.js"]
        );
        assert_eq!(expand_braces("a{b}c").unwrap(), vec!["abc"]);
        assert_eq!(expand_braces("{a,}.js").unwrap(), vec!["a.js", ".js"]);
        assert_eq!(
            expand_braces("{a,b}/{c,d}").unwrap(),
            vec!["a/c", "a/d", "b/c", "b/d"]
        );
    }

    #[test]
    fn unbalanced_braces_are_rejected() {
        for source in ["src/{a,b.js", "src/a,b}.js", "src/{a}}.js"] {
            let err = GlobPattern::compile("testMatch", source).unwrap_err();
            assert!(matches!(
                err,
                RunnerConfigError::InvalidGlob { field: "testMatch", .. }
            ));
            assert!(err.to_string().contains("unbalanced braces"), "{err}");
        }
    }

    #[test]
    fn normalize_strips_dot_prefix_and_backslashes() {
        assert_eq!(normalize("./tests/a.test.js"), "tests/a.test.js");
        assert_eq!(normalize("tests\\unit\\a.test.js"), "tests/unit/a.test.js");
    }
}
