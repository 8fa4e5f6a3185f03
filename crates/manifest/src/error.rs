//! Manifest error types with clear, actionable messages.
//!
//! Every error names the location of the offending entry (for example
//! `tutorialSidebar[1].items[0]`) so the declaration can be fixed without
//! guessing.

use thiserror::Error;

/// The category of a navigation validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    DuplicateReference,
    EmptyGroup,
    MalformedNode,
}

/// Errors that can occur while loading a navigation manifest.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The same document is referenced twice in one tree.
    #[error("{location}: document '{doc_id}' is already referenced at {first_location}")]
    DuplicateReference {
        doc_id: String,
        location: String,
        first_location: String,
    },

    /// A group declares no items.
    #[error("{location}: group '{label}' has no items")]
    EmptyGroup { label: String, location: String },

    /// The entry is neither a document reference nor a `{label, items}` group.
    #[error("{location}: malformed navigation entry: {reason}")]
    MalformedNode { location: String, reason: String },
}

impl ValidationError {
    /// Create a malformed node error.
    pub fn malformed(location: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedNode {
            location: location.into(),
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> ValidationErrorKind {
        match self {
            Self::DuplicateReference { .. } => ValidationErrorKind::DuplicateReference,
            Self::EmptyGroup { .. } => ValidationErrorKind::EmptyGroup,
            Self::MalformedNode { .. } => ValidationErrorKind::MalformedNode,
        }
    }

    /// Location of the offending entry.
    pub fn location(&self) -> &str {
        match self {
            Self::DuplicateReference { location, .. }
            | Self::EmptyGroup { location, .. }
            | Self::MalformedNode { location, .. } => location,
        }
    }
}

/// Errors that can occur while loading a test-runner manifest.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RunnerConfigError {
    /// The declaration does not have the expected shape.
    #[error("malformed test-runner config: {details}")]
    Malformed { details: String },

    /// No test file patterns were declared.
    #[error("'testMatch' must declare at least one pattern")]
    EmptyTestMatch,

    /// A glob pattern failed to compile.
    #[error("'{field}': invalid glob pattern '{pattern}': {details}")]
    InvalidGlob {
        field: &'static str,
        pattern: String,
        details: String,
    },

    /// A transform key is not a valid regular expression.
    #[error("'transform': invalid pattern '{pattern}': {details}")]
    InvalidTransformPattern { pattern: String, details: String },

    /// A transform maps a pattern to an empty transformer name.
    #[error("'transform': pattern '{pattern}' maps to an empty transformer")]
    EmptyTransformId { pattern: String },

    /// A module file extension is empty or starts with a dot.
    #[error(
        "'moduleFileExtensions': invalid extension '{extension}' (use bare extensions such as \"js\")"
    )]
    InvalidExtension { extension: String },
}
