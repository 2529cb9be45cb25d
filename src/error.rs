//! Unified error types for sbom-interchange.
//!
//! Document-level failures surface as [`InterchangeError`]; element-level
//! best-effort failures are recorded in [`crate::convert::SkippedElements`]
//! instead and never reach this type.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for interchange operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum InterchangeError {
    /// A record points at something that is not set up
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// The input document violates an import rule
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Errors while mapping between records and graph elements
    #[error("Mapping failed: {context}")]
    Mapping {
        context: String,
        #[source]
        source: MappingErrorKind,
    },

    /// Errors raised by or around the text codec
    #[error("Codec failure: {context}")]
    Codec {
        context: String,
        #[source]
        source: CodecErrorKind,
    },

    /// Storage refused a write or returned no id
    #[error("Persistence failed: {0}")]
    Persistence(String),

    /// A referenced record does not exist
    #[error("{kind} '{id}' not found")]
    NotFound { kind: &'static str, id: String },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Specific mapping error kinds
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MappingErrorKind {
    #[error("Unknown checksum algorithm: {0}")]
    UnknownChecksumAlgorithm(String),

    #[error("Unknown checksum tag: {0}")]
    UnknownChecksumTag(String),

    #[error("Malformed {range_type} range: missing {endpoint} pointer")]
    MalformedRange {
        range_type: String,
        endpoint: &'static str,
    },

    #[error("Pointer referencing '{0}' is neither a byte offset nor a line number")]
    UnknownPointerKind(String),

    #[error("Start and end pointers are of different kinds")]
    InconsistentPointerKinds,

    #[error("Missing required field: {field} in {context}")]
    MissingField { field: String, context: String },

    #[error("Invalid field value for '{field}': {message}")]
    InvalidValue { field: String, message: String },

    #[error("Not a listed SPDX license: {0}")]
    UnlistedLicense(String),
}

/// Specific codec error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum CodecErrorKind {
    #[error("No codec configured for {0}")]
    NotConfigured(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Unknown document format - expected tag-value, RDF/XML or JSON markers")]
    UnknownFormat,

    #[error("Invalid JSON structure: {0}")]
    InvalidJson(String),

    #[error("Codec reported: {0}")]
    Failed(String),
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for interchange operations
pub type Result<T> = std::result::Result<T, InterchangeError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl InterchangeError {
    /// Create a mapping error with context
    pub fn mapping(context: impl Into<String>, source: MappingErrorKind) -> Self {
        Self::Mapping {
            context: context.into(),
            source,
        }
    }

    /// Create a mapping error for a missing field
    pub fn missing_field(field: impl Into<String>, context: impl Into<String>) -> Self {
        Self::mapping(
            "missing required field",
            MappingErrorKind::MissingField {
                field: field.into(),
                context: context.into(),
            },
        )
    }

    /// Create a codec error with context
    pub fn codec(context: impl Into<String>, source: CodecErrorKind) -> Self {
        Self::Codec {
            context: context.into(),
            source,
        }
    }

    /// Create a not-found error for a record kind
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Create a persistence error
    pub fn persistence(message: impl Into<String>) -> Self {
        Self::Persistence(message.into())
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for InterchangeError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for InterchangeError {
    fn from(err: serde_json::Error) -> Self {
        Self::codec(
            "JSON deserialization",
            CodecErrorKind::InvalidJson(err.to_string()),
        )
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// The context string is prepended to the error's existing context, so a
/// failure deep inside a builder reads like
/// `"exporting release r1: building snippet SPDXRef-Snippet-1: ..."`.
///
/// # Example
///
/// ```ignore
/// use sbom_interchange::error::ErrorContext;
///
/// let snippet = snippet_to_graph(&info, &file_id, &mut ctx)
///     .with_context(|| format!("building snippet {}", info.spdx_id))?;
/// ```
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure (lazy evaluation).
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<InterchangeError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
fn add_context_to_error(err: InterchangeError, new_ctx: &str) -> InterchangeError {
    match err {
        InterchangeError::Mapping {
            context: existing,
            source,
        } => InterchangeError::Mapping {
            context: chain_context(new_ctx, &existing),
            source,
        },
        InterchangeError::Codec {
            context: existing,
            source,
        } => InterchangeError::Codec {
            context: chain_context(new_ctx, &existing),
            source,
        },
        InterchangeError::Io {
            path,
            message,
            source,
        } => InterchangeError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        InterchangeError::Configuration(msg) => {
            InterchangeError::Configuration(chain_context(new_ctx, &msg))
        }
        InterchangeError::Validation(msg) => {
            InterchangeError::Validation(chain_context(new_ctx, &msg))
        }
        InterchangeError::Persistence(msg) => {
            InterchangeError::Persistence(chain_context(new_ctx, &msg))
        }
        // Fetch errors keep their record identity; the message is already specific
        not_found @ InterchangeError::NotFound { .. } => not_found,
    }
}

/// Chain two context strings together.
///
/// If the existing context is empty, returns just the new context.
/// Otherwise, returns "`new_context`: `existing_context`".
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}

/// Extension trait for Option types to convert to errors with context.
///
/// A missing link between records is a configuration problem, so `None`
/// becomes [`InterchangeError::Configuration`].
pub trait OptionContext<T> {
    /// Convert None to an error with the given context.
    fn context_none(self, context: impl Into<String>) -> Result<T>;

    /// Convert None to an error with context from a closure.
    fn with_context_none<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T> OptionContext<T> for Option<T> {
    fn context_none(self, context: impl Into<String>) -> Result<T> {
        self.ok_or_else(|| InterchangeError::configuration(context))
    }

    fn with_context_none<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.ok_or_else(|| InterchangeError::configuration(f()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = InterchangeError::missing_field("annotator", "annotation");
        let display = err.to_string();
        assert!(display.contains("Mapping failed"), "{display}");

        let err = InterchangeError::not_found("release", "r-42");
        assert_eq!(err.to_string(), "release 'r-42' not found");
    }

    #[test]
    fn test_malformed_range_display() {
        let kind = MappingErrorKind::MalformedRange {
            range_type: "BYTE".to_string(),
            endpoint: "end",
        };
        assert_eq!(kind.to_string(), "Malformed BYTE range: missing end pointer");
    }

    #[test]
    fn test_error_chain() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = InterchangeError::io("/path/to/doc.spdx", io_err);

        assert!(err.to_string().contains("/path/to/doc.spdx"));
    }

    #[test]
    fn test_context_chaining_multiple_levels() {
        fn inner() -> Result<()> {
            Err(InterchangeError::mapping(
                "base",
                MappingErrorKind::UnknownChecksumAlgorithm("CRC32".to_string()),
            ))
        }

        fn middle() -> Result<()> {
            inner().context("middle layer")
        }

        fn outer() -> Result<()> {
            middle().context("outer layer")
        }

        match outer() {
            Err(InterchangeError::Mapping { context, source }) => {
                assert_eq!(context, "outer layer: middle layer: base");
                assert_eq!(
                    source,
                    MappingErrorKind::UnknownChecksumAlgorithm("CRC32".to_string())
                );
            }
            other => panic!("Expected Mapping error, got {other:?}"),
        }
    }

    #[test]
    fn test_not_found_keeps_identity_under_context() {
        let result: Result<()> = Err(InterchangeError::not_found("package info", "p-1"));
        match result.context("expanding root") {
            Err(InterchangeError::NotFound { kind, id }) => {
                assert_eq!(kind, "package info");
                assert_eq!(id, "p-1");
            }
            other => panic!("Expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_with_context_lazy_evaluation() {
        let mut called = false;

        let ok_result: Result<i32> = Ok(42);
        let _ = ok_result.with_context(|| {
            called = true;
            "should not be called"
        });
        assert!(!called, "Closure should not be called for Ok result");

        let err_result: Result<i32> = Err(InterchangeError::validation("error"));
        let _ = err_result.with_context(|| {
            called = true;
            "should be called"
        });
        assert!(called, "Closure should be called for Err result");
    }

    #[test]
    fn test_option_context() {
        let some_value: Option<i32> = Some(42);
        assert_eq!(some_value.context_none("missing value").unwrap(), 42);

        let none_value: Option<i32> = None;
        match none_value.context_none("release has no SPDX document") {
            Err(InterchangeError::Configuration(msg)) => {
                assert_eq!(msg, "release has no SPDX document");
            }
            other => panic!("Expected Configuration error, got {other:?}"),
        }
    }

    #[test]
    fn test_chain_context_helper() {
        assert_eq!(chain_context("new", ""), "new");
        assert_eq!(chain_context("new", "existing"), "new: existing");
    }
}
