//! Error types for flowbridge

use std::fmt;

/// Errors surfaced by the conversion registry and the values it carries.
///
/// The flow converters introduce no failure modes of their own: a converted
/// flow fails if and only if the underlying deferred value failed, and that
/// error is forwarded unchanged.
//
// `Display` and `Error` are implemented by hand rather than derived with
// `thiserror` because the `NoConverter::source` field name would otherwise be
// inferred as the error source, which `String` cannot be.
#[derive(Debug)]
pub enum ConvertError {
    /// The underlying deferred value failed.
    DeferredFailed(String),

    /// An eagerly-started task was aborted before it completed.
    TaskCancelled,

    /// An eagerly-started task panicked.
    TaskPanicked(String),

    /// No converter is registered for the requested (source, target) pair.
    NoConverter {
        /// Source type name, or its `TypeId` when only an erased value is known.
        source: String,
        /// Target type name.
        target: &'static str,
    },

    /// A registered converter received or produced a value of an unexpected type.
    TypeMismatch {
        /// The type the converter was registered for.
        expected: &'static str,
    },
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertError::DeferredFailed(msg) => {
                write!(f, "deferred value failed: {msg}")
            }
            ConvertError::TaskCancelled => {
                write!(f, "deferred task was cancelled before completing")
            }
            ConvertError::TaskPanicked(msg) => {
                write!(f, "deferred task panicked: {msg}")
            }
            ConvertError::NoConverter { source, target } => {
                write!(f, "no converter registered from `{source}` to `{target}`")
            }
            ConvertError::TypeMismatch { expected } => {
                write!(f, "converter type mismatch: expected `{expected}`")
            }
        }
    }
}

impl std::error::Error for ConvertError {}

/// Result type for flowbridge operations
pub type Result<T> = std::result::Result<T, ConvertError>;
