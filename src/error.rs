//! Error taxonomy for catalog loading, variable creation and accessor rewrites.
//!
//! Data-shape problems in catalog files are never errors: malformed lines are
//! skipped and lookup misses return empty results. Only filesystem failures,
//! key/value validation and accessor rewrites surface a [`CatalogError`].

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::catalog::Scope;

/// Errors surfaced by the catalog engine.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    /// A scan root does not exist. Walks record this as a warning and keep
    /// loading the remaining roots.
    #[error("scan root not found: {}", path.display())]
    MissingRoot {
        /// The root that was requested.
        path: PathBuf,
    },

    /// A catalog file could not be read (permissions, invalid UTF-8, ...).
    #[error("failed to read catalog {}: {source}", path.display())]
    Read {
        /// The catalog file.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// The requested key does not match `[A-Z0-9_]+`.
    #[error("invalid key '{key}': keys must match [A-Z0-9_]+")]
    InvalidKeySyntax {
        /// The rejected key.
        key: String,
    },

    /// The value cannot be written as a single `KEY = "value"` line.
    #[error("invalid value {value:?}: values cannot contain double quotes or line breaks")]
    InvalidValue {
        /// The rejected value.
        value: String,
    },

    /// The target catalog for a new variable does not exist.
    #[error("target catalog {} does not exist", path.display())]
    MissingTarget {
        /// The requested target file.
        path: PathBuf,
    },

    /// Appending to the target catalog failed after the index was updated.
    #[error("failed to append to {}: {source}", path.display())]
    WriteFailure {
        /// The target file.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// No value is mapped to the key in the active scope.
    #[error("no value for key '{key}' in {scope} scope")]
    NotFound {
        /// The key that was looked up.
        key: String,
        /// The scope that was searched.
        scope: Scope,
    },

    /// The text is not a legacy accessor call.
    #[error("not a legacy accessor call: {text:?}")]
    UnrecognizedAccessor {
        /// The text that failed to match.
        text: String,
    },
}

/// Result alias for catalog operations.
pub type Result<T, E = CatalogError> = std::result::Result<T, E>;
