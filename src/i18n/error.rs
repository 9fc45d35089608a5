//! Error types for loading label definitions and looking labels up.

use crate::i18n::InvalidLocaleCode;
use std::path::PathBuf;
use thiserror::Error;

/// A lookup that did not reach a label.
///
/// Never fatal: the caller falls back to another locale or a default label.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResourceNotFound {
    /// The locale is not in the table (or is not a valid code).
    #[error("locale '{0}' is not registered")]
    Locale(String),

    /// The path is missing, malformed, or names a group instead of a label.
    #[error("no label at '{path}' in locale '{locale}'")]
    Path { locale: String, path: String },
}

/// Failure to turn a definition into a resource tree.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed locale definition: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid definition for locale '{locale}' at '{path}': {reason}")]
    Definition {
        locale: String,
        path: String,
        reason: String,
    },

    #[error("not an editor language script: {0}")]
    InvalidScript(String),

    #[error("unsupported definition file {0} (expected .json or .js)")]
    UnsupportedFile(PathBuf),

    #[error(transparent)]
    InvalidLocale(#[from] InvalidLocaleCode),

    #[error("locale '{0}' is defined more than once")]
    DuplicateLocale(String),
}
