use std::path::PathBuf;

use thiserror::Error;

/// The configuration source as a whole could not be used. Callers recover by
/// treating the catalog as empty.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("directories file not found: {}", .0.display())]
    Missing(PathBuf),
    #[error("failed to read '{}': {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid json in '{}': {source}", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("expected a json array of directories in '{}'", .0.display())]
    NotAnArray(PathBuf),
}

/// A single raw record was rejected. Only that record is dropped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordValidationError {
    #[error("entry #{index} is not an object")]
    NotAnObject { index: usize },
    #[error("entry #{index} is missing a keyword")]
    MissingKeyword { index: usize },
    #[error("entry #{index} is missing a path")]
    MissingPath { index: usize },
    #[error("preference '{key}' has no path")]
    EmptyPath { key: String },
    #[error("preference '{key}' path has no final segment to use as keyword")]
    UnderivableKeyword { key: String },
    #[error("preference '{key}' is not a string")]
    NonStringPreference { key: String },
    #[error("unknown preference key '{key}'")]
    UnknownPreferenceKey { key: String },
}
