use std::path::PathBuf;

use thiserror::Error;

use crate::model::Side;

/// Errors raised while reading the shape of a report document.
///
/// Missing optional fields never produce an error; only values of the wrong
/// JSON kind where a mapping or list is required do.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    /// The document does not have the minimal report shape.
    #[error("invalid report structure at `{location}`: expected {expected}, found {found}")]
    InvalidStructure {
        location: String,
        expected: &'static str,
        found: &'static str,
    },

    /// The same identity key appeared twice on one side of a strict comparison.
    #[error("duplicate metric key {key} in {side} report")]
    DuplicateKey { key: String, side: Side },
}

impl ReportError {
    pub fn invalid_structure(
        location: impl Into<String>,
        expected: &'static str,
        found: &serde_json::Value,
    ) -> Self {
        Self::InvalidStructure {
            location: location.into(),
            expected,
            found: json_kind(found),
        }
    }

    pub fn is_invalid_structure(&self) -> bool {
        matches!(self, Self::InvalidStructure { .. })
    }
}

/// Errors from reading report files off disk.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("report not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{}: {source}", path.display())]
    Structure {
        path: PathBuf,
        #[source]
        source: ReportError,
    },
}

impl LoadError {
    pub fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound { path }
        } else {
            Self::Io { path, source }
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Errors from loading or validating a [`crate::CompareConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("neutral threshold must be a finite number, got {0}")]
    InvalidThreshold(f64),
}

pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
