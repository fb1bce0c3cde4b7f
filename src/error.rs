//! Error types for the FEA-Bench loader

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// A record that cannot produce an instance because a required field is
/// missing or has the wrong shape.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("malformed record: field '{field}' {reason}")]
pub struct MalformedRecord {
    /// Name of the offending field (dotted for nested fields)
    pub field: String,
    /// What is wrong with it
    pub reason: String,
}

impl MalformedRecord {
    pub fn missing(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: "is missing".to_string(),
        }
    }

    pub fn wrong_type(field: impl Into<String>, expected: &str) -> Self {
        Self {
            field: field.into(),
            reason: format!("is not {}", expected),
        }
    }
}

/// Loader error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("Instances file not found: {0}")]
    NotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON at line {line}: {source}")]
    Json {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Line {line} is not a JSON object")]
    NotAnObject { line: usize },

    #[error("Record at line {line} rejected: {source}")]
    MalformedRecord {
        line: usize,
        #[source]
        source: MalformedRecord,
    },

    #[error("No instances loaded from {0}")]
    NoInstances(PathBuf),

    #[error("Configuration error: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_record_display() {
        let err = MalformedRecord::missing("instance_id");
        assert_eq!(
            err.to_string(),
            "malformed record: field 'instance_id' is missing"
        );

        let err = MalformedRecord::wrong_type("problem_info", "an object");
        assert_eq!(
            err.to_string(),
            "malformed record: field 'problem_info' is not an object"
        );
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn test_loader_error_display() {
        let err = Error::MalformedRecord {
            line: 3,
            source: MalformedRecord::missing("repo"),
        };
        assert_eq!(
            err.to_string(),
            "Record at line 3 rejected: malformed record: field 'repo' is missing"
        );

        let err = Error::NotAnObject { line: 7 };
        assert_eq!(err.to_string(), "Line 7 is not a JSON object");
    }
}
