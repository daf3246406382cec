use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building or writing BONSAI graphs.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{kind} not in BONSAI base ontology types (valid: {valid})")]
    InvalidKind { kind: String, valid: String },

    #[error("base URI must end with '/': {0}")]
    InvalidBaseUri(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("invalid namespace prefix: {0:?}")]
    InvalidPrefix(String),

    #[error("invalid IRI <{iri}>: {reason}")]
    InvalidIri { iri: String, reason: String },

    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Turtle serialization failed: {0}")]
    Serialization(String),

    #[error("Turtle parse error: {0}")]
    Parse(#[from] rio_turtle::TurtleError),

    #[error("unsupported RDF construct: {0}")]
    Unsupported(String),
}

impl Error {
    pub(crate) fn invalid_iri(iri: impl Into<String>, reason: impl ToString) -> Self {
        Error::InvalidIri {
            iri: iri.into(),
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_kind_lists_valid_set() {
        let err = Error::InvalidKind {
            kind: "Invalid".to_string(),
            valid: "ActivityType, FlowObject".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("Invalid"));
        assert!(message.contains("ActivityType, FlowObject"));
    }

    #[test]
    fn test_not_a_directory_display() {
        let err = Error::NotADirectory(PathBuf::from("out/unit"));
        assert!(err.to_string().contains("out/unit"));
    }
}
