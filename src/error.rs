//! Error types for the pagemodel library.

use std::io;
use thiserror::Error;

/// Result type alias for pagemodel operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while building or converting a page.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON (de)serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The identifier is malformed or already in use.
    #[error("Invalid id '{id}': {reason}")]
    InvalidId { id: String, reason: &'static str },

    /// A value of the wrong type was assigned to a variable.
    #[error("Variable '{name}' expects {expected}, got {actual}")]
    WrongVariableType {
        name: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// A value was rejected by the variable's constraint.
    #[error("Value '{value}' violates constraint of variable '{name}'")]
    ConstraintViolation { name: String, value: String },

    /// No converter is registered between the two versions.
    #[error("No conversion route from {from} to {to}")]
    UnsupportedConversionRoute { from: String, to: String },

    /// The content type cannot be created in this context.
    #[error("Unknown content type: {0}")]
    UnknownContentType(String),

    /// The role type name is not known.
    #[error("Unknown role type: {0}")]
    UnknownRoleType(String),

    /// The format version string is not known.
    #[error("Unknown format version: {0}")]
    UnknownFormatVersion(String),

    /// No attribute with this name exists on the object.
    #[error("Unknown attribute '{name}' on {owner}")]
    UnknownAttribute { owner: String, name: String },

    /// No content object with this id exists in the layout.
    #[error("Object not found: {0}")]
    ObjectNotFound(String),

    /// A containment edit would break the hierarchy.
    #[error("Invalid containment: {0}")]
    InvalidContainment(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    pub(crate) fn invalid_id(id: impl Into<String>, reason: &'static str) -> Self {
        Error::InvalidId {
            id: id.into(),
            reason,
        }
    }
}
