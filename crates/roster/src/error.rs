//! Error types for the roster crate.

use thiserror::Error;

use crate::types::CastId;

/// Errors that can occur while loading a roster
#[derive(Error, Debug)]
pub enum RosterError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Roster JSON couldn't be parsed
    #[error("Parse error in {file} at line {line}, column {column}: {reason}")]
    ParseError {
        file: String,
        line: usize,
        column: usize,
        reason: String,
    },

    /// A required field was present but empty
    #[error("Candidate {id} has an empty {field}")]
    EmptyField { id: CastId, field: &'static str },

    /// The same id appeared twice in the roster
    #[error("Duplicate candidate id {id} in {file}")]
    DuplicateId { id: CastId, file: String },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, RosterError>;
