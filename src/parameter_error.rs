//! Error handling for arm description and settings

use std::io;
use thiserror::Error;

/// Unified error to report failures while reading or validating an arm description.
#[derive(Debug, Error)]
pub enum ParameterError {
    #[error("IO Error: {0}")]
    IoError(#[from] io::Error),

    #[error("Parse Error: {0}")]
    ParseError(String),

    #[error("Invalid Length of {field}: expected {expected}, found {found}")]
    InvalidLength { field: String, expected: usize, found: usize },

    #[error("Invalid Value: {0}")]
    InvalidValue(String),
}
