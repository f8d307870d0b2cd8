//! Error types for the atom viewer.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum AtomError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Unknown element: {0}")]
    UnknownElement(String),
}

pub type Result<T> = std::result::Result<T, AtomError>;
