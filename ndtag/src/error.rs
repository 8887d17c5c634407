//! Error type for codec and storage operations

use ndtag_core::{ErrorCategory, NdtagError};

/// Errors returned by the `ndtag` crate
///
/// Storage failures keep the original `std::io::Error` as their source.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Format, argument or state error from the core definitions
    #[error(transparent)]
    Core(#[from] NdtagError),

    /// Failure of the underlying storage medium
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether the input simply is not a tagged array
    pub fn is_not_encoded(&self) -> bool {
        matches!(self, Error::Core(NdtagError::NotAnEncodedArray))
    }

    /// Core error kind, if this is not an I/O failure
    pub fn core_error(&self) -> Option<NdtagError> {
        match self {
            Error::Core(err) => Some(*err),
            Error::Io(_) => None,
        }
    }

    /// Classification of core errors; `None` for I/O failures
    pub fn category(&self) -> Option<ErrorCategory> {
        self.core_error().map(NdtagError::category)
    }
}

/// Result type for `ndtag` operations
pub type Result<T> = std::result::Result<T, Error>;
