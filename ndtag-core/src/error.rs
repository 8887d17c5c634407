//! Error types for NDTAG operations

/// Errors that can occur during NDTAG operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NdtagError {
    /// The buffer header does not match any registered encoding
    NotAnEncodedArray,
    /// No encoding is registered for the requested kind, width and order
    UnsupportedEncoding,
    /// Element width outside of {1, 2, 4, 8}
    UnsupportedWidth,
    /// The encoded element kind or width differs from the requested type
    TypeMismatch,
    /// Rank 0, negative dimension or flat length not matching the dimensions
    InvalidDimensions,
    /// Index out of bounds or rank mismatch
    IndexOutOfRange,
    /// Operation not allowed in the current state
    IllegalState,
    /// Payload length is not a multiple of the element width
    ArrayAlignment,
    /// Size calculation would overflow
    ArraySizeOverflow,
    /// Insufficient buffer space
    InsufficientBuffer,
}

/// Broad classification of [`NdtagError`] values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Input is not in (or not compatible with) the tagged format
    Format,
    /// Programmer error in the call arguments
    Argument,
    /// Call is not valid in the current state
    State,
}

impl NdtagError {
    /// Classify this error
    pub const fn category(self) -> ErrorCategory {
        match self {
            NdtagError::NotAnEncodedArray
            | NdtagError::TypeMismatch
            | NdtagError::ArrayAlignment
            | NdtagError::InsufficientBuffer => ErrorCategory::Format,
            NdtagError::UnsupportedEncoding
            | NdtagError::UnsupportedWidth
            | NdtagError::InvalidDimensions
            | NdtagError::IndexOutOfRange
            | NdtagError::ArraySizeOverflow => ErrorCategory::Argument,
            NdtagError::IllegalState => ErrorCategory::State,
        }
    }
}

impl core::fmt::Display for NdtagError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            NdtagError::NotAnEncodedArray => "Not an encoded array",
            NdtagError::UnsupportedEncoding => "No encoding for this kind, width and byte order",
            NdtagError::UnsupportedWidth => "Unsupported element width",
            NdtagError::TypeMismatch => "Encoded element type does not match",
            NdtagError::InvalidDimensions => "Invalid dimensions",
            NdtagError::IndexOutOfRange => "Index out of range",
            NdtagError::IllegalState => "Illegal state",
            NdtagError::ArrayAlignment => "Array size not aligned to element size",
            NdtagError::ArraySizeOverflow => "Array size calculation would overflow",
            NdtagError::InsufficientBuffer => "Insufficient buffer space",
        };
        write!(f, "{msg}")
    }
}

impl core::error::Error for NdtagError {}

/// Result type for NDTAG operations
pub type Result<T> = core::result::Result<T, NdtagError>;
