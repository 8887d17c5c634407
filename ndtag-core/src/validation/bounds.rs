//! Array bounds validation for tagged payloads
//!
//! Pure arithmetic on byte lengths, no I/O.

use crate::format::constants::is_supported_width;
use crate::NdtagError;

/// Validate a payload of `byte_len` bytes made of `width`-byte elements
///
/// Returns the element count of a payload of `byte_len` bytes.
pub const fn validate_payload_len(width: usize, byte_len: usize) -> Result<usize, NdtagError> {
    if !is_supported_width(width) {
        return Err(NdtagError::UnsupportedWidth);
    }

    if byte_len % width != 0 {
        return Err(NdtagError::ArrayAlignment);
    }

    let count = byte_len / width;

    // Reject counts that could not be indexed as a slice
    if count > isize::MAX as usize / width {
        return Err(NdtagError::ArraySizeOverflow);
    }

    Ok(count)
}

/// Total size of a header plus `count` elements of `width` bytes
pub const fn encoded_size(header_size: usize, width: usize, count: usize) -> Result<usize, NdtagError> {
    match count.checked_mul(width) {
        Some(payload) => match payload.checked_add(header_size) {
            Some(total) => Ok(total),
            None => Err(NdtagError::ArraySizeOverflow),
        },
        None => Err(NdtagError::ArraySizeOverflow),
    }
}
