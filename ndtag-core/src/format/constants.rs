//! Format constants and magic bytes for tagged arrays

/// Minimum size of a tagged buffer: the header with zero elements
pub const MIN_ENCODING_HEADER_SIZE: usize = 8;

/// Number of magic bytes at the start of the header
pub const MAGIC_SIZE: usize = 3;

/// Kind marker for floating point arrays
pub const CHAR_F: u8 = b'F';

/// Kind marker for integer arrays
pub const CHAR_I: u8 = b'I';

/// Order marker for little-endian payloads
pub const CHAR_L: u8 = b'L';

/// Order marker for big-endian payloads
pub const CHAR_B: u8 = b'B';

/// Reserved order marker for native / unspecified order
pub const CHAR_N: u8 = b'N';

/// Element widths the format can describe
pub const SUPPORTED_WIDTHS: [u8; 4] = [1, 2, 4, 8];

/// Whether `width` is one of [`SUPPORTED_WIDTHS`]
pub const fn is_supported_width(width: usize) -> bool {
    matches!(width, 1 | 2 | 4 | 8)
}
