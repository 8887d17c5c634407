//! Binary format definitions for tagged numeric arrays
//!
//! This module contains pure data structure definitions for the tagged wire
//! format. No I/O operations, only format specifications.

pub mod constants;
pub mod encoding;
pub mod header;
pub mod order;

// Re-export format definitions
pub use encoding::{ElementKind, NativeArrayEncoding};
pub use header::EncodingHeader;
pub use order::ByteOrder;
