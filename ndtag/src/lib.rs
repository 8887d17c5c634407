//! NDTAG - Byte-Order Tagged Numeric Arrays
//!
//! This library encodes numeric arrays into self-describing buffers and files
//! and provides byte-order-aware random access to seekable storage.
//!
//! ## Architecture
//!
//! - **ndtag-core**: Format definitions, element traits, the serial codec and
//!   [`MdArray`] (no I/O, `no_std`)
//! - **ndtag**: Parallel codec, random access backends and memory-mapped files
//!
//! ## Quick Start
//!
//! ```rust
//! use ndtag::{ByteOrder, NativeArrayEncoding, NativeCodec};
//!
//! fn example() -> ndtag::Result<()> {
//!     let codec = NativeCodec::default();
//!     let bytes = codec.encode_with_order(&[1i32, 2, 3, 4], ByteOrder::LittleEndian)?;
//!     assert_eq!(
//!         NativeArrayEncoding::try_get_encoding_from_bytes(&bytes),
//!         Some(NativeArrayEncoding::Int32LittleEndian)
//!     );
//!     assert_eq!(codec.decode::<i32>(&bytes)?, vec![1, 2, 3, 4]);
//!     Ok(())
//! }
//! # example().unwrap();
//! ```
//!
//! ## Features
//!
//! - **serde** (default): serialization of configuration and format types
//! - **mmap** (default): [`EncodedArrayFile`] backed by `memmap2`

pub use ndtag_core::{
    // Format definitions
    ByteOrder, ElementKind, EncodingHeader, NativeArrayEncoding,
    // Element trait
    NativeElement,
    // Containers
    dimensions_from_signed, MdArray,
    // Core errors
    ErrorCategory, NdtagError,
};

pub mod codec;
pub mod config;
pub mod error;
#[cfg(feature = "mmap")]
pub mod mmap_backend;
pub mod random_access;

pub use codec::{DynamicArray, NativeCodec};
pub use config::CodecConfig;
pub use error::{Error, Result};
#[cfg(feature = "mmap")]
pub use mmap_backend::EncodedArrayFile;
pub use random_access::{ByteBufferRandomAccess, FileRandomAccess, RandomAccess};
