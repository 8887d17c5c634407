#![no_std]

//! NDTAG Core - Byte-Order Tagged Numeric Array Definitions
//!
//! This crate provides the format definitions for tagged numeric arrays: the
//! encoding registry, the 8 byte header, byte-order conversion and the
//! element trait. With the `alloc` feature it also provides the serial codec
//! and the multi-dimensional array container.

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod convert;
pub mod error;
pub mod format;
pub mod traits;
pub mod validation;

#[cfg(feature = "alloc")]
pub mod codec;
#[cfg(feature = "alloc")]
pub mod mdarray;

pub use error::*;
pub use format::*;
pub use traits::*;

#[cfg(feature = "alloc")]
pub use mdarray::{dimensions_from_signed, MdArray};
