//! Validation utilities for tagged arrays
//!
//! This module contains pure validation functions with no I/O dependencies.
//! All functions are arithmetic on data layout and format constraints.

pub mod bounds;
pub mod dimensions;

pub use bounds::{encoded_size, validate_payload_len};
pub use dimensions::{hyper_row_length, row_major_index, storage_length, validate_dimensions};
