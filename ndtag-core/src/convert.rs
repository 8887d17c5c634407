//! Byte order conversion
//!
//! A single swap primitive serves every width: payload conversion in the
//! codecs and scalar access through [`crate::NativeElement`] both end here.

/// Reverse the byte order of a fixed-width value
///
/// Single-byte values come back unchanged. Floats are swapped on their
/// IEEE-754 bit pattern, never on the numeric value.
pub fn change_byte_order<T: bytemuck::Pod>(mut value: T) -> T {
    bytemuck::bytes_of_mut(&mut value).reverse();
    value
}
