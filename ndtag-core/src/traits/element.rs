//! Element type constraints for tagged arrays
//!
//! This module defines the trait that constrains what types can be stored
//! in a tagged buffer or read and written one scalar at a time through a
//! byte-order-aware stream.

use crate::convert::change_byte_order;
use crate::format::{ByteOrder, ElementKind, NativeArrayEncoding};

/// Trait for fixed-width numeric types with a well-defined byte layout
///
/// All element types must be:
/// - `bytemuck::Pod`: any bit pattern is valid, no padding
/// - `PartialEq` and `Debug`: can be compared and printed in tests
/// - `Default`: used to fill fresh storage
/// - `Send + Sync`: payload conversion may run on worker threads
pub trait NativeElement:
    bytemuck::Pod + PartialEq + Default + core::fmt::Debug + Send + Sync + 'static
{
    /// Kind tag written into the header
    const KIND: ElementKind;

    /// Size in bytes of one element
    const WIDTH: u8;

    /// Reverse the byte order of this value
    ///
    /// Width 1 is a no-op. Floats are swapped on their IEEE-754 bit pattern.
    fn swap_bytes(self) -> Self {
        change_byte_order(self)
    }

    /// Convert a host-order value into `order`
    fn to_order(self, order: ByteOrder) -> Self {
        if order.needs_swap() {
            self.swap_bytes()
        } else {
            self
        }
    }

    /// Convert a value stored in `order` into host order
    fn to_host(self, order: ByteOrder) -> Self {
        // Swapping is an involution
        self.to_order(order)
    }

    /// Registry encoding for this type when written in `order`
    ///
    /// Single-byte integers always use the native encoding; `Native` is
    /// resolved to the host order for wider types.
    fn natural_encoding(order: ByteOrder) -> Option<NativeArrayEncoding> {
        let order = if Self::WIDTH == 1 {
            ByteOrder::Native
        } else {
            order.resolve()
        };
        NativeArrayEncoding::try_get_encoding(Self::KIND, order, Self::WIDTH)
    }

    /// Whether an encoded array can be decoded into this type
    fn accepts(encoding: NativeArrayEncoding) -> bool {
        encoding.kind() == Self::KIND && encoding.size_in_bytes() == Self::WIDTH
    }
}

macro_rules! impl_integer_element {
    ($($type:ty),*) => {
        $(
            impl NativeElement for $type {
                const KIND: ElementKind = ElementKind::Integer;
                const WIDTH: u8 = core::mem::size_of::<$type>() as u8;
            }
        )*
    };
}

macro_rules! impl_float_element {
    ($($type:ty),*) => {
        $(
            impl NativeElement for $type {
                const KIND: ElementKind = ElementKind::Float;
                const WIDTH: u8 = core::mem::size_of::<$type>() as u8;
            }
        )*
    };
}

impl_integer_element!(i8, u8, i16, u16, i32, u32, i64, u64);
impl_float_element!(f32, f64);
