//! Registry of native array encodings
//!
//! Every tagged buffer starts with a three byte magic: the element kind, the
//! byte order and the element width. The registry is the closed set of
//! (kind, width, order) combinations that can appear in such a magic.

use super::constants::{CHAR_F, CHAR_I, MIN_ENCODING_HEADER_SIZE};
use super::order::ByteOrder;

/// Element kind of an encoded array
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ElementKind {
    /// Two's complement integers (signed and unsigned share the tag)
    Integer,
    /// IEEE-754 floating point
    Float,
}

impl ElementKind {
    /// Header marker byte for this kind
    pub const fn marker(self) -> u8 {
        match self {
            ElementKind::Integer => CHAR_I,
            ElementKind::Float => CHAR_F,
        }
    }

    /// Parse a header marker byte
    pub const fn from_marker(marker: u8) -> Option<Self> {
        match marker {
            CHAR_I => Some(ElementKind::Integer),
            CHAR_F => Some(ElementKind::Float),
            _ => None,
        }
    }
}

impl core::fmt::Display for ElementKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ElementKind::Integer => write!(f, "int"),
            ElementKind::Float => write!(f, "float"),
        }
    }
}

/// Compute the magic bytes for a (kind, order, width) triple
///
/// Pure function of its arguments. `ByteOrder::Native` yields the reserved
/// `N` marker; only [`NativeArrayEncoding::Int8Native`] carries it.
pub const fn magic_for(kind: ElementKind, order: ByteOrder, width: u8) -> [u8; 3] {
    [kind.marker(), order.marker(), width]
}

/// Encodings for arrays of numbers in native (host) format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NativeArrayEncoding {
    Int8Native,
    Int16LittleEndian,
    Int32LittleEndian,
    Int64LittleEndian,
    Int16BigEndian,
    Int32BigEndian,
    Int64BigEndian,
    Float32LittleEndian,
    Float64LittleEndian,
    Float32BigEndian,
    Float64BigEndian,
}

impl NativeArrayEncoding {
    /// All registered encodings
    pub const ALL: [NativeArrayEncoding; 11] = [
        NativeArrayEncoding::Int8Native,
        NativeArrayEncoding::Int16LittleEndian,
        NativeArrayEncoding::Int32LittleEndian,
        NativeArrayEncoding::Int64LittleEndian,
        NativeArrayEncoding::Int16BigEndian,
        NativeArrayEncoding::Int32BigEndian,
        NativeArrayEncoding::Int64BigEndian,
        NativeArrayEncoding::Float32LittleEndian,
        NativeArrayEncoding::Float64LittleEndian,
        NativeArrayEncoding::Float32BigEndian,
        NativeArrayEncoding::Float64BigEndian,
    ];

    /// Element kind of the encoded array
    pub const fn kind(self) -> ElementKind {
        match self {
            NativeArrayEncoding::Float32LittleEndian
            | NativeArrayEncoding::Float64LittleEndian
            | NativeArrayEncoding::Float32BigEndian
            | NativeArrayEncoding::Float64BigEndian => ElementKind::Float,
            _ => ElementKind::Integer,
        }
    }

    /// Returns `true` if the encoded array is a float array
    pub const fn is_floating_point(self) -> bool {
        matches!(self.kind(), ElementKind::Float)
    }

    /// Returns `true` if the encoded array is an integer array
    pub const fn is_integer(self) -> bool {
        matches!(self.kind(), ElementKind::Integer)
    }

    /// Byte order of the payload
    pub const fn byte_order(self) -> ByteOrder {
        match self {
            NativeArrayEncoding::Int8Native => ByteOrder::Native,
            NativeArrayEncoding::Int16LittleEndian
            | NativeArrayEncoding::Int32LittleEndian
            | NativeArrayEncoding::Int64LittleEndian
            | NativeArrayEncoding::Float32LittleEndian
            | NativeArrayEncoding::Float64LittleEndian => ByteOrder::LittleEndian,
            _ => ByteOrder::BigEndian,
        }
    }

    /// Size of one element in bytes
    pub const fn size_in_bytes(self) -> u8 {
        match self {
            NativeArrayEncoding::Int8Native => 1,
            NativeArrayEncoding::Int16LittleEndian | NativeArrayEncoding::Int16BigEndian => 2,
            NativeArrayEncoding::Int32LittleEndian
            | NativeArrayEncoding::Int32BigEndian
            | NativeArrayEncoding::Float32LittleEndian
            | NativeArrayEncoding::Float32BigEndian => 4,
            _ => 8,
        }
    }

    /// The three magic bytes identifying this encoding
    pub const fn magic(self) -> [u8; 3] {
        magic_for(self.kind(), self.byte_order(), self.size_in_bytes())
    }

    /// Look up the integer encoding for `byte_order` and `size_in_bytes`
    ///
    /// Single-byte integers only exist in native order; wider integers only in
    /// an explicit little- or big-endian order.
    pub const fn try_get_integer_encoding(byte_order: ByteOrder, size_in_bytes: u8) -> Option<Self> {
        match (size_in_bytes, byte_order) {
            (1, ByteOrder::Native) => Some(NativeArrayEncoding::Int8Native),
            (2, ByteOrder::LittleEndian) => Some(NativeArrayEncoding::Int16LittleEndian),
            (2, ByteOrder::BigEndian) => Some(NativeArrayEncoding::Int16BigEndian),
            (4, ByteOrder::LittleEndian) => Some(NativeArrayEncoding::Int32LittleEndian),
            (4, ByteOrder::BigEndian) => Some(NativeArrayEncoding::Int32BigEndian),
            (8, ByteOrder::LittleEndian) => Some(NativeArrayEncoding::Int64LittleEndian),
            (8, ByteOrder::BigEndian) => Some(NativeArrayEncoding::Int64BigEndian),
            _ => None,
        }
    }

    /// Look up the float encoding for `byte_order` and `size_in_bytes`
    pub const fn try_get_float_encoding(byte_order: ByteOrder, size_in_bytes: u8) -> Option<Self> {
        match (size_in_bytes, byte_order) {
            (4, ByteOrder::LittleEndian) => Some(NativeArrayEncoding::Float32LittleEndian),
            (4, ByteOrder::BigEndian) => Some(NativeArrayEncoding::Float32BigEndian),
            (8, ByteOrder::LittleEndian) => Some(NativeArrayEncoding::Float64LittleEndian),
            (8, ByteOrder::BigEndian) => Some(NativeArrayEncoding::Float64BigEndian),
            _ => None,
        }
    }

    /// Look up the encoding for a (kind, order, width) triple
    pub const fn try_get_encoding(
        kind: ElementKind,
        byte_order: ByteOrder,
        size_in_bytes: u8,
    ) -> Option<Self> {
        match kind {
            ElementKind::Integer => Self::try_get_integer_encoding(byte_order, size_in_bytes),
            ElementKind::Float => Self::try_get_float_encoding(byte_order, size_in_bytes),
        }
    }

    /// Returns the encoding of `bytes`, or `None` if `bytes` is not an encoded array
    ///
    /// Total over all inputs: buffers shorter than the header, buffers whose
    /// order marker is neither `L` nor `B`, and unknown kind/width
    /// combinations are all `None`.
    pub const fn try_get_encoding_from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < MIN_ENCODING_HEADER_SIZE {
            return None;
        }
        let byte_order = match ByteOrder::from_marker(bytes[1]) {
            Some(order) => order,
            None => return None,
        };
        match ElementKind::from_marker(bytes[0]) {
            Some(kind) => Self::try_get_encoding(kind, byte_order, bytes[2]),
            None => None,
        }
    }
}

impl core::fmt::Display for NativeArrayEncoding {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{}{} ({})",
            self.kind(),
            self.size_in_bytes() as usize * 8,
            self.byte_order()
        )
    }
}
