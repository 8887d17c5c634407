//! Header of tagged numeric array buffers
//!
//! Layout: `[kind, order, width, reserved x5]`, followed by the payload.

use super::constants::{MAGIC_SIZE, MIN_ENCODING_HEADER_SIZE};
use super::encoding::NativeArrayEncoding;
use crate::{NdtagError, Result};

/// Fixed-size header in front of every tagged payload
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncodingHeader {
    /// Kind marker, order marker, element width
    pub magic: [u8; MAGIC_SIZE],
    /// Reserved bytes, written as zero and ignored on read
    pub reserved: [u8; 5],
}

impl EncodingHeader {
    /// Size of the header in bytes
    pub const SIZE: usize = MIN_ENCODING_HEADER_SIZE;

    /// Create the header for `encoding`
    pub const fn for_encoding(encoding: NativeArrayEncoding) -> Self {
        Self {
            magic: encoding.magic(),
            reserved: [0; 5],
        }
    }

    /// Encoding described by the magic, if it is a registered one
    pub fn encoding(&self) -> Option<NativeArrayEncoding> {
        NativeArrayEncoding::try_get_encoding_from_bytes(&self.to_bytes_array())
    }

    /// Parse header from bytes
    ///
    /// Only checks the length; use [`EncodingHeader::encoding`] to classify
    /// the magic.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < Self::SIZE {
            return Err(NdtagError::InsufficientBuffer);
        }

        let mut magic = [0u8; MAGIC_SIZE];
        magic.copy_from_slice(&bytes[..MAGIC_SIZE]);
        let mut reserved = [0u8; 5];
        reserved.copy_from_slice(&bytes[MAGIC_SIZE..Self::SIZE]);

        Ok(Self { magic, reserved })
    }

    /// Convert header to bytes array (no-std compatible)
    pub const fn to_bytes_array(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        bytes[0] = self.magic[0];
        bytes[1] = self.magic[1];
        bytes[2] = self.magic[2];

        let mut i = 0;
        while i < 5 {
            bytes[MAGIC_SIZE + i] = self.reserved[i];
            i += 1;
        }

        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_layout() {
        let header = EncodingHeader::for_encoding(NativeArrayEncoding::Int32LittleEndian);
        assert_eq!(header.to_bytes_array(), [0x49, 0x4C, 0x04, 0, 0, 0, 0, 0]);
        assert_eq!(core::mem::size_of::<EncodingHeader>(), EncodingHeader::SIZE);
    }

    #[test]
    fn test_from_bytes() {
        let bytes = [b'F', b'B', 8, 1, 2, 3, 4, 5, 0xAA];
        let header = EncodingHeader::from_bytes(&bytes).unwrap();
        assert_eq!(header.magic, *b"FB\x08");
        assert_eq!(header.reserved, [1, 2, 3, 4, 5]);
        assert_eq!(header.encoding(), Some(NativeArrayEncoding::Float64BigEndian));

        assert_eq!(
            EncodingHeader::from_bytes(&bytes[..7]),
            Err(NdtagError::InsufficientBuffer)
        );
    }

    #[test]
    fn test_unknown_magic_has_no_encoding() {
        let header = EncodingHeader::from_bytes(b"ZZZ\0\0\0\0\0").unwrap();
        assert_eq!(header.encoding(), None);
    }
}
