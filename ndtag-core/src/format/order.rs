//! Byte order of encoded payloads and random-access scalars

use super::constants::{CHAR_B, CHAR_L, CHAR_N};

/// Byte order of multi-byte values
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ByteOrder {
    /// Whatever the executing host uses
    Native,
    /// Least significant byte first
    LittleEndian,
    /// Most significant byte first
    #[default]
    BigEndian,
}

impl ByteOrder {
    /// Concrete byte order of the executing host
    pub const fn host() -> Self {
        if cfg!(target_endian = "little") {
            ByteOrder::LittleEndian
        } else {
            ByteOrder::BigEndian
        }
    }

    /// Map `Native` to the host order, keep explicit orders
    pub const fn resolve(self) -> Self {
        match self {
            ByteOrder::Native => Self::host(),
            other => other,
        }
    }

    /// Whether values in this order must be byte-swapped to be read on this host
    pub const fn needs_swap(self) -> bool {
        !matches!(
            (self.resolve(), Self::host()),
            (ByteOrder::LittleEndian, ByteOrder::LittleEndian)
                | (ByteOrder::BigEndian, ByteOrder::BigEndian)
        )
    }

    /// Header marker byte for this order
    ///
    /// `Native` maps to the reserved `N` marker, which no multi-byte
    /// encoding in the registry ever carries.
    pub const fn marker(self) -> u8 {
        match self {
            ByteOrder::LittleEndian => CHAR_L,
            ByteOrder::BigEndian => CHAR_B,
            ByteOrder::Native => CHAR_N,
        }
    }

    /// Parse a header marker byte. Only `L` and `B` are recognized.
    pub const fn from_marker(marker: u8) -> Option<Self> {
        match marker {
            CHAR_L => Some(ByteOrder::LittleEndian),
            CHAR_B => Some(ByteOrder::BigEndian),
            _ => None,
        }
    }
}

impl core::fmt::Display for ByteOrder {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ByteOrder::Native => write!(f, "native"),
            ByteOrder::LittleEndian => write!(f, "little-endian"),
            ByteOrder::BigEndian => write!(f, "big-endian"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_and_swap() {
        assert_eq!(ByteOrder::Native.resolve(), ByteOrder::host());
        assert!(!ByteOrder::Native.needs_swap());
        assert!(!ByteOrder::host().needs_swap());

        let foreign = match ByteOrder::host() {
            ByteOrder::LittleEndian => ByteOrder::BigEndian,
            _ => ByteOrder::LittleEndian,
        };
        assert!(foreign.needs_swap());
    }

    #[test]
    fn test_markers() {
        assert_eq!(ByteOrder::LittleEndian.marker(), 0x4C);
        assert_eq!(ByteOrder::BigEndian.marker(), 0x42);
        assert_eq!(ByteOrder::Native.marker(), b'N');

        assert_eq!(ByteOrder::from_marker(b'L'), Some(ByteOrder::LittleEndian));
        assert_eq!(ByteOrder::from_marker(b'B'), Some(ByteOrder::BigEndian));
        assert_eq!(ByteOrder::from_marker(b'N'), None);
        assert_eq!(ByteOrder::from_marker(0), None);
    }
}
