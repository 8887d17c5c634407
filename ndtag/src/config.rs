//! Codec configuration

use ndtag_core::ByteOrder;

/// Configuration for [`crate::NativeCodec`]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CodecConfig {
    /// Byte order used by [`crate::NativeCodec::encode`]
    pub default_order: ByteOrder,
    /// Element count from which payload conversion runs on the rayon pool
    pub parallel_threshold: usize,
}

impl CodecConfig {
    /// Set the default byte order
    pub fn with_default_order(mut self, order: ByteOrder) -> Self {
        self.default_order = order;
        self
    }

    /// Set the element count from which conversion is parallel
    pub fn with_parallel_threshold(mut self, parallel_threshold: usize) -> Self {
        self.parallel_threshold = parallel_threshold;
        self
    }

    /// Whether `count` elements should be converted in parallel
    pub fn is_parallel(&self, count: usize) -> bool {
        count >= self.parallel_threshold
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            default_order: ByteOrder::BigEndian,
            parallel_threshold: 1 << 20, // 1Mi elements
        }
    }
}
