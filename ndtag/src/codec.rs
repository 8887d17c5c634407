//! Codec between native slices and tagged buffers
//!
//! Small arrays go through the serial codec of `ndtag-core`. From
//! [`CodecConfig::parallel_threshold`] elements on, the payload is converted
//! in chunks on the rayon pool. Both paths produce identical bytes.

use log::{debug, trace};
use ndtag_core::codec as serial;
use ndtag_core::{
    ByteOrder, ElementKind, EncodingHeader, NativeArrayEncoding, NativeElement, NdtagError,
};
use rayon::prelude::*;

use crate::config::CodecConfig;
use crate::error::Result;

/// Encode `data` with the default configuration
pub fn encode<T: NativeElement>(data: &[T], order: ByteOrder) -> Result<Vec<u8>> {
    NativeCodec::default().encode_with_order(data, order)
}

/// Decode `bytes` with the default configuration
pub fn decode<T: NativeElement>(bytes: &[u8]) -> Result<Vec<T>> {
    NativeCodec::default().decode(bytes)
}

/// Number of elements per rayon task
fn chunk_len(count: usize) -> usize {
    count.div_ceil(rayon::current_num_threads()).max(1)
}

/// Encoder/decoder for tagged numeric arrays
#[derive(Debug, Clone, Default)]
pub struct NativeCodec {
    config: CodecConfig,
}

impl NativeCodec {
    /// Create a codec with `config`
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    /// Configuration of this codec
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Encode `data` in the configured default byte order
    pub fn encode<T: NativeElement>(&self, data: &[T]) -> Result<Vec<u8>> {
        self.encode_with_order(data, self.config.default_order)
    }

    /// Encode `data` with its payload in `order`
    pub fn encode_with_order<T: NativeElement>(&self, data: &[T], order: ByteOrder) -> Result<Vec<u8>> {
        let encoding = T::natural_encoding(order).ok_or(NdtagError::UnsupportedEncoding)?;

        if !self.config.is_parallel(data.len()) {
            trace!("serial encode of {} elements", data.len());
            let bytes = serial::encode_with(encoding, data)?;
            debug!("encoded {} elements as {encoding}", data.len());
            return Ok(bytes);
        }

        let width = T::WIDTH as usize;
        let order = encoding.byte_order();
        let mut bytes = vec![0u8; serial::encoded_len(encoding, data.len())?];
        bytes[..EncodingHeader::SIZE]
            .copy_from_slice(&EncodingHeader::for_encoding(encoding).to_bytes_array());

        let chunk = chunk_len(data.len());
        trace!("parallel encode of {} elements in chunks of {chunk}", data.len());
        bytes[EncodingHeader::SIZE..]
            .par_chunks_mut(chunk * width)
            .zip(data.par_chunks(chunk))
            .for_each(|(out, values)| {
                for (slot, value) in out.chunks_exact_mut(width).zip(values) {
                    slot.copy_from_slice(bytemuck::bytes_of(&value.to_order(order)));
                }
            });

        debug!("encoded {} elements as {encoding}", data.len());
        Ok(bytes)
    }

    /// Decode a tagged buffer into host-order values
    pub fn decode<T: NativeElement>(&self, bytes: &[u8]) -> Result<Vec<T>> {
        let encoding = self.detect(bytes).ok_or(NdtagError::NotAnEncodedArray)?;
        self.decode_with(encoding, bytes)
    }

    /// Like [`NativeCodec::decode`], but `Ok(None)` if `bytes` is not a tagged array
    pub fn try_decode<T: NativeElement>(&self, bytes: &[u8]) -> Result<Option<Vec<T>>> {
        match self.detect(bytes) {
            Some(encoding) => self.decode_with(encoding, bytes).map(Some),
            None => Ok(None),
        }
    }

    /// Decode a tagged buffer whose encoding is known to the caller
    pub fn decode_with<T: NativeElement>(
        &self,
        encoding: NativeArrayEncoding,
        bytes: &[u8],
    ) -> Result<Vec<T>> {
        let header = EncodingHeader::from_bytes(bytes)?;
        if header.magic != encoding.magic() {
            return Err(NdtagError::NotAnEncodedArray.into());
        }
        if !T::accepts(encoding) {
            return Err(NdtagError::TypeMismatch.into());
        }
        let count = serial::element_count(encoding, bytes)?;

        if !self.config.is_parallel(count) {
            trace!("serial decode of {count} elements");
            let values = serial::decode_with(encoding, bytes)?;
            debug!("decoded {count} elements from {encoding}");
            return Ok(values);
        }

        let width = T::WIDTH as usize;
        let order = encoding.byte_order();
        let mut values = vec![T::default(); count];

        let chunk = chunk_len(count);
        trace!("parallel decode of {count} elements in chunks of {chunk}");
        values
            .par_chunks_mut(chunk)
            .zip(bytes[EncodingHeader::SIZE..].par_chunks(chunk * width))
            .for_each(|(out, raw)| {
                for (value, raw) in out.iter_mut().zip(raw.chunks_exact(width)) {
                    *value = bytemuck::pod_read_unaligned::<T>(raw).to_host(order);
                }
            });

        debug!("decoded {count} elements from {encoding}");
        Ok(values)
    }

    /// Decode a tagged buffer without knowing its element type up front
    pub fn decode_dynamic(&self, bytes: &[u8]) -> Result<DynamicArray> {
        let encoding = self.detect(bytes).ok_or(NdtagError::NotAnEncodedArray)?;
        self.decode_dynamic_with(encoding, bytes)
    }

    /// Decode a tagged buffer of known encoding into the matching variant
    pub fn decode_dynamic_with(
        &self,
        encoding: NativeArrayEncoding,
        bytes: &[u8],
    ) -> Result<DynamicArray> {
        let array = match (encoding.kind(), encoding.size_in_bytes()) {
            (ElementKind::Integer, 1) => DynamicArray::I8(self.decode_with(encoding, bytes)?),
            (ElementKind::Integer, 2) => DynamicArray::I16(self.decode_with(encoding, bytes)?),
            (ElementKind::Integer, 4) => DynamicArray::I32(self.decode_with(encoding, bytes)?),
            (ElementKind::Integer, _) => DynamicArray::I64(self.decode_with(encoding, bytes)?),
            (ElementKind::Float, 4) => DynamicArray::F32(self.decode_with(encoding, bytes)?),
            (ElementKind::Float, _) => DynamicArray::F64(self.decode_with(encoding, bytes)?),
        };
        Ok(array)
    }

    /// Encode a dynamically typed array with its payload in `order`
    pub fn encode_dynamic(&self, array: &DynamicArray, order: ByteOrder) -> Result<Vec<u8>> {
        match array {
            DynamicArray::I8(values) => self.encode_with_order(values, order),
            DynamicArray::I16(values) => self.encode_with_order(values, order),
            DynamicArray::I32(values) => self.encode_with_order(values, order),
            DynamicArray::I64(values) => self.encode_with_order(values, order),
            DynamicArray::F32(values) => self.encode_with_order(values, order),
            DynamicArray::F64(values) => self.encode_with_order(values, order),
        }
    }

    fn detect(&self, bytes: &[u8]) -> Option<NativeArrayEncoding> {
        let encoding = serial::detect_encoding(bytes);
        if encoding.is_none() {
            debug!("buffer of {} bytes is not an encoded array", bytes.len());
        }
        encoding
    }
}

/// Decoded array whose element type is only known at runtime
///
/// Integers decode as signed values; the header does not record signedness.
#[derive(Debug, Clone, PartialEq)]
pub enum DynamicArray {
    I8(Vec<i8>),
    I16(Vec<i16>),
    I32(Vec<i32>),
    I64(Vec<i64>),
    F32(Vec<f32>),
    F64(Vec<f64>),
}

impl DynamicArray {
    /// Number of elements
    pub fn len(&self) -> usize {
        match self {
            DynamicArray::I8(values) => values.len(),
            DynamicArray::I16(values) => values.len(),
            DynamicArray::I32(values) => values.len(),
            DynamicArray::I64(values) => values.len(),
            DynamicArray::F32(values) => values.len(),
            DynamicArray::F64(values) => values.len(),
        }
    }

    /// Whether there are no elements
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element kind
    pub fn kind(&self) -> ElementKind {
        match self {
            DynamicArray::F32(_) | DynamicArray::F64(_) => ElementKind::Float,
            _ => ElementKind::Integer,
        }
    }

    /// Size of one element in bytes
    pub fn size_in_bytes(&self) -> u8 {
        match self {
            DynamicArray::I8(_) => 1,
            DynamicArray::I16(_) => 2,
            DynamicArray::I32(_) | DynamicArray::F32(_) => 4,
            DynamicArray::I64(_) | DynamicArray::F64(_) => 8,
        }
    }

    /// Registry encoding this array would be written with in `order`
    pub fn encoding(&self, order: ByteOrder) -> Option<NativeArrayEncoding> {
        let order = if self.size_in_bytes() == 1 {
            ByteOrder::Native
        } else {
            order.resolve()
        };
        NativeArrayEncoding::try_get_encoding(self.kind(), order, self.size_in_bytes())
    }

    /// Encode with the default codec, payload in `order`
    pub fn encode(&self, order: ByteOrder) -> Result<Vec<u8>> {
        NativeCodec::default().encode_dynamic(self, order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parallel_codec() -> NativeCodec {
        NativeCodec::new(CodecConfig::default().with_parallel_threshold(1))
    }

    #[test]
    fn test_parallel_matches_serial() {
        let data: Vec<i32> = (0..10_000).map(|i| i * 7 - 3000).collect();
        let floats: Vec<f64> = (0..5_000).map(|i| i as f64 / 3.0).collect();
        for order in [ByteOrder::LittleEndian, ByteOrder::BigEndian, ByteOrder::Native] {
            let parallel = parallel_codec().encode_with_order(&data, order).unwrap();
            let serial = NativeCodec::default().encode_with_order(&data, order).unwrap();
            assert_eq!(parallel, serial);
            assert_eq!(parallel_codec().decode::<i32>(&parallel).unwrap(), data);
            assert_eq!(NativeCodec::default().decode::<i32>(&parallel).unwrap(), data);

            let parallel = parallel_codec().encode_with_order(&floats, order).unwrap();
            let serial = NativeCodec::default().encode_with_order(&floats, order).unwrap();
            assert_eq!(parallel, serial);
            assert_eq!(parallel_codec().decode::<f64>(&serial).unwrap(), floats);
        }
    }

    #[test]
    fn test_default_order_is_big_endian() {
        let bytes = NativeCodec::default().encode(&[1i16]).unwrap();
        assert_eq!(bytes, vec![b'I', b'B', 2, 0, 0, 0, 0, 0, 0, 1]);
    }

    #[test]
    fn test_scenario_int32_little_endian() {
        let bytes = encode(&[1i32, 2, 3, 4], ByteOrder::LittleEndian).unwrap();
        assert_eq!(&bytes[..3], &[0x49, 0x4C, 0x04]);
        assert_eq!(
            &bytes[8..],
            &[1, 0, 0, 0, 2, 0, 0, 0, 3, 0, 0, 0, 4, 0, 0, 0]
        );
        assert_eq!(decode::<i32>(&bytes).unwrap(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_not_encoded_is_classified() {
        let codec = parallel_codec();
        let err = codec.decode::<i32>(b"not a tagged array").unwrap_err();
        assert!(err.is_not_encoded());
        assert_eq!(codec.try_decode::<i32>(b"tiny").unwrap(), None);
        assert!(codec.decode_dynamic(b"IN\x04\0\0\0\0\0").unwrap_err().is_not_encoded());
    }

    #[test]
    fn test_parallel_type_mismatch_and_alignment() {
        let codec = parallel_codec();
        let bytes = codec.encode_with_order(&[1u64, 2], ByteOrder::BigEndian).unwrap();
        assert_eq!(
            codec.decode::<f64>(&bytes).unwrap_err().core_error(),
            Some(NdtagError::TypeMismatch)
        );
        assert_eq!(
            codec.decode::<u64>(&bytes[..bytes.len() - 3]).unwrap_err().core_error(),
            Some(NdtagError::ArrayAlignment)
        );
    }

    #[test]
    fn test_dynamic_round_trip() {
        let codec = NativeCodec::default();
        let arrays = [
            DynamicArray::I16(vec![-2, 300]),
            DynamicArray::I32(vec![i32::MIN, 0, i32::MAX]),
            DynamicArray::I64(vec![42]),
            DynamicArray::F32(vec![0.25, -8.0]),
            DynamicArray::F64(vec![]),
        ];
        for array in &arrays {
            for order in [ByteOrder::LittleEndian, ByteOrder::BigEndian] {
                let bytes = codec.encode_dynamic(array, order).unwrap();
                assert_eq!(
                    NativeArrayEncoding::try_get_encoding_from_bytes(&bytes),
                    array.encoding(order)
                );
                assert_eq!(&codec.decode_dynamic(&bytes).unwrap(), array);
            }
        }

        let int8 = DynamicArray::I8(vec![-1, 2, -3]);
        let bytes = codec.encode_dynamic(&int8, ByteOrder::BigEndian).unwrap();
        assert_eq!(codec.decode_dynamic(&bytes).unwrap(), int8);
        assert_eq!(
            codec
                .decode_dynamic_with(NativeArrayEncoding::Int8Native, &bytes)
                .unwrap(),
            int8
        );
        assert_eq!(int8.encode(ByteOrder::LittleEndian).unwrap(), bytes);
        assert_eq!(int8.len(), 3);
        assert_eq!(int8.kind(), ElementKind::Integer);
        assert!(DynamicArray::F64(vec![]).is_empty());
    }

    #[test]
    fn test_int8_round_trip_without_explicit_encoding() {
        let data = [-1i8, 0, 1, i8::MIN];
        for codec in [NativeCodec::default(), parallel_codec()] {
            for order in [ByteOrder::LittleEndian, ByteOrder::BigEndian, ByteOrder::Native] {
                let bytes = codec.encode_with_order(&data, order).unwrap();
                assert_eq!(codec.decode::<i8>(&bytes).unwrap(), data);
                assert_eq!(codec.try_decode::<i8>(&bytes).unwrap(), Some(data.to_vec()));
                assert_eq!(
                    codec.decode_dynamic(&bytes).unwrap(),
                    DynamicArray::I8(data.to_vec())
                );
            }
        }
        let bytes = encode(&data, ByteOrder::LittleEndian).unwrap();
        assert_eq!(decode::<i8>(&bytes).unwrap(), data);
    }

    #[test]
    fn test_unsigned_decodes_as_signed_dynamic() {
        let bytes = encode(&[u16::MAX], ByteOrder::LittleEndian).unwrap();
        assert_eq!(
            NativeCodec::default().decode_dynamic(&bytes).unwrap(),
            DynamicArray::I16(vec![-1])
        );
    }
}
