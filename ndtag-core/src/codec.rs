//! Serial codec between native slices and tagged buffers
//!
//! A tagged buffer is an [`EncodingHeader`] followed by the raw payload in
//! the byte order and width named by the header.

use alloc::vec::Vec;

use crate::format::{ByteOrder, EncodingHeader, NativeArrayEncoding};
use crate::traits::NativeElement;
use crate::validation::{encoded_size, validate_payload_len};
use crate::{NdtagError, Result};

/// Total length of a tagged buffer holding `count` elements
pub fn encoded_len(encoding: NativeArrayEncoding, count: usize) -> Result<usize> {
    encoded_size(
        EncodingHeader::SIZE,
        encoding.size_in_bytes() as usize,
        count,
    )
}

/// Number of elements in the payload of a tagged buffer
pub fn element_count(encoding: NativeArrayEncoding, bytes: &[u8]) -> Result<usize> {
    if bytes.len() < EncodingHeader::SIZE {
        return Err(NdtagError::InsufficientBuffer);
    }
    validate_payload_len(
        encoding.size_in_bytes() as usize,
        bytes.len() - EncodingHeader::SIZE,
    )
}

/// Encode `data` into a tagged buffer with its payload in `order`
///
/// `ByteOrder::Native` is resolved to the host order; single-byte types are
/// always written with the native encoding.
pub fn encode<T: NativeElement>(data: &[T], order: ByteOrder) -> Result<Vec<u8>> {
    let encoding = T::natural_encoding(order).ok_or(NdtagError::UnsupportedEncoding)?;
    encode_with(encoding, data)
}

/// Encode `data` with an explicit registry encoding
pub fn encode_with<T: NativeElement>(encoding: NativeArrayEncoding, data: &[T]) -> Result<Vec<u8>> {
    if !T::accepts(encoding) {
        return Err(NdtagError::TypeMismatch);
    }

    let mut bytes = Vec::with_capacity(encoded_len(encoding, data.len())?);
    bytes.extend_from_slice(&EncodingHeader::for_encoding(encoding).to_bytes_array());

    let order = encoding.byte_order();
    if order.needs_swap() {
        for value in data {
            bytes.extend_from_slice(bytemuck::bytes_of(&value.to_order(order)));
        }
    } else {
        bytes.extend_from_slice(bytemuck::cast_slice(data));
    }

    Ok(bytes)
}

/// Encoding of a tagged buffer as written by [`encode`]
///
/// Registry detection only knows the `L`/`B` markers; a header carrying the
/// exact `Int8Native` magic is recognized here as well.
pub fn detect_encoding(bytes: &[u8]) -> Option<NativeArrayEncoding> {
    NativeArrayEncoding::try_get_encoding_from_bytes(bytes).or_else(|| {
        let header = EncodingHeader::from_bytes(bytes).ok()?;
        (header.magic == NativeArrayEncoding::Int8Native.magic())
            .then_some(NativeArrayEncoding::Int8Native)
    })
}

/// Decode a tagged buffer into host-order values
///
/// Fails with `NotAnEncodedArray` if the header is not recognized, and with
/// `TypeMismatch` if it describes a different kind or width than `T`.
pub fn decode<T: NativeElement>(bytes: &[u8]) -> Result<Vec<T>> {
    let encoding = detect_encoding(bytes).ok_or(NdtagError::NotAnEncodedArray)?;
    decode_payload(encoding, bytes)
}

/// Like [`decode`], but returns `Ok(None)` if `bytes` is not an encoded array
pub fn try_decode<T: NativeElement>(bytes: &[u8]) -> Result<Option<Vec<T>>> {
    match detect_encoding(bytes) {
        Some(encoding) => decode_payload(encoding, bytes).map(Some),
        None => Ok(None),
    }
}

/// Decode a tagged buffer whose encoding is known to the caller
///
/// The header magic must match `encoding`.
pub fn decode_with<T: NativeElement>(encoding: NativeArrayEncoding, bytes: &[u8]) -> Result<Vec<T>> {
    let header = EncodingHeader::from_bytes(bytes)?;
    if header.magic != encoding.magic() {
        return Err(NdtagError::NotAnEncodedArray);
    }
    decode_payload(encoding, bytes)
}

fn decode_payload<T: NativeElement>(encoding: NativeArrayEncoding, bytes: &[u8]) -> Result<Vec<T>> {
    if !T::accepts(encoding) {
        return Err(NdtagError::TypeMismatch);
    }
    element_count(encoding, bytes)?;

    // The payload offset is not necessarily aligned for T, so copy out
    let mut values: Vec<T> = bytemuck::pod_collect_to_vec(&bytes[EncodingHeader::SIZE..]);
    let order = encoding.byte_order();
    if order.needs_swap() {
        for value in values.iter_mut() {
            *value = value.to_host(order);
        }
    }

    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_int32_little_endian_layout() {
        let bytes = encode(&[1i32, 2, 3, 4], ByteOrder::LittleEndian).unwrap();
        assert_eq!(&bytes[..3], &[0x49, 0x4C, 0x04]);
        assert_eq!(bytes.len(), 8 + 16);
        assert_eq!(
            &bytes[8..],
            &[1, 0, 0, 0, 2, 0, 0, 0, 3, 0, 0, 0, 4, 0, 0, 0]
        );
        assert_eq!(decode::<i32>(&bytes).unwrap(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_big_endian_layout() {
        let bytes = encode(&[0x0102u16], ByteOrder::BigEndian).unwrap();
        assert_eq!(bytes, vec![b'I', b'B', 2, 0, 0, 0, 0, 0, 0x01, 0x02]);

        let bytes = encode(&[1.0f32], ByteOrder::BigEndian).unwrap();
        assert_eq!(&bytes[..3], b"FB\x04");
        assert_eq!(&bytes[8..], &1.0f32.to_be_bytes());
    }

    #[test]
    fn test_round_trip_all_orders() {
        let ints = [i64::MIN, -1, 0, 1, i64::MAX];
        let floats = [f64::MIN, -0.0, 0.5, f64::INFINITY];
        for order in [ByteOrder::LittleEndian, ByteOrder::BigEndian, ByteOrder::Native] {
            assert_eq!(decode::<i64>(&encode(&ints, order).unwrap()).unwrap(), ints);
            assert_eq!(
                decode::<i8>(&encode(&[i8::MIN, -1, 0, i8::MAX], order).unwrap()).unwrap(),
                vec![i8::MIN, -1, 0, i8::MAX]
            );
            assert_eq!(decode::<f64>(&encode(&floats, order).unwrap()).unwrap(), floats);
            assert_eq!(
                decode::<u16>(&encode(&[0u16, 0xFFFF, 0x1234], order).unwrap()).unwrap(),
                vec![0, 0xFFFF, 0x1234]
            );
            assert_eq!(
                decode::<f32>(&encode(&[1.25f32, -3.5], order).unwrap()).unwrap(),
                vec![1.25, -3.5]
            );
        }
    }

    #[test]
    fn test_empty_round_trip() {
        let bytes = encode::<f64>(&[], ByteOrder::BigEndian).unwrap();
        assert_eq!(bytes.len(), EncodingHeader::SIZE);
        assert!(decode::<f64>(&bytes).unwrap().is_empty());
    }

    #[test]
    fn test_signedness_is_not_tagged() {
        let bytes = encode(&[-1i32], ByteOrder::LittleEndian).unwrap();
        assert_eq!(decode::<u32>(&bytes).unwrap(), vec![u32::MAX]);
    }

    #[test]
    fn test_native_marker_needs_int8_magic() {
        assert_eq!(detect_encoding(b"IN\x02\0\0\0\0\0"), None);
        assert_eq!(detect_encoding(b"FN\x01\0\0\0\0\0"), None);
        assert_eq!(detect_encoding(b"IN\x01"), None);
    }

    #[test]
    fn test_not_an_encoded_array() {
        assert_eq!(decode::<i32>(b"short"), Err(NdtagError::NotAnEncodedArray));
        assert_eq!(
            decode::<i32>(b"IX\x04\0\0\0\0\0"),
            Err(NdtagError::NotAnEncodedArray)
        );
        assert_eq!(try_decode::<i32>(b"hello world"), Ok(None));
    }

    #[test]
    fn test_type_mismatch() {
        let bytes = encode(&[1.0f64], ByteOrder::LittleEndian).unwrap();
        assert_eq!(decode::<i64>(&bytes), Err(NdtagError::TypeMismatch));
        assert_eq!(decode::<f32>(&bytes), Err(NdtagError::TypeMismatch));
        assert_eq!(
            encode_with(NativeArrayEncoding::Int16BigEndian, &[1i32]),
            Err(NdtagError::TypeMismatch)
        );
    }

    #[test]
    fn test_truncated_payload() {
        let mut bytes = encode(&[1i32, 2], ByteOrder::BigEndian).unwrap();
        bytes.pop();
        assert_eq!(decode::<i32>(&bytes), Err(NdtagError::ArrayAlignment));
    }

    #[test]
    fn test_int8_round_trip() {
        let data = [-128i8, -1, 0, 1, 127];
        let bytes = encode(&data, ByteOrder::LittleEndian).unwrap();
        assert_eq!(&bytes[..3], b"IN\x01");
        assert_eq!(
            NativeArrayEncoding::try_get_encoding_from_bytes(&bytes),
            None
        );
        assert_eq!(detect_encoding(&bytes), Some(NativeArrayEncoding::Int8Native));
        assert_eq!(decode::<i8>(&bytes).unwrap(), data);
        assert_eq!(try_decode::<u8>(&bytes).unwrap(), Some(vec![128, 255, 0, 1, 127]));
        assert_eq!(decode::<i16>(&bytes), Err(NdtagError::TypeMismatch));
        assert_eq!(
            decode_with::<i8>(NativeArrayEncoding::Int8Native, &bytes).unwrap(),
            data
        );
        assert_eq!(
            decode_with::<i8>(NativeArrayEncoding::Int16BigEndian, &bytes),
            Err(NdtagError::NotAnEncodedArray)
        );
    }

    #[test]
    fn test_lengths() {
        let encoding = NativeArrayEncoding::Float64BigEndian;
        assert_eq!(encoded_len(encoding, 3), Ok(32));
        let bytes = encode(&[1.0f64, 2.0, 3.0], ByteOrder::BigEndian).unwrap();
        assert_eq!(element_count(encoding, &bytes), Ok(3));
        assert_eq!(element_count(encoding, &bytes[..4]), Err(NdtagError::InsufficientBuffer));
    }
}
