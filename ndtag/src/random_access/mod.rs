//! Byte-order-aware random access to seekable byte storage
//!
//! [`RandomAccess`] combines positioned reads and writes with typed scalar
//! accessors that honour a configurable byte order. Two backends exist:
//! [`ByteBufferRandomAccess`] over an owned buffer and [`FileRandomAccess`]
//! over a file.

mod byte_buffer;
mod file;

pub use byte_buffer::ByteBufferRandomAccess;
pub use file::FileRandomAccess;

use std::io;

use ndtag_core::{ByteOrder, NativeElement, NdtagError};

use crate::error::Result;

/// Seekable byte storage with byte-order-aware scalar accessors
///
/// The byte order applies to every multi-byte value read or written
/// afterwards; single bytes are never reordered. It defaults to
/// [`ByteOrder::BigEndian`].
pub trait RandomAccess {
    /// Byte order of multi-byte scalars
    fn byte_order(&self) -> ByteOrder;

    /// Change the byte order of subsequent multi-byte scalars
    fn set_byte_order(&mut self, order: ByteOrder);

    /// Read up to `buf.len()` bytes; returns 0 at the end
    fn read(&mut self, buf: &mut [u8]) -> Result<usize>;

    /// Fill `buf` completely or fail with an `UnexpectedEof` I/O error
    fn read_fully(&mut self, buf: &mut [u8]) -> Result<()>;

    /// Write all of `buf` at the current position
    fn write_all(&mut self, buf: &[u8]) -> Result<()>;

    /// Current position
    fn file_pointer(&mut self) -> Result<u64>;

    /// Move to absolute position `pos`
    fn seek(&mut self, pos: u64) -> Result<()>;

    /// Current length in bytes
    fn length(&self) -> Result<u64>;

    /// Truncate or extend to `len` bytes
    fn set_length(&mut self, len: u64) -> Result<()>;

    /// Remember the current position for [`RandomAccess::reset`]
    fn mark(&mut self) -> Result<()>;

    /// Return to the marked position; `IllegalState` if nothing is marked
    fn reset(&mut self) -> Result<()>;

    /// Push buffered writes to the storage
    fn flush(&mut self) -> Result<()>;

    /// Force contents to durable storage
    fn synchronize(&mut self) -> Result<()>;

    /// Advance by up to `n` bytes without passing the end
    ///
    /// Returns the number of bytes actually skipped.
    fn skip_bytes(&mut self, n: u64) -> Result<u64> {
        let pos = self.file_pointer()?;
        let len = self.length()?;
        let target = pos.saturating_add(n).min(len).max(pos);
        self.seek(target)?;
        Ok(target - pos)
    }

    /// Bytes between the current position and the end
    fn available(&mut self) -> Result<u64> {
        let pos = self.file_pointer()?;
        Ok(self.length()?.saturating_sub(pos))
    }

    fn read_u8(&mut self) -> Result<u8> {
        let mut byte = [0u8; 1];
        self.read_fully(&mut byte)?;
        Ok(byte[0])
    }

    fn read_i8(&mut self) -> Result<i8> {
        Ok(self.read_u8()? as i8)
    }

    fn read_bool(&mut self) -> Result<bool> {
        Ok(self.read_u8()? != 0)
    }

    fn read_i16(&mut self) -> Result<i16> {
        self.read_scalar()
    }

    fn read_u16(&mut self) -> Result<u16> {
        self.read_scalar()
    }

    /// Read one UTF-16 code unit
    fn read_char(&mut self) -> Result<u16> {
        self.read_scalar()
    }

    fn read_i32(&mut self) -> Result<i32> {
        self.read_scalar()
    }

    fn read_i64(&mut self) -> Result<i64> {
        self.read_scalar()
    }

    fn read_f32(&mut self) -> Result<f32> {
        self.read_scalar()
    }

    fn read_f64(&mut self) -> Result<f64> {
        self.read_scalar()
    }

    /// Read a string stored as a `u16` byte length followed by UTF-8 bytes
    fn read_utf(&mut self) -> Result<String> {
        let len = self.read_u16()? as usize;
        let mut bytes = vec![0u8; len];
        self.read_fully(&mut bytes)?;
        String::from_utf8(bytes)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err).into())
    }

    /// Read one value stored in the configured byte order
    fn read_scalar<T: NativeElement>(&mut self) -> Result<T> {
        let mut value = T::default();
        self.read_fully(bytemuck::bytes_of_mut(&mut value))?;
        Ok(value.to_host(self.byte_order()))
    }

    /// Read `count` consecutive values stored in the configured byte order
    fn read_array<T: NativeElement>(&mut self, count: usize) -> Result<Vec<T>> {
        let byte_len = count
            .checked_mul(T::WIDTH as usize)
            .ok_or(NdtagError::ArraySizeOverflow)?;
        let available = self.available()?;
        if byte_len as u64 > available {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("need {byte_len} bytes for {count} elements, only {available} left"),
            )
            .into());
        }
        let mut values = vec![T::default(); count];
        self.read_fully(bytemuck::cast_slice_mut(&mut values))?;

        let order = self.byte_order();
        if order.needs_swap() {
            for value in values.iter_mut() {
                *value = value.to_host(order);
            }
        }
        Ok(values)
    }

    fn write_u8(&mut self, value: u8) -> Result<()> {
        self.write_all(&[value])
    }

    fn write_i8(&mut self, value: i8) -> Result<()> {
        self.write_u8(value as u8)
    }

    fn write_bool(&mut self, value: bool) -> Result<()> {
        self.write_u8(value as u8)
    }

    fn write_i16(&mut self, value: i16) -> Result<()> {
        self.write_scalar(value)
    }

    fn write_u16(&mut self, value: u16) -> Result<()> {
        self.write_scalar(value)
    }

    /// Write one UTF-16 code unit
    fn write_char(&mut self, value: u16) -> Result<()> {
        self.write_scalar(value)
    }

    fn write_i32(&mut self, value: i32) -> Result<()> {
        self.write_scalar(value)
    }

    fn write_i64(&mut self, value: i64) -> Result<()> {
        self.write_scalar(value)
    }

    fn write_f32(&mut self, value: f32) -> Result<()> {
        self.write_scalar(value)
    }

    fn write_f64(&mut self, value: f64) -> Result<()> {
        self.write_scalar(value)
    }

    /// Write a string as a `u16` byte length followed by its UTF-8 bytes
    ///
    /// Strings longer than 65535 bytes fail with an `InvalidInput` I/O error.
    fn write_utf(&mut self, value: &str) -> Result<()> {
        let len = u16::try_from(value.len()).map_err(|_| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("string of {} bytes is too long", value.len()),
            )
        })?;
        self.write_u16(len)?;
        self.write_all(value.as_bytes())
    }

    /// Write one value in the configured byte order
    fn write_scalar<T: NativeElement>(&mut self, value: T) -> Result<()> {
        let value = value.to_order(self.byte_order());
        self.write_all(bytemuck::bytes_of(&value))
    }

    /// Write consecutive values in the configured byte order
    fn write_array<T: NativeElement>(&mut self, values: &[T]) -> Result<()> {
        let order = self.byte_order();
        if !order.needs_swap() {
            return self.write_all(bytemuck::cast_slice(values));
        }
        let swapped: Vec<T> = values.iter().map(|value| value.to_order(order)).collect();
        self.write_all(bytemuck::cast_slice(&swapped))
    }
}
