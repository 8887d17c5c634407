use std::io;

use ndtag_core::{ByteOrder, NdtagError};

use super::RandomAccess;
use crate::error::Result;

fn to_index(pos: u64) -> Result<usize> {
    usize::try_from(pos).map_err(|_| NdtagError::IndexOutOfRange.into())
}

/// In-memory [`RandomAccess`] over an owned byte buffer
///
/// The readable region is `[0, limit)`. Writes past the limit extend it,
/// growing the storage as needed.
#[derive(Debug, Clone, Default)]
pub struct ByteBufferRandomAccess {
    buf: Vec<u8>,
    position: usize,
    limit: usize,
    mark: Option<usize>,
    order: ByteOrder,
}

impl ByteBufferRandomAccess {
    /// Empty buffer with room for `capacity` bytes; the length starts at 0
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: vec![0; capacity],
            ..Self::default()
        }
    }

    /// Wrap `buf`; its whole content is readable
    pub fn from_vec(buf: Vec<u8>) -> Self {
        let limit = buf.len();
        Self {
            buf,
            limit,
            ..Self::default()
        }
    }

    /// Wrap `buf` with an initial length of `len` bytes
    ///
    /// A `len` beyond the buffer zero-fills the difference.
    pub fn from_vec_with_length(mut buf: Vec<u8>, len: usize) -> Self {
        if len > buf.len() {
            buf.resize(len, 0);
        }
        Self {
            buf,
            limit: len,
            ..Self::default()
        }
    }

    /// Readable content, `[0, length)`
    pub fn as_slice(&self) -> &[u8] {
        &self.buf[..self.limit]
    }

    /// Unwrap the readable content
    pub fn into_inner(mut self) -> Vec<u8> {
        self.buf.truncate(self.limit);
        self.buf
    }

    fn remaining(&self) -> usize {
        self.limit.saturating_sub(self.position)
    }
}

impl RandomAccess for ByteBufferRandomAccess {
    fn byte_order(&self) -> ByteOrder {
        self.order
    }

    fn set_byte_order(&mut self, order: ByteOrder) {
        self.order = order;
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        let n = buf.len().min(self.remaining());
        buf[..n].copy_from_slice(&self.buf[self.position..self.position + n]);
        self.position += n;
        Ok(n)
    }

    fn read_fully(&mut self, buf: &mut [u8]) -> Result<()> {
        if buf.len() > self.remaining() {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!(
                    "need {} bytes at position {}, only {} left",
                    buf.len(),
                    self.position,
                    self.remaining()
                ),
            )
            .into());
        }
        self.read(buf)?;
        Ok(())
    }

    fn write_all(&mut self, buf: &[u8]) -> Result<()> {
        let end = self
            .position
            .checked_add(buf.len())
            .ok_or(NdtagError::ArraySizeOverflow)?;
        if end > self.buf.len() {
            self.buf.resize(end, 0);
        }
        self.buf[self.position..end].copy_from_slice(buf);
        self.position = end;
        self.limit = self.limit.max(end);
        Ok(())
    }

    fn file_pointer(&mut self) -> Result<u64> {
        Ok(self.position as u64)
    }

    fn seek(&mut self, pos: u64) -> Result<()> {
        let pos = to_index(pos)?;
        if pos > self.limit {
            return Err(NdtagError::IndexOutOfRange.into());
        }
        self.position = pos;
        Ok(())
    }

    fn length(&self) -> Result<u64> {
        Ok(self.limit as u64)
    }

    fn set_length(&mut self, len: u64) -> Result<()> {
        let len = to_index(len)?;
        if len > self.buf.len() {
            self.buf.resize(len, 0);
        }
        if len > self.limit {
            self.buf[self.limit..len].fill(0);
        }
        self.limit = len;
        self.position = self.position.min(len);
        if self.mark.is_some_and(|mark| mark > len) {
            self.mark = None;
        }
        Ok(())
    }

    fn mark(&mut self) -> Result<()> {
        self.mark = Some(self.position);
        Ok(())
    }

    fn reset(&mut self) -> Result<()> {
        self.position = self.mark.ok_or(NdtagError::IllegalState)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn synchronize(&mut self) -> Result<()> {
        Ok(())
    }
}
