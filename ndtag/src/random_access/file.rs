use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

use log::debug;
use ndtag_core::{ByteOrder, NdtagError};

use super::RandomAccess;
use crate::error::Result;

/// File-backed [`RandomAccess`]
///
/// Every failure of the underlying file is returned as [`crate::Error::Io`]
/// with the original error kept as its source.
#[derive(Debug)]
pub struct FileRandomAccess {
    file: File,
    order: ByteOrder,
    mark: Option<u64>,
}

impl FileRandomAccess {
    /// Open an existing file read-only
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        debug!("opened {} read-only", path.display());
        Ok(Self::from_file(file))
    }

    /// Open a file for reading and writing, creating it if missing
    pub fn open_read_write<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)?;
        debug!("opened {} read-write", path.display());
        Ok(Self::from_file(file))
    }

    /// Wrap an already opened file
    pub fn from_file(file: File) -> Self {
        Self {
            file,
            order: ByteOrder::default(),
            mark: None,
        }
    }

    /// Unwrap the underlying file
    pub fn into_inner(self) -> File {
        self.file
    }
}

impl RandomAccess for FileRandomAccess {
    fn byte_order(&self) -> ByteOrder {
        self.order
    }

    fn set_byte_order(&mut self, order: ByteOrder) {
        self.order = order;
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        Ok(self.file.read(buf)?)
    }

    fn read_fully(&mut self, buf: &mut [u8]) -> Result<()> {
        Ok(self.file.read_exact(buf)?)
    }

    fn write_all(&mut self, buf: &[u8]) -> Result<()> {
        Ok(self.file.write_all(buf)?)
    }

    fn file_pointer(&mut self) -> Result<u64> {
        Ok(self.file.stream_position()?)
    }

    fn seek(&mut self, pos: u64) -> Result<()> {
        self.file.seek(SeekFrom::Start(pos))?;
        Ok(())
    }

    fn length(&self) -> Result<u64> {
        Ok(self.file.metadata()?.len())
    }

    fn set_length(&mut self, len: u64) -> Result<()> {
        self.file.set_len(len)?;
        if self.file_pointer()? > len {
            self.seek(len)?;
        }
        if self.mark.is_some_and(|mark| mark > len) {
            self.mark = None;
        }
        Ok(())
    }

    fn mark(&mut self) -> Result<()> {
        self.mark = Some(self.file_pointer()?);
        Ok(())
    }

    fn reset(&mut self) -> Result<()> {
        let mark = self.mark.ok_or(NdtagError::IllegalState)?;
        self.seek(mark)
    }

    fn flush(&mut self) -> Result<()> {
        Ok(self.file.flush()?)
    }

    fn synchronize(&mut self) -> Result<()> {
        Ok(self.file.sync_all()?)
    }
}
