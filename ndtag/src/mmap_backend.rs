//! Memory-mapped tagged array files
//!
//! A tagged array file holds exactly one tagged buffer: the 8 byte header
//! followed by the payload. Opening a file reads only the header; the payload
//! is mapped read-only when it is decoded.

use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};

use log::debug;
use memmap2::{Mmap, MmapOptions};
use ndtag_core::codec::detect_encoding;
use ndtag_core::{ByteOrder, EncodingHeader, NativeArrayEncoding, NativeElement, NdtagError};

use crate::codec::{DynamicArray, NativeCodec};
use crate::error::{Error, Result};

/// Handle on a file containing one tagged array
#[derive(Debug, Clone)]
pub struct EncodedArrayFile {
    path: PathBuf,
    encoding: NativeArrayEncoding,
}

impl EncodedArrayFile {
    /// Encode `data` with its payload in `order` and write it to `path`
    pub fn write<P: AsRef<Path>, T: NativeElement>(
        path: P,
        data: &[T],
        order: ByteOrder,
    ) -> Result<Self> {
        let path = path.as_ref();
        let encoding = T::natural_encoding(order).ok_or(NdtagError::UnsupportedEncoding)?;
        let bytes = NativeCodec::default().encode_with_order(data, order)?;
        std::fs::write(path, &bytes)?;
        debug!(
            "wrote {} elements as {encoding} ({} bytes) to {}",
            data.len(),
            bytes.len(),
            path.display()
        );
        Ok(Self {
            path: path.to_path_buf(),
            encoding,
        })
    }

    /// Open a tagged array file, detecting its encoding from the header
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let header = read_header(path)?;
        let encoding = detect_encoding(&header).ok_or(NdtagError::NotAnEncodedArray)?;
        debug!("opened {} as {encoding}", path.display());
        Ok(Self {
            path: path.to_path_buf(),
            encoding,
        })
    }

    /// Open a tagged array file of known encoding; the header must match
    pub fn open_with<P: AsRef<Path>>(path: P, encoding: NativeArrayEncoding) -> Result<Self> {
        let path = path.as_ref();
        let header = EncodingHeader::from_bytes(&read_header(path)?)?;
        if header.magic != encoding.magic() {
            return Err(NdtagError::NotAnEncodedArray.into());
        }
        debug!("opened {} as {encoding}", path.display());
        Ok(Self {
            path: path.to_path_buf(),
            encoding,
        })
    }

    /// Encoding named by the file header
    pub fn encoding(&self) -> NativeArrayEncoding {
        self.encoding
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Map the file and decode its payload into host-order values
    pub fn read<T: NativeElement>(&self) -> Result<Vec<T>> {
        let mmap = self.map()?;
        NativeCodec::default().decode_with(self.encoding, &mmap)
    }

    /// Map the file and decode it into the variant matching its encoding
    pub fn read_dynamic(&self) -> Result<DynamicArray> {
        let mmap = self.map()?;
        NativeCodec::default().decode_dynamic_with(self.encoding, &mmap)
    }

    fn map(&self) -> Result<Mmap> {
        let file = File::open(&self.path)?;
        // SAFETY: read-only mapping, only alive while it is decoded into owned values
        let mmap = unsafe { MmapOptions::new().map(&file)? };
        debug!("mapped {} bytes of {}", mmap.len(), self.path.display());
        Ok(mmap)
    }
}

/// Read the first 8 bytes of `path`
///
/// Shorter files are not tagged arrays.
fn read_header(path: &Path) -> Result<[u8; EncodingHeader::SIZE]> {
    let mut file = File::open(path)?;
    let mut header = [0u8; EncodingHeader::SIZE];
    file.read_exact(&mut header).map_err(|err| match err.kind() {
        ErrorKind::UnexpectedEof => Error::from(NdtagError::NotAnEncodedArray),
        _ => Error::from(err),
    })?;
    Ok(header)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_open_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("values.ndt");
        let data = [1.5f32, -2.0, 1e-3];

        let written = EncodedArrayFile::write(&path, &data, ByteOrder::LittleEndian).unwrap();
        assert_eq!(written.encoding(), NativeArrayEncoding::Float32LittleEndian);

        let file = EncodedArrayFile::open(&path).unwrap();
        assert_eq!(file.encoding(), NativeArrayEncoding::Float32LittleEndian);
        assert_eq!(file.path(), path.as_path());
        assert_eq!(file.read::<f32>().unwrap(), data);
        assert_eq!(file.read_dynamic().unwrap(), DynamicArray::F32(data.to_vec()));
        assert_eq!(
            file.read::<f64>().unwrap_err().core_error(),
            Some(NdtagError::TypeMismatch)
        );
    }

    #[test]
    fn test_empty_array_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.ndt");
        EncodedArrayFile::write::<_, i64>(&path, &[], ByteOrder::BigEndian).unwrap();
        let file = EncodedArrayFile::open(&path).unwrap();
        assert!(file.read::<i64>().unwrap().is_empty());
    }

    #[test]
    fn test_int8_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bytes.ndt");
        EncodedArrayFile::write(&path, &[-1i8, 0, 1], ByteOrder::BigEndian).unwrap();

        let file = EncodedArrayFile::open(&path).unwrap();
        assert_eq!(file.encoding(), NativeArrayEncoding::Int8Native);
        assert_eq!(file.read::<i8>().unwrap(), vec![-1, 0, 1]);

        let file = EncodedArrayFile::open_with(&path, NativeArrayEncoding::Int8Native).unwrap();
        assert_eq!(file.read::<i8>().unwrap(), vec![-1, 0, 1]);
        assert_eq!(file.read_dynamic().unwrap(), DynamicArray::I8(vec![-1, 0, 1]));

        assert!(EncodedArrayFile::open_with(&path, NativeArrayEncoding::Int16BigEndian)
            .unwrap_err()
            .is_not_encoded());
    }

    #[test]
    fn test_foreign_and_short_files() {
        let dir = tempdir().unwrap();
        let short = dir.path().join("short.bin");
        std::fs::write(&short, b"IL\x04").unwrap();
        assert!(EncodedArrayFile::open(&short).unwrap_err().is_not_encoded());
        assert!(EncodedArrayFile::open_with(&short, NativeArrayEncoding::Int32LittleEndian)
            .unwrap_err()
            .is_not_encoded());

        let empty = dir.path().join("empty.bin");
        std::fs::write(&empty, b"").unwrap();
        assert!(EncodedArrayFile::open(&empty).unwrap_err().is_not_encoded());

        let foreign = dir.path().join("foreign.txt");
        std::fs::write(&foreign, b"hello, world").unwrap();
        assert!(EncodedArrayFile::open(&foreign).unwrap_err().is_not_encoded());

        let missing = dir.path().join("missing.ndt");
        assert!(matches!(
            EncodedArrayFile::open(&missing),
            Err(crate::Error::Io(_))
        ));
    }
}
