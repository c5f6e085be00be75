//! Catalog record codec for HashFS archives
//!
//! Every entry is described by one fixed 32-byte little-endian record. The
//! record size is a hard format invariant: the encoder refuses to produce
//! anything else, so a layout mistake surfaces as an error before a single
//! byte reaches an archive.

use crate::{Error, Result};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

/// Catalog record (32 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogRecord {
    /// CityHash64 of the entry's archive path
    pub hash: u64,
    /// Byte offset of the payload within the file
    pub offset: u64,
    /// Entry-kind tag
    pub kind: u32,
    /// CRC-32 (IEEE) over the uncompressed payload
    pub crc: u32,
    /// Uncompressed payload length
    pub size: u32,
    /// Stored payload length
    pub compressed_size: u32,
}

impl CatalogRecord {
    /// Serialized record size; any other length is a fatal format defect
    pub const RECORD_SIZE: usize = 32;

    // Kind constants
    /// Entry is a directory listing rather than file content
    pub const KIND_DIRECTORY: u32 = 0x1;
    /// Payload is a zlib stream
    pub const KIND_COMPRESSED: u32 = 0x2;
    /// Payload was rewritten after the archive was originally packed
    pub const KIND_COPY: u32 = 0x4;
    /// Kind written for repacked file payloads
    pub const KIND_COMPRESSED_COPY: u32 = Self::KIND_COMPRESSED | Self::KIND_COPY;

    /// Check if the entry is a directory listing
    pub fn is_directory(&self) -> bool {
        (self.kind & Self::KIND_DIRECTORY) != 0
    }

    /// Check if the payload is compressed
    pub fn is_compressed(&self) -> bool {
        (self.kind & Self::KIND_COMPRESSED) != 0
    }

    /// Check if the payload was rewritten in place
    pub fn is_copy(&self) -> bool {
        (self.kind & Self::KIND_COPY) != 0
    }

    /// Length of the payload as stored in the data region
    pub fn stored_len(&self) -> u64 {
        if self.is_compressed() {
            self.compressed_size as u64
        } else {
            self.size as u64
        }
    }

    /// Read a catalog record from raw bytes
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < Self::RECORD_SIZE {
            return Err(Error::invalid_format("catalog record too small"));
        }

        let mut cursor = std::io::Cursor::new(data);
        Ok(Self {
            hash: cursor.read_u64::<LittleEndian>()?,
            offset: cursor.read_u64::<LittleEndian>()?,
            kind: cursor.read_u32::<LittleEndian>()?,
            crc: cursor.read_u32::<LittleEndian>()?,
            size: cursor.read_u32::<LittleEndian>()?,
            compressed_size: cursor.read_u32::<LittleEndian>()?,
        })
    }

    /// Serialize the record, enforcing the exact 32-byte layout
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(Self::RECORD_SIZE);
        buf.write_u64::<LittleEndian>(self.hash)?;
        buf.write_u64::<LittleEndian>(self.offset)?;
        buf.write_u32::<LittleEndian>(self.kind)?;
        buf.write_u32::<LittleEndian>(self.crc)?;
        buf.write_u32::<LittleEndian>(self.size)?;
        buf.write_u32::<LittleEndian>(self.compressed_size)?;

        if buf.len() != Self::RECORD_SIZE {
            return Err(Error::RecordSize {
                expected: Self::RECORD_SIZE,
                actual: buf.len(),
            });
        }

        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_record() -> CatalogRecord {
        CatalogRecord {
            hash: 0x0123_4567_89AB_CDEF,
            offset: 0x1000,
            kind: CatalogRecord::KIND_COMPRESSED,
            crc: 0xDEAD_BEEF,
            size: 512,
            compressed_size: 300,
        }
    }

    #[test]
    fn test_record_serializes_to_exactly_32_bytes() {
        let encoded = sample_record().to_bytes().unwrap();
        assert_eq!(encoded.len(), CatalogRecord::RECORD_SIZE);
    }

    #[test]
    fn test_record_round_trip() {
        let record = sample_record();
        let encoded = record.to_bytes().unwrap();
        let decoded = CatalogRecord::from_bytes(&encoded).unwrap();
        assert_eq!(decoded, record);
    }

    #[test]
    fn test_record_layout_is_little_endian() {
        let record = CatalogRecord {
            hash: 0x1122_3344_5566_7788,
            offset: 0xAA,
            kind: CatalogRecord::KIND_COMPRESSED_COPY,
            crc: 0x0102_0304,
            size: 1,
            compressed_size: 2,
        };
        let encoded = record.to_bytes().unwrap();

        assert_eq!(&encoded[0..8], &[0x88, 0x77, 0x66, 0x55, 0x44, 0x33, 0x22, 0x11]);
        assert_eq!(&encoded[8..16], &[0xAA, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(&encoded[16..20], &[0x06, 0, 0, 0]);
        assert_eq!(&encoded[20..24], &[0x04, 0x03, 0x02, 0x01]);
        assert_eq!(&encoded[24..28], &[1, 0, 0, 0]);
        assert_eq!(&encoded[28..32], &[2, 0, 0, 0]);
    }

    #[test]
    fn test_truncated_record_rejected() {
        let encoded = sample_record().to_bytes().unwrap();
        let err = CatalogRecord::from_bytes(&encoded[..31]).unwrap_err();
        assert!(matches!(err, Error::InvalidFormat(_)));
    }

    #[test]
    fn test_kind_accessors() {
        let stored = CatalogRecord {
            kind: 0,
            ..sample_record()
        };
        assert!(!stored.is_directory());
        assert!(!stored.is_compressed());
        assert!(!stored.is_copy());
        assert_eq!(stored.stored_len(), stored.size as u64);

        let listing = CatalogRecord {
            kind: CatalogRecord::KIND_DIRECTORY | CatalogRecord::KIND_COMPRESSED,
            ..sample_record()
        };
        assert!(listing.is_directory());
        assert!(listing.is_compressed());
        assert_eq!(listing.stored_len(), listing.compressed_size as u64);

        let repacked = CatalogRecord {
            kind: CatalogRecord::KIND_COMPRESSED_COPY,
            ..sample_record()
        };
        assert!(repacked.is_compressed());
        assert!(repacked.is_copy());
        assert!(!repacked.is_directory());
    }
}
