//! HashFS header parsing

use crate::catalog::CatalogRecord;
use crate::{Error, Result};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Read, Write};

/// HashFS archive signature ('SCS#')
pub const HASHFS_MAGIC: u32 = 0x2353_4353;

/// Hash method tag for CityHash64 ('CITY')
pub const HASH_METHOD_CITY: u32 = 0x5954_4943;

/// The only HashFS version this library understands
pub const SUPPORTED_VERSION: u16 = 1;

/// Serialized header size in bytes
pub const HEADER_SIZE: u64 = 20;

/// Main HashFS header structure
#[derive(Debug, Clone)]
pub struct HashFsHeader {
    /// Format version
    pub version: u16,
    /// Hash salt (normally zero)
    pub salt: u16,
    /// Number of catalog records
    pub entry_count: u32,
    /// Byte offset of the catalog within the file
    pub catalog_offset: u32,
}

impl HashFsHeader {
    /// Read and validate a HashFS header from the given reader
    pub fn read<R: Read>(reader: &mut R) -> Result<Self> {
        let magic = reader.read_u32::<LittleEndian>()?;
        if magic != HASHFS_MAGIC {
            return Err(Error::invalid_format(format!(
                "bad archive signature 0x{magic:08X}"
            )));
        }

        let version = reader.read_u16::<LittleEndian>()?;
        if version != SUPPORTED_VERSION {
            return Err(Error::UnsupportedVersion(version));
        }

        let salt = reader.read_u16::<LittleEndian>()?;

        let hash_method = reader.read_u32::<LittleEndian>()?;
        if hash_method != HASH_METHOD_CITY {
            return Err(Error::invalid_format(format!(
                "unknown hash method 0x{hash_method:08X}"
            )));
        }

        let entry_count = reader.read_u32::<LittleEndian>()?;
        let catalog_offset = reader.read_u32::<LittleEndian>()?;

        Ok(Self {
            version,
            salt,
            entry_count,
            catalog_offset,
        })
    }

    /// Write the header in its serialized form
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_u32::<LittleEndian>(HASHFS_MAGIC)?;
        writer.write_u16::<LittleEndian>(self.version)?;
        writer.write_u16::<LittleEndian>(self.salt)?;
        writer.write_u32::<LittleEndian>(HASH_METHOD_CITY)?;
        writer.write_u32::<LittleEndian>(self.entry_count)?;
        writer.write_u32::<LittleEndian>(self.catalog_offset)?;
        Ok(())
    }

    /// Byte offset of the catalog record at `index` within the file
    pub fn record_offset(&self, index: usize) -> u64 {
        self.catalog_offset as u64 + (index as u64) * CatalogRecord::RECORD_SIZE as u64
    }
}
