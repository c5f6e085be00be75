//! Fixture archives for tests
//!
//! Builds small, well-formed HashFS archives from `(path, bytes, compressed)`
//! triples: directory listings are derived from the supplied paths, payloads
//! are laid out after the catalog with listings first and files in insertion
//! order, and every catalog field (hash, CRC, sizes, offsets) is computed the
//! same way a real packer would. Only available in tests and behind the
//! `test-utils` feature.

use crate::{
    Result,
    catalog::CatalogRecord,
    compression,
    hash::path_hash,
    header::{HEADER_SIZE, HashFsHeader, SUPPORTED_VERSION},
};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone)]
struct FixtureFile {
    path: String,
    data: Vec<u8>,
    compressed: bool,
}

/// Builder for fixture archives
#[derive(Debug, Default)]
pub struct FixtureWriter {
    files: Vec<FixtureFile>,
}

impl FixtureWriter {
    /// Create an empty fixture
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one file entry; `compressed` selects zlib storage
    ///
    /// Files are laid out in the data region in insertion order, so the last
    /// file added owns the highest data offset.
    pub fn add_file(mut self, path: &str, data: &[u8], compressed: bool) -> Self {
        self.files.push(FixtureFile {
            path: path.to_string(),
            data: data.to_vec(),
            compressed,
        });
        self
    }

    /// Write the archive to disk
    pub fn write_to(&self, path: &Path) -> Result<()> {
        // Directory listings implied by the file paths; "" is the root.
        let mut listings: BTreeMap<String, Vec<String>> = BTreeMap::new();
        listings.insert(String::new(), Vec::new());

        for file in &self.files {
            let components: Vec<&str> = file.path.split('/').collect();
            let mut parent = String::new();
            for (i, component) in components.iter().enumerate() {
                let is_file = i == components.len() - 1;
                let listed = if is_file {
                    (*component).to_string()
                } else {
                    format!("*{component}")
                };

                let children = listings.entry(parent.clone()).or_default();
                if !children.contains(&listed) {
                    children.push(listed);
                }

                if !is_file {
                    parent = if parent.is_empty() {
                        (*component).to_string()
                    } else {
                        format!("{parent}/{component}")
                    };
                    listings.entry(parent.clone()).or_default();
                }
            }
        }

        struct Pending {
            hash: u64,
            kind: u32,
            crc: u32,
            size: u32,
            payload: Vec<u8>,
        }

        let mut pending = Vec::new();
        for (dir, children) in &listings {
            let mut text = children.join("\n").into_bytes();
            if !text.is_empty() {
                text.push(b'\n');
            }
            pending.push(Pending {
                hash: path_hash(dir),
                kind: CatalogRecord::KIND_DIRECTORY,
                crc: crc32fast::hash(&text),
                size: text.len() as u32,
                payload: text,
            });
        }

        for file in &self.files {
            let (payload, kind) = if file.compressed {
                (compression::deflate(&file.data)?, CatalogRecord::KIND_COMPRESSED)
            } else {
                (file.data.clone(), 0)
            };
            pending.push(Pending {
                hash: path_hash(&file.path),
                kind,
                crc: crc32fast::hash(&file.data),
                size: file.data.len() as u32,
                payload,
            });
        }

        let header = HashFsHeader {
            version: SUPPORTED_VERSION,
            salt: 0,
            entry_count: pending.len() as u32,
            catalog_offset: HEADER_SIZE as u32,
        };

        let mut out = Vec::new();
        header.write(&mut out)?;

        let mut data_offset = HEADER_SIZE
            + pending.len() as u64 * CatalogRecord::RECORD_SIZE as u64;
        let mut records = Vec::with_capacity(pending.len());
        for entry in &pending {
            records.push(CatalogRecord {
                hash: entry.hash,
                offset: data_offset,
                kind: entry.kind,
                crc: entry.crc,
                size: entry.size,
                compressed_size: entry.payload.len() as u32,
            });
            data_offset += entry.payload.len() as u64;
        }

        for record in &records {
            out.extend_from_slice(&record.to_bytes()?);
        }
        for entry in &pending {
            out.extend_from_slice(&entry.payload);
        }

        fs::write(path, out)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Archive;

    #[test]
    fn test_fixture_files_keep_insertion_order_in_data_region() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("order.scs");

        FixtureWriter::new()
            .add_file("first.sii", b"first payload", true)
            .add_file("second.sii", b"second payload", true)
            .write_to(&path)
            .unwrap();

        let archive = Archive::open(&path).unwrap();
        let first = archive.entry_by_name("first.sii").unwrap();
        let second = archive.entry_by_name("second.sii").unwrap();
        assert!(first.record.offset < second.record.offset);

        let max_offset = archive
            .entries()
            .iter()
            .map(|e| e.record.offset)
            .max()
            .unwrap();
        assert_eq!(second.record.offset, max_offset);
    }

    #[test]
    fn test_nested_directories_resolve() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested.scs");

        FixtureWriter::new()
            .add_file("def/vehicle/truck.sii", b"truck", false)
            .write_to(&path)
            .unwrap();

        let mut archive = Archive::open(&path).unwrap();
        assert_eq!(archive.read_entry_by_name("def/vehicle/truck.sii").unwrap(), b"truck");
    }
}
