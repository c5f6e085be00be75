//! HashFS archive reading
//!
//! This module provides the main [`Archive`] type for reading `.scs` files.
//! Opening an archive parses the header and the full catalog, then resolves
//! entry names by walking the directory-listing entries from the root
//! directory (the hash of the empty path). Entries that are not reachable
//! from the root listing keep `name == None`.

use crate::{
    Error, Result,
    catalog::CatalogRecord,
    compression,
    hash::path_hash,
    header::HashFsHeader,
};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

/// Logical view of one archive member
#[derive(Debug, Clone)]
pub struct Entry {
    /// Archive path resolved from the directory listings, if reachable
    pub name: Option<String>,
    /// The entry's catalog record
    pub record: CatalogRecord,
    /// Byte offset of the record itself within the archive file
    pub record_offset: u64,
}

impl Entry {
    /// Entry name, or the record hash in hex for unnamed entries
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("<{:016x}>", self.record.hash),
        }
    }
}

/// A HashFS archive opened for reading
#[derive(Debug)]
pub struct Archive {
    path: PathBuf,
    reader: BufReader<File>,
    header: HashFsHeader,
    entries: Vec<Entry>,
}

impl Archive {
    /// Open an archive and parse its catalog
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path)?;
        let mut reader = BufReader::new(file);

        let header = HashFsHeader::read(&mut reader)?;

        reader.seek(SeekFrom::Start(header.catalog_offset as u64))?;
        let catalog_len = header.entry_count as usize * CatalogRecord::RECORD_SIZE;
        let mut raw = vec![0u8; catalog_len];
        reader.read_exact(&mut raw)?;

        let mut entries = Vec::with_capacity(header.entry_count as usize);
        for index in 0..header.entry_count as usize {
            let start = index * CatalogRecord::RECORD_SIZE;
            let record = CatalogRecord::from_bytes(&raw[start..start + CatalogRecord::RECORD_SIZE])?;
            entries.push(Entry {
                name: None,
                record,
                record_offset: header.record_offset(index),
            });
        }

        let mut archive = Self {
            path,
            reader,
            header,
            entries,
        };
        archive.resolve_names()?;
        Ok(archive)
    }

    /// Path the archive was opened from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The parsed archive header
    pub fn header(&self) -> &HashFsHeader {
        &self.header
    }

    /// All catalog entries, in catalog order
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Find the entry for an exact archive path
    pub fn entry_by_name(&self, name: &str) -> Option<&Entry> {
        let hash = path_hash(name);
        self.entries.iter().find(|e| e.record.hash == hash)
    }

    /// Read and fully decompress one entry's payload
    pub fn read_entry(&mut self, entry: &Entry) -> Result<Vec<u8>> {
        Self::read_payload(&mut self.reader, &entry.record, &entry.display_name())
    }

    /// Read an entry's payload by its exact archive path
    pub fn read_entry_by_name(&mut self, name: &str) -> Result<Vec<u8>> {
        let entry = self
            .entry_by_name(name)
            .cloned()
            .ok_or_else(|| Error::EntryNotFound(name.to_string()))?;
        self.read_entry(&entry)
    }

    fn read_payload(
        reader: &mut BufReader<File>,
        record: &CatalogRecord,
        label: &str,
    ) -> Result<Vec<u8>> {
        reader.seek(SeekFrom::Start(record.offset))?;
        let mut stored = vec![0u8; record.stored_len() as usize];
        reader.read_exact(&mut stored)?;

        if !record.is_compressed() {
            return Ok(stored);
        }

        let data = compression::inflate(&stored, record.size as usize)?;
        if data.len() as u64 != record.size as u64 {
            return Err(Error::SizeMismatch {
                name: label.to_string(),
                expected: record.size as u64,
                actual: data.len() as u64,
            });
        }
        Ok(data)
    }

    /// Walk directory listings from the root and assign entry names
    fn resolve_names(&mut self) -> Result<()> {
        let index_by_hash: HashMap<u64, usize> = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.record.hash, i))
            .collect();

        let Some(&root) = index_by_hash.get(&path_hash("")) else {
            // Archives without a root listing carry only anonymous entries
            log::debug!("{}: no root directory listing", self.path.display());
            return Ok(());
        };

        let mut worklist = vec![(String::new(), root)];
        while let Some((dir_path, dir_index)) = worklist.pop() {
            let record = self.entries[dir_index].record;
            if !record.is_directory() {
                return Err(Error::invalid_format(format!(
                    "listing entry for {dir_path:?} is not a directory"
                )));
            }

            let label = if dir_path.is_empty() {
                "<root>"
            } else {
                dir_path.as_str()
            };
            let listing = Self::read_payload(&mut self.reader, &record, label)?;

            for line in listing.split(|&b| b == b'\n') {
                let line = match line.last() {
                    Some(&b'\r') => &line[..line.len() - 1],
                    _ => line,
                };
                if line.is_empty() {
                    continue;
                }

                let name = String::from_utf8_lossy(line);
                let (child_name, is_dir) = match name.strip_prefix('*') {
                    Some(dir_name) => (dir_name, true),
                    None => (name.as_ref(), false),
                };

                let child_path = if dir_path.is_empty() {
                    child_name.to_string()
                } else {
                    format!("{dir_path}/{child_name}")
                };

                let Some(&child_index) = index_by_hash.get(&path_hash(&child_path)) else {
                    log::warn!(
                        "{}: listed entry {child_path:?} has no catalog record",
                        self.path.display()
                    );
                    continue;
                };

                self.entries[child_index].name = Some(child_path.clone());
                if is_dir {
                    worklist.push((child_path, child_index));
                }
            }
        }

        Ok(())
    }
}
