//! In-place manifest patching
//!
//! The patcher rewrites the version token inside an archive's manifest
//! entry, recompresses the payload, recomputes its checksum and updates the
//! entry's 32-byte catalog record, all without disturbing the rest of the
//! container. The catalog record never moves; only the payload may be
//! relocated, and only when growing it in place would overwrite the next
//! entry's bytes.

use crate::error::{RepackError, Result};
use crate::manifest::ManifestScanner;
use memchr::memmem;
use scs_hashfs::{Archive, CatalogRecord, compression};
use std::fs::OpenOptions;
use std::io::{Seek, SeekFrom, Write};
use std::path::Path;

/// What happened to one archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchOutcome {
    /// The manifest already carries the target version; nothing was written
    AlreadyCurrent,
    /// The manifest was rewritten
    Updated {
        /// The add-on's display name, for reporting
        display_name: String,
        /// The version token the manifest carried before
        old_version: Vec<u8>,
    },
}

/// Rewrite the manifest entry of one archive to the target version
///
/// No-op when the manifest already matches the target. Every other path
/// either fully patches the file (payload plus catalog record) or fails
/// before the first write.
pub fn repack_archive(
    path: &Path,
    target_version: &[u8],
    manifest_suffix: &str,
    scanner: &ManifestScanner,
) -> Result<PatchOutcome> {
    let mut archive = Archive::open(path).map_err(|e| RepackError::archive(path, e))?;

    let entry = archive
        .entries()
        .iter()
        .find(|e| {
            e.name
                .as_deref()
                .is_some_and(|name| name.ends_with(manifest_suffix))
        })
        .cloned()
        .ok_or_else(|| RepackError::ManifestMissing {
            path: path.to_path_buf(),
        })?;

    let manifest = archive
        .read_entry(&entry)
        .map_err(|e| RepackError::archive(path, e))?;

    let old_version = scanner
        .version(&manifest)
        .ok_or_else(|| RepackError::VersionMissing {
            path: path.to_path_buf(),
        })?
        .to_vec();

    if old_version == target_version {
        log::debug!("{}: already at target version", path.display());
        return Ok(PatchOutcome::AlreadyCurrent);
    }

    let display_name = scanner.display_name(&manifest);
    log::info!(
        "Updating {display_name} ({}) from version {} to version {}...",
        path.file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned()),
        String::from_utf8_lossy(&old_version),
        String::from_utf8_lossy(target_version),
    );

    // Every occurrence of the old token is replaced; manifests repeat the
    // version across several fields.
    let patched = replace_all(&manifest, &old_version, target_version);
    let compressed =
        compression::deflate(&patched).map_err(|e| RepackError::archive(path, e))?;

    // The payload can only grow in place when it is the last one in the
    // data region; anywhere else it would run into the next entry's bytes.
    let largest_offset = archive
        .entries()
        .iter()
        .map(|e| e.record.offset)
        .max()
        .unwrap_or(0);
    let grows = compressed.len() as u64 > entry.record.compressed_size as u64;
    let must_relocate = grows && entry.record.offset != largest_offset;

    drop(archive);

    let mut record = entry.record;
    record.crc = crc32fast::hash(&patched);
    record.size = patched.len() as u32;
    record.compressed_size = compressed.len() as u32;
    record.kind = CatalogRecord::KIND_COMPRESSED_COPY;

    let mut file = OpenOptions::new()
        .read(true)
        .write(true)
        .open(path)
        .map_err(|e| RepackError::io(path, e))?;

    if must_relocate {
        record.offset = file.metadata().map_err(|e| RepackError::io(path, e))?.len();
    }

    // Serialize before touching the file; a record of the wrong size must
    // never reach the archive.
    let encoded = record.to_bytes().map_err(|e| RepackError::archive(path, e))?;

    file.seek(SeekFrom::Start(record.offset))
        .map_err(|e| RepackError::io(path, e))?;
    file.write_all(&compressed)
        .map_err(|e| RepackError::io(path, e))?;

    file.seek(SeekFrom::Start(entry.record_offset))
        .map_err(|e| RepackError::io(path, e))?;
    file.write_all(&encoded)
        .map_err(|e| RepackError::io(path, e))?;

    Ok(PatchOutcome::Updated {
        display_name,
        old_version,
    })
}

/// Replace every non-overlapping occurrence of `needle` in `haystack`
fn replace_all(haystack: &[u8], needle: &[u8], replacement: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(haystack.len());
    let mut last = 0;
    for pos in memmem::find_iter(haystack, needle) {
        out.extend_from_slice(&haystack[last..pos]);
        out.extend_from_slice(replacement);
        last = pos + needle.len();
    }
    out.extend_from_slice(&haystack[last..]);
    out
}
