//! # scs_hashfs - SCS HashFS Archive Library
//!
//! A safe Rust reader for the HashFS container format used by SCS Software
//! games (`.scs` archives). HashFS keys every entry by a 64-bit hash of its
//! archive path; human-readable names are reconstructed by walking the
//! directory-listing entries stored inside the archive itself.
//!
//! The library exposes the pieces a repacking tool needs: the parsed catalog
//! (one fixed 32-byte record per entry), each record's own byte offset within
//! the file, and fully decompressed entry payloads.
//!
//! ## Example
//!
//! ```no_run
//! use scs_hashfs::Archive;
//!
//! # fn main() -> Result<(), scs_hashfs::Error> {
//! let mut archive = Archive::open("dlc_oversize.scs")?;
//!
//! for entry in archive.entries() {
//!     if let Some(name) = &entry.name {
//!         println!("{name}");
//!     }
//! }
//!
//! let manifest = archive.read_entry_by_name("manifest.sii")?;
//! # let _ = manifest;
//! # Ok(())
//! # }
//! ```

#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]

pub mod archive;
pub mod catalog;
pub mod compression;
pub mod error;
pub mod hash;
pub mod header;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

// Re-export commonly used types
pub use archive::{Archive, Entry};
pub use catalog::CatalogRecord;
pub use error::{Error, Result};
pub use header::HashFsHeader;

// Re-export hashing and compression for fixture writers and tools
pub use compression::{ZLIB_BEST_HEADER, deflate, inflate};
pub use hash::path_hash;
