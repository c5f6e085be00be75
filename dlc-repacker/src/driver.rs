//! Folder-level repack driver
//!
//! Resolves the target version once, then feeds every add-on archive in the
//! folder through the patcher. Archives are independent of each other; they
//! are processed strictly one at a time, in sorted name order.

use crate::config::RepackConfig;
use crate::error::{RepackError, Result};
use crate::manifest::ManifestScanner;
use crate::patcher::{PatchOutcome, repack_archive};
use crate::resolver::resolve_reference_version;
use std::fs;
use std::path::Path;

/// What the driver does when one archive fails
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Stop the whole run on the first failing archive
    Abort,
    /// Log the failure and continue with the remaining archives
    SkipFile,
}

/// Counts for a completed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepackSummary {
    /// The version every archive was aligned to
    pub target_version: Vec<u8>,
    /// Archives rewritten
    pub updated: usize,
    /// Archives that already carried the target version
    pub already_current: usize,
    /// Archives skipped after a failure (only under [`ErrorPolicy::SkipFile`])
    pub failed: usize,
}

/// Result of a driver run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriverOutcome {
    /// No known add-on archive was found; nothing was touched
    NoReference,
    /// The folder was processed
    Completed(RepackSummary),
}

/// Align every add-on archive in `folder` to the installation's version
pub fn repack_folder(
    folder: &Path,
    config: &RepackConfig,
    scanner: &ManifestScanner,
    policy: ErrorPolicy,
) -> Result<DriverOutcome> {
    if !folder.is_dir() {
        return Err(RepackError::FolderMissing {
            path: folder.to_path_buf(),
        });
    }

    log::info!("Repacking DLC files in {}...", folder.display());

    let Some(target_version) = resolve_reference_version(folder, config, scanner)? else {
        return Ok(DriverOutcome::NoReference);
    };

    let mut names = Vec::new();
    let dir = fs::read_dir(folder).map_err(|e| RepackError::io(folder, e))?;
    for dir_entry in dir {
        let dir_entry = dir_entry.map_err(|e| RepackError::io(folder, e))?;
        let file_type = dir_entry
            .file_type()
            .map_err(|e| RepackError::io(dir_entry.path(), e))?;
        if file_type.is_dir() {
            continue;
        }

        let name = dir_entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if config.matches_archive_name(name) {
            names.push(name.to_string());
        }
    }
    names.sort();

    let mut summary = RepackSummary {
        target_version: target_version.clone(),
        updated: 0,
        already_current: 0,
        failed: 0,
    };

    for name in names {
        let path = folder.join(&name);
        match repack_archive(&path, &target_version, &config.manifest_suffix, scanner) {
            Ok(PatchOutcome::Updated { .. }) => summary.updated += 1,
            Ok(PatchOutcome::AlreadyCurrent) => summary.already_current += 1,
            Err(e) => match policy {
                ErrorPolicy::Abort => return Err(e),
                ErrorPolicy::SkipFile => {
                    log::error!("skipping {name}: {e}");
                    summary.failed += 1;
                }
            },
        }
    }

    log::info!(
        "Updated all DLC files to version {} ({} rewritten, {} already current).",
        String::from_utf8_lossy(&summary.target_version),
        summary.updated,
        summary.already_current,
    );

    Ok(DriverOutcome::Completed(summary))
}
