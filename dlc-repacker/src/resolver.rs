//! Reference version resolution
//!
//! The canonical target version for an installation is whatever the first
//! known add-on archive present in the folder advertises. The probe list is
//! ordered; only existence is probed, so a listed archive that exists but
//! cannot be read is a hard error rather than a reason to try the next one.

use crate::config::RepackConfig;
use crate::error::{RepackError, Result};
use crate::manifest::ManifestScanner;
use scs_hashfs::Archive;
use std::path::Path;

/// Determine the target version for a game installation
///
/// Returns `Ok(None)` when none of the known add-on archives exists in the
/// folder; that is "nothing to do", not a failure.
pub fn resolve_reference_version(
    folder: &Path,
    config: &RepackConfig,
    scanner: &ManifestScanner,
) -> Result<Option<Vec<u8>>> {
    for base in &config.known_addons {
        let path = folder.join(config.archive_file_name(base));
        if !path.exists() {
            continue;
        }

        log::debug!("reading reference version from {}", path.display());

        let mut archive = Archive::open(&path).map_err(|e| RepackError::archive(&path, e))?;

        let entry = archive
            .entries()
            .iter()
            .find(|e| {
                e.name
                    .as_deref()
                    .is_some_and(|name| name.ends_with(&config.manifest_suffix))
            })
            .cloned()
            .ok_or_else(|| RepackError::ManifestMissing { path: path.clone() })?;

        let manifest = archive
            .read_entry(&entry)
            .map_err(|e| RepackError::archive(&path, e))?;

        let version = scanner
            .version(&manifest)
            .ok_or_else(|| RepackError::VersionMissing { path: path.clone() })?;

        return Ok(Some(version.to_vec()));
    }

    log::warn!(
        "No DLC files have been found in {}. Are you sure this is a valid game installation?",
        folder.display()
    );
    Ok(None)
}
