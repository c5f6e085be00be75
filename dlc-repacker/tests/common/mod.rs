//! Common test fixtures

#![allow(dead_code)]

use scs_hashfs::test_utils::FixtureWriter;
use std::path::{Path, PathBuf};

/// Manifest text with the version repeated across two fields, the way real
/// DLC manifests ship
pub fn manifest_text(display_name: &str, version: &str) -> Vec<u8> {
    format!(
        r#"SiiNunit
{{
mod_package : .package_info
{{
    display_name: "{display_name}"

    package_version: "{version}"
    compatible_versions[]: "{version}"
}}
}}
"#
    )
    .into_bytes()
}

/// Manifest entry name for an archive file name ("dlc_toys.scs" ->
/// "dlc_toys.manifest.sii")
pub fn manifest_entry_name(archive_file_name: &str) -> String {
    format!(
        "{}.manifest.sii",
        archive_file_name.trim_end_matches(".scs")
    )
}

/// Write a DLC archive whose manifest payload is the last one in the data
/// region
pub fn write_dlc(dir: &Path, file_name: &str, manifest: &[u8]) -> PathBuf {
    let path = dir.join(file_name);
    FixtureWriter::new()
        .add_file(&manifest_entry_name(file_name), manifest, true)
        .write_to(&path)
        .expect("failed to write fixture archive");
    path
}

/// Write a DLC archive with another payload after the manifest, so the
/// manifest is NOT the last one in the data region
pub fn write_dlc_with_trailing_entry(
    dir: &Path,
    file_name: &str,
    manifest: &[u8],
    trailing: &[u8],
) -> PathBuf {
    let path = dir.join(file_name);
    FixtureWriter::new()
        .add_file(&manifest_entry_name(file_name), manifest, true)
        .add_file("def/env_data.sii", trailing, true)
        .write_to(&path)
        .expect("failed to write fixture archive");
    path
}
