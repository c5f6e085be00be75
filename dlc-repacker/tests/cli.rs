//! CLI-level behavior: exit codes, default folder, log output

mod common;

use assert_cmd::Command;
use common::{manifest_text, write_dlc};
use dlc_repacker::manifest::ManifestScanner;
use predicates::prelude::*;
use scs_hashfs::Archive;

fn dlc_repacker() -> Command {
    Command::cargo_bin("dlc-repacker").expect("binary not built")
}

#[test]
fn test_empty_folder_exits_successfully() {
    let dir = tempfile::tempdir().unwrap();

    dlc_repacker()
        .arg(dir.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("No DLC files have been found"));
}

#[test]
fn test_missing_folder_exits_nonzero() {
    let dir = tempfile::tempdir().unwrap();

    dlc_repacker()
        .arg(dir.path().join("not_there"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("folder does not exist"));
}

#[test]
fn test_folder_defaults_to_current_directory() {
    let dir = tempfile::tempdir().unwrap();

    dlc_repacker()
        .current_dir(dir.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("No DLC files have been found"));
}

#[test]
fn test_run_aligns_archives_and_reports() {
    let dir = tempfile::tempdir().unwrap();
    write_dlc(
        dir.path(),
        "dlc_pcg.scs",
        &manifest_text("Prime Cargo", "1.50"),
    );
    let toys = write_dlc(
        dir.path(),
        "dlc_toys.scs",
        &manifest_text("Cabin Accessories", "1.49"),
    );

    dlc_repacker()
        .arg(dir.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Updating Cabin Accessories"))
        .stderr(predicate::str::contains("1.50"));

    let mut archive = Archive::open(&toys).unwrap();
    let entry = archive
        .entries()
        .iter()
        .find(|e| {
            e.name
                .as_deref()
                .is_some_and(|n| n.ends_with(".manifest.sii"))
        })
        .cloned()
        .unwrap();
    let payload = archive.read_entry(&entry).unwrap();
    assert_eq!(
        ManifestScanner::default().version(&payload),
        Some(b"1.50".as_slice())
    );
}

#[test]
fn test_quiet_suppresses_progress_output() {
    let dir = tempfile::tempdir().unwrap();

    dlc_repacker()
        .arg("--quiet")
        .arg(dir.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Repacking").not());
}
