use dupsweep::actions::{Action, Resolution, Resolver};
use dupsweep::duplicates::DuplicateFinder;
use dupsweep::scanner::hardlink::{is_supported, shares_storage};
use dupsweep::scanner::{scan, WalkerConfig};
use filetime::{set_file_mtime, FileTime};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn write_at(dir: &Path, name: &str, content: &[u8], mtime: i64) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    set_file_mtime(&path, FileTime::from_unix_time(mtime, 0)).unwrap();
    path
}

fn groups_in(dir: &Path) -> Vec<dupsweep::duplicates::DuplicateGroup> {
    let scanned = scan(dir, WalkerConfig::default()).unwrap();
    DuplicateFinder::with_defaults()
        .find_duplicates(scanned.files)
        .groups
}

#[test]
fn test_hardlink_makes_members_share_storage() {
    let dir = tempdir().unwrap();
    let a = write_at(dir.path(), "a.txt", b"shared content", 1_000_000);
    let b = write_at(dir.path(), "b.txt", b"shared content", 2_000_000);
    let c = write_at(dir.path(), "c.txt", b"shared content", 3_000_000);

    let report = Resolver::new(Action::HardLink).resolve(groups_in(dir.path()));

    assert_eq!(report.linked_count(), 2);
    assert_eq!(report.lost_count(), 0);
    assert_eq!(report.groups[0].canonical.path, a);
    assert!(a.exists() && b.exists() && c.exists());

    // A write through the canonical path is visible through every member
    fs::write(&a, b"changed").unwrap();
    assert_eq!(fs::read(&b).unwrap(), b"changed");
    assert_eq!(fs::read(&c).unwrap(), b"changed");

    if is_supported() {
        assert!(shares_storage(&a, &b));
        assert!(shares_storage(&a, &c));
    }
}

#[test]
fn test_existing_hardlinks_are_grouped_and_left_alone() {
    if !is_supported() {
        return;
    }

    let dir = tempdir().unwrap();
    let original = write_at(dir.path(), "original.txt", b"identical content", 1_000_000);
    let hardlink = dir.path().join("hardlink.txt");
    if let Err(e) = fs::hard_link(&original, &hardlink) {
        eprintln!("Skipping hardlink test: failed to create hardlink: {}", e);
        return;
    }

    let groups = groups_in(dir.path());
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].files.len(), 2);

    let report = Resolver::new(Action::HardLink).resolve(groups);

    assert!(matches!(
        report.groups[0].duplicates[0].resolution,
        Resolution::AlreadyLinked
    ));
    assert_eq!(report.already_linked_count(), 1);
    assert_eq!(report.linked_count(), 0);
    assert_eq!(report.reclaimed_bytes(), 0);
    assert!(original.exists() && hardlink.exists());
}

#[test]
fn test_hardlink_with_vanished_canonical_is_reported_as_lost() {
    let dir = tempdir().unwrap();
    let a = write_at(dir.path(), "a.txt", b"payload", 1_000_000);
    let b = write_at(dir.path(), "b.txt", b"payload", 2_000_000);

    let groups = groups_in(dir.path());
    fs::remove_file(&a).unwrap();

    let report = Resolver::new(Action::HardLink).resolve(groups);

    let member = &report.groups[0].duplicates[0];
    assert_eq!(member.record.path, b);
    assert!(matches!(member.resolution, Resolution::LinkLost(_)));
    assert_eq!(report.lost_count(), 1);
    assert_eq!(report.linked_count(), 0);
    assert!(!b.exists());
}

#[test]
fn test_hardlink_with_vanished_duplicate_fails_without_loss() {
    let dir = tempdir().unwrap();
    let a = write_at(dir.path(), "a.txt", b"payload", 1_000_000);
    let b = write_at(dir.path(), "b.txt", b"payload", 2_000_000);

    let groups = groups_in(dir.path());
    fs::remove_file(&b).unwrap();

    let report = Resolver::new(Action::HardLink).resolve(groups);

    let resolution = &report.groups[0].duplicates[0].resolution;
    assert!(matches!(resolution, Resolution::LinkFailed(_)));
    assert!(!resolution.is_destructive());
    assert_eq!(report.failed_count(), 1);
    assert_eq!(report.lost_count(), 0);
    assert!(a.exists());
}

#[cfg(unix)]
#[test]
fn test_symlinks_are_not_followed() {
    let dir = tempdir().unwrap();
    let original = write_at(dir.path(), "original.txt", b"content", 1_000_000);
    let symlink = dir.path().join("symlink.txt");
    if let Err(e) = std::os::unix::fs::symlink(&original, &symlink) {
        eprintln!("Skipping symlink test: failed to create symlink: {}", e);
        return;
    }

    let scanned = scan(dir.path(), WalkerConfig::default()).unwrap();

    assert_eq!(scanned.files.len(), 1);
    assert_eq!(scanned.files[0].path, original);
}
