use dupsweep::actions::{Action, Resolution, Resolver};
use dupsweep::duplicates::DuplicateFinder;
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

fn resolve(dir: &Path, action: Action) -> dupsweep::actions::ResolveReport {
    let scanned = scan(dir, WalkerConfig::default()).unwrap();
    let found = DuplicateFinder::with_defaults().find_duplicates(scanned.files);
    Resolver::new(action).resolve(found.groups)
}

#[test]
fn test_oldest_file_is_canonical() {
    let dir = tempdir().unwrap();
    // Name order is the reverse of age order
    let newest = write_at(dir.path(), "a.txt", b"X", 3_000_000);
    let oldest = write_at(dir.path(), "b.txt", b"X", 1_000_000);
    let middle = write_at(dir.path(), "c.txt", b"X", 2_000_000);

    let report = resolve(dir.path(), Action::ReportOnly);

    assert_eq!(report.groups.len(), 1);
    let group = &report.groups[0];
    assert_eq!(group.canonical.path, oldest);
    let order: Vec<_> = group.duplicates.iter().map(|m| m.record.path.clone()).collect();
    assert_eq!(order, vec![middle, newest]);
}

#[test]
fn test_canonical_selection_is_deterministic() {
    let dir = tempdir().unwrap();
    for name in ["x1", "x2", "x3", "x4"] {
        write_at(dir.path(), name, b"same", 1_500_000);
    }

    let first = resolve(dir.path(), Action::ReportOnly);
    let second = resolve(dir.path(), Action::ReportOnly);

    assert_eq!(first.groups[0].canonical.path, second.groups[0].canonical.path);
}

#[test]
fn test_report_only_never_mutates() {
    let dir = tempdir().unwrap();
    let a = write_at(dir.path(), "a.txt", b"X", 1_000_000);
    let b = write_at(dir.path(), "b.txt", b"X", 2_000_000);
    let c = write_at(dir.path(), "c.txt", b"Y", 3_000_000);

    let report = resolve(dir.path(), Action::ReportOnly);

    assert_eq!(report.duplicate_count(), 1);
    assert!(matches!(
        report.groups[0].duplicates[0].resolution,
        Resolution::Reported
    ));
    for (path, content) in [(&a, b"X"), (&b, b"X"), (&c, b"Y")] {
        assert_eq!(&fs::read(path).unwrap(), content);
    }
    assert_eq!(report.reclaimed_bytes(), 0);
    assert_eq!(report.reclaimable_bytes(), 1);
}

#[test]
fn test_delete_leaves_only_canonical() {
    let dir = tempdir().unwrap();
    let a = write_at(dir.path(), "a.txt", b"X", 1_000_000);
    let b = write_at(dir.path(), "b.txt", b"X", 2_000_000);
    let c = write_at(dir.path(), "c.txt", b"Y", 3_000_000);
    let sub = dir.path().join("sub");
    fs::create_dir(&sub).unwrap();
    let d = write_at(&sub, "d.txt", b"X", 4_000_000);

    let report = resolve(dir.path(), Action::Delete);

    assert!(a.exists());
    assert!(!b.exists());
    assert!(!d.exists());
    assert!(c.exists());
    assert_eq!(report.deleted_count(), 2);
    assert_eq!(report.failed_count(), 0);
    assert_eq!(report.reclaimed_bytes(), 2);

    // A second pass finds nothing left to do
    let again = resolve(dir.path(), Action::Delete);
    assert!(again.groups.is_empty());
}

#[cfg(unix)]
#[test]
fn test_delete_failure_does_not_stop_other_groups() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().unwrap();
    let locked = dir.path().join("locked");
    fs::create_dir(&locked).unwrap();

    write_at(dir.path(), "a1", b"first group", 1_000_000);
    let stuck = write_at(&locked, "a2", b"first group", 2_000_000);
    write_at(dir.path(), "b1", b"second", 1_000_000);
    let b2 = write_at(dir.path(), "b2", b"second", 2_000_000);

    let scanned = scan(dir.path(), WalkerConfig::default()).unwrap();
    let found = DuplicateFinder::with_defaults().find_duplicates(scanned.files);

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o555)).unwrap();
    let report = Resolver::new(Action::Delete).resolve(found.groups);
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    assert!(!b2.exists());
    // Root ignores directory permissions
    if stuck.exists() {
        assert_eq!(report.failed_count(), 1);
        let (record, _) = report.failures().next().unwrap();
        assert_eq!(record.path, stuck);
        assert_eq!(report.deleted_count(), 1);
    } else {
        assert_eq!(report.deleted_count(), 2);
    }
}
