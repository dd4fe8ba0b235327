use dupsweep::duplicates::{DuplicateFinder, FinderConfig};
use dupsweep::scanner::{scan, ScanError, WalkerConfig};
use std::fs::{self, File};
use std::io::Write;
use tempfile::tempdir;

fn find(dir: &std::path::Path) -> dupsweep::duplicates::FinderOutcome {
    let scanned = scan(dir, WalkerConfig::default()).unwrap();
    DuplicateFinder::with_defaults().find_duplicates(scanned.files)
}

#[test]
fn test_scan_empty_directory() {
    let dir = tempdir().unwrap();

    let scanned = scan(dir.path(), WalkerConfig::default()).unwrap();
    assert!(scanned.files.is_empty());
    assert!(scanned.warnings.is_empty());

    let found = DuplicateFinder::with_defaults().find_duplicates(scanned.files);
    assert!(found.groups.is_empty());
    assert_eq!(found.stats.duplicate_groups, 0);
}

#[test]
fn test_scan_missing_root_is_fatal() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("does-not-exist");

    let err = scan(&missing, WalkerConfig::default()).unwrap_err();
    assert!(matches!(err, ScanError::NotFound(_)));
}

#[test]
fn test_scan_file_root_is_fatal() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("file.txt");
    fs::write(&file, b"content").unwrap();

    let err = scan(&file, WalkerConfig::default()).unwrap_err();
    assert!(matches!(err, ScanError::NotADirectory(_)));
}

#[test]
fn test_scan_unique_files() {
    let dir = tempdir().unwrap();

    File::create(dir.path().join("a.txt"))
        .unwrap()
        .write_all(b"content a")
        .unwrap();
    File::create(dir.path().join("b.txt"))
        .unwrap()
        .write_all(b"content b")
        .unwrap();
    File::create(dir.path().join("c.txt"))
        .unwrap()
        .write_all(b"content c")
        .unwrap();

    let found = find(dir.path());

    assert!(found.groups.is_empty());
    assert_eq!(found.stats.input_files, 3);
    assert_eq!(found.stats.hashed_files, 3);
}

#[test]
fn test_scan_duplicate_scenario() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), b"X").unwrap();
    fs::write(dir.path().join("b.txt"), b"X").unwrap();
    fs::write(dir.path().join("c.txt"), b"Y").unwrap();

    let found = find(dir.path());

    assert_eq!(found.groups.len(), 1);
    let mut names: Vec<_> = found.groups[0]
        .files
        .iter()
        .map(|f| f.path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names, vec!["a.txt", "b.txt"]);
    assert_eq!(found.stats.duplicate_files, 1);
    assert_eq!(found.stats.reclaimable_space, 1);
}

#[test]
fn test_scan_nested_directories() {
    let dir = tempdir().unwrap();
    let sub = dir.path().join("subdir").join("deeper");
    fs::create_dir_all(&sub).unwrap();

    fs::write(dir.path().join("a.txt"), b"dup").unwrap();
    fs::write(sub.join("b.txt"), b"dup").unwrap();

    let found = find(dir.path());

    assert_eq!(found.groups.len(), 1);
    assert_eq!(found.groups[0].files.len(), 2);
}

#[test]
fn test_scan_multiple_groups_sorted_by_size() {
    let dir = tempdir().unwrap();

    for name in ["s1", "s2", "s3"] {
        fs::write(dir.path().join(name), b"small").unwrap();
    }
    for name in ["l1", "l2"] {
        fs::write(dir.path().join(name), b"a much larger file").unwrap();
    }
    fs::write(dir.path().join("unique"), b"unique content here!!").unwrap();

    let found = find(dir.path());

    assert_eq!(found.groups.len(), 2);
    assert_eq!(found.groups[0].size, 18);
    assert_eq!(found.groups[0].files.len(), 2);
    assert_eq!(found.groups[1].size, 5);
    assert_eq!(found.groups[1].files.len(), 3);
    assert_eq!(found.stats.duplicate_files, 3);
}

#[test]
fn test_same_size_different_content_never_grouped() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a"), b"aaaa").unwrap();
    fs::write(dir.path().join("b"), b"bbbb").unwrap();
    fs::write(dir.path().join("c"), b"aaaa").unwrap();

    let found = find(dir.path());

    assert_eq!(found.groups.len(), 1);
    assert!(found.groups[0]
        .files
        .iter()
        .all(|f| f.path.file_name().unwrap() != "b"));
}

#[test]
fn test_empty_files_form_a_group() {
    let dir = tempdir().unwrap();
    File::create(dir.path().join("empty1")).unwrap();
    File::create(dir.path().join("empty2")).unwrap();

    let found = find(dir.path());

    assert_eq!(found.groups.len(), 1);
    assert_eq!(found.groups[0].size, 0);
}

#[test]
fn test_min_size_excludes_small_duplicates() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a"), b"dup").unwrap();
    fs::write(dir.path().join("b"), b"dup").unwrap();

    let config = WalkerConfig::default().with_min_size(Some(4));
    let scanned = scan(dir.path(), config).unwrap();
    assert!(scanned.files.is_empty());
}

#[test]
fn test_paranoid_mode_agrees_on_real_duplicates() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a"), b"same bytes").unwrap();
    fs::write(dir.path().join("b"), b"same bytes").unwrap();
    fs::write(dir.path().join("c"), b"diff bytes").unwrap();

    let scanned = scan(dir.path(), WalkerConfig::default()).unwrap();
    let finder = DuplicateFinder::new(FinderConfig::default().with_paranoid(true));
    let found = finder.find_duplicates(scanned.files);

    assert_eq!(found.groups.len(), 1);
    assert_eq!(found.groups[0].files.len(), 2);
    assert_eq!(found.stats.collisions, 0);
}

#[test]
fn test_skip_hidden_directories() {
    let dir = tempdir().unwrap();
    let hidden = dir.path().join(".cache");
    fs::create_dir(&hidden).unwrap();
    fs::write(dir.path().join("a"), b"dup").unwrap();
    fs::write(hidden.join("b"), b"dup").unwrap();

    let all = find(dir.path());
    assert_eq!(all.groups.len(), 1);

    let scanned = scan(dir.path(), WalkerConfig::default().with_skip_hidden(true)).unwrap();
    assert_eq!(scanned.files.len(), 1);
}
