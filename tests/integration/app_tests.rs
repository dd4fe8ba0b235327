use dupsweep::actions::Action;
use dupsweep::cli::OutputFormat;
use dupsweep::config::Config;
use dupsweep::error::ExitCode;
use dupsweep::scanner::ScanError;
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

fn run_to_string(config: &Config) -> (ExitCode, String) {
    let mut out = Vec::new();
    let code = dupsweep::run(config, &mut out).unwrap();
    (code, String::from_utf8(out).unwrap())
}

#[test]
fn test_report_for_simple_scenario() {
    let dir = tempdir().unwrap();
    let a = write_at(dir.path(), "a.txt", b"X", 1_000_000);
    let b = write_at(dir.path(), "b.txt", b"X", 2_000_000);
    let c = write_at(dir.path(), "c.txt", b"Y", 3_000_000);

    let (code, text) = run_to_string(&Config::new(dir.path()));

    assert_eq!(code, ExitCode::Success);
    assert!(text.starts_with(&format!("Scanning directory: {}\n", dir.path().display())));
    assert!(text.contains("Found 3 files"));
    assert!(text.contains("Looking for duplicates..."));
    assert!(text.contains("Found 1 groups of duplicates"));
    assert!(text.contains(&format!("Original:  {}", a.display())));
    assert!(text.contains(&format!("Duplicate: {}", b.display())));
    assert!(!text.contains(&c.display().to_string()));
    assert!(text.contains("Summary: 1 duplicate files in 1 groups"));
    assert!(b.exists());
}

#[test]
fn test_report_for_empty_directory() {
    let dir = tempdir().unwrap();

    let (code, text) = run_to_string(&Config::new(dir.path()));

    assert_eq!(code, ExitCode::Success);
    assert!(text.contains("Found 0 files"));
    assert!(text.contains("No duplicates found."));
    assert!(!text.contains("Summary:"));
}

#[test]
fn test_missing_root_writes_nothing() {
    let dir = tempdir().unwrap();
    let config = Config::new(dir.path().join("missing"));

    let mut out = Vec::new();
    let err = dupsweep::run(&config, &mut out).unwrap_err();

    assert!(out.is_empty());
    assert!(matches!(
        err.downcast_ref::<ScanError>(),
        Some(ScanError::NotFound(_))
    ));
}

#[test]
fn test_delete_run_reports_outcomes() {
    let dir = tempdir().unwrap();
    let a = write_at(dir.path(), "a.txt", b"X", 1_000_000);
    let b = write_at(dir.path(), "b.txt", b"X", 2_000_000);

    let config = Config::new(dir.path()).with_action(Action::Delete);
    let (code, text) = run_to_string(&config);

    assert_eq!(code, ExitCode::Success);
    assert!(text.contains(&format!("Deleted: {}", b.display())));
    assert!(text.contains("Summary: 1 deleted, 0 failed"));
    assert!(a.exists());
    assert!(!b.exists());
}

#[test]
fn test_hardlink_run_reports_outcomes() {
    let dir = tempdir().unwrap();
    let a = write_at(dir.path(), "a.txt", b"X", 1_000_000);
    let b = write_at(dir.path(), "b.txt", b"X", 2_000_000);

    let config = Config::new(dir.path()).with_action(Action::HardLink);
    let (_, text) = run_to_string(&config);

    assert!(text.contains(&format!("Linked: {} -> {}", b.display(), a.display())));
    assert!(text.contains("1 linked, 0 already linked, 0 failed, 0 lost"));
    assert!(b.exists());
}

#[test]
fn test_json_report() {
    let dir = tempdir().unwrap();
    write_at(dir.path(), "a.txt", b"X", 1_000_000);
    write_at(dir.path(), "b.txt", b"X", 2_000_000);
    write_at(dir.path(), "c.txt", b"Y", 3_000_000);

    let config = Config::new(dir.path()).with_output(OutputFormat::Json);
    let (_, text) = run_to_string(&config);
    let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();

    assert_eq!(parsed["action"], "report_only");
    assert_eq!(parsed["files_scanned"], 3);
    let groups = parsed["groups"].as_array().unwrap();
    assert_eq!(groups.len(), 1);
    assert!(groups[0]["canonical"]["path"]
        .as_str()
        .unwrap()
        .ends_with("a.txt"));
    assert_eq!(groups[0]["duplicates"][0]["outcome"], "reported");
    assert_eq!(parsed["summary"]["duplicate_files"], 1);
}

#[cfg(unix)]
#[test]
fn test_unreadable_directory_is_listed_as_skipped() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().unwrap();
    write_at(dir.path(), "a.txt", b"X", 1_000_000);
    write_at(dir.path(), "b.txt", b"X", 2_000_000);
    let locked = dir.path().join("locked");
    fs::create_dir(&locked).unwrap();
    fs::write(locked.join("inner.txt"), b"hidden").unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    // Root can still read the directory
    let denied = fs::read_dir(&locked).is_err();
    let (code, text) = run_to_string(&Config::new(dir.path()));

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    assert_eq!(code, ExitCode::Success);
    assert!(text.contains("Found 1 groups of duplicates"));
    if denied {
        assert!(text.contains("Skipped 1 entries:"));
    }
}
