//! Output formatters for run reports.
//!
//! This module provides two renderings of the same run:
//! - plain text for terminals
//! - JSON for automation and scripting
//!
//! Both write to any [`std::io::Write`], so callers choose the stream.
//!
//! # Example
//!
//! ```no_run
//! use dupsweep::actions::{Action, Resolver};
//! use dupsweep::duplicates::DuplicateFinder;
//! use dupsweep::output::{RunSummary, TextOutput};
//! use dupsweep::scanner::{scan, WalkerConfig};
//! use std::path::Path;
//!
//! let root = Path::new(".");
//! let scanned = scan(root, WalkerConfig::default()).unwrap();
//! let summary = RunSummary::new(root, &scanned);
//! let found = DuplicateFinder::with_defaults().find_duplicates(scanned.files);
//! let report = Resolver::new(Action::ReportOnly).resolve(found.groups);
//!
//! TextOutput::new(&summary, &report)
//!     .write_to(&mut std::io::stdout().lock())
//!     .unwrap();
//! ```

pub mod json;
pub mod text;

use std::fmt::Display;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::scanner::ScanOutcome;

// Re-export main types
pub use json::JsonOutput;
pub use text::TextOutput;

/// An entry left out of the run, with the reason.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedEntry {
    /// Entry that was skipped
    pub path: PathBuf,
    /// Why it was skipped
    pub reason: String,
}

/// Scan-level facts shown alongside the resolution report.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Directory that was scanned
    pub root: PathBuf,
    /// Regular files found
    pub files_scanned: usize,
    /// Total bytes across those files
    pub bytes_scanned: u64,
    /// Entries skipped during traversal or hashing
    pub skipped: Vec<SkippedEntry>,
}

impl RunSummary {
    /// Capture counts and traversal warnings from a scan.
    #[must_use]
    pub fn new(root: &Path, scanned: &ScanOutcome) -> Self {
        let mut summary = Self {
            root: root.to_path_buf(),
            files_scanned: scanned.files.len(),
            bytes_scanned: scanned.total_size(),
            skipped: Vec::new(),
        };
        for warning in &scanned.warnings {
            summary.add_skipped(warning.path(), warning);
        }
        summary
    }

    /// Record one skipped entry.
    pub fn add_skipped(&mut self, path: &Path, reason: impl Display) {
        self.skipped.push(SkippedEntry {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        });
    }
}
