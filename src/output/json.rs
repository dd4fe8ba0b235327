//! JSON output formatter for run reports.
//!
//! Provides machine-readable JSON output for scripting and automation.
//!
//! # Output Schema
//!
//! ```json
//! {
//!   "root": "/data",
//!   "action": "delete",
//!   "files_scanned": 3,
//!   "bytes_scanned": 6,
//!   "groups": [
//!     {
//!       "signature": "2_1a2b...",
//!       "size": 2,
//!       "canonical": { "path": "/data/a.txt", "modified": "2024-01-01T10:00:00Z" },
//!       "duplicates": [
//!         {
//!           "path": "/data/b.txt",
//!           "modified": "2024-01-02T10:00:00Z",
//!           "outcome": "deleted",
//!           "error": null
//!         }
//!       ]
//!     }
//!   ],
//!   "skipped": [],
//!   "summary": {
//!     "duplicate_groups": 1,
//!     "duplicate_files": 1,
//!     "deleted": 1,
//!     "linked": 0,
//!     "already_linked": 0,
//!     "failed": 0,
//!     "lost": 0,
//!     "reclaimable_bytes": 2,
//!     "reclaimed_bytes": 2
//!   }
//! }
//! ```

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::actions::{Action, GroupResolution, MemberResolution, ResolveReport};
use crate::scanner::{FileRecord, Signature};

use super::{RunSummary, SkippedEntry};

/// A file reference in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonFile {
    pub path: String,
    pub modified: DateTime<Utc>,
}

impl JsonFile {
    fn from_record(record: &FileRecord) -> Self {
        Self {
            path: record.path.to_string_lossy().into_owned(),
            modified: DateTime::<Utc>::from(record.modified),
        }
    }
}

/// A non-canonical member and its outcome.
#[derive(Debug, Clone, Serialize)]
pub struct JsonMember {
    #[serde(flatten)]
    pub file: JsonFile,
    /// Outcome name, e.g. `deleted` or `link_lost`
    pub outcome: &'static str,
    /// Error message for failed outcomes
    pub error: Option<String>,
}

impl JsonMember {
    fn from_member(member: &MemberResolution) -> Self {
        Self {
            file: JsonFile::from_record(&member.record),
            outcome: member.resolution.kind(),
            error: member.resolution.error().map(ToString::to_string),
        }
    }
}

/// A resolved duplicate group in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonGroup {
    /// Signature as `<len>_<hex digest>`
    pub signature: Signature,
    /// File size in bytes
    pub size: u64,
    /// File kept untouched
    pub canonical: JsonFile,
    /// Other members with their outcomes
    pub duplicates: Vec<JsonMember>,
}

impl JsonGroup {
    fn from_group(group: &GroupResolution) -> Self {
        Self {
            signature: group.signature,
            size: group.size,
            canonical: JsonFile::from_record(&group.canonical),
            duplicates: group.duplicates.iter().map(JsonMember::from_member).collect(),
        }
    }
}

/// Summary counters in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonSummary {
    pub duplicate_groups: usize,
    pub duplicate_files: usize,
    pub deleted: usize,
    pub linked: usize,
    pub already_linked: usize,
    pub failed: usize,
    /// Files removed whose replacement link could not be created
    pub lost: usize,
    pub reclaimable_bytes: u64,
    pub reclaimed_bytes: u64,
}

impl JsonSummary {
    fn from_report(report: &ResolveReport) -> Self {
        Self {
            duplicate_groups: report.groups.len(),
            duplicate_files: report.duplicate_count(),
            deleted: report.deleted_count(),
            linked: report.linked_count(),
            already_linked: report.already_linked_count(),
            failed: report.failed_count(),
            lost: report.lost_count(),
            reclaimable_bytes: report.reclaimable_bytes(),
            reclaimed_bytes: report.reclaimed_bytes(),
        }
    }
}

/// Complete JSON output structure.
#[derive(Debug, Clone, Serialize)]
pub struct JsonOutput {
    pub root: String,
    pub action: Action,
    pub files_scanned: usize,
    pub bytes_scanned: u64,
    pub groups: Vec<JsonGroup>,
    pub skipped: Vec<SkippedEntry>,
    pub summary: JsonSummary,
}

impl JsonOutput {
    /// Build the JSON document for a finished run.
    #[must_use]
    pub fn new(summary: &RunSummary, report: &ResolveReport) -> Self {
        Self {
            root: summary.root.to_string_lossy().into_owned(),
            action: report.action,
            files_scanned: summary.files_scanned,
            bytes_scanned: summary.bytes_scanned,
            groups: report.groups.iter().map(JsonGroup::from_group).collect(),
            skipped: summary.skipped.clone(),
            summary: JsonSummary::from_report(report),
        }
    }

    /// Serialize to compact JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails (unlikely for valid data).
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serialize to pretty-printed JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails (unlikely for valid data).
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write JSON to a writer, followed by a newline.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write_to<W: Write>(&self, writer: &mut W, pretty: bool) -> Result<(), JsonOutputError> {
        let json = if pretty {
            self.to_json_pretty()?
        } else {
            self.to_json()?
        };
        writer.write_all(json.as_bytes())?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}

/// Errors that can occur during JSON output.
#[derive(thiserror::Error, Debug)]
pub enum JsonOutputError {
    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error during writing
    #[error("I/O error during JSON generation: {0}")]
    Io(#[from] std::io::Error),
}
