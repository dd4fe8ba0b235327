//! Plain-text report for terminals.
//!
//! # Layout
//!
//! ```text
//! Scanning directory: /data
//! Found 3 files (6 B)
//! Looking for duplicates...
//! Found 1 groups of duplicates
//!
//! Duplicate group (2 files, 2 B each)
//!   Signature: 2_1a2b...
//!   Original:  /data/a.txt (2024-01-01 10:00:00)
//!   Duplicate: /data/b.txt (2024-01-02 10:00:00)
//!
//! Summary: 1 duplicate files in 1 groups, 2 B reclaimable
//! ```

use std::io::{self, Write};
use std::time::SystemTime;

use bytesize::ByteSize;
use chrono::{DateTime, Local};

use crate::actions::{Action, GroupResolution, MemberResolution, Resolution, ResolveReport};

use super::RunSummary;

/// Text renderer over a finished run.
#[derive(Debug)]
pub struct TextOutput<'a> {
    summary: &'a RunSummary,
    report: &'a ResolveReport,
}

impl<'a> TextOutput<'a> {
    #[must_use]
    pub fn new(summary: &'a RunSummary, report: &'a ResolveReport) -> Self {
        Self { summary, report }
    }

    /// Write the full report.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
        writeln!(w, "Scanning directory: {}", self.summary.root.display())?;
        writeln!(
            w,
            "Found {} files ({})",
            self.summary.files_scanned,
            ByteSize(self.summary.bytes_scanned)
        )?;
        writeln!(w, "Looking for duplicates...")?;

        if self.report.groups.is_empty() {
            writeln!(w, "No duplicates found.")?;
        } else {
            writeln!(w, "Found {} groups of duplicates", self.report.groups.len())?;
            for group in &self.report.groups {
                writeln!(w)?;
                write_group(w, group)?;
            }
        }

        if !self.summary.skipped.is_empty() {
            writeln!(w)?;
            writeln!(w, "Skipped {} entries:", self.summary.skipped.len())?;
            for entry in &self.summary.skipped {
                writeln!(w, "  {}", entry.reason)?;
            }
        }

        if !self.report.groups.is_empty() {
            writeln!(w)?;
            self.write_summary(w)?;
        }

        Ok(())
    }

    fn write_summary<W: Write>(&self, w: &mut W) -> io::Result<()> {
        let r = self.report;
        match r.action {
            Action::ReportOnly => writeln!(
                w,
                "Summary: {} duplicate files in {} groups, {} reclaimable",
                r.duplicate_count(),
                r.groups.len(),
                ByteSize(r.reclaimable_bytes())
            ),
            Action::Delete => writeln!(
                w,
                "Summary: {} deleted, {} failed, {} reclaimed",
                r.deleted_count(),
                r.failed_count(),
                ByteSize(r.reclaimed_bytes())
            ),
            Action::HardLink => writeln!(
                w,
                "Summary: {} linked, {} already linked, {} failed, {} lost, {} reclaimed",
                r.linked_count(),
                r.already_linked_count(),
                r.failed_count(),
                r.lost_count(),
                ByteSize(r.reclaimed_bytes())
            ),
        }
    }
}

fn write_group<W: Write>(w: &mut W, group: &GroupResolution) -> io::Result<()> {
    writeln!(
        w,
        "Duplicate group ({} files, {} each)",
        group.len(),
        ByteSize(group.size)
    )?;
    writeln!(w, "  Signature: {}", group.signature)?;
    writeln!(
        w,
        "  Original:  {} ({})",
        group.canonical.path.display(),
        format_time(group.canonical.modified)
    )?;
    for member in &group.duplicates {
        write_member(w, group, member)?;
    }
    Ok(())
}

fn write_member<W: Write>(
    w: &mut W,
    group: &GroupResolution,
    member: &MemberResolution,
) -> io::Result<()> {
    let path = member.record.path.display();
    match &member.resolution {
        Resolution::Reported => writeln!(
            w,
            "  Duplicate: {} ({})",
            path,
            format_time(member.record.modified)
        ),
        Resolution::Deleted => writeln!(w, "  Deleted: {path}"),
        Resolution::DeleteFailed(e) => writeln!(w, "  Delete failed: {path}: {e}"),
        Resolution::Linked => writeln!(
            w,
            "  Linked: {} -> {}",
            path,
            group.canonical.path.display()
        ),
        Resolution::AlreadyLinked => writeln!(w, "  Already linked: {path}"),
        Resolution::LinkFailed(e) => writeln!(w, "  Hardlink failed: {path}: {e}"),
        Resolution::LinkLost(e) => writeln!(
            w,
            "  LOST: {path} was removed but the link could not be created: {e}"
        ),
    }
}

fn format_time(time: SystemTime) -> String {
    DateTime::<Local>::from(time)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}
