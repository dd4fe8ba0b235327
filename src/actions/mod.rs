//! Duplicate resolution module.
//!
//! This module provides functionality for:
//! - Choosing the canonical (oldest) file of each duplicate group
//! - Reporting duplicates without touching the filesystem
//! - Permanent deletion of duplicate copies
//! - Replacing duplicate copies with hard links to the canonical file
//!
//! ```no_run
//! use dupsweep::actions::{Action, Resolver};
//! use dupsweep::duplicates::DuplicateFinder;
//! use dupsweep::scanner::{scan, WalkerConfig};
//! use std::path::Path;
//!
//! let scanned = scan(Path::new("."), WalkerConfig::default()).unwrap();
//! let found = DuplicateFinder::with_defaults().find_duplicates(scanned.files);
//! let report = Resolver::new(Action::ReportOnly).resolve(found.groups);
//! println!("{} duplicate copies", report.duplicate_count());
//! ```

pub mod delete;
pub mod resolve;

use std::fmt;

use serde::Serialize;

// Re-export commonly used types
pub use delete::{remove_file, replace_with_hard_link, ActionError, LinkAttempt};
pub use resolve::{
    order_by_age, GroupResolution, MemberResolution, Resolution, ResolveReport, Resolver,
};

/// What to do with non-canonical duplicates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// List duplicates only.
    #[default]
    ReportOnly,
    /// Remove duplicates.
    Delete,
    /// Replace duplicates with hard links to the canonical file.
    HardLink,
}

impl Action {
    /// Whether this action changes the filesystem.
    #[must_use]
    pub fn mutates(self) -> bool {
        !matches!(self, Self::ReportOnly)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ReportOnly => "list",
            Self::Delete => "delete",
            Self::HardLink => "hardlink",
        })
    }
}
