//! Canonical selection and resolution of duplicate groups.
//!
//! The oldest member of a group (by modification time) is canonical and is
//! never touched. Every other member is handled in ascending-timestamp
//! order according to the [`Action`] the [`Resolver`] was built with.
//!
//! Nothing here writes to an output stream: each decision is recorded as a
//! [`Resolution`] in the returned [`ResolveReport`].

use crate::duplicates::DuplicateGroup;
use crate::scanner::hardlink::{self, shares_storage};
use crate::scanner::{FileRecord, Signature};

use super::delete::{remove_file, replace_with_hard_link, ActionError, LinkAttempt};
use super::Action;

/// What happened to one non-canonical member.
#[derive(Debug)]
pub enum Resolution {
    /// Listed as a duplicate, filesystem untouched.
    Reported,
    /// Removed.
    Deleted,
    /// Removal failed; the file is still there.
    DeleteFailed(ActionError),
    /// Replaced with a hard link to the canonical file.
    Linked,
    /// Already shares storage with the canonical file; left alone.
    AlreadyLinked,
    /// Removal failed before linking; the file is still there.
    LinkFailed(ActionError),
    /// Removed, but the hard link could not be created. No file remains at
    /// this path.
    LinkLost(ActionError),
}

impl Resolution {
    /// Whether this outcome is any kind of failure.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Self::DeleteFailed(_) | Self::LinkFailed(_) | Self::LinkLost(_)
        )
    }

    /// Whether the failure left the path without a file.
    #[must_use]
    pub fn is_destructive(&self) -> bool {
        matches!(self, Self::LinkLost(_))
    }

    /// Whether the member's bytes no longer take separate space.
    #[must_use]
    pub fn reclaims_space(&self) -> bool {
        matches!(self, Self::Deleted | Self::Linked | Self::LinkLost(_))
    }

    /// Stable machine-readable name.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Reported => "reported",
            Self::Deleted => "deleted",
            Self::DeleteFailed(_) => "delete_failed",
            Self::Linked => "linked",
            Self::AlreadyLinked => "already_linked",
            Self::LinkFailed(_) => "link_failed",
            Self::LinkLost(_) => "link_lost",
        }
    }

    /// The error behind a failed outcome.
    #[must_use]
    pub fn error(&self) -> Option<&ActionError> {
        match self {
            Self::DeleteFailed(e) | Self::LinkFailed(e) | Self::LinkLost(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LinkAttempt> for Resolution {
    fn from(attempt: LinkAttempt) -> Self {
        match attempt {
            LinkAttempt::RemoveFailed(e) => Self::LinkFailed(e),
            LinkAttempt::Removed { link: Ok(()) } => Self::Linked,
            LinkAttempt::Removed { link: Err(e) } => Self::LinkLost(e),
        }
    }
}

/// A non-canonical member and what was done to it.
#[derive(Debug)]
pub struct MemberResolution {
    /// The duplicate file as scanned
    pub record: FileRecord,
    /// Outcome of the action on this file
    pub resolution: Resolution,
}

/// Resolution of one duplicate group.
#[derive(Debug)]
pub struct GroupResolution {
    /// Signature shared by the group
    pub signature: Signature,
    /// Size of each member in bytes
    pub size: u64,
    /// The member that survives untouched
    pub canonical: FileRecord,
    /// Other members, oldest first
    pub duplicates: Vec<MemberResolution>,
}

impl GroupResolution {
    /// Number of files in the group, canonical included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.duplicates.len() + 1
    }

    /// Always false: a resolved group has a canonical member.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Results of resolving every group in a run.
#[derive(Debug)]
pub struct ResolveReport {
    /// Action applied to every duplicate
    pub action: Action,
    /// Resolved groups, in the order they were found
    pub groups: Vec<GroupResolution>,
}

impl ResolveReport {
    fn members(&self) -> impl Iterator<Item = (&GroupResolution, &MemberResolution)> {
        self.groups
            .iter()
            .flat_map(|g| g.duplicates.iter().map(move |m| (g, m)))
    }

    fn count(&self, pred: impl Fn(&Resolution) -> bool) -> usize {
        self.members().filter(|(_, m)| pred(&m.resolution)).count()
    }

    /// Number of non-canonical members across all groups.
    #[must_use]
    pub fn duplicate_count(&self) -> usize {
        self.members().count()
    }

    /// Number of members removed.
    #[must_use]
    pub fn deleted_count(&self) -> usize {
        self.count(|r| matches!(r, Resolution::Deleted))
    }

    /// Number of members replaced with hard links.
    #[must_use]
    pub fn linked_count(&self) -> usize {
        self.count(|r| matches!(r, Resolution::Linked))
    }

    /// Number of members that already shared storage with the canonical file.
    #[must_use]
    pub fn already_linked_count(&self) -> usize {
        self.count(|r| matches!(r, Resolution::AlreadyLinked))
    }

    /// Number of failures that left the file in place.
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.count(|r| r.is_failure() && !r.is_destructive())
    }

    /// Number of members removed without a replacement link.
    #[must_use]
    pub fn lost_count(&self) -> usize {
        self.count(Resolution::is_destructive)
    }

    /// Bytes no longer stored separately.
    #[must_use]
    pub fn reclaimed_bytes(&self) -> u64 {
        self.members()
            .filter(|(_, m)| m.resolution.reclaims_space())
            .map(|(g, _)| g.size)
            .sum()
    }

    /// Bytes held by non-canonical members, whatever happened to them.
    #[must_use]
    pub fn reclaimable_bytes(&self) -> u64 {
        self.groups
            .iter()
            .map(|g| g.size * g.duplicates.len() as u64)
            .sum()
    }

    /// Every failed member with its error.
    pub fn failures(&self) -> impl Iterator<Item = (&FileRecord, &ActionError)> {
        self.members()
            .filter_map(|(_, m)| m.resolution.error().map(|e| (&m.record, e)))
    }
}

/// Order members oldest first.
///
/// The sort is stable, so members with equal timestamps keep their input
/// order and the same input always yields the same canonical file.
#[must_use]
pub fn order_by_age(mut files: Vec<FileRecord>) -> Vec<FileRecord> {
    files.sort_by_key(|f| f.modified);
    files
}

/// Applies an [`Action`] to duplicate groups.
#[derive(Debug, Clone, Copy)]
pub struct Resolver {
    action: Action,
}

impl Resolver {
    /// Create a resolver for one action.
    #[must_use]
    pub fn new(action: Action) -> Self {
        Self { action }
    }

    /// Resolve every group. Empty groups are skipped.
    #[must_use]
    pub fn resolve(&self, groups: Vec<DuplicateGroup>) -> ResolveReport {
        if self.action.mutates() {
            log::debug!("Applying {} to {} groups", self.action, groups.len());
        }
        if self.action == Action::HardLink && !hardlink::is_supported() {
            log::warn!("Existing hard links cannot be detected on this platform");
        }

        let groups = groups
            .into_iter()
            .filter_map(|g| self.resolve_group(g))
            .collect();

        ResolveReport {
            action: self.action,
            groups,
        }
    }

    /// Resolve one group. Returns `None` for an empty group.
    #[must_use]
    pub fn resolve_group(&self, group: DuplicateGroup) -> Option<GroupResolution> {
        let mut ordered = order_by_age(group.files).into_iter();
        let canonical = ordered.next()?;

        log::debug!(
            "Group {}: canonical {}",
            group.signature,
            canonical.path.display()
        );

        let duplicates = ordered
            .map(|record| {
                let resolution = self.apply(&canonical, &record);
                MemberResolution { record, resolution }
            })
            .collect();

        Some(GroupResolution {
            signature: group.signature,
            size: group.size,
            canonical,
            duplicates,
        })
    }

    fn apply(&self, canonical: &FileRecord, duplicate: &FileRecord) -> Resolution {
        match self.action {
            Action::ReportOnly => Resolution::Reported,
            Action::Delete => match remove_file(&duplicate.path) {
                Ok(()) => Resolution::Deleted,
                Err(e) => Resolution::DeleteFailed(e),
            },
            Action::HardLink => {
                if shares_storage(&canonical.path, &duplicate.path) {
                    log::debug!(
                        "Already linked: {} -> {}",
                        duplicate.path.display(),
                        canonical.path.display()
                    );
                    Resolution::AlreadyLinked
                } else {
                    replace_with_hard_link(&canonical.path, &duplicate.path).into()
                }
            }
        }
    }
}
