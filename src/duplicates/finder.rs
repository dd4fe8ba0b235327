//! Duplicate finder implementation with two-phase detection.
//!
//! # Overview
//!
//! This module orchestrates the duplicate detection pipeline:
//! 1. **Phase 1 - Size grouping**: Group files by size (see [`crate::duplicates::groups`] module)
//! 2. **Phase 2 - Signatures**: Sign every member of a shared-size bucket and
//!    split the bucket by signature
//!
//! An optional paranoid pass confirms each signature group byte-for-byte.
//!
//! Unreadable files never abort the search. They are dropped from their
//! bucket and returned as warnings in [`FinderOutcome`].
//!
//! # Example
//!
//! ```no_run
//! use dupsweep::scanner::{scan, WalkerConfig};
//! use dupsweep::duplicates::{DuplicateFinder, FinderConfig};
//! use std::path::Path;
//!
//! let scanned = scan(Path::new("."), WalkerConfig::default()).unwrap();
//! let finder = DuplicateFinder::new(FinderConfig::default());
//! let outcome = finder.find_duplicates(scanned.files);
//!
//! println!("{} duplicate groups", outcome.groups.len());
//! ```

use std::collections::HashMap;

use crate::scanner::hasher::HashError;
use crate::scanner::{FileRecord, Hasher, Signature};

use super::{group_by_size, DuplicateGroup};

/// Configuration for the duplicate finder.
#[derive(Debug, Clone, Default)]
pub struct FinderConfig {
    /// Confirm signature matches byte-for-byte.
    pub paranoid: bool,
}

impl FinderConfig {
    /// Enable or disable byte-for-byte confirmation.
    #[must_use]
    pub fn with_paranoid(mut self, enabled: bool) -> Self {
        self.paranoid = enabled;
        self
    }
}

/// Statistics from a duplicate search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FinderStats {
    /// Files handed to the finder
    pub input_files: usize,
    /// Files discarded because their size was unique
    pub eliminated_by_size: usize,
    /// Files whose signature was computed
    pub hashed_files: usize,
    /// Files that could not be read
    pub failed_files: usize,
    /// Signature groups split by the paranoid pass
    pub collisions: usize,
    /// Confirmed duplicate groups
    pub duplicate_groups: usize,
    /// Duplicate copies, excluding one original per group
    pub duplicate_files: usize,
    /// Bytes held by the duplicate copies
    pub reclaimable_space: u64,
}

/// Result of a duplicate search.
#[derive(Debug, Default)]
pub struct FinderOutcome {
    /// Confirmed groups, largest files first
    pub groups: Vec<DuplicateGroup>,
    /// Files that were skipped because they could not be read
    pub warnings: Vec<HashError>,
    /// Search statistics
    pub stats: FinderStats,
}

/// Main duplicate finder.
#[derive(Debug, Default)]
pub struct DuplicateFinder {
    config: FinderConfig,
    hasher: Hasher,
}

impl DuplicateFinder {
    /// Create a new finder with the given configuration.
    #[must_use]
    pub fn new(config: FinderConfig) -> Self {
        Self {
            config,
            hasher: Hasher::new(),
        }
    }

    /// Create a finder with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(FinderConfig::default())
    }

    /// Find duplicate groups among `files`.
    ///
    /// Signatures are computed only for files whose size is shared with at
    /// least one other file. Hashing every file would give the same groups.
    #[must_use]
    pub fn find_duplicates(&self, files: Vec<FileRecord>) -> FinderOutcome {
        let mut outcome = FinderOutcome {
            stats: FinderStats {
                input_files: files.len(),
                ..Default::default()
            },
            ..Default::default()
        };

        // Phase 1: Group by size
        let (size_groups, size_stats) = group_by_size(files);
        outcome.stats.eliminated_by_size = size_stats.eliminated_unique;

        log::debug!(
            "Phase 1 complete: {} → {} files ({:.1}% eliminated)",
            size_stats.total_files,
            size_stats.potential_duplicates,
            size_stats.elimination_rate()
        );

        // Phase 2: Split each size bucket by signature
        let mut groups = Vec::new();
        for (size, bucket) in size_groups {
            groups.extend(self.split_by_signature(size, bucket, &mut outcome));
        }

        if self.config.paranoid {
            groups = groups
                .into_iter()
                .flat_map(|group| self.confirm_group(group, &mut outcome))
                .collect();
        }

        groups.sort_by(|a, b| {
            b.size
                .cmp(&a.size)
                .then_with(|| a.signature.cmp(&b.signature))
        });

        outcome.stats.duplicate_groups = groups.len();
        outcome.stats.duplicate_files = groups.iter().map(DuplicateGroup::duplicate_count).sum();
        outcome.stats.reclaimable_space = groups.iter().map(DuplicateGroup::wasted_space).sum();
        outcome.groups = groups;

        log::debug!(
            "Phase 2 complete: {} files signed, {} duplicate groups, {} unreadable",
            outcome.stats.hashed_files,
            outcome.stats.duplicate_groups,
            outcome.stats.failed_files
        );

        outcome
    }

    /// Sign every file in a size bucket and keep signatures shared by 2+ files.
    fn split_by_signature(
        &self,
        size: u64,
        bucket: Vec<FileRecord>,
        outcome: &mut FinderOutcome,
    ) -> Vec<DuplicateGroup> {
        let mut by_signature: HashMap<Signature, Vec<FileRecord>> = HashMap::new();

        for file in bucket {
            match self.hasher.signature(&file.path) {
                Ok(signature) => {
                    outcome.stats.hashed_files += 1;
                    by_signature
                        .entry(signature)
                        .or_default()
                        .push(file.with_signature(signature));
                }
                Err(e) => {
                    log::debug!("Failed to sign {}: {}", file.path.display(), e);
                    outcome.stats.failed_files += 1;
                    outcome.warnings.push(e);
                }
            }
        }

        by_signature
            .into_iter()
            .filter(|(_, files)| files.len() > 1)
            .map(|(signature, files)| DuplicateGroup::new(signature, size, files))
            .collect()
    }

    /// Split a signature group into byte-identical clusters.
    ///
    /// Each file is compared against the first member of every cluster
    /// found so far. A file that cannot be read is dropped with a warning.
    /// When the unreadable file is a cluster's first member, it is evicted
    /// and the next member of that cluster is compared instead.
    fn confirm_group(
        &self,
        group: DuplicateGroup,
        outcome: &mut FinderOutcome,
    ) -> Vec<DuplicateGroup> {
        let DuplicateGroup {
            signature,
            size,
            files,
        } = group;
        let mut clusters: Vec<Vec<FileRecord>> = Vec::new();

        'files: for file in files {
            let mut i = 0;
            while i < clusters.len() {
                let anchor = clusters[i][0].path.clone();
                match self.hasher.contents_match(&anchor, &file.path) {
                    Ok(true) => {
                        clusters[i].push(file);
                        continue 'files;
                    }
                    Ok(false) => i += 1,
                    Err(e) if e.path() == anchor.as_path() => {
                        Self::record_unreadable(e, outcome);
                        clusters[i].remove(0);
                        if clusters[i].is_empty() {
                            clusters.remove(i);
                        }
                    }
                    Err(e) => {
                        Self::record_unreadable(e, outcome);
                        continue 'files;
                    }
                }
            }
            clusters.push(vec![file]);
        }

        if clusters.len() > 1 {
            outcome.stats.collisions += 1;
            log::warn!(
                "Signature {} covers {} different contents",
                signature,
                clusters.len()
            );
        }

        clusters
            .into_iter()
            .filter(|cluster| cluster.len() > 1)
            .map(|cluster| DuplicateGroup::new(signature, size, cluster))
            .collect()
    }

    fn record_unreadable(error: HashError, outcome: &mut FinderOutcome) {
        log::debug!("Failed to compare {}: {}", error.path().display(), error);
        outcome.stats.failed_files += 1;
        outcome.warnings.push(error);
    }
}
