//! Duplicate grouping and size-based file organization.
//!
//! # Overview
//!
//! Size grouping is the first phase of duplicate detection. Files with
//! different sizes cannot be duplicates, so every size seen only once is
//! discarded before any content is read.
//!
//! # Example
//!
//! ```
//! use dupsweep::scanner::FileRecord;
//! use dupsweep::duplicates::group_by_size;
//! use std::path::PathBuf;
//! use std::time::SystemTime;
//!
//! let files = vec![
//!     FileRecord::new(PathBuf::from("/file1.txt"), 1024, SystemTime::now()),
//!     FileRecord::new(PathBuf::from("/file2.txt"), 1024, SystemTime::now()),
//!     FileRecord::new(PathBuf::from("/file3.txt"), 2048, SystemTime::now()),
//! ];
//!
//! // Only sizes shared by 2+ files survive
//! let (groups, stats) = group_by_size(files);
//!
//! assert_eq!(stats.total_files, 3);
//! assert_eq!(stats.potential_duplicates, 2);
//! assert_eq!(groups.len(), 1);
//! ```

use std::collections::HashMap;

use crate::scanner::{FileRecord, Signature};

/// Confirmed duplicate group of files.
///
/// Every member has the same size and the same [`Signature`].
#[derive(Debug, Clone)]
pub struct DuplicateGroup {
    /// Content signature shared by all members
    pub signature: Signature,
    /// File size in bytes (shared by all members)
    pub size: u64,
    /// Members, in no particular order
    pub files: Vec<FileRecord>,
}

impl DuplicateGroup {
    /// Create a new duplicate group.
    ///
    /// # Arguments
    ///
    /// * `signature` - Content signature shared by the members
    /// * `size` - File size in bytes
    /// * `files` - Member records
    #[must_use]
    pub fn new(signature: Signature, size: u64, files: Vec<FileRecord>) -> Self {
        debug_assert!(files.iter().all(|f| f.size == size));
        Self {
            signature,
            size,
            files,
        }
    }

    /// Number of files in this group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check if this group is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Total wasted space (all copies minus one).
    #[must_use]
    pub fn wasted_space(&self) -> u64 {
        self.size * self.duplicate_count() as u64
    }

    /// Number of duplicate copies (total - 1 original).
    #[must_use]
    pub fn duplicate_count(&self) -> usize {
        self.files.len().saturating_sub(1)
    }
}

/// Statistics from size grouping phase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupingStats {
    /// Total number of files processed
    pub total_files: usize,
    /// Total size of all files in bytes
    pub total_size: u64,
    /// Number of unique file sizes
    pub unique_sizes: usize,
    /// Number of files that could be duplicates (in groups of 2+)
    pub potential_duplicates: usize,
    /// Number of files eliminated as unique (singleton groups)
    pub eliminated_unique: usize,
    /// Number of size groups with 2+ files
    pub duplicate_groups: usize,
}

impl GroupingStats {
    /// Percentage of files eliminated by size grouping.
    #[must_use]
    pub fn elimination_rate(&self) -> f64 {
        if self.total_files == 0 {
            0.0
        } else {
            (self.eliminated_unique as f64 / self.total_files as f64) * 100.0
        }
    }
}

/// Group files by size (Phase 1).
///
/// Returns only the size buckets holding 2+ files, plus statistics about
/// what was eliminated.
#[must_use]
pub fn group_by_size(files: Vec<FileRecord>) -> (HashMap<u64, Vec<FileRecord>>, GroupingStats) {
    let mut stats = GroupingStats {
        total_files: files.len(),
        total_size: files.iter().map(|f| f.size).sum(),
        ..Default::default()
    };

    let mut buckets: HashMap<u64, Vec<FileRecord>> = HashMap::new();
    for file in files {
        buckets.entry(file.size).or_default().push(file);
    }
    stats.unique_sizes = buckets.len();

    buckets.retain(|size, files| {
        if files.len() > 1 {
            stats.potential_duplicates += files.len();
            stats.duplicate_groups += 1;
            true
        } else {
            stats.eliminated_unique += 1;
            log::trace!("Eliminated unique size {}: {}", size, files[0].path.display());
            false
        }
    });

    log::debug!(
        "Size grouping: {} files, {} unique sizes, {} potential duplicates",
        stats.total_files,
        stats.unique_sizes,
        stats.potential_duplicates
    );

    (buckets, stats)
}
