//! Shared-storage detection for hard links.
//!
//! # Overview
//!
//! Hard links are multiple directory entries pointing to the same inode.
//! They are one file, not duplicates of each other. The resolver uses this
//! to leave members alone when they already share storage with the
//! canonical file.
//!
//! # Platform Support
//!
//! - **Unix**: Uses (device_id, inode) pairs from file metadata
//! - **Other**: Detection disabled; every path is treated as distinct storage

use std::fs::{self, Metadata};
use std::path::Path;

/// Platform-specific storage identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InodeKey {
    #[cfg(unix)]
    dev: u64,
    #[cfg(unix)]
    ino: u64,
    #[cfg(not(unix))]
    _phantom: (),
}

impl InodeKey {
    /// Create an inode key from file metadata.
    ///
    /// Returns `None` if the platform doesn't expose inode information.
    #[cfg(unix)]
    #[must_use]
    pub fn from_metadata(metadata: &Metadata) -> Option<Self> {
        use std::os::unix::fs::MetadataExt;
        Some(Self {
            dev: metadata.dev(),
            ino: metadata.ino(),
        })
    }

    #[cfg(not(unix))]
    #[must_use]
    pub fn from_metadata(_metadata: &Metadata) -> Option<Self> {
        None
    }

    /// Read the inode key of the file at `path` without following symlinks.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        fs::symlink_metadata(path)
            .ok()
            .and_then(|m| Self::from_metadata(&m))
    }
}

/// Check whether two paths refer to the same underlying storage.
///
/// Returns `false` when either path cannot be inspected or the platform
/// has no inode information.
#[must_use]
pub fn shares_storage(a: &Path, b: &Path) -> bool {
    match (InodeKey::from_path(a), InodeKey::from_path(b)) {
        (Some(ka), Some(kb)) => ka == kb,
        _ => false,
    }
}

/// Check if shared-storage detection is supported on this platform.
#[must_use]
pub const fn is_supported() -> bool {
    cfg!(unix)
}
