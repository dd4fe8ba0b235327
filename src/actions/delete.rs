//! Filesystem mutations applied to duplicate copies.
//!
//! # Overview
//!
//! - [`remove_file`]: permanent removal of one duplicate
//! - [`replace_with_hard_link`]: removal followed by a hard link to the
//!   canonical file, returned as a two-step [`LinkAttempt`]
//!
//! Every operation is attempted exactly once. Failures are returned as
//! [`ActionError`] values for the caller to record.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Error type for delete and hard-link operations.
#[derive(Debug, Error)]
pub enum ActionError {
    /// File was not found (may have been deleted or moved).
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    /// Permission denied when attempting to remove.
    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// Removal failed for another reason.
    #[error("failed to remove {path}: {source}")]
    Remove {
        /// File that could not be removed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Creating the hard link failed.
    #[error("failed to link {path} to {target}: {source}")]
    Link {
        /// Path where the link should have been created
        path: PathBuf,
        /// Canonical file the link points to
        target: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },
}

impl ActionError {
    /// Get the path associated with this error.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound(p) | Self::PermissionDenied(p) => p,
            Self::Remove { path, .. } | Self::Link { path, .. } => path,
        }
    }

    fn from_remove(path: &Path, error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Remove {
                path: path.to_path_buf(),
                source: error,
            },
        }
    }
}

/// Outcome of replacing a duplicate with a hard link.
///
/// The two steps are kept apart so that a removal that succeeded followed
/// by a link that failed stays visible as its own state.
#[derive(Debug)]
pub enum LinkAttempt {
    /// Step one failed; the duplicate is untouched.
    RemoveFailed(ActionError),
    /// Step one succeeded; `link` holds the result of step two.
    Removed {
        /// Result of creating the hard link
        link: Result<(), ActionError>,
    },
}

/// Permanently remove a file.
///
/// # Errors
///
/// - `NotFound` if the file doesn't exist
/// - `PermissionDenied` if removal is not allowed
/// - `Remove` for any other I/O failure
pub fn remove_file(path: &Path) -> Result<(), ActionError> {
    fs::remove_file(path).map_err(|e| ActionError::from_remove(path, e))?;
    log::debug!("Removed: {}", path.display());
    Ok(())
}

/// Remove `duplicate`, then hard-link it to `canonical`.
///
/// If the link cannot be created after a successful removal, nothing is put
/// back: the path is left empty and [`LinkAttempt::Removed`] carries the
/// link error.
#[must_use]
pub fn replace_with_hard_link(canonical: &Path, duplicate: &Path) -> LinkAttempt {
    if let Err(e) = remove_file(duplicate) {
        return LinkAttempt::RemoveFailed(e);
    }

    let link = fs::hard_link(canonical, duplicate).map_err(|e| ActionError::Link {
        path: duplicate.to_path_buf(),
        target: canonical.to_path_buf(),
        source: e,
    });

    match &link {
        Ok(()) => log::debug!(
            "Linked {} -> {}",
            duplicate.display(),
            canonical.display()
        ),
        Err(e) => log::debug!("Link failed after removal: {}", e),
    }

    LinkAttempt::Removed { link }
}
