//! Scanner module for directory traversal and content signatures.
//!
//! This module provides functionality for:
//! - Recursive directory walking using walkdir
//! - Whole-content signatures (length + BLAKE3 digest)
//! - Shared-storage (hardlink) detection
//!
//! # Architecture
//!
//! The scanner is divided into submodules:
//! - [`walker`]: Directory traversal and file discovery
//! - [`hasher`]: Content signature computation
//! - [`hardlink`]: Device/inode comparison
//!
//! # Example
//!
//! ```no_run
//! use dupsweep::scanner::{scan, WalkerConfig};
//! use std::path::Path;
//!
//! let outcome = scan(Path::new("."), WalkerConfig::default()).unwrap();
//! println!("Found {} files", outcome.files.len());
//! for warning in &outcome.warnings {
//!     eprintln!("Warning: {}", warning);
//! }
//! ```

pub mod hardlink;
pub mod hasher;
pub mod walker;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

// Re-export main types
pub use hasher::{Hasher, Signature};
pub use walker::Walker;

/// Metadata for a discovered file.
///
/// Created by the walker, enriched with a [`Signature`] by the duplicate
/// finder when another file shares its size.
#[derive(Debug, Clone)]
pub struct FileRecord {
    /// Path to the file
    pub path: PathBuf,
    /// File size in bytes
    pub size: u64,
    /// Last modification time
    pub modified: SystemTime,
    /// Content signature, computed lazily during grouping
    pub signature: Option<Signature>,
}

impl FileRecord {
    /// Create a new FileRecord without a signature.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the file
    /// * `size` - File size in bytes
    /// * `modified` - Last modification time
    #[must_use]
    pub fn new(path: PathBuf, size: u64, modified: SystemTime) -> Self {
        Self {
            path,
            size,
            modified,
            signature: None,
        }
    }

    /// Attach a computed signature.
    #[must_use]
    pub fn with_signature(mut self, signature: Signature) -> Self {
        self.signature = Some(signature);
        self
    }
}

/// Configuration for directory walking.
///
/// Symlinks are never followed and never reported; only regular files are
/// collected.
#[derive(Debug, Clone, Default)]
pub struct WalkerConfig {
    /// Skip hidden files and directories (names starting with `.`).
    pub skip_hidden: bool,

    /// Minimum file size to include (in bytes).
    pub min_size: Option<u64>,

    /// Maximum file size to include (in bytes).
    pub max_size: Option<u64>,
}

impl WalkerConfig {
    /// Skip hidden files and directories.
    #[must_use]
    pub fn with_skip_hidden(mut self, skip: bool) -> Self {
        self.skip_hidden = skip;
        self
    }

    /// Set the minimum file size filter.
    #[must_use]
    pub fn with_min_size(mut self, size: Option<u64>) -> Self {
        self.min_size = size;
        self
    }

    /// Set the maximum file size filter.
    #[must_use]
    pub fn with_max_size(mut self, size: Option<u64>) -> Self {
        self.max_size = size;
        self
    }
}

/// Fatal errors that abort a scan before traversal starts.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// The specified root path was not found.
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    /// The specified root path is not a directory.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// The root could not be inspected.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

/// Non-fatal problems with individual entries during traversal.
///
/// The walker skips the affected entry (or subtree) and keeps going.
#[derive(thiserror::Error, Debug)]
pub enum ScanWarning {
    /// Permission was denied when accessing a file or directory.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// The entry disappeared between listing and inspection.
    #[error("Vanished during scan: {0}")]
    Vanished(PathBuf),

    /// Directory traversal failed for this entry.
    #[error("Walk error for {path}: {message}")]
    Walk {
        /// Path where the error occurred
        path: PathBuf,
        /// Description from the walker
        message: String,
    },

    /// An I/O error occurred while accessing the entry.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

impl ScanWarning {
    /// Path of the entry that was skipped.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::PermissionDenied(p) | Self::Vanished(p) => p,
            Self::Walk { path, .. } | Self::Io { path, .. } => path,
        }
    }
}

/// Result of scanning a directory tree.
#[derive(Debug, Default)]
pub struct ScanOutcome {
    /// Every regular file found
    pub files: Vec<FileRecord>,
    /// Entries that were skipped
    pub warnings: Vec<ScanWarning>,
}

impl ScanOutcome {
    /// Total bytes across all discovered files.
    #[must_use]
    pub fn total_size(&self) -> u64 {
        self.files.iter().map(|f| f.size).sum()
    }
}

/// Check that `root` exists and is a directory.
///
/// # Errors
///
/// Returns [`ScanError`] if the root is missing, not a directory, or cannot
/// be inspected.
pub fn validate_root(root: &Path) -> Result<(), ScanError> {
    match fs::metadata(root) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(ScanError::NotADirectory(root.to_path_buf())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            Err(ScanError::NotFound(root.to_path_buf()))
        }
        Err(e) => Err(ScanError::Io {
            path: root.to_path_buf(),
            source: e,
        }),
    }
}

/// Scan a directory tree for regular files.
///
/// Validates the root first; after that, every per-entry problem is
/// collected into [`ScanOutcome::warnings`] instead of failing the scan.
///
/// # Errors
///
/// Returns [`ScanError`] only when the root itself is invalid.
pub fn scan(root: &Path, config: WalkerConfig) -> Result<ScanOutcome, ScanError> {
    validate_root(root)?;

    let mut outcome = ScanOutcome::default();
    for entry in Walker::new(root, config).walk() {
        match entry {
            Ok(file) => outcome.files.push(file),
            Err(warning) => outcome.warnings.push(warning),
        }
    }

    log::debug!(
        "Scan of {} complete: {} files, {} skipped entries",
        root.display(),
        outcome.files.len(),
        outcome.warnings.len()
    );

    Ok(outcome)
}
