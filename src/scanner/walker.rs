//! Directory walker implementation using walkdir.
//!
//! # Overview
//!
//! This module provides the [`Walker`] struct for traversing directories
//! and collecting file metadata for duplicate detection. Traversal is
//! single-threaded; children are visited in file-name order.
//!
//! # Features
//!
//! - Only regular files are yielded; symlinks are never followed
//! - Size filtering (min/max)
//! - Hidden file filtering
//! - Unreadable entries are yielded as [`ScanWarning`]s, never abort the walk
//!
//! # Example
//!
//! ```no_run
//! use dupsweep::scanner::{Walker, WalkerConfig};
//! use std::path::Path;
//!
//! let walker = Walker::new(Path::new("/home/user/Downloads"), WalkerConfig::default());
//! for entry in walker.walk() {
//!     match entry {
//!         Ok(file) => println!("{}: {} bytes", file.path.display(), file.size),
//!         Err(e) => eprintln!("Warning: {}", e),
//!     }
//! }
//! ```

use std::fs::Metadata;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use walkdir::{DirEntry, WalkDir};

use super::{FileRecord, ScanWarning, WalkerConfig};

/// Directory walker for file discovery.
#[derive(Debug)]
pub struct Walker {
    /// Root path to walk
    root: PathBuf,
    /// Walker configuration
    config: WalkerConfig,
}

impl Walker {
    /// Create a new walker for the given path.
    ///
    /// # Arguments
    ///
    /// * `path` - Root directory to scan
    /// * `config` - Walker configuration options
    #[must_use]
    pub fn new(path: &Path, config: WalkerConfig) -> Self {
        Self {
            root: path.to_path_buf(),
            config,
        }
    }

    /// Check if a file passes size filters.
    fn passes_size_filter(&self, size: u64) -> bool {
        if let Some(min) = self.config.min_size {
            if size < min {
                return false;
            }
        }
        if let Some(max) = self.config.max_size {
            if size > max {
                return false;
            }
        }
        true
    }

    /// Walk the directory tree, yielding file records.
    ///
    /// Errors are yielded as [`ScanWarning`] values rather than stopping
    /// iteration. A directory that cannot be read is reported once and its
    /// subtree is skipped.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use dupsweep::scanner::{Walker, WalkerConfig};
    /// use std::path::Path;
    ///
    /// let walker = Walker::new(Path::new("."), WalkerConfig::default());
    /// let files: Vec<_> = walker.walk().filter_map(Result::ok).collect();
    /// println!("Found {} files", files.len());
    /// ```
    pub fn walk(&self) -> impl Iterator<Item = Result<FileRecord, ScanWarning>> + '_ {
        let skip_hidden = self.config.skip_hidden;

        WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            // The root is always entered, even if its own name looks hidden
            .filter_entry(move |entry| entry.depth() == 0 || !(skip_hidden && is_hidden(entry)))
            .filter_map(move |entry_result| match entry_result {
                Ok(entry) => self.process_entry(&entry),
                Err(e) => Some(Err(self.handle_walk_error(e))),
            })
    }

    /// Turn a directory entry into a record if it is a wanted regular file.
    fn process_entry(&self, entry: &DirEntry) -> Option<Result<FileRecord, ScanWarning>> {
        if entry.depth() == 0 {
            return None;
        }

        // file_type() comes from the directory listing and does not follow links
        let file_type = entry.file_type();
        if file_type.is_symlink() {
            log::trace!("Skipping symlink: {}", entry.path().display());
            return None;
        }
        if !file_type.is_file() {
            return None;
        }

        let metadata = match entry.metadata() {
            Ok(m) => m,
            Err(e) => return Some(Err(self.handle_walk_error(e))),
        };

        self.process_file(entry.path().to_path_buf(), &metadata)
    }

    /// Apply filters and build the record.
    fn process_file(
        &self,
        path: PathBuf,
        metadata: &Metadata,
    ) -> Option<Result<FileRecord, ScanWarning>> {
        if !metadata.is_file() {
            return None;
        }

        let size = metadata.len();
        if !self.passes_size_filter(size) {
            log::trace!(
                "Skipping file due to size filter ({}): {}",
                size,
                path.display()
            );
            return None;
        }

        let modified = metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH);

        Some(Ok(FileRecord::new(path, size, modified)))
    }

    /// Convert a walkdir error into a warning.
    fn handle_walk_error(&self, error: walkdir::Error) -> ScanWarning {
        let path = error
            .path()
            .map_or_else(|| self.root.clone(), Path::to_path_buf);

        match error.io_error().map(io::Error::kind) {
            Some(io::ErrorKind::PermissionDenied) => {
                log::debug!("Permission denied: {}", path.display());
                ScanWarning::PermissionDenied(path)
            }
            Some(io::ErrorKind::NotFound) => {
                log::debug!("Entry vanished during scan: {}", path.display());
                ScanWarning::Vanished(path)
            }
            _ => {
                log::debug!("Walker error for {}: {}", path.display(), error);
                match error.into_io_error() {
                    Some(source) => ScanWarning::Io { path, source },
                    None => ScanWarning::Walk {
                        message: "filesystem loop detected".to_string(),
                        path,
                    },
                }
            }
        }
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.'))
}
