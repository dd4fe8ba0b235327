//! Whole-content file signatures.
//!
//! # Overview
//!
//! A [`Signature`] is the content length combined with the BLAKE3 digest of
//! the full content. Two files with the same signature are treated as
//! duplicates. [`Hasher::contents_match`] offers a byte-for-byte check for
//! callers that do not want to rely on the digest alone.
//!
//! Each file is opened, read, and closed inside a single call; the handle is
//! dropped on every return path, including read failures.

use std::cmp::Ordering;
use std::fmt;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use serde::{Serialize, Serializer};

/// Buffer size for byte-for-byte comparison.
const COMPARE_BUFFER_SIZE: usize = 64 * 1024;

/// Content signature: byte length plus a 256-bit BLAKE3 digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature {
    len: u64,
    digest: [u8; 32],
}

impl Signature {
    /// Compute the signature of an in-memory buffer.
    #[must_use]
    pub fn of_bytes(content: &[u8]) -> Self {
        Self {
            len: content.len() as u64,
            digest: *blake3::hash(content).as_bytes(),
        }
    }

    /// Content length covered by this signature.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.len
    }

    /// Whether the signed content was empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Digest as a lowercase hexadecimal string.
    #[must_use]
    pub fn digest_hex(&self) -> String {
        hash_to_hex(&self.digest)
    }
}

impl Ord for Signature {
    fn cmp(&self, other: &Self) -> Ordering {
        self.len
            .cmp(&other.len)
            .then_with(|| self.digest.cmp(&other.digest))
    }
}

impl PartialOrd for Signature {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.len, self.digest_hex())
    }
}

impl Serialize for Signature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Convert a digest to lowercase hex.
#[must_use]
pub fn hash_to_hex(hash: &[u8]) -> String {
    use std::fmt::Write as _;
    hash.iter().fold(String::with_capacity(hash.len() * 2), |mut s, b| {
        let _ = write!(s, "{b:02x}");
        s
    })
}

/// Errors that can occur while reading a file for its signature.
#[derive(thiserror::Error, Debug)]
pub enum HashError {
    /// The specified file was not found.
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    /// Permission was denied when reading the file.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// An I/O error occurred while reading the file.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

impl HashError {
    /// Classify an I/O error for `path`.
    #[must_use]
    pub fn from_io(path: &Path, error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: error,
            },
        }
    }

    /// Path of the file that could not be read.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound(p) | Self::PermissionDenied(p) => p,
            Self::Io { path, .. } => path,
        }
    }
}

/// Computes content signatures.
#[derive(Debug, Clone, Default)]
pub struct Hasher {
    _private: (),
}

impl Hasher {
    /// Create a new hasher.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute the signature of a file by reading its whole content.
    ///
    /// The entire file is loaded into memory.
    ///
    /// # Errors
    ///
    /// Returns [`HashError`] if the file cannot be opened or read.
    pub fn signature(&self, path: &Path) -> Result<Signature, HashError> {
        let content = fs::read(path).map_err(|e| HashError::from_io(path, e))?;
        log::trace!("Signed {} ({} bytes)", path.display(), content.len());
        Ok(Signature::of_bytes(&content))
    }

    /// Compare two files byte-for-byte.
    ///
    /// Streams both files in fixed-size chunks and stops at the first
    /// difference.
    ///
    /// # Errors
    ///
    /// Returns [`HashError`] naming whichever file could not be read.
    pub fn contents_match(&self, a: &Path, b: &Path) -> Result<bool, HashError> {
        let mut reader_a = open_buffered(a)?;
        let mut reader_b = open_buffered(b)?;

        loop {
            let chunk_a = reader_a.fill_buf().map_err(|e| HashError::from_io(a, e))?;
            let chunk_b = reader_b.fill_buf().map_err(|e| HashError::from_io(b, e))?;

            if chunk_a.is_empty() && chunk_b.is_empty() {
                return Ok(true);
            }

            let n = chunk_a.len().min(chunk_b.len());
            if n == 0 || chunk_a[..n] != chunk_b[..n] {
                return Ok(false);
            }

            reader_a.consume(n);
            reader_b.consume(n);
        }
    }
}

fn open_buffered(path: &Path) -> Result<BufReader<File>, HashError> {
    let file = File::open(path).map_err(|e| HashError::from_io(path, e))?;
    Ok(BufReader::with_capacity(COMPARE_BUFFER_SIZE, file))
}
