//! Duplicate detection module.
//!
//! This module provides functionality for:
//! - Size-based file grouping (Phase 1)
//! - Content signature comparison (Phase 2)
//! - Optional byte-for-byte confirmation
//! - Duplicate group management

pub mod finder;
pub mod groups;

pub use finder::{DuplicateFinder, FinderConfig, FinderOutcome, FinderStats};
pub use groups::{group_by_size, DuplicateGroup, GroupingStats};
