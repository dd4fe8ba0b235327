//! Command-line interface definitions for dupsweep.
//!
//! # Example
//!
//! ```bash
//! # List duplicates (default)
//! dupsweep ~/Downloads
//!
//! # Delete every copy except the oldest
//! dupsweep ~/Downloads --action delete
//!
//! # Same, with the short form
//! dupsweep ~/Downloads --delete
//!
//! # Replace copies with hard links, confirming matches byte by byte
//! dupsweep ~/Downloads --action hardlink --paranoid
//!
//! # JSON report for scripting
//! dupsweep ~/Downloads --output json
//! ```

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::actions::Action;

/// Find duplicate files and list, delete, or hard-link them.
///
/// Files are grouped by size and then by a BLAKE3 content signature. The
/// oldest file in each group is kept untouched.
#[derive(Debug, Parser)]
#[command(name = "dupsweep")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all log output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Directory to scan for duplicates
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// What to do with duplicate copies
    #[arg(
        short,
        long,
        value_enum,
        env = "DUPSWEEP_ACTION",
        default_value = "list"
    )]
    pub action: ActionArg,

    /// Shorthand for `--action list`
    #[arg(long, conflicts_with_all = ["delete", "hardlink"])]
    pub list: bool,

    /// Shorthand for `--action delete`
    #[arg(long, conflicts_with = "hardlink")]
    pub delete: bool,

    /// Shorthand for `--action hardlink`
    #[arg(long)]
    pub hardlink: bool,

    /// Report format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Confirm signature matches with a byte-by-byte comparison
    #[arg(long)]
    pub paranoid: bool,

    /// Skip hidden files and directories (starting with .)
    #[arg(long)]
    pub skip_hidden: bool,

    /// Minimum file size to consider (e.g., 1KB, 1MB, 1GB)
    ///
    /// Supports suffixes: B, KB, KiB, MB, MiB, GB, GiB, TB, TiB
    #[arg(long, value_name = "SIZE", value_parser = parse_size)]
    pub min_size: Option<u64>,

    /// Maximum file size to consider (e.g., 1KB, 1MB, 1GB)
    ///
    /// Supports suffixes: B, KB, KiB, MB, MiB, GB, GiB, TB, TiB
    #[arg(long, value_name = "SIZE", value_parser = parse_size)]
    pub max_size: Option<u64>,

    /// Print fatal errors as JSON on stderr
    #[arg(long)]
    pub json_errors: bool,
}

impl Cli {
    /// The action requested, with shorthand flags taking precedence over
    /// `--action`.
    #[must_use]
    pub fn action(&self) -> Action {
        if self.hardlink {
            Action::HardLink
        } else if self.delete {
            Action::Delete
        } else if self.list {
            Action::ReportOnly
        } else {
            self.action.into()
        }
    }
}

/// Values accepted by `--action`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ActionArg {
    /// List duplicates without touching them
    #[default]
    List,
    /// Delete every copy except the oldest
    Delete,
    /// Replace copies with hard links to the oldest
    Hardlink,
}

impl From<ActionArg> for Action {
    fn from(arg: ActionArg) -> Self {
        match arg {
            ActionArg::List => Action::ReportOnly,
            ActionArg::Delete => Action::Delete,
            ActionArg::Hardlink => Action::HardLink,
        }
    }
}

/// Output format for the report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// JSON for scripting
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Parse a human-readable size string into bytes.
///
/// Supports suffixes: B, KB, KiB, MB, MiB, GB, GiB, TB, TiB
/// Case-insensitive. Numbers without suffix are treated as bytes.
///
/// # Examples
///
/// ```
/// use dupsweep::cli::parse_size;
///
/// assert_eq!(parse_size("1024").unwrap(), 1024);
/// assert_eq!(parse_size("1KB").unwrap(), 1000);
/// assert_eq!(parse_size("1KiB").unwrap(), 1024);
/// ```
///
/// # Errors
///
/// Returns an error if the string is empty, contains an invalid number,
/// or has an unknown size suffix.
pub fn parse_size(s: &str) -> Result<u64, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("Size cannot be empty".to_string());
    }

    let (num_str, suffix) = match s.find(|c: char| !c.is_ascii_digit() && c != '.') {
        Some(idx) => (&s[..idx], s[idx..].trim().to_uppercase()),
        None => (s, String::new()),
    };

    let num: f64 = num_str
        .parse()
        .map_err(|_| format!("Invalid number: '{num_str}'"))?;

    let multiplier: u64 = match suffix.as_str() {
        "" | "B" => 1,
        "KB" | "K" => 1_000,
        "KIB" => 1_024,
        "MB" | "M" => 1_000_000,
        "MIB" => 1_048_576,
        "GB" | "G" => 1_000_000_000,
        "GIB" => 1_073_741_824,
        "TB" | "T" => 1_000_000_000_000,
        "TIB" => 1_099_511_627_776,
        _ => return Err(format!("Unknown size suffix: '{suffix}'")),
    };

    Ok((num * multiplier as f64) as u64)
}
