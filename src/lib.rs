//! dupsweep - duplicate file finder
//!
//! Scans a directory tree, groups files with identical content (size, then
//! a BLAKE3 signature), keeps the oldest file of each group, and lists,
//! deletes, or hard-links the other copies.
//!
//! The pipeline runs in three sequential stages:
//! - [`scanner`]: walk the tree and collect regular files
//! - [`duplicates`]: group the files into duplicate groups
//! - [`actions`]: pick the canonical file and apply the action

pub mod actions;
pub mod cli;
pub mod config;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod output;
pub mod scanner;

use std::io::{self, Write};

use anyhow::{Context, Result};

use crate::actions::{ResolveReport, Resolver};
use crate::cli::{Cli, OutputFormat};
use crate::config::Config;
use crate::duplicates::DuplicateFinder;
use crate::error::ExitCode;
use crate::output::{JsonOutput, RunSummary, TextOutput};

/// Run the binary's logic for parsed arguments, writing the report to
/// stdout.
///
/// # Errors
///
/// Fails on invalid configuration, an invalid root, or when the report
/// cannot be written. Nothing is written to stdout in the first two cases.
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    let config = Config::from_cli(&cli)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(&config, &mut out)
}

/// Scan, group, resolve and report.
///
/// Per-entry problems never fail the run: they are logged, listed in the
/// report, and the exit code stays [`ExitCode::Success`].
///
/// # Errors
///
/// Fails if the root is missing or not a directory (before anything is
/// written to `out`), or when writing the report fails.
pub fn run<W: Write>(config: &Config, out: &mut W) -> Result<ExitCode> {
    let scanned = scanner::scan(&config.root, config.walker.clone())?;
    for warning in &scanned.warnings {
        log::warn!("Skipped: {}", warning);
    }
    log::info!(
        "Scanned {}: {} files",
        config.root.display(),
        scanned.files.len()
    );

    let mut summary = RunSummary::new(&config.root, &scanned);

    let found = DuplicateFinder::new(config.finder.clone()).find_duplicates(scanned.files);
    for warning in &found.warnings {
        log::warn!("Unreadable: {}", warning);
        summary.add_skipped(warning.path(), warning);
    }
    log::info!(
        "Found {} duplicate groups ({} copies)",
        found.stats.duplicate_groups,
        found.stats.duplicate_files
    );

    let report = Resolver::new(config.action).resolve(found.groups);
    log_failures(&report);

    match config.output {
        OutputFormat::Text => TextOutput::new(&summary, &report)
            .write_to(out)
            .context("Failed to write report")?,
        OutputFormat::Json => JsonOutput::new(&summary, &report)
            .write_to(out, true)
            .context("Failed to write JSON report")?,
    }
    out.flush().context("Failed to write report")?;

    Ok(ExitCode::Success)
}

fn log_failures(report: &ResolveReport) {
    for group in &report.groups {
        for member in &group.duplicates {
            let Some(err) = member.resolution.error() else {
                continue;
            };
            if member.resolution.is_destructive() {
                log::error!(
                    "{} was removed but could not be linked to {}: {}",
                    member.record.path.display(),
                    group.canonical.path.display(),
                    err
                );
            } else {
                log::warn!("{} failed: {}", report.action, err);
            }
        }
    }
}
