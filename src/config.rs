//! Run configuration.
//!
//! There is no configuration file. A [`Config`] is built once from the
//! parsed command line (where clap already applied environment fallbacks)
//! and handed to [`crate::run`].

use anyhow::{bail, Result};
use std::path::PathBuf;

use crate::actions::Action;
use crate::cli::{Cli, OutputFormat};
use crate::duplicates::FinderConfig;
use crate::scanner::WalkerConfig;

/// Settings for one run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory to scan
    pub root: PathBuf,
    /// What to do with duplicate copies
    pub action: Action,
    /// Traversal filters
    pub walker: WalkerConfig,
    /// Grouping options
    pub finder: FinderConfig,
    /// Report format
    pub output: OutputFormat,
}

impl Config {
    /// Settings with defaults for everything but the root.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            action: Action::default(),
            walker: WalkerConfig::default(),
            finder: FinderConfig::default(),
            output: OutputFormat::default(),
        }
    }

    /// Set the action.
    #[must_use]
    pub fn with_action(mut self, action: Action) -> Self {
        self.action = action;
        self
    }

    /// Set the report format.
    #[must_use]
    pub fn with_output(mut self, output: OutputFormat) -> Self {
        self.output = output;
        self
    }

    /// Build the run configuration from parsed arguments.
    ///
    /// # Errors
    ///
    /// Fails if `--min-size` is larger than `--max-size`.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        if let (Some(min), Some(max)) = (cli.min_size, cli.max_size) {
            if min > max {
                bail!("--min-size ({min}) is larger than --max-size ({max})");
            }
        }

        let walker = WalkerConfig::default()
            .with_skip_hidden(cli.skip_hidden)
            .with_min_size(cli.min_size)
            .with_max_size(cli.max_size);
        let finder = FinderConfig::default().with_paranoid(cli.paranoid);

        Ok(Self {
            root: cli.path.clone(),
            action: cli.action(),
            walker,
            finder,
            output: cli.output,
        })
    }
}
