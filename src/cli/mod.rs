//! Command line interface for git-epoch.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::domain::VersionBump;
use crate::error::Result;

pub mod orchestration;

/// Derive epoch-aware semantic versions from conventional commits and tag releases
#[derive(Parser, Debug)]
#[command(name = "git-epoch")]
#[command(version)]
pub struct Cli {
    /// Repository path (any directory inside the work tree)
    #[arg(short = 'C', long = "repo", default_value = ".", global = true)]
    pub repo: PathBuf,

    /// Custom configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the current version and its components
    Version,
    /// Classify commits since the current version and report the bump
    Analyze,
    /// Create a release tag with an explicit bump
    Tag {
        #[arg(value_enum)]
        level: BumpLevel,

        /// Preview the tag without creating it
        #[arg(long)]
        dry_run: bool,
    },
    /// Analyze and tag the next version if any commit calls for a release
    Auto {
        /// Preview the tag without creating it
        #[arg(long)]
        dry_run: bool,
    },
}

/// Bump levels accepted by `tag`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BumpLevel {
    Patch,
    Minor,
    Major,
    Epoch,
}

impl From<BumpLevel> for VersionBump {
    fn from(level: BumpLevel) -> Self {
        match level {
            BumpLevel::Patch => VersionBump::Patch,
            BumpLevel::Minor => VersionBump::Minor,
            BumpLevel::Major => VersionBump::Major,
            BumpLevel::Epoch => VersionBump::Epoch,
        }
    }
}

impl Cli {
    /// Executes the CLI command.
    pub fn execute(self) -> Result<()> {
        let session = orchestration::Session::open(&self.repo, self.config.as_deref())?;

        match self.command {
            Commands::Version => orchestration::run_version(&session),
            Commands::Analyze => orchestration::run_analyze(&session),
            Commands::Tag { level, dry_run } => {
                orchestration::run_tag(&session, level.into(), dry_run)
            }
            Commands::Auto { dry_run } => orchestration::run_auto(&session, dry_run),
        }
    }
}
