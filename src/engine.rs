//! Version engine - derives versions from tag history and creates release tags
//!
//! Nothing is cached between calls: every operation re-reads the repository,
//! so the current version is always whatever the tags say right now.

use crate::analyzer::{analyze_messages, CommitAnalysis};
use crate::boundary::BoundaryWarning;
use crate::config::TaggingConfig;
use crate::domain::tag::TAG_GLOB;
use crate::domain::{DevVersion, Tag, Version, VersionBump};
use crate::error::{GitEpochError, Result};
use crate::git::Repository;
use tracing::{debug, info, warn};

/// Everything needed to decide on a release, read from one snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct ReleasePlan {
    pub current: Version,
    pub analysis: CommitAnalysis,
    /// `None` when the bump cannot be applied (e.g. major 999)
    pub next: Option<Version>,
}

impl ReleasePlan {
    pub fn bump(&self) -> VersionBump {
        self.analysis.bump
    }

    /// The next version, or the error that blocks it
    pub fn next_version(&self) -> Result<Version> {
        self.current.bump(self.bump())
    }

    /// The tag `auto` would create, if any
    pub fn proposed_tag(&self) -> Option<Tag> {
        if !self.bump().is_release() {
            return None;
        }
        self.next.as_ref().map(Tag::for_version)
    }

    /// A release is called for but the next version cannot be computed
    pub fn is_blocked(&self) -> bool {
        self.bump().is_release() && self.next.is_none()
    }
}

/// Terminal state of an `auto` run that did not fail
#[derive(Debug, Clone, PartialEq)]
pub enum AutoOutcome {
    /// No commit called for a release; nothing was written
    NoOp { current: Version, commits: usize },
    /// A new tag was created
    Tagged {
        previous: Version,
        bump: VersionBump,
        tag: Tag,
    },
}

/// Computes versions over a [Repository]
pub struct VersionEngine<R: Repository> {
    repo: R,
    tagging: TaggingConfig,
}

impl<R: Repository> VersionEngine<R> {
    pub fn new(repo: R, tagging: TaggingConfig) -> Self {
        VersionEngine { repo, tagging }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// The most recent release tag reachable from HEAD.
    ///
    /// Malformed `v*` tags are skipped with a warning. When one commit carries
    /// several valid tags the highest version wins.
    pub fn current_tag(&self) -> Result<Option<(Tag, Version)>> {
        for group in self.repo.reachable_tags(TAG_GLOB)? {
            let mut best: Option<(Tag, Version)> = None;

            for name in group {
                let tag = Tag::new(name);
                match tag.version() {
                    Ok(version) => {
                        if best.as_ref().map_or(true, |(_, v)| version > *v) {
                            best = Some((tag, version));
                        }
                    }
                    Err(GitEpochError::MalformedTag { tag, reason }) => {
                        let warning = BoundaryWarning::MalformedTag { tag, reason };
                        warn!("{}", warning);
                    }
                    Err(e) => return Err(e),
                }
            }

            if best.is_some() {
                return Ok(best);
            }
        }

        Ok(None)
    }

    /// Current version from tag history, or `0.0.0` when there is no tag
    pub fn current_version(&self) -> Result<Version> {
        let current = self
            .current_tag()?
            .map_or_else(Version::zero, |(_, version)| version);
        debug!(%current, "Resolved current version");
        Ok(current)
    }

    /// Messages of commits reachable from HEAD but not from `v<version>`.
    ///
    /// Falls back to the whole history when that tag does not exist. Oldest
    /// commit first.
    pub fn commits_since(&self, version: &Version) -> Result<Vec<String>> {
        let tag = Tag::for_version(version);
        let stop = self.repo.find_tag_oid(&tag.name)?;
        if stop.is_none() {
            debug!(tag = %tag, "Tag not found, reading full history");
        }

        Ok(self
            .repo
            .get_commits_since(stop)?
            .into_iter()
            .map(|c| c.message)
            .collect())
    }

    /// `<current>.devN` when HEAD is N >= 1 commits past the current version
    pub fn dev_version(&self) -> Result<Option<DevVersion>> {
        let current = self.current_version()?;
        let distance = self.commits_since(&current)?.len();
        Ok(DevVersion::new(current, distance))
    }

    /// Classify every commit since the current version.
    ///
    /// Never fails on version arithmetic; that only matters when tagging.
    pub fn analyze(&self) -> Result<CommitAnalysis> {
        let current = self.current_version()?;
        self.analyze_since(&current)
    }

    fn analyze_since(&self, current: &Version) -> Result<CommitAnalysis> {
        let messages = self.commits_since(current)?;
        let analysis = analyze_messages(&messages);

        info!(
            %current,
            commits = analysis.total(),
            unparsed = analysis.unparsed_count(),
            bump = %analysis.bump,
            "Analyzed commits"
        );
        Ok(analysis)
    }

    /// Current version, analysis and the resulting next version
    pub fn plan(&self) -> Result<ReleasePlan> {
        let current = self.current_version()?;
        let analysis = self.analyze_since(&current)?;
        let next = match Self::next_version(&current, analysis.bump) {
            Ok(next) => Some(next),
            Err(e) => {
                warn!(%current, bump = %analysis.bump, error = %e, "Release is blocked");
                None
            }
        };

        Ok(ReleasePlan {
            current,
            analysis,
            next,
        })
    }

    /// Apply one bump rule. `None` leaves the version unchanged.
    pub fn next_version(current: &Version, bump: VersionBump) -> Result<Version> {
        current.bump(bump)
    }

    /// Create the release tag for `version` at HEAD.
    ///
    /// Fails with `AlreadyExists` if the tag name is taken and with
    /// `NotAdvancing` unless `version` is strictly above the current version.
    pub fn tag(&self, version: &Version) -> Result<Tag> {
        let tag = self.check_tag(version)?;

        let message = self.tagging.message_for(&version.to_string());
        self.repo.create_tag(&tag.name, message.as_deref())?;
        info!(tag = %tag, "Created release tag");

        Ok(tag)
    }

    /// Run the checks of [VersionEngine::tag] without writing anything
    pub fn check_tag(&self, version: &Version) -> Result<Tag> {
        let tag = Tag::for_version(version);

        if self.repo.find_tag_oid(&tag.name)?.is_some() {
            return Err(GitEpochError::AlreadyExists(tag.name));
        }

        let current = self.current_version()?;
        if *version <= current {
            return Err(GitEpochError::NotAdvancing {
                requested: version.to_string(),
                current: current.to_string(),
            });
        }

        Ok(tag)
    }

    /// Analyze and tag in one step; no tag is written when the bump is none
    pub fn auto(&self) -> Result<AutoOutcome> {
        let plan = self.plan()?;

        if !plan.bump().is_release() {
            debug!(current = %plan.current, "No release needed");
            return Ok(AutoOutcome::NoOp {
                current: plan.current,
                commits: plan.analysis.total(),
            });
        }

        let next = plan.next_version()?;
        let tag = self.tag(&next)?;
        Ok(AutoOutcome::Tagged {
            previous: plan.current,
            bump: plan.bump(),
            tag,
        })
    }
}
