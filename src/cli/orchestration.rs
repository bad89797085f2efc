//! Subcommand workflows
//!
//! Each `run_*` function drives the engine for one subcommand and prints the
//! result. Errors are returned untouched so `main` can map them to exit codes.

use std::path::Path;

use tracing::debug;

use crate::boundary::BoundaryWarning;
use crate::config::{load_config, Config};
use crate::domain::VersionBump;
use crate::engine::{AutoOutcome, ReleasePlan, VersionEngine};
use crate::error::Result;
use crate::git::{Git2Repository, Repository};
use crate::ui;

/// Remote named in the push hint printed after tagging
pub const DEFAULT_REMOTE: &str = "origin";

/// An opened repository plus the configuration that applies to it
pub struct Session<R: Repository = Git2Repository> {
    pub engine: VersionEngine<R>,
    pub config: Config,
}

impl Session<Git2Repository> {
    /// Open the repository containing `repo_path` and load its configuration
    pub fn open(repo_path: &Path, config_path: Option<&Path>) -> Result<Self> {
        let repo = Git2Repository::open(repo_path)?;
        let config = load_config(config_path, repo.workdir())?;
        debug!(?config, "Session ready");

        Ok(Session::new(repo, config))
    }
}

impl<R: Repository> Session<R> {
    pub fn new(repo: R, config: Config) -> Self {
        let engine = VersionEngine::new(repo, config.tagging.clone());
        Session { engine, config }
    }
}

/// `version`: current version, breakdown and dev version
pub fn run_version<R: Repository>(session: &Session<R>) -> Result<()> {
    let current = session.engine.current_version()?;
    let dev = if session.config.display.show_dev_version {
        session.engine.dev_version()?
    } else {
        None
    };

    ui::display_version(&current, dev.as_ref());
    Ok(())
}

/// `analyze`: bump decision, counts, commit listing, would-be tag
pub fn run_analyze<R: Repository>(session: &Session<R>) -> Result<()> {
    let plan = session.engine.plan()?;
    report_plan(session, &plan)?;
    Ok(())
}

/// `tag <level>`: forced bump from the current version
pub fn run_tag<R: Repository>(session: &Session<R>, bump: VersionBump, dry_run: bool) -> Result<()> {
    let current = session.engine.current_version()?;
    let next = VersionEngine::<R>::next_version(&current, bump)?;

    if dry_run {
        let tag = session.engine.check_tag(&next)?;
        ui::display_proposed_tag(&current, &tag.name);
        ui::display_status(&format!("Dry run: tag {} was not created", tag));
        return Ok(());
    }

    let tag = session.engine.tag(&next)?;
    ui::display_success(&format!("Created tag {} ({} bump from {})", tag, bump, current));
    ui::display_manual_push_instruction(&tag.name, DEFAULT_REMOTE);
    Ok(())
}

/// `auto`: analyze, then tag only when a release is called for
pub fn run_auto<R: Repository>(session: &Session<R>, dry_run: bool) -> Result<()> {
    if dry_run {
        let plan = session.engine.plan()?;
        report_plan(session, &plan)?;
        if plan.bump().is_release() {
            let tag = session.engine.check_tag(&plan.next_version()?)?;
            ui::display_status(&format!("Dry run: tag {} was not created", tag));
        }
        return Ok(());
    }

    match session.engine.auto()? {
        AutoOutcome::NoOp { current, commits } => {
            if commits == 0 {
                warn_no_new_commits(session)?;
            }
            ui::display_status(&format!(
                "No release needed: {} commit{} since {} carry no version bump",
                commits,
                if commits == 1 { "" } else { "s" },
                current
            ));
        }
        AutoOutcome::Tagged {
            previous,
            bump,
            tag,
        } => {
            ui::display_success(&format!("Created tag {} ({} bump from {})", tag, bump, previous));
            ui::display_manual_push_instruction(&tag.name, DEFAULT_REMOTE);
        }
    }

    Ok(())
}

fn report_plan<R: Repository>(session: &Session<R>, plan: &ReleasePlan) -> Result<()> {
    if plan.analysis.is_empty() {
        warn_no_new_commits(session)?;
    }
    for message in &plan.analysis.unparsed {
        let summary = message.trim().lines().next().unwrap_or("").to_string();
        ui::display_boundary_warning(&BoundaryWarning::NonConventionalCommit { summary });
    }

    ui::display_release_plan(plan, session.config.display.max_commits);
    Ok(())
}

/// Warn when HEAD sits exactly on the current release tag
fn warn_no_new_commits<R: Repository>(session: &Session<R>) -> Result<()> {
    let latest = session.engine.current_tag()?;
    let head = session.engine.repository().head_oid()?;

    if let (Some((tag, _)), Some(head)) = (latest, head) {
        ui::display_boundary_warning(&BoundaryWarning::NoNewCommits {
            latest_tag: tag.name,
            current_commit_hash: head.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::MockRepository;

    fn session(repo: MockRepository) -> Session<MockRepository> {
        Session::new(repo, Config::default())
    }

    #[test]
    fn test_run_tag_creates_tag() {
        let mut repo = MockRepository::new();
        repo.add_commit("feat: first");
        repo.tag_head("v1.0.0");
        repo.add_commit("docs: readme");

        let session = session(repo);
        run_tag(&session, VersionBump::Epoch, false).unwrap();
        assert_eq!(
            session.engine.repository().tag_names(),
            vec!["v1.0.0", "v1000.0.0"]
        );
    }

    #[test]
    fn test_run_tag_dry_run_writes_nothing() {
        let mut repo = MockRepository::new();
        repo.add_commit("feat: first");

        let session = session(repo);
        run_tag(&session, VersionBump::Minor, true).unwrap();
        assert!(session.engine.repository().tag_names().is_empty());
    }

    #[test]
    fn test_run_auto_noop() {
        let mut repo = MockRepository::new();
        repo.add_commit("chore: setup");
        repo.tag_head("v1.0.0");

        let session = session(repo);
        run_auto(&session, false).unwrap();
        assert_eq!(session.engine.repository().tag_names(), vec!["v1.0.0"]);
    }

    #[test]
    fn test_run_auto_dry_run_writes_nothing() {
        let mut repo = MockRepository::new();
        repo.add_commit("feat: first");

        let session = session(repo);
        run_auto(&session, true).unwrap();
        assert!(session.engine.repository().tag_names().is_empty());
    }

    #[test]
    fn test_run_version_and_analyze() {
        let mut repo = MockRepository::new();
        repo.add_commit("feat: first");
        repo.tag_head("v1003.2.7");
        repo.add_commit("update stuff");

        let session = session(repo);
        run_version(&session).unwrap();
        run_analyze(&session).unwrap();
    }
}
