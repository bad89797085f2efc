use crate::error::{GitEpochError, Result};
use crate::git::CommitInfo;
use git2::{ErrorCode, Oid, Repository as Git2Repo, RepositoryOpenFlags, Sort};
use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Discover the git repository containing `path`.
    ///
    /// Fails with `NoRepository` when no git metadata is found in `path` or
    /// any parent directory. Honours `GIT_CEILING_DIRECTORIES` like git does.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let ceilings: Vec<PathBuf> = env::var_os("GIT_CEILING_DIRECTORIES")
            .map(|dirs| env::split_paths(&dirs).collect())
            .unwrap_or_default();

        let repo = Git2Repo::open_ext(path, RepositoryOpenFlags::empty(), &ceilings)
            .map_err(|e| {
                if e.code() == ErrorCode::NotFound {
                    GitEpochError::no_repository(format!("{}: {}", path.display(), e.message()))
                } else {
                    GitEpochError::Git(e)
                }
            })?;

        debug!(git_dir = %repo.path().display(), "Opened repository");
        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    /// Working tree root, if the repository is not bare
    pub fn workdir(&self) -> Option<&Path> {
        self.repo.workdir()
    }

    /// Map every tag matching `glob` to the commit it marks
    fn tags_by_commit(&self, glob: &str) -> Result<HashMap<Oid, Vec<String>>> {
        let mut by_commit: HashMap<Oid, Vec<String>> = HashMap::new();

        for name in self.repo.tag_names(Some(glob))?.iter().flatten() {
            match self.find_tag_commit(name) {
                Ok(Some(oid)) => by_commit.entry(oid).or_default().push(name.to_string()),
                Ok(None) => {}
                // Tags pointing at trees or blobs cannot mark a release
                Err(e) => debug!(tag = name, error = %e, "Skipping tag without a commit target"),
            }
        }

        for names in by_commit.values_mut() {
            names.sort();
        }

        Ok(by_commit)
    }

    fn find_tag_commit(&self, tag_name: &str) -> std::result::Result<Option<Oid>, git2::Error> {
        match self.repo.find_reference(&format!("refs/tags/{}", tag_name)) {
            Ok(reference) => Ok(Some(reference.peel_to_commit()?.id())),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }
}

impl super::Repository for Git2Repository {
    fn head_oid(&self) -> Result<Option<Oid>> {
        match self.repo.head() {
            Ok(head) => Ok(Some(head.peel_to_commit()?.id())),
            Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn get_commits_since(&self, stop: Option<Oid>) -> Result<Vec<CommitInfo>> {
        let head = match self.head_oid()? {
            Some(oid) => oid,
            None => return Ok(Vec::new()),
        };

        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::REVERSE)?;
        revwalk.push(head)?;
        if let Some(stop) = stop {
            revwalk.hide(stop)?;
        }

        let mut commits = Vec::new();
        for oid_result in revwalk {
            let oid = oid_result?;
            let commit = self.repo.find_commit(oid)?;

            commits.push(CommitInfo {
                hash: oid.to_string(),
                message: String::from_utf8_lossy(commit.message_bytes()).into_owned(),
                author: commit.author().name().unwrap_or("unknown").to_string(),
            });
        }

        debug!(count = commits.len(), ?stop, "Collected commits");
        Ok(commits)
    }

    fn find_tag_oid(&self, tag_name: &str) -> Result<Option<Oid>> {
        Ok(self.find_tag_commit(tag_name)?)
    }

    fn reachable_tags(&self, glob: &str) -> Result<Vec<Vec<String>>> {
        let head = match self.head_oid()? {
            Some(oid) => oid,
            None => return Ok(Vec::new()),
        };

        let mut by_commit = self.tags_by_commit(glob)?;
        if by_commit.is_empty() {
            return Ok(Vec::new());
        }

        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        revwalk.push(head)?;

        let mut groups = Vec::new();
        for oid_result in revwalk {
            if let Some(names) = by_commit.remove(&oid_result?) {
                groups.push(names);
            }
            if by_commit.is_empty() {
                break;
            }
        }

        Ok(groups)
    }

    fn create_tag(&self, name: &str, message: Option<&str>) -> Result<()> {
        let head = self.repo.head()?.peel_to_commit()?;

        let created = match message {
            Some(message) => {
                let signature = self.repo.signature()?;
                self.repo
                    .tag(name, head.as_object(), &signature, message, false)
            }
            None => self.repo.tag_lightweight(name, head.as_object(), false),
        };

        match created {
            Ok(_) => {
                debug!(tag = name, commit = %head.id(), "Created tag");
                Ok(())
            }
            Err(e) if e.code() == ErrorCode::Exists => {
                Err(GitEpochError::AlreadyExists(name.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}
