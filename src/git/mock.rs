use crate::error::{GitEpochError, Result};
use crate::git::{CommitInfo, Repository};
use git2::Oid;
use std::cell::RefCell;
use std::collections::HashMap;

/// In-memory linear history for testing without actual git operations
pub struct MockRepository {
    commits: Vec<(Oid, CommitInfo)>,
    tags: RefCell<HashMap<String, Oid>>,
}

impl MockRepository {
    /// Create a new empty mock repository with an unborn HEAD
    pub fn new() -> Self {
        MockRepository {
            commits: Vec::new(),
            tags: RefCell::new(HashMap::new()),
        }
    }

    /// Append a commit on top of HEAD and return its OID
    pub fn add_commit(&mut self, message: impl Into<String>) -> Oid {
        let mut bytes = [0u8; 20];
        let index = self.commits.len() as u64 + 1;
        bytes[..8].copy_from_slice(&index.to_be_bytes());
        let oid = Oid::from_bytes(&bytes).unwrap_or_else(|_| Oid::zero());

        self.commits.push((
            oid,
            CommitInfo {
                hash: oid.to_string(),
                message: message.into(),
                author: "Test Author".to_string(),
            },
        ));
        oid
    }

    /// Add a tag pointing to an OID
    pub fn add_tag(&mut self, name: impl Into<String>, oid: Oid) {
        self.tags.get_mut().insert(name.into(), oid);
    }

    /// Tag the current HEAD commit
    pub fn tag_head(&mut self, name: impl Into<String>) {
        if let Some((oid, _)) = self.commits.last() {
            let oid = *oid;
            self.add_tag(name, oid);
        }
    }

    /// All tag names, sorted
    pub fn tag_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tags.borrow().keys().cloned().collect();
        names.sort();
        names
    }

    fn position(&self, oid: Oid) -> Option<usize> {
        self.commits.iter().position(|(id, _)| *id == oid)
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

/// `v*`-style globs: a trailing `*` matches any suffix, otherwise exact
fn glob_matches(glob: &str, name: &str) -> bool {
    match glob.strip_suffix('*') {
        Some(prefix) => name.starts_with(prefix),
        None => name == glob,
    }
}

impl Repository for MockRepository {
    fn head_oid(&self) -> Result<Option<Oid>> {
        Ok(self.commits.last().map(|(oid, _)| *oid))
    }

    fn get_commits_since(&self, stop: Option<Oid>) -> Result<Vec<CommitInfo>> {
        let start = stop
            .and_then(|oid| self.position(oid))
            .map_or(0, |index| index + 1);

        Ok(self.commits[start..]
            .iter()
            .map(|(_, info)| info.clone())
            .collect())
    }

    fn find_tag_oid(&self, tag_name: &str) -> Result<Option<Oid>> {
        Ok(self.tags.borrow().get(tag_name).copied())
    }

    fn reachable_tags(&self, glob: &str) -> Result<Vec<Vec<String>>> {
        let tags = self.tags.borrow();
        let mut groups = Vec::new();

        for (oid, _) in self.commits.iter().rev() {
            let mut names: Vec<String> = tags
                .iter()
                .filter(|(name, target)| *target == oid && glob_matches(glob, name))
                .map(|(name, _)| name.clone())
                .collect();
            if !names.is_empty() {
                names.sort();
                groups.push(names);
            }
        }

        Ok(groups)
    }

    fn create_tag(&self, name: &str, _message: Option<&str>) -> Result<()> {
        let head = self
            .head_oid()?
            .ok_or_else(|| GitEpochError::Git(git2::Error::from_str("HEAD is unborn")))?;

        let mut tags = self.tags.borrow_mut();
        if tags.contains_key(name) {
            return Err(GitEpochError::AlreadyExists(name.to_string()));
        }
        tags.insert(name.to_string(), head);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_repository_basic() {
        let mut repo = MockRepository::new();
        assert_eq!(repo.head_oid().unwrap(), None);

        let oid = repo.add_commit("test commit");
        assert_eq!(repo.head_oid().unwrap(), Some(oid));
    }

    #[test]
    fn test_mock_repository_tags() {
        let mut repo = MockRepository::new();
        let oid = repo.add_commit("first");

        repo.add_tag("v1.0.0", oid);

        assert_eq!(repo.find_tag_oid("v1.0.0").unwrap(), Some(oid));
        assert_eq!(repo.find_tag_oid("v2.0.0").unwrap(), None);
    }

    #[test]
    fn test_mock_repository_commits_since() {
        let mut repo = MockRepository::new();
        let first = repo.add_commit("first");
        repo.add_commit("second");
        repo.add_commit("third");

        let since: Vec<String> = repo
            .get_commits_since(Some(first))
            .unwrap()
            .into_iter()
            .map(|c| c.message)
            .collect();
        assert_eq!(since, vec!["second", "third"]);
        assert_eq!(repo.get_commits_since(None).unwrap().len(), 3);
    }

    #[test]
    fn test_mock_repository_reachable_tags() {
        let mut repo = MockRepository::new();
        repo.add_commit("first");
        repo.tag_head("v1.0.0");
        repo.tag_head("release-one");
        repo.add_commit("second");
        repo.tag_head("v1.1.0");

        assert_eq!(
            repo.reachable_tags("v*").unwrap(),
            vec![vec!["v1.1.0".to_string()], vec!["v1.0.0".to_string()]]
        );
    }

    #[test]
    fn test_mock_repository_create_tag_refuses_existing() {
        let mut repo = MockRepository::new();
        repo.add_commit("first");

        repo.create_tag("v1.0.0", None).unwrap();
        assert!(matches!(
            repo.create_tag("v1.0.0", None),
            Err(GitEpochError::AlreadyExists(_))
        ));
        assert_eq!(repo.tag_names(), vec!["v1.0.0"]);
    }

    #[test]
    fn test_mock_repository_create_tag_on_unborn_head() {
        let repo = MockRepository::default();
        assert!(matches!(
            repo.create_tag("v1.0.0", None),
            Err(GitEpochError::Git(_))
        ));
    }
}
