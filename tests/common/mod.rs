#![allow(dead_code)]

use git2::{Oid, Repository, Signature};
use std::path::Path;
use tempfile::TempDir;

/// A throwaway git repository in a temporary directory
pub struct TestRepo {
    pub dir: TempDir,
    pub repo: Repository,
}

impl TestRepo {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        {
            let mut config = repo.config().unwrap();
            config.set_str("user.name", "Test User").unwrap();
            config.set_str("user.email", "test@example.com").unwrap();
        }
        TestRepo { dir, repo }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    fn signature() -> Signature<'static> {
        Signature::now("Test User", "test@example.com").unwrap()
    }

    /// Commit an empty tree on top of HEAD
    pub fn commit(&self, message: &str) -> Oid {
        let parents: Vec<Oid> = match self.repo.head() {
            Ok(head) => vec![head.peel_to_commit().unwrap().id()],
            Err(_) => Vec::new(),
        };
        self.commit_with_parents(message, &parents, Some("HEAD"))
    }

    /// Commit with explicit parents, optionally moving `update_ref`
    pub fn commit_with_parents(&self, message: &str, parents: &[Oid], update_ref: Option<&str>) -> Oid {
        let sig = Self::signature();
        let tree_id = self.repo.treebuilder(None).unwrap().write().unwrap();
        let tree = self.repo.find_tree(tree_id).unwrap();
        let parents: Vec<git2::Commit> = parents
            .iter()
            .map(|oid| self.repo.find_commit(*oid).unwrap())
            .collect();
        let parent_refs: Vec<&git2::Commit> = parents.iter().collect();

        self.repo
            .commit(update_ref, &sig, &sig, message, &tree, &parent_refs)
            .unwrap()
    }

    /// Lightweight tag at HEAD
    pub fn tag(&self, name: &str) {
        let head = self.repo.head().unwrap().peel_to_commit().unwrap().id();
        self.tag_at(name, head);
    }

    pub fn tag_at(&self, name: &str, oid: Oid) {
        let object = self.repo.find_object(oid, None).unwrap();
        self.repo.tag_lightweight(name, &object, false).unwrap();
    }

    pub fn tag_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .repo
            .tag_names(None)
            .unwrap()
            .iter()
            .flatten()
            .map(str::to_string)
            .collect();
        names.sort();
        names
    }

    /// Message of an annotated tag, `None` for lightweight ones
    pub fn tag_message(&self, name: &str) -> Option<String> {
        let reference = self.repo.find_reference(&format!("refs/tags/{}", name)).unwrap();
        reference
            .peel_to_tag()
            .ok()
            .and_then(|tag| tag.message().map(str::to_string))
    }
}
