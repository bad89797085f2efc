//! Git operations abstraction layer
//!
//! The version engine only needs two things from version control: a log
//! reader (messages plus reachability between HEAD and a tag) and a tag
//! writer that refuses to overwrite. [Repository] captures exactly that.
//!
//! - [repository::Git2Repository]: a real implementation using the `git2` crate
//! - [mock::MockRepository]: an in-memory linear history for tests
//!
//! ```rust
//! # use git_epoch::git::Repository;
//! # fn example<R: Repository>(repo: &R) -> git_epoch::Result<()> {
//! let stop = repo.find_tag_oid("v1.0.0")?;
//! let commits = repo.get_commits_since(stop)?;
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;
use git2::Oid;

/// Commit information for analysis
#[derive(Debug, Clone, PartialEq)]
pub struct CommitInfo {
    /// The full commit hash
    pub hash: String,
    /// The commit message
    pub message: String,
    /// The commit author
    pub author: String,
}

/// Common git operation trait for abstraction
///
/// All methods return [crate::error::Result<T>]. Implementations map
/// "already exists" failures from tag creation to
/// [crate::error::GitEpochError::AlreadyExists] and everything else from the
/// git layer to [crate::error::GitEpochError::Git].
pub trait Repository {
    /// OID of the commit HEAD points at, or `None` on an unborn branch
    fn head_oid(&self) -> Result<Option<Oid>>;

    /// Commits reachable from HEAD but not from `stop`.
    ///
    /// With `stop = None` the whole history is returned. Results are in
    /// topological order, oldest first. An unborn HEAD yields no commits.
    fn get_commits_since(&self, stop: Option<Oid>) -> Result<Vec<CommitInfo>>;

    /// Commit a tag points at (annotated tags are peeled), or `None` if the
    /// tag does not exist
    fn find_tag_oid(&self, tag_name: &str) -> Result<Option<Oid>>;

    /// Tags matching `glob` that are reachable from HEAD, nearest first.
    ///
    /// Tags on the same commit are grouped together, sorted by name.
    fn reachable_tags(&self, glob: &str) -> Result<Vec<Vec<String>>>;

    /// Create a tag at HEAD.
    ///
    /// Lightweight when `message` is `None`, annotated otherwise. Never
    /// moves an existing tag.
    fn create_tag(&self, name: &str, message: Option<&str>) -> Result<()>;
}
