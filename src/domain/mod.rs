//! Domain logic - pure versioning rules independent of git operations

pub mod commit;
pub mod tag;
pub mod version;

pub use commit::{classify, CommitRecord, CommitType, ParsedCommit};
pub use tag::Tag;
pub use version::{DevVersion, Version, VersionBump};
