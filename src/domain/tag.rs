use crate::domain::Version;
use crate::error::{GitEpochError, Result};
use std::fmt;

/// Prefix every release tag carries
pub const TAG_PREFIX: &str = "v";

/// Glob handed to git when listing candidate release tags
pub const TAG_GLOB: &str = "v*";

/// Represents a git tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
}

impl Tag {
    /// Create a new tag from a string
    pub fn new(name: impl Into<String>) -> Self {
        Tag { name: name.into() }
    }

    /// The release tag for a version (e.g. Version(1,3,2,7) -> "v1003.2.7")
    pub fn for_version(version: &Version) -> Self {
        Tag::new(format!("{}{}", TAG_PREFIX, version))
    }

    /// Whether the name carries the release prefix at all
    pub fn is_release_candidate(&self) -> bool {
        self.name.starts_with(TAG_PREFIX)
    }

    /// Decode the version this tag marks.
    ///
    /// Fails with `MalformedTag` when the name has the release prefix but the
    /// rest is not a canonical version, and when the prefix is missing.
    pub fn version(&self) -> Result<Version> {
        let body = self.name.strip_prefix(TAG_PREFIX).ok_or_else(|| {
            GitEpochError::malformed_tag(&self.name, format!("missing '{}' prefix", TAG_PREFIX))
        })?;

        Version::parse(body).map_err(|e| GitEpochError::malformed_tag(&self.name, e.to_string()))
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
