use crate::error::{GitEpochError, Result};
use std::fmt;
use std::str::FromStr;

/// Number of major versions that fit inside one epoch in the printed form.
pub const MAJOR_SPAN: u64 = 1000;

/// Epoch semantic version.
///
/// Printed as `E.MINOR.PATCH` where `E = epoch * 1000 + major`, so the
/// tuple `(1, 3, 2, 7)` renders as `1003.2.7`. Field order is the ordering
/// used for comparisons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub epoch: u64,
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Version {
    /// Create a new version
    pub const fn new(epoch: u64, major: u64, minor: u64, patch: u64) -> Self {
        Version {
            epoch,
            major,
            minor,
            patch,
        }
    }

    /// The zero version reported when no release tag exists yet
    pub const fn zero() -> Self {
        Version::new(0, 0, 0, 0)
    }

    /// The fused `epoch * 1000 + major` component of the printed form.
    ///
    /// Saturates for tuples that cannot be encoded; [Version::bump] never
    /// produces one.
    pub fn encoded_major(&self) -> u64 {
        self.checked_encoded_major().unwrap_or(u64::MAX)
    }

    /// `epoch * 1000 + major`, or `None` when it does not fit in a u64
    pub fn checked_encoded_major(&self) -> Option<u64> {
        self.epoch
            .checked_mul(MAJOR_SPAN)
            .and_then(|e| e.checked_add(self.major))
    }

    /// Parse the canonical dotted form (e.g. "1003.2.7" -> Version(1,3,2,7)).
    ///
    /// Only plain `X.Y.Z` bodies are accepted: no `v` prefix, no pre-release
    /// or build metadata, no leading zeros.
    pub fn parse(s: &str) -> Result<Self> {
        let parsed = semver::Version::parse(s)
            .map_err(|e| GitEpochError::version(format!("Invalid version '{}': {}", s, e)))?;

        if !parsed.pre.is_empty() || !parsed.build.is_empty() {
            return Err(GitEpochError::version(format!(
                "Invalid version '{}': expected X.Y.Z without suffixes",
                s
            )));
        }

        Ok(Version {
            epoch: parsed.major / MAJOR_SPAN,
            major: parsed.major % MAJOR_SPAN,
            minor: parsed.minor,
            patch: parsed.patch,
        })
    }

    /// Apply exactly one bump rule, resetting every lower component.
    ///
    /// `None` returns the version unchanged. A major bump that would reach
    /// the epoch boundary, and any arithmetic overflow, is rejected because
    /// the result could not be printed and parsed back.
    pub fn bump(&self, bump_type: VersionBump) -> Result<Self> {
        let next = match bump_type {
            VersionBump::None => *self,
            VersionBump::Patch => Version {
                patch: increment(self.patch, "patch")?,
                ..*self
            },
            VersionBump::Minor => Version {
                minor: increment(self.minor, "minor")?,
                patch: 0,
                ..*self
            },
            VersionBump::Major => {
                let major = increment(self.major, "major")?;
                if major >= MAJOR_SPAN {
                    return Err(GitEpochError::version(format!(
                        "Major version {} cannot be bumped past {} within epoch {}; bump the epoch instead",
                        self.major,
                        MAJOR_SPAN - 1,
                        self.epoch
                    )));
                }
                Version::new(self.epoch, major, 0, 0)
            }
            VersionBump::Epoch => Version::new(increment(self.epoch, "epoch")?, 0, 0, 0),
        };

        if next.checked_encoded_major().is_none() {
            return Err(GitEpochError::version(format!(
                "Version with epoch {} and major {} cannot be encoded",
                next.epoch, next.major
            )));
        }

        Ok(next)
    }
}

fn increment(value: u64, component: &str) -> Result<u64> {
    value
        .checked_add(1)
        .ok_or_else(|| GitEpochError::version(format!("{} component overflows", component)))
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.encoded_major(), self.minor, self.patch)
    }
}

impl FromStr for Version {
    type Err = GitEpochError;

    fn from_str(s: &str) -> Result<Self> {
        Version::parse(s)
    }
}

/// Version bump decision, ordered by severity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum VersionBump {
    #[default]
    None,
    Patch,
    Minor,
    Major,
    Epoch,
}

impl VersionBump {
    /// All bump levels from least to most severe
    pub const ALL: [VersionBump; 5] = [
        VersionBump::None,
        VersionBump::Patch,
        VersionBump::Minor,
        VersionBump::Major,
        VersionBump::Epoch,
    ];

    /// Lowercase name used in output and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            VersionBump::None => "none",
            VersionBump::Patch => "patch",
            VersionBump::Minor => "minor",
            VersionBump::Major => "major",
            VersionBump::Epoch => "epoch",
        }
    }

    /// Whether this decision calls for a new tag
    pub fn is_release(&self) -> bool {
        *self != VersionBump::None
    }
}

impl fmt::Display for VersionBump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for VersionBump {
    type Err = GitEpochError;

    fn from_str(s: &str) -> Result<Self> {
        VersionBump::ALL
            .iter()
            .copied()
            .find(|bump| bump.as_str() == s)
            .ok_or_else(|| GitEpochError::version(format!("Unknown bump type: {}", s)))
    }
}

/// A version with a commit-distance suffix, e.g. `1003.2.7.dev4`.
///
/// Only exists when HEAD is at least one commit past the tagged version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DevVersion {
    base: Version,
    distance: usize,
}

impl DevVersion {
    /// Returns `None` for a distance of zero, which is a clean tagged state
    pub fn new(base: Version, distance: usize) -> Option<Self> {
        (distance > 0).then_some(DevVersion { base, distance })
    }

    pub fn base(&self) -> Version {
        self.base
    }

    pub fn distance(&self) -> usize {
        self.distance
    }
}

impl fmt::Display for DevVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.dev{}", self.base, self.distance)
    }
}
