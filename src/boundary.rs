use std::fmt;

/// Non-fatal conditions met while reading release history.
/// These are reported to the user but never stop a command.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// No new commits since the latest tag
    NoNewCommits {
        latest_tag: String,
        current_commit_hash: String,
    },
    /// Tag carries the release prefix but its body is not a version
    MalformedTag { tag: String, reason: String },
    /// Commit message does not follow the conventional header format
    NonConventionalCommit { summary: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::NoNewCommits {
                latest_tag,
                current_commit_hash,
            } => {
                let short_hash = if current_commit_hash.len() > 7 {
                    &current_commit_hash[..7]
                } else {
                    current_commit_hash.as_str()
                };
                write!(
                    f,
                    "No new commits since tag '{}' (current: {})",
                    latest_tag, short_hash
                )
            }
            BoundaryWarning::MalformedTag { tag, reason } => {
                write!(f, "Skipping malformed tag '{}': {}", tag, reason)
            }
            BoundaryWarning::NonConventionalCommit { summary } => {
                write!(f, "Not a conventional commit: '{}'", summary)
            }
        }
    }
}
