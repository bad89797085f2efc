use thiserror::Error;

/// Unified error type for git-epoch operations
#[derive(Error, Debug)]
pub enum GitEpochError {
    #[error("Not inside a git repository: {0}")]
    NoRepository(String),

    #[error("Malformed version tag '{tag}': {reason}")]
    MalformedTag { tag: String, reason: String },

    #[error("Tag '{0}' already exists")]
    AlreadyExists(String),

    #[error("Version {requested} does not advance past current version {current}")]
    NotAdvancing { requested: String, current: String },

    #[error("Version error: {0}")]
    Version(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in git-epoch
pub type Result<T> = std::result::Result<T, GitEpochError>;

impl GitEpochError {
    /// Create a no-repository error with context
    pub fn no_repository(msg: impl Into<String>) -> Self {
        GitEpochError::NoRepository(msg.into())
    }

    /// Create a malformed tag error
    pub fn malformed_tag(tag: impl Into<String>, reason: impl Into<String>) -> Self {
        GitEpochError::MalformedTag {
            tag: tag.into(),
            reason: reason.into(),
        }
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        GitEpochError::Version(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        GitEpochError::Config(msg.into())
    }

    /// Process exit code reported by the CLI for this kind of failure.
    ///
    /// 1 is left for unexpected failures and 2 for argument errors (clap).
    pub fn exit_code(&self) -> i32 {
        match self {
            GitEpochError::NoRepository(_) => 3,
            GitEpochError::AlreadyExists(_) => 4,
            GitEpochError::NotAdvancing { .. } => 5,
            GitEpochError::MalformedTag { .. } => 6,
            GitEpochError::Version(_) => 7,
            GitEpochError::Config(_) => 8,
            GitEpochError::Git(_) => 9,
            GitEpochError::Io(_) => 10,
        }
    }
}
