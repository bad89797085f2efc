use crate::domain::VersionBump;
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Header grammar: `type(scope)!: description`
const HEADER_PATTERN: &str =
    r"^(?P<type>[A-Za-z]+)(?:\((?P<scope>[^()\r\n]+)\))?(?P<breaking>!)?:\s+(?P<description>\S.*)$";

/// Body line prefix that marks a breaking change
pub const BREAKING_CHANGE_TOKEN: &str = "BREAKING CHANGE:";

fn header_regex() -> Option<&'static Regex> {
    static HEADER: OnceLock<Option<Regex>> = OnceLock::new();
    HEADER.get_or_init(|| Regex::new(HEADER_PATTERN).ok()).as_ref()
}

/// The fixed conventional commit vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CommitType {
    Feat,
    Fix,
    Perf,
    Docs,
    Style,
    Refactor,
    Test,
    Chore,
    Build,
    Ci,
    Epoch,
}

impl CommitType {
    pub const ALL: [CommitType; 11] = [
        CommitType::Feat,
        CommitType::Fix,
        CommitType::Perf,
        CommitType::Docs,
        CommitType::Style,
        CommitType::Refactor,
        CommitType::Test,
        CommitType::Chore,
        CommitType::Build,
        CommitType::Ci,
        CommitType::Epoch,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CommitType::Feat => "feat",
            CommitType::Fix => "fix",
            CommitType::Perf => "perf",
            CommitType::Docs => "docs",
            CommitType::Style => "style",
            CommitType::Refactor => "refactor",
            CommitType::Test => "test",
            CommitType::Chore => "chore",
            CommitType::Build => "build",
            CommitType::Ci => "ci",
            CommitType::Epoch => "epoch",
        }
    }

    /// Bump implied by the type alone, before breaking-change escalation
    pub fn base_bump(&self) -> VersionBump {
        match self {
            CommitType::Feat => VersionBump::Minor,
            CommitType::Fix | CommitType::Perf => VersionBump::Patch,
            CommitType::Docs
            | CommitType::Style
            | CommitType::Refactor
            | CommitType::Test
            | CommitType::Chore
            | CommitType::Build
            | CommitType::Ci => VersionBump::None,
            CommitType::Epoch => VersionBump::Epoch,
        }
    }
}

impl fmt::Display for CommitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommitType {
    type Err = String;

    /// Case-sensitive: "Feat" is not a commit type
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CommitType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("Unknown commit type: {}", s))
    }
}

/// Parsed representation of a conventional commit message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommit {
    pub r#type: CommitType,
    pub scope: Option<String>,
    pub description: String,
    pub body: Option<String>,
    pub is_breaking_change: bool,
}

impl ParsedCommit {
    /// Parse a commit message according to the conventional commits header
    /// grammar. Returns `None` for anything that does not follow it.
    ///
    /// Supports:
    /// - type(scope)!: description
    /// - type(scope): description
    /// - type!: description
    /// - type: description
    pub fn parse(message: &str) -> Option<Self> {
        let message = message.trim();
        let (header, rest) = match message.split_once('\n') {
            Some((header, rest)) => (header.trim_end_matches('\r'), Some(rest)),
            None => (message, None),
        };

        let captures = header_regex()?.captures(header)?;
        let r#type = captures.name("type")?.as_str().parse::<CommitType>().ok()?;
        let scope = captures.name("scope").map(|m| m.as_str().to_string());
        let has_exclamation = captures.name("breaking").is_some();
        let description = captures.name("description")?.as_str().trim_end().to_string();

        let body = rest
            .map(|r| r.trim_start_matches(|c: char| c == '\r' || c == '\n'))
            .filter(|r| !r.is_empty())
            .map(str::to_string);

        let is_breaking_change =
            has_exclamation || body.as_deref().map_or(false, has_breaking_change_footer);

        Some(ParsedCommit {
            r#type,
            scope,
            description,
            body,
            is_breaking_change,
        })
    }

    /// Effective bump: breaking escalates to major, but epoch always stays epoch
    pub fn bump(&self) -> VersionBump {
        let base = self.r#type.base_bump();
        if self.is_breaking_change {
            base.max(VersionBump::Major)
        } else {
            base
        }
    }
}

impl fmt::Display for ParsedCommit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.r#type)?;
        if let Some(scope) = &self.scope {
            write!(f, "({})", scope)?;
        }
        if self.is_breaking_change {
            write!(f, "!")?;
        }
        write!(f, ": {}", self.description)
    }
}

/// Only lines that start with the token count; mid-line mentions do not
fn has_breaking_change_footer(body: &str) -> bool {
    body.lines().any(|line| line.starts_with(BREAKING_CHANGE_TOKEN))
}

/// One commit as seen by an analysis run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    pub message: String,
    pub parsed: Option<ParsedCommit>,
}

impl CommitRecord {
    pub fn is_conventional(&self) -> bool {
        self.parsed.is_some()
    }

    /// Non-conventional commits carry no bump signal
    pub fn bump(&self) -> VersionBump {
        self.parsed
            .as_ref()
            .map_or(VersionBump::None, ParsedCommit::bump)
    }

    /// First line of the raw message
    pub fn summary(&self) -> &str {
        self.message.trim().lines().next().unwrap_or("")
    }
}

/// Classify a raw commit message
pub fn classify(message: &str) -> CommitRecord {
    CommitRecord {
        message: message.to_string(),
        parsed: ParsedCommit::parse(message),
    }
}
