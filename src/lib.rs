pub mod analyzer;
pub mod boundary;
pub mod cli;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod git;
pub mod ui;

pub use engine::{AutoOutcome, ReleasePlan, VersionEngine};
pub use error::{GitEpochError, Result};
