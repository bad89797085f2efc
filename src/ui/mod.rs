//! User interface module - terminal output.
//!
//! The tool never prompts; every command runs to completion or fails with a
//! typed error. Formatting lives in `formatter`.

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_boundary_warning, display_error, display_manual_push_instruction,
    display_proposed_tag, display_release_plan, display_status, display_success,
    display_version,
};
