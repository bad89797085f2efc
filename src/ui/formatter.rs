//! Pure formatting functions for UI output.
//!
//! `format_*` functions build the text and are unit tested; `display_*`
//! functions print it. Styling goes through `console`, which drops colour
//! codes automatically when the stream is not a terminal.

use crate::boundary::BoundaryWarning;
use crate::domain::{CommitRecord, DevVersion, Version, VersionBump};
use crate::engine::ReleasePlan;
use console::style;
use std::fmt::Write;

/// Commit summaries longer than this are cut in listings
const MAX_SUMMARY_WIDTH: usize = 72;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Current version with its component breakdown and, when given, the
/// development version
pub fn format_version(version: &Version, dev: Option<&DevVersion>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", style(version).bold());
    let _ = writeln!(
        out,
        "  epoch: {}  major: {}  minor: {}  patch: {}",
        version.epoch, version.major, version.minor, version.patch
    );
    if let Some(dev) = dev {
        let _ = writeln!(
            out,
            "  dev:   {} ({} commit{} since {})",
            style(dev).cyan(),
            dev.distance(),
            if dev.distance() == 1 { "" } else { "s" },
            dev.base()
        );
    }
    out
}

pub fn display_version(version: &Version, dev: Option<&DevVersion>) {
    print!("{}", format_version(version, dev));
}

fn truncate(summary: &str) -> String {
    if summary.chars().count() > MAX_SUMMARY_WIDTH {
        let cut: String = summary.chars().take(MAX_SUMMARY_WIDTH - 3).collect();
        format!("{}...", cut)
    } else {
        summary.to_string()
    }
}

/// One listing line for a commit
pub fn format_commit_line(commit: &CommitRecord) -> String {
    match &commit.parsed {
        Some(parsed) => {
            let marker = if parsed.is_breaking_change {
                format!(" {}", style("[BREAKING]").red().bold())
            } else {
                String::new()
            };
            format!(
                "{:<6} {}{}",
                style(commit.bump()).dim(),
                truncate(&parsed.to_string()),
                marker
            )
        }
        None => format!("{:<6} {}", style("?").yellow(), truncate(commit.summary())),
    }
}

/// Bump decision, counts, commit listing and the tag a release would create.
///
/// At most `max_commits` commits are listed; the rest are summarised.
pub fn format_release_plan(plan: &ReleasePlan, max_commits: usize) -> String {
    let analysis = &plan.analysis;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{} {} commit{} since {}",
        style("Analyzed").bold(),
        analysis.total(),
        if analysis.total() == 1 { "" } else { "s" },
        plan.current
    );
    let _ = writeln!(out, "  bump: {}", style(analysis.bump).bold());

    let counts: Vec<String> = VersionBump::ALL
        .iter()
        .map(|bump| format!("{}={}", bump, analysis.count(*bump)))
        .collect();
    let _ = writeln!(out, "  counts: {}", counts.join(" "));
    let _ = writeln!(out, "  unparsed: {}", analysis.unparsed_count());

    if !analysis.is_empty() {
        let _ = writeln!(out, "\n{}", style("Commits:").underlined());
        for commit in analysis.commits.iter().take(max_commits) {
            let _ = writeln!(out, "  {}", format_commit_line(commit));
        }
        if analysis.total() > max_commits {
            let _ = writeln!(out, "  ... and {} more commits", analysis.total() - max_commits);
        }
    }

    if let Err(e) = plan.next_version() {
        let _ = writeln!(
            out,
            "\n{} {} bump blocked at {}: {}",
            style("Release blocked:").red().bold(),
            plan.bump(),
            plan.current,
            e
        );
        return out;
    }

    match plan.proposed_tag() {
        Some(tag) => {
            let _ = writeln!(
                out,
                "\nWould create tag {} (current {})",
                style(tag).green(),
                plan.current
            );
        }
        None => {
            let _ = writeln!(out, "\nNo release needed (current {})", plan.current);
        }
    }

    out
}

pub fn display_release_plan(plan: &ReleasePlan, max_commits: usize) {
    print!("{}", format_release_plan(plan, max_commits));
}

/// Display the proposed tag change.
pub fn display_proposed_tag(current: &Version, new_tag: &str) {
    println!("\n{}", style("Proposed Tag Change:").bold());
    println!("  From: {}", style(current).red());
    println!("  To:   {}", style(new_tag).green());
}

/// Display manual push instruction for a tag.
///
/// Shows the git command needed to push the tag to a remote.
pub fn display_manual_push_instruction(tag: &str, remote: &str) {
    println!(
        "\n{} To push this tag, run:\n  {}",
        style("→").yellow(),
        style(format!("git push {} {}", remote, tag)).cyan()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::analyze_messages;
    use crate::domain::classify;

    fn plan(current: Version, messages: &[&str]) -> ReleasePlan {
        let analysis = analyze_messages(messages);
        let next = current.bump(analysis.bump).ok();
        ReleasePlan {
            current,
            analysis,
            next,
        }
    }

    #[test]
    fn test_format_version_breakdown() {
        let out = format_version(&Version::new(1, 3, 2, 7), None);
        assert!(out.contains("1003.2.7"));
        assert!(out.contains("epoch: 1  major: 3  minor: 2  patch: 7"));
        assert!(!out.contains("dev"));
    }

    #[test]
    fn test_format_version_with_dev() {
        let version = Version::new(0, 1, 0, 0);
        let dev = DevVersion::new(version, 3).unwrap();
        let out = format_version(&version, Some(&dev));
        assert!(out.contains("1.0.0.dev3"));
        assert!(out.contains("3 commits since 1.0.0"));
    }

    #[test]
    fn test_format_commit_line_breaking() {
        let line = format_commit_line(&classify("fix(api)!: drop legacy field"));
        assert!(line.contains("fix(api)!: drop legacy field"));
        assert!(line.contains("[BREAKING]"));
    }

    #[test]
    fn test_format_commit_line_unparsed() {
        let line = format_commit_line(&classify("update stuff\n\nmore details"));
        assert!(line.contains("update stuff"));
        assert!(!line.contains("more details"));
    }

    #[test]
    fn test_format_commit_line_truncates_long_summary() {
        let long = format!("docs: {}", "x".repeat(200));
        let line = format_commit_line(&classify(&long));
        assert!(line.contains("..."));
        assert!(!line.contains(&"x".repeat(100)));
    }

    #[test]
    fn test_format_release_plan_counts_and_tag() {
        let plan = plan(
            Version::new(0, 1, 4, 2),
            &["feat: add export", "fix: typo", "update stuff"],
        );
        let out = format_release_plan(&plan, 10);
        assert!(out.contains("3 commits since 1.4.2"));
        assert!(out.contains("bump: minor"));
        assert!(out.contains("none=0 patch=1 minor=1 major=0 epoch=0"));
        assert!(out.contains("unparsed: 1"));
        assert!(out.contains("Would create tag v1.5.0 (current 1.4.2)"));
    }

    #[test]
    fn test_format_release_plan_no_release() {
        let plan = plan(Version::new(0, 1, 0, 0), &[]);
        let out = format_release_plan(&plan, 10);
        assert!(out.contains("0 commits"));
        assert!(out.contains("bump: none"));
        assert!(out.contains("No release needed (current 1.0.0)"));
        assert!(!out.contains("Commits:"));
    }

    #[test]
    fn test_format_release_plan_blocked_at_major_ceiling() {
        let plan = plan(Version::new(0, 999, 0, 0), &["fix!: drop legacy field"]);
        let out = format_release_plan(&plan, 10);
        assert!(out.contains("bump: major"));
        assert!(out.contains("major bump blocked at 999.0.0"));
        assert!(out.contains("bump the epoch instead"));
        assert!(!out.contains("Would create tag"));
    }

    #[test]
    fn test_format_release_plan_truncates_listing() {
        let messages: Vec<String> = (0..5).map(|i| format!("fix: bug {}", i)).collect();
        let refs: Vec<&str> = messages.iter().map(String::as_str).collect();
        let out = format_release_plan(&plan(Version::zero(), &refs), 2);
        assert!(out.contains("bug 0"));
        assert!(out.contains("bug 1"));
        assert!(!out.contains("bug 2"));
        assert!(out.contains("... and 3 more commits"));
    }

    #[test]
    fn test_display_error() {
        // Visual verification test - output is printed to stderr
        display_error("test error");
    }
}
