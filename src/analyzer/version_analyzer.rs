use crate::domain::{classify, CommitRecord, CommitType, VersionBump};
use std::collections::BTreeMap;

/// Result of classifying every commit in a release range
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommitAnalysis {
    /// Highest bump over all commits; `None` for an empty range
    pub bump: VersionBump,
    /// Every commit, in the order it was supplied
    pub commits: Vec<CommitRecord>,
    /// Conventional commits per effective bump category
    pub bump_counts: BTreeMap<VersionBump, usize>,
    /// Conventional commits per type
    pub type_counts: BTreeMap<CommitType, usize>,
    /// Raw messages that did not follow the conventional header grammar
    pub unparsed: Vec<String>,
}

impl CommitAnalysis {
    pub fn total(&self) -> usize {
        self.commits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }

    /// Number of conventional commits whose effective bump is `bump`
    pub fn count(&self, bump: VersionBump) -> usize {
        self.bump_counts.get(&bump).copied().unwrap_or(0)
    }

    pub fn unparsed_count(&self) -> usize {
        self.unparsed.len()
    }

    /// Conventional commits only
    pub fn conventional(&self) -> impl Iterator<Item = &CommitRecord> {
        self.commits.iter().filter(|c| c.is_conventional())
    }
}

/// Classify each message and reduce the per-commit bumps to their maximum.
///
/// The reduction is a plain max over a total order, so the result does not
/// depend on message order.
pub fn analyze_messages<S: AsRef<str>>(messages: &[S]) -> CommitAnalysis {
    let mut analysis = CommitAnalysis::default();

    for message in messages {
        let record = classify(message.as_ref());
        let bump = record.bump();
        analysis.bump = analysis.bump.max(bump);

        match &record.parsed {
            Some(parsed) => {
                *analysis.bump_counts.entry(bump).or_insert(0) += 1;
                *analysis.type_counts.entry(parsed.r#type).or_insert(0) += 1;
            }
            None => analysis.unparsed.push(record.message.clone()),
        }

        analysis.commits.push(record);
    }

    analysis
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_major() {
        let messages = vec!["feat: new feature", "fix(api)!: breaking change"];
        assert_eq!(analyze_messages(&messages).bump, VersionBump::Major);
    }

    #[test]
    fn test_analyze_minor() {
        let messages = vec!["feat: new feature", "fix: bug fix"];
        assert_eq!(analyze_messages(&messages).bump, VersionBump::Minor);
    }

    #[test]
    fn test_analyze_patch() {
        let messages = vec!["fix: bug fix", "refactor: code cleanup"];
        assert_eq!(analyze_messages(&messages).bump, VersionBump::Patch);
    }

    #[test]
    fn test_analyze_empty() {
        let messages: Vec<String> = Vec::new();
        let analysis = analyze_messages(&messages);
        assert_eq!(analysis.bump, VersionBump::None);
        assert!(analysis.is_empty());
        assert_eq!(analysis.unparsed_count(), 0);
    }

    #[test]
    fn test_analyze_ignore_docs_and_chore() {
        let messages = vec![
            "docs: update readme",
            "chore: update deps",
            "style: format code",
            "test: add tests",
            "build: bump toolchain",
            "ci: cache deps",
            "refactor: extract module",
        ];
        let analysis = analyze_messages(&messages);
        assert_eq!(analysis.bump, VersionBump::None);
        assert_eq!(analysis.count(VersionBump::None), 7);
    }

    #[test]
    fn test_analyze_epoch_wins_over_everything() {
        let messages = vec![
            "feat(core)!: rewrite core engine",
            "epoch: architecture v2",
            "fix: various bugs",
        ];
        assert_eq!(analyze_messages(&messages).bump, VersionBump::Epoch);
    }

    #[test]
    fn test_analyze_breaking_change_via_footer() {
        let messages =
            vec!["fix: rename API field\n\nBREAKING CHANGE: field changed from X to Y"];
        assert_eq!(analyze_messages(&messages).bump, VersionBump::Major);
    }

    #[test]
    fn test_analyze_non_conventional_commits_are_reported() {
        let messages = vec!["update stuff", "Fixed things", "fix: real fix"];
        let analysis = analyze_messages(&messages);

        assert_eq!(analysis.bump, VersionBump::Patch);
        assert_eq!(analysis.total(), 3);
        assert_eq!(analysis.unparsed_count(), 2);
        assert_eq!(analysis.unparsed, vec!["update stuff", "Fixed things"]);
        assert_eq!(analysis.conventional().count(), 1);
    }

    #[test]
    fn test_analyze_only_non_conventional_is_none() {
        let messages = vec!["update stuff"];
        let analysis = analyze_messages(&messages);
        assert_eq!(analysis.bump, VersionBump::None);
        assert_eq!(analysis.unparsed_count(), 1);
        assert_eq!(analysis.count(VersionBump::None), 0);
    }

    #[test]
    fn test_analyze_counts_per_category_and_type() {
        let messages = vec![
            "feat(api): add endpoint",
            "feat: another",
            "fix(ui): button color",
            "perf: cache results",
            "docs: faq",
            "fix!: drop legacy field",
        ];
        let analysis = analyze_messages(&messages);

        assert_eq!(analysis.bump, VersionBump::Major);
        assert_eq!(analysis.count(VersionBump::Minor), 2);
        assert_eq!(analysis.count(VersionBump::Patch), 2);
        assert_eq!(analysis.count(VersionBump::Major), 1);
        assert_eq!(analysis.count(VersionBump::None), 1);
        assert_eq!(analysis.count(VersionBump::Epoch), 0);
        assert_eq!(analysis.type_counts.get(&CommitType::Fix), Some(&2));
        assert_eq!(analysis.type_counts.get(&CommitType::Feat), Some(&2));
    }

    #[test]
    fn test_analyze_keeps_supplied_order() {
        let messages = vec!["fix: a", "feat: b", "chore: c"];
        let analysis = analyze_messages(&messages);
        let summaries: Vec<&str> = analysis.commits.iter().map(|c| c.summary()).collect();
        assert_eq!(summaries, vec!["fix: a", "feat: b", "chore: c"]);
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        fn message() -> impl Strategy<Value = String> {
            prop_oneof![
                Just("feat: add thing".to_string()),
                Just("fix(io): handle eof".to_string()),
                Just("perf: faster".to_string()),
                Just("docs: typo".to_string()),
                Just("chore: tidy\n\nBREAKING CHANGE: removes flag X".to_string()),
                Just("fix!: drop legacy field".to_string()),
                Just("epoch!: rewrite core".to_string()),
                Just("update stuff".to_string()),
                "[a-z ]{0,20}",
            ]
        }

        proptest! {
            #[test]
            fn reduction_is_order_independent(
                (messages, shuffled) in proptest::collection::vec(message(), 0..12)
                    .prop_flat_map(|v| (Just(v.clone()), Just(v).prop_shuffle()))
            ) {
                let a = analyze_messages(&messages);
                let b = analyze_messages(&shuffled);
                prop_assert_eq!(a.bump, b.bump);
                prop_assert_eq!(&a.bump_counts, &b.bump_counts);
                prop_assert_eq!(&a.type_counts, &b.type_counts);
                prop_assert_eq!(a.unparsed_count(), b.unparsed_count());
            }

            #[test]
            fn reduction_is_the_max_of_individual_bumps(
                messages in proptest::collection::vec(message(), 0..12)
            ) {
                let expected = messages
                    .iter()
                    .map(|m| classify(m).bump())
                    .max()
                    .unwrap_or(VersionBump::None);
                prop_assert_eq!(analyze_messages(&messages).bump, expected);
            }
        }
    }
}
