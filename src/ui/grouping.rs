//! Grouping of issues by repository
//!
//! The issues view and keyboard navigation both walk the same order: groups
//! by ascending bare repository name, issues within a group by ascending
//! number. Every display path goes through a `BTreeMap` so the order never
//! depends on hash iteration.

use std::collections::BTreeMap;

use crate::github::{bare_repo_name, Issue};

/// Issues keyed by bare repository name
pub type GroupedIssues<'a> = BTreeMap<&'a str, Vec<&'a Issue>>;

/// Group issues under their bare repository name, each group sorted by number
///
/// Issues sharing a number (same bare name, different owners) are ordered by
/// their full repository identifier.
pub fn group_by_repository(issues: &[Issue]) -> GroupedIssues<'_> {
    let mut grouped: GroupedIssues<'_> = BTreeMap::new();
    for issue in issues {
        grouped
            .entry(bare_repo_name(&issue.repo))
            .or_default()
            .push(issue);
    }
    for group in grouped.values_mut() {
        group.sort_by(|a, b| (a.number, &a.repo).cmp(&(b.number, &b.repo)));
    }
    grouped
}

/// Group names in ascending order
pub fn sorted_group_names<'a>(grouped: &GroupedIssues<'a>) -> Vec<&'a str> {
    let mut names: Vec<&str> = grouped.keys().copied().collect();
    names.sort_unstable();
    names
}

/// Flattened display order used for navigation
pub fn visual_order(issues: &[Issue]) -> Vec<&Issue> {
    let grouped = group_by_repository(issues);
    sorted_group_names(&grouped)
        .into_iter()
        .flat_map(|name| grouped.get(name).into_iter().flatten().copied())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn issue(repo: &str, number: u64) -> Issue {
        Issue::new(repo, number, format!("{} #{}", repo, number))
    }

    fn keys(order: &[&Issue]) -> Vec<(String, u64)> {
        order
            .iter()
            .map(|issue| (issue.repo.clone(), issue.number))
            .collect()
    }

    #[test]
    fn test_groups_strip_owner_and_sort() {
        let issues = vec![
            issue("simonbrundin/dotfiles", 9),
            issue("simonbrundin/ai", 3),
            issue("simonbrundin/ai", 1),
            issue("other/ai", 2),
        ];
        let grouped = group_by_repository(&issues);

        assert_eq!(sorted_group_names(&grouped), vec!["ai", "dotfiles"]);
        let ai: Vec<u64> = grouped["ai"].iter().map(|i| i.number).collect();
        assert_eq!(ai, vec![1, 2, 3]);
    }

    #[test]
    fn test_visual_order() {
        let issues = vec![issue("o/b", 2), issue("o/a", 5), issue("o/a", 1)];
        assert_eq!(
            keys(&visual_order(&issues)),
            vec![
                ("o/a".to_string(), 1),
                ("o/a".to_string(), 5),
                ("o/b".to_string(), 2)
            ]
        );
    }

    #[test]
    fn test_owner_breaks_number_ties() {
        let forward = vec![issue("x/ai", 1), issue("o/ai", 1)];
        let backward = vec![issue("o/ai", 1), issue("x/ai", 1)];
        let expected = vec![("o/ai".to_string(), 1), ("x/ai".to_string(), 1)];
        assert_eq!(keys(&visual_order(&forward)), expected);
        assert_eq!(keys(&visual_order(&backward)), expected);
    }

    #[test]
    fn test_empty() {
        assert!(group_by_repository(&[]).is_empty());
        assert!(visual_order(&[]).is_empty());
    }

    #[test]
    fn test_repeated_calls_never_vary() {
        let issues: Vec<Issue> = (0..40)
            .map(|i| issue(&format!("org/repo{}", (i * 7) % 5), (i * 13) % 17))
            .collect();
        let first = keys(&visual_order(&issues));
        for _ in 0..50 {
            assert_eq!(keys(&visual_order(&issues)), first);
        }
    }

    fn arb_issues() -> impl Strategy<Value = Vec<Issue>> {
        prop::collection::vec(
            (
                prop::sample::select(vec!["o/alpha", "o/beta", "x/gamma", "y/alpha", "delta"]),
                0u64..50,
            ),
            0..40,
        )
        .prop_map(|pairs| {
            pairs
                .into_iter()
                .map(|(repo, number)| issue(repo, number))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_groups_sorted(issues in arb_issues()) {
            let grouped = group_by_repository(&issues);
            let names = sorted_group_names(&grouped);
            prop_assert!(names.windows(2).all(|w| w[0] < w[1]));
            for group in grouped.values() {
                prop_assert!(group.windows(2).all(|w| w[0].number <= w[1].number));
            }
        }

        #[test]
        fn prop_order_independent_of_input_order(issues in arb_issues()) {
            // Distinct identities so reversal cannot swap equal keys
            let mut unique = issues.clone();
            unique.sort_by(|a, b| (&a.repo, a.number).cmp(&(&b.repo, b.number)));
            unique.dedup_by(|a, b| a.repo == b.repo && a.number == b.number);

            let mut reversed = unique.clone();
            reversed.reverse();

            prop_assert_eq!(keys(&visual_order(&unique)), keys(&visual_order(&reversed)));
        }

        #[test]
        fn prop_idempotent(issues in arb_issues()) {
            prop_assert_eq!(keys(&visual_order(&issues)), keys(&visual_order(&issues)));
            prop_assert_eq!(visual_order(&issues).len(), issues.len());
        }
    }
}
