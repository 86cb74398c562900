//! Selection movement over the grouped issue order
//!
//! Selection is remembered by [`IssueKey`] rather than index so it follows the
//! issue when a refresh reorders or regroups the list.

use crate::github::{Issue, IssueKey};
use crate::ui::grouping::visual_order;

/// Position of `selected` in the visual order, if it is still present
pub fn position(issues: &[Issue], selected: Option<&IssueKey>) -> Option<usize> {
    let key = selected?;
    visual_order(issues)
        .iter()
        .position(|issue| issue.matches(key))
}

/// Selection after moving one step down; stays put on the last issue
pub fn move_next(issues: &[Issue], selected: Option<&IssueKey>) -> Option<IssueKey> {
    let order = visual_order(issues);
    if order.is_empty() {
        return selected.cloned();
    }
    let target = match position(issues, selected) {
        Some(current) => (current + 1).min(order.len() - 1),
        // Unknown selection sits just before the first issue
        None => 0,
    };
    Some(order[target].key())
}

/// Selection after moving one step up; stays put on the first issue
pub fn move_previous(issues: &[Issue], selected: Option<&IssueKey>) -> Option<IssueKey> {
    let order = visual_order(issues);
    if order.is_empty() {
        return selected.cloned();
    }
    let target = position(issues, selected).map_or(0, |current| current.saturating_sub(1));
    Some(order[target].key())
}

/// Keep `selected` if still present, otherwise fall back to the issue now at
/// `fallback_index` (clamped), or nothing when the list is empty
pub fn relocate(
    issues: &[Issue],
    selected: Option<&IssueKey>,
    fallback_index: usize,
) -> Option<IssueKey> {
    if position(issues, selected).is_some() {
        return selected.cloned();
    }
    let order = visual_order(issues);
    if order.is_empty() {
        return None;
    }
    Some(order[fallback_index.min(order.len() - 1)].key())
}
