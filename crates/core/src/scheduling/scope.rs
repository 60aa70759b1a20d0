//! Three-way scope resolution for bulk series mutation.

use super::types::Event;

/// Breadth of a bulk update, derived from the submit button the edit
/// form was confirmed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateScope {
    /// Only the target occurrence.
    Single,
    /// Occurrences of the target's series starting strictly after the
    /// target. The target itself is not included.
    Following,
    /// Every occurrence of the target's series.
    All,
}

impl UpdateScope {
    /// Resolves the scope from the commit button label. Anything other
    /// than the two recognized group labels means a single-event edit.
    pub fn from_commit_label(label: Option<&str>) -> Self {
        match label {
            Some("Update All Occurrences") => UpdateScope::All,
            Some("Update All Following Occurrences") => UpdateScope::Following,
            _ => UpdateScope::Single,
        }
    }
}

/// Breadth of a bulk delete, derived from the `delete_all` request
/// parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteScope {
    Single,
    Following,
    All,
}

impl DeleteScope {
    /// Resolves the scope from the `delete_all` parameter: `"true"`
    /// deletes the whole series, `"future"` the following occurrences,
    /// anything else only the target.
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            Some("true") => DeleteScope::All,
            Some("future") => DeleteScope::Following,
            _ => DeleteScope::Single,
        }
    }
}

/// Selects the sibling occurrences that start strictly after the target.
/// The target itself is excluded even if it appears in `siblings`.
pub fn following_occurrences(target: &Event, siblings: &[Event]) -> Vec<Event> {
    siblings
        .iter()
        .filter(|event| event.id != target.id && event.starts_at > target.starts_at)
        .cloned()
        .collect()
}
