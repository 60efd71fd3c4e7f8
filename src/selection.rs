use std::fmt;

/// Display label for the choice that stands for "no manager".  The sentinel
/// is recognized by its absent key, never by this text.
pub const NO_MANAGER: &str = "None";

/// A display label paired with the key a catalog operation needs to target
/// the row it names.  Choice lists are fetched fresh from the store for each
/// prompt and presented as numbered menus; whatever the operator picks, the
/// paired key rides along, so a label is never parsed back into identifying
/// fields and duplicate labels cannot select the wrong row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice<K> {
    label: String,
    key: K,
}

impl<K> Choice<K> {
    pub fn new<S: Into<String>>(label: S, key: K) -> Self {
        Choice {
            label: label.into(),
            key,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl<K: Copy> Choice<K> {
    pub fn key(&self) -> K {
        self.key
    }
}

impl Choice<Option<i64>> {
    /// The sentinel offered at the top of every manager prompt.
    pub fn no_manager() -> Self {
        Choice::new(NO_MANAGER, None)
    }
}

impl<K> fmt::Display for Choice<K> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}

/// The kinds of row the Delete Entity action can target.  Selecting one
/// dispatches to a second selection round scoped to that entity's current
/// rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Employee,
    Role,
    Department,
}

impl EntityKind {
    pub const ALL: [EntityKind; 3] = [
        EntityKind::Employee,
        EntityKind::Role,
        EntityKind::Department,
    ];
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EntityKind::Employee => write!(f, "Employee"),
            EntityKind::Role => write!(f, "Role"),
            EntityKind::Department => write!(f, "Department"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_carries_no_key() {
        let sentinel = Choice::no_manager();
        assert_eq!(sentinel.label(), NO_MANAGER);
        assert_eq!(sentinel.key(), None);
    }

    #[test]
    fn choice_displays_its_label_only() {
        let choice = Choice::new("Ada Lovelace", 7i64);
        assert_eq!(choice.to_string(), "Ada Lovelace");
        assert_eq!(choice.key(), 7);
    }

    #[test]
    fn duplicate_labels_keep_distinct_keys() {
        let first = Choice::new("Jo Ann Smith", 1i64);
        let second = Choice::new("Jo Ann Smith", 2i64);
        assert_eq!(first.label(), second.label());
        assert_ne!(first.key(), second.key());
    }
}
