use std::fmt;

use super::aggregate::{Category, GroupSums};

/// Which customer group rents more under the current filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserType {
    Registered,
    Casual,
}

impl UserType {
    pub fn label(self) -> &'static str {
        match self {
            UserType::Registered => "Registered",
            UserType::Casual => "Casual",
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of picking a best group: either a winner or nothing to pick from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insight<K> {
    Best(K),
    NoData,
}

impl<K: Category> Insight<K> {
    pub fn label(self) -> &'static str {
        match self {
            Insight::Best(k) => k.label(),
            Insight::NoData => "no data",
        }
    }
}

/// `Registered` only when strictly greater; a tie goes to `Casual`.
pub fn dominant_user_type(registered: u64, casual: u64) -> UserType {
    if registered > casual {
        UserType::Registered
    } else {
        UserType::Casual
    }
}

/// The group with the largest sum, first in [`GroupSums::ranked`] order
/// (ties resolve to the lexically smallest label).
pub fn best_group<K: Category>(sums: &GroupSums<K>) -> Insight<K> {
    if sums.is_empty() {
        return Insight::NoData;
    }
    let (key, _) = sums.ranked()[0];
    Insight::Best(key)
}
