use std::collections::BTreeMap;

use super::model::{NormalizedRecord, Season, UserSplit, ValueField, Weather, Year};
use crate::error::DashboardError;

// ---------------------------------------------------------------------------
// Grouping keys
// ---------------------------------------------------------------------------

/// A categorical column that records can be grouped by.
pub trait Category: Copy + Ord {
    fn of(record: &NormalizedRecord) -> Self;
    fn label(self) -> &'static str;
}

impl Category for Year {
    fn of(record: &NormalizedRecord) -> Self {
        record.year
    }
    fn label(self) -> &'static str {
        Year::label(self)
    }
}

impl Category for Season {
    fn of(record: &NormalizedRecord) -> Self {
        record.season
    }
    fn label(self) -> &'static str {
        Season::label(self)
    }
}

impl Category for Weather {
    fn of(record: &NormalizedRecord) -> Self {
        record.weather
    }
    fn label(self) -> &'static str {
        Weather::label(self)
    }
}

// ---------------------------------------------------------------------------
// GroupSums – the result of a grouped sum
// ---------------------------------------------------------------------------

/// Summed value per group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupSums<K: Category> {
    sums: BTreeMap<K, u64>,
}

impl<K: Category> Default for GroupSums<K> {
    fn default() -> Self {
        Self {
            sums: BTreeMap::new(),
        }
    }
}

impl<K: Category> GroupSums<K> {
    pub fn get(&self, key: K) -> Option<u64> {
        self.sums.get(&key).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.sums.is_empty()
    }

    /// Groups in key order.
    pub fn iter(&self) -> impl Iterator<Item = (K, u64)> + '_ {
        self.sums.iter().map(|(k, v)| (*k, *v))
    }

    /// Groups sorted by descending sum; equal sums are ordered by ascending
    /// label so the ranking never depends on insertion or key order.
    pub fn ranked(&self) -> Vec<(K, u64)> {
        let mut out: Vec<(K, u64)> = self.iter().collect();
        out.sort_by(|(ka, va), (kb, vb)| vb.cmp(va).then_with(|| ka.label().cmp(kb.label())));
        out
    }
}

impl<K: Category> FromIterator<(K, u64)> for GroupSums<K> {
    fn from_iter<I: IntoIterator<Item = (K, u64)>>(iter: I) -> Self {
        let mut sums = BTreeMap::new();
        for (k, v) in iter {
            *sums.entry(k).or_insert(0) += v;
        }
        Self { sums }
    }
}

// ---------------------------------------------------------------------------
// Sums
// ---------------------------------------------------------------------------

/// Sum of `cnt`.
pub fn total_sum(records: &[NormalizedRecord]) -> u64 {
    sum_by_field(records, ValueField::Total)
}

pub fn sum_by_field(records: &[NormalizedRecord], field: ValueField) -> u64 {
    records.iter().map(|r| r.value(field)).sum()
}

/// Sum `field` per value of the grouping column `K`.
pub fn group_sum<K: Category>(records: &[NormalizedRecord], field: ValueField) -> GroupSums<K> {
    records.iter().map(|r| (K::of(r), r.value(field))).collect()
}

/// Casual and registered sums per year.
pub fn yearly_users(records: &[NormalizedRecord]) -> BTreeMap<Year, UserSplit> {
    let mut out: BTreeMap<Year, UserSplit> = BTreeMap::new();
    for r in records {
        let split = out.entry(r.year).or_default();
        split.casual += r.raw.casual;
        split.registered += r.raw.registered;
    }
    out
}

// ---------------------------------------------------------------------------
// Growth
// ---------------------------------------------------------------------------

/// Percentage change of total rentals from 2011 to 2012.
///
/// Must be given the full, unfiltered dataset: growth is a property of the
/// data, not of the current year selection. The two years are picked by
/// value; records with an unknown year do not contribute.
pub fn year_over_year_growth(unfiltered: &[NormalizedRecord]) -> Result<f64, DashboardError> {
    let by_year = group_sum::<Year>(unfiltered, ValueField::Total);
    let base = by_year.get(Year::Y2011).unwrap_or(0);
    let current = by_year.get(Year::Y2012).unwrap_or(0);

    if base == 0 {
        return Err(DashboardError::DivisionUndefined);
    }
    Ok((current as f64 - base as f64) / base as f64 * 100.0)
}
