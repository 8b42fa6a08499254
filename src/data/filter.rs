use std::collections::BTreeSet;

use super::model::{NormalizedRecord, Year};

// ---------------------------------------------------------------------------
// Filter predicate: which years are selected
// ---------------------------------------------------------------------------

/// The years ticked in the side panel. An empty set is valid and selects
/// nothing.
pub type YearSelection = BTreeSet<Year>;

/// Every year present in the dataset (the default selection).
pub fn all_years(records: &[NormalizedRecord]) -> YearSelection {
    records.iter().map(|r| r.year).collect()
}

/// Return the records whose year is selected, in their original order.
pub fn filter_by_year(records: &[NormalizedRecord], selected: &YearSelection) -> Vec<NormalizedRecord> {
    if selected.is_empty() {
        // Nothing selected → hide everything
        return Vec::new();
    }
    records
        .iter()
        .filter(|r| selected.contains(&r.year))
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::RentalRecord;
    use crate::data::normalize::normalize;

    fn sample() -> Vec<NormalizedRecord> {
        let rows = [(0, 5), (1, 7), (0, 11), (1, 13)];
        let raw: Vec<RentalRecord> = rows
            .iter()
            .map(|&(yr, cnt)| RentalRecord {
                year_flag: yr,
                season_code: 1,
                weather_code: 1,
                casual: 0,
                registered: cnt,
                total: cnt,
            })
            .collect();
        normalize(&raw)
    }

    #[test]
    fn full_selection_is_identity() {
        let records = sample();
        let all: YearSelection = [Year::Y2011, Year::Y2012].into_iter().collect();
        assert_eq!(filter_by_year(&records, &all), records);
        assert_eq!(all_years(&records), all);
    }

    #[test]
    fn empty_selection_yields_nothing() {
        let records = sample();
        assert!(filter_by_year(&records, &YearSelection::new()).is_empty());
    }

    #[test]
    fn out_of_domain_year_joins_default_selection() {
        let mut raw: Vec<RentalRecord> = sample().iter().map(|r| r.raw).collect();
        raw.push(RentalRecord {
            year_flag: 3,
            season_code: 2,
            weather_code: 1,
            casual: 1,
            registered: 1,
            total: 2,
        });
        let records = normalize(&raw);

        let defaults = all_years(&records);
        assert_eq!(defaults, [Year::Y2011, Year::Y2012, Year::Unknown].into_iter().collect());
        assert_eq!(filter_by_year(&records, &defaults), records);

        let only_unknown: YearSelection = [Year::Unknown].into_iter().collect();
        let kept = filter_by_year(&records, &only_unknown);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].raw.year_flag, 3);
    }

    #[test]
    fn preserves_relative_order() {
        let records = sample();
        let only_2012: YearSelection = [Year::Y2012].into_iter().collect();
        let totals: Vec<u64> = filter_by_year(&records, &only_2012)
            .iter()
            .map(|r| r.raw.total)
            .collect();
        assert_eq!(totals, vec![7, 13]);
    }
}
