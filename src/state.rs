use std::path::PathBuf;

use crate::data::filter::{all_years, YearSelection};
use crate::data::loader::DatasetCache;
use crate::data::model::Year;
use crate::report::DashboardSummary;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Source of the current dataset (None until a file is opened). Every
    /// recompute reads through it; only the first touches the disk.
    pub cache: Option<DatasetCache>,

    /// Years present in the dataset, offered as filter options.
    pub available_years: YearSelection,

    /// Years currently ticked.
    pub selection: YearSelection,

    /// Aggregates for the current selection (cached until the filter changes).
    pub summary: Option<DashboardSummary>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Open `path` through a fresh cache and make it the current dataset.
    ///
    /// On failure the previous dashboard is cleared: a load error never shows
    /// stale numbers.
    pub fn open(&mut self, path: impl Into<PathBuf>) {
        let cache = DatasetCache::new(path);
        match cache.normalized() {
            Ok(records) => {
                self.available_years = all_years(&records);
                self.set_dataset(cache);
            }
            Err(e) => {
                log::error!("{e}");
                self.cache = None;
                self.available_years.clear();
                self.selection.clear();
                self.summary = None;
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Make a loaded cache current and select every year in it.
    fn set_dataset(&mut self, cache: DatasetCache) {
        self.selection = self.available_years.clone();
        self.cache = Some(cache);
        self.status_message = None;
        self.refilter();
    }

    /// Recompute the summary after a filter change.
    pub fn refilter(&mut self) {
        let Some(cache) = &self.cache else {
            return;
        };
        match cache.normalized() {
            Ok(records) => {
                self.summary = Some(DashboardSummary::compute(&records, &self.selection));
            }
            Err(e) => {
                log::error!("{e}");
                self.summary = None;
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Rows in the current dataset, 0 when nothing is loaded.
    pub fn record_count(&self) -> usize {
        self.cache
            .as_ref()
            .and_then(|c| c.normalized().ok())
            .map_or(0, |records| records.len())
    }

    pub fn is_selected(&self, year: Year) -> bool {
        self.selection.contains(&year)
    }

    /// Tick or untick a single year.
    pub fn set_year(&mut self, year: Year, selected: bool) {
        let changed = if selected {
            self.selection.insert(year)
        } else {
            self.selection.remove(&year)
        };
        if changed {
            self.refilter();
        }
    }

    pub fn select_all(&mut self) {
        self.selection = self.available_years.clone();
        self.refilter();
    }

    pub fn select_none(&mut self) {
        self.selection.clear();
        self.refilter();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn dataset_file(dir: &tempfile::TempDir) -> PathBuf {
        let path = dir.path().join("hour_analysis.csv");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(
            b"yr,season,weathersit,casual,registered,cnt\n\
              0,1,1,10,90,100\n\
              1,2,2,50,50,100\n\
              1,3,1,5,20,25\n",
        )
        .unwrap();
        path
    }

    #[test]
    fn open_selects_every_year() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = AppState::default();
        state.open(dataset_file(&dir));

        assert_eq!(state.record_count(), 3);
        assert_eq!(state.selection, state.available_years);
        assert!(state.is_selected(Year::Y2011) && state.is_selected(Year::Y2012));
        assert_eq!(state.summary.as_ref().unwrap().total_rental, 225);
    }

    #[test]
    fn toggling_years_recomputes_but_keeps_growth() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = AppState::default();
        state.open(dataset_file(&dir));
        let growth = state.summary.as_ref().unwrap().growth_percent.clone();

        state.set_year(Year::Y2011, false);
        let summary = state.summary.as_ref().unwrap();
        assert_eq!(summary.total_rental, 125);
        assert_eq!(summary.growth_percent, growth);

        state.select_none();
        assert_eq!(state.summary.as_ref().unwrap().visible_rows, 0);

        state.select_all();
        assert_eq!(state.summary.as_ref().unwrap().visible_rows, 3);
    }

    #[test]
    fn recompute_reads_through_cache_not_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dataset_file(&dir);
        let mut state = AppState::default();
        state.open(&path);

        std::fs::remove_file(&path).unwrap();
        state.set_year(Year::Y2012, false);

        assert!(state.status_message.is_none());
        assert_eq!(state.record_count(), 3);
        assert_eq!(state.summary.as_ref().unwrap().total_rental, 100);
    }

    #[test]
    fn failed_open_clears_dashboard() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = AppState::default();
        state.open(dataset_file(&dir));
        state.open(dir.path().join("missing.csv"));

        assert!(state.cache.is_none());
        assert!(state.summary.is_none());
        assert_eq!(state.record_count(), 0);
        assert!(state.status_message.as_deref().unwrap().contains("missing.csv"));
    }
}
