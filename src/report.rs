//! Dashboard summary: every value the panels display for one year selection.
//!
//! Keeping the pipeline here (rather than in the UI code) means the numbers
//! can be tested without a window.

use std::collections::BTreeMap;

use crate::data::aggregate::{group_sum, sum_by_field, total_sum, year_over_year_growth, yearly_users};
use crate::data::filter::{filter_by_year, YearSelection};
use crate::data::insight::{best_group, dominant_user_type, Insight, UserType};
use crate::data::model::{NormalizedRecord, Season, UserSplit, ValueField, Weather, Year};
use crate::error::DashboardError;

/// Aggregates for the current filter.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub visible_rows: usize,
    pub total_rental: u64,
    pub total_registered: u64,
    pub total_casual: u64,
    /// Always computed on the unfiltered dataset.
    pub growth_percent: Result<f64, DashboardError>,
    pub yearly_users: BTreeMap<Year, UserSplit>,
    /// Ranked by descending total.
    pub season_totals: Vec<(Season, u64)>,
    /// Ranked by descending total.
    pub weather_totals: Vec<(Weather, u64)>,
    pub dominant_user_type: UserType,
    pub best_season: Insight<Season>,
    pub best_weather: Insight<Weather>,
}

impl DashboardSummary {
    /// Run filter → aggregate → insight for `selection`.
    pub fn compute(all: &[NormalizedRecord], selection: &YearSelection) -> Self {
        let filtered = filter_by_year(all, selection);

        let total_registered = sum_by_field(&filtered, ValueField::Registered);
        let total_casual = sum_by_field(&filtered, ValueField::Casual);

        let growth_percent = year_over_year_growth(all);
        if let Err(e) = &growth_percent {
            log::warn!("{e}");
        }

        let seasons = group_sum::<Season>(&filtered, ValueField::Total);
        let weathers = group_sum::<Weather>(&filtered, ValueField::Total);

        DashboardSummary {
            visible_rows: filtered.len(),
            total_rental: total_sum(&filtered),
            total_registered,
            total_casual,
            growth_percent,
            yearly_users: yearly_users(&filtered),
            season_totals: seasons.ranked(),
            weather_totals: weathers.ranked(),
            dominant_user_type: dominant_user_type(total_registered, total_casual),
            best_season: best_group(&seasons),
            best_weather: best_group(&weathers),
        }
    }

    pub fn growth_text(&self) -> String {
        format_growth(&self.growth_percent)
    }

    /// Bullet points for the "Business Insight" section.
    pub fn insight_lines(&self) -> Vec<String> {
        let season = self.best_season.label();
        let weather = self.best_weather.label();
        vec![
            format!("**{}** customers dominate the rental system.", self.dominant_user_type),
            format!("Rentals grew by **{}** from 2011 to 2012.", self.growth_text()),
            format!("Best season: **{season}**"),
            format!("Best weather: **{weather}**"),
        ]
    }

    pub fn recommendation_lines(&self) -> Vec<String> {
        vec![
            format!("Focus promotions on the {} season.", self.best_season.label()),
            "Increase conversion of casual riders into registered members.".to_string(),
            format!("Run special offers during {} weather.", self.best_weather.label()),
        ]
    }
}

// ---------------------------------------------------------------------------
// Display formatting
// ---------------------------------------------------------------------------

/// `1234567` → `"1,234,567"`.
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Two decimals, or "N/A" when the baseline is zero.
pub fn format_growth(growth: &Result<f64, DashboardError>) -> String {
    match growth {
        Ok(pct) => format!("{pct:.2}%"),
        Err(_) => "N/A".to_string(),
    }
}
