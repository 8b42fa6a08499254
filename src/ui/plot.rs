use std::collections::BTreeMap;

use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, Legend, Plot};

use crate::color::{ranking_colors, user_series_colors};
use crate::data::model::{UserSplit, Year};

const CHART_HEIGHT: f32 = 260.0;

// ---------------------------------------------------------------------------
// Casual vs registered per year
// ---------------------------------------------------------------------------

/// Grouped bar chart: one casual and one registered bar per year.
pub fn yearly_users_chart(ui: &mut Ui, yearly: &BTreeMap<Year, UserSplit>) {
    let (casual_color, registered_color) = user_series_colors();
    let labels: Vec<String> = yearly.keys().map(|y| y.label().to_string()).collect();

    let casual: Vec<Bar> = yearly
        .values()
        .enumerate()
        .map(|(i, split)| Bar::new(i as f64 - 0.2, split.casual as f64).width(0.35))
        .collect();
    let registered: Vec<Bar> = yearly
        .values()
        .enumerate()
        .map(|(i, split)| Bar::new(i as f64 + 0.2, split.registered as f64).width(0.35))
        .collect();

    categorical_plot("yearly_users_plot", labels)
        .legend(Legend::default())
        .y_axis_label("Rentals")
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(casual).name("casual").color(casual_color));
            plot_ui.bar_chart(
                BarChart::new(registered)
                    .name("registered")
                    .color(registered_color),
            );
        });
}

// ---------------------------------------------------------------------------
// Ranked totals (season / weather)
// ---------------------------------------------------------------------------

/// Bar chart of already-ranked `(label, total)` pairs; the first bar is
/// highlighted.
pub fn ranking_chart(ui: &mut Ui, id: &str, ranked: &[(&'static str, u64)]) {
    let colors = ranking_colors();
    let labels: Vec<String> = ranked.iter().map(|(label, _)| label.to_string()).collect();

    let bars: Vec<Bar> = ranked
        .iter()
        .enumerate()
        .map(|(i, (label, total))| {
            Bar::new(i as f64, *total as f64)
                .name(*label)
                .fill(colors.for_rank(i))
                .width(0.6)
        })
        .collect();

    categorical_plot(id, labels)
        .y_axis_label("Total Rental")
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

/// A fixed (non-interactive) plot whose integer x positions carry `labels`.
fn categorical_plot(id: &str, labels: Vec<String>) -> Plot<'static> {
    Plot::new(id)
        .height(CHART_HEIGHT)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .include_y(0.0)
        .x_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > 1e-6 || idx < 0.0 {
                return String::new();
            }
            labels.get(idx as usize).cloned().unwrap_or_default()
        })
}
