use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – year filter
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filter Dashboard");
    ui.separator();

    if state.cache.is_none() {
        ui.label("No dataset loaded.");
        return;
    }

    // Clone so we can mutate state inside the loop.
    let years = state.available_years.clone();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            let header_text = format!("Select year  ({}/{})", state.selection.len(), years.len());
            ui.strong(header_text);

            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    state.select_all();
                }
                if ui.small_button("None").clicked() {
                    state.select_none();
                }
            });

            for year in years {
                let mut checked = state.is_selected(year);
                if ui.checkbox(&mut checked, year.label()).changed() {
                    state.set_year(year, checked);
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let (Some(cache), Some(summary)) = (&state.cache, &state.summary) {
            ui.label(format!(
                "{}: {} records loaded, {} visible",
                cache.path().display(),
                state.record_count(),
                summary.visible_rows
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open rental data")
        .add_filter("Supported files", &["csv", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.open(path);
    }
}
