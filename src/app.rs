use eframe::egui;

use crate::config::DashboardConfig;
use crate::state::AppState;
use crate::ui::{dashboard, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct BikeDashboardApp {
    pub state: AppState,
}

impl BikeDashboardApp {
    /// Load the configured dataset up front so the first frame is complete.
    pub fn new(config: &DashboardConfig) -> Self {
        let mut state = AppState::default();
        state.open(&config.data_path);
        Self { state }
    }
}

impl eframe::App for BikeDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: year filter ----
        egui::SidePanel::left("filter_panel")
            .default_width(200.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: metrics, charts, insight ----
        egui::CentralPanel::default().show(ctx, |ui| {
            dashboard::central_panel(ui, &self.state);
        });
    }
}
