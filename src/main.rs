mod app;
mod color;
mod config;
mod data;
mod error;
mod report;
mod state;
mod ui;

use app::BikeDashboardApp;
use config::{DashboardConfig, MIN_WINDOW_SIZE, WINDOW_SIZE};
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = DashboardConfig::from_env();
    log::info!("Starting dashboard with {}", config.data_path.display());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(WINDOW_SIZE)
            .with_min_inner_size(MIN_WINDOW_SIZE),
        ..Default::default()
    };

    eframe::run_native(
        "Bike Sharing Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(BikeDashboardApp::new(&config)))),
    )
}
