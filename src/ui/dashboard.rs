use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::insight::UserType;
use crate::report::{format_thousands, DashboardSummary};
use crate::state::AppState;
use crate::ui::plot;

const SUCCESS: Color32 = Color32::from_rgb(46, 160, 67);
const WARNING: Color32 = Color32::from_rgb(210, 153, 34);
const INFO: Color32 = Color32::from_rgb(56, 139, 253);

// ---------------------------------------------------------------------------
// Central panel
// ---------------------------------------------------------------------------

/// Render the dashboard body in the central panel.
pub fn central_panel(ui: &mut Ui, state: &AppState) {
    let summary = match &state.summary {
        Some(summary) => summary,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| match &state.status_message {
                Some(msg) => {
                    ui.heading(RichText::new(msg).color(Color32::RED));
                }
                None => {
                    ui.heading("Open a file to view the dashboard  (File → Open…)");
                }
            });
            return;
        }
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading(RichText::new("Bike Sharing Business Dashboard").size(28.0));
            ui.label("Customer Analysis 2011–2012");
            ui.add_space(8.0);

            metrics_row(ui, summary);
            ui.separator();

            yearly_users_section(ui, summary);
            ui.separator();

            ui.columns(2, |cols| {
                let seasons: Vec<(&'static str, u64)> = summary
                    .season_totals
                    .iter()
                    .map(|(s, v)| (s.label(), *v))
                    .collect();
                cols[0].strong("Total Rental by Season");
                plot::ranking_chart(&mut cols[0], "season_plot", &seasons);
                callout(
                    &mut cols[0],
                    &format!("The season with the most rentals is **{}**.", summary.best_season.label()),
                );

                let weathers: Vec<(&'static str, u64)> = summary
                    .weather_totals
                    .iter()
                    .map(|(w, v)| (w.label(), *v))
                    .collect();
                cols[1].strong("Total Rental by Weather");
                plot::ranking_chart(&mut cols[1], "weather_plot", &weathers);
                callout(
                    &mut cols[1],
                    &format!("The weather with the most rentals is **{}**.", summary.best_weather.label()),
                );
            });
            ui.separator();

            insight_section(ui, summary);
        });
}

fn metrics_row(ui: &mut Ui, summary: &DashboardSummary) {
    ui.columns(4, |cols| {
        metric(&mut cols[0], "Total Rental", &format_thousands(summary.total_rental));
        metric(&mut cols[1], "Total Registered", &format_thousands(summary.total_registered));
        metric(&mut cols[2], "Total Casual", &format_thousands(summary.total_casual));
        metric(&mut cols[3], "Growth 2012 vs 2011", &summary.growth_text());
    });
}

fn metric(ui: &mut Ui, title: &str, value: &str) {
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.set_min_width(ui.available_width());
        ui.label(RichText::new(title).weak());
        ui.label(RichText::new(value).size(24.0).strong());
    });
}

fn yearly_users_section(ui: &mut Ui, summary: &DashboardSummary) {
    ui.strong("Registered vs Casual per Year");
    plot::yearly_users_chart(ui, &summary.yearly_users);

    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(80.0))
        .columns(Column::auto().at_least(120.0), 2)
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("Year");
            });
            header.col(|ui| {
                ui.strong("Casual");
            });
            header.col(|ui| {
                ui.strong("Registered");
            });
        })
        .body(|mut body| {
            for (year, split) in &summary.yearly_users {
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        ui.label(year.label());
                    });
                    row.col(|ui| {
                        ui.label(format_thousands(split.casual));
                    });
                    row.col(|ui| {
                        ui.label(format_thousands(split.registered));
                    });
                });
            }
        });

    ui.add_space(4.0);
    let (text, color) = match summary.dominant_user_type {
        UserType::Registered => ("Registered users dominate over casual users.", SUCCESS),
        UserType::Casual => ("Casual users are higher than registered users.", WARNING),
    };
    ui.label(RichText::new(text).color(color).strong());
}

fn insight_section(ui: &mut Ui, summary: &DashboardSummary) {
    ui.strong("Business Insight");
    for line in summary.insight_lines() {
        rich_line(ui, &line);
    }

    ui.add_space(6.0);
    ui.strong("Recommendations");
    for line in summary.recommendation_lines() {
        rich_line(ui, &line);
    }
}

fn callout(ui: &mut Ui, text: &str) {
    egui::Frame::group(ui.style())
        .stroke(egui::Stroke::new(1.0, INFO))
        .show(ui, |ui: &mut Ui| {
            ui.set_min_width(ui.available_width());
            rich_line(ui, text);
        });
}

/// Render a line where `**…**` spans are bold.
fn rich_line(ui: &mut Ui, line: &str) {
    ui.horizontal_wrapped(|ui: &mut Ui| {
        ui.spacing_mut().item_spacing.x = 0.0;
        for (i, part) in line.split("**").enumerate() {
            if i % 2 == 1 {
                ui.label(RichText::new(part).strong());
            } else if !part.is_empty() {
                ui.label(part);
            }
        }
    });
}
