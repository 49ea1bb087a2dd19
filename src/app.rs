use eframe::egui::{self, ScrollArea};

use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct YieldscopeApp {
    pub state: AppState,
}

impl YieldscopeApp {
    pub fn with_state(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for YieldscopeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: table, charts, map, summary ----
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.state.dataset.is_none() {
                ui.centered_and_justified(|ui| {
                    ui.heading("Open a nuclear test CSV to explore  (File → Open…)");
                });
                return;
            }

            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.heading("Nuclear Explosions: Data Explorer");
                    ui.separator();

                    egui::CollapsingHeader::new("Data")
                        .default_open(true)
                        .show(ui, |ui| panels::data_table(ui, &self.state));

                    egui::CollapsingHeader::new("Explosion Yields")
                        .default_open(true)
                        .show(ui, |ui| plot::yield_scatter(ui, &self.state));

                    egui::CollapsingHeader::new("Most Explosive Tests")
                        .default_open(true)
                        .show(ui, |ui| plot::top_yield_bar(ui, &self.state));

                    egui::CollapsingHeader::new("Tests by Country")
                        .default_open(true)
                        .show(ui, |ui| plot::country_counts_chart(ui, &self.state));

                    egui::CollapsingHeader::new("Test Locations")
                        .default_open(true)
                        .show(ui, |ui| plot::point_map(ui, &self.state));

                    egui::CollapsingHeader::new("Data Summary")
                        .default_open(true)
                        .show(ui, |ui| panels::summary_panel(ui, &self.state));
                });
        });
    }
}
