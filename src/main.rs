mod app;
mod color;
mod data;
mod state;
mod ui;

use std::path::PathBuf;

use app::YieldscopeApp;
use data::cache::DatasetCache;
use eframe::egui;
use state::AppState;

/// Base dataset, loaded at most once per process and shared read-only.
static BASE_DATASET: DatasetCache = DatasetCache::new();

fn main() -> eframe::Result {
    env_logger::init();

    let csv_path: PathBuf = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("nuclear_explosions.csv"));

    let mut state = AppState::default();
    match BASE_DATASET.get_or_load(&csv_path) {
        Ok(dataset) => state.set_dataset(dataset),
        Err(e) => {
            log::error!("failed to load {}: {e}", csv_path.display());
            state.status_message = Some(format!("Failed to load {}: {e}", csv_path.display()));
        }
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Yieldscope – Nuclear Test Explorer",
        options,
        Box::new(|_cc| Ok(Box::new(YieldscopeApp::with_state(state)))),
    )
}
