use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::summary;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel: country multi-select + year range.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filter Options");
    ui.separator();

    let Some(dataset) = state.dataset.clone() else {
        ui.label("No dataset loaded.");
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Year range ----
            if let Some((min_year, max_year)) = dataset.year_bounds {
                ui.strong("Year Range");
                let (mut lo, mut hi) = state.selection.year_range;
                let mut changed = false;
                changed |= ui
                    .add(egui::Slider::new(&mut lo, min_year..=max_year).text("From"))
                    .changed();
                changed |= ui
                    .add(egui::Slider::new(&mut hi, min_year..=max_year).text("To"))
                    .changed();
                if changed {
                    state.set_year_range(lo, hi);
                }
                ui.separator();
            }

            // ---- Country multi-select ----
            let n_selected = state.selection.countries.len();
            let n_total = dataset.countries.len();
            ui.strong(format!("Countries  ({n_selected}/{n_total})"));

            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    state.select_all_countries();
                }
                if ui.small_button("None").clicked() {
                    state.select_no_countries();
                }
            });

            for country in &dataset.countries {
                let mut checked = state.selection.countries.contains(country);
                let text =
                    RichText::new(country).color(state.country_colors.color_for(country));
                if ui.checkbox(&mut checked, text).changed() {
                    state.toggle_country(country);
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
            let can_export = state.dataset.is_some();
            if ui
                .add_enabled(can_export, egui::Button::new("Export filtered…"))
                .clicked()
            {
                export_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} tests loaded, {} in view",
                ds.len(),
                state.visible_indices.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Data table
// ---------------------------------------------------------------------------

/// All canonical columns plus the derived yield average, in display order.
const TABLE_HEADERS: [&str; 17] = [
    "Source Country",
    "Deployment Location",
    "Source",
    "Latitude",
    "Longitude",
    "Body Wave Magnitude",
    "Surface Wave Magnitude",
    "Depth",
    "Explosion Yield L",
    "Explosion Yield U",
    "Purpose",
    "Name",
    "Type",
    "Day",
    "Month",
    "Year",
    "Explosion Yield Average",
];

/// Render the filtered view as a grid with every canonical column.
pub fn data_table(ui: &mut Ui, state: &AppState) {
    let Some(dataset) = &state.dataset else {
        return;
    };

    if state.visible_indices.is_empty() {
        ui.label("No tests match the current filters.");
        return;
    }

    let fmt_opt_f64 = |v: Option<f64>| v.map(|x| format!("{x:.2}")).unwrap_or_default();
    let fmt_opt_i32 = |v: Option<i32>| v.map(|x| x.to_string()).unwrap_or_default();

    TableBuilder::new(ui)
        .striped(true)
        .columns(Column::auto().resizable(true), TABLE_HEADERS.len())
        .header(20.0, |mut header| {
            for title in TABLE_HEADERS {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, state.visible_indices.len(), |mut row| {
                let r = &dataset.records[state.visible_indices[row.index()]];
                let cells = [
                    r.source_country.clone(),
                    r.deployment_location.clone(),
                    r.source.clone(),
                    fmt_opt_f64(r.latitude),
                    fmt_opt_f64(r.longitude),
                    fmt_opt_f64(r.body_wave_magnitude),
                    fmt_opt_f64(r.surface_wave_magnitude),
                    fmt_opt_f64(r.depth),
                    fmt_opt_f64(r.yield_lower),
                    fmt_opt_f64(r.yield_upper),
                    r.purpose.clone(),
                    r.name.clone(),
                    r.test_type.clone(),
                    fmt_opt_i32(r.day),
                    fmt_opt_i32(r.month),
                    fmt_opt_i32(r.year),
                    fmt_opt_f64(r.yield_average()),
                ];
                for cell in cells {
                    row.col(|ui| {
                        ui.label(cell);
                    });
                }
            });
        });
}

// ---------------------------------------------------------------------------
// Summary statistics
// ---------------------------------------------------------------------------

/// Country frequency counts and the mean yield over the filtered view.
pub fn summary_panel(ui: &mut Ui, state: &AppState) {
    let Some(dataset) = &state.dataset else {
        return;
    };

    ui.strong("Top Source Countries");
    let counts = summary::country_counts(dataset, &state.visible_indices);
    if counts.is_empty() {
        ui.label("no data");
    } else {
        egui::Grid::new("country_counts")
            .num_columns(2)
            .striped(true)
            .show(ui, |ui: &mut Ui| {
                for (country, n) in &counts {
                    ui.colored_label(state.country_colors.color_for(country), country);
                    ui.label(n.to_string());
                    ui.end_row();
                }
            });
    }

    ui.add_space(8.0);
    ui.strong("Average Explosion Yield");
    match summary::mean_yield(dataset, &state.visible_indices) {
        Some(mean) => {
            ui.label(format!("{mean:.2} Kilotons"));
        }
        None => {
            ui.label("no data");
        }
    }
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open nuclear test data")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_csv(&path) {
            Ok(dataset) => {
                log::info!(
                    "loaded {} records, {} countries",
                    dataset.len(),
                    dataset.countries.len()
                );
                state.set_dataset(std::sync::Arc::new(dataset));
            }
            Err(e) => {
                log::error!("failed to load file: {e}");
                state.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}

pub fn export_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export filtered records")
        .set_file_name("filtered_tests.json")
        .add_filter("JSON", &["json"])
        .save_file();

    if let Some(path) = file {
        if let Err(e) = state.export_filtered(&path) {
            log::error!("export failed: {e:#}");
            state.status_message = Some(format!("Export failed: {e:#}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::TABLE_HEADERS;

    #[test]
    fn table_shows_every_canonical_column() {
        // The 16 canonical fields plus the derived yield average.
        let expected = [
            "Source Country",
            "Deployment Location",
            "Source",
            "Latitude",
            "Longitude",
            "Body Wave Magnitude",
            "Surface Wave Magnitude",
            "Depth",
            "Explosion Yield L",
            "Explosion Yield U",
            "Purpose",
            "Name",
            "Type",
            "Day",
            "Month",
            "Year",
            "Explosion Yield Average",
        ];
        assert_eq!(TABLE_HEADERS.len(), expected.len());
        for col in expected {
            assert!(
                TABLE_HEADERS.contains(&col),
                "table is missing column '{col}'"
            );
        }
    }
}
