use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, Legend, Plot, PlotPoints, Points};

use crate::color::intensity_color;
use crate::data::summary;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Scatter – yields of the first rows in view
// ---------------------------------------------------------------------------

/// Scatter of the first 10 filtered rows: one marker per test, y = yield
/// average.  Rows with a missing yield are skipped (nothing to plot).
pub fn yield_scatter(ui: &mut Ui, state: &AppState) {
    let Some(dataset) = &state.dataset else {
        return;
    };

    Plot::new("yield_scatter")
        .legend(Legend::default())
        .x_axis_label("Test")
        .y_axis_label("Yield (Kilotons)")
        .height(280.0)
        .show(ui, |plot_ui| {
            for (slot, &idx) in state.visible_indices.iter().take(10).enumerate() {
                let r = &dataset.records[idx];
                let Some(yield_avg) = r.yield_average() else {
                    continue;
                };
                let points = Points::new(PlotPoints::from(vec![[slot as f64, yield_avg]]))
                    .radius(5.0)
                    .color(state.country_colors.color_for(&r.source_country))
                    .name(&r.name);
                plot_ui.points(points);
            }
        });
}

// ---------------------------------------------------------------------------
// Bar chart – most explosive tests in view
// ---------------------------------------------------------------------------

/// Top 10 rows of the view by yield average, descending.
pub fn top_yield_bar(ui: &mut Ui, state: &AppState) {
    let Some(dataset) = &state.dataset else {
        return;
    };

    let top = summary::top_by_yield(dataset, &state.visible_indices, 10);
    let bars: Vec<Bar> = top
        .iter()
        .enumerate()
        .map(|(slot, &idx)| {
            let r = &dataset.records[idx];
            Bar::new(slot as f64, r.yield_average().unwrap_or(0.0))
                .width(0.7)
                .fill(state.country_colors.color_for(&r.source_country))
                .name(&r.name)
        })
        .collect();

    Plot::new("top_yield_bar")
        .x_axis_label("Test")
        .y_axis_label("Yield (Kilotons)")
        .height(280.0)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

// ---------------------------------------------------------------------------
// Per-country test counts (choropleth surrogate)
// ---------------------------------------------------------------------------

/// Number of tests per source country over the view, one bar per country,
/// filled with a sequential intensity ramp keyed by count.
pub fn country_counts_chart(ui: &mut Ui, state: &AppState) {
    let Some(dataset) = &state.dataset else {
        return;
    };

    let counts = summary::country_counts(dataset, &state.visible_indices);
    let max = counts.first().map(|(_, n)| *n).unwrap_or(0);
    let bars: Vec<Bar> = counts
        .iter()
        .enumerate()
        .map(|(slot, (country, n))| {
            let fraction = if max == 0 {
                0.0
            } else {
                *n as f64 / max as f64
            };
            Bar::new(slot as f64, *n as f64)
                .width(0.7)
                .fill(intensity_color(fraction))
                .name(country)
        })
        .collect();

    Plot::new("country_counts")
        .x_axis_label("Source Country")
        .y_axis_label("Number of Tests")
        .height(280.0)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

// ---------------------------------------------------------------------------
// Point map – test locations
// ---------------------------------------------------------------------------

/// Lat/lon scatter of the view, marker radius proportional to yield average.
/// Records without coordinates are excluded; a missing yield still gets the
/// minimum radius so the site remains visible.
pub fn point_map(ui: &mut Ui, state: &AppState) {
    let Some(dataset) = &state.dataset else {
        return;
    };

    // Scale radii against the largest yield in view.
    let max_yield = state
        .visible_indices
        .iter()
        .filter_map(|&i| dataset.records[i].yield_average())
        .fold(0.0_f64, f64::max);

    Plot::new("point_map")
        .legend(Legend::default())
        .x_axis_label("Longitude")
        .y_axis_label("Latitude")
        .data_aspect(1.0)
        .height(360.0)
        .show(ui, |plot_ui| {
            for &idx in &state.visible_indices {
                let r = &dataset.records[idx];
                let Some((lat, lon)) = r.position() else {
                    continue;
                };
                let radius = marker_radius(r.yield_average(), max_yield);
                let points = Points::new(PlotPoints::from(vec![[lon, lat]]))
                    .radius(radius)
                    .color(state.country_colors.color_for(&r.source_country))
                    .name(&r.name);
                plot_ui.points(points);
            }
        });
}

const MIN_RADIUS: f32 = 2.0;
const MAX_RADIUS: f32 = 14.0;

/// Linear ramp from [`MIN_RADIUS`] to [`MAX_RADIUS`] over [0, max_yield].
fn marker_radius(yield_avg: Option<f64>, max_yield: f64) -> f32 {
    match yield_avg {
        Some(y) if max_yield > 0.0 => {
            MIN_RADIUS + (y / max_yield) as f32 * (MAX_RADIUS - MIN_RADIUS)
        }
        _ => MIN_RADIUS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radius_scales_linearly_with_yield() {
        assert_eq!(marker_radius(None, 100.0), MIN_RADIUS);
        assert_eq!(marker_radius(Some(0.0), 100.0), MIN_RADIUS);
        assert_eq!(marker_radius(Some(100.0), 100.0), MAX_RADIUS);
        let mid = marker_radius(Some(50.0), 100.0);
        assert!(mid > MIN_RADIUS && mid < MAX_RADIUS);
    }

    #[test]
    fn empty_view_gives_minimum_radius() {
        assert_eq!(marker_radius(Some(5.0), 0.0), MIN_RADIUS);
    }
}
