use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;

use crate::color::CountryColors;
use crate::data::filter::{filtered_indices, FilterSelection};
use crate::data::model::Dataset;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Base dataset, shared read-only (None until a source loads).
    pub dataset: Option<Arc<Dataset>>,

    /// Active country/year filter parameters.
    pub selection: FilterSelection,

    /// Indices of records passing the current filters (cached).
    pub visible_indices: Vec<usize>,

    /// Per-country colours for charts and the map.
    pub country_colors: CountryColors,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            selection: FilterSelection {
                countries: BTreeSet::new(),
                year_range: (1960, 1980),
            },
            visible_indices: Vec::new(),
            country_colors: CountryColors::default(),
            status_message: None,
        }
    }
}

impl AppState {
    /// Ingest a dataset: reset filters to the initial selection (all
    /// countries, 1960–1980 window) and rebuild colours.
    pub fn set_dataset(&mut self, dataset: Arc<Dataset>) {
        self.selection = FilterSelection::initial(&dataset);
        self.country_colors = CountryColors::new(&dataset.countries);
        self.visible_indices = filtered_indices(&dataset, &self.selection);
        self.dataset = Some(dataset);
        self.status_message = None;
    }

    /// Recompute `visible_indices` after a filter change.
    pub fn refilter(&mut self) {
        if let Some(ds) = &self.dataset {
            self.visible_indices = filtered_indices(ds, &self.selection);
        }
    }

    /// Toggle a single country in the selection.
    pub fn toggle_country(&mut self, country: &str) {
        if !self.selection.countries.remove(country) {
            self.selection.countries.insert(country.to_string());
        }
        self.refilter();
    }

    /// Select every country present in the dataset.
    pub fn select_all_countries(&mut self) {
        if let Some(ds) = &self.dataset {
            self.selection.countries = ds.countries.iter().cloned().collect();
        }
        self.refilter();
    }

    /// Clear the country selection (empty view, not an error).
    pub fn select_no_countries(&mut self) {
        self.selection.countries.clear();
        self.refilter();
    }

    /// Set the inclusive year range, normalizing an inverted pair.
    pub fn set_year_range(&mut self, lo: i32, hi: i32) {
        self.selection.year_range = (lo.min(hi), lo.max(hi));
        self.refilter();
    }

    /// Write the filtered view as a JSON array of records.
    pub fn export_filtered(&self, path: &Path) -> anyhow::Result<()> {
        let ds = self
            .dataset
            .as_ref()
            .context("no dataset loaded")?;
        let rows: Vec<_> = self
            .visible_indices
            .iter()
            .map(|&i| &ds.records[i])
            .collect();
        let file = std::fs::File::create(path)
            .with_context(|| format!("creating {}", path.display()))?;
        serde_json::to_writer_pretty(file, &rows).context("writing JSON export")?;
        log::info!("exported {} records to {}", rows.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::TestRecord;

    fn record(country: &str, year: i32) -> TestRecord {
        TestRecord {
            source_country: country.to_string(),
            deployment_location: String::new(),
            source: String::new(),
            latitude: None,
            longitude: None,
            body_wave_magnitude: None,
            surface_wave_magnitude: None,
            depth: None,
            yield_lower: Some(1.0),
            yield_upper: Some(1.0),
            purpose: String::new(),
            name: "Unnamed".to_string(),
            test_type: String::new(),
            day: None,
            month: None,
            year: Some(year),
        }
    }

    fn state() -> AppState {
        let ds = Arc::new(Dataset::from_records(vec![
            record("USA", 1962),
            record("USSR", 1961),
            record("USA", 1990),
        ]));
        let mut st = AppState::default();
        st.set_dataset(ds);
        st
    }

    #[test]
    fn ingest_selects_all_countries_and_clamped_window() {
        let st = state();
        assert_eq!(st.selection.countries.len(), 2);
        // Data starts in 1961, so the 1960–1980 window clamps to it.
        assert_eq!(st.selection.year_range, (1961, 1980));
        assert_eq!(st.visible_indices, vec![0, 1]);
    }

    #[test]
    fn toggling_a_country_refilters() {
        let mut st = state();
        st.toggle_country("USSR");
        assert_eq!(st.visible_indices, vec![0]);
        st.toggle_country("USSR");
        assert_eq!(st.visible_indices, vec![0, 1]);
    }

    #[test]
    fn deselecting_everything_gives_an_empty_view() {
        let mut st = state();
        st.select_no_countries();
        assert!(st.visible_indices.is_empty());
    }

    #[test]
    fn inverted_year_range_is_normalized() {
        let mut st = state();
        st.set_year_range(1995, 1960);
        assert_eq!(st.selection.year_range, (1960, 1995));
        assert_eq!(st.visible_indices, vec![0, 1, 2]);
    }
}
