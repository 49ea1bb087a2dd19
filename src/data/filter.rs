use std::collections::BTreeSet;

use super::model::Dataset;

// ---------------------------------------------------------------------------
// Filter selection: country membership + inclusive year range
// ---------------------------------------------------------------------------

/// The two user-facing predicates: a set of selected source countries and an
/// inclusive `[min, max]` year range.  An empty country set means nothing is
/// selected, so nothing matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSelection {
    pub countries: BTreeSet<String>,
    pub year_range: (i32, i32),
}

impl FilterSelection {
    /// All countries selected, year range spanning the whole dataset but
    /// initially narrowed to 1960–1980 where that intersects the data.
    pub fn initial(dataset: &Dataset) -> Self {
        let countries: BTreeSet<String> = dataset.countries.iter().cloned().collect();
        let (lo, hi) = dataset.year_bounds.unwrap_or((1960, 1980));
        let year_range = (lo.max(1960).min(hi), hi.min(1980).max(lo));
        FilterSelection {
            countries,
            year_range,
        }
    }

    /// Widest selection: every country, every year present in the dataset.
    pub fn full(dataset: &Dataset) -> Self {
        let countries: BTreeSet<String> = dataset.countries.iter().cloned().collect();
        let year_range = dataset.year_bounds.unwrap_or((i32::MIN, i32::MAX));
        FilterSelection {
            countries,
            year_range,
        }
    }
}

/// Return the indices of records passing the current selection, in dataset
/// row order (stable filter).  A record matches when its country is selected
/// AND its year lies within the inclusive range; records without a year
/// never match a range.  Empty selections give empty results, not errors.
pub fn filtered_indices(dataset: &Dataset, selection: &FilterSelection) -> Vec<usize> {
    let (lo, hi) = selection.year_range;
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, r)| {
            selection.countries.contains(&r.source_country)
                && r.year.map(|y| lo <= y && y <= hi).unwrap_or(false)
        })
        .map(|(i, _)| i)
        .collect()
}
