use std::collections::BTreeMap;

use super::model::Dataset;

// ---------------------------------------------------------------------------
// Summary statistics over a filtered view
// ---------------------------------------------------------------------------

/// Frequency of `Source Country` over the given view, most frequent first.
/// Ties break alphabetically so the ordering is deterministic.
pub fn country_counts(dataset: &Dataset, indices: &[usize]) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for &i in indices {
        *counts.entry(&dataset.records[i].source_country).or_default() += 1;
    }
    let mut out: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(c, n)| (c.to_string(), n))
        .collect();
    out.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    out
}

/// Mean of the non-missing yield averages over the view.  `None` when no row
/// contributes, so an empty view reports "no data" rather than NaN.
pub fn mean_yield(dataset: &Dataset, indices: &[usize]) -> Option<f64> {
    let mut sum = 0.0;
    let mut n = 0usize;
    for &i in indices {
        if let Some(y) = dataset.records[i].yield_average() {
            sum += y;
            n += 1;
        }
    }
    if n == 0 {
        None
    } else {
        Some(sum / n as f64)
    }
}

/// The `n` rows of the view with the largest yield average, descending.
/// Rows with a missing yield average are excluded.
pub fn top_by_yield(dataset: &Dataset, indices: &[usize], n: usize) -> Vec<usize> {
    let mut ranked: Vec<(usize, f64)> = indices
        .iter()
        .filter_map(|&i| dataset.records[i].yield_average().map(|y| (i, y)))
        .collect();
    // Stable sort keeps view order among equal yields.
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked.truncate(n);
    ranked.into_iter().map(|(i, _)| i).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::TestRecord;

    fn record(name: &str, country: &str, yld: Option<f64>) -> TestRecord {
        TestRecord {
            source_country: country.to_string(),
            deployment_location: String::new(),
            source: String::new(),
            latitude: None,
            longitude: None,
            body_wave_magnitude: None,
            surface_wave_magnitude: None,
            depth: None,
            yield_lower: yld,
            yield_upper: yld,
            purpose: String::new(),
            name: name.to_string(),
            test_type: String::new(),
            day: None,
            month: None,
            year: Some(1960),
        }
    }

    fn sample() -> Dataset {
        Dataset::from_records(vec![
            record("a", "USA", Some(10.0)),
            record("b", "USSR", Some(50.0)),
            record("c", "USA", None),
            record("d", "USA", Some(30.0)),
        ])
    }

    #[test]
    fn counts_sort_by_frequency_then_name() {
        let ds = sample();
        let counts = country_counts(&ds, &[0, 1, 2, 3]);
        assert_eq!(
            counts,
            vec![("USA".to_string(), 3), ("USSR".to_string(), 1)]
        );
    }

    #[test]
    fn mean_skips_missing_yields() {
        let ds = sample();
        assert_eq!(mean_yield(&ds, &[0, 1, 2, 3]), Some(30.0));
    }

    #[test]
    fn mean_over_empty_view_is_no_data() {
        let ds = sample();
        assert_eq!(mean_yield(&ds, &[]), None);
        // A view with rows but no usable yields is also "no data".
        assert_eq!(mean_yield(&ds, &[2]), None);
    }

    #[test]
    fn top_by_yield_descending_without_missing() {
        let ds = sample();
        assert_eq!(top_by_yield(&ds, &[0, 1, 2, 3], 10), vec![1, 3, 0]);
        assert_eq!(top_by_yield(&ds, &[0, 1, 2, 3], 2), vec![1, 3]);
    }
}
