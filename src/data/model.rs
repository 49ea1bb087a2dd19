use serde::Serialize;

// ---------------------------------------------------------------------------
// TestRecord – one row of the dataset
// ---------------------------------------------------------------------------

/// A single nuclear test event (one row of the source CSV), with canonical
/// field names.  Every attribute that may be absent in real source data is an
/// `Option`; the loader never fabricates values beyond the documented `name`
/// default.
#[derive(Debug, Clone, Serialize)]
pub struct TestRecord {
    #[serde(rename = "Source Country")]
    pub source_country: String,
    #[serde(rename = "Deployment Location")]
    pub deployment_location: String,
    #[serde(rename = "Source")]
    pub source: String,
    #[serde(rename = "Latitude")]
    pub latitude: Option<f64>,
    #[serde(rename = "Longitude")]
    pub longitude: Option<f64>,
    #[serde(rename = "Body Wave Magnitude")]
    pub body_wave_magnitude: Option<f64>,
    #[serde(rename = "Surface Wave Magnitude")]
    pub surface_wave_magnitude: Option<f64>,
    #[serde(rename = "Depth")]
    pub depth: Option<f64>,
    #[serde(rename = "Explosion Yield L")]
    pub yield_lower: Option<f64>,
    #[serde(rename = "Explosion Yield U")]
    pub yield_upper: Option<f64>,
    #[serde(rename = "Purpose")]
    pub purpose: String,
    /// Never empty after loading; defaults to "Unnamed".
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Type")]
    pub test_type: String,
    #[serde(rename = "Day")]
    pub day: Option<i32>,
    #[serde(rename = "Month")]
    pub month: Option<i32>,
    #[serde(rename = "Year")]
    pub year: Option<i32>,
}

impl TestRecord {
    /// Derived `Explosion Yield Average` = (lower + upper) / 2.
    /// Missing if either bound is missing; never read from the source file.
    pub fn yield_average(&self) -> Option<f64> {
        match (self.yield_lower, self.yield_upper) {
            (Some(lo), Some(hi)) => Some((lo + hi) / 2.0),
            _ => None,
        }
    }

    /// Position for the point map, present only when both coordinates are.
    pub fn position(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full normalized table, an immutable snapshot for the session.
/// Filtering derives index views; nothing here is mutated after load.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// All records, in source row order.
    pub records: Vec<TestRecord>,
    /// Sorted distinct `Source Country` values.
    pub countries: Vec<String>,
    /// Min/max over rows that have a year; `None` when no row does.
    pub year_bounds: Option<(i32, i32)>,
}

impl Dataset {
    /// Build country and year indices from the loaded records.
    pub fn from_records(records: Vec<TestRecord>) -> Self {
        let mut countries: Vec<String> = records
            .iter()
            .map(|r| r.source_country.clone())
            .collect();
        countries.sort();
        countries.dedup();

        let year_bounds = records
            .iter()
            .filter_map(|r| r.year)
            .fold(None, |acc: Option<(i32, i32)>, y| match acc {
                None => Some((y, y)),
                Some((lo, hi)) => Some((lo.min(y), hi.max(y))),
            });

        Dataset {
            records,
            countries,
            year_bounds,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, country: &str, year: Option<i32>) -> TestRecord {
        TestRecord {
            source_country: country.to_string(),
            deployment_location: String::new(),
            source: String::new(),
            latitude: None,
            longitude: None,
            body_wave_magnitude: None,
            surface_wave_magnitude: None,
            depth: None,
            yield_lower: None,
            yield_upper: None,
            purpose: String::new(),
            name: name.to_string(),
            test_type: String::new(),
            day: None,
            month: None,
            year,
        }
    }

    #[test]
    fn yield_average_is_mean_of_bounds() {
        let mut r = record("Trinity", "USA", Some(1945));
        r.yield_lower = Some(18.0);
        r.yield_upper = Some(20.0);
        assert_eq!(r.yield_average(), Some(19.0));
    }

    #[test]
    fn yield_average_missing_when_either_bound_missing() {
        let mut r = record("x", "USA", None);
        r.yield_lower = Some(18.0);
        assert_eq!(r.yield_average(), None);
        r.yield_lower = None;
        r.yield_upper = Some(20.0);
        assert_eq!(r.yield_average(), None);
    }

    #[test]
    fn dataset_indices() {
        let ds = Dataset::from_records(vec![
            record("a", "USSR", Some(1949)),
            record("b", "USA", Some(1945)),
            record("c", "USA", None),
        ]);
        assert_eq!(ds.countries, vec!["USA", "USSR"]);
        assert_eq!(ds.year_bounds, Some((1945, 1949)));
        assert_eq!(ds.len(), 3);
    }

    #[test]
    fn year_bounds_none_without_years() {
        let ds = Dataset::from_records(vec![record("a", "USA", None)]);
        assert_eq!(ds.year_bounds, None);
    }
}
