use std::borrow::Cow;
use std::path::Path;

use csv::ByteRecord;
use thiserror::Error;

use super::model::{Dataset, TestRecord};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Fatal load failures.  Malformed cell values are never fatal; they become
/// missing values instead (real-world exports of this dataset are messy).
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("reading source file: {0}")]
    Io(#[from] std::io::Error),
    #[error("parsing CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("source is missing required column '{name}'")]
    MissingColumn { name: &'static str },
}

// ---------------------------------------------------------------------------
// Source schema → canonical schema
// ---------------------------------------------------------------------------

// Raw header names as they appear in the published CSV, including the
// "Yeild" typo.  Downstream code only ever sees the canonical names on
// `TestRecord`; these strings stop here.
const COL_SOURCE_COUNTRY: &str = "WEAPON SOURCE COUNTRY";
const COL_DEPLOYMENT_LOCATION: &str = "WEAPON DEPLOYMENT LOCATION";
const COL_DATA_SOURCE: &str = "Data.Source";
const COL_LATITUDE: &str = "Location.Cordinates.Latitude";
const COL_LONGITUDE: &str = "Location.Cordinates.Longitude";
const COL_MAGNITUDE_BODY: &str = "Data.Magnitude.Body";
const COL_MAGNITUDE_SURFACE: &str = "Data.Magnitude.Surface";
const COL_DEPTH: &str = "Location.Cordinates.Depth";
const COL_YIELD_LOWER: &str = "Data.Yeild.Lower";
const COL_YIELD_UPPER: &str = "Data.Yeild.Upper";
const COL_PURPOSE: &str = "Data.Purpose";
const COL_NAME: &str = "Data.Name";
const COL_TYPE: &str = "Data.Type";
const COL_DAY: &str = "Date.Day";
const COL_MONTH: &str = "Date.Month";
const COL_YEAR: &str = "Date.Year";

/// Column positions resolved from the header row.  Required columns are
/// plain indices; everything else is optional so a partial export still
/// loads (its fields just come back missing).
struct ColumnIndex {
    source_country: usize,
    deployment_location: Option<usize>,
    source: Option<usize>,
    latitude: Option<usize>,
    longitude: Option<usize>,
    magnitude_body: Option<usize>,
    magnitude_surface: Option<usize>,
    depth: Option<usize>,
    yield_lower: usize,
    yield_upper: usize,
    purpose: Option<usize>,
    name: Option<usize>,
    test_type: Option<usize>,
    day: Option<usize>,
    month: Option<usize>,
    year: usize,
}

impl ColumnIndex {
    fn resolve(headers: &[String]) -> Result<Self, LoadError> {
        let find = |name: &str| headers.iter().position(|h| h == name);
        let require = |name: &'static str| {
            find(name).ok_or(LoadError::MissingColumn { name })
        };

        Ok(ColumnIndex {
            source_country: require(COL_SOURCE_COUNTRY)?,
            deployment_location: find(COL_DEPLOYMENT_LOCATION),
            source: find(COL_DATA_SOURCE),
            latitude: find(COL_LATITUDE),
            longitude: find(COL_LONGITUDE),
            magnitude_body: find(COL_MAGNITUDE_BODY),
            magnitude_surface: find(COL_MAGNITUDE_SURFACE),
            depth: find(COL_DEPTH),
            yield_lower: require(COL_YIELD_LOWER)?,
            yield_upper: require(COL_YIELD_UPPER)?,
            purpose: find(COL_PURPOSE),
            name: find(COL_NAME),
            test_type: find(COL_TYPE),
            day: find(COL_DAY),
            month: find(COL_MONTH),
            year: require(COL_YEAR)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the nuclear test dataset from a CSV file.
///
/// The published dataset is Latin-1 encoded, so rows are read as raw bytes
/// and decoded tolerantly: valid UTF-8 passes through, anything else is
/// interpreted as Latin-1.  A load never fails on a weird byte.
pub fn load_csv(path: &Path) -> Result<Dataset, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)?;

    let headers: Vec<String> = reader
        .byte_headers()?
        .iter()
        .map(|h| decode_cell(h).trim().to_string())
        .collect();
    let columns = ColumnIndex::resolve(&headers)?;

    let mut records = Vec::new();
    let mut row = ByteRecord::new();
    while reader.read_byte_record(&mut row)? {
        records.push(parse_row(&row, &columns));
    }

    log::info!(
        "loaded {} test records from {}",
        records.len(),
        path.display()
    );
    Ok(Dataset::from_records(records))
}

fn parse_row(row: &ByteRecord, cols: &ColumnIndex) -> TestRecord {
    let text = |idx: usize| -> String {
        row.get(idx)
            .map(|b| decode_cell(b).trim().to_string())
            .unwrap_or_default()
    };
    let opt_text = |idx: Option<usize>| idx.map(&text).unwrap_or_default();
    let opt_f64 = |idx: Option<usize>| idx.and_then(|i| parse_f64(&text(i)));
    let opt_i32 = |idx: Option<usize>| idx.and_then(|i| parse_i32(&text(i)));

    let name = {
        let raw = opt_text(cols.name);
        if raw.is_empty() {
            "Unnamed".to_string()
        } else {
            raw
        }
    };

    TestRecord {
        source_country: text(cols.source_country),
        deployment_location: opt_text(cols.deployment_location),
        source: opt_text(cols.source),
        latitude: opt_f64(cols.latitude),
        longitude: opt_f64(cols.longitude),
        body_wave_magnitude: opt_f64(cols.magnitude_body),
        surface_wave_magnitude: opt_f64(cols.magnitude_surface),
        depth: opt_f64(cols.depth),
        yield_lower: parse_f64(&text(cols.yield_lower)),
        yield_upper: parse_f64(&text(cols.yield_upper)),
        purpose: opt_text(cols.purpose),
        name,
        test_type: opt_text(cols.test_type),
        day: opt_i32(cols.day),
        month: opt_i32(cols.month),
        year: parse_i32(&text(cols.year)),
    }
}

// -- Cell helpers --

/// Decode a raw cell: UTF-8 when valid, Latin-1 otherwise.  Latin-1 maps
/// each byte to the Unicode scalar of the same value, so this cannot fail.
fn decode_cell(bytes: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(bytes) {
        Ok(s) => Cow::Borrowed(s),
        Err(_) => Cow::Owned(bytes.iter().map(|&b| b as char).collect()),
    }
}

/// Malformed or empty numeric cells become missing, never an error.
fn parse_f64(s: &str) -> Option<f64> {
    if s.is_empty() {
        return None;
    }
    s.parse::<f64>().ok()
}

fn parse_i32(s: &str) -> Option<i32> {
    if s.is_empty() {
        return None;
    }
    // Some exports write integer columns as "1945.0".
    s.parse::<i32>()
        .ok()
        .or_else(|| s.parse::<f64>().ok().map(|f| f as i32))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const FULL_HEADER: &str = "WEAPON SOURCE COUNTRY,WEAPON DEPLOYMENT LOCATION,Data.Source,\
Location.Cordinates.Latitude,Location.Cordinates.Longitude,Data.Magnitude.Body,\
Data.Magnitude.Surface,Location.Cordinates.Depth,Data.Yeild.Lower,Data.Yeild.Upper,\
Data.Purpose,Data.Name,Data.Type,Date.Day,Date.Month,Date.Year";

    fn write_csv(bytes: &[u8]) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().expect("temp file");
        f.write_all(bytes).expect("write csv");
        f
    }

    fn load_str(body: &str) -> Dataset {
        let f = write_csv(format!("{FULL_HEADER}\n{body}").as_bytes());
        load_csv(f.path()).expect("load")
    }

    #[test]
    fn renames_and_derives_yield_average() {
        let ds = load_str("USA,Alamogordo,DOE,33.6,-106.4,,,-6.0,18.0,18.0,Wr,Trinity,Tower,16,7,1945");
        assert_eq!(ds.len(), 1);
        let r = &ds.records[0];
        assert_eq!(r.source_country, "USA");
        assert_eq!(r.name, "Trinity");
        assert_eq!(r.year, Some(1945));
        assert_eq!(r.yield_average(), Some(18.0));
    }

    #[test]
    fn missing_name_becomes_unnamed() {
        let ds = load_str("USSR,Semipalatinsk,MILES,50.0,78.0,,,0.0,22.0,22.0,Wr,,Surface,29,8,1949");
        assert_eq!(ds.records[0].name, "Unnamed");
    }

    #[test]
    fn malformed_numerics_become_missing() {
        let ds = load_str("USA,NTS,DOE,bogus,,n/a,,,x,y,We,Able,Air,,13,xyz");
        let r = &ds.records[0];
        assert_eq!(r.latitude, None);
        assert_eq!(r.body_wave_magnitude, None);
        assert_eq!(r.yield_lower, None);
        assert_eq!(r.yield_average(), None);
        assert_eq!(r.year, None);
        assert_eq!(r.day, None);
        assert_eq!(r.month, Some(13));
    }

    #[test]
    fn float_formatted_year_parses() {
        let ds = load_str("FRANCE,Reggane,DOE,26.3,0.0,,,,60.0,70.0,Wr,Gerboise,Tower,13,2,1960.0");
        assert_eq!(ds.records[0].year, Some(1960));
    }

    #[test]
    fn latin1_bytes_do_not_fail() {
        // 0xE9 is 'é' in Latin-1 and invalid as a standalone UTF-8 byte.
        let mut body = format!("{FULL_HEADER}\n").into_bytes();
        body.extend_from_slice(b"FRANCE,Mururoa,DOE,,,,,,5.0,5.0,Wr,Canop");
        body.push(0xE9);
        body.extend_from_slice(b"e,Atmosph,24,8,1968\n");
        let f = write_csv(&body);
        let ds = load_csv(f.path()).expect("latin1 load");
        assert_eq!(ds.records[0].name, "Canop\u{e9}e");
    }

    #[test]
    fn missing_required_column_is_fatal() {
        let f = write_csv(b"WEAPON SOURCE COUNTRY,Data.Yeild.Lower,Data.Yeild.Upper\nUSA,1,2\n");
        match load_csv(f.path()) {
            Err(LoadError::MissingColumn { name }) => assert_eq!(name, "Date.Year"),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn unreadable_source_is_fatal() {
        assert!(matches!(
            load_csv(Path::new("/nonexistent/nuclear.csv")),
            Err(LoadError::Csv(_) | LoadError::Io(_))
        ));
    }

    #[test]
    fn short_rows_load_with_missing_fields() {
        let ds = load_str("UK,Monte Bello,DOE");
        let r = &ds.records[0];
        assert_eq!(r.source_country, "UK");
        assert_eq!(r.name, "Unnamed");
        assert_eq!(r.year, None);
    }
}
