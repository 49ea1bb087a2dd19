/// Data layer: core types, loading, filtering, and summaries.
///
/// Architecture:
/// ```text
///  nuclear_explosions.csv (Latin-1, raw column names)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  decode + rename columns → typed records
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  Vec<TestRecord>, country/year indices (immutable)
///   └──────────┘
///        │
///        ├──► filter   country set + year range → row index view
///        └──► summary  counts, mean yield, top-N over a view
/// ```

pub mod cache;
pub mod filter;
pub mod loader;
pub mod model;
pub mod summary;
