use std::path::Path;
use std::sync::Arc;

use once_cell::sync::OnceCell;

use super::loader::{self, LoadError};
use super::model::Dataset;

// ---------------------------------------------------------------------------
// Load-once dataset cache
// ---------------------------------------------------------------------------

/// Process-wide cache for the base dataset.  The source file is static, so
/// the table is read at most once and then shared read-only; sessions derive
/// their own filtered views from the shared snapshot and never mutate it.
#[derive(Default)]
pub struct DatasetCache {
    cell: OnceCell<Arc<Dataset>>,
}

impl DatasetCache {
    pub const fn new() -> Self {
        DatasetCache {
            cell: OnceCell::new(),
        }
    }

    /// Return the cached dataset, loading it on first access.  A failed load
    /// leaves the cache empty so the error is reported, not memoized.
    pub fn get_or_load(&self, path: &Path) -> Result<Arc<Dataset>, LoadError> {
        self.cell
            .get_or_try_init(|| loader::load_csv(path).map(Arc::new))
            .cloned()
    }

    /// The dataset if it has already been loaded.
    pub fn get(&self) -> Option<Arc<Dataset>> {
        self.cell.get().cloned()
    }
}
