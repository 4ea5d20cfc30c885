use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

use super::loader::{load_file, DataSourceError};
use super::model::Table;

// ---------------------------------------------------------------------------
// DatasetStore – load-once owner of the base table
// ---------------------------------------------------------------------------

/// Owns the base table for the lifetime of the process. Constructed once at
/// startup and handed to consumers by reference.
#[derive(Debug)]
pub struct DatasetStore {
    path: PathBuf,
    table: OnceLock<Arc<Table>>,
}

impl DatasetStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            table: OnceLock::new(),
        }
    }

    /// Return the base table, reading the file only on the first successful
    /// call. A failed load leaves the store empty.
    pub fn load(&self) -> Result<Arc<Table>, DataSourceError> {
        if let Some(table) = self.table.get() {
            return Ok(Arc::clone(table));
        }
        let table = Arc::new(load_file(&self.path)?);
        Ok(Arc::clone(self.table.get_or_init(|| table)))
    }

    #[cfg(test)]
    fn is_loaded(&self) -> bool {
        self.table.get().is_some()
    }
}
