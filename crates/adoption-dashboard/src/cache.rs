//! Process-wide cache of the loaded procedure table

use adoption_analytics::{load_procedures, LoaderOptions, ProcedureTable};
use adoption_common::{AdoptionError, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Loads the dataset once and shares it between requests.
///
/// Only successful loads are kept, so a missing or broken file is retried
/// on the next request.
#[derive(Debug)]
pub struct DatasetCache {
    path: PathBuf,
    options: LoaderOptions,
    table: RwLock<Option<Arc<ProcedureTable>>>,
}

impl DatasetCache {
    pub fn new(path: impl Into<PathBuf>, options: LoaderOptions) -> Self {
        Self {
            path: path.into(),
            options,
            table: RwLock::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The cached table, loading it on first use.
    pub async fn get(&self) -> Result<Arc<ProcedureTable>> {
        if let Some(table) = self.table.read().await.as_ref() {
            return Ok(Arc::clone(table));
        }

        let mut slot = self.table.write().await;
        if let Some(table) = slot.as_ref() {
            return Ok(Arc::clone(table));
        }

        debug!(path = %self.path.display(), "Loading procedure dataset");
        let path = self.path.clone();
        let options = self.options;
        let table = tokio::task::spawn_blocking(move || load_procedures(&path, &options))
            .await
            .map_err(|e| AdoptionError::data_load_with_source("Dataset loading task failed", e))??;

        info!(
            rows = table.len(),
            dropped = table.dropped_rows(),
            "Procedure dataset cached"
        );
        let table = Arc::new(table);
        *slot = Some(Arc::clone(&table));
        Ok(table)
    }

    pub async fn is_loaded(&self) -> bool {
        self.table.read().await.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adoption_common::test_utils::{write_csv_fixture, SAMPLE_PROCEDURES_CSV};
    use std::io::Write;
    use tokio_test::{assert_err, assert_ok};

    #[tokio::test]
    async fn test_loads_once_and_shares() {
        let fixture = write_csv_fixture(SAMPLE_PROCEDURES_CSV);
        let cache = DatasetCache::new(fixture.path(), LoaderOptions::default());
        assert!(!cache.is_loaded().await);

        let first = assert_ok!(cache.get().await);
        let second = assert_ok!(cache.get().await);

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.len(), 3);
        assert!(cache.is_loaded().await);
    }

    #[tokio::test]
    async fn test_missing_file_is_not_cached() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("device_adoption_data.csv");
        let cache = DatasetCache::new(&path, LoaderOptions::default());

        let err = assert_err!(cache.get().await);
        assert!(err.is_not_found());
        assert!(!cache.is_loaded().await);

        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(SAMPLE_PROCEDURES_CSV.as_bytes()).unwrap();

        let table = assert_ok!(cache.get().await);
        assert_eq!(table.len(), 3);
    }

    #[tokio::test]
    async fn test_parse_failure_is_data_error() {
        let fixture = write_csv_fixture("Physician_ID,Device_ID\n1,D-1\n");
        let cache = DatasetCache::new(fixture.path(), LoaderOptions::default());

        let err = cache.get().await.unwrap_err();
        assert!(err.is_data_error());
        assert!(!err.is_not_found());
    }
}
