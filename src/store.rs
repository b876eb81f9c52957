use crate::csv_processor;
use crate::series;

/// One consistent view of both datasets.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSnapshot {
    pub version: u64,
    pub full: series::TimeSeries,
    pub daily: series::TimeSeries,
}

/// Where the two datasets are read from.
#[derive(Debug, Clone)]
pub struct SeriesSources {
    pub full: std::path::PathBuf,
    pub daily: std::path::PathBuf,
    pub date_format: String,
}

impl SeriesSources {
    /// Reads both files.
    ///
    /// # Returns
    /// * `anyhow::Result<(series::TimeSeries, series::TimeSeries)>` - `(full, daily)`.
    pub fn load(&self) -> anyhow::Result<(series::TimeSeries, series::TimeSeries)> {
        let full = csv_processor::load_series(&self.full, &self.date_format)?;
        let daily = csv_processor::load_series(&self.daily, &self.date_format)?;
        anyhow::Ok((full, daily))
    }
}

/// Holds the current snapshot; refreshes swap the whole handle.
#[derive(Debug)]
pub struct SeriesStore {
    current: std::sync::RwLock<std::sync::Arc<SeriesSnapshot>>,
}

impl SeriesStore {
    pub fn new(full: series::TimeSeries, daily: series::TimeSeries) -> Self {
        SeriesStore {
            current: std::sync::RwLock::new(std::sync::Arc::new(SeriesSnapshot { version: 1, full, daily })),
        }
    }

    /// Builds a store from files on disk.
    pub fn open(sources: &SeriesSources) -> anyhow::Result<Self> {
        let (full, daily) = sources.load()?;
        anyhow::Ok(Self::new(full, daily))
    }

    /// Returns the snapshot in effect right now.
    ///
    /// The caller keeps that snapshot alive even if a refresh lands meanwhile.
    pub fn current(&self) -> std::sync::Arc<SeriesSnapshot> {
        let guard = self.current.read().unwrap_or_else(|e| e.into_inner());
        std::sync::Arc::clone(&*guard)
    }

    /// Installs a new snapshot and returns its version.
    pub fn replace(&self, full: series::TimeSeries, daily: series::TimeSeries) -> u64 {
        let mut guard = self.current.write().unwrap_or_else(|e| e.into_inner());
        let version = guard.version + 1;
        *guard = std::sync::Arc::new(SeriesSnapshot { version, full, daily });
        tracing::debug!(version, "installed new series snapshot");
        version
    }

    /// Re-reads both files and swaps them in together.
    ///
    /// # Errors
    /// * If either file fails to load; the previous snapshot stays current.
    pub fn reload(&self, sources: &SeriesSources) -> anyhow::Result<u64> {
        let (full, daily) = sources.load()?;
        anyhow::Ok(self.replace(full, daily))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::tests::series;

    #[test]
    fn test_replace_does_not_touch_held_snapshot() {
        let store = SeriesStore::new(
            series(&[("2023-05-01", 9, 0, 1.0)]),
            series(&[("2023-05-01", 18, 0, 1.0)]),
        );
        let before = store.current();
        let version = store.replace(
            series(&[("2023-05-02", 9, 0, 2.0)]),
            series(&[("2023-05-02", 18, 0, 2.0)]),
        );

        assert_eq!(version, 2);
        assert_eq!(before.version, 1);
        assert_eq!(before.full.latest_price(), 1.0);
        let after = store.current();
        assert_eq!(after.version, 2);
        assert_eq!(after.full.latest_price(), 2.0);
        assert_eq!(after.daily.latest_price(), 2.0);
    }

    #[test]
    fn test_failed_reload_keeps_previous_snapshot() {
        let store = SeriesStore::new(
            series(&[("2023-05-01", 9, 0, 1.0)]),
            series(&[("2023-05-01", 18, 0, 1.0)]),
        );
        let sources = SeriesSources {
            full: std::path::PathBuf::from("/nonexistent/full.csv"),
            daily: std::path::PathBuf::from("/nonexistent/last.csv"),
            date_format: crate::csv_processor::DEFAULT_DATE_FORMAT.to_string(),
        };
        assert!(store.reload(&sources).is_err());
        assert_eq!(store.current().version, 1);
    }
}
