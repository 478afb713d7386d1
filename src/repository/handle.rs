use super::Dataset;
use crate::error::{IrrigationError, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Shared, read-only view of a loaded dataset.
///
/// Cloning is cheap and the handle can be sent to any task; nothing behind it
/// is ever mutated after load.
#[derive(Debug, Clone)]
pub struct DatasetHandle {
    dataset: Arc<Dataset>,
    source: Option<PathBuf>,
    loaded_at: DateTime<Utc>,
}

impl DatasetHandle {
    pub fn new(dataset: Dataset, source: Option<PathBuf>) -> Self {
        Self {
            dataset: Arc::new(dataset),
            source,
            loaded_at: Utc::now(),
        }
    }

    /// Read and parse the dataset file without blocking the runtime.
    pub async fn initialize(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        tracing::debug!("Loading crop data from {}", path.display());

        let content = tokio::fs::read_to_string(&path).await.map_err(|e| {
            tracing::error!("Error loading crop data from {}: {}", path.display(), e);
            IrrigationError::DataUnavailable(format!("{}: {}", path.display(), e))
        })?;

        let dataset = Dataset::parse(&content);
        tracing::info!("Loaded {} crop data entries", dataset.len());

        Ok(Self::new(dataset, Some(path)))
    }

    /// Blocking counterpart of [`DatasetHandle::initialize`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let dataset = Dataset::load(path)?;
        tracing::info!("Loaded {} crop data entries", dataset.len());
        Ok(Self::new(dataset, Some(path.to_path_buf())))
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    pub fn summary(&self) -> DatasetSummary {
        DatasetSummary {
            source: self.source.as_ref().map(|p| p.display().to_string()),
            records: self.dataset.len(),
            crops: self.dataset.unique_crops().len(),
            soil_types: self.dataset.unique_soil_types().len(),
            categories: self.dataset.crops_by_category().len(),
            loaded_at: self.loaded_at,
        }
    }
}

impl Deref for DatasetHandle {
    type Target = Dataset;

    fn deref(&self) -> &Dataset {
        &self.dataset
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DatasetSummary {
    pub source: Option<String>,
    pub records: usize,
    pub crops: usize,
    pub soil_types: usize,
    pub categories: usize,
    pub loaded_at: DateTime<Utc>,
}

impl std::fmt::Display for DatasetSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} records | {} crops | {} soil types | {} categories",
            self.records, self.crops, self.soil_types, self.categories
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
cropName,category,soilType,base,adjusted,multiplier,source
Tomato,Vegetable,Loam,500,450,1.2,FAO 56
Tomato,Vegetable,Clay,500,520,0.9,FAO 56
Basil,Herb,Sandy,200,220,1.4,Extension guide
";

    fn temp_csv(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "smart-irrigation-{}-{}.csv",
            name,
            std::process::id()
        ));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn summary_counts_indices() {
        let handle = DatasetHandle::new(Dataset::parse(SAMPLE), None);
        let summary = handle.summary();
        assert_eq!(summary.records, 3);
        assert_eq!(summary.crops, 2);
        assert_eq!(summary.soil_types, 3);
        assert_eq!(summary.categories, 2);
        assert!(summary.source.is_none());
        assert_eq!(
            summary.to_string(),
            "3 records | 2 crops | 3 soil types | 2 categories"
        );
    }

    #[test]
    fn clones_share_the_same_dataset() {
        let handle = DatasetHandle::new(Dataset::parse(SAMPLE), None);
        let other = handle.clone();
        assert!(std::ptr::eq(handle.dataset(), other.dataset()));
        assert_eq!(other.unique_crops(), &["Basil", "Tomato"]);
    }

    #[tokio::test]
    async fn initialize_reads_file() {
        let path = temp_csv("handle-init", SAMPLE);
        let handle = DatasetHandle::initialize(&path).await.unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(handle.len(), 3);
        assert_eq!(handle.source(), Some(path.as_path()));
        assert!(handle.get_crop_data("Basil", "Sandy").is_some());
    }

    #[tokio::test]
    async fn initialize_missing_file_is_data_unavailable() {
        let path = std::env::temp_dir().join("smart-irrigation-missing-handle.csv");
        let result = DatasetHandle::initialize(&path).await;
        assert!(matches!(result, Err(IrrigationError::DataUnavailable(_))));
    }

    #[test]
    fn blocking_load_matches_async_initialize() {
        let path = temp_csv("handle-load", SAMPLE);
        let handle = DatasetHandle::load(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(handle.records(), Dataset::parse(SAMPLE).records());
    }
}
