use super::calculations::calculate;
use crate::error::Result;
use crate::models::{CropSoilRecord, IrrigationRecommendation};
use crate::repository::DatasetHandle;
use std::path::Path;

/// Entry point for front-ends: selector lists, record lookup and the
/// recommendation calculator over one loaded dataset.
#[derive(Debug, Clone)]
pub struct IrrigationService {
    dataset: DatasetHandle,
}

impl IrrigationService {
    pub fn new(dataset: DatasetHandle) -> Self {
        Self { dataset }
    }

    pub async fn initialize(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(DatasetHandle::initialize(path).await?))
    }

    pub fn dataset(&self) -> &DatasetHandle {
        &self.dataset
    }

    pub fn list_crop_names(&self) -> Vec<String> {
        self.dataset.unique_crops().to_vec()
    }

    pub fn list_soil_types(&self) -> Vec<String> {
        self.dataset.unique_soil_types().to_vec()
    }

    pub fn list_categories(&self) -> Vec<String> {
        self.dataset.categories()
    }

    pub fn list_crops_in_category(&self, category: &str) -> Vec<String> {
        self.dataset.get_crops_for_category(category)
    }

    pub fn lookup(&self, crop_name: &str, soil_type: &str) -> Option<CropSoilRecord> {
        self.dataset.get_crop_data(crop_name, soil_type).cloned()
    }

    pub fn recommend(
        &self,
        record: &CropSoilRecord,
        moisture_percent: f32,
    ) -> IrrigationRecommendation {
        calculate(record, moisture_percent)
    }

    /// Log whether the configured default crop/soil pair exists in the data.
    pub fn check_default_selection(&self, crop_name: &str, soil_type: &str) -> bool {
        match self.dataset.get_crop_data(crop_name, soil_type) {
            Some(record) => {
                tracing::debug!(
                    "Default crop data loaded: {} with {}",
                    record.crop_name,
                    record.soil_type
                );
                true
            }
            None => {
                tracing::warn!(
                    "Default crop data not found: {} with {}",
                    crop_name,
                    soil_type
                );
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::Dataset;

    fn service() -> IrrigationService {
        let content = "\
cropName,category,soilType,base,adjusted,multiplier,source
Money Plant,Houseplant,General Gardening Soil,150,135,0.8,Extension guide
Tomato,Vegetable,Loam,500,300,1.5,FAO 56
Carrot,Vegetable,Sandy,400,430,1.1,FAO 56
";
        IrrigationService::new(DatasetHandle::new(Dataset::parse(content), None))
    }

    #[test]
    fn lists_are_sorted() {
        let svc = service();
        assert_eq!(svc.list_crop_names(), vec!["Carrot", "Money Plant", "Tomato"]);
        assert_eq!(
            svc.list_soil_types(),
            vec!["General Gardening Soil", "Loam", "Sandy"]
        );
        assert_eq!(svc.list_categories(), vec!["Houseplant", "Vegetable"]);
        assert_eq!(svc.list_crops_in_category("Vegetable"), vec!["Carrot", "Tomato"]);
        assert!(svc.list_crops_in_category("Fruit").is_empty());
    }

    #[test]
    fn lookup_then_recommend() {
        let svc = service();
        let record = svc.lookup("Tomato", "Loam").unwrap();
        let rec = svc.recommend(&record, 50.0);
        assert_eq!(rec.recommended_water_mm, 5.0);
        assert_eq!(rec.irrigation_duration_minutes, 7);
        assert!(rec.needs_irrigation);

        assert!(svc.lookup("Tomato", "Sandy").is_none());
    }

    #[test]
    fn default_selection_check() {
        let svc = service();
        assert!(svc.check_default_selection("Money Plant", "General Gardening Soil"));
        assert!(!svc.check_default_selection("Money Plant", "Loam"));
    }

    #[tokio::test]
    async fn initialize_fails_without_source() {
        let path = std::env::temp_dir().join("smart-irrigation-service-missing.csv");
        let result = IrrigationService::initialize(&path).await;
        assert!(matches!(
            result,
            Err(crate::error::IrrigationError::DataUnavailable(_))
        ));
    }
}
