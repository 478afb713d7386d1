use serde::{Deserialize, Serialize};

/// Seasonal water requirement for one crop grown in one soil type.
///
/// `(crop_name, soil_type)` is the lookup key. Records are never mutated after
/// the dataset is loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropSoilRecord {
    pub crop_name: String,
    pub category: String,
    pub soil_type: String,
    pub base_water_mm_per_season: f32,
    /// Base water adjusted for regional and soil factors. Drives the daily need.
    pub adjusted_water_mm_per_season: f32,
    /// Scales the computed irrigation duration.
    pub irrigation_frequency_multiplier: f32,
    /// Citation for the figures, informational only.
    pub source: String,
}

impl CropSoilRecord {
    pub fn new(
        crop_name: impl Into<String>,
        category: impl Into<String>,
        soil_type: impl Into<String>,
    ) -> Self {
        Self {
            crop_name: crop_name.into(),
            category: category.into(),
            soil_type: soil_type.into(),
            base_water_mm_per_season: 0.0,
            adjusted_water_mm_per_season: 0.0,
            irrigation_frequency_multiplier: 1.0,
            source: String::new(),
        }
    }

    pub fn with_water(mut self, base_mm: f32, adjusted_mm: f32) -> Self {
        self.base_water_mm_per_season = base_mm;
        self.adjusted_water_mm_per_season = adjusted_mm;
        self
    }

    pub fn with_multiplier(mut self, multiplier: f32) -> Self {
        self.irrigation_frequency_multiplier = multiplier;
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    pub fn matches(&self, crop_name: &str, soil_type: &str) -> bool {
        self.crop_name == crop_name && self.soil_type == soil_type
    }
}

impl std::fmt::Display for CropSoilRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}) in {}", self.crop_name, self.category, self.soil_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_record_uses_neutral_defaults() {
        let record = CropSoilRecord::new("Tomato", "Vegetable", "Loam");
        assert_eq!(record.base_water_mm_per_season, 0.0);
        assert_eq!(record.adjusted_water_mm_per_season, 0.0);
        assert_eq!(record.irrigation_frequency_multiplier, 1.0);
        assert!(record.source.is_empty());
    }

    #[test]
    fn matches_is_case_sensitive() {
        let record = CropSoilRecord::new("Tomato", "Vegetable", "Loam");
        assert!(record.matches("Tomato", "Loam"));
        assert!(!record.matches("tomato", "Loam"));
        assert!(!record.matches("Tomato", "loam"));
        assert!(!record.matches("Tomato", "Clay"));
    }

    #[test]
    fn display_names_crop_category_and_soil() {
        let record = CropSoilRecord::new("Money Plant", "Houseplant", "General Gardening Soil");
        assert_eq!(
            record.to_string(),
            "Money Plant (Houseplant) in General Gardening Soil"
        );
    }
}
