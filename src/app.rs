use crate::config::Config;
use crate::logic::{IrrigationService, LoadState};
use crate::models::{CropSoilRecord, IrrigationRecommendation};

const LOAD_FAILED: &str = "Failed to load crop data";

#[derive(Debug, Clone, PartialEq)]
pub enum AppState {
    Loading,
    Error(String),
    Ready(ReadyState),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReadyState {
    pub categories: Vec<String>,
    /// Crops offered in the crop selector, narrowed by the selected category.
    pub crops: Vec<String>,
    pub soil_types: Vec<String>,
    pub recommendation: Option<IrrigationRecommendation>,
    pub current_crop: Option<CropSoilRecord>,
}

/// Selection state for a front-end: what is picked, and the recommendation
/// that follows from it. Every change recomputes the recommendation.
pub struct App {
    pub state: AppState,
    pub selected_category: String,
    pub selected_crop: String,
    pub selected_soil_type: String,
    pub soil_moisture: f32,
    config: Config,
    service: Option<IrrigationService>,
}

impl App {
    pub fn new(config: Config) -> Self {
        let soil_moisture = config.defaults.soil_moisture_percent;
        Self {
            state: AppState::Loading,
            selected_category: String::new(),
            selected_crop: String::new(),
            selected_soil_type: String::new(),
            soil_moisture,
            config,
            service: None,
        }
    }

    pub fn service(&self) -> Option<&IrrigationService> {
        self.service.as_ref()
    }

    pub fn ready(&self) -> Option<&ReadyState> {
        match &self.state {
            AppState::Ready(ready) => Some(ready),
            _ => None,
        }
    }

    pub fn recommendation(&self) -> Option<&IrrigationRecommendation> {
        self.ready().and_then(|r| r.recommendation.as_ref())
    }

    pub fn on_loaded(&mut self, load: LoadState) {
        match load {
            LoadState::Loading => {
                self.state = AppState::Loading;
            }
            LoadState::Unavailable(message) => {
                self.service = None;
                self.state = AppState::Error(message);
            }
            LoadState::Ready(handle) => {
                let service = IrrigationService::new(handle);
                let crops = service.list_crop_names();
                let soil_types = service.list_soil_types();

                if crops.is_empty() || soil_types.is_empty() {
                    self.service = None;
                    self.state = AppState::Error(LOAD_FAILED.to_string());
                    return;
                }

                service.check_default_selection(
                    &self.config.defaults.crop,
                    &self.config.defaults.soil_type,
                );

                self.state = AppState::Ready(ReadyState {
                    categories: service.list_categories(),
                    crops,
                    soil_types,
                    recommendation: None,
                    current_crop: None,
                });
                self.service = Some(service);
                self.update_recommendation();
            }
        }
    }

    /// Preselect the configured default crop and soil type if the dataset has them.
    pub fn select_defaults(&mut self) -> bool {
        let Some(service) = &self.service else {
            return false;
        };
        let defaults = &self.config.defaults;
        if service.lookup(&defaults.crop, &defaults.soil_type).is_none() {
            return false;
        }

        self.selected_crop = defaults.crop.clone();
        self.selected_soil_type = defaults.soil_type.clone();
        self.update_recommendation();
        true
    }

    /// Narrow the crop list to one category. An empty category shows every crop.
    pub fn on_category_selected(&mut self, category: &str) {
        self.selected_category = category.to_string();

        if let (Some(service), AppState::Ready(ready)) = (&self.service, &mut self.state) {
            ready.crops = if category.is_empty() {
                service.list_crop_names()
            } else {
                service.list_crops_in_category(category)
            };

            if !ready.crops.contains(&self.selected_crop) {
                self.selected_crop.clear();
            }
        }

        self.update_recommendation();
    }

    pub fn on_crop_selected(&mut self, crop: &str) {
        self.selected_crop = crop.to_string();
        self.update_recommendation();
    }

    pub fn on_soil_type_selected(&mut self, soil_type: &str) {
        self.selected_soil_type = soil_type.to_string();
        self.update_recommendation();
    }

    pub fn on_soil_moisture_changed(&mut self, moisture: f32) {
        self.soil_moisture = moisture;
        self.update_recommendation();
    }

    fn update_recommendation(&mut self) {
        let (Some(service), AppState::Ready(ready)) = (&self.service, &mut self.state) else {
            return;
        };

        let found = if self.selected_crop.is_empty() || self.selected_soil_type.is_empty() {
            None
        } else {
            service.lookup(&self.selected_crop, &self.selected_soil_type)
        };

        match found {
            Some(record) => {
                ready.recommendation = Some(service.recommend(&record, self.soil_moisture));
                ready.current_crop = Some(record);
            }
            None => {
                ready.recommendation = None;
                ready.current_crop = None;
            }
        }
    }
}
