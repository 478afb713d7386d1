pub mod app;
pub mod config;
pub mod error;
pub mod logic;
pub mod models;
pub mod repository;

pub use error::{IrrigationError, Result};
pub use logic::{calculate, DatasetLoader, IrrigationService, LoadState};
pub use models::{CropSoilRecord, IrrigationRecommendation};
pub use repository::{Dataset, DatasetHandle};
