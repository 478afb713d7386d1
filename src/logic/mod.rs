pub mod calculations;
pub mod loader;
pub mod service;

pub use calculations::calculate;
pub use loader::{DatasetLoader, LoadState};
pub use service::IrrigationService;
