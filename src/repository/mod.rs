pub mod dataset;
pub mod handle;
pub mod parser;

pub use dataset::Dataset;
pub use handle::{DatasetHandle, DatasetSummary};
