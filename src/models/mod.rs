pub mod crop_soil;
pub mod recommendation;

pub use crop_soil::*;
pub use recommendation::*;
