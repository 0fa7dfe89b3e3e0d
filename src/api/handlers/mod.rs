pub mod predict;
pub mod root;

pub use predict::predict_risk;
pub use root::{health_check, welcome};
