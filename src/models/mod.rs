pub mod asset;
pub mod alert;

pub use asset::Asset;
pub use alert::{AlertCondition, AlertRule};
