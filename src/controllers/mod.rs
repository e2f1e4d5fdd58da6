pub mod dashboard_controller;
pub mod alerts_controller;
pub mod realtime_controller;
