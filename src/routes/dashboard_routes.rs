use axum::{routing::get, Router};

use crate::{controllers::dashboard_controller, AppState};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/", get(dashboard_controller::home))
        .route("/market", get(dashboard_controller::get_market))
        .route("/alert-form", get(dashboard_controller::get_alert_form))
        .route("/health", get(dashboard_controller::health))
}
