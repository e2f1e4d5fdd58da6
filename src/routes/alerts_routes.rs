use axum::{
    routing::{get, post},
    Router,
};

use crate::{controllers::alerts_controller, AppState};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/alerts", post(alerts_controller::post_create_alert))
        .route("/alerts/list", get(alerts_controller::get_alerts_list))
        .route("/alerts/:id/delete", post(alerts_controller::post_delete_alert))
        .route("/notification", get(alerts_controller::get_notification))
        .route(
            "/notification/dismiss",
            post(alerts_controller::post_dismiss_notification),
        )
}
