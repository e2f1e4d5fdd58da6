use axum::{routing::get, Router};

use crate::{controllers::realtime_controller, AppState};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router.route("/events", get(realtime_controller::sse_events))
}
