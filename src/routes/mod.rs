use axum::Router;
use tower_http::services::ServeDir;

use crate::{controllers::dashboard_controller, AppState};

pub mod dashboard_routes;
pub mod alerts_routes;
pub mod realtime_routes;

pub fn app(state: AppState) -> Router {
    let router = Router::<AppState>::new();

    let router = dashboard_routes::add_routes(router);
    let router = alerts_routes::add_routes(router);
    let router = realtime_routes::add_routes(router);

    router
        .nest_service("/static", ServeDir::new("static"))
        .fallback(dashboard_controller::not_found)
        .with_state(state)
}
