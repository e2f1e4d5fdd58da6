use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse},
};
use serde_json::json;

use crate::{market::Phase, render, AppState};

fn is_htmx(headers: &HeaderMap) -> bool {
    headers
        .get("HX-Request")
        .and_then(|v| v.to_str().ok())
        .map(|v| v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

fn fmt2(x: f64) -> String {
    format!("{:.2}", x)
}

/// Build the context used by the `partials/market` template: exactly one of
/// the loading message, the error message, or the card grid. The previous
/// snapshot is deliberately not rendered while an error is active.
fn market_ctx(state: &crate::market::MarketState) -> serde_json::Value {
    match state.phase() {
        Phase::Loading => json!({ "loading": true }),
        Phase::Error(msg) => json!({ "error": msg }),
        Phase::Ready => {
            let assets: Vec<serde_json::Value> = state
                .snapshot()
                .iter()
                .map(|a| {
                    json!({
                        "id": a.id,
                        "name": a.name,
                        "symbol": a.symbol.to_uppercase(),
                        "image": a.image,
                        "price": fmt2(a.current_price),
                        "change": a.price_change_percentage_24h.map(fmt2),
                        "change_positive": a.price_change_percentage_24h.unwrap_or(0.0) >= 0.0,
                        "high_24h": a.high_24h.map(fmt2),
                        "low_24h": a.low_24h.map(fmt2),
                    })
                })
                .collect();

            json!({ "assets": assets })
        }
    }
}

pub async fn home(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    let body = state
        .hbs
        .render("pages/dashboard", &json!({}))
        .unwrap_or_else(|e| format!("template error: {e}"));

    if is_htmx(&headers) {
        return (StatusCode::OK, Html(body)).into_response();
    }

    match render::render_full(&state, "Crypto Price Alert System", body) {
        Ok(page) => (StatusCode::OK, Html(page)).into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, Html(e)).into_response(),
    }
}

// GET /market
pub async fn get_market(State(state): State<AppState>) -> impl IntoResponse {
    let ctx = {
        let market = state.market.read().await;
        market_ctx(&market)
    };

    let html = state
        .hbs
        .render("partials/market", &ctx)
        .unwrap_or_else(|e| format!("template error: {e}"));

    (StatusCode::OK, Html(html))
}

// GET /alert-form
//
// Re-rendered on every marketUpdated event so the asset picker tracks the
// current snapshot.
pub async fn get_alert_form(State(state): State<AppState>) -> impl IntoResponse {
    let assets: Vec<serde_json::Value> = {
        let market = state.market.read().await;
        market
            .snapshot()
            .iter()
            .map(|a| json!({ "id": a.id, "name": a.name }))
            .collect()
    };

    let html = state
        .hbs
        .render("partials/alert_form", &json!({ "assets": assets }))
        .unwrap_or_else(|e| format!("template error: {e}"));

    (StatusCode::OK, Html(html))
}

pub async fn not_found(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    let body = state
        .hbs
        .render("pages/not_found", &json!({}))
        .unwrap_or_else(|e| format!("template error: {e}"));

    if is_htmx(&headers) {
        return (StatusCode::NOT_FOUND, Html(body)).into_response();
    }

    match render::render_full(&state, "404", body) {
        Ok(page) => (StatusCode::NOT_FOUND, Html(page)).into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, Html(e)).into_response(),
    }
}

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Html("ok".to_string()))
}
