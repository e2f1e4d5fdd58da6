use axum::{
    extract::{Form, Path, State},
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
};
use regex::Regex;
use serde::Deserialize;
use serde_json::json;

use crate::{models::AlertCondition, AppState};

fn hx_trigger_value(events: &[&str]) -> HeaderValue {
    if events.len() == 1 {
        return HeaderValue::from_str(events[0]).unwrap_or_else(|_| HeaderValue::from_static(""));
    }

    let mut map = serde_json::Map::new();
    for &e in events {
        map.insert(e.to_string(), serde_json::Value::Bool(true));
    }

    let json = serde_json::Value::Object(map).to_string();
    HeaderValue::from_str(&json).unwrap_or_else(|_| HeaderValue::from_static(""))
}

fn form_error(msg: &str) -> Response {
    (
        StatusCode::OK,
        Html(format!(r#"<div class="form-error">{msg}</div>"#)),
    )
        .into_response()
}

#[derive(Deserialize)]
pub struct CreateAlertForm {
    #[serde(rename = "cryptoId")]
    pub crypto_id: String,
    pub condition: String,
    #[serde(rename = "targetPrice")]
    pub target_price: String,
    pub email: String,
}

// POST /alerts
pub async fn post_create_alert(
    State(state): State<AppState>,
    Form(form): Form<CreateAlertForm>,
) -> Response {
    let crypto_id = form.crypto_id.trim().to_string();
    if crypto_id.is_empty() {
        return form_error("Please select a cryptocurrency.");
    }

    let condition: AlertCondition = match form.condition.parse() {
        Ok(c) => c,
        Err(_) => return form_error("Please choose a valid condition."),
    };

    let target: f64 = match form.target_price.trim().parse() {
        Ok(v) => v,
        Err(_) => return form_error("Please enter a valid target price."),
    };
    if !target.is_finite() || target <= 0.0 {
        return form_error("Please enter a valid target price.");
    }

    let email = form.email.trim().to_string();
    let re = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
    if !re.is_match(&email) {
        return form_error("Please enter a valid email address.");
    }

    {
        let mut market = state.market.write().await;
        market.add_alert(crypto_id, condition, target, email);
    }

    let _ = state.events_tx.send("alertsUpdated".to_string());

    let mut headers = HeaderMap::new();
    headers.insert("HX-Trigger", hx_trigger_value(&["alertsUpdated"]));

    (
        StatusCode::OK,
        headers,
        Html(r#"<div class="form-success">Alert created.</div>"#.to_string()),
    )
        .into_response()
}

// POST /alerts/:id/delete
pub async fn post_delete_alert(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    let id: i64 = match id.parse() {
        Ok(x) => x,
        Err(_) => return (StatusCode::BAD_REQUEST, Html("bad id".to_string())).into_response(),
    };

    {
        let mut market = state.market.write().await;
        market.remove_alert(id);
    }

    let _ = state.events_tx.send("alertsUpdated".to_string());

    let mut headers = HeaderMap::new();
    headers.insert("HX-Trigger", hx_trigger_value(&["alertsUpdated"]));

    (StatusCode::OK, headers, Html("".to_string())).into_response()
}

// GET /alerts/list
pub async fn get_alerts_list(State(state): State<AppState>) -> Response {
    let ctx = {
        let market = state.market.read().await;

        let items: Vec<serde_json::Value> = market
            .alerts()
            .iter()
            .map(|a| {
                // A rule whose asset is missing from the snapshot is inert;
                // it renders as a placeholder until the id shows up.
                let label = market.find_asset(&a.crypto_id).map(|asset| {
                    let direction = match a.condition {
                        AlertCondition::Above => "Above",
                        AlertCondition::Below => "Below",
                    };
                    format!(
                        "{} ({}) - {} ${}",
                        asset.name,
                        asset.symbol.to_uppercase(),
                        direction,
                        a.target_price
                    )
                });

                json!({ "id": a.id.to_string(), "label": label })
            })
            .collect();

        json!({
            "count": items.len(),
            "has_alerts": !items.is_empty(),
            "alerts": items,
        })
    };

    let html = state
        .hbs
        .render("partials/alerts_list", &ctx)
        .unwrap_or_else(|e| format!("template error: {e}"));

    (StatusCode::OK, Html(html)).into_response()
}

// GET /notification
pub async fn get_notification(State(state): State<AppState>) -> Response {
    let ctx = {
        let market = state.market.read().await;
        match market.notification() {
            Some(msg) => json!({ "visible": true, "message": msg }),
            None => json!({ "visible": false }),
        }
    };

    let html = state
        .hbs
        .render("partials/notification", &ctx)
        .unwrap_or_else(|e| format!("template error: {e}"));

    (StatusCode::OK, Html(html)).into_response()
}

// POST /notification/dismiss
pub async fn post_dismiss_notification(State(state): State<AppState>) -> Response {
    {
        let mut market = state.market.write().await;
        market.dismiss_notification();
    }

    let html = state
        .hbs
        .render("partials/notification", &json!({ "visible": false }))
        .unwrap_or_else(|e| format!("template error: {e}"));

    (StatusCode::OK, Html(html)).into_response()
}
