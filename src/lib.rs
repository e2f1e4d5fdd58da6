//! Library entrypoint for Coindash.
//!
//! This file exists mainly to make controller tests easy (integration tests
//! under `tests/` can import the app state, routers, controllers, services).

use std::sync::Arc;

use tokio::sync::RwLock;

pub mod config;
pub mod market;
pub mod models;

pub mod services;

#[path = "views/render.rs"]
pub mod render;
#[path = "views/templates.rs"]
pub mod templates;

pub mod controllers;
pub mod routes;

#[derive(Clone)]
pub struct AppState {
    pub hbs: templates::Hbs,
    pub settings: config::Settings,
    pub coingecko: services::coingecko::CoingeckoClient,
    pub market: Arc<RwLock<market::MarketState>>,
    pub events_tx: tokio::sync::broadcast::Sender<String>,
}
