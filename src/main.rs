use std::net::SocketAddr;
use std::sync::Arc;

use tokio::sync::RwLock;

use coindash::{config, market::MarketState, routes, services, templates, AppState};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let settings = config::load();

    let coingecko = services::coingecko::CoingeckoClient::new(
        settings.coingecko_base_url.clone(),
        settings.coingecko_api_key.clone(),
    );
    let (events_tx, _events_rx) = tokio::sync::broadcast::channel::<String>(16);

    let state = AppState {
        hbs: templates::build_handlebars(),
        settings: settings.clone(),
        coingecko,
        market: Arc::new(RwLock::new(MarketState::new())),
        events_tx,
    };

    let poller = services::poller::spawn_market_poller(state.clone());

    let app = routes::app(state);

    let addr = SocketAddr::from((
        settings.host.parse::<std::net::IpAddr>().unwrap(),
        settings.port,
    ));
    tracing::info!("listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();

    // Release the recurring timer exactly once on teardown.
    poller.abort();
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c().await.ok();
    tracing::info!("shutting down");
}
