use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time;

use crate::AppState;

/// Spawn the recurring market poller. The first tick fires immediately, so
/// the initial fetch happens on startup; after that one fetch runs per
/// interval. The caller owns the handle and aborts it on shutdown.
pub fn spawn_market_poller(state: AppState) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = time::interval(Duration::from_secs(state.settings.poll_interval_secs));

        loop {
            interval.tick().await;
            run_tick(&state).await;
        }
    })
}

/// One poll cycle: tag the fetch with the next sequence number, hit the
/// markets endpoint and apply the outcome. A response that lost the race to
/// a later fetch is discarded by the state entry points.
pub async fn run_tick(state: &AppState) {
    let seq = state.market.write().await.next_seq();

    let applied = match state.coingecko.markets(&state.settings.vs_currency).await {
        Ok(assets) => {
            let mut market = state.market.write().await;
            market.apply_snapshot(seq, assets)
        }
        Err(e) => {
            tracing::warn!("market fetch failed: {}", e);
            let mut market = state.market.write().await;
            market.apply_fetch_error(seq, e)
        }
    };

    if applied {
        let _ = state.events_tx.send("marketUpdated".to_string());
    }
}
