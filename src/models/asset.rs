use serde::{Deserialize, Serialize};

/// One entry of the market snapshot, as returned by the CoinGecko
/// `/coins/markets` listing. The whole snapshot is replaced wholesale on
/// every successful poll.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asset {
    pub id: String,
    pub name: String,
    pub symbol: String,

    pub current_price: f64,

    // Nullable upstream, so optional here.
    pub high_24h: Option<f64>,
    pub low_24h: Option<f64>,
    pub price_change_percentage_24h: Option<f64>,

    // Icon URL
    pub image: String,
}
