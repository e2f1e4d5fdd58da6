use std::env;

#[derive(Debug, Clone)]
pub struct Settings {
    pub host: String,
    pub port: u16,

    pub coingecko_base_url: String,
    pub coingecko_api_key: String,
    pub vs_currency: String,
    pub poll_interval_secs: u64,
}

pub fn load() -> Settings {
    // Loads .env if present (no crash if missing)
    dotenvy::dotenv().ok();

    let host = env::var("HOST")
        .unwrap_or_else(|_| "127.0.0.1".to_string());

    let port = env::var("PORT")
        .ok()
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let coingecko_base_url = env::var("COINGECKO_BASE_URL")
        .unwrap_or_else(|_| "https://api.coingecko.com/api/v3".to_string());

    let coingecko_api_key = env::var("COINGECKO_API_KEY").unwrap_or_default();

    let vs_currency = env::var("VS_CURRENCY")
        .unwrap_or_else(|_| "usd".to_string());

    let poll_interval_secs = env::var("POLL_INTERVAL_SECS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(30);

    Settings {
        host,
        port,
        coingecko_base_url,
        coingecko_api_key,
        vs_currency,
        poll_interval_secs,
    }
}
