use std::time::Duration;

use reqwest::Client;

use crate::models::Asset;

#[derive(Clone)]
pub struct CoingeckoClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl CoingeckoClient {
    pub fn new(base_url: String, api_key: String) -> Self {
        let http = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            http,
            base_url,
            api_key,
        }
    }

    fn has_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    /// Fetch the current market listing in the given quote currency.
    /// Upstream order is preserved; transport faults and non-2xx statuses
    /// both come back as a plain error string.
    pub async fn markets(&self, vs_currency: &str) -> Result<Vec<Asset>, String> {
        let url = format!("{}/coins/markets", self.base_url);

        let mut req = self
            .http
            .get(&url)
            .query(&[("vs_currency", vs_currency)])
            .header("accept", "application/json");

        // The demo tier works without a key; send the header only when set.
        if self.has_key() {
            req = req.header("x-cg-demo-api-key", &self.api_key);
        }

        let res = req.send().await.map_err(|e| e.to_string())?;

        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            return Err(format!("CoinGecko markets failed: {status} {body}"));
        }

        res.json::<Vec<Asset>>().await.map_err(|e| e.to_string())
    }
}
