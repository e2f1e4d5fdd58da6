pub mod coingecko;
pub mod poller;
