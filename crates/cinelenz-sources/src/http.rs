use reqwest::Client;
use std::time::Duration;

/// Shared client constructor: every provider call inherits the same
/// per-request timeout so a slow source cannot stall the settle-all join.
pub fn build_client(timeout: Duration) -> Client {
    Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| Client::new())
}
