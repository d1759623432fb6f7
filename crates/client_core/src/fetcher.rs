use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use shared::protocol::{validate_snapshot, CoinRecord, CoinsResponse};
use tracing::{debug, info, warn};

use crate::{cancel::CancelToken, config::Settings, error::FetchError};

const QUERY_SKIP: u32 = 0;
const QUERY_LIMIT: u32 = 100;
const QUERY_CURRENCY: &str = "USD";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

#[async_trait]
pub trait CoinSource: Send + Sync {
    /// One request, no retries. Records come back in upstream order.
    async fn fetch_coins(&self) -> Result<Vec<CoinRecord>, FetchError>;
}

#[async_trait]
pub trait IconSource: Send + Sync {
    /// Raw image bytes behind a coin's logo URL.
    async fn fetch_icon(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

pub struct HttpCoinSource {
    http: Client,
    endpoint: String,
}

impl HttpCoinSource {
    pub fn new(endpoint: impl Into<String>) -> Self {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|err| {
                warn!("coins: falling back to default http client: {err}");
                Client::new()
            });
        Self {
            http,
            endpoint: endpoint.into(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.endpoint.clone())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl CoinSource for HttpCoinSource {
    async fn fetch_coins(&self) -> Result<Vec<CoinRecord>, FetchError> {
        let url = self.endpoint.clone();
        let response = self
            .http
            .get(&url)
            .query(&[
                ("skip", QUERY_SKIP.to_string()),
                ("limit", QUERY_LIMIT.to_string()),
                ("currency", QUERY_CURRENCY.to_string()),
            ])
            .send()
            .await
            .map_err(|source| FetchError::Network {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { url, status });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| FetchError::Network {
                url: url.clone(),
                source,
            })?;
        let payload: CoinsResponse = serde_json::from_slice(&body)?;
        validate_snapshot(&payload.coins)?;

        info!(count = payload.coins.len(), url = %url, "coins: snapshot fetched");
        Ok(payload.coins)
    }
}

#[async_trait]
impl IconSource for HttpCoinSource {
    async fn fetch_icon(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Network {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| FetchError::Network {
                url: url.to_string(),
                source,
            })?;
        debug!(bytes = body.len(), url, "coins: icon fetched");
        Ok(body.to_vec())
    }
}

/// Runs the single fetch and drops its outcome if `token` was cancelled
/// while the request was in flight.
pub async fn fetch_unless_cancelled(
    source: &dyn CoinSource,
    token: &CancelToken,
) -> Option<Result<Vec<CoinRecord>, FetchError>> {
    if token.is_cancelled() {
        return None;
    }
    let result = source.fetch_coins().await;
    if token.is_cancelled() {
        warn!(
            succeeded = result.is_ok(),
            "coins: fetch resolved after cancellation; discarding"
        );
        return None;
    }
    Some(result)
}

#[cfg(test)]
#[path = "tests/fetcher_tests.rs"]
mod tests;
