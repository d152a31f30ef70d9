//! Native HTTP client for the air-quality backend.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use super::dto::{decode_current, decode_history, decode_search, HistoryPoint, PlaceMatch, Reading};
use super::endpoints::{current_url, history_url, normalize_base, search_url, LocationQuery};
use super::error::{ApiError, ApiResult};
use super::AirQualityApi;

/// Configuration for [`HttpApi`]
#[derive(Debug, Clone)]
pub struct HttpApiConfig {
    /// Base URL including the `/api` prefix (e.g. "http://localhost:5000/api")
    pub base_url: String,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for HttpApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000/api".to_string(),
            request_timeout_ms: 10_000,
        }
    }
}

/// reqwest-backed [`AirQualityApi`]
pub struct HttpApi {
    client: Client,
    base_url: String,
}

impl HttpApi {
    /// Create a new client with the given configuration
    pub fn new(config: HttpApiConfig) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: normalize_base(&config.base_url),
        })
    }

    /// Base URL requests are issued against
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET a URL and hand back status and body for decoding
    async fn get(&self, url: &str) -> ApiResult<(u16, String)> {
        tracing::debug!(url = %url, "GET");

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                ApiError::Transport(format!("request timed out: {}", e))
            } else {
                ApiError::Transport(e.to_string())
            }
        })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok((status, body))
    }
}

#[async_trait(?Send)]
impl AirQualityApi for HttpApi {
    async fn current(&self, query: &LocationQuery) -> ApiResult<Reading> {
        let (status, body) = self.get(&current_url(&self.base_url, query)).await?;
        decode_current(status, &body)
    }

    async fn search(&self, q: &str) -> ApiResult<Vec<PlaceMatch>> {
        let (status, body) = self.get(&search_url(&self.base_url, q)).await?;
        decode_search(status, &body)
    }

    async fn history(&self, location_id: &str) -> ApiResult<Vec<HistoryPoint>> {
        let (status, body) = self.get(&history_url(&self.base_url, location_id)).await?;
        decode_history(status, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HttpApiConfig::default();
        assert_eq!(config.base_url, "http://localhost:5000/api");
        assert_eq!(config.request_timeout_ms, 10_000);
    }

    #[test]
    fn test_base_url_normalized() {
        let api = HttpApi::new(HttpApiConfig {
            base_url: "http://example.test/api/".to_string(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(api.base_url(), "http://example.test/api");
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_transport_error() {
        // Port 9 (discard) on loopback is not expected to be listening
        let api = HttpApi::new(HttpApiConfig {
            base_url: "http://127.0.0.1:9/api".to_string(),
            request_timeout_ms: 2_000,
        })
        .unwrap();

        let err = api.search("de").await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }
}
