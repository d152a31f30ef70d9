//! HTTP API Client
//!
//! gloo-net implementation of the air-quality endpoints.

use airwatch::api::{
    current_url, decode_current, decode_history, decode_search, history_url, normalize_base,
    search_url, AirQualityApi, ApiError, ApiResult, HistoryPoint, LocationQuery, PlaceMatch,
    Reading,
};
use async_trait::async_trait;
use gloo_net::http::Request;
use std::cell::RefCell;

/// Backend port on the page's host
const DEFAULT_API_PORT: u16 = 5000;

thread_local! {
    /// Base entered on the Settings page. Lives only as long as the page.
    static SESSION_API_BASE: RefCell<Option<String>> = RefCell::new(None);
}

/// API base on the page's own host
pub fn default_api_base() -> String {
    let host = web_sys::window()
        .and_then(|w| w.location().hostname().ok())
        .filter(|h| !h.is_empty())
        .unwrap_or_else(|| "localhost".to_string());
    base_for_host(&host)
}

fn base_for_host(host: &str) -> String {
    format!("http://{}:{}/api", host, DEFAULT_API_PORT)
}

/// API base for this page session, else the one derived from the page host
pub fn get_api_base() -> String {
    let chosen = SESSION_API_BASE.with(|base| base.borrow().clone());
    normalize_base(&chosen.unwrap_or_else(default_api_base))
}

/// Point the rest of this session at another backend. Blank input goes
/// back to the host-derived default. Nothing is written to browser storage.
pub fn set_api_base(url: &str) {
    let url = url.trim();
    SESSION_API_BASE.with(|base| {
        *base.borrow_mut() = (!url.is_empty()).then(|| url.to_string());
    });
}

/// Forget the session override
pub fn reset_api_base() {
    SESSION_API_BASE.with(|base| *base.borrow_mut() = None);
}

#[derive(Debug, serde::Deserialize)]
struct HealthResponse {
    status: String,
}

/// Check the backend's health endpoint
pub async fn check_health() -> Result<(), String> {
    let url = format!("{}/health", get_api_base());

    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(format!("HTTP {}", response.status()));
    }

    let health: HealthResponse = response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))?;

    if health.status == "ok" {
        Ok(())
    } else {
        Err(format!("Backend reports status {}", health.status))
    }
}

/// Browser [`AirQualityApi`].
///
/// The base URL is read on every request so a change made on the Settings
/// page applies to the next fetch.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlooApi;

impl GlooApi {
    async fn get(&self, url: &str) -> ApiResult<(u16, String)> {
        let response = Request::get(url)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok((status, body))
    }
}

#[async_trait(?Send)]
impl AirQualityApi for GlooApi {
    async fn current(&self, query: &LocationQuery) -> ApiResult<Reading> {
        let (status, body) = self.get(&current_url(&get_api_base(), query)).await?;
        decode_current(status, &body)
    }

    async fn search(&self, q: &str) -> ApiResult<Vec<PlaceMatch>> {
        let (status, body) = self.get(&search_url(&get_api_base(), q)).await?;
        decode_search(status, &body)
    }

    async fn history(&self, location_id: &str) -> ApiResult<Vec<HistoryPoint>> {
        let (status, body) = self.get(&history_url(&get_api_base(), location_id)).await?;
        decode_history(status, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_for_host() {
        assert_eq!(base_for_host("localhost"), "http://localhost:5000/api");
        assert_eq!(base_for_host("192.168.1.20"), "http://192.168.1.20:5000/api");
    }

    fn session_base() -> Option<String> {
        SESSION_API_BASE.with(|base| base.borrow().clone())
    }

    #[test]
    fn test_session_base_override() {
        set_api_base("  http://10.0.0.5:8080/api/ ");
        assert_eq!(session_base().as_deref(), Some("http://10.0.0.5:8080/api/"));
        assert_eq!(get_api_base(), "http://10.0.0.5:8080/api");

        set_api_base("   ");
        assert_eq!(session_base(), None);

        set_api_base("http://10.0.0.5:8080/api");
        reset_api_base();
        assert_eq!(session_base(), None);
    }
}
