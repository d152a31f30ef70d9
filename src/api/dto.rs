//! Data Transfer Objects
//!
//! Wire shapes of the three backend endpoints, and the decoding step that
//! turns a raw `(status, body)` pair into a normalized domain value. Both
//! HTTP clients (reqwest natively, gloo-net in the browser) funnel through
//! these functions so the success/failure rules live in one place.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::error::{ApiError, ApiResult};

// ============================================
// WIRE TYPES
// ============================================

/// `GET /current` response body
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentResponse {
    #[serde(default)]
    pub success: bool,
    pub city: Option<String>,
    pub country: Option<String>,
    pub location: Option<String>,
    pub display_location: Option<String>,
    pub location_id: Option<String>,
    pub aqi: Option<f64>,
    pub category: Option<String>,
    pub health_advisory: Option<String>,
    pub dominant_pollutant: Option<String>,
    pub color: Option<String>,
    pub pollutants: Option<BTreeMap<String, Option<f64>>>,
    pub sub_indices: Option<BTreeMap<String, Option<f64>>>,
    pub last_updated: Option<String>,
    pub error: Option<String>,
}

/// `GET /search` response body
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub results: Vec<SearchResult>,
    pub error: Option<String>,
}

/// One entry of a search response; older backends send `name` instead of `city`
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResult {
    pub city: Option<String>,
    pub name: Option<String>,
    pub country: Option<String>,
}

/// `GET /history` response body
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Vec<HistoryRow>,
    pub error: Option<String>,
}

/// One hourly average in a history response
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryRow {
    pub timestamp: Option<WireTimestamp>,
    pub pm25_avg: Option<f64>,
}

/// Timestamps arrive either as epoch milliseconds or as text
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum WireTimestamp {
    Millis(i64),
    Fractional(f64),
    Text(String),
}

impl WireTimestamp {
    /// Interpret the timestamp as a UTC instant, if it is parseable at all.
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            WireTimestamp::Millis(ms) => DateTime::from_timestamp_millis(*ms),
            WireTimestamp::Fractional(ms) => DateTime::from_timestamp_millis(*ms as i64),
            WireTimestamp::Text(s) => parse_text_timestamp(s.trim()),
        }
    }
}

fn parse_text_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }
    s.parse::<i64>().ok().and_then(DateTime::from_timestamp_millis)
}

/// Minimal body used to pull an `error` message out of a failed response
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Common envelope fields of every endpoint
trait Envelope {
    fn success(&self) -> bool;
    fn take_error(&mut self) -> Option<String>;
}

impl Envelope for CurrentResponse {
    fn success(&self) -> bool {
        self.success
    }
    fn take_error(&mut self) -> Option<String> {
        self.error.take()
    }
}

impl Envelope for SearchResponse {
    fn success(&self) -> bool {
        self.success
    }
    fn take_error(&mut self) -> Option<String> {
        self.error.take()
    }
}

impl Envelope for HistoryResponse {
    fn success(&self) -> bool {
        self.success
    }
    fn take_error(&mut self) -> Option<String> {
        self.error.take()
    }
}

// ============================================
// DOMAIN TYPES
// ============================================

/// Normalized current reading for one location
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reading {
    pub city: Option<String>,
    pub country: Option<String>,
    pub location: Option<String>,
    pub display_location: Option<String>,
    pub location_id: Option<String>,
    pub aqi: Option<f64>,
    pub category: Option<String>,
    pub health_advisory: Option<String>,
    pub dominant_pollutant: Option<String>,
    pub color: Option<String>,
    /// Pollutant code to raw concentration
    pub pollutants: BTreeMap<String, Option<f64>>,
    /// Pollutant code to per-pollutant sub-index
    pub sub_indices: BTreeMap<String, Option<f64>>,
    pub last_updated: Option<String>,
}

impl Reading {
    /// Identifier to key the history request on.
    ///
    /// `location_id` first, then the display fields the backend also
    /// accepts. Placeholder tokens such as `"null"` do not count, but a
    /// usable identifier is sent exactly as the server gave it since the
    /// backend keys history on the raw string.
    pub fn history_key(&self) -> Option<String> {
        [
            &self.location_id,
            &self.display_location,
            &self.location,
            &self.city,
        ]
        .into_iter()
        .flatten()
        .find(|s| !crate::view::sanitize_location(s).is_empty())
        .cloned()
    }

    /// Server-resolved city name, if it carries any content
    pub fn resolved_city(&self) -> Option<String> {
        self.city
            .as_deref()
            .map(crate::view::sanitize_location)
            .filter(|c| !c.is_empty())
    }
}

impl From<CurrentResponse> for Reading {
    fn from(r: CurrentResponse) -> Self {
        Self {
            city: r.city,
            country: r.country,
            location: r.location,
            display_location: r.display_location,
            location_id: r.location_id,
            aqi: r.aqi,
            category: r.category,
            health_advisory: r.health_advisory,
            dominant_pollutant: r.dominant_pollutant,
            color: r.color,
            pollutants: r.pollutants.unwrap_or_default(),
            sub_indices: r.sub_indices.unwrap_or_default(),
            last_updated: r.last_updated,
        }
    }
}

/// A place the search endpoint matched
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaceMatch {
    /// `city` or, failing that, `name` as sent by the server
    pub name: String,
    pub country: Option<String>,
}

/// One point of the PM2.5 history series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryPoint {
    /// `None` when the server sent a timestamp we cannot read
    pub at: Option<DateTime<Utc>>,
    /// Missing averages plot as zero
    pub pm25_avg: f64,
}

// ============================================
// DECODING
// ============================================

fn is_success_status(status: u16) -> bool {
    (200..300).contains(&status)
}

fn decode_envelope<T: DeserializeOwned + Envelope>(status: u16, body: &str) -> ApiResult<T> {
    if !is_success_status(status) {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.error);
        return Err(ApiError::Status { status, message });
    }

    let mut parsed: T =
        serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))?;

    if !parsed.success() {
        return Err(ApiError::Rejected(parsed.take_error()));
    }

    Ok(parsed)
}

/// Decode a `/current` response
pub fn decode_current(status: u16, body: &str) -> ApiResult<Reading> {
    decode_envelope::<CurrentResponse>(status, body).map(Reading::from)
}

/// Decode a `/search` response
pub fn decode_search(status: u16, body: &str) -> ApiResult<Vec<PlaceMatch>> {
    let response = decode_envelope::<SearchResponse>(status, body)?;

    Ok(response
        .results
        .into_iter()
        .filter_map(|r| {
            let name = r.city.or(r.name)?;
            Some(PlaceMatch {
                name,
                country: r.country,
            })
        })
        .collect())
}

/// Decode a `/history` response
pub fn decode_history(status: u16, body: &str) -> ApiResult<Vec<HistoryPoint>> {
    let response = decode_envelope::<HistoryResponse>(status, body)?;

    Ok(response
        .data
        .into_iter()
        .map(|row| HistoryPoint {
            at: row.timestamp.as_ref().and_then(WireTimestamp::to_datetime),
            pm25_avg: row.pm25_avg.unwrap_or(0.0),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELHI: &str = r##"{
        "success": true,
        "city": "Delhi",
        "country": "IN",
        "location": "Delhi, null",
        "display_location": "Delhi, null",
        "location_id": "Delhi",
        "aqi": 162,
        "category": "Moderate",
        "color": "#FFFF00",
        "health_advisory": "Breathing discomfort to people with lung disease",
        "dominant_pollutant": "PM2.5",
        "pollutants": {"PM2.5": 72.0, "CO": 0.6, "NO2": null},
        "sub_indices": {"PM2.5": 162, "CO": 30},
        "last_updated": "14:05:09"
    }"##;

    #[test]
    fn test_decode_current() {
        let reading = decode_current(200, DELHI).unwrap();
        assert_eq!(reading.city.as_deref(), Some("Delhi"));
        assert_eq!(reading.aqi, Some(162.0));
        assert_eq!(reading.pollutants.get("CO"), Some(&Some(0.6)));
        assert_eq!(reading.pollutants.get("NO2"), Some(&None));
        assert_eq!(reading.sub_indices.get("PM2.5"), Some(&Some(162.0)));
        assert_eq!(reading.history_key().as_deref(), Some("Delhi"));
    }

    #[test]
    fn test_decode_current_rejected() {
        let body = r#"{"success": false, "error": "No AQI data available"}"#;
        let err = decode_current(200, body).unwrap_err();
        assert_eq!(err, ApiError::Rejected(Some("No AQI data available".to_string())));
    }

    #[test]
    fn test_decode_current_http_error_keeps_server_message() {
        let body = r#"{"success": false, "error": "No AQI data available"}"#;
        let err = decode_current(404, body).unwrap_err();
        assert_eq!(
            err,
            ApiError::Status {
                status: 404,
                message: Some("No AQI data available".to_string())
            }
        );

        let err = decode_current(502, "<html>Bad Gateway</html>").unwrap_err();
        assert_eq!(err, ApiError::Status { status: 502, message: None });
    }

    #[test]
    fn test_decode_current_garbage() {
        let err = decode_current(200, "not json").unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn test_history_key_fallbacks() {
        let mut reading = decode_current(200, DELHI).unwrap();
        reading.location_id = Some("null".to_string());
        assert_eq!(reading.history_key().as_deref(), Some("Delhi, null"));

        reading.location_id = Some("Bandra,Mumbai".to_string());
        assert_eq!(reading.history_key().as_deref(), Some("Bandra,Mumbai"));

        reading.location_id = None;
        reading.display_location = None;
        reading.location = None;
        reading.city = None;
        assert_eq!(reading.history_key(), None);
    }

    #[test]
    fn test_decode_search_uses_name_fallback() {
        let body = r#"{"success": true, "results": [
            {"city": "Delhi", "country": "IN"},
            {"name": "Dehradun", "country": "IN"},
            {"country": "XX"}
        ]}"#;
        let places = decode_search(200, body).unwrap();
        assert_eq!(places.len(), 2);
        assert_eq!(places[0].name, "Delhi");
        assert_eq!(places[1].name, "Dehradun");
    }

    #[test]
    fn test_decode_history_mixed_timestamps() {
        let body = r#"{"success": true, "data": [
            {"timestamp": 1700000000000, "pm25_avg": 55},
            {"timestamp": "2024-01-01T10:00:00Z", "pm25_avg": null},
            {"timestamp": "garbage", "pm25_avg": 12.5}
        ]}"#;
        let points = decode_history(200, body).unwrap();
        assert_eq!(points.len(), 3);
        assert_eq!(points[0].at, DateTime::from_timestamp_millis(1_700_000_000_000));
        assert_eq!(points[0].pm25_avg, 55.0);
        assert_eq!(points[1].pm25_avg, 0.0);
        assert!(points[1].at.is_some());
        assert_eq!(points[2].at, None);
    }

    #[test]
    fn test_decode_history_empty_is_ok() {
        let points = decode_history(200, r#"{"success": true, "data": []}"#).unwrap();
        assert!(points.is_empty());
    }
}
