//! Endpoint URL construction shared by every client.

use std::fmt;

use serde::Serialize;

/// What the current-reading endpoint is asked about
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LocationQuery {
    Coordinates { lat: f64, lng: f64 },
    City { name: String },
}

impl fmt::Display for LocationQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationQuery::Coordinates { lat, lng } => write!(f, "{:.4},{:.4}", lat, lng),
            LocationQuery::City { name } => f.write_str(name),
        }
    }
}

/// Strip trailing slashes so joins never produce `//`
pub fn normalize_base(base: &str) -> String {
    base.trim().trim_end_matches('/').to_string()
}

/// `GET {base}/current?lat=&lng=` or `?city=`
pub fn current_url(base: &str, query: &LocationQuery) -> String {
    let base = normalize_base(base);
    match query {
        LocationQuery::Coordinates { lat, lng } => {
            format!("{}/current?lat={}&lng={}", base, lat, lng)
        }
        LocationQuery::City { name } => {
            format!("{}/current?city={}", base, urlencoding::encode(name))
        }
    }
}

/// `GET {base}/search?q=`
pub fn search_url(base: &str, q: &str) -> String {
    format!("{}/search?q={}", normalize_base(base), urlencoding::encode(q))
}

/// `GET {base}/history?location_id=`
pub fn history_url(base: &str, location_id: &str) -> String {
    format!(
        "{}/history?location_id={}",
        normalize_base(base),
        urlencoding::encode(location_id)
    )
}
