//! View Renderer
//!
//! Turns a [`Reading`] into a typed view-model with named fields. Front ends
//! (terminal table, Leptos components) bind to these fields directly instead
//! of writing into elements looked up by id.

mod sanitize;
mod severity;
mod trend;

pub use sanitize::{format_number, format_optional, location_label, sanitize_location, PLACEHOLDER};
pub use severity::Severity;
pub use trend::{TrendSeries, TREND_LABEL};

use serde::Serialize;
use std::collections::BTreeMap;

use crate::api::Reading;

/// Display order for the pollutants we know about
pub const PREFERRED_ORDER: [&str; 6] = ["CO", "NO2", "O3", "PM10", "PM2.5", "SO2"];

/// Concentration unit printed under each card
pub const CONCENTRATION_UNIT: &str = "µg/m³";

/// Everything the dashboard shows for one reading
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadingView {
    pub location: String,
    pub aqi: String,
    pub category: String,
    pub advisory: String,
    pub dominant_pollutant: String,
    /// Accent color sent by the server for the overall index
    pub color: Option<String>,
    pub last_updated: Option<String>,
    pub pollutants: Vec<PollutantCard>,
}

/// One pollutant tile
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PollutantCard {
    pub code: String,
    pub value: Option<f64>,
    pub sub_index: Option<f64>,
    /// `None` when the server sent no sub-index for this pollutant
    pub severity: Option<Severity>,
}

impl PollutantCard {
    pub fn value_text(&self) -> String {
        format_optional(self.value)
    }

    pub fn sub_index_text(&self) -> String {
        format_optional(self.sub_index)
    }

    /// Accent color, neutral grey when the severity is unknown
    pub fn hex(&self) -> &'static str {
        self.severity.map(|s| s.hex()).unwrap_or("#9CA3AF")
    }
}

impl ReadingView {
    /// Render a reading
    pub fn render(reading: &Reading) -> Self {
        let pollutants = order_pollutants(&reading.pollutants)
            .into_iter()
            .map(|code| {
                let sub_index = reading.sub_indices.get(code).copied().flatten();
                PollutantCard {
                    code: code.to_string(),
                    value: reading.pollutants.get(code).copied().flatten(),
                    sub_index,
                    severity: sub_index.map(Severity::from_sub_index),
                }
            })
            .collect();

        Self {
            location: location_label(
                reading.display_location.as_deref(),
                reading.city.as_deref(),
                reading.country.as_deref(),
            ),
            aqi: format_optional(reading.aqi),
            category: text_or_placeholder(reading.category.as_deref()),
            advisory: reading.health_advisory.clone().unwrap_or_default(),
            dominant_pollutant: text_or_placeholder(reading.dominant_pollutant.as_deref()),
            color: reading.color.clone().filter(|c| !c.trim().is_empty()),
            last_updated: reading.last_updated.clone(),
            pollutants,
        }
    }
}

fn text_or_placeholder(s: Option<&str>) -> String {
    match s {
        Some(s) if !s.trim().is_empty() => s.to_string(),
        _ => PLACEHOLDER.to_string(),
    }
}

/// Preferred codes that are present, then the rest in code order
pub fn order_pollutants<V>(pollutants: &BTreeMap<String, V>) -> Vec<&str> {
    let mut ordered: Vec<&str> = PREFERRED_ORDER
        .iter()
        .copied()
        .filter(|code| pollutants.contains_key(*code))
        .collect();

    ordered.extend(
        pollutants
            .keys()
            .map(String::as_str)
            .filter(|code| !PREFERRED_ORDER.contains(code)),
    );

    ordered
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading() -> Reading {
        let mut pollutants = BTreeMap::new();
        pollutants.insert("SO2".to_string(), Some(4.0));
        pollutants.insert("CO".to_string(), Some(1.0));
        pollutants.insert("PM10".to_string(), Some(50.0));

        let mut sub_indices = BTreeMap::new();
        sub_indices.insert("SO2".to_string(), Some(5.0));
        sub_indices.insert("CO".to_string(), Some(50.0));
        sub_indices.insert("PM10".to_string(), Some(301.0));

        Reading {
            city: Some("Delhi".to_string()),
            country: Some("IN".to_string()),
            location: None,
            display_location: Some("Delhi, null".to_string()),
            location_id: Some("Delhi".to_string()),
            aqi: Some(301.0),
            category: Some("Very Poor".to_string()),
            health_advisory: Some("Respiratory illness on prolonged exposure".to_string()),
            dominant_pollutant: Some("PM10".to_string()),
            color: Some("#FF0000".to_string()),
            pollutants,
            sub_indices,
            last_updated: Some("10:00:00".to_string()),
        }
    }

    #[test]
    fn test_preferred_order() {
        let r = reading();
        assert_eq!(order_pollutants(&r.pollutants), vec!["CO", "PM10", "SO2"]);
    }

    #[test]
    fn test_unknown_pollutants_appended() {
        let mut map = BTreeMap::new();
        for code in ["NH3", "PM2.5", "Pb", "NO2"] {
            map.insert(code.to_string(), 1.0);
        }
        assert_eq!(order_pollutants(&map), vec!["NO2", "PM2.5", "NH3", "Pb"]);
    }

    #[test]
    fn test_render_fields() {
        let view = ReadingView::render(&reading());
        assert_eq!(view.location, "Delhi");
        assert_eq!(view.aqi, "301");
        assert_eq!(view.category, "Very Poor");
        assert_eq!(view.dominant_pollutant, "PM10");
        assert_eq!(view.color.as_deref(), Some("#FF0000"));

        let codes: Vec<_> = view.pollutants.iter().map(|c| c.code.as_str()).collect();
        assert_eq!(codes, vec!["CO", "PM10", "SO2"]);
        assert_eq!(view.pollutants[0].severity, Some(Severity::Good));
        assert_eq!(view.pollutants[1].severity, Some(Severity::Severe));
        assert_eq!(view.pollutants[1].value_text(), "50");
    }

    #[test]
    fn test_render_missing_fields() {
        let mut r = reading();
        r.aqi = None;
        r.category = None;
        r.dominant_pollutant = Some(" ".to_string());
        r.health_advisory = None;
        r.sub_indices.clear();

        let view = ReadingView::render(&r);
        assert_eq!(view.aqi, "--");
        assert_eq!(view.category, "--");
        assert_eq!(view.dominant_pollutant, "--");
        assert_eq!(view.advisory, "");
        assert!(view.pollutants.iter().all(|c| c.severity.is_none()));
        assert_eq!(view.pollutants[0].sub_index_text(), "--");
        assert_eq!(view.pollutants[0].hex(), "#9CA3AF");
    }
}
