//! Trend chart backing series.

use chrono::{DateTime, Local, TimeZone, Utc};
use serde::Serialize;
use std::fmt;

use crate::api::HistoryPoint;

/// Legend label of the single PM2.5 dataset
pub const TREND_LABEL: &str = "PM2.5 (24h)";

/// Ordered label/value series for the line chart
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TrendSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl TrendSeries {
    /// Build a series labelled in the local time zone
    pub fn from_history(points: &[HistoryPoint]) -> Self {
        Self::from_history_in(points, &Local)
    }

    /// Build a series with hour labels rendered in `tz`
    pub fn from_history_in<Tz: TimeZone>(points: &[HistoryPoint], tz: &Tz) -> Self
    where
        Tz::Offset: fmt::Display,
    {
        let labels = points.iter().map(|p| hour_label(p.at, tz)).collect();
        let values = points.iter().map(|p| p.pm25_avg).collect();
        Self { labels, values }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn clear(&mut self) {
        self.labels.clear();
        self.values.clear();
    }

    /// Smallest and largest value, if any
    pub fn bounds(&self) -> Option<(f64, f64)> {
        if self.values.is_empty() {
            return None;
        }
        let min = self.values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = self.values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Some((min, max))
    }

    /// Iterate `(label, value)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }
}

/// `HH:00` of the instant's hour in `tz`
fn hour_label<Tz: TimeZone>(at: Option<DateTime<Utc>>, tz: &Tz) -> String
where
    Tz::Offset: fmt::Display,
{
    match at {
        Some(at) => format!("{}:00", at.with_timezone(tz).format("%H")),
        None => "--:00".to_string(),
    }
}
