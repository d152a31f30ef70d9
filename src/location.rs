//! Location Resolver
//!
//! Coordinates, the dashboard's location mode, and the [`Geolocator`] seam
//! used to ask the device where it is.

use async_trait::async_trait;
use serde::Serialize;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

use crate::api::LocationQuery;

/// How long to wait for a device fix before prompting for a search
pub const DEFAULT_LOCATE_TIMEOUT: Duration = Duration::from_millis(8000);

/// Prompt shown when no device location is available
pub const SEARCH_PROMPT: &str = "Location off. Search for your city";

/// A latitude/longitude pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Both components finite and within their geographic ranges
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.lat, self.lng)
    }
}

/// Which input currently drives the dashboard.
///
/// Exactly one variant holds at a time, so a held coordinate and a held
/// place name can never coexist.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    #[default]
    Unset,
    DeviceLocation(Coordinate),
    PlaceSearch(String),
}

impl Mode {
    /// Query the current-reading endpoint should be called with
    pub fn query(&self) -> Option<LocationQuery> {
        match self {
            Mode::Unset => None,
            Mode::DeviceLocation(c) => Some(LocationQuery::Coordinates {
                lat: c.lat,
                lng: c.lng,
            }),
            Mode::PlaceSearch(name) => Some(LocationQuery::City { name: name.clone() }),
        }
    }

    pub fn coordinate(&self) -> Option<Coordinate> {
        match self {
            Mode::DeviceLocation(c) => Some(*c),
            _ => None,
        }
    }

    pub fn place(&self) -> Option<&str> {
        match self {
            Mode::PlaceSearch(name) => Some(name),
            _ => None,
        }
    }

    /// Periodic refresh only runs while following the device
    pub fn auto_refresh(&self) -> bool {
        matches!(self, Mode::DeviceLocation(_))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Mode::Unset => "unset",
            Mode::DeviceLocation(_) => "device_location",
            Mode::PlaceSearch(_) => "place_search",
        }
    }
}

/// Why the device could not be located
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocateError {
    /// No geolocation capability on this platform
    #[error("Geolocation is not supported")]
    Unsupported,

    /// The user refused permission
    #[error("Location permission denied")]
    Denied,

    /// A fix could not be obtained
    #[error("Position unavailable")]
    Unavailable,

    /// No fix within the allowed wait
    #[error("Timed out waiting for a position")]
    Timeout,
}

impl LocateError {
    /// Map a W3C `GeolocationPositionError.code`
    pub fn from_code(code: u16) -> Self {
        match code {
            1 => LocateError::Denied,
            3 => LocateError::Timeout,
            _ => LocateError::Unavailable,
        }
    }
}

/// Source of the device's position.
///
/// Implementations bound their own wait; callers do not retry.
#[async_trait(?Send)]
pub trait Geolocator {
    async fn locate(&self) -> Result<Coordinate, LocateError>;
}

/// A position supplied up front (command line or config file)
#[derive(Debug, Clone, Copy)]
pub struct FixedGeolocator {
    position: Option<Coordinate>,
}

impl FixedGeolocator {
    pub fn new(position: Option<Coordinate>) -> Self {
        Self { position }
    }

    /// A platform without any position source
    pub fn unsupported() -> Self {
        Self { position: None }
    }
}

#[async_trait(?Send)]
impl Geolocator for FixedGeolocator {
    async fn locate(&self) -> Result<Coordinate, LocateError> {
        match self.position {
            Some(c) if c.is_valid() => Ok(c),
            Some(_) => Err(LocateError::Unavailable),
            None => Err(LocateError::Unsupported),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_queries() {
        assert_eq!(Mode::Unset.query(), None);
        assert_eq!(
            Mode::DeviceLocation(Coordinate::new(1.5, 2.5)).query(),
            Some(LocationQuery::Coordinates { lat: 1.5, lng: 2.5 })
        );
        assert_eq!(
            Mode::PlaceSearch("Delhi".to_string()).query(),
            Some(LocationQuery::City { name: "Delhi".to_string() })
        );
    }

    #[test]
    fn test_auto_refresh_only_in_device_mode() {
        assert!(!Mode::Unset.auto_refresh());
        assert!(Mode::DeviceLocation(Coordinate::new(0.0, 0.0)).auto_refresh());
        assert!(!Mode::PlaceSearch("Delhi".to_string()).auto_refresh());
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(LocateError::from_code(1), LocateError::Denied);
        assert_eq!(LocateError::from_code(2), LocateError::Unavailable);
        assert_eq!(LocateError::from_code(3), LocateError::Timeout);
    }

    #[test]
    fn test_coordinate_validity() {
        assert!(Coordinate::new(12.97, 77.59).is_valid());
        assert!(!Coordinate::new(91.0, 0.0).is_valid());
        assert!(!Coordinate::new(0.0, f64::NAN).is_valid());
    }

    #[tokio::test]
    async fn test_fixed_geolocator() {
        let geo = FixedGeolocator::new(Some(Coordinate::new(13.93, 75.57)));
        assert_eq!(geo.locate().await, Ok(Coordinate::new(13.93, 75.57)));

        assert_eq!(
            FixedGeolocator::unsupported().locate().await,
            Err(LocateError::Unsupported)
        );
        assert_eq!(
            FixedGeolocator::new(Some(Coordinate::new(100.0, 0.0))).locate().await,
            Err(LocateError::Unavailable)
        );
    }
}
