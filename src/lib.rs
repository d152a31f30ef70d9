//! # Airwatch
//!
//! Air-quality dashboard client. Shows the current AQI, per-pollutant
//! sub-indices and a 24-hour PM2.5 trend for the device's position or a
//! searched place, backed by an HTTP air-quality service.
//!
//! ## Modules
//!
//! - [`api`]: backend endpoints, wire decoding and the [`AirQualityApi`] seam
//! - [`location`]: coordinates, the location [`Mode`] and [`Geolocator`]
//! - [`dashboard`]: fetch sequencing and display state
//! - [`view`]: view-models for readings and the trend chart
//! - [`autocomplete`]: place suggestions
//! - [`refresh`]: periodic refresh schedule
//!
//! The core builds for `wasm32` with default features off; the `native`
//! feature adds the reqwest client, the refresh ticker and file config.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use airwatch::{Controller, FetchRequest, HttpApi, HttpApiConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api = HttpApi::new(HttpApiConfig::default())?;
//!     let controller = Controller::new(api);
//!
//!     let outcome = controller.load(FetchRequest::Place("Delhi".into())).await?;
//!     if let Some(message) = outcome.error_message() {
//!         eprintln!("{}", message);
//!     } else if let Some(view) = controller.state().view() {
//!         println!("{}: AQI {} ({})", view.location, view.aqi, view.category);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod autocomplete;
#[cfg(feature = "native")]
pub mod config;
pub mod dashboard;
pub mod location;
pub mod refresh;
pub mod view;

// Re-export top-level types for convenience
pub use api::{
    AirQualityApi, ApiError, ApiResult, HistoryPoint, LocationQuery, PlaceMatch, Reading,
};

#[cfg(feature = "native")]
pub use api::{HttpApi, HttpApiConfig};

pub use autocomplete::{Suggestion, MIN_QUERY_LEN};

pub use dashboard::{
    Controller, CurrentOutcome, Dashboard, FetchError, FetchRequest, HistoryOutcome, LoadOutcome,
    SearchOutcome,
};

pub use location::{Coordinate, FixedGeolocator, Geolocator, LocateError, Mode};

pub use refresh::REFRESH_INTERVAL;

#[cfg(feature = "native")]
pub use refresh::RefreshTicker;

pub use view::{PollutantCard, ReadingView, Severity, TrendSeries};

#[cfg(feature = "native")]
pub use config::{Config, ConfigError, LoggingConfig};
