//! Browser Seams
//!
//! [`GlooApi`] implements the core's `AirQualityApi` over gloo-net and
//! [`BrowserGeolocator`] its `Geolocator` over `navigator.geolocation`.

mod client;
mod geolocation;

pub use client::{
    check_health, default_api_base, get_api_base, reset_api_base, set_api_base, GlooApi,
};
pub use geolocation::BrowserGeolocator;
