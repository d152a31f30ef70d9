//! Air-Quality Backend API
//!
//! Client side of the three read endpoints the dashboard consumes:
//!
//! - `GET /current`: reading for coordinates or a city name
//! - `GET /search`: place-name suggestions
//! - `GET /history`: hourly PM2.5 averages for a location
//!
//! [`AirQualityApi`] is the seam the controller talks to. The native build
//! provides [`HttpApi`] on top of reqwest; the browser app supplies its own
//! implementation over gloo-net. Both decode through [`dto`].

pub mod dto;
pub mod endpoints;
pub mod error;

#[cfg(feature = "native")]
mod client;

#[cfg(feature = "native")]
pub use client::{HttpApi, HttpApiConfig};

pub use dto::{decode_current, decode_history, decode_search, HistoryPoint, PlaceMatch, Reading};
pub use endpoints::{current_url, history_url, normalize_base, search_url, LocationQuery};
pub use error::{ApiError, ApiResult, GENERIC_FETCH_MESSAGE, NETWORK_MESSAGE};

use async_trait::async_trait;

/// Read access to the air-quality backend.
///
/// Futures are not required to be `Send`: the dashboard runs on a single
/// thread, and in the browser the underlying fetch futures are `!Send`.
#[async_trait(?Send)]
pub trait AirQualityApi {
    /// Fetch the current reading for a location
    async fn current(&self, query: &LocationQuery) -> ApiResult<Reading>;

    /// Look up places matching a partial name
    async fn search(&self, q: &str) -> ApiResult<Vec<PlaceMatch>>;

    /// Fetch the PM2.5 history series for a resolved location
    async fn history(&self, location_id: &str) -> ApiResult<Vec<HistoryPoint>>;
}

#[async_trait(?Send)]
impl<T: AirQualityApi + ?Sized> AirQualityApi for std::rc::Rc<T> {
    async fn current(&self, query: &LocationQuery) -> ApiResult<Reading> {
        (**self).current(query).await
    }

    async fn search(&self, q: &str) -> ApiResult<Vec<PlaceMatch>> {
        (**self).search(q).await
    }

    async fn history(&self, location_id: &str) -> ApiResult<Vec<HistoryPoint>> {
        (**self).history(location_id).await
    }
}
