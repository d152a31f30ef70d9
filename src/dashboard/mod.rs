//! Dashboard Controller
//!
//! Owns the location mode and orchestrates fetch sequences:
//!
//! - [`Dashboard`]: synchronous state and ticket bookkeeping
//! - [`Controller`]: drives the state against an [`AirQualityApi`](crate::api::AirQualityApi)
//!
//! A fetch sequence is a current-reading request followed, when the reading
//! names a location, by a history request. Each sequence carries the ticket
//! issued when it started; a completion whose ticket is no longer the latest
//! is dropped without touching the display.

mod controller;
mod state;

pub use controller::{Controller, LoadOutcome};
pub use state::{
    CurrentOutcome, Dashboard, FetchError, FetchRequest, HistoryOutcome, PendingFetch,
    PendingHistory, PendingSearch, SearchOutcome, Ticket,
};
