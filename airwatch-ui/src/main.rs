//! Airwatch Dashboard
//!
//! Live air-quality dashboard built with Leptos (WASM).
//!
//! # Features
//!
//! - Current AQI and per-pollutant sub-indices for the device's position
//! - Place search with autocomplete
//! - 24h PM2.5 trend chart
//! - Automatic refresh while following the device
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. The `airwatch` core owns the dashboard state; this crate
//! supplies the browser seams (gloo-net HTTP, Geolocation API) and binds the
//! core's view-models to components.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
