//! UI Components
//!
//! Reusable Leptos components for the dashboard.

pub mod aqi_card;
pub mod chart;
pub mod loading;
pub mod nav;
pub mod pollutant_card;
pub mod search_bar;
pub mod toast;

pub use aqi_card::AqiCard;
pub use chart::TrendChart;
pub use loading::LoadingOverlay;
pub use nav::Nav;
pub use pollutant_card::PollutantGrid;
pub use search_bar::SearchBar;
pub use toast::Toast;
