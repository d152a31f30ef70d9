//! Dashboard Page
//!
//! Search, current reading, pollutant tiles and the PM2.5 trend.

use airwatch::dashboard::FetchRequest;
use airwatch::location::Mode;
use airwatch::refresh::REFRESH_INTERVAL;
use leptos::*;

use crate::components::{AqiCard, LoadingOverlay, PollutantGrid, SearchBar, TrendChart};
use crate::state::global::GlobalState;

/// Dashboard page component
#[component]
pub fn Dashboard() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    // Resolve the device position once on first mount; revisits keep the
    // current mode
    let state_for_mount = state.clone();
    create_effect(move |ran: Option<()>| {
        if ran.is_none() && state_for_mount.mode.get_untracked() == Mode::Unset {
            state_for_mount.locate();
        }
    });

    let state_for_refresh = state.clone();
    let on_refresh = move |_| state_for_refresh.load(FetchRequest::Current);

    let mode = state.mode;
    let loading = state.loading;

    view! {
        <div class="space-y-8">
            <div class="flex items-center justify-between">
                <div>
                    <h1 class="text-3xl font-bold">"Air Quality"</h1>
                    <p class="text-gray-400 mt-1">{move || mode_caption(&mode.get())}</p>
                </div>

                <button
                    on:click=on_refresh
                    disabled=move || loading.get()
                    class="px-4 py-2 bg-gray-700 hover:bg-gray-600 disabled:opacity-50
                           rounded-lg text-sm font-medium transition-colors"
                >
                    "↻ Refresh"
                </button>
            </div>

            <SearchBar />

            <LoadingOverlay loading=loading>
                <div class="space-y-8">
                    <AqiCard />
                    <PollutantGrid />

                    <section class="bg-gray-800 rounded-xl p-6">
                        <h2 class="text-xl font-semibold mb-4">"Last 24 hours"</h2>
                        <TrendChart />
                    </section>
                </div>
            </LoadingOverlay>
        </div>
    }
}

/// Subtitle describing what drives the dashboard
fn mode_caption(mode: &Mode) -> String {
    match mode {
        Mode::Unset => "Waiting for a location".to_string(),
        Mode::DeviceLocation(c) => format!(
            "Your location ({}), refreshing every {}s",
            c,
            REFRESH_INTERVAL.as_secs()
        ),
        Mode::PlaceSearch(place) => format!("Showing {}", place),
    }
}
