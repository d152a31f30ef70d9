//! Settings Page
//!
//! Backend connection and reference information.

use airwatch::view::Severity;
use leptos::*;

use crate::api;
use crate::state::global::GlobalState;

/// Settings page component
#[component]
pub fn Settings() -> impl IntoView {
    view! {
        <div class="space-y-8">
            <div>
                <h1 class="text-3xl font-bold">"Settings"</h1>
                <p class="text-gray-400 mt-1">"Configure your Airwatch dashboard"</p>
            </div>

            <ApiSettings />

            <SeverityLegend />

            <AboutSection />
        </div>
    }
}

/// API connection settings
#[component]
fn ApiSettings() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let (api_url, set_api_url) = create_signal(api::get_api_base());
    let (testing, set_testing) = create_signal(false);
    let (test_result, set_test_result) = create_signal(None::<bool>);

    let state_for_test = state.clone();
    let test_connection = move |_| {
        set_testing.set(true);
        set_test_result.set(None);

        api::set_api_base(&api_url.get());

        let state_clone = state_for_test.clone();
        spawn_local(async move {
            match api::check_health().await {
                Ok(()) => {
                    set_test_result.set(Some(true));
                    state_clone.show_success("Connection successful!");
                }
                Err(e) => {
                    set_test_result.set(Some(false));
                    state_clone.show_error(&format!("Connection failed: {}", e));
                }
            }
            set_testing.set(false);
        });
    };

    let state_for_apply = state.clone();
    let apply_url = move |_| {
        api::set_api_base(&api_url.get());
        set_api_url.set(api::get_api_base());
        state_for_apply.show_success("API URL applied for this session");
    };

    let state_for_reset = state;
    let reset_url = move |_| {
        api::reset_api_base();
        set_api_url.set(api::get_api_base());
        state_for_reset.show_success("API URL reset");
    };

    view! {
        <section class="bg-gray-800 rounded-xl p-6">
            <h2 class="text-xl font-semibold mb-4">"API Connection"</h2>

            <div class="space-y-4">
                <div>
                    <label class="block text-sm text-gray-400 mb-2">"Air-quality API URL"</label>
                    <p class="text-xs text-gray-500 mb-2">
                        "Applies until the page is reloaded."
                    </p>
                    <div class="flex space-x-2">
                        <input
                            type="text"
                            prop:value=move || api_url.get()
                            on:input=move |ev| set_api_url.set(event_target_value(&ev))
                            class="flex-1 bg-gray-700 rounded-lg px-4 py-3
                                   border border-gray-600 focus:border-primary-500 focus:outline-none"
                        />
                        <button
                            on:click=test_connection
                            disabled=move || testing.get()
                            class="px-4 py-3 bg-gray-600 hover:bg-gray-500 disabled:bg-gray-700
                                   rounded-lg font-medium transition-colors"
                        >
                            {move || if testing.get() { "Testing..." } else { "Test" }}
                        </button>
                        <button
                            on:click=apply_url
                            class="px-4 py-3 bg-primary-600 hover:bg-primary-700
                                   rounded-lg font-medium transition-colors"
                        >
                            "Apply"
                        </button>
                        <button
                            on:click=reset_url
                            class="px-4 py-3 bg-gray-700 hover:bg-gray-600
                                   rounded-lg font-medium transition-colors"
                        >
                            "Reset"
                        </button>
                    </div>
                </div>

                <div class="flex items-center space-x-2">
                    <span class="text-sm text-gray-400">"Status:"</span>
                    {move || {
                        match test_result.get() {
                            Some(true) => view! {
                                <span class="text-green-400">"✓ Connected"</span>
                            }.into_view(),
                            Some(false) => view! {
                                <span class="text-red-400">"✕ Failed"</span>
                            }.into_view(),
                            None => view! {
                                <span class="text-gray-400">"Not tested"</span>
                            }.into_view(),
                        }
                    }}
                </div>
            </div>
        </section>
    }
}

/// Sub-index bands and their colors
#[component]
fn SeverityLegend() -> impl IntoView {
    let bands = [
        (Severity::Good, "0 - 50"),
        (Severity::Satisfactory, "51 - 100"),
        (Severity::Moderate, "101 - 200"),
        (Severity::Poor, "201 - 300"),
        (Severity::Severe, "300+"),
    ];

    view! {
        <section class="bg-gray-800 rounded-xl p-6">
            <h2 class="text-xl font-semibold mb-4">"Pollutant Levels"</h2>
            <div class="grid grid-cols-2 md:grid-cols-5 gap-4 text-sm">
                {bands.into_iter().map(|(severity, range)| view! {
                    <div class="flex items-center space-x-2">
                        <div
                            class="w-3 h-3 rounded-full"
                            style=format!("background-color: {}", severity.hex())
                        />
                        <span class="text-gray-300">{severity.label()}</span>
                        <span class="text-gray-500">{range}</span>
                    </div>
                }).collect_view()}
            </div>
        </section>
    }
}

#[component]
fn AboutSection() -> impl IntoView {
    view! {
        <section class="bg-gray-800 rounded-xl p-6">
            <h2 class="text-xl font-semibold mb-4">"About Airwatch"</h2>

            <div class="space-y-4 text-gray-300">
                <p>
                    "Airwatch shows live air quality for where you are or any place you search, "
                    "with per-pollutant sub-indices and the last day of PM2.5."
                </p>

                <p class="text-sm text-gray-400">
                    {format!("Version {} • Made with 🧡 using Rust", env!("CARGO_PKG_VERSION"))}
                </p>
            </div>
        </section>
    }
}
