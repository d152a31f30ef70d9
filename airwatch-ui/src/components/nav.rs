//! Navigation Component
//!
//! Header bar with the brand, the current location source and page links.

use airwatch::location::Mode;
use leptos::*;
use leptos_router::*;

use crate::state::global::GlobalState;

/// Navigation header component
#[component]
pub fn Nav() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let mode = state.mode;

    view! {
        <nav class="bg-gray-800 border-b border-gray-700">
            <div class="container mx-auto px-4">
                <div class="flex items-center justify-between h-16">
                    // Brand
                    <A href="/" class="flex items-center space-x-3">
                        <span class="text-2xl">"🌫"</span>
                        <span class="text-xl font-bold text-white">"Airwatch"</span>
                    </A>

                    // Where readings come from right now
                    {move || {
                        source_badge(&mode.get()).map(|(icon, text, class)| view! {
                            <span class=format!("hidden md:inline-flex items-center space-x-1 px-3 py-1 rounded-full text-xs {}", class)>
                                <span>{icon}</span>
                                <span>{text}</span>
                            </span>
                        })
                    }}

                    <div class="flex items-center space-x-1">
                        <PageLink href="/" label="Dashboard" />
                        <PageLink href="/settings" label="Settings" />
                    </div>
                </div>
            </div>
        </nav>
    }
}

/// Icon, text and color class for the location badge
fn source_badge(mode: &Mode) -> Option<(&'static str, String, &'static str)> {
    match mode {
        Mode::Unset => None,
        Mode::DeviceLocation(_) => Some(("📍", "Live".to_string(), "bg-green-900 text-green-300")),
        Mode::PlaceSearch(place) => Some(("🔎", place.clone(), "bg-gray-700 text-gray-300")),
    }
}

#[component]
fn PageLink(href: &'static str, label: &'static str) -> impl IntoView {
    view! {
        <A
            href=href
            class="px-4 py-2 rounded-lg text-gray-300 hover:text-white hover:bg-gray-700 transition-colors"
            active_class="bg-gray-700 text-white"
        >
            {label}
        </A>
    }
}
