//! Pollutant Card Component
//!
//! One tile per pollutant, accented by its sub-index severity.

use airwatch::view::{PollutantCard as Card, CONCENTRATION_UNIT};
use leptos::*;

use crate::state::global::GlobalState;

/// Grid of pollutant tiles in display order
#[component]
pub fn PollutantGrid() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let cards = create_memo(move |_| {
        state
            .reading
            .get()
            .map(|view| view.pollutants)
            .unwrap_or_default()
    });

    view! {
        <section>
            <h2 class="text-lg font-semibold mb-4">"Pollutants"</h2>
            <div class="grid grid-cols-2 md:grid-cols-3 lg:grid-cols-6 gap-4">
                {move || {
                    cards.get()
                        .into_iter()
                        .map(|card| view! { <PollutantCard card=card /> })
                        .collect::<Vec<_>>()
                }}
            </div>
        </section>
    }
}

/// Pollutant tile
#[component]
pub fn PollutantCard(card: Card) -> impl IntoView {
    let level = card.severity.map(|s| s.label()).unwrap_or("Unknown");

    view! {
        <div
            class="bg-gray-800 rounded-lg p-4 border-l-4"
            style=format!("border-color: {}", card.hex())
        >
            <div class="flex items-center justify-between">
                <span class="text-gray-400 text-sm">{card.code.clone()}</span>
                <span class="text-xs" style=format!("color: {}", card.hex())>{level}</span>
            </div>

            <div class="text-2xl font-bold mt-2">
                {card.value_text()}
                <span class="text-gray-500 text-xs ml-1">{CONCENTRATION_UNIT}</span>
            </div>

            <div class="text-xs text-gray-400 mt-1">
                "Sub-index: "{card.sub_index_text()}
            </div>
        </div>
    }
}
