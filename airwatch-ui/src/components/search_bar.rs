//! Search Bar Component
//!
//! Place search with keystroke autocomplete.

use leptos::*;

use crate::state::global::GlobalState;

const DEFAULT_PLACEHOLDER: &str = "Search for a city";

/// Search input, suggestion list and location button
#[component]
pub fn SearchBar() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let (query, set_query) = create_signal(String::new());

    let state_for_input = state.clone();
    let on_input = move |ev| {
        let value = event_target_value(&ev);
        set_query.set(value.clone());
        state_for_input.suggest(value);
    };

    let state_for_key = state.clone();
    let on_keydown = move |ev: ev::KeyboardEvent| {
        if ev.key() == "Enter" {
            ev.prevent_default();
            state_for_key.search(query.get());
        }
    };

    let state_for_click = state.clone();
    let on_search = move |_| state_for_click.search(query.get());

    let state_for_locate = state.clone();
    let on_locate = move |_| state_for_locate.locate();

    let prompt = state.location_prompt;
    let suggestions = state.suggestions;

    view! {
        <div class="relative">
            <div class="flex space-x-2">
                <input
                    type="text"
                    placeholder=move || prompt.get().unwrap_or(DEFAULT_PLACEHOLDER)
                    prop:value=move || query.get()
                    on:input=on_input
                    on:keydown=on_keydown
                    class="flex-1 bg-gray-700 rounded-lg px-4 py-3
                           border border-gray-600 focus:border-primary-500 focus:outline-none"
                />
                <button
                    on:click=on_search
                    class="px-4 py-3 bg-primary-600 hover:bg-primary-700 rounded-lg font-medium transition-colors"
                >
                    "Search"
                </button>
                <button
                    on:click=on_locate
                    title="Use my location"
                    class="px-4 py-3 bg-gray-600 hover:bg-gray-500 rounded-lg transition-colors"
                >
                    "📍"
                </button>
            </div>

            {move || {
                let list = suggestions.get();
                (!list.is_empty()).then(|| {
                    let state = state.clone();
                    view! {
                        <ul class="absolute z-40 mt-1 w-full bg-gray-800 border border-gray-700 rounded-lg shadow-lg overflow-hidden">
                            {list
                                .into_iter()
                                .enumerate()
                                .map(|(index, suggestion)| {
                                    let state = state.clone();
                                    let label = suggestion.label.clone();
                                    let on_pick = move |_| {
                                        set_query.set(label.clone());
                                        state.select(index);
                                    };
                                    view! {
                                        <li
                                            on:click=on_pick
                                            class="px-4 py-2 cursor-pointer hover:bg-gray-700"
                                        >
                                            {suggestion.display()}
                                        </li>
                                    }
                                })
                                .collect::<Vec<_>>()}
                        </ul>
                    }
                })
            }}
        </div>
    }
}
