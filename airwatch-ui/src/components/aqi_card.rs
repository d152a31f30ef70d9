//! AQI Card Component
//!
//! Headline reading: location, overall index, category and advisory.

use leptos::*;

use crate::state::global::GlobalState;

/// Accent used before the server sends a color
const NEUTRAL_ACCENT: &str = "#374151";

/// Overall reading card
#[component]
pub fn AqiCard() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let reading = state.reading;

    view! {
        {move || match reading.get() {
            Some(view) => {
                let accent = view.color.clone().unwrap_or_else(|| NEUTRAL_ACCENT.to_string());
                let text = text_color_for(&accent);

                view! {
                    <section class="bg-gray-800 rounded-xl p-6 flex flex-col md:flex-row md:items-center gap-6">
                        <div
                            class="rounded-xl w-36 h-36 flex flex-col items-center justify-center shrink-0"
                            style=format!("background-color: {}; color: {}", accent, text)
                        >
                            <span class="text-xs uppercase tracking-wide">"AQI"</span>
                            <span class="text-5xl font-bold">{view.aqi.clone()}</span>
                        </div>

                        <div class="space-y-2">
                            <h2 class="text-2xl font-semibold">{view.location.clone()}</h2>
                            <p class="text-lg">{view.category.clone()}</p>
                            <p class="text-sm text-gray-400">
                                "Dominant pollutant: "
                                <span class="text-white">{view.dominant_pollutant.clone()}</span>
                            </p>
                            {(!view.advisory.is_empty()).then(|| view! {
                                <p class="text-sm text-gray-300">{view.advisory.clone()}</p>
                            })}
                        </div>
                    </section>
                }.into_view()
            }
            None => view! {
                <section class="bg-gray-800 rounded-xl p-6 text-gray-400">
                    "No reading yet"
                </section>
            }.into_view(),
        }}
    }
}

/// Dark or light text, whichever reads better on `hex`
pub(crate) fn text_color_for(hex: &str) -> &'static str {
    let digits = hex.trim_start_matches('#');
    let channel = |i: usize| {
        digits
            .get(i..i + 2)
            .and_then(|c| u8::from_str_radix(c, 16).ok())
            .map(f64::from)
    };

    match (digits.len(), channel(0), channel(2), channel(4)) {
        (6, Some(r), Some(g), Some(b)) if 0.299 * r + 0.587 * g + 0.114 * b > 150.0 => "#111827",
        _ => "#FFFFFF",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_color_contrast() {
        // Yellow and green bands need dark text
        assert_eq!(text_color_for("#FFFF00"), "#111827");
        assert_eq!(text_color_for("#00E400"), "#111827");
        assert_eq!(text_color_for("#8F3F97"), "#FFFFFF");
        assert_eq!(text_color_for("#FF0000"), "#FFFFFF");
        assert_eq!(text_color_for("not-a-color"), "#FFFFFF");
    }
}
