//! Loading Component

use leptos::*;

/// Dims its children and shows a spinner while `loading` is set
#[component]
pub fn LoadingOverlay(
    #[prop(into)]
    loading: Signal<bool>,
    children: Children,
) -> impl IntoView {
    view! {
        <div class="relative">
            {children()}

            {move || {
                if loading.get() {
                    view! {
                        <div class="absolute inset-0 bg-gray-900/50 flex items-center justify-center rounded-xl">
                            <div class="loading-spinner w-8 h-8" />
                        </div>
                    }.into_view()
                } else {
                    view! {}.into_view()
                }
            }}
        </div>
    }
}
