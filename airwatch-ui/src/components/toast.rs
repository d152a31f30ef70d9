//! Toast Notification Component
//!
//! Non-blocking notices. Fetch failures land here instead of interrupting
//! the page, and can be dismissed before they time out.

use leptos::*;

use crate::state::global::GlobalState;

/// Notice stack in the bottom-right corner
#[component]
pub fn Toast() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let success = state.success;
    let error = state.error;

    view! {
        <div class="fixed bottom-20 right-4 z-50 space-y-2 max-w-sm">
            // Failures first so they stay nearest the corner
            {move || {
                error.get().map(|msg| view! {
                    <Notice message=msg kind=NoticeKind::Failure on_dismiss=move || error.set(None) />
                })
            }}

            {move || {
                success.get().map(|msg| view! {
                    <Notice message=msg kind=NoticeKind::Confirmation on_dismiss=move || success.set(None) />
                })
            }}
        </div>
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum NoticeKind {
    Confirmation,
    Failure,
}

impl NoticeKind {
    fn icon(self) -> &'static str {
        match self {
            NoticeKind::Confirmation => "✓",
            NoticeKind::Failure => "⚠",
        }
    }

    fn background(self) -> &'static str {
        match self {
            NoticeKind::Confirmation => "bg-green-600",
            NoticeKind::Failure => "bg-red-600",
        }
    }

    /// Failures interrupt assistive tech, confirmations wait their turn
    fn aria_role(self) -> &'static str {
        match self {
            NoticeKind::Confirmation => "status",
            NoticeKind::Failure => "alert",
        }
    }
}

#[component]
fn Notice<F>(
    #[prop(into)]
    message: String,
    kind: NoticeKind,
    on_dismiss: F,
) -> impl IntoView
where
    F: Fn() + 'static,
{
    view! {
        <div
            role=kind.aria_role()
            class=format!(
                "flex items-start space-x-3 {} text-white px-4 py-3 rounded-lg shadow-lg animate-slide-in",
                kind.background()
            )
        >
            <span class="text-lg leading-none">{kind.icon()}</span>
            <span class="flex-1 text-sm font-medium">{message}</span>
            <button
                on:click=move |_| on_dismiss()
                title="Dismiss"
                class="text-white/70 hover:text-white leading-none"
            >
                "×"
            </button>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_kinds() {
        assert_eq!(NoticeKind::Failure.aria_role(), "alert");
        assert_eq!(NoticeKind::Confirmation.aria_role(), "status");
        assert_ne!(NoticeKind::Failure.background(), NoticeKind::Confirmation.background());
    }
}
