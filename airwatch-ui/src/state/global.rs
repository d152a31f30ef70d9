//! Global Application State
//!
//! Reactive mirror of the dashboard controller using Leptos signals.

use airwatch::dashboard::{Controller, CurrentOutcome, FetchError, FetchRequest, SearchOutcome};
use airwatch::location::{Mode, SEARCH_PROMPT};
use airwatch::view::{ReadingView, TrendSeries};
use airwatch::Suggestion;
use gloo_timers::callback::Timeout;
use leptos::*;
use std::cell::RefCell;
use std::rc::Rc;

use super::refresh::RefreshTimer;
use crate::api::{BrowserGeolocator, GlooApi};

/// Global application state provided to all components
#[derive(Clone)]
pub struct GlobalState {
    /// Owns location mode and request ordering
    controller: Rc<Controller<GlooApi>>,
    /// Auto-refresh schedule, running only in device-location mode
    refresh: Rc<RefCell<RefreshTimer>>,
    /// Rendered reading, `None` until the first success
    pub reading: RwSignal<Option<ReadingView>>,
    /// PM2.5 series for the chart
    pub trend: RwSignal<TrendSeries>,
    /// Autocomplete entries
    pub suggestions: RwSignal<Vec<Suggestion>>,
    pub mode: RwSignal<Mode>,
    /// Shown when no device position is available
    pub location_prompt: RwSignal<Option<&'static str>>,
    /// Global loading state
    pub loading: RwSignal<bool>,
    /// Error message to display
    pub error: RwSignal<Option<String>>,
    /// Success message (for toasts)
    pub success: RwSignal<Option<String>>,
}

/// Provide global state to the component tree
pub fn provide_global_state() {
    let state = GlobalState {
        controller: Rc::new(Controller::new(GlooApi)),
        refresh: Rc::new(RefCell::new(RefreshTimer::default())),
        reading: create_rw_signal(None),
        trend: create_rw_signal(TrendSeries::default()),
        suggestions: create_rw_signal(Vec::new()),
        mode: create_rw_signal(Mode::Unset),
        location_prompt: create_rw_signal(None),
        loading: create_rw_signal(false),
        error: create_rw_signal(None),
        success: create_rw_signal(None),
    };

    provide_context(state);
}

impl GlobalState {
    /// Copy controller state into the signals
    fn sync(&self) {
        // Release the borrow before signals run their effects
        let (reading, trend, suggestions, mode, loading) = {
            let dashboard = self.controller.state();
            (
                dashboard.view().cloned(),
                dashboard.trend().clone(),
                dashboard.suggestions().to_vec(),
                dashboard.mode().clone(),
                dashboard.is_loading(),
            )
        };
        self.reading.set(reading);
        self.trend.set(trend);
        self.suggestions.set(suggestions);
        self.mode.set(mode);
        self.loading.set(loading);
    }

    /// Start or cancel the refresh timer to match the current mode
    fn sync_refresh(&self) {
        let should_run = self.controller.state().auto_refresh();
        let state = self.clone();
        self.refresh
            .borrow_mut()
            .sync(should_run, move || state.refresh_tick());
    }

    /// Ask the browser for a position and load it, or prompt for a search
    pub fn locate(&self) {
        let state = self.clone();
        spawn_local(async move {
            match state.controller.resolve_location(&BrowserGeolocator::default()).await {
                Ok(_) => {
                    state.location_prompt.set(None);
                    state.load(FetchRequest::Current);
                }
                Err(e) => {
                    web_sys::console::warn_1(&format!("Geolocation failed: {}", e).into());
                    state.location_prompt.set(Some(SEARCH_PROMPT));
                }
            }
            state.sync();
            state.sync_refresh();
        });
    }

    /// Run a fetch sequence. The reading renders as soon as it arrives; the
    /// chart follows once history is in.
    pub fn load(&self, request: FetchRequest) {
        let state = self.clone();
        spawn_local(async move {
            state.loading.set(true);

            match state.controller.fetch_current(request).await {
                Ok(CurrentOutcome::Rendered { history, .. }) => {
                    state.location_prompt.set(None);
                    state.sync();
                    if let Some(pending) = history {
                        state.controller.fetch_history(pending).await;
                    }
                }
                Ok(CurrentOutcome::Failed { message }) => state.show_error(&message),
                Ok(CurrentOutcome::Superseded) => {}
                // Blank search box: nothing to do
                Err(FetchError::EmptyQuery) => {}
                Err(e) => state.show_error(&e.to_string()),
            }

            state.sync();
            state.sync_refresh();
        });
    }

    /// Search a typed place name
    pub fn search(&self, place: String) {
        self.dismiss_suggestions();
        self.load(FetchRequest::Place(place));
    }

    fn refresh_tick(&self) {
        let state = self.clone();
        spawn_local(async move {
            // Refresh issues a fetch exactly when the mode auto-refreshes
            if state.controller.state().auto_refresh() {
                state.loading.set(true);
            }
            if let Some(outcome) = state.controller.refresh_tick().await {
                if let Some(message) = outcome.error_message() {
                    state.show_error(message);
                }
            }
            state.sync();
            state.sync_refresh();
        });
    }

    /// Update suggestions for the search field's text
    pub fn suggest(&self, input: String) {
        let state = self.clone();
        spawn_local(async move {
            match state.controller.suggest(&input).await {
                SearchOutcome::Superseded => {}
                _ => {
                    let list = state.controller.state().suggestions().to_vec();
                    state.suggestions.set(list);
                }
            }
        });
    }

    /// Load a suggestion by position
    pub fn select(&self, index: usize) {
        let state = self.clone();
        spawn_local(async move {
            state.loading.set(true);
            match state.controller.select_suggestion(index).await {
                Some(Ok(outcome)) => {
                    if let Some(message) = outcome.error_message() {
                        state.show_error(message);
                    }
                }
                Some(Err(e)) => state.show_error(&e.to_string()),
                None => {}
            }
            state.sync();
            state.sync_refresh();
        });
    }

    pub fn dismiss_suggestions(&self) {
        self.controller.dismiss_suggestions();
        self.suggestions.set(Vec::new());
    }

    /// Show a success message (auto-clears after timeout)
    pub fn show_success(&self, message: &str) {
        self.success.set(Some(message.to_string()));

        let success_signal = self.success;
        Timeout::new(3000, move || {
            success_signal.set(None);
        })
        .forget();
    }

    /// Show an error message (auto-clears after timeout)
    pub fn show_error(&self, message: &str) {
        self.error.set(Some(message.to_string()));

        let error_signal = self.error;
        Timeout::new(5000, move || {
            error_signal.set(None);
        })
        .forget();
    }
}
