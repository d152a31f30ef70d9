//! Dashboard state machine.
//!
//! Pure, synchronous state: the location mode, the rendered view, the trend
//! series, the suggestion list, and the tickets that order asynchronous
//! completions. Nothing here performs I/O; [`Controller`](super::Controller)
//! drives it from async code and front ends can drive it directly.

use serde::Serialize;
use thiserror::Error;

use crate::api::{ApiError, HistoryPoint, LocationQuery, PlaceMatch, Reading};
use crate::autocomplete::{self, Suggestion};
use crate::location::{Coordinate, LocateError, Mode, SEARCH_PROMPT};
use crate::view::{ReadingView, TrendSeries};

/// Orders fetch sequences; only the most recently issued ticket may update
/// the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Ticket(u64);

impl Ticket {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// What the user (or the timer) asked to load
#[derive(Debug, Clone, PartialEq)]
pub enum FetchRequest {
    /// Switch to place-search mode for this name and fetch it
    Place(String),
    /// Re-fetch whatever the current mode points at
    Current,
}

/// Reasons a fetch cannot even start
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("No location or city available.")]
    NoLocation,

    #[error("Search query is empty")]
    EmptyQuery,
}

/// A current-reading request that has been issued a ticket
#[derive(Debug, Clone, PartialEq)]
pub struct PendingFetch {
    pub ticket: Ticket,
    pub query: LocationQuery,
}

/// The history request that follows a successful reading
#[derive(Debug, Clone, PartialEq)]
pub struct PendingHistory {
    pub ticket: Ticket,
    pub location_id: String,
}

/// A suggestion lookup that has been issued a ticket
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSearch {
    pub ticket: Ticket,
    pub query: String,
}

/// Result of applying a current-reading completion
#[derive(Debug, Clone, PartialEq)]
pub enum CurrentOutcome {
    /// The view was replaced; fetch history next if a key was found
    Rendered {
        view: ReadingView,
        history: Option<PendingHistory>,
    },
    /// Show `message` to the user; previous view stays in place
    Failed { message: String },
    /// A newer request has been issued since; nothing changed
    Superseded,
}

/// Result of applying a history completion
#[derive(Debug, Clone, PartialEq)]
pub enum HistoryOutcome {
    Updated(TrendSeries),
    /// Empty or failed history; the chart is now empty
    Cleared,
    Superseded,
}

/// Result of a keystroke in the search field
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// Query too short; list cleared without a request
    Skipped,
    Suggestions(Vec<Suggestion>),
    /// Lookup failed; list cleared
    Cleared,
    Superseded,
}

/// All controller state
#[derive(Debug, Default)]
pub struct Dashboard {
    mode: Mode,
    fetch_seq: u64,
    search_seq: u64,
    view: Option<ReadingView>,
    reading: Option<Reading>,
    trend: TrendSeries,
    suggestions: Vec<Suggestion>,
    loading: bool,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn view(&self) -> Option<&ReadingView> {
        self.view.as_ref()
    }

    pub fn reading(&self) -> Option<&Reading> {
        self.reading.as_ref()
    }

    pub fn trend(&self) -> &TrendSeries {
        &self.trend
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Periodic refresh should be running
    pub fn auto_refresh(&self) -> bool {
        self.mode.auto_refresh()
    }

    // ============ Location ============

    /// The device reported a position: follow it, dropping any place name
    pub fn enter_device_mode(&mut self, coord: Coordinate) {
        tracing::info!(
            lat = coord.lat,
            lng = coord.lng,
            previous = self.mode.name(),
            "Entering device-location mode"
        );
        self.mode = Mode::DeviceLocation(coord);
        // In-flight place fetches belong to the old mode
        self.issue_ticket();
        self.loading = false;
    }

    /// The device could not be located. The mode is left as it was and the
    /// caller should prompt for a manual search.
    pub fn location_failed(&mut self, error: LocateError) -> &'static str {
        tracing::warn!(error = %error, "Device location unavailable, prompting for search");
        SEARCH_PROMPT
    }

    // ============ Current reading ============

    fn issue_ticket(&mut self) -> Ticket {
        self.fetch_seq += 1;
        Ticket(self.fetch_seq)
    }

    fn is_latest(&self, ticket: Ticket) -> bool {
        ticket.0 == self.fetch_seq
    }

    /// Start a fetch sequence.
    ///
    /// A place request switches to place-search mode immediately, which
    /// clears any held coordinate and stops auto-refresh. The issued ticket
    /// supersedes every earlier one.
    pub fn begin_fetch(&mut self, request: FetchRequest) -> Result<PendingFetch, FetchError> {
        let query = match request {
            FetchRequest::Place(name) => {
                let name = name.trim();
                if name.is_empty() {
                    return Err(FetchError::EmptyQuery);
                }
                if self.mode.auto_refresh() {
                    tracing::info!(place = %name, "Leaving device-location mode for place search");
                }
                self.mode = Mode::PlaceSearch(name.to_string());
                LocationQuery::City {
                    name: name.to_string(),
                }
            }
            FetchRequest::Current => self.mode.query().ok_or(FetchError::NoLocation)?,
        };

        let ticket = self.issue_ticket();
        self.loading = true;
        tracing::debug!(ticket = ticket.0, query = %query, "Fetch started");

        Ok(PendingFetch { ticket, query })
    }

    /// Start a timer-driven refresh, only in device-location mode
    pub fn begin_refresh(&mut self) -> Option<PendingFetch> {
        if !self.mode.auto_refresh() {
            return None;
        }
        self.begin_fetch(FetchRequest::Current).ok()
    }

    /// Apply the result of a current-reading request
    pub fn complete_current(
        &mut self,
        ticket: Ticket,
        result: Result<Reading, ApiError>,
    ) -> CurrentOutcome {
        if !self.is_latest(ticket) {
            tracing::debug!(ticket = ticket.0, latest = self.fetch_seq, "Discarding superseded reading");
            return CurrentOutcome::Superseded;
        }

        let reading = match result {
            Ok(reading) => reading,
            Err(e) => {
                tracing::warn!(ticket = ticket.0, error = %e, "Reading fetch failed");
                self.loading = false;
                return CurrentOutcome::Failed {
                    message: e.user_message(),
                };
            }
        };

        if let (Mode::PlaceSearch(_), Some(city)) = (&self.mode, reading.resolved_city()) {
            self.mode = Mode::PlaceSearch(city);
        }

        let view = ReadingView::render(&reading);
        let history = reading.history_key().map(|location_id| PendingHistory {
            ticket,
            location_id,
        });

        if history.is_none() {
            tracing::debug!(ticket = ticket.0, "No location id in reading, clearing trend");
            self.trend.clear();
            self.loading = false;
        }

        self.view = Some(view.clone());
        self.reading = Some(reading);

        CurrentOutcome::Rendered { view, history }
    }

    /// Apply the result of a history request
    pub fn complete_history(
        &mut self,
        ticket: Ticket,
        result: Result<Vec<HistoryPoint>, ApiError>,
    ) -> HistoryOutcome {
        if !self.is_latest(ticket) {
            tracing::debug!(ticket = ticket.0, latest = self.fetch_seq, "Discarding superseded history");
            return HistoryOutcome::Superseded;
        }
        self.loading = false;

        match result {
            Ok(points) if !points.is_empty() => {
                self.trend = TrendSeries::from_history(&points);
                HistoryOutcome::Updated(self.trend.clone())
            }
            Ok(_) => {
                tracing::debug!(ticket = ticket.0, "Empty history, clearing trend");
                self.trend.clear();
                HistoryOutcome::Cleared
            }
            Err(e) => {
                tracing::warn!(ticket = ticket.0, error = %e, "History fetch failed, clearing trend");
                self.trend.clear();
                HistoryOutcome::Cleared
            }
        }
    }

    // ============ Autocomplete ============

    /// Start a suggestion lookup for a keystroke.
    ///
    /// Returns `None` for queries that are too short; those clear the list
    /// and invalidate any lookup still in flight.
    pub fn begin_search(&mut self, input: &str) -> Option<PendingSearch> {
        self.search_seq += 1;
        let ticket = Ticket(self.search_seq);

        match autocomplete::searchable(input) {
            Some(q) => Some(PendingSearch {
                ticket,
                query: q.to_string(),
            }),
            None => {
                self.suggestions.clear();
                None
            }
        }
    }

    /// Apply the result of a suggestion lookup
    pub fn complete_search(
        &mut self,
        ticket: Ticket,
        result: Result<Vec<PlaceMatch>, ApiError>,
    ) -> SearchOutcome {
        if ticket.0 != self.search_seq {
            return SearchOutcome::Superseded;
        }

        match result {
            Ok(matches) => {
                self.suggestions = autocomplete::suggestions(matches);
                SearchOutcome::Suggestions(self.suggestions.clone())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Suggestion lookup failed");
                self.suggestions.clear();
                SearchOutcome::Cleared
            }
        }
    }

    /// Take a suggestion by position, clearing the list
    pub fn select_suggestion(&mut self, index: usize) -> Option<Suggestion> {
        let picked = self.suggestions.get(index).cloned()?;
        self.clear_suggestions();
        Some(picked)
    }

    /// Hide the list and drop any lookup still in flight
    pub fn clear_suggestions(&mut self) {
        self.search_seq += 1;
        self.suggestions.clear();
    }
}
