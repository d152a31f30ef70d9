//! Async driver for [`Dashboard`].

use std::cell::{Ref, RefCell};

use crate::api::AirQualityApi;
use crate::location::{Coordinate, Geolocator, LocateError, Mode};

use super::state::{
    CurrentOutcome, Dashboard, FetchError, FetchRequest, HistoryOutcome, PendingHistory,
    SearchOutcome,
};

/// Outcome of a complete fetch sequence (reading, then history)
#[derive(Debug, Clone, PartialEq)]
pub struct LoadOutcome {
    pub current: CurrentOutcome,
    /// `None` when no history request was made
    pub history: Option<HistoryOutcome>,
}

impl LoadOutcome {
    /// Message to surface to the user, if the sequence failed
    pub fn error_message(&self) -> Option<&str> {
        match &self.current {
            CurrentOutcome::Failed { message } => Some(message.as_str()),
            _ => None,
        }
    }
}

/// Runs dashboard operations against an [`AirQualityApi`].
///
/// State lives in a `RefCell`; no borrow is held across an await, so a
/// single controller can be shared (behind `Rc`) by concurrent tasks on one
/// thread. Ordering between overlapping sequences is settled by tickets.
pub struct Controller<A> {
    api: A,
    state: RefCell<Dashboard>,
}

impl<A: AirQualityApi> Controller<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: RefCell::new(Dashboard::new()),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Read-only view of the current state
    pub fn state(&self) -> Ref<'_, Dashboard> {
        self.state.borrow()
    }

    pub fn mode(&self) -> Mode {
        self.state.borrow().mode().clone()
    }

    /// Ask the device for its position and enter device-location mode on
    /// success. On failure the mode is unchanged.
    pub async fn resolve_location<G: Geolocator + ?Sized>(
        &self,
        geolocator: &G,
    ) -> Result<Coordinate, LocateError> {
        match geolocator.locate().await {
            Ok(coord) => {
                self.state.borrow_mut().enter_device_mode(coord);
                Ok(coord)
            }
            Err(e) => {
                self.state.borrow_mut().location_failed(e);
                Err(e)
            }
        }
    }

    /// Fetch the current reading. On success the returned outcome names the
    /// history request to make next.
    pub async fn fetch_current(&self, request: FetchRequest) -> Result<CurrentOutcome, FetchError> {
        let pending = self.state.borrow_mut().begin_fetch(request)?;
        let result = self.api.current(&pending.query).await;
        Ok(self.state.borrow_mut().complete_current(pending.ticket, result))
    }

    /// Fetch the trend series for a rendered reading
    pub async fn fetch_history(&self, pending: PendingHistory) -> HistoryOutcome {
        let result = self.api.history(&pending.location_id).await;
        self.state.borrow_mut().complete_history(pending.ticket, result)
    }

    /// Fetch the reading and then its history
    pub async fn load(&self, request: FetchRequest) -> Result<LoadOutcome, FetchError> {
        let current = self.fetch_current(request).await?;
        let history = match &current {
            CurrentOutcome::Rendered {
                history: Some(pending),
                ..
            } => Some(self.fetch_history(pending.clone()).await),
            _ => None,
        };
        Ok(LoadOutcome { current, history })
    }

    /// One timer tick: reload in device-location mode, do nothing otherwise
    pub async fn refresh_tick(&self) -> Option<LoadOutcome> {
        let pending = self.state.borrow_mut().begin_refresh()?;
        tracing::debug!(ticket = pending.ticket.value(), "Auto-refresh tick");

        let result = self.api.current(&pending.query).await;
        let current = self.state.borrow_mut().complete_current(pending.ticket, result);
        let history = match &current {
            CurrentOutcome::Rendered {
                history: Some(pending),
                ..
            } => Some(self.fetch_history(pending.clone()).await),
            _ => None,
        };
        Some(LoadOutcome { current, history })
    }

    /// Look up suggestions for the text in the search field
    pub async fn suggest(&self, input: &str) -> SearchOutcome {
        let Some(pending) = self.state.borrow_mut().begin_search(input) else {
            return SearchOutcome::Skipped;
        };
        let result = self.api.search(&pending.query).await;
        self.state.borrow_mut().complete_search(pending.ticket, result)
    }

    /// Pick a suggestion and load it as a place search
    pub async fn select_suggestion(&self, index: usize) -> Option<Result<LoadOutcome, FetchError>> {
        let picked = self.state.borrow_mut().select_suggestion(index)?;
        Some(self.load(FetchRequest::Place(picked.label)).await)
    }

    /// Hide the suggestion list
    pub fn dismiss_suggestions(&self) {
        self.state.borrow_mut().clear_suggestions();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, ApiResult, HistoryPoint, LocationQuery, PlaceMatch, Reading};
    use crate::location::FixedGeolocator;
    use async_trait::async_trait;
    use std::cell::Cell;
    use std::collections::BTreeMap;
    use std::rc::Rc;

    #[derive(Default)]
    struct FakeApi {
        current_calls: Cell<usize>,
        search_calls: Cell<usize>,
        history_calls: Cell<usize>,
        fail_current: Cell<bool>,
    }

    fn reading_for(name: &str) -> Reading {
        let mut pollutants = BTreeMap::new();
        pollutants.insert("PM2.5".to_string(), Some(31.0));
        Reading {
            city: Some(name.to_string()),
            country: Some("IN".to_string()),
            location: None,
            display_location: None,
            location_id: Some(format!("id-{}", name)),
            aqi: Some(52.0),
            category: Some("Satisfactory".to_string()),
            health_advisory: None,
            dominant_pollutant: Some("PM2.5".to_string()),
            color: Some("#FFFF00".to_string()),
            pollutants,
            sub_indices: BTreeMap::new(),
            last_updated: None,
        }
    }

    #[async_trait(?Send)]
    impl AirQualityApi for FakeApi {
        async fn current(&self, query: &LocationQuery) -> ApiResult<Reading> {
            self.current_calls.set(self.current_calls.get() + 1);
            tokio::task::yield_now().await;
            if self.fail_current.get() {
                return Err(ApiError::Status {
                    status: 500,
                    message: Some("Upstream provider down".to_string()),
                });
            }
            match query {
                LocationQuery::City { name } => Ok(reading_for(name)),
                LocationQuery::Coordinates { .. } => Ok(reading_for("Bengaluru")),
            }
        }

        async fn search(&self, q: &str) -> ApiResult<Vec<PlaceMatch>> {
            self.search_calls.set(self.search_calls.get() + 1);
            Ok(vec![PlaceMatch {
                name: format!("{}pur", q),
                country: Some("IN".to_string()),
            }])
        }

        async fn history(&self, _location_id: &str) -> ApiResult<Vec<HistoryPoint>> {
            self.history_calls.set(self.history_calls.get() + 1);
            Ok((0..3)
                .map(|i| HistoryPoint {
                    at: chrono::DateTime::from_timestamp_millis(1_700_000_000_000 + i * 3_600_000),
                    pm25_avg: 20.0 + i as f64,
                })
                .collect())
        }
    }

    #[tokio::test]
    async fn test_device_location_flow() {
        let api = Rc::new(FakeApi::default());
        let controller = Controller::new(api.clone());

        let geo = FixedGeolocator::new(Some(Coordinate::new(12.97, 77.59)));
        controller.resolve_location(&geo).await.unwrap();
        assert!(controller.mode().auto_refresh());

        let outcome = controller.load(FetchRequest::Current).await.unwrap();
        assert!(matches!(outcome.current, CurrentOutcome::Rendered { .. }));
        assert!(matches!(outcome.history, Some(HistoryOutcome::Updated(_))));
        assert_eq!(controller.state().trend().len(), 3);
        assert_eq!(api.current_calls.get(), 1);
        assert_eq!(api.history_calls.get(), 1);

        assert!(controller.refresh_tick().await.is_some());
        assert_eq!(api.current_calls.get(), 2);
    }

    #[tokio::test]
    async fn test_location_denied_keeps_mode() {
        let controller = Controller::new(FakeApi::default());
        let err = controller
            .resolve_location(&FixedGeolocator::unsupported())
            .await
            .unwrap_err();
        assert_eq!(err, LocateError::Unsupported);
        assert_eq!(controller.mode(), Mode::Unset);
        assert_eq!(
            controller.load(FetchRequest::Current).await,
            Err(FetchError::NoLocation)
        );
    }

    #[tokio::test]
    async fn test_refresh_skipped_in_place_mode() {
        let api = Rc::new(FakeApi::default());
        let controller = Controller::new(api.clone());

        controller
            .load(FetchRequest::Place("Delhi".to_string()))
            .await
            .unwrap();
        assert_eq!(api.current_calls.get(), 1);

        assert!(controller.refresh_tick().await.is_none());
        assert_eq!(api.current_calls.get(), 1);
    }

    #[tokio::test]
    async fn test_failure_reports_server_message() {
        let api = Rc::new(FakeApi::default());
        let controller = Controller::new(api.clone());
        api.fail_current.set(true);

        let outcome = controller
            .load(FetchRequest::Place("Delhi".to_string()))
            .await
            .unwrap();
        assert_eq!(outcome.error_message(), Some("Upstream provider down"));
        assert_eq!(outcome.history, None);
        assert_eq!(api.history_calls.get(), 0);
        assert!(!controller.state().is_loading());
    }

    #[tokio::test]
    async fn test_suggest_and_select() {
        let api = Rc::new(FakeApi::default());
        let controller = Controller::new(api.clone());

        assert_eq!(controller.suggest("j").await, SearchOutcome::Skipped);
        assert_eq!(api.search_calls.get(), 0);

        match controller.suggest(" Jai ").await {
            SearchOutcome::Suggestions(list) => assert_eq!(list[0].display(), "Jaipur, IN"),
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert_eq!(api.search_calls.get(), 1);

        let outcome = controller.select_suggestion(0).await.unwrap().unwrap();
        assert!(matches!(outcome.current, CurrentOutcome::Rendered { .. }));
        assert_eq!(controller.mode(), Mode::PlaceSearch("Jaipur".to_string()));
        assert!(controller.state().suggestions().is_empty());
        assert!(controller.select_suggestion(0).await.is_none());
    }

    #[tokio::test]
    async fn test_overlapping_loads_latest_wins() {
        let api = Rc::new(FakeApi::default());
        let controller = Controller::new(api.clone());
        controller
            .resolve_location(&FixedGeolocator::new(Some(Coordinate::new(1.0, 2.0))))
            .await
            .unwrap();

        // Both sequences start before either completes; the place search was
        // issued last so the device reading must be discarded
        let (device, place) = tokio::join!(
            controller.load(FetchRequest::Current),
            controller.load(FetchRequest::Place("Chennai".to_string())),
        );
        assert_eq!(device.unwrap().current, CurrentOutcome::Superseded);
        assert!(matches!(place.unwrap().current, CurrentOutcome::Rendered { .. }));
        assert_eq!(controller.state().view().unwrap().location, "Chennai");
        assert_eq!(controller.mode(), Mode::PlaceSearch("Chennai".to_string()));
    }
}
