//! Refresh Timer
//!
//! Browser half of auto-refresh. The interval exists only while the
//! dashboard follows the device position.

use airwatch::refresh::REFRESH_INTERVAL;
use gloo_timers::callback::Interval;
use std::time::Duration;

/// Owns the auto-refresh `Interval`; dropping the handle cancels it
pub struct RefreshTimer {
    period: Duration,
    interval: Option<Interval>,
}

impl Default for RefreshTimer {
    fn default() -> Self {
        Self::with_period(REFRESH_INTERVAL)
    }
}

impl RefreshTimer {
    pub fn with_period(period: Duration) -> Self {
        Self {
            period,
            interval: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.interval.is_some()
    }

    /// Start or cancel the schedule to match `should_run`. A running timer is
    /// left alone so its phase is kept. Returns whether anything changed.
    pub fn sync<F>(&mut self, should_run: bool, on_tick: F) -> bool
    where
        F: FnMut() + 'static,
    {
        match (should_run, self.interval.is_some()) {
            (true, false) => {
                self.interval = Some(Interval::new(self.period.as_millis() as u32, on_tick));
                true
            }
            (false, true) => {
                self.interval = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use airwatch::dashboard::{Dashboard, FetchRequest};
    use airwatch::location::Coordinate;
    use gloo_timers::future::TimeoutFuture;
    use std::cell::Cell;
    use std::rc::Rc;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_follows_dashboard_mode() {
        let mut dashboard = Dashboard::new();
        let mut timer = RefreshTimer::default();

        assert!(!timer.sync(dashboard.auto_refresh(), || {}));
        assert!(!timer.is_running());

        dashboard.enter_device_mode(Coordinate::new(12.97, 77.59));
        assert!(timer.sync(dashboard.auto_refresh(), || {}));
        assert!(timer.is_running());

        // Same mode again keeps the existing schedule
        assert!(!timer.sync(dashboard.auto_refresh(), || {}));
        assert!(timer.is_running());

        dashboard
            .begin_fetch(FetchRequest::Place("Delhi".to_string()))
            .unwrap();
        assert!(timer.sync(dashboard.auto_refresh(), || {}));
        assert!(!timer.is_running());
    }

    #[wasm_bindgen_test]
    async fn test_stopped_timer_never_fires() {
        let ticks = Rc::new(Cell::new(0));
        let mut timer = RefreshTimer::with_period(Duration::from_millis(10));

        let counter = ticks.clone();
        timer.sync(true, move || counter.set(counter.get() + 1));
        TimeoutFuture::new(35).await;
        let fired = ticks.get();
        assert!(fired >= 1);

        timer.sync(false, || {});
        TimeoutFuture::new(35).await;
        assert_eq!(ticks.get(), fired);
    }
}
