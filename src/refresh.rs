//! Refresh Scheduler
//!
//! Periodic re-fetch while the dashboard follows the device's position.

use std::time::Duration;

/// Time between automatic refreshes
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(15);

#[cfg(feature = "native")]
pub use ticker::RefreshTicker;

#[cfg(feature = "native")]
mod ticker {
    use std::time::Duration;
    use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

    use super::REFRESH_INTERVAL;

    /// A restartable interval timer.
    ///
    /// At most one schedule is active; starting again replaces it. The first
    /// tick fires one full period after [`start`](Self::start).
    pub struct RefreshTicker {
        period: Duration,
        interval: Option<Interval>,
    }

    impl Default for RefreshTicker {
        fn default() -> Self {
            Self::new()
        }
    }

    impl RefreshTicker {
        pub fn new() -> Self {
            Self::with_period(REFRESH_INTERVAL)
        }

        pub fn with_period(period: Duration) -> Self {
            Self {
                period,
                interval: None,
            }
        }

        pub fn period(&self) -> Duration {
            self.period
        }

        /// Start (or restart) the schedule
        pub fn start(&mut self) {
            let mut interval = interval_at(Instant::now() + self.period, self.period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            if self.interval.replace(interval).is_none() {
                tracing::debug!(period_ms = self.period.as_millis() as u64, "Refresh started");
            }
        }

        pub fn stop(&mut self) {
            if self.interval.take().is_some() {
                tracing::debug!("Refresh stopped");
            }
        }

        pub fn is_running(&self) -> bool {
            self.interval.is_some()
        }

        /// Match the schedule to whether refresh should run
        pub fn sync(&mut self, should_run: bool) {
            match (should_run, self.is_running()) {
                (true, false) => self.start(),
                (false, true) => self.stop(),
                _ => {}
            }
        }

        /// Wait for the next tick. Never resolves while stopped.
        pub async fn tick(&mut self) {
            match self.interval.as_mut() {
                Some(interval) => {
                    interval.tick().await;
                }
                None => std::future::pending::<()>().await,
            }
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use tokio::time::timeout;

        #[test]
        fn test_default_period() {
            let ticker = RefreshTicker::new();
            assert_eq!(ticker.period(), Duration::from_secs(15));
            assert!(!ticker.is_running());
        }

        #[tokio::test]
        async fn test_stopped_ticker_never_fires() {
            let mut ticker = RefreshTicker::with_period(Duration::from_millis(5));
            assert!(timeout(Duration::from_millis(50), ticker.tick()).await.is_err());
        }

        #[tokio::test]
        async fn test_first_tick_after_one_period() {
            let mut ticker = RefreshTicker::with_period(Duration::from_millis(40));
            ticker.start();

            let started = Instant::now();
            ticker.tick().await;
            assert!(started.elapsed() >= Duration::from_millis(40));

            timeout(Duration::from_millis(500), ticker.tick())
                .await
                .expect("second tick");
        }

        #[tokio::test]
        async fn test_sync_starts_and_stops() {
            let mut ticker = RefreshTicker::with_period(Duration::from_millis(5));
            ticker.sync(true);
            assert!(ticker.is_running());
            ticker.sync(true);
            assert!(ticker.is_running());

            ticker.sync(false);
            assert!(!ticker.is_running());
            assert!(timeout(Duration::from_millis(50), ticker.tick()).await.is_err());
        }
    }
}
