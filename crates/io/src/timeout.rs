//! Bounded-time wrapper around a [`SeriesLoader`].

use std::sync::Arc;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use tracing::warn;

use crate::error::IoError;
use crate::series::DailySeries;
use crate::source::{SeriesLoader, SeriesRequest};

/// Runs each load on a worker thread and gives up after `timeout`.
///
/// A stalled read is reported as [`IoError::Timeout`], which the pipeline
/// treats like a missing file. The stalled worker is left to finish on its
/// own. A zero timeout calls the inner loader directly.
#[derive(Debug)]
pub struct TimeoutLoader<L> {
    inner: Arc<L>,
    timeout: Duration,
}

impl<L> TimeoutLoader<L> {
    /// Wraps `inner` with a per-load `timeout`.
    pub fn new(inner: L, timeout: Duration) -> Self {
        Self {
            inner: Arc::new(inner),
            timeout,
        }
    }

    /// Returns the configured timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl<L: SeriesLoader + 'static> SeriesLoader for TimeoutLoader<L> {
    fn load(&self, request: &SeriesRequest<'_>) -> Result<DailySeries, IoError> {
        if self.timeout.is_zero() {
            return self.inner.load(request);
        }

        let inner = Arc::clone(&self.inner);
        let basin = request.basin.clone();
        let (source, run, windows) = (request.source, request.run, request.windows);
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let owned = SeriesRequest {
                basin: &basin,
                source,
                run,
                windows,
            };
            // The receiver is gone if the caller already timed out.
            let _ = tx.send(inner.load(&owned));
        });

        match rx.recv_timeout(self.timeout) {
            Ok(result) => result,
            Err(_) => {
                let target = format!("{source} {} {run}", request.basin.id());
                warn!(target = %target, secs = self.timeout.as_secs(), "series read timed out");
                Err(IoError::Timeout {
                    target,
                    secs: self.timeout.as_secs(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basins::{Basin, BasinKind};
    use crate::error::Unavailable;
    use crate::source::SeriesSource;
    use prbias_calendar::RunDate;

    struct Sleepy(Duration);

    impl SeriesLoader for Sleepy {
        fn load(&self, request: &SeriesRequest<'_>) -> Result<DailySeries, IoError> {
            thread::sleep(self.0);
            Ok(DailySeries::new(
                request.windows.start(),
                vec![1.0; request.windows.total_days()],
            ))
        }
    }

    fn request_parts() -> (Basin, RunDate) {
        (
            Basin::new("b", "b", "b_full", BasinKind::Macro, None),
            RunDate::new(2017, 8).unwrap(),
        )
    }

    #[test]
    fn fast_load_passes_through() {
        let (basin, run) = request_parts();
        let loader = TimeoutLoader::new(Sleepy(Duration::ZERO), Duration::from_secs(5));
        let req = SeriesRequest {
            basin: &basin,
            source: SeriesSource::Forecast,
            run,
            windows: run.windows().unwrap(),
        };
        assert_eq!(loader.load(&req).unwrap().len(), 91);
    }

    #[test]
    fn slow_load_times_out() {
        let (basin, run) = request_parts();
        let loader = TimeoutLoader::new(Sleepy(Duration::from_millis(500)), Duration::from_millis(20));
        let req = SeriesRequest {
            basin: &basin,
            source: SeriesSource::Hindcast,
            run,
            windows: run.windows().unwrap(),
        };
        let err = loader.load(&req).unwrap_err();
        assert_eq!(err.unavailable(), Unavailable::TimedOut);
    }

    #[test]
    fn zero_timeout_calls_inline() {
        let (basin, run) = request_parts();
        let loader = TimeoutLoader::new(Sleepy(Duration::from_millis(5)), Duration::ZERO);
        assert_eq!(loader.timeout(), Duration::ZERO);
        let req = SeriesRequest {
            basin: &basin,
            source: SeriesSource::Observation,
            run,
            windows: run.windows().unwrap(),
        };
        assert!(loader.load(&req).is_ok());
    }
}
