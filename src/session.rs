//! Periodic session revalidation
//!
//! The identity provider is an external collaborator; the core performs no
//! authorization checks itself. What it does own is the schedule: a
//! background task that re-runs the caller's session check periodically and
//! stops deterministically when its owner goes away, so tests never race a
//! free-running interval.

use std::sync::mpsc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Default interval between session rechecks
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(30 * 60);

/// A cancellable scheduled task that re-runs a session check
///
/// The callback runs on a dedicated thread once per interval. Dropping the
/// refresher (or calling [`SessionRefresher::stop`]) wakes the thread
/// immediately and joins it; no further callbacks run after that.
pub struct SessionRefresher {
    stop: Option<mpsc::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl SessionRefresher {
    /// Starts the refresh loop with the given interval
    pub fn start<F>(interval: Duration, mut refresh: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        let (stop, stop_rx) = mpsc::channel::<()>();

        let handle = thread::Builder::new()
            .name("mealplan-session".to_string())
            .spawn(move || loop {
                match stop_rx.recv_timeout(interval) {
                    Err(mpsc::RecvTimeoutError::Timeout) => refresh(),
                    // Stop signal, or the owner dropped the sender
                    Ok(()) | Err(mpsc::RecvTimeoutError::Disconnected) => break,
                }
            })
            .ok();

        Self {
            stop: Some(stop),
            handle,
        }
    }

    /// Starts the refresh loop with the default 30-minute interval
    pub fn start_default<F>(refresh: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        Self::start(DEFAULT_REFRESH_INTERVAL, refresh)
    }

    /// Stops the loop and waits for the thread to exit
    pub fn stop(mut self) {
        self.stop_inner();
    }

    fn stop_inner(&mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for SessionRefresher {
    fn drop(&mut self) {
        self.stop_inner();
    }
}
