//! Resubmission cooldown that counts down once per second

use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

pub struct Cooldown {
    seconds: u64,
    remaining: Arc<AtomicU64>,
    ticker: Mutex<Option<JoinHandle<()>>>,
}

impl Cooldown {
    pub fn new(seconds: u64) -> Self {
        Self {
            seconds,
            remaining: Arc::new(AtomicU64::new(0)),
            ticker: Mutex::new(None),
        }
    }

    pub fn seconds(&self) -> u64 {
        self.seconds
    }

    pub fn remaining(&self) -> u64 {
        self.remaining.load(Ordering::SeqCst)
    }

    pub fn is_active(&self) -> bool {
        self.remaining() > 0
    }

    /// Resets the countdown to the full duration and replaces any running
    /// ticker. Must be called from within a tokio runtime.
    pub fn restart(&self) {
        self.remaining.store(self.seconds, Ordering::SeqCst);

        let remaining = Arc::clone(&self.remaining);
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(1));
            // First tick completes immediately.
            interval.tick().await;

            loop {
                interval.tick().await;
                if decrement(&remaining) == 0 {
                    break;
                }
            }
            debug!("Cooldown elapsed");
        });

        if let Some(previous) = self.ticker.lock().replace(handle) {
            previous.abort();
        }
    }

    /// Stops the countdown where it is.
    pub fn cancel(&self) {
        if let Some(handle) = self.ticker.lock().take() {
            handle.abort();
        }
    }
}

impl Drop for Cooldown {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl std::fmt::Debug for Cooldown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cooldown")
            .field("seconds", &self.seconds)
            .field("remaining", &self.remaining())
            .finish()
    }
}

/// Saturating decrement, returns the new value.
fn decrement(remaining: &AtomicU64) -> u64 {
    let previous = remaining
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |value| {
            Some(value.saturating_sub(1))
        })
        .unwrap_or(0);
    previous.saturating_sub(1)
}
