//! Process-wide sliding-window upload limiter.
//!
//! The only state shared across concurrent runs. Injected into the gate as
//! `Arc<UploadRateLimiter>`; every read, eviction and append happens under
//! one mutex.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use super::IngestError;

/// Bounds accepted uploads to `capacity` per trailing `window`.
#[derive(Debug)]
pub struct UploadRateLimiter {
    accepted: Mutex<VecDeque<Instant>>,
    capacity: usize,
    window: Duration,
}

impl UploadRateLimiter {
    pub fn new(capacity: usize, window: Duration) -> Self {
        Self {
            accepted: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
            window,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Admit one upload now, or reject with `RateLimitExceeded`.
    pub fn check(&self) -> Result<(), IngestError> {
        self.check_at(Instant::now())
    }

    /// Admit one upload at `now`. Timestamps whose age is at least the window
    /// are evicted from the front before counting.
    pub fn check_at(&self, now: Instant) -> Result<(), IngestError> {
        let mut accepted = self.accepted.lock().map_err(|_| IngestError::LockPoisoned)?;

        while let Some(oldest) = accepted.front() {
            if now.saturating_duration_since(*oldest) >= self.window {
                accepted.pop_front();
            } else {
                break;
            }
        }

        if accepted.len() >= self.capacity {
            let retry_after = accepted
                .front()
                .map(|oldest| self.window.saturating_sub(now.saturating_duration_since(*oldest)))
                .unwrap_or(self.window)
                .as_secs()
                .max(1);
            return Err(IngestError::RateLimitExceeded { retry_after });
        }

        accepted.push_back(now);
        Ok(())
    }

    /// Number of accepted uploads currently inside the window.
    pub fn in_window(&self) -> usize {
        self.accepted.lock().map(|a| a.len()).unwrap_or(0)
    }
}
