//! Sliding-window throttle for retry-prone auth actions.
//!
//! This is a UX guard, not a security boundary: state lives in process
//! memory and disappears with it, so the backing service must enforce the
//! real limit. Gating login retries and OTP resends here just avoids
//! hammering the network with requests that would be refused anyway.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;

/// Per-action attempt tracker with a caller-chosen window.
///
/// Keys are arbitrary action names (`"login"`, `"resend-otp"`). Construct
/// one instance per flow and share it by reference; the mutex keeps the
/// check-then-record step atomic per key if handlers ever run off the main
/// thread.
#[derive(Debug, Default)]
pub struct RateLimiter {
    attempts: Mutex<HashMap<String, Vec<u64>>>,
}

impl RateLimiter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check the window for `key` and record a new attempt when allowed.
    ///
    /// Attempts older than `window_ms` are pruned first. A denied check is
    /// not recorded, so polling this cannot extend the lockout.
    pub fn is_allowed(&self, key: &str, max_attempts: usize, window_ms: u64) -> bool {
        self.is_allowed_at(key, max_attempts, window_ms, now_millis())
    }

    fn is_allowed_at(&self, key: &str, max_attempts: usize, window_ms: u64, now: u64) -> bool {
        let mut attempts = self.attempts.lock().unwrap_or_else(PoisonError::into_inner);
        let recent = attempts.entry(key.to_string()).or_default();
        recent.retain(|&at| now.saturating_sub(at) < window_ms);

        if recent.len() >= max_attempts {
            debug!(key, max_attempts, "attempt denied by client-side throttle");
            return false;
        }

        recent.push(now);
        true
    }

    /// Forget all attempts for `key`, typically after the action succeeds.
    pub fn reset(&self, key: &str) {
        self.attempts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }

    /// Seconds until the oldest recorded attempt leaves the window and
    /// frees a slot. 0 when nothing is recorded or the window has passed.
    #[must_use]
    pub fn time_until_reset(&self, key: &str, window_ms: u64) -> u64 {
        self.time_until_reset_at(key, window_ms, now_millis())
    }

    fn time_until_reset_at(&self, key: &str, window_ms: u64, now: u64) -> u64 {
        let attempts = self.attempts.lock().unwrap_or_else(PoisonError::into_inner);
        let Some(oldest) = attempts
            .get(key)
            .and_then(|recent| recent.iter().min().copied())
        else {
            return 0;
        };
        (oldest + window_ms).saturating_sub(now).div_ceil(1000)
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
}
