// SPDX-License-Identifier: MPL-2.0
//! Single/double tap resolution from tap timestamps.
//!
//! A tap arriving more than the duplicate guard but no more than the window
//! after the previous one is a double tap and fires immediately. Any other
//! tap arms a deferred single tap that [`TapResolver::poll`] releases once
//! the window has passed without a second tap. Taps inside the guard are
//! duplicate events for one physical tap; they only re-arm the deadline.

use crate::config::GestureConfig;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapOutcome {
    /// Second tap of a pair: act now.
    Double,
    /// A single tap is pending until the window closes.
    Armed,
}

#[derive(Debug, Clone)]
pub struct TapResolver {
    window: Duration,
    guard: Duration,
    last_tap: Option<Instant>,
    pending: bool,
}

impl Default for TapResolver {
    fn default() -> Self {
        Self::from(&GestureConfig::default())
    }
}

impl From<&GestureConfig> for TapResolver {
    fn from(config: &GestureConfig) -> Self {
        Self::new(
            Duration::from_millis(config.double_tap_window_ms),
            Duration::from_millis(config.duplicate_tap_guard_ms),
        )
    }
}

impl TapResolver {
    #[must_use]
    pub fn new(window: Duration, guard: Duration) -> Self {
        Self {
            window,
            guard,
            last_tap: None,
            pending: false,
        }
    }

    #[must_use]
    pub fn window(&self) -> Duration {
        self.window
    }

    /// True while a single tap waits for its window to close.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Instant after which [`Self::poll`] fires the pending single tap.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.last_tap.filter(|_| self.pending).map(|t| t + self.window)
    }

    /// Registers a tap at `now`.
    ///
    /// Callers should [`poll`](Self::poll) first so a single tap whose window
    /// already closed is not swallowed by the next one.
    pub fn tap(&mut self, now: Instant) -> TapOutcome {
        if let Some(last) = self.last_tap {
            let elapsed = now.saturating_duration_since(last);
            if elapsed > self.guard && elapsed <= self.window {
                self.last_tap = None;
                self.pending = false;
                return TapOutcome::Double;
            }
        }
        self.last_tap = Some(now);
        self.pending = true;
        TapOutcome::Armed
    }

    /// Returns true exactly once when a pending single tap is due.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.last_tap {
            Some(last) if self.pending && now.saturating_duration_since(last) > self.window => {
                self.pending = false;
                self.last_tap = None;
                true
            }
            _ => false,
        }
    }

    pub fn cancel(&mut self) {
        self.pending = false;
        self.last_tap = None;
    }
}
