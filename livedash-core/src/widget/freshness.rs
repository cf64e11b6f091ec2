//! Widget freshness tracking
//!
//! ```text
//!   Uninitialized --publish--> Fresh --tick (timeout)--> Stale
//!                                ^                         |
//!                                +---------publish---------+
//! ```
//!
//! A timeout of 0 disables staleness once a value has arrived. Timestamps
//! are wrapping millisecond counters.

#[cfg(feature = "serde")]
use serde::Serialize;

/// Freshness state of one widget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum FreshnessState {
    /// No value has ever been published
    Uninitialized,
    /// Last value is within its timeout
    Fresh,
    /// Last value is older than its timeout
    Stale,
}

/// Whether a widget is stale at `now_ms`
pub fn is_stale_at(has_value: bool, last_update_ms: u32, now_ms: u32, timeout_ms: u32) -> bool {
    if !has_value {
        return true;
    }
    timeout_ms > 0 && now_ms.wrapping_sub(last_update_ms) > timeout_ms
}

/// Per-widget freshness tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Freshness {
    state: FreshnessState,
    last_update_ms: u32,
    timeout_ms: u32,
}

impl Freshness {
    pub const fn new(timeout_ms: u32) -> Self {
        Self {
            state: FreshnessState::Uninitialized,
            last_update_ms: 0,
            timeout_ms,
        }
    }

    pub fn state(&self) -> FreshnessState {
        self.state
    }

    /// True while uninitialized or stale
    pub fn is_stale(&self) -> bool {
        self.state != FreshnessState::Fresh
    }

    pub fn has_value(&self) -> bool {
        self.state != FreshnessState::Uninitialized
    }

    pub fn last_update_ms(&self) -> Option<u32> {
        self.has_value().then_some(self.last_update_ms)
    }

    pub fn timeout_ms(&self) -> u32 {
        self.timeout_ms
    }

    /// Record a value arriving at `now_ms`
    pub fn mark_fresh(&mut self, now_ms: u32) {
        self.state = FreshnessState::Fresh;
        self.last_update_ms = now_ms;
    }

    /// Evaluate the timeout
    ///
    /// Returns true only on the Fresh -> Stale transition. Uninitialized
    /// widgets already show their placeholder, so they never report one.
    pub fn tick(&mut self, now_ms: u32) -> bool {
        if self.state != FreshnessState::Fresh {
            return false;
        }
        if is_stale_at(true, self.last_update_ms, now_ms, self.timeout_ms) {
            self.state = FreshnessState::Stale;
            return true;
        }
        false
    }
}
