//! Startup splash phase
//!
//! The splash is held for a fixed duration before the dashboard appears.
//! Rather than sleeping, the caller pumps the phase from its own loop.

/// A running splash hold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IntroPhase {
    started_ms: u32,
    duration_ms: u32,
}

impl IntroPhase {
    pub fn new(now_ms: u32, duration_ms: u32) -> Self {
        Self {
            started_ms: now_ms,
            duration_ms,
        }
    }

    /// Returns true while the splash should stay up
    pub fn pump(&mut self, now_ms: u32) -> bool {
        now_ms.wrapping_sub(self.started_ms) < self.duration_ms
    }

    pub fn remaining_ms(&self, now_ms: u32) -> u32 {
        self.duration_ms
            .saturating_sub(now_ms.wrapping_sub(self.started_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pump_until_deadline() {
        let mut intro = IntroPhase::new(1000, 500);
        assert!(intro.pump(1000));
        assert!(intro.pump(1499));
        assert_eq!(intro.remaining_ms(1200), 300);
        assert!(!intro.pump(1500));
        assert_eq!(intro.remaining_ms(2000), 0);
    }
}
