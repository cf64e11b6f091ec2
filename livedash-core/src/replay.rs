//! Demo replay
//!
//! Feeds a recorded event log into the dashboard one line per period,
//! looping at end of file. The first external input stops replay for good.
//!
//! `frame_index` counts lines submitted in the current pass and `cycle`
//! counts completed passes, so an observer can capture one frame per line
//! and stop when `cycle` moves on.

use alloc::boxed::Box;
use heapless::Vec;

use livedash_protocol::{read_line, trim_line, LineError, LineRead, MAX_LINE_LEN};

use crate::traits::ReplaySource;

/// Lines tried per fire before giving up until the next period
pub const REPLAY_ATTEMPTS: usize = 8;

/// Replay counters for external synchronisation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ReplayStatus {
    pub active: bool,
    pub frame_index: u32,
    pub cycle: u32,
}

/// Demo replay session
pub struct DemoReplayEngine {
    /// Dropped (closing the recording) when replay stops
    source: Option<Box<dyn ReplaySource>>,
    period_ms: u32,
    last_fire_ms: u32,
    frame_index: u32,
    cycle: u32,
    line: Vec<u8, MAX_LINE_LEN>,
}

impl core::fmt::Debug for DemoReplayEngine {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DemoReplayEngine")
            .field("active", &self.is_active())
            .field("period_ms", &self.period_ms)
            .field("frame_index", &self.frame_index)
            .field("cycle", &self.cycle)
            .finish()
    }
}

impl Default for DemoReplayEngine {
    fn default() -> Self {
        Self::disabled()
    }
}

impl DemoReplayEngine {
    /// An engine that never fires
    pub const fn disabled() -> Self {
        Self {
            source: None,
            period_ms: 0,
            last_fire_ms: 0,
            frame_index: 0,
            cycle: 0,
            line: Vec::new(),
        }
    }

    /// Start replaying `source`; the first line fires one period after `now_ms`
    ///
    /// A zero period leaves the engine inactive.
    pub fn start(source: Box<dyn ReplaySource>, period_ms: u32, now_ms: u32) -> Self {
        let mut engine = Self::disabled();
        if period_ms == 0 {
            warn!("DEMO: period is 0, replay disabled");
            return engine;
        }
        engine.source = Some(source);
        engine.period_ms = period_ms;
        engine.last_fire_ms = now_ms;
        info!("DEMO: replay every {} ms", period_ms);
        engine
    }

    pub fn is_active(&self) -> bool {
        self.source.is_some()
    }

    pub fn status(&self) -> ReplayStatus {
        ReplayStatus {
            active: self.is_active(),
            frame_index: self.frame_index,
            cycle: self.cycle,
        }
    }

    /// Stop for good; counters keep their last values
    pub fn stop(&mut self, reason: &str) {
        if self.source.take().is_some() {
            self.line.clear();
            info!("DEMO: stopped ({})", reason);
        }
    }

    /// Fire if a period has elapsed
    ///
    /// Submits at most one non-blank line and returns whether it did.
    pub fn tick(&mut self, now_ms: u32, mut submit: impl FnMut(&str)) -> bool {
        let Some(source) = self.source.as_mut() else {
            return false;
        };
        if now_ms.wrapping_sub(self.last_fire_ms) < self.period_ms {
            return false;
        }
        self.last_fire_ms = now_ms;

        for _ in 0..REPLAY_ATTEMPTS {
            let read = match read_line(&mut **source, &mut self.line) {
                Ok(LineRead::Eof) => {
                    if source.rewind().is_err() {
                        warn!("DEMO: rewind failed");
                        self.stop("rewind failed");
                        return false;
                    }
                    match read_line(&mut **source, &mut self.line) {
                        // Nothing in the recording at all
                        Ok(LineRead::Eof) => return false,
                        other => {
                            self.cycle = self.cycle.wrapping_add(1);
                            self.frame_index = 0;
                            debug!("DEMO: cycle {}", self.cycle);
                            other
                        }
                    }
                }
                other => other,
            };

            if let Err(e) = read {
                warn!("DEMO: {}", e);
                continue;
            }
            let Ok(text) = core::str::from_utf8(&self.line) else {
                warn!("DEMO: {}", LineError::InvalidUtf8);
                continue;
            };
            let text = trim_line(text);
            if text.is_empty() {
                continue;
            }

            submit(text);
            self.frame_index = self.frame_index.wrapping_add(1);
            return true;
        }

        false
    }
}
