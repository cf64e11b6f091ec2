//! Arc gauge

use crate::config::{Color, GaugeConfig, Stage, Text};
use crate::traits::GaugeView;
use livedash_protocol::truncated;

use super::freshness::{Freshness, FreshnessState};

/// Indicator colour for `value`
///
/// `stages` must be sorted by descending threshold. The first stage whose
/// threshold is at or below `value` wins; below every threshold the lowest
/// stage applies. With no stages the accent colour is used.
pub fn select_stage_color(stages: &[Stage], accent: Color, value: i32) -> Color {
    match stages.iter().find(|s| s.threshold <= value) {
        Some(stage) => stage.color,
        None => stages.last().map_or(accent, |s| s.color),
    }
}

/// Live state of one arc gauge
#[derive(Debug, Clone)]
pub struct Gauge {
    config: GaugeConfig,
    /// Last published value, clamped
    value: i32,
    text: Text,
    freshness: Freshness,
}

impl Gauge {
    pub fn new(config: GaugeConfig) -> Self {
        Self {
            value: config.min,
            text: Text::new(),
            freshness: Freshness::new(config.stale_timeout_ms),
            config,
        }
    }

    pub fn id(&self) -> &str {
        &self.config.id
    }

    pub fn config(&self) -> &GaugeConfig {
        &self.config
    }

    /// Displayed value, clamped to `[min, max]`
    pub fn value(&self) -> i32 {
        self.value
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn freshness(&self) -> &Freshness {
        &self.freshness
    }

    pub fn state(&self) -> FreshnessState {
        self.freshness.state()
    }

    /// Apply a new value
    pub fn publish(&mut self, value: i32, text: &str, now_ms: u32) {
        self.value = value.clamp(self.config.min, self.config.max);
        self.text = truncated(text);
        self.freshness.mark_fresh(now_ms);
    }

    /// Publish the configured initial value, if any
    pub fn publish_initial(&mut self, now_ms: u32) -> bool {
        if !self.config.publishes_initial() {
            return false;
        }
        let value = self.config.initial.unwrap_or(self.config.min);
        let text = self.config.initial_text.clone().unwrap_or_default();
        self.publish(value, &text, now_ms);
        true
    }

    /// Returns true when the gauge just went stale
    pub fn tick(&mut self, now_ms: u32) -> bool {
        self.freshness.tick(now_ms)
    }

    pub fn indicator_color(&self) -> Color {
        select_stage_color(&self.config.stages, self.config.accent, self.value)
    }

    /// Current display state
    pub fn view(&self, index: usize) -> GaugeView {
        if self.freshness.is_stale() {
            GaugeView {
                index,
                id: self.config.id.clone(),
                value: self.config.min,
                text: self.config.stale_text.clone(),
                color: Color::STALE,
                stale: true,
            }
        } else {
            GaugeView {
                index,
                id: self.config.id.clone(),
                value: self.value,
                text: self.text.clone(),
                color: self.indicator_color(),
                stale: false,
            }
        }
    }
}
