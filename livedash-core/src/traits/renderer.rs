//! Renderer capability
//!
//! The dashboard never draws anything itself. It hands the compiled model to
//! the renderer once, then reports each widget change as a small view value.

use crate::config::{Color, ConfigError, DashboardModel, Id, Splash, Text};

#[cfg(feature = "serde")]
use serde::Serialize;

/// What a gauge currently shows
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct GaugeView {
    /// Position in `config.gauges`
    pub index: usize,
    pub id: Id,
    /// Arc position, already clamped to `[min, max]`
    pub value: i32,
    /// Value text, or the stale placeholder
    pub text: Text,
    /// Indicator colour
    pub color: Color,
    pub stale: bool,
}

/// What a rate row currently shows
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct RateRowView {
    /// Position across all rate lists, in config order
    pub index: usize,
    pub id: Id,
    /// Bar fill, 0..=1000
    pub permille: u16,
    pub text: Text,
    pub color: Color,
    pub stale: bool,
}

/// A single widget state change
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum WidgetChange {
    Gauge(GaugeView),
    RateRow(RateRowView),
}

impl WidgetChange {
    /// Identifier of the changed widget
    pub fn id(&self) -> &str {
        match self {
            WidgetChange::Gauge(view) => &view.id,
            WidgetChange::RateRow(view) => &view.id,
        }
    }

    pub fn is_stale(&self) -> bool {
        match self {
            WidgetChange::Gauge(view) => view.stale,
            WidgetChange::RateRow(view) => view.stale,
        }
    }
}

/// Trait for the screen the dashboard is drawn on
pub trait Renderer {
    /// Replace the screen with a configuration error message
    fn show_config_error(&mut self, error: &ConfigError);

    /// Show the splash image on `background`
    ///
    /// Returns false if the image could not be shown; the intro is skipped.
    fn show_splash(&mut self, splash: &Splash, background: Color) -> bool;

    /// Build the dashboard screen from a compiled model
    ///
    /// Widgets start out showing their stale placeholder.
    fn build(&mut self, model: &DashboardModel);

    /// Apply one widget change
    fn update(&mut self, change: &WidgetChange);
}
