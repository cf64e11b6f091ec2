//! Live widgets
//!
//! Gauges and rate rows hold the current value of one telemetry channel plus
//! its freshness. They compute what should be displayed; drawing is left to
//! the renderer.

pub mod freshness;
pub mod gauge;
pub mod rate_row;

pub use freshness::{is_stale_at, Freshness, FreshnessState};
pub use gauge::{select_stage_color, Gauge};
pub use rate_row::{band_color, ratio_permille, RateRow};
