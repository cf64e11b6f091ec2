//! Capability traits
//!
//! These traits define the seams between the dashboard logic and whatever
//! draws the screen or supplies the demo recording.

pub mod renderer;
pub mod source;

pub use renderer::{GaugeView, RateRowView, Renderer, WidgetChange};
pub use source::{ReplaySource, SliceSource, SourceError};
