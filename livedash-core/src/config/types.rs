//! Dashboard configuration model
//!
//! Fixed-capacity representation of a validated `config.json`. Every value
//! here has already been checked by the validator; nothing downstream
//! re-validates.

use heapless::{String, Vec};

use super::color::Color;
use crate::layout::Tile;

#[cfg(feature = "serde")]
use serde::Serialize;

pub use livedash_protocol::{MAX_ID_LEN, MAX_TEXT_LEN};

/// Maximum unique tiles (and grid cells)
pub const MAX_TILES: usize = 24;

/// Maximum gauges per dashboard
pub const MAX_GAUGES: usize = 24;

/// Maximum buttons per dashboard
pub const MAX_BUTTONS: usize = 24;

/// Maximum rate rows across all lists
pub const MAX_RATE_ROWS: usize = 24;

/// Maximum rows in one rate list
pub const MAX_RATE_ROWS_PER_LIST: usize = 6;

/// Maximum colour stages per gauge
pub const MAX_STAGES: usize = 8;

/// Robot name length
pub const NAME_LEN: usize = 32;

/// Tile and gauge title length
pub const TITLE_LEN: usize = 32;

/// Rate row label length
pub const LABEL_LEN: usize = 16;

/// Text tile body length
pub const BODY_LEN: usize = 256;

/// Splash image path length
pub const PATH_LEN: usize = 64;

/// Placeholder shown by a stale widget unless configured otherwise
pub const DEFAULT_STALE_TEXT: &str = "--";

/// Button height when not configured
pub const DEFAULT_BUTTON_HEIGHT: u16 = 95;

/// Widget, tile, or action identifier
pub type Id = String<MAX_ID_LEN>;

/// Short display text (value text, labels, placeholders)
pub type Text = String<MAX_TEXT_LEN>;

/// Validated dashboard configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct DashboardConfig {
    /// Robot name shown to the operator
    pub robot_name: String<NAME_LEN>,
    /// UI options
    pub ui: UiOptions,
    /// Grid layout
    pub layout: LayoutConfig,
    /// Arc gauges
    pub gauges: Vec<GaugeConfig, MAX_GAUGES>,
    /// Action buttons
    pub buttons: Vec<ButtonConfig, MAX_BUTTONS>,
    /// Rate (Hz) lists
    pub rate_lists: Vec<RateListConfig, MAX_TILES>,
    /// Static text tiles
    pub text_tiles: Vec<TextTileConfig, MAX_TILES>,
}

impl DashboardConfig {
    /// Number of rate rows across all lists
    pub fn rate_row_count(&self) -> usize {
        self.rate_lists.iter().map(|l| l.rows.len()).sum()
    }
}

/// UI options
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct UiOptions {
    /// Dark theme requested
    pub dark_theme: bool,
    /// Default stale timeout in milliseconds (0 = never stale)
    pub stale_timeout_ms: u32,
    /// Screen background
    pub background: Color,
    /// Optional splash shown before the dashboard
    pub splash: Option<Splash>,
}

/// Splash image shown once at startup
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Splash {
    /// Image path on the display's storage
    pub path: String<PATH_LEN>,
    /// How long to hold the splash (0 = skip)
    pub duration_ms: u32,
}

/// Grid layout: `cols × rows` cells, each naming its tile
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct LayoutConfig {
    pub cols: u8,
    pub rows: u8,
    /// Tile identifier per cell, row-major
    pub cells: Vec<Id, MAX_TILES>,
}

/// Colour stage: applies when value >= threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Stage {
    pub threshold: i32,
    pub color: Color,
}

/// Arc gauge configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct GaugeConfig {
    pub id: Id,
    pub tile_id: Id,
    pub title: String<TITLE_LEN>,
    pub min: i32,
    pub max: i32,
    /// Indicator colour when no stages are configured
    pub accent: Color,
    /// Value published when the dashboard is presented
    pub initial: Option<i32>,
    /// Text published when the dashboard is presented
    pub initial_text: Option<Text>,
    pub min_label: Option<Text>,
    pub max_label: Option<Text>,
    /// Placeholder shown while stale
    pub stale_text: Text,
    /// Stale timeout in milliseconds (0 = never stale)
    pub stale_timeout_ms: u32,
    /// Colour stages, sorted by descending threshold
    pub stages: Vec<Stage, MAX_STAGES>,
}

impl GaugeConfig {
    /// Whether an initial value is published at startup
    pub fn publishes_initial(&self) -> bool {
        self.initial.is_some() || self.initial_text.is_some()
    }
}

/// Action button configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ButtonConfig {
    pub tile_id: Id,
    pub tile_title: String<TITLE_LEN>,
    pub label: String<TITLE_LEN>,
    pub color: Color,
    /// Action identifier dispatched on press or matching command line
    pub action_id: Id,
    pub height: u16,
}

/// Rate list: a titled tile of rate rows
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct RateListConfig {
    pub tile_id: Id,
    pub title: String<TITLE_LEN>,
    pub rows: Vec<RateRowConfig, MAX_RATE_ROWS_PER_LIST>,
}

/// One rate row
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct RateRowConfig {
    pub id: Id,
    pub label: String<LABEL_LEN>,
    /// Target rate (> 0)
    pub target: i32,
}

/// Static text tile
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct TextTileConfig {
    pub tile_id: Id,
    pub title: String<TITLE_LEN>,
    pub subtitle: Option<String<TITLE_LEN>>,
    pub body: String<BODY_LEN>,
}

/// A compiled dashboard: validated config plus resolved tiles
///
/// This is what the renderer builds its screen from.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct DashboardModel {
    pub config: DashboardConfig,
    pub tiles: Vec<Tile, MAX_TILES>,
}

impl DashboardModel {
    /// Look up a resolved tile by identifier
    pub fn tile(&self, id: &str) -> Option<&Tile> {
        self.tiles.iter().find(|t| t.id.as_str() == id)
    }
}
