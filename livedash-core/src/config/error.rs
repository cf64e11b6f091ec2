//! Configuration errors
//!
//! Every variant is fatal to startup. The `Display` text is what the operator
//! sees on the error screen.

use super::types::Id;

/// Configuration validation error
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Document is not valid JSON
    Syntax { line: usize, column: usize },
    /// Required field absent
    MissingField { field: &'static str },
    /// Field present with the wrong JSON type (or an unparsable colour)
    WrongType { field: &'static str },
    /// Field value outside its allowed range
    OutOfRange { field: &'static str },
    /// Collection larger than its fixed capacity
    CapacityExceeded { field: &'static str, max: usize },
    /// Tile identifier reused in cells that do not form one rectangle
    DuplicateOrNonRectangularTile { tile_id: Id },
    /// Widget names a tile that is not in the layout
    UnresolvedTileReference { field: &'static str, tile_id: Id },
    /// Gauge or rate row identifier used twice
    DuplicateIdentifier { id: Id },
}

impl ConfigError {
    /// Short operator hint shown under the message
    pub fn hint(&self) -> &'static str {
        match self {
            ConfigError::Syntax { .. } => "check config.json for a JSON syntax error",
            ConfigError::MissingField { .. } | ConfigError::WrongType { .. } => {
                "check required fields and their types"
            }
            ConfigError::OutOfRange { .. } | ConfigError::CapacityExceeded { .. } => {
                "check limits in config.json"
            }
            ConfigError::DuplicateOrNonRectangularTile { .. } => {
                "each tile id must cover one rectangle of cells"
            }
            ConfigError::UnresolvedTileReference { .. } => "tile_id must appear in layout.tiles",
            ConfigError::DuplicateIdentifier { .. } => "gauge and row ids must be unique",
        }
    }
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::Syntax { line, column } => {
                write!(f, "JSON parse error at line {} column {}", line, column)
            }
            ConfigError::MissingField { field } => write!(f, "missing field '{}'", field),
            ConfigError::WrongType { field } => write!(f, "wrong type for '{}'", field),
            ConfigError::OutOfRange { field } => write!(f, "'{}' out of range", field),
            ConfigError::CapacityExceeded { field, max } => {
                write!(f, "too many entries in '{}' (max {})", field, max)
            }
            ConfigError::DuplicateOrNonRectangularTile { tile_id } => {
                write!(f, "tile '{}' reused or not rectangular", tile_id)
            }
            ConfigError::UnresolvedTileReference { field, tile_id } => {
                write!(f, "{} references unknown tile '{}'", field, tile_id)
            }
            ConfigError::DuplicateIdentifier { id } => write!(f, "duplicate id '{}'", id),
        }
    }
}
