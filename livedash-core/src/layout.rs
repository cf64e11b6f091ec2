//! Grid layout resolution
//!
//! The layout lists one tile identifier per cell, row-major. Cells sharing an
//! identifier merge into one tile, which must cover exactly its bounding
//! rectangle.
//!
//! ```text
//! cols = 3, rows = 2
//!   temp temp rates
//!   btn  btn  rates     -> temp [0..1]x[0..0], rates [2..2]x[0..1], btn [0..1]x[1..1]
//! ```

use heapless::Vec;

use crate::config::{ConfigError, Id, MAX_TILES};

#[cfg(feature = "serde")]
use serde::Serialize;

/// A merged tile region, inclusive cell bounds
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Tile {
    pub id: Id,
    pub min_col: u8,
    pub max_col: u8,
    pub min_row: u8,
    pub max_row: u8,
}

impl Tile {
    fn at(id: &Id, col: u8, row: u8) -> Self {
        Self {
            id: id.clone(),
            min_col: col,
            max_col: col,
            min_row: row,
            max_row: row,
        }
    }

    fn extend(&mut self, col: u8, row: u8) {
        self.min_col = self.min_col.min(col);
        self.max_col = self.max_col.max(col);
        self.min_row = self.min_row.min(row);
        self.max_row = self.max_row.max(row);
    }

    /// Width in cells
    pub fn col_span(&self) -> u8 {
        self.max_col - self.min_col + 1
    }

    /// Height in cells
    pub fn row_span(&self) -> u8 {
        self.max_row - self.min_row + 1
    }
}

/// Merge per-cell identifiers into rectangular tiles
///
/// Tiles are returned in first-seen order. `cells.len()` must equal
/// `cols * rows`; the validator checks this before calling.
pub fn resolve(cols: u8, rows: u8, cells: &[Id]) -> Result<Vec<Tile, MAX_TILES>, ConfigError> {
    let cols_usize = usize::from(cols);
    if cols_usize == 0 || cells.len() != cols_usize * usize::from(rows) {
        return Err(ConfigError::CapacityExceeded {
            field: "layout.tiles",
            max: MAX_TILES,
        });
    }

    // Pass 1: bounding rectangle per identifier
    let mut tiles: Vec<Tile, MAX_TILES> = Vec::new();
    for (index, id) in cells.iter().enumerate() {
        let col = (index % cols_usize) as u8;
        let row = (index / cols_usize) as u8;
        match tiles.iter_mut().find(|t| t.id == *id) {
            Some(tile) => tile.extend(col, row),
            None => tiles
                .push(Tile::at(id, col, row))
                .map_err(|_| ConfigError::CapacityExceeded {
                    field: "layout.tiles",
                    max: MAX_TILES,
                })?,
        }
    }

    // Pass 2: every cell inside each rectangle must carry the same id
    for tile in &tiles {
        for row in tile.min_row..=tile.max_row {
            for col in tile.min_col..=tile.max_col {
                let index = usize::from(row) * cols_usize + usize::from(col);
                if cells[index] != tile.id {
                    return Err(ConfigError::DuplicateOrNonRectangularTile {
                        tile_id: tile.id.clone(),
                    });
                }
            }
        }
    }

    Ok(tiles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ids(names: &[&str]) -> std::vec::Vec<Id> {
        names.iter().map(|n| Id::try_from(*n).unwrap()).collect()
    }

    #[test]
    fn test_merges_rectangles() {
        let cells = ids(&["temp", "temp", "rates", "btn", "btn", "rates"]);
        let tiles = resolve(3, 2, &cells).unwrap();
        assert_eq!(tiles.len(), 3);

        assert_eq!(tiles[0].id.as_str(), "temp");
        assert_eq!((tiles[0].min_col, tiles[0].max_col), (0, 1));
        assert_eq!((tiles[0].min_row, tiles[0].max_row), (0, 0));

        assert_eq!(tiles[1].id.as_str(), "rates");
        assert_eq!(tiles[1].col_span(), 1);
        assert_eq!(tiles[1].row_span(), 2);

        assert_eq!(tiles[2].id.as_str(), "btn");
        assert_eq!((tiles[2].min_row, tiles[2].max_row), (1, 1));
    }

    #[test]
    fn test_l_shape_rejected() {
        // a a
        // a b
        let cells = ids(&["a", "a", "a", "b"]);
        let err = resolve(2, 2, &cells).unwrap_err();
        assert_eq!(
            err,
            ConfigError::DuplicateOrNonRectangularTile {
                tile_id: Id::try_from("a").unwrap()
            }
        );
    }

    #[test]
    fn test_split_reuse_rejected() {
        // a b a
        let cells = ids(&["a", "b", "a"]);
        assert!(matches!(
            resolve(3, 1, &cells),
            Err(ConfigError::DuplicateOrNonRectangularTile { .. })
        ));
    }

    #[test]
    fn test_length_mismatch() {
        let cells = ids(&["a", "b", "c"]);
        assert!(matches!(
            resolve(2, 2, &cells),
            Err(ConfigError::CapacityExceeded { .. })
        ));
    }

    #[test]
    fn test_single_cell_grid() {
        let cells = ids(&["only"]);
        let tiles = resolve(1, 1, &cells).unwrap();
        assert_eq!(tiles.len(), 1);
        assert_eq!(tiles[0].col_span(), 1);
    }

    proptest! {
        #[test]
        fn prop_resolve_is_idempotent(
            cols in 1u8..=6,
            rows in 1u8..=4,
            seed in proptest::collection::vec(0u8..4, 24),
        ) {
            let n = usize::from(cols) * usize::from(rows);
            let cells: std::vec::Vec<Id> = seed[..n]
                .iter()
                .map(|v| Id::try_from(std::format!("t{}", v).as_str()).unwrap())
                .collect();

            let first = resolve(cols, rows, &cells);
            let second = resolve(cols, rows, &cells);
            prop_assert_eq!(&first, &second);

            if let Ok(tiles) = first {
                // Tiles never overlap and cover the whole grid
                let area: usize = tiles
                    .iter()
                    .map(|t| usize::from(t.col_span()) * usize::from(t.row_span()))
                    .sum();
                prop_assert_eq!(area, n);
            }
        }
    }
}
