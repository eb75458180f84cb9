//! Sprite-atlas addressing
//!
//! Every sprite lives in one shared sheet laid out as a fixed grid. A cell is
//! shown by shifting the sheet, so offsets are negative.

use serde::{Deserialize, Serialize};

pub const DEFAULT_CELL_WIDTH: u32 = 40;
pub const DEFAULT_CELL_HEIGHT: u32 = 30;
pub const DEFAULT_COLUMNS: u32 = 10;
/// Largest accepted sprite cell edge, in pixels
pub const MAX_CELL_SIZE: u32 = 4096;

/// Layout of the shared sprite sheet
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtlasGrid {
    pub cell_width: u32,
    pub cell_height: u32,
    pub columns: u32,
}

impl Default for AtlasGrid {
    fn default() -> Self {
        Self {
            cell_width: DEFAULT_CELL_WIDTH,
            cell_height: DEFAULT_CELL_HEIGHT,
            columns: DEFAULT_COLUMNS,
        }
    }
}

impl AtlasGrid {
    pub fn new(cell_width: u32, cell_height: u32, columns: u32) -> Self {
        Self {
            cell_width,
            cell_height,
            columns,
        }
    }

    /// A grid is usable when it has at least one column and non-empty cells.
    pub fn is_valid(&self) -> bool {
        self.columns > 0 && self.cell_width > 0 && self.cell_height > 0
    }

    /// (column, row) of the sprite at catalog position `index`
    pub fn cell_of(&self, index: usize) -> (usize, usize) {
        let columns = self.columns.max(1) as usize;
        (index % columns, index / columns)
    }

    /// Background shift that brings the sprite at `index` into view.
    ///
    /// Shifts past `i32::MIN` saturate there; they never wrap positive.
    pub fn offset_for(&self, index: usize) -> AtlasOffset {
        let (col, row) = self.cell_of(index);
        AtlasOffset {
            x: shift(col, self.cell_width),
            y: shift(row, self.cell_height),
        }
    }
}

fn shift(cells: usize, cell_size: u32) -> i32 {
    let pixels = i64::try_from(cells)
        .unwrap_or(i64::MAX)
        .saturating_mul(i64::from(cell_size));
    i32::try_from(-pixels).unwrap_or(i32::MIN)
}

/// Pixel shift into the sprite sheet
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AtlasOffset {
    pub x: i32,
    pub y: i32,
}

impl AtlasOffset {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// CSS `background-position` form, e.g. `-40px -30px`
    pub fn background_position(&self) -> String {
        format!("{}px {}px", self.x, self.y)
    }
}

impl std::fmt::Display for AtlasOffset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_matches_grid_formula() {
        let grid = AtlasGrid::new(40, 30, 7);
        for i in 0..100usize {
            let expected = AtlasOffset::new(-((i % 7) as i32) * 40, -((i / 7) as i32) * 30);
            assert_eq!(grid.offset_for(i), expected, "index {i}");
        }
    }

    #[test]
    fn test_huge_offsets_saturate_negative() {
        let tall = AtlasGrid::new(64, 50_000, 1);
        assert_eq!(tall.offset_for(100_000), AtlasOffset::new(0, i32::MIN));

        let wide = AtlasGrid::new(u32::MAX, 30, 4);
        assert_eq!(wide.offset_for(1), AtlasOffset::new(i32::MIN, 0));
        assert_eq!(wide.offset_for(4), AtlasOffset::new(0, -30));
    }

    #[test]
    fn test_single_column_stacks_vertically() {
        let grid = AtlasGrid::new(50, 50, 1);
        assert_eq!(grid.offset_for(0), AtlasOffset::new(0, 0));
        assert_eq!(grid.offset_for(1), AtlasOffset::new(0, -50));
        assert_eq!(grid.offset_for(4), AtlasOffset::new(0, -200));
    }

    #[test]
    fn test_row_wraps_after_last_column() {
        let grid = AtlasGrid::new(10, 20, 3);
        assert_eq!(grid.cell_of(2), (2, 0));
        assert_eq!(grid.cell_of(3), (0, 1));
        assert_eq!(grid.offset_for(3), AtlasOffset::new(0, -20));
        assert_eq!(grid.offset_for(5), AtlasOffset::new(-20, -20));
    }

    #[test]
    fn test_background_position() {
        assert_eq!(AtlasOffset::new(0, 0).background_position(), "0px 0px");
        assert_eq!(
            AtlasOffset::new(-40, -30).background_position(),
            "-40px -30px"
        );
    }

    #[test]
    fn test_grid_validity() {
        assert!(AtlasGrid::default().is_valid());
        assert!(!AtlasGrid::new(40, 30, 0).is_valid());
        assert!(!AtlasGrid::new(0, 30, 4).is_valid());
        assert!(!AtlasGrid::new(40, 0, 4).is_valid());
    }
}
