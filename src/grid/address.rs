//! Grid and pixel value types.
//!
//! A `GridAddress` names a slot on the table. Columns come in triplets: three
//! consecutive columns form one *stack group* that shares a single visual
//! column, and `column % 3` picks the small diagonal fan offset inside it.
//!
//! ```
//! use ccg_table::grid::{GridAddress, StackGroupKey};
//!
//! let addr = GridAddress::new(7, 1);
//! assert_eq!(addr.stack_group(), StackGroupKey::new(2, 1));
//! assert_eq!(addr.sub_offset(), 1);
//!
//! assert!(!GridAddress::UNPLACED.is_placed());
//! ```

use serde::{Deserialize, Serialize};

/// Columns per stack group.
pub const STACK_GROUP_SIZE: i32 = 3;

/// A discrete `(column, row)` slot on the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridAddress {
    pub column: i32,
    pub row: i32,
}

impl GridAddress {
    /// Sentinel for "not on the grid" (attachments, cards not yet positioned).
    pub const UNPLACED: GridAddress = GridAddress { column: -1, row: 0 };

    #[must_use]
    pub const fn new(column: i32, row: i32) -> Self {
        Self { column, row }
    }

    /// False for the unplaced sentinel. Layout passes skip unplaced cards.
    #[must_use]
    pub const fn is_placed(self) -> bool {
        self.column != -1
    }

    /// Stack group this slot belongs to.
    #[must_use]
    pub const fn stack_group(self) -> StackGroupKey {
        StackGroupKey {
            group: self.column / STACK_GROUP_SIZE,
            row: self.row,
        }
    }

    /// Position inside the stack group, in `0..3`.
    #[must_use]
    pub const fn sub_offset(self) -> i32 {
        self.column % STACK_GROUP_SIZE
    }

    /// First slot of the same stack group.
    #[must_use]
    pub const fn group_start(self) -> Self {
        Self {
            column: (self.column / STACK_GROUP_SIZE) * STACK_GROUP_SIZE,
            row: self.row,
        }
    }

    /// Same address with the row clamped into `[0, rows)`.
    #[must_use]
    pub fn clamp_row(self, rows: i32) -> Self {
        Self {
            column: self.column,
            row: self.row.clamp(0, (rows - 1).max(0)),
        }
    }

    /// Pull a placed address onto the grid: column at least 0, row inside
    /// `[0, rows)`. The unplaced sentinel passes through unchanged.
    #[must_use]
    pub fn clamp_to_grid(self, rows: i32) -> Self {
        if !self.is_placed() {
            return self;
        }
        Self {
            column: self.column.max(0),
            row: self.row,
        }
        .clamp_row(rows)
    }
}

impl Default for GridAddress {
    fn default() -> Self {
        Self::UNPLACED
    }
}

impl std::fmt::Display for GridAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.column, self.row)
    }
}

/// Key of the width table: `(column / 3, row)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StackGroupKey {
    pub group: i32,
    pub row: i32,
}

impl StackGroupKey {
    #[must_use]
    pub const fn new(group: i32, row: i32) -> Self {
        Self { group, row }
    }
}

/// A position in zone-local pixel space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Same point shifted by `(dx, dy)`.
    #[must_use]
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl std::ops::Add for PixelPoint {
    type Output = PixelPoint;

    fn add(self, rhs: PixelPoint) -> PixelPoint {
        self.offset(rhs.x, rhs.y)
    }
}
