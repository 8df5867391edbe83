//! Row and column insertion geometry.
//!
//! A floating tile enters a line from one edge and pushes every tile in
//! that line one step along; the tile at the far edge falls out.
//!
//! | direction | line   | enters at      | falls out at   |
//! |-----------|--------|----------------|----------------|
//! | 0         | column | top (y = 0)    | bottom         |
//! | 1         | row    | right edge     | left (x = 0)   |
//! | 2         | column | bottom         | top (y = 0)    |
//! | 3         | row    | left (x = 0)   | right edge     |

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Coord, GameError};

/// A requested insertion: which edge to push from and which line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Insertion {
    /// Push direction, `0..=3` (see the module table).
    pub direction: u8,
    /// Column index for directions 0 and 2, row index for 1 and 3.
    pub line: usize,
}

impl Insertion {
    #[must_use]
    pub const fn new(direction: u8, line: usize) -> Self {
        Self { direction, line }
    }

    /// Push down a column from the top.
    #[must_use]
    pub const fn from_top(column: usize) -> Self {
        Self::new(0, column)
    }

    /// Push left along a row from the right edge.
    #[must_use]
    pub const fn from_right(row: usize) -> Self {
        Self::new(1, row)
    }

    /// Push up a column from the bottom.
    #[must_use]
    pub const fn from_bottom(column: usize) -> Self {
        Self::new(2, column)
    }

    /// Push right along a row from the left edge.
    #[must_use]
    pub const fn from_left(row: usize) -> Self {
        Self::new(3, row)
    }

    /// Even directions push a column, odd ones a row.
    #[must_use]
    pub const fn is_column(self) -> bool {
        self.direction % 2 == 0
    }

    /// Check the direction and line against a `width` × `height` board.
    pub fn validate(self, width: usize, height: usize) -> Result<(), GameError> {
        if self.direction > 3 {
            return Err(GameError::InvalidDirection(self.direction));
        }
        let limit = if self.is_column() { width } else { height };
        if self.line >= limit {
            return Err(GameError::LineOutOfBounds {
                line: self.line,
                limit,
            });
        }
        Ok(())
    }

    /// Cells of the line ordered from the entry edge to the exit edge.
    ///
    /// Call [`Insertion::validate`] first.
    #[must_use]
    pub fn cells(self, width: usize, height: usize) -> SmallVec<[Coord; 16]> {
        let line = self.line;
        match self.direction {
            0 => (0..height).map(|y| Coord::new(line, y)).collect(),
            1 => (0..width).rev().map(|x| Coord::new(x, line)).collect(),
            2 => (0..height).rev().map(|y| Coord::new(line, y)).collect(),
            _ => (0..width).map(|x| Coord::new(x, line)).collect(),
        }
    }

    /// Cell the new tile lands on.
    #[must_use]
    pub fn entry(self, width: usize, height: usize) -> Coord {
        self.cells(width, height)[0]
    }

    /// Cell whose tile is pushed off the board.
    #[must_use]
    pub fn exit(self, width: usize, height: usize) -> Coord {
        let cells = self.cells(width, height);
        cells[cells.len() - 1]
    }
}

/// Which lines accept an insertion right now.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertableLines {
    /// One flag per column.
    pub columns: Vec<bool>,
    /// One flag per row.
    pub rows: Vec<bool>,
}

impl InsertableLines {
    /// Whether any line at all accepts an insertion.
    #[must_use]
    pub fn any(&self) -> bool {
        self.columns.iter().chain(&self.rows).any(|&open| open)
    }

    /// Whether the line targeted by `insertion` is open.
    #[must_use]
    pub fn allows(&self, insertion: Insertion) -> bool {
        let lines = if insertion.is_column() {
            &self.columns
        } else {
            &self.rows
        };
        lines.get(insertion.line).copied().unwrap_or(false)
    }

    /// Every legal insertion (both push senses per open line).
    #[must_use]
    pub fn insertions(&self) -> Vec<Insertion> {
        let columns = self
            .columns
            .iter()
            .enumerate()
            .filter(|(_, &open)| open)
            .flat_map(|(x, _)| [Insertion::from_top(x), Insertion::from_bottom(x)]);
        let rows = self
            .rows
            .iter()
            .enumerate()
            .filter(|(_, &open)| open)
            .flat_map(|(y, _)| [Insertion::from_right(y), Insertion::from_left(y)]);
        columns.chain(rows).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_and_exit_per_direction() {
        let (w, h) = (4, 3);

        assert_eq!(Insertion::from_top(1).entry(w, h), Coord::new(1, 0));
        assert_eq!(Insertion::from_top(1).exit(w, h), Coord::new(1, 2));

        assert_eq!(Insertion::from_right(2).entry(w, h), Coord::new(3, 2));
        assert_eq!(Insertion::from_right(2).exit(w, h), Coord::new(0, 2));

        assert_eq!(Insertion::from_bottom(0).entry(w, h), Coord::new(0, 2));
        assert_eq!(Insertion::from_bottom(0).exit(w, h), Coord::new(0, 0));

        assert_eq!(Insertion::from_left(0).entry(w, h), Coord::new(0, 0));
        assert_eq!(Insertion::from_left(0).exit(w, h), Coord::new(3, 0));
    }

    #[test]
    fn test_validate_bounds() {
        assert_eq!(Insertion::new(4, 0).validate(3, 3), Err(GameError::InvalidDirection(4)));
        assert_eq!(
            Insertion::from_top(3).validate(3, 5),
            Err(GameError::LineOutOfBounds { line: 3, limit: 3 })
        );
        assert_eq!(
            Insertion::from_left(5).validate(3, 5),
            Err(GameError::LineOutOfBounds { line: 5, limit: 5 })
        );
        assert!(Insertion::from_left(4).validate(3, 5).is_ok());
    }

    #[test]
    fn test_insertable_lines_queries() {
        let lines = InsertableLines {
            columns: vec![false, true],
            rows: vec![false, false, false],
        };

        assert!(lines.any());
        assert!(lines.allows(Insertion::from_bottom(1)));
        assert!(!lines.allows(Insertion::from_top(0)));
        assert!(!lines.allows(Insertion::from_left(0)));
        assert_eq!(
            lines.insertions(),
            vec![Insertion::from_top(1), Insertion::from_bottom(1)]
        );

        let closed = InsertableLines {
            columns: vec![false],
            rows: vec![false],
        };
        assert!(!closed.any());
    }
}
