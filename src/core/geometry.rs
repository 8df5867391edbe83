//! Grid geometry: coordinates, cardinal directions, orientations and
//! connectivity masks.
//!
//! `x` counts columns from the left edge, `y` counts rows from the top
//! edge. North is `y - 1`.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::ops::Index;

use super::error::GameError;

/// A cell position on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    /// Column, 0-based from the left.
    pub x: usize,
    /// Row, 0-based from the top.
    pub y: usize,
}

impl Coord {
    /// Create a coordinate.
    #[must_use]
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Check whether this coordinate lies on a `width` × `height` grid.
    #[must_use]
    pub const fn in_bounds(self, width: usize, height: usize) -> bool {
        self.x < width && self.y < height
    }

    /// The neighbouring cell in `direction`, if it is on the grid.
    #[must_use]
    pub fn step(self, direction: Direction, width: usize, height: usize) -> Option<Coord> {
        let next = match direction {
            Direction::North => Coord::new(self.x, self.y.checked_sub(1)?),
            Direction::East => Coord::new(self.x + 1, self.y),
            Direction::South => Coord::new(self.x, self.y + 1),
            Direction::West => Coord::new(self.x.checked_sub(1)?, self.y),
        };
        next.in_bounds(width, height).then_some(next)
    }

    /// Cells within `radius` of this one (a square), clipped to the grid.
    ///
    /// Radius 1 yields the 3×3 block centred here.
    #[must_use]
    pub fn neighbourhood(self, radius: usize, width: usize, height: usize) -> SmallVec<[Coord; 9]> {
        let x_range = self.x.saturating_sub(radius)..=self.x.saturating_add(radius).min(width.saturating_sub(1));
        let y_range = self.y.saturating_sub(radius)..=self.y.saturating_add(radius).min(height.saturating_sub(1));

        let mut cells = SmallVec::new();
        for x in x_range {
            for y in y_range.clone() {
                cells.push(Coord::new(x, y));
            }
        }
        cells
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Cardinal direction. The discriminant is the mask index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Direction {
    North = 0,
    East = 1,
    South = 2,
    West = 3,
}

impl Direction {
    /// All directions in mask order.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Mask index of this direction.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The direction pointing back: index `i` pairs with `(i + 2) % 4`.
    #[must_use]
    pub const fn opposite(self) -> Self {
        Self::ALL[(self.index() + 2) % 4]
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Direction::North => "north",
            Direction::East => "east",
            Direction::South => "south",
            Direction::West => "west",
        };
        f.write_str(name)
    }
}

/// Number of quarter turns clockwise, always in `0..4`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8")]
pub struct Orientation(u8);

impl TryFrom<u8> for Orientation {
    type Error = GameError;

    fn try_from(quarter_turns: u8) -> Result<Self, Self::Error> {
        Orientation::new(quarter_turns)
            .ok_or_else(|| GameError::InvalidSnapshot(format!("orientation {quarter_turns} is not in 0..4")))
    }
}

impl Orientation {
    /// Create an orientation, `None` outside `0..4`.
    #[must_use]
    pub const fn new(quarter_turns: u8) -> Option<Self> {
        if quarter_turns < 4 {
            Some(Self(quarter_turns))
        } else {
            None
        }
    }

    /// Quarter turns applied to the base shape.
    #[must_use]
    pub const fn quarter_turns(self) -> u8 {
        self.0
    }

    /// Rotate by `delta` quarter turns, wrapping 3 → 0 and 0 → 3.
    #[must_use]
    pub const fn rotated(self, delta: i8) -> Self {
        Self((self.0 as i8 + delta).rem_euclid(4) as u8)
    }
}

/// Which edges of a tile permit crossing, indexed by [`Direction`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DirectionMask([bool; 4]);

impl DirectionMask {
    /// The all-false mask.
    pub const CLOSED: Self = Self([false; 4]);

    /// Create a mask from `[north, east, south, west]`.
    #[must_use]
    pub const fn new(bits: [bool; 4]) -> Self {
        Self(bits)
    }

    /// Check whether the edge in `direction` is open.
    #[must_use]
    pub const fn allows(self, direction: Direction) -> bool {
        self.0[direction as usize]
    }

    /// Set one edge.
    pub fn set(&mut self, direction: Direction, open: bool) {
        self.0[direction.index()] = open;
    }

    /// Check whether every edge is closed.
    #[must_use]
    pub fn is_closed(self) -> bool {
        !self.0.iter().any(|&open| open)
    }

    /// Rotate by `delta` positions: with `+1` the bit at index `i` moves to `i + 1`.
    #[must_use]
    pub fn rotated(self, delta: i8) -> Self {
        let mut bits = [false; 4];
        for (i, &open) in self.0.iter().enumerate() {
            bits[(i as i8 + delta).rem_euclid(4) as usize] = open;
        }
        Self(bits)
    }

    /// Directions whose edge is open.
    pub fn open_directions(self) -> impl Iterator<Item = Direction> {
        Direction::ALL.into_iter().filter(move |&d| self.allows(d))
    }
}

impl Index<Direction> for DirectionMask {
    type Output = bool;

    fn index(&self, direction: Direction) -> &bool {
        &self.0[direction.index()]
    }
}
