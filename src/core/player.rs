//! Player identification and per-player data storage.
//!
//! ## PlayerId
//!
//! Type-safe seat identifier. A game seats at most [`MAX_PLAYERS`] players.
//!
//! ## PlayerMap
//!
//! Per-player data storage backed by `Vec` for O(1) access.
//! Supports iteration and indexing by `PlayerId`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Largest number of seats a game supports.
pub const MAX_PLAYERS: usize = 4;

/// Seat identifier, 0-based: the first player is `PlayerId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The seat that acts after this one, wrapping to seat 0.
    ///
    /// ```
    /// use maze_shift::core::PlayerId;
    ///
    /// assert_eq!(PlayerId::new(1).next(3), PlayerId::new(2));
    /// assert_eq!(PlayerId::new(2).next(3), PlayerId::new(0));
    /// ```
    #[must_use]
    pub fn next(self, player_count: usize) -> Self {
        Self(((self.index() + 1) % player_count) as u8)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Per-player data storage with O(1) access.
///
/// ```
/// use maze_shift::core::{PlayerId, PlayerMap};
///
/// let mut moves: PlayerMap<u32> = PlayerMap::new(3, |_| 0);
/// moves[PlayerId::new(1)] += 2;
/// assert_eq!(moves[PlayerId::new(1)], 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    pub fn new(player_count: usize, factory: impl Fn(PlayerId) -> T) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= MAX_PLAYERS, "At most 4 players supported");

        let data = (0..player_count as u8).map(|i| factory(PlayerId(i))).collect();

        Self { data }
    }

    /// Wrap already-built per-seat values, seat `i` taking `values[i]`.
    ///
    /// Returns `None` for an empty or oversized vector.
    #[must_use]
    pub fn from_vec(values: Vec<T>) -> Option<Self> {
        if values.is_empty() || values.len() > MAX_PLAYERS {
            return None;
        }
        Some(Self { data: values })
    }

    /// Get the number of players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    /// Check whether `player` is seated in this map.
    #[must_use]
    pub fn contains(&self, player: PlayerId) -> bool {
        player.index() < self.data.len()
    }

    /// Get a reference to a player's data, if the seat exists.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> Option<&T> {
        self.data.get(player.index())
    }

    /// Get a mutable reference to a player's data, if the seat exists.
    pub fn get_mut(&mut self, player: PlayerId) -> Option<&mut T> {
        self.data.get_mut(player.index())
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over all values in seat order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.data.iter_mut()
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        &self.data[player.index()]
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        &mut self.data[player.index()]
    }
}
