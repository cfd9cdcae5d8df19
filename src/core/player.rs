//! Side identification, match outcomes, and per-side data storage.
//!
//! ## Side
//!
//! The two seats of a match. Wire codes are `0` for Home and `1` for Away;
//! "nobody" (no turn yet, or the game is over) is `Option::<Side>::None`
//! and encodes as `-1`.
//!
//! ## SideMap
//!
//! Per-side storage backed by a fixed array for O(1) access.
//! Supports iteration and indexing by `Side`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two seats in a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Home,
    Away,
}

impl Side {
    /// Both sides, Home first.
    pub const ALL: [Side; 2] = [Side::Home, Side::Away];

    /// Array index (Home = 0, Away = 1).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Side::Home => 0,
            Side::Away => 1,
        }
    }

    /// The side that moves after this one.
    #[must_use]
    pub const fn opponent(self) -> Side {
        match self {
            Side::Home => Side::Away,
            Side::Away => Side::Home,
        }
    }

    /// Look a side up by its wire code.
    #[must_use]
    pub const fn from_code(code: i8) -> Option<Side> {
        match code {
            0 => Some(Side::Home),
            1 => Some(Side::Away),
            _ => None,
        }
    }

    /// Wire code of a turn, `-1` when nobody is to move.
    #[must_use]
    pub const fn turn_code(turn: Option<Side>) -> i8 {
        match turn {
            Some(side) => side.index() as i8,
            None => -1,
        }
    }

    /// Short tag appended to acknowledgments, e.g. `[Home]`.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Side::Home => "[Home]",
            Side::Away => "[Away]",
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Home => f.write_str("Home"),
            Side::Away => f.write_str("Away"),
        }
    }
}

/// Match outcome as seen by the authority.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Winner {
    Home,
    Away,
    Tie,
    Aborted,
    #[default]
    Undecided,
}

impl Winner {
    /// Winner code: 0=Home, 1=Away, -1=Tie, -2=Aborted, -3=Not finished.
    #[must_use]
    pub const fn code(self) -> i8 {
        match self {
            Winner::Home => 0,
            Winner::Away => 1,
            Winner::Tie => -1,
            Winner::Aborted => -2,
            Winner::Undecided => -3,
        }
    }

    #[must_use]
    pub const fn from_code(code: i8) -> Option<Winner> {
        match code {
            0 => Some(Winner::Home),
            1 => Some(Winner::Away),
            -1 => Some(Winner::Tie),
            -2 => Some(Winner::Aborted),
            -3 => Some(Winner::Undecided),
            _ => None,
        }
    }

    /// The outcome where `side` took the last move and won.
    #[must_use]
    pub const fn for_side(side: Side) -> Winner {
        match side {
            Side::Home => Winner::Home,
            Side::Away => Winner::Away,
        }
    }

    /// Result letter used by `@GAME:RESULT` (`H`, `A` or `T`).
    ///
    /// `None` for anomalous outcomes that have no result letter.
    #[must_use]
    pub const fn result_letter(self) -> Option<char> {
        match self {
            Winner::Home => Some('H'),
            Winner::Away => Some('A'),
            Winner::Tie => Some('T'),
            Winner::Aborted | Winner::Undecided => None,
        }
    }

    #[must_use]
    pub const fn from_result_letter(letter: char) -> Option<Winner> {
        match letter {
            'H' => Some(Winner::Home),
            'A' => Some(Winner::Away),
            'T' => Some(Winner::Tie),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_decided(self) -> bool {
        !matches!(self, Winner::Undecided)
    }
}

/// Per-side data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use nim_engine::core::{Side, SideMap};
///
/// let mut moves: SideMap<u32> = SideMap::with_value(0);
/// moves[Side::Away] += 1;
/// assert_eq!(moves[Side::Home], 0);
/// assert_eq!(moves[Side::Away], 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SideMap<T> {
    data: [T; 2],
}

impl<T> SideMap<T> {
    /// Create a map with values from a factory function.
    pub fn new(mut factory: impl FnMut(Side) -> T) -> Self {
        Self {
            data: [factory(Side::Home), factory(Side::Away)],
        }
    }

    /// Create a map with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    #[must_use]
    pub fn get(&self, side: Side) -> &T {
        &self.data[side.index()]
    }

    pub fn get_mut(&mut self, side: Side) -> &mut T {
        &mut self.data[side.index()]
    }

    /// Iterate over (Side, &T) pairs, Home first.
    pub fn iter(&self) -> impl Iterator<Item = (Side, &T)> {
        Side::ALL.into_iter().zip(self.data.iter())
    }

    /// Iterate over (Side, &mut T) pairs, Home first.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Side, &mut T)> {
        Side::ALL.into_iter().zip(self.data.iter_mut())
    }
}

impl<T: Default> Default for SideMap<T> {
    fn default() -> Self {
        Self::new(|_| T::default())
    }
}

impl<T> Index<Side> for SideMap<T> {
    type Output = T;

    fn index(&self, side: Side) -> &Self::Output {
        self.get(side)
    }
}

impl<T> IndexMut<Side> for SideMap<T> {
    fn index_mut(&mut self, side: Side) -> &mut Self::Output {
        self.get_mut(side)
    }
}
