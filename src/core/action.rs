//! Move records for history tracking.
//!
//! Games define their own move type; the engine only stores moves and
//! the side that made them. History uses `im::Vector` so reports and
//! snapshots can clone it in O(1).

use im::Vector;
use serde::{Deserialize, Serialize};

use super::player::Side;

/// A move as it was applied by the authority.
///
/// Used for:
/// - End-of-match reports
/// - Replay/debugging
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord<M> {
    /// The side that made the move.
    pub side: Side,

    /// The move applied.
    pub mv: M,

    /// Ply number, starting at 1.
    pub ply: u32,
}

impl<M> MoveRecord<M> {
    #[must_use]
    pub fn new(side: Side, mv: M, ply: u32) -> Self {
        Self { side, mv, ply }
    }
}

/// Append-only move history.
pub type MoveHistory<M> = Vector<MoveRecord<M>>;
