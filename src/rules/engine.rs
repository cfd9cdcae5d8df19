//! Rules engine trait for two-party game implementations.

use std::fmt::{Debug, Display};

use crate::core::{GameRng, Side, Winner};
use crate::error::{MoveError, ParseError};

/// Rules engine trait.
///
/// Games implement this trait to define their rules. Sessions, strategies
/// and the turn loop only ever touch game state through it.
///
/// ## Implementation Notes
///
/// - `apply_move` is pure: it returns a new state and leaves the input
///   untouched, including on error
/// - `decode(encode(s)) == s` for every reachable state
/// - `legal_moves` is empty exactly when `is_terminal` is true
pub trait RulesEngine: Send {
    /// Complete game state, including whose turn it is and the outcome.
    type State: Clone + Debug + PartialEq + Send;

    /// A single move.
    type Move: Clone + Debug + PartialEq + Display + Send + Sync;

    /// Side expected to move next, `None` once the game is over.
    fn turn(&self, state: &Self::State) -> Option<Side>;

    /// Outcome so far. `Winner::Undecided` while the game is running.
    fn winner(&self, state: &Self::State) -> Winner;

    /// Check if the board admits no further moves.
    fn is_terminal(&self, state: &Self::State) -> bool;

    /// Check a move against the position, ignoring whose turn it is.
    fn is_legal(&self, state: &Self::State, mv: &Self::Move) -> bool;

    /// All legal moves for the side to move.
    fn legal_moves(&self, state: &Self::State) -> Vec<Self::Move>;

    /// A uniformly random legal move, `None` if there is none.
    ///
    /// The default draws from `legal_moves`. Games whose move lists grow
    /// with the board should override it.
    fn random_move(&self, state: &Self::State, rng: &mut GameRng) -> Option<Self::Move> {
        rng.choose(&self.legal_moves(state)).cloned()
    }

    /// Apply a move for `side`.
    fn apply_move(
        &self,
        state: &Self::State,
        side: Side,
        mv: &Self::Move,
    ) -> Result<Self::State, MoveError>;

    /// End the game without a winner.
    fn abort(&self, state: &Self::State) -> Self::State;

    /// Wire encoding of a state.
    fn encode(&self, state: &Self::State) -> String;

    /// Inverse of `encode`.
    fn decode(&self, text: &str) -> Result<Self::State, ParseError>;

    /// Parse a move from its wire form.
    fn parse_move(&self, text: &str) -> Result<Self::Move, MoveError>;

    // === Convenience Methods ===

    /// Check if the game has a decided outcome (finished or aborted).
    fn is_over(&self, state: &Self::State) -> bool {
        self.winner(state).is_decided()
    }
}
