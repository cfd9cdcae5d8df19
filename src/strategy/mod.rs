//! Move-selection strategies.
//!
//! Strategies are trait-based so a seat can be driven by any policy:
//! - `NimStrategy` (in `games::nim`): optimal nim-sum play
//! - `RandomStrategy`: uniform over legal moves, works with any game

use tracing::debug;

use crate::core::{GameRng, Winner};
use crate::error::StrategyError;
use crate::rules::RulesEngine;

/// Policy that picks moves for one seat.
pub trait Strategy<E: RulesEngine>: Send {
    /// Short name for logs.
    fn name(&self) -> &str;

    /// Called when the strategy is bound to a match.
    fn attach(&mut self) {}

    /// Choose a move for the side to move in `state`.
    ///
    /// Callers must not invoke this on a finished game.
    fn choose_move(&mut self, engine: &E, state: &E::State) -> Result<E::Move, StrategyError>;

    /// Called once when the match ends.
    fn post_winner(&mut self, _winner: Winner) {}
}

/// Uniformly random legal moves.
#[derive(Clone, Debug)]
pub struct RandomStrategy {
    rng: GameRng,
}

impl RandomStrategy {
    #[must_use]
    pub fn new(rng: GameRng) -> Self {
        Self { rng }
    }
}

impl<E: RulesEngine> Strategy<E> for RandomStrategy {
    fn name(&self) -> &str {
        "random"
    }

    fn choose_move(&mut self, engine: &E, state: &E::State) -> Result<E::Move, StrategyError> {
        let mv = engine
            .random_move(state, &mut self.rng)
            .ok_or_else(|| StrategyError::invalid("no legal moves"))?;
        if !engine.is_legal(state, &mv) {
            return Err(StrategyError::invalid(format!("drew illegal move {mv}")));
        }
        debug!(%mv, "random move");
        Ok(mv)
    }
}
