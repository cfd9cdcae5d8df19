//! The authoritative session.

use tracing::{debug, info, warn};

use super::GameSession;
use crate::core::{MoveHistory, MoveRecord, Side, StateCursors, Versioned, Winner};
use crate::error::{MoveError, SessionError};
use crate::rules::RulesEngine;

/// Owns the one canonical game state of a match.
///
/// State changes only through `process_move` and `abort`.
pub struct AuthoritySession<E: RulesEngine> {
    engine: E,
    state: Versioned<E::State>,
    cursors: StateCursors,
    history: MoveHistory<E::Move>,
}

impl<E: RulesEngine> AuthoritySession<E> {
    pub fn new(engine: E, initial: E::State) -> Self {
        Self {
            engine,
            state: Versioned::new(initial),
            cursors: StateCursors::new(),
            history: MoveHistory::new(),
        }
    }

    #[must_use]
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Moves applied so far, oldest first.
    #[must_use]
    pub fn history(&self) -> &MoveHistory<E::Move> {
        &self.history
    }

    #[must_use]
    pub fn revision(&self) -> u64 {
        self.state.revision()
    }

    /// End the match without a winner. No effect once it is decided.
    pub fn abort(&mut self) {
        if self.engine.is_over(self.state.state()) {
            return;
        }
        warn!(plies = self.history.len(), "aborting match");
        let aborted = self.engine.abort(self.state.state());
        self.state.replace(aborted);
    }
}

impl<E: RulesEngine> GameSession for AuthoritySession<E> {
    type Rules = E;

    fn is_done(&self) -> bool {
        let state = self.state.state();
        self.engine.is_terminal(state) || self.engine.is_over(state)
    }

    fn get_state(&mut self, consumer: Option<Side>, force: bool) -> Option<String> {
        let engine = &self.engine;
        self.cursors
            .export(consumer, &self.state, force, |s| engine.encode(s))
    }

    fn state_object(&self) -> &E::State {
        self.state.state()
    }

    fn update_state(&mut self, _serialized: &str) -> Result<(), SessionError> {
        Err(SessionError::Unsupported {
            operation: "update_state",
        })
    }

    fn get_move(&mut self) -> Result<String, SessionError> {
        Err(SessionError::Unsupported { operation: "get_move" })
    }

    fn process_move(&mut self, side: Side, mv: &str) -> Result<String, MoveError> {
        let parsed = self.engine.parse_move(mv)?;
        let next = self.engine.apply_move(self.state.state(), side, &parsed)?;
        self.state.replace(next);

        let ply = self.history.len() as u32 + 1;
        info!(%side, mv = %parsed, ply, "move applied");
        self.history.push_back(MoveRecord::new(side, parsed.clone(), ply));

        Ok(format!("Move {parsed} accepted."))
    }

    fn winner(&self) -> Winner {
        self.engine.winner(self.state.state())
    }

    fn turn(&self) -> Option<Side> {
        self.engine.turn(self.state.state())
    }

    fn player(&self) -> Option<Side> {
        None
    }

    fn post_winner(&mut self, winner: Winner) {
        debug!(?winner, "authority notified of result");
    }
}
