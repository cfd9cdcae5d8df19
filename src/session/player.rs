//! Per-player mirror sessions.

use tracing::{debug, warn};

use super::input::MoveSource;
use super::GameSession;
use crate::core::{Side, StateCursors, Versioned, Winner};
use crate::error::{MoveError, SessionError};
use crate::rules::RulesEngine;
use crate::strategy::Strategy;

/// Where a seat's moves come from.
pub enum Driver<E: RulesEngine> {
    /// An automated strategy.
    Ai(Box<dyn Strategy<E>>),
    /// A human typing moves into a line-oriented source.
    Human(Box<dyn MoveSource>),
}

impl<E: RulesEngine> Driver<E> {
    fn label(&self) -> &str {
        match self {
            Driver::Ai(strategy) => strategy.name(),
            Driver::Human(_) => "human",
        }
    }
}

/// One side's view of the match.
///
/// Holds its own copy of the last state it was sent; it never shares the
/// authority's state.
pub struct PlayerSession<E: RulesEngine> {
    engine: E,
    side: Side,
    mirror: Versioned<E::State>,
    cursors: StateCursors,
    driver: Driver<E>,
}

impl<E: RulesEngine> PlayerSession<E> {
    /// Create a mirror for `side`, attaching the strategy if there is one.
    pub fn new(engine: E, side: Side, initial: E::State, mut driver: Driver<E>) -> Self {
        if let Driver::Ai(strategy) = &mut driver {
            strategy.attach();
        }
        debug!(%side, driver = driver.label(), "player session created");
        Self {
            engine,
            side,
            mirror: Versioned::new(initial),
            cursors: StateCursors::new(),
            driver,
        }
    }

    #[must_use]
    pub fn side(&self) -> Side {
        self.side
    }

    #[must_use]
    pub fn is_human(&self) -> bool {
        matches!(self.driver, Driver::Human(_))
    }

    fn prompt(&self) -> String
    where
        E::State: std::fmt::Display,
    {
        format!(
            "{}{}, enter your move (row,count): ",
            self.mirror.state(),
            self.side
        )
    }
}

impl<E> GameSession for PlayerSession<E>
where
    E: RulesEngine,
    E::State: std::fmt::Display,
{
    type Rules = E;

    fn is_done(&self) -> bool {
        let state = self.mirror.state();
        self.engine.is_terminal(state) || self.engine.is_over(state)
    }

    fn get_state(&mut self, consumer: Option<Side>, force: bool) -> Option<String> {
        let engine = &self.engine;
        self.cursors
            .export(consumer, &self.mirror, force, |s| engine.encode(s))
    }

    fn state_object(&self) -> &E::State {
        self.mirror.state()
    }

    fn update_state(&mut self, serialized: &str) -> Result<(), SessionError> {
        let state = self.engine.decode(serialized).map_err(|e| {
            warn!(side = %self.side, error = %e, "state sync failed, keeping prior state");
            e
        })?;
        if self.mirror.update(state) {
            debug!(side = %self.side, revision = self.mirror.revision(), "mirror updated");
        }
        Ok(())
    }

    fn get_move(&mut self) -> Result<String, SessionError> {
        let prompt = match &self.driver {
            Driver::Human(_) => self.prompt(),
            Driver::Ai(_) => String::new(),
        };
        match &mut self.driver {
            Driver::Ai(strategy) => {
                let mv = strategy.choose_move(&self.engine, self.mirror.state())?;
                Ok(mv.to_string())
            }
            Driver::Human(source) => Ok(source.read_move(&prompt)?),
        }
    }

    fn process_move(&mut self, _side: Side, _mv: &str) -> Result<String, MoveError> {
        Err(MoveError::NotAuthority)
    }

    fn winner(&self) -> Winner {
        self.engine.winner(self.mirror.state())
    }

    fn turn(&self) -> Option<Side> {
        self.engine.turn(self.mirror.state())
    }

    fn player(&self) -> Option<Side> {
        Some(self.side)
    }

    fn post_winner(&mut self, winner: Winner) {
        if let Driver::Ai(strategy) = &mut self.driver {
            strategy.post_winner(winner);
        }
    }
}
