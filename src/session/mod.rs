//! Game sessions: the capability surface shared by the authority and
//! each player's mirror.
//!
//! ## Variants
//!
//! - `AuthoritySession`: owns the canonical state; the only place moves
//!   are applied.
//! - `PlayerSession`: one per side; holds a copy of the last state it was
//!   sent and produces that side's moves from a strategy or a human.
//!
//! ## Concurrency
//!
//! Every mutating operation takes `&mut self`, so a session is never read
//! mid-update. Sessions are `Send`; to share one between threads wrap it
//! in a `Mutex`, one lock per session.

mod authority;
mod input;
mod player;

pub use authority::AuthoritySession;
pub use input::{LineSource, MoveSource, ScriptedInput, StdinSource};
pub use player::{Driver, PlayerSession};

use crate::core::{Side, Winner};
use crate::error::{MoveError, SessionError};
use crate::rules::RulesEngine;

/// Operations every session supports.
pub trait GameSession: Send {
    type Rules: RulesEngine;

    /// Check if the held state is finished or aborted.
    fn is_done(&self) -> bool;

    /// Wire state for `consumer`.
    ///
    /// With `force == false`, returns `None` if `consumer` already received
    /// the current revision.
    fn get_state(&mut self, consumer: Option<Side>, force: bool) -> Option<String>;

    /// Typed view of the held state.
    fn state_object(&self) -> &<Self::Rules as RulesEngine>::State;

    /// Replace the held state from its wire form. On error nothing changes.
    fn update_state(&mut self, serialized: &str) -> Result<(), SessionError>;

    /// Produce this seat's next move in wire form. May block on a human.
    fn get_move(&mut self) -> Result<String, SessionError>;

    /// Apply `mv` for `side` and return an acknowledgment.
    fn process_move(&mut self, side: Side, mv: &str) -> Result<String, MoveError>;

    fn winner(&self) -> Winner;

    fn turn(&self) -> Option<Side>;

    /// The seat this session plays for, `None` for the authority.
    fn player(&self) -> Option<Side>;

    /// Tell the session the match is over.
    fn post_winner(&mut self, winner: Winner);

    /// Check if this session's seat is the one to move.
    fn is_player_turn(&self) -> bool {
        self.player().is_some() && self.player() == self.turn()
    }
}
