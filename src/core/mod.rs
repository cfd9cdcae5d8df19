//! Core engine types: sides, outcomes, move history, versioned state, RNG,
//! configuration.
//!
//! Nothing here knows the rules of a particular game.

pub mod player;
pub mod rng;
pub mod config;
pub mod action;
pub mod state;

pub use player::{Side, SideMap, Winner};
pub use rng::GameRng;
pub use config::{parse_rows, validate_rows, Controller, MatchConfig, DEFAULT_ROWS};
pub use action::{MoveHistory, MoveRecord};
pub use state::{StateCursors, Versioned};
