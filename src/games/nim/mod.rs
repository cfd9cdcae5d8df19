//! Nim: players alternately take one or more sticks from a single row.
//! Whoever takes the last stick wins.
//!
//! - `NimState` / `NimRules`: the state machine and its `RulesEngine` impl
//! - `NimStrategy`: optimal nim-sum play
//! - `NimGameBuilder`: layout configuration, default rows `[1, 3, 5, 7]`
//! - `new_match`: a configured match, ready to run

mod game;
mod setup;
mod strategy;

pub use game::{NimGameBuilder, NimMove, NimRules, NimState, Rows};
pub use setup::new_match;
pub use strategy::{choose_move, nim_sum, winning_move, NimStrategy};
