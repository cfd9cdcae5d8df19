//! Rules engine trait for game implementations.
//!
//! Games implement `RulesEngine` to define:
//! - Legal moves for each game state
//! - How moves modify state
//! - Termination and the winner
//! - The wire encoding of state and moves
//!
//! The sessions and turn loop call into `RulesEngine` but never interpret
//! game-specific concepts directly.

pub mod engine;

pub use engine::RulesEngine;
