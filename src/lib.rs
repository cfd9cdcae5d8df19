//! # nim-engine
//!
//! A two-party turn-based game engine, with Nim as the shipped game.
//!
//! ## Design Principles
//!
//! 1. **One Authority**: A single `AuthoritySession` owns the canonical
//!    state and is the only place moves are applied. Each player holds a
//!    mirror that is refreshed from the authority's wire encoding.
//!
//! 2. **Rules Behind a Trait**: The loop, sessions and protocol know
//!    nothing about Nim. Games plug in through `RulesEngine`.
//!
//! 3. **Errors Are Values**: Illegal, malformed and out-of-turn moves come
//!    back as typed errors to the offending side; only a bad initial
//!    configuration stops a match before it starts.
//!
//! ## Modules
//!
//! - `core`: Sides, outcomes, versioned state, move history, RNG, configuration
//! - `rules`: `RulesEngine` trait for game implementations
//! - `games`: Concrete games (`nim`)
//! - `strategy`: Move-selection strategies for automated seats
//! - `session`: Authority and per-player mirror sessions, human input
//! - `protocol`: Line protocol messages and routing
//! - `driver`: Turn loop and console output
//! - `error`: Error types

pub mod core;
pub mod driver;
pub mod error;
pub mod games;
pub mod protocol;
pub mod rules;
pub mod session;
pub mod strategy;

// Re-export commonly used types
pub use crate::core::{
    parse_rows, validate_rows, Controller, GameRng, MatchConfig, MoveHistory, MoveRecord, Side,
    SideMap, StateCursors, Versioned, Winner, DEFAULT_ROWS,
};

pub use crate::rules::RulesEngine;

pub use crate::strategy::{RandomStrategy, Strategy};

pub use crate::session::{
    AuthoritySession, Driver, GameSession, LineSource, MoveSource, PlayerSession, ScriptedInput,
    StdinSource,
};

pub use crate::protocol::{GameMessage, Message, ProtocolRouter, RouteError, Routed};

pub use crate::driver::{
    CapturedConsole, Console, ConsoleLine, LoopState, MatchReport, StdConsole, TurnLoop,
};

pub use crate::error::{
    ConfigError, InputError, MoveError, ParseError, ProtocolError, SessionError, StrategyError,
};
