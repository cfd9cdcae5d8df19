//! Match driving: the turn loop and its display collaborator.

pub mod console;
pub mod turn_loop;

pub use console::{CapturedConsole, Console, ConsoleLine, StdConsole};
pub use turn_loop::{LoopState, MatchReport, TurnLoop};
