//! Concrete games.

pub mod nim;
