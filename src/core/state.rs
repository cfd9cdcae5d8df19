//! Revision-tracked state for the authority and its mirrors.
//!
//! ## Versioned
//!
//! Wraps a state value with a revision counter that increases on every
//! change. The counter never goes backwards.
//!
//! ## StateCursors
//!
//! Each consumer (the neutral authority view, Home, Away) remembers the
//! last revision it exported. A non-forced export for a consumer that is
//! already up to date yields nothing, without affecting other consumers.

use super::player::{Side, SideMap};

/// A state value plus its revision.
#[derive(Clone, Debug)]
pub struct Versioned<S> {
    state: S,
    revision: u64,
}

impl<S> Versioned<S> {
    /// Wrap an initial state at revision 0.
    #[must_use]
    pub fn new(state: S) -> Self {
        Self { state, revision: 0 }
    }

    #[must_use]
    pub fn state(&self) -> &S {
        &self.state
    }

    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Replace the state unconditionally, bumping the revision.
    pub fn replace(&mut self, state: S) {
        self.state = state;
        self.revision += 1;
    }

    /// Replace the state only if it differs. Returns whether it changed.
    pub fn update(&mut self, state: S) -> bool
    where
        S: PartialEq,
    {
        if self.state == state {
            return false;
        }
        self.replace(state);
        true
    }
}

/// Last exported revision per consumer.
#[derive(Clone, Debug, Default)]
pub struct StateCursors {
    neutral: Option<u64>,
    sides: SideMap<Option<u64>>,
}

impl StateCursors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn cursor_mut(&mut self, consumer: Option<Side>) -> &mut Option<u64> {
        match consumer {
            Some(side) => &mut self.sides[side],
            None => &mut self.neutral,
        }
    }

    /// Export `versioned` for `consumer`.
    ///
    /// Returns `None` when `force` is false and the consumer has already
    /// seen the current revision.
    pub fn export<S, T>(
        &mut self,
        consumer: Option<Side>,
        versioned: &Versioned<S>,
        force: bool,
        encode: impl FnOnce(&S) -> T,
    ) -> Option<T> {
        let cursor = self.cursor_mut(consumer);
        if !force && *cursor == Some(versioned.revision()) {
            return None;
        }
        *cursor = Some(versioned.revision());
        Some(encode(versioned.state()))
    }
}
