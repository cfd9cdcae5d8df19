//! Optimal Nim play.
//!
//! A position whose nim-sum (XOR of all rows) is non-zero always has a
//! move to a zero nim-sum, and no move from a zero nim-sum position can
//! reach another one. Leaving the opponent a zero nim-sum therefore wins
//! under last-stick-wins rules. From a zero nim-sum every move loses
//! against correct play, so a random one is taken.

use tracing::debug;

use super::game::{NimMove, NimRules, NimState};
use crate::core::{GameRng, Winner};
use crate::error::StrategyError;
use crate::strategy::Strategy;

/// XOR of all row counts.
#[must_use]
pub fn nim_sum(rows: &[u32]) -> u32 {
    rows.iter().fold(0, |acc, &n| acc ^ n)
}

/// The move to a zero nim-sum position, if one exists.
///
/// Rows are scanned in order and the first row that can be reduced to
/// `nim_sum ^ rows[i]` is used.
#[must_use]
pub fn winning_move(rows: &[u32]) -> Option<NimMove> {
    let sum = nim_sum(rows);
    if sum == 0 {
        return None;
    }
    rows.iter().enumerate().find_map(|(row, &n)| {
        let target = sum ^ n;
        (target < n).then(|| NimMove::new(row, n - target))
    })
}

/// Choose a move: the winning move when there is one, otherwise a random
/// non-empty row and a random count from it.
///
/// Fails with `InvalidState` on an empty layout or an empty board.
pub fn choose_move(rows: &[u32], rng: &mut GameRng) -> Result<NimMove, StrategyError> {
    if rows.is_empty() {
        return Err(StrategyError::invalid("no rows"));
    }
    let non_empty: Vec<usize> = rows
        .iter()
        .enumerate()
        .filter(|&(_, &n)| n > 0)
        .map(|(i, _)| i)
        .collect();
    if non_empty.is_empty() {
        return Err(StrategyError::invalid("every row is empty"));
    }

    if nim_sum(rows) != 0 {
        return winning_move(rows)
            .ok_or_else(|| StrategyError::invalid("non-zero nim-sum without a reducing row"));
    }

    let row = *rng
        .choose(&non_empty)
        .ok_or_else(|| StrategyError::invalid("every row is empty"))?;
    let count = rng.gen_range_u32(1..=rows[row]);
    Ok(NimMove::new(row, count))
}

/// Optimal Nim strategy with a seeded random fallback.
#[derive(Clone, Debug)]
pub struct NimStrategy {
    rng: GameRng,
    attached: bool,
}

impl NimStrategy {
    #[must_use]
    pub fn new(rng: GameRng) -> Self {
        Self {
            rng,
            attached: false,
        }
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.attached
    }
}

impl Strategy<NimRules> for NimStrategy {
    fn name(&self) -> &str {
        "nim-sum"
    }

    fn attach(&mut self) {
        self.attached = true;
    }

    fn choose_move(&mut self, _engine: &NimRules, state: &NimState) -> Result<NimMove, StrategyError> {
        if !self.attached {
            return Err(StrategyError::Detached);
        }
        let rows = state.rows();
        let mv = choose_move(rows, &mut self.rng)?;
        debug!(nim_sum = nim_sum(rows), %mv, "nim-sum move");
        Ok(mv)
    }

    fn post_winner(&mut self, winner: Winner) {
        debug!(?winner, "detaching from finished game");
        self.attached = false;
    }
}
