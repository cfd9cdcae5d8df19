//! Nim rules, state, and wire encoding.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::str::FromStr;

use crate::core::{validate_rows, GameRng, Side, Winner, DEFAULT_ROWS};
use crate::error::{ConfigError, MoveError, ParseError};
use crate::rules::RulesEngine;

/// Row storage. Layouts of up to eight rows stay inline.
pub type Rows = SmallVec<[u32; 8]>;

/// Take `count` sticks from row `row`.
///
/// Wire form is `"<row>,<count>"` with no surrounding whitespace.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NimMove {
    pub row: usize,
    pub count: u32,
}

impl NimMove {
    #[must_use]
    pub const fn new(row: usize, count: u32) -> Self {
        Self { row, count }
    }
}

impl std::fmt::Display for NimMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.row, self.count)
    }
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

impl FromStr for NimMove {
    type Err = MoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || MoveError::MalformedMove { input: s.to_string() };
        let (row, count) = s.split_once(',').ok_or_else(malformed)?;
        if !is_digits(row) || !is_digits(count) {
            return Err(malformed());
        }
        Ok(Self {
            row: row.parse().map_err(|_| malformed())?,
            count: count.parse().map_err(|_| malformed())?,
        })
    }
}

/// One Nim game: stick counts, whose turn it is, and the outcome.
///
/// ## Invariants
///
/// - `winner` is decided exactly when every row is empty or the game
///   was aborted
/// - `turn` is `None` exactly when `winner` is decided
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NimState {
    rows: Rows,
    turn: Option<Side>,
    winner: Winner,
}

impl NimState {
    /// Start a game with the given row sizes. Home moves first.
    ///
    /// Fails if the layout is empty, has a negative or oversized row, or
    /// holds no sticks at all.
    pub fn new_game(row_sizes: &[i64]) -> Result<Self, ConfigError> {
        let rows: Rows = validate_rows(row_sizes)?.into_iter().collect();
        if rows.iter().all(|&n| n == 0) {
            return Err(ConfigError::invalid("the board must hold at least one stick"));
        }
        Ok(Self {
            rows,
            turn: Some(Side::Home),
            winner: Winner::Undecided,
        })
    }

    #[must_use]
    pub fn rows(&self) -> &[u32] {
        &self.rows
    }

    #[must_use]
    pub fn turn(&self) -> Option<Side> {
        self.turn
    }

    #[must_use]
    pub fn winner(&self) -> Winner {
        self.winner
    }

    /// Check if every row is empty.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.rows.iter().all(|&n| n == 0)
    }

    /// Check a move against the board: the row exists and holds at least
    /// `count >= 1` sticks.
    #[must_use]
    pub fn legal_move(&self, row: usize, count: u32) -> bool {
        self.rows.get(row).is_some_and(|&n| count >= 1 && count <= n)
    }

    fn illegal_reason(&self, mv: &NimMove) -> String {
        match self.rows.get(mv.row) {
            None => format!("row {} does not exist", mv.row),
            Some(_) if mv.count == 0 => "must take at least one stick".to_string(),
            Some(n) => format!("row {} has only {n} sticks", mv.row),
        }
    }

    /// Apply `mv` for `side`, returning the next state.
    ///
    /// The side that empties the board wins.
    pub fn apply_move(&self, side: Side, mv: &NimMove) -> Result<Self, MoveError> {
        if self.turn != Some(side) {
            return Err(MoveError::OutOfTurn { player: side });
        }
        if !self.legal_move(mv.row, mv.count) {
            return Err(MoveError::IllegalMove {
                mv: mv.to_string(),
                reason: self.illegal_reason(mv),
            });
        }

        let mut next = self.clone();
        next.rows[mv.row] -= mv.count;
        if next.is_terminal() {
            next.winner = Winner::for_side(side);
            next.turn = None;
        } else {
            next.turn = Some(side.opponent());
        }
        Ok(next)
    }

    /// End an undecided game without a winner. Finished games are unchanged.
    #[must_use]
    pub fn abort(&self) -> Self {
        let mut next = self.clone();
        if !next.winner.is_decided() {
            next.winner = Winner::Aborted;
            next.turn = None;
        }
        next
    }

    /// Wire encoding: `<r0>,<r1>,...;<turn-code>;<winner-code>`.
    #[must_use]
    pub fn encode(&self) -> String {
        let rows: Vec<String> = self.rows.iter().map(u32::to_string).collect();
        format!(
            "{};{};{}",
            rows.join(","),
            Side::turn_code(self.turn),
            self.winner.code()
        )
    }

    /// Parse the output of `encode`, rejecting inconsistent states.
    pub fn decode(text: &str) -> Result<Self, ParseError> {
        let fields: Vec<&str> = text.split(';').collect();
        let [rows, turn, winner] = fields[..] else {
            return Err(ParseError::new(text, "expected rows;turn;winner"));
        };

        let rows = rows
            .split(',')
            .map(|n| {
                if !is_digits(n) {
                    return Err(ParseError::new(text, format!("bad row count {n:?}")));
                }
                n.parse::<u32>()
                    .map_err(|_| ParseError::new(text, format!("row count {n} out of range")))
            })
            .collect::<Result<Rows, _>>()?;

        let turn = match turn.parse::<i8>() {
            Ok(-1) => None,
            Ok(code) => Some(
                Side::from_code(code)
                    .ok_or_else(|| ParseError::new(text, format!("bad turn code {code}")))?,
            ),
            Err(_) => return Err(ParseError::new(text, format!("bad turn code {turn:?}"))),
        };

        let winner = winner
            .parse::<i8>()
            .ok()
            .and_then(Winner::from_code)
            .ok_or_else(|| ParseError::new(text, format!("bad winner code {winner:?}")))?;

        let state = Self { rows, turn, winner };
        state.check_consistent().map_err(|reason| ParseError::new(text, reason))?;
        Ok(state)
    }

    fn check_consistent(&self) -> Result<(), &'static str> {
        let terminal = self.is_terminal();
        match self.winner {
            Winner::Home | Winner::Away if !terminal => {
                Err("a winner is declared but sticks remain")
            }
            Winner::Tie => Err("Nim cannot end in a tie"),
            Winner::Undecided if terminal => Err("the board is empty but no winner is declared"),
            Winner::Undecided if self.turn.is_none() => Err("a running game must have a turn"),
            Winner::Home | Winner::Away | Winner::Aborted if self.turn.is_some() => {
                Err("a finished game has no turn")
            }
            _ => Ok(()),
        }
    }
}

impl std::fmt::Display for NimState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, &n) in self.rows.iter().enumerate() {
            writeln!(f, "{i}: {} ({n})", "|".repeat(n.min(64) as usize))?;
        }
        Ok(())
    }
}

/// Nim rules.
#[derive(Clone, Copy, Debug, Default)]
pub struct NimRules;

impl RulesEngine for NimRules {
    type State = NimState;
    type Move = NimMove;

    fn turn(&self, state: &NimState) -> Option<Side> {
        state.turn()
    }

    fn winner(&self, state: &NimState) -> Winner {
        state.winner()
    }

    fn is_terminal(&self, state: &NimState) -> bool {
        state.is_terminal()
    }

    fn is_legal(&self, state: &NimState, mv: &NimMove) -> bool {
        state.legal_move(mv.row, mv.count)
    }

    fn legal_moves(&self, state: &NimState) -> Vec<NimMove> {
        state
            .rows()
            .iter()
            .enumerate()
            .flat_map(|(row, &n)| (1..=n).map(move |count| NimMove::new(row, count)))
            .collect()
    }

    /// Picks one of the `sum(rows)` (row, count) pairs without listing them.
    fn random_move(&self, state: &NimState, rng: &mut GameRng) -> Option<NimMove> {
        let total: u64 = state.rows().iter().map(|&n| u64::from(n)).sum();
        if total == 0 {
            return None;
        }
        let mut pick = rng.gen_range_u64(0..total);
        for (row, &n) in state.rows().iter().enumerate() {
            let n = u64::from(n);
            if pick < n {
                return u32::try_from(pick + 1).ok().map(|count| NimMove::new(row, count));
            }
            pick -= n;
        }
        None
    }

    fn apply_move(&self, state: &NimState, side: Side, mv: &NimMove) -> Result<NimState, MoveError> {
        state.apply_move(side, mv)
    }

    fn abort(&self, state: &NimState) -> NimState {
        state.abort()
    }

    fn encode(&self, state: &NimState) -> String {
        state.encode()
    }

    fn decode(&self, text: &str) -> Result<NimState, ParseError> {
        NimState::decode(text)
    }

    fn parse_move(&self, text: &str) -> Result<NimMove, MoveError> {
        text.parse()
    }
}

/// Builder for a Nim game.
pub struct NimGameBuilder {
    rows: Vec<i64>,
}

impl Default for NimGameBuilder {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS.to_vec(),
        }
    }
}

impl NimGameBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(mut self, rows: &[i64]) -> Self {
        self.rows = rows.to_vec();
        self
    }

    /// Build the rules and initial state.
    pub fn build(self) -> Result<(NimRules, NimState), ConfigError> {
        Ok((NimRules, NimState::new_game(&self.rows)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(rows: &[i64]) -> NimState {
        NimState::new_game(rows).unwrap()
    }

    #[test]
    fn test_new_game() {
        let s = state(&[3, 4, 5]);
        assert_eq!(s.rows(), &[3, 4, 5]);
        assert_eq!(s.turn(), Some(Side::Home));
        assert_eq!(s.winner(), Winner::Undecided);
        assert!(!s.is_terminal());
    }

    #[test]
    fn test_new_game_rejects_bad_layouts() {
        assert!(NimState::new_game(&[]).is_err());
        assert!(NimState::new_game(&[1, -1]).is_err());
        assert!(NimState::new_game(&[0, 0]).is_err());
        assert!(NimState::new_game(&[0, 1]).is_ok());
    }

    #[test]
    fn test_legal_move() {
        let s = state(&[1, 3]);
        assert!(s.legal_move(0, 1));
        assert!(s.legal_move(1, 3));
        assert!(!s.legal_move(1, 4));
        assert!(!s.legal_move(0, 0));
        assert!(!s.legal_move(2, 1));
    }

    #[test]
    fn test_apply_move_flips_turn() {
        let s = state(&[3, 4, 5]);
        let next = s.apply_move(Side::Home, &NimMove::new(0, 2)).unwrap();
        assert_eq!(next.rows(), &[1, 4, 5]);
        assert_eq!(next.turn(), Some(Side::Away));
        assert_eq!(next.winner(), Winner::Undecided);
    }

    #[test]
    fn test_apply_move_rejections_leave_state_unchanged() {
        let s = state(&[2, 2]);
        let before = s.clone();

        let err = s.apply_move(Side::Away, &NimMove::new(0, 1)).unwrap_err();
        assert_eq!(err, MoveError::OutOfTurn { player: Side::Away });

        let err = s.apply_move(Side::Home, &NimMove::new(0, 3)).unwrap_err();
        assert!(matches!(err, MoveError::IllegalMove { ref reason, .. } if reason == "row 0 has only 2 sticks"));

        let err = s.apply_move(Side::Home, &NimMove::new(0, 0)).unwrap_err();
        assert!(matches!(err, MoveError::IllegalMove { .. }));

        assert_eq!(s, before);
    }

    #[test]
    fn test_last_stick_wins() {
        let s = state(&[1, 1]);
        let s = s.apply_move(Side::Home, &NimMove::new(0, 1)).unwrap();
        let s = s.apply_move(Side::Away, &NimMove::new(1, 1)).unwrap();

        assert_eq!(s.rows(), &[0, 0]);
        assert!(s.is_terminal());
        assert_eq!(s.winner(), Winner::Away);
        assert_eq!(s.turn(), None);

        // Nobody may move once the board is empty
        let err = s.apply_move(Side::Home, &NimMove::new(0, 1)).unwrap_err();
        assert_eq!(err, MoveError::OutOfTurn { player: Side::Home });
    }

    #[test]
    fn test_abort() {
        let s = state(&[2]).abort();
        assert_eq!(s.winner(), Winner::Aborted);
        assert_eq!(s.turn(), None);
        assert_eq!(s.rows(), &[2]);

        let finished = state(&[1]).apply_move(Side::Home, &NimMove::new(0, 1)).unwrap();
        assert_eq!(finished.abort().winner(), Winner::Home);
    }

    #[test]
    fn test_move_parsing() {
        assert_eq!("0,2".parse::<NimMove>().unwrap(), NimMove::new(0, 2));
        assert_eq!("12,0".parse::<NimMove>().unwrap(), NimMove::new(12, 0));
        for bad in ["abc", "1", "1,", ",1", " 1,2", "1,2 ", "-1,2", "1,+2", "1,2,3"] {
            assert_eq!(
                bad.parse::<NimMove>().unwrap_err(),
                MoveError::MalformedMove { input: bad.to_string() },
                "{bad:?} should be malformed"
            );
        }
        assert_eq!(NimMove::new(3, 1).to_string(), "3,1");
    }

    #[test]
    fn test_encode() {
        let s = state(&[1, 3, 5, 7]);
        assert_eq!(s.encode(), "1,3,5,7;0;-3");

        let s = state(&[1]).apply_move(Side::Home, &NimMove::new(0, 1)).unwrap();
        assert_eq!(s.encode(), "0;-1;0");
        assert_eq!(state(&[4]).abort().encode(), "4;-1;-2");
    }

    #[test]
    fn test_decode_round_trip_for_reachable_states() {
        let mut s = state(&[2, 3]);
        assert_eq!(NimState::decode(&s.encode()).unwrap(), s);
        for (side, mv) in [
            (Side::Home, NimMove::new(1, 2)),
            (Side::Away, NimMove::new(0, 1)),
            (Side::Home, NimMove::new(0, 1)),
            (Side::Away, NimMove::new(1, 1)),
        ] {
            s = s.apply_move(side, &mv).unwrap();
            assert_eq!(NimState::decode(&s.encode()).unwrap(), s);
        }
        assert_eq!(s.winner(), Winner::Away);
    }

    #[test]
    fn test_decode_rejects_malformed_text() {
        for bad in [
            "",
            "1,2",
            "1,2;0",
            ";0;-3",
            "1,,2;0;-3",
            "1,x;0;-3",
            "1,-2;0;-3",
            "1,2;5;-3",
            "1,2;0;9",
            "1,2;0;-3;extra",
        ] {
            assert!(NimState::decode(bad).is_err(), "{bad:?} should not decode");
        }
    }

    #[test]
    fn test_decode_rejects_inconsistent_states() {
        for bad in ["1;-1;0", "0;0;-3", "0;-1;-3", "1;-1;-3", "0;-1;-1", "1;0;-2"] {
            assert!(NimState::decode(bad).is_err(), "{bad:?} should not decode");
        }
    }

    #[test]
    fn test_legal_moves() {
        let moves = NimRules.legal_moves(&state(&[2, 0, 1]));
        assert_eq!(
            moves,
            vec![NimMove::new(0, 1), NimMove::new(0, 2), NimMove::new(2, 1)]
        );
    }

    #[test]
    fn test_random_move_covers_every_legal_move() {
        let s = state(&[2, 0, 1]);
        let mut rng = GameRng::new(4);
        let mut seen = std::collections::BTreeSet::new();
        for _ in 0..200 {
            let mv = NimRules.random_move(&s, &mut rng).unwrap();
            assert!(NimRules.is_legal(&s, &mv));
            seen.insert((mv.row, mv.count));
        }
        assert_eq!(seen.into_iter().collect::<Vec<_>>(), [(0, 1), (0, 2), (2, 1)]);
    }

    #[test]
    fn test_random_move_on_empty_board() {
        let done = state(&[1]).apply_move(Side::Home, &NimMove::new(0, 1)).unwrap();
        assert_eq!(NimRules.random_move(&done, &mut GameRng::new(0)), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(state(&[2, 0]).to_string(), "0: || (2)\n1:  (0)\n");
    }

    #[test]
    fn test_builder_defaults() {
        let (_, s) = NimGameBuilder::new().build().unwrap();
        assert_eq!(s.rows(), &[1, 3, 5, 7]);

        assert!(NimGameBuilder::new().rows(&[]).build().is_err());
    }

    #[test]
    fn test_state_serialization() {
        let s = state(&[3, 1]).apply_move(Side::Home, &NimMove::new(1, 1)).unwrap();
        let json = serde_json::to_string(&s).unwrap();
        let deserialized: NimState = serde_json::from_str(&json).unwrap();
        assert_eq!(s, deserialized);
    }
}
