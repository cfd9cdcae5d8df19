//! The turn loop: drives a match from the first move to the result.
//!
//! ```text
//! AwaitingTurn ──done──▶ Terminal
//!      │ turn = side
//!      ▼
//! DispatchingMove(side) ──no move possible──▶ Terminal (aborted)
//!      │ raw move
//!      ▼
//! ApplyingMove { side, line } ──▶ AwaitingTurn
//! ```
//!
//! Single-threaded and strictly alternating: the loop never asks a second
//! side for a move while the first one's is outstanding. A rejected move
//! is reported and the same side is asked again.

use std::fmt::Display;

use tracing::{debug, info, warn};

use super::console::Console;
use crate::core::{MoveHistory, Side, SideMap, Winner};
use crate::protocol::{GameMessage, Message, ProtocolRouter, RouteError};
use crate::rules::RulesEngine;
use crate::session::{AuthoritySession, GameSession, PlayerSession};

/// Where the loop is.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoopState {
    AwaitingTurn,
    DispatchingMove(Side),
    ApplyingMove { side: Side, line: String },
    Terminal,
}

/// Outcome of a finished match.
#[derive(Clone, Debug)]
pub struct MatchReport<M: Clone> {
    pub winner: Winner,
    pub history: MoveHistory<M>,
}

impl<M: Clone> MatchReport<M> {
    /// Number of moves applied.
    #[must_use]
    pub fn plies(&self) -> usize {
        self.history.len()
    }
}

/// One authority, two mirrors, and the loop between them.
pub struct TurnLoop<E: RulesEngine, C: Console> {
    authority: AuthoritySession<E>,
    players: SideMap<PlayerSession<E>>,
    router: ProtocolRouter,
    console: C,
    state: LoopState,
}

impl<E, C> TurnLoop<E, C>
where
    E: RulesEngine,
    E::State: Display,
    C: Console,
{
    pub fn new(authority: AuthoritySession<E>, players: SideMap<PlayerSession<E>>, console: C) -> Self {
        Self {
            authority,
            players,
            router: ProtocolRouter::new(),
            console,
            state: LoopState::AwaitingTurn,
        }
    }

    #[must_use]
    pub fn state(&self) -> &LoopState {
        &self.state
    }

    #[must_use]
    pub fn authority(&self) -> &AuthoritySession<E> {
        &self.authority
    }

    #[must_use]
    pub fn player(&self, side: Side) -> &PlayerSession<E> {
        &self.players[side]
    }

    #[must_use]
    pub fn console(&self) -> &C {
        &self.console
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.state == LoopState::Terminal
    }

    /// Advance by exactly one transition.
    pub fn step(&mut self) -> &LoopState {
        let current = std::mem::replace(&mut self.state, LoopState::Terminal);
        let next = match current {
            LoopState::AwaitingTurn => self.await_turn(),
            LoopState::DispatchingMove(side) => self.dispatch(side),
            LoopState::ApplyingMove { side, line } => self.apply(side, &line),
            LoopState::Terminal => return &self.state,
        };
        debug!(?next, "turn loop transition");
        if next == LoopState::Terminal {
            self.finish();
        }
        self.state = next;
        &self.state
    }

    /// Play until the match is over.
    pub fn run(&mut self) -> MatchReport<E::Move> {
        info!("match started");
        while !self.is_finished() {
            self.step();
        }
        self.report()
    }

    /// Current outcome and history.
    #[must_use]
    pub fn report(&self) -> MatchReport<E::Move> {
        MatchReport {
            winner: self.authority.winner(),
            history: self.authority.history().clone(),
        }
    }

    fn await_turn(&mut self) -> LoopState {
        if self.authority.is_done() {
            return LoopState::Terminal;
        }
        let Some(side) = self.authority.turn() else {
            warn!("running match has no side to move");
            self.console.error("Game has no side to move.");
            self.authority.abort();
            return LoopState::Terminal;
        };

        if let Some(state) = self.authority.get_state(Some(side), false) {
            if let Err(e) = self.players[side].update_state(&state) {
                self.console.error(&format!("State sync failed {}: {e}", side.tag()));
            }
        }
        LoopState::DispatchingMove(side)
    }

    fn dispatch(&mut self, side: Side) -> LoopState {
        match self.players[side].get_move() {
            Ok(raw) => {
                // Lines that already look like protocol messages pass through
                let line = if raw.starts_with('@') {
                    raw
                } else {
                    Message::Game(GameMessage::Move(raw)).to_string()
                };
                LoopState::ApplyingMove { side, line }
            }
            Err(e) => {
                warn!(%side, error = %e, "no move available");
                self.console.error(&format!("{side} cannot move: {e}"));
                self.authority.abort();
                LoopState::Terminal
            }
        }
    }

    fn apply(&mut self, side: Side, line: &str) -> LoopState {
        let routed = self
            .router
            .route(line, side, &mut self.authority, &mut self.console);
        match routed {
            Ok(_) => {}
            Err(RouteError::Move(e)) => {
                debug!(%side, error = %e, "move rejected");
                self.console.error(&format!("{e} {}", side.tag()));
            }
            Err(RouteError::Protocol(e)) => {
                debug!(%side, error = %e, line, "protocol error");
                self.console.error(&format!("Error processing command ({line}). {e}"));
            }
        }
        LoopState::AwaitingTurn
    }

    fn finish(&mut self) {
        let winner = self.authority.winner();
        info!(?winner, plies = self.authority.history().len(), "match over");
        match winner {
            Winner::Home => self.console.display("Home won."),
            Winner::Away => self.console.display("Away won."),
            Winner::Tie => self.console.display("It was a tie."),
            Winner::Aborted => self.console.error("Match aborted."),
            Winner::Undecided => self.console.error("Match ended without a result."),
        }

        for (_, player) in self.players.iter_mut() {
            player.post_winner(winner);
        }
        self.authority.post_winner(winner);
        self.console.display("Good-bye!");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameRng;
    use crate::driver::CapturedConsole;
    use crate::games::nim::{NimGameBuilder, NimRules, NimStrategy};
    use crate::session::{Driver, ScriptedInput};

    fn human(lines: &[&str]) -> Driver<NimRules> {
        Driver::Human(Box::new(ScriptedInput::new(lines.iter().copied())))
    }

    fn ai(seed: u64) -> Driver<NimRules> {
        Driver::Ai(Box::new(NimStrategy::new(GameRng::new(seed))))
    }

    fn new_loop(
        rows: &[i64],
        home: Driver<NimRules>,
        away: Driver<NimRules>,
    ) -> TurnLoop<NimRules, CapturedConsole> {
        let (rules, state) = NimGameBuilder::new().rows(rows).build().unwrap();
        let mut drivers = [Some(home), Some(away)];
        let players = SideMap::new(|side| {
            let driver = drivers[side.index()].take().unwrap();
            PlayerSession::new(rules, side, state.clone(), driver)
        });
        TurnLoop::new(AuthoritySession::new(rules, state), players, CapturedConsole::new())
    }

    #[test]
    fn test_step_walks_the_states() {
        let mut turn_loop = new_loop(&[3, 4, 5], ai(1), ai(2));

        assert_eq!(turn_loop.step(), &LoopState::DispatchingMove(Side::Home));
        assert_eq!(
            turn_loop.step(),
            &LoopState::ApplyingMove {
                side: Side::Home,
                line: "@GAME:MOVE:0,2".into()
            }
        );
        assert_eq!(turn_loop.step(), &LoopState::AwaitingTurn);
        assert_eq!(turn_loop.authority().state_object().rows(), &[1, 4, 5]);
        assert_eq!(turn_loop.step(), &LoopState::DispatchingMove(Side::Away));

        // The mirror was synced before Away was asked
        assert_eq!(turn_loop.player(Side::Away).state_object().rows(), &[1, 4, 5]);
    }

    #[test]
    fn test_rejected_move_asks_same_side_again() {
        let mut turn_loop = new_loop(&[1], human(&["abc", "0,5", "0,1"]), ai(0));
        let report = turn_loop.run();

        assert_eq!(report.winner, Winner::Home);
        assert_eq!(report.plies(), 1);

        let errors: Vec<_> = turn_loop.console().errors().collect();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].starts_with("malformed move \"abc\""));
        assert!(errors[1].starts_with("illegal move 0,5"));

        let shown: Vec<_> = turn_loop.console().displayed().collect();
        assert_eq!(shown, ["Move 0,1 accepted.[Home]", "Home won.", "Good-bye!"]);
    }

    #[test]
    fn test_closed_input_aborts_match() {
        let mut turn_loop = new_loop(&[2, 2], human(&[]), ai(0));
        let report = turn_loop.run();

        assert_eq!(report.winner, Winner::Aborted);
        assert!(turn_loop.is_finished());
        let errors: Vec<_> = turn_loop.console().errors().collect();
        assert_eq!(errors, ["Home cannot move: input closed", "Match aborted."]);
    }

    #[test]
    fn test_protocol_lines_from_humans_pass_through() {
        let mut turn_loop = new_loop(&[1], human(&["@MESSAGE:hello", "@BOGUS", "@GAME:MOVE:0,1"]), ai(0));
        let report = turn_loop.run();

        assert_eq!(report.winner, Winner::Home);
        let shown: Vec<_> = turn_loop.console().displayed().collect();
        assert_eq!(shown[0], "hello");
        assert!(turn_loop.console().errors().any(|e| e.contains("unrecognized command")));
    }

    #[test]
    fn test_report_is_a_cheap_snapshot() {
        let mut turn_loop = new_loop(&[3, 4, 5], ai(5), ai(6));
        let report = turn_loop.run();
        let copy = report.clone();

        assert_eq!(copy.plies(), report.plies());
        assert_eq!(copy.history, *turn_loop.authority().history());
        assert_eq!(report.history.front().map(|r| r.mv.to_string()).as_deref(), Some("0,2"));
    }

    #[test]
    fn test_terminal_is_sticky() {
        let mut turn_loop = new_loop(&[1], ai(0), ai(1));
        turn_loop.run();
        let lines = turn_loop.console().lines().len();

        assert_eq!(turn_loop.step(), &LoopState::Terminal);
        assert_eq!(turn_loop.console().lines().len(), lines);
    }
}
