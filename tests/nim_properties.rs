//! Property tests for Nim rules, encoding and the optimal strategy.

use nim_engine::games::nim::{choose_move, nim_sum, winning_move, NimMove, NimState};
use nim_engine::{GameRng, MoveError, Side, Winner};
use proptest::prelude::*;

/// A starting layout with at least one stick.
fn layout() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(0i64..16, 1..6).prop_filter("board must hold a stick", |rows| {
        rows.iter().any(|&n| n > 0)
    })
}

/// Walk a random line of play from `rows`, picking each move with the
/// next value of `picks`. Returns every state visited, starting state first.
fn play_out(rows: &[i64], picks: &[usize]) -> Vec<NimState> {
    let mut state = NimState::new_game(rows).unwrap();
    let mut visited = vec![state.clone()];
    for &pick in picks {
        let Some(side) = state.turn() else { break };
        let moves: Vec<NimMove> = state
            .rows()
            .iter()
            .enumerate()
            .flat_map(|(row, &n)| (1..=n).map(move |count| NimMove::new(row, count)))
            .collect();
        let mv = moves[pick % moves.len()];
        state = state.apply_move(side, &mv).unwrap();
        visited.push(state.clone());
    }
    visited
}

fn picks() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(any::<usize>(), 0..64)
}

proptest! {
    /// From any position with a non-zero nim-sum the chosen move leaves zero.
    #[test]
    fn optimal_move_zeroes_nim_sum(rows in layout(), seed in any::<u64>()) {
        let state = NimState::new_game(&rows).unwrap();
        prop_assume!(nim_sum(state.rows()) != 0);

        let mut rng = GameRng::new(seed);
        let mv = choose_move(state.rows(), &mut rng).unwrap();
        prop_assert_eq!(Some(mv), winning_move(state.rows()));

        let next = state.apply_move(Side::Home, &mv).unwrap();
        prop_assert_eq!(nim_sum(next.rows()), 0);
    }

    /// Whatever the nim-sum, the chosen move is legal.
    #[test]
    fn chosen_move_is_always_legal(rows in layout(), seed in any::<u64>()) {
        let state = NimState::new_game(&rows).unwrap();
        let mut rng = GameRng::new(seed);
        let mv = choose_move(state.rows(), &mut rng).unwrap();
        prop_assert!(state.legal_move(mv.row, mv.count));
    }

    /// Terminal exactly when every row is empty; decided exactly when terminal.
    #[test]
    fn winner_is_decided_exactly_at_the_end(rows in layout(), picks in picks()) {
        let visited = play_out(&rows, &picks);
        for pair in visited.windows(2) {
            let (before, after) = (&pair[0], &pair[1]);
            prop_assert_eq!(after.is_terminal(), after.rows().iter().all(|&n| n == 0));
            prop_assert_eq!(after.winner().is_decided(), after.is_terminal());
            prop_assert_eq!(after.turn().is_none(), after.is_terminal());
            if after.is_terminal() {
                let mover = before.turn().unwrap();
                prop_assert_eq!(after.winner(), Winner::for_side(mover));
            }
        }
    }

    /// Every reachable state survives a trip through its wire encoding.
    #[test]
    fn reachable_states_decode_to_themselves(rows in layout(), picks in picks()) {
        for state in play_out(&rows, &picks) {
            let text = state.encode();
            prop_assert_eq!(NimState::decode(&text).unwrap(), state);
        }
    }

    /// Over-taking, zero-taking and out-of-turn moves are rejected and the
    /// state is left alone.
    #[test]
    fn rejected_moves_leave_state_unchanged(rows in layout(), row in 0usize..8, extra in 1u32..5) {
        let state = NimState::new_game(&rows).unwrap();
        let before = state.clone();

        if let Some(&n) = state.rows().get(row) {
            let too_many = NimMove::new(row, n + extra);
            let is_illegal = matches!(
                state.apply_move(Side::Home, &too_many),
                Err(MoveError::IllegalMove { .. })
            );
            prop_assert!(is_illegal);

            let none = NimMove::new(row, 0);
            let is_illegal = matches!(
                state.apply_move(Side::Home, &none),
                Err(MoveError::IllegalMove { .. })
            );
            prop_assert!(is_illegal);
        }

        let any_move = NimMove::new(row, 1);
        prop_assert_eq!(
            state.apply_move(Side::Away, &any_move),
            Err(MoveError::OutOfTurn { player: Side::Away })
        );
        prop_assert_eq!(state, before);
    }
}
