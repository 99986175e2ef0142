// crates/fade-core/tests/rules_properties.rs
use fade_core::{Board, GameState, Mark, Outcome, RuleError, Rules, WINNING_LINES};

/// Play `moves` with alternating marks starting from X; panics on rejection.
fn play(state: &mut GameState, moves: &[usize]) -> Option<Outcome> {
    let mut last = None;
    for &cell in moves {
        let mark = state.current_turn();
        last = state
            .apply_move(mark, cell)
            .unwrap_or_else(|e| panic!("move {cell} rejected: {e}"))
            .outcome;
    }
    last
}

#[test]
fn top_row_example_wins_for_x_on_the_fifth_move() {
    let mut state = GameState::default();
    assert_eq!(play(&mut state, &[0, 4, 1, 3]), None);

    let outcome = state.apply_move(Mark::X, 2).unwrap().outcome;
    assert_eq!(outcome, Some(Outcome::Winner(Mark::X)));
}

#[test]
fn every_winning_line_is_detected_on_the_completing_move() {
    for line in WINNING_LINES {
        let spare: Vec<usize> = (0..9).filter(|c| !line.contains(c)).take(2).collect();
        let moves = [line[0], spare[0], line[1], spare[1], line[2]];

        let mut state = GameState::default();
        assert_eq!(play(&mut state, &moves[..4]), None, "line {line:?} finished early");
        assert_eq!(
            play(&mut state, &moves[4..]),
            Some(Outcome::Winner(Mark::X)),
            "line {line:?} not detected"
        );
    }
}

#[test]
fn o_can_win_too() {
    // X: 0, 1, 8   O: 3, 4, 5
    let mut state = GameState::default();
    assert_eq!(play(&mut state, &[0, 3, 1, 4, 8, 5]), Some(Outcome::Winner(Mark::O)));
}

#[test]
fn occupied_cell_is_rejected_without_mutation() {
    let mut state = GameState::default();
    play(&mut state, &[4]);
    let before = state.clone();

    assert_eq!(state.apply_move(Mark::O, 4), Err(RuleError::CellOccupied(4)));
    assert_eq!(state, before);
    assert_eq!(state.current_turn(), Mark::O);
}

#[test]
fn wrong_mark_is_rejected_without_mutation() {
    let mut state = GameState::default();
    let before = state.clone();

    assert_eq!(
        state.apply_move(Mark::O, 0),
        Err(RuleError::NotYourTurn {
            expected: Mark::X,
            got: Mark::O,
        })
    );
    assert_eq!(state, before);
}

#[test]
fn turn_is_checked_before_occupancy() {
    let mut state = GameState::default();
    play(&mut state, &[0]);
    assert!(matches!(state.apply_move(Mark::X, 0), Err(RuleError::NotYourTurn { .. })));
}

#[test]
fn off_board_index_is_rejected() {
    let mut state = GameState::default();
    assert_eq!(state.apply_move(Mark::X, 9), Err(RuleError::OutOfRange(9)));
    assert_eq!(state.history_len(), 0);
}

#[test]
fn sixth_move_evicts_the_oldest_mark() {
    let mut state = GameState::default();
    assert_eq!(play(&mut state, &[0, 4, 8, 2, 6]), None);
    assert_eq!(state.fading_piece(), Some(0));
    assert_eq!(state.board().occupied(), 5);

    let result = state.apply_move(Mark::O, 3).unwrap();
    assert_eq!(result.evicted, Some(0));
    assert_eq!(result.fading_piece, Some(4));
    assert_eq!(result.outcome, None);
    assert_eq!(state.board().get(0), None);
    assert_eq!(state.board().get(3), Some(Mark::O));
    assert_eq!(state.history().collect::<Vec<_>>(), vec![4, 8, 2, 6, 3]);

    // The freshly cleared cell is playable again.
    let result = state.apply_move(Mark::X, 0).unwrap();
    assert_eq!(result.evicted, Some(4));
    assert_eq!(state.board().get(0), Some(Mark::X));
}

#[test]
fn fading_piece_is_only_reported_when_the_window_is_full() {
    let mut state = GameState::default();
    for (n, cell) in [0, 4, 8, 2].into_iter().enumerate() {
        let result = state.apply_move(state.current_turn(), cell).unwrap();
        assert_eq!(result.fading_piece, None, "after {} moves", n + 1);
    }
}

#[test]
fn faded_mark_no_longer_counts_towards_a_line() {
    let moves = [0, 3, 1, 4, 6, 7, 2];

    // Classic rules: X completes 0-1-2.
    let mut classic = GameState::new(Rules::classic());
    assert_eq!(play(&mut classic, &moves), Some(Outcome::Winner(Mark::X)));

    // Fading rules: X's mark on 0 faded on move six, so 0-1-2 is not a line.
    let mut fading = GameState::default();
    assert_eq!(play(&mut fading, &moves), None);
    assert_eq!(fading.board().get(0), None);
    assert_eq!(fading.board().get(3), None);
}

#[test]
fn full_board_without_a_line_is_a_draw() {
    let mut state = GameState::new(Rules::classic());
    assert_eq!(play(&mut state, &[0, 1, 2, 4, 3, 5, 7, 6]), None);
    assert_eq!(play(&mut state, &[8]), Some(Outcome::Draw));
    assert!(state.board().is_full());
}

#[test]
fn board_outcome_prefers_a_line_over_a_full_board() {
    use Mark::{O, X};
    let full_with_line = Board::from_cells([
        Some(X), Some(X), Some(X),
        Some(O), Some(O), Some(X),
        Some(X), Some(O), Some(O),
    ]);
    assert_eq!(full_with_line.outcome(), Some(Outcome::Winner(X)));

    let full_no_line = Board::from_cells([
        Some(X), Some(O), Some(X),
        Some(X), Some(O), Some(O),
        Some(O), Some(X), Some(X),
    ]);
    assert_eq!(full_no_line.outcome(), Some(Outcome::Draw));
    assert_eq!(Board::new().outcome(), None);
}

/// Long pseudo-random games: turn parity, window bound and board/history
/// consistency hold after every accepted move.
#[test]
fn invariants_hold_over_long_random_games() {
    let mut seed: u64 = 0x5eed;
    let mut next = move || {
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (seed >> 33) as usize
    };

    for _game in 0..200 {
        let mut state = GameState::default();
        let mut accepted = 0usize;

        for _ in 0..60 {
            let empties: Vec<usize> = (0..9).filter(|&c| state.board().is_empty_at(c)).collect();
            let cell = empties[next() % empties.len()];
            let occupied_before = state.board().occupied();

            let result = state.apply_move(state.current_turn(), cell).unwrap();
            accepted += 1;

            let expected_turn = if accepted % 2 == 0 { Mark::X } else { Mark::O };
            assert_eq!(state.current_turn(), expected_turn);
            assert!(state.history_len() <= 5);
            assert_eq!(state.board().occupied(), state.history_len());

            if accepted > 5 {
                assert!(result.evicted.is_some());
                assert_eq!(state.board().occupied(), occupied_before);
            } else {
                assert_eq!(result.evicted, None);
            }

            // Every live cell holds the mark of whoever placed it: history
            // entries alternate X/O relative to the move count.
            let first_mark = if (accepted - state.history_len()) % 2 == 0 { Mark::X } else { Mark::O };
            for (i, cell) in state.history().enumerate() {
                let mark = if i % 2 == 0 { first_mark } else { first_mark.opponent() };
                assert_eq!(state.board().get(cell), Some(mark));
            }

            if result.outcome.is_some() {
                break;
            }
        }
    }
}

#[test]
fn window_is_clamped_to_the_board_size() {
    assert_eq!(Rules::with_window(0).fading_window, 1);
    assert_eq!(Rules::with_window(usize::MAX), Rules::classic());

    // A hand-built oversized window still yields a usable game.
    let mut state = GameState::new(Rules {
        fading_window: usize::MAX,
    });
    assert_eq!(play(&mut state, &[0, 3, 1, 4, 2]), Some(Outcome::Winner(Mark::X)));
}
