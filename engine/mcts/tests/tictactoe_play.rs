//! Full games of tic-tac-toe played by the searcher.

use engine_core::Node;
use games_tictactoe::{Board, DRAW, O, X};
use mcts::{Mcts, MctsConfig};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

/// Play one game; the searcher plays `searcher_side`, a uniform random
/// player the other side. Returns the winner code.
fn play_against_random(seed: u64, searcher_side: u8) -> u8 {
    let mut search = Mcts::new(MctsConfig::default().with_rollouts(1000).with_seed(seed));
    let mut rng = ChaCha20Rng::seed_from_u64(seed ^ 0xDEAD_BEEF);
    let mut board = Board::new();

    while !board.is_terminal() {
        board = if board.turn() == searcher_side {
            search.run(&board).unwrap().choice
        } else {
            let moves = board.legal_moves();
            let &m = moves.choose(&mut rng).unwrap();
            board.make_move(m).unwrap()
        };
    }

    board.winner()
}

#[test]
fn test_searcher_never_loses_to_random_player() {
    for seed in 0..3 {
        for side in [X, O] {
            let winner = play_against_random(seed, side);
            assert!(
                winner == side || winner == DRAW,
                "searcher playing {side} lost with seed {seed}"
            );
        }
    }
}

#[test]
fn test_self_play_reaches_terminal_position() {
    let mut search = Mcts::new(MctsConfig::default().with_rollouts(300).with_seed(17));
    let mut board = Board::new();
    let mut plies = 0;

    while !board.is_terminal() {
        let next = search.run(&board).unwrap().choice;
        assert_eq!(board.children().iter().filter(|c| **c == next).count(), 1);
        board = next;
        plies += 1;
    }

    assert!((5..=9).contains(&plies));
    assert!(board.reward().is_ok());
}
