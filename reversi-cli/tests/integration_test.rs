//! Integration tests for the reversi engine
//!
//! Tests the full stack: board rules, turn protocol, AI players, and
//! snapshot persistence working together over complete games.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use reversi_core::{
    AlphaBetaAI, Game, GameResult, Move, Player, RandomAI, Snapshot,
};

// ============================================================================
// TEST FIXTURES
// ============================================================================

/// Play one full game, black driven by `black_move`, white by `white_move`,
/// checking the score invariant after every move
fn play_full_game(
    mut black_move: impl FnMut(&Game) -> Move,
    mut white_move: impl FnMut(&Game) -> Move,
) -> Game {
    let mut game = Game::new();

    while !game.is_over() {
        let mv = match game.turn() {
            Player::Black => black_move(&game),
            Player::White => white_move(&game),
        };
        let square = match mv {
            Move::Place(sq) => sq,
            Move::Pass => panic!("engine passed while the game loop says it can move"),
        };
        game.play(square).expect("engines only propose legal moves");

        let board = game.board();
        assert_eq!(
            board.disc_count(),
            board.black_score() + board.white_score(),
            "disc-count invariant broken mid-game"
        );
    }

    game
}

// ============================================================================
// FULL GAMES
// ============================================================================

#[test]
fn test_alpha_beta_vs_random_completes() {
    let ai = AlphaBetaAI::new(2);
    let mut random = RandomAI::new(9);

    let game = play_full_game(
        |g| ai.best_move(g.board(), Player::Black),
        |g| random.best_move(g.board(), Player::White),
    );

    assert_ne!(game.result(), GameResult::Ongoing);
    assert!(game.board().disc_count() >= 4);
}

#[test]
fn test_alpha_beta_self_play_is_deterministic() {
    let play = || {
        let ai = AlphaBetaAI::new(2);
        play_full_game(
            |g| ai.best_move(g.board(), Player::Black),
            |g| ai.best_move(g.board(), Player::White),
        )
    };

    let first = play();
    let second = play();
    assert_eq!(first.result(), second.result());
    assert_eq!(first.board(), second.board());
}

#[test]
fn test_random_vs_random_games_end() {
    for seed in 0..5 {
        let mut black = RandomAI::new(seed);
        let mut white = RandomAI::new(seed + 100);
        let game = play_full_game(
            |g| black.best_move(g.board(), Player::Black),
            |g| white.best_move(g.board(), Player::White),
        );
        assert_ne!(game.result(), GameResult::Ongoing, "seed {}", seed);
    }
}

// ============================================================================
// PERSISTENCE ACROSS A LIVE GAME
// ============================================================================

#[test]
fn test_snapshot_round_trip_mid_game() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let mut game = Game::new();

    // Advance a handful of random plies
    for _ in 0..6 {
        if game.is_over() {
            break;
        }
        let moves = game.legal_moves();
        let &square = moves.choose(&mut rng).unwrap();
        game.play(square).unwrap();
    }

    let json = serde_json::to_string(&Snapshot::capture(&game)).unwrap();
    let restored: Snapshot = serde_json::from_str(&json).unwrap();
    let resumed = restored.restore().unwrap();

    assert_eq!(resumed.board(), game.board());
    assert_eq!(resumed.turn(), game.turn());

    // The resumed game must continue exactly like the original
    let ai = AlphaBetaAI::new(3);
    assert_eq!(
        ai.best_move(resumed.board(), resumed.turn()),
        ai.best_move(game.board(), game.turn())
    );
}
