//! Match command - play a series of games between two computer players

use anyhow::Result;
use clap::{Args, ValueEnum};
use serde::Serialize;

use reversi_core::{AlphaBetaAI, Game, GameResult, Move, Player, RandomAI, Square};

// ============================================================================
// COMMAND ARGUMENTS
// ============================================================================

#[derive(Args)]
pub struct MatchArgs {
    /// Black player
    #[arg(long, value_enum, default_value = "alpha-beta")]
    pub black: PlayerKind,

    /// White player
    #[arg(long, value_enum, default_value = "random")]
    pub white: PlayerKind,

    /// Number of games to play
    #[arg(long, default_value = "10")]
    pub games: usize,

    /// AI search depth for alpha-beta (at least 1; depth 0 never places a disc)
    #[arg(long, default_value = "5", value_parser = clap::value_parser!(u32).range(1..))]
    pub depth: u32,

    /// RNG seed for random players
    #[arg(long, default_value = "42")]
    pub seed: u64,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PlayerKind {
    AlphaBeta,
    Random,
}

/// One side's engine for the duration of a match
enum Engine {
    AlphaBeta(AlphaBetaAI),
    Random(RandomAI),
}

impl Engine {
    fn new(kind: PlayerKind, depth: u32, seed: u64) -> Self {
        match kind {
            PlayerKind::AlphaBeta => Engine::AlphaBeta(AlphaBetaAI::new(depth)),
            PlayerKind::Random => Engine::Random(RandomAI::new(seed)),
        }
    }

    fn best_move(&mut self, game: &Game) -> Move {
        match self {
            Engine::AlphaBeta(ai) => ai.best_move(game.board(), game.turn()),
            Engine::Random(ai) => ai.best_move(game.board(), game.turn()),
        }
    }
}

/// Result of a single game
#[derive(Clone, Debug, Serialize)]
struct GameRecord {
    game_number: usize,
    result: GameResult,
    black_score: u32,
    white_score: u32,
    moves_played: usize,
}

/// Aggregated match results
#[derive(Clone, Debug, Serialize)]
struct MatchResults {
    games: Vec<GameRecord>,
    black_wins: usize,
    white_wins: usize,
    draws: usize,
}

// ============================================================================
// ORCHESTRATION
// ============================================================================

pub fn run(args: MatchArgs) -> Result<()> {
    tracing::info!(
        "Starting match: {:?} (black) vs {:?} (white), {} games, depth={}",
        args.black,
        args.white,
        args.games,
        args.depth
    );

    let results = play_match(&args);
    report_results(&results, &args)?;

    Ok(())
}

fn play_match(args: &MatchArgs) -> MatchResults {
    let mut games = Vec::with_capacity(args.games);
    let (mut black_wins, mut white_wins, mut draws) = (0, 0, 0);

    for game_number in 1..=args.games {
        // Distinct seed per game so random players vary between games
        let seed = args.seed.wrapping_add(game_number as u64);
        let mut black = Engine::new(args.black, args.depth, seed);
        let mut white = Engine::new(args.white, args.depth, seed ^ 0x5eed);

        let record = play_single_game(game_number, &mut black, &mut white);
        match record.result {
            GameResult::BlackWins => black_wins += 1,
            GameResult::WhiteWins => white_wins += 1,
            GameResult::Draw => draws += 1,
            GameResult::Ongoing => unreachable!("finished game is not ongoing"),
        }
        tracing::info!(
            "Game {}: {:?} ({} - {})",
            game_number,
            record.result,
            record.black_score,
            record.white_score
        );
        games.push(record);
    }

    MatchResults {
        games,
        black_wins,
        white_wins,
        draws,
    }
}

fn play_single_game(game_number: usize, black: &mut Engine, white: &mut Engine) -> GameRecord {
    let mut game = Game::new();
    let mut moves_played = 0;

    while !game.is_over() {
        let engine = match game.turn() {
            Player::Black => &mut *black,
            Player::White => &mut *white,
        };
        let square = match engine.best_move(&game) {
            Move::Place(sq) => sq,
            Move::Pass => unreachable!("engine asked to move with no legal move"),
        };
        play_checked(&mut game, square);
        moves_played += 1;
    }

    GameRecord {
        game_number,
        result: game.result(),
        black_score: game.board().black_score(),
        white_score: game.board().white_score(),
        moves_played,
    }
}

fn play_checked(game: &mut Game, square: Square) {
    if let Err(err) = game.play(square) {
        // Engines only propose moves from the legal list
        unreachable!("engine produced an illegal move: {}", err);
    }
}

fn report_results(results: &MatchResults, args: &MatchArgs) -> Result<()> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(results)?);
        return Ok(());
    }

    println!(
        "Match over: black {} / white {} / draws {}",
        results.black_wins, results.white_wins, results.draws
    );
    for record in &results.games {
        println!(
            "  game {:>3}: {:?} ({} - {}, {} moves)",
            record.game_number,
            record.result,
            record.black_score,
            record.white_score,
            record.moves_played
        );
    }
    Ok(())
}
