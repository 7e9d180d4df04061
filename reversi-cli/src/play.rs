//! Play command - interactive game loop on stdin

use std::fs;
use std::io::{self, BufRead, Write as _};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use reversi_core::{
    AlphaBetaAI, Game, GameResult, Move, PlayOutcome, Player, Snapshot, Square,
};

#[derive(Args)]
pub struct PlayArgs {
    /// Which side the computer plays
    #[arg(long, value_enum, default_value = "white")]
    pub ai: AiSide,

    /// AI search depth (at least 1; depth 0 never places a disc)
    #[arg(long, default_value = "5", value_parser = clap::value_parser!(u32).range(1..))]
    pub depth: u32,

    /// Resume from a saved snapshot
    #[arg(long, value_name = "FILE")]
    pub load: Option<PathBuf>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AiSide {
    White,
    Black,
    Both,
    None,
}

impl AiSide {
    fn controls(self, player: Player) -> bool {
        match self {
            AiSide::White => player == Player::White,
            AiSide::Black => player == Player::Black,
            AiSide::Both => true,
            AiSide::None => false,
        }
    }
}

pub fn run(args: PlayArgs) -> Result<()> {
    let mut game = match &args.load {
        Some(path) => load_game(path)?,
        None => Game::new(),
    };
    let ai = AlphaBetaAI::new(args.depth);

    tracing::info!("Starting game (ai={}, depth={})", ai_label(args.ai), args.depth);
    println!("{}", render(&game));

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    while !game.is_over() {
        let mover = game.turn();

        let square = if args.ai.controls(mover) {
            match ai.best_move(game.board(), mover) {
                Move::Place(sq) => {
                    println!("{} plays {}", mover, sq);
                    sq
                }
                // The game loop never leaves the turn on a blocked side
                Move::Pass => unreachable!("AI asked to move with no legal move"),
            }
        } else {
            match read_human_move(&mut lines, &game)? {
                Some(sq) => sq,
                None => return Ok(()), // quit
            }
        };

        match game.play(square) {
            Ok(outcome) => {
                println!("{}", render(&game));
                report_outcome(&game, outcome);
            }
            Err(err) => println!("{}", err),
        }
    }

    Ok(())
}

/// Prompt until the player enters a move, or None on quit/EOF
fn read_human_move(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    game: &Game,
) -> Result<Option<Square>> {
    loop {
        print!("{} ({})> ", game.turn(), score_line(game));
        io::stdout().flush()?;

        let line = match lines.next() {
            Some(line) => line?,
            None => return Ok(None),
        };
        let input = line.trim();

        match input {
            "" => continue,
            "quit" | "exit" => return Ok(None),
            "moves" => {
                let moves: Vec<String> =
                    game.legal_moves().iter().map(Square::to_string).collect();
                println!("Legal moves: {}", moves.join(" "));
            }
            _ if input.starts_with("save ") => {
                let path = Path::new(input.trim_start_matches("save ").trim());
                match save_game(game, path) {
                    Ok(()) => println!("Saved to {}", path.display()),
                    Err(err) => println!("Save failed: {:#}", err),
                }
            }
            _ => match input.parse::<Square>() {
                Ok(square) => return Ok(Some(square)),
                Err(err) => println!("{} (try e.g. D3, or 'moves')", err),
            },
        }
    }
}

fn report_outcome(game: &Game, outcome: PlayOutcome) {
    match outcome {
        PlayOutcome::Next(_) => {}
        PlayOutcome::OpponentPassed(blocked) => {
            println!("{} has no legal move and passes", blocked);
        }
        PlayOutcome::GameOver(result) => {
            println!("Game over: {} ({})", result_label(result), score_line(game));
        }
    }
}

fn load_game(path: &Path) -> Result<Game> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot: {}", path.display()))?;
    let snapshot: Snapshot = serde_json::from_str(&content)
        .with_context(|| format!("Malformed snapshot file: {}", path.display()))?;
    let game = snapshot
        .restore()
        .with_context(|| format!("Invalid snapshot state: {}", path.display()))?;
    tracing::info!("Resumed game from {}", path.display());
    Ok(game)
}

fn save_game(game: &Game, path: &Path) -> Result<()> {
    let snapshot = Snapshot::capture(game);
    let json = serde_json::to_string_pretty(&snapshot)?;
    fs::write(path, json)
        .with_context(|| format!("Failed to write snapshot: {}", path.display()))?;
    Ok(())
}

// ============================================================================
// RENDERING
// ============================================================================

fn render(game: &Game) -> String {
    let board = game.board();
    let mut out = String::from("\n  A B C D E F G H I\n");
    for line in 0..reversi_core::LINES {
        out.push_str(&format!("{} ", line + 1));
        for col in 0..reversi_core::COLUMNS {
            let glyph = match board.cell(Square::new(col, line)) {
                Some(Player::Black) => 'X',
                Some(Player::White) => 'O',
                None => '.',
            };
            out.push(glyph);
            out.push(' ');
        }
        out.push('\n');
    }
    out
}

fn score_line(game: &Game) -> String {
    format!(
        "X {} - O {}",
        game.board().black_score(),
        game.board().white_score()
    )
}

fn result_label(result: GameResult) -> &'static str {
    match result {
        GameResult::BlackWins => "Black wins",
        GameResult::WhiteWins => "White wins",
        GameResult::Draw => "draw",
        GameResult::Ongoing => "ongoing",
    }
}

fn ai_label(side: AiSide) -> &'static str {
    match side {
        AiSide::White => "white",
        AiSide::Black => "black",
        AiSide::Both => "both",
        AiSide::None => "none",
    }
}
