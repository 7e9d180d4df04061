//! Reversi Core - 9x7 Othello engine and AI
//!
//! This crate provides the game logic for a 9x7 Othello variant:
//! - Board geometry and "D3"-style coordinate notation
//! - Move legality, the directional flip scan, and score bookkeeping
//! - Live-game turn protocol with forced-pass handling
//! - Position evaluation (parity, mobility, corner control)
//! - Depth-bounded negamax alpha-beta AI
//! - Grid + scores + turn snapshot persistence

pub mod board;
pub mod game;
pub mod eval;
pub mod ai;
pub mod snapshot;

// Re-exports for convenient access
pub use board::{Square, ParseSquareError, CORNERS, COLUMNS, DIRECTIONS, LINES};
pub use game::{Board, Game, GameResult, IllegalMove, Move, PlayOutcome, Player};
pub use eval::{evaluate, Weights};
pub use ai::{AlphaBetaAI, RandomAI, SearchNode};
pub use snapshot::{Snapshot, SnapshotError, EMPTY_CELL_ID};
