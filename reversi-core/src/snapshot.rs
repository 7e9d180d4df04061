//! Saved-game snapshots: grid + scores + turn
//!
//! A snapshot is the full persisted-state contract: the core is completely
//! reconstructible from these three values, with no hidden state.

use crate::board::{COLUMNS, LINES};
use crate::game::{Board, Game, Player};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Cell id for an empty square; player cells carry [`Player::id`]
pub const EMPTY_CELL_ID: i8 = -1;

/// Snapshot load/validation failure
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SnapshotError {
    #[error("grid must be {COLUMNS} columns of {LINES} cells, got {cols}x{lines}")]
    BadDimensions { cols: usize, lines: usize },
    #[error("unknown cell id {id} at column {col}, line {line}")]
    BadCellId { id: i8, col: usize, line: usize },
    #[error("scores {black}-{white} do not match the discs on the grid")]
    ScoreMismatch { black: u32, white: u32 },
}

/// Serializable game snapshot, column-major grid of cell ids
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Snapshot {
    pub grid: Vec<Vec<i8>>,
    pub black_score: u32,
    pub white_score: u32,
    pub white_turn: bool,
}

impl Snapshot {
    /// Capture the persisted state of a live game
    pub fn capture(game: &Game) -> Self {
        let board = game.board();
        let grid = board
            .grid()
            .iter()
            .map(|column| {
                column
                    .iter()
                    .map(|cell| cell.map_or(EMPTY_CELL_ID, Player::id))
                    .collect()
            })
            .collect();

        Self {
            grid,
            black_score: board.black_score(),
            white_score: board.white_score(),
            white_turn: game.turn() == Player::White,
        }
    }

    /// Rebuild a live game, validating cell ids and score consistency
    pub fn restore(&self) -> Result<Game, SnapshotError> {
        if self.grid.len() != COLUMNS as usize
            || self.grid.iter().any(|column| column.len() != LINES as usize)
        {
            return Err(SnapshotError::BadDimensions {
                cols: self.grid.len(),
                lines: self.grid.first().map_or(0, Vec::len),
            });
        }

        let mut cells = [[None; LINES as usize]; COLUMNS as usize];
        for (col, column) in self.grid.iter().enumerate() {
            for (line, &id) in column.iter().enumerate() {
                cells[col][line] = match id {
                    EMPTY_CELL_ID => None,
                    id if id == Player::White.id() => Some(Player::White),
                    id if id == Player::Black.id() => Some(Player::Black),
                    id => return Err(SnapshotError::BadCellId { id, col, line }),
                };
            }
        }

        let board = Board::from_cells(cells);
        if board.black_score() != self.black_score || board.white_score() != self.white_score {
            return Err(SnapshotError::ScoreMismatch {
                black: self.black_score,
                white: self.white_score,
            });
        }

        let turn = if self.white_turn {
            Player::White
        } else {
            Player::Black
        };
        Ok(Game::from_parts(board, turn))
    }
}
