//! Board geometry for the fixed 9x7 grid

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Number of columns (horizontal axis, lettered A-I in notation)
pub const COLUMNS: i8 = 9;

/// Number of lines (vertical axis, numbered 1-7 in notation)
pub const LINES: i8 = 7;

/// A square on the grid, addressed by (column, line)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Square {
    pub col: i8,
    pub line: i8,
}

impl Square {
    pub const fn new(col: i8, line: i8) -> Self {
        Self { col, line }
    }

    /// Check if this square is on the board
    pub fn is_valid(&self) -> bool {
        self.col >= 0 && self.col < COLUMNS && self.line >= 0 && self.line < LINES
    }

    /// Step one square in a compass direction
    pub fn step(&self, (dc, dl): (i8, i8)) -> Square {
        Square::new(self.col + dc, self.line + dl)
    }
}

/// Direction vectors (dcol, dline)
/// Index: 0=E, 1=SE, 2=S, 3=SW, 4=W, 5=NW, 6=N, 7=NE
pub const DIRECTIONS: [(i8, i8); 8] = [
    (1, 0),   // E
    (1, 1),   // SE
    (0, 1),   // S
    (-1, 1),  // SW
    (-1, 0),  // W
    (-1, -1), // NW
    (0, -1),  // N
    (1, -1),  // NE
];

/// The four corner squares
pub const CORNERS: [Square; 4] = [
    Square::new(0, 0),
    Square::new(COLUMNS - 1, 0),
    Square::new(0, LINES - 1),
    Square::new(COLUMNS - 1, LINES - 1),
];

/// Notation parse failure ("D3"-style coordinates)
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseSquareError {
    #[error("expected a letter A-I followed by a digit 1-7, got {0:?}")]
    Malformed(String),
    #[error("square {0:?} is off the board")]
    OutOfRange(String),
}

impl fmt::Display for Square {
    /// Text notation: column letter then line number, e.g. "D3" = (3, 2).
    /// Off-board squares fall back to the raw pair.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_valid() {
            return write!(f, "({},{})", self.col, self.line);
        }
        let col = (b'A' + self.col as u8) as char;
        write!(f, "{}{}", col, self.line + 1)
    }
}

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (col_char, line_char) = match (chars.next(), chars.next(), chars.next()) {
            (Some(c), Some(l), None) => (c, l),
            _ => return Err(ParseSquareError::Malformed(s.to_string())),
        };

        let col_char = col_char.to_ascii_uppercase();
        if !col_char.is_ascii_uppercase() || !line_char.is_ascii_digit() {
            return Err(ParseSquareError::Malformed(s.to_string()));
        }

        // Signed arithmetic: '0' must come out as line -1, not underflow
        let square = Square::new(
            col_char as i8 - 'A' as i8,
            line_char as i8 - '1' as i8,
        );
        if !square.is_valid() {
            return Err(ParseSquareError::OutOfRange(s.to_string()));
        }
        Ok(square)
    }
}
