//! Position evaluation: disc parity, mobility, corner control

use crate::game::{Board, Player};
use serde::{Deserialize, Serialize};

/// Component weights for position evaluation
///
/// Each component scores in [-100, 100]; the composite is their weighted sum,
/// so the weights should sum to 1.0. Mobility and corner control carry roughly
/// twice the weight of raw disc parity: on a board this small, early disc
/// count says little about the final outcome.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Weights {
    pub parity: f32,
    pub mobility: f32,
    pub corners: f32,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            parity: 0.2,
            mobility: 0.4,
            corners: 0.4,
        }
    }
}

/// Normalized advantage ratio: 100 * (a - b) / (a + b), 0 when both are 0
fn ratio(a: u32, b: u32) -> f32 {
    let sum = a + b;
    if sum == 0 {
        0.0
    } else {
        100.0 * (a as f32 - b as f32) / sum as f32
    }
}

/// Evaluate a position from `side`'s perspective
pub fn evaluate(board: &Board, side: Player, weights: &Weights) -> f32 {
    let opponent = side.opponent();

    let parity = ratio(board.score(side), board.score(opponent));
    let mobility = ratio(
        board.legal_moves(side).len() as u32,
        board.legal_moves(opponent).len() as u32,
    );
    let corners = ratio(board.corner_count(side), board.corner_count(opponent));

    weights.parity * parity + weights.mobility * mobility + weights.corners * corners
}
