//! Depth-bounded alpha-beta search over board snapshots

use crate::eval::{evaluate, Weights};
use crate::game::{Board, Move, Player};
use crate::board::Square;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

// ============================================================================
// SEARCH NODE
// ============================================================================

/// One branch of the search tree: an owned board snapshot, the placement that
/// produced it, and the precomputed legal moves for the side to move
///
/// Nodes are transient and strictly hierarchical; every child deep-copies its
/// parent's board, so no branch ever observes another branch's mutations.
pub struct SearchNode {
    board: Board,
    to_move: Player,
    produced_by: Option<Square>,
    moves: Vec<Square>,
}

impl SearchNode {
    /// Root node for a search: `to_move` is the side choosing a move
    pub fn root(board: Board, to_move: Player) -> Self {
        let moves = board.legal_moves(to_move);
        Self {
            board,
            to_move,
            produced_by: None,
            moves,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn to_move(&self) -> Player {
        self.to_move
    }

    /// The placement that produced this node, None at the root
    pub fn produced_by(&self) -> Option<Square> {
        self.produced_by
    }

    /// Legal placements for the side to move, in board scan order
    pub fn moves(&self) -> &[Square] {
        &self.moves
    }

    /// Child node after playing `sq` for the side to move
    ///
    /// Callers only ever iterate [`SearchNode::moves`], so the placement is
    /// legal by construction.
    pub fn apply(&self, sq: Square) -> SearchNode {
        let mut board = self.board.clone();
        let played = board.play_move(sq, self.to_move);
        debug_assert!(played, "apply called with a move outside the node's list");

        let opponent = self.to_move.opponent();
        let moves = board.legal_moves(opponent);
        SearchNode {
            board,
            to_move: opponent,
            produced_by: Some(sq),
            moves,
        }
    }

    /// Child node for a forced pass: same discs, opponent to move
    pub fn pass(&self) -> SearchNode {
        let opponent = self.to_move.opponent();
        let moves = self.board.legal_moves(opponent);
        SearchNode {
            board: self.board.clone(),
            to_move: opponent,
            produced_by: None,
            moves,
        }
    }

    /// True when no continuation exists for either side
    ///
    /// A blocked mover alone is not terminal: the turn passes. The game only
    /// ends when the board is full or both sides are without a legal move.
    pub fn is_terminal(&self) -> bool {
        if self.board.is_full() {
            return true;
        }
        self.moves.is_empty() && !self.board.has_legal_move(self.to_move.opponent())
    }
}

// ============================================================================
// NEGAMAX WITH ALPHA-BETA
// ============================================================================

fn negamax(node: &SearchNode, depth: u32, mut alpha: f32, beta: f32, weights: &Weights) -> f32 {
    if depth == 0 || node.is_terminal() {
        return evaluate(node.board(), node.to_move(), weights);
    }

    // Blocked mover: forced pass, opponent continues
    if node.moves().is_empty() {
        return -negamax(&node.pass(), depth - 1, -beta, -alpha, weights);
    }

    let mut best = f32::NEG_INFINITY;
    for &sq in node.moves() {
        let child = node.apply(sq);
        let score = -negamax(&child, depth - 1, -beta, -alpha, weights);

        best = best.max(score);
        alpha = alpha.max(score);
        if alpha >= beta {
            break;
        }
    }
    best
}

// ============================================================================
// ALPHA-BETA AI
// ============================================================================

/// Alpha-beta AI player
#[derive(Clone, Debug)]
pub struct AlphaBetaAI {
    pub depth: u32,
    pub weights: Weights,
}

impl AlphaBetaAI {
    pub fn new(depth: u32) -> Self {
        Self {
            depth,
            weights: Weights::default(),
        }
    }

    pub fn with_weights(depth: u32, weights: Weights) -> Self {
        Self { depth, weights }
    }

    /// Best placement for `side`, or [`Move::Pass`] when none exists
    pub fn best_move(&self, board: &Board, side: Player) -> Move {
        self.search(board, side).1
    }

    /// Search the position, returning (value, move) from `side`'s perspective
    ///
    /// Depth 0 and a blocked root both return the static evaluation with the
    /// pass sentinel, without descending.
    pub fn search(&self, board: &Board, side: Player) -> (f32, Move) {
        let root = SearchNode::root(board.clone(), side);

        if self.depth == 0 || root.moves().is_empty() {
            return (evaluate(root.board(), side, &self.weights), Move::Pass);
        }

        let mut best_value = f32::NEG_INFINITY;
        let mut best_move = Move::Pass;
        let mut alpha = f32::NEG_INFINITY;

        for &sq in root.moves() {
            let child = root.apply(sq);
            let value = -negamax(&child, self.depth - 1, f32::NEG_INFINITY, -alpha, &self.weights);

            if value > best_value {
                best_value = value;
                best_move = Move::Place(sq);
            }
            alpha = alpha.max(value);
        }

        (best_value, best_move)
    }

    /// Static evaluation of a position for `side`
    pub fn evaluate(&self, board: &Board, side: Player) -> f32 {
        evaluate(board, side, &self.weights)
    }
}

// ============================================================================
// RANDOM BASELINE
// ============================================================================

/// Uniform random player with a seeded RNG, used as a match baseline
pub struct RandomAI {
    rng: ChaCha8Rng,
}

impl RandomAI {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn best_move(&mut self, board: &Board, side: Player) -> Move {
        match board.legal_moves(side).choose(&mut self.rng) {
            Some(&sq) => Move::Place(sq),
            None => Move::Pass,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
