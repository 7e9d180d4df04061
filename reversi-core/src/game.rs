//! Game state, move legality, and the directional flip scan

use crate::board::{Square, COLUMNS, DIRECTIONS, LINES};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// ============================================================================
// CORE TYPES
// ============================================================================

/// Player color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    White = 0,
    Black = 1,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::White => Player::Black,
            Player::Black => Player::White,
        }
    }

    /// Stable numeric id, also the cell id used in snapshots
    pub fn id(self) -> i8 {
        self as i8
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::White => write!(f, "White player"),
            Player::Black => write!(f, "Black player"),
        }
    }
}

/// A move: either a disc placement or a forced pass
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    Pass,
    Place(Square),
}

impl Move {
    /// Integer-pair form; `Pass` maps to the (-1, -1) sentinel
    pub fn as_pair(self) -> (i8, i8) {
        match self {
            Move::Pass => (-1, -1),
            Move::Place(sq) => (sq.col, sq.line),
        }
    }

    /// Inverse of [`Move::as_pair`]: the (-1, -1) sentinel is a pass, any
    /// on-board pair a placement, anything else None
    pub fn from_pair(col: i8, line: i8) -> Option<Move> {
        if (col, line) == (-1, -1) {
            return Some(Move::Pass);
        }
        let sq = Square::new(col, line);
        sq.is_valid().then_some(Move::Place(sq))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Pass => write!(f, "pass"),
            Move::Place(sq) => write!(f, "{}", sq),
        }
    }
}

/// Game result
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Ongoing,
    WhiteWins,
    BlackWins,
    Draw,
}

// ============================================================================
// BOARD
// ============================================================================

/// The 9x7 grid and both players' disc counts (clone to mutate in search)
///
/// Invariant: the number of occupied squares always equals the sum of the two
/// scores. Every mutation goes through [`Board::play_move`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    grid: [[Option<Player>; LINES as usize]; COLUMNS as usize],
    scores: [u32; 2],
}

impl Board {
    /// Starting position: four center discs, two per side
    pub fn new() -> Self {
        let mut grid = [[None; LINES as usize]; COLUMNS as usize];

        let (cc, cl) = (COLUMNS as usize / 2, LINES as usize / 2);
        grid[cc][cl] = Some(Player::White);
        grid[cc + 1][cl + 1] = Some(Player::White);
        grid[cc][cl + 1] = Some(Player::Black);
        grid[cc + 1][cl] = Some(Player::Black);

        Self {
            grid,
            scores: [2, 2],
        }
    }

    /// Rebuild a board from raw cells, recounting the scores
    pub(crate) fn from_cells(grid: [[Option<Player>; LINES as usize]; COLUMNS as usize]) -> Self {
        let mut scores = [0u32; 2];
        for column in &grid {
            for cell in column {
                if let Some(p) = cell {
                    scores[p.index()] += 1;
                }
            }
        }
        Self { grid, scores }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    /// Cell owner at a square, or None when empty or off the board
    pub fn cell(&self, sq: Square) -> Option<Player> {
        if !sq.is_valid() {
            return None;
        }
        self.grid[sq.col as usize][sq.line as usize]
    }

    /// Defensive copy of the grid, column-major
    pub fn grid(&self) -> [[Option<Player>; LINES as usize]; COLUMNS as usize] {
        self.grid
    }

    pub fn score(&self, player: Player) -> u32 {
        self.scores[player.index()]
    }

    pub fn white_score(&self) -> u32 {
        self.score(Player::White)
    }

    pub fn black_score(&self) -> u32 {
        self.score(Player::Black)
    }

    /// Total number of discs on the board
    pub fn disc_count(&self) -> u32 {
        self.grid
            .iter()
            .flatten()
            .filter(|cell| cell.is_some())
            .count() as u32
    }

    /// True when no empty square remains
    pub fn is_full(&self) -> bool {
        self.grid.iter().flatten().all(|cell| cell.is_some())
    }

    /// Count of the four corners owned by a player
    pub fn corner_count(&self, player: Player) -> u32 {
        crate::board::CORNERS
            .iter()
            .filter(|&&sq| self.cell(sq) == Some(player))
            .count() as u32
    }

    // ========================================================================
    // MOVE LEGALITY
    // ========================================================================

    /// Check whether placing a disc at `sq` is legal for `player`
    ///
    /// False for off-board or occupied squares. Isolated squares (no occupied
    /// neighbor) are rejected before the directional scan. Otherwise legal iff
    /// at least one direction yields a non-empty flip run.
    pub fn is_playable(&self, sq: Square, player: Player) -> bool {
        if !sq.is_valid() || self.cell(sq).is_some() {
            return false;
        }
        if self.is_isolated(sq) {
            return false;
        }
        DIRECTIONS
            .iter()
            .any(|&dir| !self.flip_run(sq, player, dir).is_empty())
    }

    /// True when none of the up-to-8 neighbors is occupied
    fn is_isolated(&self, sq: Square) -> bool {
        DIRECTIONS.iter().all(|&dir| self.cell(sq.step(dir)).is_none())
    }

    /// Walk outward from `sq` collecting consecutive opponent discs
    ///
    /// The run is committed only when the walk ends on one of `player`'s own
    /// discs; hitting an empty square or the edge discards it. A same-side
    /// disc with no opponent discs in between commits nothing.
    fn flip_run(&self, sq: Square, player: Player, dir: (i8, i8)) -> Vec<Square> {
        let opponent = player.opponent();
        let mut run = Vec::new();
        let mut current = sq.step(dir);

        loop {
            match self.cell(current) {
                Some(p) if p == opponent => {
                    run.push(current);
                    current = current.step(dir);
                }
                Some(_) => return run,
                None => return Vec::new(),
            }
        }
    }

    /// Full flip set for a placement: every committed run plus the origin.
    /// Empty when the move is illegal.
    fn flips_for(&self, sq: Square, player: Player) -> Vec<Square> {
        if !sq.is_valid() || self.cell(sq).is_some() {
            return Vec::new();
        }

        let mut flips = Vec::new();
        for &dir in &DIRECTIONS {
            flips.extend(self.flip_run(sq, player, dir));
        }
        if !flips.is_empty() {
            flips.push(sq);
        }
        flips
    }

    // ========================================================================
    // MUTATION
    // ========================================================================

    /// Apply a placement for `player`
    ///
    /// Returns false without touching the board when the move is illegal.
    /// Flipping F opponent discs moves the scores by (+F+1, -F), so the total
    /// disc count grows by exactly one per move.
    pub fn play_move(&mut self, sq: Square, player: Player) -> bool {
        let flips = self.flips_for(sq, player);
        if flips.is_empty() {
            return false;
        }

        // flips includes the origin square
        let flipped = flips.len() as u32 - 1;
        for square in flips {
            self.grid[square.col as usize][square.line as usize] = Some(player);
        }
        self.scores[player.index()] += flipped + 1;
        self.scores[player.opponent().index()] -= flipped;

        true
    }

    // ========================================================================
    // MOVE GENERATION
    // ========================================================================

    /// All legal placements for a player, in column-major scan order
    /// (column 0..9 outer, line 0..7 inner)
    pub fn legal_moves(&self, player: Player) -> Vec<Square> {
        let mut moves = Vec::new();
        for col in 0..COLUMNS {
            for line in 0..LINES {
                let sq = Square::new(col, line);
                if self.is_playable(sq, player) {
                    moves.push(sq);
                }
            }
        }
        moves
    }

    /// True when the player has at least one legal placement
    pub fn has_legal_move(&self, player: Player) -> bool {
        for col in 0..COLUMNS {
            for line in 0..LINES {
                if self.is_playable(Square::new(col, line), player) {
                    return true;
                }
            }
        }
        false
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// LIVE GAME
// ============================================================================

/// Rejected placement at the game boundary
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("illegal move {square} for {player}")]
pub struct IllegalMove {
    pub square: Square,
    pub player: Player,
}

/// What happened after a successful placement
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayOutcome {
    /// Turn passed to the opponent
    Next(Player),
    /// Opponent had no legal move and was forced to pass; same side moves again
    OpponentPassed(Player),
    /// Board full or neither side can move
    GameOver(GameResult),
}

/// One live game: a board, whose turn it is, and the result
///
/// Black moves first. A side with no legal move passes automatically; the game
/// ends when the board is full or neither side can move, the higher score
/// winning. The same rule drives the search engine's terminal test.
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    turn: Player,
    result: GameResult,
}

impl Game {
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            turn: Player::Black,
            result: GameResult::Ongoing,
        }
    }

    /// Reconstruct a game from board + turn, recomputing the result
    pub(crate) fn from_parts(board: Board, turn: Player) -> Self {
        let mut game = Game {
            board,
            turn,
            result: GameResult::Ongoing,
        };
        if game.board.is_full()
            || (!game.board.has_legal_move(Player::White)
                && !game.board.has_legal_move(Player::Black))
        {
            game.result = game.score_result();
        } else if !game.board.has_legal_move(game.turn) {
            // Stored mid forced-pass; hand the turn back to the side that can move
            game.turn = game.turn.opponent();
        }
        game
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Side to move
    pub fn turn(&self) -> Player {
        self.turn
    }

    pub fn result(&self) -> GameResult {
        self.result
    }

    pub fn is_over(&self) -> bool {
        self.result != GameResult::Ongoing
    }

    /// Legal placements for the side to move
    pub fn legal_moves(&self) -> Vec<Square> {
        if self.is_over() {
            return Vec::new();
        }
        self.board.legal_moves(self.turn)
    }

    // ========================================================================
    // TURN PROTOCOL
    // ========================================================================

    /// Play a placement for the side to move, then advance the turn
    pub fn play(&mut self, sq: Square) -> Result<PlayOutcome, IllegalMove> {
        if self.is_over() || !self.board.play_move(sq, self.turn) {
            return Err(IllegalMove {
                square: sq,
                player: self.turn,
            });
        }
        Ok(self.advance_turn())
    }

    fn advance_turn(&mut self) -> PlayOutcome {
        let mover = self.turn;
        let opponent = mover.opponent();

        if self.board.is_full() {
            self.result = self.score_result();
            return PlayOutcome::GameOver(self.result);
        }

        if self.board.has_legal_move(opponent) {
            self.turn = opponent;
            PlayOutcome::Next(opponent)
        } else if self.board.has_legal_move(mover) {
            // Forced pass: opponent is blocked, mover goes again
            PlayOutcome::OpponentPassed(opponent)
        } else {
            self.result = self.score_result();
            PlayOutcome::GameOver(self.result)
        }
    }

    fn score_result(&self) -> GameResult {
        match self
            .board
            .black_score()
            .cmp(&self.board.white_score())
        {
            std::cmp::Ordering::Greater => GameResult::BlackWins,
            std::cmp::Ordering::Less => GameResult::WhiteWins,
            std::cmp::Ordering::Equal => GameResult::Draw,
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(col: i8, line: i8) -> Square {
        Square::new(col, line)
    }

    /// Check the disc-count / score-sum invariant
    fn assert_scores_consistent(board: &Board) {
        assert_eq!(
            board.disc_count(),
            board.black_score() + board.white_score(),
            "disc count must equal the score sum"
        );
    }

    #[test]
    fn test_initial_position() {
        let board = Board::new();
        assert_eq!(board.cell(sq(4, 3)), Some(Player::White));
        assert_eq!(board.cell(sq(5, 4)), Some(Player::White));
        assert_eq!(board.cell(sq(4, 4)), Some(Player::Black));
        assert_eq!(board.cell(sq(5, 3)), Some(Player::Black));
        assert_eq!(board.black_score(), 2);
        assert_eq!(board.white_score(), 2);
        assert_eq!(board.disc_count(), 4);
        assert_scores_consistent(&board);
    }

    #[test]
    fn test_initial_legal_moves_black() {
        // Literal fixture: the exact legal set adjacent to the center cluster
        let board = Board::new();
        assert_eq!(
            board.legal_moves(Player::Black),
            vec![sq(3, 3), sq(4, 2), sq(5, 5), sq(6, 4)]
        );
    }

    #[test]
    fn test_initial_legal_moves_white() {
        let board = Board::new();
        assert_eq!(
            board.legal_moves(Player::White),
            vec![sq(3, 4), sq(4, 5), sq(5, 2), sq(6, 3)]
        );
    }

    #[test]
    fn test_move_pair_sentinel_round_trip() {
        assert_eq!(Move::Pass.as_pair(), (-1, -1));
        assert_eq!(Move::from_pair(-1, -1), Some(Move::Pass));

        let mv = Move::Place(sq(3, 2));
        assert_eq!(mv.as_pair(), (3, 2));
        assert_eq!(Move::from_pair(3, 2), Some(mv));

        // Off-board pairs other than the sentinel are not moves at all
        assert_eq!(Move::from_pair(9, 0), None);
        assert_eq!(Move::from_pair(-1, 3), None);
    }

    #[test]
    fn test_playable_rejects_occupied_and_out_of_range() {
        let board = Board::new();
        assert!(!board.is_playable(sq(4, 3), Player::Black));
        assert!(!board.is_playable(sq(4, 4), Player::Black));
        assert!(!board.is_playable(sq(-1, 0), Player::Black));
        assert!(!board.is_playable(sq(9, 3), Player::Black));
        assert!(!board.is_playable(sq(4, 7), Player::White));
    }

    #[test]
    fn test_isolated_square_not_playable() {
        let board = Board::new();
        // Far corner: no occupied neighbor, rejected by the isolation check
        assert!(!board.is_playable(sq(0, 0), Player::Black));
        assert!(!board.is_playable(sq(8, 6), Player::White));
    }

    #[test]
    fn test_adjacent_without_flip_not_playable() {
        let board = Board::new();
        // Touches the cluster but brackets nothing for Black
        assert!(!board.is_playable(sq(3, 2), Player::Black));
        assert!(!board.is_playable(sq(6, 5), Player::Black));
    }

    #[test]
    fn test_play_move_flips_and_scores() {
        let mut board = Board::new();
        // Black D3 (3,3) flips the white disc at (4,3)
        assert!(board.play_move(sq(3, 3), Player::Black));
        assert_eq!(board.cell(sq(3, 3)), Some(Player::Black));
        assert_eq!(board.cell(sq(4, 3)), Some(Player::Black));
        assert_eq!(board.black_score(), 4);
        assert_eq!(board.white_score(), 1);
        assert_eq!(board.disc_count(), 5);
        assert_scores_consistent(&board);
    }

    #[test]
    fn test_rejected_move_leaves_board_unchanged() {
        let mut board = Board::new();
        let before = board.clone();
        assert!(!board.play_move(sq(0, 0), Player::Black));
        assert!(!board.play_move(sq(4, 4), Player::White));
        assert!(!board.play_move(sq(3, 2), Player::Black));
        assert_eq!(board, before);
    }

    #[test]
    fn test_score_arithmetic_per_flip_count() {
        // Line of white discs bracketed by black: B W W _
        let mut grid = [[None; LINES as usize]; COLUMNS as usize];
        grid[1][3] = Some(Player::Black);
        grid[2][3] = Some(Player::White);
        grid[3][3] = Some(Player::White);
        let mut board = Board::from_cells(grid);

        let black_before = board.black_score();
        let white_before = board.white_score();
        let discs_before = board.disc_count();

        // Placing at (4,3) flips two discs
        assert!(board.play_move(sq(4, 3), Player::Black));
        assert_eq!(board.black_score(), black_before + 3);
        assert_eq!(board.white_score(), white_before - 2);
        assert_eq!(board.disc_count(), discs_before + 1);
        assert_scores_consistent(&board);
    }

    #[test]
    fn test_multi_direction_flip() {
        // Black at (2,2) should flip west and north-west runs at once
        let mut grid = [[None; LINES as usize]; COLUMNS as usize];
        grid[0][2] = Some(Player::Black);
        grid[1][2] = Some(Player::White);
        grid[0][0] = Some(Player::Black);
        grid[1][1] = Some(Player::White);
        let mut board = Board::from_cells(grid);

        assert!(board.play_move(sq(2, 2), Player::Black));
        assert_eq!(board.cell(sq(1, 2)), Some(Player::Black));
        assert_eq!(board.cell(sq(1, 1)), Some(Player::Black));
        assert_eq!(board.white_score(), 0);
        assert_eq!(board.black_score(), 5);
        assert_scores_consistent(&board);
    }

    #[test]
    fn test_legal_moves_matches_is_playable_everywhere() {
        let mut board = Board::new();
        board.play_move(sq(3, 3), Player::Black);
        board.play_move(sq(3, 4), Player::White);

        for &player in &[Player::Black, Player::White] {
            let moves = board.legal_moves(player);
            for col in 0..COLUMNS {
                for line in 0..LINES {
                    let square = sq(col, line);
                    assert_eq!(
                        moves.contains(&square),
                        board.is_playable(square, player),
                        "mismatch at {} for {:?}",
                        square,
                        player
                    );
                }
            }
        }
    }

    #[test]
    fn test_is_full() {
        assert!(!Board::new().is_full());

        let grid = [[Some(Player::Black); LINES as usize]; COLUMNS as usize];
        assert!(Board::from_cells(grid).is_full());
    }

    #[test]
    fn test_game_turn_alternation() {
        let mut game = Game::new();
        assert_eq!(game.turn(), Player::Black);

        let outcome = game.play(sq(3, 3)).unwrap();
        assert_eq!(outcome, PlayOutcome::Next(Player::White));
        assert_eq!(game.turn(), Player::White);
        assert_eq!(game.result(), GameResult::Ongoing);
    }

    #[test]
    fn test_game_rejects_illegal_move() {
        let mut game = Game::new();
        let err = game.play(sq(0, 0)).unwrap_err();
        assert_eq!(err.square, sq(0, 0));
        assert_eq!(err.player, Player::Black);
        assert_eq!(game.turn(), Player::Black);
    }

    #[test]
    fn test_forced_pass_and_game_end() {
        // B W _ on line 0, nothing else: black plays (2,0), white has no
        // answer anywhere and black has nothing left either -> game over
        let mut grid = [[None; LINES as usize]; COLUMNS as usize];
        grid[0][0] = Some(Player::Black);
        grid[1][0] = Some(Player::White);
        let board = Board::from_cells(grid);
        let mut game = Game::from_parts(board, Player::Black);

        let outcome = game.play(sq(2, 0)).unwrap();
        assert_eq!(outcome, PlayOutcome::GameOver(GameResult::BlackWins));
        assert!(game.is_over());
    }

    #[test]
    fn test_forced_pass_mover_goes_again() {
        // Two B W _ pairs pinned against the top and bottom edges. White never
        // has a bracket (the only black runs end at the board edge), black can
        // capture each pair in turn.
        let mut grid = [[None; LINES as usize]; COLUMNS as usize];
        grid[0][0] = Some(Player::Black);
        grid[1][0] = Some(Player::White);
        grid[0][6] = Some(Player::Black);
        grid[1][6] = Some(Player::White);
        let board = Board::from_cells(grid);
        let mut game = Game::from_parts(board, Player::Black);

        let outcome = game.play(sq(2, 0)).unwrap();
        assert_eq!(outcome, PlayOutcome::OpponentPassed(Player::White));
        assert_eq!(game.turn(), Player::Black);
        assert!(!game.is_over());

        // Second capture removes the last white disc and ends the game
        let outcome = game.play(sq(2, 6)).unwrap();
        assert_eq!(outcome, PlayOutcome::GameOver(GameResult::BlackWins));
    }

    #[test]
    fn test_invariant_over_full_random_game() {
        use rand::prelude::*;
        use rand_chacha::ChaCha8Rng;

        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut game = Game::new();
        while !game.is_over() {
            let moves = game.legal_moves();
            let &choice = moves.choose(&mut rng).expect("ongoing game has moves");
            game.play(choice).unwrap();
            assert_eq!(
                game.board().disc_count(),
                game.board().black_score() + game.board().white_score()
            );
        }
        assert_ne!(game.result(), GameResult::Ongoing);
    }
}
