//! A game timeline backed by the `chess` crate.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use chess::{BoardStatus, MoveGen};
use crate::r#move::Move;
use crate::state::{Board, CastlingRights, Outcome, Position, RulesEngine, Termination};
use crate::utils::{get_squares_from_mask_iter, Color, PieceType};

pub const INITIAL_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

const SEVENTY_FIVE_MOVE_RULE_PLIES: u32 = 150;
const FIVEFOLD_REPETITION: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RulesError {
    InvalidFen(String),
    InvalidHalfmoveClock(String),
}

impl Display for RulesError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RulesError::InvalidFen(reason) => write!(f, "Invalid FEN: {}", reason),
            RulesError::InvalidHalfmoveClock(clock) => write!(f, "Invalid halfmove clock: {}", clock),
        }
    }
}

impl Error for RulesError {}

/// Standard chess rules over the `chess` crate. Chess960 castling is not available here; the
/// encoder only sees a [`RulesEngine`], so a Chess960 engine can be plugged in instead.
#[derive(Clone, Debug)]
pub struct ChessGame {
    board: chess::Board,
    /// Hash of every position of the timeline, the current one last.
    position_hashes: Vec<u64>,
    halfmove_clock: u32,
    ply: u32,
}

impl Default for ChessGame {
    fn default() -> Self {
        ChessGame::new()
    }
}

impl ChessGame {
    /// Starts a game from the standard starting position.
    pub fn new() -> ChessGame {
        ChessGame::from_board(chess::Board::default(), 0)
    }

    /// Starts a game from a FEN string. The halfmove clock is read from the FEN, the ply count starts at 0.
    pub fn from_fen(fen: &str) -> Result<ChessGame, RulesError> {
        let halfmove_clock = match fen.split_whitespace().nth(4) {
            Some(clock) => clock.parse::<u32>().map_err(|_| RulesError::InvalidHalfmoveClock(clock.to_string()))?,
            None => 0
        };
        let board = chess::Board::from_str(fen).map_err(|e| RulesError::InvalidFen(e.to_string()))?;
        Ok(ChessGame::from_board(board, halfmove_clock))
    }

    fn from_board(board: chess::Board, halfmove_clock: u32) -> ChessGame {
        ChessGame {
            position_hashes: vec![board.get_hash()],
            board,
            halfmove_clock,
            ply: 0,
        }
    }

    pub fn board(&self) -> &chess::Board {
        &self.board
    }

    pub fn side_to_move(&self) -> Color {
        self.board.side_to_move().into()
    }

    fn castling_rights(&self) -> CastlingRights {
        let white = self.board.castle_rights(chess::Color::White);
        let black = self.board.castle_rights(chess::Color::Black);
        CastlingRights::new(white.has_kingside(), white.has_queenside(), black.has_kingside(), black.has_queenside())
    }

    fn count_repetitions(&self) -> usize {
        let current = self.board.get_hash();
        self.position_hashes.iter().filter(|hash| **hash == current).count()
    }
}

/// Neither side can ever deliver mate: bare kings, a single minor piece, or bishops all on one square color.
fn is_insufficient_material(board: &Board) -> bool {
    let heavy_or_pawns = board.piece_type_masks[PieceType::Pawn as usize]
        | board.piece_type_masks[PieceType::Rook as usize]
        | board.piece_type_masks[PieceType::Queen as usize];
    if heavy_or_pawns != 0 {
        return false;
    }

    let knights = board.piece_type_masks[PieceType::Knight as usize];
    let bishops = board.piece_type_masks[PieceType::Bishop as usize];
    let minor_count = (knights | bishops).count_ones();
    if minor_count <= 1 {
        return true;
    }
    if knights != 0 {
        return false;
    }

    let mut bishop_square_colors = get_squares_from_mask_iter(bishops)
        .map(|square| (square.get_rank() + square.get_file()) % 2);
    match bishop_square_colors.next() {
        Some(first) => bishop_square_colors.all(|square_color| square_color == first),
        None => true
    }
}

impl RulesEngine for ChessGame {
    fn position(&self) -> Position {
        Position {
            board: Board::from(&self.board),
            side_to_move: self.side_to_move(),
            castling_rights: self.castling_rights(),
            halfmove_clock: self.halfmove_clock,
            ply: self.ply,
        }
    }

    fn legal_moves(&self) -> Vec<Move> {
        MoveGen::new_legal(&self.board).map(Move::from).collect()
    }

    fn is_legal(&self, mv: &Move) -> bool {
        self.board.legal((*mv).into())
    }

    fn push(&mut self, mv: Move) {
        let chess_move = chess::ChessMove::from(mv);
        let is_pawn_move = self.board.piece_on(chess_move.get_source()) == Some(chess::Piece::Pawn);
        let is_capture = self.board.piece_on(chess_move.get_dest()).is_some();

        self.board = self.board.make_move_new(chess_move);
        self.halfmove_clock = if is_pawn_move || is_capture { 0 } else { self.halfmove_clock + 1 };
        self.ply += 1;
        self.position_hashes.push(self.board.get_hash());
    }

    fn is_repetition(&self, count: usize) -> bool {
        self.count_repetitions() >= count
    }

    fn outcome(&self) -> Option<Outcome> {
        match self.board.status() {
            BoardStatus::Checkmate => return Some(Outcome::checkmate(self.side_to_move().flip())),
            BoardStatus::Stalemate => return Some(Outcome::draw(Termination::Stalemate)),
            BoardStatus::Ongoing => {}
        }

        if is_insufficient_material(&Board::from(&self.board)) {
            Some(Outcome::draw(Termination::InsufficientMaterial))
        } else if self.halfmove_clock >= SEVENTY_FIVE_MOVE_RULE_PLIES {
            Some(Outcome::draw(Termination::SeventyFiveMoveRule))
        } else if self.is_repetition(FIVEFOLD_REPETITION) {
            Some(Outcome::draw(Termination::FivefoldRepetition))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(game: &mut ChessGame, moves: &[&str]) {
        for uci in moves {
            let mv = Move::from_str(uci).unwrap();
            assert!(game.is_legal(&mv), "{} should be legal", uci);
            game.push(mv);
        }
    }

    #[test]
    fn test_initial_game() {
        let game = ChessGame::new();
        assert_eq!(game.legal_moves().len(), 20);
        assert_eq!(game.position(), Position::initial());
        assert!(game.outcome().is_none());
        assert!(!game.is_repetition(2));
        assert!(game.is_repetition(1));
    }

    #[test]
    fn test_initial_fen() {
        let game = ChessGame::from_fen(INITIAL_FEN).unwrap();
        assert_eq!(game.position(), Position::initial());
        assert_eq!(game.board(), ChessGame::new().board());
    }

    #[test]
    fn test_halfmove_clock_and_ply() {
        let mut game = ChessGame::new();
        play(&mut game, &["g1f3", "g8f6", "b1c3"]);
        let position = game.position();
        assert_eq!(position.halfmove_clock, 3);
        assert_eq!(position.ply, 3);
        assert_eq!(position.side_to_move, Color::Black);

        play(&mut game, &["e7e5"]);
        assert_eq!(game.position().halfmove_clock, 0);

        play(&mut game, &["f3e5"]);
        assert_eq!(game.position().halfmove_clock, 0);
        assert_eq!(game.position().ply, 5);
    }

    #[test]
    fn test_repetition() {
        let mut game = ChessGame::new();
        play(&mut game, &["g1f3", "g8f6", "f3g1", "f6g8"]);
        assert!(game.is_repetition(2));
        assert!(!game.is_repetition(3));

        play(&mut game, &["g1f3", "g8f6", "f3g1", "f6g8"]);
        assert!(game.is_repetition(3));
        assert!(game.outcome().is_none());

        play(&mut game, &["g1f3", "g8f6", "f3g1", "f6g8", "g1f3", "g8f6", "f3g1", "f6g8"]);
        assert_eq!(game.outcome(), Some(Outcome::draw(Termination::FivefoldRepetition)));
    }

    #[test]
    fn test_checkmate() {
        let mut game = ChessGame::new();
        play(&mut game, &["f2f3", "e7e5", "g2g4", "d8h4"]);
        assert_eq!(game.outcome(), Some(Outcome::checkmate(Color::Black)));
        assert!(game.legal_moves().is_empty());
    }

    #[test]
    fn test_castling_rights_from_fen() {
        let game = ChessGame::from_fen("r3k2r/8/8/8/8/8/8/R3K2R b Qk - 12 30").unwrap();
        let position = game.position();
        assert_eq!(position.castling_rights, CastlingRights::new(false, true, true, false));
        assert_eq!(position.halfmove_clock, 12);
        assert_eq!(position.ply, 0);
        assert_eq!(position.side_to_move, Color::Black);
    }

    #[test]
    fn test_invalid_fen() {
        assert!(matches!(ChessGame::from_fen("not a fen"), Err(RulesError::InvalidFen(_))));
        assert!(matches!(
            ChessGame::from_fen("4k3/8/8/8/8/8/8/4K3 w - - x 1"),
            Err(RulesError::InvalidHalfmoveClock(_))
        ));
    }

    #[test]
    fn test_insufficient_material() {
        let game = ChessGame::from_fen("4k3/8/8/8/8/8/8/4KB2 w - - 0 1").unwrap();
        assert_eq!(game.outcome(), Some(Outcome::draw(Termination::InsufficientMaterial)));

        let game = ChessGame::from_fen("4kb2/8/8/8/8/8/8/2B1K3 w - - 0 1").unwrap();
        assert_eq!(game.outcome(), Some(Outcome::draw(Termination::InsufficientMaterial)));

        let game = ChessGame::from_fen("4k3/8/8/8/8/8/8/3RK3 w - - 0 1").unwrap();
        assert!(game.outcome().is_none());
    }

    #[test]
    fn test_seventy_five_move_rule() {
        let game = ChessGame::from_fen("4k3/8/8/8/8/8/8/3RK3 w - - 150 120").unwrap();
        assert_eq!(game.outcome(), Some(Outcome::draw(Termination::SeventyFiveMoveRule)));
    }
}
