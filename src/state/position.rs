//! Contains the Position struct, the snapshot of a game the encoder reads from the rules engine.

use crate::state::Board;
use crate::utils::Color;

/// Castling rights packed as `0, 0, 0, 0, wk, wq, bk, bq`.
#[derive(Eq, PartialEq, Clone, Copy, Debug)]
pub struct CastlingRights(pub u8);

impl CastlingRights {
    pub const ALL: CastlingRights = CastlingRights(0b00001111);
    pub const NONE: CastlingRights = CastlingRights(0b00000000);

    pub const fn new(white_kingside: bool, white_queenside: bool, black_kingside: bool, black_queenside: bool) -> CastlingRights {
        CastlingRights(
            (white_kingside as u8) << 3 | (white_queenside as u8) << 2 | (black_kingside as u8) << 1 | black_queenside as u8
        )
    }

    /// Returns whether the color still has short castling rights.
    pub const fn has_kingside(&self, color: Color) -> bool {
        self.0 & (0b00001000 >> (color as u8 * 2)) != 0
    }

    /// Returns whether the color still has long castling rights.
    pub const fn has_queenside(&self, color: Color) -> bool {
        self.0 & (0b00000100 >> (color as u8 * 2)) != 0
    }
}

/// A struct containing everything the encoder needs to know about the current position.
#[derive(Eq, PartialEq, Clone, Debug)]
pub struct Position {
    pub board: Board,
    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    /// Plies since the last capture or pawn move.
    pub halfmove_clock: u32,
    /// Plies played in the current game timeline.
    pub ply: u32,
}

impl Position {
    /// Creates the standard starting position.
    pub fn initial() -> Position {
        Position {
            board: Board::initial(),
            side_to_move: Color::White,
            castling_rights: CastlingRights::ALL,
            halfmove_clock: 0,
            ply: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_castling_rights() {
        let rights = CastlingRights::new(false, true, true, false);
        assert!(!rights.has_kingside(Color::White));
        assert!(rights.has_queenside(Color::White));
        assert!(rights.has_kingside(Color::Black));
        assert!(!rights.has_queenside(Color::Black));

        for color in Color::iter() {
            assert!(CastlingRights::ALL.has_kingside(color));
            assert!(CastlingRights::ALL.has_queenside(color));
            assert!(!CastlingRights::NONE.has_kingside(color));
            assert!(!CastlingRights::NONE.has_queenside(color));
        }
    }

    #[test]
    fn test_initial_position() {
        let position = Position::initial();
        assert_eq!(position.side_to_move, Color::White);
        assert_eq!(position.castling_rights, CastlingRights::ALL);
        assert_eq!(position.halfmove_clock, 0);
        assert_eq!(position.ply, 0);
    }
}
