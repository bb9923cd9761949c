//! Piece placement snapshot handed over by the rules engine.

use crate::utils::{Bitboard, Color, PieceType, Square};

/// Piece placement stored as one mask per piece type and one mask per color.
#[derive(Eq, PartialEq, Clone, Copy, Debug, Default)]
pub struct Board {
    pub piece_type_masks: [Bitboard; PieceType::LIMIT as usize],
    pub color_masks: [Bitboard; 2],
}

impl Board {
    /// Creates a blank board with no pieces on it.
    pub const fn blank() -> Board {
        Board {
            piece_type_masks: [0; PieceType::LIMIT as usize],
            color_masks: [0; 2],
        }
    }

    /// Creates a board with the standard starting position.
    pub fn initial() -> Board {
        const BACK_RANK: [PieceType; 8] = [
            PieceType::Rook, PieceType::Knight, PieceType::Bishop, PieceType::Queen,
            PieceType::King, PieceType::Bishop, PieceType::Knight, PieceType::Rook
        ];

        let mut board = Board::blank();
        for (file, piece_type) in BACK_RANK.iter().enumerate() {
            let file = file as i8;
            for (rank, color) in [(0, Color::White), (7, Color::Black)] {
                if let Some(square) = Square::from_rank_and_file(rank, file) {
                    board.put_piece(square, color, *piece_type);
                }
            }
            for (rank, color) in [(1, Color::White), (6, Color::Black)] {
                if let Some(square) = Square::from_rank_and_file(rank, file) {
                    board.put_piece(square, color, PieceType::Pawn);
                }
            }
        }
        board
    }

    /// Places a piece, replacing whatever stood on the square.
    pub fn put_piece(&mut self, square: Square, color: Color, piece_type: PieceType) {
        self.remove_piece(square);
        let mask = square.to_mask();
        self.piece_type_masks[piece_type as usize] |= mask;
        self.color_masks[color as usize] |= mask;
    }

    pub fn remove_piece(&mut self, square: Square) {
        let mask = !square.to_mask();
        for piece_type_mask in self.piece_type_masks.iter_mut() {
            *piece_type_mask &= mask;
        }
        for color_mask in self.color_masks.iter_mut() {
            *color_mask &= mask;
        }
    }

    pub fn get_piece_at(&self, square: Square) -> Option<(Color, PieceType)> {
        let mask = square.to_mask();
        let color = Color::iter().find(|color| self.color_masks[*color as usize] & mask != 0)?;
        let piece_type = PieceType::iter_pieces().find(|piece_type| self.piece_type_masks[*piece_type as usize] & mask != 0)?;
        Some((color, piece_type))
    }

    pub const fn get_colored_piece_mask(&self, color: Color, piece_type: PieceType) -> Bitboard {
        self.color_masks[color as usize] & self.piece_type_masks[piece_type as usize]
    }

    pub const fn get_occupied_mask(&self) -> Bitboard {
        self.color_masks[0] | self.color_masks[1]
    }

    pub fn count_pieces(&self, color: Color) -> u32 {
        self.color_masks[color as usize].count_ones()
    }
}

impl From<&chess::Board> for Board {
    fn from(chess_board: &chess::Board) -> Board {
        let mut board = Board::blank();
        for square in Square::iter_all() {
            let chess_square = chess::Square::from(square);
            if let (Some(piece), Some(color)) = (chess_board.piece_on(chess_square), chess_board.color_on(chess_square)) {
                board.put_piece(square, color.into(), piece.into());
            }
        }
        board
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for rank in (0..8i8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8i8 {
                let c = Square::from_rank_and_file(rank, file)
                    .and_then(|square| self.get_piece_at(square))
                    .map(|(color, piece_type)| match color {
                        Color::White => piece_type.to_char().to_ascii_uppercase(),
                        Color::Black => piece_type.to_char()
                    })
                    .unwrap_or('.');
                write!(f, "{} ", c)?;
            }
            writeln!(f)?;
        }
        write!(f, "  a b c d e f g h")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_board() {
        let board = Board::initial();
        assert_eq!(board.count_pieces(Color::White), 16);
        assert_eq!(board.count_pieces(Color::Black), 16);
        assert_eq!(board.get_piece_at(Square::E1), Some((Color::White, PieceType::King)));
        assert_eq!(board.get_piece_at(Square::D8), Some((Color::Black, PieceType::Queen)));
        assert_eq!(board.get_piece_at(Square::E4), None);
        assert_eq!(board.get_colored_piece_mask(Color::White, PieceType::Pawn).count_ones(), 8);
    }

    #[test]
    fn test_put_piece_replaces() {
        let mut board = Board::initial();
        board.put_piece(Square::E2, Color::Black, PieceType::Queen);
        assert_eq!(board.get_piece_at(Square::E2), Some((Color::Black, PieceType::Queen)));
        assert_eq!(board.count_pieces(Color::White), 15);
        assert_eq!(board.count_pieces(Color::Black), 17);
    }

    #[test]
    fn test_from_chess_board() {
        assert_eq!(Board::from(&chess::Board::default()), Board::initial());
    }

    #[test]
    fn test_display() {
        let rendered = Board::initial().to_string();
        assert!(rendered.starts_with("8 r n b q k b n r"));
        assert!(rendered.ends_with("  a b c d e f g h"));
    }
}
