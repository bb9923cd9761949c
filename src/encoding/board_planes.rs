use crate::encoding::constants::{NUM_BITS_PER_BOARD, NUM_PIECE_TYPE_BITS};
use crate::state::Board;
use crate::utils::{Bitboard, Color, PieceType};

/// Twelve occupancy masks in the fixed channel order pawn, knight, bishop, rook, queen, king:
/// `color`'s pieces at 0-5, the opposite color's at 6-11.
pub fn board_planes(board: &Board, color: Color) -> [Bitboard; NUM_BITS_PER_BOARD] {
    let mut planes = [0; NUM_BITS_PER_BOARD];
    for piece_type in PieceType::iter_pieces() {
        let channel = piece_type as usize - PieceType::Pawn as usize;
        planes[channel] = board.get_colored_piece_mask(color, piece_type);
        planes[NUM_PIECE_TYPE_BITS + channel] = board.get_colored_piece_mask(color.flip(), piece_type);
    }
    planes
}
