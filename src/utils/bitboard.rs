use crate::utils::Square;

/// One bit per square, bit `i` set for the square with index `i` (a1 = 0, h8 = 63).
pub type Bitboard = u64;

#[derive(Debug, Clone)]
pub struct SquaresFromMaskIterator {
    mask: Bitboard,
}

impl From<Bitboard> for SquaresFromMaskIterator {
    fn from(mask: Bitboard) -> Self {
        SquaresFromMaskIterator {
            mask,
        }
    }
}

impl Iterator for SquaresFromMaskIterator {
    type Item = Square;

    fn next(&mut self) -> Option<Self::Item> {
        if self.mask == 0 {
            return None;
        }

        let square_index = self.mask.trailing_zeros();  // Index of the least significant set bit
        self.mask &= self.mask - 1;  // Clear the least significant set bit

        Square::from_index(square_index as u8)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.mask.count_ones() as usize;
        (remaining, Some(remaining))
    }
}

pub fn get_squares_from_mask_iter(mask: Bitboard) -> SquaresFromMaskIterator {
    mask.into()
}

/// Writes a bitboard into 64 consecutive plane cells laid out as `[rank][file]`.
pub fn write_mask_to_plane(mask: Bitboard, plane: &mut [f32]) {
    for square in get_squares_from_mask_iter(mask) {
        plane[square as usize] = 1.;
    }
}
