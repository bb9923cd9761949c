//! Move direction related enums and functions.
//!
//! Offsets are `(column change, row change)` in the mover's own frame, where row 0 is the far
//! side of the board, so "up" is a negative row change.

#[repr(u8)]
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum QueenLikeMoveDirection {
    Up=0, UpRight=1, Right=2, DownRight=3,
    Down=4, DownLeft=5, Left=6, UpLeft=7,
}

const ALL_QUEEN_MOVE_DIRECTIONS: [QueenLikeMoveDirection; 8] = [
    QueenLikeMoveDirection::Up, QueenLikeMoveDirection::UpRight,
    QueenLikeMoveDirection::Right, QueenLikeMoveDirection::DownRight,
    QueenLikeMoveDirection::Down, QueenLikeMoveDirection::DownLeft,
    QueenLikeMoveDirection::Left, QueenLikeMoveDirection::UpLeft
];

const QUEEN_MOVE_OFFSETS: [(i8, i8); 8] = [
    (0, -1), (1, -1), (1, 0), (1, 1),
    (0, 1), (-1, 1), (-1, 0), (-1, -1)
];

impl QueenLikeMoveDirection {
    pub fn from_index(value: u8) -> Option<QueenLikeMoveDirection> {
        ALL_QUEEN_MOVE_DIRECTIONS.get(value as usize).copied()
    }

    pub fn iter() -> impl Iterator<Item=QueenLikeMoveDirection> {
        ALL_QUEEN_MOVE_DIRECTIONS.iter().copied()
    }

    pub const fn offset(&self) -> (i8, i8) {
        QUEEN_MOVE_OFFSETS[*self as usize]
    }

    /// Direction and distance of a straight or diagonal displacement, `None` for anything else.
    pub fn calc_and_measure_distance(col_change: i8, row_change: i8) -> Option<(QueenLikeMoveDirection, u8)> {
        let is_straight = col_change == 0 || row_change == 0;
        let is_diagonal = col_change.abs() == row_change.abs();
        if (col_change == 0 && row_change == 0) || !(is_straight || is_diagonal) {
            return None;
        }

        let unit_step = (col_change.signum(), row_change.signum());
        let direction = QueenLikeMoveDirection::iter().find(|direction| direction.offset() == unit_step)?;
        let distance = col_change.abs().max(row_change.abs()) as u8;

        Some((direction, distance))
    }
}

#[repr(u8)]
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum KnightMoveDirection {
    TwoUpOneRight=0, OneUpTwoRight=1, OneDownTwoRight=2, TwoDownOneRight=3,
    TwoDownOneLeft=4, OneDownTwoLeft=5, OneUpTwoLeft=6, TwoUpOneLeft=7,
}

const ALL_KNIGHT_MOVE_DIRECTIONS: [KnightMoveDirection; 8] = [
    KnightMoveDirection::TwoUpOneRight, KnightMoveDirection::OneUpTwoRight,
    KnightMoveDirection::OneDownTwoRight, KnightMoveDirection::TwoDownOneRight,
    KnightMoveDirection::TwoDownOneLeft, KnightMoveDirection::OneDownTwoLeft,
    KnightMoveDirection::OneUpTwoLeft, KnightMoveDirection::TwoUpOneLeft
];

const KNIGHT_MOVE_OFFSETS: [(i8, i8); 8] = [
    (1, -2), (2, -1), (2, 1), (1, 2),
    (-1, 2), (-2, 1), (-2, -1), (-1, -2)
];

impl KnightMoveDirection {
    pub fn from_index(value: u8) -> Option<KnightMoveDirection> {
        ALL_KNIGHT_MOVE_DIRECTIONS.get(value as usize).copied()
    }

    pub fn iter() -> impl Iterator<Item=KnightMoveDirection> {
        ALL_KNIGHT_MOVE_DIRECTIONS.iter().copied()
    }

    pub const fn offset(&self) -> (i8, i8) {
        KNIGHT_MOVE_OFFSETS[*self as usize]
    }

    pub fn calc(col_change: i8, row_change: i8) -> Option<KnightMoveDirection> {
        KnightMoveDirection::iter().find(|direction| direction.offset() == (col_change, row_change))
    }
}

/// The three ways a pawn can step onto the promotion rank.
#[repr(u8)]
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum PawnMoveDirection {
    Forward=0, CaptureRight=1, CaptureLeft=2,
}

const ALL_PAWN_MOVE_DIRECTIONS: [PawnMoveDirection; 3] = [
    PawnMoveDirection::Forward, PawnMoveDirection::CaptureRight, PawnMoveDirection::CaptureLeft
];

impl PawnMoveDirection {
    pub fn from_index(value: u8) -> Option<PawnMoveDirection> {
        ALL_PAWN_MOVE_DIRECTIONS.get(value as usize).copied()
    }

    pub fn iter() -> impl Iterator<Item=PawnMoveDirection> {
        ALL_PAWN_MOVE_DIRECTIONS.iter().copied()
    }

    pub const fn offset(&self) -> (i8, i8) {
        match self {
            PawnMoveDirection::Forward => (0, -1),
            PawnMoveDirection::CaptureRight => (1, -1),
            PawnMoveDirection::CaptureLeft => (-1, -1)
        }
    }

    /// Only single steps towards the far side of the board are pawn promotion steps.
    pub fn calc(col_change: i8, row_change: i8) -> Option<PawnMoveDirection> {
        PawnMoveDirection::iter().find(|direction| direction.offset() == (col_change, row_change))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queen_move_direction() {
        for direction in QueenLikeMoveDirection::iter() {
            let (col_step, row_step) = direction.offset();
            for distance in 1..=7i8 {
                assert_eq!(
                    QueenLikeMoveDirection::calc_and_measure_distance(col_step * distance, row_step * distance),
                    Some((direction, distance as u8))
                );
            }
            assert_eq!(QueenLikeMoveDirection::from_index(direction as u8), Some(direction));
        }
    }

    #[test]
    fn test_queen_move_direction_rejects_other_shapes() {
        assert_eq!(QueenLikeMoveDirection::calc_and_measure_distance(0, 0), None);
        assert_eq!(QueenLikeMoveDirection::calc_and_measure_distance(1, 2), None);
        assert_eq!(QueenLikeMoveDirection::calc_and_measure_distance(3, -1), None);
    }

    #[test]
    fn test_queen_move_direction_order() {
        assert_eq!(QueenLikeMoveDirection::Up.offset(), (0, -1));
        assert_eq!(QueenLikeMoveDirection::UpRight.offset(), (1, -1));
        assert_eq!(QueenLikeMoveDirection::Right.offset(), (1, 0));
        assert_eq!(QueenLikeMoveDirection::Left.offset(), (-1, 0));
    }

    #[test]
    fn test_knight_move_direction() {
        for direction in KnightMoveDirection::iter() {
            let (col_change, row_change) = direction.offset();
            assert_eq!(KnightMoveDirection::calc(col_change, row_change), Some(direction));
            assert_eq!(KnightMoveDirection::from_index(direction as u8), Some(direction));
        }
        assert_eq!(KnightMoveDirection::calc(2, 2), None);
    }

    #[test]
    fn test_pawn_move_direction() {
        assert_eq!(PawnMoveDirection::calc(0, -1), Some(PawnMoveDirection::Forward));
        assert_eq!(PawnMoveDirection::calc(1, -1), Some(PawnMoveDirection::CaptureRight));
        assert_eq!(PawnMoveDirection::calc(-1, -1), Some(PawnMoveDirection::CaptureLeft));
        assert_eq!(PawnMoveDirection::calc(0, 1), None);
        assert_eq!(PawnMoveDirection::calc(0, -2), None);
    }
}
