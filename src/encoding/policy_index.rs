//! The mapping between moves and the 8x8x73 action space of the policy head.
//!
//! An action index is `plane * 64 + row * 8 + col`, where `(row, col)` is the source square in the
//! mover's own frame and the plane describes the shape of the move:
//! - planes 0-55: queen-like slides, `direction * 7 + distance - 1`,
//! - planes 56-63: knight jumps,
//! - planes 64-72: underpromotions, `64 + 3 * piece + pawn direction`.
//!
//! A queen promotion has the same shape as the slide it makes, so the indices carry no promotion
//! for it. Decoding takes a [`QueenPromotionSet`] to put it back.

use indexmap::IndexSet;
use static_init::dynamic;
use crate::encoding::constants::{FIRST_KNIGHT_MOVE_PLANE, FIRST_UNDERPROMOTION_PLANE, MAX_RAY_LENGTH, NUM_OUTPUT_POLICY_MOVES, NUM_PAWN_MOVE_DIRECTIONS, NUM_QUEEN_LIKE_MOVES, NUM_SQUARES, NUM_TARGET_SQUARE_POSSIBILITIES, BOARD_SIZE};
use crate::encoding::error::CodecError;
use crate::r#move::Move;
use crate::utils::{Color, KnightMoveDirection, PawnMoveDirection, PromotionPieceType, QueenLikeMoveDirection, Square, UnderpromotionPieceType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveShape {
    QueenLike { direction: QueenLikeMoveDirection, distance: u8 },
    Knight(KnightMoveDirection),
    Underpromotion { direction: PawnMoveDirection, promotion: UnderpromotionPieceType },
}

impl MoveShape {
    /// Classifies a displacement in the mover's frame. `None` when no plane can express it.
    pub fn calc(col_change: i8, row_change: i8, promotion: Option<PromotionPieceType>) -> Option<MoveShape> {
        if let Some(promotion) = promotion.and_then(|promotion| promotion.as_underpromotion()) {
            let direction = PawnMoveDirection::calc(col_change, row_change)?;
            return Some(MoveShape::Underpromotion { direction, promotion });
        }

        if let Some(direction) = KnightMoveDirection::calc(col_change, row_change) {
            return Some(MoveShape::Knight(direction));
        }

        let (direction, distance) = QueenLikeMoveDirection::calc_and_measure_distance(col_change, row_change)?;
        Some(MoveShape::QueenLike { direction, distance })
    }

    pub fn plane(&self) -> u8 {
        match self {
            MoveShape::QueenLike { direction, distance } => *direction as u8 * MAX_RAY_LENGTH + distance - 1,
            MoveShape::Knight(direction) => FIRST_KNIGHT_MOVE_PLANE + *direction as u8,
            MoveShape::Underpromotion { direction, promotion } => {
                FIRST_UNDERPROMOTION_PLANE + promotion.index() * NUM_PAWN_MOVE_DIRECTIONS + *direction as u8
            }
        }
    }

    pub fn from_plane(plane: u8) -> Option<MoveShape> {
        if plane < NUM_QUEEN_LIKE_MOVES {
            let direction = QueenLikeMoveDirection::from_index(plane / MAX_RAY_LENGTH)?;
            Some(MoveShape::QueenLike { direction, distance: plane % MAX_RAY_LENGTH + 1 })
        } else if plane < FIRST_UNDERPROMOTION_PLANE {
            KnightMoveDirection::from_index(plane - FIRST_KNIGHT_MOVE_PLANE).map(MoveShape::Knight)
        } else if plane < NUM_TARGET_SQUARE_POSSIBILITIES {
            let underpromotion_plane = plane - FIRST_UNDERPROMOTION_PLANE;
            let promotion = UnderpromotionPieceType::from_index(underpromotion_plane / NUM_PAWN_MOVE_DIRECTIONS)?;
            let direction = PawnMoveDirection::from_index(underpromotion_plane % NUM_PAWN_MOVE_DIRECTIONS)?;
            Some(MoveShape::Underpromotion { direction, promotion })
        } else {
            None
        }
    }

    /// Total `(column change, row change)` of the move in the mover's frame.
    pub fn offset(&self) -> (i8, i8) {
        match self {
            MoveShape::QueenLike { direction, distance } => {
                let (col_step, row_step) = direction.offset();
                (col_step * *distance as i8, row_step * *distance as i8)
            }
            MoveShape::Knight(direction) => direction.offset(),
            MoveShape::Underpromotion { direction, .. } => direction.offset(),
        }
    }

    /// The promotion the shape itself carries. Queen promotions are not part of the shape.
    pub fn promotion(&self) -> Option<PromotionPieceType> {
        match self {
            MoveShape::Underpromotion { promotion, .. } => Some(promotion.to_promotion()),
            _ => None
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct PolicyIndex {
    pub plane: u8,
    /// Source square row in the mover's frame.
    pub row: u8,
    /// Source square column in the mover's frame.
    pub col: u8,
}

impl PolicyIndex {
    pub fn calc(mv: &Move, color: Color) -> Result<PolicyIndex, CodecError> {
        let (row, col) = mv.source.to_perspective(color);
        let (dst_row, dst_col) = mv.destination.to_perspective(color);

        let shape = MoveShape::calc(dst_col as i8 - col as i8, dst_row as i8 - row as i8, mv.promotion)
            .ok_or(CodecError::InvalidMove(*mv))?;

        Ok(PolicyIndex { plane: shape.plane(), row, col })
    }

    pub const fn flat(&self) -> usize {
        self.plane as usize * NUM_SQUARES + self.row as usize * BOARD_SIZE + self.col as usize
    }

    pub fn from_flat(index: usize) -> Result<PolicyIndex, CodecError> {
        if index >= NUM_OUTPUT_POLICY_MOVES {
            return Err(CodecError::Decode { index, reason: "index is outside the action space" });
        }

        Ok(PolicyIndex {
            plane: (index / NUM_SQUARES) as u8,
            row: (index % NUM_SQUARES / BOARD_SIZE) as u8,
            col: (index % BOARD_SIZE) as u8,
        })
    }

    pub fn shape(&self) -> Option<MoveShape> {
        MoveShape::from_plane(self.plane)
    }

    /// The move this index describes, without any queen promotion. `None` when it leaves the board.
    fn to_move(self, color: Color) -> Option<Move> {
        let shape = self.shape()?;
        let (col_change, row_change) = shape.offset();
        let (row, col) = (self.row as i8, self.col as i8);

        let source = Square::from_perspective(row, col, color)?;
        let destination = Square::from_perspective(row + row_change, col + col_change, color)?;

        Some(Move::new(source, destination, shape.promotion()))
    }
}

/// The geometric inverse of every action index, for both colors.
#[dynamic]
static DECODE_TABLE: [Vec<Option<Move>>; 2] = [
    build_decode_table(Color::White),
    build_decode_table(Color::Black),
];

fn build_decode_table(color: Color) -> Vec<Option<Move>> {
    (0..NUM_OUTPUT_POLICY_MOVES)
        .map(|index| PolicyIndex::from_flat(index).ok().and_then(|policy_index| policy_index.to_move(color)))
        .collect()
}

/// Coordinate strings (`"e7e8q"`) of the queen promotions among a set of moves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueenPromotionSet {
    moves: IndexSet<String>,
}

impl QueenPromotionSet {
    pub fn new() -> QueenPromotionSet {
        QueenPromotionSet::default()
    }

    pub fn from_moves<'a>(moves: impl IntoIterator<Item = &'a Move>) -> QueenPromotionSet {
        let mut set = QueenPromotionSet::new();
        for mv in moves {
            set.insert(mv);
        }
        set
    }

    /// Records `mv` if it is a queen promotion. Returns whether it was newly recorded.
    pub fn insert(&mut self, mv: &Move) -> bool {
        mv.is_queen_promotion() && self.moves.insert(mv.uci())
    }

    /// Whether the queen promotion between the squares of `mv` is in the set.
    pub fn contains(&self, mv: &Move) -> bool {
        self.moves.contains(&format!("{}{}q", mv.source, mv.destination))
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.moves.iter().map(|uci| uci.as_str())
    }
}

/// Index of a move in the action space. Purely geometric: the rules engine is not consulted.
pub fn encode_move(mv: &Move, color: Color) -> Result<usize, CodecError> {
    PolicyIndex::calc(mv, color).map(|policy_index| policy_index.flat())
}

/// Like [`encode_move`], but rejects moves that are not in `legal_moves`.
pub fn encode_legal_move(mv: &Move, color: Color, legal_moves: &[Move]) -> Result<usize, CodecError> {
    if !legal_moves.contains(mv) {
        return Err(CodecError::InvalidMove(*mv));
    }
    encode_move(mv, color)
}

/// The move an action index describes for `color`. The result may be illegal in the current
/// position, so callers intersect it with the legal moves before playing it.
pub fn decode_move(index: usize, color: Color, queen_promotions: &QueenPromotionSet) -> Result<Move, CodecError> {
    if index >= NUM_OUTPUT_POLICY_MOVES {
        return Err(CodecError::Decode { index, reason: "index is outside the action space" });
    }

    let mv = DECODE_TABLE[color as usize][index]
        .ok_or(CodecError::Decode { index, reason: "destination is off the board" })?;

    if mv.promotion.is_none() && queen_promotions.contains(&mv) {
        Ok(Move::new(mv.source, mv.destination, Some(PromotionPieceType::Queen)))
    } else {
        Ok(mv)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::str::FromStr;
    use super::*;
    use crate::encoding::constants::MAX_NUM_KNIGHT_MOVES;

    fn mv(uci: &str) -> Move {
        Move::from_str(uci).unwrap()
    }

    #[test]
    fn test_shape_planes_cover_all_planes() {
        let mut used_planes = HashSet::new();
        for plane in 0..NUM_TARGET_SQUARE_POSSIBILITIES {
            let shape = MoveShape::from_plane(plane).unwrap();
            assert_eq!(shape.plane(), plane);
            used_planes.insert(shape.plane());
        }
        assert_eq!(used_planes.len(), NUM_TARGET_SQUARE_POSSIBILITIES as usize);
        assert!(MoveShape::from_plane(NUM_TARGET_SQUARE_POSSIBILITIES).is_none());
    }

    #[test]
    fn test_shape_plane_ranges() {
        for direction in QueenLikeMoveDirection::iter() {
            for distance in 1..=MAX_RAY_LENGTH {
                let plane = MoveShape::QueenLike { direction, distance }.plane();
                assert!(plane < NUM_QUEEN_LIKE_MOVES);
            }
        }
        for direction in KnightMoveDirection::iter() {
            let plane = MoveShape::Knight(direction).plane();
            assert!(plane >= FIRST_KNIGHT_MOVE_PLANE);
            assert!(plane < FIRST_KNIGHT_MOVE_PLANE + MAX_NUM_KNIGHT_MOVES);
        }
        for direction in PawnMoveDirection::iter() {
            for promotion in UnderpromotionPieceType::iter() {
                let plane = MoveShape::Underpromotion { direction, promotion }.plane();
                assert!(plane >= FIRST_UNDERPROMOTION_PLANE);
                assert!(plane < NUM_TARGET_SQUARE_POSSIBILITIES);
            }
        }
    }

    #[test]
    fn test_calc_shape() {
        assert_eq!(MoveShape::calc(0, -5, None), Some(MoveShape::QueenLike { direction: QueenLikeMoveDirection::Up, distance: 5 }));
        assert_eq!(MoveShape::calc(1, -2, None), Some(MoveShape::Knight(KnightMoveDirection::TwoUpOneRight)));
        assert_eq!(
            MoveShape::calc(-1, -1, Some(PromotionPieceType::Bishop)),
            Some(MoveShape::Underpromotion { direction: PawnMoveDirection::CaptureLeft, promotion: UnderpromotionPieceType::Bishop })
        );
        assert_eq!(MoveShape::calc(0, -1, Some(PromotionPieceType::Queen)), Some(MoveShape::QueenLike { direction: QueenLikeMoveDirection::Up, distance: 1 }));
        assert_eq!(MoveShape::calc(0, 0, None), None);
        assert_eq!(MoveShape::calc(1, 3, None), None);
        assert_eq!(MoveShape::calc(0, -2, Some(PromotionPieceType::Knight)), None);
    }

    #[test]
    fn test_vertical_slide_for_white() {
        let policy_index = PolicyIndex::calc(&mv("d1d6"), Color::White).unwrap();
        assert_eq!(policy_index.shape(), Some(MoveShape::QueenLike { direction: QueenLikeMoveDirection::Up, distance: 5 }));
        assert_eq!(policy_index.plane, QueenLikeMoveDirection::Up as u8 * MAX_RAY_LENGTH + 4);
        assert_eq!((policy_index.row, policy_index.col), (7, 3));
        assert_eq!(encode_move(&mv("d1d6"), Color::White).unwrap(), 4 * 64 + 7 * 8 + 3);
    }

    #[test]
    fn test_underpromotion_for_black() {
        let index = encode_move(&mv("e2d1r"), Color::Black).unwrap();
        let plane = index / NUM_SQUARES;
        assert!((FIRST_UNDERPROMOTION_PLANE as usize..NUM_TARGET_SQUARE_POSSIBILITIES as usize).contains(&plane));
        assert_eq!(plane, 64 + 3 * 2 + PawnMoveDirection::CaptureRight as usize);
        assert_eq!(decode_move(index, Color::Black, &QueenPromotionSet::new()).unwrap(), mv("e2d1r"));
    }

    #[test]
    fn test_colors_share_shapes() {
        // Black's d7d5 is White's e2e4 in the mover's frame
        let white = encode_move(&mv("e2e4"), Color::White).unwrap();
        let black = encode_move(&mv("d7d5"), Color::Black).unwrap();
        assert_eq!(white, black);
        assert_eq!(encode_move(&mv("g1f3"), Color::White).unwrap(), encode_move(&mv("b8c6"), Color::Black).unwrap());
    }

    #[test]
    fn test_queen_promotion_needs_side_set() {
        let promotion = mv("e7e8q");
        let index = encode_move(&promotion, Color::White).unwrap();
        assert_eq!(index, encode_move(&mv("e7e8"), Color::White).unwrap());

        assert_eq!(decode_move(index, Color::White, &QueenPromotionSet::new()).unwrap(), mv("e7e8"));

        let set = QueenPromotionSet::from_moves(&[promotion, mv("e7e8n"), mv("a2a3")]);
        assert_eq!(set.len(), 1);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["e7e8q"]);
        assert_eq!(decode_move(index, Color::White, &set).unwrap(), promotion);
    }

    #[test]
    fn test_encode_rejects_inexpressible_moves() {
        for uci in ["e2e2", "a1b4", "e2e4n", "e7e6r"] {
            let result = encode_move(&mv(uci), Color::White);
            assert!(matches!(result, Err(CodecError::InvalidMove(_))), "{} should not encode", uci);
        }
        assert!(encode_move(&mv("e7d8q"), Color::White).is_ok());
    }

    #[test]
    fn test_encode_legal_move() {
        let legal = [mv("e2e4"), mv("g1f3")];
        assert!(encode_legal_move(&mv("e2e4"), Color::White, &legal).is_ok());
        assert!(matches!(encode_legal_move(&mv("e2e5"), Color::White, &legal), Err(CodecError::InvalidMove(_))));
    }

    #[test]
    fn test_decode_errors() {
        // Up one from row 0 leaves the board
        assert!(matches!(decode_move(0, Color::White, &QueenPromotionSet::new()), Err(CodecError::Decode { index: 0, .. })));
        assert!(matches!(
            decode_move(NUM_OUTPUT_POLICY_MOVES, Color::Black, &QueenPromotionSet::new()),
            Err(CodecError::Decode { .. })
        ));
        assert!(PolicyIndex::from_flat(NUM_OUTPUT_POLICY_MOVES).is_err());
    }

    #[test]
    fn test_geometric_round_trip() {
        let empty = QueenPromotionSet::new();
        for color in Color::iter() {
            let mut num_decodable = 0;
            for index in 0..NUM_OUTPUT_POLICY_MOVES {
                let policy_index = PolicyIndex::from_flat(index).unwrap();
                assert_eq!(policy_index.flat(), index);
                if let Ok(decoded) = decode_move(index, color, &empty) {
                    num_decodable += 1;
                    assert_eq!(encode_move(&decoded, color).unwrap(), index);
                }
            }
            // 1456 slides and 336 jumps, plus 154 single pawn steps per underpromotion piece
            assert_eq!(num_decodable, 1456 + 336 + 3 * 154);
        }
    }
}
