use subenum::subenum;

#[subenum(PromotionPieceType, UnderpromotionPieceType)]
#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum PieceType {
    Pawn=0,
    #[subenum(PromotionPieceType, UnderpromotionPieceType)]
    Knight=1,
    #[subenum(PromotionPieceType, UnderpromotionPieceType)]
    Bishop=2,
    #[subenum(PromotionPieceType, UnderpromotionPieceType)]
    Rook=3,
    #[subenum(PromotionPieceType)]
    Queen=4,
    King=5
}

const ALL_PIECES: [PieceType; 6] = [
    PieceType::Pawn,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Rook,
    PieceType::Queen,
    PieceType::King
];

const ALL_UNDERPROMOTION_PIECES: [UnderpromotionPieceType; 3] = [
    UnderpromotionPieceType::Knight,
    UnderpromotionPieceType::Bishop,
    UnderpromotionPieceType::Rook
];

impl PieceType {
    pub const LIMIT: u8 = 6;

    pub const fn from_index(piece_type_number: u8) -> Option<PieceType> {
        if piece_type_number < PieceType::LIMIT {
            Some(ALL_PIECES[piece_type_number as usize])
        } else {
            None
        }
    }

    pub const fn to_char(&self) -> char {
        match self {
            PieceType::Pawn => 'p',
            PieceType::Knight => 'n',
            PieceType::Bishop => 'b',
            PieceType::Rook => 'r',
            PieceType::Queen => 'q',
            PieceType::King => 'k'
        }
    }

    pub fn from_char(c: char) -> Option<PieceType> {
        ALL_PIECES.iter().copied().find(|piece_type| piece_type.to_char() == c.to_ascii_lowercase())
    }

    pub fn iter_pieces() -> impl Iterator<Item = PieceType> {
        ALL_PIECES.iter().copied()
    }
}

impl PromotionPieceType {
    pub fn to_char(&self) -> char {
        PieceType::from(*self).to_char()
    }

    /// The underpromotion this is, `None` for a queen.
    pub fn as_underpromotion(&self) -> Option<UnderpromotionPieceType> {
        UnderpromotionPieceType::try_from(PieceType::from(*self)).ok()
    }
}

impl UnderpromotionPieceType {
    /// Position of the piece in the knight, bishop, rook ordering of the underpromotion planes.
    pub fn index(&self) -> u8 {
        match self {
            UnderpromotionPieceType::Knight => 0,
            UnderpromotionPieceType::Bishop => 1,
            UnderpromotionPieceType::Rook => 2
        }
    }

    pub fn from_index(index: u8) -> Option<UnderpromotionPieceType> {
        ALL_UNDERPROMOTION_PIECES.get(index as usize).copied()
    }

    pub fn iter() -> impl Iterator<Item = UnderpromotionPieceType> {
        ALL_UNDERPROMOTION_PIECES.iter().copied()
    }

    pub const fn to_promotion(&self) -> PromotionPieceType {
        match self {
            UnderpromotionPieceType::Knight => PromotionPieceType::Knight,
            UnderpromotionPieceType::Bishop => PromotionPieceType::Bishop,
            UnderpromotionPieceType::Rook => PromotionPieceType::Rook
        }
    }
}

impl From<chess::Piece> for PieceType {
    fn from(piece: chess::Piece) -> PieceType {
        match piece {
            chess::Piece::Pawn => PieceType::Pawn,
            chess::Piece::Knight => PieceType::Knight,
            chess::Piece::Bishop => PieceType::Bishop,
            chess::Piece::Rook => PieceType::Rook,
            chess::Piece::Queen => PieceType::Queen,
            chess::Piece::King => PieceType::King
        }
    }
}

impl From<PieceType> for chess::Piece {
    fn from(piece_type: PieceType) -> chess::Piece {
        match piece_type {
            PieceType::Pawn => chess::Piece::Pawn,
            PieceType::Knight => chess::Piece::Knight,
            PieceType::Bishop => chess::Piece::Bishop,
            PieceType::Rook => chess::Piece::Rook,
            PieceType::Queen => chess::Piece::Queen,
            PieceType::King => chess::Piece::King
        }
    }
}
