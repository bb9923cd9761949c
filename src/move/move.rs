use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use crate::utils::{PieceType, PromotionPieceType, Square};

/// Represents a move in the game: a source, a destination and an optional promotion.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    pub source: Square,
    pub destination: Square,
    pub promotion: Option<PromotionPieceType>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveParseError {
    InvalidLength(String),
    InvalidSquare(String),
    InvalidPromotion(String),
}

impl Display for MoveParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            MoveParseError::InvalidLength(uci) => write!(f, "Invalid UCI move length: {}", uci),
            MoveParseError::InvalidSquare(uci) => write!(f, "Invalid square in UCI move: {}", uci),
            MoveParseError::InvalidPromotion(uci) => write!(f, "Invalid promotion in UCI move: {}", uci),
        }
    }
}

impl Error for MoveParseError {}

impl Move {
    pub const fn new(source: Square, destination: Square, promotion: Option<PromotionPieceType>) -> Move {
        Move {
            source,
            destination,
            promotion
        }
    }

    pub const fn new_non_promotion(source: Square, destination: Square) -> Move {
        Move::new(source, destination, None)
    }

    pub fn is_queen_promotion(&self) -> bool {
        self.promotion == Some(PromotionPieceType::Queen)
    }

    /// Returns the UCI (Universal Chess Interface) representation of the move.
    pub fn uci(&self) -> String {
        match self.promotion {
            Some(promotion) => format!("{}{}{}", self.source, self.destination, promotion.to_char()),
            None => format!("{}{}", self.source, self.destination)
        }
    }
}

impl FromStr for Move {
    type Err = MoveParseError;

    fn from_str(uci: &str) -> Result<Move, MoveParseError> {
        if !uci.is_ascii() || (uci.len() != 4 && uci.len() != 5) {
            return Err(MoveParseError::InvalidLength(uci.to_string()));
        }

        let source = Square::from_str(&uci[0..2]).map_err(|_| MoveParseError::InvalidSquare(uci.to_string()))?;
        let destination = Square::from_str(&uci[2..4]).map_err(|_| MoveParseError::InvalidSquare(uci.to_string()))?;

        let promotion = match uci[4..].chars().next() {
            None => None,
            Some(c) => {
                let promotion = PieceType::from_char(c)
                    .and_then(|piece_type| PromotionPieceType::try_from(piece_type).ok())
                    .ok_or_else(|| MoveParseError::InvalidPromotion(uci.to_string()))?;
                Some(promotion)
            }
        };

        Ok(Move::new(source, destination, promotion))
    }
}

impl From<chess::ChessMove> for Move {
    fn from(mv: chess::ChessMove) -> Move {
        let promotion = mv.get_promotion()
            .and_then(|piece| PromotionPieceType::try_from(PieceType::from(piece)).ok());
        Move::new(mv.get_source().into(), mv.get_dest().into(), promotion)
    }
}

impl From<Move> for chess::ChessMove {
    fn from(mv: Move) -> chess::ChessMove {
        let promotion = mv.promotion.map(|piece| chess::Piece::from(PieceType::from(piece)));
        chess::ChessMove::new(mv.source.into(), mv.destination.into(), promotion)
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.uci())
    }
}

impl std::fmt::Debug for Move {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_uci() {
        let mv = Move::new_non_promotion(Square::E2, Square::E4);
        assert_eq!(mv.uci(), "e2e4");
        assert_eq!(Move::from_str("e2e4"), Ok(mv));

        let promotion = Move::new(Square::E7, Square::E8, Some(PromotionPieceType::Queen));
        assert_eq!(promotion.uci(), "e7e8q");
        assert!(promotion.is_queen_promotion());
        assert_eq!(Move::from_str("e7e8q"), Ok(promotion));
        assert_eq!(Move::from_str("e2d1r").map(|mv| mv.promotion), Ok(Some(PromotionPieceType::Rook)));
    }

    #[test]
    fn test_move_parse_errors() {
        assert_eq!(Move::from_str("e2"), Err(MoveParseError::InvalidLength("e2".to_string())));
        assert_eq!(Move::from_str("z2e4"), Err(MoveParseError::InvalidSquare("z2e4".to_string())));
        assert_eq!(Move::from_str("e7e8k"), Err(MoveParseError::InvalidPromotion("e7e8k".to_string())));
        assert_eq!(Move::from_str("e7e8p"), Err(MoveParseError::InvalidPromotion("e7e8p".to_string())));
    }

    #[test]
    fn test_chess_move_conversion() {
        for uci in ["e2e4", "g1f3", "a7a8n", "h2h1q", "e1g1"] {
            let mv = Move::from_str(uci).unwrap();
            let converted = chess::ChessMove::from(mv);
            assert_eq!(converted.to_string(), uci);
            assert_eq!(Move::from(converted), mv);
        }
    }
}
