use std::error::Error;
use std::fmt::{Display, Formatter};
use tch::TchError;
use crate::r#move::Move;

#[derive(Debug)]
pub enum CodecError {
    /// The move is not in the legal set, or no action plane can express its displacement.
    InvalidMove(Move),
    /// The index does not describe a move that stays on the board.
    Decode { index: usize, reason: &'static str },
    /// Two distinct moves map onto the same action index.
    InvariantViolation { index: usize, first: Move, second: Move },
    Tensor(TchError),
}

impl Display for CodecError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CodecError::InvalidMove(mv) => write!(f, "Invalid move: {}", mv),
            CodecError::Decode { index, reason } => write!(f, "Cannot decode action index {}: {}", index, reason),
            CodecError::InvariantViolation { index, first, second } => {
                write!(f, "Moves {} and {} both encode to action index {}", first, second, index)
            }
            CodecError::Tensor(e) => write!(f, "Tensor error: {}", e),
        }
    }
}

impl Error for CodecError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            CodecError::Tensor(e) => Some(e),
            _ => None
        }
    }
}

impl From<TchError> for CodecError {
    fn from(e: TchError) -> CodecError {
        CodecError::Tensor(e)
    }
}
