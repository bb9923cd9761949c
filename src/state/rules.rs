use crate::r#move::Move;
use crate::state::{Outcome, Position};

/// The chess rules the encoder relies on but does not implement.
///
/// One implementor value represents one game timeline: `push` only ever receives moves that were
/// found in `legal_moves` for the current position.
pub trait RulesEngine {
    fn position(&self) -> Position;

    fn legal_moves(&self) -> Vec<Move>;

    fn is_legal(&self, mv: &Move) -> bool {
        self.legal_moves().contains(mv)
    }

    fn push(&mut self, mv: Move);

    /// Whether the current position has occurred at least `count` times, including now.
    fn is_repetition(&self, count: usize) -> bool;

    fn outcome(&self) -> Option<Outcome>;
}
