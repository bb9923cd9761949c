use crate::utils::Color;

#[derive(Eq, PartialEq, Clone, Copy, Debug)]
pub enum Termination {
    Checkmate,
    Stalemate,
    InsufficientMaterial,
    FivefoldRepetition,
    SeventyFiveMoveRule
}

impl Termination {
    pub fn is_decisive(&self) -> bool {
        self == &Termination::Checkmate
    }

    pub fn is_draw(&self) -> bool {
        !self.is_decisive()
    }
}

/// How a finished game ended. The winner is a color; the value of the result is derived per color.
#[derive(Eq, PartialEq, Clone, Copy, Debug)]
pub struct Outcome {
    pub termination: Termination,
    pub winner: Option<Color>,
}

impl Outcome {
    pub fn checkmate(winner: Color) -> Outcome {
        Outcome {
            termination: Termination::Checkmate,
            winner: Some(winner),
        }
    }

    pub fn draw(termination: Termination) -> Outcome {
        Outcome {
            termination,
            winner: None,
        }
    }

    /// Game value for `color`: 1 for a win, -1 for a loss, 0 for a draw.
    pub fn value_for(&self, color: Color) -> f64 {
        match self.winner {
            Some(winner) if winner == color => 1.,
            Some(_) => -1.,
            None => 0.
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_value() {
        let outcome = Outcome::checkmate(Color::White);
        assert!(outcome.termination.is_decisive());
        assert_eq!(outcome.value_for(Color::White), 1.);
        assert_eq!(outcome.value_for(Color::Black), -1.);

        let outcome = Outcome::draw(Termination::Stalemate);
        assert!(outcome.termination.is_draw());
        assert_eq!(outcome.value_for(Color::White), 0.);
        assert_eq!(outcome.value_for(Color::Black), 0.);
    }
}
