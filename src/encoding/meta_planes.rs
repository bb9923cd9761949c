use crate::encoding::constants::{NUM_CASTLING_BITS, NUM_METADATA_BITS, NUM_SQUARES};
use crate::state::Position;
use crate::utils::Color;

/// The seven constant planes that follow the history frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetaPlanes {
    /// 1 when the planes are built for White's orientation, 0 for Black's.
    pub orientation: f32,
    pub ply_count: f32,
    /// Kingside and queenside rights of the oriented color, then of its opponent.
    pub castling: [f32; NUM_CASTLING_BITS],
    pub no_progress: f32,
}

impl MetaPlanes {
    /// Meta planes in White's orientation, the layout of the canonical tensor.
    pub fn canonical(position: &Position) -> MetaPlanes {
        MetaPlanes::for_perspective(position, Color::White)
    }

    pub fn for_perspective(position: &Position, color: Color) -> MetaPlanes {
        let rights = position.castling_rights;
        let flag = |has_right: bool| if has_right { 1. } else { 0. };
        MetaPlanes {
            orientation: flag(color == Color::White),
            ply_count: position.ply as f32,
            castling: [
                flag(rights.has_kingside(color)),
                flag(rights.has_queenside(color)),
                flag(rights.has_kingside(color.flip())),
                flag(rights.has_queenside(color.flip())),
            ],
            no_progress: position.halfmove_clock as f32,
        }
    }

    pub fn values(&self) -> [f32; NUM_METADATA_BITS] {
        [
            self.orientation,
            self.ply_count,
            self.castling[0],
            self.castling[1],
            self.castling[2],
            self.castling[3],
            self.no_progress,
        ]
    }

    /// Broadcasts every value over its own 8x8 plane.
    pub fn write_to(&self, planes: &mut [f32]) {
        for (channel, value) in self.values().iter().enumerate() {
            planes[channel * NUM_SQUARES..(channel + 1) * NUM_SQUARES].fill(*value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::CastlingRights;

    #[test]
    fn test_initial_meta_planes() {
        let meta = MetaPlanes::canonical(&Position::initial());
        assert_eq!(meta.values(), [1., 0., 1., 1., 1., 1., 0.]);
    }

    #[test]
    fn test_counters_keep_magnitude() {
        let mut position = Position::initial();
        position.ply = 57;
        position.halfmove_clock = 23;
        let meta = MetaPlanes::canonical(&position);
        assert_eq!(meta.ply_count, 57.);
        assert_eq!(meta.no_progress, 23.);

        let mut planes = vec![0.; NUM_METADATA_BITS * NUM_SQUARES];
        meta.write_to(&mut planes);
        assert!(planes[NUM_SQUARES..2 * NUM_SQUARES].iter().all(|value| *value == 57.));
        assert!(planes[6 * NUM_SQUARES..].iter().all(|value| *value == 23.));
    }

    #[test]
    fn test_castling_reordered_by_perspective() {
        let mut position = Position::initial();
        position.castling_rights = CastlingRights::new(true, false, false, true);

        let white = MetaPlanes::for_perspective(&position, Color::White);
        assert_eq!(white.orientation, 1.);
        assert_eq!(white.castling, [1., 0., 0., 1.]);

        let black = MetaPlanes::for_perspective(&position, Color::Black);
        assert_eq!(black.orientation, 0.);
        assert_eq!(black.castling, [0., 1., 1., 0.]);
    }
}
