use indexmap::map::Entry;
use indexmap::IndexMap;
use tch::{Device, Kind, TchError, Tensor};
use tracing::debug;
use crate::encoding::config::EncoderConfig;
use crate::encoding::constants::NUM_OUTPUT_POLICY_MOVES;
use crate::encoding::error::CodecError;
use crate::encoding::policy_index::{decode_move, encode_move, QueenPromotionSet};
use crate::r#move::Move;
use crate::utils::Color;

/// A weight per action index over a set of moves of one color, plus the queen promotions among them.
#[derive(Debug)]
pub struct ActionMask {
    weights: Tensor,
    moves: IndexMap<usize, Move>,
    queen_promotions: QueenPromotionSet,
    color: Color,
}

impl ActionMask {
    /// Every move gets weight 1.
    pub fn from_moves<'a>(moves: impl IntoIterator<Item = &'a Move>, color: Color, config: &EncoderConfig) -> Result<ActionMask, CodecError> {
        ActionMask::from_weighted_moves(moves.into_iter().map(|mv| (*mv, 1.)), color, config)
    }

    /// Adds each weight at its move's index. Listing the same move twice adds up its weights;
    /// two different moves on one index is an [`CodecError::InvariantViolation`].
    pub fn from_weighted_moves(moves: impl IntoIterator<Item = (Move, f64)>, color: Color, config: &EncoderConfig) -> Result<ActionMask, CodecError> {
        let mut weights = vec![0f32; NUM_OUTPUT_POLICY_MOVES];
        let mut indexed_moves = IndexMap::new();
        let mut queen_promotions = QueenPromotionSet::new();

        for (mv, weight) in moves {
            let index = encode_move(&mv, color)?;
            match indexed_moves.entry(index) {
                Entry::Occupied(entry) => {
                    if *entry.get() != mv {
                        return Err(CodecError::InvariantViolation { index, first: *entry.get(), second: mv });
                    }
                }
                Entry::Vacant(entry) => {
                    entry.insert(mv);
                }
            }
            weights[index] += weight as f32;
            queen_promotions.insert(&mv);
        }

        debug!(num_moves = indexed_moves.len(), num_queen_promotions = queen_promotions.len(), ?color, "built action mask");

        Ok(ActionMask {
            weights: Tensor::from_slice(&weights).to_kind(config.kind()).to_device(config.device()),
            moves: indexed_moves,
            queen_promotions,
            color,
        })
    }

    /// The `[4672]` weight vector.
    pub fn tensor(&self) -> &Tensor {
        &self.weights
    }

    pub fn queen_promotions(&self) -> &QueenPromotionSet {
        &self.queen_promotions
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// The distinct moves with their action indices, in insertion order.
    pub fn moves(&self) -> impl Iterator<Item = (usize, Move)> + '_ {
        self.moves.iter().map(|(index, mv)| (*index, *mv))
    }

    pub fn get_move(&self, index: usize) -> Option<Move> {
        self.moves.get(&index).copied()
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Masks `policy` with these weights and rescales it to sum to 1.
    pub fn renormalize(&self, policy: &Tensor) -> Result<Tensor, CodecError> {
        let mask = self.weights.ne(0.).to_kind(policy.kind()).to_device(policy.device());
        renormalize_policy(policy, &mask)
    }
}

fn check_policy_len(policy: &Tensor) -> Result<(), CodecError> {
    let num_elements = policy.numel();
    if num_elements != NUM_OUTPUT_POLICY_MOVES {
        return Err(TchError::Shape(format!(
            "expected {} policy entries, got {} ({:?})", NUM_OUTPUT_POLICY_MOVES, num_elements, policy.size()
        )).into());
    }
    Ok(())
}

/// Copies a `[4672]` vector (any shape with that many elements) to the CPU as `f32`.
pub(crate) fn policy_values(policy: &Tensor) -> Result<Vec<f32>, CodecError> {
    check_policy_len(policy)?;
    let values = Vec::<f32>::try_from(policy.flatten(0, -1).to_kind(Kind::Float).to_device(Device::Cpu))?;
    Ok(values)
}

/// Decodes every nonzero entry of a `[4672]` vector, in index order.
pub fn decode_actions(policy: &Tensor, color: Color, queen_promotions: &QueenPromotionSet) -> Result<Vec<Move>, CodecError> {
    policy_values(policy)?
        .iter()
        .enumerate()
        .filter(|(_, value)| **value != 0.)
        .map(|(index, _)| decode_move(index, color, queen_promotions))
        .collect()
}

/// Zeroes the entries outside `legal_move_mask` and rescales the rest to sum to 1. Both must hold
/// exactly 4672 entries; nothing is broadcast.
pub fn renormalize_policy(policy: &Tensor, legal_move_mask: &Tensor) -> Result<Tensor, CodecError> {
    check_policy_len(policy)?;
    check_policy_len(legal_move_mask)?;
    let masked_policy = policy.f_mul(&legal_move_mask.f_view_as(policy)?)?;
    let sum_legal_probs = masked_policy.f_sum(Kind::Double)?.f_double_value(&[])?;

    if sum_legal_probs > 0. {
        Ok(masked_policy.f_div_scalar(sum_legal_probs)?)
    } else {
        // Nothing legal carries probability; hand back the mask itself
        Ok(legal_move_mask.shallow_clone())
    }
}
