//! Encoded positions with their policy and value targets, as handed to a training pipeline.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use serde::{Deserialize, Serialize};
use tch::{Device, Kind, TchError, Tensor};
use crate::encoding::action_mask::{policy_values, ActionMask};
use crate::encoding::chess_tensor::ChessTensor;
use crate::encoding::config::EncoderConfig;
use crate::encoding::constants::{NUM_OUTPUT_POLICY_MOVES, NUM_POSITION_BITS, NUM_SQUARES};
use crate::encoding::error::CodecError;
use crate::r#move::Move;
use crate::state::RulesEngine;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingSample {
    /// The side-to-move view, `[119, 8, 8]` flattened.
    pub planes: Vec<f32>,
    /// Nonzero policy targets by action index.
    pub policy: Vec<(u16, f32)>,
    /// Game value for the side to move.
    pub value: f32,
}

impl TrainingSample {
    /// Encodes the current position of `chess_tensor`. Every policy move must be legal there.
    pub fn new<R: RulesEngine>(chess_tensor: &ChessTensor<R>, policy: &[(Move, f64)], value: f64) -> Result<TrainingSample, CodecError> {
        let legal_moves = chess_tensor.get_moves();
        if let Some((illegal, _)) = policy.iter().find(|(mv, _)| !legal_moves.contains(mv)) {
            return Err(CodecError::InvalidMove(*illegal));
        }

        let config = EncoderConfig::default();
        let mask = ActionMask::from_weighted_moves(policy.iter().copied(), chess_tensor.side_to_move(), &config)?;
        let weights = policy_values(mask.tensor())?;
        let sparse_policy = mask.moves()
            .filter(|(index, _)| weights[*index] != 0.)
            .map(|(index, _)| (index as u16, weights[index]))
            .collect();

        let representation = chess_tensor.get_representation();
        let planes = Vec::<f32>::try_from(representation.flatten(0, -1).to_kind(Kind::Float).to_device(Device::Cpu))?;

        Ok(TrainingSample {
            planes,
            policy: sparse_policy,
            value: value as f32,
        })
    }
}

pub fn write_samples<P: AsRef<Path>>(path: P, samples: &[TrainingSample]) -> bincode::Result<()> {
    let writer = BufWriter::new(File::create(path)?);
    bincode::serialize_into(writer, samples)
}

pub fn read_samples<P: AsRef<Path>>(path: P) -> bincode::Result<Vec<TrainingSample>> {
    let reader = BufReader::new(File::open(path)?);
    bincode::deserialize_from(reader)
}

/// Batches samples into states `[N, 119, 8, 8]`, policies `[N, 4672]` and values `[N, 1]`.
pub fn collate(samples: &[TrainingSample], config: &EncoderConfig) -> Result<(Tensor, Tensor, Tensor), CodecError> {
    let num_samples = samples.len();
    let plane_len = NUM_POSITION_BITS * NUM_SQUARES;

    let mut states = Vec::with_capacity(num_samples * plane_len);
    let mut policies = vec![0f32; num_samples * NUM_OUTPUT_POLICY_MOVES];
    let mut values = Vec::with_capacity(num_samples);

    for (i, sample) in samples.iter().enumerate() {
        if sample.planes.len() != plane_len {
            return Err(TchError::Shape(format!(
                "sample {} has {} plane values, expected {}", i, sample.planes.len(), plane_len
            )).into());
        }
        states.extend_from_slice(&sample.planes);

        for (index, weight) in sample.policy.iter() {
            let index = *index as usize;
            if index >= NUM_OUTPUT_POLICY_MOVES {
                return Err(CodecError::Decode { index, reason: "index is outside the action space" });
            }
            policies[i * NUM_OUTPUT_POLICY_MOVES + index] = *weight;
        }

        values.push(sample.value);
    }

    let n = num_samples as i64;
    let to_batch = |data: &[f32], shape: &[i64]| {
        Tensor::from_slice(data).view(shape).to_kind(config.kind()).to_device(config.device())
    };

    Ok((
        to_batch(&states, &[n, NUM_POSITION_BITS as i64, 8, 8]),
        to_batch(&policies, &[n, NUM_OUTPUT_POLICY_MOVES as i64]),
        to_batch(&values, &[n, 1]),
    ))
}
