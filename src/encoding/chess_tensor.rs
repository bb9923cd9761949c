//! The encoder of one game timeline.

use std::cell::OnceCell;
use std::cmp::Ordering;
use tch::Tensor;
use tracing::debug;
use crate::encoding::action_mask::{policy_values, ActionMask};
use crate::encoding::config::EncoderConfig;
use crate::encoding::constants::{NUM_HISTORY_BITS, NUM_POSITION_BITS, NUM_SQUARES};
use crate::encoding::error::CodecError;
use crate::encoding::history::{History, HistoryFrame};
use crate::encoding::meta_planes::MetaPlanes;
use crate::encoding::perspective::to_perspective;
use crate::encoding::policy_index::decode_move;
use crate::r#move::Move;
use crate::state::{ChessGame, Outcome, Position, RulesEngine};
use crate::utils::Color;

/// The 119 canonical planes of a position and its history, flattened as `[channel][rank][file]`.
pub fn canonical_planes(history: &History, position: &Position) -> Vec<f32> {
    let mut planes = vec![0.; NUM_POSITION_BITS * NUM_SQUARES];
    let (history_planes, meta_planes) = planes.split_at_mut(NUM_HISTORY_BITS * NUM_SQUARES);
    history.write_to(history_planes);
    MetaPlanes::canonical(position).write_to(meta_planes);
    planes
}

/// Owns a rules engine, the history of encoded frames and the tensors derived from them.
///
/// The canonical tensor is rebuilt on every move. The per-color views are derived from it on first
/// use and dropped on the next move.
#[derive(Debug)]
pub struct ChessTensor<R: RulesEngine = ChessGame> {
    rules: R,
    config: EncoderConfig,
    position: Position,
    history: History,
    canonical: Tensor,
    perspectives: [OnceCell<Tensor>; 2],
}

impl ChessTensor<ChessGame> {
    /// Starts from the standard starting position.
    pub fn new(config: EncoderConfig) -> ChessTensor<ChessGame> {
        ChessTensor::with_rules(ChessGame::new(), config)
    }
}

impl<R: RulesEngine> ChessTensor<R> {
    /// Starts encoding the timeline of `rules` from its current position. Earlier positions are not
    /// encoded, but the repetition flags of the first frame come from `rules`.
    pub fn with_rules(rules: R, config: EncoderConfig) -> ChessTensor<R> {
        let position = rules.position();
        let history = History::new();
        let canonical = Tensor::zeros([NUM_POSITION_BITS as i64, 8, 8], config.options());
        let mut chess_tensor = ChessTensor {
            rules,
            config,
            position,
            history,
            canonical,
            perspectives: Default::default(),
        };
        chess_tensor.record_current_position();
        chess_tensor
    }

    /// Restarts on a new timeline, discarding all history.
    pub fn start_board(&mut self, rules: R) {
        self.rules = rules;
        self.position = self.rules.position();
        self.history = History::new();
        self.record_current_position();
        debug!(side_to_move = ?self.position.side_to_move, "started new board");
    }

    /// Plays `mv`. Illegal moves are rejected before anything changes.
    pub fn move_piece(&mut self, mv: Move) -> Result<(), CodecError> {
        if !self.rules.is_legal(&mv) {
            return Err(CodecError::InvalidMove(mv));
        }

        self.rules.push(mv);
        self.position = self.rules.position();
        self.record_current_position();
        debug!(%mv, ply = self.position.ply, "applied move");
        Ok(())
    }

    fn record_current_position(&mut self) {
        let frame = HistoryFrame::new(&self.position.board, self.rules.is_repetition(2), self.rules.is_repetition(3));
        self.history.push(frame);

        let planes = canonical_planes(&self.history, &self.position);
        self.canonical = Tensor::from_slice(&planes)
            .view([NUM_POSITION_BITS as i64, 8, 8])
            .to_kind(self.config.kind())
            .to_device(self.config.device());
        self.perspectives = Default::default();
    }

    pub fn rules(&self) -> &R {
        &self.rules
    }

    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn side_to_move(&self) -> Color {
        self.position.side_to_move
    }

    /// The `[119, 8, 8]` tensor in White's colour order and `[rank, file]` cell order.
    pub fn canonical(&self) -> &Tensor {
        &self.canonical
    }

    /// The `[119, 8, 8]` tensor oriented for the side to move.
    pub fn get_representation(&self) -> &Tensor {
        self.representation_for(self.side_to_move())
    }

    pub fn representation_for(&self, color: Color) -> &Tensor {
        self.perspectives[color as usize].get_or_init(|| to_perspective(&self.canonical, color))
    }

    pub fn get_moves(&self) -> Vec<Move> {
        self.rules.legal_moves()
    }

    pub fn legal_action_mask(&self) -> Result<ActionMask, CodecError> {
        ActionMask::from_moves(&self.get_moves(), self.side_to_move(), &self.config)
    }

    /// The legal move at `index` for the side to move. Indices of illegal moves are `InvalidMove`.
    pub fn decode_action(&self, index: usize) -> Result<Move, CodecError> {
        let legal_moves = self.get_moves();
        let mask = ActionMask::from_moves(&legal_moves, self.side_to_move(), &self.config)?;
        let mv = decode_move(index, self.side_to_move(), mask.queen_promotions())?;
        if legal_moves.contains(&mv) {
            Ok(mv)
        } else {
            Err(CodecError::InvalidMove(mv))
        }
    }

    /// Legal moves with the probability a `[4672]` policy gives them after masking out illegal
    /// moves, most probable first.
    pub fn decode_policy(&self, policy: &Tensor) -> Result<Vec<(Move, f64)>, CodecError> {
        let mask = self.legal_action_mask()?;
        let probabilities = policy_values(&mask.renormalize(policy)?)?;

        let mut moves: Vec<(Move, f64)> = mask.moves()
            .map(|(index, mv)| (mv, probabilities[index] as f64))
            .collect();
        moves.sort_by(|(_, a), (_, b)| b.partial_cmp(a).unwrap_or(Ordering::Equal));
        Ok(moves)
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.rules.outcome()
    }

    /// Value of the game for the side to move, and whether the game is over.
    pub fn value_and_terminated(&self) -> (f64, bool) {
        match self.outcome() {
            Some(outcome) => (outcome.value_for(self.side_to_move()), true),
            None => (0., false)
        }
    }
}
