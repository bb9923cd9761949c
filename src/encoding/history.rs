//! The sliding window of the last few encoded plies.

use std::collections::VecDeque;
use tracing::trace;
use crate::encoding::board_planes::board_planes;
use crate::encoding::constants::{NUM_BITS_PER_BOARD, NUM_BITS_PER_FRAME, NUM_SQUARES, NUM_STATES_TO_CONSIDER};
use crate::state::Board;
use crate::utils::{write_mask_to_plane, Bitboard, Color};

/// One ply of history: twelve occupancy masks in white-first order plus the two repetition flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HistoryFrame {
    pub board_planes: [Bitboard; NUM_BITS_PER_BOARD],
    /// Position seen at least twice, and at least three times, counting the current occurrence.
    pub repetitions: [bool; 2],
}

impl HistoryFrame {
    pub const EMPTY: HistoryFrame = HistoryFrame {
        board_planes: [0; NUM_BITS_PER_BOARD],
        repetitions: [false; 2],
    };

    pub fn new(board: &Board, seen_twice: bool, seen_three_times: bool) -> HistoryFrame {
        HistoryFrame {
            board_planes: board_planes(board, Color::White),
            repetitions: [seen_twice, seen_three_times],
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == HistoryFrame::EMPTY
    }

    /// Writes the frame into `NUM_BITS_PER_FRAME` consecutive 8x8 planes laid out as `[rank][file]`.
    /// Repetition flags are broadcast over their whole plane.
    pub fn write_to(&self, planes: &mut [f32]) {
        for (channel, mask) in self.board_planes.iter().enumerate() {
            write_mask_to_plane(*mask, &mut planes[channel * NUM_SQUARES..(channel + 1) * NUM_SQUARES]);
        }
        for (i, flag) in self.repetitions.iter().enumerate() {
            let channel = NUM_BITS_PER_BOARD + i;
            let value = if *flag { 1. } else { 0. };
            planes[channel * NUM_SQUARES..(channel + 1) * NUM_SQUARES].fill(value);
        }
    }
}

/// Always exactly `NUM_STATES_TO_CONSIDER` frames, the most recent first. Frames for plies before the
/// start of the game are empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    frames: VecDeque<HistoryFrame>,
}

impl Default for History {
    fn default() -> Self {
        History::new()
    }
}

impl History {
    pub fn new() -> History {
        let mut frames = VecDeque::with_capacity(NUM_STATES_TO_CONSIDER + 1);
        frames.resize(NUM_STATES_TO_CONSIDER, HistoryFrame::EMPTY);
        History { frames }
    }

    pub fn push(&mut self, frame: HistoryFrame) {
        self.frames.push_front(frame);
        if let Some(evicted) = self.frames.pop_back() {
            if !evicted.is_empty() {
                trace!("evicted oldest history frame");
            }
        }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frame `t` plies ago, 0 being the current position.
    pub fn get(&self, t: usize) -> Option<&HistoryFrame> {
        self.frames.get(t)
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryFrame> {
        self.frames.iter()
    }

    /// Writes all frames, newest first, into `NUM_HISTORY_BITS` consecutive planes.
    pub fn write_to(&self, planes: &mut [f32]) {
        let frame_len = NUM_BITS_PER_FRAME * NUM_SQUARES;
        for (t, frame) in self.frames.iter().enumerate() {
            frame.write_to(&mut planes[t * frame_len..(t + 1) * frame_len]);
        }
    }
}
