//! Orients a canonical tensor into the frame of one player.
//!
//! The canonical tensor stores White's pieces first and indexes cells as `[rank, file]`. White sees
//! it flipped on the rank axis. Black sees the colour groups of every frame and the castling pairs
//! swapped, the orientation plane inverted, and the file axis flipped. Each map is its own inverse.

use static_init::dynamic;
use tch::Tensor;
use crate::encoding::constants::{CASTLING_CHANNEL, NUM_BITS_PER_FRAME, NUM_PIECE_TYPE_BITS, NUM_POSITION_BITS, NUM_STATES_TO_CONSIDER, SIDE_TO_MOVE_CHANNEL};
use crate::utils::Color;

/// Channel gathered into each output channel of Black's view.
#[dynamic]
static BLACK_CHANNEL_ORDER: [i64; NUM_POSITION_BITS] = {
    let mut order = [0; NUM_POSITION_BITS];
    for (channel, source) in order.iter_mut().enumerate() {
        *source = channel as i64;
    }
    for t in 0..NUM_STATES_TO_CONSIDER {
        let frame = t * NUM_BITS_PER_FRAME;
        for k in 0..NUM_PIECE_TYPE_BITS {
            order.swap(frame + k, frame + NUM_PIECE_TYPE_BITS + k);
        }
    }
    order.swap(CASTLING_CHANNEL, CASTLING_CHANNEL + 2);
    order.swap(CASTLING_CHANNEL + 1, CASTLING_CHANNEL + 3);
    order
};

/// Per channel `(scale, shift)` so that the orientation plane becomes `1 - x`.
#[dynamic]
static BLACK_CHANNEL_AFFINE: ([f32; NUM_POSITION_BITS], [f32; NUM_POSITION_BITS]) = {
    let mut scale = [1.; NUM_POSITION_BITS];
    let mut shift = [0.; NUM_POSITION_BITS];
    scale[SIDE_TO_MOVE_CHANNEL] = -1.;
    shift[SIDE_TO_MOVE_CHANNEL] = 1.;
    (scale, shift)
};

/// Works on a single `[119, 8, 8]` tensor or a batch `[N, 119, 8, 8]`.
pub fn to_perspective(canonical: &Tensor, color: Color) -> Tensor {
    let channel_dim = canonical.dim() as i64 - 3;
    let rank_dim = channel_dim + 1;
    let file_dim = channel_dim + 2;

    match color {
        Color::White => canonical.flip([rank_dim]),
        Color::Black => {
            let (kind, device) = (canonical.kind(), canonical.device());
            let order = Tensor::from_slice(&BLACK_CHANNEL_ORDER[..]).to_device(device);
            let (scale, shift) = &*BLACK_CHANNEL_AFFINE;
            let scale = Tensor::from_slice(&scale[..]).view([NUM_POSITION_BITS as i64, 1, 1]).to_kind(kind).to_device(device);
            let shift = Tensor::from_slice(&shift[..]).view([NUM_POSITION_BITS as i64, 1, 1]).to_kind(kind).to_device(device);

            (canonical.index_select(channel_dim, &order) * scale + shift).flip([file_dim])
        }
    }
}
