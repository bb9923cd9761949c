//! The bidirectional codec between game states and the tensors of a policy/value network.

pub mod constants;
mod config;
mod error;
mod board_planes;
mod history;
mod meta_planes;
mod perspective;
mod policy_index;
mod action_mask;
mod chess_tensor;
mod sample;

pub use config::*;
pub use error::*;
pub use board_planes::*;
pub use history::*;
pub use meta_planes::*;
pub use perspective::*;
pub use policy_index::*;
pub use action_mask::*;
pub use chess_tensor::*;
pub use sample::*;
