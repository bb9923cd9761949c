//! This module contains game state related code: the snapshot the encoder reads and the rules
//! engine it reads it from.

mod board;
mod position;
mod termination;
mod rules;
mod chess_game;

pub use board::*;
pub use position::*;
pub use termination::*;
pub use rules::*;
pub use chess_game::*;
