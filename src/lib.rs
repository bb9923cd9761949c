pub mod utils;
pub mod r#move;
pub mod state;
pub mod encoding;
