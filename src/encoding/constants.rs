// Constants for the input tensor
pub const NUM_PIECE_TYPE_BITS: usize = 6; // 6 piece types
pub const NUM_COLOR_BITS: usize = 2; // 2 colors
pub const NUM_BITS_PER_BOARD: usize = NUM_PIECE_TYPE_BITS * NUM_COLOR_BITS; // 12 occupancy planes

pub const NUM_REPETITION_BITS: usize = 2; // seen at least twice, seen at least three times
pub const NUM_BITS_PER_FRAME: usize = NUM_BITS_PER_BOARD + NUM_REPETITION_BITS; // M = 14 planes per ply

pub const NUM_STATES_TO_CONSIDER: usize = 8; // T = 8 plies of history
pub const NUM_HISTORY_BITS: usize = NUM_BITS_PER_FRAME * NUM_STATES_TO_CONSIDER; // 112 planes

pub const NUM_SIDE_TO_MOVE_BITS: usize = 1; // orientation of the tensor
pub const NUM_PLY_COUNT_BITS: usize = 1; // total plies played
pub const NUM_CASTLING_BITS: usize = 4; // 4 castling rights
pub const NUM_NO_PROGRESS_BITS: usize = 1; // halfmove clock
pub const NUM_METADATA_BITS: usize = NUM_SIDE_TO_MOVE_BITS + NUM_PLY_COUNT_BITS + NUM_CASTLING_BITS + NUM_NO_PROGRESS_BITS; // L = 7

pub const NUM_POSITION_BITS: usize = NUM_HISTORY_BITS + NUM_METADATA_BITS; // 119 8x8 planes in the input tensor

// Channel offsets of the metadata planes
pub const SIDE_TO_MOVE_CHANNEL: usize = NUM_HISTORY_BITS; // 112
pub const PLY_COUNT_CHANNEL: usize = SIDE_TO_MOVE_CHANNEL + NUM_SIDE_TO_MOVE_BITS; // 113
pub const CASTLING_CHANNEL: usize = PLY_COUNT_CHANNEL + NUM_PLY_COUNT_BITS; // 114..=117
pub const NO_PROGRESS_CHANNEL: usize = CASTLING_CHANNEL + NUM_CASTLING_BITS; // 118

pub const BOARD_SIZE: usize = 8;
pub const NUM_SQUARES: usize = BOARD_SIZE * BOARD_SIZE;

// Constants for the policy vector
pub const NUM_RAY_DIRECTIONS: u8 = 8; // 8 directions for queen-like moves
pub const MAX_RAY_LENGTH: u8 = 7; // Maximum length of a queen-like move
pub const NUM_QUEEN_LIKE_MOVES: u8 = NUM_RAY_DIRECTIONS * MAX_RAY_LENGTH; // 56 possible queen-like moves

pub const MAX_NUM_KNIGHT_MOVES: u8 = 8; // Maximum number of knight moves

pub const NUM_PAWN_MOVE_DIRECTIONS: u8 = 3; // 3 possible pawn moves
pub const NUM_UNDERPROMOTIONS: u8 = 3; // 3 underpromotions (knight, bishop, rook)
pub const NUM_WAYS_OF_UNDERPROMOTION: u8 = NUM_PAWN_MOVE_DIRECTIONS * NUM_UNDERPROMOTIONS; // 9 ways of underpromotion

pub const FIRST_KNIGHT_MOVE_PLANE: u8 = NUM_QUEEN_LIKE_MOVES; // 56
pub const FIRST_UNDERPROMOTION_PLANE: u8 = FIRST_KNIGHT_MOVE_PLANE + MAX_NUM_KNIGHT_MOVES; // 64

pub const NUM_TARGET_SQUARE_POSSIBILITIES: u8 = NUM_QUEEN_LIKE_MOVES + MAX_NUM_KNIGHT_MOVES + NUM_WAYS_OF_UNDERPROMOTION; // 73 move planes per square
pub const NUM_OUTPUT_POLICY_MOVES: usize = NUM_SQUARES * NUM_TARGET_SQUARE_POSSIBILITIES as usize; // 4672 possible moves for policy head
