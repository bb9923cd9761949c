use std::fmt::Display;
use std::str::FromStr;
use crate::utils::{Bitboard, Color};

#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub enum Square {
    A1=0, B1=1, C1=2, D1=3, E1=4, F1=5, G1=6, H1=7,
    A2=8, B2=9, C2=10, D2=11, E2=12, F2=13, G2=14, H2=15,
    A3=16, B3=17, C3=18, D3=19, E3=20, F3=21, G3=22, H3=23,
    A4=24, B4=25, C4=26, D4=27, E4=28, F4=29, G4=30, H4=31,
    A5=32, B5=33, C5=34, D5=35, E5=36, F5=37, G5=38, H5=39,
    A6=40, B6=41, C6=42, D6=43, E6=44, F6=45, G6=46, H6=47,
    A7=48, B7=49, C7=50, D7=51, E7=52, F7=53, G7=54, H7=55,
    A8=56, B8=57, C8=58, D8=59, E8=60, F8=61, G8=62, H8=63
}

const ALL_SQUARES: [Square; 64] = [
    Square::A1, Square::B1, Square::C1, Square::D1, Square::E1, Square::F1, Square::G1, Square::H1,
    Square::A2, Square::B2, Square::C2, Square::D2, Square::E2, Square::F2, Square::G2, Square::H2,
    Square::A3, Square::B3, Square::C3, Square::D3, Square::E3, Square::F3, Square::G3, Square::H3,
    Square::A4, Square::B4, Square::C4, Square::D4, Square::E4, Square::F4, Square::G4, Square::H4,
    Square::A5, Square::B5, Square::C5, Square::D5, Square::E5, Square::F5, Square::G5, Square::H5,
    Square::A6, Square::B6, Square::C6, Square::D6, Square::E6, Square::F6, Square::G6, Square::H6,
    Square::A7, Square::B7, Square::C7, Square::D7, Square::E7, Square::F7, Square::G7, Square::H7,
    Square::A8, Square::B8, Square::C8, Square::D8, Square::E8, Square::F8, Square::G8, Square::H8
];

pub const SQUARE_NAMES: [&str; 64] = [
    "a1", "b1", "c1", "d1", "e1", "f1", "g1", "h1",
    "a2", "b2", "c2", "d2", "e2", "f2", "g2", "h2",
    "a3", "b3", "c3", "d3", "e3", "f3", "g3", "h3",
    "a4", "b4", "c4", "d4", "e4", "f4", "g4", "h4",
    "a5", "b5", "c5", "d5", "e5", "f5", "g5", "h5",
    "a6", "b6", "c6", "d6", "e6", "f6", "g6", "h6",
    "a7", "b7", "c7", "d7", "e7", "f7", "g7", "h7",
    "a8", "b8", "c8", "d8", "e8", "f8", "g8", "h8"
];

impl Square {
    pub const fn from_index(square_number: u8) -> Option<Square> {
        if square_number < 64 {
            Some(ALL_SQUARES[square_number as usize])
        } else {
            None
        }
    }

    /// Builds a square from signed rank and file indices, `None` if either is off the board.
    pub const fn from_rank_and_file(rank: i8, file: i8) -> Option<Square> {
        if rank < 0 || rank > 7 || file < 0 || file > 7 {
            return None;
        }
        Square::from_index((rank * 8 + file) as u8)
    }

    pub const fn to_mask(&self) -> Bitboard {
        1 << *self as u8
    }

    pub const fn get_file(&self) -> u8 {
        *self as u8 % 8
    }

    pub const fn get_rank(&self) -> u8 {
        *self as u8 / 8
    }

    pub const fn readable(&self) -> &'static str {
        SQUARE_NAMES[*self as usize]
    }

    /// Row and column of the square in the frame of the player to move.
    /// White looks at the board with rank 8 on row 0; Black sees it rotated by 180 degrees.
    pub const fn to_perspective(&self, color: Color) -> (u8, u8) {
        match color {
            Color::White => (7 - self.get_rank(), self.get_file()),
            Color::Black => (self.get_rank(), 7 - self.get_file())
        }
    }

    /// Inverse of [`Square::to_perspective`]. Coordinates outside the board give `None`.
    pub const fn from_perspective(row: i8, col: i8, color: Color) -> Option<Square> {
        match color {
            Color::White => Square::from_rank_and_file(7 - row, col),
            Color::Black => Square::from_rank_and_file(row, 7 - col)
        }
    }

    pub fn iter_all() -> impl Iterator<Item = Square> {
        ALL_SQUARES.iter().copied()
    }
}

impl Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.readable())
    }
}

impl FromStr for Square {
    type Err = String;

    fn from_str(s: &str) -> Result<Square, String> {
        match SQUARE_NAMES.iter().position(|name| *name == s) {
            Some(index) => Ok(ALL_SQUARES[index]),
            None => Err(s.to_string())
        }
    }
}

impl From<chess::Square> for Square {
    fn from(square: chess::Square) -> Square {
        ALL_SQUARES[square.to_index()]
    }
}

impl From<Square> for chess::Square {
    fn from(square: Square) -> chess::Square {
        chess::ALL_SQUARES[square as usize]
    }
}
