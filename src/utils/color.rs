use serde::{Deserialize, Serialize};

#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Color {
    White=0, Black=1
}

impl Color {
    pub const fn flip(&self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White
        }
    }

    pub fn iter() -> impl Iterator<Item = Color> {
        [Color::White, Color::Black].into_iter()
    }
}

impl From<chess::Color> for Color {
    fn from(color: chess::Color) -> Color {
        match color {
            chess::Color::White => Color::White,
            chess::Color::Black => Color::Black
        }
    }
}

impl From<Color> for chess::Color {
    fn from(color: Color) -> chess::Color {
        match color {
            Color::White => chess::Color::White,
            Color::Black => chess::Color::Black
        }
    }
}
