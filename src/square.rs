use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    ops::{Mul, Neg},
    str::FromStr,
};

use crate::color::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseSquareError {
    Empty,
    RankNotProvided,
    InvalidFile(char),
    InvalidRank(char),
    UnexpectedSymbol(char),
}
impl Display for ParseSquareError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ParseSquareError::Empty => write!(f, "expected 2 characters, found none instead")?,
            ParseSquareError::RankNotProvided => {
                write!(f, "expected 2 characters, found 1 instead")?;
            }
            ParseSquareError::InvalidFile(c) => write!(f, "`{c}` is not a letter from a to h")?,
            ParseSquareError::InvalidRank(c) => write!(f, "`{c}` is not a number from 1 to 8")?,
            ParseSquareError::UnexpectedSymbol(c) => {
                write!(f, "unexpected `{c}`, only 2 characters are expected")?;
            }
        }
        Ok(())
    }
}
impl Error for ParseSquareError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SquareOutOfBounds {
    pub rank: u8,
    pub file: u8,
}
impl Display for SquareOutOfBounds {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rank {} and file {} must both be from 0 to 7",
            self.rank, self.file
        )?;
        Ok(())
    }
}
impl Error for SquareOutOfBounds {}

/// A cell of the board. Rank 0 is white's back rank, file 0 is the a-file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square {
    rank: u8,
    file: u8,
}
impl Square {
    pub fn new(rank: u8, file: u8) -> Self {
        debug_assert!(rank < 8, "{rank} should be < 8");
        debug_assert!(file < 8, "{file} should be < 8");
        Square { rank, file }
    }
    pub fn new_checked(rank: u8, file: u8) -> Option<Self> {
        if rank >= 8 || file >= 8 {
            None
        } else {
            Some(Square { rank, file })
        }
    }
    /// Index in `rank * 8 + file` order, so `a1` is 0 and `h8` is 63.
    pub fn from_index(index: usize) -> Option<Self> {
        let rank = u8::try_from(index / 8).ok()?;
        let file = u8::try_from(index % 8).ok()?;
        Square::new_checked(rank, file)
    }
    pub fn all() -> impl Iterator<Item = Self> {
        (0..8).flat_map(|rank| (0..8).map(move |file| Square { rank, file }))
    }
    pub fn rank(self) -> u8 {
        self.rank
    }
    pub fn file(self) -> u8 {
        self.file
    }
    pub fn move_by(self, movement: Vector) -> Option<Self> {
        Square::new_checked(
            self.rank.checked_add_signed(movement.rank)?,
            self.file.checked_add_signed(movement.file)?,
        )
    }
    /// Squares along `direction`, excluding `self`, until the board edge.
    pub fn line(self, direction: Vector) -> impl Iterator<Item = Self> {
        debug_assert_ne!(direction, Vector::ZERO);
        (1..).map_while(move |distance| self.move_by(direction * distance))
    }
    pub fn from_chars(file: char, rank: char) -> Result<Self, ParseSquareError> {
        let file = match file {
            'a'..='h' => file as u8 - b'a',
            _ => return Err(ParseSquareError::InvalidFile(file)),
        };
        let rank = match rank {
            '1'..='8' => rank as u8 - b'1',
            _ => return Err(ParseSquareError::InvalidRank(rank)),
        };
        Ok(Square { rank, file })
    }
    pub fn shade(self) -> Color {
        if (self.rank + self.file) % 2 == 0 {
            Color::Black
        } else {
            Color::White
        }
    }
}
impl TryFrom<(u8, u8)> for Square {
    type Error = SquareOutOfBounds;

    fn try_from((rank, file): (u8, u8)) -> Result<Self, Self::Error> {
        Square::new_checked(rank, file).ok_or(SquareOutOfBounds { rank, file })
    }
}
impl Display for Square {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let file = (self.file + b'a') as char;
        let rank = self.rank + 1;
        write!(f, "{file}{rank}")?;
        Ok(())
    }
}
impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut characters = s.chars();
        let file = characters.next().ok_or(ParseSquareError::Empty)?;
        let rank = characters.next().ok_or(ParseSquareError::RankNotProvided)?;
        let square = Square::from_chars(file, rank)?;
        if let Some(c) = characters.next() {
            return Err(ParseSquareError::UnexpectedSymbol(c));
        }
        Ok(square)
    }
}

pub fn home_rank(color: Color) -> u8 {
    match color {
        Color::White => 0,
        Color::Black => 7,
    }
}
pub fn pawn_home_rank(color: Color) -> u8 {
    match color {
        Color::White => 1,
        Color::Black => 6,
    }
}
pub fn pawn_promotion_rank(color: Color) -> u8 {
    match color {
        Color::White => 7,
        Color::Black => 0,
    }
}
pub fn pawn_direction(color: Color) -> i8 {
    match color {
        Color::White => 1,
        Color::Black => -1,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Vector {
    pub rank: i8,
    pub file: i8,
}
impl Vector {
    pub const ZERO: Self = Vector { rank: 0, file: 0 };

    pub const KNIGHT_MOVES: [Self; 8] = [
        Vector { rank: -2, file: -1 },
        Vector { rank: -2, file: 1 },
        Vector { rank: -1, file: -2 },
        Vector { rank: -1, file: 2 },
        Vector { rank: 1, file: -2 },
        Vector { rank: 1, file: 2 },
        Vector { rank: 2, file: -1 },
        Vector { rank: 2, file: 1 },
    ];
    pub const KING_MOVES: [Self; 8] = [
        Vector { rank: -1, file: -1 },
        Vector { rank: -1, file: 0 },
        Vector { rank: -1, file: 1 },
        Vector { rank: 0, file: -1 },
        Vector { rank: 0, file: 1 },
        Vector { rank: 1, file: -1 },
        Vector { rank: 1, file: 0 },
        Vector { rank: 1, file: 1 },
    ];
    pub const ROOK_DIRECTIONS: [Self; 4] = [
        Vector { rank: -1, file: 0 },
        Vector { rank: 1, file: 0 },
        Vector { rank: 0, file: -1 },
        Vector { rank: 0, file: 1 },
    ];
    pub const BISHOP_DIRECTIONS: [Self; 4] = [
        Vector { rank: -1, file: -1 },
        Vector { rank: -1, file: 1 },
        Vector { rank: 1, file: -1 },
        Vector { rank: 1, file: 1 },
    ];
    pub const QUEEN_DIRECTIONS: [Self; 8] = Vector::KING_MOVES;

    pub fn pawn_single_move(color: Color) -> Self {
        Vector {
            rank: pawn_direction(color),
            file: 0,
        }
    }
    pub fn pawn_attacks(color: Color) -> [Self; 2] {
        [-1, 1].map(|file| Vector {
            rank: pawn_direction(color),
            file,
        })
    }
}
impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Self::Output {
        Vector {
            rank: -self.rank,
            file: -self.file,
        }
    }
}
impl Mul<i8> for Vector {
    type Output = Vector;

    fn mul(self, rhs: i8) -> Self::Output {
        Vector {
            rank: self.rank * rhs,
            file: self.file * rhs,
        }
    }
}

#[cfg(test)]
macro_rules! square {
    ($name:literal) => {
        $name.parse::<$crate::square::Square>().unwrap()
    };
}
#[cfg(test)]
pub(crate) use square;

#[cfg(test)]
mod test {
    use crate::square::{ParseSquareError, Square, SquareOutOfBounds, Vector, square};

    #[test]
    fn algebraic_names_map_to_rank_and_file() {
        assert_eq!(square!("a1"), Square::new(0, 0));
        assert_eq!(square!("e4"), Square::new(3, 4));
        assert_eq!(square!("h8"), Square::new(7, 7));
        assert_eq!(Square::new(2, 4).to_string(), "e3");
    }
    #[test]
    fn malformed_names_are_rejected() {
        assert_eq!("".parse::<Square>(), Err(ParseSquareError::Empty));
        assert_eq!("e".parse::<Square>(), Err(ParseSquareError::RankNotProvided));
        assert_eq!("i1".parse::<Square>(), Err(ParseSquareError::InvalidFile('i')));
        assert_eq!("a9".parse::<Square>(), Err(ParseSquareError::InvalidRank('9')));
        assert_eq!(
            "a1x".parse::<Square>(),
            Err(ParseSquareError::UnexpectedSymbol('x'))
        );
    }
    #[test]
    fn out_of_range_coordinates_are_rejected() {
        assert_eq!(Square::try_from((7, 7)), Ok(square!("h8")));
        assert_eq!(
            Square::try_from((8, 0)),
            Err(SquareOutOfBounds { rank: 8, file: 0 })
        );
        assert_eq!(Square::new_checked(0, 8), None);
        assert_eq!(Square::from_index(64), None);
        assert_eq!(Square::from_index(12), Some(square!("e2")));
    }
    #[test]
    fn line_stops_at_board_edge() {
        let line: Vec<_> = square!("f6").line(Vector { rank: 1, file: 1 }).collect();
        assert_eq!(line, [square!("g7"), square!("h8")]);
        assert_eq!(square!("h8").line(Vector { rank: 0, file: 1 }).next(), None);
    }
    #[test]
    fn corner_shades() {
        assert_eq!(square!("a1").shade(), crate::color::Color::Black);
        assert_eq!(square!("h1").shade(), crate::color::Color::White);
    }
}
