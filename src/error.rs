use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

use crate::{
    color::Color,
    square::{Square, SquareOutOfBounds},
};

/// Why a requested move was not played. None of these are fatal: the caller
/// is expected to ask for another move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveError {
    OutOfBounds(SquareOutOfBounds),
    NoPiece(Square),
    WrongColor {
        square: Square,
        expected: Color,
    },
    IllegalDestination {
        origin: Square,
        destination: Square,
    },
}
impl From<SquareOutOfBounds> for MoveError {
    fn from(value: SquareOutOfBounds) -> Self {
        MoveError::OutOfBounds(value)
    }
}
impl Display for MoveError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::OutOfBounds(err) => write!(f, "{err}")?,
            MoveError::NoPiece(square) => write!(f, "no piece found on {square}")?,
            MoveError::WrongColor { square, expected } => {
                write!(f, "the piece on {square} is not {expected}'s")?;
            }
            MoveError::IllegalDestination {
                origin,
                destination,
            } => write!(f, "the piece on {origin} cannot move to {destination}")?,
        }
        Ok(())
    }
}
impl Error for MoveError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            MoveError::OutOfBounds(err) => Some(err),
            _ => None,
        }
    }
}
