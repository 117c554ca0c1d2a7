use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use crate::{
    piece::{ParsePromotionError, Promotion},
    square::{ParseSquareError, Square},
};

/// A move written as origin and destination, e.g. `e2e4` or `e7e8q`.
/// Castling is written as the king's two-file step, `e1g1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LongAlgebraicNotation {
    pub origin: Square,
    pub destination: Square,
    pub promotion: Option<Promotion>,
}
impl Display for LongAlgebraicNotation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.origin, self.destination)?;
        if let Some(promotion) = self.promotion {
            write!(f, "{promotion}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseMoveError {
    Square(ParseSquareError),
    Promotion(ParsePromotionError),
    Unexpected(char),
}
impl From<ParseSquareError> for ParseMoveError {
    fn from(value: ParseSquareError) -> Self {
        ParseMoveError::Square(value)
    }
}
impl From<ParsePromotionError> for ParseMoveError {
    fn from(value: ParsePromotionError) -> Self {
        ParseMoveError::Promotion(value)
    }
}
impl Display for ParseMoveError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ParseMoveError::Square(err) => write!(f, "{err}")?,
            ParseMoveError::Promotion(err) => write!(f, "{err}")?,
            ParseMoveError::Unexpected(c) => write!(f, "unexpected `{c}`")?,
        }
        Ok(())
    }
}
impl Error for ParseMoveError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ParseMoveError::Square(err) => Some(err),
            ParseMoveError::Promotion(err) => Some(err),
            ParseMoveError::Unexpected(_) => None,
        }
    }
}
impl FromStr for LongAlgebraicNotation {
    type Err = ParseMoveError;

    /// Whitespace between the two squares is allowed.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars().filter(|c| !c.is_whitespace()).fuse();
        let mut next_square = || -> Result<Square, ParseSquareError> {
            let file = chars.next().ok_or(ParseSquareError::Empty)?;
            let rank = chars.next().ok_or(ParseSquareError::RankNotProvided)?;
            Square::from_chars(file, rank)
        };
        let origin = next_square()?;
        let destination = next_square()?;
        let promotion = chars.next().map(Promotion::try_from).transpose()?;
        if let Some(c) = chars.next() {
            return Err(ParseMoveError::Unexpected(c));
        }
        Ok(LongAlgebraicNotation {
            origin,
            destination,
            promotion,
        })
    }
}
