//! Forsyth–Edwards Notation for whole positions.
//!
//! The board has no castling-rights field; availability is read from and
//! written to the `has_moved` flags of kings and rooks on their home squares.
//! Half-move and full-move counters are accepted and ignored on input and
//! written as `0 1`.

use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use crate::{
    board::Board,
    color::{Color, ParseColorError},
    piece::{Piece, PieceKind},
    rules::CastlingSide,
    square::{ParseSquareError, Square, Vector, home_rank, pawn_home_rank},
};

pub const STARTING_POSITION: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fen {
    pub board: Board,
    pub side_to_move: Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseFenError {
    NotEnoughSquaresOnRow,
    ExceedingSquaresOnRow,
    NotEnoughRows,
    ExceedingRows,
    UnexpectedChar(char),
    UnexpectedEol,
    SideToMove(ParseColorError),
    Castling(char),
    EnPassantTarget(ParseSquareError),
}
impl From<ParseColorError> for ParseFenError {
    fn from(value: ParseColorError) -> Self {
        ParseFenError::SideToMove(value)
    }
}
impl From<ParseSquareError> for ParseFenError {
    fn from(value: ParseSquareError) -> Self {
        ParseFenError::EnPassantTarget(value)
    }
}
impl Display for ParseFenError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ParseFenError::NotEnoughSquaresOnRow => write!(f, "a row describes less than 8 squares")?,
            ParseFenError::ExceedingSquaresOnRow => write!(f, "a row describes more than 8 squares")?,
            ParseFenError::NotEnoughRows => write!(f, "expected 8 rows")?,
            ParseFenError::ExceedingRows => write!(f, "found more than 8 rows")?,
            ParseFenError::UnexpectedChar(c) => write!(f, "unexpected `{c}`")?,
            ParseFenError::UnexpectedEol => write!(f, "unexpected end of input")?,
            ParseFenError::SideToMove(err) => write!(f, "{err}")?,
            ParseFenError::Castling(c) => write!(
                f,
                "found `{c}`, expected one of `K`, `Q`, `k`, `q`, or `-`"
            )?,
            ParseFenError::EnPassantTarget(err) => write!(f, "{err}")?,
        }
        Ok(())
    }
}
impl Error for ParseFenError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ParseFenError::SideToMove(err) => Some(err),
            ParseFenError::EnPassantTarget(err) => Some(err),
            _ => None,
        }
    }
}

fn castling_char(color: Color, side: CastlingSide) -> char {
    match (color, side) {
        (Color::White, CastlingSide::Kingside) => 'K',
        (Color::White, CastlingSide::Queenside) => 'Q',
        (Color::Black, CastlingSide::Kingside) => 'k',
        (Color::Black, CastlingSide::Queenside) => 'q',
    }
}
fn parse_placement(placement: &str) -> Result<Board, ParseFenError> {
    let mut board = Board::empty();
    let mut rows = placement.split('/');
    for rank in (0..8).rev() {
        let row = rows.next().ok_or(ParseFenError::NotEnoughRows)?;
        let mut file: u8 = 0;
        for c in row.chars() {
            if let Some(skip) = c.to_digit(10).filter(|skip| (1..=8).contains(skip)) {
                file += skip as u8;
            } else {
                let kind = PieceKind::from_fen(c).ok_or(ParseFenError::UnexpectedChar(c))?;
                let color = if c.is_ascii_uppercase() {
                    Color::White
                } else {
                    Color::Black
                };
                let square =
                    Square::new_checked(rank, file).ok_or(ParseFenError::ExceedingSquaresOnRow)?;
                board[square] = Some(Piece::new(kind, color));
                file += 1;
            }
            if file > 8 {
                return Err(ParseFenError::ExceedingSquaresOnRow);
            }
        }
        if file < 8 {
            return Err(ParseFenError::NotEnoughSquaresOnRow);
        }
    }
    if rows.next().is_some() {
        return Err(ParseFenError::ExceedingRows);
    }
    Ok(board)
}
/// Only kings and rooks with a matching castling right, and pawns on their
/// starting rank, are considered unmoved.
fn mark_moved(board: &mut Board, castling: &[(Color, CastlingSide)]) {
    for square in Square::all() {
        let Some(piece) = &mut board[square] else {
            continue;
        };
        let rank = home_rank(piece.color);
        let color = piece.color;
        piece.has_moved = match piece.kind {
            PieceKind::Pawn => square.rank() != pawn_home_rank(color),
            PieceKind::King => {
                square != Square::new(rank, CastlingSide::KING_FILE)
                    || !castling.iter().any(|(right, _)| *right == color)
            }
            PieceKind::Rook => !castling.iter().any(|(right, side)| {
                *right == color && square == Square::new(rank, side.rook_file())
            }),
            PieceKind::Knight | PieceKind::Bishop | PieceKind::Queen => false,
        };
    }
}
impl FromStr for Fen {
    type Err = ParseFenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut fields = s.split_whitespace();
        let mut board = parse_placement(fields.next().ok_or(ParseFenError::UnexpectedEol)?)?;
        let side_to_move = fields.next().ok_or(ParseFenError::UnexpectedEol)?.parse()?;

        let mut castling = Vec::new();
        for c in fields.next().unwrap_or("-").chars() {
            let right = match c {
                'K' => (Color::White, CastlingSide::Kingside),
                'Q' => (Color::White, CastlingSide::Queenside),
                'k' => (Color::Black, CastlingSide::Kingside),
                'q' => (Color::Black, CastlingSide::Queenside),
                '-' => continue,
                c => return Err(ParseFenError::Castling(c)),
            };
            castling.push(right);
        }
        mark_moved(&mut board, &castling);

        board.en_passant_target = match fields.next().unwrap_or("-") {
            "-" => None,
            square => Some(square.parse()?),
        };
        Ok(Fen {
            board,
            side_to_move,
        })
    }
}
impl Fen {
    fn can_castle(&self, color: Color, side: CastlingSide) -> bool {
        let rank = home_rank(color);
        let unmoved = |square: Square, kind: PieceKind| {
            self.board[square]
                .is_some_and(|piece| piece.kind == kind && piece.color == color && !piece.has_moved)
        };
        unmoved(Square::new(rank, CastlingSide::KING_FILE), PieceKind::King)
            && unmoved(Square::new(rank, side.rook_file()), PieceKind::Rook)
    }
    /// The en-passant target, written only when a pawn of the side to move
    /// could actually take there.
    fn capturable_en_passant_target(&self) -> Option<Square> {
        self.board.en_passant_target.filter(|target| {
            Vector::pawn_attacks(self.side_to_move)
                .into_iter()
                .filter_map(|offset| target.move_by(-offset))
                .any(|square| self.board.holds(square, self.side_to_move, PieceKind::Pawn))
        })
    }
}
impl Display for Fen {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            let mut empty = 0;
            for file in 0..8 {
                match self.board[Square::new(rank, file)] {
                    Some(piece) => {
                        if empty > 0 {
                            write!(f, "{empty}")?;
                            empty = 0;
                        }
                        write!(f, "{}", piece.fen())?;
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                write!(f, "{empty}")?;
            }
            if rank > 0 {
                write!(f, "/")?;
            }
        }
        write!(f, " {} ", self.side_to_move.lowercase())?;
        let mut written = false;
        for color in Color::ALL {
            for side in CastlingSide::ALL {
                if self.can_castle(color, side) {
                    write!(f, "{}", castling_char(color, side))?;
                    written = true;
                }
            }
        }
        if !written {
            write!(f, "-")?;
        }
        match self.capturable_en_passant_target() {
            Some(target) => write!(f, " {target}")?,
            None => write!(f, " -")?,
        }
        write!(f, " 0 1")?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use crate::{
        board::Board,
        color::Color,
        fen::{Fen, ParseFenError, STARTING_POSITION},
        square::square,
    };

    #[test]
    fn starting_position_round_trip() {
        let fen: Fen = STARTING_POSITION.parse().unwrap();
        assert_eq!(fen.board, Board::starting_position());
        assert_eq!(fen.side_to_move, Color::White);
        assert_eq!(fen.to_string(), STARTING_POSITION);
    }
    #[test]
    fn castling_rights_follow_moved_flags() {
        let fen: Fen = "r3k2r/8/8/8/8/8/8/R3K2R b Kq - 0 1".parse().unwrap();
        assert!(!fen.board[square!("h1")].unwrap().has_moved);
        assert!(fen.board[square!("a1")].unwrap().has_moved);
        assert!(!fen.board[square!("e8")].unwrap().has_moved);
        assert_eq!(fen.to_string(), "r3k2r/8/8/8/8/8/8/R3K2R b Kq - 0 1");
    }
    #[test]
    fn en_passant_target_written_only_when_capturable() {
        let mut board = Board::starting_position();
        board.apply_move(square!("e2"), square!("e4"), None).unwrap();
        let fen = Fen {
            board,
            side_to_move: Color::Black,
        };
        assert_eq!(
            fen.to_string(),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1"
        );

        let fen: Fen = "4k3/8/8/8/3pP3/8/8/4K3 b - e3 0 1".parse().unwrap();
        assert_eq!(fen.board.en_passant_target, Some(square!("e3")));
        assert_eq!(fen.to_string(), "4k3/8/8/8/3pP3/8/8/4K3 b - e3 0 1");
    }
    #[test]
    fn malformed_placement_is_rejected() {
        assert_eq!(
            "8/8/8/8/8/8/8 w - - 0 1".parse::<Fen>(),
            Err(ParseFenError::NotEnoughRows)
        );
        assert_eq!(
            "9/8/8/8/8/8/8/8 w - - 0 1".parse::<Fen>(),
            Err(ParseFenError::UnexpectedChar('9'))
        );
        assert_eq!(
            "7/8/8/8/8/8/8/8 w - - 0 1".parse::<Fen>(),
            Err(ParseFenError::NotEnoughSquaresOnRow)
        );
        assert_eq!(
            "8p/8/8/8/8/8/8/8 w - - 0 1".parse::<Fen>(),
            Err(ParseFenError::ExceedingSquaresOnRow)
        );
        assert_eq!(
            "8/8/8/8/8/8/8/8 x - - 0 1".parse::<Fen>().map(|_| ()),
            Err(ParseFenError::SideToMove(crate::color::ParseColorError))
        );
    }
}
