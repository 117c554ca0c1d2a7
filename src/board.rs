use std::ops::{Index, IndexMut};

use crate::{
    board_display::IndexableBoard,
    color::Color,
    piece::{Piece, PieceKind},
    square::{Square, home_rank, pawn_home_rank},
};

/// The full position apart from whose turn it is.
///
/// `Board` is `Copy`; legality checks simulate moves on a copy and throw it
/// away instead of undoing anything in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
    /// The square a pawn skipped over on the immediately preceding move.
    pub en_passant_target: Option<Square>,
}
impl Board {
    pub fn empty() -> Self {
        Board::default()
    }
    pub fn starting_position() -> Self {
        let mut board = Board::empty();
        for color in Color::ALL {
            for (file, kind) in (0..).zip(PieceKind::STARTING_CONFIGURATION) {
                board[Square::new(home_rank(color), file)] = Some(Piece::new(kind, color));
                board[Square::new(pawn_home_rank(color), file)] =
                    Some(Piece::new(PieceKind::Pawn, color));
            }
        }
        board
    }
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |square| self[square].map(|piece| (square, piece)))
    }
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.color == color)
    }
    pub fn king_of(&self, color: Color) -> Option<Square> {
        self.pieces_of(color)
            .find(|(_, piece)| piece.kind == PieceKind::King)
            .map(|(square, _)| square)
    }
    /// Whether a piece of `color` may end its move on `square`: it is empty
    /// or holds an enemy.
    pub fn is_enterable_by(&self, square: Square, color: Color) -> bool {
        self[square].is_none_or(|occupant| occupant.color != color)
    }
    pub fn holds(&self, square: Square, color: Color, kind: PieceKind) -> bool {
        self[square].is_some_and(|piece| piece.color == color && piece.kind == kind)
    }
}
/// Standard starting position with no en-passant target.
pub fn initial_board() -> Board {
    Board::starting_position()
}
impl Index<Square> for Board {
    type Output = Option<Piece>;

    fn index(&self, index: Square) -> &Self::Output {
        &self.squares[index.rank() as usize][index.file() as usize]
    }
}
impl IndexMut<Square> for Board {
    fn index_mut(&mut self, index: Square) -> &mut Self::Output {
        &mut self.squares[index.rank() as usize][index.file() as usize]
    }
}
impl IndexableBoard for Board {
    fn index(&self, position: Square) -> Option<Piece> {
        self[position]
    }
}
