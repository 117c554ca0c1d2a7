//! Applying a move to a board, side effects included.
//!
//! This is the only place that knows how castling relocates the rook, where an
//! en-passant capture removes its victim, and when a pawn is promoted. The
//! legality filter simulates moves through the same routine.

use std::fmt::{self, Display, Formatter};

use log::debug;

use crate::{
    board::Board,
    error::MoveError,
    piece::{Piece, PieceKind, Promotion},
    rules::{CastlingSide, en_passant_victim},
    square::{Square, pawn_promotion_rank},
};

/// Everything needed to take a move back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveRecord {
    pub origin: Square,
    pub destination: Square,
    /// The moving piece as it was before the move.
    pub piece: Piece,
    pub captured: Option<(Square, Piece)>,
    pub castling_rook: Option<CastlingRook>,
    pub promotion: Option<Promotion>,
    pub previous_en_passant_target: Option<Square>,
}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CastlingRook {
    pub origin: Square,
    pub destination: Square,
    pub rook: Piece,
}

impl Board {
    /// Plays `origin` to `destination` without asking whether it is legal.
    ///
    /// `promotion` is only consulted when a pawn reaches its last rank and
    /// defaults to a queen.
    pub fn apply_move(
        &mut self,
        origin: Square,
        destination: Square,
        promotion: Option<Promotion>,
    ) -> Result<MoveRecord, MoveError> {
        let piece = self[origin].ok_or(MoveError::NoPiece(origin))?;
        let previous_en_passant_target = self.en_passant_target;

        let castling_rook = if piece.kind == PieceKind::King {
            CastlingSide::from_king_move(origin, destination)
                .and_then(|side| self.relocate_castling_rook(origin.rank(), side))
        } else {
            None
        };

        let mut captured = self[destination].map(|captured| (destination, captured));
        if piece.kind == PieceKind::Pawn && Some(destination) == previous_en_passant_target {
            let victim = en_passant_victim(origin, destination);
            if let Some(pawn) = self[victim].take() {
                captured = Some((victim, pawn));
            }
        }

        self.en_passant_target = if piece.kind == PieceKind::Pawn
            && origin.file() == destination.file()
            && origin.rank().abs_diff(destination.rank()) == 2
        {
            Some(Square::new(
                (origin.rank() + destination.rank()) / 2,
                origin.file(),
            ))
        } else {
            None
        };

        let promotion = (piece.kind == PieceKind::Pawn
            && destination.rank() == pawn_promotion_rank(piece.color))
        .then(|| promotion.unwrap_or_default());

        let moved = Piece {
            kind: promotion.map_or(piece.kind, PieceKind::from),
            color: piece.color,
            has_moved: true,
        };
        self[origin] = None;
        self[destination] = Some(moved);

        let record = MoveRecord {
            origin,
            destination,
            piece,
            captured,
            castling_rook,
            promotion,
            previous_en_passant_target,
        };
        debug!("applied {}", record);
        Ok(record)
    }
    fn relocate_castling_rook(&mut self, rank: u8, side: CastlingSide) -> Option<CastlingRook> {
        let origin = Square::new(rank, side.rook_file());
        let destination = Square::new(rank, side.rook_destination_file());
        let rook = self[origin].take()?;
        self[destination] = Some(Piece {
            has_moved: true,
            ..rook
        });
        Some(CastlingRook {
            origin,
            destination,
            rook,
        })
    }
    /// Exact inverse of the [`Board::apply_move`] call that produced `record`.
    pub fn revert(&mut self, record: &MoveRecord) {
        self[record.destination] = None;
        self[record.origin] = Some(record.piece);
        if let Some(CastlingRook {
            origin,
            destination,
            rook,
        }) = record.castling_rook
        {
            self[destination] = None;
            self[origin] = Some(rook);
        }
        if let Some((square, piece)) = record.captured {
            self[square] = Some(piece);
        }
        self.en_passant_target = record.previous_en_passant_target;
    }
}

impl Display for MoveRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}{}", self.piece, self.origin, self.destination)?;
        if let Some(promotion) = self.promotion {
            write!(f, "{promotion}")?;
        }
        if let Some((square, captured)) = self.captured {
            write!(f, " capturing {captured} on {square}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use crate::{
        board::Board,
        color::Color,
        error::MoveError,
        fen::Fen,
        piece::{Piece, PieceKind, Promotion},
        square::square,
    };

    fn position(fen: &str) -> Board {
        fen.parse::<Fen>().unwrap().board
    }

    #[test]
    fn double_step_sets_en_passant_target() {
        let mut board = Board::starting_position();
        board.apply_move(square!("e2"), square!("e4"), None).unwrap();
        assert_eq!(board.en_passant_target, Some(square!("e3")));
        board.apply_move(square!("g8"), square!("f6"), None).unwrap();
        assert_eq!(board.en_passant_target, None);
    }
    #[test]
    fn en_passant_removes_pawn_beside_capturer() {
        let mut board = position("4k3/8/8/8/3pP3/8/8/4K3 b - - 0 1");
        board.en_passant_target = Some(square!("e3"));
        let record = board.apply_move(square!("d4"), square!("e3"), None).unwrap();
        assert_eq!(board[square!("e4")], None);
        assert_eq!(
            record.captured.map(|(square, piece)| (square, piece.kind)),
            Some((square!("e4"), PieceKind::Pawn))
        );
        assert!(board.holds(square!("e3"), Color::Black, PieceKind::Pawn));
    }
    #[test]
    fn castling_moves_the_rook_too() {
        let mut board = position("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        board.apply_move(square!("e1"), square!("g1"), None).unwrap();
        assert_eq!(
            board[square!("f1")],
            Some(Piece {
                kind: PieceKind::Rook,
                color: Color::White,
                has_moved: true,
            })
        );
        assert_eq!(board[square!("h1")], None);
        board.apply_move(square!("e8"), square!("c8"), None).unwrap();
        assert!(board.holds(square!("d8"), Color::Black, PieceKind::Rook));
        assert_eq!(board[square!("a8")], None);
    }
    #[test]
    fn promotion_to_knight() {
        let mut board = position("4k3/P7/8/8/8/8/8/4K3 w - - 0 1");
        board
            .apply_move(square!("a7"), square!("a8"), Some(Promotion::Knight))
            .unwrap();
        assert_eq!(
            board[square!("a8")],
            Some(Piece {
                kind: PieceKind::Knight,
                color: Color::White,
                has_moved: true,
            })
        );
    }
    #[test]
    fn promotion_defaults_to_queen() {
        let mut board = position("4k3/8/8/8/8/8/p7/4K3 b - - 0 1");
        board.apply_move(square!("a2"), square!("a1"), None).unwrap();
        assert!(board.holds(square!("a1"), Color::Black, PieceKind::Queen));
    }
    #[test]
    fn empty_origin_is_reported() {
        let mut board = Board::starting_position();
        assert_eq!(
            board.apply_move(square!("e4"), square!("e5"), None),
            Err(MoveError::NoPiece(square!("e4")))
        );
    }
    #[test]
    fn revert_restores_special_moves() {
        let cases = [
            ("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1", "e1", "c1", None),
            ("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1", "e5", "d6", None),
            ("1r2k3/P7/8/8/8/8/8/4K3 w - - 0 1", "a7", "b8", Some(Promotion::Rook)),
            ("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1", "e2", "e4", None),
        ];
        for (fen, origin, destination, promotion) in cases {
            let before = position(fen);
            let mut board = before;
            let record = board
                .apply_move(origin.parse().unwrap(), destination.parse().unwrap(), promotion)
                .unwrap();
            assert_ne!(board, before);
            board.revert(&record);
            assert_eq!(board, before, "{fen} {origin}{destination}");
        }
    }
}
