//! Per-piece movement geometry.
//!
//! Everything here is pseudo-legal: a destination may still leave the mover's
//! own king in check. See [`crate::legality`] for the filter that removes
//! those.

use std::ops::RangeInclusive;

use rustc_hash::FxHashSet;

use crate::{
    attack::is_square_attacked,
    board::Board,
    piece::{Piece, PieceKind},
    square::{Square, Vector, home_rank, pawn_home_rank},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastlingSide {
    Kingside,
    Queenside,
}
impl CastlingSide {
    pub const ALL: [Self; 2] = [CastlingSide::Kingside, CastlingSide::Queenside];
    pub const KING_FILE: u8 = 4;

    pub fn rook_file(self) -> u8 {
        match self {
            CastlingSide::Kingside => 7,
            CastlingSide::Queenside => 0,
        }
    }
    pub fn king_destination_file(self) -> u8 {
        match self {
            CastlingSide::Kingside => 6,
            CastlingSide::Queenside => 2,
        }
    }
    pub fn rook_destination_file(self) -> u8 {
        match self {
            CastlingSide::Kingside => 5,
            CastlingSide::Queenside => 3,
        }
    }
    // must all be empty
    fn between_files(self) -> RangeInclusive<u8> {
        match self {
            CastlingSide::Kingside => 5..=6,
            CastlingSide::Queenside => 1..=3,
        }
    }
    // must all be unattacked
    fn king_path_files(self) -> RangeInclusive<u8> {
        match self {
            CastlingSide::Kingside => 5..=6,
            CastlingSide::Queenside => 2..=3,
        }
    }
    /// A king move spanning two files is a castle.
    pub fn from_king_move(origin: Square, destination: Square) -> Option<Self> {
        if origin.rank() != destination.rank() {
            return None;
        }
        match i16::from(destination.file()) - i16::from(origin.file()) {
            2 => Some(CastlingSide::Kingside),
            -2 => Some(CastlingSide::Queenside),
            _ => None,
        }
    }
}

/// Where the pawn taken by an en-passant capture stands: beside the
/// capturing pawn, not on the destination.
pub fn en_passant_victim(origin: Square, destination: Square) -> Square {
    Square::new(origin.rank(), destination.file())
}

/// Destinations of `piece` standing on `origin`.
///
/// With `attack_mode` the result is the set of squares the piece threatens,
/// which is what check detection needs: pawns report both diagonals whether
/// or not anything stands there and never their forward squares, and kings
/// never report castling. Castling asks whether squares are attacked, so
/// keeping it out of attack mode is also what stops the recursion.
pub fn pseudo_legal_destinations(
    piece: Piece,
    origin: Square,
    board: &Board,
    en_passant_target: Option<Square>,
    attack_mode: bool,
) -> FxHashSet<Square> {
    match piece.kind {
        PieceKind::King => {
            let mut destinations: FxHashSet<_> =
                step_destinations(piece, origin, board, &Vector::KING_MOVES).collect();
            if !attack_mode {
                destinations.extend(castling_destinations(piece, origin, board));
            }
            destinations
        }
        PieceKind::Queen => {
            ray_destinations(piece, origin, board, &Vector::QUEEN_DIRECTIONS).collect()
        }
        PieceKind::Rook => {
            ray_destinations(piece, origin, board, &Vector::ROOK_DIRECTIONS).collect()
        }
        PieceKind::Bishop => {
            ray_destinations(piece, origin, board, &Vector::BISHOP_DIRECTIONS).collect()
        }
        PieceKind::Knight => {
            step_destinations(piece, origin, board, &Vector::KNIGHT_MOVES).collect()
        }
        PieceKind::Pawn => {
            pawn_destinations(piece, origin, board, en_passant_target, attack_mode)
        }
    }
}
fn step_destinations<'a>(
    piece: Piece,
    origin: Square,
    board: &'a Board,
    offsets: &'static [Vector],
) -> impl Iterator<Item = Square> + 'a {
    offsets
        .iter()
        .filter_map(move |offset| origin.move_by(*offset))
        .filter(move |destination| board.is_enterable_by(*destination, piece.color))
}
fn ray_destinations<'a>(
    piece: Piece,
    origin: Square,
    board: &'a Board,
    directions: &'static [Vector],
) -> impl Iterator<Item = Square> + 'a {
    directions.iter().flat_map(move |direction| {
        let mut blocked = false;
        origin.line(*direction).take_while(move |square| {
            if blocked {
                return false;
            }
            match board[*square] {
                None => true,
                Some(occupant) => {
                    blocked = true;
                    occupant.color != piece.color
                }
            }
        })
    })
}
fn pawn_destinations(
    piece: Piece,
    origin: Square,
    board: &Board,
    en_passant_target: Option<Square>,
    attack_mode: bool,
) -> FxHashSet<Square> {
    let mut destinations = FxHashSet::default();
    if !attack_mode {
        let forward = Vector::pawn_single_move(piece.color);
        let steps = if origin.rank() == pawn_home_rank(piece.color) {
            2
        } else {
            1
        };
        destinations.extend(
            origin
                .line(forward)
                .take(steps)
                .take_while(|square| board[*square].is_none()),
        );
    }
    for diagonal in Vector::pawn_attacks(piece.color)
        .into_iter()
        .filter_map(|offset| origin.move_by(offset))
    {
        let capture = board[diagonal].is_some_and(|occupant| occupant.color != piece.color);
        let en_passant = Some(diagonal) == en_passant_target
            && board.holds(
                en_passant_victim(origin, diagonal),
                !piece.color,
                PieceKind::Pawn,
            );
        if attack_mode || capture || en_passant {
            destinations.insert(diagonal);
        }
    }
    destinations
}
fn castling_destinations(
    piece: Piece,
    origin: Square,
    board: &Board,
) -> impl Iterator<Item = Square> + '_ {
    let rank = home_rank(piece.color);
    let eligible = !piece.has_moved
        && origin == Square::new(rank, CastlingSide::KING_FILE)
        && !is_square_attacked(origin, board, !piece.color);
    CastlingSide::ALL
        .into_iter()
        .filter(move |_| eligible)
        .filter(move |side| {
            board[Square::new(rank, side.rook_file())].is_some_and(|rook| {
                rook.kind == PieceKind::Rook && rook.color == piece.color && !rook.has_moved
            }) && side
                .between_files()
                .all(|file| board[Square::new(rank, file)].is_none())
                && side
                    .king_path_files()
                    .all(|file| !is_square_attacked(Square::new(rank, file), board, !piece.color))
        })
        .map(move |side| Square::new(rank, side.king_destination_file()))
}
