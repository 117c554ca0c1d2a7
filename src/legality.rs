use log::trace;
use rustc_hash::FxHashSet;

use crate::{
    attack::is_king_in_check, board::Board, rules::pseudo_legal_destinations, square::Square,
};

/// Destinations the piece on `origin` may actually move to.
///
/// Each pseudo-legal destination is played on a scratch copy of `board` and
/// kept only if the mover's king is not in check afterwards. Pins and moving
/// into check are both handled by this alone. An empty `origin` has no
/// destinations.
pub fn legal_destinations(
    origin: Square,
    board: &Board,
    en_passant_target: Option<Square>,
) -> FxHashSet<Square> {
    let Some(piece) = board[origin] else {
        return FxHashSet::default();
    };
    let mut destinations =
        pseudo_legal_destinations(piece, origin, board, en_passant_target, false);
    destinations.retain(|destination| {
        let mut scratch = *board;
        scratch.en_passant_target = en_passant_target;
        let safe = scratch.apply_move(origin, *destination, None).is_ok()
            && !is_king_in_check(&scratch, piece.color);
        if !safe {
            trace!("{piece} on {origin} to {destination} leaves the king in check");
        }
        safe
    });
    destinations
}

impl Board {
    /// [`legal_destinations`] using this board's own en-passant target.
    pub fn legal_destinations(&self, origin: Square) -> FxHashSet<Square> {
        legal_destinations(origin, self, self.en_passant_target)
    }
}
