use crate::{board::Board, color::Color, rules::pseudo_legal_destinations, square::Square};

/// Whether any piece of `by_color` threatens `square`.
pub fn is_square_attacked(square: Square, board: &Board, by_color: Color) -> bool {
    board.pieces_of(by_color).any(|(origin, piece)| {
        pseudo_legal_destinations(piece, origin, board, None, true).contains(&square)
    })
}

/// A color without a king on the board is never in check.
pub fn is_king_in_check(board: &Board, king_color: Color) -> bool {
    board
        .king_of(king_color)
        .is_some_and(|king| is_square_attacked(king, board, !king_color))
}
