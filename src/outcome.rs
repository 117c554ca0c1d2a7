use std::fmt::{self, Display, Formatter};

use log::debug;

use crate::{
    attack::is_king_in_check, board::Board, color::Color, legality::legal_destinations,
    square::Square,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameOutcome {
    Ongoing,
    /// Holds the winner.
    Checkmate(Color),
    Stalemate,
}
impl GameOutcome {
    pub fn is_over(self) -> bool {
        self != GameOutcome::Ongoing
    }
}
impl Display for GameOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            GameOutcome::Ongoing => write!(f, "game in progress")?,
            GameOutcome::Checkmate(winner) => write!(f, "checkmate, {winner} wins")?,
            GameOutcome::Stalemate => write!(f, "stalemate, the game is a draw")?,
        }
        Ok(())
    }
}

/// Stops at the first piece of `color` that can move.
pub fn has_any_legal_move(board: &Board, color: Color, en_passant_target: Option<Square>) -> bool {
    board
        .pieces_of(color)
        .any(|(origin, _)| !legal_destinations(origin, board, en_passant_target).is_empty())
}

pub fn game_outcome(
    board: &Board,
    color_to_move: Color,
    en_passant_target: Option<Square>,
) -> GameOutcome {
    if has_any_legal_move(board, color_to_move, en_passant_target) {
        return GameOutcome::Ongoing;
    }
    let outcome = if is_king_in_check(board, color_to_move) {
        GameOutcome::Checkmate(!color_to_move)
    } else {
        GameOutcome::Stalemate
    };
    debug!("{color_to_move} has no legal move: {outcome}");
    outcome
}

#[cfg(test)]
mod test {
    use crate::{
        attack::is_king_in_check,
        board::Board,
        color::Color,
        fen::Fen,
        outcome::{GameOutcome, game_outcome, has_any_legal_move},
        piece::{Piece, PieceKind},
        square::Square,
    };

    fn place(board: &mut Board, rank: u8, file: u8, kind: PieceKind, color: Color) {
        board[Square::new(rank, file)] = Some(Piece::new(kind, color));
    }

    #[test]
    fn queen_and_king_mate_in_the_corner() {
        let mut board = Board::empty();
        place(&mut board, 7, 7, PieceKind::King, Color::Black);
        place(&mut board, 5, 5, PieceKind::King, Color::White);
        place(&mut board, 6, 6, PieceKind::Queen, Color::White);
        assert!(!has_any_legal_move(&board, Color::Black, None));
        assert!(is_king_in_check(&board, Color::Black));
        assert_eq!(
            game_outcome(&board, Color::Black, None),
            GameOutcome::Checkmate(Color::White)
        );
    }
    #[test]
    fn queen_and_king_stalemate_in_the_corner() {
        let mut board = Board::empty();
        place(&mut board, 7, 7, PieceKind::King, Color::Black);
        place(&mut board, 5, 6, PieceKind::King, Color::White);
        place(&mut board, 6, 5, PieceKind::Queen, Color::White);
        assert!(!is_king_in_check(&board, Color::Black));
        assert_eq!(
            game_outcome(&board, Color::Black, None),
            GameOutcome::Stalemate
        );
    }
    #[test]
    fn starting_position_is_ongoing() {
        let board = Board::starting_position();
        assert_eq!(
            game_outcome(&board, Color::White, None),
            GameOutcome::Ongoing
        );
        assert!(!game_outcome(&board, Color::Black, None).is_over());
    }
    #[test]
    fn fools_mate() {
        let board = "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3"
            .parse::<Fen>()
            .unwrap()
            .board;
        assert_eq!(
            game_outcome(&board, Color::White, None),
            GameOutcome::Checkmate(Color::Black)
        );
    }
    #[test]
    fn check_with_an_escape_is_ongoing() {
        let board = "4k3/8/8/8/8/8/8/r3K3 w - - 0 1".parse::<Fen>().unwrap().board;
        assert!(is_king_in_check(&board, Color::White));
        assert_eq!(
            game_outcome(&board, Color::White, None),
            GameOutcome::Ongoing
        );
    }
}
