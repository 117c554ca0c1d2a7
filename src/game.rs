use log::debug;
use rustc_hash::FxHashSet;

use crate::{
    attack::is_king_in_check,
    board::Board,
    color::Color,
    error::MoveError,
    execute::MoveRecord,
    fen::Fen,
    outcome::{GameOutcome, game_outcome},
    piece::Promotion,
    square::Square,
};

/// A board plus whose turn it is and how it got there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    board: Board,
    side_to_move: Color,
    history: Vec<MoveRecord>,
}
impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}
impl From<Fen> for Game {
    fn from(value: Fen) -> Self {
        Game {
            board: value.board,
            side_to_move: value.side_to_move,
            history: Vec::new(),
        }
    }
}
impl Game {
    pub fn new() -> Self {
        Game {
            board: Board::starting_position(),
            side_to_move: Color::White,
            history: Vec::new(),
        }
    }
    pub fn board(&self) -> &Board {
        &self.board
    }
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }
    pub fn fen(&self) -> Fen {
        Fen {
            board: self.board,
            side_to_move: self.side_to_move,
        }
    }
    /// Legal destinations of the piece on `origin`, which must belong to the
    /// side to move.
    pub fn legal_destinations(&self, origin: Square) -> Result<FxHashSet<Square>, MoveError> {
        let piece = self.board[origin].ok_or(MoveError::NoPiece(origin))?;
        if piece.color != self.side_to_move {
            return Err(MoveError::WrongColor {
                square: origin,
                expected: self.side_to_move,
            });
        }
        Ok(self.board.legal_destinations(origin))
    }
    /// Plays a move for the side to move and reports how the game stands
    /// afterwards. Nothing changes when an error is returned.
    pub fn play(
        &mut self,
        origin: Square,
        destination: Square,
        promotion: Option<Promotion>,
    ) -> Result<GameOutcome, MoveError> {
        if !self.legal_destinations(origin)?.contains(&destination) {
            return Err(MoveError::IllegalDestination {
                origin,
                destination,
            });
        }
        let record = self.board.apply_move(origin, destination, promotion)?;
        self.history.push(record);
        self.side_to_move = !self.side_to_move;
        let outcome = self.outcome();
        if outcome.is_over() {
            debug!("game over after {record}: {outcome}");
        }
        Ok(outcome)
    }
    /// [`Game::play`] with raw `(rank, file)` pairs.
    pub fn play_coordinates(
        &mut self,
        origin: (u8, u8),
        destination: (u8, u8),
        promotion: Option<Promotion>,
    ) -> Result<GameOutcome, MoveError> {
        self.play(origin.try_into()?, destination.try_into()?, promotion)
    }
    /// Takes back the last move, if any.
    pub fn undo(&mut self) -> Option<MoveRecord> {
        let record = self.history.pop()?;
        self.board.revert(&record);
        self.side_to_move = !self.side_to_move;
        Some(record)
    }
    pub fn outcome(&self) -> GameOutcome {
        game_outcome(&self.board, self.side_to_move, self.board.en_passant_target)
    }
    pub fn is_in_check(&self) -> bool {
        is_king_in_check(&self.board, self.side_to_move)
    }
}

#[cfg(test)]
mod test {
    use rustc_hash::FxHashSet;

    use crate::{
        board::Board,
        color::Color,
        error::MoveError,
        fen::Fen,
        game::Game,
        outcome::GameOutcome,
        piece::{Piece, PieceKind, Promotion},
        square::{SquareOutOfBounds, square},
    };

    fn game(fen: &str) -> Game {
        fen.parse::<Fen>().unwrap().into()
    }
    fn play(game: &mut Game, moves: &[(&str, &str)]) {
        for (origin, destination) in moves {
            game.play(origin.parse().unwrap(), destination.parse().unwrap(), None)
                .unwrap();
        }
    }

    #[test]
    fn castling_availability() {
        let start = Game::new();
        assert!(start.legal_destinations(square!("e1")).unwrap().is_empty());

        let mut game = game("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1");
        let destinations = game.legal_destinations(square!("e1")).unwrap();
        assert!(destinations.contains(&square!("g1")));
        assert!(destinations.contains(&square!("c1")));

        play(
            &mut game,
            &[("e1", "f1"), ("a7", "a6"), ("f1", "e1"), ("a6", "a5")],
        );
        let destinations = game.legal_destinations(square!("e1")).unwrap();
        assert!(!destinations.contains(&square!("g1")));
        assert!(!destinations.contains(&square!("c1")));
        assert!(destinations.contains(&square!("f1")));
    }
    #[test]
    fn en_passant_expires_after_one_turn() {
        let mut game = game("4k3/8/8/8/3p4/8/4P3/4K3 w - - 0 1");
        play(&mut game, &[("e2", "e4")]);
        assert_eq!(game.board().en_passant_target, Some(square!("e3")));
        assert!(
            game.legal_destinations(square!("d4"))
                .unwrap()
                .contains(&square!("e3"))
        );

        let mut captured = game.clone();
        play(&mut captured, &[("d4", "e3")]);
        assert_eq!(captured.board()[square!("e4")], None);

        play(&mut game, &[("e8", "e7"), ("e1", "d1")]);
        assert_eq!(
            game.legal_destinations(square!("d4")).unwrap(),
            [square!("d3")].into_iter().collect::<FxHashSet<_>>()
        );
    }
    #[test]
    fn promote_to_knight() {
        let mut game = game("4k3/P7/8/8/8/8/8/4K3 w - - 0 1");
        game.play(square!("a7"), square!("a8"), Some(Promotion::Knight))
            .unwrap();
        assert_eq!(
            game.board()[square!("a8")],
            Some(Piece {
                kind: PieceKind::Knight,
                color: Color::White,
                has_moved: true,
            })
        );
        assert_eq!(game.side_to_move(), Color::Black);
    }
    #[test]
    fn undo_restores_every_position() {
        let mut game = Game::new();
        let moves = [
            ("e2", "e4"),
            ("a7", "a6"),
            ("e4", "e5"),
            ("d7", "d5"),
            ("e5", "d6"),
        ];
        let mut positions = vec![*game.board()];
        for (origin, destination) in moves {
            play(&mut game, &[(origin, destination)]);
            positions.push(*game.board());
        }
        assert_eq!(game.board()[square!("d5")], None);
        positions.pop();
        while let Some(expected) = positions.pop() {
            game.undo().unwrap();
            assert_eq!(*game.board(), expected);
        }
        assert_eq!(*game.board(), Board::starting_position());
        assert_eq!(game.side_to_move(), Color::White);
        assert_eq!(game.undo(), None);
    }
    #[test]
    fn rejected_requests_change_nothing() {
        let mut game = Game::new();
        assert_eq!(
            game.legal_destinations(square!("e4")),
            Err(MoveError::NoPiece(square!("e4")))
        );
        assert_eq!(
            game.legal_destinations(square!("e7")),
            Err(MoveError::WrongColor {
                square: square!("e7"),
                expected: Color::White,
            })
        );
        assert_eq!(
            game.play(square!("e2"), square!("e5"), None),
            Err(MoveError::IllegalDestination {
                origin: square!("e2"),
                destination: square!("e5"),
            })
        );
        assert_eq!(
            game.play_coordinates((8, 0), (0, 0), None),
            Err(MoveError::OutOfBounds(SquareOutOfBounds { rank: 8, file: 0 }))
        );
        assert_eq!(game, Game::new());
    }
    #[test]
    fn fools_mate_ends_the_game() {
        let mut game = Game::new();
        play(&mut game, &[("f2", "f3"), ("e7", "e5"), ("g2", "g4")]);
        assert!(!game.is_in_check());
        assert_eq!(
            game.play(square!("d8"), square!("h4"), None),
            Ok(GameOutcome::Checkmate(Color::Black))
        );
        assert!(game.is_in_check());
        assert_eq!(game.outcome(), GameOutcome::Checkmate(Color::Black));
    }
    #[test]
    fn play_by_coordinates() {
        let mut game = Game::new();
        assert_eq!(
            game.play_coordinates((1, 4), (3, 4), None),
            Ok(GameOutcome::Ongoing)
        );
        assert_eq!(
            game.fen().to_string(),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1"
        );
    }
}
