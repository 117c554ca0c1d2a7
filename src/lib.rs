//! Legal move generation, check detection and game termination for standard
//! chess.

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]

pub mod attack;
pub mod board;
pub mod board_display;
pub mod color;
pub mod error;
pub mod execute;
pub mod fen;
pub mod fuzz;
pub mod game;
pub mod legality;
pub mod notation;
pub mod outcome;
pub mod piece;
pub mod repl;
pub mod rules;
pub mod square;

pub use crate::{
    attack::{is_king_in_check, is_square_attacked},
    board::{Board, initial_board},
    color::Color,
    error::MoveError,
    execute::MoveRecord,
    game::Game,
    legality::legal_destinations,
    outcome::{GameOutcome, game_outcome, has_any_legal_move},
    piece::{Piece, PieceKind, Promotion},
    rules::pseudo_legal_destinations,
    square::Square,
};
