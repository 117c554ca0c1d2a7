//! Random playouts checked move by move against the `chess` crate's legal
//! move generator.

use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

use log::{debug, info};
use rand::{Rng, SeedableRng, rngs::SmallRng};
use rustc_hash::FxHashSet;

use crate::{
    color::Color,
    error::MoveError,
    game::Game,
    outcome::GameOutcome,
    piece::{PieceKind, Promotion},
    square::Square,
};

const MAX_PLIES: u32 = 200;

type Movement = (Square, Square);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FuzzReport {
    pub seed: u64,
    pub games: u32,
    pub plies: u32,
    pub checkmates: u32,
    pub stalemates: u32,
    /// Games cut off before reaching a terminal state.
    pub unfinished: u32,
}
impl Display for FuzzReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "seed {}: {} games, {} plies, {} checkmates, {} stalemates, {} unfinished",
            self.seed, self.games, self.plies, self.checkmates, self.stalemates, self.unfinished
        )?;
        Ok(())
    }
}

/// A position where this crate and the reference disagree, or where the
/// game stopped making sense.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mismatch {
    Extra {
        fen: String,
        origin: Square,
        destination: Square,
    },
    Missing {
        fen: String,
        origin: Square,
        destination: Square,
    },
    UnreadableFen {
        fen: String,
    },
    KingCount {
        fen: String,
        color: Color,
        count: usize,
    },
    Rejected {
        fen: String,
        error: MoveError,
    },
}
impl Display for Mismatch {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Mismatch::Extra {
                fen,
                origin,
                destination,
            } => write!(f, "found {origin}{destination} but it's not a legal move\n{fen}")?,
            Mismatch::Missing {
                fen,
                origin,
                destination,
            } => write!(f, "{origin}{destination} not found\n{fen}")?,
            Mismatch::UnreadableFen { fen } => {
                write!(f, "the reference generator rejected the position\n{fen}")?;
            }
            Mismatch::KingCount { fen, color, count } => {
                write!(f, "{color} has {count} kings\n{fen}")?;
            }
            Mismatch::Rejected { fen, error } => write!(f, "{error}\n{fen}")?,
        }
        Ok(())
    }
}
impl Error for Mismatch {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Mismatch::Rejected { error, .. } => Some(error),
            _ => None,
        }
    }
}

fn from_reference(square: chess::Square) -> Option<Square> {
    Square::from_index(square.to_index())
}
fn legal_moves(game: &Game) -> FxHashSet<Movement> {
    let board = game.board();
    board
        .pieces_of(game.side_to_move())
        .flat_map(|(origin, _)| {
            board
                .legal_destinations(origin)
                .into_iter()
                .map(move |destination| (origin, destination))
        })
        .collect()
}
/// Promotions collapse into a single origin and destination pair.
fn reference_moves(fen: &str) -> Result<FxHashSet<Movement>, Mismatch> {
    let board: chess::Board = fen.parse().map_err(|_| Mismatch::UnreadableFen {
        fen: fen.to_owned(),
    })?;
    Ok(chess::MoveGen::new_legal(&board)
        .filter_map(|movement| {
            Some((
                from_reference(movement.get_source())?,
                from_reference(movement.get_dest())?,
            ))
        })
        .collect())
}
fn compare(game: &Game) -> Result<FxHashSet<Movement>, Mismatch> {
    let fen = game.fen().to_string();
    let ours = legal_moves(game);
    let reference = reference_moves(&fen)?;
    if let Some((origin, destination)) = ours.difference(&reference).next().copied() {
        return Err(Mismatch::Extra {
            fen,
            origin,
            destination,
        });
    }
    if let Some((origin, destination)) = reference.difference(&ours).next().copied() {
        return Err(Mismatch::Missing {
            fen,
            origin,
            destination,
        });
    }
    Ok(ours)
}
fn check_kings(game: &Game) -> Result<(), Mismatch> {
    for color in Color::ALL {
        let count = game
            .board()
            .pieces_of(color)
            .filter(|(_, piece)| piece.kind == PieceKind::King)
            .count();
        if count > 1 {
            return Err(Mismatch::KingCount {
                fen: game.fen().to_string(),
                color,
                count,
            });
        }
    }
    Ok(())
}
/// Plays `games` random games from the starting position, comparing the
/// full set of legal moves at every ply. Without a `seed` a random one is
/// drawn and reported.
pub fn fuzz(games: u32, seed: Option<u64>) -> Result<FuzzReport, Mismatch> {
    let seed = seed.unwrap_or_else(rand::random);
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut report = FuzzReport {
        seed,
        ..FuzzReport::default()
    };
    info!("fuzzing {games} games with seed {seed}");
    for _ in 0..games {
        let mut game = Game::new();
        let mut finished = false;
        for _ in 0..MAX_PLIES {
            let moves: Box<[_]> = compare(&game)?.into_iter().collect();
            if moves.is_empty() {
                match game.outcome() {
                    GameOutcome::Checkmate(_) => report.checkmates += 1,
                    GameOutcome::Stalemate => report.stalemates += 1,
                    GameOutcome::Ongoing => {}
                }
                finished = true;
                break;
            }
            let (origin, destination) = moves[rng.random_range(0..moves.len())];
            let promotion = Promotion::ALL[rng.random_range(0..Promotion::ALL.len())];
            game.play(origin, destination, Some(promotion))
                .map_err(|error| Mismatch::Rejected {
                    fen: game.fen().to_string(),
                    error,
                })?;
            check_kings(&game)?;
            report.plies += 1;
        }
        if !finished {
            report.unfinished += 1;
        }
        report.games += 1;
        debug!("game {} ended after {} moves", report.games, game.history().len());
    }
    info!("{report}");
    Ok(report)
}

#[cfg(test)]
mod test {
    use crate::{fuzz::fuzz, game::Game};

    #[test]
    fn agrees_with_reference_generator() {
        let report = fuzz(4, Some(7)).unwrap();
        assert_eq!(report.games, 4);
        assert_eq!(report.seed, 7);
        assert_eq!(
            report.checkmates + report.stalemates + report.unfinished,
            4
        );
    }
    #[test]
    fn starting_position_has_twenty_moves() {
        let game = Game::new();
        assert_eq!(super::compare(&game).unwrap().len(), 20);
    }
}
