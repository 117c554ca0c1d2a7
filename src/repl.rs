use std::{
    error::Error,
    fmt::{self, Display, Formatter, Write as _},
    io::{self, BufRead, Write, stderr, stdin, stdout},
    str::FromStr,
};

use log::{info, warn};

use crate::{
    board_display::BoardDisplay,
    color::Color,
    fen::{Fen, ParseFenError},
    game::Game,
    notation::{LongAlgebraicNotation, ParseMoveError},
    square::Square,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Input {
    Help,
    Flip,
    Restart,
    Undo,
    Quit,
    Import(Fen),
    ExportFen,
    Select(Square),
    Move(LongAlgebraicNotation),
}
impl Display for Input {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Input::Help => write!(f, "help")?,
            Input::Flip => write!(f, "flip")?,
            Input::Restart => write!(f, "restart")?,
            Input::Undo => write!(f, "undo")?,
            Input::Quit => write!(f, "quit")?,
            Input::Import(fen) => write!(f, "import {fen}")?,
            Input::ExportFen => write!(f, "fen")?,
            Input::Select(square) => write!(f, "{square}")?,
            Input::Move(movement) => write!(f, "{movement}")?,
        }
        Ok(())
    }
}
/// Strips `token` only when it is a whole word.
fn strip_prefix_token<'a>(src: &'a str, token: &str) -> Option<&'a str> {
    src.strip_prefix(token)
        .filter(|rest| rest.chars().next().is_none_or(char::is_whitespace))
        .map(str::trim_start)
}
impl FromStr for Input {
    type Err = ParseInputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "help" => Ok(Input::Help),
            "flip" => Ok(Input::Flip),
            "restart" => Ok(Input::Restart),
            "undo" => Ok(Input::Undo),
            "quit" => Ok(Input::Quit),
            "fen" => Ok(Input::ExportFen),
            s => {
                if let Some(s) = strip_prefix_token(s, "import") {
                    Ok(Input::Import(s.parse()?))
                } else if let Ok(square) = s.parse() {
                    Ok(Input::Select(square))
                } else {
                    Ok(Input::Move(s.parse()?))
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseInputError {
    Fen(ParseFenError),
    Move(ParseMoveError),
}
impl From<ParseFenError> for ParseInputError {
    fn from(value: ParseFenError) -> Self {
        ParseInputError::Fen(value)
    }
}
impl From<ParseMoveError> for ParseInputError {
    fn from(value: ParseMoveError) -> Self {
        ParseInputError::Move(value)
    }
}
impl Display for ParseInputError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ParseInputError::Fen(err) => write!(f, "{err}")?,
            ParseInputError::Move(err) => write!(f, "{err}")?,
        }
        Ok(())
    }
}
impl Error for ParseInputError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ParseInputError::Fen(err) => Some(err),
            ParseInputError::Move(err) => Some(err),
        }
    }
}

fn status(game: &Game) -> String {
    let mut info = String::new();
    let outcome = game.outcome();
    if outcome.is_over() {
        let _ = writeln!(info, "{outcome}");
    } else {
        let _ = writeln!(info, "{} plays", game.side_to_move());
        if game.is_in_check() {
            let _ = writeln!(info, "check");
        }
    }
    info
}
#[allow(
    clippy::too_many_lines,
    reason = "one match arm per command reads better than scattered handlers"
)]
pub fn repl() -> io::Result<()> {
    let input = stdin().lock();
    let mut output = stdout().lock();
    let mut error = stderr().lock();

    let mut lines = input.lines();

    let mut game = Game::new();
    let mut highlighted = Vec::new();
    let mut view = Color::White;
    let mut update = true;
    let mut first_time = true;
    info!("starting interactive session");
    loop {
        if update {
            let mut info = status(&game);
            if first_time {
                info.push_str("type `help` for instructions\n");
                first_time = false;
            }
            writeln!(
                output,
                "{}",
                BoardDisplay {
                    board: game.board(),
                    view,
                    highlighted: &highlighted,
                    info: &info,
                },
            )?;
        }
        update = true;
        write!(output, "> ")?;
        output.flush()?;
        let Some(text) = lines.next().transpose()? else {
            info!("input closed");
            return Ok(());
        };
        let input = match text.trim().parse() {
            Ok(input) => input,
            Err(err) => {
                warn!("rejected input {:?}: {err}", text.trim());
                writeln!(error, "Error: {err}")?;
                writeln!(error, "for available commands, enter `help`")?;
                update = false;
                continue;
            }
        };
        match input {
            Input::Help => {
                writeln!(output, "flip           - flip the board")?;
                writeln!(output, "restart        - reset to starting position")?;
                writeln!(output, "undo           - take back the last move")?;
                writeln!(output, "quit           - quit the game")?;
                writeln!(output, "import <fen>   - import a position")?;
                writeln!(output, "fen            - export the position as fen")?;
                writeln!(output, "e2             - view legal moves")?;
                writeln!(output, "e2e4           - play the move")?;
                writeln!(output, "e7e8q          - move and promote")?;
                writeln!(output, "e1g1           - castle")?;
                update = false;
            }
            Input::Flip => view = !view,
            Input::Restart => {
                game = Game::new();
                highlighted.clear();
            }
            Input::Undo => {
                if game.undo().is_none() {
                    writeln!(error, "Error: no move to take back")?;
                    update = false;
                }
                highlighted.clear();
            }
            Input::Quit => return Ok(()),
            Input::Import(fen) => {
                info!("imported {fen}");
                game = fen.into();
                highlighted.clear();
            }
            Input::ExportFen => {
                writeln!(output, "{}", game.fen())?;
                update = false;
            }
            Input::Select(square) => match game.legal_destinations(square) {
                Ok(destinations) => {
                    highlighted.clear();
                    highlighted.extend(destinations);
                }
                Err(err) => {
                    warn!("{input}: {err}");
                    writeln!(error, "Error: {err}")?;
                    update = false;
                }
            },
            Input::Move(movement) => {
                match game.play(movement.origin, movement.destination, movement.promotion) {
                    Ok(_) => {
                        highlighted.clear();
                        highlighted.push(movement.origin);
                        highlighted.push(movement.destination);
                    }
                    Err(err) => {
                        warn!("{input}: {err}");
                        writeln!(error, "Error: {err}")?;
                        update = false;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod test {
    use crate::{
        repl::{Input, ParseInputError, strip_prefix_token},
        square::square,
    };

    #[test]
    fn parse_commands() {
        assert_eq!("undo".parse(), Ok(Input::Undo));
        assert_eq!("e2".parse(), Ok(Input::Select(square!("e2"))));
        let Ok(Input::Move(movement)) = "e7 e8q".parse::<Input>() else {
            panic!("expected a move");
        };
        assert_eq!(movement.to_string(), "e7e8q");
        assert!(matches!(
            "import 8/8 w".parse::<Input>(),
            Err(ParseInputError::Fen(_))
        ));
        assert!(matches!(
            "resign".parse::<Input>(),
            Err(ParseInputError::Move(_))
        ));
    }
    #[test]
    fn token_must_be_a_whole_word() {
        assert_eq!(strip_prefix_token("import  x", "import"), Some("x"));
        assert_eq!(strip_prefix_token("imports", "import"), None);
    }
}
