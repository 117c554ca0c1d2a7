#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]

use std::{
    env,
    error::Error,
    fmt::{self, Display, Formatter},
    num::ParseIntError,
    process::ExitCode,
    str::FromStr,
};

use env_logger::{Builder, Env};
use log::error;
use rulebook::{fuzz::fuzz, repl::repl};

const DEFAULT_GAMES: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Repl,
    Fuzz { games: u32, seed: Option<u64> },
}
#[derive(Debug, Clone, PartialEq, Eq)]
enum ParseCommandError {
    Int(ParseIntError),
    Unknown(String),
}
impl From<ParseIntError> for ParseCommandError {
    fn from(value: ParseIntError) -> Self {
        ParseCommandError::Int(value)
    }
}
impl Display for ParseCommandError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ParseCommandError::Int(err) => write!(f, "{err}")?,
            ParseCommandError::Unknown(command) => write!(
                f,
                "unknown command `{command}`, expected `repl` or `fuzz [games] [seed]`"
            )?,
        }
        Ok(())
    }
}
impl Error for ParseCommandError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ParseCommandError::Int(err) => Some(err),
            ParseCommandError::Unknown(_) => None,
        }
    }
}
impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        match words.next() {
            None | Some("repl") => Ok(Command::Repl),
            Some("fuzz") => {
                let games = words.next().map(str::parse::<u32>).transpose()?;
                let seed = words.next().map(str::parse::<u64>).transpose()?;
                Ok(Command::Fuzz {
                    games: games.unwrap_or(DEFAULT_GAMES),
                    seed,
                })
            }
            Some(command) => Err(ParseCommandError::Unknown(command.to_owned())),
        }
    }
}

fn main() -> ExitCode {
    Builder::from_env(Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = env::args().skip(1).collect();
    let command = match args.join(" ").parse() {
        Ok(command) => command,
        Err(err) => {
            eprintln!("Error: {err}");
            return ExitCode::FAILURE;
        }
    };
    match command {
        Command::Repl => {
            if let Err(err) = repl() {
                error!("{err}");
                return ExitCode::FAILURE;
            }
        }
        Command::Fuzz { games, seed } => match fuzz(games, seed) {
            Ok(report) => println!("{report}"),
            Err(mismatch) => {
                error!("{mismatch}");
                eprintln!("Error: {mismatch}");
                return ExitCode::FAILURE;
            }
        },
    }
    ExitCode::SUCCESS
}
