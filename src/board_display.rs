use std::fmt::{self, Display, Formatter};

use crate::{color::Color, piece::Piece, square::Square};

const LIGHT: &str = "\x1b[30;107m";
const DARK: &str = "\x1b[30;47m";
const HIGHLIGHTED: &str = "\x1b[30;103m";
const RESET: &str = "\x1b[0m";

pub trait IndexableBoard {
    fn index(&self, position: Square) -> Option<Piece>;
}
impl<T: IndexableBoard> IndexableBoard for &T {
    fn index(&self, position: Square) -> Option<Piece> {
        (**self).index(position)
    }
}
/// Renders a board with ANSI colors, `info` lines printed to its right.
pub struct BoardDisplay<'a, 'b, T> {
    pub board: T,
    pub view: Color,
    pub highlighted: &'a [Square],
    pub info: &'b str,
}
impl<T> Display for BoardDisplay<'_, '_, T>
where
    T: IndexableBoard,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut lines = self.info.lines().fuse();
        for row in 0..8 {
            let rank = match self.view {
                Color::White => 7 - row,
                Color::Black => row,
            };
            for column in 0..8 {
                let file = match self.view {
                    Color::White => column,
                    Color::Black => 7 - column,
                };
                let square = Square::new(rank, file);
                let background = if self.highlighted.contains(&square) {
                    HIGHLIGHTED
                } else {
                    match square.shade() {
                        Color::White => LIGHT,
                        Color::Black => DARK,
                    }
                };
                let figurine = self.board.index(square).map_or(' ', Piece::figurine);
                write!(f, "{background}{figurine} {RESET}")?;
            }
            write!(f, "{}", rank + 1)?;
            if let Some(line) = lines.next() {
                write!(f, " {line}")?;
            }
            writeln!(f)?;
        }
        match self.view {
            Color::White => write!(f, "a b c d e f g h")?,
            Color::Black => write!(f, "h g f e d c b a")?,
        }
        if let Some(line) = lines.next() {
            write!(f, "   {line}")?;
        }
        writeln!(f)?;
        for line in lines {
            writeln!(f, "                  {line}")?;
        }
        Ok(())
    }
}
