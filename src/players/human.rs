//! Interactive player reading move indices from a text stream

use std::io::{self, BufRead, BufReader, Stdin, Stdout, Write};

use crate::{
    Error, Result,
    game::{Board, Move, Side},
    ports::Policy,
};

/// A human choosing moves by index.
///
/// The legal moves are listed with zero-based indices on `output`, and a
/// line holding one index is read from `input`. Anything else (not a number,
/// out of range) is reported and the prompt repeats. End of input yields
/// [`Error::InputClosed`].
///
/// # Examples
///
/// ```
/// use std::io::Cursor;
///
/// use minichess::{
///     game::{Board, Side, legal_moves},
///     players::HumanPlayer,
///     ports::Policy,
/// };
///
/// let board = Board::initial();
/// let legal = legal_moves(&board, Side::White);
/// let mut human = HumanPlayer::new("you", Cursor::new("oops\n9\n1\n"), Vec::new());
/// assert_eq!(human.decide(&legal, &board, Side::White)?, legal[1]);
/// # Ok::<(), minichess::Error>(())
/// ```
pub struct HumanPlayer<R, W> {
    name: String,
    input: R,
    output: W,
}

impl HumanPlayer<BufReader<Stdin>, Stdout> {
    /// A human at the terminal
    pub fn stdio(name: impl Into<String>) -> Self {
        Self::new(name, BufReader::new(io::stdin()), io::stdout())
    }
}

impl<R: BufRead, W: Write> HumanPlayer<R, W> {
    pub fn new(name: impl Into<String>, input: R, output: W) -> Self {
        Self {
            name: name.into(),
            input,
            output,
        }
    }

    /// Consume the player and return its output sink
    pub fn into_output(self) -> W {
        self.output
    }

    fn write_moves(&mut self, legal_moves: &[Move]) -> io::Result<()> {
        writeln!(self.output, "\nLegal moves:")?;
        for (idx, mv) in legal_moves.iter().enumerate() {
            writeln!(self.output, "  {idx}: from {} to {}", mv.from, mv.to)?;
        }
        Ok(())
    }

    fn read_index(&mut self, count: usize) -> io::Result<Option<usize>> {
        let mut line = String::new();
        loop {
            write!(self.output, "\nEnter the number of your move: ")?;
            self.output.flush()?;

            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }

            match line.trim().parse::<usize>() {
                Ok(idx) if idx < count => return Ok(Some(idx)),
                _ => writeln!(self.output, "Invalid input, please try again.")?,
            }
        }
    }
}

impl<R: BufRead, W: Write> Policy for HumanPlayer<R, W> {
    fn decide(&mut self, legal_moves: &[Move], _board: &Board, _side: Side) -> Result<Move> {
        if legal_moves.is_empty() {
            return Err(Error::NoLegalMoves);
        }

        let io_error = |source| Error::Io {
            operation: "read move from player".to_string(),
            source,
        };

        self.write_moves(legal_moves).map_err(io_error)?;
        let idx = self
            .read_index(legal_moves.len())
            .map_err(io_error)?
            .ok_or(Error::InputClosed)?;
        Ok(legal_moves[idx])
    }

    fn name(&self) -> &str {
        &self.name
    }
}
