//! Newtype wrappers for improved type safety and domain modeling.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::game::board::{BOARD_CELLS, Board, Piece};

/// Character used for an empty cell in a serialized state
pub const EMPTY_CELL: char = '.';

/// A serialized board layout, used as the value-table key.
///
/// Cells are written row-major, one character each: `R`/`K`/`P` for White,
/// `r`/`k`/`p` for Black and `.` for empty. Only the piece layout is encoded,
/// so two boards with the same pieces always share a key regardless of the
/// game history that produced them.
///
/// # Examples
///
/// ```
/// use minichess::game::Board;
/// use minichess::types::StateKey;
///
/// let key = StateKey::from(&Board::initial());
/// assert_eq!(key.as_str(), "RK..P......p..kr");
///
/// let parsed = StateKey::parse("RK..P......p..kr").unwrap();
/// assert_eq!(parsed, key);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateKey(String);

impl StateKey {
    /// Parse and validate a serialized state.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidStateKey`] if the string does not hold
    /// exactly one valid cell character per square.
    pub fn parse(s: &str) -> Result<Self, crate::Error> {
        let invalid = |reason: String| crate::Error::InvalidStateKey {
            key: s.to_string(),
            reason,
        };

        let len = s.chars().count();
        if len != BOARD_CELLS {
            return Err(invalid(format!("expected {BOARD_CELLS} cells, got {len}")));
        }

        if let Some((position, c)) = s
            .chars()
            .enumerate()
            .find(|&(_, c)| c != EMPTY_CELL && Piece::from_char(c).is_none())
        {
            return Err(invalid(format!("invalid character '{c}' at cell {position}")));
        }

        Ok(StateKey(s.to_string()))
    }

    /// Get the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the underlying String.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<&Board> for StateKey {
    fn from(board: &Board) -> Self {
        StateKey(
            crate::game::board::Square::all()
                .map(|square| board.get(square).map_or(EMPTY_CELL, Piece::to_char))
                .collect(),
        )
    }
}

impl AsRef<str> for StateKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::board::{Move, Square};

    #[test]
    fn test_parse_rejects_wrong_length() {
        assert!(StateKey::parse("RK..").is_err());
        assert!(StateKey::parse("RK..P......p..kr.").is_err());
    }

    #[test]
    fn test_parse_rejects_unknown_piece() {
        let err = StateKey::parse("RQ..P......p..kr").unwrap_err();
        assert!(err.to_string().contains("'Q'"));
    }

    #[test]
    fn test_key_is_stable() {
        let board = Board::initial();
        assert_eq!(StateKey::from(&board), StateKey::from(&board));
    }

    #[test]
    fn test_distinct_layouts_give_distinct_keys() {
        let board = Board::initial();
        let king_step = Move::new(Square::new(0, 1).unwrap(), Square::new(1, 1).unwrap());
        let moved = board.with_move(king_step);
        assert_ne!(StateKey::from(&board), StateKey::from(&moved));
    }
}
