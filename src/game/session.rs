//! Game session: live board, turn order and terminal detection

use serde::{Deserialize, Serialize};

use super::{
    board::{Board, Move, Side},
    movegen::legal_moves,
};
use crate::{Error, Result, types::StateKey};

/// Consecutive plies without a capture after which the game is drawn
pub const NO_CAPTURE_DRAW_LIMIT: u32 = 50;

/// Outcome of a finished game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    Win(Side),
    Draw,
}

impl GameOutcome {
    /// Terminal rewards for both sides
    pub fn rewards(self) -> Rewards {
        match self {
            GameOutcome::Win(Side::White) => Rewards {
                white: 1.0,
                black: 0.0,
            },
            GameOutcome::Win(Side::Black) => Rewards {
                white: 0.0,
                black: 1.0,
            },
            GameOutcome::Draw => Rewards {
                white: 0.5,
                black: 0.5,
            },
        }
    }

    /// Reward delivered to `side` for this outcome
    pub fn reward_for(self, side: Side) -> f64 {
        self.rewards().for_side(side)
    }
}

/// Final reward pair handed to learning participants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rewards {
    pub white: f64,
    pub black: f64,
}

impl Rewards {
    pub fn for_side(self, side: Side) -> f64 {
        match side {
            Side::White => self.white,
            Side::Black => self.black,
        }
    }
}

/// The live game: board, side to move and the no-capture counter.
///
/// A session starts in progress with White to move. Moves are applied with
/// [`GameSession::apply`], terminal conditions are read with
/// [`GameSession::evaluate`], and [`GameSession::reset`] restores the initial
/// layout for the next episode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    board: Board,
    to_move: Side,
    no_capture_plies: u32,
    plies: u32,
    state_key: StateKey,
    finished: bool,
}

impl GameSession {
    /// Create a session at the initial layout
    pub fn new() -> Self {
        Self::from_position(Board::initial(), Side::White, 0)
    }

    /// Create a session from an arbitrary position.
    ///
    /// Useful for analysis and for driving specific end-game scenarios.
    pub fn from_position(board: Board, to_move: Side, no_capture_plies: u32) -> Self {
        GameSession {
            board,
            to_move,
            no_capture_plies,
            plies: 0,
            state_key: board.state_key(),
            finished: false,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn to_move(&self) -> Side {
        self.to_move
    }

    /// Plies played since the last capture
    pub fn no_capture_plies(&self) -> u32 {
        self.no_capture_plies
    }

    /// Plies played since the session was created or reset
    pub fn plies(&self) -> u32 {
        self.plies
    }

    /// Serialized form of the current board
    pub fn state_key(&self) -> &StateKey {
        &self.state_key
    }

    /// Whether the last call to [`GameSession::evaluate`] found a terminal position
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Legal moves for the side to move
    pub fn legal_moves(&self) -> Vec<Move> {
        legal_moves(&self.board, self.to_move)
    }

    /// Apply a move for the side to move.
    ///
    /// The captured piece (if any) is overwritten, the no-capture counter is
    /// reset on a capture and incremented otherwise, the turn passes to the
    /// opponent and the serialized state is recomputed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GameOver`] if the session already reached a terminal
    /// position, or [`Error::IllegalMove`] if `mv` is not among the current
    /// legal moves.
    pub fn apply(&mut self, mv: Move) -> Result<()> {
        if self.finished {
            return Err(Error::GameOver);
        }
        if !self.legal_moves().contains(&mv) {
            return Err(Error::IllegalMove {
                mv: mv.to_string(),
                side: self.to_move.to_string(),
            });
        }

        let captured = self.board.apply_move(mv);
        if captured.is_some() {
            self.no_capture_plies = 0;
        } else {
            self.no_capture_plies += 1;
        }
        self.to_move = self.to_move.opponent();
        self.plies += 1;
        self.state_key = self.board.state_key();
        Ok(())
    }

    /// Check the terminal conditions, in priority order:
    ///
    /// 1. Black's king is gone: White wins.
    /// 2. White's king is gone: Black wins.
    /// 3. The side to move has no legal move: the other side wins.
    /// 4. [`NO_CAPTURE_DRAW_LIMIT`] plies without a capture: draw.
    ///
    /// Returns `None` while the game is still in progress.
    pub fn evaluate(&mut self) -> Option<GameOutcome> {
        let outcome = if !self.board.has_king(Side::Black) {
            Some(GameOutcome::Win(Side::White))
        } else if !self.board.has_king(Side::White) {
            Some(GameOutcome::Win(Side::Black))
        } else if self.legal_moves().is_empty() {
            Some(GameOutcome::Win(self.to_move.opponent()))
        } else if self.no_capture_plies >= NO_CAPTURE_DRAW_LIMIT {
            Some(GameOutcome::Draw)
        } else {
            None
        };
        self.finished = outcome.is_some();
        outcome
    }

    /// Restore the initial layout with White to move
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}
