//! Shared helpers for the integration tests.

#![allow(dead_code)]

use minichess::game::{Board, Move, Square};

/// Square at `(row, col)`; panics when off the board
pub fn sq(row: usize, col: usize) -> Square {
    Square::new(row, col).expect("square on the board")
}

/// Move between two `(row, col)` squares
pub fn mv(from: (usize, usize), to: (usize, usize)) -> Move {
    Move::new(sq(from.0, from.1), sq(to.0, to.1))
}

/// Board from signed piece codes (1 pawn, 5 rook, 6 king; negative for Black)
pub fn board(codes: [[i8; 4]; 4]) -> Board {
    Board::from_codes(codes).expect("valid piece codes")
}
