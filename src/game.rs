//! MiniChess: a 4x4 variant with pawns, rooks and kings
//!
//! There is no check, castling, promotion or en-passant. A game ends when a
//! king is captured, when the side to move has no legal move (it loses), or
//! after fifty plies without a capture (draw).

pub mod board;
pub mod movegen;
pub mod session;

pub use board::{BOARD_COLS, BOARD_ROWS, Board, Move, Piece, PieceKind, Side, Square};
pub use movegen::legal_moves;
pub use session::{GameOutcome, GameSession, NO_CAPTURE_DRAW_LIMIT, Rewards};
