//! Move generation for the three piece types
//!
//! Moves are purely geometric: a destination must be on the board and either
//! empty or held by the opponent. There is no check concept, so a king may
//! step next to the enemy king; capturing a king ends the game instead.

use super::board::{Board, Move, PieceKind, Side, Square};

const ROOK_DIRECTIONS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

const KING_DIRECTIONS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// All legal moves for `side`, scanning origins in row-major order.
///
/// An empty result means the side cannot move, which the game treats as a
/// loss for that side.
pub fn legal_moves(board: &Board, side: Side) -> Vec<Move> {
    let mut moves = Vec::new();
    for (origin, piece) in board.pieces().filter(|(_, piece)| piece.side == side) {
        match piece.kind {
            PieceKind::Pawn => pawn_moves(board, origin, side, &mut moves),
            PieceKind::Rook => rook_moves(board, origin, side, &mut moves),
            PieceKind::King => king_moves(board, origin, side, &mut moves),
        }
    }
    moves
}

fn holds_opponent(board: &Board, square: Square, side: Side) -> bool {
    board
        .get(square)
        .is_some_and(|piece| piece.side == side.opponent())
}

/// One step forward onto an empty cell, or one diagonal step forward onto an
/// opposing piece.
fn pawn_moves(board: &Board, origin: Square, side: Side, moves: &mut Vec<Move>) {
    let forward = side.forward();

    if let Some(ahead) = origin.offset(forward, 0)
        && board.is_empty(ahead)
    {
        moves.push(Move::new(origin, ahead));
    }

    for d_col in [-1, 1] {
        if let Some(target) = origin.offset(forward, d_col)
            && holds_opponent(board, target, side)
        {
            moves.push(Move::new(origin, target));
        }
    }
}

/// Slide orthogonally through empty cells; the first occupied cell ends the
/// ray and is included only when it holds an opposing piece.
fn rook_moves(board: &Board, origin: Square, side: Side, moves: &mut Vec<Move>) {
    for (d_row, d_col) in ROOK_DIRECTIONS {
        let mut current = origin.offset(d_row, d_col);
        while let Some(square) = current {
            match board.get(square) {
                None => moves.push(Move::new(origin, square)),
                Some(piece) => {
                    if piece.side != side {
                        moves.push(Move::new(origin, square));
                    }
                    break;
                }
            }
            current = square.offset(d_row, d_col);
        }
    }
}

fn king_moves(board: &Board, origin: Square, side: Side, moves: &mut Vec<Move>) {
    for (d_row, d_col) in KING_DIRECTIONS {
        if let Some(target) = origin.offset(d_row, d_col)
            && board.get(target).is_none_or(|piece| piece.side != side)
        {
            moves.push(Move::new(origin, target));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::board::Piece;

    fn sq(row: usize, col: usize) -> Square {
        Square::new(row, col).unwrap()
    }

    fn mv(from: (usize, usize), to: (usize, usize)) -> Move {
        Move::new(sq(from.0, from.1), sq(to.0, to.1))
    }

    fn board_from(codes: [[i8; 4]; 4]) -> Board {
        Board::from_codes(codes).unwrap()
    }

    #[test]
    fn test_initial_white_moves() {
        let moves = legal_moves(&Board::initial(), Side::White);
        assert_eq!(
            moves,
            vec![
                mv((0, 1), (0, 2)),
                mv((0, 1), (1, 1)),
                mv((0, 1), (1, 2)),
                mv((1, 0), (2, 0)),
            ]
        );
    }

    #[test]
    fn test_initial_black_moves() {
        let moves = legal_moves(&Board::initial(), Side::Black);
        assert_eq!(
            moves,
            vec![
                mv((2, 3), (1, 3)),
                mv((3, 2), (2, 1)),
                mv((3, 2), (2, 2)),
                mv((3, 2), (3, 1)),
            ]
        );
    }

    #[test]
    fn test_pawn_blocked_forward() {
        // White pawn at (1,1) with a black pawn directly ahead
        let board = board_from([[0, 0, 0, 0], [0, 1, 0, 0], [0, -1, 0, 0], [0, 0, 0, 0]]);
        assert!(legal_moves(&board, Side::White).is_empty());
    }

    #[test]
    fn test_pawn_diagonal_captures_only_opponents() {
        let board = board_from([[0, 0, 0, 0], [0, 1, 0, 0], [-5, 0, 1, 0], [0, 0, 0, 0]]);
        let moves = legal_moves(&board, Side::White);
        assert!(moves.contains(&mv((1, 1), (2, 1))));
        assert!(moves.contains(&mv((1, 1), (2, 0))));
        assert!(!moves.contains(&mv((1, 1), (2, 2))));
    }

    #[test]
    fn test_black_pawn_moves_up() {
        let board = board_from([[0, 0, 0, 0], [0, 0, 6, 0], [0, 0, 0, -1], [0, 0, 0, 0]]);
        let moves = legal_moves(&board, Side::Black);
        assert_eq!(moves, vec![mv((2, 3), (1, 3)), mv((2, 3), (1, 2))]);
    }

    #[test]
    fn test_pawn_on_last_row_has_no_moves() {
        let board = board_from([[0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [1, 0, 0, 0]]);
        assert!(legal_moves(&board, Side::White).is_empty());
    }

    #[test]
    fn test_rook_stops_at_first_piece() {
        // Rook at (0,0); own pawn at (2,0); enemy pawn at (0,2) with an enemy king behind it
        let board = board_from([[5, 0, -1, -6], [0, 0, 0, 0], [1, 0, 0, 0], [0, 0, 0, 0]]);
        let rook: Vec<Move> = legal_moves(&board, Side::White)
            .into_iter()
            .filter(|m| m.from == sq(0, 0))
            .collect();
        assert_eq!(
            rook,
            vec![mv((0, 0), (1, 0)), mv((0, 0), (0, 1)), mv((0, 0), (0, 2))]
        );
        assert!(!rook.contains(&mv((0, 0), (0, 3))));
        assert!(!rook.contains(&mv((0, 0), (3, 0))));
    }

    #[test]
    fn test_king_in_center_has_eight_moves() {
        let board = board_from([[0, 0, 0, 0], [0, 6, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);
        assert_eq!(legal_moves(&board, Side::White).len(), 8);
    }

    #[test]
    fn test_king_captures_but_avoids_own_pieces() {
        let board = board_from([[1, -1, 0, 0], [0, 6, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);
        let king: Vec<Move> = legal_moves(&board, Side::White)
            .into_iter()
            .filter(|m| m.from == sq(1, 1))
            .collect();
        assert!(king.contains(&mv((1, 1), (0, 1))));
        assert!(!king.contains(&mv((1, 1), (0, 0))));
        assert_eq!(king.len(), 7);
    }

    #[test]
    fn test_no_pieces_no_moves() {
        let mut board = Board::empty();
        board.set(sq(0, 0), Some(Piece::from_code(-6).unwrap()));
        assert!(legal_moves(&board, Side::White).is_empty());
    }
}
