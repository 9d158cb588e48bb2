//! Move generation rules checked through the public API

mod common;

use common::{board, mv, sq};
use minichess::game::{Board, Move, Side, legal_moves};

fn destinations_from(moves: &[Move], row: usize, col: usize) -> Vec<(usize, usize)> {
    moves
        .iter()
        .filter(|m| m.from == sq(row, col))
        .map(|m| (m.to.row(), m.to.col()))
        .collect()
}

#[test]
fn test_initial_moves_are_nonempty_and_never_land_on_own_pieces() {
    let initial = Board::initial();
    for side in [Side::White, Side::Black] {
        let moves = legal_moves(&initial, side);
        assert!(!moves.is_empty(), "{side} has no opening move");
        for m in &moves {
            let moving = initial.get(m.from).expect("origin occupied");
            assert_eq!(moving.side, side);
            if let Some(target) = initial.get(m.to) {
                assert_ne!(target.side, side, "{m} lands on an own piece");
            }
        }
    }
}

#[test]
fn test_initial_white_move_list() {
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
fn test_rook_never_jumps() {
    // Rook at (0,0); own pawn at (2,0) and opponent pawn at (0,2)
    let b = board([[5, 0, -1, 0], [0, 0, 0, 0], [1, 0, 0, 0], [6, 0, 0, -6]]);
    let moves = legal_moves(&b, Side::White);
    let mut rook = destinations_from(&moves, 0, 0);
    rook.sort();

    assert_eq!(rook, vec![(0, 1), (0, 2), (1, 0)]);
    assert!(!rook.contains(&(0, 3)), "rook jumped over a capture");
    assert!(!rook.contains(&(3, 0)), "rook jumped over its own pawn");
}

#[test]
fn test_rook_slides_across_empty_board() {
    let b = board([[0, 0, 0, 0], [0, 5, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);
    let mut rook = destinations_from(&legal_moves(&b, Side::White), 1, 1);
    rook.sort();
    assert_eq!(rook, vec![(0, 1), (1, 0), (1, 2), (1, 3), (2, 1), (3, 1)]);
}

#[test]
fn test_pawn_forward_blocked_by_either_side() {
    let own = board([[0, 0, 0, 0], [0, 1, 0, 0], [0, 5, 0, 0], [0, 0, 0, 0]]);
    assert!(destinations_from(&legal_moves(&own, Side::White), 1, 1).is_empty());

    let enemy = board([[0, 0, 0, 0], [0, 1, 0, 0], [0, -5, 0, 0], [0, 0, 0, 0]]);
    assert!(destinations_from(&legal_moves(&enemy, Side::White), 1, 1).is_empty());
}

#[test]
fn test_pawn_diagonals_only_capture_opponents() {
    // Empty left diagonal, own rook on the right diagonal
    let b = board([[0, 0, 0, 0], [0, 1, 0, 0], [0, 0, 5, 0], [0, 0, 0, 0]]);
    assert_eq!(destinations_from(&legal_moves(&b, Side::White), 1, 1), vec![(2, 1)]);

    // Opponent pieces on both diagonals
    let b = board([[0, 0, 0, 0], [0, 1, 0, 0], [-1, 0, -5, 0], [0, 0, 0, 0]]);
    assert_eq!(
        destinations_from(&legal_moves(&b, Side::White), 1, 1),
        vec![(2, 1), (2, 0), (2, 2)]
    );
}

#[test]
fn test_black_pawn_moves_toward_row_zero() {
    let b = board([[0, 0, 0, 0], [1, 0, 0, 0], [0, -1, 0, 0], [0, 0, 0, 0]]);
    assert_eq!(
        destinations_from(&legal_moves(&b, Side::Black), 2, 1),
        vec![(1, 1), (1, 0)]
    );
}

#[test]
fn test_king_steps_one_square() {
    let b = board([[6, 1, 0, 0], [-1, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, -6]]);
    let mut king = destinations_from(&legal_moves(&b, Side::White), 0, 0);
    king.sort();
    assert_eq!(king, vec![(1, 0), (1, 1)]);
}

#[test]
fn test_side_without_pieces_has_no_moves() {
    let b = board([[6, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);
    assert!(legal_moves(&b, Side::Black).is_empty());
}
