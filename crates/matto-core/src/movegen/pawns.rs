//! Pawn destinations: pushes, diagonal captures, and en passant.

use crate::board::Board;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::square::Square;

/// Pseudo-legal destinations for a pawn on `origin`.
pub(super) fn destinations(board: &Board, origin: Square, piece: Piece) -> Vec<Square> {
    let mut out = Vec::new();
    let forward = piece.color.forward();

    // Single push, and the initial double push when both squares are empty.
    // The double push is gated on the intermediate square explicitly, not on
    // list ordering.
    if let Some(one) = origin.offset(0, forward) {
        if !board.is_occupied(one) {
            out.push(one);

            if piece.move_count == 0 && origin.rank() == piece.color.pawn_rank() {
                if let Some(two) = one.offset(0, forward) {
                    if !board.is_occupied(two) {
                        out.push(two);
                    }
                }
            }
        }
    }

    // Diagonal captures: only onto squares occupied by the enemy.
    for file_delta in [-1, 1] {
        let Some(sq) = origin.offset(file_delta, forward) else {
            continue;
        };
        if board.piece_on(sq).is_some_and(|p| p.color != piece.color) {
            out.push(sq);
        }
    }

    // En passant: from the fifth rank (White) or fourth (Black), capturing an
    // adjacent enemy pawn that just made its double push.
    if origin.rank() == piece.color.en_passant_rank() {
        for file_delta in [-1, 1] {
            let Some(adjacent) = origin.offset(file_delta, 0) else {
                continue;
            };
            let Some(neighbor) = board.piece_on(adjacent) else {
                continue;
            };

            if neighbor.kind == PieceKind::Pawn
                && neighbor.color != piece.color
                && neighbor.move_count == 1
                && board.last_moved() == Some(adjacent)
            {
                if let Some(behind) = adjacent.offset(0, forward) {
                    out.push(behind);
                }
            }
        }
    }

    out
}
