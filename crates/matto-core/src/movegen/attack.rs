//! Attacker detection by outward ray walk plus knight probes.

use crate::board::Board;
use crate::direction::{Direction, KNIGHT_JUMPS};
use crate::moves::Attacker;
use crate::piece_kind::PieceKind;
use crate::square::Square;

use super::pseudo_legal;

/// Find every enemy piece attacking the piece on `target`.
///
/// Walks the eight ray directions outward to the first occupied square and
/// asks that piece's own generator whether it reaches `target`; then probes
/// the eight knight offsets. An empty `target` has no attackers.
pub(crate) fn attackers_of(board: &Board, target: Square) -> Vec<Attacker> {
    let Some(target_piece) = board.piece_on(target) else {
        return Vec::new();
    };

    let mut attackers = Vec::new();

    for dir in Direction::ALL {
        let mut current = target.shift(dir);
        while let Some(sq) = current {
            if let Some(piece) = board.piece_on(sq) {
                if piece.color != target_piece.color && pseudo_legal(board, sq).contains(&target) {
                    attackers.push(Attacker { square: sq, piece });
                }
                break;
            }
            current = sq.shift(dir);
        }
    }

    for (file_delta, rank_delta) in KNIGHT_JUMPS {
        let Some(sq) = target.offset(file_delta, rank_delta) else {
            continue;
        };
        let Some(piece) = board.piece_on(sq) else {
            continue;
        };
        if piece.kind == PieceKind::Knight
            && piece.color != target_piece.color
            && pseudo_legal(board, sq).contains(&target)
        {
            attackers.push(Attacker { square: sq, piece });
        }
    }

    attackers
}

/// Whether the piece on `target` is attacked by at least one enemy piece.
pub(crate) fn is_attacked(board: &Board, target: Square) -> bool {
    !attackers_of(board, target).is_empty()
}
