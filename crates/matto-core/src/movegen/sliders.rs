//! Destination walks for sliding pieces (bishop, rook, queen).

use crate::board::Board;
use crate::color::Color;
use crate::direction::Direction;
use crate::square::Square;

/// Walk outward from `origin` in each direction, at most `max_steps` squares.
///
/// A ray stops at the first occupied square, which is included only when it
/// holds an enemy piece.
pub(super) fn walk(
    board: &Board,
    origin: Square,
    color: Color,
    dirs: &[Direction],
    max_steps: u8,
    out: &mut Vec<Square>,
) {
    for &dir in dirs {
        let mut current = origin.shift(dir);
        let mut steps = 0;

        while let Some(sq) = current {
            if steps >= max_steps {
                break;
            }

            match board.piece_on(sq) {
                Some(piece) => {
                    if piece.color != color {
                        out.push(sq);
                    }
                    break;
                }
                None => out.push(sq),
            }

            current = sq.shift(dir);
            steps += 1;
        }
    }
}

/// Pseudo-legal destinations for a slider on `origin` along `dirs`.
pub(super) fn destinations(
    board: &Board,
    origin: Square,
    color: Color,
    dirs: &[Direction],
) -> Vec<Square> {
    let mut out = Vec::new();
    walk(board, origin, color, dirs, 8, &mut out);
    out
}
