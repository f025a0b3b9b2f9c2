//! Position hashing for repetition detection.
//!
//! The digest covers (piece kind, color, square) for every occupied square
//! and nothing else: side to move, castling availability, and the en passant
//! target are deliberately excluded, so positions differing only in those
//! collapse to the same key. The repetition tests pin this choice down.

use crate::board::Board;
use crate::color::Color;
use crate::piece_kind::PieceKind;
use crate::square::Square;

const SEED: u64 = 0x4d41_5454_4f21_2121; // "MATTO!!!"

/// Xorshift64 PRNG. Returns (value, next_state).
const fn xorshift64(mut state: u64) -> (u64, u64) {
    state ^= state << 13;
    state ^= state >> 7;
    state ^= state << 17;
    (state, state)
}

/// Key for each (piece, square) pair, indexed by
/// `[color * 6 + kind][square]`.
static PIECE_SQUARE: [[u64; 64]; 12] = {
    let mut table = [[0u64; 64]; 12];
    let mut state = SEED;
    let mut piece = 0;
    while piece < 12 {
        let mut sq = 0;
        while sq < 64 {
            let (val, next) = xorshift64(state);
            table[piece][sq] = val;
            state = next;
            sq += 1;
        }
        piece += 1;
    }
    table
};

#[inline]
const fn piece_index(color: Color, kind: PieceKind) -> usize {
    color.index() * PieceKind::COUNT + kind.index()
}

/// Digest the piece placement of `board` into a repetition key.
pub(crate) fn position_hash(board: &Board) -> u64 {
    let mut hash = 0u64;

    for sq in Square::all() {
        if let Some(piece) = board.piece_on(sq) {
            hash ^= PIECE_SQUARE[piece_index(piece.color, piece.kind)][sq.index()];
        }
    }

    hash
}
