//! Move records and the working types shared by the generator and validator.

use crate::piece::Piece;
use crate::square::Square;

/// A legal-move-table entry: the (source, destination) pair behind a SAN key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotationMove {
    pub from: Square,
    pub to: Square,
}

/// Pseudo-legal destinations for the piece standing on `origin`.
///
/// Produced by the piece generator, narrowed by the king-safety filter.
#[derive(Debug, Clone)]
pub struct PotentialMoves {
    pub origin: Square,
    pub destinations: Vec<Square>,
}

/// One attacker of a target square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attacker {
    /// The square the attacking piece stands on.
    pub square: Square,
    /// The attacking piece itself.
    pub piece: Piece,
}

/// Full description of an applied or simulated move.
///
/// A record carries enough state to reverse the move exactly:
/// [`Board::undo`](crate::board::Board::undo) consumes it to restore the
/// source square, the captured piece (on its own square for en passant), the
/// rook for a castle, and the mover's previous move counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRecord {
    /// The SAN string this move was played as (empty for simulations).
    pub san: String,
    /// The moved piece as it stood on the source square, before the move
    /// counter increment.
    pub piece: Piece,
    /// The square the piece moved from.
    pub from: Square,
    /// The square the piece moved to.
    pub to: Square,
    /// The captured piece, if any. For en passant this is the pawn removed
    /// from `en_passant_square`, not from `to`.
    pub captured: Option<Piece>,
    /// The square the en passant victim stood on, when the capture was en
    /// passant.
    pub en_passant_square: Option<Square>,
    /// Whether the move was a castle (rook moved too).
    pub castle: bool,
    /// Whether the move captured en passant.
    pub en_passant: bool,
    /// Whether the pawn was promoted after this move.
    pub promotion: bool,
    /// The rook's source square when castling.
    pub rook_from: Option<Square>,
    /// The rook's destination square when castling.
    pub rook_to: Option<Square>,
    /// Position hash stamped when the move was committed, for repetition
    /// bookkeeping.
    pub(crate) hash: u64,
    /// The mover's move counter before this move.
    pub(crate) prev_move_count: u16,
    /// Whether the move was speculative (no events, no counter changes).
    pub(crate) simulated: bool,
    /// Set once the record has been undone; further undos are no-ops.
    pub(crate) undone: bool,
}

impl MoveRecord {
    /// Whether this record was produced by a speculative move.
    #[inline]
    pub fn is_simulated(&self) -> bool {
        self.simulated
    }

    /// Whether this record has already been undone.
    #[inline]
    pub fn is_undone(&self) -> bool {
        self.undone
    }
}
