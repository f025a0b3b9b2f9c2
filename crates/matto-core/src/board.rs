//! The chess board: a 64-cell piece array with reversible mutation.

use std::fmt;

use crate::color::Color;
use crate::error::MoveError;
use crate::file::File;
use crate::moves::MoveRecord;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::square::Square;

/// Back-rank piece layout from file a to file h.
const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Piece placement plus the square of the most recently moved piece.
///
/// The board owns every piece. Moves are applied through [`Board::apply_move`],
/// which returns a [`MoveRecord`] holding everything [`Board::undo`] needs to
/// reverse the mutation exactly — including speculative moves made while
/// testing king safety.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    squares: [Option<Piece>; 64],
    last_moved: Option<Square>,
}

impl Board {
    /// Create a board with no pieces.
    pub fn empty() -> Board {
        Board {
            squares: [None; 64],
            last_moved: None,
        }
    }

    /// Create a board with pieces in their standard starting positions.
    pub fn starting_position() -> Board {
        let mut board = Board::empty();

        for (file_index, &kind) in BACK_RANK.iter().enumerate() {
            let file = File::from_index(file_index as u8).expect("BACK_RANK has 8 entries");
            board.set_piece(
                Square::new(Color::White.back_rank(), file),
                Piece::new(kind, Color::White),
            );
            board.set_piece(
                Square::new(Color::Black.back_rank(), file),
                Piece::new(kind, Color::Black),
            );
            board.set_piece(
                Square::new(Color::White.pawn_rank(), file),
                Piece::new(PieceKind::Pawn, Color::White),
            );
            board.set_piece(
                Square::new(Color::Black.pawn_rank(), file),
                Piece::new(PieceKind::Pawn, Color::Black),
            );
        }

        board
    }

    /// Return the piece on the given square, if any.
    #[inline]
    pub fn piece_on(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()]
    }

    /// Return `true` if the given square is occupied.
    #[inline]
    pub fn is_occupied(&self, sq: Square) -> bool {
        self.squares[sq.index()].is_some()
    }

    /// Place a piece on a square, replacing any occupant.
    #[inline]
    pub fn set_piece(&mut self, sq: Square, piece: Piece) {
        self.squares[sq.index()] = Some(piece);
    }

    /// Remove and return the piece on a square.
    #[inline]
    pub fn take_piece(&mut self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()].take()
    }

    /// The square of the most recently committed-to piece, if any.
    #[inline]
    pub fn last_moved(&self) -> Option<Square> {
        self.last_moved
    }

    #[inline]
    pub(crate) fn set_last_moved(&mut self, sq: Option<Square>) {
        self.last_moved = sq;
    }

    /// Return every square occupied by the given side, in index order.
    pub fn occupied_squares(&self, color: Color) -> Vec<Square> {
        Square::all()
            .filter(|&sq| self.squares[sq.index()].is_some_and(|p| p.color == color))
            .collect()
    }

    /// Return the square of the given side's king, if one is on the board.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        Square::all().find(|&sq| {
            self.squares[sq.index()]
                .is_some_and(|p| p.kind == PieceKind::King && p.color == color)
        })
    }

    /// Move the piece on `from` to `to`, inferring castle and en passant.
    ///
    /// A king with a zero move counter landing on file g or c drags the
    /// matching rook along (h→f or a→d); if that rook is missing the castle
    /// flag is cleared and the king step stands. A pawn landing on an empty
    /// square of a different file captures en passant: the enemy pawn on
    /// (destination file, source rank) is removed.
    ///
    /// When `simulate` is true the mutation is speculative: the move counter
    /// and last-moved marker are untouched. Every simulation must be undone
    /// with [`Board::undo`] before the next position-dependent read.
    pub fn apply_move(
        &mut self,
        from: Square,
        to: Square,
        simulate: bool,
        san: &str,
    ) -> Result<MoveRecord, MoveError> {
        let piece = self
            .piece_on(from)
            .ok_or(MoveError::NoPieceOnSource { square: from })?;

        let mut record = MoveRecord {
            san: san.to_string(),
            piece,
            from,
            to,
            captured: self.piece_on(to),
            en_passant_square: None,
            castle: false,
            en_passant: false,
            promotion: false,
            rook_from: None,
            rook_to: None,
            hash: 0,
            prev_move_count: piece.move_count,
            simulated: simulate,
            undone: false,
        };

        self.squares[to.index()] = Some(piece);
        self.squares[from.index()] = None;

        record.castle = piece.kind == PieceKind::King
            && record.prev_move_count == 0
            && (to.file() == File::FileG || to.file() == File::FileC);
        record.en_passant = piece.kind == PieceKind::Pawn
            && record.captured.is_none()
            && to.file() != from.file();

        if record.en_passant {
            let victim_sq = Square::new(from.rank(), to.file());
            record.captured = self.squares[victim_sq.index()].take();
            record.en_passant_square = Some(victim_sq);
        }

        if record.castle {
            let back = to.rank();
            let (rook_from, rook_to) = if to.file() == File::FileG {
                (Square::new(back, File::FileH), Square::new(back, File::FileF))
            } else {
                (Square::new(back, File::FileA), Square::new(back, File::FileD))
            };

            match self.squares[rook_from.index()].take() {
                Some(rook) => {
                    self.squares[rook_to.index()] = Some(rook);
                    record.rook_from = Some(rook_from);
                    record.rook_to = Some(rook_to);
                }
                // No rook to castle with: the king step stands on its own.
                None => record.castle = false,
            }
        }

        if !simulate {
            if let Some(moved) = self.squares[to.index()].as_mut() {
                moved.move_count += 1;
            }
            self.last_moved = Some(to);
        }

        Ok(record)
    }

    /// Reverse a move recorded by [`Board::apply_move`].
    ///
    /// Restores the mover (with its previous move counter), the captured
    /// piece on the square it stood on, and the rook for a castle. Undoing a
    /// record twice is a no-op. Committed undos clear the last-moved marker;
    /// the game layer re-derives it from history.
    pub fn undo(&mut self, record: &mut MoveRecord) {
        if record.undone {
            return;
        }

        let mut piece = record.piece;
        piece.move_count = record.prev_move_count;
        self.squares[record.from.index()] = Some(piece);
        self.squares[record.to.index()] = record.captured;

        if record.en_passant {
            if let Some(victim_sq) = record.en_passant_square {
                self.squares[victim_sq.index()] = record.captured;
                self.squares[record.to.index()] = None;
            }
        }

        if record.castle {
            if let (Some(rook_from), Some(rook_to)) = (record.rook_from, record.rook_to) {
                self.squares[rook_from.index()] = self.squares[rook_to.index()].take();
            }
        }

        if !record.simulated {
            self.last_moved = None;
        }

        record.undone = true;
    }

    /// Replace the piece on `sq` with `piece`, inheriting the occupant's move
    /// counter. Used for pawn promotion.
    pub fn promote(&mut self, sq: Square, mut piece: Piece) -> Result<Square, MoveError> {
        let occupant = self
            .piece_on(sq)
            .ok_or(MoveError::NoPieceToPromote { square: sq })?;

        piece.move_count = occupant.move_count;
        self.squares[sq.index()] = Some(piece);
        self.last_moved = Some(sq);

        Ok(sq)
    }

    /// Return a pretty-printable wrapper for this board.
    pub fn pretty(&self) -> PrettyBoard<'_> {
        PrettyBoard(self)
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board {{")?;
        writeln!(f, "{}", self.pretty())?;
        write!(f, "}}")
    }
}

/// Wrapper for pretty-printing a board as an 8x8 grid.
pub struct PrettyBoard<'a>(&'a Board);

impl fmt::Display for PrettyBoard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank_index in (0u8..8).rev() {
            write!(f, "{}  ", rank_index + 1)?;
            for file_index in 0u8..8 {
                let sq = Square::from_index(rank_index * 8 + file_index)
                    .expect("rank and file indices are in range");
                let c = match self.0.piece_on(sq) {
                    Some(piece) => piece.fen_char(),
                    None => '.',
                };
                if file_index < 7 {
                    write!(f, "{c} ")?;
                } else {
                    write!(f, "{c}")?;
                }
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}
