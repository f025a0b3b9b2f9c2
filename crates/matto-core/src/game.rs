//! Game state: turn tracking, histories, and FEN metadata maintenance.

use crate::board::Board;
use crate::castle_rights::CastleRights;
use crate::color::Color;
use crate::error::MoveError;
use crate::events::Event;
use crate::hash;
use crate::moves::MoveRecord;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::rank::Rank;
use crate::square::Square;

/// A chess game: the board plus everything FEN and repetition need.
///
/// The side to move follows from move-history parity, inverted by
/// `white_moves_first` when the game was loaded from a FEN with Black on
/// move.
#[derive(Debug, Clone)]
pub struct Game {
    pub(crate) board: Board,
    pub(crate) move_history: Vec<MoveRecord>,
    pub(crate) capture_history: Vec<Piece>,
    pub(crate) castling: CastleRights,
    pub(crate) en_passant: Option<Square>,
    pub(crate) halfmove_clock: u32,
    pub(crate) fullmove_number: u32,
    pub(crate) white_moves_first: bool,
}

impl Game {
    /// Create a game from the standard starting position.
    pub fn new() -> Game {
        Game {
            board: Board::starting_position(),
            move_history: Vec::new(),
            capture_history: Vec::new(),
            castling: CastleRights::ALL,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            white_moves_first: true,
        }
    }

    /// The current board.
    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Every committed move, in order.
    #[inline]
    pub fn move_history(&self) -> &[MoveRecord] {
        &self.move_history
    }

    /// Every captured piece, in capture order.
    #[inline]
    pub fn capture_history(&self) -> &[Piece] {
        &self.capture_history
    }

    /// Current castling availability.
    #[inline]
    pub fn castling(&self) -> CastleRights {
        self.castling
    }

    /// The en passant target square from the last double push, if any.
    #[inline]
    pub fn en_passant_target(&self) -> Option<Square> {
        self.en_passant
    }

    /// Halfmove clock for the fifty-move rule.
    #[inline]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    /// Fullmove number (starts at 1, incremented after Black moves).
    #[inline]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// The side whose turn it is.
    pub fn current_side(&self) -> Color {
        let white_to_move = (self.move_history.len() % 2 == 0) == self.white_moves_first;
        if white_to_move {
            Color::White
        } else {
            Color::Black
        }
    }

    /// Commit a move, record it, and return the record with the events to
    /// publish (`move`, then `capture` / `castle` / `enPassant` as they
    /// apply).
    pub fn play(
        &mut self,
        from: Square,
        to: Square,
        san: &str,
    ) -> Result<(MoveRecord, Vec<Event>), MoveError> {
        let mut record = self.board.apply_move(from, to, false, san)?;
        self.record_move(&mut record);

        let mut events = vec![Event::Move(record.clone())];
        if record.captured.is_some() {
            events.push(Event::Capture(record.clone()));
        }
        if record.castle {
            events.push(Event::Castle(record.clone()));
        }
        if record.en_passant {
            events.push(Event::EnPassant(record.clone()));
        }

        Ok((record, events))
    }

    /// Replace the piece on `sq` for pawn promotion, marking the latest move
    /// record. Returns the promoted square and the `promote` event.
    pub fn promote(&mut self, sq: Square, piece: Piece) -> Result<(Square, Event), MoveError> {
        let target = self.board.promote(sq, piece)?;
        if let Some(last) = self.move_history.last_mut() {
            last.promotion = true;
        }
        Ok((target, Event::Promote(target)))
    }

    /// Undo the most recent committed move.
    ///
    /// Pops the move (and its capture, if any) from history, restores the
    /// board, and re-derives the last-moved marker from the new history tail.
    /// FEN metadata (clocks, castling availability, en passant target) is not
    /// rewound.
    pub fn undo_last(&mut self) -> Option<(MoveRecord, Event)> {
        let mut record = self.move_history.pop()?;

        self.board.undo(&mut record);
        if record.captured.is_some() {
            self.capture_history.pop();
        }
        self.board
            .set_last_moved(self.move_history.last().map(|m| m.to));

        let event = Event::Undo(record.clone());
        Some((record, event))
    }

    /// Stamp the position hash, append to the histories, and maintain the FEN
    /// metadata fields.
    fn record_move(&mut self, record: &mut MoveRecord) {
        record.hash = hash::position_hash(&self.board);
        self.move_history.push(record.clone());
        if let Some(captured) = record.captured {
            self.capture_history.push(captured);
        }

        // Halfmove clock: reset on pawn move or capture.
        if record.captured.is_some() || record.piece.kind == PieceKind::Pawn {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }

        // Fullmove number: bump when the move handed the turn back to White.
        if self.current_side() == Color::White {
            self.fullmove_number += 1;
        }

        // Castling availability: a king move drops both of its side's flags, a
        // rook move from its original corner drops that corner's flag.
        if record.piece.kind == PieceKind::King {
            self.castling = self.castling.remove_color(record.piece.color);
        }
        if record.piece.kind == PieceKind::Rook {
            let flag = match record.from {
                Square::A1 => Some(CastleRights::WHITE_QUEEN),
                Square::H1 => Some(CastleRights::WHITE_KING),
                Square::A8 => Some(CastleRights::BLACK_QUEEN),
                Square::H8 => Some(CastleRights::BLACK_KING),
                _ => None,
            };
            if let Some(flag) = flag {
                self.castling = self.castling.remove(flag);
            }
        }

        // En passant target: the traversed square of a double push, cleared on
        // every other move.
        self.en_passant = None;
        if record.piece.kind == PieceKind::Pawn && record.prev_move_count == 0 {
            let from_rank = record.from.rank().index() as i8;
            let to_rank = record.to.rank().index() as i8;
            if (to_rank - from_rank).abs() == 2 {
                let mid = Rank::from_index(((from_rank + to_rank) / 2) as u8)
                    .expect("midpoint of two on-board ranks is on board");
                self.en_passant = Some(Square::new(mid, record.from.file()));
            }
        }
    }
}

impl Default for Game {
    fn default() -> Game {
        Game::new()
    }
}
