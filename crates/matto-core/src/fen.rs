//! FEN loading and serialization for [`Game`].

use std::fmt;
use std::str::FromStr;

use crate::board::Board;
use crate::castle_rights::CastleRights;
use crate::color::Color;
use crate::error::FenError;
use crate::file::File;
use crate::game::Game;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::rank::Rank;
use crate::square::Square;

/// The FEN string for the standard starting position.
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Parse the piece placement field (ranks 8→1, files a→h, digits for runs of
/// empty squares).
fn parse_placement(field: &str) -> Result<Board, FenError> {
    let rows: Vec<&str> = field.split('/').collect();
    if rows.len() != 8 {
        return Err(FenError::WrongRankCount { found: rows.len() });
    }

    let mut board = Board::empty();

    for (rank_index, row) in rows.iter().enumerate() {
        // FEN ranks go from 8 to 1, top to bottom.
        let rank = Rank::from_index(7 - rank_index as u8).expect("rank index is 0..8");
        let mut file_index: u8 = 0;

        for c in row.chars() {
            if let Some(digit) = c.to_digit(10) {
                if !(1..=8).contains(&digit) {
                    return Err(FenError::InvalidPieceChar { character: c });
                }
                file_index += digit as u8;
            } else {
                let piece =
                    Piece::from_fen_char(c).ok_or(FenError::InvalidPieceChar { character: c })?;

                if file_index >= 8 {
                    return Err(FenError::BadRankRow {
                        rank_index,
                        length: file_index as usize + 1,
                    });
                }

                let file = File::from_index(file_index).expect("file index is 0..8");
                board.set_piece(Square::new(rank, file), piece);
                file_index += 1;
            }
        }

        if file_index != 8 {
            return Err(FenError::BadRankRow {
                rank_index,
                length: file_index as usize,
            });
        }
    }

    Ok(board)
}

/// Give the pawn implied by the en passant target its double-push history.
///
/// A freshly parsed board has every move counter at zero, which would make
/// the en passant field unactionable: the capture generator demands a
/// last-moved enemy pawn with exactly one move. Synthesize that state from
/// the target square.
fn revive_en_passant(game: &mut Game, target: Square) {
    let pushed_color = match target.rank() {
        Rank::Rank3 => Color::White,
        Rank::Rank6 => Color::Black,
        _ => return,
    };

    let Some(pawn_sq) = target.offset(0, pushed_color.forward()) else {
        return;
    };
    let Some(mut pawn) = game.board.piece_on(pawn_sq) else {
        return;
    };

    if pawn.kind == PieceKind::Pawn && pawn.color == pushed_color && pawn.move_count == 0 {
        pawn.move_count = 1;
        game.board.set_piece(pawn_sq, pawn);
        game.board.set_last_moved(Some(pawn_sq));
    }
}

impl FromStr for Game {
    type Err = FenError;

    fn from_str(fen: &str) -> Result<Game, FenError> {
        if fen.trim().is_empty() {
            return Err(FenError::Empty);
        }

        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() != 6 {
            return Err(FenError::WrongFieldCount {
                found: fields.len(),
            });
        }

        let board = parse_placement(fields[0])?;

        let side_to_move = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => {
                return Err(FenError::InvalidColor {
                    found: other.to_string(),
                })
            }
        };

        let castling = CastleRights::from_fen(fields[2])?;

        let en_passant = if fields[3] == "-" {
            None
        } else {
            Some(
                Square::from_algebraic(fields[3]).ok_or_else(|| FenError::InvalidEnPassant {
                    found: fields[3].to_string(),
                })?,
            )
        };

        let halfmove_clock =
            fields[4]
                .parse::<u32>()
                .map_err(|_| FenError::InvalidMoveCounter {
                    field: "halfmove clock",
                    found: fields[4].to_string(),
                })?;

        let fullmove_number =
            fields[5]
                .parse::<u32>()
                .map_err(|_| FenError::InvalidMoveCounter {
                    field: "fullmove number",
                    found: fields[5].to_string(),
                })?;

        let mut game = Game {
            board,
            move_history: Vec::new(),
            capture_history: Vec::new(),
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
            white_moves_first: side_to_move == Color::White,
        };

        if let Some(target) = en_passant {
            revive_en_passant(&mut game, target);
        }

        Ok(game)
    }
}

impl Game {
    /// Load a game from a FEN string.
    pub fn from_fen(fen: &str) -> Result<Game, FenError> {
        fen.parse()
    }

    /// Serialize the game as a six-field FEN string.
    pub fn fen(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Piece placement
        for rank_index in (0u8..8).rev() {
            let rank = Rank::from_index(rank_index).expect("rank index is 0..8");
            let mut empty_count = 0u8;

            for file_index in 0u8..8 {
                let file = File::from_index(file_index).expect("file index is 0..8");
                let sq = Square::new(rank, file);

                match self.board.piece_on(sq) {
                    Some(piece) => {
                        if empty_count > 0 {
                            write!(f, "{empty_count}")?;
                            empty_count = 0;
                        }
                        write!(f, "{}", piece.fen_char())?;
                    }
                    None => empty_count += 1,
                }
            }

            if empty_count > 0 {
                write!(f, "{empty_count}")?;
            }
            if rank_index > 0 {
                write!(f, "/")?;
            }
        }

        // Active color
        write!(f, " {}", self.current_side())?;

        // Castling availability ("-" when none remain)
        write!(f, " {}", self.castling)?;

        // En passant target
        match self.en_passant {
            Some(sq) => write!(f, " {sq}")?,
            None => write!(f, " -")?,
        }

        // Move counters
        write!(f, " {} {}", self.halfmove_clock, self.fullmove_number)
    }
}
