//! Error types for FEN loading and move application.

use std::fmt;

use crate::square::Square;

/// Errors that occur when loading a game from a FEN string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    /// Nothing but whitespace was supplied.
    Empty,
    /// The string did not split into the six FEN fields.
    WrongFieldCount {
        /// How many fields the input actually had.
        found: usize,
    },
    /// The placement field did not hold eight `/`-separated ranks.
    WrongRankCount {
        /// How many ranks the placement actually had.
        found: usize,
    },
    /// A placement rank added up to something other than eight squares.
    BadRankRow {
        /// Which rank overflowed or came up short, counted from the top of
        /// the string (0 = rank 8).
        rank_index: usize,
        /// How many squares that rank accounted for.
        length: usize,
    },
    /// The placement field held a character that is neither a piece letter
    /// nor an empty-run digit.
    InvalidPieceChar {
        /// The offending character.
        character: char,
    },
    /// The active color field was something other than `w` or `b`.
    InvalidColor {
        /// What the field contained instead.
        found: String,
    },
    /// The castling field held a character outside `KQkq`.
    InvalidCastlingChar {
        /// The offending character.
        character: char,
    },
    /// The en passant field was neither `-` nor a square name.
    InvalidEnPassant {
        /// What the field contained instead.
        found: String,
    },
    /// One of the two clock fields failed to parse as a number.
    InvalidMoveCounter {
        /// Which clock ("halfmove clock" or "fullmove number").
        field: &'static str,
        /// What the field contained instead.
        found: String,
    },
}

impl fmt::Display for FenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FenError::Empty => {
                write!(f, "FEN string is empty")
            }
            FenError::WrongFieldCount { found } => {
                write!(f, "FEN needs 6 fields but has {found}")
            }
            FenError::WrongRankCount { found } => {
                write!(f, "FEN piece placement needs 8 ranks but has {found}")
            }
            FenError::BadRankRow { rank_index, length } => {
                write!(f, "FEN rank {rank_index} covers {length} squares instead of 8")
            }
            FenError::InvalidPieceChar { character } => {
                write!(f, "unknown piece character '{character}' in FEN placement")
            }
            FenError::InvalidColor { found } => {
                write!(f, "active color must be \"w\" or \"b\", got \"{found}\"")
            }
            FenError::InvalidCastlingChar { character } => {
                write!(f, "unknown castling flag '{character}'")
            }
            FenError::InvalidEnPassant { found } => {
                write!(f, "en passant target \"{found}\" is not a square")
            }
            FenError::InvalidMoveCounter { field, found } => {
                write!(f, "{field} \"{found}\" is not a number")
            }
        }
    }
}

impl std::error::Error for FenError {}

/// Errors from applying a move or a promotion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    /// The notation string was empty.
    #[error("notation is invalid")]
    EmptyNotation,
    /// The notation did not resolve to any legal move.
    #[error("notation is invalid ({notation})")]
    InvalidNotation {
        /// The offending input, after sanitization.
        notation: String,
    },
    /// A move was requested from a square with no piece on it.
    #[error("no piece on source square {square}")]
    NoPieceOnSource {
        /// The empty source square.
        square: Square,
    },
    /// A promotion was requested on a square with no piece on it.
    #[error("no piece to promote on {square}")]
    NoPieceToPromote {
        /// The empty promotion square.
        square: Square,
    },
}

/// Errors from replaying a (source, destination) move against a FEN string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApplyError {
    /// The FEN string did not parse.
    #[error(transparent)]
    Fen(#[from] FenError),
    /// The move failed to apply.
    #[error(transparent)]
    Move(#[from] MoveError),
    /// The move is not legal in the position the FEN describes.
    #[error("move from {from} to {to} is not valid for the given FEN")]
    NotLegal {
        /// The requested source square.
        from: Square,
        /// The requested destination square.
        to: Square,
    },
}
