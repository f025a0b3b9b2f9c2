//! Standard Algebraic Notation: rendering the legal-move table and parsing
//! player input back into it.
//!
//! Rendering produces one disambiguated key per legal move (four for a
//! promotion). Parsing sanitizes the input, tries a direct table lookup, and
//! falls back to a reduced piece-plus-destination form or a verbose
//! source-destination form.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::board::Board;
use crate::file::File;
use crate::moves::{NotationMove, PotentialMoves};
use crate::piece_kind::PieceKind;
use crate::square::Square;

/// Shape of notation eligible for the fuzzy fallback.
static NOTATION_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[BKQNR]?[a-h]?[1-8]?[x-]?[a-h][1-8][+#]?$").expect("notation shape regex")
});

/// Shape of a pawn capture like `exd5`.
static PAWN_CAPTURE_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-h]x[a-h][1-8]$").expect("pawn capture regex"));

/// Strip annotations and normalize castling glyphs for the active mode.
pub(crate) fn sanitize(notation: &str, pgn: bool) -> String {
    let clean: String = notation
        .chars()
        .filter(|c| !matches!(c, '!' | '+' | '#' | '=' | '\\'))
        .collect();

    if pgn {
        clean.replace('0', "O")
    } else {
        clean.replace('O', "0")
    }
}

/// Extract a trailing promotion letter, if present.
pub(crate) fn promotion_choice(notation: &str) -> Option<PieceKind> {
    match notation.chars().last()? {
        c @ ('B' | 'N' | 'Q' | 'R') => PieceKind::from_san_letter(c),
        _ => None,
    }
}

/// Whether the input qualifies for the fuzzy piece-plus-destination retry.
pub(crate) fn matches_notation_shape(notation: &str) -> bool {
    NOTATION_SHAPE.is_match(notation)
}

/// Reduce a notation string to its destination square, keeping the piece
/// letter when one is present. Returns an empty string when no reduction
/// exists.
pub(crate) fn reduce_notation(notation: &str) -> String {
    if notation.len() < 2 || !notation.is_ascii() {
        return String::new();
    }

    let dest = &notation[notation.len() - 2..];
    if notation.len() > 2 && PAWN_CAPTURE_SHAPE.is_match(notation) {
        return dest.to_string();
    }
    if notation.len() > 2 {
        return format!("{}{}", &notation[..1], dest);
    }

    String::new()
}

/// Resolve a verbose source-destination form like `Nb1c3` or `e2e4` against
/// the table. The piece letter is optional; with several matching keys the
/// lexicographically first wins, keeping the lookup deterministic.
pub(crate) fn verbose_lookup(
    notation: &str,
    table: &HashMap<String, NotationMove>,
) -> Option<String> {
    let chars: Vec<char> = notation.chars().collect();
    if chars.len() < 4 {
        return None;
    }

    let (letter, squares_at) = match PieceKind::from_san_letter(chars[0]) {
        Some(kind) => (kind.san_letter(), 1),
        None => ("", 0),
    };
    if chars.len() - squares_at != 4 {
        return None;
    }

    let from_name: String = chars[squares_at..squares_at + 2].iter().collect();
    let to_name: String = chars[squares_at + 2..squares_at + 4].iter().collect();
    let from = Square::from_algebraic(&from_name)?;
    let to = Square::from_algebraic(&to_name)?;

    let mut candidates: Vec<&String> = table
        .iter()
        .filter(|(key, nm)| nm.from == from && nm.to == to && key.starts_with(letter))
        .map(|(key, _)| key)
        .collect();
    candidates.sort();
    candidates.first().map(|key| (*key).to_string())
}

/// Render every legal move to its SAN key.
pub(crate) fn notate(
    moves: &[PotentialMoves],
    board: &Board,
    pgn: bool,
) -> HashMap<String, NotationMove> {
    let mut table = HashMap::new();

    for pm in moves {
        let Some(piece) = board.piece_on(pm.origin) else {
            continue;
        };

        for &dest in &pm.destinations {
            let occupant = board.piece_on(dest);
            let mut prefix = String::new();
            let mut suffix = String::new();

            if occupant.is_some() {
                suffix.push('x');
            }
            suffix.push_str(&dest.to_string());

            let is_promotion = piece.kind == PieceKind::Pawn && dest.rank().is_promotion_rank();

            match piece.kind {
                PieceKind::Pawn => {
                    if occupant.is_some() {
                        // Pawn captures carry the source file: exd5.
                        prefix.push(pm.origin.file().letter());
                    } else if pm.origin.file() != dest.file() {
                        // En passant: the destination is empty but the file
                        // changes, so the capture mark moves into the prefix.
                        prefix.push(pm.origin.file().letter());
                        prefix.push('x');
                    }
                }
                PieceKind::Knight | PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => {
                    let same_kind: Vec<&PotentialMoves> = moves
                        .iter()
                        .filter(|other| {
                            board
                                .piece_on(other.origin)
                                .is_some_and(|p| p.kind == piece.kind)
                        })
                        .collect();

                    prefix = if same_kind.len() > 1 {
                        disambiguation_prefix(pm.origin, dest, &same_kind, piece.kind)
                    } else {
                        piece.san_letter().to_string()
                    };
                }
                PieceKind::King => {
                    prefix = piece.san_letter().to_string();
                    if pm.origin.file() == File::FileE && dest.file() == File::FileG {
                        prefix = castle_glyph(pgn, false);
                        suffix.clear();
                    } else if pm.origin.file() == File::FileE && dest.file() == File::FileC {
                        prefix = castle_glyph(pgn, true);
                        suffix.clear();
                    }
                }
            }

            let entry = NotationMove {
                from: pm.origin,
                to: dest,
            };

            if is_promotion {
                // The bare destination is never emitted; the move must name
                // its promotion piece.
                for promo in ["R", "N", "B", "Q"] {
                    table.insert(format!("{prefix}{suffix}{promo}"), entry);
                }
            } else {
                table.insert(format!("{prefix}{suffix}"), entry);
            }
        }
    }

    table
}

fn castle_glyph(pgn: bool, queen_side: bool) -> String {
    match (pgn, queen_side) {
        (true, false) => "O-O".to_string(),
        (true, true) => "O-O-O".to_string(),
        (false, false) => "0-0".to_string(),
        (false, true) => "0-0-0".to_string(),
    }
}

/// Build the minimal prefix that uniquely names a move among same-kind
/// pieces: the file letter when origins span several files, plus the rank
/// digit only when ranks distinguish more than files do.
fn disambiguation_prefix(
    src: Square,
    dest: Square,
    same_kind: &[&PotentialMoves],
    kind: PieceKind,
) -> String {
    let mut prefix = kind.san_letter().to_string();

    let mut files = HashSet::new();
    let mut ranks = HashSet::new();
    for pm in same_kind {
        if pm.destinations.contains(&dest) {
            files.insert(pm.origin.file());
            ranks.insert(pm.origin.rank());
        }
    }

    if files.len() > 1 {
        prefix.push(src.file().letter());
    }
    if ranks.len() > files.len() {
        prefix.push(src.rank().digit());
    }

    prefix
}
