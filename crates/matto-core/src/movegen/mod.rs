//! Pseudo-legal move generation and king-safety filtering.
//!
//! The per-piece generators produce destination squares that obey movement
//! rules only. [`analyze`] assembles them for the side to move, adds the
//! castle landing squares after step-through attack checks, and then filters
//! every candidate through a speculative apply / attack-test / undo cycle so
//! no surviving move leaves the own king attacked.

mod attack;
mod king;
mod knights;
mod pawns;
mod sliders;

pub(crate) use attack::{attackers_of, is_attacked};

use crate::board::Board;
use crate::color::Color;
use crate::direction::Direction;
use crate::file::File;
use crate::moves::{Attacker, PotentialMoves};
use crate::piece_kind::PieceKind;
use crate::square::Square;

/// Pseudo-legal destinations for the piece on `origin`, or an empty list when
/// the square is empty.
pub(crate) fn pseudo_legal(board: &Board, origin: Square) -> Vec<Square> {
    let Some(piece) = board.piece_on(origin) else {
        return Vec::new();
    };

    match piece.kind {
        PieceKind::Pawn => pawns::destinations(board, origin, piece),
        PieceKind::Knight => knights::destinations(board, origin, piece.color),
        PieceKind::Bishop => {
            sliders::destinations(board, origin, piece.color, &Direction::DIAGONAL)
        }
        PieceKind::Rook => {
            sliders::destinations(board, origin, piece.color, &Direction::ORTHOGONAL)
        }
        PieceKind::Queen => sliders::destinations(board, origin, piece.color, &Direction::ALL),
        PieceKind::King => king::destinations(board, origin, piece.color),
    }
}

/// The outcome of a full legality pass for one side.
#[derive(Debug)]
pub(crate) struct Analysis {
    /// Legal moves, grouped by origin square.
    pub moves: Vec<PotentialMoves>,
    /// Every enemy piece currently attacking the side's king.
    pub king_attackers: Vec<Attacker>,
    /// The side's king square, if a king is on the board.
    pub king_square: Option<Square>,
}

/// Compute the legal moves for `side`, with castling and king-safety applied.
///
/// Needs `&mut Board` because legality is decided by speculative execution;
/// every simulation is paired with an undo before returning.
pub(crate) fn analyze(board: &mut Board, side: Color) -> Analysis {
    let mut moves = Vec::new();
    let mut king_square = None;

    for origin in board.occupied_squares(side) {
        if board
            .piece_on(origin)
            .is_some_and(|p| p.kind == PieceKind::King)
        {
            king_square = Some(origin);
        }

        let destinations = pseudo_legal(board, origin);
        if !destinations.is_empty() {
            moves.push(PotentialMoves {
                origin,
                destinations,
            });
        }
    }

    evaluate_castling(board, side, &mut moves);
    let moves = filter_king_attack(board, king_square, moves);

    let king_attackers = match king_square {
        Some(king) => attackers_of(board, king),
        None => Vec::new(),
    };

    Analysis {
        moves,
        king_attackers,
        king_square,
    }
}

/// Add the castle landing squares (c or g file) to the king's destinations
/// when every castling condition holds.
///
/// Requires: king on its home square with a zero move counter and not in
/// check; the matching rook unmoved; the squares between them empty; and both
/// the stepped-through square and the landing square unattacked, each checked
/// by simulating the king onto it.
fn evaluate_castling(board: &mut Board, side: Color, moves: &mut Vec<PotentialMoves>) {
    let back = side.back_rank();
    let king_sq = Square::new(back, File::FileE);

    let eligible = board
        .piece_on(king_sq)
        .is_some_and(|p| p.kind == PieceKind::King && p.is_unmoved());
    if !eligible || is_attacked(board, king_sq) {
        return;
    }

    // Queen side: rook on a, b/c/d empty, king steps e→d→c.
    evaluate_castling_side(
        board,
        king_sq,
        File::FileA,
        &[File::FileB, File::FileC, File::FileD],
        File::FileD,
        File::FileC,
        moves,
    );
    // King side: rook on h, f/g empty, king steps e→f→g.
    evaluate_castling_side(
        board,
        king_sq,
        File::FileH,
        &[File::FileF, File::FileG],
        File::FileF,
        File::FileG,
        moves,
    );
}

fn evaluate_castling_side(
    board: &mut Board,
    king_sq: Square,
    rook_file: File,
    between: &[File],
    through_file: File,
    landing_file: File,
    moves: &mut [PotentialMoves],
) {
    let back = king_sq.rank();

    let rook_ok = board
        .piece_on(Square::new(back, rook_file))
        .is_some_and(|p| p.kind == PieceKind::Rook && p.is_unmoved());
    if !rook_ok {
        return;
    }

    if between
        .iter()
        .any(|&file| board.is_occupied(Square::new(back, file)))
    {
        return;
    }

    let through = Square::new(back, through_file);
    let landing = Square::new(back, landing_file);
    if !castle_path_safe(board, king_sq, through, landing) {
        return;
    }

    if let Some(entry) = moves.iter_mut().find(|pm| pm.origin == king_sq) {
        entry.destinations.push(landing);
    }
}

/// Simulate the king onto the stepped-through square, then onto the landing
/// square, testing each for attack. Both must be safe.
fn castle_path_safe(board: &mut Board, king_sq: Square, through: Square, landing: Square) -> bool {
    for target in [through, landing] {
        let Ok(mut record) = board.apply_move(king_sq, target, true, "") else {
            return false;
        };
        let safe = !is_attacked(board, target);
        board.undo(&mut record);
        if !safe {
            return false;
        }
    }
    true
}

/// Keep only the destinations that do not leave the own king attacked,
/// decided by simulating each candidate.
///
/// For a king move the attack test uses the destination square, since the
/// king's own square changes. Candidates the board rejects mid-simulation are
/// skipped silently: the filter must stay resilient to intermediate states.
fn filter_king_attack(
    board: &mut Board,
    king_square: Option<Square>,
    moves: Vec<PotentialMoves>,
) -> Vec<PotentialMoves> {
    let mut filtered = Vec::with_capacity(moves.len());

    for pm in moves {
        let mut kept = Vec::new();

        for &dest in &pm.destinations {
            let Ok(mut record) = board.apply_move(pm.origin, dest, true, "") else {
                continue;
            };

            let exposes_king = if record.piece.kind == PieceKind::King {
                is_attacked(board, dest)
            } else {
                king_square.is_some_and(|king| is_attacked(board, king))
            };

            board.undo(&mut record);

            if !exposes_king {
                kept.push(dest);
            }
        }

        if !kept.is_empty() {
            filtered.push(PotentialMoves {
                origin: pm.origin,
                destinations: kept,
            });
        }
    }

    filtered
}

#[cfg(test)]
mod tests {
    use super::analyze;
    use crate::board::Board;
    use crate::color::Color;
    use crate::piece::Piece;
    use crate::piece_kind::PieceKind;
    use crate::square::Square;

    fn move_count(board: &mut Board, side: Color) -> usize {
        analyze(board, side)
            .moves
            .iter()
            .map(|pm| pm.destinations.len())
            .sum()
    }

    fn destinations_from(board: &mut Board, side: Color, origin: Square) -> Vec<Square> {
        analyze(board, side)
            .moves
            .into_iter()
            .find(|pm| pm.origin == origin)
            .map(|pm| pm.destinations)
            .unwrap_or_default()
    }

    #[test]
    fn starting_position_has_twenty_moves() {
        let mut board = Board::starting_position();
        assert_eq!(move_count(&mut board, Color::White), 20);
        assert_eq!(move_count(&mut board, Color::Black), 20);
    }

    #[test]
    fn analysis_leaves_board_unchanged() {
        let mut board = Board::starting_position();
        let before = board.clone();
        analyze(&mut board, Color::White);
        assert_eq!(board, before, "every simulation must be undone");
    }

    #[test]
    fn pinned_piece_cannot_move() {
        let mut board = Board::empty();
        board.set_piece(Square::E1, Piece::new(PieceKind::King, Color::White));
        board.set_piece(Square::E4, Piece::new(PieceKind::Knight, Color::White));
        board.set_piece(Square::E8, Piece::new(PieceKind::Rook, Color::Black));

        let knight_moves = destinations_from(&mut board, Color::White, Square::E4);
        assert!(knight_moves.is_empty(), "a pinned knight has no legal moves");
    }

    #[test]
    fn king_cannot_step_into_attack() {
        let mut board = Board::empty();
        board.set_piece(Square::E1, Piece::new(PieceKind::King, Color::White));
        board.set_piece(Square::D8, Piece::new(PieceKind::Rook, Color::Black));

        let king_moves = destinations_from(&mut board, Color::White, Square::E1);
        assert!(!king_moves.contains(&Square::D1));
        assert!(!king_moves.contains(&Square::D2));
        assert!(king_moves.contains(&Square::E2));
        assert!(king_moves.contains(&Square::F1));
    }

    #[test]
    fn in_check_only_resolving_moves_survive() {
        let mut board = Board::empty();
        board.set_piece(Square::E1, Piece::new(PieceKind::King, Color::White));
        board.set_piece(Square::E8, Piece::new(PieceKind::Rook, Color::Black));
        board.set_piece(Square::A4, Piece::new(PieceKind::Rook, Color::White));

        let analysis = analyze(&mut board, Color::White);
        assert_eq!(analysis.king_attackers.len(), 1);

        // The white rook can block on e4 or stay useless; only the block survives.
        let rook_moves = analysis
            .moves
            .iter()
            .find(|pm| pm.origin == Square::A4)
            .map(|pm| pm.destinations.clone())
            .unwrap_or_default();
        assert_eq!(rook_moves, vec![Square::E4]);
    }

    #[test]
    fn kingside_castle_generated_when_path_clear() {
        let mut board = Board::starting_position();
        board.take_piece(Square::F1);
        board.take_piece(Square::G1);

        let king_moves = destinations_from(&mut board, Color::White, Square::E1);
        assert!(king_moves.contains(&Square::G1));
    }

    #[test]
    fn queenside_castle_generated_when_path_clear() {
        let mut board = Board::starting_position();
        board.take_piece(Square::B8);
        board.take_piece(Square::C8);
        board.take_piece(Square::D8);

        let king_moves = destinations_from(&mut board, Color::Black, Square::E8);
        assert!(king_moves.contains(&Square::C8));
    }

    #[test]
    fn castle_blocked_by_step_through_attack() {
        // Kingside path is clear but f1 is attacked by a bishop on a6.
        let mut board = Board::empty();
        board.set_piece(Square::E1, Piece::new(PieceKind::King, Color::White));
        board.set_piece(Square::H1, Piece::new(PieceKind::Rook, Color::White));
        board.set_piece(Square::A6, Piece::new(PieceKind::Bishop, Color::Black));
        board.set_piece(Square::E8, Piece::new(PieceKind::King, Color::Black));

        let king_moves = destinations_from(&mut board, Color::White, Square::E1);
        assert!(
            !king_moves.contains(&Square::G1),
            "castling through an attacked square must be rejected"
        );
        // The bishop also covers e2, but the king's other steps survive.
        assert!(!king_moves.contains(&Square::E2));
        assert!(king_moves.contains(&Square::F2));
        assert!(king_moves.contains(&Square::D1));
    }

    #[test]
    fn castle_blocked_when_king_in_check() {
        let mut board = Board::empty();
        board.set_piece(Square::E1, Piece::new(PieceKind::King, Color::White));
        board.set_piece(Square::H1, Piece::new(PieceKind::Rook, Color::White));
        board.set_piece(Square::E8, Piece::new(PieceKind::Rook, Color::Black));

        let king_moves = destinations_from(&mut board, Color::White, Square::E1);
        assert!(!king_moves.contains(&Square::G1));
    }

    #[test]
    fn castle_blocked_after_king_has_moved() {
        let mut board = Board::starting_position();
        board.take_piece(Square::F1);
        board.take_piece(Square::G1);
        let mut king = board.take_piece(Square::E1).unwrap();
        king.move_count = 2;
        board.set_piece(Square::E1, king);

        let king_moves = destinations_from(&mut board, Color::White, Square::E1);
        assert!(!king_moves.contains(&Square::G1));
    }

    #[test]
    fn castle_blocked_after_rook_has_moved() {
        let mut board = Board::starting_position();
        board.take_piece(Square::F1);
        board.take_piece(Square::G1);
        let mut rook = board.take_piece(Square::H1).unwrap();
        rook.move_count = 2;
        board.set_piece(Square::H1, rook);

        let king_moves = destinations_from(&mut board, Color::White, Square::E1);
        assert!(!king_moves.contains(&Square::G1));
    }

    #[test]
    fn checkmate_position_has_no_moves() {
        // Back-rank mate: king h1, enemy rook a1, own pawns g2/h2.
        let mut board = Board::empty();
        board.set_piece(Square::H1, Piece::new(PieceKind::King, Color::White));
        board.set_piece(Square::G2, Piece::new(PieceKind::Pawn, Color::White));
        board.set_piece(Square::H2, Piece::new(PieceKind::Pawn, Color::White));
        board.set_piece(Square::A1, Piece::new(PieceKind::Rook, Color::Black));
        board.set_piece(Square::A8, Piece::new(PieceKind::King, Color::Black));

        let analysis = analyze(&mut board, Color::White);
        assert!(analysis.moves.is_empty());
        assert_eq!(analysis.king_attackers.len(), 1);
    }

    #[test]
    fn stalemate_position_has_no_moves_and_no_attackers() {
        // Classic stalemate: black king a8, white queen c7, white king c8... is
        // illegal (adjacent kings); use king b6 + queen c7 against king a8.
        let mut board = Board::empty();
        board.set_piece(Square::A8, Piece::new(PieceKind::King, Color::Black));
        board.set_piece(Square::B6, Piece::new(PieceKind::King, Color::White));
        board.set_piece(Square::C7, Piece::new(PieceKind::Queen, Color::White));

        let analysis = analyze(&mut board, Color::Black);
        assert!(analysis.moves.is_empty());
        assert!(analysis.king_attackers.is_empty());
    }
}
