//! Check, checkmate, stalemate, and repetition evaluation.

use std::collections::HashMap;

use crate::game::Game;
use crate::movegen;
use crate::moves::{Attacker, PotentialMoves};
use crate::square::Square;

/// The outcome of a validation pass for the side to move.
#[derive(Debug)]
pub(crate) struct ValidationReport {
    /// King attacked with at least one legal reply.
    pub is_check: bool,
    /// King attacked with no legal reply.
    pub is_checkmate: bool,
    /// King safe but no legal reply exists.
    pub is_stalemate: bool,
    /// Some position has occurred three times across history.
    pub is_repetition: bool,
    /// The legal move table, grouped by origin.
    pub moves: Vec<PotentialMoves>,
    /// Every attacker of the side's king.
    pub king_attackers: Vec<Attacker>,
    /// The side's king square, if on the board.
    pub king_square: Option<Square>,
}

/// Recompute legal moves and game-end flags for the side to move.
pub(crate) fn validate(game: &mut Game) -> ValidationReport {
    let side = game.current_side();
    let analysis = movegen::analyze(game.board_mut(), side);

    let attacked = !analysis.king_attackers.is_empty();
    let has_moves = !analysis.moves.is_empty();

    ValidationReport {
        is_check: attacked && has_moves,
        is_checkmate: attacked && !has_moves,
        is_stalemate: !attacked && !has_moves,
        is_repetition: is_repetition(game),
        moves: analysis.moves,
        king_attackers: analysis.king_attackers,
        king_square: analysis.king_square,
    }
}

/// Threefold repetition: the same position hash three times in history.
fn is_repetition(game: &Game) -> bool {
    let mut counts: HashMap<u64, u32> = HashMap::new();
    for record in game.move_history() {
        let count = counts.entry(record.hash).or_insert(0);
        *count += 1;
        if *count == 3 {
            return true;
        }
    }
    false
}
