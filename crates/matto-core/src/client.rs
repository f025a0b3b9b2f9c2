//! The algebraic game client: SAN in, game state and events out.

use std::collections::HashMap;

use crate::error::{ApplyError, FenError, MoveError};
use crate::events::{Dispatcher, Event, KingThreat};
use crate::game::Game;
use crate::moves::{MoveRecord, NotationMove, PotentialMoves};
use crate::piece::Piece;
use crate::san;
use crate::status;

/// Client configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClientOptions {
    /// Render and accept castling in PGN style (`O-O`) instead of numeric
    /// (`0-0`).
    pub pgn: bool,
}

/// A point-in-time view of the game returned by [`GameClient::status`].
#[derive(Debug)]
pub struct GameStatus<'a> {
    /// True when the side to move is in check and has a reply.
    pub is_check: bool,
    /// True when the side to move is checkmated.
    pub is_checkmate: bool,
    /// True when the side to move has no move but is not in check.
    pub is_stalemate: bool,
    /// True when some position has occurred three times.
    pub is_repetition: bool,
    /// The legal-move table, keyed by SAN.
    pub notated_moves: &'a HashMap<String, NotationMove>,
    /// The underlying game.
    pub game: &'a Game,
}

/// Drives a [`Game`] through Standard Algebraic Notation.
///
/// After every committed move the client recomputes the legal-move table, the
/// check / checkmate / stalemate / repetition flags, and the SAN keys, then
/// publishes the move's events to subscribed listeners.
pub struct GameClient {
    game: Game,
    options: ClientOptions,
    dispatcher: Dispatcher,
    is_check: bool,
    is_checkmate: bool,
    is_stalemate: bool,
    is_repetition: bool,
    valid_moves: Vec<PotentialMoves>,
    notated_moves: HashMap<String, NotationMove>,
}

impl GameClient {
    /// Create a client for a fresh game with default options.
    pub fn new() -> GameClient {
        GameClient::with_options(ClientOptions::default())
    }

    /// Create a client for a fresh game.
    pub fn with_options(options: ClientOptions) -> GameClient {
        let mut client = GameClient {
            game: Game::new(),
            options,
            dispatcher: Dispatcher::new(),
            is_check: false,
            is_checkmate: false,
            is_stalemate: false,
            is_repetition: false,
            valid_moves: Vec::new(),
            notated_moves: HashMap::new(),
        };
        client.update();
        client
    }

    /// Create a client from a FEN string with default options.
    pub fn from_fen(fen: &str) -> Result<GameClient, FenError> {
        GameClient::from_fen_with_options(fen, ClientOptions::default())
    }

    /// Create a client from a FEN string.
    pub fn from_fen_with_options(
        fen: &str,
        options: ClientOptions,
    ) -> Result<GameClient, FenError> {
        let game = Game::from_fen(fen)?;
        let mut client = GameClient {
            game,
            options,
            dispatcher: Dispatcher::new(),
            is_check: false,
            is_checkmate: false,
            is_stalemate: false,
            is_repetition: false,
            valid_moves: Vec::new(),
            notated_moves: HashMap::new(),
        };
        client.update();
        Ok(client)
    }

    /// The underlying game.
    #[inline]
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Serialize the current position as FEN.
    pub fn fen(&self) -> String {
        self.game.fen()
    }

    /// Register a handler for a named event: `move`, `capture`, `castle`,
    /// `enPassant`, `promote`, `undo`, `check`, or `checkmate`.
    pub fn on<F>(&mut self, event: &str, handler: F)
    where
        F: FnMut(&Event) + 'static,
    {
        self.dispatcher.on(event, handler);
    }

    /// The current status and legal-move table.
    pub fn status(&self) -> GameStatus<'_> {
        GameStatus {
            is_check: self.is_check,
            is_checkmate: self.is_checkmate,
            is_stalemate: self.is_stalemate,
            is_repetition: self.is_repetition,
            notated_moves: &self.notated_moves,
            game: &self.game,
        }
    }

    /// Recompute the status before returning it.
    pub fn status_forced(&mut self) -> GameStatus<'_> {
        self.update();
        self.status()
    }

    /// Apply a SAN move. A failed move leaves the game untouched.
    pub fn play(&mut self, notation: &str) -> Result<MoveRecord, MoveError> {
        self.play_inner(notation, false)
    }

    /// Undo the most recent committed move, firing `undo` and refreshing the
    /// legal-move table. Returns `None` when there is nothing to undo.
    pub fn undo_last(&mut self) -> Option<MoveRecord> {
        let (record, event) = self.game.undo_last()?;
        self.dispatcher.emit(&event);
        self.update();
        Some(record)
    }

    fn play_inner(&mut self, notation: &str, fuzzy: bool) -> Result<MoveRecord, MoveError> {
        if notation.is_empty() {
            return Err(MoveError::EmptyNotation);
        }

        let sanitized = san::sanitize(notation, self.options.pgn);
        let promotion = san::promotion_choice(&sanitized);

        if let Some(nm) = self.notated_moves.get(&sanitized).copied() {
            let (mut record, mut events) = self.game.play(nm.from, nm.to, &sanitized)?;

            if let Some(kind) = promotion {
                let replacement = Piece::new(kind, record.piece.color);
                let (_, promote_event) = self.game.promote(record.to, replacement)?;
                record.promotion = true;
                events.push(promote_event);
            }

            for event in &events {
                self.dispatcher.emit(event);
            }
            self.update();
            return Ok(record);
        }

        // Verbose fallback: `Nb1c3` or `e2e4` style source-destination input.
        // Tried first, since those strings also match the fuzzy shape but
        // reduce to nonsense.
        if let Some(key) = san::verbose_lookup(&sanitized, &self.notated_moves) {
            return self.play_inner(&key, true);
        }

        // Fuzzy fallback: strip to piece letter plus destination and retry
        // once.
        if !fuzzy && sanitized.len() > 1 && san::matches_notation_shape(&sanitized) {
            return self.play_inner(&san::reduce_notation(&sanitized), true);
        }

        Err(MoveError::InvalidNotation {
            notation: sanitized,
        })
    }

    /// Recompute legal moves, flags, and SAN keys; fire `check` / `checkmate`
    /// for each attacker of the side to move's king.
    fn update(&mut self) {
        let report = status::validate(&mut self.game);

        self.is_check = report.is_check;
        self.is_checkmate = report.is_checkmate;
        self.is_stalemate = report.is_stalemate;
        self.is_repetition = report.is_repetition;
        self.notated_moves = san::notate(&report.moves, self.game.board(), self.options.pgn);
        self.valid_moves = report.moves;

        if let Some(king_square) = report.king_square {
            for attacker in &report.king_attackers {
                let threat = KingThreat {
                    attacking_square: attacker.square,
                    king_square,
                };
                let event = if self.valid_moves.is_empty() {
                    Event::Checkmate(threat)
                } else {
                    Event::Check(threat)
                };
                self.dispatcher.emit(&event);
            }
        }
    }
}

impl Default for GameClient {
    fn default() -> GameClient {
        GameClient::new()
    }
}

impl NotationMove {
    /// Apply this (source, destination) move to a position given as FEN and
    /// return the resulting FEN.
    ///
    /// The move is resolved through a freshly loaded client's legal-move
    /// table, so it is rejected unless it is legal in that position.
    pub fn apply_to_fen(&self, fen: &str) -> Result<String, ApplyError> {
        let mut client = GameClient::from_fen(fen)?;

        let mut candidates: Vec<&String> = client
            .status()
            .notated_moves
            .iter()
            .filter(|(_, nm)| nm.from == self.from && nm.to == self.to)
            .map(|(key, _)| key)
            .collect();
        candidates.sort();
        let key = candidates
            .first()
            .map(|key| (*key).to_string())
            .ok_or(ApplyError::NotLegal {
                from: self.from,
                to: self.to,
            })?;

        client.play(&key)?;
        Ok(client.fen())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::{ClientOptions, GameClient};
    use crate::color::Color;
    use crate::error::MoveError;
    use crate::moves::NotationMove;
    use crate::piece_kind::PieceKind;
    use crate::square::Square;

    fn play_all(client: &mut GameClient, moves: &[&str]) {
        for san in moves {
            client.play(san).unwrap_or_else(|err| {
                panic!("move {san} failed: {err}");
            });
        }
    }

    #[test]
    fn opening_move_scenario() {
        let mut client = GameClient::new();
        assert_eq!(client.status().notated_moves.len(), 20);

        client.play("e4").unwrap();
        assert_eq!(
            client.fen(),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
        );
    }

    #[test]
    fn en_passant_scenario() {
        let mut client = GameClient::new();
        let fired = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&fired);
        client.on("enPassant", move |_| *sink.borrow_mut() += 1);

        play_all(&mut client, &["e4", "d5", "e5", "f5"]);

        let status = client.status();
        assert!(status.notated_moves.contains_key("exf6"));
        assert!(!status.notated_moves.contains_key("f6"));

        let record = client.play("exf6").unwrap();
        assert!(record.en_passant);
        assert_eq!(record.en_passant_square, Some(Square::F5));
        assert_eq!(client.game().board().piece_on(Square::F5), None);
        assert_eq!(
            client
                .game()
                .board()
                .piece_on(Square::F6)
                .map(|p| (p.kind, p.color)),
            Some((PieceKind::Pawn, Color::White))
        );
        assert_eq!(*fired.borrow(), 1);
    }

    #[test]
    fn promotion_to_checkmate_scenario() {
        // White pawn on a7; a8 through d8 cleared so the promoted rook mates
        // along the back rank.
        let mut client =
            GameClient::from_fen("4kbnr/Pppppppp/8/8/8/8/1PPPPPPP/RNBQKBNR w KQk - 0 1").unwrap();

        {
            let status = client.status();
            assert!(!status.notated_moves.contains_key("a8"));
            for key in ["a8R", "a8N", "a8B", "a8Q"] {
                assert!(status.notated_moves.contains_key(key), "missing {key}");
            }
        }

        let record = client.play("a8R").unwrap();
        assert!(record.promotion);
        assert_eq!(
            client.game().board().piece_on(Square::A8).map(|p| p.kind),
            Some(PieceKind::Rook)
        );
        assert!(client.status().is_checkmate);
        assert!(client.game().move_history()[0].promotion);
    }

    #[test]
    fn knight_disambiguation_scenario() {
        let mut client = GameClient::new();
        play_all(&mut client, &["Nc3", "Nf6", "Nd5", "Ng8", "Nf4", "Nf6"]);

        let status = client.status();
        assert!(status.notated_moves.contains_key("Nfh3"));
        assert!(status.notated_moves.contains_key("Ngh3"));
        assert!(!status.notated_moves.contains_key("Nh3"));
    }

    #[test]
    fn ambiguous_input_fails_without_state_change() {
        let mut client = GameClient::new();
        play_all(&mut client, &["Nc3", "Nf6", "Nd5", "Ng8", "Nf4", "Nf6"]);

        let fen_before = client.fen();
        let err = client.play("Nh3").unwrap_err();
        assert!(matches!(err, MoveError::InvalidNotation { .. }));
        assert_eq!(client.fen(), fen_before);
    }

    #[test]
    fn castle_blocked_by_step_through_scenario() {
        // White could castle kingside, but the bishop on a6 covers f1.
        let client =
            GameClient::from_fen("4k3/8/b7/8/8/8/8/4K2R w K - 0 1").unwrap();

        let status = client.status();
        assert!(!status.notated_moves.contains_key("0-0"));
        assert!(status.notated_moves.contains_key("Kd1"));
        assert!(status.notated_moves.contains_key("Rg1"));
    }

    #[test]
    fn castle_play_and_events() {
        let mut client =
            GameClient::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let fired = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&fired);
        client.on("castle", move |_| *sink.borrow_mut() += 1);

        let record = client.play("0-0").unwrap();
        assert!(record.castle);
        assert_eq!(record.rook_from, Some(Square::H1));
        assert_eq!(record.rook_to, Some(Square::F1));
        assert_eq!(*fired.borrow(), 1);

        // Black castles queenside in reply.
        client.play("0-0-0").unwrap();
        assert_eq!(
            client.game().board().piece_on(Square::C8).map(|p| p.kind),
            Some(PieceKind::King)
        );
        assert_eq!(*fired.borrow(), 2);
    }

    #[test]
    fn undo_after_capture_scenario() {
        let mut client = GameClient::new();
        play_all(&mut client, &["e4", "d5"]);
        let fen_before_capture = client.fen();

        client.play("exd5").unwrap();
        let record = client.undo_last().unwrap();
        assert_eq!(record.san, "exd5");

        assert_eq!(client.fen(), fen_before_capture.replace(" d6 ", " - "));
        assert!(client.game().capture_history().is_empty());
        assert_eq!(client.game().board().last_moved(), Some(Square::D5));
        assert_eq!(
            client
                .game()
                .board()
                .piece_on(Square::D5)
                .map(|p| p.color),
            Some(Color::Black)
        );
    }

    #[test]
    fn san_keys_round_trip_through_play() {
        let mut client = GameClient::new();
        let keys: Vec<(String, NotationMove)> = client
            .status()
            .notated_moves
            .iter()
            .map(|(k, nm)| (k.clone(), *nm))
            .collect();

        for (key, expected) in keys {
            let record = client.play(&key).unwrap();
            assert_eq!(record.from, expected.from, "key {key}");
            assert_eq!(record.to, expected.to, "key {key}");
            client.undo_last().unwrap();
        }
    }

    #[test]
    fn opposing_side_has_no_keys() {
        let mut client = GameClient::new();
        client.play("e4").unwrap();

        // Black to move: every key resolves to a black piece.
        let status = client.status();
        for (key, nm) in status.notated_moves {
            let piece = status.game.board().piece_on(nm.from).unwrap();
            assert_eq!(piece.color, Color::Black, "key {key} belongs to white");
        }
    }

    #[test]
    fn fuzzy_input_reduces_to_destination() {
        let mut client = GameClient::new();
        // "Ng1f3" is not a table key, but the verbose fallback resolves it.
        let record = client.play("Ng1f3").unwrap();
        assert_eq!(record.from, Square::G1);
        assert_eq!(record.to, Square::F3);

        // "Ngf6" is over-disambiguated; the fuzzy reduction finds Nf6.
        let record = client.play("Ngf6").unwrap();
        assert_eq!(record.from, Square::G8);
        assert_eq!(record.to, Square::F6);

        // Bare source-destination works for pawns too.
        let record = client.play("d2d4").unwrap();
        assert_eq!(record.from, Square::D2);
        assert_eq!(record.to, Square::D4);
    }

    #[test]
    fn annotations_are_stripped() {
        let mut client = GameClient::new();
        client.play("e4!").unwrap();
        client.play("e5+").unwrap();
        client.play("Nf3#").unwrap();
        assert_eq!(client.game().move_history().len(), 3);
    }

    #[test]
    fn pgn_mode_castling() {
        let mut client = GameClient::from_fen_with_options(
            "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1",
            ClientOptions { pgn: true },
        )
        .unwrap();

        assert!(client.status().notated_moves.contains_key("O-O"));
        // Numeric glyphs are normalized into PGN mode on input.
        client.play("0-0-0").unwrap();
        assert_eq!(
            client.game().board().piece_on(Square::C1).map(|p| p.kind),
            Some(PieceKind::King)
        );
    }

    #[test]
    fn check_and_checkmate_events_fire() {
        let mut client = GameClient::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&seen);
        client.on("check", move |ev| sink.borrow_mut().push(ev.name()));
        let sink = Rc::clone(&seen);
        client.on("checkmate", move |ev| sink.borrow_mut().push(ev.name()));

        play_all(&mut client, &["e4", "e5", "Qh5", "Nc6", "Qxf7"]);
        // Qxf7 is checkmate? No: the king can capture the undefended queen.
        // It is check.
        assert_eq!(*seen.borrow(), vec!["check"]);
        assert!(client.status().is_check);

        let mut mate = GameClient::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        mate.on("checkmate", move |ev| sink.borrow_mut().push(ev.name()));
        play_all(&mut mate, &["f3", "e5", "g4", "Qh4"]);
        assert_eq!(*seen.borrow(), vec!["checkmate"]);
        assert!(mate.status().is_checkmate);
    }

    #[test]
    fn move_events_bubble_in_order() {
        let mut client = GameClient::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        for name in ["move", "capture", "enPassant", "promote"] {
            let sink = Rc::clone(&seen);
            client.on(name, move |ev| sink.borrow_mut().push(ev.name()));
        }

        play_all(&mut client, &["e4", "d5", "exd5"]);
        assert_eq!(*seen.borrow(), vec!["move", "move", "move", "capture"]);
    }

    #[test]
    fn empty_and_garbage_notation_fail() {
        let mut client = GameClient::new();
        assert_eq!(client.play("").unwrap_err(), MoveError::EmptyNotation);
        assert!(matches!(
            client.play("zz9").unwrap_err(),
            MoveError::InvalidNotation { .. }
        ));
        assert!(matches!(
            client.play("Ke2").unwrap_err(),
            MoveError::InvalidNotation { .. }
        ));
    }

    #[test]
    fn status_forced_recomputes() {
        let mut client = GameClient::new();
        let status = client.status_forced();
        assert_eq!(status.notated_moves.len(), 20);
        assert!(!status.is_check);
    }

    #[test]
    fn apply_notation_move_to_fen() {
        let nm = NotationMove {
            from: Square::E2,
            to: Square::E4,
        };
        let fen = nm
            .apply_to_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1")
            .unwrap();
        assert_eq!(
            fen,
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
        );

        let illegal = NotationMove {
            from: Square::E2,
            to: Square::E5,
        };
        assert!(illegal
            .apply_to_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1")
            .is_err());
    }

    #[test]
    fn loaded_en_passant_target_is_playable() {
        // Black to move with a live en passant target on e3.
        let mut client = GameClient::from_fen(
            "rnbqkbnr/ppp1pppp/8/8/3pP3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 2",
        )
        .unwrap();

        assert!(client.status().notated_moves.contains_key("dxe3"));
        let record = client.play("dxe3").unwrap();
        assert!(record.en_passant);
        assert_eq!(client.game().board().piece_on(Square::E4), None);
    }
}
