//! Named-event dispatch for move, capture, castle, en passant, promotion,
//! undo, check and checkmate notifications.
//!
//! Delivery is synchronous and ordered by subscription. Mutating operations
//! collect their events first and dispatch after the mutation has fully
//! succeeded, so a handler always observes a consistent game.

use std::collections::HashMap;

use crate::moves::MoveRecord;
use crate::square::Square;

/// Payload for `check` and `checkmate`: the attacker and the threatened king.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KingThreat {
    /// The square of the attacking piece.
    pub attacking_square: Square,
    /// The square of the king under attack.
    pub king_square: Square,
}

/// An event raised by the game.
#[derive(Debug, Clone)]
pub enum Event {
    /// A piece was moved. Fired for every committed move.
    Move(MoveRecord),
    /// The move captured a piece.
    Capture(MoveRecord),
    /// The move was a castle.
    Castle(MoveRecord),
    /// The move captured en passant.
    EnPassant(MoveRecord),
    /// A pawn on this square was promoted.
    Promote(Square),
    /// A committed move was undone.
    Undo(MoveRecord),
    /// The side to move is in check.
    Check(KingThreat),
    /// The side to move is checkmated.
    Checkmate(KingThreat),
}

impl Event {
    /// The name handlers subscribe under.
    pub fn name(&self) -> &'static str {
        match self {
            Event::Move(_) => "move",
            Event::Capture(_) => "capture",
            Event::Castle(_) => "castle",
            Event::EnPassant(_) => "enPassant",
            Event::Promote(_) => "promote",
            Event::Undo(_) => "undo",
            Event::Check(_) => "check",
            Event::Checkmate(_) => "checkmate",
        }
    }
}

/// A subscribed event handler.
pub type Handler = Box<dyn FnMut(&Event)>;

/// Multi-listener dispatcher: event name → handlers in subscription order.
#[derive(Default)]
pub struct Dispatcher {
    listeners: HashMap<String, Vec<Handler>>,
}

impl Dispatcher {
    /// Create a dispatcher with no listeners.
    pub fn new() -> Dispatcher {
        Dispatcher {
            listeners: HashMap::new(),
        }
    }

    /// Register a handler for the given event name.
    pub fn on<F>(&mut self, event: &str, handler: F)
    where
        F: FnMut(&Event) + 'static,
    {
        if event.is_empty() {
            return;
        }
        self.listeners
            .entry(event.to_string())
            .or_default()
            .push(Box::new(handler));
    }

    /// Deliver an event to every handler subscribed to its name, in
    /// subscription order.
    pub fn emit(&mut self, event: &Event) {
        if let Some(handlers) = self.listeners.get_mut(event.name()) {
            for handler in handlers.iter_mut() {
                handler(event);
            }
        }
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut counts: Vec<(&str, usize)> = self
            .listeners
            .iter()
            .map(|(name, handlers)| (name.as_str(), handlers.len()))
            .collect();
        counts.sort();
        f.debug_struct("Dispatcher").field("listeners", &counts).finish()
    }
}
