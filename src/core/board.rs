//! Read-only view of a game.
//!
//! Agents see the game through `Board` only. Lookups that can miss return
//! `Option`.

use im::{OrdSet, Vector};

use super::moves::Move;
use super::piece::{Piece, TrackerId};
use super::setup::GameSetup;
use super::state::GameState;
use super::ticket::TicketBoard;
use super::travel_log::LogEntry;
use crate::graph::Location;

/// What a player may observe about a game.
///
/// The fugitive's location is deliberately absent. It is only known from
/// revealed log entries, or to the fugitive itself through the sources of
/// its own available moves.
pub trait Board {
    fn setup(&self) -> &GameSetup;

    /// Every piece in the game, fugitive first.
    fn players(&self) -> OrdSet<Piece>;

    fn tracker_location(&self, id: TrackerId) -> Option<Location>;

    fn player_tickets(&self, piece: Piece) -> Option<TicketBoard>;

    fn travel_log(&self) -> &Vector<LogEntry>;

    fn available_moves(&self) -> &Vector<Move>;

    /// Empty while the game is undecided.
    fn winners(&self) -> &OrdSet<Piece>;
}

impl Board for GameState {
    fn setup(&self) -> &GameSetup {
        GameState::setup(self)
    }

    fn players(&self) -> OrdSet<Piece> {
        self.pieces()
    }

    fn tracker_location(&self, id: TrackerId) -> Option<Location> {
        self.tracker(id).map(|tracker| tracker.location())
    }

    fn player_tickets(&self, piece: Piece) -> Option<TicketBoard> {
        self.player(piece).map(|player| player.tickets())
    }

    fn travel_log(&self) -> &Vector<LogEntry> {
        GameState::travel_log(self)
    }

    fn available_moves(&self) -> &Vector<Move> {
        GameState::available_moves(self)
    }

    fn winners(&self) -> &OrdSet<Piece> {
        GameState::winners(self)
    }
}
