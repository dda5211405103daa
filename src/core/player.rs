//! Player: a piece, its location, and its tickets.
//!
//! Players are values. Spending a ticket or moving produces a new `Player`;
//! nothing is changed in place, so a player can be shared freely between
//! a parent state and all of its children.

use serde::{Deserialize, Serialize};

use super::piece::{Piece, TrackerId};
use super::ticket::{Ticket, TicketBoard};
use crate::graph::Location;

/// A piece together with its location and ticket holdings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Player {
    piece: Piece,
    tickets: TicketBoard,
    location: Location,
}

impl Player {
    /// Create a player.
    #[must_use]
    pub const fn new(piece: Piece, tickets: TicketBoard, location: Location) -> Self {
        Self { piece, tickets, location }
    }

    /// Create the fugitive.
    #[must_use]
    pub const fn fugitive(tickets: TicketBoard, location: Location) -> Self {
        Self::new(Piece::Fugitive, tickets, location)
    }

    /// Create a tracker.
    #[must_use]
    pub const fn tracker(id: TrackerId, tickets: TicketBoard, location: Location) -> Self {
        Self::new(Piece::Tracker(id), tickets, location)
    }

    #[must_use]
    pub const fn piece(&self) -> Piece {
        self.piece
    }

    #[must_use]
    pub const fn location(&self) -> Location {
        self.location
    }

    #[must_use]
    pub const fn tickets(&self) -> TicketBoard {
        self.tickets
    }

    #[must_use]
    pub fn has(&self, ticket: Ticket) -> bool {
        self.tickets.has(ticket)
    }

    #[must_use]
    pub const fn is_fugitive(&self) -> bool {
        self.piece.is_fugitive()
    }

    /// Copy of this player with one ticket spent.
    #[must_use]
    pub fn use_ticket(&self, ticket: Ticket) -> Self {
        Self { tickets: self.tickets.used(ticket), ..*self }
    }

    /// Copy of this player with one ticket received.
    #[must_use]
    pub fn give_ticket(&self, ticket: Ticket) -> Self {
        Self { tickets: self.tickets.given(ticket), ..*self }
    }

    /// Copy of this player standing at `location`.
    #[must_use]
    pub fn at(&self, location: Location) -> Self {
        Self { location, ..*self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_use_ticket_leaves_original() {
        let player = Player::fugitive(TicketBoard::new().with(Ticket::Taxi, 1), Location(5));
        let moved = player.use_ticket(Ticket::Taxi).at(Location(6));

        assert!(player.has(Ticket::Taxi));
        assert_eq!(player.location(), Location(5));
        assert!(!moved.has(Ticket::Taxi));
        assert_eq!(moved.location(), Location(6));
        assert_eq!(moved.piece(), Piece::Fugitive);
    }

    #[test]
    fn test_give_ticket() {
        let player = Player::fugitive(TicketBoard::new(), Location(1)).give_ticket(Ticket::Bus);
        assert_eq!(player.tickets()[Ticket::Bus], 1);
    }

    #[test]
    fn test_tracker_constructor() {
        let player = Player::tracker(TrackerId(3), TicketBoard::tracker_default(), Location(9));
        assert_eq!(player.piece(), Piece::tracker(3));
        assert!(!player.is_fugitive());
    }
}
