//! Moves: single hops and fugitive double moves.
//!
//! A double move has no piece field. Only the fugitive can make one, so the
//! type cannot describe a tracker double move at all.

use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};

use super::piece::Piece;
use super::ticket::Ticket;
use crate::graph::Location;

/// One hop paid with one ticket.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SingleMove {
    pub piece: Piece,
    pub source: Location,
    pub ticket: Ticket,
    pub destination: Location,
}

/// Two fugitive hops resolved as one turn.
///
/// Consumes `ticket1`, `ticket2`, and one double ticket.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DoubleMove {
    pub source: Location,
    pub ticket1: Ticket,
    pub destination1: Location,
    pub ticket2: Ticket,
    pub destination2: Location,
}

/// A complete move.
///
/// ## Example
///
/// ```
/// use pursuit_engine::core::{Move, Piece, Ticket};
/// use pursuit_engine::graph::Location;
///
/// let hop = Move::single(Piece::tracker(0), Location(1), Ticket::Taxi, Location(2));
/// let double = Move::double(Location(1), Ticket::Bus, Location(4), Ticket::Secret, Location(7));
///
/// assert_eq!(hop.destination(), Location(2));
/// assert_eq!(double.piece(), Piece::Fugitive);
/// assert_eq!(double.destination(), Location(7));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    Single(SingleMove),
    Double(DoubleMove),
}

impl Move {
    /// Create a single move.
    #[must_use]
    pub const fn single(
        piece: Piece,
        source: Location,
        ticket: Ticket,
        destination: Location,
    ) -> Self {
        Move::Single(SingleMove { piece, source, ticket, destination })
    }

    /// Create a fugitive double move.
    #[must_use]
    pub const fn double(
        source: Location,
        ticket1: Ticket,
        destination1: Location,
        ticket2: Ticket,
        destination2: Location,
    ) -> Self {
        Move::Double(DoubleMove { source, ticket1, destination1, ticket2, destination2 })
    }

    /// The piece making this move.
    #[must_use]
    pub const fn piece(&self) -> Piece {
        match self {
            Move::Single(single) => single.piece,
            Move::Double(_) => Piece::Fugitive,
        }
    }

    /// Where the piece starts.
    #[must_use]
    pub const fn source(&self) -> Location {
        match self {
            Move::Single(single) => single.source,
            Move::Double(double) => double.source,
        }
    }

    /// Where the piece ends up.
    #[must_use]
    pub const fn destination(&self) -> Location {
        match self {
            Move::Single(single) => single.destination,
            Move::Double(double) => double.destination2,
        }
    }

    /// Hop tickets in the order they are spent (the double ticket excluded).
    #[must_use]
    pub fn tickets(&self) -> SmallVec<[Ticket; 2]> {
        match self {
            Move::Single(single) => smallvec![single.ticket],
            Move::Double(double) => smallvec![double.ticket1, double.ticket2],
        }
    }

    #[must_use]
    pub const fn is_double(&self) -> bool {
        matches!(self, Move::Double(_))
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Move::Single(m) => write!(
                f,
                "{}: {} -[{}]-> {}",
                m.piece, m.source, m.ticket, m.destination
            ),
            Move::Double(m) => write!(
                f,
                "Fugitive: {} -[{}]-> {} -[{}]-> {}",
                m.source, m.ticket1, m.destination1, m.ticket2, m.destination2
            ),
        }
    }
}
