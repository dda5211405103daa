//! Tickets, transport modes, and per-player ticket holdings.
//!
//! ## Ticket
//!
//! A typed movement token. Ordinary tickets pay for one transport mode;
//! `Secret` pays for any edge without revealing the mode; `Double` lets the
//! fugitive take two hops in one turn.
//!
//! ## TicketBoard
//!
//! Fixed-size count per ticket type, stored inline so it can be copied,
//! hashed, and used as part of a pathfinding state.

use serde::{Deserialize, Serialize};
use std::ops::Index;

/// Ticket type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Ticket {
    Taxi,
    Bus,
    Underground,
    Double,
    Secret,
}

impl Ticket {
    /// Number of ticket types.
    pub const COUNT: usize = 5;

    /// All ticket types in index order.
    pub const ALL: [Ticket; Ticket::COUNT] = [
        Ticket::Taxi,
        Ticket::Bus,
        Ticket::Underground,
        Ticket::Double,
        Ticket::Secret,
    ];

    /// Dense index of this ticket type.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Trackers may only hold ordinary mode tickets.
    #[must_use]
    pub const fn allowed_for_trackers(self) -> bool {
        !matches!(self, Ticket::Double | Ticket::Secret)
    }
}

impl std::fmt::Display for Ticket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Ticket::Taxi => "taxi",
            Ticket::Bus => "bus",
            Ticket::Underground => "underground",
            Ticket::Double => "double",
            Ticket::Secret => "secret",
        };
        f.write_str(name)
    }
}

/// Transport mode on a graph edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Transport {
    Taxi,
    Bus,
    Underground,
    /// Only payable with a secret ticket.
    Ferry,
}

impl Transport {
    /// Ticket type needed to travel with this mode.
    #[must_use]
    pub const fn required_ticket(self) -> Ticket {
        match self {
            Transport::Taxi => Ticket::Taxi,
            Transport::Bus => Ticket::Bus,
            Transport::Underground => Ticket::Underground,
            Transport::Ferry => Ticket::Secret,
        }
    }
}

/// Remaining ticket count per ticket type.
///
/// ## Example
///
/// ```
/// use pursuit_engine::core::{Ticket, TicketBoard};
///
/// let board = TicketBoard::new().with(Ticket::Taxi, 2);
/// let spent = board.used(Ticket::Taxi);
///
/// assert_eq!(board[Ticket::Taxi], 2);
/// assert_eq!(spent[Ticket::Taxi], 1);
/// assert!(!spent.has(Ticket::Bus));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TicketBoard {
    counts: [u32; Ticket::COUNT],
}

impl TicketBoard {
    /// Board with no tickets.
    #[must_use]
    pub const fn new() -> Self {
        Self { counts: [0; Ticket::COUNT] }
    }

    /// Standard starting tickets for the fugitive.
    #[must_use]
    pub const fn fugitive_default() -> Self {
        Self { counts: [4, 3, 3, 2, 5] }
    }

    /// Standard starting tickets for a tracker.
    #[must_use]
    pub const fn tracker_default() -> Self {
        Self { counts: [11, 8, 4, 0, 0] }
    }

    /// Return a copy with `ticket` set to `count`.
    #[must_use]
    pub fn with(mut self, ticket: Ticket, count: u32) -> Self {
        self.counts[ticket.index()] = count;
        self
    }

    /// Count of one ticket type.
    #[must_use]
    pub fn count(&self, ticket: Ticket) -> u32 {
        self.counts[ticket.index()]
    }

    /// Check whether at least one ticket of this type is held.
    #[must_use]
    pub fn has(&self, ticket: Ticket) -> bool {
        self.count(ticket) > 0
    }

    /// Return a copy with one ticket of this type spent.
    ///
    /// Counts never go below zero.
    #[must_use]
    pub fn used(mut self, ticket: Ticket) -> Self {
        let count = &mut self.counts[ticket.index()];
        *count = count.saturating_sub(1);
        self
    }

    /// Return a copy with one extra ticket of this type.
    #[must_use]
    pub fn given(mut self, ticket: Ticket) -> Self {
        self.counts[ticket.index()] += 1;
        self
    }

    /// Total number of tickets of any type.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    /// True if every count here is at least the matching count in `other`.
    #[must_use]
    pub fn dominates(&self, other: &TicketBoard) -> bool {
        self.counts
            .iter()
            .zip(other.counts.iter())
            .all(|(mine, theirs)| mine >= theirs)
    }

    /// Iterate over (ticket, count) pairs in index order.
    pub fn iter(&self) -> impl Iterator<Item = (Ticket, u32)> + '_ {
        Ticket::ALL.iter().map(move |&t| (t, self.count(t)))
    }
}

impl Index<Ticket> for TicketBoard {
    type Output = u32;

    fn index(&self, ticket: Ticket) -> &Self::Output {
        &self.counts[ticket.index()]
    }
}

impl FromIterator<(Ticket, u32)> for TicketBoard {
    fn from_iter<I: IntoIterator<Item = (Ticket, u32)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(TicketBoard::new(), |board, (ticket, count)| board.with(ticket, count))
    }
}
