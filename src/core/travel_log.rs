//! Fugitive travel log.

use serde::{Deserialize, Serialize};

use super::ticket::Ticket;
use crate::graph::Location;

/// One fugitive move as seen by the trackers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogEntry {
    /// Only the ticket is known.
    Hidden { ticket: Ticket },
    /// Ticket and destination are public.
    Revealed { ticket: Ticket, location: Location },
}

impl LogEntry {
    #[must_use]
    pub const fn hidden(ticket: Ticket) -> Self {
        LogEntry::Hidden { ticket }
    }

    #[must_use]
    pub const fn reveal(ticket: Ticket, location: Location) -> Self {
        LogEntry::Revealed { ticket, location }
    }

    /// Entry for a move to `location`, revealed or not.
    #[must_use]
    pub const fn for_move(ticket: Ticket, location: Location, revealed: bool) -> Self {
        if revealed {
            Self::reveal(ticket, location)
        } else {
            Self::hidden(ticket)
        }
    }

    #[must_use]
    pub const fn ticket(&self) -> Ticket {
        match self {
            LogEntry::Hidden { ticket } | LogEntry::Revealed { ticket, .. } => *ticket,
        }
    }

    /// The destination, if it was revealed.
    #[must_use]
    pub const fn location(&self) -> Option<Location> {
        match self {
            LogEntry::Hidden { .. } => None,
            LogEntry::Revealed { location, .. } => Some(*location),
        }
    }

    #[must_use]
    pub const fn is_revealed(&self) -> bool {
        matches!(self, LogEntry::Revealed { .. })
    }
}
