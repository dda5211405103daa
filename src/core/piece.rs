//! Piece identification.
//!
//! ## TrackerId
//!
//! Type-safe tracker identifier. Tracker indices are 0-based.
//!
//! ## Piece
//!
//! Either the single fugitive or one specific tracker. Pieces are totally
//! ordered: the fugitive sorts first, then trackers by id. Sets of pieces
//! therefore iterate in a stable order.

use serde::{Deserialize, Serialize};

/// Tracker identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TrackerId(pub u8);

impl TrackerId {
    /// Create a new tracker ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw tracker index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for TrackerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tracker {}", self.0)
    }
}

/// A piece on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Piece {
    Fugitive,
    Tracker(TrackerId),
}

impl Piece {
    /// Shorthand for `Piece::Tracker(TrackerId(id))`.
    #[must_use]
    pub const fn tracker(id: u8) -> Self {
        Piece::Tracker(TrackerId(id))
    }

    #[must_use]
    pub const fn is_fugitive(self) -> bool {
        matches!(self, Piece::Fugitive)
    }

    #[must_use]
    pub const fn is_tracker(self) -> bool {
        matches!(self, Piece::Tracker(_))
    }

    /// The tracker ID, if this piece is a tracker.
    #[must_use]
    pub const fn tracker_id(self) -> Option<TrackerId> {
        match self {
            Piece::Tracker(id) => Some(id),
            Piece::Fugitive => None,
        }
    }
}

impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Piece::Fugitive => f.write_str("Fugitive"),
            Piece::Tracker(id) => write!(f, "{id}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_ordering() {
        let mut pieces = vec![Piece::tracker(2), Piece::Fugitive, Piece::tracker(0)];
        pieces.sort();
        assert_eq!(pieces, vec![Piece::Fugitive, Piece::tracker(0), Piece::tracker(2)]);
    }

    #[test]
    fn test_piece_kind() {
        assert!(Piece::Fugitive.is_fugitive());
        assert!(!Piece::Fugitive.is_tracker());
        assert_eq!(Piece::tracker(4).tracker_id(), Some(TrackerId(4)));
        assert_eq!(Piece::Fugitive.tracker_id(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Piece::Fugitive), "Fugitive");
        assert_eq!(format!("{}", Piece::tracker(1)), "Tracker 1");
    }
}
