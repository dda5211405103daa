//! Error types.
//!
//! - `SetupError`: a game that starts invalid is rejected before any move
//!   logic runs
//! - `GameError`: state transitions
//! - `GraphError`: graph construction
//! - `SearchError`: agent preconditions
//! - `ModelError`: the observer model

use thiserror::Error;

use crate::core::{Move, Piece, Ticket};
use crate::graph::Location;
use crate::model::ObserverId;

/// Invalid game setup or initial state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SetupError {
    #[error("reveal schedule is empty")]
    EmptyRevealSchedule,

    #[error("transport graph has no locations")]
    EmptyGraph,

    #[error("fugitive slot holds {0}")]
    NotAFugitive(Piece),

    #[error("the fugitive is listed among the trackers")]
    FugitiveAmongTrackers,

    #[error("{piece} holds {ticket} tickets")]
    ForbiddenTrackerTicket { piece: Piece, ticket: Ticket },

    #[error("{0} is listed more than once")]
    DuplicateTracker(Piece),

    #[error("more than one tracker starts at {0}")]
    DuplicateTrackerLocation(Location),

    #[error("{piece} is at {location}, which is not on the graph")]
    UnknownLocation { piece: Piece, location: Location },

    #[error("travel log has {log} entries but the reveal schedule only {schedule}")]
    LogOverflow { log: usize, schedule: usize },
}

/// Failure while playing a game.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error(transparent)]
    Setup(#[from] SetupError),

    #[error("illegal move: {0}")]
    IllegalMove(Move),
}

/// Invalid transport graph.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("edge {from} -> {to} has no transport modes")]
    NoTransports { from: Location, to: Location },
}

/// Agent asked to move on a board it cannot play.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("the game is already over")]
    GameOver,

    #[error("it is not the fugitive's turn")]
    NotFugitiveTurn,

    #[error("no legal moves are available")]
    NoLegalMoves,

    #[error("board does not describe {0}")]
    MissingPlayer(Piece),

    #[error(transparent)]
    Game(#[from] GameError),
}

impl From<SetupError> for SearchError {
    fn from(err: SetupError) -> Self {
        SearchError::Game(GameError::Setup(err))
    }
}

/// Failure in the observer model.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("observer {0} was never registered")]
    UnknownObserver(ObserverId),

    #[error(transparent)]
    Game(#[from] GameError),
}
