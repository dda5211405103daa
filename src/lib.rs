//! # pursuit-engine
//!
//! Rules engine and search agent for a hidden-movement pursuit game on a
//! transport graph: one fugitive against several trackers, every move paid
//! for with a typed ticket.
//!
//! ## Design Principles
//!
//! 1. **Immutable States**: `GameState::advance` returns a new state and
//!    never mutates. States clone in O(1) via `im` persistent structures, so
//!    search can branch freely.
//!
//! 2. **Rules as Pure Functions**: move generation and win evaluation take
//!    player values and the setup, nothing else.
//!
//! 3. **Typed Outcomes**: lookups return `Option`, failures return
//!    `thiserror` enums. Nothing panics on bad input.
//!
//! ## Modules
//!
//! - `graph`: Locations and the transport graph
//! - `core`: Tickets, pieces, players, moves, travel log, setup, game state
//! - `rules`: Move generation and win evaluation
//! - `pathfinding`: Ticket-constrained shortest paths
//! - `search`: Minimax and random agents
//! - `model`: Observable wrapper around the current state
//! - `error`: Error types

pub mod core;
pub mod error;
pub mod graph;
pub mod model;
pub mod pathfinding;
pub mod rules;
pub mod search;

// Re-export commonly used types
pub use crate::core::{
    Board, GameRng, GameSetup, GameState, LogEntry, Move, Piece, Player, Ticket, TicketBoard,
    TrackerId, Transport,
};

pub use crate::error::{GameError, GraphError, ModelError, SearchError, SetupError};

pub use crate::graph::{Location, TransportGraph};

pub use crate::model::{Event, GameModel, Observer, ObserverId};

pub use crate::pathfinding::{shortest_ticket_distance, Distance, Pathfinder};

pub use crate::rules::Outcome;

pub use crate::search::{
    Agent, HeuristicWeights, MinimaxAgent, RandomAgent, SearchConfig, SearchStats,
};
