//! Move-picking agents.
//!
//! ## Overview
//!
//! - [`MinimaxAgent`]: iterative-deepening minimax for the fugitive, with
//!   alpha-beta pruning and rayon-parallel root moves
//! - [`RandomAgent`]: uniform random moves for either side, used for
//!   self-play and as a baseline
//!
//! ## Usage
//!
//! ```rust
//! use std::time::Duration;
//!
//! use pursuit_engine::core::{GameSetup, GameState, Player, TicketBoard, TrackerId, Transport};
//! use pursuit_engine::graph::{Location, TransportGraph};
//! use pursuit_engine::search::{Agent, MinimaxAgent, SearchConfig};
//!
//! let graph = TransportGraph::from_edges([
//!     (1, 2, Transport::Taxi),
//!     (2, 3, Transport::Taxi),
//!     (3, 4, Transport::Bus),
//! ]);
//! let setup = GameSetup::standard(graph).unwrap();
//! let state = GameState::new(
//!     setup,
//!     Player::fugitive(TicketBoard::fugitive_default(), Location(2)),
//!     vec![Player::tracker(TrackerId(0), TicketBoard::tracker_default(), Location(4))],
//! )
//! .unwrap();
//!
//! let mut agent = MinimaxAgent::new(SearchConfig::default().with_max_depth(2));
//! let mv = agent.pick_move(&state, Duration::from_millis(200)).unwrap();
//! assert!(state.available_moves().iter().any(|legal| *legal == mv));
//! ```

pub mod agent;
pub mod config;
pub mod heuristic;
pub mod minimax;
pub mod random;
pub mod stats;

pub use agent::Agent;
pub use config::{HeuristicWeights, SearchConfig};
pub use heuristic::{terminal_score, Evaluator, Score, FUGITIVE_WIN, TRACKER_WIN};
pub use minimax::{rebuild_state, MinimaxAgent};
pub use random::RandomAgent;
pub use stats::SearchStats;
