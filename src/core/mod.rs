//! Core game types: tickets, pieces, players, moves, the travel log, the
//! setup, the immutable game state and its read-only board view.
//!
//! Everything here is a value. The only way to get a new game state is
//! `GameState::advance`.

pub mod board;
pub mod moves;
pub mod piece;
pub mod player;
pub mod rng;
pub mod setup;
pub mod state;
pub mod ticket;
pub mod travel_log;

pub use board::Board;
pub use moves::{DoubleMove, Move, SingleMove};
pub use piece::{Piece, TrackerId};
pub use player::Player;
pub use rng::GameRng;
pub use setup::{standard_reveal_schedule, GameSetup, STANDARD_REVEAL_MOVES, STANDARD_ROUNDS};
pub use state::GameState;
pub use ticket::{Ticket, TicketBoard, Transport};
pub use travel_log::LogEntry;
