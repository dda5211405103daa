//! The agent interface.

use std::time::Duration;

use crate::core::{Board, Move};
use crate::error::SearchError;

/// Something that picks moves.
///
/// Agents only see the [`Board`] view. `budget` is the wall-clock time the
/// caller is willing to wait; agents treat it as a soft limit.
pub trait Agent {
    fn name(&self) -> &str;

    /// Choose one of `board.available_moves()`.
    ///
    /// ## Errors
    ///
    /// `SearchError` if the board can't be played from, e.g. the game is
    /// over or there are no legal moves.
    fn pick_move(&mut self, board: &dyn Board, budget: Duration) -> Result<Move, SearchError>;
}
