//! Game setup: the transport graph and the reveal schedule.
//!
//! The setup is fixed for the whole game and shared by every state derived
//! from it. Both parts are reference counted, so cloning a setup never
//! copies the graph.

use std::sync::Arc;

use crate::error::SetupError;
use crate::graph::TransportGraph;

/// Fugitive moves (1-based) revealed in the standard 24-move schedule.
pub const STANDARD_REVEAL_MOVES: [usize; 5] = [3, 8, 13, 18, 24];

/// Length of the standard schedule.
pub const STANDARD_ROUNDS: usize = 24;

/// Graph plus reveal schedule.
#[derive(Clone, Debug)]
pub struct GameSetup {
    graph: Arc<TransportGraph>,
    reveal_schedule: Arc<[bool]>,
}

impl GameSetup {
    /// Create a setup.
    ///
    /// ## Errors
    ///
    /// - `SetupError::EmptyRevealSchedule` if the schedule has no entries
    /// - `SetupError::EmptyGraph` if the graph has no locations
    pub fn new(
        graph: impl Into<Arc<TransportGraph>>,
        reveal_schedule: impl Into<Vec<bool>>,
    ) -> Result<Self, SetupError> {
        let graph = graph.into();
        let reveal_schedule: Vec<bool> = reveal_schedule.into();

        if reveal_schedule.is_empty() {
            return Err(SetupError::EmptyRevealSchedule);
        }
        if graph.is_empty() {
            return Err(SetupError::EmptyGraph);
        }

        Ok(Self {
            graph,
            reveal_schedule: reveal_schedule.into(),
        })
    }

    /// Create a setup with the standard 24-move schedule.
    pub fn standard(graph: impl Into<Arc<TransportGraph>>) -> Result<Self, SetupError> {
        Self::new(graph, standard_reveal_schedule())
    }

    #[must_use]
    pub fn graph(&self) -> &TransportGraph {
        &self.graph
    }

    /// Shared handle to the graph.
    #[must_use]
    pub fn graph_arc(&self) -> Arc<TransportGraph> {
        Arc::clone(&self.graph)
    }

    #[must_use]
    pub fn reveal_schedule(&self) -> &[bool] {
        &self.reveal_schedule
    }

    /// Number of fugitive moves in the game (R).
    #[must_use]
    pub fn rounds(&self) -> usize {
        self.reveal_schedule.len()
    }

    /// Whether the fugitive move with this 0-based index is revealed.
    ///
    /// Indices past the end of the schedule are never revealed.
    #[must_use]
    pub fn is_reveal(&self, move_index: usize) -> bool {
        self.reveal_schedule.get(move_index).copied().unwrap_or(false)
    }
}

/// The standard schedule: 24 moves, revealing moves 3, 8, 13, 18 and 24.
#[must_use]
pub fn standard_reveal_schedule() -> Vec<bool> {
    (1..=STANDARD_ROUNDS)
        .map(|n| STANDARD_REVEAL_MOVES.contains(&n))
        .collect()
}
