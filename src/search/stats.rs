//! Search statistics for diagnostics and tuning.

use serde::{Deserialize, Serialize};

/// Statistics of the last `pick_move` call.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Deepest iteration that finished, in rounds. 0 means only the static
    /// ranking of root moves completed.
    pub depth_completed: u32,

    /// States produced by `advance` during search.
    pub nodes_expanded: u64,

    /// Static heuristic evaluations.
    pub leaves_evaluated: u64,

    /// Score of the chosen move at `depth_completed`.
    pub best_score: i64,

    /// Total time spent searching (microseconds).
    pub time_us: u64,
}

impl SearchStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all statistics to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
