//! Static evaluation of fugitive moves.
//!
//! ## Terms
//!
//! - **Connectivity**: points for each neighbour of the destination that is
//!   free of trackers and that the fugitive can still pay to enter
//! - **Danger**: each tracker contributes `1 / d`, where `d` is its
//!   ticket-constrained distance to the fugitive (at least 1; unreachable
//!   trackers contribute nothing). The move scores the drop in total
//!   danger from source to destination
//! - **Secret tickets**: scored by how many transport kinds leave the
//!   source. A secret ticket hides more when there is more to hide
//! - **Double moves**: a flat penalty, so double tickets are kept for when
//!   they matter
//!
//! Scores are from the fugitive's point of view: higher is better.

use im::{OrdSet, Vector};

use crate::core::{GameState, Move, Piece, Player, Ticket};
use crate::graph::{Location, TransportGraph};
use crate::pathfinding::Pathfinder;

use super::config::HeuristicWeights;

/// Fugitive-relative score.
pub type Score = i64;

/// The fugitive has won.
pub const FUGITIVE_WIN: Score = Score::MAX;

/// The trackers have won.
pub const TRACKER_WIN: Score = Score::MIN;

/// Score of a decided game, `None` while undecided.
#[must_use]
pub fn terminal_score(winners: &OrdSet<Piece>) -> Option<Score> {
    if winners.is_empty() {
        None
    } else if winners.contains(&Piece::Fugitive) {
        Some(FUGITIVE_WIN)
    } else {
        Some(TRACKER_WIN)
    }
}

/// Heuristic evaluator. Owns a pathfinder so repeated calls don't allocate.
#[derive(Debug)]
pub struct Evaluator {
    weights: HeuristicWeights,
    pathfinder: Pathfinder,
}

impl Evaluator {
    #[must_use]
    pub fn new(weights: HeuristicWeights) -> Self {
        Self {
            weights,
            pathfinder: Pathfinder::new(),
        }
    }

    #[must_use]
    pub fn weights(&self) -> &HeuristicWeights {
        &self.weights
    }

    /// Score the fugitive move `mv` against the trackers of `state`.
    ///
    /// Tracker positions and tickets, and the fugitive's tickets, are read
    /// from `state`; `mv` only supplies the source, destination and the
    /// tickets spent. During search `state` is the leaf the move led to.
    pub fn score_move(&mut self, state: &GameState, mv: &Move) -> Score {
        let graph = state.setup().graph();
        let source = mv.source();
        let destination = mv.destination();

        let mut score = self.connectivity(graph, state, destination);
        score += self.danger_change(graph, state.trackers(), source, destination);

        let table = if mv.is_double() {
            &self.weights.secret_double
        } else {
            &self.weights.secret_single
        };
        let kinds = graph.transport_kinds_at(source);
        let secret = table[kinds.saturating_sub(1).min(table.len() - 1)];
        let secrets = mv.tickets().iter().filter(|&&t| t == Ticket::Secret).count();
        score += secret * secrets as Score;

        if mv.is_double() {
            score += self.weights.double_penalty;
        }

        score
    }

    fn connectivity(&self, graph: &TransportGraph, state: &GameState, at: Location) -> Score {
        let fugitive = state.fugitive();
        let occupied = state.tracker_locations();
        let has_secret = fugitive.has(Ticket::Secret);

        let open = graph
            .edges(at)
            .iter()
            .filter(|edge| !occupied.contains(&edge.to))
            .filter(|edge| {
                has_secret
                    || edge
                        .transports
                        .iter()
                        .any(|transport| fugitive.has(transport.required_ticket()))
            })
            .count();

        self.weights.connectivity * open as Score
    }

    fn danger_change(
        &mut self,
        graph: &TransportGraph,
        trackers: &Vector<Player>,
        source: Location,
        destination: Location,
    ) -> Score {
        let before = self.danger(graph, trackers, source);
        let after = self.danger(graph, trackers, destination);
        (self.weights.distance * (before - after)).floor() as Score
    }

    /// Summed threat of every tracker against a fugitive at `at`.
    fn danger(&mut self, graph: &TransportGraph, trackers: &Vector<Player>, at: Location) -> f64 {
        trackers
            .iter()
            .map(|tracker| {
                self.pathfinder
                    .distance(graph, tracker.location(), at, tracker.tickets())
                    .danger()
            })
            .sum()
    }
}
