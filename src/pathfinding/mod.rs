//! Ticket-constrained shortest paths.
//!
//! A plain BFS over locations is wrong here: reaching a location early with
//! the wrong tickets can be worse than reaching it one hop later with the
//! right ones. The search therefore runs over `(location, tickets left)`
//! states.
//!
//! ## Pruning
//!
//! A state is dropped when a state already seen at the same location holds
//! at least as many of every ticket. BFS reached that one no later, and
//! anything the dropped state could still do, it can do too. The result is
//! exact.
//!
//! ## Reuse
//!
//! [`Pathfinder`] keeps its queue and visited table between calls, so the
//! search heuristic can run thousands of queries without reallocating.

use std::collections::VecDeque;

use log::trace;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::core::{Ticket, TicketBoard};
use crate::graph::{Location, TransportGraph};

/// Hop count of a shortest ticket-feasible path.
///
/// `Unreachable` orders above every finite distance and has no numeric
/// value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Distance {
    Finite(u32),
    Unreachable,
}

impl Distance {
    #[must_use]
    pub const fn is_finite(self) -> bool {
        matches!(self, Distance::Finite(_))
    }

    #[must_use]
    pub const fn finite(self) -> Option<u32> {
        match self {
            Distance::Finite(d) => Some(d),
            Distance::Unreachable => None,
        }
    }

    /// Threat posed from this distance: `1 / max(d, 1)`, or 0 if
    /// unreachable.
    #[must_use]
    pub fn danger(self) -> f64 {
        match self {
            Distance::Finite(d) => 1.0 / f64::from(d.max(1)),
            Distance::Unreachable => 0.0,
        }
    }
}

impl std::fmt::Display for Distance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Distance::Finite(d) => write!(f, "{d}"),
            Distance::Unreachable => write!(f, "unreachable"),
        }
    }
}

/// Reusable ticket-constrained BFS.
#[derive(Debug, Default)]
pub struct Pathfinder {
    frontier: VecDeque<(Location, TicketBoard, u32)>,
    /// Undominated ticket boards seen per location.
    visited: FxHashMap<Location, SmallVec<[TicketBoard; 4]>>,
}

impl Pathfinder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fewest hops from `start` to `target` paying with `tickets`.
    ///
    /// Each hop spends one ticket matching some transport on the edge, or a
    /// secret ticket on any edge. Deterministic for equal inputs.
    pub fn distance(
        &mut self,
        graph: &TransportGraph,
        start: Location,
        target: Location,
        tickets: TicketBoard,
    ) -> Distance {
        if start == target {
            return Distance::Finite(0);
        }

        self.frontier.clear();
        self.visited.clear();
        self.frontier.push_back((start, tickets, 0));
        self.visited.entry(start).or_default().push(tickets);

        let mut expanded = 0usize;
        while let Some((location, board, hops)) = self.frontier.pop_front() {
            expanded += 1;

            for edge in graph.edges(location) {
                let mut usable: SmallVec<[Ticket; 4]> = SmallVec::new();
                for ticket in edge
                    .transports
                    .iter()
                    .map(|transport| transport.required_ticket())
                    .chain(std::iter::once(Ticket::Secret))
                {
                    if board.has(ticket) && !usable.contains(&ticket) {
                        usable.push(ticket);
                    }
                }

                for ticket in usable {
                    if edge.to == target {
                        trace!("{start} -> {target}: {} hops, {expanded} states", hops + 1);
                        return Distance::Finite(hops + 1);
                    }

                    let next = board.used(ticket);
                    let seen = self.visited.entry(edge.to).or_default();
                    if seen.iter().any(|old| old.dominates(&next)) {
                        continue;
                    }
                    seen.retain(|old| !next.dominates(old));
                    seen.push(next);
                    self.frontier.push_back((edge.to, next, hops + 1));
                }
            }
        }

        trace!("{start} -> {target}: unreachable, {expanded} states");
        Distance::Unreachable
    }
}

/// One-off query. Prefer a reused [`Pathfinder`] in loops.
#[must_use]
pub fn shortest_ticket_distance(
    graph: &TransportGraph,
    start: Location,
    target: Location,
    tickets: TicketBoard,
) -> Distance {
    Pathfinder::new().distance(graph, start, target, tickets)
}
