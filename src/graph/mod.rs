//! Transport graph: locations connected by typed transport edges.
//!
//! ## Location
//!
//! Opaque node identifier. The engine never interprets location numbers.
//!
//! ## TransportGraph
//!
//! Immutable adjacency structure. Every edge carries a non-empty set of
//! transport modes; a player may traverse the edge with any ticket required
//! by one of those modes.
//!
//! Neighbours are always enumerated in ascending location order, and the
//! transports of an edge in the order they were first added. Move generation
//! and search depend on this order being stable.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::Transport;
use crate::error::GraphError;

/// A node of the transport graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Location(pub u32);

impl Location {
    /// Create a new location.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw location number.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Transport modes on a single edge. Almost never more than 3.
pub type Transports = SmallVec<[Transport; 4]>;

/// Outgoing edge of a location.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// Destination of the edge.
    pub to: Location,

    /// Modes available on this edge (non-empty, no duplicates).
    pub transports: Transports,
}

/// Immutable transport graph.
///
/// Build one with [`TransportGraph::builder`] or [`TransportGraph::from_edges`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportGraph {
    /// Outgoing edges per location, each list sorted by destination.
    adjacency: BTreeMap<Location, Vec<Edge>>,
}

impl TransportGraph {
    /// Start building a graph.
    #[must_use]
    pub fn builder() -> GraphBuilder {
        GraphBuilder::default()
    }

    /// Build an undirected graph from `(a, b, transport)` triples.
    ///
    /// ```
    /// use pursuit_engine::core::Transport;
    /// use pursuit_engine::graph::{Location, TransportGraph};
    ///
    /// let graph = TransportGraph::from_edges([
    ///     (1, 2, Transport::Taxi),
    ///     (2, 3, Transport::Bus),
    /// ]);
    /// assert_eq!(graph.node_count(), 3);
    /// assert!(graph.is_adjacent(Location(3), Location(2)));
    /// ```
    pub fn from_edges(edges: impl IntoIterator<Item = (u32, u32, Transport)>) -> Self {
        edges
            .into_iter()
            .fold(GraphBuilder::default(), |builder, (a, b, transport)| {
                builder.edge(Location(a), Location(b), transport)
            })
            .finish()
    }

    /// Number of locations.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Check whether the graph has no locations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Check whether a location is part of the graph.
    #[must_use]
    pub fn contains(&self, location: Location) -> bool {
        self.adjacency.contains_key(&location)
    }

    /// Iterate over all locations in ascending order.
    pub fn locations(&self) -> impl Iterator<Item = Location> + '_ {
        self.adjacency.keys().copied()
    }

    /// Outgoing edges of a location (empty for unknown locations).
    #[must_use]
    pub fn edges(&self, location: Location) -> &[Edge] {
        self.adjacency
            .get(&location)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Iterate over the neighbours of a location.
    pub fn neighbors(&self, location: Location) -> impl Iterator<Item = Location> + '_ {
        self.edges(location).iter().map(|edge| edge.to)
    }

    /// Transport modes on the edge `from -> to` (empty if not adjacent).
    #[must_use]
    pub fn transports(&self, from: Location, to: Location) -> &[Transport] {
        let edges = self.edges(from);
        edges
            .binary_search_by_key(&to, |edge| edge.to)
            .map(|idx| edges[idx].transports.as_slice())
            .unwrap_or(&[])
    }

    /// Check whether `to` can be reached from `from` in one hop.
    #[must_use]
    pub fn is_adjacent(&self, from: Location, to: Location) -> bool {
        !self.transports(from, to).is_empty()
    }

    /// Number of distinct transport modes leaving a location.
    #[must_use]
    pub fn transport_kinds_at(&self, location: Location) -> usize {
        let mut kinds: SmallVec<[Transport; 4]> = SmallVec::new();
        for transport in self.edges(location).iter().flat_map(|e| e.transports.iter()) {
            if !kinds.contains(transport) {
                kinds.push(*transport);
            }
        }
        kinds.len()
    }
}

/// Builder for [`TransportGraph`].
///
/// Edges added twice merge their transport sets.
#[derive(Clone, Debug, Default)]
pub struct GraphBuilder {
    adjacency: BTreeMap<Location, BTreeMap<Location, Transports>>,
    invalid_edge: Option<GraphError>,
}

impl GraphBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an isolated location.
    #[must_use]
    pub fn node(mut self, location: Location) -> Self {
        self.adjacency.entry(location).or_default();
        self
    }

    /// Add an undirected edge with one transport mode.
    #[must_use]
    pub fn edge(self, a: Location, b: Location, transport: Transport) -> Self {
        self.edge_with(a, b, &[transport])
    }

    /// Add an undirected edge with several transport modes.
    #[must_use]
    pub fn edge_with(self, a: Location, b: Location, transports: &[Transport]) -> Self {
        self.directed_edge_with(a, b, transports)
            .directed_edge_with(b, a, transports)
    }

    /// Add a one-way edge with one transport mode.
    #[must_use]
    pub fn directed_edge(self, from: Location, to: Location, transport: Transport) -> Self {
        self.directed_edge_with(from, to, &[transport])
    }

    /// Add a one-way edge with several transport modes.
    #[must_use]
    pub fn directed_edge_with(
        mut self,
        from: Location,
        to: Location,
        transports: &[Transport],
    ) -> Self {
        if transports.is_empty() {
            self.invalid_edge.get_or_insert(GraphError::NoTransports { from, to });
            return self;
        }

        self.adjacency.entry(to).or_default();
        let modes = self.adjacency.entry(from).or_default().entry(to).or_default();
        for transport in transports {
            if !modes.contains(transport) {
                modes.push(*transport);
            }
        }
        self
    }

    /// Finish the graph, failing if any edge was declared without transports.
    pub fn build(self) -> Result<TransportGraph, GraphError> {
        if let Some(err) = self.invalid_edge {
            return Err(err);
        }
        Ok(self.finish())
    }

    fn finish(self) -> TransportGraph {
        let adjacency = self
            .adjacency
            .into_iter()
            .map(|(from, edges)| {
                let edges = edges
                    .into_iter()
                    .map(|(to, transports)| Edge { to, transports })
                    .collect();
                (from, edges)
            })
            .collect();
        TransportGraph { adjacency }
    }
}
