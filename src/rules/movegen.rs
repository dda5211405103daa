//! Legal move generation.
//!
//! Generation never looks at whose turn it is; callers decide which pieces
//! to ask about. Tracker locations are passed as `occupied`: no piece may
//! move onto a tracker. The fugitive's own location is never occupied.

use rustc_hash::FxHashSet;

use crate::core::{Move, Player, Ticket};
use crate::graph::{Location, TransportGraph};

/// Every legal single hop for `player` starting at `source`.
///
/// Moves come out in neighbour order, then transport order, with the secret
/// variant last for each neighbour. Duplicates (a ferry edge plus a secret
/// ticket both yield the same secret move) are dropped, keeping the first.
pub fn legal_single_moves(
    graph: &TransportGraph,
    occupied: &[Location],
    player: &Player,
    source: Location,
) -> Vec<Move> {
    let mut seen = FxHashSet::default();
    let mut moves = Vec::new();

    for edge in graph.edges(source) {
        if occupied.contains(&edge.to) {
            continue;
        }

        let secret = player.has(Ticket::Secret).then_some(Ticket::Secret);
        let tickets = edge
            .transports
            .iter()
            .map(|transport| transport.required_ticket())
            .filter(|&ticket| player.has(ticket))
            .chain(secret);

        for ticket in tickets {
            let mv = Move::single(player.piece(), source, ticket, edge.to);
            if seen.insert(mv) {
                moves.push(mv);
            }
        }
    }

    moves
}

/// True if `player` has at least one legal single hop from its location.
///
/// Short-circuits; cheaper than generating the full list.
#[must_use]
pub fn has_single_move(graph: &TransportGraph, occupied: &[Location], player: &Player) -> bool {
    let secret = player.has(Ticket::Secret);
    graph
        .edges(player.location())
        .iter()
        .filter(|edge| !occupied.contains(&edge.to))
        .any(|edge| {
            secret
                || edge
                    .transports
                    .iter()
                    .any(|transport| player.has(transport.required_ticket()))
        })
}

/// Every legal double move for the fugitive.
///
/// Empty unless `player` is the fugitive, holds a double ticket, and at
/// least two fugitive moves are left in the reveal schedule. The second hop
/// is generated with the first hop's ticket already spent, so a single
/// remaining ticket of a type can't pay for both hops.
pub fn legal_double_moves(
    graph: &TransportGraph,
    occupied: &[Location],
    player: &Player,
    moves_left: usize,
) -> Vec<Move> {
    if !player.is_fugitive() || !player.has(Ticket::Double) || moves_left < 2 {
        return Vec::new();
    }

    let source = player.location();
    let mut seen = FxHashSet::default();
    let mut moves = Vec::new();

    for first in legal_single_moves(graph, occupied, player, source) {
        let Move::Single(first) = first else {
            continue;
        };
        let after_first = player.use_ticket(first.ticket);

        for second in legal_single_moves(graph, occupied, &after_first, first.destination) {
            let Move::Single(second) = second else {
                continue;
            };
            let mv = Move::double(
                source,
                first.ticket,
                first.destination,
                second.ticket,
                second.destination,
            );
            if seen.insert(mv) {
                moves.push(mv);
            }
        }
    }

    moves
}
