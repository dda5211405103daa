//! Shared fixtures for integration tests.

#![allow(dead_code)]

use pursuit_engine::core::{
    GameSetup, GameState, LogEntry, Move, Piece, Player, Ticket, TicketBoard, TrackerId,
    Transport,
};
use pursuit_engine::graph::{Location, TransportGraph};

/// 30 locations on a taxi ring, with bus chords every 5, two underground
/// lines and one ferry.
pub fn ring_with_chords() -> TransportGraph {
    let mut builder = TransportGraph::builder();
    for i in 1..=30u32 {
        builder = builder.edge(Location(i), Location(i % 30 + 1), Transport::Taxi);
    }
    for i in (1..=30u32).step_by(5) {
        builder = builder.edge(Location(i), Location((i + 9) % 30 + 1), Transport::Bus);
    }
    builder
        .edge(Location(1), Location(16), Transport::Underground)
        .edge(Location(8), Location(23), Transport::Underground)
        .edge(Location(5), Location(20), Transport::Ferry)
        .build()
        .expect("ring edges all have transports")
}

/// Taxi-only path 1 - 2 - ... - n.
pub fn line(n: u32) -> TransportGraph {
    TransportGraph::from_edges((1..n).map(|i| (i, i + 1, Transport::Taxi)))
}

pub fn taxis(n: u32) -> TicketBoard {
    TicketBoard::new().with(Ticket::Taxi, n)
}

pub fn tracker(id: u8, tickets: TicketBoard, at: u32) -> Player {
    Player::tracker(TrackerId(id), tickets, Location(at))
}

pub fn hop(piece: Piece, from: u32, ticket: Ticket, to: u32) -> Move {
    Move::single(piece, Location(from), ticket, Location(to))
}

/// Standard tickets on the ring: fugitive at 1, trackers spread out.
pub fn ring_game(trackers: u8) -> GameState {
    let setup = GameSetup::standard(ring_with_chords()).expect("standard setup");
    let starts = [11u32, 21, 6, 26, 16];
    let players = (0..trackers)
        .map(|id| tracker(id, TicketBoard::tracker_default(), starts[usize::from(id)]))
        .collect();
    GameState::new(
        setup,
        Player::fugitive(TicketBoard::fugitive_default(), Location(1)),
        players,
    )
    .expect("valid ring game")
}

/// Smaller ring game: no secret or double tickets, so the tree stays small.
pub fn plain_ring_game() -> GameState {
    let setup = GameSetup::standard(ring_with_chords()).expect("standard setup");
    let fugitive_tickets = TicketBoard::new()
        .with(Ticket::Taxi, 10)
        .with(Ticket::Bus, 5)
        .with(Ticket::Underground, 2);
    GameState::new(
        setup,
        Player::fugitive(fugitive_tickets, Location(3)),
        vec![
            tracker(0, TicketBoard::tracker_default(), 12),
            tracker(1, TicketBoard::tracker_default(), 24),
        ],
    )
    .expect("valid plain ring game")
}

/// Every state invariant that must hold after any sequence of moves.
pub fn assert_invariants(state: &GameState) {
    let trackers = state.trackers();

    let mut locations: Vec<Location> = state.tracker_locations();
    locations.sort();
    locations.dedup();
    assert_eq!(locations.len(), trackers.len(), "trackers share a location");

    for tracker in trackers {
        let legal = Ticket::ALL
            .into_iter()
            .all(|ticket| ticket.allowed_for_trackers() || !tracker.has(ticket));
        assert!(legal, "{} holds fugitive-only tickets", tracker.piece());
    }

    assert!(state.travel_log().len() <= state.setup().rounds());
    assert!(!state.remaining().is_empty());

    if state.is_terminal() {
        assert!(state.available_moves().is_empty());
    } else {
        for mv in state.available_moves() {
            assert!(state.remaining().contains(&mv.piece()), "{mv} is out of turn");
        }
    }
}

/// Ticket and log accounting of one transition.
pub fn assert_transition(before: &GameState, mv: &Move, after: &GameState) {
    let mover = |state: &GameState| {
        state
            .player(mv.piece())
            .map(Player::tickets)
            .expect("mover exists")
    };
    let moved_before = mover(before);
    let moved_after = mover(after);

    let mut spent = TicketBoard::new();
    for ticket in mv.tickets() {
        spent = spent.given(ticket);
    }
    if mv.is_double() {
        spent = spent.given(Ticket::Double);
    }
    for ticket in Ticket::ALL {
        assert_eq!(
            moved_after[ticket] + spent[ticket],
            moved_before[ticket],
            "{mv}: {ticket} tickets"
        );
    }

    let fugitive_before = before.fugitive().tickets();
    let fugitive_after = after.fugitive().tickets();
    match mv {
        Move::Single(single) if single.piece.is_tracker() => {
            for ticket in Ticket::ALL {
                let gift = u32::from(ticket == single.ticket);
                assert_eq!(fugitive_after[ticket], fugitive_before[ticket] + gift);
            }
            assert_eq!(after.travel_log(), before.travel_log());
        }
        _ => {
            let added = if mv.is_double() { 2 } else { 1 };
            let old = before.travel_log().len();
            assert_eq!(after.travel_log().len(), old + added);

            for (offset, ticket) in mv.tickets().into_iter().enumerate() {
                let index = old + offset;
                let entry = after.travel_log()[index];
                assert_eq!(entry.ticket(), ticket);
                assert_eq!(entry.is_revealed(), before.setup().is_reveal(index));
            }
            if let Some(LogEntry::Revealed { location, .. }) = after.travel_log().back() {
                assert_eq!(*location, mv.destination());
            }
        }
    }

    assert_eq!(after.player(mv.piece()).map(Player::location), Some(mv.destination()));
}
