//! Uniformly random agent.

use std::time::Duration;

use crate::core::{Board, GameRng, Move};
use crate::error::SearchError;

use super::agent::Agent;

/// Picks a uniformly random legal move. Plays either side.
///
/// Deterministic for a given seed and sequence of boards.
#[derive(Clone, Debug)]
pub struct RandomAgent {
    rng: GameRng,
}

impl RandomAgent {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed),
        }
    }

    #[must_use]
    pub fn from_rng(rng: GameRng) -> Self {
        Self { rng }
    }
}

impl Agent for RandomAgent {
    fn name(&self) -> &str {
        "random"
    }

    fn pick_move(&mut self, board: &dyn Board, _budget: Duration) -> Result<Move, SearchError> {
        if !board.winners().is_empty() {
            return Err(SearchError::GameOver);
        }
        let moves = board.available_moves();
        if moves.is_empty() {
            return Err(SearchError::NoLegalMoves);
        }
        let index = self.rng.gen_range_usize(0..moves.len());
        moves.get(index).copied().ok_or(SearchError::NoLegalMoves)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameSetup, GameState, Player, TicketBoard, TrackerId, Transport};
    use crate::graph::{Location, TransportGraph};

    fn state() -> GameState {
        let graph = TransportGraph::from_edges([
            (1, 2, Transport::Taxi),
            (1, 3, Transport::Bus),
            (3, 4, Transport::Taxi),
        ]);
        let setup = GameSetup::new(graph, vec![false; 5]).unwrap();
        GameState::new(
            setup,
            Player::fugitive(TicketBoard::fugitive_default(), Location(1)),
            vec![Player::tracker(TrackerId(0), TicketBoard::tracker_default(), Location(4))],
        )
        .unwrap()
    }

    #[test]
    fn test_picks_legal_moves() {
        let state = state();
        let mut agent = RandomAgent::new(7);
        for _ in 0..20 {
            let mv = agent.pick_move(&state, Duration::ZERO).unwrap();
            assert!(state.available_moves().iter().any(|legal| *legal == mv));
        }
    }

    #[test]
    fn test_same_seed_same_moves() {
        let state = state();
        let mut a = RandomAgent::new(99);
        let mut b = RandomAgent::new(99);
        for _ in 0..10 {
            assert_eq!(
                a.pick_move(&state, Duration::ZERO).unwrap(),
                b.pick_move(&state, Duration::ZERO).unwrap()
            );
        }
    }
}
