//! Win evaluation.
//!
//! Rules, in priority order:
//!
//! 1. A tracker on the fugitive's location: trackers win. Checked on every
//!    state, not only on the fugitive's turn.
//! 2. Fugitive's turn and the fugitive cannot move: trackers win.
//! 3. Fugitive's turn and the travel log is full: fugitive wins.
//! 4. Fugitive's turn and no tracker can move: fugitive wins.
//! 5. Otherwise the game goes on.
//!
//! Rules 2-4 wait for the fugitive's turn, so a round is always finished
//! before the game can end by exhaustion.

use im::OrdSet;

use crate::core::{GameSetup, Piece, Player};

use super::movegen::has_single_move;

/// Result of evaluating a state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// No winner yet.
    Undecided,
    /// The fugitive evaded capture.
    FugitiveWins,
    /// Every tracker wins together.
    TrackersWin,
}

impl Outcome {
    /// The winning pieces, given the trackers in play.
    #[must_use]
    pub fn winners<'a>(self, trackers: impl IntoIterator<Item = &'a Player>) -> OrdSet<Piece> {
        match self {
            Outcome::Undecided => OrdSet::new(),
            Outcome::FugitiveWins => OrdSet::unit(Piece::Fugitive),
            Outcome::TrackersWin => trackers.into_iter().map(Player::piece).collect(),
        }
    }
}

/// Inputs to [`decide`], borrowed from a state under construction.
pub struct WinCheck<'a> {
    pub setup: &'a GameSetup,
    pub fugitive: &'a Player,
    pub trackers: &'a [Player],
    pub log_len: usize,
    /// Remaining set is exactly `{fugitive}`.
    pub fugitive_turn: bool,
    /// The fugitive has at least one legal move. Only read on its turn.
    pub fugitive_can_move: bool,
}

/// Decide the outcome of a state.
#[must_use]
pub fn decide(check: &WinCheck<'_>) -> Outcome {
    let fugitive_at = check.fugitive.location();
    if check.trackers.iter().any(|t| t.location() == fugitive_at) {
        return Outcome::TrackersWin;
    }

    if !check.fugitive_turn {
        return Outcome::Undecided;
    }

    if !check.fugitive_can_move {
        return Outcome::TrackersWin;
    }

    if check.log_len >= check.setup.rounds() {
        return Outcome::FugitiveWins;
    }

    let occupied: Vec<_> = check.trackers.iter().map(Player::location).collect();
    let graph = check.setup.graph();
    if check
        .trackers
        .iter()
        .all(|tracker| !has_single_move(graph, &occupied, tracker))
    {
        return Outcome::FugitiveWins;
    }

    Outcome::Undecided
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Ticket, TicketBoard, TrackerId, Transport};
    use crate::graph::{Location, TransportGraph};

    fn setup(rounds: usize) -> GameSetup {
        let graph = TransportGraph::from_edges([
            (1, 2, Transport::Taxi),
            (2, 3, Transport::Taxi),
            (3, 4, Transport::Taxi),
        ]);
        GameSetup::new(graph, vec![false; rounds]).unwrap()
    }

    fn taxis(n: u32) -> TicketBoard {
        TicketBoard::new().with(Ticket::Taxi, n)
    }

    fn check<'a>(
        setup: &'a GameSetup,
        fugitive: &'a Player,
        trackers: &'a [Player],
        log_len: usize,
        fugitive_turn: bool,
    ) -> Outcome {
        decide(&WinCheck {
            setup,
            fugitive,
            trackers,
            log_len,
            fugitive_turn,
            fugitive_can_move: true,
        })
    }

    #[test]
    fn test_capture_dominates_mid_round() {
        let setup = setup(3);
        let fugitive = Player::fugitive(taxis(1), Location(2));
        let trackers = [Player::tracker(TrackerId(0), taxis(1), Location(2))];
        assert_eq!(check(&setup, &fugitive, &trackers, 3, false), Outcome::TrackersWin);
    }

    #[test]
    fn test_full_log_waits_for_fugitive_turn() {
        let setup = setup(1);
        let fugitive = Player::fugitive(taxis(1), Location(1));
        let trackers = [Player::tracker(TrackerId(0), taxis(1), Location(4))];

        assert_eq!(check(&setup, &fugitive, &trackers, 1, false), Outcome::Undecided);
        assert_eq!(check(&setup, &fugitive, &trackers, 1, true), Outcome::FugitiveWins);
    }

    #[test]
    fn test_stuck_fugitive_loses_before_full_log_wins() {
        let setup = setup(1);
        let fugitive = Player::fugitive(TicketBoard::new(), Location(1));
        let trackers = [Player::tracker(TrackerId(0), taxis(1), Location(4))];
        let outcome = decide(&WinCheck {
            setup: &setup,
            fugitive: &fugitive,
            trackers: &trackers,
            log_len: 1,
            fugitive_turn: true,
            fugitive_can_move: false,
        });
        assert_eq!(outcome, Outcome::TrackersWin);
    }

    #[test]
    fn test_stuck_trackers() {
        let setup = setup(5);
        let fugitive = Player::fugitive(taxis(1), Location(1));
        let trackers = [
            Player::tracker(TrackerId(0), TicketBoard::new(), Location(3)),
            Player::tracker(TrackerId(1), taxis(0), Location(4)),
        ];
        assert_eq!(check(&setup, &fugitive, &trackers, 1, true), Outcome::FugitiveWins);
        assert_eq!(check(&setup, &fugitive, &trackers, 1, false), Outcome::Undecided);
    }

    #[test]
    fn test_one_mobile_tracker_keeps_game_going() {
        let setup = setup(5);
        let fugitive = Player::fugitive(taxis(1), Location(1));
        let trackers = [
            Player::tracker(TrackerId(0), TicketBoard::new(), Location(3)),
            Player::tracker(TrackerId(1), taxis(1), Location(4)),
        ];
        // Tracker 1 is blocked by tracker 0 at 3 and has nowhere else to go.
        assert_eq!(check(&setup, &fugitive, &trackers, 1, true), Outcome::FugitiveWins);

        let trackers = [Player::tracker(TrackerId(1), taxis(1), Location(4))];
        assert_eq!(check(&setup, &fugitive, &trackers, 1, true), Outcome::Undecided);
    }

    #[test]
    fn test_outcome_winners() {
        let trackers = [
            Player::tracker(TrackerId(0), taxis(1), Location(3)),
            Player::tracker(TrackerId(1), taxis(1), Location(4)),
        ];
        let winners = Outcome::TrackersWin.winners(trackers.iter());
        assert_eq!(winners.len(), 2);
        assert!(winners.contains(&Piece::tracker(1)));
        assert_eq!(Outcome::FugitiveWins.winners(trackers.iter()), OrdSet::unit(Piece::Fugitive));
        assert!(Outcome::Undecided.winners(trackers.iter()).is_empty());
    }
}
