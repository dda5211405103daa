//! Immutable game state.
//!
//! ## Lifecycle
//!
//! A state is created once at game start with [`GameState::new`] (or
//! [`GameState::resume`] from a known travel log) and from then on only
//! through [`GameState::advance`], which returns a new, independent state.
//! Nothing is ever changed in place.
//!
//! ## Derivation
//!
//! Winners and legal moves are derived once, when a state is built:
//!
//! 1. Candidate moves for the pieces owed a move this round
//! 2. Winners, from the player values and the candidate moves
//! 3. Exposed moves: empty if there are winners, the candidates otherwise
//!
//! ## Cloning
//!
//! Collections are `im` persistent structures and the setup is reference
//! counted, so cloning a state is cheap. The search clones heavily.

use im::{OrdSet, Vector};
use log::debug;

use super::moves::Move;
use super::piece::{Piece, TrackerId};
use super::player::Player;
use super::setup::GameSetup;
use super::ticket::Ticket;
use super::travel_log::LogEntry;
use crate::error::{GameError, SetupError};
use crate::graph::Location;
use crate::rules::{self, WinCheck};

/// Complete state of one game.
#[derive(Clone, Debug)]
pub struct GameState {
    setup: GameSetup,
    fugitive: Player,
    trackers: Vector<Player>,
    log: Vector<LogEntry>,
    /// Pieces still owed a move this round. Never empty.
    remaining: OrdSet<Piece>,
    winners: OrdSet<Piece>,
    moves: Vector<Move>,
}

impl GameState {
    /// Start a new game. The fugitive moves first.
    ///
    /// ## Errors
    ///
    /// Any `SetupError` describing why the players can't start a game on
    /// this setup: a tracker in the fugitive slot, a fugitive among the
    /// trackers, trackers with secret or double tickets, duplicate
    /// trackers or tracker locations, or a player off the graph.
    pub fn new(
        setup: GameSetup,
        fugitive: Player,
        trackers: Vec<Player>,
    ) -> Result<Self, SetupError> {
        Self::resume(setup, fugitive, trackers, Vec::new())
    }

    /// Continue a game at the start of a round, with `log` already played.
    ///
    /// The reveal schedule position follows the log, so the next fugitive
    /// move is revealed according to `schedule[log.len()]`.
    ///
    /// ## Errors
    ///
    /// As [`GameState::new`], plus `SetupError::LogOverflow` if the log is
    /// longer than the reveal schedule.
    pub fn resume(
        setup: GameSetup,
        fugitive: Player,
        trackers: Vec<Player>,
        log: impl IntoIterator<Item = LogEntry>,
    ) -> Result<Self, SetupError> {
        let log: Vector<LogEntry> = log.into_iter().collect();
        validate(&setup, &fugitive, &trackers, log.len())?;

        Ok(Self::from_parts(
            setup,
            fugitive,
            trackers.into_iter().collect(),
            log,
            OrdSet::unit(Piece::Fugitive),
        ))
    }

    /// Build a state and derive its winners and legal moves.
    fn from_parts(
        setup: GameSetup,
        fugitive: Player,
        trackers: Vector<Player>,
        log: Vector<LogEntry>,
        remaining: OrdSet<Piece>,
    ) -> Self {
        let fugitive_turn = remaining.len() == 1 && remaining.contains(&Piece::Fugitive);
        let occupied: Vec<Location> = trackers.iter().map(Player::location).collect();
        let graph = setup.graph();

        let candidates: Vec<Move> = if fugitive_turn {
            let moves_left = setup.rounds().saturating_sub(log.len());
            let mut moves =
                rules::legal_single_moves(graph, &occupied, &fugitive, fugitive.location());
            moves.extend(rules::legal_double_moves(graph, &occupied, &fugitive, moves_left));
            moves
        } else {
            trackers
                .iter()
                .filter(|tracker| remaining.contains(&tracker.piece()))
                .flat_map(|tracker| {
                    rules::legal_single_moves(graph, &occupied, tracker, tracker.location())
                })
                .collect()
        };

        let tracker_slice: Vec<Player> = trackers.iter().copied().collect();
        let outcome = rules::decide(&WinCheck {
            setup: &setup,
            fugitive: &fugitive,
            trackers: &tracker_slice,
            log_len: log.len(),
            fugitive_turn,
            fugitive_can_move: !candidates.is_empty(),
        });

        let winners = outcome.winners(tracker_slice.iter());
        let moves = if winners.is_empty() {
            candidates.into_iter().collect()
        } else {
            Vector::new()
        };

        Self {
            setup,
            fugitive,
            trackers,
            log,
            remaining,
            winners,
            moves,
        }
    }

    /// Apply a legal move and return the resulting state.
    ///
    /// ## Errors
    ///
    /// `GameError::IllegalMove` if `mv` is not among [`available_moves`].
    /// `self` is left untouched either way.
    ///
    /// [`available_moves`]: GameState::available_moves
    pub fn advance(&self, mv: &Move) -> Result<GameState, GameError> {
        if !self.moves.iter().any(|legal| legal == mv) {
            return Err(GameError::IllegalMove(*mv));
        }

        let next = match mv {
            Move::Single(single) if single.piece.is_fugitive() => {
                let mut log = self.log.clone();
                log.push_back(LogEntry::for_move(
                    single.ticket,
                    single.destination,
                    self.setup.is_reveal(log.len()),
                ));
                let fugitive = self.fugitive.use_ticket(single.ticket).at(single.destination);
                self.after_fugitive(fugitive, log)
            }
            Move::Single(single) => {
                let index = self
                    .tracker_index(single.piece)
                    .ok_or(GameError::IllegalMove(*mv))?;
                let mut trackers = self.trackers.clone();
                let moved = trackers[index].use_ticket(single.ticket).at(single.destination);
                trackers.set(index, moved);

                let mut remaining = self.remaining.without(&single.piece);
                if remaining.is_empty() {
                    remaining = OrdSet::unit(Piece::Fugitive);
                }

                Self::from_parts(
                    self.setup.clone(),
                    self.fugitive.give_ticket(single.ticket),
                    trackers,
                    self.log.clone(),
                    remaining,
                )
            }
            Move::Double(double) => {
                let mut log = self.log.clone();
                log.push_back(LogEntry::for_move(
                    double.ticket1,
                    double.destination1,
                    self.setup.is_reveal(log.len()),
                ));
                log.push_back(LogEntry::for_move(
                    double.ticket2,
                    double.destination2,
                    self.setup.is_reveal(log.len()),
                ));
                let fugitive = self
                    .fugitive
                    .use_ticket(double.ticket1)
                    .use_ticket(double.ticket2)
                    .use_ticket(Ticket::Double)
                    .at(double.destination2);
                self.after_fugitive(fugitive, log)
            }
        };

        debug!(
            "{mv}; log {}/{}, remaining {:?}, winners {:?}",
            next.log.len(),
            next.setup.rounds(),
            next.remaining,
            next.winners
        );

        Ok(next)
    }

    /// State after the fugitive has moved: trackers that can move are owed
    /// a move, or the fugitive moves again if none can.
    fn after_fugitive(&self, fugitive: Player, log: Vector<LogEntry>) -> GameState {
        let occupied = self.tracker_locations();
        let graph = self.setup.graph();
        let mut remaining: OrdSet<Piece> = self
            .trackers
            .iter()
            .filter(|tracker| rules::has_single_move(graph, &occupied, tracker))
            .map(Player::piece)
            .collect();
        if remaining.is_empty() {
            remaining = OrdSet::unit(Piece::Fugitive);
        }

        Self::from_parts(
            self.setup.clone(),
            fugitive,
            self.trackers.clone(),
            log,
            remaining,
        )
    }

    fn tracker_index(&self, piece: Piece) -> Option<usize> {
        self.trackers.iter().position(|tracker| tracker.piece() == piece)
    }

    // === Accessors ===

    #[must_use]
    pub fn setup(&self) -> &GameSetup {
        &self.setup
    }

    #[must_use]
    pub fn fugitive(&self) -> &Player {
        &self.fugitive
    }

    /// Trackers in the order they were given at game start.
    #[must_use]
    pub fn trackers(&self) -> &Vector<Player> {
        &self.trackers
    }

    #[must_use]
    pub fn tracker(&self, id: TrackerId) -> Option<&Player> {
        self.player(Piece::Tracker(id))
    }

    /// Look up a player by piece.
    #[must_use]
    pub fn player(&self, piece: Piece) -> Option<&Player> {
        match piece {
            Piece::Fugitive => Some(&self.fugitive),
            Piece::Tracker(_) => self.trackers.iter().find(|tracker| tracker.piece() == piece),
        }
    }

    /// Every piece in the game, fugitive first.
    #[must_use]
    pub fn pieces(&self) -> OrdSet<Piece> {
        std::iter::once(Piece::Fugitive)
            .chain(self.trackers.iter().map(Player::piece))
            .collect()
    }

    #[must_use]
    pub fn travel_log(&self) -> &Vector<LogEntry> {
        &self.log
    }

    /// Pieces still owed a move this round.
    #[must_use]
    pub fn remaining(&self) -> &OrdSet<Piece> {
        &self.remaining
    }

    #[must_use]
    pub fn winners(&self) -> &OrdSet<Piece> {
        &self.winners
    }

    /// Legal moves. Empty once the game is over.
    #[must_use]
    pub fn available_moves(&self) -> &Vector<Move> {
        &self.moves
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        !self.winners.is_empty()
    }

    #[must_use]
    pub fn is_fugitive_turn(&self) -> bool {
        self.remaining.len() == 1 && self.remaining.contains(&Piece::Fugitive)
    }

    /// Fugitive moves left in the reveal schedule.
    #[must_use]
    pub fn moves_left(&self) -> usize {
        self.setup.rounds().saturating_sub(self.log.len())
    }

    #[must_use]
    pub fn tracker_locations(&self) -> Vec<Location> {
        self.trackers.iter().map(Player::location).collect()
    }
}

fn validate(
    setup: &GameSetup,
    fugitive: &Player,
    trackers: &[Player],
    log_len: usize,
) -> Result<(), SetupError> {
    if !fugitive.is_fugitive() {
        return Err(SetupError::NotAFugitive(fugitive.piece()));
    }

    let graph = setup.graph();
    if !graph.contains(fugitive.location()) {
        return Err(SetupError::UnknownLocation {
            piece: fugitive.piece(),
            location: fugitive.location(),
        });
    }

    let mut pieces = OrdSet::new();
    let mut locations = OrdSet::new();
    for tracker in trackers {
        let piece = tracker.piece();
        if piece.is_fugitive() {
            return Err(SetupError::FugitiveAmongTrackers);
        }
        if let Some(ticket) = Ticket::ALL
            .into_iter()
            .find(|&ticket| !ticket.allowed_for_trackers() && tracker.has(ticket))
        {
            return Err(SetupError::ForbiddenTrackerTicket { piece, ticket });
        }
        if pieces.insert(piece).is_some() {
            return Err(SetupError::DuplicateTracker(piece));
        }
        if locations.insert(tracker.location()).is_some() {
            return Err(SetupError::DuplicateTrackerLocation(tracker.location()));
        }
        if !graph.contains(tracker.location()) {
            return Err(SetupError::UnknownLocation {
                piece,
                location: tracker.location(),
            });
        }
    }

    if log_len > setup.rounds() {
        return Err(SetupError::LogOverflow {
            log: log_len,
            schedule: setup.rounds(),
        });
    }

    Ok(())
}
