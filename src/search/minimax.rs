//! Iterative-deepening minimax for the fugitive.
//!
//! ## Tree
//!
//! The fugitive maximises, the trackers minimise. Depth counts whole rounds:
//! one fugitive move plus every tracker reply. A leaf is the start of the
//! fugitive's next turn once the depth is spent, or a mid-round state where
//! no remaining tracker can move. Leaves score the fugitive move that opened
//! their round, judged against where the trackers ended up.
//!
//! ## Tracker order
//!
//! With `canonical_tracker_order`, a round expands only the lowest tracker
//! that can move, and only while the remaining trackers are far enough
//! apart that every order reaches the same positions. Trackers that could
//! free, block or share a square are expanded in every order.
//!
//! ## Iterative deepening
//!
//! 1. Depth 0 ranks root moves by the heuristic alone and always finishes
//! 2. Depths 1, 2, ... follow until `max_depth` or the soft deadline
//! 3. The deadline is checked before every child; an interrupted depth is
//!    thrown away whole and the last finished depth decides
//!
//! ## Parallelism
//!
//! Root moves are searched on the rayon pool, each with its own evaluator
//! and a full alpha-beta window. Results are collected in move order, so
//! the first best move wins ties exactly as in a sequential search.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::{Duration, Instant};

use log::{debug, info};
use rayon::prelude::*;
use rustc_hash::FxHashSet;

use crate::core::{Board, GameState, Move, Piece, Player};
use crate::error::{GameError, SearchError};

use super::agent::Agent;
use super::config::SearchConfig;
use super::heuristic::{terminal_score, Evaluator, Score, FUGITIVE_WIN, TRACKER_WIN};
use super::stats::SearchStats;

/// Why a depth was abandoned.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Abort {
    /// The soft deadline passed.
    Deadline,
    /// Another root task hit the deadline first.
    Cancelled,
    /// A move from `available_moves` failed to apply.
    Game(GameError),
}

impl From<GameError> for Abort {
    fn from(err: GameError) -> Self {
        Abort::Game(err)
    }
}

/// Minimax search agent. Plays the fugitive only.
#[derive(Clone, Debug, Default)]
pub struct MinimaxAgent {
    config: SearchConfig,
    stats: SearchStats,
}

impl MinimaxAgent {
    #[must_use]
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            stats: SearchStats::default(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Statistics of the last search.
    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Pick the best fugitive move from `state` within `budget`.
    ///
    /// ## Errors
    ///
    /// - `SearchError::GameOver` if `state` is terminal
    /// - `SearchError::NotFugitiveTurn` if trackers are still owed moves
    /// - `SearchError::NoLegalMoves` if there is nothing to choose from
    pub fn search(&mut self, state: &GameState, budget: Duration) -> Result<Move, SearchError> {
        let start = Instant::now();
        self.stats.reset();

        if state.is_terminal() {
            return Err(SearchError::GameOver);
        }
        if !state.is_fugitive_turn() {
            return Err(SearchError::NotFugitiveTurn);
        }
        let moves: Vec<Move> = state.available_moves().iter().copied().collect();
        let Some(&first) = moves.first() else {
            return Err(SearchError::NoLegalMoves);
        };
        if moves.len() == 1 {
            return Ok(first);
        }

        let nodes = AtomicU64::new(0);
        let leaves = AtomicU64::new(0);
        let deadline = start.checked_add(self.config.soft_budget(budget));

        let mut scores = self.static_ranking(state, &moves, &nodes, &leaves)?;
        let mut best = best_index(&scores);

        for depth in 1..=self.config.max_depth {
            if is_decisive(scores[best]) {
                debug!("decided at depth {}: {}", self.stats.depth_completed, scores[best]);
                break;
            }
            if deadline.is_some_and(|d| Instant::now() >= d) {
                break;
            }

            let cancelled = AtomicBool::new(false);
            let search = Search {
                config: &self.config,
                deadline,
                cancelled: &cancelled,
                nodes: &nodes,
                leaves: &leaves,
            };

            match search.root(state, &moves, depth) {
                Ok(depth_scores) => {
                    scores = depth_scores;
                    best = best_index(&scores);
                    self.stats.depth_completed = depth;
                    info!(
                        "depth {depth}: {} scores {} ({} nodes, {}ms)",
                        moves[best],
                        scores[best],
                        nodes.load(Ordering::Relaxed),
                        start.elapsed().as_millis()
                    );
                }
                Err(Abort::Game(err)) => return Err(err.into()),
                Err(abort) => {
                    debug!("depth {depth} abandoned: {abort:?}");
                    break;
                }
            }
        }

        self.stats.nodes_expanded = nodes.load(Ordering::Relaxed);
        self.stats.leaves_evaluated = leaves.load(Ordering::Relaxed);
        self.stats.best_score = scores[best];
        self.stats.time_us = start.elapsed().as_micros() as u64;

        Ok(moves[best])
    }

    /// Depth 0: every root move scored by the heuristic. Never interrupted.
    fn static_ranking(
        &self,
        state: &GameState,
        moves: &[Move],
        nodes: &AtomicU64,
        leaves: &AtomicU64,
    ) -> Result<Vec<Score>, GameError> {
        let mut eval = Evaluator::new(self.config.weights.clone());
        moves
            .iter()
            .map(|mv| {
                let child = state.advance(mv)?;
                nodes.fetch_add(1, Ordering::Relaxed);
                Ok(terminal_score(child.winners()).unwrap_or_else(|| {
                    leaves.fetch_add(1, Ordering::Relaxed);
                    eval.score_move(&child, mv)
                }))
            })
            .collect()
    }
}

impl Agent for MinimaxAgent {
    fn name(&self) -> &str {
        "minimax"
    }

    fn pick_move(&mut self, board: &dyn Board, budget: Duration) -> Result<Move, SearchError> {
        let state = rebuild_state(board)?;
        self.search(&state, budget)
    }
}

/// Rebuild a full state from the fugitive's view of the board.
///
/// The fugitive's location is the source of its available moves; everything
/// else is read from the board. The travel log is kept, so reveal timing
/// and double-move eligibility match the real game.
///
/// ## Errors
///
/// - `SearchError::GameOver` if the board has winners
/// - `SearchError::NoLegalMoves` if the board has no available moves
/// - `SearchError::NotFugitiveTurn` if the available moves are trackers'
/// - `SearchError::MissingPlayer` if a listed piece has no tickets or
///   location on the board
/// - `SearchError::Game` if the rebuilt state fails validation
pub fn rebuild_state(board: &dyn Board) -> Result<GameState, SearchError> {
    if !board.winners().is_empty() {
        return Err(SearchError::GameOver);
    }
    let first = board
        .available_moves()
        .front()
        .copied()
        .ok_or(SearchError::NoLegalMoves)?;
    if !first.piece().is_fugitive() {
        return Err(SearchError::NotFugitiveTurn);
    }

    let tickets = board
        .player_tickets(Piece::Fugitive)
        .ok_or(SearchError::MissingPlayer(Piece::Fugitive))?;
    let fugitive = Player::fugitive(tickets, first.source());

    let trackers = board
        .players()
        .into_iter()
        .filter_map(|piece| piece.tracker_id().map(|id| (piece, id)))
        .map(|(piece, id)| {
            let location = board
                .tracker_location(id)
                .ok_or(SearchError::MissingPlayer(piece))?;
            let tickets = board
                .player_tickets(piece)
                .ok_or(SearchError::MissingPlayer(piece))?;
            Ok(Player::new(piece, tickets, location))
        })
        .collect::<Result<Vec<_>, SearchError>>()?;

    let log = board.travel_log().iter().copied();
    Ok(GameState::resume(board.setup().clone(), fugitive, trackers, log)?)
}

/// Index of the first maximum.
fn best_index(scores: &[Score]) -> usize {
    let mut best = 0;
    for (i, &score) in scores.iter().enumerate().skip(1) {
        if score > scores[best] {
            best = i;
        }
    }
    best
}

/// Deeper search can't change a won or lost root.
fn is_decisive(score: Score) -> bool {
    score == FUGITIVE_WIN || score == TRACKER_WIN
}

/// One depth of search. Shared by every root task.
struct Search<'a> {
    config: &'a SearchConfig,
    deadline: Option<Instant>,
    cancelled: &'a AtomicBool,
    nodes: &'a AtomicU64,
    leaves: &'a AtomicU64,
}

impl Search<'_> {
    /// Scores of every root move at `depth` rounds, in move order.
    fn root(&self, state: &GameState, moves: &[Move], depth: u32) -> Result<Vec<Score>, Abort> {
        let weights = &self.config.weights;
        if self.config.parallel {
            moves
                .par_iter()
                .map_init(
                    || Evaluator::new(weights.clone()),
                    |eval, mv| self.root_move(eval, state, mv, depth),
                )
                .collect()
        } else {
            let mut eval = Evaluator::new(weights.clone());
            moves
                .iter()
                .map(|mv| self.root_move(&mut eval, state, mv, depth))
                .collect()
        }
    }

    fn root_move(
        &self,
        eval: &mut Evaluator,
        state: &GameState,
        mv: &Move,
        depth: u32,
    ) -> Result<Score, Abort> {
        self.checkpoint()?;
        let child = state.advance(mv)?;
        self.nodes.fetch_add(1, Ordering::Relaxed);
        self.value(eval, &child, mv, depth - 1, TRACKER_WIN, FUGITIVE_WIN)
    }

    fn checkpoint(&self) -> Result<(), Abort> {
        if self.cancelled.load(Ordering::Relaxed) {
            return Err(Abort::Cancelled);
        }
        if self.deadline.is_some_and(|d| Instant::now() >= d) {
            self.cancelled.store(true, Ordering::Relaxed);
            return Err(Abort::Deadline);
        }
        Ok(())
    }

    fn leaf(&self, eval: &mut Evaluator, state: &GameState, opening: &Move) -> Score {
        self.leaves.fetch_add(1, Ordering::Relaxed);
        eval.score_move(state, opening)
    }

    /// Minimax value of `state`. `opening` is the fugitive move that
    /// started the current round; `rounds` counts rounds still to search
    /// after this one.
    fn value(
        &self,
        eval: &mut Evaluator,
        state: &GameState,
        opening: &Move,
        rounds: u32,
        mut alpha: Score,
        mut beta: Score,
    ) -> Result<Score, Abort> {
        if let Some(score) = terminal_score(state.winners()) {
            return Ok(score);
        }

        if state.is_fugitive_turn() {
            if rounds == 0 {
                return Ok(self.leaf(eval, state, opening));
            }

            let mut best = TRACKER_WIN;
            for mv in state.available_moves() {
                self.checkpoint()?;
                let child = state.advance(mv)?;
                self.nodes.fetch_add(1, Ordering::Relaxed);

                let score = self.value(eval, &child, mv, rounds - 1, alpha, beta)?;
                best = best.max(score);
                if self.config.alpha_beta {
                    alpha = alpha.max(best);
                    if alpha >= beta {
                        break;
                    }
                }
            }
            return Ok(best);
        }

        let replies = self.tracker_replies(state);
        if replies.is_empty() {
            return Ok(self.leaf(eval, state, opening));
        }

        let mut best = FUGITIVE_WIN;
        for mv in &replies {
            self.checkpoint()?;
            let child = state.advance(mv)?;
            self.nodes.fetch_add(1, Ordering::Relaxed);

            let score = self.value(eval, &child, opening, rounds, alpha, beta)?;
            best = best.min(score);
            if self.config.alpha_beta {
                beta = beta.min(best);
                if alpha >= beta {
                    break;
                }
            }
        }
        Ok(best)
    }

    /// Tracker moves to expand mid-round.
    fn tracker_replies(&self, state: &GameState) -> Vec<Move> {
        let moves = state.available_moves();
        if !self.config.canonical_tracker_order || !replies_commute(state) {
            return moves.iter().copied().collect();
        }

        match moves.iter().map(Move::piece).min() {
            Some(next) => moves.iter().copied().filter(|mv| mv.piece() == next).collect(),
            None => Vec::new(),
        }
    }
}

/// Whether the remaining trackers' moves are independent of the order they
/// are played in.
///
/// Holds when no remaining tracker can step onto another's square and no
/// two of them share a neighbour. Then no move frees, blocks or takes a
/// square another tracker could use.
fn replies_commute(state: &GameState) -> bool {
    let graph = state.setup().graph();
    let mut claimed = FxHashSet::default();
    state
        .trackers()
        .iter()
        .filter(|tracker| state.remaining().contains(&tracker.piece()))
        .all(|tracker| {
            let at = tracker.location();
            claimed.insert(at) && graph.neighbors(at).all(|next| claimed.insert(next))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameSetup, Ticket, TicketBoard, TrackerId, Transport};
    use crate::graph::{Location, TransportGraph};

    fn taxis(n: u32) -> TicketBoard {
        TicketBoard::new().with(Ticket::Taxi, n)
    }

    /// 4 - 2 - 1 - 3 - 5: the tracker waits at 4.
    fn fork_state() -> GameState {
        let graph = TransportGraph::from_edges([
            (1, 2, Transport::Taxi),
            (1, 3, Transport::Taxi),
            (2, 4, Transport::Taxi),
            (3, 5, Transport::Taxi),
        ]);
        let setup = GameSetup::new(graph, vec![false; 6]).unwrap();
        GameState::new(
            setup,
            Player::fugitive(taxis(6), Location(1)),
            vec![Player::tracker(TrackerId(0), taxis(6), Location(4))],
        )
        .unwrap()
    }

    fn agent(depth: u32) -> MinimaxAgent {
        MinimaxAgent::new(SearchConfig::default().with_max_depth(depth).with_parallel(false))
    }

    #[test]
    fn test_best_index_prefers_first() {
        assert_eq!(best_index(&[3, 7, 7, 1]), 1);
        assert_eq!(best_index(&[TRACKER_WIN]), 0);
        assert_eq!(best_index(&[TRACKER_WIN, TRACKER_WIN]), 0);
    }

    #[test]
    fn test_moves_away_from_tracker() {
        let state = fork_state();
        for depth in 0..=2 {
            let mut agent = agent(depth);
            let mv = agent.search(&state, Duration::from_secs(10)).unwrap();
            assert_eq!(mv.destination(), Location(3), "depth {depth}");
        }
    }

    #[test]
    fn test_stats_recorded() {
        let state = fork_state();
        let mut agent = agent(2);
        agent.search(&state, Duration::from_secs(10)).unwrap();

        let stats = agent.stats();
        assert_eq!(stats.depth_completed, 2);
        assert!(stats.nodes_expanded > 0);
        assert!(stats.leaves_evaluated > 0);
    }

    #[test]
    fn test_zero_budget_still_answers() {
        let state = fork_state();
        let mut agent = agent(5);
        let mv = agent.search(&state, Duration::ZERO).unwrap();

        assert!(state.available_moves().iter().any(|legal| *legal == mv));
        assert_eq!(agent.stats().depth_completed, 0);
    }

    #[test]
    fn test_rejects_tracker_turn() {
        let state = fork_state();
        let mv = Move::single(Piece::Fugitive, Location(1), Ticket::Taxi, Location(3));
        let next = state.advance(&mv).unwrap();

        let err = agent(1).search(&next, Duration::from_secs(1)).unwrap_err();
        assert_eq!(err, SearchError::NotFugitiveTurn);
    }

    #[test]
    fn test_alpha_beta_matches_plain_minimax() {
        let state = fork_state();
        let mut pruned = agent(3);
        let mut plain = MinimaxAgent::new(
            SearchConfig::default()
                .with_max_depth(3)
                .with_parallel(false)
                .with_alpha_beta(false),
        );

        let a = pruned.search(&state, Duration::from_secs(30)).unwrap();
        let b = plain.search(&state, Duration::from_secs(30)).unwrap();
        assert_eq!(a, b);
        assert_eq!(pruned.stats().best_score, plain.stats().best_score);
        assert!(pruned.stats().nodes_expanded <= plain.stats().nodes_expanded);
    }

    /// Trackers at 1 and 2 are neighbours: 2 can step aside to 5 and let 1
    /// move in behind it.
    fn crowded_state() -> GameState {
        let graph = TransportGraph::from_edges([
            (1, 2, Transport::Taxi),
            (1, 4, Transport::Taxi),
            (2, 3, Transport::Taxi),
            (2, 5, Transport::Taxi),
            (5, 11, Transport::Taxi),
            (10, 11, Transport::Taxi),
            (10, 12, Transport::Taxi),
        ]);
        let setup = GameSetup::new(graph, vec![false; 6]).unwrap();
        GameState::new(
            setup,
            Player::fugitive(taxis(6), Location(10)),
            vec![
                Player::tracker(TrackerId(0), taxis(6), Location(1)),
                Player::tracker(TrackerId(1), taxis(6), Location(2)),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_neighbouring_trackers_do_not_commute() {
        let state = crowded_state();
        let mv = Move::single(Piece::Fugitive, Location(10), Ticket::Taxi, Location(12));
        let next = state.advance(&mv).unwrap();
        assert!(!replies_commute(&next));

        let lone = fork_state()
            .advance(&Move::single(Piece::Fugitive, Location(1), Ticket::Taxi, Location(3)))
            .unwrap();
        assert!(replies_commute(&lone));
    }

    #[test]
    fn test_canonical_order_matches_full_expansion() {
        let state = crowded_state();
        for depth in 1..=2 {
            let base = SearchConfig::default()
                .with_max_depth(depth)
                .with_parallel(false)
                .with_alpha_beta(false);
            let mut canonical = MinimaxAgent::new(base.clone().with_canonical_tracker_order(true));
            let mut full = MinimaxAgent::new(base.with_canonical_tracker_order(false));

            let a = canonical.search(&state, Duration::from_secs(30)).unwrap();
            let b = full.search(&state, Duration::from_secs(30)).unwrap();
            assert_eq!(a, b, "depth {depth}");
            assert_eq!(canonical.stats().best_score, full.stats().best_score, "depth {depth}");
        }
    }

    #[test]
    fn test_move_outside_available_moves_is_an_error() {
        let state = fork_state();
        let bogus = Move::single(Piece::Fugitive, Location(1), Ticket::Taxi, Location(5));
        let agent = agent(1);
        let nodes = AtomicU64::new(0);
        let leaves = AtomicU64::new(0);

        let ranked = agent.static_ranking(&state, &[bogus], &nodes, &leaves);
        assert_eq!(ranked, Err(GameError::IllegalMove(bogus)));

        let cancelled = AtomicBool::new(false);
        let search = Search {
            config: agent.config(),
            deadline: None,
            cancelled: &cancelled,
            nodes: &nodes,
            leaves: &leaves,
        };
        assert_eq!(
            search.root(&state, &[bogus], 1),
            Err(Abort::Game(GameError::IllegalMove(bogus)))
        );
    }

    #[test]
    fn test_rebuild_keeps_log() {
        let state = fork_state();
        let mv = Move::single(Piece::Fugitive, Location(1), Ticket::Taxi, Location(3));
        let next = state.advance(&mv).unwrap();
        let reply = Move::single(Piece::tracker(0), Location(4), Ticket::Taxi, Location(2));
        let next = next.advance(&reply).unwrap();

        let rebuilt = rebuild_state(&next).unwrap();
        assert_eq!(rebuilt.travel_log(), next.travel_log());
        assert_eq!(rebuilt.fugitive(), next.fugitive());
        assert_eq!(rebuilt.trackers(), next.trackers());
        assert_eq!(rebuilt.available_moves(), next.available_moves());
    }
}
