//! Observable game model.
//!
//! `GameState` is a pure value. `GameModel` is the one mutable place in the
//! crate: it holds the current state and tells registered observers about
//! every move. Observers are called in registration order, after the new
//! state is in place.

use std::collections::BTreeMap;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::core::{GameState, Move};
use crate::error::ModelError;

/// Unique identifier for a registered observer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ObserverId(pub u32);

impl ObserverId {
    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for ObserverId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Observer({})", self.0)
    }
}

/// What just happened to the model.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Event {
    /// A move was made and the game goes on.
    MoveMade,
    /// A move was made and the game is over.
    GameOver,
}

/// Listener for model changes.
pub trait Observer {
    fn on_model_changed(&mut self, state: &GameState, event: Event);
}

/// Current game state plus its observers.
pub struct GameModel {
    state: GameState,
    observers: BTreeMap<ObserverId, Box<dyn Observer>>,
    next_id: u32,
}

impl GameModel {
    #[must_use]
    pub fn new(state: GameState) -> Self {
        Self {
            state,
            observers: BTreeMap::new(),
            next_id: 0,
        }
    }

    /// The current state.
    #[must_use]
    pub fn current_board(&self) -> &GameState {
        &self.state
    }

    /// Register an observer. Ids are never reused.
    pub fn register_observer(&mut self, observer: Box<dyn Observer>) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.observers.insert(id, observer);
        id
    }

    /// Remove an observer and hand it back.
    ///
    /// ## Errors
    ///
    /// `ModelError::UnknownObserver` if `id` is not registered.
    pub fn unregister_observer(&mut self, id: ObserverId) -> Result<Box<dyn Observer>, ModelError> {
        self.observers
            .remove(&id)
            .ok_or(ModelError::UnknownObserver(id))
    }

    #[must_use]
    pub fn observer_ids(&self) -> Vec<ObserverId> {
        self.observers.keys().copied().collect()
    }

    /// Play a move and notify every observer.
    ///
    /// ## Errors
    ///
    /// `ModelError::Game` if the move is illegal. The state is unchanged and
    /// no observer is called.
    pub fn choose_move(&mut self, mv: &Move) -> Result<Event, ModelError> {
        self.state = self.state.advance(mv)?;

        let event = if self.state.is_terminal() {
            Event::GameOver
        } else {
            Event::MoveMade
        };
        debug!("{mv}: notifying {} observers of {event:?}", self.observers.len());

        for observer in self.observers.values_mut() {
            observer.on_model_changed(&self.state, event);
        }
        Ok(event)
    }
}

impl std::fmt::Debug for GameModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameModel")
            .field("state", &self.state)
            .field("observers", &self.observer_ids())
            .finish()
    }
}
