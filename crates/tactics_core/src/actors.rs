//! Storage for the active actor set.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::components::{Actor, ActorId, Position};

/// Storage for all active actors.
///
/// Keyed by [`ActorId`] in a `BTreeMap`, so iteration and serialization
/// follow turn order without a separate sort.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorStorage {
    /// Map of actor ID to actor data.
    actors: BTreeMap<ActorId, Actor>,
    /// Next actor ID to assign.
    next_id: ActorId,
}

impl ActorStorage {
    /// Create empty actor storage.
    #[must_use]
    pub fn new() -> Self {
        Self {
            actors: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Insert a new actor and return its assigned ID.
    pub fn insert(&mut self, mut actor: Actor) -> ActorId {
        let id = self.next_id;
        self.next_id += 1;
        actor.id = id;
        self.actors.insert(id, actor);
        id
    }

    /// Remove an actor by ID.
    pub fn remove(&mut self, id: ActorId) -> Option<Actor> {
        self.actors.remove(&id)
    }

    /// Get an actor by ID.
    #[must_use]
    pub fn get(&self, id: ActorId) -> Option<&Actor> {
        self.actors.get(&id)
    }

    /// Get a mutable reference to an actor by ID.
    pub fn get_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.actors.get_mut(&id)
    }

    /// Check if an actor exists.
    #[must_use]
    pub fn contains(&self, id: ActorId) -> bool {
        self.actors.contains_key(&id)
    }

    /// Get the number of actors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actors.len()
    }

    /// Check if storage is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    /// Actor IDs in turn order.
    #[must_use]
    pub fn sorted_ids(&self) -> Vec<ActorId> {
        self.actors.keys().copied().collect()
    }

    /// Iterate over actors in turn order.
    pub fn iter(&self) -> impl Iterator<Item = &Actor> {
        self.actors.values()
    }

    /// First living actor standing on `position`, if any.
    #[must_use]
    pub fn occupant_at(&self, position: Position) -> Option<ActorId> {
        self.actors
            .values()
            .find(|actor| actor.is_alive() && actor.position == position)
            .map(|actor| actor.id)
    }

    /// True if a living actor other than `id` stands on `position`.
    #[must_use]
    pub fn is_occupied_by_other(&self, position: Position, id: ActorId) -> bool {
        self.actors
            .values()
            .any(|actor| actor.id != id && actor.is_alive() && actor.position == position)
    }

    /// Positions of every living actor except `id`.
    #[must_use]
    pub fn ally_positions(&self, id: ActorId) -> Vec<Position> {
        self.actors
            .values()
            .filter(|actor| actor.id != id && actor.is_alive())
            .map(|actor| actor.position)
            .collect()
    }

    /// IDs of actors whose health has reached zero.
    #[must_use]
    pub fn dead_ids(&self) -> Vec<ActorId> {
        self.actors
            .values()
            .filter(|actor| !actor.is_alive())
            .map(|actor| actor.id)
            .collect()
    }
}

impl Default for ActorStorage {
    fn default() -> Self {
        Self::new()
    }
}
