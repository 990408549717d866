//! Per-turn occupancy ledger.
//!
//! Arbitrates destination claims between actors moving in the same turn.
//! Earlier claims win; there is no retry. The ledger is scratch state owned
//! by the orchestrator for the duration of a single turn.

use std::collections::BTreeSet;

use crate::actors::ActorStorage;
use crate::components::{ActorId, Position};

/// Why a destination claim was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimRejection {
    /// Another actor stands on the tile right now.
    Occupied(ActorId),
    /// Another actor started the turn there and has not left yet.
    HeldAtTurnStart,
    /// An earlier actor already claimed the tile this turn.
    AlreadyClaimed,
}

/// Tiles held at the start of a turn and tiles claimed during it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TurnOccupancy {
    start: BTreeSet<Position>,
    claimed: BTreeSet<Position>,
}

impl TurnOccupancy {
    /// Snapshot the tiles of every living actor.
    #[must_use]
    pub fn capture(actors: &ActorStorage) -> Self {
        let start = actors
            .iter()
            .filter(|actor| actor.is_alive())
            .map(|actor| actor.position)
            .collect();
        Self {
            start,
            claimed: BTreeSet::new(),
        }
    }

    /// Check whether `actor` may move from `start_tile` onto `destination`.
    ///
    /// Staying on the own start tile is always allowed unless someone else
    /// has since moved onto it.
    pub fn check_claim(
        &self,
        actor: ActorId,
        start_tile: Position,
        destination: Position,
        actors: &ActorStorage,
    ) -> Result<(), ClaimRejection> {
        if let Some(other) = actors.occupant_at(destination).filter(|&id| id != actor) {
            return Err(ClaimRejection::Occupied(other));
        }
        if destination != start_tile && self.start.contains(&destination) {
            return Err(ClaimRejection::HeldAtTurnStart);
        }
        if self.claimed.contains(&destination) {
            return Err(ClaimRejection::AlreadyClaimed);
        }
        Ok(())
    }

    /// Boolean form of [`check_claim`](Self::check_claim).
    #[must_use]
    pub fn can_claim(
        &self,
        actor: ActorId,
        start_tile: Position,
        destination: Position,
        actors: &ActorStorage,
    ) -> bool {
        self.check_claim(actor, start_tile, destination, actors)
            .is_ok()
    }

    /// Record an accepted move and free the tile it left.
    pub fn claim(&mut self, start_tile: Position, destination: Position) {
        self.claimed.insert(destination);
        if start_tile != destination {
            self.release(start_tile);
        }
    }

    /// Stop treating a start tile as held.
    pub fn release(&mut self, tile: Position) {
        self.start.remove(&tile);
    }

    /// Check if a tile was held at turn start and is still unreleased.
    #[must_use]
    pub fn is_held(&self, tile: Position) -> bool {
        self.start.contains(&tile)
    }

    /// Check if a tile has been claimed this turn.
    #[must_use]
    pub fn is_claimed(&self, tile: Position) -> bool {
        self.claimed.contains(&tile)
    }
}
