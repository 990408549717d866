//! Turn orchestration.
//!
//! [`Encounter`] owns the grid, the actors and the player, and runs one
//! turn at a time. All decision logic lives in [`crate::movement`]; this
//! module arbitrates tile claims, applies accepted moves and reconciles
//! actors that end up on the player's tile.
//!
//! # Determinism
//!
//! - Actors act in ascending [`ActorId`] order
//! - Earlier claims win over later ones in the same turn
//! - No floating-point math and no randomness
//! - Same inputs always produce the same [`TurnReport`] and state hash
//!
//! # Example
//!
//! ```
//! use tactics_core::prelude::*;
//!
//! let grid = Grid::new(8, 8);
//! let player = Player::new(Position::new(0, 5), 10, 1);
//! let mut encounter = Encounter::new(grid, player, TacticsConfig::default());
//!
//! let rook = encounter
//!     .spawn_actor(Archetype::Rook, Position::new(0, 0), 3, 1)
//!     .unwrap();
//!
//! // Simulated calls never change state.
//! let intent = encounter.simulate_move(rook).unwrap();
//! assert_eq!(intent, Some(MoveIntent::to(Position::new(0, 4))));
//!
//! let report = encounter.run_turn();
//! assert_eq!(report.turn, 1);
//! ```

use std::collections::hash_map::DefaultHasher;
use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::actors::ActorStorage;
use crate::archetype::Archetype;
use crate::combat::{resolve_attack, CombatOutcome};
use crate::components::{Actor, ActorId, MoveIntent, Player, Position};
use crate::config::TacticsConfig;
use crate::error::{Result, TacticsError};
use crate::events::{EventSink, TacticsEvent};
use crate::grid::Grid;
use crate::movement::{decide, Decision};
use crate::occupancy::TurnOccupancy;
use crate::tactics::TacticalScore;

/// Where an actor is within its turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorTurnState {
    /// Waiting for its slot.
    Idle,
    /// Choosing what to do.
    Deciding,
    /// Striking the player.
    Attacking,
    /// Moving or charging.
    Moving,
    /// Backing away.
    Retreating,
    /// Its destination was refused.
    Blocked,
    /// Done for this turn.
    Committed,
    /// Defeated and taken off the board.
    Removed,
}

impl ActorTurnState {
    /// Check whether moving from `self` to `next` is a legal step.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        use ActorTurnState::{
            Attacking, Blocked, Committed, Deciding, Idle, Moving, Removed, Retreating,
        };
        match (self, next) {
            (Removed, _) => false,
            (_, Removed) => true,
            _ => matches!(
                (self, next),
                (Idle, Deciding)
                    | (Deciding, Attacking | Moving | Retreating | Blocked | Committed)
                    | (Attacking | Moving | Retreating | Blocked, Committed)
            ),
        }
    }
}

fn transition(current: ActorTurnState, next: ActorTurnState) -> ActorTurnState {
    debug_assert!(
        current.can_transition_to(next),
        "illegal turn state change {current:?} -> {next:?}"
    );
    next
}

/// What one actor did during a turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorTurnRecord {
    /// Actor this record describes.
    pub actor: ActorId,
    /// Tile at the start of its slot.
    pub from: Position,
    /// Tile at the end of the turn.
    pub to: Position,
    /// What it decided.
    pub decision: Decision,
    /// Final state.
    pub state: ActorTurnState,
    /// How its final tile scores against the player and its allies.
    pub score: TacticalScore,
}

/// Everything that happened during one turn.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnReport {
    /// Turn number, starting at 1.
    pub turn: u64,
    /// One record per actor that took a slot, in turn order.
    pub records: Vec<ActorTurnRecord>,
    /// Notifications in emission order.
    pub events: Vec<TacticsEvent>,
    /// Actors removed at the end of the turn.
    pub removed: Vec<ActorId>,
    /// The player's health reached zero.
    pub player_defeated: bool,
}

/// A running encounter between the player and a set of actors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Encounter {
    /// Completed turns.
    turn: u64,
    /// Terrain.
    grid: Grid,
    /// Active actors.
    actors: ActorStorage,
    /// The target every actor hunts.
    player: Player,
    /// Tunables.
    config: TacticsConfig,
}

impl Encounter {
    /// Create an encounter with no actors.
    #[must_use]
    pub fn new(grid: Grid, player: Player, config: TacticsConfig) -> Self {
        Self {
            turn: 0,
            grid,
            actors: ActorStorage::new(),
            player,
            config,
        }
    }

    /// Number of completed turns.
    #[must_use]
    pub const fn turn(&self) -> u64 {
        self.turn
    }

    /// The terrain.
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Mutable terrain, for collaborators that open doors or dig pits.
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    /// The active actors.
    #[must_use]
    pub const fn actors(&self) -> &ActorStorage {
        &self.actors
    }

    /// The player.
    #[must_use]
    pub const fn player(&self) -> &Player {
        &self.player
    }

    /// Mutable player, for whoever drives player movement.
    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &TacticsConfig {
        &self.config
    }

    /// Place a new actor on the grid.
    ///
    /// # Errors
    ///
    /// Returns [`TacticsError::InvalidSpawn`] if the tile is out of bounds,
    /// not walkable, already taken, or if `health` is zero.
    pub fn spawn_actor(
        &mut self,
        archetype: Archetype,
        position: Position,
        health: u32,
        attack: u32,
    ) -> Result<ActorId> {
        let refuse = |reason: &str| -> Result<ActorId> {
            Err(TacticsError::InvalidSpawn {
                position,
                reason: reason.to_string(),
            })
        };

        if !self.grid.in_bounds(position.x, position.y) {
            return refuse("out of bounds");
        }
        if !self.grid.is_walkable_at(position) {
            return refuse("tile is not walkable");
        }
        if self.actors.occupant_at(position).is_some() {
            return refuse("tile is occupied by another actor");
        }
        if self.player.position == position {
            return refuse("tile is occupied by the player");
        }
        if health == 0 {
            return refuse("health must be positive");
        }

        let id = self
            .actors
            .insert(Actor::new(0, archetype, position, health, attack));
        tracing::debug!(actor = id, ?archetype, %position, "Spawned actor");
        Ok(id)
    }

    /// Remove an actor from the encounter.
    ///
    /// # Errors
    ///
    /// Returns [`TacticsError::ActorNotFound`] if `id` is not active.
    pub fn despawn_actor(&mut self, id: ActorId) -> Result<Actor> {
        self.actors.remove(id).ok_or(TacticsError::ActorNotFound(id))
    }

    /// What actor `id` would do right now.
    ///
    /// # Errors
    ///
    /// Returns [`TacticsError::ActorNotFound`] if `id` is not active.
    pub fn decide(&self, id: ActorId) -> Result<Decision> {
        if !self.actors.contains(id) {
            return Err(TacticsError::ActorNotFound(id));
        }
        Ok(decide(
            &self.grid,
            &self.actors,
            self.player.position,
            &self.config,
            id,
        ))
    }

    /// Calculate the move of actor `id`.
    ///
    /// With `simulate` set this is strictly read-only and emits nothing.
    /// Otherwise a strike is resolved immediately against the player and a
    /// move is stored as the actor's pending move for a later commit.
    /// Strikes and idle turns return `None`.
    ///
    /// # Errors
    ///
    /// Returns [`TacticsError::ActorNotFound`] if `id` is not active.
    pub fn calculate_move<S>(
        &mut self,
        id: ActorId,
        simulate: bool,
        sink: &mut S,
    ) -> Result<Option<MoveIntent>>
    where
        S: EventSink + ?Sized,
    {
        let decision = self.decide(id)?;
        if simulate {
            return Ok(decision.intent());
        }

        if decision == Decision::Attack {
            self.strike_player(id, sink);
            return Ok(None);
        }

        let intent = decision.intent();
        if let Some(actor) = self.actors.get_mut(id) {
            actor.pending_move = intent;
        }
        Ok(intent)
    }

    /// Read-only form of [`calculate_move`](Self::calculate_move).
    ///
    /// # Errors
    ///
    /// Returns [`TacticsError::ActorNotFound`] if `id` is not active.
    pub fn simulate_move(&self, id: ActorId) -> Result<Option<MoveIntent>> {
        self.decide(id).map(|decision| decision.intent())
    }

    /// Check whether actor `id` would strike the player this turn, either
    /// from where it stands or after moving.
    ///
    /// # Errors
    ///
    /// Returns [`TacticsError::ActorNotFound`] if `id` is not active.
    pub fn threatens(&self, id: ActorId) -> Result<bool> {
        self.decide(id).map(|decision| decision.strikes())
    }

    /// Advance the encounter by one turn.
    ///
    /// # Turn Order
    ///
    /// 1. Every living actor, by ascending id, decides and claims its tile
    /// 2. Collision pass between the player and any actor on its tile
    /// 3. Defeated actors are removed
    pub fn run_turn(&mut self) -> TurnReport {
        let mut events: Vec<TacticsEvent> = Vec::new();
        let mut ledger = TurnOccupancy::capture(&self.actors);
        let mut struck = BTreeSet::new();
        let mut records = Vec::new();

        for id in self.actors.sorted_ids() {
            if let Some(record) = self.take_actor_turn(id, &mut ledger, &mut struck, &mut events) {
                records.push(record);
            }
        }

        self.collision_pass(&struck, &mut events);

        let removed = self.remove_defeated();
        for record in &mut records {
            if removed.contains(&record.actor) {
                record.state = transition(record.state, ActorTurnState::Removed);
            }
        }

        self.turn += 1;

        #[cfg(feature = "debug-validation")]
        {
            let conflicts = self.occupancy_conflicts();
            assert!(
                conflicts.is_empty(),
                "turn {} ended with shared tiles {conflicts:?}",
                self.turn
            );
        }

        #[cfg(debug_assertions)]
        {
            let hash = self.state_hash();
            tracing::debug!(turn = self.turn, state_hash = hash, "Encounter state hash");
        }

        TurnReport {
            turn: self.turn,
            records,
            events,
            removed,
            player_defeated: !self.player_alive(),
        }
    }

    fn player_alive(&self) -> bool {
        self.player.health > 0
    }

    fn take_actor_turn(
        &mut self,
        id: ActorId,
        ledger: &mut TurnOccupancy,
        struck: &mut BTreeSet<ActorId>,
        events: &mut Vec<TacticsEvent>,
    ) -> Option<ActorTurnRecord> {
        let from = self
            .actors
            .get(id)
            .filter(|actor| actor.is_alive())?
            .position;

        let mut state = transition(ActorTurnState::Idle, ActorTurnState::Deciding);
        let decision = if self.player_alive() {
            decide(
                &self.grid,
                &self.actors,
                self.player.position,
                &self.config,
                id,
            )
        } else {
            Decision::Stay
        };
        if let Some(actor) = self.actors.get_mut(id) {
            actor.pending_move = decision.intent();
        }

        match &decision {
            Decision::Attack => {
                state = transition(state, ActorTurnState::Attacking);
                self.strike_player(id, events);
                struck.insert(id);
            }
            Decision::Stay => {}
            Decision::Charge { destination, .. }
            | Decision::Move { destination, .. }
            | Decision::Retreat { destination } => {
                let destination = *destination;
                match ledger.check_claim(id, from, destination, &self.actors) {
                    Ok(()) => {
                        let next = if matches!(decision, Decision::Retreat { .. }) {
                            ActorTurnState::Retreating
                        } else {
                            ActorTurnState::Moving
                        };
                        state = transition(state, next);
                        ledger.claim(from, destination);
                        self.commit_move(id, from, &decision, events);

                        let in_reach = self.actors.get(id).is_some_and(|actor| {
                            actor
                                .archetype
                                .strategy()
                                .attack
                                .reaches(destination, self.player.position)
                        });
                        // Landing on the player is settled by the collision pass.
                        if decision.strikes() && in_reach && destination != self.player.position {
                            self.strike_player(id, events);
                            struck.insert(id);
                        }
                    }
                    Err(reason) => {
                        state = transition(state, ActorTurnState::Blocked);
                        tracing::debug!(actor = id, %destination, ?reason, "Move blocked");
                        events.push(TacticsEvent::Blocked {
                            actor: id,
                            destination,
                        });
                    }
                }
            }
        }

        let actor = self.actors.get_mut(id)?;
        actor.pending_move = None;
        let to = actor.position;
        let allies = self.actors.ally_positions(id);
        let score = TacticalScore::evaluate(to, self.player.position, &allies, &self.config);

        Some(ActorTurnRecord {
            actor: id,
            from,
            to,
            decision,
            state: transition(state, ActorTurnState::Committed),
            score,
        })
    }

    fn commit_move(
        &mut self,
        id: ActorId,
        from: Position,
        decision: &Decision,
        events: &mut Vec<TacticsEvent>,
    ) {
        let Some(actor) = self.actors.get_mut(id) else {
            return;
        };
        let Some(to) = decision.destination() else {
            return;
        };
        actor.last_position = from;
        actor.position = to;

        let event = match decision {
            Decision::Retreat { .. } => TacticsEvent::Retreated { actor: id, from, to },
            Decision::Charge { path, .. } | Decision::Move { path, .. } if path.len() > 1 => {
                TacticsEvent::Charge {
                    actor: id,
                    path: path.clone(),
                }
            }
            _ => TacticsEvent::Moved { actor: id, from, to },
        };
        tracing::debug!(actor = id, %from, %to, "Move committed");
        events.push(event);
    }

    /// Resolve a strike from actor `id` against the player.
    fn strike_player<S>(&mut self, id: ActorId, sink: &mut S) -> Option<CombatOutcome>
    where
        S: EventSink + ?Sized,
    {
        let occupied: BTreeSet<Position> = self
            .actors
            .iter()
            .filter(|actor| actor.is_alive())
            .map(|actor| actor.position)
            .collect();
        let actor = self.actors.get_mut(id)?;
        Some(resolve_attack(
            actor,
            &mut self.player,
            &self.grid,
            self.config.knockback,
            |pos| occupied.contains(&pos),
            sink,
        ))
    }

    /// Mutual strikes between the player and any actor sharing its tile
    /// that has not already struck this turn. The player strikes first.
    fn collision_pass(&mut self, struck: &BTreeSet<ActorId>, events: &mut Vec<TacticsEvent>) {
        for id in self.actors.sorted_ids() {
            if struck.contains(&id) || !self.player_alive() {
                continue;
            }
            let Some(actor) = self.actors.get(id) else {
                continue;
            };
            if !actor.is_alive() || actor.position != self.player.position {
                continue;
            }
            tracing::debug!(actor = id, at = %actor.position, "Collision with player");

            let others: BTreeSet<Position> = self
                .actors
                .iter()
                .filter(|other| other.id != id && other.is_alive())
                .map(|other| other.position)
                .collect();
            let Some(actor) = self.actors.get_mut(id) else {
                continue;
            };

            let outcome = resolve_attack(
                &mut self.player,
                &mut *actor,
                &self.grid,
                self.config.knockback,
                |pos| others.contains(&pos),
                events,
            );
            if outcome.defeated {
                continue;
            }

            let actor_tile = actor.position;
            resolve_attack(
                actor,
                &mut self.player,
                &self.grid,
                self.config.knockback,
                |pos| pos == actor_tile || others.contains(&pos),
                events,
            );
        }
    }

    fn remove_defeated(&mut self) -> Vec<ActorId> {
        let dead = self.actors.dead_ids();
        for &id in &dead {
            self.actors.remove(id);
            tracing::debug!(actor = id, "Removed defeated actor");
        }
        dead
    }

    /// Tiles held by more than one living actor.
    #[must_use]
    pub fn occupancy_conflicts(&self) -> Vec<Position> {
        let mut seen = BTreeSet::new();
        let mut conflicts = BTreeSet::new();
        for actor in self.actors.iter().filter(|actor| actor.is_alive()) {
            if !seen.insert(actor.position) {
                conflicts.insert(actor.position);
            }
        }
        conflicts.into_iter().collect()
    }

    /// Compute a deterministic hash of the encounter state.
    ///
    /// Covers the turn counter, terrain, player and every actor in id
    /// order. Pending moves are turn scratch and are left out.
    #[must_use]
    pub fn state_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();

        self.turn.hash(&mut hasher);
        self.grid.hash(&mut hasher);

        self.player.position.hash(&mut hasher);
        self.player.last_position.hash(&mut hasher);
        self.player.health.hash(&mut hasher);
        self.player.combo.hash(&mut hasher);

        self.actors.len().hash(&mut hasher);
        for actor in self.actors.iter() {
            actor.id.hash(&mut hasher);
            actor.archetype.hash(&mut hasher);
            actor.position.hash(&mut hasher);
            actor.last_position.hash(&mut hasher);
            actor.health.hash(&mut hasher);
            actor.max_health.hash(&mut hasher);
            actor.attack.hash(&mut hasher);
            actor.combo.hash(&mut hasher);
        }

        hasher.finish()
    }

    /// Serialize the encounter to bytes.
    ///
    /// # Errors
    ///
    /// Returns [`TacticsError::Serialization`] if encoding fails.
    pub fn serialize(&self) -> Result<Vec<u8>> {
        bincode::serialize(self).map_err(|e| {
            TacticsError::Serialization(format!("Failed to serialize encounter: {e}"))
        })
    }

    /// Deserialize an encounter from bytes.
    ///
    /// # Errors
    ///
    /// Returns [`TacticsError::Serialization`] if decoding fails.
    pub fn deserialize(data: &[u8]) -> Result<Self> {
        bincode::deserialize(data).map_err(|e| {
            TacticsError::Serialization(format!("Failed to deserialize encounter: {e}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Participant;
    use crate::events::NullSink;
    use crate::grid::TileKind;

    fn p(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    fn encounter(width: u32, height: u32, player: Position) -> Encounter {
        Encounter::new(
            Grid::new(width, height),
            Player::new(player, 20, 1),
            TacticsConfig::default(),
        )
    }

    #[test]
    fn test_state_transitions() {
        use ActorTurnState::*;
        assert!(Idle.can_transition_to(Deciding));
        assert!(Deciding.can_transition_to(Blocked));
        assert!(Blocked.can_transition_to(Committed));
        assert!(Committed.can_transition_to(Removed));
        assert!(!Idle.can_transition_to(Committed));
        assert!(!Committed.can_transition_to(Moving));
        assert!(!Removed.can_transition_to(Idle));
    }

    #[test]
    fn test_spawn_validation() {
        let mut enc = encounter(5, 5, p(4, 4));
        enc.grid_mut().set_tile(1, 1, TileKind::Wall);

        assert!(enc.spawn_actor(Archetype::King, p(0, 0), 3, 1).is_ok());
        assert!(matches!(
            enc.spawn_actor(Archetype::King, p(0, 0), 3, 1),
            Err(TacticsError::InvalidSpawn { .. })
        ));
        assert!(enc.spawn_actor(Archetype::King, p(1, 1), 3, 1).is_err());
        assert!(enc.spawn_actor(Archetype::King, p(9, 0), 3, 1).is_err());
        assert!(enc.spawn_actor(Archetype::King, p(4, 4), 3, 1).is_err());
        assert!(enc.spawn_actor(Archetype::King, p(2, 2), 0, 1).is_err());
    }

    #[test]
    fn test_despawn_unknown_actor() {
        let mut enc = encounter(5, 5, p(4, 4));
        assert!(matches!(
            enc.despawn_actor(7),
            Err(TacticsError::ActorNotFound(7))
        ));
    }

    #[test]
    fn test_simulate_is_read_only() {
        let mut enc = encounter(8, 8, p(3, 4));
        let id = enc.spawn_actor(Archetype::King, p(3, 3), 5, 2).unwrap();
        let before = enc.serialize().unwrap();
        let hash = enc.state_hash();

        let mut events = Vec::new();
        let intent = enc.calculate_move(id, true, &mut events).unwrap();

        assert_eq!(intent, None);
        assert!(events.is_empty());
        assert_eq!(enc.serialize().unwrap(), before);
        assert_eq!(enc.state_hash(), hash);
        assert!(enc.threatens(id).unwrap());
    }

    #[test]
    fn test_calculate_move_strikes_when_live() {
        let mut enc = encounter(8, 8, p(3, 4));
        let id = enc.spawn_actor(Archetype::King, p(3, 3), 5, 2).unwrap();

        let mut events = Vec::new();
        let intent = enc.calculate_move(id, false, &mut events).unwrap();

        assert_eq!(intent, None);
        assert_eq!(enc.player().health, 18);
        assert!(matches!(events[0], TacticsEvent::Attack { damage: 2, .. }));
    }

    #[test]
    fn test_calculate_move_stores_pending_move() {
        let mut enc = encounter(8, 8, p(7, 7));
        let id = enc.spawn_actor(Archetype::King, p(0, 0), 5, 1).unwrap();
        let intent = enc.calculate_move(id, false, &mut NullSink).unwrap();
        assert_eq!(intent, Some(MoveIntent::to(p(1, 1))));
        assert_eq!(enc.actors().get(id).unwrap().pending_move, intent);
    }

    #[test]
    fn test_rook_charge_turn() {
        let mut enc = encounter(8, 8, p(0, 5));
        let id = enc.spawn_actor(Archetype::Rook, p(0, 0), 5, 3).unwrap();

        let report = enc.run_turn();

        assert_eq!(enc.actors().get(id).unwrap().position, p(0, 4));
        assert_eq!(enc.player().health, 17);
        assert_eq!(enc.player().position, p(0, 6));
        assert_eq!(report.records[0].state, ActorTurnState::Committed);
        assert!(matches!(report.events[0], TacticsEvent::Charge { .. }));
    }

    #[test]
    fn test_earlier_actor_wins_contested_tile() {
        let mut enc = encounter(5, 9, p(2, 8));
        // Both kings want (2,1) first; the lower id claims it.
        let a = enc.spawn_actor(Archetype::King, p(1, 0), 5, 1).unwrap();
        let b = enc.spawn_actor(Archetype::King, p(3, 0), 5, 1).unwrap();

        let report = enc.run_turn();

        let pos_a = enc.actors().get(a).unwrap().position;
        let pos_b = enc.actors().get(b).unwrap().position;
        assert_ne!(pos_a, pos_b);
        assert!(enc.occupancy_conflicts().is_empty());
        assert_eq!(report.records.len(), 2);
    }

    #[test]
    fn test_knight_collision_defeats_weak_actor() {
        let mut enc = encounter(8, 8, p(1, 2));
        let id = enc.spawn_actor(Archetype::Knight, p(0, 0), 1, 1).unwrap();

        let report = enc.run_turn();

        assert_eq!(report.removed, vec![id]);
        assert_eq!(report.records[0].state, ActorTurnState::Removed);
        assert!(enc.actors().is_empty());
        assert!(report.events.contains(&TacticsEvent::Defeat {
            subject: Participant::Actor(id),
            by: Some(Participant::Player),
        }));
        assert_eq!(enc.player().health, 20);
    }

    #[test]
    fn test_collision_survivor_strikes_back() {
        let mut enc = encounter(8, 8, p(1, 2));
        let id = enc.spawn_actor(Archetype::Knight, p(0, 0), 10, 4).unwrap();

        enc.run_turn();

        let actor = enc.actors().get(id).unwrap();
        assert_eq!(actor.health, 9);
        assert_eq!(enc.player().health, 16);
        assert_ne!(actor.position, enc.player().position);
    }

    #[test]
    fn test_player_defeat_reported() {
        let grid = Grid::new(6, 6);
        let mut enc = Encounter::new(grid, Player::new(p(2, 3), 2, 1), TacticsConfig::default());
        enc.spawn_actor(Archetype::King, p(2, 2), 5, 5).unwrap();

        let report = enc.run_turn();
        assert!(report.player_defeated);
        assert_eq!(enc.player().health, 0);
    }

    #[test]
    fn test_serialize_round_trip_preserves_hash() {
        let mut enc = encounter(8, 8, p(6, 6));
        enc.spawn_actor(Archetype::Bishop, p(0, 0), 5, 1).unwrap();
        enc.spawn_actor(Archetype::Pawn, p(6, 0), 5, 1).unwrap();
        enc.run_turn();

        let bytes = enc.serialize().unwrap();
        let restored = Encounter::deserialize(&bytes).unwrap();
        assert_eq!(restored.state_hash(), enc.state_hash());
        assert_eq!(restored.turn(), 1);
    }

    #[test]
    fn test_deserialize_garbage_fails() {
        assert!(matches!(
            Encounter::deserialize(&[1, 2, 3]),
            Err(TacticsError::Serialization(_))
        ));
    }
}
