//! Actor and target data.
//!
//! Components are plain data. Behaviour lives in the calculator and
//! resolver modules, which read these through shared references and only
//! mutate them inside an explicit commit step.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::archetype::Archetype;
use crate::grid::Grid;

/// Unique identifier for actors. Turn order is ascending id.
pub type ActorId = u64;

/// Integer tile coordinates. `y` grows southwards.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Position {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl Position {
    /// Create a new position.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Position shifted by a step vector.
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Step vector from `self` to `other`.
    #[must_use]
    pub const fn delta_to(self, other: Self) -> (i32, i32) {
        (other.x - self.x, other.y - self.y)
    }
}

/// Tile key form, `"x,y"`.
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

/// A destination chosen by a move calculator.
///
/// Carries attack semantics implicitly: when the destination lands the actor
/// within its attack geometry of the target, the move is followed by a strike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveIntent {
    /// Destination column.
    pub x: i32,
    /// Destination row.
    pub y: i32,
}

impl MoveIntent {
    /// Intent to move to `position`.
    #[must_use]
    pub const fn to(position: Position) -> Self {
        Self {
            x: position.x,
            y: position.y,
        }
    }

    /// Destination as a position.
    #[must_use]
    pub const fn position(self) -> Position {
        Position::new(self.x, self.y)
    }
}

/// Who took part in an effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Participant {
    /// The player-controlled target.
    Player,
    /// A non-player actor.
    Actor(ActorId),
}

/// A non-player combatant on the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// Unique identifier.
    pub id: ActorId,
    /// Current tile.
    pub position: Position,
    /// Tile occupied before the most recent move.
    pub last_position: Position,
    /// Movement and attack ruleset.
    pub archetype: Archetype,
    /// Current health. The actor is alive while this is above zero.
    pub health: u32,
    /// Health at spawn.
    pub max_health: u32,
    /// Damage dealt per hit.
    pub attack: u32,
    /// Consecutive hits landed without being hit back.
    pub combo: u32,
    /// Destination decided this turn but not yet committed.
    #[serde(skip)]
    pub pending_move: Option<MoveIntent>,
}

impl Actor {
    /// Create a new actor at full health.
    #[must_use]
    pub fn new(
        id: ActorId,
        archetype: Archetype,
        position: Position,
        health: u32,
        attack: u32,
    ) -> Self {
        Self {
            id,
            position,
            last_position: position,
            archetype,
            health,
            max_health: health,
            attack,
            combo: 0,
            pending_move: None,
        }
    }

    /// Check if the actor is alive.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.health > 0
    }
}

/// The player-controlled target that actors hunt.
///
/// Player movement is decided elsewhere; the engine only reads its
/// position, applies damage to it and validates knockback against it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Current tile.
    pub position: Position,
    /// Tile occupied before the most recent move.
    pub last_position: Position,
    /// Current health.
    pub health: u32,
    /// Health at the start of the encounter.
    pub max_health: u32,
    /// Damage dealt per hit.
    pub attack: u32,
    /// Consecutive hits landed without being hit back.
    pub combo: u32,
}

impl Player {
    /// Create a player at full health.
    #[must_use]
    pub const fn new(position: Position, health: u32, attack: u32) -> Self {
        Self {
            position,
            last_position: position,
            health,
            max_health: health,
            attack,
            combo: 0,
        }
    }

    /// Move the player, remembering where it came from.
    pub fn move_to(&mut self, position: Position) {
        self.last_position = self.position;
        self.position = position;
    }
}

/// Position and health mutation interface shared by actors and the player.
///
/// The combat resolver works on any pair of combatants through this trait,
/// so the same knockback and defeat rules apply in both directions.
pub trait Combatant {
    /// Identity used in notifications.
    fn participant(&self) -> Participant;

    /// Current tile.
    fn position(&self) -> Position;

    /// Tile occupied before the most recent move.
    fn last_position(&self) -> Position;

    /// Relocate without counting as a voluntary move.
    fn set_position(&mut self, position: Position);

    /// Current health.
    fn health(&self) -> u32;

    /// Reduce health, never below zero.
    fn apply_damage(&mut self, amount: u32);

    /// Damage dealt per hit.
    fn attack_power(&self) -> u32;

    /// Combo counter.
    fn combo(&self) -> u32;

    /// Overwrite the combo counter.
    fn set_combo(&mut self, combo: u32);

    /// Whether this combatant may be pushed onto `position`.
    fn can_enter(&self, grid: &Grid, position: Position) -> bool {
        grid.is_walkable(position.x, position.y)
    }

    /// Check if the combatant is still standing.
    fn is_alive(&self) -> bool {
        self.health() > 0
    }
}

impl Combatant for Actor {
    fn participant(&self) -> Participant {
        Participant::Actor(self.id)
    }

    fn position(&self) -> Position {
        self.position
    }

    fn last_position(&self) -> Position {
        self.last_position
    }

    fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    fn health(&self) -> u32 {
        self.health
    }

    fn apply_damage(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
    }

    fn attack_power(&self) -> u32 {
        self.attack
    }

    fn combo(&self) -> u32 {
        self.combo
    }

    fn set_combo(&mut self, combo: u32) {
        self.combo = combo;
    }
}

impl Combatant for Player {
    fn participant(&self) -> Participant {
        Participant::Player
    }

    fn position(&self) -> Position {
        self.position
    }

    fn last_position(&self) -> Position {
        self.last_position
    }

    fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    fn health(&self) -> u32 {
        self.health
    }

    fn apply_damage(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
    }

    fn attack_power(&self) -> u32 {
        self.attack
    }

    fn combo(&self) -> u32 {
        self.combo
    }

    fn set_combo(&mut self, combo: u32) {
        self.combo = combo;
    }

    // Pitfalls swallow actors but the player is never shoved into one.
    fn can_enter(&self, grid: &Grid, position: Position) -> bool {
        grid.is_walkable(position.x, position.y)
            && grid
                .kind_at(position.x, position.y)
                .is_some_and(|kind| !kind.is_hazard())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_display_is_tile_key() {
        assert_eq!(Position::new(3, -2).to_string(), "3,-2");
    }

    #[test]
    fn test_position_offset_and_delta() {
        let p = Position::new(2, 2);
        assert_eq!(p.offset(-1, 3), Position::new(1, 5));
        assert_eq!(p.delta_to(Position::new(5, 0)), (3, -2));
    }

    #[test]
    fn test_move_intent_roundtrip_position() {
        let intent = MoveIntent::to(Position::new(4, 7));
        assert_eq!(intent.position(), Position::new(4, 7));
    }

    #[test]
    fn test_damage_saturates_at_zero() {
        let mut actor = Actor::new(1, Archetype::King, Position::new(0, 0), 5, 1);
        actor.apply_damage(3);
        assert_eq!(actor.health, 2);
        actor.apply_damage(10);
        assert_eq!(actor.health, 0);
        assert!(!Combatant::is_alive(&actor));
    }

    #[test]
    fn test_player_move_tracks_last_position() {
        let mut player = Player::new(Position::new(1, 1), 10, 2);
        player.move_to(Position::new(2, 1));
        assert_eq!(player.last_position, Position::new(1, 1));
        assert_eq!(player.position, Position::new(2, 1));
    }
}
