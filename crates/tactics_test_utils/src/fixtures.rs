//! Test fixtures and helpers.
//!
//! Pre-built grids and encounters for consistent testing.

use fixed::types::I32F32;
use tactics_core::archetype::Archetype;
use tactics_core::components::{ActorId, Player, Position};
use tactics_core::config::TacticsConfig;
use tactics_core::grid::Grid;
use tactics_core::orchestrator::Encounter;

/// Default health for fixture actors.
pub const ACTOR_HEALTH: u32 = 3;

/// Default health for the fixture player.
pub const PLAYER_HEALTH: u32 = 30;

/// Create a fixed-point number from an integer.
#[must_use]
pub fn fixed(n: i32) -> I32F32 {
    I32F32::from_num(n)
}

/// Shorthand for [`Position::new`].
#[must_use]
pub const fn pos(x: i32, y: i32) -> Position {
    Position::new(x, y)
}

/// Build a grid from ASCII rows.
///
/// # Panics
///
/// Panics if the rows are empty, ragged or contain unknown glyphs.
#[must_use]
pub fn grid_from_ascii(rows: &[&str]) -> Grid {
    Grid::from_rows(rows).expect("fixture grid should parse")
}

/// An empty floor arena with the player at `player`.
#[must_use]
pub fn open_arena(width: u32, height: u32, player: Position) -> Encounter {
    Encounter::new(
        Grid::new(width, height),
        Player::new(player, PLAYER_HEALTH, 1),
        TacticsConfig::default(),
    )
}

/// An arena drawn in ASCII with the player at `player`.
///
/// # Panics
///
/// Panics if the rows do not parse.
#[must_use]
pub fn arena_from_ascii(rows: &[&str], player: Position) -> Encounter {
    Encounter::new(
        grid_from_ascii(rows),
        Player::new(player, PLAYER_HEALTH, 1),
        TacticsConfig::default(),
    )
}

/// Spawn a fixture actor with default stats.
///
/// # Panics
///
/// Panics if the tile is refused.
pub fn spawn(encounter: &mut Encounter, archetype: Archetype, x: i32, y: i32) -> ActorId {
    encounter
        .spawn_actor(archetype, pos(x, y), ACTOR_HEALTH, 1)
        .expect("fixture spawn should succeed")
}

/// Spawn up to `count` actors, cycling through every archetype, on a
/// sparse lattice scanned row by row. Tiles that are blocked or taken are
/// skipped. Returns the ids spawned.
pub fn mixed_squad(encounter: &mut Encounter, count: usize) -> Vec<ActorId> {
    let width = encounter.grid().width() as i32;
    let height = encounter.grid().height() as i32;
    let mut ids = Vec::with_capacity(count);

    'scan: for y in (0..height).step_by(2) {
        for x in (0..width).step_by(3) {
            if ids.len() == count {
                break 'scan;
            }
            let archetype = Archetype::ALL[ids.len() % Archetype::ALL.len()];
            let health = ACTOR_HEALTH + (ids.len() % 3) as u32;
            if let Ok(id) = encounter.spawn_actor(archetype, pos(x, y), health, 1) {
                ids.push(id);
            }
        }
    }

    ids
}
