//! Proptest strategies.
//!
//! Generate random but reproducible grids, squads and positions for
//! property-based testing.

use proptest::prelude::*;
use tactics_core::archetype::Archetype;
use tactics_core::components::Position;
use tactics_core::grid::{Grid, TileKind};

/// Side length used by [`arb_grid`].
pub const ARENA_SIZE: i32 = 10;

/// Any archetype.
pub fn arb_archetype() -> impl Strategy<Value = Archetype> {
    prop::sample::select(Archetype::ALL.to_vec())
}

/// A position inside the square arena.
pub fn arb_position() -> impl Strategy<Value = Position> {
    (0..ARENA_SIZE, 0..ARENA_SIZE).prop_map(|(x, y)| Position::new(x, y))
}

/// A square arena with roughly one wall in `1 / wall_odds` tiles.
pub fn arb_grid(wall_odds: u32) -> impl Strategy<Value = Grid> {
    let cells = (ARENA_SIZE * ARENA_SIZE) as usize;
    prop::collection::vec(0..wall_odds.max(1), cells).prop_map(|rolls| {
        let mut grid = Grid::new(ARENA_SIZE as u32, ARENA_SIZE as u32);
        for (index, roll) in rolls.into_iter().enumerate() {
            if roll == 0 {
                let x = (index as i32) % ARENA_SIZE;
                let y = (index as i32) / ARENA_SIZE;
                grid.set_tile(x, y, TileKind::Wall);
            }
        }
        grid
    })
}

/// Up to `max` archetype and position pairs for spawning a squad.
///
/// Positions may collide or land on walls; callers skip refused spawns.
pub fn arb_squad(max: usize) -> impl Strategy<Value = Vec<(Archetype, Position)>> {
    prop::collection::vec((arb_archetype(), arb_position()), 1..=max.max(1))
}
