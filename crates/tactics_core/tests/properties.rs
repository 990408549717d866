//! Property tests for the decision engine.

use std::collections::HashMap;

use proptest::prelude::*;

use tactics_core::actors::ActorStorage;
use tactics_core::archetype::Archetype;
use tactics_core::combat::resolve_attack;
use tactics_core::components::{Actor, Player, Position};
use tactics_core::config::TacticsConfig;
use tactics_core::events::{NullSink, TacticsEvent};
use tactics_core::grid::{Grid, TileKind};
use tactics_core::line_of_sight::{has_line_of_sight, LosKind, LosOptions};
use tactics_core::math::manhattan;
use tactics_core::orchestrator::Encounter;
use tactics_core::pathfinding::find_path;
use tactics_core::tactics::find_defensive_moves;
use tactics_test_utils::determinism::verify_encounter_determinism;
use tactics_test_utils::strategies::{
    arb_archetype, arb_grid, arb_position, arb_squad, ARENA_SIZE,
};

/// Step counts from `start` to every reachable tile, by repeated
/// relaxation until nothing changes.
fn relaxed_distances(
    grid: &Grid,
    start: Position,
    directions: &[(i32, i32)],
) -> HashMap<Position, usize> {
    let mut dist = HashMap::new();
    dist.insert(start, 0usize);
    loop {
        let mut changed = false;
        for y in 0..ARENA_SIZE {
            for x in 0..ARENA_SIZE {
                let here = Position::new(x, y);
                let Some(&d) = dist.get(&here) else {
                    continue;
                };
                for &(dx, dy) in directions {
                    let next = here.offset(dx, dy);
                    if !grid.is_walkable_at(next) {
                        continue;
                    }
                    let best = dist.get(&next).copied().unwrap_or(usize::MAX);
                    if d + 1 < best {
                        dist.insert(next, d + 1);
                        changed = true;
                    }
                }
            }
        }
        if !changed {
            return dist;
        }
    }
}

fn encounter_with_squad(
    grid: Grid,
    player: Position,
    squad: &[(Archetype, Position)],
) -> Encounter {
    let mut grid = grid;
    grid.set_tile(player.x, player.y, TileKind::Floor);
    let mut enc = Encounter::new(grid, Player::new(player, 50, 1), TacticsConfig::default());
    for &(archetype, position) in squad {
        // Refused spawns (walls, duplicates, the player's tile) are skipped.
        let _ = enc.spawn_actor(archetype, position, 3, 1);
    }
    enc
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn bfs_finds_minimum_step_paths(
        grid in arb_grid(4),
        archetype in arb_archetype(),
        start in arb_position(),
        goal in arb_position(),
    ) {
        let mut grid = grid;
        grid.set_tile(start.x, start.y, TileKind::Floor);
        grid.set_tile(goal.x, goal.y, TileKind::Floor);
        let directions = archetype.strategy().directions;

        let reference = relaxed_distances(&grid, start, directions);
        let path = find_path(start, goal, directions, |p| grid.is_walkable_at(p));

        match (path, reference.get(&goal)) {
            (Some(path), Some(&steps)) => {
                prop_assert_eq!(path.len() - 1, steps);
                prop_assert_eq!(path[0], start);
                prop_assert_eq!(*path.last().unwrap(), goal);
                for pair in path.windows(2) {
                    prop_assert!(directions.contains(&pair[0].delta_to(pair[1])));
                    prop_assert!(grid.is_walkable_at(pair[1]));
                }
            }
            (None, None) => {}
            (path, steps) => prop_assert!(false, "bfs {:?} vs reference {:?}", path, steps),
        }
    }

    #[test]
    fn wall_between_blocks_every_sightline(
        origin in arb_position(),
        dir in 0usize..8,
        length in 2i32..6,
        wall_at in 1i32..5,
    ) {
        let (dx, dy) = [(0, 1), (1, 0), (0, -1), (-1, 0), (1, 1), (1, -1), (-1, 1), (-1, -1)][dir];
        let wall_at = wall_at.min(length - 1);
        let target = origin.offset(dx * length, dy * length);
        let wall = origin.offset(dx * wall_at, dy * wall_at);

        let mut grid = Grid::new(ARENA_SIZE as u32, ARENA_SIZE as u32);
        prop_assume!(grid.in_bounds(target.x, target.y));
        grid.set_tile(wall.x, wall.y, TileKind::Wall);

        for kind in [LosKind::Orthogonal, LosKind::Diagonal, LosKind::Queen] {
            let options = LosOptions::default();
            prop_assert!(!has_line_of_sight(&grid, origin, target, kind, options, |_| false));
        }
    }

    #[test]
    fn actors_block_sight_only_when_enabled(
        origin in arb_position(),
        dir in 0usize..8,
        length in 2i32..6,
    ) {
        let (dx, dy) = [(0, 1), (1, 0), (0, -1), (-1, 0), (1, 1), (1, -1), (-1, 1), (-1, -1)][dir];
        let target = origin.offset(dx * length, dy * length);
        let blocker = origin.offset(dx, dy);
        let grid = Grid::new(ARENA_SIZE as u32, ARENA_SIZE as u32);
        prop_assume!(grid.in_bounds(target.x, target.y));

        let occupied = |p: Position| p == blocker;
        let queen = LosKind::Queen;
        let open = LosOptions::default();
        prop_assert!(has_line_of_sight(&grid, origin, target, queen, open, occupied));
        let blocking = LosOptions::blocking_actors();
        prop_assert!(!has_line_of_sight(&grid, origin, target, queen, blocking, occupied));
    }

    #[test]
    fn defensive_moves_always_gain_distance(
        grid in arb_grid(5),
        archetype in arb_archetype(),
        at in arb_position(),
        target in arb_position(),
    ) {
        prop_assume!(at != target);
        let mut actors = ActorStorage::new();
        let id = actors.insert(Actor::new(0, archetype, at, 3, 1));
        let actor = actors.get(id).unwrap();

        let current = manhattan(at, target);
        let moves = find_defensive_moves(actor, target, &grid, &actors);
        for pair in moves.windows(2) {
            prop_assert!(manhattan(pair[0], target) >= manhattan(pair[1], target));
        }
        for m in moves {
            prop_assert!(manhattan(m, target) > current);
            prop_assert!(grid.is_walkable_at(m));
        }
    }

    #[test]
    fn health_never_underflows(health in 1u32..20, attack in 0u32..40, strikes in 1usize..5) {
        let grid = Grid::new(4, 4);
        let mut player = Player::new(Position::new(0, 0), 10, attack);
        let mut actor = Actor::new(1, Archetype::King, Position::new(1, 1), health, 1);
        for _ in 0..strikes {
            let outcome =
                resolve_attack(&mut player, &mut actor, &grid, true, |_| false, &mut NullSink);
            prop_assert_eq!(outcome.defeated, actor.health == 0);
        }
        prop_assert!(actor.health <= health);
    }

    #[test]
    fn turns_never_double_occupy(
        grid in arb_grid(6),
        player in arb_position(),
        squad in arb_squad(12),
    ) {
        let mut enc = encounter_with_squad(grid, player, &squad);
        for _ in 0..8 {
            enc.run_turn();
            prop_assert!(enc.occupancy_conflicts().is_empty());
        }
    }

    #[test]
    fn simulated_moves_are_read_only(
        grid in arb_grid(6),
        player in arb_position(),
        squad in arb_squad(8),
    ) {
        let mut enc = encounter_with_squad(grid, player, &squad);
        let snapshot = enc.serialize().unwrap();
        let hash = enc.state_hash();

        for id in enc.actors().sorted_ids() {
            let mut events: Vec<TacticsEvent> = Vec::new();
            enc.calculate_move(id, true, &mut events).unwrap();
            prop_assert!(events.is_empty());
            let _ = enc.threatens(id).unwrap();
        }

        prop_assert_eq!(enc.serialize().unwrap(), snapshot);
        prop_assert_eq!(enc.state_hash(), hash);
    }

    #[test]
    fn random_encounters_replay_identically(
        grid in arb_grid(6),
        player in arb_position(),
        squad in arb_squad(10),
    ) {
        let setup = || encounter_with_squad(grid.clone(), player, &squad);
        let result = verify_encounter_determinism(setup, 6);
        prop_assert!(result.is_deterministic, "hashes {:?}", result.hashes);
    }
}
