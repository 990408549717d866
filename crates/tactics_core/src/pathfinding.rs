//! Breadth-first pathfinding over archetype direction sets.
//!
//! Every step costs the same, so BFS gives the shortest path by step count
//! for whatever offsets an archetype may use (including knight hops).
//! Neighbour expansion follows the order of the direction slice, which
//! keeps tie-breaking between equal-length paths deterministic.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::components::Position;

/// North and south only.
pub const PAWN_STEPS: [(i32, i32); 2] = [
    (0, -1), // North
    (0, 1),  // South
];

/// The four edge-adjacent steps.
pub const ORTHOGONAL_STEPS: [(i32, i32); 4] = [
    (0, -1), // North
    (1, 0),  // East
    (0, 1),  // South
    (-1, 0), // West
];

/// The four corner-adjacent steps.
pub const DIAGONAL_STEPS: [(i32, i32); 4] = [
    (1, -1),  // Northeast
    (1, 1),   // Southeast
    (-1, 1),  // Southwest
    (-1, -1), // Northwest
];

/// All eight unit steps.
pub const KING_STEPS: [(i32, i32); 8] = [
    (0, -1),  // North
    (1, -1),  // Northeast
    (1, 0),   // East
    (1, 1),   // Southeast
    (0, 1),   // South
    (-1, 1),  // Southwest
    (-1, 0),  // West
    (-1, -1), // Northwest
];

/// The eight L-shaped hops.
pub const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (1, -2),
    (2, -1),
    (2, 1),
    (1, 2),
    (-1, 2),
    (-2, 1),
    (-2, -1),
    (-1, -2),
];

/// Find the shortest path from `start` to `target`.
///
/// The returned nodes include both `start` and `target`, so a path of
/// length `n` takes `n - 1` steps. `is_walkable` decides which tiles may be
/// entered; the start tile is never tested. Returns `None` when the target
/// cannot be reached.
pub fn find_path<F>(
    start: Position,
    target: Position,
    directions: &[(i32, i32)],
    is_walkable: F,
) -> Option<Vec<Position>>
where
    F: Fn(Position) -> bool,
{
    if start == target {
        return Some(vec![start]);
    }

    let mut queue = VecDeque::new();
    let mut visited = HashSet::new();
    let mut came_from: HashMap<Position, Position> = HashMap::new();

    queue.push_back(start);
    visited.insert(start);

    while let Some(current) = queue.pop_front() {
        for &(dx, dy) in directions {
            let next = current.offset(dx, dy);
            if visited.contains(&next) || !is_walkable(next) {
                continue;
            }

            visited.insert(next);
            came_from.insert(next, current);

            if next == target {
                let path = reconstruct_path(&came_from, target);
                tracing::trace!(%start, %target, steps = path.len() - 1, "Path found");
                return Some(path);
            }

            queue.push_back(next);
        }
    }

    tracing::trace!(%start, %target, explored = visited.len(), "No path");
    None
}

/// Reconstruct path from came_from map.
fn reconstruct_path(came_from: &HashMap<Position, Position>, goal: Position) -> Vec<Position> {
    let mut path = vec![goal];
    let mut current = goal;

    while let Some(&prev) = came_from.get(&current) {
        path.push(prev);
        current = prev;
    }

    path.reverse();
    path
}
