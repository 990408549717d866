//! Per-archetype move calculation.
//!
//! [`decide`] is pure: it reads the grid, the actor snapshot and the target
//! position and returns a [`Decision`]. Applying the decision (striking,
//! moving, claiming tiles) is the orchestrator's job.
//!
//! # Decision order
//!
//! 1. Strike if the target is within the archetype's attack geometry.
//! 2. Line movers try a charge along a clear sightline.
//! 3. Otherwise take the next node of a BFS path; line movers may rush
//!    along several straight nodes, single steps are refined against
//!    ally positions.
//! 4. Range-holding archetypes that would end exposed back off instead.
//! 5. Nothing applies: stay.

use serde::{Deserialize, Serialize};

use crate::actors::ActorStorage;
use crate::archetype::{Approach, Strategy};
use crate::charge::resolve_charge;
use crate::components::{Actor, ActorId, MoveIntent, Position};
use crate::config::TacticsConfig;
use crate::grid::Grid;
use crate::math::manhattan;
use crate::pathfinding::find_path;
use crate::tactics::{find_defensive_moves, refine_step};

/// What an actor wants to do this turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Decision {
    /// Strike the target without moving.
    Attack,
    /// Charge along a sightline to the tile next to the target.
    Charge {
        /// Landing tile.
        destination: Position,
        /// Tiles crossed, ending with `destination`.
        path: Vec<Position>,
        /// The landing tile is within strike reach.
        follow_up: bool,
    },
    /// Advance along a path.
    Move {
        /// Final tile this turn.
        destination: Position,
        /// Tiles entered, ending with `destination`.
        path: Vec<Position>,
        /// The destination is within strike reach.
        follow_up: bool,
    },
    /// Back away from the target.
    Retreat {
        /// Tile to retreat to.
        destination: Position,
    },
    /// Do nothing.
    Stay,
}

impl Decision {
    /// Destination of this decision, if it moves the actor.
    #[must_use]
    pub fn destination(&self) -> Option<Position> {
        match self {
            Self::Charge { destination, .. }
            | Self::Move { destination, .. }
            | Self::Retreat { destination } => Some(*destination),
            Self::Attack | Self::Stay => None,
        }
    }

    /// The move intent a calculator reports for this decision.
    ///
    /// Strikes and idling report no intent.
    #[must_use]
    pub fn intent(&self) -> Option<MoveIntent> {
        self.destination().map(MoveIntent::to)
    }

    /// True if carrying out this decision strikes the target.
    #[must_use]
    pub const fn strikes(&self) -> bool {
        match self {
            Self::Attack => true,
            Self::Charge { follow_up, .. } | Self::Move { follow_up, .. } => *follow_up,
            Self::Retreat { .. } | Self::Stay => false,
        }
    }
}

/// Decide what actor `id` does against a target standing on `target`.
///
/// Never mutates anything. Unknown or defeated actors stay.
#[must_use]
pub fn decide(
    grid: &Grid,
    actors: &ActorStorage,
    target: Position,
    config: &TacticsConfig,
    id: ActorId,
) -> Decision {
    let Some(actor) = actors.get(id).filter(|actor| actor.is_alive()) else {
        return Decision::Stay;
    };
    let strategy = actor.archetype.strategy();

    if strategy.attack.reaches(actor.position, target) {
        tracing::debug!(actor = id, at = %actor.position, "Target in reach");
        return Decision::Attack;
    }

    if let Some(kind) = strategy.charge {
        if let Some(landing) = resolve_charge(
            grid,
            actors,
            id,
            actor.position,
            target,
            kind,
            config.actors_block_charges,
        ) {
            tracing::debug!(actor = id, to = %landing.destination, "Charging");
            return Decision::Charge {
                follow_up: strategy.attack.reaches(landing.destination, target),
                destination: landing.destination,
                path: landing.path,
            };
        }
    }

    let Some(path) = approach_path(grid, actors, actor, strategy, target) else {
        tracing::debug!(actor = id, "No path, staying");
        return Decision::Stay;
    };

    let entered = if strategy.rush {
        rush_nodes(grid, actors, id, &path, target, config.max_rush)
    } else {
        path[1..2].to_vec()
    };
    let Some(&last) = entered.last() else {
        return Decision::Stay;
    };

    let destination = if entered.len() == 1 && last != target {
        refine_step(actor, last, target, grid, actors, config)
    } else {
        last
    };

    if strategy.holds_range
        && destination != target
        && config.is_exposed(manhattan(destination, target))
    {
        let candidate_distance = manhattan(destination, target);
        if let Some(safer) = find_defensive_moves(actor, target, grid, actors)
            .into_iter()
            .find(|&tile| manhattan(tile, target) > candidate_distance)
        {
            tracing::debug!(actor = id, to = %safer, "Holding range");
            return Decision::Retreat { destination: safer };
        }
    }

    let path = if destination == last {
        entered
    } else {
        vec![destination]
    };
    tracing::debug!(actor = id, to = %destination, tiles = path.len(), "Moving");
    Decision::Move {
        follow_up: strategy.attack.reaches(destination, target),
        destination,
        path,
    }
}

/// BFS path towards the target, falling back to the archetype's approach
/// goal. Returned paths hold at least one step.
fn approach_path(
    grid: &Grid,
    actors: &ActorStorage,
    actor: &Actor,
    strategy: &Strategy,
    target: Position,
) -> Option<Vec<Position>> {
    let walkable = |pos: Position| {
        pos == target || (grid.is_walkable_at(pos) && !actors.is_occupied_by_other(pos, actor.id))
    };

    let direct = find_path(actor.position, target, strategy.directions, walkable);
    let path = match (direct, strategy.approach) {
        (Some(path), _) => Some(path),
        (None, Approach::Column) => {
            let goal = Position::new(actor.position.x, target.y);
            find_path(actor.position, goal, strategy.directions, walkable)
        }
        (None, Approach::Direct) => None,
    };
    path.filter(|nodes| nodes.len() >= 2)
}

/// Leading nodes of `path` a line mover covers this turn.
///
/// Always includes the first step. Further nodes are taken while they keep
/// the first step's direction, stay free, never enter the target and fit
/// within `max_rush`.
fn rush_nodes(
    grid: &Grid,
    actors: &ActorStorage,
    id: ActorId,
    path: &[Position],
    target: Position,
    max_rush: Option<u32>,
) -> Vec<Position> {
    let step = path[0].delta_to(path[1]);
    let limit = max_rush.map_or(usize::MAX, |cap| cap.max(1) as usize);

    let mut entered = vec![path[1]];
    for pair in path[1..].windows(2) {
        let next = pair[1];
        if entered.len() >= limit
            || pair[0].delta_to(next) != step
            || next == target
            || !grid.is_walkable_at(next)
            || actors.is_occupied_by_other(next, id)
        {
            break;
        }
        entered.push(next);
    }
    entered
}
