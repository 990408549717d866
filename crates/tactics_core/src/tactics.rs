//! Cooperative positioning heuristics.
//!
//! Pure scoring helpers over a snapshot of ally positions. Nothing here
//! mutates state; move calculators use the scores to refine a candidate
//! step or to back away from the target.
//!
//! Scores are fixed-point so that comparisons are reproducible.

use serde::{Deserialize, Serialize};

use crate::actors::ActorStorage;
use crate::components::{Actor, Position};
use crate::config::TacticsConfig;
use crate::grid::Grid;
use crate::math::{manhattan, percent, unit_step, Fixed};

/// Snapshot of how a tile scores against the target and the allies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TacticalScore {
    /// Manhattan distance to the target.
    pub distance: u32,
    /// Average Manhattan distance to allies.
    #[serde(with = "crate::math::fixed_serde")]
    pub cluster: Fixed,
    /// Share of allies approaching from a different octant.
    #[serde(with = "crate::math::fixed_serde")]
    pub diversity: Fixed,
    /// An ally stands between this tile and the target.
    pub stacked: bool,
}

impl TacticalScore {
    /// Score `pos` for an attack on `target`.
    #[must_use]
    pub fn evaluate(
        pos: Position,
        target: Position,
        allies: &[Position],
        config: &TacticsConfig,
    ) -> Self {
        Self {
            distance: manhattan(pos, target),
            cluster: cluster_distance(pos, allies, config.isolation_distance),
            diversity: direction_diversity(pos, target, allies),
            stacked: is_stacked_behind(pos, target, allies),
        }
    }
}

/// Average Manhattan distance from `pos` to `allies`.
///
/// Returns `isolation` when there are no allies, which ranks a lone actor
/// as badly placed instead of dividing by zero.
#[must_use]
pub fn cluster_distance(pos: Position, allies: &[Position], isolation: u32) -> Fixed {
    if allies.is_empty() {
        return Fixed::from_num(isolation);
    }
    let total: u64 = allies.iter().map(|&ally| u64::from(manhattan(pos, ally))).sum();
    Fixed::from_num(total) / Fixed::from_num(allies.len())
}

/// Which of eight 45° sectors around `target` contains `pos`.
///
/// Sectors are numbered clockwise from north. Returns `None` for the
/// target tile itself.
fn octant(pos: Position, target: Position) -> Option<u8> {
    let (dx, dy) = target.delta_to(pos);
    if dx == 0 && dy == 0 {
        return None;
    }
    let (ax, ay) = (i64::from(dx.abs()), i64::from(dy.abs()));
    // tan(22.5°) ≈ 12/29
    let sector = if ay * 29 < ax * 12 {
        if dx > 0 {
            2
        } else {
            6
        }
    } else if ax * 29 < ay * 12 {
        if dy < 0 {
            0
        } else {
            4
        }
    } else {
        match (dx > 0, dy < 0) {
            (true, true) => 1,
            (true, false) => 3,
            (false, false) => 5,
            (false, true) => 7,
        }
    };
    Some(sector)
}

/// Share of allies that approach the target from a different octant than
/// `pos`, in `0..=1`. Higher means a better spread; no allies scores 1.
#[must_use]
pub fn direction_diversity(pos: Position, target: Position, allies: &[Position]) -> Fixed {
    if allies.is_empty() {
        return Fixed::ONE;
    }
    let own = octant(pos, target);
    let same = allies
        .iter()
        .filter(|&&ally| octant(ally, target) == own)
        .count();
    Fixed::from_num(allies.len() - same) / Fixed::from_num(allies.len())
}

/// True if an ally stands on the straight ray from `pos` to `target`,
/// strictly between the two.
#[must_use]
pub fn is_stacked_behind(pos: Position, target: Position, allies: &[Position]) -> bool {
    let (dx, dy) = pos.delta_to(target);
    let aligned = (dx == 0) != (dy == 0) || (dx != 0 && dx.abs() == dy.abs());
    if !aligned {
        return false;
    }

    let (step_x, step_y) = unit_step(pos, target);
    let mut cursor = pos.offset(step_x, step_y);
    while cursor != target {
        if allies.contains(&cursor) {
            return true;
        }
        cursor = cursor.offset(step_x, step_y);
    }
    false
}

/// Single-step moves that take `actor` strictly farther from `target`.
///
/// Only walkable tiles free of other actors qualify. Moves are ordered by
/// distance gained, largest first; ties keep direction-set order.
/// Increasing the distance never lands an actor that was outside the
/// vulnerability threshold back inside it.
#[must_use]
pub fn find_defensive_moves(
    actor: &Actor,
    target: Position,
    grid: &Grid,
    actors: &ActorStorage,
) -> Vec<Position> {
    let current = manhattan(actor.position, target);
    let mut moves: Vec<(u32, Position)> = actor
        .archetype
        .strategy()
        .directions
        .iter()
        .map(|&(dx, dy)| actor.position.offset(dx, dy))
        .filter(|&next| grid.is_walkable_at(next) && !actors.is_occupied_by_other(next, actor.id))
        .filter_map(|next| {
            let distance = manhattan(next, target);
            (distance > current).then(|| (distance - current, next))
        })
        .collect();

    moves.sort_by(|a, b| b.0.cmp(&a.0));
    moves.into_iter().map(|(_, next)| next).collect()
}

/// Swap a single pathfinding step for a better-coordinated one.
///
/// Only kicks in when `candidate` is stacked behind an ally or shares its
/// approach octant with one. The first alternative that is legal, not much
/// riskier, not stacked, and improves either spread or cohesion by the
/// configured margin wins. Otherwise `candidate` is returned unchanged.
#[must_use]
pub fn refine_step(
    actor: &Actor,
    candidate: Position,
    target: Position,
    grid: &Grid,
    actors: &ActorStorage,
    config: &TacticsConfig,
) -> Position {
    let allies = actors.ally_positions(actor.id);
    if allies.is_empty() {
        return candidate;
    }

    let base = TacticalScore::evaluate(candidate, target, &allies, config);
    if !base.stacked && base.diversity == Fixed::ONE {
        return candidate;
    }

    let max_distance = base.distance + config.max_risk_increase;
    let base_exposed = config.is_exposed(base.distance);
    let diversity_gain = percent(config.diversity_gain_percent);
    let cluster_gain = Fixed::from_num(config.cluster_gain);

    for &(dx, dy) in actor.archetype.strategy().directions {
        let alternative = actor.position.offset(dx, dy);
        if alternative == candidate
            || alternative == target
            || !grid.is_walkable_at(alternative)
            || actors.is_occupied_by_other(alternative, actor.id)
        {
            continue;
        }

        let score = TacticalScore::evaluate(alternative, target, &allies, config);
        if score.distance > max_distance
            || score.stacked
            || (!base_exposed && config.is_exposed(score.distance))
        {
            continue;
        }

        let spreads = score.diversity >= base.diversity + diversity_gain;
        let tightens = score.cluster + cluster_gain <= base.cluster;
        if spreads || tightens {
            tracing::debug!(
                actor = actor.id,
                %candidate,
                %alternative,
                spreads,
                tightens,
                "Refined step"
            );
            return alternative;
        }
    }

    candidate
}
