//! Archetypes and their movement strategies.
//!
//! Each archetype maps to one static [`Strategy`] record: which steps it
//! may take, how it strikes, whether it charges along sightlines, and which
//! tactical overrides apply. Calculators dispatch on the record rather than
//! on the archetype itself, so adding a ruleset is a table edit.

use serde::{Deserialize, Serialize};

use crate::components::Position;
use crate::line_of_sight::LosKind;
use crate::math::chebyshev;
use crate::pathfinding::{
    DIAGONAL_STEPS, KING_STEPS, KNIGHT_OFFSETS, ORTHOGONAL_STEPS, PAWN_STEPS,
};

/// Fixed movement and attack ruleset of an actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Archetype {
    /// Advances along its column, strikes any neighbour.
    Pawn,
    /// Moves and charges along rows and columns.
    Rook,
    /// Moves and charges along diagonals.
    Bishop,
    /// Hops in L shapes.
    Knight,
    /// Steps one tile in any direction.
    King,
    /// Moves and charges along rows, columns and diagonals.
    Queen,
}

impl Archetype {
    /// Every archetype, in declaration order.
    pub const ALL: [Archetype; 6] = [
        Archetype::Pawn,
        Archetype::Rook,
        Archetype::Bishop,
        Archetype::Knight,
        Archetype::King,
        Archetype::Queen,
    ];

    /// Strategy record for this archetype.
    #[must_use]
    pub const fn strategy(self) -> &'static Strategy {
        match self {
            Self::Pawn => &PAWN,
            Self::Rook => &ROOK,
            Self::Bishop => &BISHOP,
            Self::Knight => &KNIGHT,
            Self::King => &KING,
            Self::Queen => &QUEEN,
        }
    }

    /// Returns true for archetypes that travel along straight lines.
    #[must_use]
    pub const fn is_line_mover(self) -> bool {
        self.strategy().rush
    }
}

/// Tiles from which an archetype can strike its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackGeometry {
    /// Edge-adjacent tiles.
    Orthogonal,
    /// Corner-adjacent tiles.
    Diagonal,
    /// Any of the eight neighbours.
    Adjacent,
}

impl AttackGeometry {
    /// True if an attacker at `from` can strike `to`.
    ///
    /// Standing on the target counts as reach for every geometry.
    #[must_use]
    pub fn reaches(self, from: Position, to: Position) -> bool {
        let dx = from.x.abs_diff(to.x);
        let dy = from.y.abs_diff(to.y);
        if dx == 0 && dy == 0 {
            return true;
        }
        match self {
            Self::Orthogonal => dx + dy == 1,
            Self::Diagonal => dx == 1 && dy == 1,
            Self::Adjacent => chebyshev(from, to) == 1,
        }
    }
}

/// Where pathfinding aims when the target itself cannot be reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Approach {
    /// Path to the target tile or not at all.
    Direct,
    /// Fall back to the target's row within the actor's own column.
    Column,
}

/// Per-archetype decision parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Strategy {
    /// Single-turn step offsets used by pathfinding and retreats.
    pub directions: &'static [(i32, i32)],
    /// Strike reach.
    pub attack: AttackGeometry,
    /// Sightline kind used for charges, if the archetype charges.
    pub charge: Option<LosKind>,
    /// May travel several straight path nodes in one turn.
    pub rush: bool,
    /// Fallback pathfinding goal.
    pub approach: Approach,
    /// Backs off rather than ending a move inside the vulnerability threshold.
    pub holds_range: bool,
}

const PAWN: Strategy = Strategy {
    directions: &PAWN_STEPS,
    attack: AttackGeometry::Adjacent,
    charge: None,
    rush: false,
    approach: Approach::Column,
    holds_range: false,
};

const ROOK: Strategy = Strategy {
    directions: &ORTHOGONAL_STEPS,
    attack: AttackGeometry::Orthogonal,
    charge: Some(LosKind::Orthogonal),
    rush: true,
    approach: Approach::Direct,
    holds_range: true,
};

const BISHOP: Strategy = Strategy {
    directions: &DIAGONAL_STEPS,
    attack: AttackGeometry::Diagonal,
    charge: Some(LosKind::Diagonal),
    rush: true,
    approach: Approach::Direct,
    holds_range: true,
};

const KNIGHT: Strategy = Strategy {
    directions: &KNIGHT_OFFSETS,
    attack: AttackGeometry::Adjacent,
    charge: None,
    rush: false,
    approach: Approach::Direct,
    holds_range: false,
};

const KING: Strategy = Strategy {
    directions: &KING_STEPS,
    attack: AttackGeometry::Adjacent,
    charge: None,
    rush: false,
    approach: Approach::Direct,
    holds_range: false,
};

const QUEEN: Strategy = Strategy {
    directions: &KING_STEPS,
    attack: AttackGeometry::Adjacent,
    charge: Some(LosKind::Queen),
    rush: true,
    approach: Approach::Direct,
    holds_range: true,
};
