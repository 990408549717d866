//! Straight-line sight checks between two tiles.
//!
//! Only aligned rays count: a pair of tiles that is not on a shared row,
//! column or diagonal (as the variant allows) has no line of sight at all.
//! The source tile is never tested. The destination is skipped unless
//! [`LosOptions::include_endpoint`] is set, since it usually holds the
//! target itself.

use serde::{Deserialize, Serialize};

use crate::components::Position;
use crate::grid::Grid;
use crate::math::unit_step;

/// Allowed ray directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LosKind {
    /// Same row or same column.
    Orthogonal,
    /// Equal non-zero offsets on both axes.
    Diagonal,
    /// Either of the above.
    Queen,
}

impl LosKind {
    /// True if the offset `(dx, dy)` lies on a ray of this kind.
    #[must_use]
    pub fn is_aligned(self, dx: i32, dy: i32) -> bool {
        if dx == 0 && dy == 0 {
            return false;
        }
        let orthogonal = dx == 0 || dy == 0;
        let diagonal = dx.abs() == dy.abs();
        match self {
            Self::Orthogonal => orthogonal,
            Self::Diagonal => diagonal,
            Self::Queen => orthogonal || diagonal,
        }
    }
}

/// Optional behaviour of a sight check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LosOptions {
    /// Other actors on intermediate tiles block sight.
    pub check_actors: bool,
    /// Also require the destination tile to be walkable.
    pub include_endpoint: bool,
}

impl LosOptions {
    /// Options where other actors block sight.
    #[must_use]
    pub const fn blocking_actors() -> Self {
        Self {
            check_actors: true,
            include_endpoint: false,
        }
    }
}

/// Test for an unobstructed ray of `kind` from `from` to `to`.
///
/// `occupied` reports whether another actor stands on a tile; it is only
/// consulted when [`LosOptions::check_actors`] is set.
pub fn has_line_of_sight<F>(
    grid: &Grid,
    from: Position,
    to: Position,
    kind: LosKind,
    options: LosOptions,
    occupied: F,
) -> bool
where
    F: Fn(Position) -> bool,
{
    let (dx, dy) = from.delta_to(to);
    if !kind.is_aligned(dx, dy) {
        return false;
    }

    let (step_x, step_y) = unit_step(from, to);
    let mut cursor = from.offset(step_x, step_y);
    while cursor != to {
        if !grid.is_walkable_at(cursor) {
            tracing::trace!(%from, %to, blocked_at = %cursor, "Sight blocked by terrain");
            return false;
        }
        if options.check_actors && occupied(cursor) {
            tracing::trace!(%from, %to, blocked_at = %cursor, "Sight blocked by actor");
            return false;
        }
        cursor = cursor.offset(step_x, step_y);
    }

    !options.include_endpoint || grid.is_walkable_at(to)
}

/// Orthogonal sight check.
pub fn orthogonal_los<F>(
    grid: &Grid,
    from: Position,
    to: Position,
    options: LosOptions,
    occupied: F,
) -> bool
where
    F: Fn(Position) -> bool,
{
    has_line_of_sight(grid, from, to, LosKind::Orthogonal, options, occupied)
}

/// Diagonal sight check.
pub fn diagonal_los<F>(
    grid: &Grid,
    from: Position,
    to: Position,
    options: LosOptions,
    occupied: F,
) -> bool
where
    F: Fn(Position) -> bool,
{
    has_line_of_sight(grid, from, to, LosKind::Diagonal, options, occupied)
}

/// Omnidirectional (queen) sight check.
pub fn queen_los<F>(
    grid: &Grid,
    from: Position,
    to: Position,
    options: LosOptions,
    occupied: F,
) -> bool
where
    F: Fn(Position) -> bool,
{
    has_line_of_sight(grid, from, to, LosKind::Queen, options, occupied)
}
