//! # Tactics Core
//!
//! Deterministic decision engine for turn-based, chess-inspired tactical
//! combat.
//!
//! This crate contains **only** deterministic logic:
//! - No rendering
//! - No IO
//! - No randomness
//! - No floating-point math (uses fixed-point)
//!
//! Each turn every non-player actor decides whether to strike, charge,
//! move or back off, following its archetype's movement rules, clear
//! sightlines and a few cooperative heuristics. A per-turn occupancy
//! ledger guarantees no two actors end a turn on the same tile.
//!
//! ## Crate Structure
//!
//! - [`grid`] - Tiles and the walkability oracle
//! - [`line_of_sight`] - Orthogonal, diagonal and queen sightlines
//! - [`pathfinding`] - BFS over archetype direction sets
//! - [`charge`] - Straight-line charges
//! - [`tactics`] - Ally clustering, spread, stacking and retreat scoring
//! - [`movement`] - Per-archetype move calculation
//! - [`combat`] - Damage, knockback and defeat
//! - [`orchestrator`] - Turn loop and occupancy arbitration

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod actors;
pub mod archetype;
pub mod charge;
pub mod combat;
pub mod components;
pub mod config;
pub mod error;
pub mod events;
pub mod grid;
pub mod line_of_sight;
pub mod math;
pub mod movement;
pub mod occupancy;
pub mod orchestrator;
pub mod pathfinding;
pub mod tactics;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::actors::ActorStorage;
    pub use crate::archetype::{Archetype, AttackGeometry, Strategy};
    pub use crate::combat::{resolve_attack, CombatOutcome};
    pub use crate::components::*;
    pub use crate::config::TacticsConfig;
    pub use crate::error::{Result, TacticsError};
    pub use crate::events::{EventSink, NullSink, TacticsEvent};
    pub use crate::grid::{Cell, Grid, TileKind};
    pub use crate::line_of_sight::{LosKind, LosOptions};
    pub use crate::math::Fixed;
    pub use crate::movement::{decide, Decision};
    pub use crate::occupancy::TurnOccupancy;
    pub use crate::orchestrator::{ActorTurnRecord, ActorTurnState, Encounter, TurnReport};
    pub use crate::tactics::TacticalScore;
}
