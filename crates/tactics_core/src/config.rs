//! Tunable tactical parameters.
//!
//! Every field has a default, so a config document only needs the values
//! it changes.
//!
//! # Example RON
//!
//! ```ron
//! TacticsConfig(
//!     vulnerability_threshold: 2,
//!     diversity_gain_percent: 25,
//!     max_rush: Some(4),
//! )
//! ```
//!
//! **Note:** this module performs no IO. Reading the document from disk is
//! the caller's job.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Parameters for move selection and combat resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TacticsConfig {
    /// Manhattan distance at or below which an actor counts as exposed.
    pub vulnerability_threshold: u32,
    /// Cluster distance reported for an actor without allies.
    pub isolation_distance: u32,
    /// Minimum gain in direction diversity, in percent, that justifies
    /// swapping a step for an alternative.
    pub diversity_gain_percent: u32,
    /// Minimum drop in average ally distance that justifies a swap.
    pub cluster_gain: u32,
    /// How much farther from the target an alternative step may end up.
    pub max_risk_increase: u32,
    /// Cap on tiles travelled by a rush. `None` means no cap.
    pub max_rush: Option<u32>,
    /// Whether strikes push the defender.
    pub knockback: bool,
    /// Whether other actors block charge sightlines.
    pub actors_block_charges: bool,
}

impl Default for TacticsConfig {
    fn default() -> Self {
        Self {
            vulnerability_threshold: 2,
            isolation_distance: 100,
            diversity_gain_percent: 25,
            cluster_gain: 1,
            max_risk_increase: 1,
            max_rush: None,
            knockback: true,
            actors_block_charges: true,
        }
    }
}

impl TacticsConfig {
    /// Parse a config from a RON document.
    pub fn from_ron(source: &str) -> Result<Self> {
        let config = ron::from_str(source)?;
        Ok(config)
    }

    /// Check if a Manhattan distance lies inside the vulnerability threshold.
    #[must_use]
    pub const fn is_exposed(&self, distance: u32) -> bool {
        distance <= self.vulnerability_threshold
    }
}
