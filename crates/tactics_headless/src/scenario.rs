//! Scenario loading and configuration.
//!
//! Scenarios define the starting state of an encounter: the terrain as
//! ASCII rows, the player, and the actors hunting it.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use tactics_core::archetype::Archetype;
use tactics_core::components::{Player, Position};
use tactics_core::config::TacticsConfig;
use tactics_core::error::TacticsError;
use tactics_core::grid::Grid;
use tactics_core::orchestrator::Encounter;

/// Error type for scenario operations.
#[derive(Error, Debug)]
pub enum ScenarioError {
    /// File not found.
    #[error("Scenario file not found: {0}")]
    FileNotFound(String),
    /// Failed to read file.
    #[error("Failed to read scenario file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse RON.
    #[error("Failed to parse scenario: {0}")]
    ParseError(#[from] ron::error::SpannedError),
    /// The scenario describes an impossible starting state.
    #[error("Invalid scenario: {0}")]
    Invalid(String),
    /// The engine refused part of the setup.
    #[error(transparent)]
    Core(#[from] TacticsError),
}

/// Starting state of the player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSpec {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
    /// Starting health.
    pub health: u32,
    /// Damage per hit.
    pub attack: u32,
}

/// Starting state of one actor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorSpec {
    /// Movement and attack ruleset.
    pub archetype: Archetype,
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
    /// Starting health.
    pub health: u32,
    /// Damage per hit.
    pub attack: u32,
}

/// A complete scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    /// Scenario name.
    pub name: String,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
    /// Terrain, one glyph per tile.
    pub rows: Vec<String>,
    /// The player.
    pub player: PlayerSpec,
    /// Actors, spawned in order.
    pub actors: Vec<ActorSpec>,
    /// Tunables bundled with the scenario.
    #[serde(default)]
    pub config: Option<TacticsConfig>,
}

impl Scenario {
    /// Load a scenario from a RON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ScenarioError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ScenarioError::FileNotFound(path.display().to_string()));
        }
        let contents = std::fs::read_to_string(path)?;
        Self::from_ron(&contents)
    }

    /// Parse a scenario from a RON string.
    pub fn from_ron(source: &str) -> Result<Self, ScenarioError> {
        Ok(ron::from_str(source)?)
    }

    /// Build the encounter this scenario describes.
    ///
    /// `config` overrides the one bundled with the scenario; with neither,
    /// the defaults apply.
    pub fn build(&self, config: Option<TacticsConfig>) -> Result<Encounter, ScenarioError> {
        let grid = Grid::from_rows(&self.rows)?;
        let start = Position::new(self.player.x, self.player.y);
        if !grid.is_walkable_at(start) {
            return Err(ScenarioError::Invalid(format!(
                "player starts on a blocked tile at {start}"
            )));
        }
        if self.player.health == 0 {
            return Err(ScenarioError::Invalid("player starts defeated".into()));
        }

        let config = config.or_else(|| self.config.clone()).unwrap_or_default();
        let player = Player::new(start, self.player.health, self.player.attack);
        let mut encounter = Encounter::new(grid, player, config);

        for spec in &self.actors {
            encounter.spawn_actor(
                spec.archetype,
                Position::new(spec.x, spec.y),
                spec.health,
                spec.attack,
            )?;
        }

        tracing::info!(
            scenario = %self.name,
            actors = encounter.actors().len(),
            "Scenario built"
        );
        Ok(encounter)
    }
}

/// Load tunables from a RON file.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<TacticsConfig, ScenarioError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ScenarioError::FileNotFound(path.display().to_string()));
    }
    let contents = std::fs::read_to_string(path)?;
    Ok(TacticsConfig::from_ron(&contents)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const DUEL: &str = r######"(
        name: "Duel",
        rows: ["#####", "#...#", "#####"],
        player: (x: 3, y: 1, health: 5, attack: 1),
        actors: [(archetype: king, x: 1, y: 1, health: 2, attack: 1)],
    )"######;

    #[test]
    fn test_parse_minimal_scenario() {
        let scenario = Scenario::from_ron(DUEL).unwrap();
        assert_eq!(scenario.name, "Duel");
        assert!(scenario.description.is_empty());
        assert!(scenario.config.is_none());
        assert_eq!(scenario.actors[0].archetype, Archetype::King);
    }

    #[test]
    fn test_build_spawns_actors() {
        let encounter = Scenario::from_ron(DUEL).unwrap().build(None).unwrap();
        assert_eq!(encounter.actors().len(), 1);
        assert_eq!(encounter.player().position, Position::new(3, 1));
        assert_eq!(encounter.player().health, 5);
    }

    #[test]
    fn test_explicit_config_overrides_bundled() {
        let mut scenario = Scenario::from_ron(DUEL).unwrap();
        scenario.config = Some(TacticsConfig {
            knockback: false,
            ..TacticsConfig::default()
        });

        let bundled = scenario.build(None).unwrap();
        assert!(!bundled.config().knockback);

        let explicit = scenario.build(Some(TacticsConfig::default())).unwrap();
        assert!(explicit.config().knockback);
    }

    #[test]
    fn test_player_on_wall_rejected() {
        let mut scenario = Scenario::from_ron(DUEL).unwrap();
        scenario.player.y = 0;
        assert!(matches!(
            scenario.build(None),
            Err(ScenarioError::Invalid(_))
        ));
    }

    #[test]
    fn test_actor_on_player_rejected() {
        let mut scenario = Scenario::from_ron(DUEL).unwrap();
        scenario.actors[0].x = 3;
        assert!(matches!(
            scenario.build(None),
            Err(ScenarioError::Core(TacticsError::InvalidSpawn { .. }))
        ));
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let mut scenario = Scenario::from_ron(DUEL).unwrap();
        scenario.rows[1].push('.');
        assert!(matches!(
            scenario.build(None),
            Err(ScenarioError::Core(TacticsError::InvalidGrid(_)))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(DUEL.as_bytes()).unwrap();

        let scenario = Scenario::load(file.path()).unwrap();
        assert_eq!(scenario.rows.len(), 3);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = Scenario::load(dir.path().join("absent.ron"));
        assert!(matches!(result, Err(ScenarioError::FileNotFound(_))));
    }

    #[test]
    fn test_load_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"(max_rush: Some(2))").unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.max_rush, Some(2));
        assert!(config.knockback);
    }

    #[test]
    fn test_bundled_scenarios_parse() {
        for source in [
            include_str!("../scenarios/skirmish.ron"),
            include_str!("../scenarios/corridor.ron"),
        ] {
            let scenario = Scenario::from_ron(source).unwrap();
            scenario.build(None).unwrap();
        }
    }
}
