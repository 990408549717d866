//! JSON lines output protocol.
//!
//! The runner writes one JSON object per line on stdout:
//!
//! # Protocol Flow
//!
//! 1. `{"type":"ready",...}` once the scenario is built
//! 2. `{"type":"turn","report":{...}}` after every turn
//! 3. `{"type":"state_hash",...}` after every turn when hashes are requested
//! 4. `{"type":"game_over",...}` when the encounter ends
//!
//! # Example Session
//!
//! ```text
//! <- {"type":"ready","version":"1.0","scenario":"Duel","turn":0,"actors":1,"player_health":5}
//! <- {"type":"turn","report":{"turn":1,"records":[...],"events":[...],"removed":[],"player_defeated":false}}
//! <- {"type":"game_over","result":"actors_cleared","turns":3,"player_health":4,"actors_remaining":0,"hash":1234}
//! ```

use serde::{Deserialize, Serialize};

use tactics_core::orchestrator::TurnReport;

/// Protocol version reported in the ready line.
pub const PROTOCOL_VERSION: &str = "1.0";

/// How an encounter ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameResult {
    /// The player's health reached zero.
    PlayerDefeated,
    /// No actors remain.
    ActorsCleared,
    /// The turn limit was reached first.
    TurnLimit,
}

/// Lines written by the runner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Response {
    /// Encounter built, no turn played yet.
    Ready {
        version: String,
        scenario: String,
        turn: u64,
        actors: usize,
        player_health: u32,
    },

    /// One resolved turn.
    Turn { report: TurnReport },

    /// State hash for determinism verification.
    StateHash { turn: u64, hash: u64 },

    /// Encounter has ended.
    GameOver {
        result: GameResult,
        turns: u64,
        player_health: u32,
        actors_remaining: usize,
        hash: u64,
    },

    /// Something went wrong before or during the run.
    Error { message: String },
}

impl Response {
    /// Create a ready response.
    pub fn ready(scenario: &str, turn: u64, actors: usize, player_health: u32) -> Self {
        Self::Ready {
            version: PROTOCOL_VERSION.to_string(),
            scenario: scenario.to_string(),
            turn,
            actors,
            player_health,
        }
    }

    /// Create an error response.
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    /// Parse a line previously written by [`Response::to_json_line`].
    pub fn from_json(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line)
    }

    /// Serialize to a JSON line, newline included.
    pub fn to_json_line(&self) -> String {
        let mut json = serde_json::to_string(self).unwrap_or_else(|e| {
            format!(r#"{{"type":"error","message":"Serialization failed: {e}"}}"#)
        });
        json.push('\n');
        json
    }
}
