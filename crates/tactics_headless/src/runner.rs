//! Headless encounter runner.
//!
//! Plays an encounter turn by turn and writes protocol lines to any
//! [`Write`] sink, normally stdout.

use std::io::{self, Write};

use tactics_core::orchestrator::Encounter;

use crate::protocol::{GameResult, Response};

/// Configuration for a headless run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Turns to play before giving up.
    pub max_turns: u64,
    /// Emit a state hash line after every turn.
    pub emit_hashes: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            max_turns: 100,
            emit_hashes: false,
        }
    }
}

/// Final state of a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// How it ended.
    pub result: GameResult,
    /// Turns played.
    pub turns: u64,
    /// Player health at the end.
    pub player_health: u32,
    /// Actors still standing.
    pub actors_remaining: usize,
    /// Final state hash.
    pub hash: u64,
}

/// Drives one encounter and reports on it.
pub struct HeadlessRunner {
    name: String,
    encounter: Encounter,
    config: RunConfig,
}

impl HeadlessRunner {
    /// Create a runner with default settings.
    pub fn new(name: impl Into<String>, encounter: Encounter) -> Self {
        Self::with_config(name, encounter, RunConfig::default())
    }

    /// Create a runner with custom settings.
    pub fn with_config(name: impl Into<String>, encounter: Encounter, config: RunConfig) -> Self {
        Self {
            name: name.into(),
            encounter,
            config,
        }
    }

    /// The encounter being played.
    pub fn encounter(&self) -> &Encounter {
        &self.encounter
    }

    /// Play until the player falls, every actor is gone or the turn limit
    /// is reached, writing one line per step to `out`.
    pub fn run<W: Write>(&mut self, out: &mut W) -> io::Result<RunSummary> {
        let ready = Response::ready(
            &self.name,
            self.encounter.turn(),
            self.encounter.actors().len(),
            self.encounter.player().health,
        );
        out.write_all(ready.to_json_line().as_bytes())?;

        let mut played = 0;
        let result = loop {
            if self.encounter.player().health == 0 {
                break GameResult::PlayerDefeated;
            }
            if self.encounter.actors().is_empty() {
                break GameResult::ActorsCleared;
            }
            if played == self.config.max_turns {
                break GameResult::TurnLimit;
            }

            let report = self.encounter.run_turn();
            played += 1;
            tracing::debug!(
                turn = report.turn,
                events = report.events.len(),
                removed = report.removed.len(),
                "Turn resolved"
            );
            out.write_all(Response::Turn { report }.to_json_line().as_bytes())?;

            if self.config.emit_hashes {
                let line = Response::StateHash {
                    turn: self.encounter.turn(),
                    hash: self.encounter.state_hash(),
                };
                out.write_all(line.to_json_line().as_bytes())?;
            }
        };

        let summary = RunSummary {
            result,
            turns: played,
            player_health: self.encounter.player().health,
            actors_remaining: self.encounter.actors().len(),
            hash: self.encounter.state_hash(),
        };
        let game_over = Response::GameOver {
            result: summary.result,
            turns: summary.turns,
            player_health: summary.player_health,
            actors_remaining: summary.actors_remaining,
            hash: summary.hash,
        };
        out.write_all(game_over.to_json_line().as_bytes())?;
        out.flush()?;

        tracing::info!(
            result = ?summary.result,
            turns = summary.turns,
            "Encounter finished"
        );
        Ok(summary)
    }
}

/// Play `runs` copies of an encounter silently and collect final hashes.
///
/// Every copy comes from `setup`, so identical hashes mean the turn loop
/// is deterministic for this starting state.
pub fn replay_hashes<F>(setup: F, runs: u32, max_turns: u64) -> Vec<u64>
where
    F: Fn() -> Encounter,
{
    (0..runs)
        .map(|run| {
            let mut runner = HeadlessRunner::with_config(
                format!("replay-{run}"),
                setup(),
                RunConfig {
                    max_turns,
                    emit_hashes: false,
                },
            );
            let mut sink = io::sink();
            match runner.run(&mut sink) {
                Ok(summary) => summary.hash,
                // io::sink never fails.
                Err(_) => runner.encounter().state_hash(),
            }
        })
        .collect()
}
