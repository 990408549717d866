//! Headless encounter runner for AI tuning and CI verification.
//!
//! Loads a RON scenario, plays it with the tactics engine and writes the
//! result as JSON lines. This enables:
//!
//! - **AI tuning**: compare turn reports across config changes
//! - **CI verification**: check that scenarios replay with identical hashes
//!
//! # Protocol
//!
//! - **stdout**: turn reports and the final result (JSON lines)
//! - **stderr**: logs (human-readable)
//!
//! See the [`protocol`] module for the line format.
//!
//! # Example
//!
//! ```bash
//! # Play a scenario
//! cargo run -p tactics_headless -- run scenarios/skirmish.ron
//!
//! # Verify determinism
//! cargo run -p tactics_headless -- verify scenarios/skirmish.ron --runs 5
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod protocol;
pub mod runner;
pub mod scenario;

pub use protocol::{GameResult, Response};
pub use runner::{HeadlessRunner, RunConfig, RunSummary};
pub use scenario::{Scenario, ScenarioError};
