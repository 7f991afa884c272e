//! labeler core library.
//!
//! Decides which labels an issue or pull request should receive from a
//! repository-hosted YAML config of regex rules.
//!
//! High-level modules:
//! - `models`: Label rules, the full and simple config schemas, and events.
//! - `matcher`: Regex evaluation over the joined title/body text.
//! - `branch`: Target-branch filtering of matched labels.
//! - `fields`: Which fields feed the searchable text.
//! - `labeler`: The orchestrator (`decide` plus the run state machine).
//! - `client`: Collaborator traits and the local filesystem client.
//! - `config`: Tool settings discovery and effective settings resolution.
//! - `cli`: CLI argument parsing (binary uses this).
//! - `output`: Human/JSON printers for run and validate.
//! - `error`: Error types.
pub mod branch;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod fields;
pub mod labeler;
pub mod matcher;
pub mod models;
pub mod output;

#[cfg(test)]
pub(crate) mod test_utils;

pub use error::{ClientError, LabelerError, PatternError};
pub use labeler::{decide, Decision, Labeler, Options, RunReport};
pub use models::{Config, LabelConfig, LabelRule, LabelSet};
