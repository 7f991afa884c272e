//! Error taxonomy for a labeling run.
//!
//! Precondition, option, config and payload errors are fatal and raised
//! before any labels are touched. `LabelApply` exists so the failure can be
//! logged with context, but the orchestrator recovers from it locally.

use std::time::Duration;
use thiserror::Error;

/// Failure of a single collaborator call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClientError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("call timed out after {0:?}")]
    Timeout(Duration),
}

/// A regular expression in the label config failed to compile.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid pattern {pattern:?}: {message}")]
pub struct PatternError {
    pub pattern: String,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum LabelerError {
    #[error("{0}")]
    Precondition(String),

    #[error("invalid options: {0}")]
    Options(String),

    #[error("could not fetch {path:?}: {source}")]
    ConfigFetch {
        path: String,
        #[source]
        source: ClientError,
    },

    #[error("could not parse {path:?}")]
    ConfigParse { path: String },

    #[error("could not parse event data: {0}")]
    PayloadParse(#[source] serde_json::Error),

    #[error("could not fetch {kind} #{number}: {source}")]
    EventFetch {
        kind: String,
        number: u64,
        #[source]
        source: ClientError,
    },

    #[error(transparent)]
    Pattern(#[from] PatternError),

    #[error("unable to add labels: {0}")]
    LabelApply(#[source] ClientError),

    #[error("unable to create comment: {0}")]
    Comment(#[source] ClientError),
}

pub type Result<T, E = LabelerError> = std::result::Result<T, E>;
