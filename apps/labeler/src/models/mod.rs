//! Label rules and the two config schemas.
//!
//! `Config::parse` tries the full schema first and falls back to the simple
//! one. The schemas share surface keys (`labels`, `comment`/`comments`) but
//! differ in shape, so the full schema is validated after the YAML parse
//! (it must declare labels) before it is accepted.

pub mod event;
pub mod full;
pub mod simple;

use crate::error::{LabelerError, PatternError};
use crate::fields::FieldFlags;
use event::EventKind;
use full::FullConfig;
use serde::{Deserialize, Serialize};
use simple::SimpleConfig;
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
/// Include, exclude and branch patterns governing one label.
pub struct LabelRule {
    #[serde(default)]
    pub include: Vec<String>,
    #[serde(default)]
    pub exclude: Vec<String>,
    #[serde(default)]
    pub branches: Vec<String>,
}

/// Matched label name → rule. Ordered for deterministic output.
pub type LabelSet = BTreeMap<String, LabelRule>;

/// Capability shared by both schemas.
pub trait LabelConfig: Sized {
    type Error: std::error::Error;

    fn from_bytes(bytes: &[u8]) -> Result<Self, Self::Error>;

    /// Labels whose rules match `texts` joined by a single space.
    fn labels_for<S: AsRef<str>>(&self, texts: &[S]) -> Result<LabelSet, PatternError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Config {
    Full(FullConfig),
    Simple(SimpleConfig),
}

impl Config {
    /// Parse config bytes loaded from `path`. `path` only names the source
    /// in the error.
    pub fn parse(bytes: &[u8], path: &str) -> Result<Config, LabelerError> {
        match FullConfig::from_bytes(bytes) {
            Ok(full) => return Ok(Config::Full(full)),
            Err(e) => debug!(path, error = %e, "not a full config, trying simple schema"),
        }
        match SimpleConfig::from_bytes(bytes) {
            Ok(simple) => Ok(Config::Simple(simple)),
            Err(e) => {
                debug!(path, error = %e, "not a simple config either");
                Err(LabelerError::ConfigParse {
                    path: path.to_string(),
                })
            }
        }
    }

    pub fn labels_for<S: AsRef<str>>(&self, texts: &[S]) -> Result<LabelSet, PatternError> {
        match self {
            Config::Full(c) => c.labels_for(texts),
            Config::Simple(c) => c.labels_for(texts),
        }
    }

    /// Comment to post once labels were applied; empty text counts as none.
    pub fn comment_for(&self, kind: EventKind) -> Option<&str> {
        let comment = match self {
            Config::Full(c) => c.comment_for(kind),
            Config::Simple(c) => Some(c.comment.as_str()),
        };
        comment.filter(|c| !c.is_empty())
    }

    /// Fields declared by the config; empty when it declares none.
    pub fn fields(&self) -> FieldFlags {
        match self {
            Config::Full(FullConfig {
                fields: Some(names),
                ..
            }) => FieldFlags::parse(names),
            _ => FieldFlags::NONE,
        }
    }

    pub fn enabled_for(&self, kind: EventKind) -> bool {
        match self {
            Config::Full(c) => c.enabled_for(kind),
            Config::Simple(_) => true,
        }
    }

    pub fn variant(&self) -> &'static str {
        match self {
            Config::Full(_) => "full",
            Config::Simple(_) => "simple",
        }
    }

    /// Declared label names, in order.
    pub fn label_names(&self) -> Vec<&str> {
        match self {
            Config::Full(c) => c.labels.keys().map(String::as_str).collect(),
            Config::Simple(c) => c.labels.keys().map(String::as_str).collect(),
        }
    }
}

#[cfg(test)]
pub(crate) fn testdata(name: &str) -> Vec<u8> {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("testdata")
        .join(name);
    std::fs::read(&path).unwrap_or_else(|e| panic!("read {}: {}", path.display(), e))
}
