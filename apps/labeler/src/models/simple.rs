//! The simple config schema: one comment, label → include patterns, and an
//! optional label → branch patterns map.
//!
//! ```yaml
//! comment: Thanks for this!
//! labels:
//!   bug:
//!     - '\bbug[s]?\b'
//! branches:
//!   bug:
//!     - main
//! ```

use super::{LabelConfig, LabelRule, LabelSet};
use crate::error::PatternError;
use crate::matcher::Searchable;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct SimpleConfig {
    /// Applied to any issue or pull request that receives new labels.
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub labels: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub branches: BTreeMap<String, Vec<String>>,
}

impl LabelConfig for SimpleConfig {
    type Error = serde_yaml::Error;

    fn from_bytes(bytes: &[u8]) -> Result<Self, Self::Error> {
        serde_yaml::from_slice(bytes)
    }

    /// Rules are rebuilt from the patterns that matched; exclude is always
    /// empty in this schema.
    fn labels_for<S: AsRef<str>>(&self, texts: &[S]) -> Result<LabelSet, PatternError> {
        let searchable = Searchable::join(texts);
        let mut labels = LabelSet::new();
        for (name, patterns) in &self.labels {
            let include = searchable.matching(patterns)?;
            if include.is_empty() {
                continue;
            }
            labels.insert(
                name.clone(),
                LabelRule {
                    include,
                    exclude: Vec::new(),
                    branches: self.branches.get(name).cloned().unwrap_or_default(),
                },
            );
        }
        Ok(labels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::testdata;

    #[test]
    fn parses_basic_fixture() {
        let cfg = SimpleConfig::from_bytes(&testdata("simple_config_base.yaml")).unwrap();
        assert_eq!(cfg.comment, "Thanks for this!");
        assert_eq!(cfg.labels.get("bug"), Some(&vec![r"\bbug[s]?\b".to_string()]));
    }

    #[test]
    fn parses_multiline_comment() {
        let cfg = SimpleConfig::from_bytes(&testdata("simple_config_multiline.yaml")).unwrap();
        assert_eq!(cfg.comment, "First line\nSecond line\n");
    }

    #[test]
    fn parses_many_labels() {
        let cfg = SimpleConfig::from_bytes(&testdata("simple_config_labels.yaml")).unwrap();
        assert_eq!(cfg.comment, "Labels");
        assert_eq!(cfg.labels.len(), 3);
        assert_eq!(
            cfg.labels.get("duplicate"),
            Some(&vec![r"\bduplicate\b".to_string(), r"\bdupe\b".to_string()])
        );
    }

    #[test]
    fn rejects_scalar_document() {
        assert!(SimpleConfig::from_bytes(b"asf").is_err());
    }

    #[test]
    fn rejects_full_schema() {
        assert!(SimpleConfig::from_bytes(&testdata("full_config.yaml")).is_err());
    }

    #[test]
    fn labels_for_matches_bug() {
        let cfg = SimpleConfig::from_bytes(b"labels: {bug: ['\\bbug[s]?\\b']}").unwrap();
        let labels = cfg.labels_for(&["this is a bug"]).unwrap();
        assert_eq!(labels.keys().collect::<Vec<_>>(), vec!["bug"]);
        assert!(labels["bug"].exclude.is_empty());
        assert!(labels["bug"].branches.is_empty());
    }

    #[test]
    fn labels_for_attaches_branches_and_matched_patterns() {
        let cfg = SimpleConfig::from_bytes(&testdata("simple_config_branches.yaml")).unwrap();
        let labels = cfg.labels_for(&["a dupe", "of a bug"]).unwrap();
        assert_eq!(labels.len(), 2);
        assert_eq!(labels["bug"].branches, vec!["main".to_string()]);
        assert_eq!(labels["duplicate"].include, vec![r"\bdupe\b".to_string()]);
        assert!(labels["duplicate"].branches.is_empty());
    }

    #[test]
    fn labels_for_without_match_is_empty() {
        let cfg = SimpleConfig::from_bytes(&testdata("simple_config_labels.yaml")).unwrap();
        assert!(cfg.labels_for(&["nothing to see"]).unwrap().is_empty());
        assert!(cfg.labels_for(&["", ""]).unwrap().is_empty());
    }

    #[test]
    fn labels_for_surfaces_bad_patterns() {
        let cfg = SimpleConfig::from_bytes(b"labels: {bug: ['(bug']}").unwrap();
        assert!(cfg.labels_for(&["bug"]).is_err());
    }
}
