//! The full config schema.
//!
//! ```yaml
//! enable:
//!   issues: true
//!   prs: false
//! comments:
//!   issues: Thanks for this!
//!   prs: I applied labels to your pull request.
//! fields: [title]
//! labels:
//!   bug:
//!     include: ['\bbug[s]?\b']
//!     branches: [main, develop]
//!   help wanted:
//!     include: ['\bhelp( me)?\b']
//!     exclude: ['\b\[test(ing)?\]\b']
//! ```
//!
//! The pull-request keys are spelled `prs`; `pull_requests` is accepted too.

use super::{LabelConfig, LabelRule, LabelSet};
use crate::error::PatternError;
use crate::matcher::Searchable;
use crate::models::event::EventKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
/// Per-event-type switches. Unset means enabled.
pub struct Enable {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issues: Option<bool>,
    #[serde(
        default,
        rename = "prs",
        alias = "pull_requests",
        skip_serializing_if = "Option::is_none"
    )]
    pub pull_requests: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
/// Comment text posted when labels are applied, per event type.
pub struct Comments {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issues: Option<String>,
    #[serde(
        default,
        rename = "prs",
        alias = "pull_requests",
        skip_serializing_if = "Option::is_none"
    )]
    pub pull_requests: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct FullConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable: Option<Enable>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<Comments>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<String>>,
    #[serde(default)]
    pub labels: BTreeMap<String, LabelRule>,
}

#[derive(Debug, Error)]
pub enum FullConfigError {
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
    #[error("full config requires labels to be defined")]
    NoLabels,
}

impl FullConfig {
    pub fn comment_for(&self, kind: EventKind) -> Option<&str> {
        let comments = self.comments.as_ref()?;
        if kind.is_pull_request() {
            comments.pull_requests.as_deref()
        } else {
            comments.issues.as_deref()
        }
    }

    pub fn enabled_for(&self, kind: EventKind) -> bool {
        let Some(enable) = self.enable.as_ref() else {
            return true;
        };
        let flag = if kind.is_pull_request() {
            enable.pull_requests
        } else {
            enable.issues
        };
        flag.unwrap_or(true)
    }
}

impl LabelConfig for FullConfig {
    type Error = FullConfigError;

    fn from_bytes(bytes: &[u8]) -> Result<Self, Self::Error> {
        let cfg: FullConfig = serde_yaml::from_slice(bytes)?;
        if cfg.labels.is_empty() {
            return Err(FullConfigError::NoLabels);
        }
        Ok(cfg)
    }

    /// Each label is judged on its own: a matching exclude pattern drops that
    /// label only, and include patterns are never consulted for it.
    fn labels_for<S: AsRef<str>>(&self, texts: &[S]) -> Result<LabelSet, PatternError> {
        let searchable = Searchable::join(texts);
        let mut labels = LabelSet::new();
        for (name, rule) in &self.labels {
            if searchable.matches_any(&rule.exclude)? {
                continue;
            }
            if searchable.matches_any(&rule.include)? {
                labels.insert(name.clone(), rule.clone());
            }
        }
        Ok(labels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::testdata;

    fn rule(include: &[&str], exclude: &[&str], branches: &[&str]) -> LabelRule {
        let own = |v: &[&str]| v.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        LabelRule {
            include: own(include),
            exclude: own(exclude),
            branches: own(branches),
        }
    }

    fn expected_labels() -> BTreeMap<String, LabelRule> {
        BTreeMap::from([
            (
                "bug".to_string(),
                rule(&[r"\bbug[s]?\b"], &[], &["main", "develop"]),
            ),
            ("enhancement".to_string(), rule(&[r"\bfeat\b"], &[], &[])),
            (
                "help wanted".to_string(),
                rule(&[r"\bhelp( me)?\b"], &[r"\b\[test(ing)?\]\b"], &[]),
            ),
        ])
    }

    #[test]
    fn parses_full_fixture() {
        let cfg = FullConfig::from_bytes(&testdata("full_config.yaml")).unwrap();
        assert_eq!(
            cfg.enable,
            Some(Enable {
                issues: Some(true),
                pull_requests: Some(false),
            })
        );
        let comments = cfg.comments.clone().unwrap();
        assert_eq!(comments.issues.as_deref(), Some("👍 Thanks for this!"));
        assert_eq!(
            comments.pull_requests.as_deref(),
            Some("I applied labels to your pull request.\n\nPlease review the labels.\n")
        );
        assert_eq!(cfg.labels, expected_labels());
        assert_eq!(cfg.fields, None);
    }

    #[test]
    fn parses_fields_override() {
        let cfg = FullConfig::from_bytes(&testdata("full_config_title_only.yaml")).unwrap();
        assert_eq!(cfg.fields, Some(vec!["title".to_string()]));
        assert_eq!(cfg.labels, expected_labels());
    }

    #[test]
    fn parses_labels_only() {
        let cfg = FullConfig::from_bytes(&testdata("full_config_labels_only.yaml")).unwrap();
        assert!(cfg.enable.is_none());
        assert!(cfg.comments.is_none());
        assert_eq!(cfg.labels["question"], rule(&[r"\bquestion\b"], &[], &[]));
    }

    #[test]
    fn accepts_pull_requests_alias() {
        let yaml = b"comments:\n  pull_requests: merged\nlabels:\n  bug:\n    include: [bug]\n";
        let cfg = FullConfig::from_bytes(yaml).unwrap();
        assert_eq!(cfg.comment_for(EventKind::PullRequest), Some("merged"));
        assert_eq!(cfg.comment_for(EventKind::Issues), None);
    }

    #[test]
    fn requires_labels() {
        let err = FullConfig::from_bytes(&testdata("full_config_enable_only.yaml")).unwrap_err();
        assert!(matches!(err, FullConfigError::NoLabels));
        assert!(FullConfig::from_bytes(&testdata("full_config_comments_only.yaml")).is_err());
    }

    #[test]
    fn rejects_simple_schema() {
        assert!(FullConfig::from_bytes(&testdata("simple_config_base.yaml")).is_err());
        assert!(FullConfig::from_bytes(&testdata("simple_config_labels.yaml")).is_err());
    }

    #[test]
    fn exclude_wins_over_include() {
        let cfg = FullConfig::from_bytes(&testdata("full_config.yaml")).unwrap();
        let labels = cfg.labels_for(&["help me with foo[testing]bar"]).unwrap();
        assert!(!labels.contains_key("help wanted"));
        let labels = cfg.labels_for(&["please help me"]).unwrap();
        assert!(labels.contains_key("help wanted"));
    }

    #[test]
    fn exclusion_does_not_stop_other_labels() {
        let yaml = b"labels:\n  a-excluded:\n    include: [fix]\n    exclude: [wip]\n  b-kept:\n    include: [fix]\n";
        let cfg = FullConfig::from_bytes(yaml).unwrap();
        let labels = cfg.labels_for(&["wip fix"]).unwrap();
        assert_eq!(labels.keys().collect::<Vec<_>>(), vec!["b-kept"]);
    }

    #[test]
    fn rule_without_includes_never_matches() {
        let yaml = b"labels:\n  empty:\n    exclude: [nope]\n";
        let cfg = FullConfig::from_bytes(yaml).unwrap();
        assert!(cfg.labels_for(&["anything at all"]).unwrap().is_empty());
    }

    #[test]
    fn labels_for_keeps_full_rule() {
        let cfg = FullConfig::from_bytes(&testdata("full_config.yaml")).unwrap();
        let labels = cfg.labels_for(&["fix bugs", "and a feat"]).unwrap();
        assert_eq!(labels.len(), 2);
        assert_eq!(labels["bug"], expected_labels()["bug"]);
        assert_eq!(labels["enhancement"].include, vec![r"\bfeat\b".to_string()]);
    }

    #[test]
    fn enabled_defaults_to_true() {
        let cfg = FullConfig::from_bytes(&testdata("full_config.yaml")).unwrap();
        assert!(cfg.enabled_for(EventKind::Issues));
        assert!(!cfg.enabled_for(EventKind::PullRequestTarget));
        let cfg = FullConfig::from_bytes(&testdata("full_config_labels_only.yaml")).unwrap();
        assert!(cfg.enabled_for(EventKind::PullRequest));
    }
}
