//! Event types and inline payload parsing.
//!
//! Inline data is tried in webhook shape first (`{"issue": {...}}` or
//! `{"pull_request": {...}}`), then as a bare issue / pull request object.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Labels already attached to an issue or pull request.
pub type ExistingLabels = BTreeSet<String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Issues,
    PullRequest,
    PullRequestTarget,
}

impl EventKind {
    pub const ALL: [EventKind; 3] = [
        EventKind::Issues,
        EventKind::PullRequest,
        EventKind::PullRequestTarget,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Issues => "issues",
            EventKind::PullRequest => "pull_request",
            EventKind::PullRequestTarget => "pull_request_target",
        }
    }

    pub fn is_pull_request(self) -> bool {
        matches!(self, EventKind::PullRequest | EventKind::PullRequestTarget)
    }

    /// Noun used in log and error messages.
    pub fn noun(self) -> &'static str {
        if self.is_pull_request() {
            "pull request"
        } else {
            "issue"
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| {
                format!(
                    "event must be one of [ {} , {} , {} ]",
                    EventKind::Issues,
                    EventKind::PullRequest,
                    EventKind::PullRequestTarget
                )
            })
    }
}

/// The text and branch a label decision is made against.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EventContext {
    pub title: String,
    pub body: String,
    /// Base branch of a pull request; empty for issues.
    pub target_branch: String,
}

/// An issue or pull request as delivered by the event source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolvedEvent {
    pub number: Option<u64>,
    pub context: EventContext,
    pub existing_labels: ExistingLabels,
}

#[derive(Debug, Default, Deserialize)]
struct LabelRef {
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct BaseRef {
    #[serde(rename = "ref", default)]
    git_ref: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ItemPayload {
    #[serde(default)]
    number: Option<u64>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    body: Option<String>,
    #[serde(default)]
    labels: Option<Vec<LabelRef>>,
    #[serde(default)]
    base: Option<BaseRef>,
}

#[derive(Debug, Deserialize)]
struct IssueEnvelope {
    issue: ItemPayload,
}

#[derive(Debug, Deserialize)]
struct PullRequestEnvelope {
    pull_request: ItemPayload,
}

impl ItemPayload {
    fn into_event(self, kind: EventKind) -> ResolvedEvent {
        let target_branch = if kind.is_pull_request() {
            self.base.and_then(|b| b.git_ref).unwrap_or_default()
        } else {
            String::new()
        };
        ResolvedEvent {
            number: self.number,
            context: EventContext {
                title: self.title.unwrap_or_default(),
                body: self.body.unwrap_or_default(),
                target_branch,
            },
            existing_labels: self
                .labels
                .unwrap_or_default()
                .into_iter()
                .filter_map(|l| l.name)
                .collect(),
        }
    }
}

/// Parse inline event data for `kind`, wrapped shape first.
pub fn parse_payload(kind: EventKind, data: &str) -> Result<ResolvedEvent, serde_json::Error> {
    let wrapped = if kind.is_pull_request() {
        serde_json::from_str::<PullRequestEnvelope>(data).map(|e| e.pull_request)
    } else {
        serde_json::from_str::<IssueEnvelope>(data).map(|e| e.issue)
    };
    let item = match wrapped {
        Ok(item) => item,
        Err(_) => serde_json::from_str::<ItemPayload>(data)?,
    };
    Ok(item.into_event(kind))
}
