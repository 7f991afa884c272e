//! Labeling orchestrator.
//!
//! A run walks `Init → PreconditionsChecked → ConfigResolved → EventResolved
//! → LabelsComputed → {LabelsApplied | NoOp} → Done`. Everything up to
//! `LabelsComputed` is fail-fast. After that, a failed add-labels call is
//! logged and counted as zero labels applied, while a failed comment post
//! fails the run.

use crate::branch;
use crate::client::Client;
use crate::error::{LabelerError, PatternError, Result};
use crate::fields::FieldFlags;
use crate::models::event::{self, EventContext, EventKind, ExistingLabels, ResolvedEvent};
use crate::models::Config;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use std::time::Duration;
use tracing::{debug, info, warn};

pub const DEFAULT_CONFIG_PATH: &str = ".github/labeler.yml";
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(10);
/// First line of every posted comment.
pub const COMMENT_MARKER: &str = "<!-- labeler -->";

/// Inputs for one run. Everything a test needs to vary lives here.
#[derive(Debug, Clone)]
pub struct Options {
    pub owner: String,
    pub repo: String,
    /// `issues`, `pull_request` or `pull_request_target`.
    pub event: String,
    /// Issue or pull request number; may come from `data` instead.
    pub number: Option<u64>,
    /// Inline JSON event payload. When set, no remote lookup happens.
    pub data: Option<String>,
    pub config_path: String,
    /// Caller field selection; empty defers to the config, then to both.
    pub fields: FieldFlags,
    pub call_timeout: Duration,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            owner: String::new(),
            repo: String::new(),
            event: String::new(),
            number: None,
            data: None,
            config_path: DEFAULT_CONFIG_PATH.to_string(),
            fields: FieldFlags::NONE,
            call_timeout: DEFAULT_CALL_TIMEOUT,
        }
    }
}

impl Options {
    fn validate(&self) -> Result<()> {
        if self.owner.is_empty() && self.repo.is_empty() {
            return Err(LabelerError::Options(
                "both a github owner and repo are required".into(),
            ));
        }
        if self.repo.contains('/') {
            return Err(LabelerError::Options(
                "a repo must be just the repo name; pass org/repo as separate owner and repo"
                    .into(),
            ));
        }
        if self.owner.is_empty() {
            return Err(LabelerError::Options(
                "a github owner (user or org) is required".into(),
            ));
        }
        if self.repo.is_empty() {
            return Err(LabelerError::Options("a github repo is required".into()));
        }
        if self.number.is_none() && self.data.is_none() {
            return Err(LabelerError::Options(
                "the number of the issue or pull request is required".into(),
            ));
        }
        if self.config_path.is_empty() {
            return Err(LabelerError::Options(
                "the labeler configuration path can not be empty".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    Init,
    PreconditionsChecked,
    ConfigResolved,
    EventResolved,
    LabelsComputed,
    LabelsApplied,
    NoOp,
    Done,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Labels to add and the comment to post if any of them land.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Decision {
    pub to_add: BTreeSet<String>,
    pub comment: Option<String>,
}

/// Observable result of a completed run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub event: EventKind,
    pub number: Option<u64>,
    pub config_variant: &'static str,
    pub fields: Vec<&'static str>,
    pub to_add: BTreeSet<String>,
    pub applied: Vec<String>,
    /// Comment text that was posted, without the marker line.
    pub comment: Option<String>,
    /// `LabelsApplied` or `NoOp`.
    pub outcome: RunState,
}

/// Decide which labels to add for `event`.
///
/// `fields` is the caller's selection; when empty, the config's declared
/// fields apply, then both title and body. Issues never carry a branch, so
/// branch-scoped labels do not apply to them.
pub fn decide(
    config: &Config,
    fields: FieldFlags,
    kind: EventKind,
    event: &EventContext,
    existing: &ExistingLabels,
) -> Result<Decision, PatternError> {
    let fields = FieldFlags::resolve(fields, config.fields());
    let texts = fields.fragments(event);
    let matched = config.labels_for(&texts)?;
    let target_branch = if kind.is_pull_request() {
        event.target_branch.as_str()
    } else {
        ""
    };
    let applicable = branch::filter(matched, target_branch)?;
    let to_add: BTreeSet<String> = applicable
        .into_keys()
        .filter(|name| !existing.contains(name))
        .collect();
    let comment = if to_add.is_empty() {
        None
    } else {
        config.comment_for(kind).map(str::to_string)
    };
    Ok(Decision { to_add, comment })
}

/// Comment body as posted, marker line first.
pub fn comment_body(comment: &str) -> String {
    format!("{COMMENT_MARKER}\n{comment}")
}

pub struct Labeler<C: Client> {
    options: Options,
    client: C,
    state: RunState,
}

impl<C: Client> Labeler<C> {
    pub fn new(options: Options, client: C) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            options,
            client,
            state: RunState::Init,
        })
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    fn advance(&mut self, next: RunState) {
        debug!(from = %self.state, to = %next, "state transition");
        self.state = next;
    }

    /// Run the whole labeling flow once.
    pub fn execute(&mut self) -> Result<RunReport> {
        let kind = self.check_preconditions()?;
        self.advance(RunState::PreconditionsChecked);
        debug!(
            owner = %self.options.owner,
            repo = %self.options.repo,
            event = %kind,
            "executing"
        );

        let config = self.retrieve_config()?;
        self.advance(RunState::ConfigResolved);

        let event = self.resolve_event(kind)?;
        self.advance(RunState::EventResolved);

        let decision = decide(
            &config,
            self.options.fields,
            kind,
            &event.context,
            &event.existing_labels,
        )?;
        self.advance(RunState::LabelsComputed);

        let number = self.options.number.or(event.number);
        let mut report = RunReport {
            event: kind,
            number,
            config_variant: config.variant(),
            fields: FieldFlags::resolve(self.options.fields, config.fields()).names(),
            to_add: decision.to_add.clone(),
            applied: Vec::new(),
            comment: None,
            outcome: RunState::NoOp,
        };

        if decision.to_add.is_empty() {
            debug!("found 0 labels to apply");
            self.advance(RunState::NoOp);
            self.advance(RunState::Done);
            return Ok(report);
        }

        let number = number.ok_or_else(|| {
            LabelerError::Options(format!(
                "the event data does not carry a {} number",
                kind.noun()
            ))
        })?;
        report.applied = self.apply_labels(number, &decision.to_add);
        if report.applied.is_empty() {
            self.advance(RunState::NoOp);
        } else {
            report.outcome = RunState::LabelsApplied;
            self.advance(RunState::LabelsApplied);
            if let Some(comment) = decision.comment {
                self.add_comment(number, &comment)?;
                report.comment = Some(comment);
            }
        }
        self.advance(RunState::Done);
        Ok(report)
    }

    fn check_preconditions(&self) -> Result<EventKind> {
        if self.options.owner.len() <= 1 {
            return Err(LabelerError::Precondition("owner is invalid".into()));
        }
        if self.options.repo.len() <= 1 {
            return Err(LabelerError::Precondition("repo is invalid".into()));
        }
        self.options
            .event
            .parse::<EventKind>()
            .map_err(LabelerError::Precondition)
    }

    fn retrieve_config(&self) -> Result<Config> {
        let path = &self.options.config_path;
        let bytes = self
            .client
            .fetch(
                &self.options.owner,
                &self.options.repo,
                path,
                self.options.call_timeout,
            )
            .map_err(|source| LabelerError::ConfigFetch {
                path: path.clone(),
                source,
            })?;
        let config = Config::parse(&bytes, path)?;
        debug!(path = %path, variant = config.variant(), labels = ?config.label_names(), "parsed config");
        Ok(config)
    }

    /// Inline data wins; the remote source is only asked when there is none.
    fn resolve_event(&self, kind: EventKind) -> Result<ResolvedEvent> {
        if let Some(data) = self.options.data.as_deref() {
            return event::parse_payload(kind, data).map_err(LabelerError::PayloadParse);
        }
        let number = self.options.number.ok_or_else(|| {
            LabelerError::Options("the number of the issue or pull request is required".into())
        })?;
        let (owner, repo, timeout) = (
            &self.options.owner,
            &self.options.repo,
            self.options.call_timeout,
        );
        let fetched = if kind.is_pull_request() {
            self.client.get_pull_request(owner, repo, number, timeout)
        } else {
            self.client.get_issue(owner, repo, number, timeout)
        };
        fetched.map_err(|source| LabelerError::EventFetch {
            kind: kind.noun().to_string(),
            number,
            source,
        })
    }

    /// Returns the labels reported as applied; empty when the call failed.
    fn apply_labels(&self, number: u64, to_add: &BTreeSet<String>) -> Vec<String> {
        let labels: Vec<String> = to_add.iter().cloned().collect();
        match self.client.add_labels(
            &self.options.owner,
            &self.options.repo,
            number,
            &labels,
            self.options.call_timeout,
        ) {
            Ok(applied) => {
                debug!(count = applied.len(), "applied new labels");
                applied
            }
            Err(e) => {
                let err = LabelerError::LabelApply(e);
                warn!(error = %err, "continuing with zero labels applied");
                Vec::new()
            }
        }
    }

    fn add_comment(&self, number: u64, comment: &str) -> Result<()> {
        self.client
            .create_comment(
                &self.options.owner,
                &self.options.repo,
                number,
                &comment_body(comment),
                self.options.call_timeout,
            )
            .map_err(LabelerError::Comment)?;
        info!(number, "posted comment");
        Ok(())
    }
}
