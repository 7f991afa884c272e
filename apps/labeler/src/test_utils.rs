//! In-memory client that records every call, for orchestrator tests.

use crate::client::{ContentFetcher, IssueSource, LabelSink};
use crate::error::ClientError;
use crate::models::event::ResolvedEvent;
use std::cell::RefCell;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Fetch { path: String },
    GetIssue { number: u64 },
    GetPullRequest { number: u64 },
    AddLabels { number: u64, labels: Vec<String> },
    CreateComment { number: u64, body: String },
}

#[derive(Debug, Default)]
pub struct MockClient {
    /// Config bytes; `None` answers fetches with `NotFound`.
    pub config: Option<Vec<u8>>,
    pub issue: Option<ResolvedEvent>,
    pub pull_request: Option<ResolvedEvent>,
    pub fail_add_labels: bool,
    pub fail_comment: bool,
    pub calls: RefCell<Vec<Call>>,
    pub timeouts: RefCell<Vec<Duration>>,
}

impl MockClient {
    pub fn with_config(yaml: &str) -> Self {
        Self {
            config: Some(yaml.as_bytes().to_vec()),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn added_labels(&self) -> Vec<Vec<String>> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::AddLabels { labels, .. } => Some(labels),
                _ => None,
            })
            .collect()
    }

    pub fn comments(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::CreateComment { body, .. } => Some(body),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call, timeout: Duration) {
        self.calls.borrow_mut().push(call);
        self.timeouts.borrow_mut().push(timeout);
    }
}

impl ContentFetcher for MockClient {
    fn fetch(
        &self,
        _owner: &str,
        _repo: &str,
        path: &str,
        timeout: Duration,
    ) -> Result<Vec<u8>, ClientError> {
        self.record(
            Call::Fetch {
                path: path.to_string(),
            },
            timeout,
        );
        self.config
            .clone()
            .ok_or_else(|| ClientError::NotFound(path.to_string()))
    }
}

impl IssueSource for MockClient {
    fn get_issue(
        &self,
        _owner: &str,
        _repo: &str,
        number: u64,
        timeout: Duration,
    ) -> Result<ResolvedEvent, ClientError> {
        self.record(Call::GetIssue { number }, timeout);
        self.issue
            .clone()
            .ok_or_else(|| ClientError::NotFound(format!("issue #{number}")))
    }

    fn get_pull_request(
        &self,
        _owner: &str,
        _repo: &str,
        number: u64,
        timeout: Duration,
    ) -> Result<ResolvedEvent, ClientError> {
        self.record(Call::GetPullRequest { number }, timeout);
        self.pull_request
            .clone()
            .ok_or_else(|| ClientError::NotFound(format!("pull request #{number}")))
    }
}

impl LabelSink for MockClient {
    fn add_labels(
        &self,
        _owner: &str,
        _repo: &str,
        number: u64,
        labels: &[String],
        timeout: Duration,
    ) -> Result<Vec<String>, ClientError> {
        self.record(
            Call::AddLabels {
                number,
                labels: labels.to_vec(),
            },
            timeout,
        );
        if self.fail_add_labels {
            return Err(ClientError::Transport("500 from labels endpoint".into()));
        }
        Ok(labels.to_vec())
    }

    fn create_comment(
        &self,
        _owner: &str,
        _repo: &str,
        number: u64,
        body: &str,
        timeout: Duration,
    ) -> Result<(), ClientError> {
        self.record(
            Call::CreateComment {
                number,
                body: body.to_string(),
            },
            timeout,
        );
        if self.fail_comment {
            return Err(ClientError::Timeout(timeout));
        }
        Ok(())
    }
}
