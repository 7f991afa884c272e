//! Collaborators the orchestrator talks to.
//!
//! The core never performs I/O itself: config bytes come from a
//! `ContentFetcher`, issues and pull requests from an `IssueSource`, and
//! labels and comments go to a `LabelSink`. Every call receives the per-call
//! timeout; a collaborator that exceeds it reports `ClientError::Timeout`.
//!
//! `LocalClient` backs all three with a local checkout and echoes writes
//! back without sending them anywhere.

use crate::error::ClientError;
use crate::models::event::ResolvedEvent;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

pub trait ContentFetcher {
    /// Raw bytes of `path`, relative to the repository root.
    fn fetch(&self, owner: &str, repo: &str, path: &str, timeout: Duration)
        -> Result<Vec<u8>, ClientError>;
}

pub trait IssueSource {
    fn get_issue(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        timeout: Duration,
    ) -> Result<ResolvedEvent, ClientError>;

    fn get_pull_request(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        timeout: Duration,
    ) -> Result<ResolvedEvent, ClientError>;
}

pub trait LabelSink {
    /// Attach `labels`; returns the labels the remote reports as applied.
    fn add_labels(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        labels: &[String],
        timeout: Duration,
    ) -> Result<Vec<String>, ClientError>;

    fn create_comment(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        body: &str,
        timeout: Duration,
    ) -> Result<(), ClientError>;
}

/// Everything a labeling run needs.
pub trait Client: ContentFetcher + IssueSource + LabelSink {}

impl<T: ContentFetcher + IssueSource + LabelSink> Client for T {}

/// Filesystem-backed client for dry runs against a checkout.
#[derive(Debug, Clone)]
pub struct LocalClient {
    root: PathBuf,
}

impl LocalClient {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ContentFetcher for LocalClient {
    fn fetch(
        &self,
        _owner: &str,
        _repo: &str,
        path: &str,
        _timeout: Duration,
    ) -> Result<Vec<u8>, ClientError> {
        let full = self.root.join(path);
        fs::read(&full).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ClientError::NotFound(full.to_string_lossy().to_string()),
            _ => ClientError::Transport(format!("{}: {}", full.to_string_lossy(), e)),
        })
    }
}

impl IssueSource for LocalClient {
    fn get_issue(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        _timeout: Duration,
    ) -> Result<ResolvedEvent, ClientError> {
        Err(ClientError::NotFound(format!(
            "{owner}/{repo}#{number} (no remote source in local mode; pass event data)"
        )))
    }

    fn get_pull_request(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        timeout: Duration,
    ) -> Result<ResolvedEvent, ClientError> {
        self.get_issue(owner, repo, number, timeout)
    }
}

impl LabelSink for LocalClient {
    fn add_labels(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        labels: &[String],
        _timeout: Duration,
    ) -> Result<Vec<String>, ClientError> {
        info!(%owner, %repo, number, ?labels, "dry run: would add labels");
        Ok(labels.to_vec())
    }

    fn create_comment(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        body: &str,
        _timeout: Duration,
    ) -> Result<(), ClientError> {
        info!(%owner, %repo, number, body, "dry run: would create comment");
        Ok(())
    }
}
