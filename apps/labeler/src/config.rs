//! Tool settings discovery and effective settings resolution.
//!
//! `labeler` reads `labeler.toml|yaml|yml` from the repository root (or the
//! closest ancestor) and merges it with CLI flags into an `Effective`
//! value. These are settings for the tool itself; the label rules live in
//! the label config file that `config_path` points at.
//!
//! Defaults:
//! - `config_path`: `.github/labeler.yml`
//! - `fields`: none (the label config decides, then title and body)
//! - `output`: `human`
//! - `timeout_secs`: 10
//!
//! Overrides precedence: CLI > settings file > defaults.

use crate::fields::FieldFlags;
use crate::labeler::{DEFAULT_CALL_TIMEOUT, DEFAULT_CONFIG_PATH};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Default, Deserialize, Clone, PartialEq, Eq)]
/// Root settings loaded from `labeler.toml|yaml`.
pub struct Settings {
    pub config_path: Option<String>,
    pub fields: Option<Vec<String>>,
    pub output: Option<String>,
    pub timeout_secs: Option<u64>,
    pub owner: Option<String>,
    pub repo: Option<String>,
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("could not read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid TOML in {path}: {source}")]
    Toml {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid YAML in {path}: {source}")]
    Yaml {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
}

/// CLI-provided values; `None` defers to the settings file.
#[derive(Debug, Default, Clone)]
pub struct Overrides<'a> {
    pub repo_root: Option<&'a str>,
    pub config_path: Option<&'a str>,
    pub fields: Option<&'a [String]>,
    pub output: Option<&'a str>,
    pub timeout_secs: Option<u64>,
    pub owner: Option<&'a str>,
    pub repo: Option<&'a str>,
}

#[derive(Debug, Clone)]
/// Fully-resolved settings used by commands after applying precedence.
pub struct Effective {
    pub repo_root: PathBuf,
    pub settings_file: Option<PathBuf>,
    pub config_path: String,
    pub fields: FieldFlags,
    pub output: String,
    pub timeout: Duration,
    pub owner: String,
    pub repo: String,
}

const SETTINGS_FILES: [&str; 3] = ["labeler.toml", "labeler.yaml", "labeler.yml"];

/// Walk upward from `start` to detect the repository root.
///
/// Stops when a settings file or a `.git` directory is found.
pub fn detect_repo_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if SETTINGS_FILES.iter().any(|f| cur.join(f).exists()) || cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// Load `Settings` from the first settings file present under `root`.
///
/// Returns `Ok(None)` when there is no settings file.
pub fn load_settings(root: &Path) -> Result<Option<(PathBuf, Settings)>, SettingsError> {
    for name in SETTINGS_FILES {
        let path = root.join(name);
        if !path.exists() {
            continue;
        }
        let shown = path.to_string_lossy().to_string();
        let text = fs::read_to_string(&path).map_err(|source| SettingsError::Io {
            path: shown.clone(),
            source,
        })?;
        let settings = if name.ends_with(".toml") {
            toml::from_str(&text).map_err(|source| SettingsError::Toml {
                path: shown,
                source,
            })?
        } else {
            serde_yaml::from_str(&text).map_err(|source| SettingsError::Yaml {
                path: shown,
                source,
            })?
        };
        return Ok(Some((path, settings)));
    }
    Ok(None)
}

/// Resolve `Effective` by merging CLI flags, discovered settings, and defaults.
pub fn resolve_effective(cli: &Overrides<'_>) -> Result<Effective, SettingsError> {
    let start = PathBuf::from(cli.repo_root.unwrap_or("."));
    let repo_root = detect_repo_root(&start);
    let (settings_file, cfg) = match load_settings(&repo_root)? {
        Some((path, cfg)) => (Some(path), cfg),
        None => (None, Settings::default()),
    };

    let config_path = cli
        .config_path
        .map(str::to_string)
        .or(cfg.config_path)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

    let fields = match cli.fields {
        Some(names) if !names.is_empty() => FieldFlags::parse(names),
        _ => cfg
            .fields
            .as_deref()
            .map(FieldFlags::parse)
            .unwrap_or(FieldFlags::NONE),
    };

    let output = cli
        .output
        .map(str::to_string)
        .or(cfg.output)
        .unwrap_or_else(|| "human".to_string());

    let timeout = cli
        .timeout_secs
        .or(cfg.timeout_secs)
        .map(Duration::from_secs)
        .unwrap_or(DEFAULT_CALL_TIMEOUT);

    let owner = cli
        .owner
        .map(str::to_string)
        .or(cfg.owner)
        .unwrap_or_default();
    let repo = cli.repo.map(str::to_string).or(cfg.repo).unwrap_or_default();

    Ok(Effective {
        repo_root,
        settings_file,
        config_path,
        fields,
        output,
        timeout,
        owner,
        repo,
    })
}
