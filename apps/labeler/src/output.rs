//! Output rendering for the `run` and `validate` commands.
//!
//! Supports `human` (default) and `json` outputs.

use crate::labeler::{RunReport, RunState};
use crate::models::event::EventKind;
use crate::models::Config;
use owo_colors::OwoColorize;
use serde_json::json;
use serde_json::Value as JsonVal;

fn use_colors(output: &str) -> bool {
    output != "json" && std::env::var_os("NO_COLOR").is_none()
}

pub fn error_prefix() -> String {
    if use_colors("human") {
        "error:".red().bold().to_string()
    } else {
        "error:".to_string()
    }
}

/// Print a run report in the requested format.
pub fn print_run(report: &RunReport, output: &str) {
    match output {
        "json" => println!("{:#}", compose_run_json(report)),
        _ => {
            let color = use_colors(output);
            let target = match report.number {
                Some(n) => format!("{} #{}", report.event.noun(), n),
                None => report.event.noun().to_string(),
            };
            if report.to_add.is_empty() {
                let line = format!("no new labels for {target}");
                if color {
                    println!("{}", line.bright_black());
                } else {
                    println!("{line}");
                }
            }
            for label in &report.to_add {
                let applied = report.applied.contains(label);
                let status = if applied { "+ added:" } else { "✖ not applied:" };
                if color {
                    let status = if applied {
                        status.green().bold().to_string()
                    } else {
                        status.red().bold().to_string()
                    };
                    println!("{} {} ({})", status, label.bold(), target);
                } else {
                    println!("{} {} ({})", status, label, target);
                }
            }
            if let Some(comment) = &report.comment {
                if color {
                    println!("{}\n{}", "comment:".cyan().bold(), comment);
                } else {
                    println!("comment:\n{comment}");
                }
            }
            let summary = format!(
                "— Summary — config={} fields={} new={} applied={} outcome={}",
                report.config_variant,
                report.fields.join(","),
                report.to_add.len(),
                report.applied.len(),
                report.outcome
            );
            if color {
                println!("{}", summary.bold());
            } else {
                println!("{summary}");
            }
        }
    }
}

/// Print a description of a parsed label config.
pub fn print_validate(config: &Config, path: &str, output: &str) {
    match output {
        "json" => println!("{:#}", compose_validate_json(config, path)),
        _ => {
            let color = use_colors(output);
            let head = format!("{} ({} schema)", path, config.variant());
            if color {
                println!("{} {}", "✔ valid:".green().bold(), head.bold());
            } else {
                println!("✔ valid: {head}");
            }
            for name in config.label_names() {
                println!("  - {name}");
            }
            for kind in [EventKind::Issues, EventKind::PullRequest] {
                let enabled = if config.enabled_for(kind) { "on" } else { "off" };
                let comment = if config.comment_for(kind).is_some() {
                    "comment"
                } else {
                    "no comment"
                };
                println!("  {}: {}, {}", kind.noun(), enabled, comment);
            }
        }
    }
}

/// Compose run JSON object (pure) for testing/snapshot purposes.
pub fn compose_run_json(report: &RunReport) -> JsonVal {
    json!({
        "event": report.event,
        "number": report.number,
        "config": report.config_variant,
        "fields": report.fields,
        "to_add": report.to_add,
        "applied": report.applied,
        "comment": report.comment,
        "outcome": report.outcome,
        "summary": {
            "new": report.to_add.len(),
            "applied": report.applied.len(),
            "commented": report.comment.is_some(),
            "noop": report.outcome == RunState::NoOp,
        }
    })
}

/// Compose validate JSON object (pure) for testing/snapshot purposes.
pub fn compose_validate_json(config: &Config, path: &str) -> JsonVal {
    let per_event = |kind: EventKind| {
        json!({
            "enabled": config.enabled_for(kind),
            "comment": config.comment_for(kind),
        })
    };
    json!({
        "path": path,
        "schema": config.variant(),
        "labels": config.label_names(),
        "fields": config.fields().names(),
        "issues": per_event(EventKind::Issues),
        "pull_requests": per_event(EventKind::PullRequest),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_compose_run_json_shape() {
        let report = RunReport {
            event: EventKind::PullRequestTarget,
            number: Some(4),
            config_variant: "full",
            fields: vec!["title"],
            to_add: BTreeSet::from(["deploy".to_string()]),
            applied: vec!["deploy".to_string()],
            comment: None,
            outcome: RunState::LabelsApplied,
        };
        let out = compose_run_json(&report);
        assert_eq!(out["event"], "pull_request_target");
        assert_eq!(out["to_add"][0], "deploy");
        assert_eq!(out["outcome"], "labels_applied");
        assert_eq!(out["summary"]["applied"], 1);
        assert_eq!(out["summary"]["noop"], false);
        assert!(out["comment"].is_null());
    }

    #[test]
    fn test_compose_validate_json_shape() {
        let yaml = "enable: {prs: false}\ncomments: {issues: hi}\nfields: [title]\nlabels:\n  bug:\n    include: [bug]\n";
        let config = Config::parse(yaml.as_bytes(), ".github/labeler.yml").unwrap();
        let out = compose_validate_json(&config, ".github/labeler.yml");
        assert_eq!(out["schema"], "full");
        assert_eq!(out["labels"][0], "bug");
        assert_eq!(out["fields"][0], "title");
        assert_eq!(out["issues"]["comment"], "hi");
        assert_eq!(out["pull_requests"]["enabled"], false);
        assert!(out["pull_requests"]["comment"].is_null());
    }
}
