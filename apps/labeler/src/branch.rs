//! Target-branch filtering of matched labels.

use crate::error::PatternError;
use crate::matcher;
use crate::models::LabelSet;

/// Keep the labels that apply to `target_branch`.
///
/// Branch-agnostic rules always pass. Branch-scoped rules need a non-empty
/// target branch matched by at least one of their patterns; issues have no
/// branch, so branch-scoped rules never apply to them.
pub fn filter(labels: LabelSet, target_branch: &str) -> Result<LabelSet, PatternError> {
    let mut kept = LabelSet::new();
    for (name, rule) in labels {
        if applies_to(&rule.branches, target_branch)? {
            kept.insert(name, rule);
        }
    }
    Ok(kept)
}

fn applies_to(branches: &[String], target_branch: &str) -> Result<bool, PatternError> {
    if branches.is_empty() {
        return Ok(true);
    }
    if target_branch.is_empty() {
        return Ok(false);
    }
    for pattern in branches {
        if matcher::is_match(pattern, target_branch)? {
            return Ok(true);
        }
    }
    Ok(false)
}
