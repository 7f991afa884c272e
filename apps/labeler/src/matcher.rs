//! Regular-expression evaluation over the searchable blob.
//!
//! Patterns are compiled on use, unanchored and case-sensitive. A pattern
//! that fails to compile is reported as a `PatternError` at the point it is
//! evaluated.

use crate::error::PatternError;
use regex::Regex;

/// Compile a single pattern, mapping failures to `PatternError`.
pub fn compile(pattern: &str) -> Result<Regex, PatternError> {
    Regex::new(pattern).map_err(|e| PatternError {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })
}

/// True when `pattern` matches anywhere in `text`.
pub fn is_match(pattern: &str, text: &str) -> Result<bool, PatternError> {
    Ok(compile(pattern)?.is_match(text))
}

/// Space-joined text fragments that label patterns are evaluated against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Searchable {
    blob: String,
}

impl Searchable {
    pub fn join<S: AsRef<str>>(texts: &[S]) -> Self {
        let blob = texts
            .iter()
            .map(|t| t.as_ref())
            .collect::<Vec<_>>()
            .join(" ");
        Self { blob }
    }

    pub fn as_str(&self) -> &str {
        &self.blob
    }

    /// True when at least one of `patterns` matches. Stops at the first hit,
    /// so patterns after a match are not compiled.
    pub fn matches_any(&self, patterns: &[String]) -> Result<bool, PatternError> {
        for p in patterns {
            if is_match(p, &self.blob)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Every pattern in `patterns` that matches, in declaration order.
    pub fn matching(&self, patterns: &[String]) -> Result<Vec<String>, PatternError> {
        let mut hits = Vec::new();
        for p in patterns {
            if is_match(p, &self.blob)? {
                hits.push(p.clone());
            }
        }
        Ok(hits)
    }
}
