//! Branch admission rules.

use regex::Regex;
use serde::{Serialize, Serializer};

use crate::{Error, Result};

/// A branch-matching pattern: either a literal branch name or a
/// `/regex/`-delimited expression.
///
/// Regex patterns are compiled once on construction and match with
/// unanchored search, so `/^release-/` admits `release-1.0` and `/fix/`
/// admits `hotfix-12`.
#[derive(Debug, Clone)]
pub struct BranchPattern {
    raw: String,
    regex: Option<Regex>,
}

impl BranchPattern {
    pub fn new(raw: impl Into<String>) -> Result<Self> {
        let raw = raw.into();
        let expr = match raw.strip_prefix('/') {
            // A lone "/" opens and closes at once: the empty regex.
            Some("") => Some(""),
            Some(rest) => rest.strip_suffix('/'),
            None => None,
        };
        let regex = match expr {
            Some(expr) => Some(Regex::new(expr).map_err(|source| Error::InvalidPattern {
                pattern: raw.clone(),
                source,
            })?),
            None => None,
        };
        Ok(Self { raw, regex })
    }

    /// The pattern exactly as written in the configuration.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn is_regex(&self) -> bool {
        self.regex.is_some()
    }

    pub fn matches(&self, branch: &str) -> bool {
        match &self.regex {
            Some(regex) => regex.is_match(branch),
            None => self.raw == branch,
        }
    }
}

impl PartialEq for BranchPattern {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for BranchPattern {}

impl Serialize for BranchPattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

/// Which branches may trigger a build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", content = "patterns", rename_all = "snake_case")]
pub enum BranchFilter {
    /// No restriction.
    #[default]
    All,
    /// Whitelist: only matching branches build.
    Only(Vec<BranchPattern>),
    /// Blacklist: matching branches never build.
    Except(Vec<BranchPattern>),
}

impl BranchFilter {
    pub fn admits(&self, branch: &str) -> bool {
        match self {
            BranchFilter::All => true,
            BranchFilter::Only(patterns) => patterns.iter().any(|p| p.matches(branch)),
            BranchFilter::Except(patterns) => !patterns.iter().any(|p| p.matches(branch)),
        }
    }
}
