//! Build matrix entries.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::EnvironmentSet;

/// One concrete build job: a runtime version paired with an environment set.
///
/// Equality is structural over every field, which is what matrix exclusion
/// relies on to find the entry to remove.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct MatrixEntry {
    /// Runtime version (e.g., "2.7" for python, "1.9.3" for ruby).
    pub runtime_version: String,
    /// Environment variables for this job.
    pub env: EnvironmentSet,
    /// Other per-job settings an included entry carried (e.g., `os: osx`),
    /// kept as written. Always empty for entries of the baseline matrix.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

impl MatrixEntry {
    pub fn new(runtime_version: impl Into<String>, env: EnvironmentSet) -> Self {
        Self {
            runtime_version: runtime_version.into(),
            env,
            extra: BTreeMap::new(),
        }
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for MatrixEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.runtime_version)?;
        if !self.env.is_empty() {
            write!(f, " {}", self.env)?;
        }
        for (key, value) in &self.extra {
            write!(f, " ({}: {})", key, value)?;
        }
        Ok(())
    }
}
