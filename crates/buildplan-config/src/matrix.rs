//! Build matrix expansion.
//!
//! The baseline matrix is every runtime version crossed with every
//! environment set, versions outer. `matrix.exclude` then removes entries
//! and `matrix.include` appends them, in that order.

use std::collections::BTreeMap;

use buildplan_core::{EnvironmentSet, MatrixEntry};
use serde_yaml::Mapping;
use tracing::debug;

use crate::document::{field, text_sequence, Shape};
use crate::env::parse_env_string;
use crate::language::LanguageProfile;
use crate::{ConfigError, ConfigResult};

/// One `matrix.include` or `matrix.exclude` item after normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Adjustment {
    runtime_version: Option<String>,
    env: EnvironmentSet,
    /// Any other keys, such as `os` or `jdk`.
    extra: BTreeMap<String, String>,
}

/// Expand runtime versions and environments into the final build matrix.
pub fn expand_matrix(
    config: &Mapping,
    profile: LanguageProfile<'_>,
    environments: &[EnvironmentSet],
) -> ConfigResult<Vec<MatrixEntry>> {
    let versions = parse_versions(config, profile)?;

    let mut matrix: Vec<MatrixEntry> = versions
        .iter()
        .flat_map(|version| {
            environments
                .iter()
                .map(move |env| MatrixEntry::new(version.clone(), env.clone()))
        })
        .collect();

    let (exclude, include) = match field(config, "matrix") {
        Shape::Absent => (Shape::Absent, Shape::Absent),
        Shape::Mapping(adjustments) => (field(adjustments, "exclude"), field(adjustments, "include")),
        other => {
            return Err(ConfigError::invalid(
                "matrix",
                format!("expected a mapping, found {}", other.describe()),
            ));
        }
    };

    for rule in parse_adjustments("matrix.exclude", exclude, profile)? {
        // An exclusion without a version can never equal a matrix entry.
        let Some(runtime_version) = rule.runtime_version else {
            debug!(env = %rule.env, "Exclude entry has no runtime version; nothing removed");
            continue;
        };
        // Baseline entries have no extra keys.
        if !rule.extra.is_empty() {
            debug!(extra = ?rule.extra, "Exclude entry has extra keys; nothing removed");
            continue;
        }
        let target = MatrixEntry::new(runtime_version, rule.env);
        match matrix.iter().position(|entry| *entry == target) {
            Some(index) => {
                matrix.remove(index);
            }
            None => debug!(entry = %target, "Exclude entry matched no matrix job"),
        }
    }

    for rule in parse_adjustments("matrix.include", include, profile)? {
        let runtime_version = rule
            .runtime_version
            .unwrap_or_else(|| profile.default_version.to_string());
        let mut entry = MatrixEntry::new(runtime_version, rule.env);
        entry.extra = rule.extra;
        matrix.push(entry);
    }

    Ok(matrix)
}

/// Runtime versions under the language's version key.
fn parse_versions(config: &Mapping, profile: LanguageProfile<'_>) -> ConfigResult<Vec<String>> {
    let key = profile.version_key;
    match field(config, key) {
        Shape::Absent => Ok(vec![profile.default_version.to_string()]),
        Shape::Sequence(items) => text_sequence(key, items),
        shape => shape.scalar_text().map(|version| vec![version]).ok_or_else(|| {
            ConfigError::invalid(
                key,
                format!("expected a version or a list of versions, found {}", shape.describe()),
            )
        }),
    }
}

fn parse_adjustments(
    field_name: &str,
    shape: Shape<'_>,
    profile: LanguageProfile<'_>,
) -> ConfigResult<Vec<Adjustment>> {
    let items = match shape {
        Shape::Absent => return Ok(Vec::new()),
        Shape::Sequence(items) => items,
        other => {
            return Err(ConfigError::invalid(
                field_name,
                format!("expected a list of mappings, found {}", other.describe()),
            ));
        }
    };

    items
        .iter()
        .map(|item| parse_adjustment(field_name, Shape::of(Some(item)), profile))
        .collect()
}

fn parse_adjustment(
    field_name: &str,
    shape: Shape<'_>,
    profile: LanguageProfile<'_>,
) -> ConfigResult<Adjustment> {
    let Shape::Mapping(entry) = shape else {
        return Err(ConfigError::invalid(
            field_name,
            format!("each entry should be a mapping, found {}", shape.describe()),
        ));
    };

    let mut adjustment = Adjustment {
        runtime_version: None,
        env: EnvironmentSet::new(),
        extra: BTreeMap::new(),
    };

    for (key, value) in entry {
        let value = Shape::of(Some(value));
        match key.as_str() {
            Some("env") => {
                adjustment.env = match value {
                    Shape::String(text) => parse_env_string(field_name, text)?,
                    other => {
                        return Err(ConfigError::invalid(
                            field_name,
                            format!("'env' should be a string, found {}", other.describe()),
                        ));
                    }
                };
            }
            Some(key) if key == profile.version_key => {
                let version = value.scalar_text().ok_or_else(|| {
                    ConfigError::invalid(
                        field_name,
                        format!("'{}' should be a version, found {}", key, value.describe()),
                    )
                })?;
                adjustment.runtime_version = Some(version);
            }
            Some(key) => {
                let setting = value.scalar_text().ok_or_else(|| {
                    ConfigError::invalid(
                        field_name,
                        format!("'{}' should be a scalar, found {}", key, value.describe()),
                    )
                })?;
                adjustment.extra.insert(key.to_string(), setting);
            }
            None => {
                return Err(ConfigError::invalid(field_name, "keys must be strings"));
            }
        }
    }

    Ok(adjustment)
}
