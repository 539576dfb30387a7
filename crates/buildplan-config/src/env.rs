//! Environment variable parsing.

use buildplan_core::EnvironmentSet;
use serde_yaml::Mapping;

use crate::document::{field, Shape};
use crate::{ConfigError, ConfigResult};

/// Parse a `KEY=value KEY2=value2` string into one environment set.
///
/// Tokens are separated by whitespace and split at the first `=`, so values
/// may themselves contain `=`. Only a token with no `=` at all is
/// malformed; `=1` binds the empty name. A blank string yields an empty set.
pub fn parse_env_string(field: &str, text: &str) -> ConfigResult<EnvironmentSet> {
    let mut env = EnvironmentSet::new();
    for token in text.split_whitespace() {
        let (name, value) = token.split_once('=').ok_or_else(|| {
            ConfigError::invalid(field, format!("'{}' is not of the form NAME=value", token))
        })?;
        env.insert(name, value);
    }
    Ok(env)
}

/// Read the `env` key into the list of environment sets.
pub fn parse_environments(config: &Mapping) -> ConfigResult<Vec<EnvironmentSet>> {
    match field(config, "env") {
        Shape::Absent | Shape::Null => Ok(vec![EnvironmentSet::new()]),
        Shape::String(text) => Ok(vec![parse_env_string("env", text)?]),
        Shape::Sequence(items) => items
            .iter()
            .enumerate()
            .map(|(index, item)| match Shape::of(Some(item)) {
                Shape::String(text) => parse_env_string("env", text),
                other => Err(ConfigError::invalid(
                    "env",
                    format!("item {} should be a string, found {}", index, other.describe()),
                )),
            })
            .collect(),
        other => Err(ConfigError::invalid(
            "env",
            format!("expected a string or a list of strings, found {}", other.describe()),
        )),
    }
}
