//! Document loading and the shape of generic YAML values.
//!
//! Field parsers never inspect `serde_yaml::Value` directly. They resolve a
//! value into a [`Shape`] first and match on it, so every accepted form of a
//! field is spelled out in one `match`.

use serde_yaml::{Mapping, Number, Sequence, Value};

use crate::{ConfigError, ConfigResult};

/// Decode configuration text into a generic YAML tree.
///
/// Only syntax is checked here. An empty document decodes to `Value::Null`.
pub fn load_document(text: &str) -> ConfigResult<Value> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_yaml::from_str(text)?)
}

/// The shape of a configuration value.
///
/// `Absent` means the key is not there at all; `Null` means it is present
/// with an empty value (`script:` or `script: ~`). Only absent fields take
/// their default, so most parsers reject `Null`.
#[derive(Debug, Clone, Copy)]
pub enum Shape<'a> {
    Absent,
    Null,
    Bool(bool),
    Number(&'a Number),
    String(&'a str),
    Sequence(&'a Sequence),
    Mapping(&'a Mapping),
}

impl<'a> Shape<'a> {
    pub fn of(value: Option<&'a Value>) -> Self {
        match value {
            None => Shape::Absent,
            Some(Value::Null) => Shape::Null,
            Some(Value::Bool(b)) => Shape::Bool(*b),
            Some(Value::Number(n)) => Shape::Number(n),
            Some(Value::String(s)) => Shape::String(s),
            Some(Value::Sequence(seq)) => Shape::Sequence(seq),
            Some(Value::Mapping(map)) => Shape::Mapping(map),
            // Custom tags like `!secure` carry no meaning for the build plan.
            Some(Value::Tagged(tagged)) => Shape::of(Some(&tagged.value)),
        }
    }

    /// Human-readable name of the shape, for error messages.
    pub fn describe(&self) -> &'static str {
        match self {
            Shape::Absent => "nothing",
            Shape::Null => "null",
            Shape::Bool(_) => "a boolean",
            Shape::Number(_) => "a number",
            Shape::String(_) => "a string",
            Shape::Sequence(_) => "a list",
            Shape::Mapping(_) => "a mapping",
        }
    }

    /// Text of a scalar value. Numbers and booleans render the way YAML
    /// wrote them (`2.7`, `true`); non-scalars have no text.
    pub fn scalar_text(&self) -> Option<String> {
        match self {
            Shape::String(s) => Some((*s).to_string()),
            Shape::Number(n) => Some(n.to_string()),
            Shape::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// YAML truthiness: null, `false`, zero, and empty strings, lists and
    /// mappings are all falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Shape::Absent | Shape::Null => false,
            Shape::Bool(b) => *b,
            Shape::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
            Shape::String(s) => !s.is_empty(),
            Shape::Sequence(seq) => !seq.is_empty(),
            Shape::Mapping(map) => !map.is_empty(),
        }
    }
}

/// Look up a key in a mapping and resolve its shape.
pub fn field<'a>(map: &'a Mapping, key: &str) -> Shape<'a> {
    Shape::of(map.get(key))
}

/// Render every item of a list as text; any non-scalar item is an error.
pub(crate) fn text_sequence(field: &str, seq: &Sequence) -> ConfigResult<Vec<String>> {
    seq.iter()
        .enumerate()
        .map(|(index, item)| {
            let shape = Shape::of(Some(item));
            shape.scalar_text().ok_or_else(|| {
                ConfigError::invalid(
                    field,
                    format!("item {} should be a string, found {}", index, shape.describe()),
                )
            })
        })
        .collect()
}

/// A list of strings that may also be written as one bare string.
pub(crate) fn string_list(field: &str, shape: Shape<'_>) -> ConfigResult<Vec<String>> {
    match shape {
        Shape::Absent => Ok(Vec::new()),
        Shape::String(s) => Ok(vec![s.to_string()]),
        Shape::Sequence(seq) => text_sequence(field, seq),
        other => Err(ConfigError::invalid(
            field,
            format!("expected a string or a list of strings, found {}", other.describe()),
        )),
    }
}

pub(crate) fn optional_bool(field: &str, shape: Shape<'_>) -> ConfigResult<Option<bool>> {
    match shape {
        Shape::Absent => Ok(None),
        Shape::Bool(b) => Ok(Some(b)),
        other => Err(ConfigError::invalid(
            field,
            format!("expected a boolean, found {}", other.describe()),
        )),
    }
}

/// Decode a YAML mapping for tests; anything else becomes an empty mapping.
#[cfg(test)]
pub(crate) fn mapping(yaml: &str) -> Mapping {
    match serde_yaml::from_str(yaml) {
        Ok(Value::Mapping(map)) => map,
        _ => Mapping::new(),
    }
}
