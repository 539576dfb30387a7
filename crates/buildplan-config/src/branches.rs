//! Branch filter parsing.

use buildplan_core::{BranchFilter, BranchPattern};
use serde_yaml::{Mapping, Sequence};

use crate::document::{field, text_sequence, Shape};
use crate::{ConfigError, ConfigResult};

/// Read the `branches` key. `only` takes priority over `except`; when `only`
/// is present an `except` beside it is ignored.
pub fn parse_branches(config: &Mapping) -> ConfigResult<BranchFilter> {
    let branches = match field(config, "branches") {
        Shape::Absent | Shape::Null => return Ok(BranchFilter::All),
        Shape::Mapping(branches) => branches,
        other => {
            return Err(ConfigError::invalid(
                "branches",
                format!("expected a mapping, found {}", other.describe()),
            ));
        }
    };

    if branches.contains_key("only") {
        let patterns = pattern_list("branches.only", field(branches, "only"))?;
        return Ok(BranchFilter::Only(patterns));
    }

    if branches.contains_key("except") {
        let patterns = pattern_list("branches.except", field(branches, "except"))?;
        return Ok(BranchFilter::Except(patterns));
    }

    Err(ConfigError::invalid(
        "branches",
        "contains neither 'only' nor 'except'",
    ))
}

fn pattern_list(field: &str, shape: Shape<'_>) -> ConfigResult<Vec<BranchPattern>> {
    let Shape::Sequence(items) = shape else {
        return Err(ConfigError::invalid(
            field,
            format!("should be a list, found {}", shape.describe()),
        ));
    };
    compile(field, items)
}

fn compile(field: &str, items: &Sequence) -> ConfigResult<Vec<BranchPattern>> {
    text_sequence(field, items)?
        .into_iter()
        .map(|raw| {
            BranchPattern::new(raw).map_err(|e| ConfigError::invalid(field, e.to_string()))
        })
        .collect()
}
