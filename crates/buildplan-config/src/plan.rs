//! Build plan parsing.

use buildplan_core::BuildPlan;
use serde_yaml::{Mapping, Value};
use std::path::Path;
use tracing::debug;

use crate::branches::parse_branches;
use crate::document::{load_document, Shape};
use crate::env::parse_environments;
use crate::hooks::parse_hooks;
use crate::language::{parse_language, LanguageProfile};
use crate::matrix::expand_matrix;
use crate::notifications::parse_notifications;
use crate::{ConfigError, ConfigResult};

/// Parse a build plan from YAML configuration text.
pub fn parse_build_plan(text: &str) -> ConfigResult<BuildPlan> {
    let document = load_document(text)?;
    parse_build_plan_value(&document)
}

/// Parse a build plan from a configuration file.
pub fn parse_build_plan_file(path: impl AsRef<Path>) -> ConfigResult<BuildPlan> {
    let path = path.as_ref();
    debug!(path = %path.display(), "Reading build configuration");
    let text = std::fs::read_to_string(path)?;
    parse_build_plan(&text)
}

/// Parse a build plan from an already-decoded YAML document.
///
/// Fields are validated in a fixed order and the first problem aborts the
/// parse; there is no partially-populated plan.
pub fn parse_build_plan_value(document: &Value) -> ConfigResult<BuildPlan> {
    let empty = Mapping::new();
    let config = match Shape::of(Some(document)) {
        Shape::Absent | Shape::Null => &empty,
        Shape::Mapping(config) => config,
        other => {
            return Err(ConfigError::invalid(
                "(root)",
                format!("expected a mapping, found {}", other.describe()),
            ));
        }
    };

    let language = parse_language(config)?;
    let environments = parse_environments(config)?;
    let matrix = expand_matrix(
        config,
        LanguageProfile::for_language(&language),
        &environments,
    )?;
    let hooks = parse_hooks(config)?;
    let branches = parse_branches(config)?;
    let (email, irc) = parse_notifications(config)?;

    debug!(
        language = %language,
        environments = environments.len(),
        jobs = matrix.len(),
        "Parsed build plan"
    );

    Ok(BuildPlan::builder(language)
        .with_environments(environments)
        .with_matrix(matrix)
        .with_hooks(hooks)
        .with_branches(branches)
        .with_email(email)
        .with_irc(irc)
        .build()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use buildplan_core::{EnvironmentSet, HookStage, MatrixEntry, NotifyPolicy};
    use std::io::Write;

    const DJANGO: &str = r#"
language: python
python:
  - "2.6"
  - "2.7"
env:
  - DJANGO=1.3 DB=sqlite
  - DJANGO=1.4 DB=postgres
before_install: sudo apt-get update -qq
install:
  - pip install -r requirements.txt
  - pip install django==$DJANGO
script: python setup.py test
branches:
  only:
    - master
    - /^release-/
matrix:
  exclude:
    - python: "2.6"
      env: DJANGO=1.4 DB=postgres
  include:
    - python: "3.3"
      env: DJANGO=1.4 DB=postgres
notifications:
  email:
    recipients:
      - dev@example.com
    on_success: never
  irc:
    channels:
      - "irc.freenode.org#django"
    skip_join: true
"#;

    fn env(pairs: &[(&str, &str)]) -> EnvironmentSet {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_parse_full_document() {
        let plan = parse_build_plan(DJANGO).unwrap();

        assert_eq!(plan.language(), "python");
        let sqlite = env(&[("DJANGO", "1.3"), ("DB", "sqlite")]);
        let postgres = env(&[("DJANGO", "1.4"), ("DB", "postgres")]);
        assert_eq!(plan.environments(), [sqlite.clone(), postgres.clone()]);

        assert_eq!(
            plan.matrix(),
            [
                MatrixEntry::new("2.6", sqlite.clone()),
                MatrixEntry::new("2.7", sqlite),
                MatrixEntry::new("2.7", postgres.clone()),
                MatrixEntry::new("3.3", postgres),
            ]
        );

        assert_eq!(
            plan.commands(HookStage::BeforeInstall),
            ["sudo apt-get update -qq"]
        );
        assert_eq!(plan.commands(HookStage::Install).len(), 2);
        assert_eq!(plan.commands(HookStage::Script), ["python setup.py test"]);
        assert!(plan.commands(HookStage::AfterScript).is_empty());

        assert!(plan.can_build_branch("master"));
        assert!(plan.can_build_branch("release-1.0"));
        assert!(!plan.can_build_branch("develop"));

        assert!(plan.email().enabled);
        assert_eq!(plan.email().addresses, ["dev@example.com"]);
        assert_eq!(plan.email().on_success, NotifyPolicy::Never);
        assert_eq!(plan.email().on_failure, NotifyPolicy::Always);

        assert!(plan.irc().enabled);
        assert!(!plan.irc().join_channel);
    }

    #[test]
    fn test_minimal_document() {
        let plan = parse_build_plan("language: ruby").unwrap();
        assert_eq!(plan.language(), "ruby");
        assert_eq!(plan.environments(), [EnvironmentSet::new()]);
        assert_eq!(plan.matrix(), [MatrixEntry::new("default", EnvironmentSet::new())]);
        assert!(plan.hooks().iter().all(|(_, c)| c.is_empty()));
        assert!(plan.branch_whitelist().is_none());
        assert!(plan.branch_blacklist().is_none());
        assert!(plan.email().enabled);
        assert!(!plan.irc().enabled);
    }

    #[test]
    fn test_missing_language_fails() {
        for yaml in ["", "script: make", "python: ['2.7']\nenv: A=1\n"] {
            let err = parse_build_plan(yaml).unwrap_err();
            assert!(matches!(err, ConfigError::MissingLanguage), "{}", yaml);
        }
    }

    #[test]
    fn test_unparsable_document() {
        let err = parse_build_plan("language: [python\nscript: make\n").unwrap_err();
        assert!(matches!(err, ConfigError::DocumentSyntax(_)));
    }

    #[test]
    fn test_root_must_be_mapping() {
        let err = parse_build_plan("- language: python").unwrap_err();
        assert_eq!(err.field(), Some("(root)"));

        let err = parse_build_plan("python").unwrap_err();
        assert_eq!(err.field(), Some("(root)"));
    }

    #[test]
    fn test_first_error_aborts() {
        let yaml = "language: python\nscript: {a: b}\nbranches: {}\n";
        let err = parse_build_plan(yaml).unwrap_err();
        assert_eq!(err.field(), Some("script"));
    }

    #[test]
    fn test_branches_without_only_or_except_fails() {
        let err = parse_build_plan("language: python\nbranches: {}\n").unwrap_err();
        assert_eq!(err.field(), Some("branches"));
    }

    #[test]
    fn test_blacklist() {
        let plan = parse_build_plan("language: python\nbranches:\n  except: [wip]\n").unwrap();
        assert!(plan.branch_whitelist().is_none());
        assert!(!plan.can_build_branch("wip"));
        assert!(plan.can_build_branch("master"));
    }

    #[test]
    fn test_invalid_policy_fails() {
        let yaml = "language: python\nnotifications:\n  email:\n    on_success: sometimes\n";
        let err = parse_build_plan(yaml).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn test_null_policy_fails() {
        let yaml = "language: python\nnotifications:\n  email:\n    on_success: ~\n";
        let err = parse_build_plan(yaml).unwrap_err();
        assert_eq!(err.field(), Some("notifications.email.on_success"));
    }

    #[test]
    fn test_null_env_and_branches_use_defaults() {
        let plan = parse_build_plan("language: python\nenv:\nbranches:\n").unwrap();
        assert_eq!(plan.environments(), [EnvironmentSet::new()]);
        assert!(plan.can_build_branch("anything"));
    }

    #[test]
    fn test_language_named_like_reserved_key() {
        let yaml = "language: env\nenv: A=1\nversion: ['1.0', '2.0']\n";
        let plan = parse_build_plan(yaml).unwrap();
        let a = env(&[("A", "1")]);
        assert_eq!(
            plan.matrix(),
            [MatrixEntry::new("1.0", a.clone()), MatrixEntry::new("2.0", a)]
        );
    }

    #[test]
    fn test_parsing_twice_yields_equal_plans() {
        let first = parse_build_plan(DJANGO).unwrap();
        let second = parse_build_plan(DJANGO).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_parse_from_value() {
        let value: Value = serde_yaml::from_str("language: go\ngo: ['1.1']\n").unwrap();
        let plan = parse_build_plan_value(&value).unwrap();
        assert_eq!(plan.matrix(), [MatrixEntry::new("1.1", EnvironmentSet::new())]);
    }

    #[test]
    fn test_parse_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(DJANGO.as_bytes()).unwrap();

        let plan = parse_build_plan_file(file.path()).unwrap();
        assert_eq!(plan, parse_build_plan(DJANGO).unwrap());
    }

    #[test]
    fn test_parse_missing_file() {
        let err = parse_build_plan_file("/nonexistent/.travis.yml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
