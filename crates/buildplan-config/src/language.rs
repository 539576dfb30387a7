//! Language identification and per-language runtime settings.

use buildplan_core::HookStage;
use serde_yaml::Mapping;

use crate::document::{field, Shape};
use crate::{ConfigError, ConfigResult};

/// Where a language keeps its runtime version list, and which version to
/// build when the list is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageProfile<'a> {
    /// Top-level key holding the runtime versions (e.g., `rvm` for ruby).
    pub version_key: &'a str,
    /// Version used when the key is absent.
    pub default_version: &'a str,
}

// (language, version key, default version)
const PROFILES: &[(&str, &str, &str)] = &[
    ("python", "python", "python2.6"),
    ("ruby", "rvm", "default"),
    ("node_js", "node_js", "node"),
    ("php", "php", "default"),
    ("perl", "perl", "default"),
    ("go", "go", "1.x"),
    ("rust", "rust", "stable"),
    ("java", "jdk", "default"),
    ("groovy", "jdk", "default"),
    ("clojure", "jdk", "default"),
    ("scala", "scala", "default"),
    ("erlang", "otp_release", "default"),
    ("haskell", "ghc", "default"),
    ("c", "compiler", "gcc"),
    ("cpp", "compiler", "gcc"),
];

// Top-level keys that already mean something else.
const RESERVED_KEYS: &[&str] = &["language", "env", "matrix", "branches", "notifications"];

/// Version key for languages whose own name is a reserved key.
const FALLBACK_VERSION_KEY: &str = "version";

fn is_reserved_key(key: &str) -> bool {
    RESERVED_KEYS.contains(&key) || HookStage::ALL.iter().any(|stage| stage.as_str() == key)
}

impl<'a> LanguageProfile<'a> {
    /// Profile for a language. Unknown languages keep their versions under
    /// a key named after the language itself, or under `version` when that
    /// name is already a top-level key.
    pub fn for_language(language: &'a str) -> Self {
        PROFILES
            .iter()
            .find(|(name, _, _)| *name == language)
            .map(|&(_, version_key, default_version)| LanguageProfile {
                version_key,
                default_version,
            })
            .unwrap_or_else(|| LanguageProfile {
                version_key: if is_reserved_key(language) {
                    FALLBACK_VERSION_KEY
                } else {
                    language
                },
                default_version: "default",
            })
    }
}

/// Read the required `language` key.
pub fn parse_language(config: &Mapping) -> ConfigResult<String> {
    match field(config, "language") {
        Shape::Absent | Shape::Null => Err(ConfigError::MissingLanguage),
        shape => {
            let language = shape.scalar_text().ok_or_else(|| {
                ConfigError::invalid(
                    "language",
                    format!("expected a string, found {}", shape.describe()),
                )
            })?;
            let language = language.trim();
            if language.is_empty() {
                return Err(ConfigError::invalid("language", "must not be empty"));
            }
            Ok(language.to_string())
        }
    }
}
