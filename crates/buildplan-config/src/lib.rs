//! YAML CI configuration parsing for buildplan.
//!
//! This crate handles:
//! - Decoding configuration text into a generic YAML tree
//! - Extracting language, environments, hooks, branches and notifications
//! - Expanding runtime versions and environments into the build matrix

pub mod branches;
pub mod document;
pub mod env;
pub mod error;
pub mod hooks;
pub mod language;
pub mod matrix;
pub mod notifications;
pub mod plan;

pub use error::{ConfigError, ConfigResult};
pub use language::LanguageProfile;
pub use plan::{parse_build_plan, parse_build_plan_file, parse_build_plan_value};
