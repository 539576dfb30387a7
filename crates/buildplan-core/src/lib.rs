//! Core domain types for buildplan.
//!
//! This crate contains:
//! - The `BuildPlan` produced by parsing a CI configuration document
//! - Environment sets and build matrix entries
//! - Lifecycle hook stages and their command lists
//! - Branch admission filters
//! - Email and IRC notification settings

pub mod branch;
pub mod environment;
pub mod error;
pub mod hooks;
pub mod matrix;
pub mod notify;
pub mod plan;

pub use branch::{BranchFilter, BranchPattern};
pub use environment::EnvironmentSet;
pub use error::{Error, Result};
pub use hooks::{HookStage, Hooks};
pub use matrix::MatrixEntry;
pub use notify::{EmailNotification, IrcNotification, NotifyPolicy};
pub use plan::{BuildPlan, BuildPlanBuilder};
