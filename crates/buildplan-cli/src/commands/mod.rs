//! CLI command implementations.

pub mod branch;
pub mod show;

use anyhow::{Context, Result};
use buildplan_config::parse_build_plan_file;
use buildplan_core::BuildPlan;
use std::process::ExitCode;

/// Read and parse the configuration file at `path`.
pub fn load(path: &str) -> Result<BuildPlan> {
    parse_build_plan_file(path)
        .with_context(|| format!("Failed to load build configuration: {}", path))
}

pub fn validate(path: &str) -> Result<ExitCode> {
    match parse_build_plan_file(path) {
        Ok(plan) => {
            println!(
                "Configuration is valid ({} job{})",
                plan.matrix().len(),
                if plan.matrix().len() == 1 { "" } else { "s" }
            );
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            println!("Configuration error: {}", e);
            Ok(ExitCode::FAILURE)
        }
    }
}
