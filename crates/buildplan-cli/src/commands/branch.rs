//! Branch admission command.

use anyhow::Result;
use std::process::ExitCode;
use tracing::debug;

use super::load;

/// Report whether `branch` may build; the exit status mirrors the answer.
pub fn check(path: &str, branch: &str) -> Result<ExitCode> {
    let plan = load(path)?;
    let admitted = plan.can_build_branch(branch);
    debug!(branch = %branch, admitted, "Checked branch admission");

    if admitted {
        println!("Branch '{}' will be built", branch);
        Ok(ExitCode::SUCCESS)
    } else {
        println!("Branch '{}' is excluded by the branch filter", branch);
        Ok(ExitCode::FAILURE)
    }
}
