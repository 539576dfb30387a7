//! Plan display commands.

use anyhow::{Context, Result};
use buildplan_core::{BranchFilter, BuildPlan, HookStage};
use std::fmt;
use std::process::ExitCode;

use super::load;

pub fn text(path: &str) -> Result<ExitCode> {
    let plan = load(path)?;
    print!("{}", PlanSummary(&plan));
    Ok(ExitCode::SUCCESS)
}

pub fn json(path: &str) -> Result<ExitCode> {
    let plan = load(path)?;
    let json = serde_json::to_string_pretty(&plan).context("Failed to serialize build plan")?;
    println!("{}", json);
    Ok(ExitCode::SUCCESS)
}

pub fn matrix(path: &str) -> Result<ExitCode> {
    let plan = load(path)?;
    print!("{}", MatrixListing(&plan));
    Ok(ExitCode::SUCCESS)
}

pub fn hooks(path: &str, stage: Option<HookStage>) -> Result<ExitCode> {
    let plan = load(path)?;
    match stage {
        Some(stage) => {
            for command in plan.commands(stage) {
                println!("{}", command);
            }
        }
        None => print!("{}", HookListing(&plan)),
    }
    Ok(ExitCode::SUCCESS)
}

/// One numbered line per matrix job, in build order.
pub struct MatrixListing<'a>(pub &'a BuildPlan);

impl fmt::Display for MatrixListing<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, entry) in self.0.matrix().iter().enumerate() {
            writeln!(f, "{:>3}. {}", index + 1, entry)?;
        }
        Ok(())
    }
}

/// Every non-empty hook stage with its commands.
pub struct HookListing<'a>(pub &'a BuildPlan);

impl fmt::Display for HookListing<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (stage, commands) in self.0.hooks().iter() {
            if commands.is_empty() {
                continue;
            }
            writeln!(f, "{}:", stage)?;
            for command in commands {
                writeln!(f, "  - {}", command)?;
            }
        }
        Ok(())
    }
}

pub struct PlanSummary<'a>(pub &'a BuildPlan);

impl fmt::Display for PlanSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plan = self.0;
        writeln!(f, "Language: {}", plan.language())?;

        writeln!(f, "\nMatrix ({} jobs):", plan.matrix().len())?;
        write!(f, "{}", MatrixListing(plan))?;

        if plan.hooks().iter().any(|(_, commands)| !commands.is_empty()) {
            writeln!(f, "\nHooks:")?;
            write!(f, "{}", HookListing(plan))?;
        }

        writeln!(f, "\nBranches:")?;
        match plan.branches() {
            BranchFilter::All => writeln!(f, "  all branches")?,
            BranchFilter::Only(patterns) => {
                writeln!(f, "  only:")?;
                for pattern in patterns {
                    writeln!(f, "    - {}", pattern.as_str())?;
                }
            }
            BranchFilter::Except(patterns) => {
                writeln!(f, "  except:")?;
                for pattern in patterns {
                    writeln!(f, "    - {}", pattern.as_str())?;
                }
            }
        }

        writeln!(f, "\nNotifications:")?;
        let email = plan.email();
        if email.enabled {
            writeln!(
                f,
                "  email: on_success={} on_failure={} recipients=[{}]",
                email.on_success,
                email.on_failure,
                email.addresses.join(", ")
            )?;
        } else {
            writeln!(f, "  email: disabled")?;
        }
        let irc = plan.irc();
        if irc.enabled {
            writeln!(
                f,
                "  irc: on_success={} on_failure={} channels=[{}] notice={} join={}",
                irc.on_success,
                irc.on_failure,
                irc.channels.join(", "),
                irc.use_notice,
                irc.join_channel
            )?;
        } else {
            writeln!(f, "  irc: disabled")?;
        }
        Ok(())
    }
}
