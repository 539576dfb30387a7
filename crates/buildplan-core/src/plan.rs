//! The parsed build plan.

use serde::Serialize;

use crate::{
    BranchFilter, BranchPattern, EmailNotification, EnvironmentSet, Error, HookStage, Hooks,
    IrcNotification, MatrixEntry, Result,
};

/// The validated, normalized result of parsing one CI configuration document.
///
/// A plan is built once and never mutated; callers that need a different
/// configuration parse a new document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildPlan {
    language: String,
    environments: Vec<EnvironmentSet>,
    matrix: Vec<MatrixEntry>,
    hooks: Hooks,
    branches: BranchFilter,
    email: EmailNotification,
    irc: IrcNotification,
}

impl BuildPlan {
    pub fn builder(language: impl Into<String>) -> BuildPlanBuilder {
        BuildPlanBuilder::new(language)
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn environments(&self) -> &[EnvironmentSet] {
        &self.environments
    }

    /// The expanded build matrix, one entry per job, in build order.
    pub fn matrix(&self) -> &[MatrixEntry] {
        &self.matrix
    }

    pub fn hooks(&self) -> &Hooks {
        &self.hooks
    }

    pub fn commands(&self, stage: HookStage) -> &[String] {
        self.hooks.commands(stage)
    }

    pub fn branches(&self) -> &BranchFilter {
        &self.branches
    }

    pub fn branch_whitelist(&self) -> Option<&[BranchPattern]> {
        match &self.branches {
            BranchFilter::Only(patterns) => Some(patterns),
            _ => None,
        }
    }

    pub fn branch_blacklist(&self) -> Option<&[BranchPattern]> {
        match &self.branches {
            BranchFilter::Except(patterns) => Some(patterns),
            _ => None,
        }
    }

    pub fn email(&self) -> &EmailNotification {
        &self.email
    }

    pub fn irc(&self) -> &IrcNotification {
        &self.irc
    }

    /// Whether a push to `branch` is allowed to trigger a build.
    pub fn can_build_branch(&self, branch: &str) -> bool {
        self.branches.admits(branch)
    }
}

/// Builder for creating a BuildPlan.
pub struct BuildPlanBuilder {
    plan: BuildPlan,
}

impl BuildPlanBuilder {
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            plan: BuildPlan {
                language: language.into(),
                environments: vec![EnvironmentSet::new()],
                matrix: Vec::new(),
                hooks: Hooks::new(),
                branches: BranchFilter::All,
                email: EmailNotification::default(),
                irc: IrcNotification::default(),
            },
        }
    }

    pub fn with_environments(mut self, environments: Vec<EnvironmentSet>) -> Self {
        self.plan.environments = environments;
        self
    }

    pub fn with_matrix(mut self, matrix: Vec<MatrixEntry>) -> Self {
        self.plan.matrix = matrix;
        self
    }

    pub fn with_hooks(mut self, hooks: Hooks) -> Self {
        self.plan.hooks = hooks;
        self
    }

    pub fn with_branches(mut self, branches: BranchFilter) -> Self {
        self.plan.branches = branches;
        self
    }

    pub fn with_email(mut self, email: EmailNotification) -> Self {
        self.plan.email = email;
        self
    }

    pub fn with_irc(mut self, irc: IrcNotification) -> Self {
        self.plan.irc = irc;
        self
    }

    pub fn build(self) -> Result<BuildPlan> {
        if self.plan.language.trim().is_empty() {
            return Err(Error::MissingField("language".to_string()));
        }
        Ok(self.plan)
    }
}
