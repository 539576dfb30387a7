//! Lifecycle hook stages.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// A named point in the build lifecycle that carries a command list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HookStage {
    BeforeInstall,
    Install,
    AfterInstall,
    BeforeScript,
    Script,
    AfterScript,
}

impl HookStage {
    /// Every stage, in the order a build runs them.
    pub const ALL: [HookStage; 6] = [
        HookStage::BeforeInstall,
        HookStage::Install,
        HookStage::AfterInstall,
        HookStage::BeforeScript,
        HookStage::Script,
        HookStage::AfterScript,
    ];

    /// The configuration key for this stage.
    pub fn as_str(self) -> &'static str {
        match self {
            HookStage::BeforeInstall => "before_install",
            HookStage::Install => "install",
            HookStage::AfterInstall => "after_install",
            HookStage::BeforeScript => "before_script",
            HookStage::Script => "script",
            HookStage::AfterScript => "after_script",
        }
    }
}

impl fmt::Display for HookStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HookStage {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HookStage::ALL
            .into_iter()
            .find(|stage| stage.as_str() == s)
            .ok_or_else(|| Error::UnknownHookStage(s.to_string()))
    }
}

/// Command lists for every hook stage. A stage with no commands holds an
/// empty list; there is no way to hold a stage outside [`HookStage::ALL`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Hooks {
    before_install: Vec<String>,
    install: Vec<String>,
    after_install: Vec<String>,
    before_script: Vec<String>,
    script: Vec<String>,
    after_script: Vec<String>,
}

impl Hooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands for a stage, in declaration order.
    pub fn commands(&self, stage: HookStage) -> &[String] {
        match stage {
            HookStage::BeforeInstall => &self.before_install,
            HookStage::Install => &self.install,
            HookStage::AfterInstall => &self.after_install,
            HookStage::BeforeScript => &self.before_script,
            HookStage::Script => &self.script,
            HookStage::AfterScript => &self.after_script,
        }
    }

    /// Replace the commands for a stage.
    pub fn set(&mut self, stage: HookStage, commands: Vec<String>) {
        let slot = match stage {
            HookStage::BeforeInstall => &mut self.before_install,
            HookStage::Install => &mut self.install,
            HookStage::AfterInstall => &mut self.after_install,
            HookStage::BeforeScript => &mut self.before_script,
            HookStage::Script => &mut self.script,
            HookStage::AfterScript => &mut self.after_script,
        };
        *slot = commands;
    }

    /// Iterate all stages in lifecycle order, including empty ones.
    pub fn iter(&self) -> impl Iterator<Item = (HookStage, &[String])> {
        HookStage::ALL
            .into_iter()
            .map(move |stage| (stage, self.commands(stage)))
    }
}
