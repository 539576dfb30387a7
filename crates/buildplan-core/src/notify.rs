//! Notification settings.

use derive_more::Display;
use serde::Serialize;
use std::str::FromStr;

use crate::Error;

/// When to send a notification for a given build outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display)]
#[serde(rename_all = "lowercase")]
pub enum NotifyPolicy {
    /// Notify on every build with this outcome.
    #[display("always")]
    Always,
    /// Never notify for this outcome.
    #[display("never")]
    Never,
    /// Notify only when the outcome differs from the previous build.
    #[display("change")]
    Change,
}

impl NotifyPolicy {
    /// Decide whether a build with outcome `succeeded` should notify, given
    /// the outcome of the previous build (`None` when there is none).
    ///
    /// A first build counts as a change.
    pub fn should_notify(self, previous_succeeded: Option<bool>, succeeded: bool) -> bool {
        match self {
            NotifyPolicy::Always => true,
            NotifyPolicy::Never => false,
            NotifyPolicy::Change => previous_succeeded != Some(succeeded),
        }
    }
}

impl FromStr for NotifyPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "always" => Ok(NotifyPolicy::Always),
            "never" => Ok(NotifyPolicy::Never),
            "change" => Ok(NotifyPolicy::Change),
            other => Err(Error::InvalidPolicy(other.to_string())),
        }
    }
}

/// Email notification settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailNotification {
    pub enabled: bool,
    /// Recipient addresses. Empty means the orchestrator's own default
    /// recipients (typically the committer).
    pub addresses: Vec<String>,
    pub on_success: NotifyPolicy,
    pub on_failure: NotifyPolicy,
}

impl EmailNotification {
    /// Email explicitly turned off.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// The policy that applies to a build with the given outcome.
    pub fn policy_for(&self, succeeded: bool) -> NotifyPolicy {
        if succeeded {
            self.on_success
        } else {
            self.on_failure
        }
    }
}

impl Default for EmailNotification {
    fn default() -> Self {
        Self {
            enabled: true,
            addresses: Vec::new(),
            on_success: NotifyPolicy::Change,
            on_failure: NotifyPolicy::Always,
        }
    }
}

/// IRC notification settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IrcNotification {
    pub enabled: bool,
    /// Channels in `server#channel` form.
    pub channels: Vec<String>,
    /// Message template lines.
    pub template: Vec<String>,
    /// Send messages as NOTICE instead of PRIVMSG.
    pub use_notice: bool,
    /// Join the channel before messaging it.
    pub join_channel: bool,
    pub on_success: NotifyPolicy,
    pub on_failure: NotifyPolicy,
}

impl IrcNotification {
    pub fn policy_for(&self, succeeded: bool) -> NotifyPolicy {
        if succeeded {
            self.on_success
        } else {
            self.on_failure
        }
    }
}

impl Default for IrcNotification {
    fn default() -> Self {
        Self {
            enabled: false,
            channels: Vec::new(),
            template: Vec::new(),
            use_notice: false,
            join_channel: true,
            on_success: NotifyPolicy::Change,
            on_failure: NotifyPolicy::Always,
        }
    }
}
