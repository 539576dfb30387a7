//! Notification settings parsing.

use buildplan_core::{EmailNotification, IrcNotification, NotifyPolicy};
use serde_yaml::Mapping;

use crate::document::{field, optional_bool, string_list, Shape};
use crate::{ConfigError, ConfigResult};

/// Read `notifications.email` and `notifications.irc`.
pub fn parse_notifications(
    config: &Mapping,
) -> ConfigResult<(EmailNotification, IrcNotification)> {
    match field(config, "notifications") {
        Shape::Absent => Ok((EmailNotification::default(), IrcNotification::default())),
        Shape::Mapping(notifications) => Ok((
            parse_email(field(notifications, "email"))?,
            parse_irc(field(notifications, "irc"))?,
        )),
        other => Err(ConfigError::invalid(
            "notifications",
            format!("expected a mapping, found {}", other.describe()),
        )),
    }
}

/// Email is on by default. It can be switched off with `false`, given a bare
/// list of recipients, or configured with a mapping.
pub fn parse_email(shape: Shape<'_>) -> ConfigResult<EmailNotification> {
    let mut email = EmailNotification::default();
    match shape {
        Shape::Absent | Shape::Bool(true) => {}
        Shape::Bool(false) => email = EmailNotification::disabled(),
        Shape::Sequence(_) => {
            email.addresses = string_list("notifications.email", shape)?;
        }
        Shape::Mapping(settings) => {
            email.addresses = string_list(
                "notifications.email.recipients",
                field(settings, "recipients"),
            )?;
            email.on_success = parse_policy(
                "notifications.email.on_success",
                field(settings, "on_success"),
                email.on_success,
            )?;
            email.on_failure = parse_policy(
                "notifications.email.on_failure",
                field(settings, "on_failure"),
                email.on_failure,
            )?;
        }
        other => {
            return Err(ConfigError::invalid(
                "notifications.email",
                format!(
                    "expected false, a list of addresses or a mapping, found {}",
                    other.describe()
                ),
            ));
        }
    }
    Ok(email)
}

/// IRC is off unless configured with a mapping.
pub fn parse_irc(shape: Shape<'_>) -> ConfigResult<IrcNotification> {
    let mut irc = IrcNotification::default();
    if !shape.is_truthy() {
        return Ok(irc);
    }
    let Shape::Mapping(settings) = shape else {
        return Err(ConfigError::invalid(
            "notifications.irc",
            format!("expected a mapping, found {}", shape.describe()),
        ));
    };

    irc.enabled = true;
    irc.channels = string_list("notifications.irc.channels", field(settings, "channels"))?;
    irc.template = string_list("notifications.irc.template", field(settings, "template"))?;
    irc.use_notice =
        optional_bool("notifications.irc.use_notice", field(settings, "use_notice"))?
            .unwrap_or(false);
    irc.join_channel =
        !optional_bool("notifications.irc.skip_join", field(settings, "skip_join"))?
            .unwrap_or(false);
    irc.on_success = parse_policy(
        "notifications.irc.on_success",
        field(settings, "on_success"),
        irc.on_success,
    )?;
    irc.on_failure = parse_policy(
        "notifications.irc.on_failure",
        field(settings, "on_failure"),
        irc.on_failure,
    )?;
    Ok(irc)
}

fn parse_policy(
    field: &str,
    shape: Shape<'_>,
    default: NotifyPolicy,
) -> ConfigResult<NotifyPolicy> {
    match shape {
        Shape::Absent => Ok(default),
        Shape::String(value) => value
            .parse()
            .map_err(|e: buildplan_core::Error| ConfigError::invalid(field, e.to_string())),
        other => Err(ConfigError::invalid(
            field,
            format!(
                "expected one of always, never, change, found {}",
                other.describe()
            ),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::mapping;

    fn parse(yaml: &str) -> ConfigResult<(EmailNotification, IrcNotification)> {
        parse_notifications(&mapping(yaml))
    }

    #[test]
    fn test_defaults_when_absent() {
        let (email, irc) = parse("language: python").unwrap();
        assert_eq!(email, EmailNotification::default());
        assert!(email.enabled);
        assert!(email.addresses.is_empty());
        assert_eq!(irc, IrcNotification::default());
        assert!(!irc.enabled);
    }

    #[test]
    fn test_email_false_disables() {
        let (email, _) = parse("notifications: {email: false}").unwrap();
        assert!(!email.enabled);
        assert!(email.addresses.is_empty());
    }

    #[test]
    fn test_email_address_list() {
        let (email, _) = parse(r#"notifications: {email: ["a@x.com"]}"#).unwrap();
        assert!(email.enabled);
        assert_eq!(email.addresses, ["a@x.com"]);
        assert_eq!(email.on_success, NotifyPolicy::Change);
        assert_eq!(email.on_failure, NotifyPolicy::Always);
    }

    #[test]
    fn test_email_mapping() {
        let (email, _) = parse(
            "notifications:\n  email:\n    recipients:\n      - dev@x.com\n      - ops@x.com\n    on_success: never\n    on_failure: change\n",
        )
        .unwrap();
        assert!(email.enabled);
        assert_eq!(email.addresses, ["dev@x.com", "ops@x.com"]);
        assert_eq!(email.on_success, NotifyPolicy::Never);
        assert_eq!(email.on_failure, NotifyPolicy::Change);
    }

    #[test]
    fn test_email_mapping_keeps_default_policy() {
        let (email, _) = parse("notifications: {email: {recipients: [a@x.com]}}").unwrap();
        assert_eq!(email.on_success, NotifyPolicy::Change);
        assert_eq!(email.on_failure, NotifyPolicy::Always);
    }

    #[test]
    fn test_invalid_policy_rejected() {
        let err = parse("notifications: {email: {on_success: sometimes}}").unwrap_err();
        assert_eq!(err.field(), Some("notifications.email.on_success"));
        assert!(err.to_string().contains("sometimes"));

        let err = parse("notifications: {irc: {channels: [a], on_failure: 3}}").unwrap_err();
        assert_eq!(err.field(), Some("notifications.irc.on_failure"));
    }

    #[test]
    fn test_null_is_not_a_default() {
        let err = parse("notifications: {email: {on_success: ~}}").unwrap_err();
        assert_eq!(err.field(), Some("notifications.email.on_success"));

        let err = parse("notifications:\n  email:\n").unwrap_err();
        assert_eq!(err.field(), Some("notifications.email"));
    }

    #[test]
    fn test_email_wrong_shape() {
        let err = parse("notifications: {email: dev@x.com}").unwrap_err();
        assert_eq!(err.field(), Some("notifications.email"));
    }

    #[test]
    fn test_irc_mapping() {
        let (_, irc) = parse(
            "notifications:\n  irc:\n    channels: ['irc.freenode.org#proj']\n    template: ['%{repository} %{message}']\n    use_notice: true\n    skip_join: true\n    on_success: always\n",
        )
        .unwrap();
        assert!(irc.enabled);
        assert_eq!(irc.channels, ["irc.freenode.org#proj"]);
        assert_eq!(irc.template, ["%{repository} %{message}"]);
        assert!(irc.use_notice);
        assert!(!irc.join_channel);
        assert_eq!(irc.on_success, NotifyPolicy::Always);
        assert_eq!(irc.on_failure, NotifyPolicy::Always);
    }

    #[test]
    fn test_irc_falsy_is_disabled() {
        for yaml in [
            "notifications: {irc: false}",
            "notifications: {irc: {}}",
            "notifications: {irc: []}",
            "notifications: {irc: ''}",
            "notifications:\n  irc:\n",
        ] {
            let (_, irc) = parse(yaml).unwrap();
            assert_eq!(irc, IrcNotification::default(), "{}", yaml);
        }
    }

    #[test]
    fn test_irc_defaults_when_enabled() {
        let (_, irc) = parse("notifications: {irc: {channels: [a]}}").unwrap();
        assert!(irc.enabled);
        assert!(irc.join_channel);
        assert!(!irc.use_notice);
        assert!(irc.template.is_empty());
    }

    #[test]
    fn test_irc_wrong_shapes() {
        let err = parse("notifications: {irc: 'irc.freenode.org#proj'}").unwrap_err();
        assert_eq!(err.field(), Some("notifications.irc"));

        let err = parse("notifications: {irc: {channels: [a], skip_join: yes}}").unwrap_err();
        assert_eq!(err.field(), Some("notifications.irc.skip_join"));
    }

    #[test]
    fn test_notifications_must_be_mapping() {
        let err = parse("notifications: [email]").unwrap_err();
        assert_eq!(err.field(), Some("notifications"));
    }
}
