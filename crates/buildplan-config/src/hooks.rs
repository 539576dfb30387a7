//! Lifecycle hook parsing.

use buildplan_core::{HookStage, Hooks};
use serde_yaml::Mapping;

use crate::document::{field, string_list};
use crate::ConfigResult;

/// Read the command list of every hook stage. A bare string is a
/// one-command list; an absent stage has no commands.
pub fn parse_hooks(config: &Mapping) -> ConfigResult<Hooks> {
    let mut hooks = Hooks::new();
    for stage in HookStage::ALL {
        let key = stage.as_str();
        hooks.set(stage, string_list(key, field(config, key))?);
    }
    Ok(hooks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::mapping;
    use crate::ConfigError;

    #[test]
    fn test_bare_string_is_one_command_for_every_stage() {
        for stage in HookStage::ALL {
            let bare = parse_hooks(&mapping(&format!("{}: make", stage))).unwrap();
            let listed = parse_hooks(&mapping(&format!("{}: [make]", stage))).unwrap();
            assert_eq!(bare.commands(stage), ["make"]);
            assert_eq!(bare, listed);
        }
    }

    #[test]
    fn test_list_keeps_order() {
        let hooks = parse_hooks(&mapping(
            "install:\n  - pip install -r requirements.txt\n  - pip install nose\n",
        ))
        .unwrap();
        assert_eq!(
            hooks.commands(HookStage::Install),
            ["pip install -r requirements.txt", "pip install nose"]
        );
    }

    #[test]
    fn test_absent_stages_are_empty() {
        let hooks = parse_hooks(&mapping("script: nosetests")).unwrap();
        for stage in HookStage::ALL {
            if stage != HookStage::Script {
                assert!(hooks.commands(stage).is_empty());
            }
        }
    }

    #[test]
    fn test_invalid_stage_value_names_stage() {
        let err = parse_hooks(&mapping("before_script: {run: make}")).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref field, .. } if field == "before_script"));

        let err = parse_hooks(&mapping("after_script: true")).unwrap_err();
        assert_eq!(err.field(), Some("after_script"));
    }

    #[test]
    fn test_null_stage_is_rejected() {
        let err = parse_hooks(&mapping("script: ~")).unwrap_err();
        assert_eq!(err.field(), Some("script"));

        let err = parse_hooks(&mapping("install:\nscript: make\n")).unwrap_err();
        assert_eq!(err.field(), Some("install"));
    }

    #[test]
    fn test_unknown_keys_are_not_stages() {
        let hooks = parse_hooks(&mapping("after_success: deploy")).unwrap();
        assert!(hooks.iter().all(|(_, commands)| commands.is_empty()));
    }
}
