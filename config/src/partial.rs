//! Partial configuration overlays.
//!
//! A [`PartialConfig`] mirrors [`Configuration`] with every section and every
//! leaf optional. Presence is what matters when overlaying: an explicit
//! `false`, `0` or empty list replaces the default just like any other value.
//! Enumerated fields stay raw strings here so invalid values reach
//! validation instead of failing deserialization.

use serde::Deserialize;

use crate::schema::{
    ActionConfig, Configuration, HistoryConfig, LoggingConfig, MiddlewareConfig, PersistConfig,
    StateConfig,
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct HistoryOverride {
    pub enabled: Option<bool>,
    pub max_size: Option<usize>,
}

impl HistoryOverride {
    pub(crate) fn apply_to(&self, target: &mut HistoryConfig) {
        if let Some(enabled) = self.enabled {
            target.enabled = enabled;
        }
        if let Some(max_size) = self.max_size {
            target.max_size = max_size;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct StateOverride {
    pub immutable: Option<bool>,
    pub strict_mode: Option<bool>,
    pub history: Option<HistoryOverride>,
}

impl StateOverride {
    pub(crate) fn apply_to(&self, target: &mut StateConfig) {
        if let Some(immutable) = self.immutable {
            target.immutable = immutable;
        }
        if let Some(strict_mode) = self.strict_mode {
            target.strict_mode = strict_mode;
        }
        if let Some(history) = &self.history {
            history.apply_to(&mut target.history);
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ActionOverride {
    #[serde(rename = "async")]
    pub async_enabled: Option<bool>,
    pub validate_types: Option<bool>,
    pub reserved_types: Option<Vec<String>>,
}

impl ActionOverride {
    pub(crate) fn apply_to(&self, target: &mut ActionConfig) {
        if let Some(async_enabled) = self.async_enabled {
            target.async_enabled = async_enabled;
        }
        if let Some(validate_types) = self.validate_types {
            target.validate_types = validate_types;
        }
        if let Some(reserved_types) = &self.reserved_types {
            target.reserved_types.clone_from(reserved_types);
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MiddlewareOverride {
    pub enabled: Option<bool>,
    pub chain: Option<Vec<String>>,
}

impl MiddlewareOverride {
    pub(crate) fn apply_to(&self, target: &mut MiddlewareConfig) {
        if let Some(enabled) = self.enabled {
            target.enabled = enabled;
        }
        if let Some(chain) = &self.chain {
            target.chain.clone_from(chain);
        }
    }
}

/// `storage` is validated by the resolver, not here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PersistOverride {
    pub enabled: Option<bool>,
    pub storage: Option<String>,
    pub whitelist: Option<Vec<String>>,
    pub blacklist: Option<Vec<String>>,
    /// Milliseconds.
    pub throttle: Option<u64>,
}

impl PersistOverride {
    pub(crate) fn apply_to(&self, target: &mut PersistConfig) {
        if let Some(enabled) = self.enabled {
            target.enabled = enabled;
        }
        if let Some(whitelist) = &self.whitelist {
            target.whitelist.clone_from(whitelist);
        }
        if let Some(blacklist) = &self.blacklist {
            target.blacklist.clone_from(blacklist);
        }
        if let Some(throttle) = self.throttle {
            target.throttle_ms = throttle;
        }
    }
}

/// `level` is validated by the resolver, not here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LoggingOverride {
    pub enabled: Option<bool>,
    pub level: Option<String>,
    pub verbose: Option<bool>,
}

impl LoggingOverride {
    pub(crate) fn apply_to(&self, target: &mut LoggingConfig) {
        if let Some(enabled) = self.enabled {
            target.enabled = enabled;
        }
        if let Some(verbose) = self.verbose {
            target.verbose = verbose;
        }
    }
}

/// Caller-supplied overlay for [`create_config`](crate::create_config).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PartialConfig {
    pub state: Option<StateOverride>,
    pub action: Option<ActionOverride>,
    pub middleware: Option<MiddlewareOverride>,
    pub persist: Option<PersistOverride>,
    pub logging: Option<LoggingOverride>,
}

impl PartialConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub(crate) fn storage(&self) -> Option<&str> {
        self.persist.as_ref()?.storage.as_deref()
    }

    pub(crate) fn level(&self) -> Option<&str> {
        self.logging.as_ref()?.level.as_deref()
    }
}

/// The overlay that reproduces `config` exactly.
impl From<&Configuration> for PartialConfig {
    fn from(config: &Configuration) -> Self {
        let state = config.state();
        let action = config.action();
        let middleware = config.middleware();
        let persist = config.persist();
        let logging = config.logging();
        Self {
            state: Some(StateOverride {
                immutable: Some(state.immutable()),
                strict_mode: Some(state.strict_mode()),
                history: Some(HistoryOverride {
                    enabled: Some(state.history().enabled()),
                    max_size: Some(state.history().max_size()),
                }),
            }),
            action: Some(ActionOverride {
                async_enabled: Some(action.async_enabled()),
                validate_types: Some(action.validate_types()),
                reserved_types: Some(action.reserved_types().to_vec()),
            }),
            middleware: Some(MiddlewareOverride {
                enabled: Some(middleware.enabled()),
                chain: Some(middleware.chain().to_vec()),
            }),
            persist: Some(PersistOverride {
                enabled: Some(persist.enabled()),
                storage: Some(persist.storage().to_string()),
                whitelist: Some(persist.whitelist().to_vec()),
                blacklist: Some(persist.blacklist().to_vec()),
                throttle: Some(persist.throttle_ms()),
            }),
            logging: Some(LoggingOverride {
                enabled: Some(logging.enabled()),
                level: Some(logging.level().to_string()),
                verbose: Some(logging.verbose()),
            }),
        }
    }
}

impl From<Configuration> for PartialConfig {
    fn from(config: Configuration) -> Self {
        Self::from(&config)
    }
}

#[cfg(test)]
mod tests {
    use super::PartialConfig;

    #[test]
    fn toml_uses_camel_case_keys() {
        let partial = PartialConfig::from_toml_str(
            r#"
            [state]
            strictMode = false

            [state.history]
            maxSize = 10

            [action]
            async = false
            reservedTypes = []

            [persist]
            storage = "session"
            throttle = 250
            "#,
        )
        .unwrap();

        let state = partial.state.as_ref().unwrap();
        assert_eq!(state.strict_mode, Some(false));
        assert_eq!(state.history.as_ref().unwrap().max_size, Some(10));
        assert_eq!(state.immutable, None);

        let action = partial.action.as_ref().unwrap();
        assert_eq!(action.async_enabled, Some(false));
        assert_eq!(action.reserved_types, Some(Vec::new()));

        assert_eq!(partial.storage(), Some("session"));
        assert_eq!(partial.persist.as_ref().unwrap().throttle, Some(250));
        assert!(partial.logging.is_none());
    }

    #[test]
    fn json_and_toml_agree() {
        let from_json =
            PartialConfig::from_json_str(r#"{"logging":{"level":"warn","verbose":true}}"#)
                .unwrap();
        let from_toml =
            PartialConfig::from_toml_str("[logging]\nlevel = \"warn\"\nverbose = true\n").unwrap();
        assert_eq!(from_json, from_toml);
        assert_eq!(from_json.level(), Some("warn"));
    }

    #[test]
    fn invalid_enum_strings_still_parse() {
        let partial = PartialConfig::from_json_str(r#"{"persist":{"storage":"s3"}}"#).unwrap();
        assert_eq!(partial.storage(), Some("s3"));
    }

    #[test]
    fn malformed_sections_fail_fast() {
        assert!(PartialConfig::from_json_str(r#"{"state":true}"#).is_err());
        assert!(PartialConfig::from_json_str(r#"{"persist":{"enabled":"yes"}}"#).is_err());
        assert!(PartialConfig::from_toml_str("[state]\nhistory = 5\n").is_err());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(PartialConfig::from_json_str(r#"{"theme":{}}"#).is_err());
        assert!(PartialConfig::from_json_str(r#"{"state":{"strict_mode":true}}"#).is_err());
    }
}
