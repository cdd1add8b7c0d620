//! Resolved configuration types.
//!
//! Every leaf of a [`Configuration`] is populated. Fields are private to this
//! crate and exposed through accessors only, so a resolved configuration is
//! immutable all the way down:
//!
//! ```compile_fail
//! use driftwood_config::{PartialConfig, create_config};
//!
//! let mut config = create_config(&PartialConfig::default());
//! config.persist.enabled = true;
//! ```
//!
//! ```compile_fail
//! use driftwood_config::DEFAULT_CONFIG;
//!
//! let state = DEFAULT_CONFIG.state();
//! state.history.max_size = 0;
//! ```

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::level_filters::LevelFilter;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} {value:?}")]
pub struct UnknownVariant {
    kind: &'static str,
    value: String,
}

impl UnknownVariant {
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("action type {action_type:?} is reserved for the store")]
pub struct ReservedActionType {
    action_type: String,
}

impl ReservedActionType {
    #[must_use]
    pub fn action_type(&self) -> &str {
        &self.action_type
    }
}

// ============================================================================
// Enumerated fields
// ============================================================================

/// Where the persistence layer keeps state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageStrategy {
    #[default]
    Local,
    Session,
    Datastack,
    Custom,
}

impl StorageStrategy {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            StorageStrategy::Local => "local",
            StorageStrategy::Session => "session",
            StorageStrategy::Datastack => "datastack",
            StorageStrategy::Custom => "custom",
        }
    }

    #[must_use]
    pub fn all() -> &'static [StorageStrategy] {
        &[
            StorageStrategy::Local,
            StorageStrategy::Session,
            StorageStrategy::Datastack,
            StorageStrategy::Custom,
        ]
    }
}

impl FromStr for StorageStrategy {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|strategy| strategy.as_str() == s)
            .ok_or_else(|| UnknownVariant {
                kind: "storage strategy",
                value: s.to_string(),
            })
    }
}

impl fmt::Display for StorageStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }

    #[must_use]
    pub fn all() -> &'static [LogLevel] {
        &[LogLevel::Debug, LogLevel::Info, LogLevel::Warn, LogLevel::Error]
    }

    #[must_use]
    pub fn as_level_filter(self) -> LevelFilter {
        match self {
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Error => LevelFilter::ERROR,
        }
    }
}

impl FromStr for LogLevel {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| UnknownVariant {
                kind: "log level",
                value: s.to_string(),
            })
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Sections
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryConfig {
    pub(crate) enabled: bool,
    pub(crate) max_size: usize,
}

impl HistoryConfig {
    #[must_use]
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Upper bound on retained history entries. Enforced by the store.
    #[must_use]
    pub fn max_size(&self) -> usize {
        self.max_size
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StateConfig {
    pub(crate) immutable: bool,
    pub(crate) strict_mode: bool,
    pub(crate) history: HistoryConfig,
}

impl StateConfig {
    #[must_use]
    pub fn immutable(&self) -> bool {
        self.immutable
    }

    #[must_use]
    pub fn strict_mode(&self) -> bool {
        self.strict_mode
    }

    #[must_use]
    pub fn history(&self) -> &HistoryConfig {
        &self.history
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionConfig {
    #[serde(rename = "async")]
    pub(crate) async_enabled: bool,
    pub(crate) validate_types: bool,
    pub(crate) reserved_types: Vec<String>,
}

impl ActionConfig {
    #[must_use]
    pub fn async_enabled(&self) -> bool {
        self.async_enabled
    }

    #[must_use]
    pub fn validate_types(&self) -> bool {
        self.validate_types
    }

    /// Types the store uses for its own lifecycle events.
    #[must_use]
    pub fn reserved_types(&self) -> &[String] {
        &self.reserved_types
    }

    #[must_use]
    pub fn is_reserved(&self, action_type: &str) -> bool {
        self.reserved_types.iter().any(|reserved| reserved == action_type)
    }

    /// Reject application use of a reserved type. Always passes when type
    /// validation is disabled.
    pub fn check_type(&self, action_type: &str) -> Result<(), ReservedActionType> {
        if self.validate_types && self.is_reserved(action_type) {
            return Err(ReservedActionType {
                action_type: action_type.to_string(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MiddlewareConfig {
    pub(crate) enabled: bool,
    pub(crate) chain: Vec<String>,
}

impl MiddlewareConfig {
    #[must_use]
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Middleware names in application order.
    #[must_use]
    pub fn chain(&self) -> &[String] {
        &self.chain
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistConfig {
    pub(crate) enabled: bool,
    pub(crate) storage: StorageStrategy,
    pub(crate) whitelist: Vec<String>,
    pub(crate) blacklist: Vec<String>,
    #[serde(rename = "throttle")]
    pub(crate) throttle_ms: u64,
}

impl PersistConfig {
    #[must_use]
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    #[must_use]
    pub fn storage(&self) -> StorageStrategy {
        self.storage
    }

    #[must_use]
    pub fn whitelist(&self) -> &[String] {
        &self.whitelist
    }

    #[must_use]
    pub fn blacklist(&self) -> &[String] {
        &self.blacklist
    }

    #[must_use]
    pub fn throttle_ms(&self) -> u64 {
        self.throttle_ms
    }

    /// Minimum interval between two writes to storage.
    #[must_use]
    pub fn throttle(&self) -> Duration {
        Duration::from_millis(self.throttle_ms)
    }

    /// Whether the state slice `key` should be persisted.
    ///
    /// The blacklist always excludes; a non-empty whitelist restricts
    /// persistence to its members.
    #[must_use]
    pub fn includes(&self, key: &str) -> bool {
        if self.blacklist.iter().any(|k| k == key) {
            return false;
        }
        self.whitelist.is_empty() || self.whitelist.iter().any(|k| k == key)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggingConfig {
    pub(crate) enabled: bool,
    pub(crate) level: LogLevel,
    pub(crate) verbose: bool,
}

impl LoggingConfig {
    #[must_use]
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    #[must_use]
    pub fn level(&self) -> LogLevel {
        self.level
    }

    #[must_use]
    pub fn verbose(&self) -> bool {
        self.verbose
    }

    /// The most detailed level a logging subscriber should record.
    #[must_use]
    pub fn max_level(&self) -> LevelFilter {
        if !self.enabled {
            LevelFilter::OFF
        } else if self.verbose {
            LevelFilter::TRACE
        } else {
            self.level.as_level_filter()
        }
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// A fully resolved, immutable configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Configuration {
    pub(crate) state: StateConfig,
    pub(crate) action: ActionConfig,
    pub(crate) middleware: MiddlewareConfig,
    pub(crate) persist: PersistConfig,
    pub(crate) logging: LoggingConfig,
}

impl Configuration {
    /// The built-in defaults every resolution starts from.
    pub(crate) fn builtin() -> Self {
        Self {
            state: StateConfig {
                immutable: true,
                strict_mode: true,
                history: HistoryConfig {
                    enabled: true,
                    max_size: 50,
                },
            },
            action: ActionConfig {
                async_enabled: true,
                validate_types: true,
                reserved_types: ["INIT", "RESET", "HYDRATE", "PERSIST"]
                    .map(String::from)
                    .to_vec(),
            },
            middleware: MiddlewareConfig {
                enabled: true,
                chain: ["logger", "thunk"].map(String::from).to_vec(),
            },
            persist: PersistConfig {
                enabled: false,
                storage: StorageStrategy::Local,
                whitelist: Vec::new(),
                blacklist: Vec::new(),
                throttle_ms: 1000,
            },
            logging: LoggingConfig {
                enabled: true,
                level: LogLevel::Info,
                verbose: false,
            },
        }
    }

    #[must_use]
    pub fn state(&self) -> &StateConfig {
        &self.state
    }

    #[must_use]
    pub fn action(&self) -> &ActionConfig {
        &self.action
    }

    #[must_use]
    pub fn middleware(&self) -> &MiddlewareConfig {
        &self.middleware
    }

    #[must_use]
    pub fn persist(&self) -> &PersistConfig {
        &self.persist
    }

    #[must_use]
    pub fn logging(&self) -> &LoggingConfig {
        &self.logging
    }
}
