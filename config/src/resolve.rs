//! Resolving a [`PartialConfig`] into a [`Configuration`].

use std::sync::LazyLock;

use thiserror::Error;

use crate::partial::PartialConfig;
use crate::schema::{Configuration, LogLevel, StorageStrategy};

/// The process-wide defaults. Built once, only ever shared immutably.
pub static DEFAULT_CONFIG: LazyLock<Configuration> = LazyLock::new(Configuration::builtin);

/// An invalid value that was replaced by its default during resolution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigDiagnostic {
    #[error("invalid persist.storage {value:?}, using {fallback}")]
    InvalidStorage {
        value: String,
        fallback: StorageStrategy,
    },
    #[error("invalid logging.level {value:?}, using {fallback}")]
    InvalidLevel { value: String, fallback: LogLevel },
}

impl ConfigDiagnostic {
    /// Dotted path of the coerced field.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            ConfigDiagnostic::InvalidStorage { .. } => "persist.storage",
            ConfigDiagnostic::InvalidLevel { .. } => "logging.level",
        }
    }

    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            ConfigDiagnostic::InvalidStorage { value, .. }
            | ConfigDiagnostic::InvalidLevel { value, .. } => value,
        }
    }
}

/// A resolved configuration and the coercions it took to get there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub config: Configuration,
    pub diagnostics: Vec<ConfigDiagnostic>,
}

impl Resolution {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Overlay `partial` on [`DEFAULT_CONFIG`] and validate the enumerated fields.
///
/// Never fails: invalid enumerated values are replaced by their defaults and
/// reported in [`Resolution::diagnostics`].
#[must_use]
pub fn resolve_config(partial: &PartialConfig) -> Resolution {
    let mut config = DEFAULT_CONFIG.clone();
    let mut diagnostics = Vec::new();

    if let Some(state) = &partial.state {
        state.apply_to(&mut config.state);
    }
    if let Some(action) = &partial.action {
        action.apply_to(&mut config.action);
    }
    if let Some(middleware) = &partial.middleware {
        middleware.apply_to(&mut config.middleware);
    }
    if let Some(persist) = &partial.persist {
        persist.apply_to(&mut config.persist);
    }
    if let Some(logging) = &partial.logging {
        logging.apply_to(&mut config.logging);
    }

    if let Some(raw) = partial.storage() {
        config.persist.storage = raw.parse().unwrap_or_else(|_| {
            let fallback = StorageStrategy::default();
            diagnostics.push(ConfigDiagnostic::InvalidStorage {
                value: raw.to_string(),
                fallback,
            });
            fallback
        });
    }
    if let Some(raw) = partial.level() {
        config.logging.level = raw.parse().unwrap_or_else(|_| {
            let fallback = LogLevel::default();
            diagnostics.push(ConfigDiagnostic::InvalidLevel {
                value: raw.to_string(),
                fallback,
            });
            fallback
        });
    }

    Resolution {
        config,
        diagnostics,
    }
}

/// Resolve `partial`, logging a warning for every coerced field.
#[must_use]
pub fn create_config(partial: &PartialConfig) -> Configuration {
    let Resolution {
        config,
        diagnostics,
    } = resolve_config(partial);
    for diagnostic in &diagnostics {
        tracing::warn!(
            field = diagnostic.field(),
            value = diagnostic.value(),
            "{diagnostic}"
        );
    }
    config
}
