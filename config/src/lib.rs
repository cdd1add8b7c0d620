//! Configuration defaults, merging, validation and loading for Driftwood.
//!
//! [`create_config`] overlays a [`PartialConfig`] on the immutable
//! [`DEFAULT_CONFIG`] and returns a fully populated [`Configuration`]:
//!
//! ```
//! use driftwood_config::{PartialConfig, StorageStrategy, create_config};
//!
//! let partial = PartialConfig::from_toml_str(
//!     "[state.history]\nmaxSize = 10\n\n[persist]\nstorage = \"s3\"\n",
//! )?;
//! let config = create_config(&partial);
//!
//! assert_eq!(config.state().history().max_size(), 10);
//! assert!(config.state().history().enabled());
//! // Unknown storage strategies fall back to the default with a warning.
//! assert_eq!(config.persist().storage(), StorageStrategy::Local);
//! # Ok::<(), toml::de::Error>(())
//! ```
//!
//! The history, persistence and logging policies are read by the store and
//! its middleware; nothing in this crate enforces them.

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory

mod load;
mod partial;
mod resolve;
mod schema;

pub use load::{ConfigError, load_config, load_partial};
pub use partial::{
    ActionOverride, HistoryOverride, LoggingOverride, MiddlewareOverride, PartialConfig,
    PersistOverride, StateOverride,
};
pub use resolve::{ConfigDiagnostic, DEFAULT_CONFIG, Resolution, create_config, resolve_config};
pub use schema::{
    ActionConfig, Configuration, HistoryConfig, LogLevel, LoggingConfig, MiddlewareConfig,
    PersistConfig, ReservedActionType, StateConfig, StorageStrategy, UnknownVariant,
};
