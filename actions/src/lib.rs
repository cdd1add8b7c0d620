//! Action types and action-creator factories for Driftwood.
//!
//! This crate builds the plain [`Action`] records an external store
//! dispatches. It has no IO, no async, and no knowledge of the store itself.
//!
//! ```
//! use driftwood_actions::{batch_actions, create_action, create_async_action_types};
//! use serde_json::json;
//!
//! let add = create_action("todos/add")?;
//! let action = add.create_with("milk");
//! assert_eq!(action.action_type(), "todos/add");
//! assert_eq!(action.payload(), Some(&json!("milk")));
//!
//! let fetch = create_async_action_types("FETCH", Some("users"));
//! assert_eq!(fetch.request, "users/FETCH_REQUEST");
//!
//! let batch = batch_actions([action.clone(), add.create_with("eggs")]);
//! assert_eq!(batch.unbatch().map(|inner| inner.len()), Some(2));
//! # Ok::<(), driftwood_actions::InvalidActionType>(())
//! ```

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory
#![allow(clippy::missing_panics_doc)] // Panics are documented in assertions

mod action;
mod batch;
mod creator;
mod types;

pub use action::{Action, ActionType, InvalidActionType};
pub use batch::{BATCH_ACTION_TYPE, batch_actions};
pub use creator::{
    ActionCreator, ActionCreatorMap, ActionSpec, MetaFn, PayloadFn, combine_actions,
    create_action, create_actions, create_empty_action,
};
pub use types::{
    AsyncActionTypes, AsyncActions, NAMESPACE_SEPARATOR, create_action_types,
    create_async_action_types, create_async_actions,
};
