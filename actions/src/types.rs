//! Namespaced action-type constants and the async request/success/failure triad.

use indexmap::IndexMap;

use crate::action::ActionType;
use crate::creator::ActionCreator;

/// Separator between a namespace and a type name.
pub const NAMESPACE_SEPARATOR: char = '/';

/// `"<namespace>/<name>"` for every name, in input order.
///
/// Repeated names collapse into one entry; distinct names that happen to
/// produce the same string are not detected.
pub fn create_action_types<I, S>(namespace: &str, names: I) -> IndexMap<String, ActionType>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    names
        .into_iter()
        .map(|name| {
            let name = name.into();
            let action_type =
                ActionType::composed(format!("{namespace}{NAMESPACE_SEPARATOR}{name}"));
            (name, action_type)
        })
        .collect()
}

/// The three phases of an asynchronous operation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AsyncActionTypes {
    pub request: ActionType,
    pub success: ActionType,
    pub failure: ActionType,
}

impl AsyncActionTypes {
    /// The types in phase order.
    #[must_use]
    pub fn all(&self) -> [&ActionType; 3] {
        [&self.request, &self.success, &self.failure]
    }
}

/// `"<namespace>/<base>_REQUEST"` and friends. An empty or missing namespace
/// drops the prefix entirely.
#[must_use]
pub fn create_async_action_types(base: &str, namespace: Option<&str>) -> AsyncActionTypes {
    let prefix = match namespace {
        Some(namespace) if !namespace.is_empty() => format!("{namespace}{NAMESPACE_SEPARATOR}"),
        _ => String::new(),
    };
    let phase = |suffix: &str| ActionType::composed(format!("{prefix}{base}_{suffix}"));
    AsyncActionTypes {
        request: phase("REQUEST"),
        success: phase("SUCCESS"),
        failure: phase("FAILURE"),
    }
}

/// Default-payload creators bound to an [`AsyncActionTypes`] triad.
#[derive(Debug, Clone)]
pub struct AsyncActions {
    pub request: ActionCreator,
    pub success: ActionCreator,
    pub failure: ActionCreator,
}

#[must_use]
pub fn create_async_actions(types: &AsyncActionTypes) -> AsyncActions {
    AsyncActions {
        request: ActionCreator::for_type(types.request.clone()),
        success: ActionCreator::for_type(types.success.clone()),
        failure: ActionCreator::for_type(types.failure.clone()),
    }
}
