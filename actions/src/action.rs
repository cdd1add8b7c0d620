//! The `Action` record and its validated type string.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("action type must be a non-empty string")]
pub struct InvalidActionType;

/// A non-empty action type string, conventionally `<namespace>/<name>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ActionType(Cow<'static, str>);

impl ActionType {
    pub fn new(value: impl Into<String>) -> Result<Self, InvalidActionType> {
        let value = value.into();
        if value.is_empty() {
            return Err(InvalidActionType);
        }
        Ok(Self(Cow::Owned(value)))
    }

    /// A compile-time checked action type.
    #[must_use]
    pub const fn known(value: &'static str) -> Self {
        assert!(!value.is_empty(), "ActionType must not be empty");
        Self(Cow::Borrowed(value))
    }

    /// Wraps a string the caller has already proven non-empty.
    pub(crate) fn composed(value: String) -> Self {
        debug_assert!(!value.is_empty());
        Self(Cow::Owned(value))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0.into_owned()
    }
}

impl TryFrom<String> for ActionType {
    type Error = InvalidActionType;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for ActionType {
    type Error = InvalidActionType;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ActionType> for String {
    fn from(value: ActionType) -> Self {
        value.into_inner()
    }
}

impl AsRef<str> for ActionType {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq<str> for ActionType {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for ActionType {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One state-changing event.
///
/// `payload` and `meta` distinguish "absent" (`None`) from "present but
/// null" (`Some(Value::Null)`), both in memory and on the wire: absent fields
/// are omitted when serialized, and an explicit `null` deserializes as
/// present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    #[serde(rename = "type")]
    action_type: ActionType,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    payload: Option<Value>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    meta: Option<Value>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl Action {
    /// An action carrying only its type.
    #[must_use]
    pub fn new(action_type: ActionType) -> Self {
        Self {
            action_type,
            payload: None,
            meta: None,
        }
    }

    #[must_use]
    pub fn with_payload(mut self, payload: impl Into<Value>) -> Self {
        self.payload = Some(payload.into());
        self
    }

    #[must_use]
    pub fn with_meta(mut self, meta: impl Into<Value>) -> Self {
        self.meta = Some(meta.into());
        self
    }

    pub(crate) fn from_parts(
        action_type: ActionType,
        payload: Option<Value>,
        meta: Option<Value>,
    ) -> Self {
        Self {
            action_type,
            payload,
            meta,
        }
    }

    #[must_use]
    pub fn action_type(&self) -> &ActionType {
        &self.action_type
    }

    #[must_use]
    pub fn payload(&self) -> Option<&Value> {
        self.payload.as_ref()
    }

    #[must_use]
    pub fn meta(&self) -> Option<&Value> {
        self.meta.as_ref()
    }

    #[must_use]
    pub fn has_payload(&self) -> bool {
        self.payload.is_some()
    }

    #[must_use]
    pub fn has_meta(&self) -> bool {
        self.meta.is_some()
    }

    /// Whether this action's type equals `action_type`.
    #[must_use]
    pub fn is(&self, action_type: &str) -> bool {
        self.action_type == action_type
    }

    /// The action as a plain JSON object, with absent fields omitted.
    #[must_use]
    pub fn into_value(self) -> Value {
        let mut object = Map::new();
        object.insert("type".to_string(), Value::String(self.action_type.into_inner()));
        if let Some(payload) = self.payload {
            object.insert("payload".to_string(), payload);
        }
        if let Some(meta) = self.meta {
            object.insert("meta".to_string(), meta);
        }
        Value::Object(object)
    }
}
