//! Action-creator factories.
//!
//! An [`ActionCreator`] is built once (usually into a module-level value) and
//! invoked many times. Every invocation allocates a fresh [`Action`]; the
//! creator itself only holds its type and shared, immutable creator
//! functions, so it is `Send + Sync` and cheap to clone.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;

use crate::action::{Action, ActionType, InvalidActionType};

/// Produces a payload from the creator's arguments. `None` omits `payload`.
pub type PayloadFn = dyn Fn(&[Value]) -> Option<Value> + Send + Sync;

/// Produces `meta` from the creator's arguments. The result is always attached.
pub type MetaFn = dyn Fn(&[Value]) -> Value + Send + Sync;

/// Insertion-ordered mapping of creator names to creators.
pub type ActionCreatorMap = IndexMap<String, ActionCreator>;

#[derive(Clone)]
enum PayloadSource {
    /// The first argument, if any.
    FirstArgument,
    /// Never a payload, whatever the arguments.
    Empty,
    Custom(Arc<PayloadFn>),
}

#[derive(Clone)]
pub struct ActionCreator {
    action_type: ActionType,
    payload: PayloadSource,
    meta: Option<Arc<MetaFn>>,
}

impl ActionCreator {
    /// A creator whose payload is its first argument and which attaches no meta.
    pub fn new(action_type: impl Into<String>) -> Result<Self, InvalidActionType> {
        ActionType::new(action_type).map(Self::for_type)
    }

    #[must_use]
    pub fn for_type(action_type: ActionType) -> Self {
        Self {
            action_type,
            payload: PayloadSource::FirstArgument,
            meta: None,
        }
    }

    /// Replace the default payload behaviour with `payload`.
    #[must_use]
    pub fn with_payload<F>(self, payload: F) -> Self
    where
        F: Fn(&[Value]) -> Option<Value> + Send + Sync + 'static,
    {
        self.with_payload_fn(Arc::new(payload))
    }

    #[must_use]
    pub fn with_payload_fn(mut self, payload: Arc<PayloadFn>) -> Self {
        self.payload = PayloadSource::Custom(payload);
        self
    }

    #[must_use]
    pub fn with_meta<F>(self, meta: F) -> Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        self.with_meta_fn(Arc::new(meta))
    }

    #[must_use]
    pub fn with_meta_fn(mut self, meta: Arc<MetaFn>) -> Self {
        self.meta = Some(meta);
        self
    }

    #[must_use]
    pub fn action_type(&self) -> &ActionType {
        &self.action_type
    }

    /// Build a fresh action from `args`.
    #[must_use]
    pub fn create(&self, args: &[Value]) -> Action {
        let payload = match &self.payload {
            PayloadSource::FirstArgument => args.first().cloned(),
            PayloadSource::Empty => None,
            PayloadSource::Custom(payload) => payload(args),
        };
        let meta = self.meta.as_ref().map(|meta| meta(args));
        Action::from_parts(self.action_type.clone(), payload, meta)
    }

    /// Build an action from a single argument.
    #[must_use]
    pub fn create_with(&self, arg: impl Into<Value>) -> Action {
        self.create(&[arg.into()])
    }

    /// Whether `action` was (or could have been) produced by this creator.
    #[must_use]
    pub fn matches(&self, action: &Action) -> bool {
        action.action_type() == &self.action_type
    }
}

impl fmt::Debug for ActionCreator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let payload = match self.payload {
            PayloadSource::FirstArgument => "first-argument",
            PayloadSource::Empty => "empty",
            PayloadSource::Custom(_) => "custom",
        };
        f.debug_struct("ActionCreator")
            .field("action_type", &self.action_type)
            .field("payload", &payload)
            .field("meta", &self.meta.is_some())
            .finish()
    }
}

/// Build an action creator for `action_type`.
///
/// Customize the payload and meta with [`ActionCreator::with_payload`] and
/// [`ActionCreator::with_meta`].
pub fn create_action(action_type: impl Into<String>) -> Result<ActionCreator, InvalidActionType> {
    ActionCreator::new(action_type)
}

/// A creator that ignores its arguments and always yields `{ type }`.
pub fn create_empty_action(
    action_type: impl Into<String>,
) -> Result<ActionCreator, InvalidActionType> {
    let mut creator = ActionCreator::new(action_type)?;
    creator.payload = PayloadSource::Empty;
    Ok(creator)
}

/// A declarative action-creator description, as consumed by [`create_actions`].
#[derive(Clone)]
pub enum ActionSpec {
    /// Just the type; default payload, no meta.
    Type(String),
    Full {
        action_type: String,
        payload: Option<Arc<PayloadFn>>,
        meta: Option<Arc<MetaFn>>,
    },
}

impl ActionSpec {
    #[must_use]
    pub fn full(action_type: impl Into<String>) -> Self {
        Self::Full {
            action_type: action_type.into(),
            payload: None,
            meta: None,
        }
    }

    #[must_use]
    pub fn payload<F>(self, payload: F) -> Self
    where
        F: Fn(&[Value]) -> Option<Value> + Send + Sync + 'static,
    {
        let (action_type, meta) = self.into_type_and_meta();
        Self::Full {
            action_type,
            payload: Some(Arc::new(payload)),
            meta,
        }
    }

    #[must_use]
    pub fn meta<F>(self, meta: F) -> Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        match self {
            Self::Type(action_type) => Self::Full {
                action_type,
                payload: None,
                meta: Some(Arc::new(meta)),
            },
            Self::Full {
                action_type,
                payload,
                ..
            } => Self::Full {
                action_type,
                payload,
                meta: Some(Arc::new(meta)),
            },
        }
    }

    fn into_type_and_meta(self) -> (String, Option<Arc<MetaFn>>) {
        match self {
            Self::Type(action_type) => (action_type, None),
            Self::Full {
                action_type, meta, ..
            } => (action_type, meta),
        }
    }

    fn build(self) -> Result<ActionCreator, InvalidActionType> {
        match self {
            Self::Type(action_type) => ActionCreator::new(action_type),
            Self::Full {
                action_type,
                payload,
                meta,
            } => {
                let mut creator = ActionCreator::new(action_type)?;
                if let Some(payload) = payload {
                    creator = creator.with_payload_fn(payload);
                }
                if let Some(meta) = meta {
                    creator = creator.with_meta_fn(meta);
                }
                Ok(creator)
            }
        }
    }
}

impl From<&str> for ActionSpec {
    fn from(value: &str) -> Self {
        Self::Type(value.to_string())
    }
}

impl From<String> for ActionSpec {
    fn from(value: String) -> Self {
        Self::Type(value)
    }
}

impl fmt::Debug for ActionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Type(action_type) => f.debug_tuple("Type").field(action_type).finish(),
            Self::Full {
                action_type,
                payload,
                meta,
            } => f
                .debug_struct("Full")
                .field("action_type", action_type)
                .field("payload", &payload.is_some())
                .field("meta", &meta.is_some())
                .finish(),
        }
    }
}

/// Build one creator per entry. Later entries with a repeated name replace
/// earlier ones. Fails on the first entry with an empty type.
pub fn create_actions<I, K, S>(entries: I) -> Result<ActionCreatorMap, InvalidActionType>
where
    I: IntoIterator<Item = (K, S)>,
    K: Into<String>,
    S: Into<ActionSpec>,
{
    let mut creators = ActionCreatorMap::new();
    for (name, spec) in entries {
        creators.insert(name.into(), spec.into().build()?);
    }
    Ok(creators)
}

/// Shallow, right-biased merge of creator maps: on a repeated name the later
/// map wins.
///
/// This composes creator maps; it does not merge actions.
#[must_use]
pub fn combine_actions<I>(maps: I) -> ActionCreatorMap
where
    I: IntoIterator<Item = ActionCreatorMap>,
{
    let mut combined = ActionCreatorMap::new();
    for map in maps {
        combined.extend(map);
    }
    combined
}

#[cfg(test)]
mod tests {
    use std::thread;

    use serde_json::{Value, json};

    use super::{
        ActionCreator, ActionSpec, combine_actions, create_action, create_actions,
        create_empty_action,
    };
    use crate::InvalidActionType;

    #[test]
    fn default_payload_is_first_argument() {
        let add = create_action("todos/add").unwrap();
        let action = add.create(&[json!("milk"), json!("ignored")]);
        assert_eq!(action.action_type(), "todos/add");
        assert_eq!(action.payload(), Some(&json!("milk")));
        assert!(!action.has_meta());
    }

    #[test]
    fn no_arguments_means_no_payload() {
        let clear = create_action("todos/clear").unwrap();
        assert!(!clear.create(&[]).has_payload());
    }

    #[test]
    fn explicit_null_argument_is_a_payload() {
        let set = create_action("filter/set").unwrap();
        assert_eq!(set.create(&[Value::Null]).payload(), Some(&Value::Null));
    }

    #[test]
    fn empty_type_is_rejected() {
        assert_eq!(create_action("").unwrap_err(), InvalidActionType);
        assert_eq!(create_empty_action("").unwrap_err(), InvalidActionType);
    }

    #[test]
    fn payload_creator_sees_all_arguments() {
        let sum = create_action("math/sum").unwrap().with_payload(|args| {
            Some(json!(args.iter().filter_map(Value::as_i64).sum::<i64>()))
        });
        assert_eq!(
            sum.create(&[json!(1), json!(2), json!(3)]).payload(),
            Some(&json!(6))
        );
    }

    #[test]
    fn payload_creator_returning_none_omits_payload() {
        let ping = create_action("net/ping").unwrap().with_payload(|_| None);
        let action = ping.create(&[json!("x")]);
        assert!(!action.has_payload());
        assert_eq!(action.into_value(), json!({ "type": "net/ping" }));
    }

    #[test]
    fn meta_is_always_attached() {
        let tagged = create_action("log/tag").unwrap().with_meta(|_| Value::Null);
        let action = tagged.create(&[]);
        assert_eq!(action.meta(), Some(&Value::Null));
        assert!(!action.has_payload());
    }

    #[test]
    fn meta_sees_the_same_arguments() {
        let tagged = create_action("log/tag")
            .unwrap()
            .with_meta(|args| json!({ "count": args.len() }));
        assert_eq!(
            tagged.create(&[json!(1), json!(2)]).meta(),
            Some(&json!({ "count": 2 }))
        );
    }

    #[test]
    fn empty_action_ignores_arguments() {
        let reset = create_empty_action("app/reset").unwrap();
        let action = reset.create(&[json!(1), json!({ "a": 1 })]);
        assert_eq!(action.action_type(), "app/reset");
        assert!(!action.has_payload());
        assert!(!action.has_meta());
    }

    #[test]
    fn invocations_are_independent() {
        let add = create_action("todos/add").unwrap();
        let first = add.create_with("a");
        let second = add.create_with("b");
        assert_eq!(first.payload(), Some(&json!("a")));
        assert_eq!(second.payload(), Some(&json!("b")));
    }

    #[test]
    fn matches_compares_types() {
        let add = create_action("todos/add").unwrap();
        let remove = create_action("todos/remove").unwrap();
        let action = add.create(&[]);
        assert!(add.matches(&action));
        assert!(!remove.matches(&action));
    }

    #[test]
    fn create_actions_accepts_strings_and_records() {
        let creators = create_actions([
            ("add", ActionSpec::from("todos/add")),
            (
                "toggle",
                ActionSpec::full("todos/toggle")
                    .payload(|args| args.first().map(|id| json!({ "id": id })))
                    .meta(|_| json!("ui")),
            ),
        ])
        .unwrap();

        assert_eq!(
            creators.keys().map(String::as_str).collect::<Vec<_>>(),
            ["add", "toggle"]
        );
        let toggle = creators["toggle"].create(&[json!(7)]);
        assert_eq!(toggle.payload(), Some(&json!({ "id": 7 })));
        assert_eq!(toggle.meta(), Some(&json!("ui")));
        assert_eq!(creators["add"].create_with(1).payload(), Some(&json!(1)));
    }

    #[test]
    fn create_actions_duplicate_names_overwrite() {
        let creators = create_actions([("a", "first/a"), ("a", "second/a")]).unwrap();
        assert_eq!(creators.len(), 1);
        assert_eq!(creators["a"].action_type(), "second/a");
    }

    #[test]
    fn create_actions_fails_on_empty_type() {
        let result = create_actions([("ok", "x/ok"), ("bad", "")]);
        assert_eq!(result.unwrap_err(), InvalidActionType);
    }

    #[test]
    fn meta_on_bare_type_keeps_default_payload() {
        let creators = create_actions([("a", ActionSpec::from("x/a").meta(|_| json!(1)))]).unwrap();
        let action = creators["a"].create_with("p");
        assert_eq!(action.payload(), Some(&json!("p")));
        assert_eq!(action.meta(), Some(&json!(1)));
    }

    #[test]
    fn combine_is_right_biased() {
        let left = create_actions([("add", "left/add"), ("keep", "left/keep")]).unwrap();
        let right = create_actions([("add", "right/add")]).unwrap();
        let combined = combine_actions([left, right]);

        assert_eq!(combined.len(), 2);
        assert_eq!(combined["add"].action_type(), "right/add");
        assert_eq!(combined["keep"].action_type(), "left/keep");
    }

    #[test]
    fn combine_of_nothing_is_empty() {
        assert!(combine_actions(Vec::new()).is_empty());
    }

    #[test]
    fn creators_are_shareable_across_threads() {
        let add = ActionCreator::new("todos/add").unwrap();
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let add = add.clone();
                thread::spawn(move || add.create_with(i))
            })
            .collect();
        let mut payloads: Vec<i64> = handles
            .into_iter()
            .map(|h| h.join().unwrap().payload().and_then(Value::as_i64).unwrap())
            .collect();
        payloads.sort_unstable();
        assert_eq!(payloads, [0, 1, 2, 3]);
    }
}
