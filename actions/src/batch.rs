//! Batch envelopes.
//!
//! A batch is an ordinary action of the reserved [`BATCH_ACTION_TYPE`] whose
//! payload is the array of wrapped actions. A dispatcher applies the payload
//! as one unit, element 0 first. Applying it is the dispatcher's job; this
//! module only fixes the envelope shape.

use serde::Deserialize as _;
use serde_json::Value;

use crate::action::{Action, ActionType};

/// Reserved type of batch envelopes. Cannot collide with a namespaced type.
pub const BATCH_ACTION_TYPE: &str = "@@BATCH";

const BATCH: ActionType = ActionType::known(BATCH_ACTION_TYPE);

/// Wrap `actions` into a single envelope, preserving order.
#[must_use]
pub fn batch_actions<I>(actions: I) -> Action
where
    I: IntoIterator<Item = Action>,
{
    let payload = actions.into_iter().map(Action::into_value).collect();
    Action::new(BATCH).with_payload(Value::Array(payload))
}

impl Action {
    #[must_use]
    pub fn is_batch(&self) -> bool {
        self.is(BATCH_ACTION_TYPE)
    }

    /// The wrapped actions of a batch envelope, in application order.
    ///
    /// `None` when this is not a batch, or its payload is not an array of
    /// actions.
    #[must_use]
    pub fn unbatch(&self) -> Option<Vec<Action>> {
        if !self.is_batch() {
            return None;
        }
        let payload = self.payload()?;
        Vec::<Action>::deserialize(payload).ok()
    }
}
