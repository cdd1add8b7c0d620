//! End-to-end use of the action factory the way a feature module would.

use driftwood_actions::{
    ActionCreatorMap, ActionSpec, BATCH_ACTION_TYPE, batch_actions, combine_actions,
    create_action_types, create_actions, create_async_action_types, create_async_actions,
};
use serde_json::json;

fn quest_actions() -> ActionCreatorMap {
    let types = create_action_types("quest", ["ACCEPT", "ABANDON"]);
    create_actions([
        ("accept", ActionSpec::from(types["ACCEPT"].as_str())),
        (
            "abandon",
            ActionSpec::full(types["ABANDON"].as_str())
                .payload(|args| args.first().map(|id| json!({ "questId": id })))
                .meta(|_| json!({ "source": "journal" })),
        ),
    ])
    .unwrap()
}

fn fishing_actions() -> ActionCreatorMap {
    let fetch = create_async_actions(&create_async_action_types("CAST", Some("fishing")));
    let mut map = ActionCreatorMap::new();
    map.insert("castRequest".to_string(), fetch.request);
    map.insert("castSuccess".to_string(), fetch.success);
    map.insert("castFailure".to_string(), fetch.failure);
    map
}

#[test]
fn feature_maps_compose_and_dispatch_as_one_batch() {
    let creators = combine_actions([quest_actions(), fishing_actions()]);
    assert_eq!(creators.len(), 5);

    let batch = batch_actions([
        creators["castRequest"].create(&[]),
        creators["castSuccess"].create_with(json!({ "fish": "trout" })),
        creators["abandon"].create_with(42),
    ]);

    assert_eq!(
        serde_json::to_value(&batch).unwrap(),
        json!({
            "type": BATCH_ACTION_TYPE,
            "payload": [
                { "type": "fishing/CAST_REQUEST" },
                { "type": "fishing/CAST_SUCCESS", "payload": { "fish": "trout" } },
                {
                    "type": "quest/ABANDON",
                    "payload": { "questId": 42 },
                    "meta": { "source": "journal" }
                }
            ]
        })
    );

    let inner = batch.unbatch().unwrap();
    assert!(creators["castRequest"].matches(&inner[0]));
    assert!(creators["abandon"].matches(&inner[2]));
}

#[test]
fn same_action_type_for_every_invocation() {
    let creators = quest_actions();
    let accept = &creators["accept"];
    for id in 0..3 {
        let action = accept.create_with(id);
        assert_eq!(action.action_type(), accept.action_type());
        assert_eq!(action.payload(), Some(&json!(id)));
    }
}
