use convograph_model::{Behavior, Conversation, Scenario, Scene, Turn};
use convograph_store::{DataClient, MemoryStore, PageRequest, StoreError};
use convograph_test_utils::{app_intent_with_template, od, seeded_store, small_scenario, user_intent};

fn scenario_with_duplicate_conversations() -> Scenario {
    let conversation = |name: &str| {
        Conversation::new(od("twin"), name)
            .scene(Scene::new(od(&format!("{name}_scene")), name).turn(Turn::new(
                od(&format!("{name}_turn")),
                name,
            )))
    };
    Scenario::new(od("twins"), "Twins", None)
        .conversation(conversation("first"))
        .conversation(conversation("second"))
}

#[tokio::test]
async fn rejected_full_graph_write_leaves_nothing_visible() {
    let store = MemoryStore::new();
    let err = store
        .add_full_scenario_graph(scenario_with_duplicate_conversations())
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Conflict(_)));

    let page = store.list_scenarios(PageRequest::first()).await.unwrap();
    assert_eq!(page.total, 0);
    let intents = store.list_intents(PageRequest::first()).await.unwrap();
    assert_eq!(intents.total, 0);
}

#[tokio::test]
async fn scenario_od_ids_are_unique_store_wide() {
    let store = MemoryStore::new();
    store
        .add_full_scenario_graph(small_scenario("support"))
        .await
        .unwrap();
    let err = store
        .add_full_scenario_graph(small_scenario("support"))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Conflict(_)));
}

#[tokio::test]
async fn conversation_od_ids_are_unique_within_a_scenario() {
    let store = MemoryStore::new();
    let scenario = store
        .add_full_scenario_graph(small_scenario("support"))
        .await
        .unwrap();
    let scenario_uid = scenario.uid.unwrap();

    // The seeded scenario already owns "greeting_conversation".
    let err = store
        .add_conversation(
            &scenario_uid,
            Conversation::new(od("greeting_conversation"), "Duplicate"),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Conflict(_)));
}

#[tokio::test]
async fn deleting_an_attached_intent_is_a_conflict() {
    let (store, turn_uid) = seeded_store("support").await.unwrap();
    let stored = store
        .add_request_intent(&turn_uid, user_intent("greeting"))
        .await
        .unwrap();
    let intent_uid = stored.uid.unwrap();

    let err = store.delete_intent(&intent_uid).await.unwrap_err();
    assert!(matches!(err, StoreError::Conflict(_)));
    // Still there: the failed delete must not have removed anything.
    assert!(store.get_intent(&intent_uid).await.is_ok());
}

#[tokio::test]
async fn detach_then_delete_removes_the_intent() {
    let (store, turn_uid) = seeded_store("support").await.unwrap();
    let stored = store
        .add_response_intent(&turn_uid, app_intent_with_template("reply"))
        .await
        .unwrap();
    let intent_uid = stored.uid.unwrap();
    let template_uid = stored.message_templates[0].uid.unwrap();

    store.delete_turn_intent(&turn_uid, &intent_uid).await.unwrap();
    store.delete_intent(&intent_uid).await.unwrap();

    assert!(store.get_intent(&intent_uid).await.unwrap_err().is_not_found());
    assert!(store
        .get_message_template(&template_uid)
        .await
        .unwrap_err()
        .is_not_found());
    let turn = store.get_turn(&turn_uid).await.unwrap();
    assert!(turn.response_intents.is_empty());
}

#[tokio::test]
async fn detaching_an_unlinked_intent_is_not_found() {
    let (store, turn_uid) = seeded_store("support").await.unwrap();
    let missing = convograph_model::Uid::generate();
    let err = store.delete_turn_intent(&turn_uid, &missing).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn deleting_a_turn_cascades_to_its_intents() {
    let (store, turn_uid) = seeded_store("support").await.unwrap();
    let stored = store
        .add_response_intent(&turn_uid, app_intent_with_template("reply"))
        .await
        .unwrap();
    let intent_uid = stored.uid.unwrap();

    store.delete_turn(&turn_uid).await.unwrap();

    assert!(store.get_turn(&turn_uid).await.unwrap_err().is_not_found());
    assert!(store.get_intent(&intent_uid).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn deleting_a_scenario_cascades_to_the_whole_subtree() {
    let store = MemoryStore::new();
    let scenario = store
        .add_full_scenario_graph(small_scenario("support"))
        .await
        .unwrap();
    let scenario_uid = scenario.uid.unwrap();
    let conversation_uid = scenario.conversations[0].uid.unwrap();
    let turn_uid = scenario.conversations[0].scenes[0].turns[0].uid.unwrap();
    let stored = store
        .add_request_intent(&turn_uid, user_intent("greeting"))
        .await
        .unwrap();

    store.delete_scenario(&scenario_uid).await.unwrap();

    assert!(store.get_scenario(&scenario_uid).await.unwrap_err().is_not_found());
    assert!(store
        .get_conversation(&conversation_uid)
        .await
        .unwrap_err()
        .is_not_found());
    assert!(store.get_turn(&turn_uid).await.unwrap_err().is_not_found());
    assert!(store
        .get_intent(&stored.uid.unwrap())
        .await
        .unwrap_err()
        .is_not_found());
}

#[tokio::test]
async fn deleting_a_missing_scenario_reports_not_found_not_false() {
    let store = MemoryStore::new();
    let err = store
        .delete_scenario(&convograph_model::Uid::generate())
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn invalid_intent_side_in_a_subtree_rejects_the_whole_write() {
    // A request-side intent with an APP speaker never becomes visible,
    // and neither does anything else in the subtree.
    let store = MemoryStore::new();
    let turn = Turn::new(od("t"), "T")
        .behavior(Behavior::starting())
        .request_intent(app_intent_with_template("wrong_side"));
    let scenario = Scenario::new(od("broken"), "Broken", None).conversation(
        Conversation::new(od("c"), "C").scene(Scene::new(od("s"), "S").turn(turn)),
    );

    let err = store.add_full_scenario_graph(scenario).await.unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));
    assert_eq!(store.list_scenarios(PageRequest::first()).await.unwrap().total, 0);
}
