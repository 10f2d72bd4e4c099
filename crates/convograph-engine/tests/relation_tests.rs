use convograph_engine::{EngineError, RelationManager, TracingObserver, AUTO_TEMPLATE_NAME};
use convograph_model::{Direction, MessageSegment, ModelError, Speaker};
use convograph_store::{DataClient, StoreError};
use convograph_test_utils::{app_intent, seeded_store, user_intent};
use pretty_assertions::assert_eq;

#[tokio::test]
async fn storing_an_app_intent_auto_creates_one_template() {
    let (store, turn_uid) = seeded_store("support").await.unwrap();
    let manager = RelationManager::new(&store, &TracingObserver);

    let stored = manager
        .store_intent(&turn_uid, app_intent("reply"), Direction::Response)
        .await
        .unwrap();

    assert_eq!(stored.message_templates.len(), 1);
    let template = &stored.message_templates[0];
    assert_eq!(template.name, AUTO_TEMPLATE_NAME);
    assert_eq!(
        template.markup.segments,
        vec![MessageSegment::text(stored.sample_utterance.clone())]
    );

    // Persisted, not just decorated onto the return value.
    let on_store = store.templates_of(&stored.uid.unwrap()).await.unwrap();
    assert_eq!(on_store, stored.message_templates);
}

#[tokio::test]
async fn storing_a_user_intent_creates_no_template() {
    let (store, turn_uid) = seeded_store("support").await.unwrap();
    let manager = RelationManager::new(&store, &TracingObserver);

    let stored = manager
        .store_intent(&turn_uid, user_intent("greeting"), Direction::Request)
        .await
        .unwrap();

    assert!(stored.message_templates.is_empty());
    assert!(store
        .templates_of(&stored.uid.unwrap())
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn updating_an_intent_never_retriggers_the_template_policy() {
    let (store, turn_uid) = seeded_store("support").await.unwrap();
    let manager = RelationManager::new(&store, &TracingObserver);

    let stored = manager
        .store_intent(&turn_uid, app_intent("reply"), Direction::Response)
        .await
        .unwrap();
    let intent_uid = stored.uid.unwrap();

    let mut changed = stored;
    changed.sample_utterance = "a different utterance".to_string();
    store.update_intent(changed).await.unwrap();

    assert_eq!(store.templates_of(&intent_uid).await.unwrap().len(), 1);
}

#[tokio::test]
async fn the_direction_dictates_which_side_an_intent_lands_on() {
    let (store, turn_uid) = seeded_store("support").await.unwrap();
    let manager = RelationManager::new(&store, &TracingObserver);

    let request = manager
        .store_intent(&turn_uid, user_intent("greeting"), Direction::Request)
        .await
        .unwrap();
    let response = manager
        .store_intent(&turn_uid, app_intent("reply"), Direction::Response)
        .await
        .unwrap();

    let turn = store.get_turn(&turn_uid).await.unwrap();
    assert_eq!(turn.side_of(&request.uid.unwrap()), Some(Direction::Request));
    assert_eq!(turn.side_of(&response.uid.unwrap()), Some(Direction::Response));
}

#[tokio::test]
async fn a_speaker_incoherent_with_the_side_is_a_validation_error() {
    let (store, turn_uid) = seeded_store("support").await.unwrap();
    let manager = RelationManager::new(&store, &TracingObserver);

    let err = manager
        .store_intent(&turn_uid, app_intent("reply"), Direction::Request)
        .await
        .unwrap_err();
    match err {
        EngineError::Store(StoreError::Validation(errors)) => {
            assert!(errors.get("speaker").is_some());
        }
        other => panic!("expected validation error, got {other}"),
    }
}

#[tokio::test]
async fn the_inbound_direction_tag_is_parsed_strictly() {
    let (store, turn_uid) = seeded_store("support").await.unwrap();
    let manager = RelationManager::new(&store, &TracingObserver);

    let stored = manager
        .store_intent_tagged(&turn_uid, user_intent("greeting"), "REQUEST")
        .await
        .unwrap();
    assert_eq!(stored.speaker, Speaker::User);

    let err = manager
        .store_intent_tagged(&turn_uid, user_intent("greeting_2"), "request")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        EngineError::Model(ModelError::InvalidDirection(_))
    ));
}

#[tokio::test]
async fn reclassify_reports_the_side_that_now_holds_the_intent() {
    let (store, turn_uid) = seeded_store("support").await.unwrap();
    let manager = RelationManager::new(&store, &TracingObserver);

    let stored = manager
        .store_intent(&turn_uid, user_intent("greeting"), Direction::Request)
        .await
        .unwrap();
    let intent_uid = stored.uid.unwrap();

    let side = manager
        .reclassify(&turn_uid, &intent_uid, Direction::Response)
        .await
        .unwrap();
    assert_eq!(side, Direction::Response);

    // Idempotent: the same order yields the same final classification.
    let side = manager
        .reclassify(&turn_uid, &intent_uid, Direction::Response)
        .await
        .unwrap();
    assert_eq!(side, Direction::Response);
}

#[tokio::test]
async fn reclassifying_an_unlinked_intent_is_an_explicit_error() {
    let (store, turn_uid) = seeded_store("support").await.unwrap();
    let manager = RelationManager::new(&store, &TracingObserver);

    let err = manager
        .reclassify(
            &turn_uid,
            &convograph_model::Uid::generate(),
            Direction::Response,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Store(e) if e.is_not_found()));
}

#[tokio::test]
async fn remove_intent_detaches_the_relation_before_deleting_the_entity() {
    let (store, turn_uid) = seeded_store("support").await.unwrap();
    let manager = RelationManager::new(&store, &TracingObserver);

    let stored = manager
        .store_intent(&turn_uid, user_intent("greeting"), Direction::Request)
        .await
        .unwrap();
    let intent_uid = stored.uid.unwrap();

    // Deleting the entity first is refused by the store.
    assert!(matches!(
        store.delete_intent(&intent_uid).await.unwrap_err(),
        StoreError::Conflict(_)
    ));

    manager.remove_intent(&turn_uid, &intent_uid).await.unwrap();
    assert!(store.get_intent(&intent_uid).await.unwrap_err().is_not_found());
}
