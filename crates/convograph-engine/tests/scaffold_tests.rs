use convograph_engine::{
    EngineError, ScaffoldGenerator, TracingObserver, AUTO_DESCRIPTION,
    SELECTED_SCENARIO_ATTRIBUTE,
};
use convograph_model::{
    BehaviorTag, ConditionOperator, MessageSegment, OdId, Scenario, Speaker,
    PLATFORM_DEFAULT_INTERPRETER,
};
use convograph_store::{DataClient, MemoryStore};
use convograph_test_utils::FlakyStore;
use pretty_assertions::assert_eq;

fn support_scenario() -> Scenario {
    Scenario::new(OdId::new("support").unwrap(), "Support", None)
}

async fn generate(store: &dyn DataClient) -> Scenario {
    ScaffoldGenerator::new(store, &TracingObserver)
        .generate(support_scenario(), "Welcome to support!", "Sorry, what was that?")
        .await
        .unwrap()
}

#[tokio::test]
async fn a_new_scenario_gets_exactly_two_default_conversations() {
    let store = MemoryStore::new();
    let scenario = generate(&store).await;

    let od_ids: Vec<&str> = scenario
        .conversations
        .iter()
        .map(|c| c.od_id.as_str())
        .collect();
    assert_eq!(od_ids, vec!["welcome_conversation", "no_match_conversation"]);

    for conversation in &scenario.conversations {
        assert_eq!(conversation.scenes.len(), 1);
        assert_eq!(conversation.scenes[0].turns.len(), 1);
        let turn = &conversation.scenes[0].turns[0];
        assert_eq!(turn.request_intents.len(), 1);
        assert_eq!(turn.response_intents.len(), 1);
        assert_eq!(turn.request_intents[0].speaker, Speaker::User);
        assert_eq!(turn.response_intents[0].speaker, Speaker::App);
        assert_eq!(turn.response_intents[0].message_templates.len(), 1);
    }
}

#[tokio::test]
async fn scaffold_nodes_carry_the_starting_tag_and_generated_description() {
    let store = MemoryStore::new();
    let scenario = generate(&store).await;

    for conversation in &scenario.conversations {
        assert_eq!(conversation.description, AUTO_DESCRIPTION);
        assert!(conversation
            .behaviors
            .iter()
            .any(|b| b.tag == BehaviorTag::Starting));
        let scene = &conversation.scenes[0];
        assert_eq!(scene.description, AUTO_DESCRIPTION);
        let turn = &scene.turns[0];
        assert_eq!(turn.description, AUTO_DESCRIPTION);
        assert!(turn.behaviors.iter().any(|b| b.tag == BehaviorTag::Starting));
        // Scaffolded containers inherit the platform interpreter by leaving
        // their own empty.
        assert_eq!(conversation.interpreter, "");
    }
}

#[tokio::test]
async fn scaffold_intents_use_the_fixed_and_namespaced_ids() {
    let store = MemoryStore::new();
    let scenario = generate(&store).await;

    let welcome_turn = &scenario.conversations[0].scenes[0].turns[0];
    let request = &welcome_turn.request_intents[0];
    assert_eq!(request.od_id.as_str(), "intent.core.welcome");
    assert_eq!(request.confidence, 1.0);
    assert!(request.is_request_intent);
    assert_eq!(request.interpreter, PLATFORM_DEFAULT_INTERPRETER);

    let response = &welcome_turn.response_intents[0];
    assert_eq!(
        response.od_id.as_str(),
        "intent.app.welcomeResponseForSupport"
    );
    assert!(response
        .behaviors
        .iter()
        .any(|b| b.tag == BehaviorTag::Completing));

    let no_match_turn = &scenario.conversations[1].scenes[0].turns[0];
    assert_eq!(
        no_match_turn.request_intents[0].od_id.as_str(),
        "intent.core.noMatch"
    );
    assert_eq!(
        no_match_turn.response_intents[0].od_id.as_str(),
        "intent.app.noMatchResponseForSupport"
    );
}

#[tokio::test]
async fn response_templates_render_the_caller_supplied_replies() {
    let store = MemoryStore::new();
    let scenario = generate(&store).await;

    let reply_of = |index: usize| {
        let template =
            &scenario.conversations[index].scenes[0].turns[0].response_intents[0].message_templates[0];
        template.markup.segments.clone()
    };
    assert_eq!(
        reply_of(0),
        vec![MessageSegment::text("Welcome to support!")]
    );
    assert_eq!(
        reply_of(1),
        vec![MessageSegment::text("Sorry, what was that?")]
    );
}

#[tokio::test]
async fn the_selection_condition_points_at_the_assigned_uid() {
    let store = MemoryStore::new();
    let scenario = generate(&store).await;
    let uid = scenario.uid.unwrap();

    assert_eq!(scenario.conditions.len(), 1);
    let condition = &scenario.conditions[0];
    assert_eq!(condition.operator, ConditionOperator::Equals);
    assert_eq!(condition.attribute, SELECTED_SCENARIO_ATTRIBUTE);
    assert_eq!(condition.value, uid.to_string());
}

#[tokio::test]
async fn attaching_the_condition_again_does_not_duplicate_it() {
    let store = MemoryStore::new();
    let scenario = generate(&store).await;
    let uid = scenario.uid.unwrap();

    let generator = ScaffoldGenerator::new(&store, &TracingObserver);
    let again = generator.attach_selection_condition(&uid).await.unwrap();
    assert_eq!(again.conditions.len(), 1);
    assert_eq!(again, store.get_scenario(&uid).await.unwrap());
}

#[tokio::test]
async fn a_failed_condition_write_reports_the_committed_subtree_and_retries() {
    let store = FlakyStore::new();
    store.fail_next_update_scenario();

    let generator = ScaffoldGenerator::new(&store, &TracingObserver);
    let err = generator
        .generate(support_scenario(), "Hi!", "Come again?")
        .await
        .unwrap_err();

    let scenario_uid = match err {
        EngineError::ScaffoldIncomplete { scenario_uid, .. } => scenario_uid,
        other => panic!("expected scaffold-incomplete, got {other}"),
    };

    // Phase 1 committed: the subtree is fully visible, condition still absent.
    let committed = store.get_scenario(&scenario_uid).await.unwrap();
    assert_eq!(committed.conversations.len(), 2);
    assert!(committed.conditions.is_empty());

    // Phase 2 retried on its own completes the scaffold.
    let repaired = generator
        .attach_selection_condition(&scenario_uid)
        .await
        .unwrap();
    assert_eq!(repaired.conditions.len(), 1);
    assert_eq!(repaired.conditions[0].value, scenario_uid.to_string());
}
