//! Testing utilities for the convograph workspace
//!
//! Shared fixtures: canonical entities and a pre-seeded store.

#![allow(missing_docs)]

use convograph_model::{
    Behavior, Intent, Markup, MessageTemplate, OdId, Scenario, Scene, Speaker, Turn,
};
use convograph_store::{DataClient, MemoryStore, StoreError};

pub fn od(slug: &str) -> OdId {
    OdId::new(slug).expect("fixture slug must be non-empty")
}

pub fn user_intent(slug: &str) -> Intent {
    Intent::new(od(slug), slug, Speaker::User)
        .sample_utterance("hello there")
        .confidence(1.0)
}

pub fn app_intent(slug: &str) -> Intent {
    Intent::new(od(slug), slug, Speaker::App)
        .sample_utterance("how can I help?")
        .confidence(1.0)
}

pub fn app_intent_with_template(slug: &str) -> Intent {
    app_intent(slug).template(MessageTemplate::new(
        od(&format!("{slug}_reply")),
        "Reply",
        Markup::single_text("how can I help?"),
    ))
}

/// A scenario with one conversation, one scene, one empty turn
pub fn small_scenario(od_id: &str) -> Scenario {
    let turn = Turn::new(od("greeting_turn"), "Greeting").behavior(Behavior::starting());
    let scene = Scene::new(od("greeting_scene"), "Greeting").turn(turn);
    let conversation =
        convograph_model::Conversation::new(od("greeting_conversation"), "Greeting").scene(scene);
    Scenario::new(od(od_id), "Fixture", None).conversation(conversation)
}

/// Persist [`small_scenario`] and return the store plus the assigned uid of
/// its single turn
pub async fn seeded_store(od_id: &str) -> Result<(MemoryStore, convograph_model::Uid), StoreError> {
    let store = MemoryStore::new();
    let scenario = store.add_full_scenario_graph(small_scenario(od_id)).await?;
    let turn_uid = scenario.conversations[0].scenes[0].turns[0]
        .uid
        .expect("persisted turn carries a uid");
    Ok((store, turn_uid))
}

mod flaky;
pub use flaky::FlakyStore;
