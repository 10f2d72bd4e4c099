//! Failure injection around the reference store
//!
//! [`FlakyStore`] delegates to a [`MemoryStore`] and fails exactly the calls
//! a test arms it to fail, for exercising partial-failure protocols.

use async_trait::async_trait;
use convograph_model::{
    Conversation, Direction, Intent, MessageTemplate, Scenario, Scene, Turn, Uid,
};
use convograph_store::{
    DataClient, MemoryStore, Page, PageRequest, StoreError, TransportError,
};
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Default)]
pub struct FlakyStore {
    inner: MemoryStore,
    fail_update_scenario: AtomicBool,
}

impl FlakyStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the next `update_scenario` call to fail with a transport error
    pub fn fail_next_update_scenario(&self) {
        self.fail_update_scenario.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl DataClient for FlakyStore {
    async fn get_scenario(&self, uid: &Uid) -> Result<Scenario, StoreError> {
        self.inner.get_scenario(uid).await
    }
    async fn get_conversation(&self, uid: &Uid) -> Result<Conversation, StoreError> {
        self.inner.get_conversation(uid).await
    }
    async fn get_scene(&self, uid: &Uid) -> Result<Scene, StoreError> {
        self.inner.get_scene(uid).await
    }
    async fn get_turn(&self, uid: &Uid) -> Result<Turn, StoreError> {
        self.inner.get_turn(uid).await
    }
    async fn get_intent(&self, uid: &Uid) -> Result<Intent, StoreError> {
        self.inner.get_intent(uid).await
    }
    async fn get_message_template(&self, uid: &Uid) -> Result<MessageTemplate, StoreError> {
        self.inner.get_message_template(uid).await
    }
    async fn list_scenarios(&self, page: PageRequest) -> Result<Page<Scenario>, StoreError> {
        self.inner.list_scenarios(page).await
    }
    async fn list_intents(&self, page: PageRequest) -> Result<Page<Intent>, StoreError> {
        self.inner.list_intents(page).await
    }
    async fn conversations_of(&self, scenario_uid: &Uid) -> Result<Vec<Conversation>, StoreError> {
        self.inner.conversations_of(scenario_uid).await
    }
    async fn scenes_of(&self, conversation_uid: &Uid) -> Result<Vec<Scene>, StoreError> {
        self.inner.scenes_of(conversation_uid).await
    }
    async fn turns_of(&self, scene_uid: &Uid) -> Result<Vec<Turn>, StoreError> {
        self.inner.turns_of(scene_uid).await
    }
    async fn templates_of(&self, intent_uid: &Uid) -> Result<Vec<MessageTemplate>, StoreError> {
        self.inner.templates_of(intent_uid).await
    }
    async fn get_turn_with_intent(
        &self,
        turn_uid: &Uid,
        intent_uid: &Uid,
    ) -> Result<Turn, StoreError> {
        self.inner.get_turn_with_intent(turn_uid, intent_uid).await
    }
    async fn add_conversation(
        &self,
        scenario_uid: &Uid,
        conversation: Conversation,
    ) -> Result<Conversation, StoreError> {
        self.inner.add_conversation(scenario_uid, conversation).await
    }
    async fn add_request_intent(
        &self,
        turn_uid: &Uid,
        intent: Intent,
    ) -> Result<Intent, StoreError> {
        self.inner.add_request_intent(turn_uid, intent).await
    }
    async fn add_response_intent(
        &self,
        turn_uid: &Uid,
        intent: Intent,
    ) -> Result<Intent, StoreError> {
        self.inner.add_response_intent(turn_uid, intent).await
    }
    async fn add_message_template(
        &self,
        intent_uid: &Uid,
        template: MessageTemplate,
    ) -> Result<MessageTemplate, StoreError> {
        self.inner.add_message_template(intent_uid, template).await
    }
    async fn add_full_scenario_graph(&self, scenario: Scenario) -> Result<Scenario, StoreError> {
        self.inner.add_full_scenario_graph(scenario).await
    }
    async fn update_scenario(&self, scenario: Scenario) -> Result<Scenario, StoreError> {
        if self.fail_update_scenario.swap(false, Ordering::SeqCst) {
            return Err(StoreError::Transport(TransportError::Rejected(
                "injected failure".to_string(),
            )));
        }
        self.inner.update_scenario(scenario).await
    }
    async fn update_conversation(
        &self,
        conversation: Conversation,
    ) -> Result<Conversation, StoreError> {
        self.inner.update_conversation(conversation).await
    }
    async fn update_turn(&self, turn: Turn) -> Result<Turn, StoreError> {
        self.inner.update_turn(turn).await
    }
    async fn update_intent(&self, intent: Intent) -> Result<Intent, StoreError> {
        self.inner.update_intent(intent).await
    }
    async fn update_turn_intent_relation(
        &self,
        turn_uid: &Uid,
        intent_uid: &Uid,
        direction: Direction,
    ) -> Result<(), StoreError> {
        self.inner
            .update_turn_intent_relation(turn_uid, intent_uid, direction)
            .await
    }
    async fn delete_scenario(&self, uid: &Uid) -> Result<(), StoreError> {
        self.inner.delete_scenario(uid).await
    }
    async fn delete_turn(&self, uid: &Uid) -> Result<(), StoreError> {
        self.inner.delete_turn(uid).await
    }
    async fn delete_intent(&self, uid: &Uid) -> Result<(), StoreError> {
        self.inner.delete_intent(uid).await
    }
    async fn delete_turn_intent(
        &self,
        turn_uid: &Uid,
        intent_uid: &Uid,
    ) -> Result<(), StoreError> {
        self.inner.delete_turn_intent(turn_uid, intent_uid).await
    }
}
