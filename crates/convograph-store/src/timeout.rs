//! Deadline enforcement at the store-call boundary
//!
//! The underlying operations define no timeout of their own; [`TimedClient`]
//! wraps any [`DataClient`] and imposes one per call. An elapsed deadline or
//! a cancelled call surfaces as a [`TransportError`], never as a business
//! error.

use crate::client::DataClient;
use crate::error::{StoreError, TransportError};
use crate::page::{Page, PageRequest};
use async_trait::async_trait;
use convograph_model::{
    Conversation, Direction, Intent, MessageTemplate, Scenario, Scene, Turn, Uid,
};
use std::future::Future;
use std::time::Duration;

/// [`DataClient`] decorator with a per-call deadline
#[derive(Debug)]
pub struct TimedClient<C> {
    inner: C,
    timeout: Duration,
}

impl<C: DataClient> TimedClient<C> {
    #[must_use]
    pub fn new(inner: C, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    /// The wrapped client
    #[inline]
    #[must_use]
    pub fn inner(&self) -> &C {
        &self.inner
    }

    async fn timed<T, F>(&self, fut: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, StoreError>> + Send,
    {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(result) => result,
            Err(_) => Err(StoreError::Transport(TransportError::Timeout {
                timeout: self.timeout,
            })),
        }
    }
}

#[async_trait]
impl<C: DataClient> DataClient for TimedClient<C> {
    async fn get_scenario(&self, uid: &Uid) -> Result<Scenario, StoreError> {
        self.timed(self.inner.get_scenario(uid)).await
    }

    async fn get_conversation(&self, uid: &Uid) -> Result<Conversation, StoreError> {
        self.timed(self.inner.get_conversation(uid)).await
    }

    async fn get_scene(&self, uid: &Uid) -> Result<Scene, StoreError> {
        self.timed(self.inner.get_scene(uid)).await
    }

    async fn get_turn(&self, uid: &Uid) -> Result<Turn, StoreError> {
        self.timed(self.inner.get_turn(uid)).await
    }

    async fn get_intent(&self, uid: &Uid) -> Result<Intent, StoreError> {
        self.timed(self.inner.get_intent(uid)).await
    }

    async fn get_message_template(&self, uid: &Uid) -> Result<MessageTemplate, StoreError> {
        self.timed(self.inner.get_message_template(uid)).await
    }

    async fn list_scenarios(&self, page: PageRequest) -> Result<Page<Scenario>, StoreError> {
        self.timed(self.inner.list_scenarios(page)).await
    }

    async fn list_intents(&self, page: PageRequest) -> Result<Page<Intent>, StoreError> {
        self.timed(self.inner.list_intents(page)).await
    }

    async fn conversations_of(&self, scenario_uid: &Uid) -> Result<Vec<Conversation>, StoreError> {
        self.timed(self.inner.conversations_of(scenario_uid)).await
    }

    async fn scenes_of(&self, conversation_uid: &Uid) -> Result<Vec<Scene>, StoreError> {
        self.timed(self.inner.scenes_of(conversation_uid)).await
    }

    async fn turns_of(&self, scene_uid: &Uid) -> Result<Vec<Turn>, StoreError> {
        self.timed(self.inner.turns_of(scene_uid)).await
    }

    async fn templates_of(&self, intent_uid: &Uid) -> Result<Vec<MessageTemplate>, StoreError> {
        self.timed(self.inner.templates_of(intent_uid)).await
    }

    async fn get_turn_with_intent(
        &self,
        turn_uid: &Uid,
        intent_uid: &Uid,
    ) -> Result<Turn, StoreError> {
        self.timed(self.inner.get_turn_with_intent(turn_uid, intent_uid))
            .await
    }

    async fn add_conversation(
        &self,
        scenario_uid: &Uid,
        conversation: Conversation,
    ) -> Result<Conversation, StoreError> {
        self.timed(self.inner.add_conversation(scenario_uid, conversation))
            .await
    }

    async fn add_request_intent(
        &self,
        turn_uid: &Uid,
        intent: Intent,
    ) -> Result<Intent, StoreError> {
        self.timed(self.inner.add_request_intent(turn_uid, intent))
            .await
    }

    async fn add_response_intent(
        &self,
        turn_uid: &Uid,
        intent: Intent,
    ) -> Result<Intent, StoreError> {
        self.timed(self.inner.add_response_intent(turn_uid, intent))
            .await
    }

    async fn add_message_template(
        &self,
        intent_uid: &Uid,
        template: MessageTemplate,
    ) -> Result<MessageTemplate, StoreError> {
        self.timed(self.inner.add_message_template(intent_uid, template))
            .await
    }

    async fn add_full_scenario_graph(&self, scenario: Scenario) -> Result<Scenario, StoreError> {
        self.timed(self.inner.add_full_scenario_graph(scenario))
            .await
    }

    async fn update_scenario(&self, scenario: Scenario) -> Result<Scenario, StoreError> {
        self.timed(self.inner.update_scenario(scenario)).await
    }

    async fn update_conversation(
        &self,
        conversation: Conversation,
    ) -> Result<Conversation, StoreError> {
        self.timed(self.inner.update_conversation(conversation)).await
    }

    async fn update_turn(&self, turn: Turn) -> Result<Turn, StoreError> {
        self.timed(self.inner.update_turn(turn)).await
    }

    async fn update_intent(&self, intent: Intent) -> Result<Intent, StoreError> {
        self.timed(self.inner.update_intent(intent)).await
    }

    async fn update_turn_intent_relation(
        &self,
        turn_uid: &Uid,
        intent_uid: &Uid,
        direction: Direction,
    ) -> Result<(), StoreError> {
        self.timed(
            self.inner
                .update_turn_intent_relation(turn_uid, intent_uid, direction),
        )
        .await
    }

    async fn delete_scenario(&self, uid: &Uid) -> Result<(), StoreError> {
        self.timed(self.inner.delete_scenario(uid)).await
    }

    async fn delete_turn(&self, uid: &Uid) -> Result<(), StoreError> {
        self.timed(self.inner.delete_turn(uid)).await
    }

    async fn delete_intent(&self, uid: &Uid) -> Result<(), StoreError> {
        self.timed(self.inner.delete_intent(uid)).await
    }

    async fn delete_turn_intent(
        &self,
        turn_uid: &Uid,
        intent_uid: &Uid,
    ) -> Result<(), StoreError> {
        self.timed(self.inner.delete_turn_intent(turn_uid, intent_uid))
            .await
    }
}
